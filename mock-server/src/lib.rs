//! In-memory stand-in for the billing service's HTTP contract.
//!
//! Prices and periods here are fixtures for exercising the console, not
//! billing rules: an invoice totals the plan's list price and reports the
//! metered usage of its period without charging for it.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Days, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

const PERIOD_DAYS: u64 = 30;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Plan {
    pub code: String,
    pub name: String,
    pub amount_cents: i64,
    pub interval: String,
    pub trial_days: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

#[derive(Clone, Debug)]
pub struct Subscription {
    pub id: String,
    pub plan_code: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

#[derive(Clone, Debug)]
pub struct UsageEvent {
    pub user_id: String,
    pub metric: String,
    pub quantity: i64,
    pub at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub user_id: String,
    pub period_start: String,
    pub period_end: String,
    pub amount_cents: i64,
    pub status: String,
    pub created_at: String,
    pub paid_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub invoice_id: String,
    pub provider: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Deserialize)]
pub struct UserCreate {
    pub email: String,
}

#[derive(Deserialize)]
pub struct SubscriptionCreate {
    pub user_id: String,
    pub plan_code: String,
}

#[derive(Deserialize)]
pub struct UsageEventIn {
    pub user_id: String,
    pub metric: String,
    pub quantity: i64,
}

/// Everything the mock remembers. Records are appended in creation order.
#[derive(Debug)]
pub struct Store {
    pub plans: Vec<Plan>,
    pub users: HashMap<String, User>,
    pub subscriptions: HashMap<String, Subscription>,
    pub usage: Vec<UsageEvent>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
}

impl Default for Store {
    fn default() -> Self {
        let plan = |code: &str, name: &str, amount_cents, trial_days| Plan {
            code: code.to_string(),
            name: name.to_string(),
            amount_cents,
            interval: "month".to_string(),
            trial_days,
        };
        Self {
            plans: vec![
                plan("basic", "Basic", 9900, 14),
                plan("pro", "Pro", 19900, 14),
                plan("ent", "Enterprise", 49900, 30),
            ],
            users: HashMap::new(),
            subscriptions: HashMap::new(),
            usage: Vec::new(),
            invoices: Vec::new(),
            payments: Vec::new(),
        }
    }
}

impl Store {
    /// Mark an invoice paid and record a succeeded payment for it. Stands in
    /// for the payment provider's webhook, which the HTTP contract omits.
    pub fn settle_invoice(&mut self, invoice_id: &str, provider: &str) -> Option<Payment> {
        let now = timestamp();
        let invoice = self.invoices.iter_mut().find(|i| i.id == invoice_id)?;
        invoice.status = "paid".to_string();
        invoice.paid_at = Some(now.clone());
        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            invoice_id: invoice_id.to_string(),
            provider: provider.to_string(),
            status: "succeeded".to_string(),
            created_at: now,
        };
        self.payments.push(payment.clone());
        Some(payment)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_store(Db::default())
}

/// Router over a caller-held store, so tests can seed or inspect it.
pub fn app_with_store(db: Db) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/plans", get(list_plans))
        .route("/users", post(create_user))
        .route("/subscriptions", post(create_subscription))
        .route("/usage", post(track_usage))
        .route("/invoices/generate/{user_id}", post(generate_invoice))
        .route("/invoices/{user_id}", get(list_invoices))
        .route("/payments/{user_id}", get(list_payments))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_store(listener, Db::default()).await
}

pub async fn run_with_store(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock billing server listening");
    }
    axum::serve(listener, app_with_store(db)).await
}

fn timestamp() -> String {
    Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Error shaped like the service's `{"detail": ...}` bodies.
fn not_found(detail: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_plans(State(db): State<Db>) -> Json<Vec<Plan>> {
    let store = db.read().await;
    let mut plans = store.plans.clone();
    plans.sort_by_key(|plan| plan.amount_cents);
    Json(plans)
}

async fn create_user(State(db): State<Db>, Json(input): Json<UserCreate>) -> Json<User> {
    let user = User {
        id: Uuid::new_v4().to_string(),
        email: input.email,
    };
    db.write().await.users.insert(user.id.clone(), user.clone());
    Json(user)
}

async fn create_subscription(
    State(db): State<Db>,
    Json(input): Json<SubscriptionCreate>,
) -> Response {
    let mut store = db.write().await;
    if !store.users.contains_key(&input.user_id) {
        return not_found("user not found");
    }
    if !store.plans.iter().any(|plan| plan.code == input.plan_code) {
        return not_found("plan not found");
    }
    let start = Utc::now().date_naive();
    let end = start + Days::new(PERIOD_DAYS);
    let subscription = Subscription {
        id: Uuid::new_v4().to_string(),
        plan_code: input.plan_code,
        period_start: start,
        period_end: end,
    };
    let body = json!({
        "id": subscription.id,
        "status": "active",
        "current_period_start": start.to_string(),
        "current_period_end": end.to_string(),
    });
    store.subscriptions.insert(input.user_id, subscription);
    Json(body).into_response()
}

async fn track_usage(State(db): State<Db>, Json(input): Json<UsageEventIn>) -> Json<Value> {
    db.write().await.usage.push(UsageEvent {
        user_id: input.user_id,
        metric: input.metric,
        quantity: input.quantity,
        at: Utc::now().naive_utc(),
    });
    Json(json!({ "ok": true }))
}

async fn generate_invoice(State(db): State<Db>, Path(user_id): Path<String>) -> Response {
    let mut store = db.write().await;
    let Some(subscription) = store.subscriptions.get(&user_id).cloned() else {
        return not_found("active subscription not found");
    };
    let in_period = |at: &NaiveDateTime| {
        let day = at.date();
        day >= subscription.period_start && day < subscription.period_end
    };
    let usage: i64 = store
        .usage
        .iter()
        .filter(|event| event.user_id == user_id && in_period(&event.at))
        .map(|event| event.quantity)
        .sum();
    let amount_cents = store
        .plans
        .iter()
        .find(|plan| plan.code == subscription.plan_code)
        .map_or(0, |plan| plan.amount_cents);

    let invoice = Invoice {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.clone(),
        period_start: subscription.period_start.to_string(),
        period_end: subscription.period_end.to_string(),
        amount_cents,
        status: "open".to_string(),
        created_at: timestamp(),
        paid_at: None,
    };
    let body = json!({
        "id": invoice.id,
        "user_id": user_id,
        "amount_cents": amount_cents,
        "usage": usage,
    });
    store.invoices.push(invoice);
    Json(body).into_response()
}

async fn list_invoices(State(db): State<Db>, Path(user_id): Path<String>) -> Json<Vec<Invoice>> {
    let store = db.read().await;
    Json(
        store
            .invoices
            .iter()
            .rev()
            .filter(|invoice| invoice.user_id == user_id)
            .cloned()
            .collect(),
    )
}

async fn list_payments(State(db): State<Db>, Path(user_id): Path<String>) -> Json<Vec<Payment>> {
    let store = db.read().await;
    Json(
        store
            .payments
            .iter()
            .rev()
            .filter(|payment| {
                store
                    .invoices
                    .iter()
                    .any(|invoice| invoice.id == payment.invoice_id && invoice.user_id == user_id)
            })
            .cloned()
            .collect(),
    )
}
