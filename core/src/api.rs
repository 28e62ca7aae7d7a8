//! The client bound to a transport.
//!
//! `Api` is where a built request actually leaves the process: it runs the
//! request through a `Transport`, logs the exchange, and hands the response
//! back to `BillingClient` for parsing. Screens depend on the `BillingApi`
//! trait rather than on `Api` so they can be driven by any implementation.

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::BillingClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{
    CreateSubscription, CreateUser, GeneratedInvoice, Invoice, Payment, Plan, RecordUsage,
    ResponseBody, User,
};

/// Per-call options for `Api::request`.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// The operations the console issues against the billing service.
pub trait BillingApi {
    fn health(&self) -> Result<ResponseBody, ApiError>;
    fn list_plans(&self) -> Result<Vec<Plan>, ApiError>;
    fn create_user(&self, email: &str) -> Result<User, ApiError>;
    fn create_subscription(&self, user_id: &str, plan_code: &str) -> Result<Value, ApiError>;
    fn record_usage(&self, user_id: &str, metric: &str, quantity: i64)
        -> Result<Value, ApiError>;
    fn generate_invoice(&self, user_id: &str) -> Result<GeneratedInvoice, ApiError>;
    fn list_invoices(&self, user_id: &str) -> Result<Vec<Invoice>, ApiError>;
    fn list_payments(&self, user_id: &str) -> Result<Vec<Payment>, ApiError>;
}

/// A `BillingClient` paired with the transport that executes its requests.
///
/// Every call is fire-once: no retries, no timeout beyond the transport's
/// own, no cancellation.
#[derive(Debug)]
pub struct Api<T> {
    client: BillingClient,
    transport: T,
}

impl<T: Transport> Api<T> {
    pub fn new(client: BillingClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &BillingClient {
        &self.client
    }

    /// Untyped request against `base + path`.
    pub fn request(&self, path: &str, options: RequestOptions) -> Result<ResponseBody, ApiError> {
        let request =
            self.client
                .build_request(options.method, path, &options.headers, options.body);
        let response = self.send(request)?;
        self.client.parse_response(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        debug!(%method, %url, "sending request");
        match self.transport.execute(request) {
            Ok(response) => {
                if response.is_success() {
                    debug!(%method, %url, status = response.status, "request succeeded");
                } else {
                    warn!(%method, %url, status = response.status, "request rejected");
                }
                Ok(response)
            }
            Err(err) => {
                warn!(%method, %url, error = %err, "request failed");
                Err(err)
            }
        }
    }
}

impl<T: Transport> BillingApi for Api<T> {
    fn health(&self) -> Result<ResponseBody, ApiError> {
        let response = self.send(self.client.build_health())?;
        self.client.parse_health(response)
    }

    fn list_plans(&self) -> Result<Vec<Plan>, ApiError> {
        let response = self.send(self.client.build_list_plans())?;
        self.client.parse_list_plans(response)
    }

    fn create_user(&self, email: &str) -> Result<User, ApiError> {
        let input = CreateUser {
            email: email.to_string(),
        };
        let response = self.send(self.client.build_create_user(&input)?)?;
        self.client.parse_create_user(response)
    }

    fn create_subscription(&self, user_id: &str, plan_code: &str) -> Result<Value, ApiError> {
        let input = CreateSubscription {
            user_id: user_id.to_string(),
            plan_code: plan_code.to_string(),
        };
        let response = self.send(self.client.build_create_subscription(&input)?)?;
        self.client.parse_create_subscription(response)
    }

    fn record_usage(
        &self,
        user_id: &str,
        metric: &str,
        quantity: i64,
    ) -> Result<Value, ApiError> {
        let input = RecordUsage {
            user_id: user_id.to_string(),
            metric: metric.to_string(),
            quantity,
        };
        let response = self.send(self.client.build_record_usage(&input)?)?;
        self.client.parse_record_usage(response)
    }

    fn generate_invoice(&self, user_id: &str) -> Result<GeneratedInvoice, ApiError> {
        let response = self.send(self.client.build_generate_invoice(user_id))?;
        self.client.parse_generate_invoice(response)
    }

    fn list_invoices(&self, user_id: &str) -> Result<Vec<Invoice>, ApiError> {
        let response = self.send(self.client.build_list_invoices(user_id))?;
        self.client.parse_list_invoices(response)
    }

    fn list_payments(&self, user_id: &str) -> Result<Vec<Payment>, ApiError> {
        let response = self.send(self.client.build_list_payments(user_id))?;
        self.client.parse_list_payments(response)
    }
}
