use serde_json::Map;

use crate::api::BillingApi;
use crate::types::User;

/// Plan codes the subscribe action offers.
pub const PLAN_CHOICES: [&str; 3] = ["basic", "pro", "ent"];

const DEFAULT_EMAIL: &str = "demo@example.com";

/// Create a user, then subscribe that user to a plan.
#[derive(Debug)]
pub struct UsersScreen {
    pub email: String,
    plan: String,
    user: Option<User>,
    message: String,
}

impl Default for UsersScreen {
    fn default() -> Self {
        Self {
            email: DEFAULT_EMAIL.to_string(),
            plan: PLAN_CHOICES[0].to_string(),
            user: None,
            message: String::new(),
        }
    }
}

impl UsersScreen {
    pub fn plan(&self) -> &str {
        &self.plan
    }

    /// Select one of `PLAN_CHOICES`. Unknown codes are refused.
    pub fn select_plan(&mut self, code: &str) -> bool {
        if !PLAN_CHOICES.contains(&code) {
            return false;
        }
        self.plan = code.to_string();
        true
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Subscribe an already existing user instead of creating one.
    pub fn use_existing_user(&mut self, user_id: &str) {
        self.user = Some(User {
            id: user_id.to_string(),
            email: String::new(),
            extra: Map::new(),
        });
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn create(&mut self, api: &impl BillingApi) -> bool {
        self.message.clear();
        match api.create_user(&self.email) {
            Ok(user) => {
                self.user = Some(user);
                self.message = "user created".to_string();
                true
            }
            Err(err) => {
                self.message = err.to_string();
                false
            }
        }
    }

    /// Subscribe the created user to the selected plan. Without a user no
    /// request is sent.
    pub fn subscribe(&mut self, api: &impl BillingApi) -> bool {
        let Some(user) = &self.user else {
            self.message = "create a user first".to_string();
            return false;
        };
        self.message.clear();
        match api.create_subscription(&user.id, &self.plan) {
            Ok(subscription) => {
                self.message = format!("subscribed: {subscription}");
                true
            }
            Err(err) => {
                self.message = err.to_string();
                false
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = vec![
            "Users & Subscriptions".to_string(),
            format!("email: {}", self.email),
        ];
        if let Some(user) = &self.user {
            out.push(format!("id: {}", user.id));
        }
        out.push(format!("plan: {}", self.plan));
        if !self.message.is_empty() {
            out.push(self.message.clone());
        }
        out.join("\n")
    }
}
