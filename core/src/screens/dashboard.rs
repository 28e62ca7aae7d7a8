use crate::api::BillingApi;

const CHECKING: &str = "checking...";
const HEALTHY: &str = "ok";

/// Landing screen: which API the console talks to and whether it answers.
#[derive(Debug)]
pub struct DashboardScreen {
    api_base: String,
    status: String,
}

impl DashboardScreen {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.to_string(),
            status: CHECKING.to_string(),
        }
    }

    /// Check `/healthz`. The response body is ignored; only success matters.
    pub fn refresh(&mut self, api: &impl BillingApi) -> bool {
        match api.health() {
            Ok(_) => {
                self.status = HEALTHY.to_string();
                true
            }
            Err(err) => {
                self.status = err.to_string();
                false
            }
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }

    pub fn render(&self) -> String {
        format!(
            "Dashboard\nAPI: {}\nAPI health: {}",
            self.api_base, self.status
        )
    }
}
