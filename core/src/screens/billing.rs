use crate::api::BillingApi;

const DEFAULT_METRIC: &str = "api_calls";
const DEFAULT_QUANTITY: i64 = 1000;

/// Record usage for a user and generate their invoice.
#[derive(Debug)]
pub struct BillingScreen {
    pub user_id: String,
    pub metric: String,
    pub quantity: i64,
    output: String,
}

impl Default for BillingScreen {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            metric: DEFAULT_METRIC.to_string(),
            quantity: DEFAULT_QUANTITY,
            output: String::new(),
        }
    }
}

impl BillingScreen {
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn record_usage(&mut self, api: &impl BillingApi) -> bool {
        self.output.clear();
        match api.record_usage(&self.user_id, &self.metric, self.quantity) {
            Ok(_) => {
                self.output = "usage recorded".to_string();
                true
            }
            Err(err) => {
                self.output = err.to_string();
                false
            }
        }
    }

    /// Generate an invoice and show it as pretty-printed JSON.
    pub fn generate_invoice(&mut self, api: &impl BillingApi) -> bool {
        self.output.clear();
        let invoice = match api.generate_invoice(&self.user_id) {
            Ok(invoice) => invoice,
            Err(err) => {
                self.output = err.to_string();
                return false;
            }
        };
        match serde_json::to_string_pretty(&invoice) {
            Ok(json) => {
                self.output = json;
                true
            }
            Err(err) => {
                self.output = err.to_string();
                false
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = vec![
            "Billing".to_string(),
            format!("user_id: {}", self.user_id),
            format!("metric: {}  quantity: {}", self.metric, self.quantity),
        ];
        if !self.output.is_empty() {
            out.push(self.output.clone());
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Api;
    use crate::client::BillingClient;
    use crate::test_support::ScriptedTransport;
    use serde_json::{json, Value};

    #[test]
    fn defaults() {
        let screen = BillingScreen::default();
        assert_eq!(screen.metric, "api_calls");
        assert_eq!(screen.quantity, 1000);
    }

    #[test]
    fn record_usage_sends_inputs() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"ok": true}));
        let api = Api::new(BillingClient::new("http://billing.test"), &transport);

        let mut screen = BillingScreen {
            user_id: "u1".to_string(),
            ..BillingScreen::default()
        };
        assert!(screen.record_usage(&api));
        assert_eq!(screen.output(), "usage recorded");

        let body: Value =
            serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"user_id": "u1", "metric": "api_calls", "quantity": 1000})
        );
    }

    #[test]
    fn generate_invoice_shows_pretty_json() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            json!({"id": "i1", "user_id": "u1", "amount_cents": 9900, "usage": 1000}),
        );
        let api = Api::new(BillingClient::new("http://billing.test"), &transport);

        let mut screen = BillingScreen {
            user_id: "u1".to_string(),
            ..BillingScreen::default()
        };
        assert!(screen.generate_invoice(&api));
        let shown: Value = serde_json::from_str(screen.output()).unwrap();
        assert_eq!(shown["amount_cents"], 9900);
        assert!(screen.output().contains('\n'));
        assert_eq!(
            transport.requests()[0].url,
            "http://billing.test/invoices/generate/u1"
        );
    }

    #[test]
    fn generated_invoice_extra_fields_keep_server_order() {
        let transport = ScriptedTransport::new();
        transport.push_json_text(
            200,
            r#"{"id":"i1","user_id":"u1","amount_cents":9900,"status":"open","currency":"usd"}"#,
        );
        let api = Api::new(BillingClient::new("http://billing.test"), &transport);

        let mut screen = BillingScreen::default();
        screen.user_id = "u1".to_string();
        assert!(screen.generate_invoice(&api));
        let output = screen.output();
        let status = output.find("\"status\"").unwrap();
        let currency = output.find("\"currency\"").unwrap();
        assert!(status < currency);
    }

    #[test]
    fn generate_invoice_failure_shows_error() {
        let transport = ScriptedTransport::new();
        transport.push_json(404, json!({"detail": "active subscription not found"}));
        let api = Api::new(BillingClient::new("http://billing.test"), &transport);

        let mut screen = BillingScreen::default();
        assert!(!screen.generate_invoice(&api));
        assert_eq!(
            screen.output(),
            r#"404: {"detail":"active subscription not found"}"#
        );
    }
}
