use super::render_table;
use crate::api::BillingApi;
use crate::format::format_cents;
use crate::types::Plan;

/// The plan catalog.
#[derive(Debug, Default)]
pub struct PlansScreen {
    plans: Vec<Plan>,
    error: String,
}

impl PlansScreen {
    pub fn load(&mut self, api: &impl BillingApi) -> bool {
        self.error.clear();
        match api.list_plans() {
            Ok(plans) => {
                self.plans = plans;
                true
            }
            Err(err) => {
                self.error = err.to_string();
                false
            }
        }
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn error(&self) -> Option<&str> {
        (!self.error.is_empty()).then_some(self.error.as_str())
    }

    pub fn render(&self) -> String {
        let mut out = vec!["Plans".to_string()];
        if let Some(error) = self.error() {
            out.push(error.to_string());
        }
        if !self.plans.is_empty() {
            let rows = self
                .plans
                .iter()
                .map(|plan| {
                    vec![
                        plan.name.clone(),
                        plan.code.to_uppercase(),
                        format!("{}/mo", format_cents(plan.amount_cents)),
                        format!("Trial: {}d", plan.trial_days),
                    ]
                })
                .collect();
            out.push(render_table(&["Plan", "Code", "Price", "Trial"], rows));
        }
        out.join("\n")
    }
}
