//! One operator session: every screen, driven by one API.

use billing_core::screens::{
    BillingScreen, DashboardScreen, InvoicesScreen, PaymentsScreen, PlansScreen, UsersScreen,
};
use billing_core::BillingApi;

use crate::cli::{Action, Screen};

/// What an action left on screen, and whether its request succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub screen: String,
    pub ok: bool,
}

pub struct Session<A> {
    api: A,
    dashboard: DashboardScreen,
    plans: PlansScreen,
    users: UsersScreen,
    billing: BillingScreen,
    invoices: InvoicesScreen,
    payments: PaymentsScreen,
}

impl<A: BillingApi> Session<A> {
    pub fn new(api: A, api_base: &str) -> Self {
        Self {
            api,
            dashboard: DashboardScreen::new(api_base),
            plans: PlansScreen::default(),
            users: UsersScreen::default(),
            billing: BillingScreen::default(),
            invoices: InvoicesScreen::default(),
            payments: PaymentsScreen::default(),
        }
    }

    /// Apply inputs carried by `action` to its screen, issue the screen's
    /// request, and render the result.
    pub fn run(&mut self, action: Action) -> Outcome {
        let (screen, ok) = match action {
            Action::Health => (Screen::Dashboard, self.dashboard.refresh(&self.api)),
            Action::Plans => (Screen::Plans, self.plans.load(&self.api)),
            Action::CreateUser { email } => {
                if let Some(email) = email {
                    self.users.email = email;
                }
                (Screen::Users, self.users.create(&self.api))
            }
            Action::Subscribe { user_id, plan } => {
                if let Some(user_id) = user_id {
                    self.users.use_existing_user(&user_id);
                }
                if let Some(plan) = plan {
                    self.users.select_plan(&plan);
                }
                (Screen::Users, self.users.subscribe(&self.api))
            }
            Action::Usage {
                user_id,
                metric,
                quantity,
            } => {
                if let Some(user_id) = user_id {
                    self.billing.user_id = user_id;
                }
                if let Some(metric) = metric {
                    self.billing.metric = metric;
                }
                if let Some(quantity) = quantity {
                    self.billing.quantity = quantity;
                }
                (Screen::Billing, self.billing.record_usage(&self.api))
            }
            Action::GenerateInvoice { user_id } => {
                if let Some(user_id) = user_id {
                    self.billing.user_id = user_id;
                }
                (Screen::Billing, self.billing.generate_invoice(&self.api))
            }
            Action::Invoices { user_id } => {
                if let Some(user_id) = user_id {
                    self.invoices.user_id = user_id;
                }
                (Screen::Invoices, self.invoices.load(&self.api))
            }
            Action::Payments { user_id } => {
                if let Some(user_id) = user_id {
                    self.payments.user_id = user_id;
                }
                (Screen::Payments, self.payments.load(&self.api))
            }
            Action::Show { screen } => (screen, true),
        };
        Outcome {
            screen: self.render(screen),
            ok,
        }
    }

    pub fn render(&self, screen: Screen) -> String {
        match screen {
            Screen::Dashboard => self.dashboard.render(),
            Screen::Plans => self.plans.render(),
            Screen::Users => self.users.render(),
            Screen::Billing => self.billing.render(),
            Screen::Invoices => self.invoices.render(),
            Screen::Payments => self.payments.render(),
        }
    }
}
