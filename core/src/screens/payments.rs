use super::{status_cell, LoadStatus, LoadTicket, RowLoader};
use crate::api::BillingApi;
use crate::error::ApiError;
use crate::format::format_timestamp;
use crate::types::Payment;

/// Settlement attempts against a user's invoices.
#[derive(Debug, Default)]
pub struct PaymentsScreen {
    pub user_id: String,
    loader: RowLoader<Payment>,
}

impl PaymentsScreen {
    pub fn load(&mut self, api: &impl BillingApi) -> bool {
        let ticket = self.begin_load();
        let result = api.list_payments(&self.user_id);
        let ok = result.is_ok();
        self.finish_load(ticket, result) && ok
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loader.begin()
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Payment>, ApiError>,
    ) -> bool {
        self.loader.finish(ticket, result)
    }

    pub fn status(&self) -> LoadStatus {
        self.loader.status()
    }

    pub fn rows(&self) -> &[Payment] {
        self.loader.rows()
    }

    pub fn error(&self) -> Option<&str> {
        self.loader.error()
    }

    pub fn render(&self) -> String {
        self.loader.render(
            "Payments",
            "No payments.",
            &["Payment", "Invoice", "Provider", "Status", "Created"],
            |payment| {
                vec![
                    payment.id.clone(),
                    payment.invoice_id.clone(),
                    payment.provider.clone(),
                    status_cell(payment.tone(), &payment.status),
                    format_timestamp(&payment.created_at),
                ]
            },
        )
    }
}
