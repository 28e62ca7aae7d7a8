use super::{status_cell, LoadStatus, LoadTicket, RowLoader};
use crate::api::BillingApi;
use crate::error::ApiError;
use crate::format::{format_cents, format_optional_timestamp, format_timestamp};
use crate::types::Invoice;

/// A user's invoice history.
#[derive(Debug, Default)]
pub struct InvoicesScreen {
    pub user_id: String,
    loader: RowLoader<Invoice>,
}

impl InvoicesScreen {
    pub fn load(&mut self, api: &impl BillingApi) -> bool {
        let ticket = self.begin_load();
        let result = api.list_invoices(&self.user_id);
        let ok = result.is_ok();
        self.finish_load(ticket, result) && ok
    }

    /// Split form of `load` for callers that complete loads out of band.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.loader.begin()
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Invoice>, ApiError>,
    ) -> bool {
        self.loader.finish(ticket, result)
    }

    pub fn status(&self) -> LoadStatus {
        self.loader.status()
    }

    pub fn rows(&self) -> &[Invoice] {
        self.loader.rows()
    }

    pub fn error(&self) -> Option<&str> {
        self.loader.error()
    }

    pub fn render(&self) -> String {
        self.loader.render(
            "Invoices",
            "No invoices.",
            &["ID", "Period", "Amount", "Status", "Created", "Paid"],
            |invoice| {
                vec![
                    invoice.id.clone(),
                    format!("{} → {}", invoice.period_start, invoice.period_end),
                    format_cents(invoice.amount_cents),
                    status_cell(invoice.tone(), &invoice.status),
                    format_timestamp(&invoice.created_at),
                    format_optional_timestamp(invoice.paid_at.as_deref()),
                ]
            },
        )
    }
}
