//! Screen state for the operator console.
//!
//! # Design
//! Each screen owns its inputs and whatever it last displayed; nothing is
//! shared between screens and nothing is cached. An action maps to exactly
//! one `BillingApi` call whose result (or error text) replaces the screen's
//! display state. `render` turns that state into plain text.
//!
//! The history screens load through `RowLoader`, which numbers each load.
//! A completion is applied only if it belongs to the most recently started
//! load, so a slow response can never overwrite a newer one.

mod billing;
mod dashboard;
mod invoices;
mod payments;
mod plans;
mod users;

pub use billing::BillingScreen;
pub use dashboard::DashboardScreen;
pub use invoices::InvoicesScreen;
pub use payments::PaymentsScreen;
pub use plans::PlansScreen;
pub use users::{UsersScreen, PLAN_CHOICES};

use tracing::debug;

use crate::error::ApiError;
use crate::types::StatusTone;

/// Load status of a list screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Identifies one load issued by a `RowLoader`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Rows, status and error text of a list screen.
#[derive(Debug)]
pub struct RowLoader<R> {
    generation: u64,
    status: LoadStatus,
    rows: Vec<R>,
    error: String,
}

impl<R> Default for RowLoader<R> {
    fn default() -> Self {
        Self {
            generation: 0,
            status: LoadStatus::Idle,
            rows: Vec::new(),
            error: String::new(),
        }
    }
}

impl<R> RowLoader<R> {
    /// Enter `Loading`, clear the error, and supersede any pending load.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.status = LoadStatus::Loading;
        self.error.clear();
        LoadTicket(self.generation)
    }

    /// Apply a completed load. Returns `false` and changes nothing when a
    /// newer load has begun since `ticket` was issued.
    ///
    /// A failure keeps the rows from the last successful load.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<Vec<R>, ApiError>) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "discarding stale load"
            );
            return false;
        }
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.status = LoadStatus::Idle;
            }
            Err(err) => {
                self.error = err.to_string();
                self.status = LoadStatus::Error;
            }
        }
        true
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn error(&self) -> Option<&str> {
        (!self.error.is_empty()).then_some(self.error.as_str())
    }

    /// Loading line, error line, then the table, or `empty` when an idle
    /// load found nothing.
    fn render(
        &self,
        title: &str,
        empty: &str,
        headers: &[&str],
        row: impl Fn(&R) -> Vec<String>,
    ) -> String {
        let mut out = vec![title.to_string()];
        if self.status == LoadStatus::Loading {
            out.push("Loading…".to_string());
        }
        if let Some(error) = self.error() {
            out.push(error.to_string());
        }
        if !self.rows.is_empty() {
            out.push(render_table(headers, self.rows.iter().map(row).collect()));
        } else if self.status == LoadStatus::Idle {
            out.push(empty.to_string());
        }
        out.join("\n")
    }
}

/// Status column text: the tone marker, then the status as sent.
pub(crate) fn status_cell(tone: StatusTone, status: &str) -> String {
    format!("{} {status}", tone.marker())
}

/// Left-aligned columns separated by two spaces, header underlined.
pub(crate) fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let line = |cells: &Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    [&headers, &rule]
        .into_iter()
        .chain(rows.iter())
        .map(line)
        .collect::<Vec<_>>()
        .join("\n")
}
