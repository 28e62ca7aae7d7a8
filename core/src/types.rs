//! Domain DTOs for the billing API.
//!
//! # Design
//! The billing service owns these records; the client only names the fields
//! the console displays. Anything else the server sends lands in `extra`
//! and is written back out unchanged when a record is re-serialized, so the
//! console never drops data it does not understand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A billing tier with a monthly price and trial length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    pub code: String,
    pub name: String,
    pub amount_cents: i64,
    #[serde(default)]
    pub trial_days: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of a user's invoice history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Invoice {
    pub id: String,
    pub period_start: String,
    pub period_end: String,
    pub amount_cents: i64,
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Invoice {
    pub fn tone(&self) -> StatusTone {
        match self.status.as_str() {
            "paid" => StatusTone::Positive,
            "open" => StatusTone::Pending,
            _ => StatusTone::Negative,
        }
    }
}

/// What `POST /invoices/generate/{user_id}` answers with. The service
/// reports the new invoice's id and total along with the metered usage it
/// billed; the period and status are only visible through the history list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedInvoice {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub amount_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A settlement attempt against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payment {
    pub id: String,
    pub invoice_id: String,
    pub provider: String,
    pub status: String,
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Payment {
    pub fn tone(&self) -> StatusTone {
        match self.status.as_str() {
            "succeeded" => StatusTone::Positive,
            "processing" => StatusTone::Pending,
            _ => StatusTone::Negative,
        }
    }
}

/// Display classification of an invoice or payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Positive,
    Pending,
    Negative,
}

impl StatusTone {
    /// Single-character marker shown before a status in history tables.
    pub fn marker(self) -> char {
        match self {
            StatusTone::Positive => '+',
            StatusTone::Pending => '~',
            StatusTone::Negative => '!',
        }
    }
}

/// Request payload for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
}

/// Request payload for `POST /subscriptions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscription {
    pub user_id: String,
    pub plan_code: String,
}

/// Request payload for `POST /usage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordUsage {
    pub user_id: String,
    pub metric: String,
    pub quantity: i64,
}

/// A successful response body, normalized by content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// The server declared `application/json` and the body parsed.
    Json(Value),
    /// Any other content type, returned byte-for-byte.
    Text(String),
}

impl ResponseBody {
    /// Collapse into a JSON value; text becomes a JSON string.
    pub fn into_json(self) -> Value {
        match self {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => Value::String(text),
        }
    }
}
