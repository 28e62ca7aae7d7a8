//! Synchronous API client core for the billing service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `Api` pairs the client with
//! a `Transport` supplied by the host, and the `screens` module holds the
//! per-screen state the operator console renders.
//!
//! # Design
//! - `BillingClient` is stateless: it holds only `base_url`.
//! - Every operation is a `build_*` / `parse_*` pair over one generic
//!   request builder and one response normalizer.
//! - Non-2xx responses become `ApiError::Http`, whose text is
//!   `"{status}: {body}"`; screens display it verbatim.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod screens;
pub mod types;

#[cfg(test)]
mod test_support;

pub use api::{Api, BillingApi, RequestOptions};
pub use client::BillingClient;
pub use config::Config;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{
    CreateSubscription, CreateUser, GeneratedInvoice, Invoice, Payment, Plan, RecordUsage,
    ResponseBody, StatusTone, User,
};
