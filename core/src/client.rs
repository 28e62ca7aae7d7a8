//! Stateless HTTP request builder and response parser for the billing API.
//!
//! # Design
//! `BillingClient` holds only a `base_url` and carries no mutable state
//! between calls. Every request goes through `build_request`, which joins the
//! path onto the base and merges the default JSON content type with caller
//! headers, and every response goes through `parse_response`, which turns a
//! non-2xx status into `ApiError::Http` and a 2xx body into JSON or text.
//! The per-operation `build_*` / `parse_*` pairs are thin typed wrappers over
//! those two.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreateSubscription, CreateUser, GeneratedInvoice, Invoice, Payment, Plan, RecordUsage,
    ResponseBody, User,
};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Synchronous, stateless client for the billing API.
#[derive(Debug, Clone)]
pub struct BillingClient {
    base_url: String,
}

impl BillingClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `base + path` with `content-type: application/json` merged under
    /// `headers`. A caller header replaces the default when the names match
    /// case-insensitively.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        headers: &[(String, String)],
        body: Option<String>,
    ) -> HttpRequest {
        let mut merged = vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())];
        for (name, value) in headers {
            merged.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            merged.push((name.clone(), value.clone()));
        }
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: merged,
            body,
        }
    }

    /// Fail on non-2xx; otherwise parse JSON when the content type says so
    /// and hand back the raw text when it does not.
    pub fn parse_response(&self, response: HttpResponse) -> Result<ResponseBody, ApiError> {
        check_status(&response)?;
        let is_json = response
            .header("content-type")
            .is_some_and(|value| value.contains(JSON_CONTENT_TYPE));
        if !is_json {
            return Ok(ResponseBody::Text(response.body));
        }
        serde_json::from_str(&response.body)
            .map(ResponseBody::Json)
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn build_health(&self) -> HttpRequest {
        self.build_request(HttpMethod::Get, "/healthz", &[], None)
    }

    pub fn build_list_plans(&self) -> HttpRequest {
        self.build_request(HttpMethod::Get, "/plans", &[], None)
    }

    pub fn build_create_user(&self, input: &CreateUser) -> Result<HttpRequest, ApiError> {
        self.build_post_json("/users", input)
    }

    pub fn build_create_subscription(
        &self,
        input: &CreateSubscription,
    ) -> Result<HttpRequest, ApiError> {
        self.build_post_json("/subscriptions", input)
    }

    pub fn build_record_usage(&self, input: &RecordUsage) -> Result<HttpRequest, ApiError> {
        self.build_post_json("/usage", input)
    }

    pub fn build_generate_invoice(&self, user_id: &str) -> HttpRequest {
        let path = format!("/invoices/generate/{}", urlencoding::encode(user_id));
        self.build_request(HttpMethod::Post, &path, &[], None)
    }

    pub fn build_list_invoices(&self, user_id: &str) -> HttpRequest {
        let path = format!("/invoices/{}", urlencoding::encode(user_id));
        self.build_request(HttpMethod::Get, &path, &[], None)
    }

    pub fn build_list_payments(&self, user_id: &str) -> HttpRequest {
        let path = format!("/payments/{}", urlencoding::encode(user_id));
        self.build_request(HttpMethod::Get, &path, &[], None)
    }

    /// Only success matters for the health check; the body is passed through.
    pub fn parse_health(&self, response: HttpResponse) -> Result<ResponseBody, ApiError> {
        self.parse_response(response)
    }

    pub fn parse_list_plans(&self, response: HttpResponse) -> Result<Vec<Plan>, ApiError> {
        decode(self.parse_response(response)?)
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        decode(self.parse_response(response)?)
    }

    pub fn parse_create_subscription(&self, response: HttpResponse) -> Result<Value, ApiError> {
        Ok(self.parse_response(response)?.into_json())
    }

    pub fn parse_record_usage(&self, response: HttpResponse) -> Result<Value, ApiError> {
        Ok(self.parse_response(response)?.into_json())
    }

    pub fn parse_generate_invoice(
        &self,
        response: HttpResponse,
    ) -> Result<GeneratedInvoice, ApiError> {
        decode(self.parse_response(response)?)
    }

    pub fn parse_list_invoices(&self, response: HttpResponse) -> Result<Vec<Invoice>, ApiError> {
        decode(self.parse_response(response)?)
    }

    pub fn parse_list_payments(&self, response: HttpResponse) -> Result<Vec<Payment>, ApiError> {
        decode(self.parse_response(response)?)
    }

    fn build_post_json<B: Serialize>(&self, path: &str, input: &B) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.build_request(HttpMethod::Post, path, &[], Some(body)))
    }
}

/// Map a status outside 200..300 to `ApiError::Http` with the raw body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Decode a typed payload. A text body is still tried as JSON, since some
/// servers omit the content type on otherwise valid JSON.
fn decode<T: DeserializeOwned>(body: ResponseBody) -> Result<T, ApiError> {
    let decoded = match body {
        ResponseBody::Json(value) => serde_json::from_value(value),
        ResponseBody::Text(text) => serde_json::from_str(&text),
    };
    decoded.map_err(|e| ApiError::Deserialization(e.to_string()))
}
