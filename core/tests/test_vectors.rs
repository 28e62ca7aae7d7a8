//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use billing_core::{
    BillingClient, CreateSubscription, CreateUser, HttpMethod, HttpRequest, HttpResponse,
    RecordUsage, ResponseBody,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080";

fn client() -> BillingClient {
    BillingClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn build(c: &BillingClient, operation: &str, input: &Value) -> HttpRequest {
    let user_id = || input["user_id"].as_str().unwrap();
    match operation {
        "health" => c.build_health(),
        "list_plans" => c.build_list_plans(),
        "create_user" => {
            let input: CreateUser = serde_json::from_value(input.clone()).unwrap();
            c.build_create_user(&input).unwrap()
        }
        "create_subscription" => {
            let input: CreateSubscription = serde_json::from_value(input.clone()).unwrap();
            c.build_create_subscription(&input).unwrap()
        }
        "record_usage" => {
            let input: RecordUsage = serde_json::from_value(input.clone()).unwrap();
            c.build_record_usage(&input).unwrap()
        }
        "generate_invoice" => c.build_generate_invoice(user_id()),
        "list_invoices" => c.build_list_invoices(user_id()),
        "list_payments" => c.build_list_payments(user_id()),
        other => panic!("unknown operation: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let operation = case["operation"].as_str().unwrap();
        let expected = &case["expected_request"];

        let req = build(&c, operation, &case["input"]);
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.header("content-type"), Some("application/json"), "{name}: content-type");

        match req.body.as_deref() {
            Some(body) => {
                let body: Value = serde_json::from_str(body).unwrap();
                assert_eq!(body, expected["body"], "{name}: body");
            }
            None => assert!(expected["body"].is_null(), "{name}: body should be present"),
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let body = sim["body"].as_str().unwrap().to_string();
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: vec![(
                "Content-Type".to_string(),
                sim["content_type"].as_str().unwrap().to_string(),
            )],
            body: body.clone(),
        };
        let result = c.parse_response(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            let text = err.to_string();
            assert_eq!(text, expected_error.as_str().unwrap(), "{name}: error text");
            assert!(text.contains(&body), "{name}: error embeds body");
        } else if let Some(expected_text) = case.get("expected_text") {
            let parsed = result.unwrap();
            assert_eq!(
                parsed,
                ResponseBody::Text(expected_text.as_str().unwrap().to_string()),
                "{name}: text"
            );
        } else {
            let parsed = result.unwrap();
            assert_eq!(parsed, ResponseBody::Json(case["expected_json"].clone()), "{name}: json");
        }
    }
}
