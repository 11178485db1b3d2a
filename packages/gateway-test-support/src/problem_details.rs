//! Assertions for the gateway's `application/problem+json` error responses.
//!
//! Kept free of gateway types so tests check the wire contract, not the
//! struct that produces it.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE};
use actix_web::http::StatusCode;
use serde::Deserialize;

/// A Problem Details body as a client would decode it.
#[derive(Debug, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Decode and check a Problem Details response.
///
/// Panics unless the status and code match, the content type is
/// `application/problem+json`, the body status mirrors the HTTP status,
/// and the body `trace_id` equals the `x-trace-id` header.
pub fn assert_problem(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
) -> Problem {
    assert_eq!(status, expected_status, "unexpected HTTP status");

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(content_type, "application/problem+json");

    let problem: Problem = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "body is not Problem Details ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    let header_trace = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present");
    assert_eq!(problem.trace_id, header_trace, "body and header trace ids differ");

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(
        problem.type_uri.ends_with(expected_code),
        "type `{}` should name the code",
        problem.type_uri
    );

    problem
}

/// [`assert_problem`] on a test service response, optionally checking that
/// the detail mentions `detail_contains`.
pub async fn assert_problem_details_from_service_response(
    resp: ServiceResponse<BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
    detail_contains: Option<&str>,
) -> Problem {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    let problem = assert_problem(status, &headers, &body, expected_code, expected_status);
    if let Some(fragment) = detail_contains {
        assert!(
            problem.detail.contains(fragment),
            "detail `{}` should contain `{fragment}`",
            problem.detail
        );
    }
    problem
}
