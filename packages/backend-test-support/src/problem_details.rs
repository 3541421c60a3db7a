//! Assertions for `application/problem+json` error bodies.
//!
//! Deliberately free of backend types so the error contract is checked
//! from the outside, the way an HTTP client sees it.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Parse a problem body and check it against status, headers and code.
///
/// Returns the parsed body so callers can make further assertions.
pub fn check_problem(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
) -> Problem {
    assert_eq!(status, expected_status, "unexpected HTTP status");

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "expected problem+json, got {content_type:?}"
    );

    let problem: Problem = serde_json::from_slice(body)
        .unwrap_or_else(|e| panic!("body is not a problem document ({e}): {body:?}"));

    let header_trace = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header missing");
    assert_eq!(problem.trace_id, header_trace, "trace id mismatch");
    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(problem.type_.ends_with(&problem.code), "type URI {:?}", problem.type_);
    problem
}

/// Consume a test response and assert it carries the given error contract.
pub async fn assert_problem_details_from_service_response(
    resp: ServiceResponse<BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    let problem = check_problem(status, &headers, &body, expected_code, expected_status);
    if let Some(needle) = expected_detail_contains {
        assert!(
            problem.detail.contains(needle),
            "detail {:?} does not mention {needle:?}",
            problem.detail
        );
    }
}
