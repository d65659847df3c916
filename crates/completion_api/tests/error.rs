use reqwest::StatusCode;

use completion_api::error::parse_error_message;

#[test]
fn parse_error_message_prefers_structured_message() {
    let body = r#"{"error":{"message":"invalid layers"}}"#;
    let message = parse_error_message(StatusCode::BAD_REQUEST, body);
    assert_eq!(message, "invalid layers");
}

#[test]
fn parse_error_message_falls_back_to_raw_body() {
    let body = "raw failure text";
    let message = parse_error_message(StatusCode::INTERNAL_SERVER_ERROR, body);
    assert_eq!(message, "raw failure text");
}

#[test]
fn parse_error_message_falls_back_to_canonical_reason_on_empty_body() {
    let message = parse_error_message(StatusCode::SERVICE_UNAVAILABLE, "");
    assert_eq!(message, "Service Unavailable");
}
