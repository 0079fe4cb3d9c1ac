use super::*;

// =============================================================================
// read_principal
// =============================================================================

#[test]
fn read_principal_success_parses_fields() {
    let principal = read_principal(200, r#"{"id":"42","name":"Ann","email":"a@b.com"}"#).unwrap();
    assert_eq!(principal, Principal { id: "42".into(), name: "Ann".into(), email: "a@b.com".into() });
}

#[test]
fn read_principal_accepts_created_status() {
    let principal = read_principal(201, r#"{"id":"7","name":"Bo","email":"bo@x.io"}"#).unwrap();
    assert_eq!(principal.name, "Bo");
}

#[test]
fn read_principal_rejected_carries_upstream_message() {
    let body = r#"{"statusCode":409,"error":"Conflict","message":"Email already registered"}"#;
    let err = read_principal(409, body).unwrap_err();
    match err {
        GatewayError::Rejected { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message.as_deref(), Some("Email already registered"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[test]
fn read_principal_rejected_without_json_body() {
    let err = read_principal(502, "Bad Gateway").unwrap_err();
    assert!(matches!(err, GatewayError::Rejected { status: 502, message: None }));
}

#[test]
fn read_principal_success_with_garbage_is_parse_error() {
    let err = read_principal(200, "<html>").unwrap_err();
    assert!(matches!(err, GatewayError::Parse(_)));
}

// =============================================================================
// upstream_message / user_message
// =============================================================================

#[test]
fn upstream_message_ignores_empty_message() {
    assert_eq!(upstream_message(r#"{"message":""}"#), None);
}

#[test]
fn upstream_message_ignores_non_string_message() {
    assert_eq!(upstream_message(r#"{"message":12}"#), None);
}

#[test]
fn user_message_prefers_upstream_text() {
    let err = GatewayError::Rejected { status: 400, message: Some("Name is required".into()) };
    assert_eq!(err.user_message(), "Name is required");
}

#[test]
fn user_message_falls_back_to_display() {
    let err = GatewayError::Request("connection refused".into());
    assert_eq!(err.user_message(), "request failed: connection refused");

    let err = GatewayError::Rejected { status: 500, message: None };
    assert!(err.user_message().contains("500"));
}

// =============================================================================
// HttpAuthGateway
// =============================================================================

#[test]
fn endpoint_trims_trailing_slash() {
    let gateway = HttpAuthGateway::new("http://localhost:3000/").unwrap();
    assert_eq!(gateway.endpoint("/auth/sign-in"), "http://localhost:3000/auth/sign-in");
}

#[test]
fn sign_in_body_uses_remember_me_key() {
    let json = serde_json::to_value(SignInBody { remember_me: true }).unwrap();
    assert_eq!(json, serde_json::json!({ "rememberMe": true }));
}

#[tokio::test]
async fn sign_in_against_closed_port_is_request_error() {
    let gateway = HttpAuthGateway::new("http://127.0.0.1:1").unwrap();
    let credentials = Credentials { email: "a@b.com".into(), password: "secret".into(), remember_me: false };
    let err = gateway.sign_in(&credentials).await.unwrap_err();
    assert!(matches!(err, GatewayError::Request(_)));
}
