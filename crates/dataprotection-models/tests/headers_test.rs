use dataprotection_models::ExportJobsTriggerAcceptedResponseHeaders;
use dataprotection_runtime::{Model, SerializationMode, ShellObject};
use serde_json::json;

#[test]
fn test_headers_are_case_insensitive() {
    let headers = ExportJobsTriggerAcceptedResponseHeaders::from_headers([
        ("content-type", "application/json"),
        ("LOCATION", "https://management.azure.com/operationStatus/1"),
        ("retry-after", " 15 "),
    ]);
    assert_eq!(
        headers.location(),
        Some("https://management.azure.com/operationStatus/1")
    );
    assert_eq!(headers.retry_after(), Some(15));
}

#[test]
fn test_first_header_value_wins() {
    let headers = ExportJobsTriggerAcceptedResponseHeaders::from_headers([
        ("Location", "first"),
        ("Location", "second"),
        ("Retry-After", "10"),
        ("Retry-After", "20"),
    ]);
    assert_eq!(headers.location(), Some("first"));
    assert_eq!(headers.retry_after(), Some(10));
}

#[test]
fn test_unparseable_retry_after_is_skipped() {
    let headers = ExportJobsTriggerAcceptedResponseHeaders::from_headers([
        ("Retry-After", "Wed, 21 Oct 2026 07:28:00 GMT"),
        ("Location", "loc"),
    ]);
    assert_eq!(headers.retry_after(), None);
    assert_eq!(headers.location(), Some("loc"));

    let none = ExportJobsTriggerAcceptedResponseHeaders::from_headers(Vec::<(&str, &str)>::new());
    assert_eq!(none, ExportJobsTriggerAcceptedResponseHeaders::default());
}

#[test]
fn test_body_conversion_coerces_retry_after() {
    let headers = ExportJobsTriggerAcceptedResponseHeaders::from_json_string(
        r#"{"location": "loc", "retryAfter": "45"}"#,
    )
    .unwrap();
    assert_eq!(headers.retry_after(), Some(45));

    let map = json!({"RetryAfter": 2.5, "Location": "loc"});
    let headers =
        ExportJobsTriggerAcceptedResponseHeaders::from_dictionary(map.as_object().unwrap()).unwrap();
    assert_eq!(headers.retry_after(), Some(2));

    let shell = ShellObject::new().with_property("RetryAfter", 30);
    let headers = ExportJobsTriggerAcceptedResponseHeaders::from_shell_object(&shell).unwrap();
    assert_eq!(headers.retry_after(), Some(30));
    assert_eq!(headers.location(), None);
}

#[test]
fn test_retry_after_out_of_range_fails() {
    let err = ExportJobsTriggerAcceptedResponseHeaders::from_json_string(
        r#"{"retryAfter": 4294967296}"#,
    )
    .unwrap_err();
    assert!(err.is_coercion());
}

#[test]
fn test_headers_serialize_with_wire_names() {
    let headers = ExportJobsTriggerAcceptedResponseHeaders::new()
        .with_location("loc")
        .with_retry_after(5);
    assert_eq!(
        headers.to_json_value(SerializationMode::IncludeAll),
        json!({"location": "loc", "retryAfter": 5})
    );
    assert_eq!(
        ExportJobsTriggerAcceptedResponseHeaders::new().to_json_string_with(SerializationMode::SetOnly),
        "{}"
    );
    assert_eq!(
        ExportJobsTriggerAcceptedResponseHeaders::from_json_string(&headers.to_json_string()).unwrap(),
        headers
    );
}
