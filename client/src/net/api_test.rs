use super::*;

#[test]
fn request_failed_message_formats_status() {
    assert_eq!(
        request_failed_message(HttpMethod::Put, "http://localhost:8000/network", 500),
        "PUT http://localhost:8000/network failed: 500"
    );
}

#[test]
fn transport_failed_message_includes_error() {
    assert_eq!(
        transport_failed_message(HttpMethod::Get, "/network", "connection refused"),
        "GET /network failed: connection refused"
    );
}
