use super::*;

#[test]
fn default_points_at_local_backend() {
    let config = ClientConfig::default();
    assert_eq!(config.backend_url, "http://localhost:8000");
    assert_eq!(config.socket_url, "ws://localhost:8000/");
}

#[test]
fn https_backend_derives_wss_socket() {
    let config = ClientConfig::for_backend("https://causal.example.org/");
    assert_eq!(config.backend_url, "https://causal.example.org");
    assert_eq!(config.socket_url, "wss://causal.example.org/");
}

#[test]
fn explicit_socket_url_wins() {
    let config = resolve(Some("http://api:8000".into()), Some("ws://chat:9000".into()));
    assert_eq!(config.backend_url, "http://api:8000");
    assert_eq!(config.socket_url, "ws://chat:9000");
}

#[test]
fn blank_meta_values_fall_back_to_defaults() {
    assert_eq!(resolve(Some("  ".into()), Some(String::new())), ClientConfig::default());
    assert_eq!(resolve(None, None), ClientConfig::default());
}

#[test]
fn unparsable_backend_is_kept_for_socket() {
    assert_eq!(default_socket_url("not a url"), "not a url");
}

#[test]
fn from_document_without_browser_uses_defaults() {
    assert_eq!(ClientConfig::from_document(), ClientConfig::default());
}
