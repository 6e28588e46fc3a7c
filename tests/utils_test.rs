use chrono::DateTime;
use spotify_snapshot::errors::ConfigError;
use spotify_snapshot::utils::*;

#[test]
fn test_generate_state() {
    let state = generate_state();

    // Should be exactly 32 characters
    assert_eq!(state.len(), 32);

    // Should contain only alphanumeric characters
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated values should be different
    assert_ne!(state, generate_state());
}

#[test]
fn test_basic_auth_header() {
    // base64("id:secret")
    assert_eq!(basic_auth_header("id", "secret"), "Basic aWQ6c2VjcmV0");
}

#[test]
fn test_timestamp_now_is_utc_rfc3339() {
    let stamp = timestamp_now();

    assert!(stamp.ends_with('Z'));
    assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());

    // Microsecond precision: "YYYY-MM-DDTHH:MM:SS.ffffffZ"
    assert_eq!(stamp.len(), 27);
}

#[test]
fn test_parse_default_redirect_uri() {
    let address = parse_redirect_uri("http://localhost:8080/callback").unwrap();

    assert_eq!(
        address,
        CallbackAddress {
            host: "localhost".to_string(),
            port: 8080,
            path: "/callback".to_string(),
        }
    );
}

#[test]
fn test_parse_redirect_uri_defaults() {
    // No explicit port means the scheme default
    let address = parse_redirect_uri("http://127.0.0.1").unwrap();
    assert_eq!(address.port, 80);
    assert_eq!(address.path, "/");

    let address = parse_redirect_uri("http://[::1]:8888/cb").unwrap();
    assert_eq!(address.host, "::1");
    assert_eq!(address.port, 8888);
}

#[test]
fn test_parse_redirect_uri_rejects_unservable() {
    assert!(matches!(
        parse_redirect_uri("https://example.com/callback"),
        Err(ConfigError::InvalidRedirectUri { .. })
    ));
    assert!(matches!(
        parse_redirect_uri("not a uri"),
        Err(ConfigError::InvalidRedirectUri { .. })
    ));
}
