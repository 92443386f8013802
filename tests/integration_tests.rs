//! Integration tests for the MoySklad client configuration.
//!
//! These tests verify end-to-end functionality of the configuration system.

use std::time::Duration;

use moysklad_api::{
    AccessToken, ApiVersion, BaseUrl, ConfigError, Credentials, MoySkladConfig, RestClient,
};

#[test]
fn test_full_workflow_create_newtypes_build_config_access_fields() {
    let credentials = Credentials::token("test-token").unwrap();
    let base_url = BaseUrl::new("https://api.moysklad.ru/api/remap/").unwrap();

    let config = MoySkladConfig::builder()
        .credentials(credentials.clone())
        .base_url(base_url)
        .api_version(ApiVersion::V1_2)
        .user_agent_prefix("Warehouse/1.0")
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap();

    assert_eq!(config.credentials(), &credentials);
    assert_eq!(config.base_url().as_ref(), "https://api.moysklad.ru/api/remap");
    assert_eq!(config.api_version(), &ApiVersion::V1_2);
    assert_eq!(config.user_agent_prefix(), Some("Warehouse/1.0"));
    assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn test_defaults_point_at_public_endpoint() {
    let config = MoySkladConfig::builder()
        .credentials(Credentials::token("test-token").unwrap())
        .build()
        .unwrap();

    assert_eq!(config.base_url().as_ref(), BaseUrl::DEFAULT);
    assert_eq!(config.api_version(), &ApiVersion::latest());
    assert_eq!(config.user_agent_prefix(), None);
    assert_eq!(config.timeout(), None);
}

#[test]
fn test_missing_credentials_is_rejected() {
    let result = MoySkladConfig::builder().build();

    assert_eq!(
        result.unwrap_err(),
        ConfigError::MissingRequiredField {
            field: "credentials"
        }
    );
}

#[test]
fn test_invalid_credentials_are_rejected_at_construction() {
    assert_eq!(
        AccessToken::new("").unwrap_err(),
        ConfigError::EmptyAccessToken
    );
    assert_eq!(
        Credentials::basic("", "secret").unwrap_err(),
        ConfigError::EmptyLogin
    );
    assert_eq!(
        Credentials::basic("admin@acme", "").unwrap_err(),
        ConfigError::EmptyPassword
    );
}

#[test]
fn test_authorization_header_per_credential_kind() {
    let token = Credentials::token("abc123").unwrap();
    let basic = Credentials::basic("admin@acme", "secret").unwrap();

    assert_eq!(token.authorization_header(), "Bearer abc123");
    assert_eq!(
        basic.authorization_header(),
        "Basic YWRtaW5AYWNtZTpzZWNyZXQ="
    );
}

#[test]
fn test_credentials_are_masked_in_debug_output() {
    let token = Credentials::token("super-secret-token").unwrap();
    let basic = Credentials::basic("admin@acme", "hunter2").unwrap();

    assert!(!format!("{token:?}").contains("super-secret-token"));
    assert!(!format!("{basic:?}").contains("hunter2"));
    assert!(format!("{basic:?}").contains("admin@acme"));
}

#[test]
fn test_base_url_validation() {
    assert!(BaseUrl::new("http://127.0.0.1:8080").is_ok());
    assert!(BaseUrl::new("https://api.moysklad.ru/api/remap").is_ok());

    for invalid in ["api.moysklad.ru", "https://", "https://host/path?x=1", "://host"] {
        assert!(
            matches!(BaseUrl::new(invalid), Err(ConfigError::InvalidBaseUrl { .. })),
            "{invalid} should be rejected"
        );
    }
}

#[test]
fn test_api_version_parsing() {
    assert_eq!("1.2".parse::<ApiVersion>().unwrap(), ApiVersion::V1_2);
    assert_eq!(
        "1.3".parse::<ApiVersion>().unwrap(),
        ApiVersion::Custom("1.3".to_string())
    );
    assert!(!ApiVersion::Custom("1.3".to_string()).is_known());
    assert!(ApiVersion::V1_2.is_known());

    for invalid in ["", "1", "v1.2", "1.2.3", "1.x"] {
        assert!(
            matches!(
                invalid.parse::<ApiVersion>(),
                Err(ConfigError::InvalidApiVersion { .. })
            ),
            "{invalid} should be rejected"
        );
    }
}

#[test]
fn test_multi_tenant_scenario_multiple_independent_configs() {
    let config_a = MoySkladConfig::builder()
        .credentials(Credentials::token("tenant-a").unwrap())
        .build()
        .unwrap();
    let config_b = MoySkladConfig::builder()
        .credentials(Credentials::basic("admin@tenant-b", "secret").unwrap())
        .api_version(ApiVersion::Custom("1.3".to_string()))
        .build()
        .unwrap();

    let client_a = RestClient::new(&config_a).unwrap();
    let client_b = RestClient::new(&config_b).unwrap();

    assert_eq!(client_a.api_version(), &ApiVersion::V1_2);
    assert_eq!(client_b.api_version().to_string(), "1.3");
    assert_eq!(
        client_a.http_client().default_headers()["Authorization"],
        "Bearer tenant-a"
    );
    assert!(client_b.http_client().default_headers()["Authorization"].starts_with("Basic "));
}

#[test]
fn test_config_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MoySkladConfig>();
    assert_send_sync::<Credentials>();
    assert_send_sync::<RestClient>();
}
