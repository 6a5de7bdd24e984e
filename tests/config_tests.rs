//! Configuration builder and environment layering

use search_lens::config::ConfigError;
use search_lens::LensConfig;

#[test]
fn builder_normalizes_urls() {
    let config = LensConfig::builder()
        .summary_endpoint(" http://127.0.0.1:5055/ ")
        .ollama_host("http://gpu-box:11434/")
        .build()
        .unwrap();

    assert_eq!(config.summary_endpoint(), "http://127.0.0.1:5055");
    assert_eq!(config.ollama_host(), "http://gpu-box:11434");
}

#[test]
fn builder_rejects_bad_values() {
    let bad_scheme = LensConfig::builder().summary_endpoint("ftp://localhost").build();
    assert!(matches!(bad_scheme, Err(ConfigError::InvalidUrl { field: "summary_endpoint", .. })));

    let bad_temp = LensConfig::builder().temperature(3.5).build();
    assert!(matches!(bad_temp, Err(ConfigError::InvalidValue { field: "temperature", .. })));

    let bad_port = LensConfig::builder().server_port(0).build();
    assert!(matches!(bad_port, Err(ConfigError::InvalidValue { field: "server_port", .. })));
}

#[test]
fn overrides_layer_on_top_of_environment() {
    let base = LensConfig::from_lookup(|name| match name {
        "OLLAMA_MODEL" => Some("mistral:7b".to_string()),
        "SEARCH_LENS_PORT" => Some("5055".to_string()),
        _ => None,
    })
    .unwrap();

    let config = base.to_builder().server_port(6000).build().unwrap();

    assert_eq!(config.ollama_model(), "mistral:7b");
    assert_eq!(config.server_port(), 6000);
    assert_eq!(config.server_host(), "127.0.0.1");
}
