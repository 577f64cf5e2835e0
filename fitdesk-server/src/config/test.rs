use super::*;

const MINIMAL: &str = r#"
[web]
site_addr = "127.0.0.1:8080"

[backend]
api_url = "https://backend.example.org/api/"
media_url = "https://backend.example.org"
"#;

#[test]
fn minimal_config_uses_defaults() {
    let config = Config::from_toml(MINIMAL).unwrap();
    assert_eq!(config.log_level, LevelFilter::INFO);
    assert_eq!(config.log_directory, None);
    assert_eq!(
        config.leptos_options.site_addr,
        "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
    );
    assert_eq!(&*config.leptos_options.output_name, "fitdesk");
    assert_eq!(
        config.backend,
        BackendConfig {
            api_url: "https://backend.example.org/api".to_string(),
            media_url: "https://backend.example.org".to_string(),
        }
    );
}

#[test]
fn log_settings_are_read() {
    let content = format!("log_level = \"debug\"\nlog_directory = \"/var/log/fitdesk\"\n{MINIMAL}");
    let config = Config::from_toml(&content).unwrap();
    assert_eq!(config.log_level, LevelFilter::DEBUG);
    assert_eq!(config.log_directory, Some(PathBuf::from("/var/log/fitdesk")));
}

#[test]
fn bad_log_level_is_rejected() {
    let content = format!("log_level = \"chatty\"\n{MINIMAL}");
    assert!(matches!(
        Config::from_toml(&content),
        Err(ConfigError::LogLevel(_))
    ));
}

#[test]
fn bad_site_addr_is_rejected() {
    let content = MINIMAL.replace("127.0.0.1:8080", "localhost");
    assert!(matches!(
        Config::from_toml(&content),
        Err(ConfigError::SiteAddr(_))
    ));
}

#[test]
fn backend_urls_need_a_scheme_and_host() {
    let content = MINIMAL.replace("https://backend.example.org/api/", "backend.example.org/api");
    match Config::from_toml(&content) {
        Err(ConfigError::BackendUrl { field, .. }) => assert_eq!(field, "api_url"),
        other => panic!("expected BackendUrl error, got {other:?}"),
    }
    let content = MINIMAL.replace("\"https://backend.example.org\"", "\"https://\"");
    match Config::from_toml(&content) {
        Err(ConfigError::BackendUrl { field, .. }) => assert_eq!(field, "media_url"),
        other => panic!("expected BackendUrl error, got {other:?}"),
    }
}

#[test]
fn missing_backend_section_is_a_toml_error() {
    let content = "[web]\nsite_addr = \"127.0.0.1:8080\"\n";
    assert!(matches!(
        Config::from_toml(content),
        Err(ConfigError::TomlParse(_))
    ));
}

#[test]
fn unreadable_file_names_the_path() {
    let err = Config::read(Path::new("/nonexistent/fitdesk.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/fitdesk.toml"));
}
