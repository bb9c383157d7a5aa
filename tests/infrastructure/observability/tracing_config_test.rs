use pdf_analyzer::infrastructure::observability::TracingConfig;
use pdf_analyzer::presentation::Environment;
use pdf_analyzer::presentation::config::LoggingSettings;

#[test]
fn given_logging_settings_when_building_config_then_fields_are_copied() {
    let logging = LoggingSettings {
        level: "debug".to_string(),
        enable_json: true,
    };

    let config = TracingConfig::new(Environment::Prod, &logging);

    assert_eq!(config.environment, Environment::Prod);
    assert_eq!(config.level, "debug");
    assert!(config.json_format);
}

#[test]
fn given_level_when_building_directive_then_covers_crate_and_http_layer() {
    let logging = LoggingSettings {
        level: "warn".to_string(),
        enable_json: false,
    };

    let directive = TracingConfig::new(Environment::Local, &logging).default_directive();

    assert_eq!(directive, "warn,pdf_analyzer=warn,tower_http=info");
}

#[test]
fn given_environment_names_when_parsing_then_accepts_known_values_only() {
    assert_eq!(
        Environment::try_from("PROD".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(
        Environment::try_from("production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(Environment::try_from("test".to_string()), Ok(Environment::Test));
    assert!(Environment::try_from("staging".to_string()).is_err());
}
