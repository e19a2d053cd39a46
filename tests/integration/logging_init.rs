//! Integration tests for global logging initialization

use curricula::error::ApiError;
use curricula::logging::{init_logging, LoggingConfig};

use crate::integration::test_utils::ENV_MUTEX;

const LOG_VARS: [&str; 4] = [
    "CURRICULA_LOG",
    "CURRICULA_LOG_FORMAT",
    "CURRICULA_LOG_OUTPUT",
    "CURRICULA_LOG_MODULES",
];

fn clear_log_vars() {
    for var in LOG_VARS {
        std::env::remove_var(var);
    }
}

fn quiet_config() -> LoggingConfig {
    LoggingConfig {
        level: "off".to_string(),
        output: "stderr".to_string(),
        ..LoggingConfig::default()
    }
}

#[test]
fn test_repeated_init_is_ok() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_log_vars();

    let config = quiet_config();
    assert!(init_logging(Some(&config)).is_ok());
    assert!(init_logging(Some(&config)).is_ok());
}

#[test]
fn test_invalid_output_variable_is_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_log_vars();
    std::env::set_var("CURRICULA_LOG_OUTPUT", "syslog");

    let result = init_logging(Some(&quiet_config()));
    clear_log_vars();

    match result {
        Err(ApiError::ConfigError(message)) => assert!(message.contains("syslog")),
        other => panic!("expected a config error, got {:?}", other),
    }
}

#[test]
fn test_format_variable_overrides_config() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_log_vars();
    std::env::set_var("CURRICULA_LOG_FORMAT", "json");

    let config = LoggingConfig {
        format: "xml".to_string(),
        ..quiet_config()
    };
    let result = init_logging(Some(&config));
    clear_log_vars();

    assert!(result.is_ok());
}

#[test]
fn test_invalid_config_format_is_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_log_vars();

    let config = LoggingConfig {
        format: "xml".to_string(),
        ..quiet_config()
    };
    assert!(matches!(
        init_logging(Some(&config)),
        Err(ApiError::ConfigError(_))
    ));
}
