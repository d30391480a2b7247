//! Configuration tests

use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that serialized config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

/// Every field written by to_toml comes back unchanged
#[test]
fn test_config_roundtrip_values() {
    let mut config = Config::default();
    config.api_url = "https://fest.example.edu/api".to_string();
    config.locale = "hi_IN".to_string();
    config.theme = "light".to_string();
    config.request_timeout_secs = 40;
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_dir = PathBuf::from("C:\\logs\\fest");
    config.logging.file_rotation = LogRotation::Hourly;
    config.logging.file_prefix = "client".to_string();

    let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let loaded = Config::merge(file, |_| None);

    assert_eq!(loaded.api_url, config.api_url);
    assert_eq!(loaded.locale, config.locale);
    assert_eq!(loaded.theme, config.theme);
    assert_eq!(loaded.request_timeout_secs, 40);
    assert_eq!(loaded.logging.level, "debug");
    assert!(loaded.logging.file_enabled);
    assert_eq!(loaded.logging.file_dir, config.logging.file_dir);
    assert_eq!(loaded.logging.file_rotation, LogRotation::Hourly);
    assert_eq!(loaded.logging.file_prefix, "client");
}

/// Control characters from the environment still produce a parsable file
#[test]
fn test_config_roundtrip_control_characters() {
    let config = Config::merge(
        FileConfig::default(),
        env_from(&[
            ("FEST_API_URL", "http://fest/api\r"),
            ("FEST_THEME", "mono\t\u{7}"),
        ]),
    );

    let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let loaded = Config::merge(file, |_| None);
    assert_eq!(loaded.api_url, "http://fest/api\r");
    assert_eq!(loaded.theme, "mono\t\u{7}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
api_url = "http://file/api"
theme = "light"
request_timeout_secs = 5
"#,
    )
    .unwrap();

    let config = Config::merge(
        file,
        env_from(&[("FEST_API_URL", "http://env/api"), ("FEST_TIMEOUT_SECS", "nope")]),
    );

    assert_eq!(config.api_url, "http://env/api");
    assert_eq!(config.theme, "light");
    // Unparsable env value falls through to the file
    assert_eq!(config.request_timeout_secs, 5);
    assert_eq!(config.locale, DEFAULT_LOCALE);
}

#[test]
fn test_empty_file_uses_defaults() {
    let file: FileConfig = toml::from_str("").unwrap();
    let config = Config::merge(file, |_| None);

    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.theme, DEFAULT_THEME);
    assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.file_enabled);
}

#[test]
fn test_invalid_file_is_an_error() {
    let path = std::env::temp_dir().join(format!("fest-config-{}.toml", std::process::id()));
    std::fs::write(&path, "api_url = [unterminated").unwrap();

    let result = Config::load_file_config(&path);
    let _ = std::fs::remove_file(&path);
    assert!(result.is_err());

    let missing = std::env::temp_dir().join("fest-config-does-not-exist.toml");
    assert!(Config::load_file_config(&missing).is_ok());
}

#[test]
fn test_from_file_ignores_environment() {
    let path = std::env::temp_dir().join(format!("fest-config-file-{}.toml", std::process::id()));
    std::fs::write(&path, "api_url = \"http://file/api\"\ntheme = \"mono\"\n").unwrap();
    std::env::set_var("FEST_THEME", "light");

    let result = Config::from_file(&path);
    std::env::remove_var("FEST_THEME");
    let _ = std::fs::remove_file(&path);
    let config = result.unwrap();

    assert_eq!(config.api_url, "http://file/api");
    assert_eq!(config.theme, "mono");
    assert_eq!(config.locale, DEFAULT_LOCALE);
}

#[test]
fn test_locale_fallback() {
    let mut config = Config::default();
    assert_eq!(config.chrono_locale(), Locale::en_US);

    config.locale = "fr_FR".to_string();
    assert_eq!(config.chrono_locale(), Locale::fr_FR);

    config.locale = "xx_YY".to_string();
    assert_eq!(config.chrono_locale(), Locale::en_US);
}

#[test]
fn test_log_rotation_parse() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}
