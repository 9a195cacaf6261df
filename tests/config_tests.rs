use llmport::config::{ProviderSettings, Settings};
use llmport::{ConfigError, ConfigOverrides, Provider, resolve};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn settings_path(temp_dir: &TempDir) -> std::path::PathBuf {
    temp_dir.path().join("llmport").join("config.toml")
}

#[test]
fn test_missing_settings_file_yields_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let settings = Settings::load_from(&settings_path(&temp_dir)).expect("load");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.default_provider().expect("provider"), Provider::Gemini);
}

#[test]
fn test_settings_round_trip_through_file() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = settings_path(&temp_dir);

    let mut settings = Settings::default();
    let changed = settings
        .update(&ConfigOverrides {
            provider: Some("openrouter".to_string()),
            api_key: Some("sk-or-saved".to_string()),
            model: Some("test/model".to_string()),
            timeout_secs: Some(30),
            base_url: None,
        })
        .expect("update");
    assert!(changed);
    settings.save_to(&path).expect("save");

    let loaded = Settings::load_from(&path).expect("load");
    assert_eq!(loaded, settings);
    assert_eq!(loaded.provider.as_deref(), Some("openrouter"));
    assert_eq!(
        loaded.providers.get("openrouter"),
        Some(&ProviderSettings {
            api_key: Some("sk-or-saved".to_string()),
            model: Some("test/model".to_string()),
            base_url: None,
        })
    );
}

#[test]
fn test_saved_settings_resolve_over_environment() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = settings_path(&temp_dir);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(
        &path,
        "provider = \"openrouter\"\n\n[providers.openrouter]\napi_key = \"sk-or-saved\"\n",
    )
    .expect("write settings");

    let env: HashMap<String, String> = [
        ("LLMPORT_PROVIDER", "gemini"),
        ("OPENROUTER_API_KEY", "sk-or-env"),
        ("LLMPORT_OPENROUTER_MODEL", "env/model"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let settings = Settings::load_from(&path).expect("load");
    let config = resolve(
        &settings.layered_overrides(&ConfigOverrides::default(), &env),
        &env,
    )
    .expect("resolve");

    assert_eq!(config.provider, Provider::OpenRouter);
    assert_eq!(config.api_key.as_deref(), Some("sk-or-saved"));
    assert_eq!(config.model, "env/model");
}

#[test]
fn test_invalid_settings_file() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "provider = [unterminated").expect("write settings");

    let err = Settings::load_from(&path).expect_err("invalid TOML");
    assert!(matches!(err, ConfigError::SettingsFormat(_)));
}

#[test]
fn test_update_rejects_unknown_provider() {
    let mut settings = Settings::default();
    let err = settings
        .update(&ConfigOverrides {
            provider: Some("claude".to_string()),
            ..Default::default()
        })
        .expect_err("unknown provider");
    assert!(matches!(err, ConfigError::UnsupportedProvider(_)));
    assert_eq!(settings, Settings::default());
}
