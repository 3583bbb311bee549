//! Tests for layered configuration loading.

use super::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// Options that only look at layers inside the temp dir.
fn isolated_options(cwd: &Path) -> LayeredConfigOptions {
    let mut options = LayeredConfigOptions::new(cwd);
    options.system_config_path = None;
    options.user_config_path = None;
    options
}

/// Load a config whose only layer is a cwd file with the given contents.
fn load_cwd(contents: &str) -> Result<BoxOfficeConfig, ConfigError> {
    let temp = TempDir::new().expect("tmp");
    write_json5(&temp.path().join(CONFIG_FILE), contents);
    BoxOfficeConfig::load_layered_with_options(isolated_options(temp.path()))
        .map(|layered| layered.config)
}

/// No layers at all yields the defaults.
#[test]
fn no_layers_gives_defaults() {
    let temp = TempDir::new().expect("tmp");
    let layered =
        BoxOfficeConfig::load_layered_with_options(isolated_options(temp.path())).expect("config");
    assert!(layered.layers.is_empty());
    let config = layered.config;
    assert_eq!(config.service.submit_url(), "http://127.0.0.1:8000/api/submit");
    assert_eq!(config.history.storage_key, "predictions");
    assert_eq!(config.history.path, None);
}

/// Reject unexpected top-level config keys.
#[test]
fn rejects_unknown_top_level_key() {
    let err = load_cwd("{ unexpected: true }").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("unknown key"));
}

/// Reject wrongly typed nested values.
#[test]
fn rejects_non_string_base_url() {
    let err = load_cwd("{ service: { base_url: 8000 } }").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("service.base_url"));
    assert!(msg.contains("expected string"));
}

#[test]
fn rejects_base_url_without_scheme() {
    let err =
        load_cwd("{ service: { base_url: \"localhost:8000\" } }").unwrap_err();
    assert!(format!("{err}").contains("service.base_url"));
}

#[test]
fn rejects_storage_key_with_separator() {
    let err = load_cwd("{ history: { storage_key: \"../escape\" } }")
        .unwrap_err();
    assert!(format!("{err}").contains("history.storage_key"));
}

/// Accept JSON5 comments and trailing commas.
#[test]
fn accepts_json5_syntax() {
    let config = load_cwd(
        r#"{
            // local dev service
            service: { base_url: "http://localhost:5000", },
        }"#,
    )
    .expect("config");
    assert_eq!(config.service.submit_url(), "http://localhost:5000/api/submit");
}

/// Cwd config takes precedence over project and user layers.
#[test]
fn layered_config_prefers_cwd_over_project_and_user() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    let project_root = root.join("project");
    fs::create_dir_all(project_root.join(".git")).expect("git");
    let cwd = project_root.join("subdir");
    fs::create_dir_all(&cwd).expect("cwd");

    let user_config = root.join("user.json5");
    write_json5(
        &user_config,
        "{ service: { base_url: \"http://user\" }, history: { storage_key: \"user\" } }",
    );
    write_json5(
        &project_root.join(CONFIG_FILE),
        "{ service: { base_url: \"http://project\" } }",
    );
    write_json5(
        &cwd.join(CONFIG_FILE),
        "{ service: { base_url: \"http://cwd\" } }",
    );

    let mut options = isolated_options(&cwd);
    options.user_config_path = Some(user_config);

    let layered = BoxOfficeConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.config.service.base_url, "http://cwd");
    assert_eq!(layered.config.history.storage_key, "user");
    assert_eq!(layered.layers.len(), 3);
    assert_eq!(layered.layers[0].source, ConfigLayerSource::User);
    assert_eq!(layered.layers[2].source, ConfigLayerSource::Cwd);
}

/// Runtime overrides are applied last.
#[test]
fn runtime_layer_overrides_everything() {
    let temp = TempDir::new().expect("tmp");
    let cwd = temp.path().join("work");
    fs::create_dir_all(&cwd).expect("cwd");
    write_json5(
        &cwd.join(CONFIG_FILE),
        "{ history: { path: \"cwd-history\" } }",
    );
    let runtime = temp.path().join("override.json5");
    write_json5(&runtime, "{ history: { path: \"runtime-history\" } }");

    let options = isolated_options(&cwd).with_runtime_path(&runtime);
    let layered = BoxOfficeConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(
        layered.config.history.path,
        Some("runtime-history".to_string())
    );
    assert_eq!(
        layered.layers.last().map(|layer| layer.source),
        Some(ConfigLayerSource::Runtime)
    );
}

/// A missing runtime override is an error rather than silently skipped.
#[test]
fn missing_runtime_layer_fails() {
    let temp = TempDir::new().expect("tmp");
    let options =
        isolated_options(temp.path()).with_runtime_path(temp.path().join("missing.json5"));
    let err = BoxOfficeConfig::load_layered_with_options(options).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(format!("{err}").contains("missing.json5"));
}

/// Invalid layers name the layer in the error path.
#[test]
fn layer_errors_include_layer_label() {
    let temp = TempDir::new().expect("tmp");
    write_json5(
        &temp.path().join(CONFIG_FILE),
        "{ history: { capacity: 10 } }",
    );
    let err = BoxOfficeConfig::load_layered_with_options(isolated_options(temp.path()))
        .unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("cwd("));
    assert!(msg.contains("history.capacity"));
}

/// Syntax errors name the offending file.
#[test]
fn parse_errors_name_the_file() {
    let err = load_cwd("{ service: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(format!("{err}").contains(CONFIG_FILE));
}

/// A project root that is also the cwd contributes one layer, not two.
#[test]
fn project_root_at_cwd_loads_once() {
    let temp = TempDir::new().expect("tmp");
    fs::create_dir_all(temp.path().join(".git")).expect("git");
    write_json5(
        &temp.path().join(CONFIG_FILE),
        "{ history: { storage_key: \"here\" } }",
    );
    let layered =
        BoxOfficeConfig::load_layered_with_options(isolated_options(temp.path())).expect("config");
    assert_eq!(layered.layers.len(), 1);
    assert_eq!(layered.layers[0].source, ConfigLayerSource::Project);
    assert_eq!(layered.config.history.storage_key, "here");
}
