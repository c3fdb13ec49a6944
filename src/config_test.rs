use super::*;
use crate::fs::mock::MockFs;
use serial_test::serial;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

// ========================================
// 設定ファイル
// ========================================

#[test]
fn test_config_file_parse() {
    let config = ConfigFile::parse(
        r#"
max_resolution = 512
compression_quality = 75
enable_crunch = false
assets_dir = "Assets/Art"
extensions = ["png", "psd"]
"#,
    )
    .unwrap();

    assert_eq!(config.max_resolution, Some(512));
    assert_eq!(config.compression_quality, Some(75));
    assert_eq!(config.enable_crunch, Some(false));
    assert_eq!(config.assets_dir.as_deref(), Some("Assets/Art"));
    assert_eq!(
        config.extensions,
        Some(vec!["png".to_string(), "psd".to_string()])
    );
}

#[test]
fn test_config_file_rejects_unknown_keys() {
    let err = ConfigFile::parse("max_size = 512\n").unwrap_err();
    assert!(matches!(err, TexoptError::Config(_)));
}

#[test]
fn test_config_file_load_missing_is_default() {
    let fs = MockFs::new();
    let config = ConfigFile::load(Path::new("/project"), &fs).unwrap();
    assert_eq!(config, ConfigFile::default());
}

#[test]
fn test_config_file_load_from_project_root() {
    let fs = MockFs::new();
    fs.add_file("/project/texopt.toml", "compression_quality = 60\n");

    let config = ConfigFile::load(Path::new("/project"), &fs).unwrap();

    assert_eq!(config.compression_quality, Some(60));
}

// ========================================
// 環境変数
// ========================================

#[test]
fn test_overrides_from_lookup() {
    let overrides = PolicyOverrides::from_lookup(lookup_from(&[
        (ENV_MAX_RESOLUTION, "2048"),
        (ENV_COMPRESSION_QUALITY, " 40 "),
        (ENV_CRUNCH, "off"),
    ]))
    .unwrap();

    assert_eq!(overrides.max_resolution, Some(2048));
    assert_eq!(overrides.compression_quality, Some(40));
    assert_eq!(overrides.enable_crunch, Some(false));
}

#[test]
fn test_overrides_empty_values_are_unset() {
    let overrides =
        PolicyOverrides::from_lookup(lookup_from(&[(ENV_MAX_RESOLUTION, ""), (ENV_CRUNCH, "  ")]))
            .unwrap();
    assert_eq!(overrides, PolicyOverrides::default());
}

#[test]
fn test_overrides_invalid_values() {
    let err = PolicyOverrides::from_lookup(lookup_from(&[(ENV_COMPRESSION_QUALITY, "high")]))
        .unwrap_err();
    assert!(err.to_string().contains(ENV_COMPRESSION_QUALITY));

    let err = PolicyOverrides::from_lookup(lookup_from(&[(ENV_CRUNCH, "maybe")])).unwrap_err();
    assert!(err.to_string().contains("must be a boolean"));
}

#[test]
#[serial]
fn test_overrides_from_env() {
    std::env::set_var(ENV_MAX_RESOLUTION, "256");
    std::env::set_var(ENV_CRUNCH, "true");
    std::env::remove_var(ENV_COMPRESSION_QUALITY);

    let overrides = PolicyOverrides::from_env().unwrap();

    std::env::remove_var(ENV_MAX_RESOLUTION);
    std::env::remove_var(ENV_CRUNCH);

    assert_eq!(overrides.max_resolution, Some(256));
    assert_eq!(overrides.compression_quality, None);
    assert_eq!(overrides.enable_crunch, Some(true));
}

// ========================================
// 合成
// ========================================

#[test]
fn test_resolve_defaults() {
    let config = RunConfig::resolve(
        &ConfigFile::default(),
        PolicyOverrides::default(),
        PolicyOverrides::default(),
    )
    .unwrap();

    assert_eq!(config.policy, OptimizationPolicy::default());
    assert_eq!(config.assets_dir, "Assets");
    assert!(config.extensions.contains(&"png".to_string()));
}

#[test]
fn test_resolve_precedence_cli_env_file() {
    let file = ConfigFile {
        max_resolution: Some(512),
        compression_quality: Some(10),
        enable_crunch: Some(false),
        ..Default::default()
    };
    let env = PolicyOverrides {
        max_resolution: Some(2048),
        compression_quality: Some(20),
        enable_crunch: None,
    };
    let cli = PolicyOverrides {
        max_resolution: Some(64),
        ..Default::default()
    };

    let config = RunConfig::resolve(&file, env, cli).unwrap();

    assert_eq!(config.policy.max_resolution, MaxResolution::R64);
    assert_eq!(config.policy.compression_quality, 20);
    assert!(!config.policy.enable_crunch);
}

#[test]
fn test_resolve_rejects_invalid_resolution() {
    let cli = PolicyOverrides {
        max_resolution: Some(1000),
        ..Default::default()
    };

    let err = RunConfig::resolve(&ConfigFile::default(), PolicyOverrides::default(), cli)
        .unwrap_err();

    assert!(matches!(err, TexoptError::InvalidPolicy(_)));
}

#[test]
fn test_resolve_rejects_quality_over_100() {
    let file = ConfigFile {
        compression_quality: Some(150),
        ..Default::default()
    };

    let err = RunConfig::resolve(&file, PolicyOverrides::default(), PolicyOverrides::default())
        .unwrap_err();

    assert!(err.to_string().contains("got 150"));
}

#[test]
fn test_resolve_rejects_empty_extensions() {
    let file = ConfigFile {
        extensions: Some(vec![]),
        ..Default::default()
    };

    assert!(
        RunConfig::resolve(&file, PolicyOverrides::default(), PolicyOverrides::default()).is_err()
    );
}

#[test]
fn test_scan_options_from_config() {
    let file = ConfigFile {
        assets_dir: Some("Assets/Art".to_string()),
        extensions: Some(vec!["PNG".to_string()]),
        ..Default::default()
    };
    let config =
        RunConfig::resolve(&file, PolicyOverrides::default(), PolicyOverrides::default()).unwrap();

    let options = config.scan_options();

    assert_eq!(options.assets_dir, "Assets/Art");
    assert_eq!(options.extensions, vec!["png".to_string()]);
}
