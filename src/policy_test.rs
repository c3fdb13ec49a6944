use super::*;

fn policy(max: MaxResolution, quality: u32, crunch: bool) -> OptimizationPolicy {
    OptimizationPolicy::new(max, quality, crunch).unwrap()
}

fn apply_settings(asset: &TextureAsset, policy: OptimizationPolicy) -> DesiredSettings {
    match evaluate(asset, policy) {
        Evaluation::Apply(settings) => settings,
        Evaluation::Skip(reason) => panic!("Expected Apply, got Skip({reason})"),
    }
}

// ========================================
// 除外ロール
// ========================================

#[test]
fn test_excluded_roles_are_closed_set() {
    assert_eq!(EXCLUDED_ROLES.len(), 6);
    assert!(!EXCLUDED_ROLES.contains(&TextureRole::Default));
    for role in TextureRole::all() {
        if *role != TextureRole::Default {
            assert!(is_excluded(*role), "{role} should be excluded");
        }
    }
}

#[test]
fn test_normal_map_is_skipped() {
    let asset = TextureAsset::new("Assets/brick_n.png", TextureRole::NormalMap);

    let evaluation = evaluate(&asset, OptimizationPolicy::default());

    assert_eq!(
        evaluation,
        Evaluation::Skip(SkipReason::ExcludedRole(TextureRole::NormalMap))
    );
    assert!(evaluation.into_settings().is_none());
}

#[test]
fn test_sprite_skipped_even_with_crunch_disabled() {
    let asset = TextureAsset::new("Assets/ui/icon.png", TextureRole::Sprite);

    let evaluation = evaluate(&asset, policy(MaxResolution::R32, 0, false));

    assert!(matches!(evaluation, Evaluation::Skip(_)));
}

#[test]
fn test_skip_reason_display() {
    let reason = SkipReason::ExcludedRole(TextureRole::Gui);
    assert_eq!(reason.to_string(), "GUI textures are never optimized");
}

// ========================================
// Default ロール
// ========================================

#[test]
fn test_default_role_scenario_1024_q85_crunch() {
    let asset = TextureAsset::new("Assets/rock.png", TextureRole::Default);

    let settings = apply_settings(&asset, policy(MaxResolution::R1024, 85, true));

    assert!(!settings.is_readable);
    assert_eq!(settings.max_texture_size, 1024);
    assert_eq!(settings.compression, CompressionMode::CompressedHq);
    assert_eq!(settings.compression_quality, 85);
    assert!(settings.crunched_compression);

    let targets: Vec<&str> = settings
        .platform_overrides
        .iter()
        .map(|o| o.build_target.as_str())
        .collect();
    assert_eq!(targets, vec!["Standalone", "Android", "iPhone"]);

    for o in &settings.platform_overrides {
        assert!(o.overridden);
        assert_eq!(o.max_texture_size, 1024);
        assert_eq!(o.compression, CompressionMode::CompressedHq);
    }
}

#[test]
fn test_default_role_without_crunch() {
    let asset = TextureAsset::new("Assets/rock.png", TextureRole::Default);

    let settings = apply_settings(&asset, policy(MaxResolution::R2048, 50, false));

    assert!(!settings.crunched_compression);
    assert_eq!(settings.max_texture_size, 2048);
}

#[test]
fn test_platform_formats_not_swapped() {
    let asset = TextureAsset::new("Assets/rock.png", TextureRole::Default);

    let settings = apply_settings(&asset, OptimizationPolicy::default());

    assert_eq!(
        settings.platform_override("Standalone").unwrap().format,
        TextureFormat::Dxt5
    );
    assert_eq!(
        settings.platform_override("Android").unwrap().format,
        TextureFormat::Automatic
    );
    assert_eq!(
        settings.platform_override("iPhone").unwrap().format,
        TextureFormat::Automatic
    );
}

#[test]
fn test_default_platform_never_overridden() {
    let asset = TextureAsset::new("Assets/rock.png", TextureRole::Default);

    let settings = apply_settings(&asset, OptimizationPolicy::default());

    assert_eq!(settings.platform_overrides.len(), 3);
    assert!(settings.platform_override("DefaultTexturePlatform").is_none());
}

#[test]
fn test_quality_bounds_accepted() {
    let asset = TextureAsset::new("Assets/rock.png", TextureRole::Default);

    assert_eq!(
        apply_settings(&asset, policy(MaxResolution::R32, 0, true)).compression_quality,
        0
    );
    assert_eq!(
        apply_settings(&asset, policy(MaxResolution::R8192, 100, true)).compression_quality,
        100
    );
}

#[test]
fn test_existing_overrides_do_not_affect_result() {
    let mut current = BTreeMap::new();
    current.insert(
        "Android".to_string(),
        PlatformOverride {
            build_target: "Android".to_string(),
            overridden: false,
            max_texture_size: 4096,
            compression: CompressionMode::Uncompressed,
            format: TextureFormat::Other(47),
        },
    );
    let plain = TextureAsset::new("Assets/rock.png", TextureRole::Default);
    let with_overrides = plain.clone().with_overrides(current);

    let p = policy(MaxResolution::R512, 70, true);
    assert_eq!(evaluate(&plain, p), evaluate(&with_overrides, p));
}

#[test]
fn test_unmanaged_targets_excludes_policy_platforms() {
    let entry = |target: &str| PlatformOverride {
        build_target: target.to_string(),
        overridden: true,
        max_texture_size: 2048,
        compression: CompressionMode::Compressed,
        format: TextureFormat::Automatic,
    };
    let current: BTreeMap<String, PlatformOverride> = ["Android", "WebGL", "tvOS"]
        .into_iter()
        .map(|t| (t.to_string(), entry(t)))
        .collect();

    let asset = TextureAsset::new("Assets/rock.png", TextureRole::Default).with_overrides(current);

    assert_eq!(asset.unmanaged_targets(), vec!["WebGL", "tvOS"]);
    assert!(TextureAsset::new("Assets/a.png", TextureRole::Default)
        .unmanaged_targets()
        .is_empty());
}

#[test]
fn test_evaluate_is_deterministic() {
    let asset = TextureAsset::new("Assets/rock.png", TextureRole::Default);
    let p = policy(MaxResolution::R256, 42, true);

    assert_eq!(evaluate(&asset, p), evaluate(&asset, p));
}

// ========================================
// ポリシー構築
// ========================================

#[test]
fn test_policy_default_values() {
    let p = OptimizationPolicy::default();
    assert_eq!(p.max_resolution, MaxResolution::R1024);
    assert_eq!(p.compression_quality, 100);
    assert!(p.enable_crunch);
}

#[test]
fn test_policy_rejects_quality_over_100() {
    let err = OptimizationPolicy::new(MaxResolution::R1024, 101, true).unwrap_err();
    assert!(err.to_string().contains("between 0 and 100"));
}

#[test]
fn test_max_resolution_from_pixels() {
    assert_eq!(MaxResolution::from_pixels(32), Some(MaxResolution::R32));
    assert_eq!(MaxResolution::from_pixels(8192), Some(MaxResolution::R8192));
    assert_eq!(MaxResolution::from_pixels(1000), None);
    assert_eq!(MaxResolution::from_pixels(16), None);
    assert_eq!(MaxResolution::from_pixels(16384), None);
}

#[test]
fn test_max_resolution_try_from_error() {
    let err = MaxResolution::try_from(300).unwrap_err();
    assert!(err.to_string().contains("got 300"));
}

#[test]
fn test_desired_settings_json_shape() {
    let asset = TextureAsset::new("Assets/rock.png", TextureRole::Default);
    let settings = apply_settings(&asset, policy(MaxResolution::R1024, 85, true));

    let json = serde_json::to_string(&settings).unwrap();

    assert!(json.contains("\"isReadable\":false"));
    assert!(json.contains("\"compression\":\"compressedHQ\""));
    assert!(json.contains("\"buildTarget\":\"iPhone\""));
    assert!(json.contains("\"format\":\"dxt5\""));
}
