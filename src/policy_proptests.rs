//! policy モジュールのプロパティテスト

use super::*;
use proptest::prelude::*;

fn role_strategy() -> impl Strategy<Value = TextureRole> {
    prop::sample::select(TextureRole::all().to_vec())
}

fn policy_strategy() -> impl Strategy<Value = OptimizationPolicy> {
    (
        prop::sample::select(MaxResolution::all().to_vec()),
        0u32..=100,
        any::<bool>(),
    )
        .prop_map(|(max, quality, crunch)| OptimizationPolicy::new(max, quality, crunch).unwrap())
}

proptest! {
    /// 除外ロールはポリシーに関係なくスキップされる
    #[test]
    fn prop_excluded_roles_always_skip(
        role in prop::sample::select(EXCLUDED_ROLES.to_vec()),
        policy in policy_strategy()
    ) {
        let asset = TextureAsset::new("Assets/t.png", role);
        prop_assert_eq!(
            evaluate(&asset, policy),
            Evaluation::Skip(SkipReason::ExcludedRole(role))
        );
    }

    /// Default ロールは常に 3 件のオーバーライドを持つ Apply になる
    #[test]
    fn prop_default_role_applies_policy(policy in policy_strategy()) {
        let asset = TextureAsset::new("Assets/t.png", TextureRole::Default);
        let evaluation = evaluate(&asset, policy);
        let settings = evaluation.into_settings().expect("Default role must apply");

        prop_assert!(!settings.is_readable);
        prop_assert_eq!(settings.compression, CompressionMode::CompressedHq);
        prop_assert_eq!(settings.compression_quality, policy.compression_quality);
        prop_assert_eq!(settings.max_texture_size, policy.max_resolution.pixels());
        prop_assert_eq!(settings.platform_overrides.len(), 3);
        for o in &settings.platform_overrides {
            prop_assert!(o.overridden);
            prop_assert_eq!(o.max_texture_size, policy.max_resolution.pixels());
        }
    }

    /// crunch は Default かつ有効化時のみ true
    #[test]
    fn prop_crunch_only_for_default_and_enabled(
        role in role_strategy(),
        policy in policy_strategy()
    ) {
        let asset = TextureAsset::new("Assets/t.png", role);
        if let Some(settings) = evaluate(&asset, policy).into_settings() {
            prop_assert_eq!(
                settings.crunched_compression,
                role == TextureRole::Default && policy.enable_crunch
            );
        }
    }

    /// 同じ入力は同じ結果
    #[test]
    fn prop_evaluate_is_deterministic(
        role in role_strategy(),
        policy in policy_strategy()
    ) {
        let asset = TextureAsset::new("Assets/t.png", role);
        let before = asset.clone();

        let first = evaluate(&asset, policy);
        let second = evaluate(&asset, policy);

        prop_assert_eq!(first, second);
        prop_assert_eq!(asset, before);
    }

    /// Standalone は DXT5、モバイルは Automatic
    #[test]
    fn prop_platform_formats(policy in policy_strategy()) {
        let asset = TextureAsset::new("Assets/t.png", TextureRole::Default);
        let evaluation = evaluate(&asset, policy);
        let settings = evaluation.into_settings().unwrap();

        for o in &settings.platform_overrides {
            let expected = match o.build_target.as_str() {
                "Standalone" => TextureFormat::Dxt5,
                "Android" | "iPhone" => TextureFormat::Automatic,
                other => unreachable!("unexpected build target {}", other),
            };
            prop_assert_eq!(o.format, expected);
        }
    }
}
