//! テクスチャ最適化ポリシーエンジン
//!
//! アセット 1 件とポリシーから、あるべきインポート設定を決める。
//! 入出力は行わない。設定の読み書きと再インポートは呼び出し側の責務。
//!
//! ## 使い方
//!
//! ```ignore
//! use texopt::policy::{evaluate, Evaluation, MaxResolution, OptimizationPolicy, TextureAsset, TextureRole};
//!
//! let policy = OptimizationPolicy::new(MaxResolution::R1024, 85, true)?;
//! let asset = TextureAsset::new("Assets/rock.png", TextureRole::Default);
//!
//! match evaluate(&asset, policy) {
//!     Evaluation::Apply(settings) => meta.apply(&settings)?,
//!     Evaluation::Skip(reason) => println!("skip: {reason}"),
//! }
//! ```

mod platform;
mod role;
mod settings;

pub use platform::{CompressionMode, PlatformOverride, TextureFormat, PLATFORM_FORMATS};
pub use role::TextureRole;
pub use settings::{MaxResolution, OptimizationPolicy};

use serde::Serialize;
use std::collections::BTreeMap;

/// 一括最適化の対象外とするロール
///
/// 圧縮ノイズに弱いもの、もしくは画素配置そのものに意味があるもの。
/// この集合の増減はポリシー判断であり、実装都合で変えないこと。
pub const EXCLUDED_ROLES: &[TextureRole] = &[
    TextureRole::Sprite,
    TextureRole::NormalMap,
    TextureRole::Lightmap,
    TextureRole::Cookie,
    TextureRole::SingleChannel,
    TextureRole::Gui,
];

/// 評価対象のテクスチャアセット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureAsset {
    /// プロジェクトルートからの相対パス
    pub id: String,
    pub role: TextureRole,
    /// 現在のプラットフォーム別設定（ビルドターゲット名 → 設定）
    pub overrides: BTreeMap<String, PlatformOverride>,
}

impl TextureAsset {
    pub fn new(id: impl Into<String>, role: TextureRole) -> Self {
        Self {
            id: id.into(),
            role,
            overrides: BTreeMap::new(),
        }
    }

    /// 現在のオーバーライドを設定
    pub fn with_overrides(mut self, overrides: BTreeMap<String, PlatformOverride>) -> Self {
        self.overrides = overrides;
        self
    }

    /// ポリシーが扱わないビルドターゲット（WebGL 等）の名前
    ///
    /// これらの設定は評価結果に含まれず、書き込み時もそのまま残る。
    pub fn unmanaged_targets(&self) -> Vec<&str> {
        self.overrides
            .keys()
            .map(String::as_str)
            .filter(|target| {
                !PLATFORM_FORMATS
                    .iter()
                    .any(|rule| rule.platform.build_target() == *target)
            })
            .collect()
    }
}

/// 評価結果として書き込むべき設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredSettings {
    pub is_readable: bool,
    pub max_texture_size: u32,
    pub compression: CompressionMode,
    pub compression_quality: u8,
    pub crunched_compression: bool,
    pub platform_overrides: Vec<PlatformOverride>,
}

impl DesiredSettings {
    /// ビルドターゲット名でオーバーライドを検索
    pub fn platform_override(&self, build_target: &str) -> Option<&PlatformOverride> {
        self.platform_overrides
            .iter()
            .find(|o| o.build_target == build_target)
    }
}

/// スキップ理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "role", rename_all = "camelCase")]
pub enum SkipReason {
    /// 除外ロールに該当
    ExcludedRole(TextureRole),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::ExcludedRole(role) => write!(f, "{} textures are never optimized", role),
        }
    }
}

/// 評価結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// 変更しない
    Skip(SkipReason),
    /// この設定を書き込む
    Apply(DesiredSettings),
}

impl Evaluation {
    /// 書き込む設定を取り出す（スキップなら None）
    pub fn into_settings(self) -> Option<DesiredSettings> {
        match self {
            Evaluation::Apply(settings) => Some(settings),
            Evaluation::Skip(_) => None,
        }
    }
}

/// 除外ロールかどうか
pub fn is_excluded(role: TextureRole) -> bool {
    EXCLUDED_ROLES.contains(&role)
}

/// ポリシーを評価
///
/// 純粋関数。同じ入力には常に同じ結果を返し、入力を変更しない。
pub fn evaluate(asset: &TextureAsset, policy: OptimizationPolicy) -> Evaluation {
    if is_excluded(asset.role) {
        return Evaluation::Skip(SkipReason::ExcludedRole(asset.role));
    }

    let max_texture_size = policy.max_resolution.pixels();

    // Default 以外では明示的に false を書く（前回実行の値を残さない）
    let crunched_compression = asset.role == TextureRole::Default && policy.enable_crunch;

    let platform_overrides = PLATFORM_FORMATS
        .iter()
        .map(|rule| PlatformOverride::from_rule(rule, max_texture_size))
        .collect();

    Evaluation::Apply(DesiredSettings {
        is_readable: false,
        max_texture_size,
        compression: CompressionMode::CompressedHq,
        compression_quality: policy.compression_quality,
        crunched_compression,
        platform_overrides,
    })
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod tests;

#[cfg(test)]
#[path = "policy_proptests.rs"]
mod proptests;
