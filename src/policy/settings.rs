//! 最適化ポリシー（1 回の実行で共有する設定値）

use crate::error::{Result, TexoptError};
use serde::{Deserialize, Serialize};

/// 最大解像度（2 の冪、32〜8192）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum MaxResolution {
    R32,
    R64,
    R128,
    R256,
    R512,
    R1024,
    R2048,
    R4096,
    R8192,
}

impl MaxResolution {
    /// ピクセル数を取得
    pub fn pixels(&self) -> u32 {
        match self {
            MaxResolution::R32 => 32,
            MaxResolution::R64 => 64,
            MaxResolution::R128 => 128,
            MaxResolution::R256 => 256,
            MaxResolution::R512 => 512,
            MaxResolution::R1024 => 1024,
            MaxResolution::R2048 => 2048,
            MaxResolution::R4096 => 4096,
            MaxResolution::R8192 => 8192,
        }
    }

    /// ピクセル数から変換（選択肢にない値は None）
    pub fn from_pixels(pixels: u32) -> Option<Self> {
        Self::all().iter().copied().find(|r| r.pixels() == pixels)
    }

    /// 全選択肢を取得
    pub fn all() -> &'static [MaxResolution] {
        &[
            MaxResolution::R32,
            MaxResolution::R64,
            MaxResolution::R128,
            MaxResolution::R256,
            MaxResolution::R512,
            MaxResolution::R1024,
            MaxResolution::R2048,
            MaxResolution::R4096,
            MaxResolution::R8192,
        ]
    }
}

impl From<MaxResolution> for u32 {
    fn from(value: MaxResolution) -> Self {
        value.pixels()
    }
}

impl TryFrom<u32> for MaxResolution {
    type Error = TexoptError;

    fn try_from(value: u32) -> Result<Self> {
        MaxResolution::from_pixels(value).ok_or_else(|| {
            TexoptError::InvalidPolicy(format!(
                "max resolution must be one of 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192 (got {})",
                value
            ))
        })
    }
}

impl std::fmt::Display for MaxResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

/// 圧縮品質の上限
pub const MAX_COMPRESSION_QUALITY: u8 = 100;

/// 最適化ポリシー
///
/// 実行ごとに 1 度だけ組み立て、値渡しでエンジンに渡す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationPolicy {
    pub max_resolution: MaxResolution,
    /// 0〜100
    pub compression_quality: u8,
    /// Default ロールにのみ効く
    pub enable_crunch: bool,
}

impl OptimizationPolicy {
    /// 範囲チェック付きで作成
    pub fn new(
        max_resolution: MaxResolution,
        compression_quality: u32,
        enable_crunch: bool,
    ) -> Result<Self> {
        if compression_quality > u32::from(MAX_COMPRESSION_QUALITY) {
            return Err(TexoptError::InvalidPolicy(format!(
                "compression quality must be between 0 and 100 (got {})",
                compression_quality
            )));
        }

        Ok(Self {
            max_resolution,
            compression_quality: compression_quality as u8,
            enable_crunch,
        })
    }
}

impl Default for OptimizationPolicy {
    fn default() -> Self {
        Self {
            max_resolution: MaxResolution::R1024,
            compression_quality: MAX_COMPRESSION_QUALITY,
            enable_crunch: true,
        }
    }
}
