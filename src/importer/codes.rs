//! インポーターのシリアライズ値と型の対応
//!
//! .meta ファイルには列挙値が整数で書かれている。

use crate::policy::{CompressionMode, TextureFormat, TextureRole};

/// `textureType` の整数値からロールへ変換
///
/// Cursor(7), DirectionalLightmap(11), Shadowmask(12) などは None。
pub fn role_from_code(code: i64) -> Option<TextureRole> {
    match code {
        0 => Some(TextureRole::Default),
        1 => Some(TextureRole::NormalMap),
        2 => Some(TextureRole::Gui),
        4 => Some(TextureRole::Cookie),
        6 => Some(TextureRole::Lightmap),
        8 => Some(TextureRole::Sprite),
        10 => Some(TextureRole::SingleChannel),
        _ => None,
    }
}

/// `textureCompression` の整数値から変換（未知の値は Compressed 扱い）
pub fn compression_from_code(code: i64) -> CompressionMode {
    match code {
        0 => CompressionMode::Uncompressed,
        2 => CompressionMode::CompressedHq,
        3 => CompressionMode::CompressedLq,
        _ => CompressionMode::Compressed,
    }
}

pub fn compression_code(mode: CompressionMode) -> i64 {
    match mode {
        CompressionMode::Uncompressed => 0,
        CompressionMode::Compressed => 1,
        CompressionMode::CompressedHq => 2,
        CompressionMode::CompressedLq => 3,
    }
}

/// `textureFormat` の整数値から変換
pub fn format_from_code(code: i64) -> TextureFormat {
    match code {
        -1 => TextureFormat::Automatic,
        12 => TextureFormat::Dxt5,
        other => TextureFormat::Other(other as i32),
    }
}

pub fn format_code(format: TextureFormat) -> i64 {
    match format {
        TextureFormat::Automatic => -1,
        TextureFormat::Dxt5 => 12,
        TextureFormat::Other(code) => i64::from(code),
    }
}
