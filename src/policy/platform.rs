//! プラットフォーム別オーバーライドの定義

use serde::Serialize;

/// オーバーライド対象のビルドプラットフォーム
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    Standalone,
    Android,
    #[serde(rename = "iPhone")]
    IPhone,
}

impl Platform {
    /// インポーター上のビルドターゲット名
    pub fn build_target(&self) -> &'static str {
        match self {
            Platform::Standalone => "Standalone",
            Platform::Android => "Android",
            Platform::IPhone => "iPhone",
        }
    }

}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.build_target())
    }
}

/// 圧縮モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompressionMode {
    Uncompressed,
    Compressed,
    #[serde(rename = "compressedHQ")]
    CompressedHq,
    #[serde(rename = "compressedLQ")]
    CompressedLq,
}

impl CompressionMode {
    /// 表示名を取得
    pub fn display_name(&self) -> &'static str {
        match self {
            CompressionMode::Uncompressed => "Uncompressed",
            CompressionMode::Compressed => "Compressed",
            CompressionMode::CompressedHq => "Compressed (high quality)",
            CompressionMode::CompressedLq => "Compressed (low quality)",
        }
    }
}

/// テクスチャフォーマット
///
/// ポリシーが選ぶのは `Automatic` と `Dxt5` のみ。
/// 既存設定の読み込み時はそれ以外のコードを `Other` で保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextureFormat {
    /// ホスト側が最適なコーデックを選択
    Automatic,
    /// 固定の高圧縮率コーデック
    Dxt5,
    Other(i32),
}

impl TextureFormat {
    /// 表示名を取得
    pub fn display_name(&self) -> String {
        match self {
            TextureFormat::Automatic => "Automatic".to_string(),
            TextureFormat::Dxt5 => "DXT5".to_string(),
            TextureFormat::Other(code) => format!("Format #{}", code),
        }
    }
}

/// プラットフォームとフォーマット選択規則の組
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformFormat {
    pub platform: Platform,
    pub format: TextureFormat,
}

/// オーバーライドを生成するプラットフォームの表
///
/// デフォルトプラットフォームは含めない。ここに 4 件目を足さないこと。
pub const PLATFORM_FORMATS: &[PlatformFormat] = &[
    PlatformFormat {
        platform: Platform::Standalone,
        format: TextureFormat::Dxt5,
    },
    PlatformFormat {
        platform: Platform::Android,
        format: TextureFormat::Automatic,
    },
    PlatformFormat {
        platform: Platform::IPhone,
        format: TextureFormat::Automatic,
    },
];

/// プラットフォーム別のインポート設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformOverride {
    /// ビルドターゲット名（Standalone, Android, iPhone, WebGL など）
    pub build_target: String,
    pub overridden: bool,
    pub max_texture_size: u32,
    pub compression: CompressionMode,
    pub format: TextureFormat,
}

impl PlatformOverride {
    /// 表の 1 行からオーバーライドを生成
    pub fn from_rule(rule: &PlatformFormat, max_texture_size: u32) -> Self {
        Self {
            build_target: rule.platform.build_target().to_string(),
            overridden: true,
            max_texture_size,
            compression: CompressionMode::CompressedHq,
            format: rule.format,
        }
    }
}
