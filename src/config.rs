//! 実行設定
//!
//! 1 回の実行で使うポリシーとスキャン対象を組み立てる。
//! 優先順位: CLI 引数 > 環境変数 > `texopt.toml` > 既定値

use crate::error::{Result, TexoptError};
use crate::fs::FileSystem;
use crate::policy::{MaxResolution, OptimizationPolicy};
use crate::scan::{ScanOptions, DEFAULT_ASSETS_DIR, DEFAULT_TEXTURE_EXTENSIONS};
use serde::Deserialize;
use std::path::Path;

/// プロジェクトルートに置く設定ファイル名
pub const CONFIG_FILE_NAME: &str = "texopt.toml";

pub const ENV_MAX_RESOLUTION: &str = "TEXOPT_MAX_RESOLUTION";
pub const ENV_COMPRESSION_QUALITY: &str = "TEXOPT_COMPRESSION_QUALITY";
pub const ENV_CRUNCH: &str = "TEXOPT_CRUNCH";

/// `texopt.toml` の内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub max_resolution: Option<u32>,
    pub compression_quality: Option<u32>,
    pub enable_crunch: Option<bool>,
    pub assets_dir: Option<String>,
    pub extensions: Option<Vec<String>>,
}

impl ConfigFile {
    /// 設定ファイルを読み込む（無ければ空）
    pub fn load(project_root: &Path, fs: &dyn FileSystem) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE_NAME);
        if !fs.exists(&path) {
            return Ok(Self::default());
        }

        tracing::debug!(path = %path.display(), "loading config file");
        Self::parse(&fs.read_to_string(&path)?)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    fn policy_layer(&self) -> PolicyOverrides {
        PolicyOverrides {
            max_resolution: self.max_resolution,
            compression_quality: self.compression_quality,
            enable_crunch: self.enable_crunch,
        }
    }
}

/// ポリシーの部分的な上書き（1 レイヤー分）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyOverrides {
    pub max_resolution: Option<u32>,
    pub compression_quality: Option<u32>,
    pub enable_crunch: Option<bool>,
}

impl PolicyOverrides {
    /// 環境変数から読み込む
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_var)
    }

    /// 任意の参照関数から読み込む（空文字列は未設定扱い）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            max_resolution: get(ENV_MAX_RESOLUTION)
                .map(|v| parse_u32(ENV_MAX_RESOLUTION, &v))
                .transpose()?,
            compression_quality: get(ENV_COMPRESSION_QUALITY)
                .map(|v| parse_u32(ENV_COMPRESSION_QUALITY, &v))
                .transpose()?,
            enable_crunch: get(ENV_CRUNCH)
                .map(|v| parse_bool(ENV_CRUNCH, &v))
                .transpose()?,
        })
    }

    /// 自分で未設定の項目だけ `lower` の値を使う
    fn or(self, lower: PolicyOverrides) -> PolicyOverrides {
        PolicyOverrides {
            max_resolution: self.max_resolution.or(lower.max_resolution),
            compression_quality: self.compression_quality.or(lower.compression_quality),
            enable_crunch: self.enable_crunch.or(lower.enable_crunch),
        }
    }
}

/// 1 回の実行の設定
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub policy: OptimizationPolicy,
    pub assets_dir: String,
    pub extensions: Vec<String>,
}

impl RunConfig {
    /// ファイル・環境変数・CLI 引数から組み立てる
    pub fn load(project_root: &Path, cli: PolicyOverrides, fs: &dyn FileSystem) -> Result<Self> {
        let file = ConfigFile::load(project_root, fs)?;
        let env = PolicyOverrides::from_env()?;
        Self::resolve(&file, env, cli)
    }

    /// 各レイヤーを合成して検証
    ///
    /// 範囲外の値はここで弾き、バッチ開始前にエラーにする。
    pub fn resolve(file: &ConfigFile, env: PolicyOverrides, cli: PolicyOverrides) -> Result<Self> {
        let merged = cli.or(env).or(file.policy_layer());
        let defaults = OptimizationPolicy::default();

        let max_resolution = match merged.max_resolution {
            Some(pixels) => MaxResolution::try_from(pixels)?,
            None => defaults.max_resolution,
        };
        let policy = OptimizationPolicy::new(
            max_resolution,
            merged
                .compression_quality
                .unwrap_or(u32::from(defaults.compression_quality)),
            merged.enable_crunch.unwrap_or(defaults.enable_crunch),
        )?;

        let extensions = match &file.extensions {
            Some(list) if list.is_empty() => {
                return Err(TexoptError::InvalidPolicy(
                    "extensions must not be empty".to_string(),
                ))
            }
            Some(list) => list.clone(),
            None => DEFAULT_TEXTURE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        Ok(Self {
            policy,
            assets_dir: file
                .assets_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string()),
            extensions,
        })
    }

    /// スキャンオプションへ変換
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new()
            .with_assets_dir(self.assets_dir.clone())
            .with_extensions(self.extensions.clone())
    }
}

/// 環境変数を取得（空文字列は None として扱う）
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| {
        TexoptError::InvalidPolicy(format!("{} must be a non-negative integer (got '{}')", key, value))
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(TexoptError::InvalidPolicy(format!(
            "{} must be a boolean (got '{}')",
            key, value
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
