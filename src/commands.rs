use crate::cli::Command;
use crate::config::PolicyOverrides;
use crate::error::{Result, TexoptError};
use std::path::PathBuf;

pub mod inspect;
pub mod optimize;

pub fn dispatch(cli: crate::cli::Cli) -> Result<()> {
    match cli.command {
        Command::Optimize(args) => optimize::run(args),
        Command::Inspect(args) => inspect::run(args),
    }
}

/// ポリシー関連の共通オプション
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PolicyArgs {
    /// Unity project root (defaults to the current directory)
    #[arg(long, short = 'p')]
    pub project: Option<PathBuf>,

    /// Maximum texture size in pixels (32, 64, ..., 8192)
    #[arg(long, value_name = "PIXELS")]
    pub max_resolution: Option<u32>,

    /// Compression quality (0-100)
    #[arg(long, value_name = "QUALITY")]
    pub quality: Option<u32>,

    /// Enable crunch compression for default textures
    #[arg(long, conflicts_with = "no_crunch")]
    pub crunch: bool,

    /// Disable crunch compression
    #[arg(long)]
    pub no_crunch: bool,
}

impl PolicyArgs {
    /// CLI レイヤーの上書きに変換
    pub fn to_overrides(&self) -> PolicyOverrides {
        let enable_crunch = match (self.crunch, self.no_crunch) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        PolicyOverrides {
            max_resolution: self.max_resolution,
            compression_quality: self.quality,
            enable_crunch,
        }
    }

    /// プロジェクトルートを解決
    pub fn project_root(&self) -> Result<PathBuf> {
        let root = match &self.project {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };

        if !root.is_dir() {
            return Err(TexoptError::InvalidArgument(format!(
                "project directory not found: {}",
                root.display()
            )));
        }
        Ok(root)
    }
}
