mod code;
mod formatter;

pub use code::ErrorCode;
pub use formatter::ErrorFormatter;

use thiserror::Error;

/// texopt 統一エラー型
#[derive(Debug, Error)]
pub enum TexoptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid filter pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("No TextureImporter settings found for {0}")]
    MissingImporter(String),

    #[error("Invalid meta file {path}: {message}")]
    InvalidMeta { path: String, message: String },

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("{0} texture(s) failed to optimize")]
    BatchFailed(usize),
}

pub type Result<T> = std::result::Result<T, TexoptError>;

impl TexoptError {
    /// エラーコードを取得
    pub fn code(&self) -> ErrorCode {
        match self {
            TexoptError::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::Io001,
                std::io::ErrorKind::PermissionDenied => ErrorCode::Io002,
                _ => ErrorCode::Io003,
            },
            TexoptError::Walk(_) => ErrorCode::Io003,
            TexoptError::Config(_) => ErrorCode::Cfg001,
            TexoptError::InvalidPolicy(_) => ErrorCode::Cfg002,
            TexoptError::Yaml(_) | TexoptError::InvalidMeta { .. } => ErrorCode::Imp002,
            TexoptError::MissingImporter(_) => ErrorCode::Imp001,
            TexoptError::AssetNotFound(_) => ErrorCode::Imp003,
            TexoptError::InvalidArgument(_) | TexoptError::Pattern(_) => ErrorCode::Val001,
            TexoptError::BatchFailed(_) => ErrorCode::Bat001,
            TexoptError::Json(_) => ErrorCode::Int001,
        }
    }

    /// アセット単位のエラーかどうか（バッチを中断しない）
    pub fn is_per_asset(&self) -> bool {
        matches!(
            self,
            TexoptError::Io(_)
                | TexoptError::Yaml(_)
                | TexoptError::MissingImporter(_)
                | TexoptError::InvalidMeta { .. }
        )
    }

    /// メタファイルの内容エラーを作成
    pub fn invalid_meta(path: impl Into<String>, message: impl Into<String>) -> Self {
        TexoptError::InvalidMeta {
            path: path.into(),
            message: message.into(),
        }
    }
}
