//! テクスチャアセットのスキャン
//!
//! プロジェクトの `Assets/` 配下を走査し、画像ファイルを列挙する。

use crate::error::Result;
use crate::importer::meta_path_for;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

// ============================================================================
// 定数
// ============================================================================

/// デフォルトのアセットディレクトリ
pub const DEFAULT_ASSETS_DIR: &str = "Assets";

/// テクスチャとしてインポートされる拡張子
pub const DEFAULT_TEXTURE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "tga", "psd", "tif", "tiff", "bmp", "gif", "exr", "hdr", "iff",
    "pict",
];

// ============================================================================
// 型
// ============================================================================

/// スキャンオプション
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// プロジェクトルートからの相対パス
    pub assets_dir: String,
    /// 小文字の拡張子（ドットなし）
    pub extensions: Vec<String>,
    /// アセットパス（`Assets/...`）に対する絞り込み
    pub filter: Option<glob::Pattern>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
            extensions: DEFAULT_TEXTURE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            filter: None,
        }
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets_dir(mut self, dir: impl Into<String>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// glob パターンで絞り込み
    pub fn with_filter(mut self, pattern: &str) -> Result<Self> {
        self.filter = Some(glob::Pattern::new(pattern)?);
        Ok(self)
    }

    fn is_texture(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}

/// スキャンで見つかったテクスチャ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureFile {
    /// プロジェクトルートからの相対パス（`/` 区切り）
    pub asset_id: String,
    /// 画像ファイルの絶対パス
    pub asset_path: PathBuf,
    /// 対応する .meta ファイルのパス（存在するとは限らない）
    pub meta_path: PathBuf,
}

impl TextureFile {
    pub fn new(project_root: &Path, asset_path: PathBuf) -> Self {
        let asset_id = relative_id(project_root, &asset_path);
        let meta_path = meta_path_for(&asset_path);
        Self {
            asset_id,
            asset_path,
            meta_path,
        }
    }
}

// ============================================================================
// 関数
// ============================================================================

/// テクスチャ一覧を取得
///
/// # Arguments
/// * `project_root` - プロジェクトルート
/// * `options` - 対象ディレクトリ・拡張子・絞り込み
///
/// # Returns
/// アセット ID 順に並んだテクスチャ一覧。
///
/// # Behavior
/// - アセットディレクトリが無い場合は空配列を返す
/// - `.` で始まるもの、`~` で終わるものはエディタと同じく無視する
/// - .meta の有無は問わない（無いものは呼び出し側で未処理扱い）
/// - 壊れたシンボリックリンクなど読めないエントリは警告を出して飛ばす
pub fn scan_textures(project_root: &Path, options: &ScanOptions) -> Result<Vec<TextureFile>> {
    let assets_root = project_root.join(&options.assets_dir);
    if !assets_root.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(&assets_root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // ルート自体が読めない場合のみ中断する
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !options.is_texture(entry.path()) {
            continue;
        }

        let file = TextureFile::new(project_root, entry.into_path());
        if let Some(filter) = &options.filter {
            if !filter.matches(&file.asset_id) {
                continue;
            }
        }
        files.push(file);
    }

    files.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));
    Ok(files)
}

/// エディタがインポート対象外とするエントリかどうか
fn is_ignored(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || name.ends_with('~'))
        .unwrap_or(false)
}

/// プロジェクトルートからの相対パスを `/` 区切りで取得
pub fn relative_id(project_root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(project_root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
