//! ファイルシステム抽象化
//!
//! .meta ファイルの読み書きを抽象化するレイヤー。
//! テスト時に MockFs を注入してファイル操作をモック化できる。

use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// ファイルシステム操作を抽象化するトレイト
///
/// 本番コードでは RealFs を使用する。
pub trait FileSystem: Send + Sync {
    /// パスが存在するか（シンボリックリンク追従）
    fn exists(&self, path: &Path) -> bool;

    /// 通常ファイルかどうか
    fn is_file(&self, path: &Path) -> bool;

    /// ファイル内容を読み込み
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// ファイルを置き換える
    ///
    /// - 一時ファイルに書いてからリネームする
    /// - 途中で失敗しても元のファイルは壊れない
    fn replace(&self, path: &Path, content: &str) -> Result<()>;
}

/// 本番用ファイルシステム実装
pub struct RealFs;

impl FileSystem for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn replace(&self, path: &Path, content: &str) -> Result<()> {
        // 同一ディレクトリに一時ファイルを作成
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.flush()?;

        // Windows では既存ファイルがあると失敗することがあるため削除して再試行
        match temp_file.persist(path) {
            Ok(_) => Ok(()),
            Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
                let _ = std::fs::remove_file(path);
                e.file.persist(path).map_err(|e| e.error)?;
                Ok(())
            }
            Err(e) => Err(e.error.into()),
        }
    }
}

#[cfg(test)]
pub mod mock;

#[cfg(test)]
#[path = "fs_test.rs"]
mod tests;
