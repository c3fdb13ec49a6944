//! テスト用モックファイルシステム

use super::*;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// テスト用モックファイルシステム
pub struct MockFs {
    files: RwLock<HashMap<String, String>>,
    /// 書き込みを失敗させるパス
    read_only: RwLock<HashSet<String>>,
    writes: RwLock<Vec<String>>,
}

impl MockFs {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            read_only: RwLock::new(HashSet::new()),
            writes: RwLock::new(Vec::new()),
        }
    }

    /// ファイルを追加
    pub fn add_file(&self, path: &str, content: &str) {
        self.files
            .write()
            .unwrap()
            .insert(path.to_string(), content.to_string());
    }

    /// 書き込み禁止にする
    pub fn set_read_only(&self, path: &str) {
        self.read_only.write().unwrap().insert(path.to_string());
    }

    /// ファイル内容を取得
    pub fn content(&self, path: &str) -> Option<String> {
        self.files.read().unwrap().get(path).cloned()
    }

    /// 書き込まれたパスの一覧（順序どおり）
    pub fn writes(&self) -> Vec<String> {
        self.writes.read().unwrap().clone()
    }
}

impl Default for MockFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFs {
    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap()
            .contains_key(path.to_string_lossy().as_ref())
    }

    fn is_file(&self, path: &Path) -> bool {
        self.exists(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .read()
            .unwrap()
            .get(path.to_string_lossy().as_ref())
            .cloned()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "not found").into())
    }

    fn replace(&self, path: &Path, content: &str) -> Result<()> {
        let key = path.to_string_lossy().to_string();
        if self.read_only.read().unwrap().contains(&key) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )
            .into());
        }

        self.writes.write().unwrap().push(key.clone());
        self.files
            .write()
            .unwrap()
            .insert(key, content.to_string());
        Ok(())
    }
}
