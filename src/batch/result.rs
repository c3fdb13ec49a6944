//! バッチ結果の定義

use crate::policy::TextureRole;

/// 処理したアセット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub asset_id: String,
    pub role: TextureRole,
}

impl BatchItem {
    pub fn new(asset_id: impl Into<String>, role: TextureRole) -> Self {
        Self {
            asset_id: asset_id.into(),
            role,
        }
    }
}

/// ロールに分類できなかったアセット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedItem {
    pub asset_id: String,
    /// `textureType` の生の値
    pub texture_type: i64,
}

/// 失敗したアセット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub asset_id: String,
    pub error: String,
}

impl BatchFailure {
    pub fn new(asset_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            error: error.into(),
        }
    }
}

/// バッチ結果
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// 設定を書き込んだ（dry_run では書き込む予定の）アセット
    pub updated: Vec<BatchItem>,
    /// 既にポリシーどおりだったアセット
    pub unchanged: Vec<BatchItem>,
    /// 除外ロールでスキップしたアセット
    pub excluded: Vec<BatchItem>,
    /// ロール不明でスキップしたアセット
    pub unsupported: Vec<UnsupportedItem>,
    /// インポーター設定が無く未処理のアセット
    pub missing: Vec<String>,
    /// 失敗したアセット
    pub failed: Vec<BatchFailure>,
    /// dry_run モードだったか
    pub dry_run: bool,
}

impl BatchResult {
    /// 全アイテム数
    pub fn total_count(&self) -> usize {
        self.updated.len()
            + self.unchanged.len()
            + self.excluded.len()
            + self.unsupported.len()
            + self.missing.len()
            + self.failed.len()
    }

    pub fn update_count(&self) -> usize {
        self.updated.len()
    }

    pub fn unchanged_count(&self) -> usize {
        self.unchanged.len()
    }

    /// スキップ数（除外 + ロール不明 + 設定なし）
    pub fn skip_count(&self) -> usize {
        self.excluded.len() + self.unsupported.len() + self.missing.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// 失敗が無いか
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
