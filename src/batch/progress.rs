//! 進捗通知

use indicatif::{ProgressBar, ProgressStyle};

/// バッチの進捗を受け取る
///
/// 表示専用。バッチの動作には影響しない。
pub trait Progress {
    /// アセットの処理を始める
    fn begin(&self, asset_id: &str);
    /// アセットの処理を終えた
    fn advance(&self);
    /// 全件終了
    fn finish(&self);
}

/// 何もしない進捗通知
#[cfg(test)]
pub struct NoProgress;

#[cfg(test)]
impl Progress for NoProgress {
    fn begin(&self, _asset_id: &str) {}
    fn advance(&self) {}
    fn finish(&self) {}
}

impl Progress for ProgressBar {
    fn begin(&self, asset_id: &str) {
        self.set_message(asset_id.to_string());
    }

    fn advance(&self) {
        self.inc(1);
    }

    fn finish(&self) {
        self.finish_and_clear();
    }
}

/// テクスチャ件数ぶんのプログレスバーを作成
pub fn texture_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
