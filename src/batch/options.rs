//! バッチ実行オプション

/// バッチ実行オプション
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// 書き込まずに結果だけ返す
    pub dry_run: bool,
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
