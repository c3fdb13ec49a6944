//! 一括最適化 Feature
//!
//! スキャン済みのテクスチャ 1 件ずつにポリシーを評価し、
//! 必要なものだけ .meta を書き換える。
//! インポーター設定が取れないアセットは未処理として数え、バッチは止めない。
//!
//! ## 使い方
//!
//! ```ignore
//! use texopt::batch::{run_batch, BatchOptions, NoProgress};
//!
//! let files = scan_textures(&project_root, &ScanOptions::new())?;
//! let result = run_batch(&files, policy, &BatchOptions::new().with_dry_run(true), &NoProgress);
//!
//! println!("Updated: {}", result.update_count());
//! println!("Skipped: {}", result.skip_count());
//! ```

mod options;
mod progress;
mod result;

pub use crate::fs::{FileSystem, RealFs};
pub use options::BatchOptions;
#[cfg(test)]
pub use progress::NoProgress;
pub use progress::{texture_progress_bar, Progress};
pub use result::{BatchFailure, BatchItem, BatchResult, UnsupportedItem};

use crate::error::{Result, TexoptError};
use crate::importer::TextureImporterMeta;
use crate::policy::{evaluate, OptimizationPolicy, TextureAsset, TextureRole};
use crate::scan::TextureFile;

/// 1 アセットの処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Updated(TextureRole),
    Unchanged(TextureRole),
    Excluded(TextureRole),
    Unsupported(i64),
}

/// 一括最適化を実行
///
/// 失敗したアセットは `failed`、設定の無いアセットは `missing` に記録して次へ進む。
pub fn run_batch(
    files: &[TextureFile],
    policy: OptimizationPolicy,
    options: &BatchOptions,
    progress: &dyn Progress,
) -> BatchResult {
    run_batch_with_fs(files, policy, options, progress, &RealFs)
}

/// テスト用エントリポイント（FileSystem を注入）
pub(crate) fn run_batch_with_fs(
    files: &[TextureFile],
    policy: OptimizationPolicy,
    options: &BatchOptions,
    progress: &dyn Progress,
    fs: &dyn FileSystem,
) -> BatchResult {
    let mut result = BatchResult {
        dry_run: options.dry_run,
        ..Default::default()
    };

    for file in files {
        progress.begin(&file.asset_id);

        match process_file(file, policy, options, fs) {
            Ok(Outcome::Updated(role)) => {
                tracing::debug!(asset = %file.asset_id, %role, dry_run = options.dry_run, "updated");
                result.updated.push(BatchItem::new(&file.asset_id, role));
            }
            Ok(Outcome::Unchanged(role)) => {
                tracing::debug!(asset = %file.asset_id, "already optimized");
                result.unchanged.push(BatchItem::new(&file.asset_id, role));
            }
            Ok(Outcome::Excluded(role)) => {
                tracing::debug!(asset = %file.asset_id, %role, "excluded role, skipped");
                result.excluded.push(BatchItem::new(&file.asset_id, role));
            }
            Ok(Outcome::Unsupported(texture_type)) => {
                tracing::info!(asset = %file.asset_id, texture_type, "unknown texture type, skipped");
                result.unsupported.push(UnsupportedItem {
                    asset_id: file.asset_id.clone(),
                    texture_type,
                });
            }
            Err(TexoptError::MissingImporter(_)) => {
                tracing::info!(
                    asset = %file.asset_id,
                    path = %file.asset_path.display(),
                    "no importer settings, skipped"
                );
                result.missing.push(file.asset_id.clone());
            }
            Err(e) => {
                if e.is_per_asset() {
                    tracing::warn!(asset = %file.asset_id, error = %e, "failed to optimize");
                } else {
                    tracing::error!(asset = %file.asset_id, error = %e, code = %e.code(), "unexpected error");
                }
                result
                    .failed
                    .push(BatchFailure::new(&file.asset_id, e.to_string()));
            }
        }

        progress.advance();
    }

    progress.finish();
    tracing::info!(
        total = result.total_count(),
        updated = result.update_count(),
        skipped = result.skip_count(),
        failed = result.failure_count(),
        "batch finished"
    );
    result
}

/// 1 アセットを読み込み・評価・書き込み
fn process_file(
    file: &TextureFile,
    policy: OptimizationPolicy,
    options: &BatchOptions,
    fs: &dyn FileSystem,
) -> Result<Outcome> {
    if !fs.is_file(&file.meta_path) {
        return Err(TexoptError::MissingImporter(file.asset_id.clone()));
    }

    let text = fs.read_to_string(&file.meta_path)?;
    let mut meta = TextureImporterMeta::parse(file.meta_path.to_string_lossy(), &text)?;

    let Some(role) = meta.role()? else {
        return Ok(Outcome::Unsupported(meta.texture_type()?));
    };

    let asset = TextureAsset::new(&file.asset_id, role).with_overrides(meta.platform_overrides()?);

    let Some(desired) = evaluate(&asset, policy).into_settings() else {
        return Ok(Outcome::Excluded(role));
    };

    if meta.is_applied(&desired)? {
        return Ok(Outcome::Unchanged(role));
    }

    if !options.dry_run {
        meta.apply(&desired)?;
        fs.replace(&file.meta_path, &meta.to_yaml()?)?;
    }

    Ok(Outcome::Updated(role))
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
