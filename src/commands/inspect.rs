//! texopt inspect コマンド
//!
//! 1 つのテクスチャについて、ロール・現在の設定・ポリシー評価結果を表示する。

use crate::batch::{FileSystem, RealFs};
use crate::commands::PolicyArgs;
use crate::config::RunConfig;
use crate::error::{Result, TexoptError};
use crate::importer::{asset_path_for, meta_path_for, TextureImporterMeta};
use crate::policy::{
    evaluate, DesiredSettings, Evaluation, OptimizationPolicy, PlatformOverride, TextureAsset,
    TextureRole,
};
use crate::scan::relative_id;
use clap::{Parser, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
pub struct Args {
    /// Texture asset path relative to the project (the .meta path is also accepted)
    pub asset: PathBuf,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// 評価結果の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectAction {
    /// 書き込みが必要
    Apply,
    /// 既にポリシーどおり
    Unchanged,
    /// 除外ロール
    Skip,
    /// ロール不明
    Unsupported,
}

impl InspectAction {
    fn display_name(&self) -> &'static str {
        match self {
            InspectAction::Apply => "Apply",
            InspectAction::Unchanged => "Unchanged (already optimized)",
            InspectAction::Skip => "Skip",
            InspectAction::Unsupported => "Skip (unsupported texture type)",
        }
    }
}

/// 出力用の検査結果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport {
    pub asset: String,
    pub meta_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    pub texture_type: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<TextureRole>,
    pub action: InspectAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub policy: OptimizationPolicy,
    pub current: DesiredSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired: Option<DesiredSettings>,
    /// ポリシーが触らないビルドターゲット
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub untouched_platforms: Vec<String>,
}

pub fn run(args: Args) -> Result<()> {
    let project_root = args.policy.project_root()?;
    let config = RunConfig::load(&project_root, args.policy.to_overrides(), &RealFs)?;
    let report = build_report(&project_root, &args.asset, config.policy, &RealFs)?;

    match args.format {
        OutputFormat::Table => print_table(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
    }

    Ok(())
}

/// 引数のパスをアセットの絶対パスへ解決
fn resolve_asset(project_root: &Path, arg: &Path) -> PathBuf {
    let asset = asset_path_for(arg);
    if asset.is_absolute() {
        asset
    } else {
        project_root.join(asset)
    }
}

/// .meta を読み込んでポリシーを評価
///
/// 書き込みは行わない。
pub fn build_report(
    project_root: &Path,
    asset_arg: &Path,
    policy: OptimizationPolicy,
    fs: &dyn FileSystem,
) -> Result<InspectReport> {
    let asset_path = resolve_asset(project_root, asset_arg);
    let asset_id = relative_id(project_root, &asset_path);
    let meta_path = meta_path_for(&asset_path);

    if !fs.is_file(&meta_path) {
        if !fs.exists(&asset_path) {
            return Err(TexoptError::AssetNotFound(asset_id));
        }
        return Err(TexoptError::MissingImporter(asset_id));
    }

    tracing::debug!(asset = %asset_id, meta = %meta_path.display(), "inspecting");
    let text = fs.read_to_string(&meta_path)?;
    let meta = TextureImporterMeta::parse(meta_path.to_string_lossy(), &text)?;

    let texture_type = meta.texture_type()?;
    let role = meta.role()?;
    let current = meta.current_settings()?;

    let mut untouched_platforms = Vec::new();
    let (action, reason, desired) = match role {
        None => (
            InspectAction::Unsupported,
            Some(format!("textureType {} is not a known texture role", texture_type)),
            None,
        ),
        Some(role) => {
            let asset =
                TextureAsset::new(&asset_id, role).with_overrides(meta.platform_overrides()?);
            untouched_platforms = asset
                .unmanaged_targets()
                .into_iter()
                .map(str::to_string)
                .collect();
            match evaluate(&asset, policy) {
                Evaluation::Skip(reason) => (InspectAction::Skip, Some(reason.to_string()), None),
                Evaluation::Apply(desired) => {
                    let action = if meta.is_applied(&desired)? {
                        InspectAction::Unchanged
                    } else {
                        InspectAction::Apply
                    };
                    (action, None, Some(desired))
                }
            }
        }
    };

    Ok(InspectReport {
        asset: asset_id,
        meta_path: meta_path.to_string_lossy().to_string(),
        guid: meta.guid().map(str::to_string),
        texture_type,
        role,
        action,
        reason,
        policy,
        current,
        desired,
        untouched_platforms,
    })
}

fn print_table(report: &InspectReport) {
    println!("Texture");
    println!("=======");
    println!();
    println!("{}", summary_table(report));
    println!();

    println!("Import Settings");
    println!("---------------");
    println!("{}", settings_table(report));
}

fn summary_table(report: &InspectReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Value"]);

    let role = match report.role {
        Some(role) => role.display_name().to_string(),
        None => format!("Unknown (textureType {})", report.texture_type),
    };

    table.add_row(vec!["Asset", report.asset.as_str()]);
    table.add_row(vec!["GUID", report.guid.as_deref().unwrap_or("-")]);
    table.add_row(vec!["Role", role.as_str()]);
    table.add_row(vec!["Action", report.action.display_name()]);
    if let Some(reason) = &report.reason {
        table.add_row(vec!["Reason", reason.as_str()]);
    }
    if !report.untouched_platforms.is_empty() {
        let kept = report.untouched_platforms.join(", ");
        table.add_row(vec!["Kept as is", kept.as_str()]);
    }
    table
}

/// 現在値と書き込み予定値の比較
fn settings_table(report: &InspectReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Setting", "Current", "Desired"]);

    let current = &report.current;
    let desired = report.desired.as_ref();

    table.add_row(vec![
        "Read/Write".to_string(),
        on_off(current.is_readable),
        want(desired, |d| on_off(d.is_readable)),
    ]);
    table.add_row(vec![
        "Max Size".to_string(),
        current.max_texture_size.to_string(),
        want(desired, |d| d.max_texture_size.to_string()),
    ]);
    table.add_row(vec![
        "Compression".to_string(),
        current.compression.display_name().to_string(),
        want(desired, |d| d.compression.display_name().to_string()),
    ]);
    table.add_row(vec![
        "Quality".to_string(),
        current.compression_quality.to_string(),
        want(desired, |d| d.compression_quality.to_string()),
    ]);
    table.add_row(vec![
        "Crunch".to_string(),
        on_off(current.crunched_compression),
        want(desired, |d| on_off(d.crunched_compression)),
    ]);

    // 現在値か書き込み予定値のどちらかにあるビルドターゲット
    let mut targets: Vec<&str> = current
        .platform_overrides
        .iter()
        .chain(desired.into_iter().flat_map(|d| d.platform_overrides.iter()))
        .map(|o| o.build_target.as_str())
        .collect();
    targets.sort();
    targets.dedup();

    for target in targets {
        table.add_row(vec![
            target.to_string(),
            format_override(current.platform_override(target)),
            want(desired, |d| format_override(d.platform_override(target))),
        ]);
    }

    table
}

/// 書き込み予定値が無ければ "-"
fn want(desired: Option<&DesiredSettings>, f: impl Fn(&DesiredSettings) -> String) -> String {
    desired.map(f).unwrap_or_else(|| "-".to_string())
}

fn on_off(value: bool) -> String {
    let label = if value { "on" } else { "off" };
    label.to_string()
}

fn format_override(o: Option<&PlatformOverride>) -> String {
    match o {
        Some(o) if o.overridden => format!(
            "{} / {} / {}",
            o.max_texture_size,
            o.format.display_name(),
            o.compression.display_name()
        ),
        Some(_) => "not overridden".to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
#[path = "inspect_test.rs"]
mod tests;
