//! texopt optimize コマンド
//!
//! プロジェクト内のテクスチャにポリシーを一括適用する。

use crate::batch::{run_batch, texture_progress_bar, BatchOptions, BatchResult, RealFs};
use crate::commands::PolicyArgs;
use crate::config::RunConfig;
use crate::error::{Result, TexoptError};
use crate::output::CommandSummary;
use crate::policy::OptimizationPolicy;
use crate::scan::scan_textures;
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

const POLICY_HELP: &str = "\
POLICY:
  Sprite, normal map, lightmap, cookie, single channel and GUI textures are never modified.
  Eligible textures get: read/write disabled, the max size and quality below,
  HQ compression, crunch (default textures only) and overrides for
  Standalone (DXT5), Android and iPhone (Automatic).

CONFIGURATION:
  Values are read from CLI flags, then TEXOPT_MAX_RESOLUTION,
  TEXOPT_COMPRESSION_QUALITY, TEXOPT_CRUNCH, then texopt.toml in the project root.";

#[derive(Debug, Parser)]
#[command(after_help = POLICY_HELP)]
pub struct Args {
    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Only process assets whose path matches this glob (e.g. "Assets/UI/**")
    #[arg(long, value_name = "GLOB")]
    pub filter: Option<String>,

    /// Preview only, do not write any .meta files
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(args: Args) -> Result<()> {
    let project_root = args.policy.project_root()?;
    let config = RunConfig::load(&project_root, args.policy.to_overrides(), &RealFs)?;

    println!("Policy: {}\n", describe_policy(&config.policy).cyan());

    let mut scan_options = config.scan_options();
    if let Some(pattern) = &args.filter {
        scan_options = scan_options.with_filter(pattern)?;
    }

    let files = scan_textures(&project_root, &scan_options)?;
    tracing::info!(count = files.len(), root = %project_root.display(), "textures found");

    if files.is_empty() {
        println!("No textures found.");
        return Ok(());
    }

    // 書き込みを伴う場合のみ確認
    if !args.yes && !args.dry_run {
        let prompt = format!(
            "Optimize import settings of {} texture(s)? [y/N]: ",
            files.len()
        );
        if !confirm_with(&prompt, io::stdin().lock(), io::stdout())? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let progress = texture_progress_bar(files.len());
    let options = BatchOptions::new().with_dry_run(args.dry_run);
    let result = run_batch(&files, config.policy, &options, &progress);

    print_result(&result);

    if !result.is_success() {
        return Err(TexoptError::BatchFailed(result.failure_count()));
    }
    Ok(())
}

/// ポリシーを 1 行で表す
fn describe_policy(policy: &OptimizationPolicy) -> String {
    format!(
        "max {}px, quality {}, crunch {}",
        policy.max_resolution.pixels(),
        policy.compression_quality,
        if policy.enable_crunch { "on" } else { "off" }
    )
}

/// 確認プロンプトを出して y/yes なら true
fn confirm_with(prompt: &str, mut input: impl BufRead, mut output: impl Write) -> Result<bool> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// 変更・スキップ・失敗の一覧テーブル（変更なしと除外は件数のみ）
fn build_table(result: &BatchResult) -> Option<Table> {
    if result.updated.is_empty()
        && result.unsupported.is_empty()
        && result.missing.is_empty()
        && result.failed.is_empty()
    {
        return None;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Asset", "Role", "Action"]);

    let update_label = if result.dry_run { "Would update" } else { "Update" };
    for item in &result.updated {
        table.add_row(vec![
            Cell::new(&item.asset_id),
            Cell::new(item.role.display_name()),
            Cell::new(update_label).fg(Color::Green),
        ]);
    }

    for item in &result.unsupported {
        table.add_row(vec![
            Cell::new(&item.asset_id),
            Cell::new(format!("textureType {}", item.texture_type)),
            Cell::new("Skip (unsupported)").fg(Color::DarkGrey),
        ]);
    }

    for asset_id in &result.missing {
        table.add_row(vec![
            Cell::new(asset_id),
            Cell::new("-"),
            Cell::new("Skip (no importer settings)").fg(Color::DarkGrey),
        ]);
    }

    for failure in &result.failed {
        table.add_row(vec![
            Cell::new(&failure.asset_id),
            Cell::new("-"),
            Cell::new("Failed").fg(Color::Red),
        ]);
    }

    Some(table)
}

fn print_result(result: &BatchResult) {
    if let Some(table) = build_table(result) {
        println!("{table}");
    }

    let prefix = if result.dry_run { "Would optimize" } else { "Optimized" };
    println!(
        "\n{}: {} updated, {} unchanged, {} excluded, {} unsupported, {} without settings",
        prefix.bold(),
        result.update_count().to_string().green(),
        result.unchanged_count().to_string().dimmed(),
        result.excluded.len().to_string().dimmed(),
        result.unsupported.len().to_string().yellow(),
        result.missing.len().to_string().yellow(),
    );

    if !result.failed.is_empty() {
        println!("\n{}", "Failed items:".red().bold());
        for failure in &result.failed {
            println!("  {} {}: {}", "✗".red(), failure.asset_id, failure.error);
        }
    }

    println!(
        "\n{}",
        CommandSummary::format(
            result.update_count(),
            result.failure_count(),
            result.dry_run
        )
    );
}

#[cfg(test)]
#[path = "optimize_test.rs"]
mod tests;
