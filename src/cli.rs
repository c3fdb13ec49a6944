use clap::{Parser, Subcommand};

use crate::commands::{inspect, optimize};

#[derive(Debug, Parser)]
#[command(name = "texopt")]
#[command(about = "Texture Import Optimizer CLI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Show detailed logs and error causes
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply the optimization policy to every texture in the project
    #[command(
        long_about = "Scan the project's Assets folder and rewrite the import settings of every texture whose role is eligible for optimization."
    )]
    Optimize(optimize::Args),

    /// Show how the policy would treat a single texture
    #[command(
        long_about = "Read one texture's import settings and show its role, current settings and the settings the policy would write."
    )]
    Inspect(inspect::Args),
}
