use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "codechat")]
#[command(about = "CodeChat semantic front end")]
pub struct Cli {
    /// Configuration file with resource limits
    #[arg(long, default_value = "codechat.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simplify and analyze a parse-tree file, reporting diagnostics
    Check(CheckArgs),
    /// Simplify a parse-tree file and print the simplified tree
    Simplify(SimplifyArgs),
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Parse-tree file path (JSON)
    pub file: String,
}

#[derive(clap::Args)]
pub struct SimplifyArgs {
    /// Parse-tree file path (JSON)
    pub file: String,

    /// Emit the simplified tree as JSON instead of the text rendering
    #[arg(long)]
    pub json: bool,
}
