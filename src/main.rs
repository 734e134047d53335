mod cli;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use codechat::limits::{FrontendLimits, LimitError};
use codechat::{reader, run_front_end, simplify};

use cli::{Cli, Commands};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let limits = match load_limits(&cli.config) {
        Ok(limits) => limits,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Check(args) => run_check(&args.file, &limits),
        Commands::Simplify(args) => run_simplify(&args.file, args.json, &limits),
    }
}

fn load_limits(path: &str) -> Result<FrontendLimits, LimitError> {
    let limits = FrontendLimits::from_config_toml(path)?;
    limits.validate()?;
    Ok(limits)
}

fn run_check(file_path: &str, limits: &FrontendLimits) -> ExitCode {
    let root = match reader::read_file(Path::new(file_path), limits) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_front_end(&root) {
        Ok(_) => {
            println!("No issues found.");
            ExitCode::SUCCESS
        }
        Err(errors) => {
            for error in &errors {
                println!("{}", error);
            }
            ExitCode::FAILURE
        }
    }
}

fn run_simplify(file_path: &str, as_json: bool, limits: &FrontendLimits) -> ExitCode {
    let root = match reader::read_file(Path::new(file_path), limits) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let simplified = simplify(&root);
    if as_json {
        match serde_json::to_string_pretty(&simplified) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: failed to serialize tree: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", simplified);
    }
    ExitCode::SUCCESS
}
