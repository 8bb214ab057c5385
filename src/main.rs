//! cardcrop - background remover for card screenshots
//!
//! CLI entry point

use std::time::Instant;

use cardcrop::{
    exit_codes,
    // Batch
    batch::{self, BatchOptions},
    // CLI
    Cli, Commands, CropArgs,
    // Config
    Config,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Crop(args) => run_crop(&args),
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

// ============ Crop Command ============

fn run_crop(args: &CropArgs) -> anyhow::Result<()> {
    init_tracing(args.verbose);

    let start_time = Instant::now();

    if !args.input.exists() {
        eprintln!("Error: Input path does not exist: {}", args.input.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    // Load config file if specified, otherwise use standard locations
    let file_config = match &args.config {
        Some(config_path) => match Config::load_from_path(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Config::default()
            }
        },
        None => Config::load().unwrap_or_default(),
    };

    // Merge config file with CLI arguments (CLI takes precedence)
    let config = file_config.merge_with_cli(&args.to_overrides());

    let options = BatchOptions {
        tolerance: config.tolerance,
        force: config.force,
        threads: config.threads,
    };

    let summary = batch::run(&args.input, &args.output, &options)?;

    if !args.quiet {
        summary.print(&args.output);
        println!("Total time: {:.2}s", start_time.elapsed().as_secs_f64());
    }

    if summary.failed > 0 {
        anyhow::bail!("{} file(s) failed to process", summary.failed);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// ============ Info Command ============

fn run_info() -> anyhow::Result<()> {
    println!("cardcrop v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);
    println!("  CPUs: {}", num_cpus::get());

    println!();
    println!("Config File Locations:");
    println!("  Local: ./{}", cardcrop::config::LOCAL_CONFIG_FILE);
    if let Some(config_dir) = dirs::config_dir() {
        println!("  User:  {}", config_dir.join("cardcrop/config.toml").display());
    }

    println!();
    println!("Environment:");
    println!(
        "  {}: {}",
        cardcrop::FORCE_ENV_VAR,
        std::env::var(cardcrop::FORCE_ENV_VAR).unwrap_or_else(|_| "unset".to_string())
    );

    Ok(())
}
