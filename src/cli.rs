//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::background::DEFAULT_TOLERANCE;

/// cardcrop - strip edge-connected light backgrounds from card screenshots
#[derive(Debug, Parser)]
#[command(name = "cardcrop", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Remove backgrounds and crop a directory of screenshots
    Crop(CropArgs),
    /// Show version and environment information
    Info,
}

#[derive(Debug, Args)]
pub struct CropArgs {
    /// Input image file or directory of screenshots
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for cropped PNGs
    #[arg(short, long)]
    pub output: PathBuf,

    /// Per-channel background tolerance (0-255)
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: u8,

    /// Reprocess inputs even when their output already exists
    #[arg(long)]
    pub force: bool,

    /// Worker thread count (default: one per logical CPU)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Config file path (default: ./cardcrop.toml, then user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the end-of-run summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl CropArgs {
    /// Override config file values only where the CLI explicitly set one.
    /// Clap defaults must not clobber file-provided settings, so the default
    /// tolerance maps to "not set".
    pub fn to_overrides(&self) -> crate::config::CliOverrides {
        let mut overrides = crate::config::CliOverrides::new();

        if self.tolerance != DEFAULT_TOLERANCE {
            overrides.tolerance = Some(self.tolerance);
        }
        if self.force {
            overrides.force = Some(true);
        }
        overrides.threads = self.threads;

        overrides
    }
}
