//! Batch processing of screenshot directories
//!
//! Walks an input directory for image files, skips inputs whose output
//! already exists (unless forced), and runs background removal across a
//! rayon thread pool. Each worker owns its image and mask; output names are
//! derived from distinct input stems, so writes never collide.
//!
//! Per-file failures are logged and counted, never fatal to the batch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::background::{BackgroundRemover, RemovalOptions, RemovalOutcome};

/// Environment variable that forces reprocessing when set to `1`
pub const FORCE_ENV_VAR: &str = "CARDCROP_FORCE";

/// Input extensions recognized as images (lowercase)
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

// ============================================================
// Options & Summary
// ============================================================

/// Batch run options
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Per-channel background tolerance
    pub tolerance: u8,
    /// Reprocess inputs even when their output already exists
    pub force: bool,
    /// Worker thread count (None = one per logical CPU)
    pub threads: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            tolerance: crate::background::DEFAULT_TOLERANCE,
            force: false,
            threads: None,
        }
    }
}

/// Tallies for one batch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Outputs written
    pub processed: usize,
    /// Inputs skipped because their output already existed
    pub skipped_existing: usize,
    /// Inputs skipped because no corner was near-white
    pub no_background: usize,
    /// Inputs skipped because the whole image was background
    pub empty: usize,
    /// Decode or save failures
    pub failed: usize,
}

impl BatchSummary {
    /// Total number of inputs seen
    pub fn total(&self) -> usize {
        self.processed + self.skipped_existing + self.no_background + self.empty + self.failed
    }

    /// Print the end-of-run summary
    pub fn print(&self, output_dir: &Path) {
        if self.processed > 0 {
            println!(
                "Background removal complete. {} new file(s) saved to '{}'.",
                self.processed,
                output_dir.display()
            );
        }
        println!(
            "Skipped {} existing file(s). Use --force or {}=1 to reprocess all.",
            self.skipped_existing, FORCE_ENV_VAR
        );
        println!(
            "Skipped {} file(s) with no near-white border.",
            self.no_background
        );
        if self.empty > 0 {
            println!("Skipped {} file(s) that were entirely background.", self.empty);
        }
        if self.failed > 0 {
            println!("{} file(s) failed to process.", self.failed);
        }
        if self.total() == 0 {
            println!("No image files processed.");
        }
    }
}

/// Per-file result, reduced into a [`BatchSummary`]
enum FileOutcome {
    Saved,
    NoBackground,
    Empty,
    Failed,
}

// ============================================================
// File discovery
// ============================================================

/// Collect image files from the input path (file or directory).
///
/// Directory contents are filtered by extension (case-insensitive) and
/// sorted for deterministic ordering.
pub fn collect_image_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if input.is_file() {
        if has_image_extension(input) {
            files.push(input.to_path_buf());
        }
    } else if input.is_dir() {
        for entry in std::fs::read_dir(input)
            .with_context(|| format!("failed to read input directory {}", input.display()))?
        {
            let path = entry?.path();
            if path.is_file() && has_image_extension(&path) {
                files.push(path);
            }
        }
        files.sort();
    }

    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Lowercase stems of `.png` files already present in the output directory.
///
/// This is the already-processed cache: scoped to one batch run, passed by
/// value, never global.
pub fn existing_output_stems(output_dir: &Path) -> HashSet<String> {
    let Ok(entries) = std::fs::read_dir(output_dir) else {
        return HashSet::new();
    };

    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
        })
        .filter_map(|path| output_stem(&path))
        .collect()
}

/// Lowercase filename stem, the cache key and output basename
fn output_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.to_lowercase())
}

/// True when the force environment variable is set to `1`
pub fn force_requested() -> bool {
    std::env::var(FORCE_ENV_VAR).map(|v| v == "1").unwrap_or(false)
}

// ============================================================
// Batch run
// ============================================================

/// Process every image under `input`, writing cropped PNGs to `output_dir`.
pub fn run(input: &Path, output_dir: &Path, options: &BatchOptions) -> Result<BatchSummary> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let files = collect_image_files(input)?;
    let existing = existing_output_stems(output_dir);
    let force = options.force || force_requested();

    let mut summary = BatchSummary::default();
    let mut pending = Vec::with_capacity(files.len());

    for path in files {
        match output_stem(&path) {
            Some(stem) if !force && existing.contains(&stem) => {
                debug!(file = %path.display(), "output exists, skipping");
                summary.skipped_existing += 1;
            }
            Some(stem) => pending.push((path, stem)),
            // Non-UTF-8 stem: cannot derive an output name
            None => {
                warn!(file = %path.display(), "unusable file name, skipping");
                summary.failed += 1;
            }
        }
    }

    info!(
        pending = pending.len(),
        skipped_existing = summary.skipped_existing,
        force,
        "starting batch"
    );

    let removal_options = RemovalOptions::builder().tolerance(options.tolerance).build();
    let progress = ProgressBar::new(pending.len() as u64).with_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads.unwrap_or_else(num_cpus::get))
        .build()
        .context("failed to build worker pool")?;

    let outcomes: Vec<FileOutcome> = pool.install(|| {
        pending
            .par_iter()
            .map(|(path, stem)| {
                let outcome = process_one(path, stem, output_dir, &removal_options);
                progress.inc(1);
                outcome
            })
            .collect()
    });
    progress.finish_and_clear();

    for outcome in outcomes {
        match outcome {
            FileOutcome::Saved => summary.processed += 1,
            FileOutcome::NoBackground => summary.no_background += 1,
            FileOutcome::Empty => summary.empty += 1,
            FileOutcome::Failed => summary.failed += 1,
        }
    }

    Ok(summary)
}

fn process_one(
    path: &Path,
    stem: &str,
    output_dir: &Path,
    options: &RemovalOptions,
) -> FileOutcome {
    match BackgroundRemover::process_file(path, options) {
        Ok(RemovalOutcome::Cropped(image)) => {
            let out_path = output_dir.join(format!("{stem}.png"));
            match image.save(&out_path) {
                Ok(()) => {
                    debug!(file = %path.display(), output = %out_path.display(), "saved");
                    FileOutcome::Saved
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "failed to save output");
                    FileOutcome::Failed
                }
            }
        }
        Ok(RemovalOutcome::NoEligibleBackground) => {
            debug!(file = %path.display(), "no near-white border");
            FileOutcome::NoBackground
        }
        Ok(RemovalOutcome::EmptyAfterRemoval) => {
            debug!(file = %path.display(), "entirely background");
            FileOutcome::Empty
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "failed to process");
            FileOutcome::Failed
        }
    }
}
