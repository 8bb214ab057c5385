//! cardcrop - background removal and tight cropping for card screenshots
//!
//! Takes screenshots of product cards sitting on a light page, makes the
//! edge-connected background transparent, and crops to the opaque content.
//! Near-white regions enclosed by content (white text, icons) are preserved
//! by flood-filling from the image border instead of thresholding globally.

pub mod background;
pub mod batch;
pub mod cli;
pub mod config;

// Re-export public API
pub use background::{
    apply_and_crop, flood_mark, opaque_bounds, BackgroundClassifier, BackgroundError,
    BackgroundRemover, BoundingBox, RemovalOptions, RemovalOptionsBuilder, RemovalOutcome,
    VisitedMask, DEFAULT_TOLERANCE,
};
pub use batch::{BatchOptions, BatchSummary, FORCE_ENV_VAR};
pub use cli::{Cli, Commands, CropArgs};
pub use config::{CliOverrides, Config, ConfigError};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INPUT_NOT_FOUND: i32 = 2;
}
