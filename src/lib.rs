//! s3dryview - make S3 sync dry runs readable
//!
//! This library classifies the lines of an `aws s3 sync --dryrun` listing,
//! pairs deletes with uploads of the same file into moves, and renders a
//! report that keeps cache churn apart from real changes.

pub mod cli;
pub mod config;
pub mod moves;
pub mod output;
pub mod record;
pub mod s3_path;

pub use config::{Config, ConfigError};
pub use moves::{Move, MoveExtraction, extract_moves};
pub use output::{ColorHighlighter, ColorMode, Highlighter, PlainHighlighter, Report, Tone};
pub use record::{Classifier, Delete, Plan, Record, Upload, classify};

pub use cli::{Cli, RunError, Settings, run, run_cli};
