//! # trueno-diff: Checkpoint Comparison for Experiment Tracking
//!
//! **Version**: 0.1.0
//!
//! trueno-diff compares two training checkpoints side by side. Either side
//! may be named by a short ID prefix of a checkpoint or of an experiment;
//! an experiment resolves to its best checkpoint by primary metric, or to
//! its latest checkpoint when no metric ranks them.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Poka-Yoke**: ambiguous prefixes and dangling references fail loudly
//! - **Jidoka**: the whole report is computed before anything is written
//! - **Heijunka**: fixed column widths keep output stable across terminals
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use trueno_diff::experiment::ExperimentStore;
//! use trueno_diff::report::{compare_two, ReportOptions};
//!
//! let store = ExperimentStore::load_dir(".replicate/storage")?;
//! compare_two(&store, "3cc6f33", "1eeeeee", &mut std::io::stdout(), &ReportOptions::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod diff;
pub mod error;
pub mod experiment;
pub mod project;
pub mod report;
pub mod resolve;
pub mod value;

pub use error::{Error, Result};
pub use value::Value;
