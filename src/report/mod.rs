//! Two-subject comparison report
//!
//! A [`DiffReport`] is fully materialized (both prefixes resolved, both
//! owning experiments loaded, both diffs computed) before a single byte is
//! written, so a failure on either side never leaves a half-written table.
//!
//! ## Table layout
//!
//! ```text
//! Checkpoint:               3cc6f33                   d8d9f6e
//! Experiment:               1eeeeee                   2eeeeee
//!
//! Params
//! lr:                       0.1                       0.2
//!
//! Metrics
//! (no difference)
//! ```

mod table;

pub use table::TableWriter;

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::diff::{diff_maps, string_map, DiffEntry};
use crate::experiment::{short_id, Checkpoint, Experiment};
use crate::project::Project;
use crate::resolve::{CheckpointResolver, Pick};
use crate::{Error, Result};

/// Placeholder for a key missing on one side.
pub const NOT_SET: &str = "(not set)";

/// Placeholder row for a section without differences.
pub const NO_DIFFERENCE: &str = "(no difference)";

/// Minimum column width: three columns in a 78 character terminal.
pub const DEFAULT_MIN_WIDTH: usize = 78 / 3;

/// Spaces added after the widest cell of a column.
pub const DEFAULT_PADDING: usize = 2;

/// Output encoding of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned plain-text table.
    #[default]
    Table,
    /// Pretty-printed JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidInput(format!(
                "unknown output format {other:?} (expected \"table\" or \"json\")"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
        })
    }
}

/// Rendering options for [`compare_two`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    format: OutputFormat,
    min_width: usize,
    padding: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ReportOptions {
    /// Create a builder with default settings.
    #[must_use]
    pub const fn builder() -> ReportOptionsBuilder {
        ReportOptionsBuilder {
            format: OutputFormat::Table,
            min_width: DEFAULT_MIN_WIDTH,
            padding: DEFAULT_PADDING,
        }
    }

    /// Get the output format.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Get the minimum column width.
    #[must_use]
    pub const fn min_width(&self) -> usize {
        self.min_width
    }

    /// Get the column padding.
    #[must_use]
    pub const fn padding(&self) -> usize {
        self.padding
    }
}

/// Builder for `ReportOptions`.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptionsBuilder {
    format: OutputFormat,
    min_width: usize,
    padding: usize,
}

impl ReportOptionsBuilder {
    /// Set the output format.
    #[must_use]
    pub const fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the minimum column width.
    #[must_use]
    pub const fn min_width(mut self, min_width: usize) -> Self {
        self.min_width = min_width;
        self
    }

    /// Set the padding after the widest cell.
    #[must_use]
    pub const fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Build the `ReportOptions`.
    #[must_use]
    pub const fn build(self) -> ReportOptions {
        ReportOptions {
            format: self.format,
            min_width: self.min_width,
            padding: self.padding,
        }
    }
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    /// Prefix as typed by the user.
    pub prefix: String,
    /// Full ID of the resolved checkpoint.
    pub checkpoint: String,
    /// Full ID of the owning experiment.
    pub experiment: String,
    /// How the checkpoint was chosen.
    pub pick: Pick,
}

/// Fully computed comparison of two checkpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    /// Left subject.
    pub left: Subject,
    /// Right subject.
    pub right: Subject,
    /// Differences between the owning experiments' params.
    pub params: BTreeMap<String, DiffEntry>,
    /// Differences between the checkpoints' metrics.
    pub metrics: BTreeMap<String, DiffEntry>,
}

impl DiffReport {
    /// Resolve both prefixes and compute both diffs.
    ///
    /// # Errors
    ///
    /// Any resolution error from either prefix, surfaced unchanged, and
    /// [`Error::DanglingReference`] if a checkpoint's experiment is missing.
    pub fn build(
        project: &dyn Project,
        resolver: &CheckpointResolver,
        left_prefix: &str,
        right_prefix: &str,
    ) -> Result<Self> {
        let left = resolver.resolve(project, left_prefix)?;
        let right = resolver.resolve(project, right_prefix)?;
        let left_exp = owning_experiment(project, &left.checkpoint)?;
        let right_exp = owning_experiment(project, &right.checkpoint)?;

        let params = diff_maps(
            &string_map(left_exp.params()),
            &string_map(right_exp.params()),
        );
        let metrics = diff_maps(
            &string_map(left.checkpoint.metrics()),
            &string_map(right.checkpoint.metrics()),
        );
        debug!(
            params = params.len(),
            metrics = metrics.len(),
            "computed checkpoint diff"
        );

        Ok(Self {
            left: Subject {
                prefix: left_prefix.to_string(),
                checkpoint: left.checkpoint.id().to_string(),
                experiment: left_exp.id().to_string(),
                pick: left.pick,
            },
            right: Subject {
                prefix: right_prefix.to_string(),
                checkpoint: right.checkpoint.id().to_string(),
                experiment: right_exp.id().to_string(),
                pick: right.pick,
            },
            params,
            metrics,
        })
    }

    /// Lay the report out as an aligned table.
    #[must_use]
    pub fn to_table(&self, options: &ReportOptions) -> TableWriter {
        let mut table = TableWriter::new(options.min_width(), options.padding());
        table.row([
            "Checkpoint:",
            short_id(&self.left.checkpoint),
            short_id(&self.right.checkpoint),
        ]);
        table.row([
            "Experiment:",
            short_id(&self.left.experiment),
            short_id(&self.right.experiment),
        ]);

        table.blank();
        section(&mut table, "Params", &self.params);
        table.blank();
        section(&mut table, "Metrics", &self.metrics);
        table.blank();
        table
    }

    /// Write the report to `out` in the requested format.
    ///
    /// # Errors
    ///
    /// Write failures and JSON serialization failures.
    pub fn write_to(&self, out: &mut dyn Write, options: &ReportOptions) -> Result<()> {
        match options.format() {
            OutputFormat::Table => self.to_table(options).write_to(out)?,
            OutputFormat::Json => {
                let mut json = serde_json::to_vec_pretty(self)?;
                json.push(b'\n');
                out.write_all(&json)?;
                out.flush()?;
            }
        }
        Ok(())
    }
}

fn owning_experiment(project: &dyn Project, checkpoint: &Checkpoint) -> Result<Experiment> {
    project
        .experiment(checkpoint.experiment_id())?
        .ok_or_else(|| Error::DanglingReference {
            checkpoint: checkpoint.id().to_string(),
            experiment: checkpoint.experiment_id().to_string(),
        })
}

fn section(table: &mut TableWriter, heading: &str, diff: &BTreeMap<String, DiffEntry>) {
    table.row([heading, "", ""]);
    if diff.is_empty() {
        table.row([NO_DIFFERENCE, "", ""]);
        return;
    }
    for (key, entry) in diff {
        table.row([
            format!("{key}:"),
            entry.left().unwrap_or(NOT_SET).to_string(),
            entry.right().unwrap_or(NOT_SET).to_string(),
        ]);
    }
}

/// Compare two checkpoints or experiments and write the report to `out`.
///
/// This is the single entry point for the command-line layer. Experiment
/// prefixes are resolved with the default best-then-latest chain.
///
/// # Errors
///
/// See [`DiffReport::build`] and [`DiffReport::write_to`]. Nothing is
/// written to `out` when resolution fails.
///
/// # Examples
///
/// ```rust
/// use trueno_diff::experiment::{Checkpoint, Experiment, ExperimentStore};
/// use trueno_diff::report::{compare_two, ReportOptions};
///
/// let mut store = ExperimentStore::new();
/// store.add_experiment(Experiment::builder("1eeeeeeeee").param("lr", 0.1).build());
/// store.add_experiment(Experiment::builder("2eeeeeeeee").param("lr", 0.2).build());
/// store.add_checkpoint(Checkpoint::builder("3ccccccccc", "1eeeeeeeee").metric("acc", 0.9).build());
/// store.add_checkpoint(Checkpoint::builder("4ccccccccc", "2eeeeeeeee").metric("acc", 0.9).build());
///
/// let mut out = Vec::new();
/// compare_two(&store, "3c", "4c", &mut out, &ReportOptions::default())?;
/// let text = String::from_utf8(out)?;
/// assert!(text.contains("(no difference)"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn compare_two(
    project: &dyn Project,
    left_prefix: &str,
    right_prefix: &str,
    out: &mut dyn Write,
    options: &ReportOptions,
) -> Result<()> {
    let report = DiffReport::build(
        project,
        &CheckpointResolver::default(),
        left_prefix,
        right_prefix,
    )?;
    report.write_to(out, options)
}
