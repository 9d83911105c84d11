//! Experiment Tracking Schema
//!
//! Data structures for experiments and the checkpoints recorded while
//! they train.
//!
//! ## Schema Overview
//!
//! ```text
//! Experiment (1) ──< Checkpoint (N)
//!   params                metrics
//!   primary_metric        created_at, step
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use trueno_diff::experiment::{Checkpoint, Experiment, ExperimentStore, Goal};
//!
//! let experiment = Experiment::builder("1eeeeeeeeeee")
//!     .param("lr", 0.01)
//!     .primary_metric("accuracy", Goal::Maximize)
//!     .build();
//!
//! let checkpoint = Checkpoint::builder("c0ffee000000", experiment.id())
//!     .step(1)
//!     .metric("accuracy", 0.87)
//!     .build();
//!
//! let mut store = ExperimentStore::new();
//! store.add_experiment(experiment);
//! store.add_checkpoint(checkpoint);
//! assert_eq!(store.get_checkpoints_for_experiment("1eeeeeeeeeee").len(), 1);
//! ```

mod checkpoint_record;
mod experiment_record;
mod ranking;
mod store;

pub use checkpoint_record::{Checkpoint, CheckpointBuilder};
pub use experiment_record::{Experiment, ExperimentBuilder, Goal, PrimaryMetric};
pub use ranking::{best_checkpoint, latest_checkpoint};
pub use store::{ExperimentDocument, ExperimentStore, EXPERIMENTS_DIR};

/// Number of characters shown for abbreviated IDs.
pub const SHORT_ID_LEN: usize = 7;

/// Abbreviate an ID to its first [`SHORT_ID_LEN`] characters.
#[must_use]
pub fn short_id(id: &str) -> &str {
    id.char_indices()
        .nth(SHORT_ID_LEN)
        .map_or(id, |(end, _)| &id[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("abcdef0123456789"), "abcdef0");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id(""), "");
    }
}
