//! Experiment Store - in-memory project snapshot
//!
//! This module provides the read-only view the comparison engine works
//! against, either assembled in memory or materialized from a local
//! storage directory.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Checkpoint, Experiment};
use crate::{Error, Result};

/// Relative location of experiment documents inside a storage root.
pub const EXPERIMENTS_DIR: &str = "metadata/experiments";

/// On-disk form of one experiment: the record plus its checkpoints.
///
/// ```json
/// {
///   "id": "1eeeeeeeee",
///   "created_at": "2020-01-01T00:00:00Z",
///   "params": {"lr": 0.1},
///   "primary_metric": {"name": "accuracy", "goal": "maximize"},
///   "checkpoints": [
///     {"id": "c0ffee", "created_at": "2020-01-01T00:01:00Z", "step": 1,
///      "metrics": {"accuracy": 0.9}}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentDocument {
    /// Experiment record.
    #[serde(flatten)]
    pub experiment: Experiment,
    /// Checkpoints in creation order.
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
}

/// In-memory store for experiments and checkpoints.
///
/// ## Design
///
/// Both ID namespaces are kept in `BTreeMap`s so that prefix lookup is a
/// range query instead of a linear scan. Checkpoints reference their
/// experiment by ID; the store does not enforce that the referenced
/// experiment exists, so consumers must treat a missing owner as a
/// consistency fault.
#[derive(Debug, Default, Clone)]
pub struct ExperimentStore {
    experiments: BTreeMap<String, Experiment>,
    checkpoints: BTreeMap<String, Checkpoint>,
}

impl ExperimentStore {
    /// Create a new empty experiment store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot from a storage root.
    ///
    /// Reads every `*.json` file under `<root>/metadata/experiments` as an
    /// [`ExperimentDocument`]. A missing directory yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a file cannot be read and
    /// [`Error::StorageError`] if a document is malformed.
    pub fn load_dir(root: impl AsRef<Path>) -> Result<Self> {
        let dir = root.as_ref().join(EXPERIMENTS_DIR);
        let mut store = Self::new();
        if !dir.is_dir() {
            debug!(path = %dir.display(), "no experiments directory, using empty snapshot");
            return Ok(store);
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let content = std::fs::read_to_string(&path)?;
            let doc: ExperimentDocument = serde_json::from_str(&content)
                .map_err(|e| Error::StorageError(format!("{}: {e}", path.display())))?;
            debug!(
                path = %path.display(),
                experiment = doc.experiment.id(),
                checkpoints = doc.checkpoints.len(),
                "loaded experiment"
            );
            store.add_document(doc);
        }
        Ok(store)
    }

    /// Add an experiment document, adopting its checkpoints.
    pub fn add_document(&mut self, doc: ExperimentDocument) {
        let ExperimentDocument {
            experiment,
            checkpoints,
        } = doc;
        for mut checkpoint in checkpoints {
            checkpoint.adopt(experiment.id());
            self.add_checkpoint(checkpoint);
        }
        self.add_experiment(experiment);
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty() && self.checkpoints.is_empty()
    }

    /// Get the number of experiments in the store.
    #[must_use]
    pub fn experiment_count(&self) -> usize {
        self.experiments.len()
    }

    /// Get the number of checkpoints in the store.
    #[must_use]
    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    /// Add an experiment to the store.
    pub fn add_experiment(&mut self, experiment: Experiment) {
        self.experiments
            .insert(experiment.id().to_string(), experiment);
    }

    /// Get an experiment by ID.
    #[must_use]
    pub fn get_experiment(&self, experiment_id: &str) -> Option<&Experiment> {
        self.experiments.get(experiment_id)
    }

    /// Add a checkpoint to the store.
    pub fn add_checkpoint(&mut self, checkpoint: Checkpoint) {
        self.checkpoints
            .insert(checkpoint.id().to_string(), checkpoint);
    }

    /// Get a checkpoint by ID.
    #[must_use]
    pub fn get_checkpoint(&self, checkpoint_id: &str) -> Option<&Checkpoint> {
        self.checkpoints.get(checkpoint_id)
    }

    /// Get all checkpoints of an experiment, ordered by creation time.
    #[must_use]
    pub fn get_checkpoints_for_experiment(&self, experiment_id: &str) -> Vec<&Checkpoint> {
        let mut checkpoints: Vec<&Checkpoint> = self
            .checkpoints
            .values()
            .filter(|c| c.experiment_id() == experiment_id)
            .collect();
        checkpoints.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.step().cmp(&b.step()))
        });
        checkpoints
    }

    /// Experiments whose ID starts with `prefix`.
    pub fn experiments_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a Experiment> + 'a {
        with_prefix(&self.experiments, prefix)
    }

    /// Checkpoints whose ID starts with `prefix`.
    pub fn checkpoints_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a Checkpoint> + 'a {
        with_prefix(&self.checkpoints, prefix)
    }
}

fn with_prefix<'a, V>(
    map: &'a BTreeMap<String, V>,
    prefix: &'a str,
) -> impl Iterator<Item = &'a V> + 'a {
    map.range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(move |(id, _)| id.starts_with(prefix))
        .map(|(_, v)| v)
}
