//! Checkpoint - immutable snapshot taken during an experiment

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::short_id;
use crate::value::Value;

/// Checkpoint represents a snapshot of metrics recorded at one training step.
///
/// A checkpoint refers to its experiment by ID only. When stored inside an
/// experiment document on disk the `experiment_id` may be omitted; the
/// loader fills it in from the enclosing experiment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Checkpoint {
    id: String,
    #[serde(default)]
    experiment_id: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    step: u64,
    #[serde(default)]
    metrics: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl Checkpoint {
    /// Create a new checkpoint at step 0 with the current timestamp.
    #[must_use]
    pub fn new(id: impl Into<String>, experiment_id: impl Into<String>) -> Self {
        Self::builder(id, experiment_id).build()
    }

    /// Create a builder for constructing a checkpoint with optional fields.
    #[must_use]
    pub fn builder(id: impl Into<String>, experiment_id: impl Into<String>) -> CheckpointBuilder {
        CheckpointBuilder::new(id, experiment_id)
    }

    /// Get the checkpoint ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the abbreviated ID shown to users.
    #[must_use]
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    /// Get the owning experiment ID.
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the abbreviated owning experiment ID.
    #[must_use]
    pub fn short_experiment_id(&self) -> &str {
        short_id(&self.experiment_id)
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the training step or epoch.
    #[must_use]
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Get the recorded metrics.
    #[must_use]
    pub const fn metrics(&self) -> &BTreeMap<String, Value> {
        &self.metrics
    }

    /// Get the artifact path saved with this checkpoint, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub(crate) fn adopt(&mut self, experiment_id: &str) {
        if self.experiment_id.is_empty() {
            self.experiment_id = experiment_id.to_string();
        }
    }
}

/// Builder for `Checkpoint`.
#[derive(Debug)]
pub struct CheckpointBuilder {
    id: String,
    experiment_id: String,
    created_at: DateTime<Utc>,
    step: u64,
    metrics: BTreeMap<String, Value>,
    path: Option<String>,
}

impl CheckpointBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(id: impl Into<String>, experiment_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            experiment_id: experiment_id.into(),
            created_at: Utc::now(),
            step: 0,
            metrics: BTreeMap::new(),
            path: None,
        }
    }

    /// Record a metric value.
    #[must_use]
    pub fn metric(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metrics.insert(name.into(), value.into());
        self
    }

    /// Set the training step.
    #[must_use]
    pub const fn step(mut self, step: u64) -> Self {
        self.step = step;
        self
    }

    /// Set the artifact path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set a custom creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Build the `Checkpoint`.
    #[must_use]
    pub fn build(self) -> Checkpoint {
        Checkpoint {
            id: self.id,
            experiment_id: self.experiment_id,
            created_at: self.created_at,
            step: self.step,
            metrics: self.metrics,
            path: self.path,
        }
    }
}
