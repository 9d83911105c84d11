//! Experiment - root entity for experiment tracking

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::short_id;
use crate::value::Value;

/// Optimization sense of a primary metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Higher is better (the default when unspecified).
    #[default]
    Maximize,
    /// Lower is better (e.g. loss).
    Minimize,
}

/// User-declared metric used to rank checkpoints for "best" selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryMetric {
    name: String,
    #[serde(default)]
    goal: Goal,
}

impl PrimaryMetric {
    /// Create a primary metric declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, goal: Goal) -> Self {
        Self {
            name: name.into(),
            goal,
        }
    }

    /// Get the metric name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the optimization goal.
    #[must_use]
    pub const fn goal(&self) -> Goal {
        self.goal
    }
}

/// Experiment represents a tracked training run.
///
/// This is the root entity in the schema. Each experiment groups many
/// checkpoints; the checkpoints themselves live in the
/// [`ExperimentStore`](super::ExperimentStore) and point back here by ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experiment {
    id: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    params: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    primary_metric: Option<PrimaryMetric>,
}

impl Experiment {
    /// Create a new experiment with the current timestamp and no params.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            params: BTreeMap::new(),
            primary_metric: None,
        }
    }

    /// Create a builder for constructing an experiment with optional fields.
    #[must_use]
    pub fn builder(id: impl Into<String>) -> ExperimentBuilder {
        ExperimentBuilder::new(id)
    }

    /// Get the experiment ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the abbreviated ID shown to users.
    #[must_use]
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the hyperparameters.
    #[must_use]
    pub const fn params(&self) -> &BTreeMap<String, Value> {
        &self.params
    }

    /// Get the primary metric declaration, if any.
    #[must_use]
    pub const fn primary_metric(&self) -> Option<&PrimaryMetric> {
        self.primary_metric.as_ref()
    }
}

/// Builder for `Experiment`.
#[derive(Debug)]
pub struct ExperimentBuilder {
    id: String,
    created_at: DateTime<Utc>,
    params: BTreeMap<String, Value>,
    primary_metric: Option<PrimaryMetric>,
}

impl ExperimentBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            params: BTreeMap::new(),
            primary_metric: None,
        }
    }

    /// Add a single hyperparameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Replace all hyperparameters.
    #[must_use]
    pub fn params(mut self, params: BTreeMap<String, Value>) -> Self {
        self.params = params;
        self
    }

    /// Declare the primary metric used for "best" selection.
    #[must_use]
    pub fn primary_metric(mut self, name: impl Into<String>, goal: Goal) -> Self {
        self.primary_metric = Some(PrimaryMetric::new(name, goal));
        self
    }

    /// Set a custom creation timestamp (useful for deserialization/testing).
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Build the `Experiment`.
    #[must_use]
    pub fn build(self) -> Experiment {
        Experiment {
            id: self.id,
            created_at: self.created_at,
            params: self.params,
            primary_metric: self.primary_metric,
        }
    }
}
