//! Checkpoint resolution
//!
//! Turns a user-typed prefix into exactly one checkpoint. A prefix naming
//! a checkpoint resolves to it directly. A prefix naming an experiment is
//! handed to an ordered list of [`SelectionPolicy`] tiers; the first tier
//! that has an opinion wins:
//!
//! 1. [`BestCheckpointPolicy`]: extremal primary metric
//! 2. [`LatestCheckpointPolicy`]: most recent checkpoint
//!
//! The tier that picked is reported through `tracing::info!` and in the
//! returned [`Resolution`]; it never changes which checkpoint is returned.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::experiment::{Checkpoint, Experiment};
use crate::project::{Project, ResolvedObject};
use crate::{Error, Result};

/// How a resolved checkpoint was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pick {
    /// The prefix named the checkpoint itself.
    Exact,
    /// Best checkpoint of the named experiment.
    Best,
    /// Latest checkpoint of the named experiment.
    Latest,
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::Best => "best",
            Self::Latest => "latest",
        })
    }
}

/// A resolved checkpoint together with the way it was picked.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The chosen checkpoint.
    pub checkpoint: Checkpoint,
    /// Which rule chose it.
    pub pick: Pick,
}

/// One tier of experiment-to-checkpoint selection.
pub trait SelectionPolicy {
    /// Label reported when this tier picks.
    fn pick(&self) -> Pick;

    /// Choose a checkpoint, or `Ok(None)` to defer to the next tier.
    ///
    /// # Errors
    ///
    /// Propagates backend failures from `project`.
    fn select(&self, project: &dyn Project, experiment: &Experiment)
        -> Result<Option<Checkpoint>>;
}

/// Selects by the experiment's primary metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestCheckpointPolicy;

impl SelectionPolicy for BestCheckpointPolicy {
    fn pick(&self) -> Pick {
        Pick::Best
    }

    fn select(
        &self,
        project: &dyn Project,
        experiment: &Experiment,
    ) -> Result<Option<Checkpoint>> {
        project.best_checkpoint(experiment.id())
    }
}

/// Selects the most recently created checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestCheckpointPolicy;

impl SelectionPolicy for LatestCheckpointPolicy {
    fn pick(&self) -> Pick {
        Pick::Latest
    }

    fn select(
        &self,
        project: &dyn Project,
        experiment: &Experiment,
    ) -> Result<Option<Checkpoint>> {
        project.latest_checkpoint(experiment.id())
    }
}

/// Prefix-to-checkpoint resolver with a configurable policy chain.
pub struct CheckpointResolver {
    policies: Vec<Box<dyn SelectionPolicy>>,
}

impl fmt::Debug for CheckpointResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let picks: Vec<Pick> = self.policies.iter().map(|p| p.pick()).collect();
        f.debug_struct("CheckpointResolver")
            .field("policies", &picks)
            .finish()
    }
}

impl Default for CheckpointResolver {
    fn default() -> Self {
        Self::new()
            .with_policy(BestCheckpointPolicy)
            .with_policy(LatestCheckpointPolicy)
    }
}

impl CheckpointResolver {
    /// Create a resolver with no selection tiers.
    ///
    /// Such a resolver only accepts checkpoint prefixes; use
    /// [`CheckpointResolver::default`] for the best-then-latest chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    /// Append a selection tier after the existing ones.
    #[must_use]
    pub fn with_policy(mut self, policy: impl SelectionPolicy + 'static) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    /// Resolve `prefix` to exactly one checkpoint.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] and [`Error::AmbiguousPrefix`] from prefix
    /// lookup, [`Error::EmptyExperiment`] when no tier can pick from the
    /// named experiment, and any backend failure.
    pub fn resolve(&self, project: &dyn Project, prefix: &str) -> Result<Resolution> {
        let experiment = match project.find_by_prefix(prefix)? {
            ResolvedObject::Checkpoint(checkpoint) => {
                return Ok(Resolution {
                    checkpoint,
                    pick: Pick::Exact,
                })
            }
            ResolvedObject::Experiment(experiment) => experiment,
        };

        for policy in &self.policies {
            if let Some(checkpoint) = policy.select(project, &experiment)? {
                let pick = policy.pick();
                info!(
                    prefix,
                    experiment = experiment.short_id(),
                    checkpoint = checkpoint.short_id(),
                    "{prefix:?} matches an experiment, picking the {pick} checkpoint"
                );
                return Ok(Resolution { checkpoint, pick });
            }
        }

        Err(Error::EmptyExperiment {
            experiment: experiment.short_id().to_string(),
        })
    }
}

/// Resolve `prefix` with the default best-then-latest chain.
///
/// # Errors
///
/// See [`CheckpointResolver::resolve`].
pub fn resolve(project: &dyn Project, prefix: &str) -> Result<Resolution> {
    CheckpointResolver::default().resolve(project, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{ExperimentStore, Goal};
    use chrono::{TimeZone, Utc};

    fn checkpoint(id: &str, exp: &str, secs: i64) -> crate::experiment::CheckpointBuilder {
        Checkpoint::builder(id, exp).created_at(Utc.timestamp_opt(secs, 0).unwrap())
    }

    #[test]
    fn test_exact_checkpoint() {
        let mut store = ExperimentStore::new();
        store.add_experiment(Experiment::new("e111111"));
        store.add_checkpoint(checkpoint("c111111", "e111111", 1).build());

        let res = resolve(&store, "c1").unwrap();
        assert_eq!(res.checkpoint.id(), "c111111");
        assert_eq!(res.pick, Pick::Exact);
    }

    #[test]
    fn test_experiment_falls_back_to_latest_without_metric_values() {
        let mut store = ExperimentStore::new();
        store.add_experiment(
            Experiment::builder("e111111")
                .primary_metric("accuracy", Goal::Maximize)
                .build(),
        );
        store.add_checkpoint(checkpoint("c1", "e111111", 1).metric("loss", 0.3).build());
        store.add_checkpoint(checkpoint("c2", "e111111", 2).metric("loss", 0.1).build());

        let res = resolve(&store, "e1").unwrap();
        assert_eq!(res.checkpoint.id(), "c2");
        assert_eq!(res.pick, Pick::Latest);
    }

    #[test]
    fn test_resolver_without_tiers_rejects_experiments() {
        let mut store = ExperimentStore::new();
        store.add_experiment(Experiment::new("e111111"));
        store.add_checkpoint(checkpoint("c1", "e111111", 1).build());

        let err = CheckpointResolver::new().resolve(&store, "e1").unwrap_err();
        assert!(matches!(err, Error::EmptyExperiment { .. }));
    }

    #[test]
    fn test_latest_only_chain_ignores_primary_metric() {
        let mut store = ExperimentStore::new();
        store.add_experiment(
            Experiment::builder("e111111")
                .primary_metric("accuracy", Goal::Maximize)
                .build(),
        );
        store.add_checkpoint(checkpoint("c1", "e111111", 1).metric("accuracy", 0.9).build());
        store.add_checkpoint(checkpoint("c2", "e111111", 2).metric("accuracy", 0.1).build());

        let resolver = CheckpointResolver::new().with_policy(LatestCheckpointPolicy);
        let res = resolver.resolve(&store, "e1").unwrap();
        assert_eq!(res.checkpoint.id(), "c2");
    }

    #[test]
    fn test_debug_lists_tiers() {
        let debug = format!("{:?}", CheckpointResolver::default());
        assert!(debug.contains("Best"));
        assert!(debug.contains("Latest"));
    }
}
