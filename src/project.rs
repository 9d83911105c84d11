//! Project data access
//!
//! The comparison engine only needs four read operations from storage.
//! They are collected in the [`Project`] trait so that any backend (local
//! directory, object store, test fixture) can sit behind it. All calls are
//! synchronous and assume a consistent read-only snapshot.

use crate::experiment::{
    best_checkpoint, latest_checkpoint, Checkpoint, Experiment, ExperimentStore,
};
use crate::{Error, Result};

/// The single object a prefix resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedObject {
    /// Prefix named a checkpoint.
    Checkpoint(Checkpoint),
    /// Prefix named an experiment.
    Experiment(Experiment),
}

/// Read-only access to a project's experiments and checkpoints.
pub trait Project {
    /// Resolve a user-typed prefix against checkpoint and experiment IDs.
    ///
    /// An ID equal to `prefix` wins over longer IDs that merely start with
    /// it. Otherwise exactly one object across both namespaces must match.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if nothing matches, [`Error::AmbiguousPrefix`]
    /// if more than one object matches, [`Error::InvalidInput`] for an
    /// empty prefix.
    fn find_by_prefix(&self, prefix: &str) -> Result<ResolvedObject>;

    /// Load an experiment by full ID. `Ok(None)` means it does not exist.
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn experiment(&self, id: &str) -> Result<Option<Experiment>>;

    /// Best checkpoint of an experiment by its primary metric.
    ///
    /// `Ok(None)` when the experiment declares no primary metric or no
    /// checkpoint records it.
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn best_checkpoint(&self, experiment_id: &str) -> Result<Option<Checkpoint>>;

    /// Most recently created checkpoint of an experiment.
    ///
    /// `Ok(None)` when the experiment has no checkpoints.
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn latest_checkpoint(&self, experiment_id: &str) -> Result<Option<Checkpoint>>;
}

impl Project for ExperimentStore {
    fn find_by_prefix(&self, prefix: &str) -> Result<ResolvedObject> {
        if prefix.is_empty() {
            return Err(Error::InvalidInput("ID prefix must not be empty".to_string()));
        }

        let checkpoints: Vec<&Checkpoint> = self.checkpoints_with_prefix(prefix).collect();
        let experiments: Vec<&Experiment> = self.experiments_with_prefix(prefix).collect();

        let exact_checkpoint = checkpoints.iter().find(|c| c.id() == prefix);
        let exact_experiment = experiments.iter().find(|e| e.id() == prefix);
        match (exact_checkpoint, exact_experiment) {
            (Some(c), None) => return Ok(ResolvedObject::Checkpoint((*c).clone())),
            (None, Some(e)) => return Ok(ResolvedObject::Experiment((*e).clone())),
            (Some(_), Some(_)) => {
                return Err(Error::AmbiguousPrefix {
                    prefix: prefix.to_string(),
                    matches: checkpoints.len() + experiments.len(),
                })
            }
            (None, None) => {}
        }

        match (checkpoints.as_slice(), experiments.as_slice()) {
            ([], []) => Err(Error::NotFound {
                prefix: prefix.to_string(),
            }),
            ([c], []) => Ok(ResolvedObject::Checkpoint((*c).clone())),
            ([], [e]) => Ok(ResolvedObject::Experiment((*e).clone())),
            (cs, es) => Err(Error::AmbiguousPrefix {
                prefix: prefix.to_string(),
                matches: cs.len() + es.len(),
            }),
        }
    }

    fn experiment(&self, id: &str) -> Result<Option<Experiment>> {
        Ok(self.get_experiment(id).cloned())
    }

    fn best_checkpoint(&self, experiment_id: &str) -> Result<Option<Checkpoint>> {
        let Some(metric) = self
            .get_experiment(experiment_id)
            .and_then(Experiment::primary_metric)
        else {
            return Ok(None);
        };
        let checkpoints = self.get_checkpoints_for_experiment(experiment_id);
        Ok(best_checkpoint(checkpoints, metric).cloned())
    }

    fn latest_checkpoint(&self, experiment_id: &str) -> Result<Option<Checkpoint>> {
        let checkpoints = self.get_checkpoints_for_experiment(experiment_id);
        Ok(latest_checkpoint(checkpoints).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::Goal;

    fn store() -> ExperimentStore {
        let mut store = ExperimentStore::new();
        store.add_experiment(
            Experiment::builder("e1aaaaaa")
                .primary_metric("accuracy", Goal::Maximize)
                .build(),
        );
        store.add_experiment(Experiment::new("e2bbbbbb"));
        store.add_checkpoint(Checkpoint::builder("c1aaaaaa", "e1aaaaaa").metric("accuracy", 0.5).build());
        store.add_checkpoint(Checkpoint::builder("c1abbbbb", "e1aaaaaa").metric("accuracy", 0.8).build());
        store
    }

    #[test]
    fn test_find_unique_checkpoint() {
        let err = store().find_by_prefix("c1b").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));

        match store().find_by_prefix("c1ab").unwrap() {
            ResolvedObject::Checkpoint(c) => assert_eq!(c.id(), "c1abbbbb"),
            other @ ResolvedObject::Experiment(_) => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_find_unique_experiment() {
        match store().find_by_prefix("e2").unwrap() {
            ResolvedObject::Experiment(e) => assert_eq!(e.id(), "e2bbbbbb"),
            other @ ResolvedObject::Checkpoint(_) => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_find_ambiguous_within_one_namespace() {
        let err = store().find_by_prefix("c1a").unwrap_err();
        assert!(matches!(err, Error::AmbiguousPrefix { matches: 2, .. }));
    }

    #[test]
    fn test_find_ambiguous_across_namespaces() {
        let mut store = store();
        store.add_experiment(Experiment::new("c1zzzzzz"));
        store.add_checkpoint(Checkpoint::new("e2cccccc", "e1aaaaaa"));
        let err = store.find_by_prefix("e2").unwrap_err();
        assert!(matches!(err, Error::AmbiguousPrefix { matches: 2, .. }));
    }

    #[test]
    fn test_exact_id_beats_longer_ids() {
        let mut store = store();
        store.add_experiment(Experiment::new("c1aaaaaa99"));
        match store.find_by_prefix("c1aaaaaa").unwrap() {
            ResolvedObject::Checkpoint(c) => assert_eq!(c.id(), "c1aaaaaa"),
            other @ ResolvedObject::Experiment(_) => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_empty_prefix_rejected() {
        assert!(matches!(
            store().find_by_prefix(""),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_best_and_latest() {
        let store = store();
        assert_eq!(
            store.best_checkpoint("e1aaaaaa").unwrap().unwrap().id(),
            "c1abbbbb"
        );
        assert!(store.best_checkpoint("e2bbbbbb").unwrap().is_none());
        assert!(store.latest_checkpoint("e2bbbbbb").unwrap().is_none());
        assert!(store.experiment("missing").unwrap().is_none());
    }
}
