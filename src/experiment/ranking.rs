//! Checkpoint orderings for "best" and "latest" selection
//!
//! Both orderings are total: ties are broken by a later `created_at`, then
//! the greater step, then the greater checkpoint ID, so the pick never
//! depends on iteration order of the underlying store.

use std::cmp::Ordering;

use super::{Checkpoint, Goal, PrimaryMetric};

/// Pick the checkpoint with the extremal value of `metric`.
///
/// Only checkpoints recording the metric as a number are candidates
/// (NaN, booleans and strings are skipped). Returns `None` when no
/// checkpoint qualifies.
///
/// # Examples
///
/// ```rust
/// use trueno_diff::experiment::{best_checkpoint, Checkpoint, Goal, PrimaryMetric};
///
/// let checkpoints = vec![
///     Checkpoint::builder("a", "e").metric("accuracy", 0.7).build(),
///     Checkpoint::builder("b", "e").metric("accuracy", 0.9).build(),
///     Checkpoint::builder("c", "e").metric("accuracy", 0.5).build(),
/// ];
/// let metric = PrimaryMetric::new("accuracy", Goal::Maximize);
/// let best = best_checkpoint(&checkpoints, &metric).unwrap();
/// assert_eq!(best.id(), "b");
/// ```
pub fn best_checkpoint<'a, I>(checkpoints: I, metric: &PrimaryMetric) -> Option<&'a Checkpoint>
where
    I: IntoIterator<Item = &'a Checkpoint>,
{
    checkpoints
        .into_iter()
        .filter_map(|c| {
            c.metrics()
                .get(metric.name())
                .and_then(crate::Value::as_f64)
                .map(|v| (v, c))
        })
        .max_by(|(va, a), (vb, b)| {
            let by_value = match metric.goal() {
                Goal::Maximize => va.total_cmp(vb),
                Goal::Minimize => vb.total_cmp(va),
            };
            by_value.then_with(|| recency(a, b))
        })
        .map(|(_, c)| c)
}

/// Pick the most recently created checkpoint.
///
/// Returns `None` only for an empty input.
pub fn latest_checkpoint<'a, I>(checkpoints: I) -> Option<&'a Checkpoint>
where
    I: IntoIterator<Item = &'a Checkpoint>,
{
    checkpoints.into_iter().max_by(|a, b| recency(a, b))
}

fn recency(a: &Checkpoint, b: &Checkpoint) -> Ordering {
    a.created_at()
        .cmp(&b.created_at())
        .then_with(|| a.step().cmp(&b.step()))
        .then_with(|| a.id().cmp(b.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(id: &str, secs: i64) -> crate::experiment::CheckpointBuilder {
        Checkpoint::builder(id, "e").created_at(Utc.timestamp_opt(secs, 0).unwrap())
    }

    #[test]
    fn test_best_maximize() {
        let cps = vec![
            at("a", 1).metric("accuracy", 0.7).build(),
            at("b", 2).metric("accuracy", 0.9).build(),
            at("c", 3).metric("accuracy", 0.5).build(),
        ];
        let metric = PrimaryMetric::new("accuracy", Goal::Maximize);
        assert_eq!(best_checkpoint(&cps, &metric).unwrap().id(), "b");
    }

    #[test]
    fn test_best_minimize() {
        let cps = vec![
            at("a", 1).metric("loss", 0.7).build(),
            at("b", 2).metric("loss", 0.2).build(),
            at("c", 3).metric("loss", 0.5).build(),
        ];
        let metric = PrimaryMetric::new("loss", Goal::Minimize);
        assert_eq!(best_checkpoint(&cps, &metric).unwrap().id(), "b");
    }

    #[test]
    fn test_best_tie_prefers_most_recent() {
        let cps = vec![
            at("z", 1).metric("accuracy", 0.9).build(),
            at("a", 5).metric("accuracy", 0.9).build(),
            at("m", 3).metric("accuracy", 0.9).build(),
        ];
        let metric = PrimaryMetric::new("accuracy", Goal::Maximize);
        assert_eq!(best_checkpoint(&cps, &metric).unwrap().id(), "a");
    }

    #[test]
    fn test_best_mixes_int_and_float() {
        let cps = vec![
            at("a", 1).metric("score", 2).build(),
            at("b", 2).metric("score", 1.5).build(),
        ];
        let metric = PrimaryMetric::new("score", Goal::Maximize);
        assert_eq!(best_checkpoint(&cps, &metric).unwrap().id(), "a");
    }

    #[test]
    fn test_best_skips_unrecorded_and_non_numeric() {
        let cps = vec![
            at("a", 1).metric("loss", 0.1).build(),
            at("b", 2).metric("accuracy", "high").build(),
            at("c", 3).metric("accuracy", f64::NAN).build(),
        ];
        let metric = PrimaryMetric::new("accuracy", Goal::Maximize);
        assert!(best_checkpoint(&cps, &metric).is_none());
    }

    #[test]
    fn test_latest() {
        let cps = vec![at("a", 1).build(), at("c", 3).build(), at("b", 2).build()];
        assert_eq!(latest_checkpoint(&cps).unwrap().id(), "c");
    }

    #[test]
    fn test_latest_same_timestamp_uses_step() {
        let cps = vec![at("a", 1).step(2).build(), at("b", 1).step(1).build()];
        assert_eq!(latest_checkpoint(&cps).unwrap().id(), "a");
    }

    #[test]
    fn test_latest_empty() {
        let cps: Vec<Checkpoint> = Vec::new();
        assert!(latest_checkpoint(&cps).is_none());
    }
}
