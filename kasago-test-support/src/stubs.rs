//! Stub miners and oracles for exercising the pipeline without external
//! processes or a real isomorphism backend.

use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use kasago_core::{
    Corpus, Graph, MineParams, MinerError, OracleError, PatternMiner, PresenceOracle,
};

/// A miner that returns a fixed candidate list and records the parameters it
/// was invoked with.
#[derive(Debug, Default)]
pub struct StaticMiner {
    patterns: Vec<Graph>,
    calls: Mutex<Vec<MineParams>>,
}

impl StaticMiner {
    /// Creates a miner that always emits `patterns`, in order.
    #[must_use]
    pub fn new(patterns: Vec<Graph>) -> Self {
        Self {
            patterns,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the parameters of every `mine` call, in call order.
    ///
    /// # Panics
    /// Panics when the internal lock is poisoned.
    #[must_use]
    pub fn recorded_params(&self) -> Vec<MineParams> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl PatternMiner for StaticMiner {
    fn name(&self) -> &str {
        "static"
    }

    fn mine(&self, _corpus: &Corpus, params: &MineParams) -> Result<Vec<Graph>, MinerError> {
        self.calls.lock().expect("lock poisoned").push(*params);
        Ok(self.patterns.clone())
    }
}

/// A structure-blind oracle: a pattern is "present" when the host covers its
/// vertex-label multiset and its edge (endpoint labels, edge label)
/// multiset.
///
/// Exact for fixtures whose presence is fully determined by labels (the
/// corpora in this workspace's unit tests); not a real isomorphism test.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubsetOracle;

impl PresenceOracle for SubsetOracle {
    fn name(&self) -> &str {
        "label-subset"
    }

    fn contains(&self, host: &Graph, pattern: &Graph) -> Result<bool, OracleError> {
        if pattern.vertex_count() == 0 {
            return Err(OracleError::EmptyPattern);
        }
        Ok(covers(&vertex_counts(host), &vertex_counts(pattern))
            && covers(&edge_counts(host), &edge_counts(pattern)))
    }
}

fn vertex_counts(graph: &Graph) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for vertex in graph.vertices() {
        *counts.entry(vertex.label().to_owned()).or_insert(0) += 1;
    }
    counts
}

fn edge_counts(graph: &Graph) -> HashMap<(String, String, String), usize> {
    let mut counts = HashMap::new();
    for edge in graph.edges() {
        let mut endpoints = [
            graph.vertex_label(edge.source()).unwrap_or("").to_owned(),
            graph.vertex_label(edge.target()).unwrap_or("").to_owned(),
        ];
        endpoints.sort();
        let [first, second] = endpoints;
        *counts
            .entry((first, second, edge.label().to_owned()))
            .or_insert(0) += 1;
    }
    counts
}

fn covers<K: std::hash::Hash + Eq>(host: &HashMap<K, usize>, needle: &HashMap<K, usize>) -> bool {
    needle
        .iter()
        .all(|(key, &count)| host.get(key).copied().unwrap_or(0) >= count)
}

/// Wraps another oracle and counts `contains` invocations.
#[derive(Debug)]
pub struct CountingOracle<O> {
    inner: O,
    calls: Arc<AtomicUsize>,
}

impl<O> CountingOracle<O> {
    /// Wraps `inner` with a fresh call counter.
    #[must_use]
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns the number of `contains` calls observed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<O: PresenceOracle> PresenceOracle for CountingOracle<O> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn contains(&self, host: &Graph, pattern: &Graph) -> Result<bool, OracleError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.contains(host, pattern)
    }
}

/// An oracle whose every check fails, for exercising error propagation.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingOracle;

impl PresenceOracle for FailingOracle {
    fn name(&self) -> &str {
        "failing"
    }

    fn contains(&self, _host: &Graph, _pattern: &Graph) -> Result<bool, OracleError> {
        Err(OracleError::Backend {
            oracle: Arc::from(self.name()),
            message: Arc::from("synthetic failure"),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::graphs::{graph, vertex_graph};

    #[rstest]
    #[case::present(&["A", "B"], &["B"], true)]
    #[case::absent(&["A", "B"], &["C"], false)]
    #[case::multiplicity(&["A"], &["A", "A"], false)]
    fn subset_oracle_checks_vertex_multisets(
        #[case] host: &[&str],
        #[case] pattern: &[&str],
        #[case] expected: bool,
    ) {
        let present = SubsetOracle
            .contains(&vertex_graph(host), &vertex_graph(pattern))
            .expect("non-empty pattern");
        assert_eq!(present, expected);
    }

    #[test]
    fn subset_oracle_checks_edge_labels() {
        let host = graph(&[(0, "A"), (1, "B")], &[(0, 1, "x")]);
        let hit = graph(&[(5, "B"), (9, "A")], &[(9, 5, "x")]);
        let miss = graph(&[(0, "A"), (1, "B")], &[(0, 1, "y")]);
        assert!(SubsetOracle.contains(&host, &hit).expect("non-empty pattern"));
        assert!(!SubsetOracle.contains(&host, &miss).expect("non-empty pattern"));
    }

    #[test]
    fn subset_oracle_rejects_empty_patterns() {
        let err = SubsetOracle
            .contains(&vertex_graph(&["A"]), &vertex_graph(&[]))
            .expect_err("empty patterns are undefined");
        assert_eq!(err, OracleError::EmptyPattern);
    }
}
