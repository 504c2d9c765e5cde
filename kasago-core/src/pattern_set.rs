//! The ordered, persisted set of selected patterns.

use serde::{Deserialize, Serialize};

use crate::{graph::Graph, selector::RankedPattern};

/// An ordered sequence of selected discriminative patterns.
///
/// Order is significant: position `i` defines feature index `i`, and the
/// same order must be used for every featurization against this set. A
/// pattern set is created once during training, serialized, and treated as
/// read-only thereafter — it is the contract between training and
/// inference. Deserialization re-validates every graph's invariants.
///
/// # Examples
/// ```
/// use kasago_core::{GraphBuilder, PatternSet};
///
/// let mut builder = GraphBuilder::new();
/// builder.add_vertex(0, "C")?;
/// let set = PatternSet::new(vec![builder.finish()]);
/// assert_eq!(set.len(), 1);
///
/// let json = serde_json::to_string(&set)?;
/// let restored: PatternSet = serde_json::from_str(&json)?;
/// assert_eq!(restored, set);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternSet {
    patterns: Vec<Graph>,
}

impl PatternSet {
    /// Creates a pattern set from graphs already in feature order.
    #[must_use]
    pub fn new(patterns: Vec<Graph>) -> Self {
        Self { patterns }
    }

    /// Creates a pattern set from a selector ranking, preserving its order.
    #[must_use]
    pub fn from_ranked(ranked: Vec<RankedPattern>) -> Self {
        Self {
            patterns: ranked.into_iter().map(RankedPattern::into_pattern).collect(),
        }
    }

    /// Returns the number of patterns (the feature-vector length).
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns whether the set holds no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the pattern at feature index `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Graph> {
        self.patterns.get(index)
    }

    /// Returns the patterns in feature order.
    #[must_use]
    pub fn patterns(&self) -> &[Graph] {
        &self.patterns
    }

    /// Iterates the patterns in feature order.
    pub fn iter(&self) -> impl Iterator<Item = &Graph> {
        self.patterns.iter()
    }
}

