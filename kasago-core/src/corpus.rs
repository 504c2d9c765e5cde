//! Graph corpora and train/test splitting.
//!
//! A [`Corpus`] owns its graphs and, optionally, a class label per graph.
//! The graph/label pairing is established once at construction and preserved
//! by every operation, including [`Corpus::split`].

use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
use thiserror::Error;

use crate::{error::FormatError, graph::Graph};

/// An ordered sequence of graphs, optionally paired 1:1 with class labels.
///
/// Index `i` of the label sequence always refers to graph `i`. Labels are
/// absent on corpora used purely for feature extraction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Corpus {
    graphs: Vec<Graph>,
    labels: Option<Vec<u8>>,
}

impl Corpus {
    /// Creates an unlabeled corpus.
    #[must_use]
    pub fn new(graphs: Vec<Graph>) -> Self {
        Self {
            graphs,
            labels: None,
        }
    }

    /// Creates a labeled corpus.
    ///
    /// # Errors
    /// Returns [`FormatError::LabelCountMismatch`] when the label count does
    /// not match the graph count.
    pub fn with_labels(graphs: Vec<Graph>, labels: Vec<u8>) -> Result<Self, FormatError> {
        if graphs.len() != labels.len() {
            return Err(FormatError::LabelCountMismatch {
                graphs: graphs.len(),
                labels: labels.len(),
            });
        }
        Ok(Self {
            graphs,
            labels: Some(labels),
        })
    }

    /// Returns the number of graphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Returns whether the corpus contains no graphs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Returns the graphs in corpus order.
    #[must_use]
    pub fn graphs(&self) -> &[Graph] {
        &self.graphs
    }

    /// Returns the class labels, when present.
    #[must_use]
    pub fn labels(&self) -> Option<&[u8]> {
        self.labels.as_deref()
    }

    /// Partitions the corpus into disjoint `(train, test)` subsets.
    ///
    /// Every graph lands in exactly one subset, relative order within each
    /// subset follows the original corpus order, and the graph/label pairing
    /// is preserved. The corpus is consumed; each subset takes exclusive
    /// ownership of its graphs.
    ///
    /// # Errors
    /// Returns [`SplitError::InvalidTestFraction`] when the policy's test
    /// fraction lies outside `[0, 1]`.
    pub fn split(self, policy: SplitPolicy) -> Result<(Self, Self), SplitError> {
        let membership = policy.test_membership(self.graphs.len())?;

        let has_labels = self.labels.is_some();
        let mut train_graphs = Vec::new();
        let mut test_graphs = Vec::new();
        let mut train_labels = Vec::new();
        let mut test_labels = Vec::new();

        let labels = self.labels.unwrap_or_default();
        let mut labels = labels.into_iter();
        for (graph, in_test) in self.graphs.into_iter().zip(&membership) {
            let label = labels.next();
            if *in_test {
                test_graphs.push(graph);
                test_labels.extend(label);
            } else {
                train_graphs.push(graph);
                train_labels.extend(label);
            }
        }

        let train = Self {
            graphs: train_graphs,
            labels: has_labels.then_some(train_labels),
        };
        let test = Self {
            graphs: test_graphs,
            labels: has_labels.then_some(test_labels),
        };
        Ok((train, test))
    }
}

/// How [`Corpus::split`] assigns examples to the test subset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SplitPolicy {
    /// The last `ceil(test_fraction * len)` examples become the test subset.
    Positional {
        /// Fraction of examples held out, in `[0, 1]`.
        test_fraction: f64,
    },
    /// A seeded shuffle picks `ceil(test_fraction * len)` test examples.
    ///
    /// Membership is random; order within each subset stays positional. The
    /// same seed always produces the same split.
    Random {
        /// Fraction of examples held out, in `[0, 1]`.
        test_fraction: f64,
        /// Seed for the split's private RNG.
        seed: u64,
    },
}

impl SplitPolicy {
    /// Returns a `len`-sized membership mask; `true` marks a test example.
    fn test_membership(self, len: usize) -> Result<Vec<bool>, SplitError> {
        let (fraction, seed) = match self {
            Self::Positional { test_fraction } => (test_fraction, None),
            Self::Random {
                test_fraction,
                seed,
            } => (test_fraction, Some(seed)),
        };
        if !(0.0..=1.0).contains(&fraction) {
            return Err(SplitError::InvalidTestFraction { got: fraction });
        }

        let test_count = test_count(len, fraction);
        let mut membership = vec![false; len];
        match seed {
            None => {
                for slot in membership.iter_mut().skip(len - test_count) {
                    *slot = true;
                }
            }
            Some(seed) => {
                let mut rng = SmallRng::seed_from_u64(seed);
                let mut indices: Vec<usize> = (0..len).collect();
                indices.shuffle(&mut rng);
                for &index in indices.iter().take(test_count) {
                    membership[index] = true;
                }
            }
        }
        Ok(membership)
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_arithmetic,
    reason = "Held-out counts are derived from a fractional knob."
)]
fn test_count(len: usize, fraction: f64) -> usize {
    ((len as f64) * fraction).ceil() as usize
}

/// Error raised by [`Corpus::split`] for an out-of-range test fraction.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SplitError {
    /// The test fraction must lie in `[0, 1]`.
    #[error("test fraction must lie in [0, 1] (got {got})")]
    InvalidTestFraction {
        /// The invalid fraction supplied by the caller.
        got: f64,
    },
}
