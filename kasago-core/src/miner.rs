//! Frequent-subgraph miner abstraction.
//!
//! The mining algorithm itself is an external collaborator. The trait
//! normalizes its output into [`Graph`] candidates and nothing more: no
//! deduplication, no filtering — ranking is the selector's job.

use std::process::ExitStatus;

use thiserror::Error;

use crate::{corpus::Corpus, graph::Graph};

/// Parameters handed to a [`PatternMiner`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MineParams {
    min_support: usize,
    min_vertices: usize,
}

impl MineParams {
    /// Creates mining parameters.
    ///
    /// `min_support` is an absolute transaction count, not a fraction; the
    /// pipeline derives it from the corpus size.
    #[must_use]
    pub fn new(min_support: usize, min_vertices: usize) -> Self {
        Self {
            min_support,
            min_vertices,
        }
    }

    /// Minimum number of corpus graphs a candidate must occur in.
    #[must_use]
    pub fn min_support(&self) -> usize {
        self.min_support
    }

    /// Minimum number of vertices a candidate must have.
    #[must_use]
    pub fn min_vertices(&self) -> usize {
        self.min_vertices
    }
}

/// An error produced while running an external pattern miner.
///
/// Any miner failure is fatal to the training run: pattern-set order must be
/// deterministic, so partial results are never usable.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MinerError {
    /// Preparing the miner's input failed.
    #[error("i/o while preparing miner input: {source}")]
    Io {
        /// Underlying operating system error.
        #[source]
        source: std::io::Error,
    },
    /// The miner process could not be started.
    #[error("failed to launch miner `{miner}`: {source}")]
    Launch {
        /// The executable that failed to start.
        miner: String,
        /// Underlying operating system error.
        #[source]
        source: std::io::Error,
    },
    /// The miner process exited unsuccessfully.
    #[error("miner `{miner}` failed ({status}): {stderr}")]
    Failed {
        /// The executable that failed.
        miner: String,
        /// Exit status reported by the operating system.
        status: ExitStatus,
        /// Captured standard error output.
        stderr: String,
    },
    /// The miner's pattern stream could not be parsed.
    #[error("line {line}: malformed miner output: {message}")]
    Malformed {
        /// 1-based line number within the miner's output.
        line: usize,
        /// Description of the malformation.
        message: String,
    },
}

/// Produces candidate subgraph patterns from a corpus.
pub trait PatternMiner {
    /// Returns a human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Mines candidate patterns occurring in at least `params.min_support()`
    /// corpus graphs.
    ///
    /// The returned order is the miner's native emission order and becomes
    /// the candidate order the selector's tie-breaking refers to.
    ///
    /// # Errors
    /// Returns [`MinerError`] when the external miner cannot be invoked, exits
    /// unsuccessfully, or emits output that cannot be normalized.
    fn mine(&self, corpus: &Corpus, params: &MineParams) -> Result<Vec<Graph>, MinerError>;
}
