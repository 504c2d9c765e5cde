//! Presence oracle abstraction.
//!
//! Subgraph isomorphism is delegated to an external backend behind a
//! single-method contract so any conforming implementation (bundled
//! algorithm, external process, remote service) can be substituted without
//! touching the selector or the feature-vector builder.

use std::sync::Arc;

use thiserror::Error;

use crate::graph::Graph;

/// An error produced by a [`PresenceOracle`] backend.
///
/// Oracle failures are always fatal for the operation that triggered them:
/// silently treating a failed check as "absent" would corrupt feature-vector
/// semantics.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OracleError {
    /// The pattern graph had no vertices; presence is undefined.
    #[error("pattern graph has no vertices")]
    EmptyPattern,
    /// The backend isomorphism routine failed.
    #[error("oracle `{oracle}` failed: {message}")]
    Backend {
        /// Name of the oracle implementation that failed.
        oracle: Arc<str>,
        /// Backend-specific failure description.
        message: Arc<str>,
    },
}

/// Decides whether a pattern occurs inside a host graph.
///
/// The contract: `contains` returns `true` iff `pattern` is isomorphic, with
/// exact string equality of vertex and edge labels, to some (not necessarily
/// induced) subgraph of `host`. Implementations must be pure functions of
/// their two arguments; nothing is memoized.
///
/// # Examples
/// ```
/// use kasago_core::{Graph, GraphBuilder, OracleError, PresenceOracle};
///
/// /// Reports a pattern present when the host declares every pattern
/// /// vertex label at least once. Structure-blind; fine for a doctest.
/// struct LabelOracle;
///
/// impl PresenceOracle for LabelOracle {
///     fn name(&self) -> &str {
///         "labels"
///     }
///
///     fn contains(&self, host: &Graph, pattern: &Graph) -> Result<bool, OracleError> {
///         if pattern.vertex_count() == 0 {
///             return Err(OracleError::EmptyPattern);
///         }
///         Ok(pattern.vertices().iter().all(|needle| {
///             host.vertices()
///                 .iter()
///                 .any(|vertex| vertex.label() == needle.label())
///         }))
///     }
/// }
///
/// let mut builder = GraphBuilder::new();
/// builder.add_vertex(0, "C")?;
/// builder.add_vertex(1, "O")?;
/// let host = builder.finish();
///
/// let mut builder = GraphBuilder::new();
/// builder.add_vertex(0, "O")?;
/// let pattern = builder.finish();
///
/// let oracle = LabelOracle;
/// assert!(oracle.contains(&host, &pattern)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait PresenceOracle {
    /// Returns a human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Returns whether `pattern` occurs in `host`.
    ///
    /// # Errors
    /// Returns [`OracleError`] when the backend cannot produce an answer;
    /// callers must propagate the failure rather than coerce it to `false`.
    fn contains(&self, host: &Graph, pattern: &Graph) -> Result<bool, OracleError>;
}
