//! Presence oracle backed by petgraph's VF2 subgraph isomorphism.

use std::collections::HashMap;

use kasago_core::{Graph, OracleError, PresenceOracle};
use petgraph::graph::UnGraph;

/// Subgraph-presence oracle delegating to `petgraph`'s VF2 implementation.
///
/// A pattern is present when it is isomorphic, with exact string equality of
/// vertex and edge labels, to some subgraph of the host. The subgraph is not
/// required to be induced: host edges between matched vertices that the
/// pattern does not declare are ignored.
///
/// # Examples
/// ```
/// use kasago_core::{GraphBuilder, PresenceOracle};
/// use kasago_providers_vf2::Vf2Oracle;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_vertex(0, "C")?;
/// builder.add_vertex(1, "O")?;
/// builder.add_edge(0, 1, "double")?;
/// let host = builder.finish();
///
/// let mut builder = GraphBuilder::new();
/// builder.add_vertex(7, "O")?;
/// let pattern = builder.finish();
///
/// assert!(Vf2Oracle::new().contains(&host, &pattern)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Vf2Oracle;

impl Vf2Oracle {
    /// Creates the oracle.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PresenceOracle for Vf2Oracle {
    fn name(&self) -> &str {
        "vf2"
    }

    fn contains(&self, host: &Graph, pattern: &Graph) -> Result<bool, OracleError> {
        if pattern.vertex_count() == 0 {
            return Err(OracleError::EmptyPattern);
        }
        // A pattern that cannot fit is absent, not an error.
        if pattern.vertex_count() > host.vertex_count()
            || pattern.edge_count() > host.edge_count()
        {
            return Ok(false);
        }

        let needle = to_petgraph(pattern);
        let haystack = to_petgraph(host);
        Ok(petgraph::algo::is_isomorphic_subgraph_matching(
            &needle,
            &haystack,
            |a, b| a == b,
            |a, b| a == b,
        ))
    }
}

/// Re-indexes a graph into petgraph's representation.
///
/// Vertex ids map to fresh node indices, so presence is invariant under any
/// id relabeling that preserves the labeled structure.
fn to_petgraph(graph: &Graph) -> UnGraph<&str, &str> {
    let mut converted = UnGraph::with_capacity(graph.vertex_count(), graph.edge_count());
    let mut indices = HashMap::with_capacity(graph.vertex_count());
    for vertex in graph.vertices() {
        indices.insert(vertex.id(), converted.add_node(vertex.label()));
    }
    for edge in graph.edges() {
        // Both endpoints are declared vertices by Graph's invariants.
        converted.add_edge(indices[&edge.source()], indices[&edge.target()], edge.label());
    }
    converted
}
