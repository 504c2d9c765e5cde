//! Labeled undirected graph model.
//!
//! A [`Graph`] is immutable once built; the only construction path is
//! [`GraphBuilder`], which validates the structural invariants (unique vertex
//! ids, edges referencing declared vertices, no duplicate edges). The same
//! validation runs again when a graph is deserialized from a persisted
//! pattern set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A labeled vertex.
///
/// Ids are unique within their graph but carry no meaning across graphs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    id: u32,
    label: String,
}

impl Vertex {
    /// Creates a vertex with the given id and label.
    #[must_use]
    pub fn new(id: u32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    /// Returns the vertex id.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the vertex label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A labeled undirected edge between two declared vertices.
///
/// `source`/`target` reflect declaration order only; the edge itself is
/// unordered.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    source: u32,
    target: u32,
    label: String,
}

impl Edge {
    /// Creates an edge between `source` and `target`.
    #[must_use]
    pub fn new(source: u32, target: u32, label: impl Into<String>) -> Self {
        Self {
            source,
            target,
            label: label.into(),
        }
    }

    /// Returns the first declared endpoint.
    #[must_use]
    pub fn source(&self) -> u32 {
        self.source
    }

    /// Returns the second declared endpoint.
    #[must_use]
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Returns the edge label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Errors raised while assembling a [`Graph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// A vertex id was declared more than once.
    #[error("vertex id {id} is declared twice")]
    DuplicateVertex {
        /// The repeated vertex id.
        id: u32,
    },
    /// An edge referenced a vertex id that has not been declared.
    #[error("edge ({endpoint_a}, {endpoint_b}) references undeclared vertex {missing}")]
    UnknownVertex {
        /// The first declared endpoint of the offending edge.
        endpoint_a: u32,
        /// The second declared endpoint of the offending edge.
        endpoint_b: u32,
        /// The endpoint that is not a declared vertex.
        missing: u32,
    },
    /// The same unordered vertex pair was connected twice.
    #[error("edge ({endpoint_a}, {endpoint_b}) is declared twice")]
    DuplicateEdge {
        /// The first declared endpoint of the repeated edge.
        endpoint_a: u32,
        /// The second declared endpoint of the repeated edge.
        endpoint_b: u32,
    },
}

/// An immutable labeled undirected graph.
///
/// # Examples
/// ```
/// use kasago_core::GraphBuilder;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_vertex(0, "C")?;
/// builder.add_vertex(1, "O")?;
/// builder.add_edge(0, 1, "double")?;
/// let graph = builder.finish();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.vertex_label(1), Some("O"));
/// assert!(graph.has_edge(1, 0));
/// # Ok::<(), kasago_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphParts", into = "GraphParts")]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the vertices in declaration order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the edges in declaration order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the label of the vertex with the given id, if declared.
    #[must_use]
    pub fn vertex_label(&self, id: u32) -> Option<&str> {
        self.vertices
            .iter()
            .find(|vertex| vertex.id == id)
            .map(Vertex::label)
    }

    /// Returns whether an edge connects `a` and `b`, in either direction.
    #[must_use]
    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        self.edges.iter().any(|edge| {
            (edge.source == a && edge.target == b) || (edge.source == b && edge.target == a)
        })
    }
}

/// Serialized form of [`Graph`]; conversion re-runs builder validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct GraphParts {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl From<Graph> for GraphParts {
    fn from(graph: Graph) -> Self {
        Self {
            vertices: graph.vertices,
            edges: graph.edges,
        }
    }
}

impl TryFrom<GraphParts> for Graph {
    type Error = GraphError;

    fn try_from(parts: GraphParts) -> Result<Self, Self::Error> {
        let mut builder = GraphBuilder::new();
        for vertex in parts.vertices {
            builder.add_vertex(vertex.id, vertex.label)?;
        }
        for edge in parts.edges {
            builder.add_edge(edge.source, edge.target, edge.label)?;
        }
        Ok(builder.finish())
    }
}

/// Incrementally assembles a [`Graph`], enforcing its invariants.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    ids: HashSet<u32>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether no vertex has been declared yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Declares a vertex.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateVertex`] when `id` was already declared.
    pub fn add_vertex(&mut self, id: u32, label: impl Into<String>) -> Result<(), GraphError> {
        if !self.ids.insert(id) {
            return Err(GraphError::DuplicateVertex { id });
        }
        self.vertices.push(Vertex::new(id, label));
        Ok(())
    }

    /// Declares an edge between two previously declared vertices.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] when either endpoint has not been
    /// declared, or [`GraphError::DuplicateEdge`] when the unordered pair is
    /// already connected.
    pub fn add_edge(
        &mut self,
        source: u32,
        target: u32,
        label: impl Into<String>,
    ) -> Result<(), GraphError> {
        for endpoint in [source, target] {
            if !self.ids.contains(&endpoint) {
                return Err(GraphError::UnknownVertex {
                    endpoint_a: source,
                    endpoint_b: target,
                    missing: endpoint,
                });
            }
        }
        let duplicate = self.edges.iter().any(|edge| {
            (edge.source == source && edge.target == target)
                || (edge.source == target && edge.target == source)
        });
        if duplicate {
            return Err(GraphError::DuplicateEdge { endpoint_a: source, endpoint_b: target });
        }
        self.edges.push(Edge::new(source, target, label));
        Ok(())
    }

    /// Finalizes the builder into an immutable graph.
    #[must_use]
    pub fn finish(self) -> Graph {
        Graph {
            vertices: self.vertices,
            edges: self.edges,
        }
    }
}
