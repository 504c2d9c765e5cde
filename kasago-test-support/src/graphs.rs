//! Graph and corpus builders for tests.
//!
//! These helpers panic on invalid input so test bodies stay focused on the
//! behaviour under test.

use kasago_core::{Corpus, Graph, GraphBuilder};

/// Builds a graph from explicit vertex and edge lists.
///
/// # Panics
/// Panics when the lists violate graph invariants; test fixtures are
/// expected to be well-formed.
#[must_use]
pub fn graph(vertices: &[(u32, &str)], edges: &[(u32, u32, &str)]) -> Graph {
    let mut builder = GraphBuilder::new();
    for &(id, label) in vertices {
        builder
            .add_vertex(id, label)
            .expect("test fixture vertex ids must be unique");
    }
    for &(source, target, label) in edges {
        builder
            .add_edge(source, target, label)
            .expect("test fixture edges must reference declared vertices");
    }
    builder.finish()
}

/// Builds an edgeless graph with vertices `0..labels.len()`.
///
/// # Panics
/// Panics when `labels` repeats beyond `u32` range; practically infallible
/// for test fixtures.
#[must_use]
pub fn vertex_graph(labels: &[&str]) -> Graph {
    let vertices: Vec<(u32, &str)> = labels
        .iter()
        .enumerate()
        .map(|(index, &label)| (u32::try_from(index).expect("test fixtures are small"), label))
        .collect();
    graph(&vertices, &[])
}

/// Builds a labeled corpus.
///
/// # Panics
/// Panics when the graph and label counts differ.
#[must_use]
pub fn corpus_with_labels(graphs: Vec<Graph>, labels: &[u8]) -> Corpus {
    Corpus::with_labels(graphs, labels.to_vec())
        .expect("test fixture graph and label counts must match")
}
