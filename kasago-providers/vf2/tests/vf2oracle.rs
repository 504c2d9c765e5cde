//! Behavioural tests for the VF2 presence oracle.

use kasago_core::{Graph, OracleError, PresenceOracle};
use kasago_providers_vf2::Vf2Oracle;
use kasago_test_support::graphs::graph;
use rstest::rstest;

fn water() -> Graph {
    graph(
        &[(0, "O"), (1, "H"), (2, "H")],
        &[(0, 1, "s"), (0, 2, "s")],
    )
}

fn triangle(vertex: &str, edge: &str) -> Graph {
    graph(
        &[(0, vertex), (1, vertex), (2, vertex)],
        &[(0, 1, edge), (1, 2, edge), (0, 2, edge)],
    )
}

#[rstest]
#[case::present(graph(&[(0, "H")], &[]), true)]
#[case::absent(graph(&[(0, "N")], &[]), false)]
fn single_vertex_patterns(#[case] pattern: Graph, #[case] expected: bool) {
    let present = Vf2Oracle::new()
        .contains(&water(), &pattern)
        .expect("non-empty pattern");
    assert_eq!(present, expected);
}

#[test]
fn labeled_edge_pattern_is_found() {
    let pattern = graph(&[(0, "H"), (1, "O")], &[(0, 1, "s")]);
    assert!(
        Vf2Oracle::new()
            .contains(&water(), &pattern)
            .expect("non-empty pattern")
    );
}

#[rstest]
#[case::edge_label(graph(&[(0, "H"), (1, "O")], &[(0, 1, "d")]))]
#[case::vertex_label(graph(&[(0, "H"), (1, "N")], &[(0, 1, "s")]))]
#[case::structure(graph(&[(0, "H"), (1, "H")], &[(0, 1, "s")]))]
fn mismatches_are_absent(#[case] pattern: Graph) {
    assert!(
        !Vf2Oracle::new()
            .contains(&water(), &pattern)
            .expect("non-empty pattern")
    );
}

#[test]
fn presence_is_invariant_under_vertex_id_relabeling() {
    let oracle = Vf2Oracle::new();
    let pattern = graph(&[(0, "O"), (1, "H")], &[(0, 1, "s")]);
    let relabeled = graph(&[(40, "H"), (17, "O")], &[(17, 40, "s")]);
    assert!(oracle.contains(&water(), &pattern).expect("non-empty pattern"));
    assert!(
        oracle
            .contains(&water(), &relabeled)
            .expect("non-empty pattern")
    );
}

#[test]
fn triangle_occurs_in_itself() {
    assert!(
        Vf2Oracle::new()
            .contains(&triangle("C", "a"), &triangle("C", "a"))
            .expect("non-empty pattern")
    );
}

#[test]
fn subgraphs_need_not_be_induced() {
    // A two-edge path maps onto a triangle even though the triangle closes
    // the cycle with an edge the pattern does not declare.
    let path = graph(&[(0, "C"), (1, "C"), (2, "C")], &[(0, 1, "a"), (1, 2, "a")]);
    assert!(
        Vf2Oracle::new()
            .contains(&triangle("C", "a"), &path)
            .expect("non-empty pattern")
    );
}

#[test]
fn edgeless_patterns_match_on_vertex_labels_alone() {
    let pattern = graph(&[(0, "H"), (1, "H")], &[]);
    assert!(
        Vf2Oracle::new()
            .contains(&water(), &pattern)
            .expect("non-empty pattern")
    );
}

#[rstest]
#[case::more_vertices(graph(&[(0, "H"), (1, "H"), (2, "H"), (3, "O")], &[]))]
#[case::more_edges(triangle("H", "s"))]
fn oversized_patterns_are_absent(#[case] pattern: Graph) {
    assert!(
        !Vf2Oracle::new()
            .contains(&water(), &pattern)
            .expect("non-empty pattern")
    );
}

#[test]
fn empty_pattern_is_rejected() {
    let err = Vf2Oracle::new()
        .contains(&water(), &graph(&[], &[]))
        .expect_err("presence of an empty pattern is undefined");
    assert_eq!(err, OracleError::EmptyPattern);
}
