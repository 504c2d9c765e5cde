mod tests {
    use kasago_test_support::{
        graphs::{corpus_with_labels, vertex_graph},
        stubs::{CountingOracle, FailingOracle, SubsetOracle},
    };

    use super::*;

    fn pattern_set() -> PatternSet {
        PatternSet::new(vec![vertex_graph(&["P"]), vertex_graph(&["Q"])])
    }

    #[test]
    fn bits_follow_pattern_set_order() {
        let patterns = pattern_set();
        let graph = vertex_graph(&["Q"]);
        let vector = featurize(&graph, &patterns, &SubsetOracle).expect("oracle cannot fail");
        assert_eq!(vector, vec![0, 1]);
    }

    #[test]
    fn featurization_is_deterministic() {
        let patterns = pattern_set();
        let graph = vertex_graph(&["P", "Q"]);
        let oracle = CountingOracle::new(SubsetOracle);
        let first = featurize(&graph, &patterns, &oracle).expect("oracle cannot fail");
        let second = featurize(&graph, &patterns, &oracle).expect("oracle cannot fail");
        assert_eq!(first, second);
        // Nothing is memoized: every call goes back to the oracle.
        assert_eq!(oracle.calls(), 4);
    }

    #[test]
    fn corpus_rows_follow_corpus_order() {
        let patterns = pattern_set();
        let corpus = corpus_with_labels(
            vec![
                vertex_graph(&["P"]),
                vertex_graph(&[]),
                vertex_graph(&["P", "Q"]),
            ],
            &[1, 0, 1],
        );
        let matrix =
            featurize_corpus(&corpus, &patterns, &SubsetOracle).expect("oracle cannot fail");
        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.columns(), 2);
        assert_eq!(matrix.row(0), Some(&[1, 0][..]));
        assert_eq!(matrix.row(1), Some(&[0, 0][..]));
        assert_eq!(matrix.row(2), Some(&[1, 1][..]));
        assert_eq!(matrix.row(3), None);
        assert_eq!(
            matrix.iter_rows().collect::<Vec<_>>(),
            vec![&[1, 0][..], &[0, 0][..], &[1, 1][..]],
        );
    }

    #[test]
    fn empty_pattern_set_yields_zero_columns() {
        let patterns = PatternSet::new(Vec::new());
        let corpus = corpus_with_labels(vec![vertex_graph(&["P"])], &[1]);
        let matrix =
            featurize_corpus(&corpus, &patterns, &SubsetOracle).expect("oracle cannot fail");
        assert_eq!(matrix.rows(), 1);
        assert_eq!(matrix.columns(), 0);
        assert_eq!(matrix.row(0), Some(&[][..]));
    }

    #[test]
    fn oracle_failure_carries_the_pattern_index() {
        let patterns = pattern_set();
        let graph = vertex_graph(&["P"]);
        let err = featurize(&graph, &patterns, &FailingOracle)
            .expect_err("failing oracle must abort featurization");
        assert!(matches!(err, KasagoError::Oracle { candidate: 0, .. }));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = FeatureMatrix::try_from_rows(2, vec![vec![1, 0], vec![1]])
            .expect_err("second row is short");
        assert_eq!(
            err,
            FeatureMatrixError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1,
            }
        );
    }
}
