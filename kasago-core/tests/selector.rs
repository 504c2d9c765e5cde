mod tests {
    use kasago_test_support::{
        graphs::{corpus_with_labels, vertex_graph},
        stubs::{FailingOracle, SubsetOracle},
    };

    use super::*;
    use crate::error::KasagoErrorCode;

    fn max(features: usize) -> NonZeroUsize {
        NonZeroUsize::new(features).expect("test constant is non-zero")
    }

    /// Eight single-vertex graphs; the selector sees labels `[1; 4] ++ [0; 4]`.
    ///
    /// Vertex labels encode which candidate patterns occur where:
    /// `P` only in positives, `Q` in three positives and one negative, `U`
    /// everywhere.
    fn eight_graph_corpus() -> Corpus {
        let vertex_labels: [&[&str]; 8] = [
            &["P", "Q", "U"],
            &["P", "Q", "U"],
            &["P", "Q", "U"],
            &["P", "U"],
            &["Q", "U"],
            &["U"],
            &["U"],
            &["U"],
        ];
        let graphs = vertex_labels.iter().map(|labels| vertex_graph(labels)).collect();
        corpus_with_labels(graphs, &[1, 1, 1, 1, 0, 0, 0, 0])
    }

    #[test]
    fn ranks_by_descending_correlation() {
        let corpus = eight_graph_corpus();
        // Candidate order deliberately differs from the expected ranking.
        let candidates = vec![
            vertex_graph(&["U"]),
            vertex_graph(&["Q"]),
            vertex_graph(&["P"]),
        ];
        let ranked = select_discriminative(candidates, &corpus, &SubsetOracle, max(3))
            .expect("selection succeeds");

        // P separates perfectly: [[4,0],[0,4]] scores 4.5 under Yates.
        // Q gives [[3,1],[1,3]] = 0.5; U is degenerate and falls back to 0.
        let order: Vec<usize> = ranked.iter().map(RankedPattern::source_index).collect();
        assert_eq!(order, vec![2, 1, 0]);
        assert!((ranked[0].score() - 4.5).abs() < 1e-12);
        assert!((ranked[1].score() - 0.5).abs() < 1e-12);
        assert_eq!(ranked[2].score(), 0.0);
    }

    #[test]
    fn perfect_separator_outranks_weaker_candidates() {
        let graphs = vec![
            vertex_graph(&["P", "Q"]),
            vertex_graph(&["P"]),
            vertex_graph(&["Q"]),
            vertex_graph(&[]),
        ];
        let corpus = corpus_with_labels(graphs, &[1, 1, 0, 0]);
        let candidates = vec![vertex_graph(&["Q"]), vertex_graph(&["P"])];
        let ranked = select_discriminative(candidates, &corpus, &SubsetOracle, max(2))
            .expect("selection succeeds");

        // P yields [[2,0],[0,2]], the maximum for four examples.
        assert_eq!(ranked[0].source_index(), 1);
        assert!((ranked[0].score() - 1.0).abs() < 1e-12);
        assert_eq!(ranked[1].source_index(), 0);
    }

    #[test]
    fn equal_scores_preserve_candidate_order() {
        let corpus = eight_graph_corpus();
        // Two copies of the same degenerate candidate plus one in between.
        let candidates = vec![
            vertex_graph(&["U"]),
            vertex_graph(&["Q"]),
            vertex_graph(&["U"]),
        ];
        let ranked = select_discriminative(candidates, &corpus, &SubsetOracle, max(3))
            .expect("selection succeeds");
        let order: Vec<usize> = ranked.iter().map(RankedPattern::source_index).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn requesting_more_features_than_candidates_returns_all() {
        let corpus = eight_graph_corpus();
        let candidates = vec![vertex_graph(&["P"]), vertex_graph(&["Q"])];
        let ranked = select_discriminative(candidates, &corpus, &SubsetOracle, max(100))
            .expect("selection succeeds");
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn truncates_to_max_features() {
        let corpus = eight_graph_corpus();
        let candidates = vec![
            vertex_graph(&["U"]),
            vertex_graph(&["Q"]),
            vertex_graph(&["P"]),
        ];
        let ranked = select_discriminative(candidates, &corpus, &SubsetOracle, max(1))
            .expect("selection succeeds");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].source_index(), 2);
    }

    #[test]
    fn unlabeled_corpus_is_rejected() {
        let corpus = Corpus::new(vec![vertex_graph(&["P"])]);
        let err = select_discriminative(vec![vertex_graph(&["P"])], &corpus, &SubsetOracle, max(1))
            .expect_err("selection needs labels");
        assert_eq!(err.code(), KasagoErrorCode::MissingLabels);
    }

    #[test]
    fn out_of_domain_label_is_rejected() {
        let corpus = corpus_with_labels(
            vec![vertex_graph(&["P"]), vertex_graph(&["P"])],
            &[1, 3],
        );
        let err = select_discriminative(vec![vertex_graph(&["P"])], &corpus, &SubsetOracle, max(1))
            .expect_err("label 3 is outside the binary domain");
        assert!(matches!(
            err,
            KasagoError::NonBinaryLabel { index: 1, label: 3 }
        ));
    }

    #[test]
    fn degenerate_fallback_is_logged() {
        use kasago_test_support::tracing::RecordingLayer;
        use tracing_subscriber::layer::SubscriberExt;

        let layer = RecordingLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        let corpus = eight_graph_corpus();
        let ranked = tracing::subscriber::with_default(subscriber, || {
            select_discriminative(vec![vertex_graph(&["U"])], &corpus, &SubsetOracle, max(1))
        })
        .expect("selection succeeds");
        assert_eq!(ranked[0].score(), 0.0);

        let logged = layer.events().iter().any(|event| {
            event.level == tracing::Level::DEBUG
                && event
                    .fields
                    .get("message")
                    .is_some_and(|message| message.contains("degenerate contingency table"))
        });
        assert!(logged, "expected a debug event for the degenerate fallback");
    }

    #[test]
    fn oracle_failure_aborts_selection_with_candidate_context() {
        let corpus = corpus_with_labels(vec![vertex_graph(&["P"])], &[1]);
        let err = select_discriminative(
            vec![vertex_graph(&["P"])],
            &corpus,
            &FailingOracle,
            max(1),
        )
        .expect_err("failing oracle must abort selection");
        assert!(matches!(err, KasagoError::Oracle { candidate: 0, .. }));
    }
}
