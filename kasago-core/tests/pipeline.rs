mod tests {
    use kasago_test_support::{
        graphs::{corpus_with_labels, vertex_graph},
        stubs::{StaticMiner, SubsetOracle},
    };
    use rstest::rstest;

    use super::*;
    use crate::error::KasagoErrorCode;

    fn labeled_corpus(len: usize) -> Corpus {
        let graphs = (0..len)
            .map(|index| {
                if index % 2 == 0 {
                    vertex_graph(&["P"])
                } else {
                    vertex_graph(&["N"])
                }
            })
            .collect();
        let labels: Vec<u8> = (0..len).map(|index| u8::from(index % 2 == 0)).collect();
        corpus_with_labels(graphs, &labels)
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-0.5)]
    #[case::above_one(1.5)]
    #[case::nan(f64::NAN)]
    fn builder_rejects_bad_support_fractions(#[case] fraction: f64) {
        let err = KasagoBuilder::new()
            .with_support_fraction(fraction)
            .build()
            .expect_err("fraction outside (0, 1] is invalid");
        assert_eq!(err.code(), KasagoErrorCode::InvalidSupportFraction);
    }

    #[test]
    fn builder_rejects_zero_counts() {
        let err = KasagoBuilder::new()
            .with_max_features(0)
            .build()
            .expect_err("zero features is invalid");
        assert_eq!(err.code(), KasagoErrorCode::InvalidMaxFeatures);

        let err = KasagoBuilder::new()
            .with_min_pattern_vertices(0)
            .build()
            .expect_err("zero vertices is invalid");
        assert_eq!(err.code(), KasagoErrorCode::InvalidMinPatternVertices);
    }

    #[test]
    fn builder_defaults_match_the_reference_configuration() {
        let kasago = KasagoBuilder::new().build().expect("defaults are valid");
        assert!((kasago.support_fraction() - 0.5).abs() < f64::EPSILON);
        assert_eq!(kasago.min_pattern_vertices().get(), 2);
        assert_eq!(kasago.max_features().get(), 100);
    }

    #[rstest]
    #[case::rounds_up(0.5, 5, 3)]
    #[case::exact(0.5, 4, 2)]
    #[case::full_corpus(1.0, 3, 3)]
    #[case::at_least_one(0.1, 1, 1)]
    fn min_support_scales_with_corpus_size(
        #[case] fraction: f64,
        #[case] corpus_len: usize,
        #[case] expected: usize,
    ) {
        let kasago = KasagoBuilder::new()
            .with_support_fraction(fraction)
            .build()
            .expect("fraction is valid");
        assert_eq!(kasago.min_support_for(corpus_len), expected);
    }

    #[test]
    fn train_hands_derived_parameters_to_the_miner() {
        let corpus = labeled_corpus(5);
        let miner = StaticMiner::new(vec![vertex_graph(&["P"])]);
        let kasago = KasagoBuilder::new()
            .with_min_pattern_vertices(1)
            .build()
            .expect("configuration is valid");

        let patterns = kasago
            .train(&corpus, &miner, &SubsetOracle)
            .expect("training succeeds");
        assert_eq!(patterns.len(), 1);
        assert_eq!(miner.recorded_params(), vec![MineParams::new(3, 1)]);
    }

    #[test]
    fn train_returns_patterns_in_rank_order() {
        let corpus = labeled_corpus(8);
        // "P" marks every positive example, "N" every negative one, so "P"
        // separates perfectly while "Z" occurs nowhere (degenerate).
        let miner = StaticMiner::new(vec![vertex_graph(&["Z"]), vertex_graph(&["P"])]);
        let kasago = KasagoBuilder::new()
            .with_min_pattern_vertices(1)
            .build()
            .expect("configuration is valid");

        let patterns = kasago
            .train(&corpus, &miner, &SubsetOracle)
            .expect("training succeeds");
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns.get(0), Some(&vertex_graph(&["P"])));
        assert_eq!(patterns.get(1), Some(&vertex_graph(&["Z"])));
    }

    #[test]
    fn train_rejects_empty_and_unlabeled_corpora() {
        let miner = StaticMiner::new(Vec::new());
        let kasago = KasagoBuilder::new().build().expect("defaults are valid");

        let err = kasago
            .train(&Corpus::new(Vec::new()), &miner, &SubsetOracle)
            .expect_err("empty corpus is unusable");
        assert_eq!(err.code(), KasagoErrorCode::EmptyCorpus);

        let err = kasago
            .train(
                &Corpus::new(vec![vertex_graph(&["P"])]),
                &miner,
                &SubsetOracle,
            )
            .expect_err("training needs labels");
        assert_eq!(err.code(), KasagoErrorCode::MissingLabels);
    }

    #[test]
    fn featurize_agrees_with_training_time_vectors() {
        let corpus = labeled_corpus(4);
        let patterns = PatternSet::new(vec![vertex_graph(&["P"]), vertex_graph(&["N"])]);
        let kasago = KasagoBuilder::new().build().expect("defaults are valid");

        let first = kasago
            .featurize(&corpus, &patterns, &SubsetOracle)
            .expect("featurization succeeds");
        let second = kasago
            .featurize(&corpus, &patterns, &SubsetOracle)
            .expect("featurization succeeds");
        assert_eq!(first, second);
        assert_eq!(first.row(0), Some(&[1, 0][..]));
        assert_eq!(first.row(1), Some(&[0, 1][..]));
    }
}
