//! Kasago core library.
//!
//! Discriminative-subgraph feature extraction for graph classification:
//! parse labeled graph corpora, mine candidate subgraphs through an external
//! miner, rank candidates by chi-square class correlation, and turn graphs
//! into fixed-length binary feature vectors against the selected pattern
//! set. The frequent-subgraph miner and the subgraph-isomorphism test are
//! capability interfaces ([`PatternMiner`], [`PresenceOracle`]); provider
//! crates supply concrete backends.

mod corpus;
mod error;
mod features;
mod format;
mod graph;
mod miner;
mod oracle;
mod pattern_set;
mod pipeline;
mod selector;
mod stats;

pub use crate::{
    corpus::{Corpus, SplitError, SplitPolicy},
    error::{FormatError, FormatErrorCode, KasagoError, KasagoErrorCode, Result},
    features::{FeatureMatrix, FeatureMatrixError, featurize, featurize_corpus},
    format::{parse_corpus, parse_labels, write_corpus, write_labels},
    graph::{Edge, Graph, GraphBuilder, GraphError, Vertex},
    miner::{MineParams, MinerError, PatternMiner},
    oracle::{OracleError, PresenceOracle},
    pattern_set::PatternSet,
    pipeline::{Kasago, KasagoBuilder},
    selector::{RankedPattern, select_discriminative},
};
