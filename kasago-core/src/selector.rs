//! Discriminative pattern selection.
//!
//! Every candidate is scored by how strongly its presence correlates with
//! the class label across the corpus. Candidates are evaluated in parallel;
//! each worker sees one candidate plus read-only corpus data, and the merged
//! results are re-sorted deterministically, so the ranking is identical to a
//! sequential evaluation.

use std::num::NonZeroUsize;

use rayon::prelude::*;
use tracing::debug;

use crate::{
    corpus::Corpus,
    error::{KasagoError, Result},
    graph::Graph,
    oracle::PresenceOracle,
    stats::ContingencyTable,
};

/// A candidate pattern with its discriminative score.
#[derive(Clone, Debug)]
pub struct RankedPattern {
    pattern: Graph,
    score: f64,
    source_index: usize,
}

impl RankedPattern {
    /// Returns the pattern graph.
    #[must_use]
    pub fn pattern(&self) -> &Graph {
        &self.pattern
    }

    /// Returns the chi-square score (or the degenerate-table fallback `0.0`).
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Returns the pattern's index in the miner's candidate order.
    #[must_use]
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Consumes the ranking entry, yielding the pattern graph.
    #[must_use]
    pub fn into_pattern(self) -> Graph {
        self.pattern
    }
}

/// Ranks `candidates` by class correlation and keeps the strongest
/// `max_features`.
///
/// The result is ordered by descending score; candidates with equal scores
/// retain their original relative order. A `max_features` larger than the
/// candidate count returns all candidates, fully ranked.
///
/// A degenerate contingency table (a pattern present or absent across an
/// entire class or the whole corpus) falls back to a score of `0.0` and is
/// logged; it never aborts selection.
///
/// # Errors
/// Returns [`KasagoError::MissingLabels`] when the corpus has no labels,
/// [`KasagoError::NonBinaryLabel`] when a label falls outside `{0, 1}`, and
/// [`KasagoError::Oracle`] when a presence check fails.
pub fn select_discriminative<O>(
    candidates: Vec<Graph>,
    corpus: &Corpus,
    oracle: &O,
    max_features: NonZeroUsize,
) -> Result<Vec<RankedPattern>>
where
    O: PresenceOracle + Sync,
{
    let labels = corpus.labels().ok_or(KasagoError::MissingLabels)?;
    if let Some((index, &label)) = labels.iter().enumerate().find(|&(_, &label)| label > 1) {
        return Err(KasagoError::NonBinaryLabel { index, label });
    }

    let scored: Vec<ScoredCandidate> = candidates
        .into_par_iter()
        .enumerate()
        .map(|(source_index, pattern)| {
            score_candidate(source_index, pattern, corpus.graphs(), labels, oracle)
        })
        .collect::<Result<_>>()?;

    // Degenerate fallbacks resolve after the parallel merge so the log
    // stream follows candidate order.
    let mut ranked: Vec<RankedPattern> = scored
        .into_iter()
        .map(|candidate| {
            let ScoredCandidate {
                pattern,
                statistic,
                source_index,
            } = candidate;
            let score = statistic.unwrap_or_else(|| {
                debug!(
                    candidate = source_index,
                    "degenerate contingency table, falling back to zero score"
                );
                0.0
            });
            RankedPattern {
                pattern,
                score,
                source_index,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.source_index.cmp(&b.source_index))
    });
    ranked.truncate(max_features.get());
    Ok(ranked)
}

/// Per-candidate evaluation result before the degenerate fallback resolves.
struct ScoredCandidate {
    pattern: Graph,
    statistic: Option<f64>,
    source_index: usize,
}

fn score_candidate<O>(
    source_index: usize,
    pattern: Graph,
    graphs: &[Graph],
    labels: &[u8],
    oracle: &O,
) -> Result<ScoredCandidate>
where
    O: PresenceOracle + Sync,
{
    let mut table = ContingencyTable::default();
    for (graph, &label) in graphs.iter().zip(labels) {
        let present = oracle
            .contains(graph, &pattern)
            .map_err(|source| KasagoError::Oracle {
                candidate: source_index,
                source,
            })?;
        table.record(label == 1, present);
    }

    Ok(ScoredCandidate {
        pattern,
        statistic: table.chi_square(),
        source_index,
    })
}

