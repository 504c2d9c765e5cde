//! Binary feature vectors and the dense feature matrix.
//!
//! A graph's feature vector holds one bit per pattern in a fixed
//! [`PatternSet`]; bit `i` records whether pattern `i` occurs in the graph.
//! Vectors are a pure function of `(graph, pattern set, oracle)`, so
//! training-time and inference-time featurization agree by construction.

use thiserror::Error;

use crate::{
    corpus::Corpus,
    error::{KasagoError, Result},
    graph::Graph,
    oracle::PresenceOracle,
    pattern_set::PatternSet,
};

/// A dense row-major matrix of 0/1 feature values.
///
/// Rows follow corpus order, columns follow pattern-set order. The matrix is
/// built once per featurization call and never mutated afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeatureMatrix {
    rows: usize,
    columns: usize,
    data: Vec<u8>,
}

/// Error raised when assembling a [`FeatureMatrix`] from explicit rows.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum FeatureMatrixError {
    /// A row's length did not match the expected column count.
    #[error("row {row} has length {actual} but expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Expected column count.
        expected: usize,
        /// Actual row length.
        actual: usize,
    },
}

impl FeatureMatrix {
    /// Builds a matrix from explicit rows of `columns` bits each.
    ///
    /// # Errors
    /// Returns [`FeatureMatrixError::RaggedRow`] when any row's length
    /// differs from `columns`.
    ///
    /// # Examples
    /// ```
    /// use kasago_core::FeatureMatrix;
    ///
    /// let matrix = FeatureMatrix::try_from_rows(2, vec![vec![1, 0], vec![0, 1]])?;
    /// assert_eq!(matrix.rows(), 2);
    /// assert_eq!(matrix.row(0), Some(&[1, 0][..]));
    /// # Ok::<(), kasago_core::FeatureMatrixError>(())
    /// ```
    pub fn try_from_rows(
        columns: usize,
        rows: Vec<Vec<u8>>,
    ) -> core::result::Result<Self, FeatureMatrixError> {
        let row_count = rows.len();
        let mut data = Vec::with_capacity(row_count.saturating_mul(columns));
        for (row, bits) in rows.into_iter().enumerate() {
            if bits.len() != columns {
                return Err(FeatureMatrixError::RaggedRow {
                    row,
                    expected: columns,
                    actual: bits.len(),
                });
            }
            data.extend(bits);
        }
        Ok(Self {
            rows: row_count,
            columns,
            data,
        })
    }

    /// Internal constructor for rows known to be uniform.
    pub(crate) fn from_parts(rows: usize, columns: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), rows.saturating_mul(columns));
        Self {
            rows,
            columns,
            data,
        }
    }

    /// Returns the number of rows (graphs).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns (patterns).
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns row `index`, or `None` when out of bounds.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[u8]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.columns;
        self.data.get(start..start + self.columns)
    }

    /// Returns the underlying row-major buffer.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Iterates rows in corpus order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.rows).map(move |index| {
            let start = index * self.columns;
            &self.data[start..start + self.columns]
        })
    }
}

/// Computes one graph's binary feature vector against a pattern set.
///
/// # Errors
/// Returns [`KasagoError::Oracle`] carrying the pattern index when a
/// presence check fails; the failure is never coerced to an absent bit.
pub fn featurize<O>(graph: &Graph, patterns: &PatternSet, oracle: &O) -> Result<Vec<u8>>
where
    O: PresenceOracle,
{
    patterns
        .iter()
        .enumerate()
        .map(|(index, pattern)| {
            oracle
                .contains(graph, pattern)
                .map(u8::from)
                .map_err(|source| KasagoError::Oracle {
                    candidate: index,
                    source,
                })
        })
        .collect()
}

/// Featurizes every graph of a corpus, preserving corpus order as row order.
///
/// # Errors
/// Returns [`KasagoError::Oracle`] when any presence check fails.
pub fn featurize_corpus<O>(
    corpus: &Corpus,
    patterns: &PatternSet,
    oracle: &O,
) -> Result<FeatureMatrix>
where
    O: PresenceOracle,
{
    let mut data = Vec::with_capacity(corpus.len().saturating_mul(patterns.len()));
    for graph in corpus.graphs() {
        data.extend(featurize(graph, patterns, oracle)?);
    }
    Ok(FeatureMatrix::from_parts(corpus.len(), patterns.len(), data))
}

