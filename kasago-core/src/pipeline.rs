//! Pipeline orchestration: mine, select, featurize.
//!
//! [`Kasago`] ties the capability traits together for a training run
//! (mine candidates, rank them, return the pattern set) and a featurization
//! run (turn any corpus into a feature matrix against a fixed pattern set).
//! Persistence of the resulting artifacts lives with the caller; the
//! orchestrator itself never touches the filesystem.

use std::num::NonZeroUsize;

use tracing::{info, instrument};

use crate::{
    corpus::Corpus,
    error::{KasagoError, Result},
    features::{self, FeatureMatrix},
    miner::{MineParams, PatternMiner},
    oracle::PresenceOracle,
    pattern_set::PatternSet,
    selector,
};

const DEFAULT_SUPPORT_FRACTION: f64 = 0.5;
const DEFAULT_MIN_PATTERN_VERTICES: usize = 2;
const DEFAULT_MAX_FEATURES: usize = 100;

/// Configures and constructs [`Kasago`] instances.
///
/// # Examples
/// ```
/// use kasago_core::KasagoBuilder;
///
/// let kasago = KasagoBuilder::new()
///     .with_support_fraction(0.4)
///     .with_max_features(25)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(kasago.max_features().get(), 25);
/// ```
#[derive(Clone, Debug)]
pub struct KasagoBuilder {
    support_fraction: f64,
    min_pattern_vertices: usize,
    max_features: usize,
}

impl Default for KasagoBuilder {
    fn default() -> Self {
        Self {
            support_fraction: DEFAULT_SUPPORT_FRACTION,
            min_pattern_vertices: DEFAULT_MIN_PATTERN_VERTICES,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl KasagoBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the fraction of corpus graphs a mined candidate must occur
    /// in; the absolute support count is derived per corpus.
    #[must_use]
    pub fn with_support_fraction(mut self, fraction: f64) -> Self {
        self.support_fraction = fraction;
        self
    }

    /// Returns the configured support fraction.
    #[must_use]
    pub fn support_fraction(&self) -> f64 {
        self.support_fraction
    }

    /// Overrides the minimum vertex count of mined candidates.
    #[must_use]
    pub fn with_min_pattern_vertices(mut self, vertices: usize) -> Self {
        self.min_pattern_vertices = vertices;
        self
    }

    /// Returns the configured minimum pattern vertex count.
    #[must_use]
    pub fn min_pattern_vertices(&self) -> usize {
        self.min_pattern_vertices
    }

    /// Overrides the number of patterns kept by selection.
    #[must_use]
    pub fn with_max_features(mut self, features: usize) -> Self {
        self.max_features = features;
        self
    }

    /// Returns the configured maximum feature count.
    #[must_use]
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Validates the configuration and constructs a [`Kasago`] instance.
    ///
    /// # Errors
    /// Returns [`KasagoError::InvalidSupportFraction`] when the fraction is
    /// not in `(0, 1]`, and [`KasagoError::InvalidMinPatternVertices`] /
    /// [`KasagoError::InvalidMaxFeatures`] when either count is zero.
    pub fn build(self) -> Result<Kasago> {
        if !self.support_fraction.is_finite()
            || self.support_fraction <= 0.0
            || self.support_fraction > 1.0
        {
            return Err(KasagoError::InvalidSupportFraction {
                got: self.support_fraction,
            });
        }
        let min_pattern_vertices = NonZeroUsize::new(self.min_pattern_vertices).ok_or(
            KasagoError::InvalidMinPatternVertices {
                got: self.min_pattern_vertices,
            },
        )?;
        let max_features =
            NonZeroUsize::new(self.max_features).ok_or(KasagoError::InvalidMaxFeatures {
                got: self.max_features,
            })?;

        Ok(Kasago {
            support_fraction: self.support_fraction,
            min_pattern_vertices,
            max_features,
        })
    }
}

/// Entry point for training and featurization runs.
#[derive(Clone, Debug)]
pub struct Kasago {
    support_fraction: f64,
    min_pattern_vertices: NonZeroUsize,
    max_features: NonZeroUsize,
}

impl Kasago {
    /// Returns the configured support fraction.
    #[must_use]
    pub fn support_fraction(&self) -> f64 {
        self.support_fraction
    }

    /// Returns the minimum vertex count requested from the miner.
    #[must_use]
    pub fn min_pattern_vertices(&self) -> NonZeroUsize {
        self.min_pattern_vertices
    }

    /// Returns the number of patterns kept by selection.
    #[must_use]
    pub fn max_features(&self) -> NonZeroUsize {
        self.max_features
    }

    /// Returns the absolute support threshold for a corpus of `corpus_len`
    /// graphs: `ceil(support_fraction * corpus_len)`, and at least one.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::float_arithmetic,
        reason = "The support threshold is derived from a fractional knob."
    )]
    #[must_use]
    pub fn min_support_for(&self, corpus_len: usize) -> usize {
        let raw = ((corpus_len as f64) * self.support_fraction).ceil() as usize;
        raw.max(1)
    }

    /// Runs a training pass: mine candidates, rank them by class
    /// correlation, and return the selected pattern set.
    ///
    /// The returned set's order is permanent — it defines the feature
    /// indices every later featurization must use.
    ///
    /// # Errors
    /// Returns [`KasagoError::EmptyCorpus`] / [`KasagoError::MissingLabels`]
    /// for unusable corpora, [`KasagoError::Miner`] when the external miner
    /// fails (fatal, nothing is persisted), and selection errors from
    /// [`selector::select_discriminative`].
    #[instrument(
        name = "kasago.train",
        err,
        skip(self, corpus, miner, oracle),
        fields(corpus_len = corpus.len(), miner = miner.name(), oracle = oracle.name()),
    )]
    pub fn train<M, O>(&self, corpus: &Corpus, miner: &M, oracle: &O) -> Result<PatternSet>
    where
        M: PatternMiner,
        O: PresenceOracle + Sync,
    {
        if corpus.is_empty() {
            return Err(KasagoError::EmptyCorpus);
        }
        if corpus.labels().is_none() {
            return Err(KasagoError::MissingLabels);
        }

        let min_support = self.min_support_for(corpus.len());
        let params = MineParams::new(min_support, self.min_pattern_vertices.get());
        let candidates = miner.mine(corpus, &params)?;
        info!(
            candidates = candidates.len(),
            min_support, "mined candidate patterns"
        );

        let ranked = selector::select_discriminative(candidates, corpus, oracle, self.max_features)?;
        info!(selected = ranked.len(), "selected discriminative patterns");
        Ok(PatternSet::from_ranked(ranked))
    }

    /// Featurizes a corpus against a previously selected pattern set.
    ///
    /// # Errors
    /// Returns [`KasagoError::Oracle`] when a presence check fails.
    #[instrument(
        name = "kasago.featurize",
        err,
        skip(self, corpus, patterns, oracle),
        fields(corpus_len = corpus.len(), patterns = patterns.len(), oracle = oracle.name()),
    )]
    pub fn featurize<O>(
        &self,
        corpus: &Corpus,
        patterns: &PatternSet,
        oracle: &O,
    ) -> Result<FeatureMatrix>
    where
        O: PresenceOracle,
    {
        let matrix = features::featurize_corpus(corpus, patterns, oracle)?;
        info!(rows = matrix.rows(), columns = matrix.columns(), "featurized corpus");
        Ok(matrix)
    }
}

