//! Error types for the kasago core library.
//!
//! Defines the pipeline-level and input-format error enums exposed by the
//! public API, each paired with stable machine-readable error codes, plus a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::{miner::MinerError, oracle::OracleError};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error raised while parsing the line-oriented corpus formats or pairing
/// a corpus with its labels.
///
/// All parse variants carry the 1-based line number of the offending input
/// line.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FormatError {
    /// A vertex or edge line had the wrong number of fields.
    #[error("line {line}: `{directive}` line has {found} fields but expects {expected}")]
    FieldCount {
        /// 1-based line number.
        line: usize,
        /// The directive that introduced the line (`v` or `e`).
        directive: char,
        /// Number of fields the directive requires.
        expected: usize,
        /// Number of fields actually present.
        found: usize,
    },
    /// A numeric field did not parse as an integer of the expected width.
    #[error("line {line}: invalid integer `{token}`")]
    InvalidInt {
        /// 1-based line number.
        line: usize,
        /// The token that failed to parse.
        token: String,
    },
    /// An edge referenced a vertex id not yet declared in the current graph.
    #[error("line {line}: edge references undeclared vertex {vertex}")]
    UnknownVertex {
        /// 1-based line number.
        line: usize,
        /// The undeclared vertex id.
        vertex: u32,
    },
    /// A vertex id was declared twice within one graph.
    #[error("line {line}: vertex id {id} is declared twice")]
    DuplicateVertex {
        /// 1-based line number.
        line: usize,
        /// The repeated vertex id.
        id: u32,
    },
    /// The same unordered vertex pair was connected twice within one graph.
    #[error("line {line}: duplicate edge declaration")]
    DuplicateEdge {
        /// 1-based line number.
        line: usize,
    },
    /// A line started with a directive other than `#`, `v`, or `e`.
    #[error("line {line}: unrecognized directive `{directive}`")]
    UnknownDirective {
        /// 1-based line number.
        line: usize,
        /// The offending leading token.
        directive: String,
    },
    /// The labels file length did not match the graph count it is paired with.
    #[error("labels file has {labels} entries but the corpus has {graphs} graphs")]
    LabelCountMismatch {
        /// Number of graphs in the corpus.
        graphs: usize,
        /// Number of label entries supplied.
        labels: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`FormatError`] variants.
    enum FormatErrorCode for FormatError {
        /// A vertex or edge line had the wrong number of fields.
        FieldCount => FieldCount { .. } => "FORMAT_FIELD_COUNT",
        /// A numeric field did not parse as an integer.
        InvalidInt => InvalidInt { .. } => "FORMAT_INVALID_INT",
        /// An edge referenced an undeclared vertex id.
        UnknownVertex => UnknownVertex { .. } => "FORMAT_UNKNOWN_VERTEX",
        /// A vertex id was declared twice within one graph.
        DuplicateVertex => DuplicateVertex { .. } => "FORMAT_DUPLICATE_VERTEX",
        /// The same unordered vertex pair was connected twice.
        DuplicateEdge => DuplicateEdge { .. } => "FORMAT_DUPLICATE_EDGE",
        /// A line started with an unknown directive.
        UnknownDirective => UnknownDirective { .. } => "FORMAT_UNKNOWN_DIRECTIVE",
        /// Labels file length did not match the graph count.
        LabelCountMismatch => LabelCountMismatch { .. } => "FORMAT_LABEL_COUNT_MISMATCH",
    }
}

/// Error type produced when configuring or running the selection pipeline.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum KasagoError {
    /// The support fraction must lie in `(0, 1]`.
    #[error("support_fraction must lie in (0, 1] (got {got})")]
    InvalidSupportFraction {
        /// The invalid fraction supplied by the caller.
        got: f64,
    },
    /// The minimum pattern vertex count must be at least one.
    #[error("min_pattern_vertices must be at least 1 (got {got})")]
    InvalidMinPatternVertices {
        /// The invalid count supplied by the caller.
        got: usize,
    },
    /// The maximum feature count must be at least one.
    #[error("max_features must be at least 1 (got {got})")]
    InvalidMaxFeatures {
        /// The invalid count supplied by the caller.
        got: usize,
    },
    /// The supplied corpus contained no graphs.
    #[error("corpus contains no graphs")]
    EmptyCorpus,
    /// A labeled operation was invoked on a corpus without labels.
    #[error("corpus carries no class labels")]
    MissingLabels,
    /// Pattern selection requires class labels drawn from `{0, 1}`.
    #[error("label {label} at corpus index {index} is outside {{0, 1}}")]
    NonBinaryLabel {
        /// Corpus index of the offending example.
        index: usize,
        /// The out-of-domain label value.
        label: u8,
    },
    /// The external pattern miner failed; no partial results are usable.
    #[error("pattern mining failed: {source}")]
    Miner {
        /// Underlying miner failure.
        #[from]
        source: MinerError,
    },
    /// The presence oracle failed while evaluating a candidate pattern.
    #[error("presence oracle failed on candidate {candidate}: {source}")]
    Oracle {
        /// Index of the candidate or pattern being evaluated.
        candidate: usize,
        /// Underlying oracle failure.
        #[source]
        source: OracleError,
    },
}

define_error_codes! {
    /// Stable codes describing [`KasagoError`] variants.
    enum KasagoErrorCode for KasagoError {
        /// The support fraction must lie in `(0, 1]`.
        InvalidSupportFraction => InvalidSupportFraction { .. } => "KASAGO_INVALID_SUPPORT_FRACTION",
        /// The minimum pattern vertex count must be at least one.
        InvalidMinPatternVertices => InvalidMinPatternVertices { .. } => "KASAGO_INVALID_MIN_PATTERN_VERTICES",
        /// The maximum feature count must be at least one.
        InvalidMaxFeatures => InvalidMaxFeatures { .. } => "KASAGO_INVALID_MAX_FEATURES",
        /// The supplied corpus contained no graphs.
        EmptyCorpus => EmptyCorpus => "KASAGO_EMPTY_CORPUS",
        /// A labeled operation was invoked on an unlabeled corpus.
        MissingLabels => MissingLabels => "KASAGO_MISSING_LABELS",
        /// A class label fell outside the binary domain.
        NonBinaryLabel => NonBinaryLabel { .. } => "KASAGO_NON_BINARY_LABEL",
        /// The external pattern miner failed.
        MinerFailure => Miner { .. } => "KASAGO_MINER_FAILURE",
        /// The presence oracle failed.
        OracleFailure => Oracle { .. } => "KASAGO_ORACLE_FAILURE",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, KasagoError>;
