//! Command implementations and argument parsing for the kasago CLI.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use kasago_core::{
    Corpus, FormatError, Graph, KasagoBuilder, KasagoError, PatternSet, SplitError, SplitPolicy,
    featurize_corpus, parse_corpus, parse_labels, write_corpus, write_labels,
};
use kasago_providers_gspan::GspanMiner;
use kasago_providers_vf2::Vf2Oracle;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::matrix::{self, MatrixWriteError};

const DEFAULT_SUPPORT_FRACTION: f64 = 0.5;
const DEFAULT_MIN_PATTERN_VERTICES: usize = 2;
const DEFAULT_MAX_FEATURES: usize = 100;
const DEFAULT_TEST_FRACTION: f64 = 0.2;
const DEFAULT_SPLIT_SEED: u64 = 0;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "kasago", about = "Discriminative subgraph feature extraction.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Partition a labeled corpus into train/test files.
    Split(SplitCommand),
    /// Mine candidates and persist the selected pattern set.
    Train(TrainCommand),
    /// Featurize a corpus against a persisted pattern set.
    Featurize(FeaturizeCommand),
}

/// Options accepted by the `split` command.
#[derive(Debug, Args, Clone)]
pub struct SplitCommand {
    /// Path to the corpus file in the graph text format.
    #[arg(long)]
    pub graphs: PathBuf,

    /// Path to the labels file, one integer per line.
    #[arg(long)]
    pub labels: PathBuf,

    /// Directory receiving `train.txt`, `train_labels.txt`, `test.txt`, and
    /// `test_labels.txt`.
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Fraction of examples held out for the test subset.
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    pub test_fraction: f64,

    /// Seed for the random split policy.
    #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
    pub seed: u64,

    /// How test examples are chosen.
    #[arg(long, value_enum, default_value = "random")]
    pub policy: SplitPolicyArg,
}

/// Split policies selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SplitPolicyArg {
    /// Seeded random membership; order within each subset stays positional.
    Random,
    /// The last examples become the test subset.
    Positional,
}

/// Options accepted by the `train` command.
#[derive(Debug, Args, Clone)]
pub struct TrainCommand {
    /// Path to the training corpus in the graph text format.
    #[arg(long)]
    pub graphs: PathBuf,

    /// Path to the training labels, one integer per line.
    #[arg(long)]
    pub labels: PathBuf,

    /// Path to the external gSpan-compatible miner executable.
    #[arg(long)]
    pub miner_bin: PathBuf,

    /// Output path for the selected pattern set (JSON).
    #[arg(long)]
    pub output: PathBuf,

    /// Fraction of corpus graphs a mined candidate must occur in.
    #[arg(long, default_value_t = DEFAULT_SUPPORT_FRACTION)]
    pub support_fraction: f64,

    /// Minimum vertex count of mined candidates.
    #[arg(long, default_value_t = DEFAULT_MIN_PATTERN_VERTICES)]
    pub min_pattern_vertices: usize,

    /// Number of discriminative patterns to keep.
    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    pub max_features: usize,
}

/// Options accepted by the `featurize` command.
#[derive(Debug, Args, Clone)]
pub struct FeaturizeCommand {
    /// Path to the corpus to featurize, in the graph text format.
    #[arg(long)]
    pub graphs: PathBuf,

    /// Path to the persisted pattern set (JSON).
    #[arg(long)]
    pub patterns: PathBuf,

    /// Output path for the feature matrix (Parquet).
    #[arg(long)]
    pub output: PathBuf,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input or writing an artifact.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An input file violated the corpus text format.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// Core pipeline orchestration failed.
    #[error(transparent)]
    Core(#[from] KasagoError),
    /// The split policy was invalid.
    #[error(transparent)]
    Split(#[from] SplitError),
    /// A pattern-set file could not be encoded or decoded.
    #[error("invalid pattern set `{path}`: {source}")]
    PatternSetJson {
        /// Path of the pattern-set file.
        path: PathBuf,
        /// Underlying serde failure.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the feature matrix failed.
    #[error(transparent)]
    Matrix(#[from] MatrixWriteError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Outcome of `split`.
    Split {
        /// Directory the four split files were written to.
        out_dir: PathBuf,
        /// Number of training examples.
        train_examples: usize,
        /// Number of held-out examples.
        test_examples: usize,
    },
    /// Outcome of `train`.
    Train {
        /// Path of the persisted pattern set.
        output: PathBuf,
        /// Number of selected patterns.
        selected: usize,
    },
    /// Outcome of `featurize`.
    Featurize {
        /// Path of the persisted feature matrix.
        output: PathBuf,
        /// Number of matrix rows (graphs).
        rows: usize,
        /// Number of matrix columns (patterns).
        columns: usize,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when parsing or execution fails.
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Split(split) => {
            span.record("command", field::display("split"));
            run_split(split)
        }
        Command::Train(train) => {
            span.record("command", field::display("train"));
            run_train(train)
        }
        Command::Featurize(featurize) => {
            span.record("command", field::display("featurize"));
            run_featurize(featurize)
        }
    }
}

#[instrument(
    name = "cli.split",
    err,
    skip(command),
    fields(graphs = field::Empty, policy = field::Empty),
)]
fn run_split(command: SplitCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("graphs", field::display(command.graphs.display()));

    let corpus = load_labeled_corpus(&command.graphs, &command.labels)?;
    let policy = match command.policy {
        SplitPolicyArg::Random => {
            span.record("policy", field::display("random"));
            SplitPolicy::Random {
                test_fraction: command.test_fraction,
                seed: command.seed,
            }
        }
        SplitPolicyArg::Positional => {
            span.record("policy", field::display("positional"));
            SplitPolicy::Positional {
                test_fraction: command.test_fraction,
            }
        }
    };
    let (train, test) = corpus.split(policy)?;

    fs::create_dir_all(&command.out_dir).map_err(|source| CliError::Io {
        path: command.out_dir.clone(),
        source,
    })?;
    write_corpus_file(&command.out_dir.join("train.txt"), train.graphs())?;
    write_labels_file(
        &command.out_dir.join("train_labels.txt"),
        train.labels().unwrap_or_default(),
    )?;
    write_corpus_file(&command.out_dir.join("test.txt"), test.graphs())?;
    write_labels_file(
        &command.out_dir.join("test_labels.txt"),
        test.labels().unwrap_or_default(),
    )?;

    info!(
        train_examples = train.len(),
        test_examples = test.len(),
        "corpus split persisted"
    );
    Ok(ExecutionSummary::Split {
        out_dir: command.out_dir,
        train_examples: train.len(),
        test_examples: test.len(),
    })
}

#[instrument(
    name = "cli.train",
    err,
    skip(command),
    fields(graphs = field::Empty, miner_bin = field::Empty),
)]
fn run_train(command: TrainCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("graphs", field::display(command.graphs.display()));
    span.record("miner_bin", field::display(command.miner_bin.display()));

    let corpus = load_labeled_corpus(&command.graphs, &command.labels)?;
    let kasago = KasagoBuilder::new()
        .with_support_fraction(command.support_fraction)
        .with_min_pattern_vertices(command.min_pattern_vertices)
        .with_max_features(command.max_features)
        .build()?;
    let miner = GspanMiner::new(&command.miner_bin);
    let patterns = kasago.train(&corpus, &miner, &Vf2Oracle::new())?;

    // Reached only on full success; a failed run persists nothing.
    let file = File::create(&command.output).map_err(|source| CliError::Io {
        path: command.output.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &patterns).map_err(|source| {
        CliError::PatternSetJson {
            path: command.output.clone(),
            source,
        }
    })?;
    writer.flush().map_err(|source| CliError::Io {
        path: command.output.clone(),
        source,
    })?;

    info!(selected = patterns.len(), "pattern set persisted");
    Ok(ExecutionSummary::Train {
        output: command.output,
        selected: patterns.len(),
    })
}

#[instrument(
    name = "cli.featurize",
    err,
    skip(command),
    fields(graphs = field::Empty, patterns = field::Empty),
)]
fn run_featurize(command: FeaturizeCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("graphs", field::display(command.graphs.display()));
    span.record("patterns", field::display(command.patterns.display()));

    let corpus = Corpus::new(parse_corpus(&read_file(&command.graphs)?)?);
    let patterns = load_pattern_set(&command.patterns)?;
    let matrix = featurize_corpus(&corpus, &patterns, &Vf2Oracle::new())?;
    matrix::write_matrix(&command.output, &matrix)?;

    info!(
        rows = matrix.rows(),
        columns = matrix.columns(),
        "feature matrix persisted"
    );
    Ok(ExecutionSummary::Featurize {
        output: command.output,
        rows: matrix.rows(),
        columns: matrix.columns(),
    })
}

fn load_labeled_corpus(graphs: &Path, labels: &Path) -> Result<Corpus, CliError> {
    let parsed_graphs = parse_corpus(&read_file(graphs)?)?;
    let parsed_labels = parse_labels(&read_file(labels)?)?;
    Ok(Corpus::with_labels(parsed_graphs, parsed_labels)?)
}

fn load_pattern_set(path: &Path) -> Result<PatternSet, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::PatternSetJson {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_corpus_file(path: &Path, graphs: &[Graph]) -> Result<(), CliError> {
    let map_io = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(map_io)?;
    let mut writer = BufWriter::new(file);
    write_corpus(graphs, &mut writer).map_err(map_io)?;
    writer.flush().map_err(map_io)
}

fn write_labels_file(path: &Path, labels: &[u8]) -> Result<(), CliError> {
    let map_io = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(map_io)?;
    let mut writer = BufWriter::new(file);
    write_labels(labels, &mut writer).map_err(map_io)?;
    writer.flush().map_err(map_io)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Split {
            out_dir,
            train_examples,
            test_examples,
        } => {
            writeln!(writer, "train examples: {train_examples}")?;
            writeln!(writer, "test examples: {test_examples}")?;
            writeln!(writer, "output directory: {}", out_dir.display())?;
        }
        ExecutionSummary::Train { output, selected } => {
            writeln!(writer, "selected patterns: {selected}")?;
            writeln!(writer, "pattern set: {}", output.display())?;
        }
        ExecutionSummary::Featurize {
            output,
            rows,
            columns,
        } => {
            writeln!(writer, "feature matrix: {rows} x {columns}")?;
            writeln!(writer, "output: {}", output.display())?;
        }
    }
    Ok(())
}
