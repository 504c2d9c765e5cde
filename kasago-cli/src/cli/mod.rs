//! Command-line interface orchestration for the kasago pipeline.
//!
//! Three subcommands cover the pipeline's lifecycle: `split` partitions a
//! labeled corpus into train/test files, `train` mines and selects a
//! discriminative pattern set, and `featurize` turns any corpus into a
//! feature matrix against a persisted pattern set.

mod commands;
mod matrix;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, FeaturizeCommand, SplitCommand, SplitPolicyArg,
    TrainCommand, render_summary, run_cli,
};
pub use matrix::MatrixWriteError;

#[cfg(test)]
mod test_fixtures;
