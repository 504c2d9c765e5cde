//! Pattern miner adapting an external gSpan-compatible executable.
//!
//! The adapter renders the corpus into the miner's numeric transaction
//! format (string labels interned to dense codes), invokes the executable
//! with an absolute support threshold, and decodes the pattern stream from
//! its stdout back into the graph model. The invocation blocks with no
//! built-in timeout; callers that need one should impose it around the
//! training run.

mod labels;
mod output;
mod transaction;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use kasago_core::{Corpus, Graph, MineParams, MinerError, PatternMiner};
use tempfile::NamedTempFile;

use crate::labels::LabelTables;

/// Invokes an external miner as `<exe> -f <transactions> -s <min_support>
/// -m <min_vertices>`, reading candidate patterns from its stdout.
///
/// Output-file based miners can be bridged with a small shim script; the
/// adapter itself stays process-agnostic. Candidates are returned in the
/// miner's emission order, undeduplicated — ranking them is the selector's
/// job. Every failure is fatal: no partial candidate list is ever returned.
#[derive(Clone, Debug)]
pub struct GspanMiner {
    executable: PathBuf,
}

impl GspanMiner {
    /// Creates an adapter around the given miner executable.
    #[must_use]
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Returns the configured executable path.
    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl PatternMiner for GspanMiner {
    fn name(&self) -> &str {
        "gspan"
    }

    fn mine(&self, corpus: &Corpus, params: &MineParams) -> Result<Vec<Graph>, MinerError> {
        let mut tables = LabelTables::default();
        let mut transactions =
            NamedTempFile::new().map_err(|source| MinerError::Io { source })?;
        transaction::write_transactions(corpus, &mut tables, &mut transactions)
            .map_err(|source| MinerError::Io { source })?;
        transactions
            .flush()
            .map_err(|source| MinerError::Io { source })?;

        let output = Command::new(&self.executable)
            .arg("-f")
            .arg(transactions.path())
            .arg("-s")
            .arg(params.min_support().to_string())
            .arg("-m")
            .arg(params.min_vertices().to_string())
            .output()
            .map_err(|source| MinerError::Launch {
                miner: self.executable.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(MinerError::Failed {
                miner: self.executable.display().to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        output::parse_patterns(&stdout, &tables)
    }
}
