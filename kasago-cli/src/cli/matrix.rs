//! Feature-matrix persistence as a Parquet artifact.
//!
//! The matrix is written as a single `features: FixedSizeList<Float32, K>`
//! column, rows in corpus order and bits rendered as `0.0`/`1.0`, so any
//! dense-matrix consumer can ingest it without knowing about graphs.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array, RecordBatch};
use arrow_schema::{ArrowError, DataType, Field, Schema};
use kasago_core::FeatureMatrix;
use parquet::arrow::arrow_writer::ArrowWriter;
use thiserror::Error;

/// Errors raised while persisting a feature matrix.
#[derive(Debug, Error)]
pub enum MatrixWriteError {
    /// A matrix without columns has no representable row type.
    #[error("feature matrix has no columns; nothing to persist")]
    NoColumns,
    /// The column count exceeds the Parquet list-size range.
    #[error("feature matrix has {columns} columns, beyond the supported range")]
    ColumnOverflow {
        /// The unrepresentable column count.
        columns: usize,
    },
    /// Creating the output file failed.
    #[error("failed to create `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Arrow rejected the record batch.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// The Parquet writer failed.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

/// Writes `matrix` to `path` as a Parquet file.
///
/// # Errors
/// Returns [`MatrixWriteError`] when the matrix shape is unrepresentable or
/// any filesystem, Arrow, or Parquet operation fails.
pub(super) fn write_matrix(path: &Path, matrix: &FeatureMatrix) -> Result<(), MatrixWriteError> {
    if matrix.columns() == 0 {
        return Err(MatrixWriteError::NoColumns);
    }
    let columns = i32::try_from(matrix.columns()).map_err(|_| MatrixWriteError::ColumnOverflow {
        columns: matrix.columns(),
    })?;

    let item_field = Arc::new(Field::new("item", DataType::Float32, false));
    let list_type = DataType::FixedSizeList(item_field.clone(), columns);
    let schema = Arc::new(Schema::new(vec![Field::new("features", list_type, false)]));

    let values = Float32Array::from(
        matrix
            .data()
            .iter()
            .map(|&bit| f32::from(bit))
            .collect::<Vec<f32>>(),
    );
    let list = FixedSizeListArray::new(item_field, columns, Arc::new(values) as ArrayRef, None);
    let batch = RecordBatch::try_new(schema.clone(), vec![Arc::new(list) as ArrayRef])?;

    let file = File::create(path).map_err(|source| MatrixWriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
