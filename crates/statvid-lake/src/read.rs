//! Loads bronze artifacts back into Arrow record batches.

use std::fs::File;
use std::path::Path;

use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::LakeError;

/// Reads every record batch of a parquet file.
///
/// # Errors
///
/// Returns [`LakeError::Io`] if the file cannot be opened, or a parquet/arrow
/// error if it is not a valid parquet file.
pub fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, LakeError> {
    let file = File::open(path).map_err(|e| LakeError::io(path, e))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    Ok(reader.collect::<Result<Vec<_>, _>>()?)
}

/// Row count from the parquet footer, without decoding any pages.
///
/// # Errors
///
/// Same as [`read_batches`].
pub fn count_rows(path: &Path) -> Result<usize, LakeError> {
    let file = File::open(path).map_err(|e| LakeError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let rows = builder.metadata().file_metadata().num_rows();
    Ok(usize::try_from(rows).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_batches(&dir.path().join("nope.parquet")).unwrap_err();
        assert!(matches!(err, LakeError::Io { .. }));
    }

    #[test]
    fn non_parquet_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.parquet");
        std::fs::write(&path, b"not parquet").unwrap();
        assert!(matches!(
            count_rows(&path).unwrap_err(),
            LakeError::Parquet(_)
        ));
    }
}
