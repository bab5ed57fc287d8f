//! Case-base and lab-record file loading
//!
//! Files are read as JSON arrays of row objects or as Parquet files with one
//! column per field. Parquet rows are deserialized with `serde_arrow` into
//! the same record types as JSON, so both formats share one validation path.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use arrow::datatypes::FieldRef;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::de::DeserializeOwned;
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::error::util::{safe_open_file, safe_read_to_string};
use crate::error::{CbrError, Result};
use crate::ingest::lab_record::LabRecord;
use crate::ingest::record::CaseRecord;
use crate::models::Case;
use crate::utils::logging::{
    create_row_progress_bar, finish_progress_bar, log_operation_complete, log_operation_start,
    log_warning,
};

/// On-disk formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// A JSON array of row objects
    Json,
    /// A Parquet file
    Parquet,
}

impl DataFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(CbrError::configuration(format!(
                "Unsupported file format for {} (expected .json or .parquet)",
                path.display()
            ))),
        }
    }
}

/// Read every row of a JSON array file
pub fn read_json_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = safe_read_to_string(path, "reading JSON rows")?;
    Ok(serde_json::from_str(&content)?)
}

/// Read every row of a Parquet file
pub fn read_parquet_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = safe_open_file(path, "reading Parquet rows")?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;
        let mut batch_rows: Vec<T> = serde_arrow::from_record_batch(&batch)?;
        rows.append(&mut batch_rows);
    }
    Ok(rows)
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    match DataFormat::from_path(path)? {
        DataFormat::Json => read_json_rows(path),
        DataFormat::Parquet => read_parquet_rows(path),
    }
}

/// Load a normalized case base, validating every row
///
/// The result still needs `CaseStore::build` for store-level checks such as
/// duplicate ids.
pub fn load_case_base(path: &Path) -> Result<Vec<Case>> {
    let start = Instant::now();
    log_operation_start("Loading case base from", path);

    let records: Vec<CaseRecord> = read_rows(path)?;
    if records.is_empty() {
        log_warning("Case base file has no rows", Some(path));
    }
    let pb = create_row_progress_bar(records.len(), Some("Validating cases"));
    let cases = records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            pb.inc(1);
            record.into_case(row)
        })
        .collect::<Result<Vec<_>>>()?;
    finish_progress_bar(&pb, None);

    log_operation_complete("loaded", path, cases.len(), Some(start.elapsed()));
    Ok(cases)
}

/// Load raw hematology records
pub fn load_lab_records(path: &Path) -> Result<Vec<LabRecord>> {
    let start = Instant::now();
    log_operation_start("Loading lab records from", path);

    let records: Vec<LabRecord> = read_rows(path)?;
    if records.is_empty() {
        log_warning("No lab records found in", Some(path));
    }

    log_operation_complete("loaded", path, records.len(), Some(start.elapsed()));
    Ok(records)
}

/// Write cases as a JSON array in the normalized case schema
pub fn write_case_base_json(cases: &[Case], path: &Path) -> Result<()> {
    let records: Vec<CaseRecord> = cases.iter().map(CaseRecord::from).collect();
    let file = File::create(path).map_err(|e| CbrError::io(path, e))?;
    serde_json::to_writer_pretty(file, &records)?;
    log_operation_complete("wrote", path, records.len(), None);
    Ok(())
}

/// Write cases as a Parquet file in the normalized case schema
pub fn write_case_base_parquet(cases: &[Case], path: &Path) -> Result<()> {
    let records: Vec<CaseRecord> = cases.iter().map(CaseRecord::from).collect();
    let fields = Vec::<FieldRef>::from_type::<CaseRecord>(
        TracingOptions::default().allow_null_fields(true),
    )?;
    let batch = serde_arrow::to_record_batch(&fields, &records)?;

    let file = File::create(path).map_err(|e| CbrError::io(path, e))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    log_operation_complete("wrote", path, records.len(), None);
    Ok(())
}
