//! Catalog loading and indexing logic.
//!
//! Loading happens in three steps:
//! 1. Decode the CSV with the `csv` crate and map the header
//! 2. Convert rows to records in parallel (Rayon keeps the input order)
//! 3. Assign or check ids sequentially, then build indices and stats
//!
//! Malformed rows are skipped, counted in the [`LoadReport`] and logged.
//! Only structural problems (missing file, bad header) fail the load.

use crate::error::{DatasetError, Result};
use crate::parser::{self, ColumnMap, ParsedRow};
use crate::types::*;
use csv::{ReaderBuilder, StringRecord};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{info, warn};

impl Catalog {
    /// Load the catalog from a CSV file.
    ///
    /// This is the main entry point used at process start.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading liquor dataset from {:?}", path);

        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DatasetError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => DatasetError::IoError(e),
        })?;

        Self::load_from_reader(file, &path.display().to_string())
    }

    /// Load the catalog from any reader. `source_name` only shows up in
    /// errors and logs.
    pub fn load_from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header = rdr
            .headers()
            .map_err(|e| header_error(e, source_name))?
            .clone();
        let map = ColumnMap::from_header(&header, source_name)?;

        // Decode sequentially; the csv reader is a stream
        let mut rows: Vec<(u64, std::result::Result<StringRecord, String>)> = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let fallback_line = idx as u64 + 2;
            match result {
                Ok(row) => {
                    let line = row.position().map(|p| p.line()).unwrap_or(fallback_line);
                    rows.push((line, Ok(row)));
                }
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                    if e.is_io_error() {
                        if let csv::ErrorKind::Io(io_err) = e.into_kind() {
                            return Err(DatasetError::IoError(io_err));
                        }
                        continue;
                    }
                    rows.push((line, Err(format!("Undecodable row: {}", e))));
                }
            }
        }

        // Convert in parallel; collect() preserves the input order
        let parsed: Vec<(u64, std::result::Result<ParsedRow, String>)> = rows
            .par_iter()
            .map(|(line, row)| {
                let outcome = row
                    .as_ref()
                    .map_err(|reason| reason.clone())
                    .and_then(|row| parser::parse_row(&map, row));
                (*line, outcome)
            })
            .collect();

        let mut report = LoadReport {
            rows_read: rows.len(),
            ..LoadReport::default()
        };
        let records = assign_ids(parsed, &mut report);
        report.rows_loaded = records.len();

        for skipped in &report.skipped {
            warn!(
                "Skipping row at line {} in {}: {}",
                skipped.line, source_name, skipped.reason
            );
        }
        info!(
            "Loaded {} records from {} ({} rows read, {} skipped)",
            report.rows_loaded,
            source_name,
            report.rows_read,
            report.rows_skipped()
        );

        Ok(Self::build(records, report))
    }

    /// Build a catalog from records already in memory.
    ///
    /// Unlike CSV loading this is strict: a blank name or a duplicate id
    /// fails the whole call.
    pub fn from_records(records: Vec<LiquorRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if record.name.trim().is_empty() {
                return Err(DatasetError::Validation(format!(
                    "record {} has an empty name",
                    record.id
                )));
            }
            if !seen.insert(record.id) {
                return Err(DatasetError::Validation(format!(
                    "duplicate record id {}",
                    record.id
                )));
            }
        }

        let report = LoadReport {
            rows_read: records.len(),
            rows_loaded: records.len(),
            skipped: Vec::new(),
        };
        Ok(Self::build(records, report))
    }

    fn build(records: Vec<LiquorRecord>, report: LoadReport) -> Self {
        let mut catalog = Catalog {
            records,
            report,
            ..Catalog::default()
        };
        catalog.build_indices();
        catalog.compute_stats();
        catalog
    }

    /// Build the id and category indices.
    ///
    /// Positions are pushed in load order, so every category list is
    /// ascending.
    fn build_indices(&mut self) {
        let mut id_index = HashMap::with_capacity(self.records.len());
        let mut category_index: HashMap<String, Vec<usize>> = HashMap::new();

        for (pos, record) in self.records.iter().enumerate() {
            id_index.insert(record.id, pos);
            if let Some(category) = &record.category {
                category_index
                    .entry(normalize_key(category))
                    .or_default()
                    .push(pos);
            }
        }

        self.id_index = id_index;
        self.category_index = category_index;
    }

    /// Compute aggregate statistics for the whole catalog
    fn compute_stats(&mut self) {
        let prices: Vec<f64> = self.records.par_iter().filter_map(|r| r.price).collect();

        let category_counts = self
            .category_index
            .iter()
            .map(|(category, positions)| (category.clone(), positions.len()))
            .collect();
        let uncategorized = self.records.iter().filter(|r| r.category.is_none()).count();

        let (min_price, max_price, mean_price) = if prices.is_empty() {
            (None, None, None)
        } else {
            let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
            let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mean = prices.iter().sum::<f64>() / prices.len() as f64;
            (Some(min), Some(max), Some(mean))
        };

        self.stats = CatalogStats {
            record_count: self.records.len(),
            category_counts,
            uncategorized,
            priced_count: prices.len(),
            min_price,
            max_price,
            mean_price,
        };
    }
}

/// Finalize ids in row order.
///
/// Explicit ids are kept but must be unique; later duplicates are skipped.
/// Without an id column, records are numbered 1, 2, 3, ... in catalog order.
fn assign_ids(
    parsed: Vec<(u64, std::result::Result<ParsedRow, String>)>,
    report: &mut LoadReport,
) -> Vec<LiquorRecord> {
    let mut records = Vec::with_capacity(parsed.len());
    let mut seen = HashSet::new();

    for (line, outcome) in parsed {
        let ParsedRow {
            explicit_id,
            mut record,
        } = match outcome {
            Ok(row) => row,
            Err(reason) => {
                report.skipped.push(SkippedRow { line, reason });
                continue;
            }
        };

        let id = explicit_id.unwrap_or(records.len() as RecordId + 1);
        if !seen.insert(id) {
            report.skipped.push(SkippedRow {
                line,
                reason: format!("Duplicate id {}", id),
            });
            continue;
        }
        record.id = id;
        records.push(record);
    }

    records
}

fn header_error(e: csv::Error, source_name: &str) -> DatasetError {
    if e.is_io_error() {
        if let csv::ErrorKind::Io(io_err) = e.into_kind() {
            return DatasetError::IoError(io_err);
        }
        return DatasetError::MalformedHeader {
            source_name: source_name.to_string(),
            reason: "I/O error".to_string(),
        };
    }
    DatasetError::MalformedHeader {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    }
}
