//! Header mapping and row parsing for the liquor CSV.
//!
//! Header names are matched case-insensitively (spaces and dashes count
//! as underscores) and several aliases map to the same field, so
//! `Spirit Type`, `spirit_type` and `category` all land in
//! [`LiquorRecord::category`]. Column order does not matter.
//!
//! Row parsing returns `Err(reason)` for a malformed row; the caller
//! decides what to do with it (the loader skips and counts).

use crate::error::{DatasetError, Result};
use crate::types::{LiquorRecord, RecordId};
use csv::StringRecord;
use std::collections::HashMap;

/// Record fields a CSV column can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Category,
    Price,
    Brand,
    Size,
    Origin,
    Abv,
    Proof,
    FairPrice,
    Ranking,
}

impl Field {
    /// Resolve a normalized header name (see [`normalize_header`])
    pub fn from_header(header: &str) -> Option<Field> {
        match header {
            "id" => Some(Field::Id),
            "name" => Some(Field::Name),
            "spirit_type" | "category" | "type" | "spirit" => Some(Field::Category),
            "shelf_price" | "price" => Some(Field::Price),
            "brand" => Some(Field::Brand),
            "size" => Some(Field::Size),
            "origin" => Some(Field::Origin),
            "abv" => Some(Field::Abv),
            "proof" => Some(Field::Proof),
            "fair_price" => Some(Field::FairPrice),
            "ranking" => Some(Field::Ranking),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Category => "category",
            Field::Price => "price",
            Field::Brand => "brand",
            Field::Size => "size",
            Field::Origin => "origin",
            Field::Abv => "abv",
            Field::Proof => "proof",
            Field::FairPrice => "fair_price",
            Field::Ranking => "ranking",
        }
    }
}

/// Fields that must be present in the header
pub const REQUIRED_FIELDS: &[Field] = &[Field::Name];

/// Trim, lowercase, strip a UTF-8 BOM, and turn spaces/dashes into underscores
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Where each CSV column goes.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    fields: HashMap<Field, usize>,
    /// Unrecognized, non-blank columns: (position, normalized header)
    extras: Vec<(usize, String)>,
}

impl ColumnMap {
    /// Build the mapping from a header row.
    ///
    /// Fails if the header is empty, a required column is missing, or two
    /// columns resolve to the same field.
    pub fn from_header(header: &StringRecord, source_name: &str) -> Result<Self> {
        if header.iter().all(|h| h.trim().is_empty()) {
            return Err(DatasetError::EmptyHeader {
                source_name: source_name.to_string(),
            });
        }

        let mut fields = HashMap::new();
        let mut extras = Vec::new();

        for (pos, raw) in header.iter().enumerate() {
            let normalized = normalize_header(raw);
            if normalized.is_empty() {
                continue;
            }
            match Field::from_header(&normalized) {
                Some(field) => {
                    if fields.insert(field, pos).is_some() {
                        return Err(DatasetError::DuplicateColumn {
                            source_name: source_name.to_string(),
                            column: raw.trim().to_string(),
                            field: field.as_str().to_string(),
                        });
                    }
                }
                None => extras.push((pos, normalized)),
            }
        }

        for required in REQUIRED_FIELDS {
            if !fields.contains_key(required) {
                return Err(DatasetError::MissingColumn {
                    source_name: source_name.to_string(),
                    column: required.as_str().to_string(),
                });
            }
        }

        Ok(Self { fields, extras })
    }

    /// Whether the source carries its own `id` column
    pub fn has_explicit_id(&self) -> bool {
        self.fields.contains_key(&Field::Id)
    }

    /// Trimmed cell for `field`, `None` if the column is absent, the row
    /// is short, or the cell is blank.
    fn cell<'r>(&self, row: &'r StringRecord, field: Field) -> Option<&'r str> {
        let pos = *self.fields.get(&field)?;
        non_blank(row.get(pos)?)
    }
}

/// A successfully parsed row, before ids are finalized
#[derive(Debug, Clone)]
pub struct ParsedRow {
    /// Id from the source, if it has an id column
    pub explicit_id: Option<RecordId>,
    /// Record with `id` left at 0 until the loader assigns it
    pub record: LiquorRecord,
}

/// Parse one data row into a record.
///
/// Returns `Err(reason)` for a malformed row.
pub fn parse_row(map: &ColumnMap, row: &StringRecord) -> std::result::Result<ParsedRow, String> {
    let name = map
        .cell(row, Field::Name)
        .ok_or_else(|| "Missing name".to_string())?;

    let explicit_id = if map.has_explicit_id() {
        let raw = map
            .cell(row, Field::Id)
            .ok_or_else(|| "Missing id".to_string())?;
        let id = raw
            .parse::<RecordId>()
            .map_err(|e| format!("Invalid id '{}': {}", raw, e))?;
        Some(id)
    } else {
        None
    };

    let mut record = LiquorRecord::new(0, name);
    record.category = map.cell(row, Field::Category).map(str::to_string);
    record.brand = map.cell(row, Field::Brand).map(str::to_string);
    record.size = map.cell(row, Field::Size).map(str::to_string);
    record.origin = map.cell(row, Field::Origin).map(str::to_string);

    record.price = parse_amount(Field::Price, map.cell(row, Field::Price))?;
    record.fair_price = parse_amount(Field::FairPrice, map.cell(row, Field::FairPrice))?;
    record.proof = parse_amount(Field::Proof, map.cell(row, Field::Proof))?;
    record.abv = parse_abv(map.cell(row, Field::Abv))?;
    record.ranking = match map.cell(row, Field::Ranking) {
        Some(raw) => Some(
            raw.parse::<u32>()
                .map_err(|e| format!("Invalid ranking '{}': {}", raw, e))?,
        ),
        None => None,
    };

    for (pos, header) in &map.extras {
        if let Some(value) = row.get(*pos).and_then(non_blank) {
            record.extra.insert(header.clone(), value.to_string());
        }
    }

    Ok(ParsedRow {
        explicit_id,
        record,
    })
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Parse a finite number, rejecting NaN and infinities
fn parse_finite(field: Field, raw: &str) -> std::result::Result<f64, String> {
    let value = raw
        .parse::<f64>()
        .map_err(|e| format!("Invalid {} '{}': {}", field.as_str(), raw, e))?;
    if !value.is_finite() {
        return Err(format!("Invalid {} '{}': not a finite number", field.as_str(), raw));
    }
    Ok(value)
}

/// Parse a non-negative amount. Accepts a leading `$` and thousands separators.
///
/// Example: "$1,250.00" -> Some(1250.0), "" -> None
fn parse_amount(field: Field, raw: Option<&str>) -> std::result::Result<Option<f64>, String> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let cleaned: String = raw.trim_start_matches('$').replace(',', "");
    let value = parse_finite(field, cleaned.trim())?;
    if value < 0.0 {
        return Err(format!("Negative {} '{}'", field.as_str(), raw));
    }
    Ok(Some(value))
}

/// Parse ABV in percent. Accepts a trailing `%`.
fn parse_abv(raw: Option<&str>) -> std::result::Result<Option<f64>, String> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value = parse_finite(Field::Abv, raw.trim_end_matches('%').trim())?;
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("abv '{}' out of range 0-100", raw));
    }
    Ok(Some(value))
}
