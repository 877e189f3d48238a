use anyhow::{Context, Result};
use bson::Document;
use std::path::Path;

/// Identifier columns recognised in patient exports, in lookup order.
pub const ID_COLUMNS: [&str; 6] = ["id", "ID", "Id", "patient_id", "PatientID", "patientId"];

/// One CSV record as ordered `(column, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        for (column, value) in &self.fields {
            document.insert(column.as_str(), value.as_str());
        }
        document
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdCheck {
    /// Every row had a value in this column.
    Checked(String),
    /// No identifier column; nothing was checked.
    Skipped,
}

/// Loads every record keyed by the header. Short records get empty values for
/// the missing columns and extra trailing fields are dropped, each with a warning.
pub fn load_csv(path: &Path) -> Result<Vec<Row>> {
    if !path.exists() {
        anyhow::bail!("CSV not found: {}", path.display());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .clone();

    let mut rows: Vec<Row> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("Failed to parse record {} of {}", index + 1, path.display())
        })?;
        if record.len() != headers.len() {
            log::warn!(
                "Record {} has {} fields, expected {}",
                index + 1,
                record.len(),
                headers.len()
            );
        }
        rows.push(
            headers
                .iter()
                .enumerate()
                .map(|(i, column)| (column, record.get(i).unwrap_or_default()))
                .collect(),
        );
    }

    Ok(rows)
}

pub fn validate_headers<S: AsRef<str>>(rows: &[Row], required: &[S]) -> Result<()> {
    let first = rows.first().context("CSV is empty")?;

    let missing: Vec<&str> = required
        .iter()
        .map(|column| column.as_ref())
        .filter(|column| !first.has_column(column))
        .collect();

    if !missing.is_empty() {
        anyhow::bail!("Missing columns: {:?}", missing);
    }

    Ok(())
}

/// Checks the first known identifier column. Without one, strict mode fails
/// and lenient mode only warns.
pub fn validate_content(rows: &[Row], strict_id: bool) -> Result<IdCheck> {
    let first = rows.first().context("CSV is empty")?;

    let Some(id_column) = ID_COLUMNS.iter().find(|column| first.has_column(column)) else {
        if strict_id {
            anyhow::bail!("No identifier column found in CSV");
        }
        log::warn!("No standard identifier column found, skipping identifier validation");
        return Ok(IdCheck::Skipped);
    };

    for (index, row) in rows.iter().enumerate() {
        if row.get(id_column).map_or(true, str::is_empty) {
            anyhow::bail!("Row {}: '{}' is required", index, id_column);
        }
    }

    Ok(IdCheck::Checked(id_column.to_string()))
}

pub fn format_row(row: Row) -> Row {
    row.fields
        .into_iter()
        .map(|(column, value)| (column, value.trim().to_string()))
        .collect()
}

pub fn format_batch(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter().map(format_row).collect()
}

/// Splits rows into consecutive batches; a size of 0 is treated as 1.
pub fn make_batches(rows: &[Row], batch_size: usize) -> Vec<&[Row]> {
    rows.chunks(batch_size.max(1)).collect()
}
