use crate::error::PipelineError;
use anyhow::{Context, Result};
use csv::StringRecord;
use std::path::Path;

/// A header-named CSV table held in memory, untyped.
///
/// The ends table is kept in this form for the whole run so that columns the
/// pipeline does not interpret can be written back out unchanged.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub name: String,
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    pub fn read(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_reader(&name, file)
            .with_context(|| format!("Failed to read CSV file: {}", path.display()))
    }

    pub fn from_reader<R: std::io::Read>(name: &str, reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(table = name, rows = rows.len(), columns = headers.len(), "table loaded");

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    /// Index of a header, compared after trimming whitespace.
    pub fn column(&self, name: &str) -> Result<usize, PipelineError> {
        self.headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| PipelineError::MissingColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    pub fn optional_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Trimmed cell value, or `None` when the cell is absent or blank.
pub fn cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|v| !v.is_empty())
}

/// Trimmed cell value that must be present. `row` is 1-based.
pub fn required_cell(
    table: &RawTable,
    record: &StringRecord,
    idx: usize,
    row: usize,
) -> Result<String, PipelineError> {
    cell(record, idx)
        .map(str::to_string)
        .ok_or_else(|| PipelineError::MissingIdentifier {
            table: table.name.clone(),
            row,
            column: table.headers.get(idx).unwrap_or_default().trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTable {
        let csv = "CompetitionID, TeamID ,Result\n1,7,2\n1, 8 ,\n";
        RawTable::from_reader("Ends", csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_reads_headers_and_rows() {
        let table = sample();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("TeamID").unwrap(), 1);
        assert_eq!(table.optional_column("PowerPlay"), None);
    }

    #[test]
    fn test_missing_column_names_table() {
        let table = sample();
        let err = table.column("EndID").unwrap_err();
        assert_eq!(
            err,
            PipelineError::MissingColumn { table: "Ends".into(), column: "EndID".into() }
        );
    }

    #[test]
    fn test_cell_trims_and_blanks_are_none() {
        let table = sample();
        assert_eq!(cell(&table.rows[1], 1), Some("8"));
        assert_eq!(cell(&table.rows[1], 2), None);
        assert_eq!(cell(&table.rows[0], 9), None);
    }

    #[test]
    fn test_required_cell_reports_row() {
        let table = sample();
        let err = required_cell(&table, &table.rows[1], 2, 2).unwrap_err();
        assert!(matches!(err, PipelineError::MissingIdentifier { row: 2, .. }));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let csv = "A,B\n1,2\n3\n";
        assert!(RawTable::from_reader("Bad", csv.as_bytes()).is_err());
    }
}
