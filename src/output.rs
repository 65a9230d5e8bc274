use crate::feed::table::RawTable;
use crate::error::PipelineError;
use crate::feed::types::COL_RESULT;
use crate::pipeline::TeamEndRecord;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Columns appended after the ends table's own columns, in order.
pub const DERIVED_COLUMNS: [&str; 11] = [
    "MatchID",
    "PowerPlayUsed",
    "TeamID1",
    "TeamID2",
    "OppTeamID",
    "TeamScoreBeforeEnd",
    "OppScoreBeforeEnd",
    "ScoreDiffBeforeEnd",
    "ScoreBucket",
    "ResultBin",
    "IsOvertime",
];

fn flag(value: bool) -> String {
    u8::from(value).to_string()
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Fail when the ends table already has a column named like one of
/// [`DERIVED_COLUMNS`]; the output header must not repeat a name.
pub fn check_column_collisions(ends_table: &RawTable) -> Result<(), PipelineError> {
    match DERIVED_COLUMNS
        .iter()
        .find(|c| ends_table.optional_column(c).is_some())
    {
        Some(column) => Err(PipelineError::ColumnCollision {
            table: ends_table.name.clone(),
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}

/// Write the table as CSV: the ends table's columns (Result replaced by the
/// cleaned points) followed by [`DERIVED_COLUMNS`]. Missing values are empty.
pub fn render_end_table<W: Write>(
    writer: W,
    ends_table: &RawTable,
    rows: &[TeamEndRecord],
) -> Result<()> {
    check_column_collisions(ends_table)?;
    let result_col = ends_table.column(COL_RESULT)?;
    let mut csv = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = ends_table.headers.iter().map(str::to_string).collect();
    header.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));
    csv.write_record(&header)?;

    for row in rows {
        let raw = ends_table.rows.get(row.source_row).with_context(|| {
            format!("output row refers to missing source row {}", row.source_row)
        })?;

        let mut record: Vec<String> = raw
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                if idx == result_col {
                    row.result.to_string()
                } else {
                    field.to_string()
                }
            })
            .collect();

        record.extend([
            row.match_key.to_string(),
            flag(row.power_play_used),
            opt(row.team_id_1.as_deref()),
            opt(row.team_id_2.as_deref()),
            opt(row.opponent_team_id.as_deref()),
            row.team_score_before.to_string(),
            opt(row.opponent_score_before),
            opt(row.score_diff_before),
            opt(row.score_bucket),
            row.result_bin.to_string(),
            flag(row.is_overtime),
        ]);
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Replace `path` with the rendered table. The CSV is written to a temporary
/// file beside `path` and renamed into place only after it is complete.
pub fn write_end_table(path: &Path, ends_table: &RawTable, rows: &[TeamEndRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    render_end_table(tmp.as_file_mut(), ends_table, rows)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace output file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "output persisted");
    Ok(())
}
