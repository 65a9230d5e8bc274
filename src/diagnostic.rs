// Run summary and data-quality counts for a finished build

use crate::engine::score_state;
use crate::feed::Inputs;
use crate::pipeline::TeamEndRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// Counts describing one run. Unresolved opponents and coerced results are
/// not failures, but they are reported so they can't go unnoticed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub output_path: String,
    pub end_rows: usize,
    pub game_rows: usize,
    pub output_rows: usize,
    pub matches: usize,
    /// Rows whose match is absent from the games table.
    pub rows_without_roster: usize,
    /// Rows whose team is in neither roster slot of its match.
    pub unresolved_opponents: usize,
    /// Rows with a known opponent that has no row for the same end.
    pub missing_opponent_scores: usize,
    /// Non-blank results that could not be read as points.
    pub coerced_results: usize,
    pub blank_results: usize,
    pub power_play_rows: usize,
    pub overtime_rows: usize,
}

impl RunReport {
    pub fn from_run(
        inputs: &Inputs,
        rows: &[TeamEndRecord],
        output_path: &Path,
        started_at: DateTime<Utc>,
    ) -> Self {
        let mut coerced_results = 0;
        let mut blank_results = 0;
        for end in &inputs.ends {
            match end.result.as_deref() {
                None => blank_results += 1,
                Some(raw) if score_state::parse_points(raw).is_none() => coerced_results += 1,
                Some(_) => {}
            }
        }

        let matches: HashSet<_> = rows.iter().map(|r| &r.match_key).collect();
        let rows_without_roster = rows
            .iter()
            .filter(|r| r.team_id_1.is_none() && r.team_id_2.is_none())
            .count();
        let unresolved_opponents = rows
            .iter()
            .filter(|r| r.opponent_team_id.is_none())
            .count()
            - rows_without_roster;

        Self {
            started_at,
            output_path: output_path.display().to_string(),
            end_rows: inputs.ends.len(),
            game_rows: inputs.games.len(),
            output_rows: rows.len(),
            matches: matches.len(),
            rows_without_roster,
            unresolved_opponents,
            missing_opponent_scores: rows
                .iter()
                .filter(|r| r.opponent_team_id.is_some() && r.opponent_score_before.is_none())
                .count(),
            coerced_results,
            blank_results,
            power_play_rows: rows.iter().filter(|r| r.power_play_used).count(),
            overtime_rows: rows.iter().filter(|r| r.is_overtime).count(),
        }
    }

    pub fn log(&self) {
        tracing::info!(
            rows = self.output_rows,
            matches = self.matches,
            output = %self.output_path,
            "team end table written"
        );
        if self.rows_without_roster > 0 {
            tracing::warn!(rows = self.rows_without_roster, "end rows with no matching game");
        }
        if self.unresolved_opponents > 0 {
            tracing::warn!(
                rows = self.unresolved_opponents,
                "end rows whose team is not on the game roster"
            );
        }
        if self.missing_opponent_scores > 0 {
            tracing::warn!(
                rows = self.missing_opponent_scores,
                "end rows with no opponent row for the same end"
            );
        }
        if self.coerced_results > 0 {
            tracing::warn!(rows = self.coerced_results, "unparseable results counted as 0");
        }
    }

    /// Plain-text summary for the terminal.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Saved {}", self.output_path),
            format!("Rows: {}", self.output_rows),
            format!("Matches: {}", self.matches),
            format!("Power play rows: {}", self.power_play_rows),
            format!("Overtime rows: {}", self.overtime_rows),
            format!("Rows without game: {}", self.rows_without_roster),
            format!("Unresolved opponents: {}", self.unresolved_opponents),
            format!("Missing opponent scores: {}", self.missing_opponent_scores),
            format!(
                "Results counted as 0: {} unparseable, {} blank",
                self.coerced_results, self.blank_results
            ),
        ]
    }
}

/// A compact view of one output row for the post-run preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub end_id: u32,
    pub power_play_used: bool,
    pub result: u32,
    pub team_score_before: u64,
    pub opponent_score_before: String,
    pub score_bucket: String,
    pub is_overtime: bool,
}

pub fn build_preview_rows(rows: &[TeamEndRecord], limit: usize) -> Vec<PreviewRow> {
    rows.iter()
        .take(limit)
        .map(|r| PreviewRow {
            end_id: r.end_id,
            power_play_used: r.power_play_used,
            result: r.result,
            team_score_before: r.team_score_before,
            opponent_score_before: r
                .opponent_score_before
                .map(|s| s.to_string())
                .unwrap_or_else(|| "—".to_string()),
            score_bucket: r
                .score_bucket
                .map(|b| b.to_string())
                .unwrap_or_else(|| "—".to_string()),
            is_overtime: r.is_overtime,
        })
        .collect()
}

pub fn format_preview(rows: &[PreviewRow]) -> String {
    let mut out = format!(
        "{:>5} {:>4} {:>6} {:>9} {:>8} {:>7} {:>3}\n",
        "End", "PP", "Result", "TeamScore", "OppScore", "Bucket", "OT"
    );
    for r in rows {
        out.push_str(&format!(
            "{:>5} {:>4} {:>6} {:>9} {:>8} {:>7} {:>3}\n",
            r.end_id,
            u8::from(r.power_play_used),
            r.result,
            r.team_score_before,
            r.opponent_score_before,
            r.score_bucket,
            u8::from(r.is_overtime),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::feed::table::RawTable;
    use crate::pipeline::build_end_table;

    const ENDS: &str = "\
CompetitionID,SessionID,GameID,TeamID,EndID,Result,PowerPlay
1,1,1,A,1,2,
1,1,1,B,1,X,1
1,1,1,Z,1,,
1,1,2,C,1,1,
1,1,1,A,9,0,
";

    const GAMES: &str = "\
CompetitionID,SessionID,GameID,TeamID1,TeamID2
1,1,1,A,B
";

    fn run_report() -> (RunReport, Vec<TeamEndRecord>) {
        let ends = RawTable::from_reader("Ends", ENDS.as_bytes()).unwrap();
        let games = RawTable::from_reader("Games", GAMES.as_bytes()).unwrap();
        let inputs = Inputs::from_tables(ends, &games).unwrap();
        let rows = build_end_table(&inputs.ends, &inputs.games, &PipelineConfig::default()).unwrap();
        let report = RunReport::from_run(&inputs, &rows, Path::new("out.csv"), Utc::now());
        (report, rows)
    }

    #[test]
    fn test_report_counts_quality_gaps() {
        let (report, _) = run_report();
        assert_eq!(report.end_rows, 5);
        assert_eq!(report.output_rows, 5);
        assert_eq!(report.game_rows, 1);
        assert_eq!(report.matches, 2);
        assert_eq!(report.rows_without_roster, 1);
        assert_eq!(report.unresolved_opponents, 1);
        assert_eq!(report.missing_opponent_scores, 1);
        assert_eq!(report.coerced_results, 1);
        assert_eq!(report.blank_results, 1);
        assert_eq!(report.power_play_rows, 1);
        assert_eq!(report.overtime_rows, 1);
    }

    #[test]
    fn test_report_serializes() {
        let (report, _) = run_report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["output_rows"], 5);
        assert_eq!(json["unresolved_opponents"], 1);
    }

    #[test]
    fn test_preview_limits_rows_and_marks_missing() {
        let (_, rows) = run_report();
        let preview = build_preview_rows(&rows, 3);
        assert_eq!(preview.len(), 3);
        let text = format_preview(&preview);
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().next().unwrap().contains("Bucket"));
    }

    #[test]
    fn test_summary_mentions_output() {
        let (report, _) = run_report();
        let lines = report.summary_lines();
        assert_eq!(lines[0], "Saved out.csv");
        assert_eq!(lines[1], "Rows: 5");
    }
}
