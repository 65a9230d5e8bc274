use crate::config::{PathsConfig, PipelineConfig};
use crate::diagnostic::RunReport;
use crate::engine::classify::{self, ResultBin, ScoreBucket};
use crate::engine::match_key::{Keyed, MatchKey};
use crate::engine::roster::{self, cmp_team_ids, Roster};
use crate::engine::score_state::{self, ScoreInput, ScoreLookup};
use crate::error::PipelineError;
use crate::feed::types::{EndRecord, GameRecord};
use crate::feed::Inputs;
use crate::output;
use anyhow::Result;

/// One team's situation in one end of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEndRecord {
    /// Row of the ends table this record was derived from.
    pub source_row: usize,
    pub match_key: MatchKey,
    pub team_id: String,
    pub team_id_1: Option<String>,
    pub team_id_2: Option<String>,
    pub opponent_team_id: Option<String>,
    pub end_id: u32,
    pub result: u32,
    pub power_play_used: bool,
    pub team_score_before: u64,
    pub opponent_score_before: Option<u64>,
    pub score_diff_before: Option<i64>,
    pub score_bucket: Option<ScoreBucket>,
    pub result_bin: ResultBin,
    pub is_overtime: bool,
}

/// Derive the team-end table from typed inputs.
///
/// Every end record yields exactly one output row; rows come back ordered by
/// (match, team, end). Fails only on violated preconditions (a match listed
/// twice, a roster naming one team twice, a repeated end for a team).
pub fn build_end_table(
    ends: &[EndRecord],
    games: &[GameRecord],
    config: &PipelineConfig,
) -> Result<Vec<TeamEndRecord>, PipelineError> {
    // Match keys, derived the same way on both sides of the join.
    let keys: Vec<MatchKey> = ends.iter().map(Keyed::match_key).collect();
    let roster_index = roster::build_roster_index(games)?;

    // Left join: rows without a game keep going with no roster.
    let rosters: Vec<Option<&Roster>> = keys.iter().map(|k| roster_index.get(k)).collect();

    let opponents: Vec<Option<&str>> = ends
        .iter()
        .zip(&rosters)
        .map(|(end, roster)| roster.and_then(|r| r.opponent_of(&end.team_id)))
        .collect();

    let results: Vec<u32> = ends
        .iter()
        .map(|end| score_state::clean_result(end.result.as_deref()))
        .collect();

    let inputs: Vec<ScoreInput<'_>> = ends
        .iter()
        .zip(&keys)
        .zip(&results)
        .map(|((end, key), &result)| ScoreInput {
            match_key: key,
            team_id: &end.team_id,
            end_id: end.end_id,
            result,
        })
        .collect();

    let team_before = score_state::score_before_end(&inputs)?;
    let lookup = ScoreLookup::build(&inputs, &team_before);
    tracing::debug!(entries = lookup.len(), "score lookup built");

    let mut rows: Vec<TeamEndRecord> = Vec::with_capacity(ends.len());
    for (i, end) in ends.iter().enumerate() {
        let opponent = opponents[i];
        let opponent_before =
            score_state::opponent_score_before_end(&lookup, &keys[i], end.end_id, opponent);
        let diff = score_state::score_differential(team_before[i], opponent_before);

        rows.push(TeamEndRecord {
            source_row: end.source_row,
            match_key: keys[i].clone(),
            team_id: end.team_id.clone(),
            team_id_1: rosters[i].and_then(|r| r.team_1.clone()),
            team_id_2: rosters[i].and_then(|r| r.team_2.clone()),
            opponent_team_id: opponent.map(str::to_string),
            end_id: end.end_id,
            result: results[i],
            power_play_used: classify::power_play_used(end.power_play.as_deref()),
            team_score_before: team_before[i],
            opponent_score_before: opponent_before,
            score_diff_before: diff,
            score_bucket: classify::score_bucket(diff),
            result_bin: ResultBin::from_points(results[i]),
            is_overtime: classify::is_overtime(end.end_id, config.regulation_ends),
        });
    }

    rows.sort_by(|a, b| {
        a.match_key
            .cmp(&b.match_key)
            .then_with(|| cmp_team_ids(&a.team_id, &b.team_id))
            .then_with(|| a.end_id.cmp(&b.end_id))
    });

    Ok(rows)
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub rows: Vec<TeamEndRecord>,
    pub report: RunReport,
}

/// Read both inputs, build the table and write it to `paths.output`.
///
/// The output is replaced atomically; if any step fails the previous file (if
/// any) is left as it was.
pub fn run(paths: &PathsConfig, config: &PipelineConfig) -> Result<RunOutcome> {
    config.validate()?;
    let started_at = chrono::Utc::now();

    let inputs = Inputs::load(&paths.ends, &paths.games)?;
    output::check_column_collisions(&inputs.ends_table)?;
    let rows = build_end_table(&inputs.ends, &inputs.games, config)?;

    if rows.len() != inputs.ends.len() {
        anyhow::bail!(
            "row count changed during enrichment ({} in, {} out)",
            inputs.ends.len(),
            rows.len()
        );
    }

    output::write_end_table(&paths.output, &inputs.ends_table, &rows)?;

    let report = RunReport::from_run(&inputs, &rows, &paths.output, started_at);
    report.log();

    Ok(RunOutcome { rows, report })
}
