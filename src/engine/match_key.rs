use crate::feed::types::{EndRecord, GameRecord};
use std::fmt;

const SEPARATOR: char = '-';
const ESCAPE: char = '\\';

/// Identity of one match: competitions reuse session and game numbers, so all
/// three parts are needed.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct MatchKey {
    pub competition: String,
    pub session: String,
    pub game: String,
}

impl MatchKey {
    pub fn new(competition: &str, session: &str, game: &str) -> Self {
        Self {
            competition: competition.trim().to_string(),
            session: session.trim().to_string(),
            game: game.trim().to_string(),
        }
    }
}

/// Rendered as `competition-session-game`. A `-` or `\` inside a component is
/// escaped with `\`, so distinct keys never render to the same string.
impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_escaped(f, &self.competition)?;
        write!(f, "{SEPARATOR}")?;
        write_escaped(f, &self.session)?;
        write!(f, "{SEPARATOR}")?;
        write_escaped(f, &self.game)
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, part: &str) -> fmt::Result {
    for c in part.chars() {
        if c == SEPARATOR || c == ESCAPE {
            write!(f, "{ESCAPE}")?;
        }
        write!(f, "{c}")?;
    }
    Ok(())
}

/// Anything carrying the competition/session/game triple.
pub trait Keyed {
    fn match_key(&self) -> MatchKey;
}

impl Keyed for EndRecord {
    fn match_key(&self) -> MatchKey {
        MatchKey::new(&self.competition_id, &self.session_id, &self.game_id)
    }
}

impl Keyed for GameRecord {
    fn match_key(&self) -> MatchKey {
        MatchKey::new(&self.competition_id, &self.session_id, &self.game_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ids_render_with_dashes() {
        assert_eq!(MatchKey::new("12", "3", "45").to_string(), "12-3-45");
    }

    #[test]
    fn test_separator_in_ids_does_not_collide() {
        let a = MatchKey::new("1-2", "3", "4");
        let b = MatchKey::new("1", "2-3", "4");
        assert_ne!(a, b);
        assert_ne!(a.to_string(), b.to_string());
        assert_eq!(a.to_string(), "1\\-2-3-4");
    }

    #[test]
    fn test_escape_char_is_escaped() {
        let a = MatchKey::new("1\\", "-2", "3");
        let b = MatchKey::new("1\\-", "2", "3");
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_ends_and_games_key_identically() {
        let end = EndRecord {
            source_row: 0,
            competition_id: "7".into(),
            session_id: "1".into(),
            game_id: "9".into(),
            team_id: "40".into(),
            end_id: 1,
            result: None,
            power_play: None,
        };
        let game = GameRecord {
            competition_id: "7".into(),
            session_id: " 1".into(),
            game_id: "9".into(),
            team_id_1: Some("40".into()),
            team_id_2: Some("41".into()),
        };
        assert_eq!(end.match_key(), game.match_key());
        assert_eq!(end.match_key().to_string(), game.match_key().to_string());
    }
}
