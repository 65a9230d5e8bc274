use std::fmt;

/// Score differential before an end, from the team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBucket {
    Down2Plus,
    Down1,
    Tied,
    Up1,
    Up2Plus,
}

impl ScoreBucket {
    pub fn from_differential(diff: i64) -> Self {
        match diff {
            i64::MIN..=-2 => ScoreBucket::Down2Plus,
            -1 => ScoreBucket::Down1,
            0 => ScoreBucket::Tied,
            1 => ScoreBucket::Up1,
            2..=i64::MAX => ScoreBucket::Up2Plus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBucket::Down2Plus => "Down2+",
            ScoreBucket::Down1 => "Down1",
            ScoreBucket::Tied => "Tied",
            ScoreBucket::Up1 => "Up1",
            ScoreBucket::Up2Plus => "Up2+",
        }
    }
}

impl fmt::Display for ScoreBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket for a differential that may be unknown. Unknown stays unknown.
pub fn score_bucket(diff: Option<i64>) -> Option<ScoreBucket> {
    diff.map(ScoreBucket::from_differential)
}

/// Points scored in the end itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultBin {
    Zero,
    One,
    Two,
    ThreePlus,
}

impl ResultBin {
    pub fn from_points(points: u32) -> Self {
        match points {
            0 => ResultBin::Zero,
            1 => ResultBin::One,
            2 => ResultBin::Two,
            _ => ResultBin::ThreePlus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultBin::Zero => "0",
            ResultBin::One => "1",
            ResultBin::Two => "2",
            ResultBin::ThreePlus => "3+",
        }
    }
}

impl fmt::Display for ResultBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A power play was called iff the indicator cell has any value.
pub fn power_play_used(indicator: Option<&str>) -> bool {
    indicator.is_some_and(|v| !v.trim().is_empty())
}

/// Ends past regulation are extra ends.
pub fn is_overtime(end_id: u32, regulation_ends: u32) -> bool {
    end_id > regulation_ends
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_REGULATION_ENDS;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(ScoreBucket::from_differential(-7), ScoreBucket::Down2Plus);
        assert_eq!(ScoreBucket::from_differential(-2), ScoreBucket::Down2Plus);
        assert_eq!(ScoreBucket::from_differential(-1), ScoreBucket::Down1);
        assert_eq!(ScoreBucket::from_differential(0), ScoreBucket::Tied);
        assert_eq!(ScoreBucket::from_differential(1), ScoreBucket::Up1);
        assert_eq!(ScoreBucket::from_differential(2), ScoreBucket::Up2Plus);
        assert_eq!(ScoreBucket::from_differential(3), ScoreBucket::Up2Plus);
    }

    #[test]
    fn test_bucket_extremes() {
        assert_eq!(ScoreBucket::from_differential(i64::MIN), ScoreBucket::Down2Plus);
        assert_eq!(ScoreBucket::from_differential(i64::MAX), ScoreBucket::Up2Plus);
    }

    #[test]
    fn test_bucket_past_i32_range() {
        assert_eq!(ScoreBucket::from_differential(3_000_000_000), ScoreBucket::Up2Plus);
        assert_eq!(ScoreBucket::from_differential(-3_000_000_000), ScoreBucket::Down2Plus);
    }

    #[test]
    fn test_unknown_differential_is_not_tied() {
        assert_eq!(score_bucket(None), None);
        assert_eq!(score_bucket(Some(0)), Some(ScoreBucket::Tied));
    }

    #[test]
    fn test_bucket_labels() {
        assert_eq!(ScoreBucket::Down2Plus.to_string(), "Down2+");
        assert_eq!(ScoreBucket::Up2Plus.as_str(), "Up2+");
    }

    #[test]
    fn test_result_bins() {
        assert_eq!(ResultBin::from_points(0).as_str(), "0");
        assert_eq!(ResultBin::from_points(1).as_str(), "1");
        assert_eq!(ResultBin::from_points(2).as_str(), "2");
        assert_eq!(ResultBin::from_points(3).as_str(), "3+");
        assert_eq!(ResultBin::from_points(11).as_str(), "3+");
    }

    #[test]
    fn test_power_play_presence() {
        assert!(power_play_used(Some("1")));
        assert!(power_play_used(Some("2")));
        assert!(power_play_used(Some("0")));
        assert!(!power_play_used(Some("  ")));
        assert!(!power_play_used(None));
    }

    #[test]
    fn test_overtime_boundary() {
        assert!(!is_overtime(8, DEFAULT_REGULATION_ENDS));
        assert!(is_overtime(9, DEFAULT_REGULATION_ENDS));
        assert!(!is_overtime(1, DEFAULT_REGULATION_ENDS));
        assert!(is_overtime(7, 6));
    }
}
