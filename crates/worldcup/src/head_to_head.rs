//! Historical win/draw/loss distribution between an ordered pair of teams.

use serde::{Deserialize, Serialize};

use crate::records::ResultRecord;

/// Outcome distribution over all prior meetings of (team1, team2).
/// All three fields are 0 when the teams have never met.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadRecord {
    pub team1_win_rate: f64,
    pub draw_rate: f64,
    pub team2_win_rate: f64,
}

/// Count meetings of the ordered pair over the full results table.
///
/// Each record is normalized to team1's perspective before counting, so
/// the result does not depend on which side was at home in any meeting.
pub fn head_to_head(team1: &str, team2: &str, results: &[ResultRecord]) -> HeadToHeadRecord {
    let mut team1_wins = 0u32;
    let mut draws = 0u32;
    let mut team2_wins = 0u32;

    for r in results {
        let (goals1, goals2) = if r.home_team == team1 && r.away_team == team2 {
            (r.home_score, r.away_score)
        } else if r.home_team == team2 && r.away_team == team1 {
            (r.away_score, r.home_score)
        } else {
            continue;
        };

        match goals1.cmp(&goals2) {
            std::cmp::Ordering::Greater => team1_wins += 1,
            std::cmp::Ordering::Equal => draws += 1,
            std::cmp::Ordering::Less => team2_wins += 1,
        }
    }

    let total = team1_wins + draws + team2_wins;
    if total == 0 {
        return HeadToHeadRecord::default();
    }

    let total = f64::from(total);
    HeadToHeadRecord {
        team1_win_rate: f64::from(team1_wins) / total,
        draw_rate: f64::from(draws) / total,
        team2_win_rate: f64::from(team2_wins) / total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(home: &str, away: &str, hs: u32, aw: u32) -> ResultRecord {
        ResultRecord {
            date: "2000-01-01".to_string(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: hs,
            away_score: aw,
        }
    }

    #[test]
    fn no_meetings_is_neutral_triple() {
        let results = vec![rec("Brazil", "France", 3, 0)];
        assert_eq!(
            head_to_head("Germany", "Argentina", &results),
            HeadToHeadRecord::default()
        );
    }

    #[test]
    fn normalizes_home_and_away_roles() {
        let results = vec![
            rec("Germany", "Argentina", 1, 0),
            rec("Argentina", "Germany", 0, 4),
            rec("Argentina", "Germany", 2, 2),
            rec("Germany", "Argentina", 1, 3),
        ];
        let h2h = head_to_head("Germany", "Argentina", &results);
        assert!((h2h.team1_win_rate - 0.5).abs() < 1e-12);
        assert!((h2h.draw_rate - 0.25).abs() < 1e-12);
        assert!((h2h.team2_win_rate - 0.25).abs() < 1e-12);
    }

    #[test]
    fn symmetric_under_argument_swap() {
        let results = vec![
            rec("Germany", "Argentina", 1, 0),
            rec("Argentina", "Germany", 2, 1),
            rec("Germany", "Argentina", 0, 0),
        ];
        let ab = head_to_head("Germany", "Argentina", &results);
        let ba = head_to_head("Argentina", "Germany", &results);
        assert_eq!(ab.team1_win_rate, ba.team2_win_rate);
        assert_eq!(ab.team2_win_rate, ba.team1_win_rate);
        assert_eq!(ab.draw_rate, ba.draw_rate);
    }
}
