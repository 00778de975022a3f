//! Feature vector construction shared by training and serving.
//!
//! The flattened layout home(6) ++ away(6) ++ h2h(3) is the contract
//! between a persisted classifier and this code. `FEATURE_LAYOUT_VERSION`
//! is stored in every model manifest and checked at load time; bump it
//! whenever the layout below changes.

use std::collections::HashMap;

use crate::head_to_head::{head_to_head, HeadToHeadRecord};
use crate::records::ResultRecord;
use crate::stats::TeamStats;

pub const FEATURE_LAYOUT_VERSION: u32 = 1;
pub const FEATURE_DIM: usize = 15;

/// The six per-team inputs, in layout order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeamFeatures {
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_goals_scored: f64,
    pub avg_goals_conceded: f64,
    pub played: f64,
}

impl TeamFeatures {
    /// Stand-in for a team absent from the stats snapshot: an average,
    /// unproven side. Must stay identical on the training and serving
    /// paths or the trained model is silently invalidated.
    pub const NEUTRAL: TeamFeatures = TeamFeatures {
        win_rate: 0.33,
        draw_rate: 0.33,
        loss_rate: 0.33,
        avg_goals_scored: 1.0,
        avg_goals_conceded: 1.0,
        played: 0.0,
    };

    pub fn from_stats(stats: &TeamStats) -> Self {
        Self {
            win_rate: stats.win_rate,
            draw_rate: stats.draw_rate,
            loss_rate: stats.loss_rate,
            avg_goals_scored: stats.avg_goals_scored,
            avg_goals_conceded: stats.avg_goals_conceded,
            played: f64::from(stats.played),
        }
    }

    fn push_onto(&self, out: &mut Vec<f64>) {
        out.push(self.win_rate);
        out.push(self.draw_rate);
        out.push(self.loss_rate);
        out.push(self.avg_goals_scored);
        out.push(self.avg_goals_conceded);
        out.push(self.played);
    }
}

/// Full classifier input for one fixture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchFeatures {
    pub home: TeamFeatures,
    pub away: TeamFeatures,
    pub h2h: HeadToHeadRecord,
}

impl MatchFeatures {
    /// Assemble features for (home, away) from a stats snapshot and the
    /// results table. Team names must already be canonicalized; a name
    /// missing from the snapshot falls back to `TeamFeatures::NEUTRAL`.
    pub fn assemble(
        home: &str,
        away: &str,
        stats: &HashMap<String, TeamStats>,
        results: &[ResultRecord],
    ) -> Self {
        let lookup = |team: &str| {
            stats
                .get(team)
                .map(TeamFeatures::from_stats)
                .unwrap_or(TeamFeatures::NEUTRAL)
        };
        Self {
            home: lookup(home),
            away: lookup(away),
            h2h: head_to_head(home, away, results),
        }
    }

    /// Flatten into the fixed classifier layout.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(FEATURE_DIM);
        self.home.push_onto(&mut out);
        self.away.push_onto(&mut out);
        out.push(self.h2h.team1_win_rate);
        out.push(self.h2h.draw_rate);
        out.push(self.h2h.team2_win_rate);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::build_team_stats;

    fn rec(home: &str, away: &str, hs: u32, aw: u32) -> ResultRecord {
        ResultRecord {
            date: "2014-07-13".to_string(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: hs,
            away_score: aw,
        }
    }

    #[test]
    fn unknown_team_gets_exact_neutral_features() {
        let stats = HashMap::new();
        let features = MatchFeatures::assemble("Atlantis", "Lemuria", &stats, &[]);
        let v = features.to_vec();
        assert_eq!(
            &v[..6],
            &[0.33, 0.33, 0.33, 1.0, 1.0, 0.0][..],
            "unknown home team must use the neutral block"
        );
        assert_eq!(&v[6..12], &[0.33, 0.33, 0.33, 1.0, 1.0, 0.0][..]);
        assert_eq!(&v[12..], &[0.0, 0.0, 0.0][..]);
    }

    #[test]
    fn layout_is_home_away_h2h() {
        let results = vec![rec("Germany", "Argentina", 1, 0)];
        let stats = build_team_stats(&results, None);
        let v = MatchFeatures::assemble("Germany", "Argentina", &stats, &results).to_vec();
        assert_eq!(v.len(), FEATURE_DIM);
        assert_eq!(v[0], 1.0, "home win_rate leads the vector");
        assert_eq!(v[5], 1.0, "home played closes the home block");
        assert_eq!(v[6 + 2], 1.0, "away loss_rate sits third in the away block");
        assert_eq!(v[12], 1.0, "h2h home-win share opens the tail");
    }

    #[test]
    fn assembly_is_deterministic_for_identical_inputs() {
        let results = vec![
            rec("Germany", "Argentina", 1, 0),
            rec("Argentina", "Germany", 2, 2),
        ];
        let stats = build_team_stats(&results, None);
        let a = MatchFeatures::assemble("Germany", "Argentina", &stats, &results).to_vec();
        let b = MatchFeatures::assemble("Germany", "Argentina", &stats, &results).to_vec();
        assert_eq!(a, b);
    }
}
