//! Per-team aggregate statistics folded from the full results table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::records::ResultRecord;

/// Aggregate record for one team. Rate fields are derived once from the
/// counters after the fold; a team with `played == 0` keeps them all at 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_scored: u32,
    pub goals_conceded: u32,
    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub draw_rate: f64,
    #[serde(default)]
    pub loss_rate: f64,
    #[serde(default)]
    pub avg_goals_scored: f64,
    #[serde(default)]
    pub avg_goals_conceded: f64,
}

impl TeamStats {
    fn record(&mut self, goals_for: u32, goals_against: u32) {
        self.played += 1;
        self.goals_scored += goals_for;
        self.goals_conceded += goals_against;
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Equal => self.draws += 1,
            std::cmp::Ordering::Less => self.losses += 1,
        }
    }

    fn derive_rates(&mut self) {
        if self.played == 0 {
            return;
        }
        let p = f64::from(self.played);
        self.win_rate = f64::from(self.wins) / p;
        self.draw_rate = f64::from(self.draws) / p;
        self.loss_rate = f64::from(self.losses) / p;
        self.avg_goals_scored = f64::from(self.goals_scored) / p;
        self.avg_goals_conceded = f64::from(self.goals_conceded) / p;
    }
}

/// Fold a result stream into per-team statistics.
///
/// When `before` is given, only records dated strictly earlier are folded,
/// which allows point-in-time feature construction for backtesting. Rates
/// are derived in a single post-pass rather than incrementally so the same
/// input always produces bit-identical output.
pub fn build_team_stats(
    results: &[ResultRecord],
    before: Option<&str>,
) -> HashMap<String, TeamStats> {
    let mut stats: HashMap<String, TeamStats> = HashMap::new();

    for r in results {
        if let Some(cutoff) = before {
            if r.date.as_str() >= cutoff {
                continue;
            }
        }
        stats
            .entry(r.home_team.clone())
            .or_default()
            .record(r.home_score, r.away_score);
        stats
            .entry(r.away_team.clone())
            .or_default()
            .record(r.away_score, r.home_score);
    }

    for s in stats.values_mut() {
        s.derive_rates();
    }

    stats
}
