use serde::{Deserialize, Serialize};

/// One World Cup match from the cleaned matches table.
///
/// `home_team == away_team` does occur in rare data artifacts and is
/// tolerated here; it is rejected at prediction-request time instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchRecord {
    pub year: u32,
    pub stage: String,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub stadium: String,
    pub city: String,
    pub attendance: Option<u64>,
    pub match_id: u64,
}

/// One international match from the full results table.
///
/// This table is much larger than the World Cup matches alone and is what
/// team statistics and head-to-head records are computed from. The date is
/// kept as an ISO-8601 string so a point-in-time cutoff is a plain string
/// comparison.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResultRecord {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
}

/// One World Cup edition. The year is the natural key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub year: u32,
    pub host_country: String,
    pub winner: String,
    pub runner_up: String,
    pub third_place: String,
    pub goals_scored: u32,
    pub matches_played: u32,
    pub attendance: u64,
}
