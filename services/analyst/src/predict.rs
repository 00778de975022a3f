//! Match outcome prediction against the loaded model bundle.

use serde::Serialize;

use predictor::{Classifier, ModelBundle, OutcomeClass, OUTCOME_CLASSES};
use worldcup::{MatchFeatures, ResultRecord, TeamAliases, TeamStats};

const HIGH_CONFIDENCE_PCT: f64 = 60.0;
const MEDIUM_CONFIDENCE_PCT: f64 = 45.0;

use crate::error::ApiError;

/// Display-formatted statistics for one side, or the explicit placeholder
/// set when the team is absent from the stats snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamStatsDisplay {
    pub win_rate: String,
    pub avg_goals_scored: String,
    pub avg_goals_conceded: String,
    pub matches_played: String,
}

impl TeamStatsDisplay {
    fn from_stats(stats: &TeamStats) -> Self {
        Self {
            win_rate: format!("{:.1}%", stats.win_rate * 100.0),
            avg_goals_scored: format!("{:.1}", stats.avg_goals_scored),
            avg_goals_conceded: format!("{:.1}", stats.avg_goals_conceded),
            matches_played: stats.played.to_string(),
        }
    }

    fn not_available() -> Self {
        let na = "not available".to_string();
        Self {
            win_rate: na.clone(),
            avg_goals_scored: na.clone(),
            avg_goals_conceded: na.clone(),
            matches_played: na,
        }
    }
}

/// Per-class probabilities as percentages rounded to one decimal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OutcomeProbabilities {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct MatchPrediction {
    pub home_team: String,
    pub away_team: String,
    pub prediction: String,
    pub confidence: &'static str,
    pub probabilities: OutcomeProbabilities,
    pub home_team_stats: TeamStatsDisplay,
    pub away_team_stats: TeamStatsDisplay,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn confidence_tier(max_pct: f64) -> &'static str {
    if max_pct >= HIGH_CONFIDENCE_PCT {
        "High"
    } else if max_pct >= MEDIUM_CONFIDENCE_PCT {
        "Medium"
    } else {
        "Low"
    }
}

/// Predict the outcome of home vs away.
///
/// Bad input is rejected before any feature construction or classifier
/// call. Team names are canonicalized through the alias table for all
/// lookups; the caller's spelling is kept for display.
pub fn predict_match(
    home_input: &str,
    away_input: &str,
    bundle: &ModelBundle,
    results: &[ResultRecord],
    aliases: &TeamAliases,
) -> Result<MatchPrediction, ApiError> {
    let home_input = home_input.trim();
    let away_input = away_input.trim();
    if home_input.is_empty() || away_input.is_empty() {
        return Err(ApiError::BadRequest("team names cannot be empty".to_string()));
    }

    let home = aliases.resolve(home_input);
    let away = aliases.resolve(away_input);
    if home == away {
        return Err(ApiError::BadRequest(
            "home and away team must be different".to_string(),
        ));
    }

    let features = MatchFeatures::assemble(home, away, &bundle.team_stats, results).to_vec();
    let probs = bundle
        .classifier
        .predict_proba(&features)
        .map_err(|e| ApiError::Internal(format!("classifier failure: {e}")))?;

    let pcts = probs.map(|p| round1(p * 100.0));

    // Strict maximum; ties resolve to the first class in index order,
    // which is deterministic, not a random tie-break.
    let mut best = OUTCOME_CLASSES[0];
    for class in OUTCOME_CLASSES {
        if pcts[class.index()] > pcts[best.index()] {
            best = class;
        }
    }

    let prediction = match best {
        OutcomeClass::HomeWin => format!("{home_input} wins"),
        OutcomeClass::Draw => "Draw".to_string(),
        OutcomeClass::AwayWin => format!("{away_input} wins"),
    };

    let display = |team: &str| {
        bundle
            .team_stats
            .get(team)
            .map(TeamStatsDisplay::from_stats)
            .unwrap_or_else(TeamStatsDisplay::not_available)
    };

    Ok(MatchPrediction {
        home_team: home_input.to_string(),
        away_team: away_input.to_string(),
        prediction,
        confidence: confidence_tier(pcts[best.index()]),
        probabilities: OutcomeProbabilities {
            home_win: pcts[0],
            draw: pcts[1],
            away_win: pcts[2],
        },
        home_team_stats: display(home),
        away_team_stats: display(away),
    })
}
