//! CSV loading and cleaning for the three source tables.
//!
//! The raw World Cup matches export is known-dirty: it carries fully empty
//! trailing rows and every MatchID appears twice. Cleaning drops rows that
//! are missing either team name or either goal count, then deduplicates by
//! MatchID, keeping the first occurrence.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::records::{MatchRecord, ResultRecord, TournamentRecord};
use crate::{DataError, Result};

#[derive(Debug, Deserialize)]
struct RawMatchRow {
    #[serde(rename = "Year")]
    year: Option<f64>,
    #[serde(rename = "Stage")]
    stage: Option<String>,
    #[serde(rename = "Stadium")]
    stadium: Option<String>,
    #[serde(rename = "City")]
    city: Option<String>,
    #[serde(rename = "Home Team Name")]
    home_team: Option<String>,
    #[serde(rename = "Home Team Goals")]
    home_goals: Option<f64>,
    #[serde(rename = "Away Team Goals")]
    away_goals: Option<f64>,
    #[serde(rename = "Away Team Name")]
    away_team: Option<String>,
    #[serde(rename = "Attendance")]
    attendance: Option<f64>,
    #[serde(rename = "MatchID")]
    match_id: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawResultRow {
    date: Option<String>,
    home_team: Option<String>,
    away_team: Option<String>,
    home_score: Option<f64>,
    away_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawTournamentRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Country")]
    host_country: String,
    #[serde(rename = "Winner")]
    winner: String,
    #[serde(rename = "Runners-Up")]
    runner_up: String,
    #[serde(rename = "Third")]
    third_place: String,
    #[serde(rename = "GoalsScored")]
    goals_scored: u32,
    #[serde(rename = "MatchesPlayed")]
    matches_played: u32,
    #[serde(rename = "Attendance")]
    attendance: String,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse and clean World Cup matches from any reader.
pub fn matches_from_reader<R: Read>(reader: R) -> Result<Vec<MatchRecord>> {
    let mut csv = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for row in csv.deserialize() {
        let row: RawMatchRow = row?;

        // Drop rows missing any critical field.
        let (home_team, away_team) = match (non_empty(row.home_team), non_empty(row.away_team)) {
            (Some(h), Some(a)) => (h, a),
            _ => continue,
        };
        let (year, home_goals, away_goals, match_id) =
            match (row.year, row.home_goals, row.away_goals, row.match_id) {
                (Some(y), Some(hg), Some(ag), Some(id)) => (y, hg, ag, id),
                _ => continue,
            };

        // The raw export duplicates every MatchID once.
        if !seen.insert(match_id as u64) {
            continue;
        }

        out.push(MatchRecord {
            year: year as u32,
            stage: row.stage.unwrap_or_default(),
            home_team,
            away_team,
            home_goals: home_goals as u32,
            away_goals: away_goals as u32,
            stadium: row.stadium.unwrap_or_default(),
            city: row.city.map(|c| c.trim().to_string()).unwrap_or_default(),
            attendance: row.attendance.map(|a| a as u64),
            match_id: match_id as u64,
        });
    }

    Ok(out)
}

/// Parse the full international results table from any reader.
pub fn results_from_reader<R: Read>(reader: R) -> Result<Vec<ResultRecord>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut out = Vec::new();

    for row in csv.deserialize() {
        let row: RawResultRow = row?;
        let (date, home_team, away_team) = match (
            non_empty(row.date),
            non_empty(row.home_team),
            non_empty(row.away_team),
        ) {
            (Some(d), Some(h), Some(a)) => (d, h, a),
            _ => continue,
        };
        let (home_score, away_score) = match (row.home_score, row.away_score) {
            (Some(h), Some(a)) => (h as u32, a as u32),
            _ => continue,
        };
        out.push(ResultRecord {
            date,
            home_team,
            away_team,
            home_score,
            away_score,
        });
    }

    Ok(out)
}

/// Parse tournament summaries from any reader.
///
/// The attendance column in the raw export uses dots as thousands
/// separators ("590.549"), so it is parsed by stripping separators.
pub fn tournaments_from_reader<R: Read>(reader: R) -> Result<Vec<TournamentRecord>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut out = Vec::new();

    for (i, row) in csv.deserialize().enumerate() {
        let row: RawTournamentRow = row?;
        let digits: String = row
            .attendance
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let attendance = digits.parse::<u64>().map_err(|_| DataError::InvalidField {
            table: "tournaments",
            row: i + 1,
            message: format!("unparsable attendance {:?}", row.attendance),
        })?;
        out.push(TournamentRecord {
            year: row.year,
            host_country: row.host_country,
            winner: row.winner,
            runner_up: row.runner_up,
            third_place: row.third_place,
            goals_scored: row.goals_scored,
            matches_played: row.matches_played,
            attendance,
        });
    }

    Ok(out)
}

pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>> {
    matches_from_reader(std::fs::File::open(path)?)
}

pub fn load_results(path: &Path) -> Result<Vec<ResultRecord>> {
    results_from_reader(std::fs::File::open(path)?)
}

pub fn load_tournaments(path: &Path) -> Result<Vec<TournamentRecord>> {
    tournaments_from_reader(std::fs::File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATCHES_CSV: &str = "\
Year,Stage,Stadium,City,Home Team Name,Home Team Goals,Away Team Goals,Away Team Name,Attendance,MatchID
2014,Final,Maracana,Rio De Janeiro,Germany,1,0,Argentina,74738,300186501
2014,Final,Maracana,Rio De Janeiro,Germany,1,0,Argentina,74738,300186501
1930,Group 1,Pocitos,Montevideo,France,4,1,Mexico,4444,1096
,,,,,,,,,
";

    #[test]
    fn drops_incomplete_rows_and_duplicate_match_ids() {
        let matches = matches_from_reader(MATCHES_CSV.as_bytes()).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].match_id, 300186501);
        assert_eq!(matches[0].home_goals, 1);
        assert_eq!(matches[1].home_team, "France");
    }

    #[test]
    fn parses_tournament_attendance_with_separators() {
        let csv = "\
Year,Country,Winner,Runners-Up,Third,GoalsScored,MatchesPlayed,Attendance
1950,Brazil,Uruguay,Brazil,Sweden,88,22,1.045.246
";
        let cups = tournaments_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(cups[0].attendance, 1_045_246);
        assert_eq!(cups[0].winner, "Uruguay");
    }

    #[test]
    fn parses_results_and_skips_incomplete() {
        let csv = "\
date,home_team,away_team,home_score,away_score,tournament
2014-07-13,Germany,Argentina,1,0,FIFA World Cup
2026-06-11,,,,,FIFA World Cup
";
        let results = results_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].date, "2014-07-13");
    }
}
