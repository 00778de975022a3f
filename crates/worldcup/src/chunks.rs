//! Retrieval chunk generation.
//!
//! Three deterministic rules over the cleaned tables: one chunk per match,
//! one per tournament edition, one per team that ever appeared in a match.
//! Regenerating from the same tables yields byte-identical chunks, so the
//! vector index can be rebuilt at any time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::records::{MatchRecord, TournamentRecord};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChunkMetadata {
    Match {
        year: String,
        home_team: String,
        away_team: String,
        stage: String,
    },
    Tournament {
        year: String,
        winner: String,
        host: String,
    },
    TeamHistory {
        team: String,
    },
}

/// One retrievable passage plus its provenance metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// Human-readable outcome of a match. Uses the same strict goal comparison
/// as the statistics fold so chunk text never contradicts the numbers.
pub fn result_label(m: &MatchRecord) -> String {
    match m.home_goals.cmp(&m.away_goals) {
        std::cmp::Ordering::Greater => format!("{} won", m.home_team),
        std::cmp::Ordering::Less => format!("{} won", m.away_team),
        std::cmp::Ordering::Equal => "Draw".to_string(),
    }
}

/// Stable chunk id fragment for a team name: spaces and slashes become
/// underscores.
pub fn sanitize_team_id(name: &str) -> String {
    name.replace([' ', '/'], "_")
}

pub fn match_chunks(matches: &[MatchRecord]) -> Vec<TextChunk> {
    matches
        .iter()
        .map(|m| {
            let attendance = match m.attendance {
                Some(a) => a.to_string(),
                None => "unknown".to_string(),
            };
            let text = format!(
                "FIFA World Cup {} - Stage: {}\n\
                 Match: {} vs {}\n\
                 Score: {} - {}\n\
                 Result: {}\n\
                 Venue: {}, {}\n\
                 Attendance: {}",
                m.year,
                m.stage,
                m.home_team,
                m.away_team,
                m.home_goals,
                m.away_goals,
                result_label(m),
                m.stadium,
                m.city,
                attendance,
            );
            TextChunk {
                id: format!("match_{}", m.match_id),
                text,
                metadata: ChunkMetadata::Match {
                    year: m.year.to_string(),
                    home_team: m.home_team.clone(),
                    away_team: m.away_team.clone(),
                    stage: m.stage.clone(),
                },
            }
        })
        .collect()
}

pub fn tournament_chunks(cups: &[TournamentRecord]) -> Vec<TextChunk> {
    cups.iter()
        .map(|c| {
            let text = format!(
                "FIFA World Cup {} was held in {}.\n\
                 Winner: {}\n\
                 Runner-up: {}\n\
                 Third place: {}\n\
                 Total goals scored: {}\n\
                 Total matches played: {}\n\
                 Total attendance: {}",
                c.year,
                c.host_country,
                c.winner,
                c.runner_up,
                c.third_place,
                c.goals_scored,
                c.matches_played,
                c.attendance,
            );
            TextChunk {
                id: format!("tournament_{}", c.year),
                text,
                metadata: ChunkMetadata::Tournament {
                    year: c.year.to_string(),
                    winner: c.winner.clone(),
                    host: c.host_country.clone(),
                },
            }
        })
        .collect()
}

#[derive(Default)]
struct TeamHistory {
    years: Vec<u32>,
    wins: u32,
    draws: u32,
    losses: u32,
    goals_scored: u32,
}

impl TeamHistory {
    fn record(&mut self, year: u32, goals_for: u32, goals_against: u32) {
        if !self.years.contains(&year) {
            self.years.push(year);
        }
        self.goals_scored += goals_for;
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Equal => self.draws += 1,
            std::cmp::Ordering::Less => self.losses += 1,
        }
    }
}

/// One chunk per team that appears in any match, in team-name order.
pub fn team_history_chunks(
    matches: &[MatchRecord],
    cups: &[TournamentRecord],
) -> Vec<TextChunk> {
    let mut titles: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for c in cups {
        titles.entry(c.winner.as_str()).or_default().push(c.year);
    }

    // BTreeMap keeps output order independent of match order.
    let mut history: BTreeMap<String, TeamHistory> = BTreeMap::new();
    for m in matches {
        history
            .entry(m.home_team.clone())
            .or_default()
            .record(m.year, m.home_goals, m.away_goals);
        history
            .entry(m.away_team.clone())
            .or_default()
            .record(m.year, m.away_goals, m.home_goals);
    }

    history
        .into_iter()
        .map(|(team, mut h)| {
            h.years.sort_unstable();
            let total = h.wins + h.draws + h.losses;
            let win_rate = if total > 0 {
                f64::from(h.wins) / f64::from(total) * 100.0
            } else {
                0.0
            };

            let title_line = match titles.get(team.as_str()) {
                Some(years) => format!(
                    "Won {} World Cup(s) in {}",
                    years.len(),
                    years
                        .iter()
                        .map(u32::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                None => "Has not won a World Cup".to_string(),
            };
            let years_line = h
                .years
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ");

            let text = format!(
                "{} FIFA World Cup History:\n\
                 {}\n\
                 Participated in {} World Cups: {}\n\
                 Overall record: {} wins, {} draws, {} losses\n\
                 Win rate: {:.1}%\n\
                 Total goals scored: {}",
                team,
                title_line,
                h.years.len(),
                years_line,
                h.wins,
                h.draws,
                h.losses,
                win_rate,
                h.goals_scored,
            );

            TextChunk {
                id: format!("team_{}", sanitize_team_id(&team)),
                text,
                metadata: ChunkMetadata::TeamHistory { team },
            }
        })
        .collect()
}

/// All chunks for ingestion, in a stable order.
pub fn generate_all_chunks(
    matches: &[MatchRecord],
    cups: &[TournamentRecord],
) -> Vec<TextChunk> {
    let mut chunks = match_chunks(matches);
    chunks.extend(tournament_chunks(cups));
    chunks.extend(team_history_chunks(matches, cups));
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn final_2014() -> MatchRecord {
        MatchRecord {
            year: 2014,
            stage: "Final".to_string(),
            home_team: "Germany".to_string(),
            away_team: "Argentina".to_string(),
            home_goals: 1,
            away_goals: 0,
            stadium: "Maracana".to_string(),
            city: "Rio De Janeiro".to_string(),
            attendance: Some(74738),
            match_id: 300186501,
        }
    }

    fn cup_2014() -> TournamentRecord {
        TournamentRecord {
            year: 2014,
            host_country: "Brazil".to_string(),
            winner: "Germany".to_string(),
            runner_up: "Argentina".to_string(),
            third_place: "Netherlands".to_string(),
            goals_scored: 171,
            matches_played: 64,
            attendance: 3_386_810,
        }
    }

    #[test]
    fn match_chunk_reports_winner_and_venue() {
        let chunks = match_chunks(&[final_2014()]);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].id, "match_300186501");
        assert!(chunks[0].text.contains("Result: Germany won"));
        assert!(chunks[0].text.contains("Venue: Maracana, Rio De Janeiro"));
        assert!(chunks[0].text.contains("Score: 1 - 0"));
    }

    #[test]
    fn drawn_match_labels_draw() {
        let mut m = final_2014();
        m.away_goals = 1;
        assert_eq!(result_label(&m), "Draw");
    }

    #[test]
    fn tournament_chunk_id_is_year_keyed() {
        let chunks = tournament_chunks(&[cup_2014()]);
        assert_eq!(chunks[0].id, "tournament_2014");
        assert!(chunks[0].text.contains("Winner: Germany"));
        assert!(chunks[0].text.starts_with("FIFA World Cup 2014 was held in Brazil."));
    }

    #[test]
    fn team_chunks_aggregate_titles_and_record() {
        let chunks = team_history_chunks(&[final_2014()], &[cup_2014()]);
        assert_eq!(chunks.len(), 2);

        let germany = chunks.iter().find(|c| c.id == "team_Germany").unwrap();
        assert!(germany.text.contains("Won 1 World Cup(s) in 2014"));
        assert!(germany.text.contains("Overall record: 1 wins, 0 draws, 0 losses"));
        assert!(germany.text.contains("Win rate: 100.0%"));

        let argentina = chunks.iter().find(|c| c.id == "team_Argentina").unwrap();
        assert!(argentina.text.contains("Has not won a World Cup"));
        assert!(argentina.text.contains("0 wins, 0 draws, 1 losses"));
    }

    #[test]
    fn team_id_sanitizes_spaces_and_slashes() {
        assert_eq!(sanitize_team_id("Trinidad/Tobago"), "Trinidad_Tobago");
        assert_eq!(sanitize_team_id("South Korea"), "South_Korea");
    }

    #[test]
    fn metadata_serializes_with_type_tag() {
        let chunks = match_chunks(&[final_2014()]);
        let json = serde_json::to_value(&chunks[0].metadata).unwrap();
        assert_eq!(json["type"], "match");
        assert_eq!(json["year"], "2014");
        assert_eq!(json["home_team"], "Germany");
    }
}
