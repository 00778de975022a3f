//! Training-set construction.
//!
//! Goes through the exact same `MatchFeatures` assembler the serving path
//! uses, including alias canonicalization of the match table's team
//! spellings; any divergence between the two paths would invalidate the
//! trained model without any visible failure.

use std::collections::HashMap;

use worldcup::{MatchFeatures, MatchRecord, ResultRecord, TeamAliases, TeamStats};

/// Feature matrix and labels for every World Cup match. Team names are
/// resolved through `aliases` before every stats and head-to-head lookup,
/// exactly as at serving time.
/// Labels: 0 home win, 1 draw, 2 away win.
pub fn build_training_set(
    matches: &[MatchRecord],
    results: &[ResultRecord],
    stats: &HashMap<String, TeamStats>,
    aliases: &TeamAliases,
) -> (Vec<Vec<f64>>, Vec<u8>) {
    let mut x = Vec::with_capacity(matches.len());
    let mut y = Vec::with_capacity(matches.len());

    for m in matches {
        let home = aliases.resolve(&m.home_team);
        let away = aliases.resolve(&m.away_team);
        let features = MatchFeatures::assemble(home, away, stats, results);
        x.push(features.to_vec());

        let label = match m.home_goals.cmp(&m.away_goals) {
            std::cmp::Ordering::Greater => 0,
            std::cmp::Ordering::Equal => 1,
            std::cmp::Ordering::Less => 2,
        };
        y.push(label);
    }

    (x, y)
}
