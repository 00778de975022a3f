//! Loading of the persisted model bundle.
//!
//! A usable predictor is three files that only make sense together: the
//! serialized classifier, the team-stats snapshot its training features
//! were built from, and the sorted team list. Mixing a classifier with a
//! stats snapshot from another training run degrades accuracy without
//! failing loudly, so they are loaded as one unit from one directory and
//! the absence of any file makes the whole bundle unavailable.

use std::collections::HashMap;
use std::path::Path;

use worldcup::TeamStats;

use crate::forest::ForestClassifier;
use crate::Result;

#[derive(Debug)]
pub struct ModelBundle {
    pub classifier: ForestClassifier,
    pub team_stats: HashMap<String, TeamStats>,
    pub teams: Vec<String>,
}

/// Load `model.json`, `team_stats.json` and `teams.json` from `dir`.
pub fn load_bundle(dir: &Path) -> Result<ModelBundle> {
    let classifier = ForestClassifier::from_json(&std::fs::read(dir.join("model.json"))?)?;
    let team_stats: HashMap<String, TeamStats> =
        serde_json::from_slice(&std::fs::read(dir.join("team_stats.json"))?)?;
    let mut teams: Vec<String> = serde_json::from_slice(&std::fs::read(dir.join("teams.json"))?)?;
    teams.sort_unstable();

    Ok(ModelBundle {
        classifier,
        team_stats,
        teams,
    })
}
