//! FIFA World Cup historical data
//!
//! Loading and cleaning of the raw match/tournament tables, per-team
//! aggregate statistics, head-to-head records, the fixed-layout feature
//! vector consumed by the outcome classifier, and generation of the text
//! chunks used for retrieval.

mod aliases;
mod chunks;
mod features;
mod head_to_head;
mod loader;
mod records;
mod stats;

pub use aliases::TeamAliases;
pub use chunks::{
    generate_all_chunks, match_chunks, result_label, sanitize_team_id, team_history_chunks,
    tournament_chunks, ChunkMetadata, TextChunk,
};
pub use features::{MatchFeatures, TeamFeatures, FEATURE_DIM, FEATURE_LAYOUT_VERSION};
pub use head_to_head::{head_to_head, HeadToHeadRecord};
pub use loader::{
    load_matches, load_results, load_tournaments, matches_from_reader, results_from_reader,
    tournaments_from_reader,
};
pub use records::{MatchRecord, ResultRecord, TournamentRecord};
pub use stats::{build_team_stats, TeamStats};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{table} row {row}: {message}")]
    InvalidField {
        table: &'static str,
        row: usize,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, DataError>;
