//! Export the training set and its companion artifacts.
//!
//! Writes the feature matrix for the offline trainer plus the team-stats
//! snapshot and team list into the model directory, so the three artifacts
//! the serving bundle requires are always produced from the same data in
//! the same run. The trainer writes model.json next to them.

use anyhow::{Context, Result};
use tracing::info;

use analyst::config::AppConfig;
use predictor::build_training_set;
use worldcup::{build_team_stats, TeamAliases};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    let matches = worldcup::load_matches(&cfg.data_dir.join("WorldCupMatches.csv"))
        .context("Failed to load matches table")?;
    let results = worldcup::load_results(&cfg.data_dir.join("results.csv"))
        .context("Failed to load results table")?;
    info!("loaded {} matches, {} results", matches.len(), results.len());

    // Same alias table the service resolves request names through, so the
    // match table's spellings land on the same stats rows as serving.
    let aliases = match &cfg.aliases_file {
        Some(path) => TeamAliases::with_defaults_and_file(path)
            .with_context(|| format!("Failed to load alias table from {}", path.display()))?,
        None => TeamAliases::with_defaults(),
    };

    let stats = build_team_stats(&results, None);
    let (x, y) = build_training_set(&matches, &results, &stats, &aliases);
    info!(
        "training set: {} samples (home wins={}, draws={}, away wins={})",
        x.len(),
        y.iter().filter(|&&l| l == 0).count(),
        y.iter().filter(|&&l| l == 1).count(),
        y.iter().filter(|&&l| l == 2).count(),
    );

    std::fs::create_dir_all(&cfg.model_dir)?;

    let csv_path = cfg.model_dir.join("training_data.csv");
    let mut writer = csv::Writer::from_path(&csv_path)?;
    let mut header: Vec<String> = (0..worldcup::FEATURE_DIM).map(|i| format!("f{i}")).collect();
    header.push("label".to_string());
    writer.write_record(&header)?;
    for (row, label) in x.iter().zip(&y) {
        let mut record: Vec<String> = row.iter().map(f64::to_string).collect();
        record.push(label.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;

    std::fs::write(
        cfg.model_dir.join("team_stats.json"),
        serde_json::to_vec_pretty(&stats)?,
    )?;

    let mut teams: Vec<&String> = stats.keys().collect();
    teams.sort_unstable();
    std::fs::write(
        cfg.model_dir.join("teams.json"),
        serde_json::to_vec_pretty(&teams)?,
    )?;

    info!(
        "wrote training_data.csv, team_stats.json and teams.json ({} teams) to {}",
        teams.len(),
        cfg.model_dir.display()
    );
    Ok(())
}
