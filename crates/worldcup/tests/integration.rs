use std::collections::HashMap;

use worldcup::{
    build_team_stats, generate_all_chunks, head_to_head, result_label, MatchFeatures,
    MatchRecord, ResultRecord, TeamAliases, TournamentRecord, FEATURE_DIM,
};

fn result(date: &str, home: &str, away: &str, hs: u32, aw: u32) -> ResultRecord {
    ResultRecord {
        date: date.to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_score: hs,
        away_score: aw,
    }
}

fn wc_match(id: u64, year: u32, home: &str, away: &str, hg: u32, ag: u32) -> MatchRecord {
    MatchRecord {
        year,
        stage: "Group A".to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_goals: hg,
        away_goals: ag,
        stadium: "Stadium".to_string(),
        city: "City".to_string(),
        attendance: Some(40_000),
        match_id: id,
    }
}

fn sample_results() -> Vec<ResultRecord> {
    vec![
        result("2010-07-03", "Germany", "Argentina", 4, 0),
        result("2014-07-13", "Germany", "Argentina", 1, 0),
        result("2012-08-15", "Argentina", "Germany", 3, 1),
        result("2019-10-09", "Argentina", "Germany", 2, 2),
        result("2018-07-15", "France", "Croatia", 4, 2),
        result("2021-06-15", "France", "Germany", 1, 0),
    ]
}

#[test]
fn outcome_counts_partition_played_for_every_team() {
    let stats = build_team_stats(&sample_results(), None);
    for (team, s) in &stats {
        assert_eq!(
            s.wins + s.draws + s.losses,
            s.played,
            "partition violated for {team}"
        );
    }
}

#[test]
fn chunk_result_label_agrees_with_stats_classification() {
    let matches = vec![
        wc_match(1, 2014, "Germany", "Argentina", 1, 0),
        wc_match(2, 2014, "Brazil", "Mexico", 0, 0),
        wc_match(3, 2014, "Spain", "Netherlands", 1, 5),
    ];

    for m in &matches {
        let as_result = result("2014-01-01", &m.home_team, &m.away_team, m.home_goals, m.away_goals);
        let stats = build_team_stats(&[as_result], None);
        let label = result_label(m);

        if stats[&m.home_team].wins == 1 {
            assert_eq!(label, format!("{} won", m.home_team));
        } else if stats[&m.home_team].draws == 1 {
            assert_eq!(label, "Draw");
        } else {
            assert_eq!(label, format!("{} won", m.away_team));
        }
    }
}

#[test]
fn training_and_serving_paths_agree_bit_for_bit() {
    let mut results = sample_results();
    results.push(result("1994-06-18", "United States", "Germany", 1, 3));
    let stats = build_team_stats(&results, None);
    let aliases = TeamAliases::with_defaults();

    // The match table spells the fixture one way, a request another; both
    // must resolve to the canonical names before assembly and produce the
    // same vector.
    let training = MatchFeatures::assemble(
        aliases.resolve("USA"),
        aliases.resolve("Germany FR"),
        &stats,
        &results,
    )
    .to_vec();
    let serving =
        MatchFeatures::assemble("United States", "Germany", &stats, &results).to_vec();

    assert_eq!(training.len(), FEATURE_DIM);
    for (a, b) in training.iter().zip(&serving) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    // Neither side fell back to the neutral block.
    assert_eq!(training[5], 1.0, "aliased home team must find its played count");
    assert_eq!(training[14], 1.0, "h2h tail must see the prior meeting");
}

#[test]
fn h2h_fraction_matches_feature_tail() {
    let results = sample_results();
    let stats = build_team_stats(&results, None);
    let h2h = head_to_head("Germany", "Argentina", &results);
    let v = MatchFeatures::assemble("Germany", "Argentina", &stats, &results).to_vec();
    assert_eq!(v[12], h2h.team1_win_rate);
    assert_eq!(v[13], h2h.draw_rate);
    assert_eq!(v[14], h2h.team2_win_rate);
}

#[test]
fn alias_resolution_reaches_canonical_stats() {
    let results = vec![result("1994-06-18", "United States", "Switzerland", 1, 1)];
    let stats = build_team_stats(&results, None);
    let aliases = TeamAliases::with_defaults();

    let canonical = aliases.resolve("USA");
    assert!(stats.contains_key(canonical));
    assert_eq!(stats[canonical].draws, 1);
}

#[test]
fn chunk_generation_is_deterministic() {
    let matches = vec![
        wc_match(1, 2014, "Germany", "Argentina", 1, 0),
        wc_match(2, 2018, "France", "Croatia", 4, 2),
    ];
    let cups = vec![TournamentRecord {
        year: 2014,
        host_country: "Brazil".to_string(),
        winner: "Germany".to_string(),
        runner_up: "Argentina".to_string(),
        third_place: "Netherlands".to_string(),
        goals_scored: 171,
        matches_played: 64,
        attendance: 3_386_810,
    }];

    let first = generate_all_chunks(&matches, &cups);
    let second = generate_all_chunks(&matches, &cups);
    assert_eq!(first, second);

    // matches + one tournament + four teams
    assert_eq!(first.len(), 2 + 1 + 4);

    let ids: Vec<&str> = first.iter().map(|c| c.id.as_str()).collect();
    let mut deduped: HashMap<&str, ()> = HashMap::new();
    for id in &ids {
        assert!(deduped.insert(id, ()).is_none(), "duplicate chunk id {id}");
    }
}
