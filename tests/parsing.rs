use std::fs;
use std::path::PathBuf;

use mindstats_terminal::gateway::{
    parse_dashboard_json, parse_health_json, parse_leagues_json, parse_mental_nuclei_json,
    parse_player_detail_json, parse_players_json, parse_position_comparison_json,
    parse_positions_json, parse_teams_json, parse_top_performers_json,
};
use mindstats_terminal::state::NucleusKey;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_dashboard_fixture() {
    let raw = read_fixture("dashboard.json");
    let data = parse_dashboard_json(&raw).expect("fixture should parse");
    assert_eq!(data.system_status.total_players, 486);
    assert_eq!(data.system_status.status, "Active");
    assert_eq!(data.nuclei_overview.len(), 8);
    assert_eq!(data.recent_activity.len(), 3);

    // Dashboard performers arrive unranked; order becomes the ranking.
    let ranks: Vec<u32> = data.top_performers.iter().map(|p| p.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    assert_eq!(data.top_performers[0].name, "Marco Rossi");
}

#[test]
fn nuclei_overview_is_normalized_into_canonical_order() {
    let raw = read_fixture("mental_nuclei.json");
    let categories = parse_mental_nuclei_json(&raw).expect("fixture should parse");

    // The fixture keys are scrambled and include a retired extra key;
    // the result is exactly the eight known keys in canonical order.
    assert_eq!(categories.len(), 8);
    let keys: Vec<NucleusKey> = categories.iter().map(|c| c.key).collect();
    assert_eq!(keys, NucleusKey::ALL.to_vec());

    assert_eq!(categories[0].display_name, "Adaptation & Learning");
    assert_eq!(categories[0].average, 77.7);
    assert_eq!(categories[2].components, vec!["Press Synchrony"]);
}

#[test]
fn parses_players_fixture() {
    let raw = read_fixture("players.json");
    let players = parse_players_json(&raw).expect("fixture should parse");
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].player_id, 1);
    assert_eq!(players[0].team_name, "SL Benfica");
    assert_eq!(
        players[0].mental_nuclei.score(NucleusKey::SelfRegulationDiscipline),
        95.2
    );
    // No overall_score inside the nuclei map; the summary carries it.
    assert_eq!(players[1].overall_score, 84.8);
}

#[test]
fn parses_player_detail_fixture() {
    let raw = read_fixture("player_detail.json");
    let detail = parse_player_detail_json(&raw).expect("fixture should parse");
    assert_eq!(detail.basic_info.name, "Marco Rossi");
    assert_eq!(detail.basic_info.height, Some(178));
    assert_eq!(detail.season_stats.matches_played, 31);
    assert_eq!(detail.mental_nuclei.overall_score, 88.5);
    assert_eq!(detail.mental_nuclei.score(NucleusKey::DecisionJudgment), 90.5);
}

#[test]
fn player_detail_parses_without_season_stats() {
    let raw = r#"{
        "basic_info": {"name": "Trialist", "position": "CM", "team_name": "FC X"},
        "mental_nuclei": {"overall_score": 61.0}
    }"#;
    let detail = parse_player_detail_json(raw).expect("partial detail should parse");
    assert_eq!(detail.season_stats.matches_played, 0);
    assert_eq!(detail.mental_nuclei.adaptation_learning, 0.0);
}

#[test]
fn parses_top_performers_fixture() {
    let raw = read_fixture("top_performers.json");
    let entries = parse_top_performers_json(&raw).expect("fixture should parse");
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0].rank, 1);
    assert_eq!(entries[4].rank, 5);
    assert_eq!(entries[2].nationality, "Japan");
}

#[test]
fn parses_position_comparison_fixture() {
    let raw = read_fixture("position_comparison.json");
    let comparison = parse_position_comparison_json(&raw).expect("fixture should parse");
    assert_eq!(comparison.total_players, 42);
    assert_eq!(comparison.position_average.overall_score, 74.3);
    assert_eq!(comparison.players.len(), 6);
    assert_eq!(comparison.players[0].name, "Marco Rossi");
}

#[test]
fn parses_catalog_payloads() {
    let leagues = parse_leagues_json(r#"{"leagues": [{"id": 1, "name": "Liga Portugal"}]}"#)
        .expect("leagues should parse");
    assert_eq!(leagues.len(), 1);
    assert_eq!(leagues[0].name, "Liga Portugal");

    let positions =
        parse_positions_json(r#"{"positions": [{"code": "GK", "name": "Goalkeeper"}]}"#)
            .expect("positions should parse");
    assert_eq!(positions[0].code, "GK");

    let teams = parse_teams_json(r#"{"teams": [{"team_id": 3, "team_name": "FC Porto"}]}"#)
        .expect("teams should parse");
    assert_eq!(teams[0].team_id, 3);
}

#[test]
fn empty_envelopes_yield_empty_collections() {
    assert!(parse_leagues_json("{}").expect("empty ok").is_empty());
    assert!(parse_players_json(r#"{"players": []}"#).expect("empty ok").is_empty());
    assert!(parse_top_performers_json("{}").expect("empty ok").is_empty());
    assert!(parse_mental_nuclei_json("{}").expect("empty ok").is_empty());
}

#[test]
fn malformed_payloads_are_rejected() {
    assert!(parse_players_json("not json").is_err());
    assert!(parse_dashboard_json(r#"{"top_performers": []}"#).is_err());
    assert!(parse_player_detail_json("{}").is_err());
}

#[test]
fn parses_health_payload() {
    let health = parse_health_json(
        r#"{"status": "healthy", "timestamp": "2024-05-01T10:00:00", "database": "connected", "version": "1.0.0", "environment": "production"}"#,
    )
    .expect("health should parse");
    assert!(health.is_healthy());
    assert_eq!(health.version, "1.0.0");
}
