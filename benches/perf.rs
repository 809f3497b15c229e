use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use mindstats_terminal::analytics::{overall_average, text_filter, top_n_by_average};
use mindstats_terminal::gateway::{parse_player_detail_json, parse_top_performers_json};
use mindstats_terminal::state::{NucleusCategory, NucleusKey, RankEntry};

fn sample_leaderboard(count: usize) -> Vec<RankEntry> {
    (0..count)
        .map(|i| RankEntry {
            rank: i as u32 + 1,
            name: format!("Player {i}"),
            position: ["GK", "CB", "CM", "ST"][i % 4].to_string(),
            team: format!("Club {}", i % 18),
            nationality: "Portugal".to_string(),
            overall_score: 95.0 - (i as f64) * 0.1,
        })
        .collect()
}

fn sample_categories() -> Vec<NucleusCategory> {
    NucleusKey::ALL
        .iter()
        .enumerate()
        .map(|(i, key)| NucleusCategory {
            key: *key,
            display_name: key.display_name().to_string(),
            average: 60.0 + i as f64 * 3.5,
            components: vec!["Error Bounce Back".to_string()],
        })
        .collect()
}

fn leaderboard_json(count: usize) -> String {
    let rows: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"rank": {}, "name": "Player {i}", "position": "CM", "team": "Club {}", "overall_score": {:.1}, "nationality": "Portugal"}}"#,
                i + 1,
                i % 18,
                95.0 - (i as f64) * 0.1
            )
        })
        .collect();
    format!(r#"{{"top_performers": [{}]}}"#, rows.join(","))
}

fn bench_player_detail_parse(c: &mut Criterion) {
    c.bench_function("player_detail_parse", |b| {
        b.iter(|| {
            let detail = parse_player_detail_json(black_box(PLAYER_JSON)).unwrap();
            black_box(detail.mental_nuclei.overall_score);
        })
    });
}

fn bench_leaderboard_parse(c: &mut Criterion) {
    let raw = leaderboard_json(100);
    c.bench_function("leaderboard_parse_100", |b| {
        b.iter(|| {
            let entries = parse_top_performers_json(black_box(&raw)).unwrap();
            black_box(entries.len());
        })
    });
}

fn bench_text_filter(c: &mut Criterion) {
    let entries = sample_leaderboard(300);
    c.bench_function("text_filter_300", |b| {
        b.iter(|| {
            let hits = text_filter(black_box(&entries), black_box("club 7"));
            black_box(hits.len());
        })
    });
}

fn bench_derived_overview(c: &mut Criterion) {
    let categories = sample_categories();
    c.bench_function("derived_overview", |b| {
        b.iter(|| {
            let avg = overall_average(black_box(&categories));
            let top = top_n_by_average(black_box(&categories), 3);
            black_box((avg, top.len()));
        })
    });
}

criterion_group!(
    benches,
    bench_player_detail_parse,
    bench_leaderboard_parse,
    bench_text_filter,
    bench_derived_overview
);
criterion_main!(benches);

const PLAYER_JSON: &str = r#"{
  "basic_info": {
    "name": "Marco Rossi",
    "position": "RB",
    "team_name": "SL Benfica",
    "nationality": "Italy",
    "age": 25,
    "height": 178,
    "weight": 72,
    "preferred_foot": "Right"
  },
  "season_stats": {
    "matches_played": 31,
    "minutes_played": 2688,
    "goals": 4,
    "assists": 7,
    "yellow_cards": 3
  },
  "mental_nuclei": {
    "adaptation_learning": 85.2,
    "attention_perception": 89.1,
    "collective_integration": 82.3,
    "decision_judgment": 90.5,
    "energy_management": 87.8,
    "initiative_risk": 91.2,
    "resilience_recovery": 86.7,
    "self_regulation_discipline": 95.2,
    "overall_score": 88.5
  }
}"#;
