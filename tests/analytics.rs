use mindstats_terminal::analytics::{
    bottom_n_by_average, overall_average, spread, text_filter, top_n_by_average,
};
use mindstats_terminal::state::{NucleusCategory, NucleusKey, RankEntry};

fn categories(averages: &[f64]) -> Vec<NucleusCategory> {
    averages
        .iter()
        .enumerate()
        .map(|(idx, average)| {
            let key = NucleusKey::ALL[idx % NucleusKey::ALL.len()];
            NucleusCategory {
                key,
                display_name: key.display_name().to_string(),
                average: *average,
                components: Vec::new(),
            }
        })
        .collect()
}

fn entry(rank: u32, name: &str, team: &str, score: f64) -> RankEntry {
    RankEntry {
        rank,
        name: name.to_string(),
        position: "CM".to_string(),
        team: team.to_string(),
        nationality: String::new(),
        overall_score: score,
    }
}

#[test]
fn overall_average_of_empty_set_is_zero() {
    assert_eq!(overall_average(&[]), 0.0);
}

#[test]
fn overall_average_of_constant_set_is_that_value() {
    let cats = categories(&[74.0; 8]);
    assert_eq!(overall_average(&cats), 74.0);
}

#[test]
fn spread_is_zero_for_empty_and_constant_sets() {
    assert_eq!(spread(&[]), 0.0);
    let cats = categories(&[66.6; 5]);
    assert_eq!(spread(&cats), 0.0);
}

#[test]
fn spread_is_never_negative() {
    let cats = categories(&[55.0, 91.3, 70.2, 60.8]);
    assert!(spread(&cats) >= 0.0);
}

#[test]
fn known_overview_scenario() {
    let cats = categories(&[90.0, 85.0, 80.0, 75.0, 70.0, 65.0, 60.0, 55.0]);
    assert_eq!(overall_average(&cats), 72.5);
    assert_eq!(spread(&cats), 35.0);

    let top = top_n_by_average(&cats, 3);
    let scores: Vec<f64> = top.iter().map(|c| c.average).collect();
    assert_eq!(scores, vec![90.0, 85.0, 80.0]);
}

#[test]
fn top_n_clamps_to_available_count() {
    let cats = categories(&[70.0, 80.0]);
    assert_eq!(top_n_by_average(&cats, 5).len(), 2);
    assert_eq!(top_n_by_average(&cats, 0).len(), 0);
}

#[test]
fn top_n_is_stable_for_ties() {
    let mut cats = categories(&[80.0, 80.0, 80.0, 50.0]);
    cats[0].display_name = "first".to_string();
    cats[1].display_name = "second".to_string();
    cats[2].display_name = "third".to_string();

    let top = top_n_by_average(&cats, 3);
    let names: Vec<&str> = top.iter().map(|c| c.display_name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn bottom_n_orders_ascending_and_is_stable() {
    let mut cats = categories(&[90.0, 60.0, 60.0, 70.0]);
    cats[1].display_name = "weak-a".to_string();
    cats[2].display_name = "weak-b".to_string();

    let bottom = bottom_n_by_average(&cats, 2);
    let names: Vec<&str> = bottom.iter().map(|c| c.display_name.as_str()).collect();
    assert_eq!(names, vec!["weak-a", "weak-b"]);
}

#[test]
fn empty_search_term_returns_entries_unchanged() {
    let entries = vec![
        entry(1, "Marco Rossi", "SL Benfica", 88.5),
        entry(2, "David López", "SL Benfica", 84.8),
        entry(3, "Yuki Tanaka", "Sporting CP", 83.9),
    ];
    let filtered = text_filter(&entries, "");
    assert_eq!(filtered.len(), entries.len());
    for (kept, original) in filtered.iter().zip(entries.iter()) {
        assert_eq!(kept.name, original.name);
        assert_eq!(kept.rank, original.rank);
    }
}

#[test]
fn search_matches_name_or_team_case_insensitively() {
    let entries = vec![
        entry(1, "Marco Rossi", "SL Benfica", 88.5),
        entry(2, "David López", "SL Benfica", 84.8),
        entry(3, "Yuki Tanaka", "Sporting CP", 83.9),
    ];

    let by_name = text_filter(&entries, "tanaka");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Yuki Tanaka");

    let by_team = text_filter(&entries, "benfica");
    assert_eq!(by_team.len(), 2);

    let nothing = text_filter(&entries, "zzz");
    assert!(nothing.is_empty());
}

#[test]
fn search_preserves_relative_order_and_rank_numbers() {
    let entries = vec![
        entry(1, "Marco Rossi", "SL Benfica", 88.5),
        entry(2, "David López", "SL Benfica", 84.8),
        entry(3, "Yuki Tanaka", "Sporting CP", 83.9),
        entry(4, "Gonçalo Pereira", "Sporting CP", 82.8),
    ];
    let filtered = text_filter(&entries, "sporting");
    let ranks: Vec<u32> = filtered.iter().map(|e| e.rank).collect();
    // Rank numbers come from the service and are never reassigned.
    assert_eq!(ranks, vec![3, 4]);
}
