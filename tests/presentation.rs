use mindstats_terminal::analytics::RankTier;
use mindstats_terminal::present::{
    comparison_panel, detail_radar_points, nuclei_bar_points, nuclei_radar_points, rank_rows,
};
use mindstats_terminal::state::{
    BasicInfo, ComparisonPlayer, MentalNuclei, NucleusCategory, NucleusKey, PlayerDetail,
    PositionAverage, PositionComparison, RankEntry, SeasonStats,
};

fn sample_nuclei() -> MentalNuclei {
    MentalNuclei {
        adaptation_learning: 85.2,
        attention_perception: 89.1,
        collective_integration: 82.3,
        decision_judgment: 90.5,
        energy_management: 87.8,
        initiative_risk: 91.2,
        resilience_recovery: 86.7,
        self_regulation_discipline: 95.2,
        overall_score: 88.5,
    }
}

fn sample_detail() -> PlayerDetail {
    PlayerDetail {
        basic_info: BasicInfo {
            name: "Marco Rossi".to_string(),
            position: "RB".to_string(),
            team_name: "SL Benfica".to_string(),
            nationality: "Italy".to_string(),
            age: Some(25),
            height: Some(178),
            weight: Some(72),
            preferred_foot: Some("Right".to_string()),
        },
        season_stats: SeasonStats::default(),
        mental_nuclei: sample_nuclei(),
    }
}

#[test]
fn detail_radar_axes_follow_canonical_order() {
    let points = detail_radar_points(&sample_nuclei());
    assert_eq!(points.len(), 8);

    let axes: Vec<&str> = points.iter().map(|p| p.axis.as_str()).collect();
    let expected: Vec<&str> = NucleusKey::ALL.iter().map(|k| k.short_label()).collect();
    assert_eq!(axes, expected);

    // First axis is adaptation, last is self-regulation, by contract.
    assert_eq!(points[0].value, 85.2);
    assert_eq!(points[7].value, 95.2);
    assert!(points.iter().all(|p| p.full_mark == 100.0));
}

#[test]
fn bar_points_relabel_without_aggregating() {
    let categories = vec![
        NucleusCategory {
            key: NucleusKey::EnergyManagement,
            display_name: "Energy Management".to_string(),
            average: 81.9,
            components: vec!["Decision Latency".to_string()],
        },
        NucleusCategory {
            key: NucleusKey::InitiativeRisk,
            display_name: "Initiative & Risk".to_string(),
            average: 70.1,
            components: Vec::new(),
        },
    ];
    let points = nuclei_bar_points(&categories);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].label, "Energy");
    assert_eq!(points[0].full_label, "Energy Management");
    assert_eq!(points[0].value, 81.9);
    assert_eq!(points[1].value, 70.1);
}

#[test]
fn overview_radar_points_mirror_categories() {
    let categories = vec![NucleusCategory {
        key: NucleusKey::ResilienceRecovery,
        display_name: "Resilience & Recovery".to_string(),
        average: 83.2,
        components: Vec::new(),
    }];
    let points = nuclei_radar_points(&categories);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].axis, "Resilience");
    assert_eq!(points[0].value, 83.2);
    assert_eq!(points[0].full_mark, 100.0);
}

#[test]
fn rank_rows_keep_service_ranks_and_assign_tiers() {
    let entries: Vec<RankEntry> = [(1, 88.5), (2, 84.8), (3, 83.9), (9, 71.0)]
        .iter()
        .map(|(rank, score)| RankEntry {
            rank: *rank,
            name: format!("Player {rank}"),
            position: "CM".to_string(),
            team: "FC X".to_string(),
            nationality: String::new(),
            overall_score: *score,
        })
        .collect();

    let rows = rank_rows(&entries);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].tier, RankTier::Gold);
    assert_eq!(rows[1].tier, RankTier::Silver);
    assert_eq!(rows[2].tier, RankTier::Bronze);
    assert_eq!(rows[3].tier, RankTier::None);
    // Rank 9 survives filtering untouched; rows never renumber.
    assert_eq!(rows[3].rank, 9);
}

#[test]
fn comparison_panel_takes_top_five_and_flags_the_selected_player() {
    let comparison = PositionComparison {
        total_players: 42,
        position_average: PositionAverage {
            overall_score: 74.3,
        },
        players: (0..8)
            .map(|i| ComparisonPlayer {
                name: if i == 3 {
                    "Marco Rossi".to_string()
                } else {
                    format!("Rival {i}")
                },
                team: "FC X".to_string(),
                overall_score: 90.0 - i as f64,
            })
            .collect(),
    };

    let panel = comparison_panel(&sample_detail(), &comparison);
    assert_eq!(panel.total_players, 42);
    assert_eq!(panel.player_score, 88.5);
    assert_eq!(panel.position_average, 74.3);
    assert_eq!(panel.top_players.len(), 5);
    assert_eq!(panel.top_players[0].place, 1);
    assert!(panel.top_players[3].is_selected);
    assert!(!panel.top_players[0].is_selected);
}
