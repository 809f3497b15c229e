//! Reshaping of fetched and derived records into the exact shapes each
//! view renders. No aggregation happens here; that belongs to the
//! analytics module.

use crate::analytics::{RankTier, ScoreBand, rank_badge_tier, score_band};
use crate::state::{
    MentalNuclei, NucleusCategory, NucleusKey, PlayerDetail, PositionComparison, RankEntry,
};

pub const COMPARISON_TOP_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub label: String,
    pub full_label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarPoint {
    pub axis: String,
    pub value: f64,
    pub full_mark: f64,
}

pub fn nuclei_bar_points(categories: &[NucleusCategory]) -> Vec<BarPoint> {
    categories
        .iter()
        .map(|category| BarPoint {
            label: category.key.short_label().to_string(),
            full_label: category.display_name.clone(),
            value: category.average,
        })
        .collect()
}

pub fn nuclei_radar_points(categories: &[NucleusCategory]) -> Vec<RadarPoint> {
    categories
        .iter()
        .map(|category| RadarPoint {
            axis: category.key.short_label().to_string(),
            value: category.average,
            full_mark: 100.0,
        })
        .collect()
}

/// Axis order is a contract: always the canonical eight keys in order,
/// regardless of how the payload happened to be keyed.
pub fn detail_radar_points(nuclei: &MentalNuclei) -> Vec<RadarPoint> {
    NucleusKey::ALL
        .iter()
        .map(|key| RadarPoint {
            axis: key.short_label().to_string(),
            value: nuclei.score(*key),
            full_mark: 100.0,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct RankRow {
    pub rank: u32,
    pub tier: RankTier,
    pub name: String,
    pub team: String,
    pub position: String,
    pub nationality: String,
    pub score: f64,
    pub band: ScoreBand,
}

pub fn rank_rows(entries: &[RankEntry]) -> Vec<RankRow> {
    entries
        .iter()
        .map(|entry| RankRow {
            rank: entry.rank,
            tier: rank_badge_tier(entry.rank),
            name: entry.name.clone(),
            team: entry.team.clone(),
            position: entry.position.clone(),
            nationality: entry.nationality.clone(),
            score: entry.overall_score,
            band: score_band(entry.overall_score),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub place: usize,
    pub name: String,
    pub team: String,
    pub score: f64,
    pub is_selected: bool,
}

#[derive(Debug, Clone)]
pub struct ComparisonPanel {
    pub position: String,
    pub total_players: u32,
    pub player_score: f64,
    pub position_average: f64,
    pub top_players: Vec<ComparisonRow>,
}

pub fn comparison_panel(detail: &PlayerDetail, comparison: &PositionComparison) -> ComparisonPanel {
    let top_players = comparison
        .players
        .iter()
        .take(COMPARISON_TOP_COUNT)
        .enumerate()
        .map(|(idx, player)| ComparisonRow {
            place: idx + 1,
            name: player.name.clone(),
            team: player.team.clone(),
            score: player.overall_score,
            is_selected: player.name == detail.basic_info.name,
        })
        .collect();

    ComparisonPanel {
        position: detail.basic_info.position.clone(),
        total_players: comparison.total_players,
        player_score: detail.mental_nuclei.overall_score,
        position_average: comparison.position_average.overall_score,
        top_players,
    }
}
