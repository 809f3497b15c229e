use std::cmp::Ordering;

use crate::state::{NucleusCategory, RankEntry};

/// Classification of an overall score into the display band used by every
/// view. Thresholds live in one table so all consumers classify alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Elite,
    Strong,
    Steady,
    Developing,
}

const SCORE_BANDS: &[(f64, ScoreBand)] = &[
    (80.0, ScoreBand::Elite),
    (70.0, ScoreBand::Strong),
    (60.0, ScoreBand::Steady),
];

pub fn score_band(score: f64) -> ScoreBand {
    for (threshold, band) in SCORE_BANDS {
        if score >= *threshold {
            return *band;
        }
    }
    ScoreBand::Developing
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTier {
    Gold,
    Silver,
    Bronze,
    None,
}

/// Total over all positive ranks; everything past the podium is `None`.
pub fn rank_badge_tier(rank: u32) -> RankTier {
    match rank {
        1 => RankTier::Gold,
        2 => RankTier::Silver,
        3 => RankTier::Bronze,
        _ => RankTier::None,
    }
}

/// Arithmetic mean of the category averages. Defined as 0 for the empty
/// set so an empty overview renders as "0%" instead of NaN.
pub fn overall_average(categories: &[NucleusCategory]) -> f64 {
    if categories.is_empty() {
        return 0.0;
    }
    let sum: f64 = categories.iter().map(|c| c.average).sum();
    sum / categories.len() as f64
}

/// `max(average) - min(average)` across categories; 0 for the empty set.
pub fn spread(categories: &[NucleusCategory]) -> f64 {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for category in categories {
        min = min.min(category.average);
        max = max.max(category.average);
    }
    if categories.is_empty() { 0.0 } else { max - min }
}

/// Strongest `n` categories, descending by average. Stable: ties keep
/// their input order. `n` is clamped to the available count.
pub fn top_n_by_average(categories: &[NucleusCategory], n: usize) -> Vec<&NucleusCategory> {
    let mut out: Vec<&NucleusCategory> = categories.iter().collect();
    out.sort_by(|a, b| b.average.partial_cmp(&a.average).unwrap_or(Ordering::Equal));
    out.truncate(n);
    out
}

/// Weakest `n` categories, ascending by average; same stability contract.
pub fn bottom_n_by_average(categories: &[NucleusCategory], n: usize) -> Vec<&NucleusCategory> {
    let mut out: Vec<&NucleusCategory> = categories.iter().collect();
    out.sort_by(|a, b| a.average.partial_cmp(&b.average).unwrap_or(Ordering::Equal));
    out.truncate(n);
    out
}

/// Case-insensitive substring match against player name or team. An
/// empty term returns every entry in its original order. Rank numbers
/// are never reassigned by filtering.
pub fn text_filter<'a>(entries: &'a [RankEntry], term: &str) -> Vec<&'a RankEntry> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| {
            entry.name.to_lowercase().contains(&needle)
                || entry.team.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_thresholds_are_inclusive() {
        assert_eq!(score_band(80.0), ScoreBand::Elite);
        assert_eq!(score_band(79.9), ScoreBand::Strong);
        assert_eq!(score_band(70.0), ScoreBand::Strong);
        assert_eq!(score_band(60.0), ScoreBand::Steady);
        assert_eq!(score_band(59.9), ScoreBand::Developing);
    }

    #[test]
    fn podium_tiers_then_none() {
        assert_eq!(rank_badge_tier(1), RankTier::Gold);
        assert_eq!(rank_badge_tier(2), RankTier::Silver);
        assert_eq!(rank_badge_tier(3), RankTier::Bronze);
        assert_eq!(rank_badge_tier(4), RankTier::None);
        assert_eq!(rank_badge_tier(u32::MAX), RankTier::None);
    }

    #[test]
    fn percent_formatting_keeps_one_decimal() {
        assert_eq!(format_percent(72.5), "72.5%");
        assert_eq!(format_percent(0.0), "0.0%");
    }
}
