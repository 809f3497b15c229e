use std::collections::HashMap;
use std::env;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use thiserror::Error;

use crate::http_client::http_client;
use crate::state::{
    ActivityEntry, DashboardData, LeagueRef, NucleusCategory, NucleusKey, PlayerDetail,
    PlayerSummary, PositionComparison, PositionRef, RankEntry, SystemStatus, TeamRef,
};

const PRODUCTION_BASE: &str = "https://mindstats-backend.ondigitalocean.app/api";
const DEVELOPMENT_BASE: &str = "http://localhost:8000/api";

static API_BASE: OnceCell<String> = OnceCell::new();

/// Base target for every request, resolved once at process start and
/// immutable thereafter. `MINDSTATS_API_BASE` overrides; otherwise
/// `MINDSTATS_ENV=production` selects the production host.
pub fn api_base() -> &'static str {
    API_BASE.get_or_init(|| {
        if let Ok(base) = env::var("MINDSTATS_API_BASE") {
            let trimmed = base.trim().trim_end_matches('/');
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
        match env::var("MINDSTATS_ENV").as_deref() {
            Ok("production") => PRODUCTION_BASE.to_string(),
            _ => DEVELOPMENT_BASE.to_string(),
        }
    })
}

/// The only error the gateway surfaces. Network failure, non-2xx status
/// and malformed bodies all collapse into this shape; callers scope it to
/// a slice and decide how to present it.
#[derive(Debug, Clone, Error)]
#[error("request to {endpoint} failed{}", .status.map_or(String::new(), |s| format!(" with status {s}")))]
pub struct RequestFailed {
    pub endpoint: String,
    pub status: Option<u16>,
}

impl RequestFailed {
    fn new(endpoint: &str, status: Option<u16>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            status,
        }
    }
}

pub type GatewayResult<T> = Result<T, RequestFailed>;

/// Sentinel "All …" selections and empty strings are omitted from query
/// strings entirely; the service treats omission as "no filter", not the
/// literal sentinel text.
pub fn sentinel_filter(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "All" || trimmed.starts_with("All ") {
        None
    } else {
        Some(trimmed)
    }
}

fn request(path: &str, query: &[(&str, Option<String>)]) -> GatewayResult<String> {
    let url = format!("{}{path}", api_base());
    request_url(path, &url, query)
}

fn request_url(endpoint: &str, url: &str, query: &[(&str, Option<String>)]) -> GatewayResult<String> {
    let client = http_client().map_err(|_| RequestFailed::new(endpoint, None))?;
    let pairs: Vec<(&str, &str)> = query
        .iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (*name, v)))
        .collect();
    let resp = client
        .get(url)
        .query(&pairs)
        .send()
        .map_err(|err| RequestFailed::new(endpoint, err.status().map(|s| s.as_u16())))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(RequestFailed::new(endpoint, Some(status.as_u16())));
    }
    resp.text()
        .map_err(|_| RequestFailed::new(endpoint, Some(status.as_u16())))
}

fn decode<T>(endpoint: &str, parsed: Result<T>) -> GatewayResult<T> {
    parsed.map_err(|_| RequestFailed::new(endpoint, None))
}

pub fn fetch_leagues() -> GatewayResult<Vec<LeagueRef>> {
    let body = request("/leagues", &[])?;
    decode("/leagues", parse_leagues_json(&body))
}

pub fn fetch_positions() -> GatewayResult<Vec<PositionRef>> {
    let body = request("/positions", &[])?;
    decode("/positions", parse_positions_json(&body))
}

pub fn fetch_teams() -> GatewayResult<Vec<TeamRef>> {
    let body = request("/teams", &[])?;
    decode("/teams", parse_teams_json(&body))
}

pub fn fetch_dashboard() -> GatewayResult<DashboardData> {
    let body = request("/dashboard", &[])?;
    decode("/dashboard", parse_dashboard_json(&body))
}

pub fn fetch_players(
    position: Option<&str>,
    team: Option<&str>,
    limit: u32,
) -> GatewayResult<Vec<PlayerSummary>> {
    let body = request(
        "/players",
        &[
            ("position", position.map(str::to_string)),
            ("team", team.map(str::to_string)),
            ("limit", Some(limit.to_string())),
        ],
    )?;
    decode("/players", parse_players_json(&body))
}

pub fn fetch_player_detail(player_id: u32, season: &str) -> GatewayResult<PlayerDetail> {
    let path = format!("/players/{player_id}");
    let body = request(&path, &[("season", Some(season.to_string()))])?;
    decode(&path, parse_player_detail_json(&body))
}

pub fn fetch_top_performers(
    position: Option<&str>,
    limit: u32,
    season: &str,
) -> GatewayResult<Vec<RankEntry>> {
    let body = request(
        "/top-performers",
        &[
            ("position", position.map(str::to_string)),
            ("limit", Some(limit.to_string())),
            ("season", Some(season.to_string())),
        ],
    )?;
    decode("/top-performers", parse_top_performers_json(&body))
}

pub fn fetch_mental_nuclei(season: &str) -> GatewayResult<Vec<NucleusCategory>> {
    let body = request("/mental-nuclei", &[("season", Some(season.to_string()))])?;
    decode("/mental-nuclei", parse_mental_nuclei_json(&body))
}

pub fn fetch_position_comparison(position: &str, season: &str) -> GatewayResult<PositionComparison> {
    let body = request(
        "/position-comparison",
        &[
            ("position", Some(position.to_string())),
            ("season", Some(season.to_string())),
        ],
    )?;
    decode("/position-comparison", parse_position_comparison_json(&body))
}

/// The health endpoint lives at the server root, beside `/api`.
pub fn health_check() -> GatewayResult<HealthStatus> {
    let url = format!("{}/health", api_base().trim_end_matches("/api"));
    let body = request_url("/health", &url, &[])?;
    decode("/health", parse_health_json(&body))
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub environment: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[derive(Debug, Deserialize)]
struct LeaguesEnvelope {
    #[serde(default)]
    leagues: Vec<LeagueRef>,
}

#[derive(Debug, Deserialize)]
struct PositionsEnvelope {
    #[serde(default)]
    positions: Vec<PositionRef>,
}

#[derive(Debug, Deserialize)]
struct TeamsEnvelope {
    #[serde(default)]
    teams: Vec<TeamRef>,
}

#[derive(Debug, Deserialize)]
struct PlayersEnvelope {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
struct TopPerformersEnvelope {
    #[serde(default)]
    top_performers: Vec<RankEntry>,
}

#[derive(Debug, Deserialize)]
struct MentalNucleiEnvelope {
    #[serde(default)]
    mental_nuclei: HashMap<String, NucleusWire>,
}

#[derive(Debug, Deserialize)]
struct NucleusWire {
    name: String,
    average: f64,
    #[serde(default)]
    components: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DashboardEnvelope {
    system_status: SystemStatus,
    #[serde(default)]
    mental_nuclei_overview: HashMap<String, NucleusWire>,
    #[serde(default)]
    top_performers: Vec<RankEntry>,
    #[serde(default)]
    recent_activity: Vec<ActivityEntry>,
}

pub fn parse_leagues_json(raw: &str) -> Result<Vec<LeagueRef>> {
    let parsed: LeaguesEnvelope = serde_json::from_str(raw).context("invalid leagues json")?;
    Ok(parsed.leagues)
}

pub fn parse_positions_json(raw: &str) -> Result<Vec<PositionRef>> {
    let parsed: PositionsEnvelope = serde_json::from_str(raw).context("invalid positions json")?;
    Ok(parsed.positions)
}

pub fn parse_teams_json(raw: &str) -> Result<Vec<TeamRef>> {
    let parsed: TeamsEnvelope = serde_json::from_str(raw).context("invalid teams json")?;
    Ok(parsed.teams)
}

pub fn parse_players_json(raw: &str) -> Result<Vec<PlayerSummary>> {
    let parsed: PlayersEnvelope = serde_json::from_str(raw).context("invalid players json")?;
    Ok(parsed.players)
}

pub fn parse_player_detail_json(raw: &str) -> Result<PlayerDetail> {
    serde_json::from_str(raw).context("invalid player detail json")
}

pub fn parse_top_performers_json(raw: &str) -> Result<Vec<RankEntry>> {
    let parsed: TopPerformersEnvelope =
        serde_json::from_str(raw).context("invalid top performers json")?;
    Ok(assign_missing_ranks(parsed.top_performers))
}

pub fn parse_mental_nuclei_json(raw: &str) -> Result<Vec<NucleusCategory>> {
    let parsed: MentalNucleiEnvelope =
        serde_json::from_str(raw).context("invalid mental nuclei json")?;
    Ok(normalize_nuclei(parsed.mental_nuclei))
}

pub fn parse_position_comparison_json(raw: &str) -> Result<PositionComparison> {
    serde_json::from_str(raw).context("invalid position comparison json")
}

pub fn parse_dashboard_json(raw: &str) -> Result<DashboardData> {
    let parsed: DashboardEnvelope = serde_json::from_str(raw).context("invalid dashboard json")?;
    Ok(DashboardData {
        system_status: parsed.system_status,
        nuclei_overview: normalize_nuclei(parsed.mental_nuclei_overview),
        top_performers: assign_missing_ranks(parsed.top_performers),
        recent_activity: parsed.recent_activity,
    })
}

pub fn parse_health_json(raw: &str) -> Result<HealthStatus> {
    serde_json::from_str(raw).context("invalid health json")
}

/// Reorder the wire map into canonical key order. Unknown keys are
/// dropped; missing keys are skipped rather than invented.
fn normalize_nuclei(mut wire: HashMap<String, NucleusWire>) -> Vec<NucleusCategory> {
    let mut out = Vec::with_capacity(NucleusKey::ALL.len());
    for key in NucleusKey::ALL {
        let Some(entry) = wire.remove(key.as_str()) else {
            continue;
        };
        out.push(NucleusCategory {
            key,
            display_name: entry.name,
            average: entry.average,
            components: entry.components,
        });
    }
    out
}

/// Dashboard top performers arrive unranked; their order is the ranking.
fn assign_missing_ranks(mut entries: Vec<RankEntry>) -> Vec<RankEntry> {
    for (idx, entry) in entries.iter_mut().enumerate() {
        if entry.rank == 0 {
            entry.rank = idx as u32 + 1;
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_values_are_omitted() {
        assert_eq!(sentinel_filter("All Positions"), None);
        assert_eq!(sentinel_filter("All Teams"), None);
        assert_eq!(sentinel_filter("All"), None);
        assert_eq!(sentinel_filter(""), None);
        assert_eq!(sentinel_filter("  "), None);
        assert_eq!(sentinel_filter("GK"), Some("GK"));
        assert_eq!(sentinel_filter("Allied FC"), Some("Allied FC"));
    }

    #[test]
    fn request_failed_display_mentions_endpoint_and_status() {
        let err = RequestFailed::new("/players", Some(503));
        let text = err.to_string();
        assert!(text.contains("/players"));
        assert!(text.contains("503"));

        let err = RequestFailed::new("/health", None);
        assert_eq!(err.to_string(), "request to /health failed");
    }
}
