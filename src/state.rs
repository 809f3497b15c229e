use std::collections::VecDeque;
use std::env;
use std::time::SystemTime;

use serde::Deserialize;

use crate::analytics;

pub const ALL_LEAGUES: &str = "All Leagues";
pub const ALL_POSITIONS: &str = "All Positions";
pub const ALL_TEAMS: &str = "All Teams";

pub const SEASONS: &[&str] = &["2023/2024", "2022/2023", "2021/2022"];
pub const LEADERBOARD_LIMITS: &[u32] = &[10, 20, 50, 100];
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 20;
pub const DEFAULT_ROSTER_LIMIT: u32 = 100;

pub fn default_season() -> String {
    env::var("MINDSTATS_SEASON")
        .ok()
        .filter(|val| SEASONS.contains(&val.as_str()))
        .unwrap_or_else(|| SEASONS[0].to_string())
}

pub fn roster_limit() -> u32 {
    env::var("MINDSTATS_ROSTER_LIMIT")
        .ok()
        .and_then(|val| val.parse::<u32>().ok())
        .unwrap_or(DEFAULT_ROSTER_LIMIT)
        .max(1)
}

/// The eight mental-performance categories, in canonical order.
///
/// This order is the radar-axis contract for every consumer; it never
/// depends on map iteration order of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NucleusKey {
    AdaptationLearning,
    AttentionPerception,
    CollectiveIntegration,
    DecisionJudgment,
    EnergyManagement,
    InitiativeRisk,
    ResilienceRecovery,
    SelfRegulationDiscipline,
}

impl NucleusKey {
    pub const ALL: [NucleusKey; 8] = [
        NucleusKey::AdaptationLearning,
        NucleusKey::AttentionPerception,
        NucleusKey::CollectiveIntegration,
        NucleusKey::DecisionJudgment,
        NucleusKey::EnergyManagement,
        NucleusKey::InitiativeRisk,
        NucleusKey::ResilienceRecovery,
        NucleusKey::SelfRegulationDiscipline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NucleusKey::AdaptationLearning => "adaptation_learning",
            NucleusKey::AttentionPerception => "attention_perception",
            NucleusKey::CollectiveIntegration => "collective_integration",
            NucleusKey::DecisionJudgment => "decision_judgment",
            NucleusKey::EnergyManagement => "energy_management",
            NucleusKey::InitiativeRisk => "initiative_risk",
            NucleusKey::ResilienceRecovery => "resilience_recovery",
            NucleusKey::SelfRegulationDiscipline => "self_regulation_discipline",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            NucleusKey::AdaptationLearning => "Adaptation & Learning",
            NucleusKey::AttentionPerception => "Attention & Perception",
            NucleusKey::CollectiveIntegration => "Collective Integration",
            NucleusKey::DecisionJudgment => "Decision & Judgment",
            NucleusKey::EnergyManagement => "Energy Management",
            NucleusKey::InitiativeRisk => "Initiative & Risk",
            NucleusKey::ResilienceRecovery => "Resilience & Recovery",
            NucleusKey::SelfRegulationDiscipline => "Self-Regulation & Discipline",
        }
    }

    /// Short label for chart axes where the full name does not fit.
    pub fn short_label(self) -> &'static str {
        match self {
            NucleusKey::AdaptationLearning => "Adaptation",
            NucleusKey::AttentionPerception => "Attention",
            NucleusKey::CollectiveIntegration => "Collective",
            NucleusKey::DecisionJudgment => "Decision",
            NucleusKey::EnergyManagement => "Energy",
            NucleusKey::InitiativeRisk => "Initiative",
            NucleusKey::ResilienceRecovery => "Resilience",
            NucleusKey::SelfRegulationDiscipline => "Self-Reg",
        }
    }
}

/// Per-player category scores plus the service-computed overall score.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MentalNuclei {
    #[serde(default)]
    pub adaptation_learning: f64,
    #[serde(default)]
    pub attention_perception: f64,
    #[serde(default)]
    pub collective_integration: f64,
    #[serde(default)]
    pub decision_judgment: f64,
    #[serde(default)]
    pub energy_management: f64,
    #[serde(default)]
    pub initiative_risk: f64,
    #[serde(default)]
    pub resilience_recovery: f64,
    #[serde(default)]
    pub self_regulation_discipline: f64,
    #[serde(default)]
    pub overall_score: f64,
}

impl MentalNuclei {
    pub fn score(&self, key: NucleusKey) -> f64 {
        match key {
            NucleusKey::AdaptationLearning => self.adaptation_learning,
            NucleusKey::AttentionPerception => self.attention_perception,
            NucleusKey::CollectiveIntegration => self.collective_integration,
            NucleusKey::DecisionJudgment => self.decision_judgment,
            NucleusKey::EnergyManagement => self.energy_management,
            NucleusKey::InitiativeRisk => self.initiative_risk,
            NucleusKey::ResilienceRecovery => self.resilience_recovery,
            NucleusKey::SelfRegulationDiscipline => self.self_regulation_discipline,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSummary {
    pub player_id: u32,
    pub name: String,
    pub position: String,
    pub team_name: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub age: Option<u32>,
    pub overall_score: f64,
    #[serde(default)]
    pub mental_nuclei: MentalNuclei,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BasicInfo {
    pub name: String,
    pub position: String,
    pub team_name: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub preferred_foot: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonStats {
    #[serde(default)]
    pub matches_played: u32,
    #[serde(default)]
    pub minutes_played: u32,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub yellow_cards: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerDetail {
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub season_stats: SeasonStats,
    pub mental_nuclei: MentalNuclei,
}

/// One of the eight categories with its service-computed league average.
/// The average is never recomputed locally.
#[derive(Debug, Clone, PartialEq)]
pub struct NucleusCategory {
    pub key: NucleusKey,
    pub display_name: String,
    pub average: f64,
    pub components: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankEntry {
    /// 1-based rank as assigned by the service; the client never re-sorts.
    #[serde(default)]
    pub rank: u32,
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub nationality: String,
    pub overall_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonPlayer {
    pub name: String,
    #[serde(default)]
    pub team: String,
    pub overall_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PositionAverage {
    pub overall_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PositionComparison {
    pub total_players: u32,
    pub position_average: PositionAverage,
    #[serde(default)]
    pub players: Vec<ComparisonPlayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    pub total_players: u32,
    pub mental_metrics: u32,
    pub status: String,
    #[serde(default)]
    pub last_update: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityEntry {
    pub action: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct DashboardData {
    pub system_status: SystemStatus,
    pub nuclei_overview: Vec<NucleusCategory>,
    pub top_performers: Vec<RankEntry>,
    pub recent_activity: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueRef {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PositionRef {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamRef {
    pub team_id: u32,
    pub team_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    League,
    Position,
    Team,
    Player,
    Season,
    SearchText,
    ResultLimit,
}

impl FilterField {
    /// Cascade table: fields whose player-scoped context a change to this
    /// field destroys. Kept in one place so the invariant is testable.
    pub fn invalidates(self) -> &'static [FilterField] {
        match self {
            FilterField::League | FilterField::Position | FilterField::Team => {
                &[FilterField::Player]
            }
            _ => &[],
        }
    }
}

/// The operator's current filter set. Drives every selection-dependent
/// fetch; `player` is only meaningful relative to `position`/`team`.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub league: String,
    pub position: String,
    pub team: String,
    pub player: Option<u32>,
    pub season: String,
    pub search_text: String,
    pub result_limit: u32,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            league: ALL_LEAGUES.to_string(),
            position: ALL_POSITIONS.to_string(),
            team: ALL_TEAMS.to_string(),
            player: None,
            season: default_season(),
            search_text: String::new(),
            result_limit: DEFAULT_LEADERBOARD_LIMIT,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

/// Dependency keys for the generation-tagged staleness mechanism. One
/// monotonic counter per key, not per request, so concurrent requests
/// sharing a key stay comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepKey {
    Dashboard,
    Overview,
    Roster,
    Leaderboard,
    Detail,
    Comparison,
}

#[derive(Debug, Clone, Default)]
pub struct Generations {
    dashboard: u64,
    overview: u64,
    roster: u64,
    leaderboard: u64,
    detail: u64,
    comparison: u64,
}

impl Generations {
    pub fn bump(&mut self, key: DepKey) -> u64 {
        let slot = self.slot_mut(key);
        *slot += 1;
        *slot
    }

    pub fn current(&self, key: DepKey) -> u64 {
        match key {
            DepKey::Dashboard => self.dashboard,
            DepKey::Overview => self.overview,
            DepKey::Roster => self.roster,
            DepKey::Leaderboard => self.leaderboard,
            DepKey::Detail => self.detail,
            DepKey::Comparison => self.comparison,
        }
    }

    fn slot_mut(&mut self, key: DepKey) -> &mut u64 {
        match key {
            DepKey::Dashboard => &mut self.dashboard,
            DepKey::Overview => &mut self.overview,
            DepKey::Roster => &mut self.roster,
            DepKey::Leaderboard => &mut self.leaderboard,
            DepKey::Detail => &mut self.detail,
            DepKey::Comparison => &mut self.comparison,
        }
    }
}

/// An independently loaded, independently erroring unit of fetched data.
#[derive(Debug, Clone, Default)]
pub struct Slice<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> Slice<T> {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn clear(&mut self) {
        *self = Slice::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceKey {
    Leagues,
    Positions,
    Teams,
    Dashboard,
    Overview,
    Roster,
    Leaderboard,
    Detail,
    Comparison,
}

impl SliceKey {
    pub fn label(self) -> &'static str {
        match self {
            SliceKey::Leagues => "leagues",
            SliceKey::Positions => "positions",
            SliceKey::Teams => "teams",
            SliceKey::Dashboard => "dashboard",
            SliceKey::Overview => "nuclei overview",
            SliceKey::Roster => "players",
            SliceKey::Leaderboard => "top performers",
            SliceKey::Detail => "player detail",
            SliceKey::Comparison => "position comparison",
        }
    }

    fn dep_key(self) -> Option<DepKey> {
        match self {
            SliceKey::Dashboard => Some(DepKey::Dashboard),
            SliceKey::Overview => Some(DepKey::Overview),
            SliceKey::Roster => Some(DepKey::Roster),
            SliceKey::Leaderboard => Some(DepKey::Leaderboard),
            SliceKey::Detail => Some(DepKey::Detail),
            SliceKey::Comparison => Some(DepKey::Comparison),
            // Catalog slices are fetched once and never go stale.
            SliceKey::Leagues | SliceKey::Positions | SliceKey::Teams => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub selection: Selection,
    pub generations: Generations,
    pub leagues: Slice<Vec<LeagueRef>>,
    pub positions: Slice<Vec<PositionRef>>,
    pub teams: Slice<Vec<TeamRef>>,
    pub dashboard: Slice<Option<DashboardData>>,
    pub overview: Slice<Vec<NucleusCategory>>,
    pub roster: Slice<Vec<PlayerSummary>>,
    pub leaderboard: Slice<Vec<RankEntry>>,
    pub detail: Slice<Option<PlayerDetail>>,
    pub comparison: Slice<Option<PositionComparison>>,
    pub service_healthy: Option<bool>,
    pub logs: VecDeque<String>,
    pub last_refresh: Option<SystemTime>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            selection: Selection::new(),
            generations: Generations::default(),
            leagues: Slice::default(),
            positions: Slice::default(),
            teams: Slice::default(),
            dashboard: Slice::default(),
            overview: Slice::default(),
            roster: Slice::default(),
            leaderboard: Slice::default(),
            detail: Slice::default(),
            comparison: Slice::default(),
            service_healthy: None,
            logs: VecDeque::with_capacity(200),
            last_refresh: None,
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push_back(line.into());
        while self.logs.len() > 200 {
            self.logs.pop_front();
        }
    }

    pub fn selected_player(&self) -> Option<&PlayerSummary> {
        let id = self.selection.player?;
        self.roster.data.iter().find(|p| p.player_id == id)
    }

    /// Leaderboard rows surviving the client-side search. Relative order
    /// and the service-assigned rank numbers are preserved.
    pub fn filtered_performers(&self) -> Vec<&RankEntry> {
        analytics::text_filter(&self.leaderboard.data, &self.selection.search_text)
    }

    /// Hard invariant: no player-scoped view survives a filter change.
    /// Clears the selection and both player slices, and bumps their
    /// generations so in-flight responses are dropped on arrival.
    pub fn clear_player_scope(&mut self) {
        self.selection.player = None;
        self.detail.clear();
        self.comparison.clear();
        self.generations.bump(DepKey::Detail);
        self.generations.bump(DepKey::Comparison);
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetLeagues(Vec<LeagueRef>),
    SetPositions(Vec<PositionRef>),
    SetTeams(Vec<TeamRef>),
    SetDashboard {
        generation: u64,
        data: DashboardData,
    },
    SetOverview {
        generation: u64,
        categories: Vec<NucleusCategory>,
    },
    SetRoster {
        generation: u64,
        players: Vec<PlayerSummary>,
    },
    SetLeaderboard {
        generation: u64,
        entries: Vec<RankEntry>,
    },
    SetDetail {
        generation: u64,
        detail: PlayerDetail,
    },
    SetComparison {
        generation: u64,
        comparison: PositionComparison,
    },
    SliceError {
        slice: SliceKey,
        generation: u64,
        message: String,
    },
    Health {
        ok: bool,
        message: String,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchCatalog,
    FetchDashboard {
        generation: u64,
    },
    FetchOverview {
        generation: u64,
        season: String,
    },
    FetchRoster {
        generation: u64,
        position: Option<String>,
        team: Option<String>,
        limit: u32,
    },
    FetchLeaderboard {
        generation: u64,
        position: Option<String>,
        limit: u32,
        season: String,
    },
    FetchPlayer {
        detail_gen: u64,
        comparison_gen: u64,
        player_id: u32,
        position: String,
        season: String,
    },
    HealthCheck,
}

fn gen_is_current(state: &AppState, slice: SliceKey, generation: u64) -> bool {
    match slice.dep_key() {
        Some(key) => state.generations.current(key) == generation,
        None => true,
    }
}

/// Commit a provider response into the state. Responses tagged with a
/// generation that is no longer current are dropped silently; this is the
/// sole ordering guarantee and makes the last committed selection win
/// regardless of network completion order.
pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetLeagues(leagues) => {
            state.leagues.data = leagues;
            state.leagues.loading = false;
            state.leagues.error = None;
        }
        Delta::SetPositions(positions) => {
            state.positions.data = positions;
            state.positions.loading = false;
            state.positions.error = None;
        }
        Delta::SetTeams(teams) => {
            state.teams.data = teams;
            state.teams.loading = false;
            state.teams.error = None;
        }
        Delta::SetDashboard { generation, data } => {
            if !gen_is_current(state, SliceKey::Dashboard, generation) {
                return;
            }
            state.dashboard.data = Some(data);
            state.dashboard.loading = false;
            state.dashboard.error = None;
            state.last_refresh = Some(SystemTime::now());
        }
        Delta::SetOverview { generation, categories } => {
            if !gen_is_current(state, SliceKey::Overview, generation) {
                return;
            }
            state.overview.data = categories;
            state.overview.loading = false;
            state.overview.error = None;
        }
        Delta::SetRoster { generation, players } => {
            if !gen_is_current(state, SliceKey::Roster, generation) {
                return;
            }
            state.roster.data = players;
            state.roster.loading = false;
            state.roster.error = None;
            if let Some(id) = state.selection.player
                && !state.roster.data.iter().any(|p| p.player_id == id)
            {
                state.clear_player_scope();
            }
        }
        Delta::SetLeaderboard { generation, entries } => {
            if !gen_is_current(state, SliceKey::Leaderboard, generation) {
                return;
            }
            state.leaderboard.data = entries;
            state.leaderboard.loading = false;
            state.leaderboard.error = None;
        }
        Delta::SetDetail { generation, detail } => {
            if !gen_is_current(state, SliceKey::Detail, generation) {
                return;
            }
            state.detail.data = Some(detail);
            state.detail.loading = false;
            state.detail.error = None;
        }
        Delta::SetComparison { generation, comparison } => {
            if !gen_is_current(state, SliceKey::Comparison, generation) {
                return;
            }
            state.comparison.data = Some(comparison);
            state.comparison.loading = false;
            state.comparison.error = None;
        }
        Delta::SliceError { slice, generation, message } => {
            if !gen_is_current(state, slice, generation) {
                return;
            }
            match slice {
                SliceKey::Leagues => fail_slice(&mut state.leagues, &message),
                SliceKey::Positions => fail_slice(&mut state.positions, &message),
                SliceKey::Teams => fail_slice(&mut state.teams, &message),
                SliceKey::Dashboard => fail_slice(&mut state.dashboard, &message),
                SliceKey::Overview => fail_slice(&mut state.overview, &message),
                SliceKey::Roster => fail_slice(&mut state.roster, &message),
                SliceKey::Leaderboard => fail_slice(&mut state.leaderboard, &message),
                SliceKey::Detail => fail_slice(&mut state.detail, &message),
                SliceKey::Comparison => fail_slice(&mut state.comparison, &message),
            }
            state.push_log(format!("[WARN] {}: {message}", slice.label()));
        }
        Delta::Health { ok, message } => {
            state.service_healthy = Some(ok);
            let prefix = if ok { "[INFO]" } else { "[WARN]" };
            state.push_log(format!("{prefix} {message}"));
        }
        Delta::Log(line) => state.push_log(line),
    }
}

fn fail_slice<T>(slice: &mut Slice<T>, message: &str) {
    slice.loading = false;
    slice.error = Some(message.to_string());
}
