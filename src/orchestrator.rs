//! Translates selection changes into the minimum set of provider
//! commands, respecting dependency order, and owns the single-writer
//! application state.

use std::sync::mpsc::Sender;

use crate::gateway::sentinel_filter;
use crate::state::{
    AppState, Delta, DepKey, FilterField, ProviderCommand, Selection, SliceKey, apply_delta,
    roster_limit,
};

pub struct Orchestrator {
    pub state: AppState,
    cmd_tx: Sender<ProviderCommand>,
}

impl Orchestrator {
    pub fn new(state: AppState, cmd_tx: Sender<ProviderCommand>) -> Self {
        Self { state, cmd_tx }
    }

    /// Startup group: the catalog enumerations are fetched once and kept
    /// for the process lifetime; every selection-dependent slice gets its
    /// initial fetch alongside.
    pub fn startup(&mut self) {
        self.state.leagues.begin_load();
        self.state.positions.begin_load();
        self.state.teams.begin_load();
        self.send(ProviderCommand::FetchCatalog);
        self.fetch_dashboard();
        self.fetch_overview();
        self.fetch_leaderboard();
        self.fetch_roster();
        self.send(ProviderCommand::HealthCheck);
    }

    pub fn handle_delta(&mut self, delta: Delta) {
        apply_delta(&mut self.state, delta);
    }

    /// Apply a filter change: run the cascade, then issue only the
    /// refetches that depend on the changed field.
    pub fn set_filter(&mut self, field: FilterField, value: &str) {
        match field {
            FilterField::League => {
                if self.state.selection.league == value {
                    return;
                }
                self.state.selection.league = value.to_string();
                self.cascade(field);
            }
            FilterField::Position => {
                if self.state.selection.position == value {
                    return;
                }
                self.state.selection.position = value.to_string();
                self.cascade(field);
                self.fetch_roster();
                self.fetch_leaderboard();
            }
            FilterField::Team => {
                if self.state.selection.team == value {
                    return;
                }
                self.state.selection.team = value.to_string();
                self.cascade(field);
                self.fetch_roster();
            }
            FilterField::Season => self.set_season(value),
            FilterField::SearchText => self.set_search(value),
            // Player and result limit carry non-string payloads.
            FilterField::Player | FilterField::ResultLimit => {}
        }
    }

    /// Every server-computed score is season-scoped, so a season change
    /// re-triggers all score-bearing fetches. The roster is left alone:
    /// squad composition does not vary with season.
    pub fn set_season(&mut self, season: &str) {
        if self.state.selection.season == season {
            return;
        }
        self.state.selection.season = season.to_string();
        self.fetch_dashboard();
        self.fetch_overview();
        self.fetch_leaderboard();
        if let Some(player_id) = self.state.selection.player {
            self.fetch_player(player_id);
        }
    }

    /// Search is a client-side filter; no fetch.
    pub fn set_search(&mut self, text: &str) {
        self.state.selection.search_text = text.to_string();
    }

    pub fn set_result_limit(&mut self, limit: u32) {
        if self.state.selection.result_limit == limit {
            return;
        }
        self.state.selection.result_limit = limit;
        self.fetch_leaderboard();
    }

    /// Select a player from the current roster. An empty roster (or an id
    /// not in it) is a quiet no-op: no detail or comparison fetch is ever
    /// attempted without a roster entry to anchor it.
    pub fn select_player(&mut self, player_id: u32) {
        if !self.state.roster.data.iter().any(|p| p.player_id == player_id) {
            return;
        }
        self.state.selection.player = Some(player_id);
        self.fetch_player(player_id);
    }

    /// Restore the default selection and refetch everything except the
    /// immutable catalog.
    pub fn reset(&mut self) {
        self.state.clear_player_scope();
        self.state.selection = Selection::new();
        self.fetch_dashboard();
        self.fetch_overview();
        self.fetch_leaderboard();
        self.fetch_roster();
    }

    /// Re-issue a single failed slice on operator request. There is no
    /// automatic retry anywhere.
    pub fn retry(&mut self, slice: SliceKey) {
        match slice {
            SliceKey::Leagues | SliceKey::Positions | SliceKey::Teams => {
                self.state.leagues.begin_load();
                self.state.positions.begin_load();
                self.state.teams.begin_load();
                self.send(ProviderCommand::FetchCatalog);
            }
            SliceKey::Dashboard => self.fetch_dashboard(),
            SliceKey::Overview => self.fetch_overview(),
            SliceKey::Roster => self.fetch_roster(),
            SliceKey::Leaderboard => self.fetch_leaderboard(),
            SliceKey::Detail | SliceKey::Comparison => {
                if let Some(player_id) = self.state.selection.player {
                    self.fetch_player(player_id);
                }
            }
        }
    }

    fn cascade(&mut self, field: FilterField) {
        for invalidated in field.invalidates() {
            if *invalidated == FilterField::Player {
                self.state.clear_player_scope();
            }
        }
    }

    fn fetch_dashboard(&mut self) {
        let generation = self.state.generations.bump(DepKey::Dashboard);
        self.state.dashboard.begin_load();
        self.send(ProviderCommand::FetchDashboard { generation });
    }

    fn fetch_overview(&mut self) {
        let generation = self.state.generations.bump(DepKey::Overview);
        self.state.overview.begin_load();
        let season = self.state.selection.season.clone();
        self.send(ProviderCommand::FetchOverview { generation, season });
    }

    fn fetch_roster(&mut self) {
        let generation = self.state.generations.bump(DepKey::Roster);
        self.state.roster.begin_load();
        let position = sentinel_filter(&self.state.selection.position).map(str::to_string);
        let team = sentinel_filter(&self.state.selection.team).map(str::to_string);
        self.send(ProviderCommand::FetchRoster {
            generation,
            position,
            team,
            limit: roster_limit(),
        });
    }

    fn fetch_leaderboard(&mut self) {
        let generation = self.state.generations.bump(DepKey::Leaderboard);
        self.state.leaderboard.begin_load();
        let position = sentinel_filter(&self.state.selection.position).map(str::to_string);
        self.send(ProviderCommand::FetchLeaderboard {
            generation,
            position,
            limit: self.state.selection.result_limit,
            season: self.state.selection.season.clone(),
        });
    }

    /// Detail and comparison are independent of each other but both hang
    /// off the selected roster entry; they share one command so the
    /// provider can issue them in parallel.
    fn fetch_player(&mut self, player_id: u32) {
        let Some(position) = self
            .state
            .roster
            .data
            .iter()
            .find(|p| p.player_id == player_id)
            .map(|p| p.position.clone())
        else {
            return;
        };
        let detail_gen = self.state.generations.bump(DepKey::Detail);
        let comparison_gen = self.state.generations.bump(DepKey::Comparison);
        self.state.detail.begin_load();
        self.state.comparison.begin_load();
        self.send(ProviderCommand::FetchPlayer {
            detail_gen,
            comparison_gen,
            player_id,
            position,
            season: self.state.selection.season.clone(),
        });
    }

    fn send(&mut self, cmd: ProviderCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Provider unavailable, request dropped");
        }
    }
}
