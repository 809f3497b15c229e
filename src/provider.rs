//! Worker thread that services provider commands against the remote
//! gateway. Failures never abort the loop; each becomes a slice-scoped
//! error delta so unrelated slices keep functioning.

use std::env;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::gateway;
use crate::state::{Delta, ProviderCommand, SliceKey};

pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        for cmd in cmd_rx {
            handle_command(&tx, cmd);
        }
    });
}

fn handle_command(tx: &Sender<Delta>, cmd: ProviderCommand) {
    match cmd {
        ProviderCommand::FetchCatalog => fetch_catalog(tx),
        ProviderCommand::FetchDashboard { generation } => match gateway::fetch_dashboard() {
            Ok(data) => send(tx, Delta::SetDashboard { generation, data }),
            Err(err) => slice_error(tx, SliceKey::Dashboard, generation, &err),
        },
        ProviderCommand::FetchOverview { generation, season } => {
            match gateway::fetch_mental_nuclei(&season) {
                Ok(categories) => send(tx, Delta::SetOverview { generation, categories }),
                Err(err) => slice_error(tx, SliceKey::Overview, generation, &err),
            }
        }
        ProviderCommand::FetchRoster {
            generation,
            position,
            team,
            limit,
        } => match gateway::fetch_players(position.as_deref(), team.as_deref(), limit) {
            Ok(players) => send(tx, Delta::SetRoster { generation, players }),
            Err(err) => slice_error(tx, SliceKey::Roster, generation, &err),
        },
        ProviderCommand::FetchLeaderboard {
            generation,
            position,
            limit,
            season,
        } => match gateway::fetch_top_performers(position.as_deref(), limit, &season) {
            Ok(entries) => send(tx, Delta::SetLeaderboard { generation, entries }),
            Err(err) => slice_error(tx, SliceKey::Leaderboard, generation, &err),
        },
        ProviderCommand::FetchPlayer {
            detail_gen,
            comparison_gen,
            player_id,
            position,
            season,
        } => {
            // Independent of each other; only the roster entry gates them.
            let (detail, comparison) = rayon::join(
                || gateway::fetch_player_detail(player_id, &season),
                || gateway::fetch_position_comparison(&position, &season),
            );
            match detail {
                Ok(detail) => send(
                    tx,
                    Delta::SetDetail {
                        generation: detail_gen,
                        detail,
                    },
                ),
                Err(err) => slice_error(tx, SliceKey::Detail, detail_gen, &err),
            }
            match comparison {
                Ok(comparison) => send(
                    tx,
                    Delta::SetComparison {
                        generation: comparison_gen,
                        comparison,
                    },
                ),
                Err(err) => slice_error(tx, SliceKey::Comparison, comparison_gen, &err),
            }
        }
        ProviderCommand::HealthCheck => match gateway::health_check() {
            Ok(health) => send(
                tx,
                Delta::Health {
                    ok: health.is_healthy(),
                    message: format!("Service {} ({})", health.status, gateway::api_base()),
                },
            ),
            Err(err) => send(
                tx,
                Delta::Health {
                    ok: false,
                    message: format!("Health check failed: {err}"),
                },
            ),
        },
    }
}

/// The catalog enumerations are independent of each other and of the
/// selection; fan them out on a bounded pool and report each slice on
/// its own.
fn fetch_catalog(tx: &Sender<Delta>) {
    let (leagues, (positions, teams)) = with_fetch_pool(|| {
        rayon::join(gateway::fetch_leagues, || {
            rayon::join(gateway::fetch_positions, gateway::fetch_teams)
        })
    });

    match leagues {
        Ok(leagues) => send(tx, Delta::SetLeagues(leagues)),
        Err(err) => slice_error(tx, SliceKey::Leagues, 0, &err),
    }
    match positions {
        Ok(positions) => send(tx, Delta::SetPositions(positions)),
        Err(err) => slice_error(tx, SliceKey::Positions, 0, &err),
    }
    match teams {
        Ok(teams) => send(tx, Delta::SetTeams(teams)),
        Err(err) => slice_error(tx, SliceKey::Teams, 0, &err),
    }
}

fn slice_error(tx: &Sender<Delta>, slice: SliceKey, generation: u64, err: &gateway::RequestFailed) {
    send(
        tx,
        Delta::SliceError {
            slice,
            generation,
            message: format!("{} fetch failed: {err}", slice.label()),
        },
    );
}

fn send(tx: &Sender<Delta>, delta: Delta) {
    let _ = tx.send(delta);
}

fn with_fetch_pool<T>(action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    let threads = fetch_parallelism();
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(action),
        Err(_) => action(),
    }
}

fn fetch_parallelism() -> usize {
    env::var("FETCH_PARALLELISM")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(4)
        .clamp(1, 16)
}
