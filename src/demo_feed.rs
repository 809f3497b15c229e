//! Offline provider for running the terminal without a reachable
//! backend (`MINDSTATS_OFFLINE=1`). Serves the same command/delta
//! contract as the real provider from a canned roster, with a little
//! score jitter between fetches.

use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use rand::Rng;

use crate::state::{
    ActivityEntry, BasicInfo, ComparisonPlayer, DashboardData, Delta, LeagueRef, MentalNuclei,
    NucleusCategory, NucleusKey, PlayerDetail, PlayerSummary, PositionAverage, PositionComparison,
    PositionRef, ProviderCommand, RankEntry, SeasonStats, SliceKey, SystemStatus, TeamRef,
};

struct DemoPlayer {
    id: u32,
    name: &'static str,
    position: &'static str,
    team: &'static str,
    nationality: &'static str,
    age: u32,
    // Canonical key order.
    scores: [f64; 8],
}

const DEMO_PLAYERS: &[DemoPlayer] = &[
    DemoPlayer {
        id: 1,
        name: "Marco Rossi",
        position: "RB",
        team: "SL Benfica",
        nationality: "Italy",
        age: 25,
        scores: [85.2, 89.1, 82.3, 90.5, 87.8, 91.2, 86.7, 95.2],
    },
    DemoPlayer {
        id: 2,
        name: "David López",
        position: "DM",
        team: "SL Benfica",
        nationality: "Spain",
        age: 28,
        scores: [82.1, 88.5, 89.2, 85.3, 83.7, 78.9, 87.4, 83.3],
    },
    DemoPlayer {
        id: 3,
        name: "Yuki Tanaka",
        position: "CM",
        team: "Sporting CP",
        nationality: "Japan",
        age: 24,
        scores: [84.0, 86.2, 81.5, 83.8, 85.1, 80.4, 84.6, 85.6],
    },
    DemoPlayer {
        id: 4,
        name: "Gonçalo Pereira",
        position: "CB",
        team: "Sporting CP",
        nationality: "Portugal",
        age: 27,
        scores: [80.3, 84.7, 86.1, 81.9, 82.4, 72.6, 85.8, 88.6],
    },
    DemoPlayer {
        id: 5,
        name: "Rafael Gomes",
        position: "AM",
        team: "Sporting CP",
        nationality: "Portugal",
        age: 23,
        scores: [79.8, 83.2, 76.4, 84.1, 80.7, 86.3, 79.5, 81.2],
    },
    DemoPlayer {
        id: 6,
        name: "André Silva",
        position: "GK",
        team: "FC Porto",
        nationality: "Portugal",
        age: 29,
        scores: [77.5, 85.9, 70.2, 79.4, 81.8, 62.7, 83.1, 86.4],
    },
    DemoPlayer {
        id: 7,
        name: "Lucas Moreira",
        position: "ST",
        team: "FC Porto",
        nationality: "Brazil",
        age: 22,
        scores: [75.6, 78.3, 68.9, 77.2, 82.5, 88.1, 74.8, 69.6],
    },
    DemoPlayer {
        id: 8,
        name: "Jan Kovač",
        position: "CB",
        team: "FC Porto",
        nationality: "Slovakia",
        age: 26,
        scores: [73.4, 79.8, 81.7, 74.6, 76.2, 64.3, 80.9, 84.3],
    },
    DemoPlayer {
        id: 9,
        name: "Tomás Almeida",
        position: "LB",
        team: "SL Benfica",
        nationality: "Portugal",
        age: 21,
        scores: [71.2, 74.5, 72.8, 70.3, 78.6, 73.9, 72.1, 75.4],
    },
    DemoPlayer {
        id: 10,
        name: "Diego Fernández",
        position: "WG",
        team: "Sporting CP",
        nationality: "Argentina",
        age: 24,
        scores: [69.7, 72.1, 61.4, 68.8, 74.3, 84.6, 67.9, 63.2],
    },
    DemoPlayer {
        id: 11,
        name: "Pedro Costa",
        position: "GK",
        team: "SL Benfica",
        nationality: "Portugal",
        age: 31,
        scores: [66.1, 76.4, 64.7, 71.5, 68.9, 58.2, 75.3, 79.8],
    },
    DemoPlayer {
        id: 12,
        name: "Mamadou Diallo",
        position: "DM",
        team: "FC Porto",
        nationality: "Senegal",
        age: 25,
        scores: [64.8, 67.2, 73.5, 63.9, 70.1, 61.4, 69.7, 66.2],
    },
];

const DEMO_POSITIONS: &[(&str, &str)] = &[
    ("GK", "Goalkeeper"),
    ("RB", "Right Back"),
    ("LB", "Left Back"),
    ("CB", "Centre Back"),
    ("DM", "Defensive Midfielder"),
    ("CM", "Central Midfielder"),
    ("AM", "Attacking Midfielder"),
    ("WG", "Winger"),
    ("ST", "Striker"),
];

const DEMO_TEAMS: &[(u32, &str)] = &[(1, "SL Benfica"), (2, "Sporting CP"), (3, "FC Porto")];

fn nucleus_components(key: NucleusKey) -> &'static [&'static str] {
    match key {
        NucleusKey::AdaptationLearning => {
            &["Error Bounce Back", "Choice Accuracy", "Controlled Reception Rate"]
        }
        NucleusKey::AttentionPerception => {
            &["Controlled Reception Rate", "Under Pressure Control", "Decision Latency"]
        }
        NucleusKey::CollectiveIntegration => &["Press Synchrony"],
        NucleusKey::DecisionJudgment => &["Choice Accuracy", "Threat Added"],
        NucleusKey::EnergyManagement => {
            &["Controlled Reception Rate", "Error Bounce Back", "Decision Latency"]
        }
        NucleusKey::InitiativeRisk => &["Dribble Success"],
        NucleusKey::ResilienceRecovery => &["Recovery Speed", "Error Bounce Back"],
        NucleusKey::SelfRegulationDiscipline => &["Fouls per 90", "Error Bounce Back"],
    }
}

pub fn spawn_demo_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        let _ = tx.send(Delta::Log(
            "[INFO] Offline demo feed active (MINDSTATS_OFFLINE)".to_string(),
        ));
        for cmd in cmd_rx {
            handle_command(&tx, &mut rng, cmd);
        }
    });
}

fn handle_command(tx: &Sender<Delta>, rng: &mut impl Rng, cmd: ProviderCommand) {
    match cmd {
        ProviderCommand::FetchCatalog => {
            let _ = tx.send(Delta::SetLeagues(vec![LeagueRef {
                id: 1,
                name: "Liga Portugal".to_string(),
            }]));
            let _ = tx.send(Delta::SetPositions(
                DEMO_POSITIONS
                    .iter()
                    .map(|(code, name)| PositionRef {
                        code: (*code).to_string(),
                        name: (*name).to_string(),
                    })
                    .collect(),
            ));
            let _ = tx.send(Delta::SetTeams(
                DEMO_TEAMS
                    .iter()
                    .map(|(team_id, team_name)| TeamRef {
                        team_id: *team_id,
                        team_name: (*team_name).to_string(),
                    })
                    .collect(),
            ));
        }
        ProviderCommand::FetchDashboard { generation } => {
            let data = dashboard(rng);
            let _ = tx.send(Delta::SetDashboard { generation, data });
        }
        ProviderCommand::FetchOverview { generation, .. } => {
            let categories = overview(rng);
            let _ = tx.send(Delta::SetOverview { generation, categories });
        }
        ProviderCommand::FetchRoster {
            generation,
            position,
            team,
            limit,
        } => {
            let mut players: Vec<PlayerSummary> = DEMO_PLAYERS
                .iter()
                .filter(|p| position.as_deref().is_none_or(|want| p.position == want))
                .filter(|p| team.as_deref().is_none_or(|want| p.team == want))
                .map(|p| summary(p, rng))
                .collect();
            players.truncate(limit as usize);
            let _ = tx.send(Delta::SetRoster { generation, players });
        }
        ProviderCommand::FetchLeaderboard {
            generation,
            position,
            limit,
            ..
        } => {
            let entries = leaderboard(position.as_deref(), limit as usize, rng);
            let _ = tx.send(Delta::SetLeaderboard { generation, entries });
        }
        ProviderCommand::FetchPlayer {
            detail_gen,
            comparison_gen,
            player_id,
            position,
            ..
        } => {
            match DEMO_PLAYERS.iter().find(|p| p.id == player_id) {
                Some(player) => {
                    let _ = tx.send(Delta::SetDetail {
                        generation: detail_gen,
                        detail: detail(player, rng),
                    });
                }
                None => {
                    let _ = tx.send(Delta::SliceError {
                        slice: SliceKey::Detail,
                        generation: detail_gen,
                        message: format!("player detail fetch failed: unknown player {player_id}"),
                    });
                }
            }
            let _ = tx.send(Delta::SetComparison {
                generation: comparison_gen,
                comparison: comparison(&position),
            });
        }
        ProviderCommand::HealthCheck => {
            let _ = tx.send(Delta::Health {
                ok: true,
                message: "Service healthy (offline demo)".to_string(),
            });
        }
    }
}

fn jitter(value: f64, rng: &mut impl Rng) -> f64 {
    (value + rng.gen_range(-1.5..1.5)).clamp(0.0, 100.0)
}

fn overall(scores: &[f64; 8]) -> f64 {
    scores.iter().sum::<f64>() / scores.len() as f64
}

fn nuclei(player: &DemoPlayer, rng: &mut impl Rng) -> MentalNuclei {
    let s: Vec<f64> = player.scores.iter().map(|v| jitter(*v, rng)).collect();
    MentalNuclei {
        adaptation_learning: s[0],
        attention_perception: s[1],
        collective_integration: s[2],
        decision_judgment: s[3],
        energy_management: s[4],
        initiative_risk: s[5],
        resilience_recovery: s[6],
        self_regulation_discipline: s[7],
        overall_score: s.iter().sum::<f64>() / s.len() as f64,
    }
}

fn summary(player: &DemoPlayer, rng: &mut impl Rng) -> PlayerSummary {
    let nuclei = nuclei(player, rng);
    PlayerSummary {
        player_id: player.id,
        name: player.name.to_string(),
        position: player.position.to_string(),
        team_name: player.team.to_string(),
        nationality: player.nationality.to_string(),
        age: Some(player.age),
        overall_score: nuclei.overall_score,
        mental_nuclei: nuclei,
    }
}

fn detail(player: &DemoPlayer, rng: &mut impl Rng) -> PlayerDetail {
    PlayerDetail {
        basic_info: BasicInfo {
            name: player.name.to_string(),
            position: player.position.to_string(),
            team_name: player.team.to_string(),
            nationality: player.nationality.to_string(),
            age: Some(player.age),
            height: Some(168 + (player.id % 6) * 4),
            weight: Some(64 + (player.id % 5) * 4),
            preferred_foot: Some(if player.id % 3 == 0 { "Left" } else { "Right" }.to_string()),
        },
        season_stats: SeasonStats {
            matches_played: 20 + player.id % 14,
            minutes_played: (20 + player.id % 14) * 84,
            goals: player.id % 9,
            assists: player.id % 7,
            yellow_cards: player.id % 5,
        },
        mental_nuclei: nuclei(player, rng),
    }
}

fn ranked(position: Option<&str>) -> Vec<&'static DemoPlayer> {
    let mut players: Vec<&DemoPlayer> = DEMO_PLAYERS
        .iter()
        .filter(|p| position.is_none_or(|want| p.position == want))
        .collect();
    players.sort_by(|a, b| {
        overall(&b.scores)
            .partial_cmp(&overall(&a.scores))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    players
}

fn leaderboard(position: Option<&str>, limit: usize, rng: &mut impl Rng) -> Vec<RankEntry> {
    ranked(position)
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, p)| RankEntry {
            rank: idx as u32 + 1,
            name: p.name.to_string(),
            position: p.position.to_string(),
            team: p.team.to_string(),
            nationality: p.nationality.to_string(),
            overall_score: jitter(overall(&p.scores), rng),
        })
        .collect()
}

fn comparison(position: &str) -> PositionComparison {
    let players = ranked(Some(position));
    let scores: Vec<f64> = players.iter().map(|p| overall(&p.scores)).collect();
    let average = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };
    PositionComparison {
        total_players: players.len() as u32,
        position_average: PositionAverage {
            overall_score: average,
        },
        players: players
            .iter()
            .map(|p| ComparisonPlayer {
                name: p.name.to_string(),
                team: p.team.to_string(),
                overall_score: overall(&p.scores),
            })
            .collect(),
    }
}

fn overview(rng: &mut impl Rng) -> Vec<NucleusCategory> {
    NucleusKey::ALL
        .iter()
        .enumerate()
        .map(|(idx, key)| {
            let mean = DEMO_PLAYERS
                .iter()
                .map(|p| p.scores[idx])
                .sum::<f64>()
                / DEMO_PLAYERS.len() as f64;
            NucleusCategory {
                key: *key,
                display_name: key.display_name().to_string(),
                average: jitter(mean, rng),
                components: nucleus_components(*key)
                    .iter()
                    .map(|c| (*c).to_string())
                    .collect(),
            }
        })
        .collect()
}

fn dashboard(rng: &mut impl Rng) -> DashboardData {
    DashboardData {
        system_status: SystemStatus {
            total_players: DEMO_PLAYERS.len() as u32,
            mental_metrics: 10,
            status: "Active".to_string(),
            last_update: "Now".to_string(),
        },
        nuclei_overview: overview(rng),
        top_performers: leaderboard(None, 5, rng),
        recent_activity: vec![
            ActivityEntry {
                action: "Data loaded successfully".to_string(),
                timestamp: "2 minutes ago".to_string(),
            },
            ActivityEntry {
                action: "Metrics calculated".to_string(),
                timestamp: "5 minutes ago".to_string(),
            },
            ActivityEntry {
                action: "System initialized".to_string(),
                timestamp: "10 minutes ago".to_string(),
            },
        ],
    }
}
