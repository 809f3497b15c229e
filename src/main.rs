use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};

use mindstats_terminal::analytics::{self, RankTier, ScoreBand};
use mindstats_terminal::demo_feed::spawn_demo_provider;
use mindstats_terminal::orchestrator::Orchestrator;
use mindstats_terminal::present;
use mindstats_terminal::provider::spawn_provider;
use mindstats_terminal::state::{
    ALL_LEAGUES, ALL_POSITIONS, ALL_TEAMS, AppState, FilterField, LEADERBOARD_LIMITS, RankEntry,
    SEASONS, Slice, SliceKey,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Dashboard,
    Players,
    Performers,
    Nuclei,
}

struct App {
    orch: Orchestrator,
    screen: Screen,
    roster_cursor: usize,
    performer_scroll: usize,
    search_active: bool,
    help_overlay: bool,
    should_quit: bool,
}

impl App {
    fn new(orch: Orchestrator) -> Self {
        Self {
            orch,
            screen: Screen::Dashboard,
            roster_cursor: 0,
            performer_scroll: 0,
            search_active: false,
            help_overlay: false,
            should_quit: false,
        }
    }

    fn state(&self) -> &AppState {
        &self.orch.state
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.search_active {
            self.on_search_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.help_overlay = !self.help_overlay,
            KeyCode::Char('1') => self.screen = Screen::Dashboard,
            KeyCode::Char('2') => self.screen = Screen::Players,
            KeyCode::Char('3') => self.screen = Screen::Performers,
            KeyCode::Char('4') => self.screen = Screen::Nuclei,
            KeyCode::Char('s') => self.cycle_season(),
            KeyCode::Char('r') => self.retry_screen(),
            KeyCode::Char('c') => {
                self.orch.reset();
                self.roster_cursor = 0;
                self.performer_scroll = 0;
            }
            KeyCode::Char('/') if self.screen == Screen::Performers => {
                self.search_active = true;
            }
            KeyCode::Char('p') => self.cycle_position(),
            KeyCode::Char('t') if self.screen == Screen::Players => self.cycle_team(),
            KeyCode::Char('l') if self.screen == Screen::Players => self.cycle_league(),
            KeyCode::Char('n') if self.screen == Screen::Performers => self.cycle_limit(),
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Enter if self.screen == Screen::Players => self.select_under_cursor(),
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.search_active = false,
            KeyCode::Backspace => {
                let mut text = self.state().selection.search_text.clone();
                text.pop();
                self.orch.set_search(&text);
            }
            KeyCode::Char(c) => {
                let mut text = self.state().selection.search_text.clone();
                text.push(c);
                self.orch.set_search(&text);
            }
            _ => {}
        }
    }

    fn move_down(&mut self) {
        match self.screen {
            Screen::Players => {
                let len = self.state().roster.data.len();
                if len > 0 {
                    self.roster_cursor = (self.roster_cursor + 1).min(len - 1);
                }
            }
            Screen::Performers => {
                let len = self.state().filtered_performers().len();
                if len > 0 {
                    self.performer_scroll = (self.performer_scroll + 1).min(len - 1);
                }
            }
            _ => {}
        }
    }

    fn move_up(&mut self) {
        match self.screen {
            Screen::Players => self.roster_cursor = self.roster_cursor.saturating_sub(1),
            Screen::Performers => self.performer_scroll = self.performer_scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn select_under_cursor(&mut self) {
        let Some(player) = self.state().roster.data.get(self.roster_cursor) else {
            return;
        };
        let id = player.player_id;
        self.orch.select_player(id);
    }

    fn cycle_season(&mut self) {
        let current = self.state().selection.season.clone();
        let idx = SEASONS.iter().position(|s| *s == current).unwrap_or(0);
        let next = SEASONS[(idx + 1) % SEASONS.len()];
        self.orch.set_season(next);
    }

    fn cycle_position(&mut self) {
        let options: Vec<String> = std::iter::once(ALL_POSITIONS.to_string())
            .chain(self.state().positions.data.iter().map(|p| p.code.clone()))
            .collect();
        let next = next_option(&options, &self.state().selection.position);
        self.orch.set_filter(FilterField::Position, &next);
        self.roster_cursor = 0;
    }

    fn cycle_team(&mut self) {
        let options: Vec<String> = std::iter::once(ALL_TEAMS.to_string())
            .chain(self.state().teams.data.iter().map(|t| t.team_name.clone()))
            .collect();
        let next = next_option(&options, &self.state().selection.team);
        self.orch.set_filter(FilterField::Team, &next);
        self.roster_cursor = 0;
    }

    fn cycle_league(&mut self) {
        let options: Vec<String> = std::iter::once(ALL_LEAGUES.to_string())
            .chain(self.state().leagues.data.iter().map(|l| l.name.clone()))
            .collect();
        let next = next_option(&options, &self.state().selection.league);
        self.orch.set_filter(FilterField::League, &next);
        self.roster_cursor = 0;
    }

    fn cycle_limit(&mut self) {
        let current = self.state().selection.result_limit;
        let idx = LEADERBOARD_LIMITS
            .iter()
            .position(|l| *l == current)
            .unwrap_or(0);
        let next = LEADERBOARD_LIMITS[(idx + 1) % LEADERBOARD_LIMITS.len()];
        self.orch.set_result_limit(next);
        self.performer_scroll = 0;
    }

    fn retry_screen(&mut self) {
        match self.screen {
            Screen::Dashboard => self.orch.retry(SliceKey::Dashboard),
            Screen::Players => {
                self.orch.retry(SliceKey::Roster);
                if self.state().detail.error.is_some() || self.state().comparison.error.is_some() {
                    self.orch.retry(SliceKey::Detail);
                }
            }
            Screen::Performers => self.orch.retry(SliceKey::Leaderboard),
            Screen::Nuclei => self.orch.retry(SliceKey::Overview),
        }
    }
}

fn next_option(options: &[String], current: &str) -> String {
    if options.is_empty() {
        return current.to_string();
    }
    let idx = options.iter().position(|o| o == current).unwrap_or(0);
    options[(idx + 1) % options.len()].clone()
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    if offline_mode() {
        spawn_demo_provider(tx, cmd_rx);
    } else {
        spawn_provider(tx, cmd_rx);
    }

    let mut app = App::new(Orchestrator::new(AppState::new(), cmd_tx));
    app.orch.startup();
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn offline_mode() -> bool {
    std::env::var("MINDSTATS_OFFLINE")
        .map(|val| val == "1" || val.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<mindstats_terminal::state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            app.orch.handle_delta(delta);
        }

        let roster_len = app.state().roster.data.len();
        if roster_len == 0 {
            app.roster_cursor = 0;
        } else {
            app.roster_cursor = app.roster_cursor.min(roster_len - 1);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.screen {
        Screen::Dashboard => render_dashboard(frame, chunks[1], app.state()),
        Screen::Players => render_players(frame, chunks[1], app),
        Screen::Performers => render_performers(frame, chunks[1], app),
        Screen::Nuclei => render_nuclei(frame, chunks[1], app.state()),
    }

    let footer = Paragraph::new(footer_text(app)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(app: &App) -> String {
    let state = app.state();
    let screen = match app.screen {
        Screen::Dashboard => "DASHBOARD",
        Screen::Players => "PLAYERS",
        Screen::Performers => "TOP PERFORMERS",
        Screen::Nuclei => "MENTAL NUCLEI",
    };
    let health = match state.service_healthy {
        Some(true) => "online",
        Some(false) => "unreachable",
        None => "checking",
    };
    format!(
        "MINDSTATS TERMINAL | {screen} | Season: {} | Service: {health}",
        state.selection.season
    )
}

fn footer_text(app: &App) -> String {
    let hints = match app.screen {
        Screen::Dashboard => "1-4 Screens | s Season | r Refresh | c Reset | ? Help | q Quit",
        Screen::Players => {
            "j/k Move | Enter Select | p Position | t Team | l League | s Season | r Refresh | q Quit"
        }
        Screen::Performers => {
            "/ Search | p Position | n Limit | s Season | j/k Scroll | r Refresh | q Quit"
        }
        Screen::Nuclei => "1-4 Screens | s Season | r Refresh | ? Help | q Quit",
    };
    let refreshed = app
        .state()
        .last_refresh
        .map(|at| {
            let local: DateTime<Local> = at.into();
            format!(" | fetched {}", local.format("%H:%M:%S"))
        })
        .unwrap_or_default();
    let console = app
        .state()
        .logs
        .back()
        .cloned()
        .unwrap_or_else(|| "No alerts yet".to_string());
    format!("{hints}{refreshed}\n{console}")
}

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Elite => Color::Green,
        ScoreBand::Strong => Color::Blue,
        ScoreBand::Steady => Color::Yellow,
        ScoreBand::Developing => Color::Red,
    }
}

fn tier_color(tier: RankTier) -> Color {
    match tier {
        RankTier::Gold => Color::Yellow,
        RankTier::Silver => Color::Gray,
        RankTier::Bronze => Color::LightRed,
        RankTier::None => Color::DarkGray,
    }
}

fn slice_placeholder<T>(slice: &Slice<T>, empty_hint: &str) -> String {
    if let Some(err) = &slice.error {
        return format!("Error: {err}\nPress r to retry");
    }
    if slice.loading {
        return "Loading...".to_string();
    }
    empty_hint.to_string()
}

fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(data) = &state.dashboard.data else {
        let text = slice_placeholder(&state.dashboard, "No dashboard data");
        let style = if state.dashboard.error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let empty = Paragraph::new(text)
            .style(style)
            .block(Block::default().title("Dashboard").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(5),
        ])
        .split(area);

    let status_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(rows[0]);

    let status = &data.system_status;
    render_status_card(frame, status_cols[0], "Players", &status.total_players.to_string());
    render_status_card(
        frame,
        status_cols[1],
        "Mental Metrics",
        &status.mental_metrics.to_string(),
    );
    render_status_card(frame, status_cols[2], "Status", &status.status);
    render_status_card(frame, status_cols[3], "Last Update", &status.last_update);

    let body_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    render_overview_gauges(frame, body_cols[0], &data.nuclei_overview, "Nuclei Overview");
    render_top_list(frame, body_cols[1], &data.top_performers);

    let activity_lines: Vec<String> = data
        .recent_activity
        .iter()
        .map(|entry| format!("* {} ({})", entry.action, entry.timestamp))
        .collect();
    let activity = Paragraph::new(activity_lines.join("\n")).block(
        Block::default()
            .title("Recent Activity")
            .borders(Borders::ALL),
    );
    frame.render_widget(activity, rows[2]);
}

fn render_status_card(frame: &mut Frame, area: Rect, title: &str, value: &str) {
    let card = Paragraph::new(value.to_string())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(card, area);
}

fn render_overview_gauges(
    frame: &mut Frame,
    area: Rect,
    categories: &[mindstats_terminal::state::NucleusCategory],
    title: &str,
) {
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if categories.is_empty() {
        let empty =
            Paragraph::new("No category data").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let points = present::nuclei_bar_points(categories);
    let visible = (inner.height as usize).min(points.len());
    for (i, point) in points.iter().take(visible).enumerate() {
        let row = Rect {
            x: inner.x,
            y: inner.y + i as u16,
            width: inner.width,
            height: 1,
        };
        let band = analytics::score_band(point.value);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(band_color(band)))
            .ratio((point.value / 100.0).clamp(0.0, 1.0))
            .label(format!(
                "{:<12} {}",
                point.label,
                analytics::format_percent(point.value)
            ));
        frame.render_widget(gauge, row);
    }
}

fn render_top_list(frame: &mut Frame, area: Rect, entries: &[RankEntry]) {
    let rows = present::rank_rows(entries);
    let lines: Vec<Line> = rows
        .iter()
        .take(5)
        .map(|row| {
            Line::from(vec![
                Span::styled(
                    format!("{:>2}. ", row.rank),
                    Style::default().fg(tier_color(row.tier)),
                ),
                Span::raw(format!("{} ({} - {}) ", row.name, row.position, row.team)),
                Span::styled(
                    analytics::format_percent(row.score),
                    Style::default().fg(band_color(row.band)),
                ),
            ])
        })
        .collect();
    let list = Paragraph::new(lines).block(
        Block::default()
            .title("Top Performers")
            .borders(Borders::ALL),
    );
    frame.render_widget(list, area);
}

fn render_players(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.state();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(42), Constraint::Min(30)])
        .split(area);

    let left_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(cols[0]);

    let player_label = state
        .selected_player()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Select Player".to_string());
    let filters = Paragraph::new(format!(
        "League: {}\nPosition: {} | Team: {}\nPlayer: {player_label}",
        state.selection.league, state.selection.position, state.selection.team
    ))
    .block(Block::default().title("Filters").borders(Borders::ALL));
    frame.render_widget(filters, left_rows[0]);

    render_roster_list(frame, left_rows[1], app);

    let right_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(10),
            Constraint::Length(9),
        ])
        .split(cols[1]);

    render_detail_info(frame, right_rows[0], state);
    render_detail_profile(frame, right_rows[1], state);
    render_comparison(frame, right_rows[2], state);
}

fn render_roster_list(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.state();
    let block = Block::default().title("Players").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.roster.data.is_empty() {
        let text =
            slice_placeholder(&state.roster, "No players match these filters");
        let style = if state.roster.error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(Paragraph::new(text).style(style), inner);
        return;
    }

    let visible = inner.height as usize;
    let total = state.roster.data.len();
    let start = app
        .roster_cursor
        .saturating_sub(visible / 2)
        .min(total.saturating_sub(visible));
    let end = (start + visible).min(total);

    let mut lines = Vec::new();
    for idx in start..end {
        let player = &state.roster.data[idx];
        let selected = state.selection.player == Some(player.player_id);
        let prefix = if idx == app.roster_cursor { "> " } else { "  " };
        let marker = if selected { "*" } else { " " };
        let style = if idx == app.roster_cursor {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::styled(
            format!(
                "{prefix}{marker}{} ({}) {}",
                player.name,
                player.position,
                analytics::format_percent(player.overall_score)
            ),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_detail_info(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Player Details").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(detail) = &state.detail.data else {
        let text = slice_placeholder(&state.detail, "Select a player to see details");
        let style = if state.detail.error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(Paragraph::new(text).style(style), inner);
        return;
    };

    let info = &detail.basic_info;
    let stats = &detail.season_stats;
    let text = format!(
        "{} | {} - {}\nAge: {} | Nationality: {}\nHeight: {} cm | Weight: {} kg | Foot: {}\nMatches: {} | Minutes: {} | Goals: {} | Assists: {} | Yellows: {}",
        info.name,
        info.position,
        info.team_name,
        info.age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()),
        info.nationality,
        info.height.map(|h| h.to_string()).unwrap_or_else(|| "-".to_string()),
        info.weight.map(|w| w.to_string()).unwrap_or_else(|| "-".to_string()),
        info.preferred_foot.as_deref().unwrap_or("-"),
        stats.matches_played,
        stats.minutes_played,
        stats.goals,
        stats.assists,
        stats.yellow_cards,
    );
    frame.render_widget(Paragraph::new(text), inner);
}

fn render_detail_profile(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title("Mental Profile")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(detail) = &state.detail.data else {
        let empty = Paragraph::new("Select a player to see the nuclei profile")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    };

    let points = present::detail_radar_points(&detail.mental_nuclei);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let overall = detail.mental_nuclei.overall_score;
    let headline = Paragraph::new(format!(
        "Overall Score: {}",
        analytics::format_percent(overall)
    ))
    .style(
        Style::default()
            .fg(band_color(analytics::score_band(overall)))
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(headline, rows[0]);

    let gauge_area = rows[1];
    let visible = (gauge_area.height as usize).min(points.len());
    for (i, point) in points.iter().take(visible).enumerate() {
        let row = Rect {
            x: gauge_area.x,
            y: gauge_area.y + i as u16,
            width: gauge_area.width,
            height: 1,
        };
        let band = analytics::score_band(point.value);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(band_color(band)))
            .ratio((point.value / point.full_mark).clamp(0.0, 1.0))
            .label(format!(
                "{:<12} {}",
                point.axis,
                analytics::format_percent(point.value)
            ));
        frame.render_widget(gauge, row);
    }
}

fn render_comparison(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title("Position Comparison")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (Some(detail), Some(comparison)) = (&state.detail.data, &state.comparison.data) else {
        let text = slice_placeholder(&state.comparison, "Select a player to compare");
        let style = if state.comparison.error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(Paragraph::new(text).style(style), inner);
        return;
    };

    let panel = present::comparison_panel(detail, comparison);
    let mut lines = vec![Line::raw(format!(
        "{} vs {} players | Selected {} | Position avg {}",
        panel.position,
        panel.total_players,
        analytics::format_percent(panel.player_score),
        analytics::format_percent(panel.position_average),
    ))];
    for row in &panel.top_players {
        let style = if row.is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::styled(
            format!(
                "{}. {} ({}) {}",
                row.place,
                row.name,
                row.team,
                analytics::format_percent(row.score)
            ),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_performers(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.state();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(area);

    let search_label = if app.search_active {
        format!("Search: {}_", state.selection.search_text)
    } else if state.selection.search_text.is_empty() {
        "Search: (press / to search)".to_string()
    } else {
        format!("Search: {}", state.selection.search_text)
    };
    let filtered = state.filtered_performers();
    let filter_line = Paragraph::new(format!(
        "{search_label} | Position: {} | Top {} | Showing {} of {}",
        state.selection.position,
        state.selection.result_limit,
        filtered.len(),
        state.leaderboard.data.len(),
    ))
    .block(Block::default().title("Ranking Filters").borders(Borders::ALL));
    frame.render_widget(filter_line, rows[0]);

    render_rank_table(frame, rows[1], app, &filtered);
    render_rank_summary(frame, rows[2], state);
}

fn render_rank_table(frame: &mut Frame, area: Rect, app: &App, filtered: &[&RankEntry]) {
    let state = app.state();
    let block = Block::default()
        .title("Performance Ranking")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if filtered.is_empty() {
        let text = slice_placeholder(
            &state.leaderboard,
            "No performers found matching your criteria",
        );
        let style = if state.leaderboard.error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(Paragraph::new(text).style(style), inner);
        return;
    }

    let entries: Vec<RankEntry> = filtered.iter().map(|e| (*e).clone()).collect();
    let rank_rows = present::rank_rows(&entries);
    let visible = inner.height as usize;
    let total = rank_rows.len();
    let start = app.performer_scroll.min(total.saturating_sub(visible.max(1)));
    let end = (start + visible).min(total);

    let mut lines = Vec::new();
    for row in &rank_rows[start..end] {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>3} ", row.rank),
                Style::default()
                    .fg(tier_color(row.tier))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "{:<24} {:<4} {:<18} {:<14} ",
                row.name, row.position, row.team, row.nationality
            )),
            Span::styled(
                analytics::format_percent(row.score),
                Style::default().fg(band_color(row.band)),
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_rank_summary(frame: &mut Frame, area: Rect, state: &AppState) {
    let entries = &state.leaderboard.data;
    let text = if entries.is_empty() {
        "No ranking data yet".to_string()
    } else {
        let highest = &entries[0];
        let average =
            entries.iter().map(|e| e.overall_score).sum::<f64>() / entries.len() as f64;
        format!(
            "Highest: {} {} | Average of top {}: {} | Leading position: {}",
            highest.name,
            analytics::format_percent(highest.overall_score),
            entries.len(),
            analytics::format_percent(average),
            highest.position,
        )
    };
    let summary =
        Paragraph::new(text).block(Block::default().title("Summary").borders(Borders::ALL));
    frame.render_widget(summary, area);
}

fn render_nuclei(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(8)])
        .split(area);

    if state.overview.data.is_empty() {
        let text = slice_placeholder(&state.overview, "No category data yet");
        let style = if state.overview.error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let empty = Paragraph::new(text)
            .style(style)
            .block(Block::default().title("Mental Nuclei").borders(Borders::ALL));
        frame.render_widget(empty, rows[0]);
        return;
    }

    render_overview_gauges(
        frame,
        rows[0],
        &state.overview.data,
        "Mental Performance Nuclei",
    );

    let categories = &state.overview.data;
    let strongest = analytics::top_n_by_average(categories, 3);
    let weakest = analytics::bottom_n_by_average(categories, 3);
    let overall = analytics::overall_average(categories);
    let spread = analytics::spread(categories);

    let mut lines = vec![Line::raw(format!(
        "Overall Average: {} | Performance Range: {} spread | Season: {}",
        analytics::format_percent(overall),
        analytics::format_percent(spread),
        state.selection.season,
    ))];
    let strongest_text = strongest
        .iter()
        .map(|c| format!("{} {}", c.display_name, analytics::format_percent(c.average)))
        .collect::<Vec<_>>()
        .join(", ");
    let weakest_text = weakest
        .iter()
        .map(|c| format!("{} {}", c.display_name, analytics::format_percent(c.average)))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(Line::styled(
        format!("Strongest: {strongest_text}"),
        Style::default().fg(Color::Green),
    ));
    lines.push(Line::styled(
        format!("To improve: {weakest_text}"),
        Style::default().fg(Color::Red),
    ));
    if let Some(first) = categories.first() {
        lines.push(Line::raw(format!(
            "{} composed of: {}",
            first.display_name,
            first.components.join(", ")
        )));
    }

    let insights = Paragraph::new(lines).block(
        Block::default()
            .title("Detailed Analysis")
            .borders(Borders::ALL),
    );
    frame.render_widget(insights, rows[1]);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "MindStats Terminal - Help",
        "",
        "Global:",
        "  1            Dashboard",
        "  2            Players",
        "  3            Top Performers",
        "  4            Mental Nuclei",
        "  s            Cycle season",
        "  r            Refresh current screen",
        "  c            Reset filters",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Players:",
        "  j/k or ↑/↓   Move",
        "  Enter        Select player",
        "  p/t/l        Cycle position/team/league",
        "",
        "Top Performers:",
        "  /            Search by player or team",
        "  n            Cycle list size",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
