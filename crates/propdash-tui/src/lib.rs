// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use propdash_app::{
    AdviceOutcome, AppCommand, AppEvent, DashboardState, Loadable, PropertyRecord, SummaryStats,
    YieldHistogram,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const TITLE: &str = "Australian Property Micro-Dashboard";
const SUBTITLE: &str = "Gross rental yield and time-on-market banding.";
const COACH_BLURB: &str = "Get a short, practical take on cash-flow vs resale risk.";
const LOADING: &str = "Loading…";
const SUMMARY_UNAVAILABLE: &str = "Summary unavailable.";
const PLACEHOLDER: &str = "—";
const RADIO_ON: &str = "(•)";
const RADIO_OFF: &str = "( )";
const SELECT_COLUMN_WIDTH: u16 = 6;
const PAGE_ROWS: usize = 10;

const COLUMNS: [&str; 10] = [
    "Select",
    "Address",
    "Beds",
    "Baths",
    "Car",
    "Price (A$)",
    "Rent/wk (A$)",
    "Yield %",
    "DOM",
    "DOM Band",
];

/// Where the dashboard's data comes from. The `spawn_*` defaults run the
/// blocking call inline; networked runtimes override them to use threads.
pub trait AppRuntime {
    fn source_label(&self) -> String;
    fn load_properties(&mut self) -> Vec<PropertyRecord>;
    fn load_summary(&mut self) -> Option<SummaryStats>;
    fn request_advice(&mut self, record: &PropertyRecord) -> AdviceOutcome;

    fn spawn_properties_load(&mut self, tx: Sender<InternalEvent>) -> Result<()> {
        let rows = self.load_properties();
        tx.send(InternalEvent::PropertiesLoaded(rows))
            .map_err(|_| anyhow!("dashboard event channel closed"))
    }

    fn spawn_summary_load(&mut self, tx: Sender<InternalEvent>) -> Result<()> {
        let summary = self.load_summary();
        tx.send(InternalEvent::SummaryLoaded(summary))
            .map_err(|_| anyhow!("dashboard event channel closed"))
    }

    fn spawn_advice(
        &mut self,
        token: u64,
        record: PropertyRecord,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let outcome = self.request_advice(&record);
        tx.send(InternalEvent::AdviceArrived { token, outcome })
            .map_err(|_| anyhow!("dashboard event channel closed"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    PropertiesLoaded(Vec<PropertyRecord>),
    SummaryLoaded(Option<SummaryStats>),
    AdviceArrived { token: u64, outcome: AdviceOutcome },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    cursor: usize,
    help_visible: bool,
    status: Option<String>,
    status_token: u64,
    source_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DashboardLayout {
    header: Rect,
    chart: Rect,
    summary: Rect,
    coach: Rect,
    table: Rect,
    status: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableHit {
    SelectCell(usize),
    RowBody(usize),
}

impl TableHit {
    const fn row(self) -> usize {
        match self {
            Self::SelectCell(row) | Self::RowBody(row) => row,
        }
    }
}

pub fn run_app<R: AppRuntime>(state: &mut DashboardState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData {
        source_label: runtime.source_label(),
        ..ViewData::default()
    };
    let (internal_tx, internal_rx) = mpsc::channel();
    start_loads(runtime, &mut view_data, &internal_tx);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }
        match event::read().context("read event") {
            Ok(Event::Key(key)) => {
                if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                    break;
                }
            }
            Ok(Event::Mouse(mouse)) => {
                let area = match terminal.size() {
                    Ok(size) => Rect::new(0, 0, size.width, size.height),
                    Err(error) => {
                        result = Err(error).context("read terminal size");
                        break;
                    }
                };
                handle_mouse_event(state, runtime, &mut view_data, &internal_tx, mouse, area);
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )
    .context("leave alternate screen")?;
    result
}

fn start_loads<R: AppRuntime>(
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
) {
    if let Err(error) = runtime.spawn_properties_load(tx.clone()) {
        warn!(%error, "could not start properties load");
        emit_status(view_data, tx, format!("properties load failed: {error}"));
    }
    if let Err(error) = runtime.spawn_summary_load(tx.clone()) {
        warn!(%error, "could not start summary load");
        emit_status(view_data, tx, format!("summary load failed: {error}"));
    }
}

fn process_internal_events(
    state: &mut DashboardState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        let command = match event {
            InternalEvent::ClearStatus { token } => {
                if token == view_data.status_token {
                    view_data.status = None;
                }
                continue;
            }
            InternalEvent::PropertiesLoaded(rows) => AppCommand::PropertiesLoaded(rows),
            InternalEvent::SummaryLoaded(summary) => AppCommand::SummaryLoaded(summary),
            InternalEvent::AdviceArrived { token, outcome } => {
                AppCommand::AdviceArrived { token, outcome }
            }
        };
        let events = state.dispatch(command);
        apply_events_without_runtime(state, view_data, tx, events);
    }
}

fn dispatch<R: AppRuntime>(
    state: &mut DashboardState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    for event in events {
        match event {
            AppEvent::AdviceRequested { token, record } => {
                emit_status(view_data, tx, format!("asking coach about {}", record.address));
                if let Err(error) = runtime.spawn_advice(token, record, tx.clone()) {
                    warn!(%error, "could not start coach request");
                    let events = state.dispatch(AppCommand::AdviceArrived {
                        token,
                        outcome: AdviceOutcome::Failed,
                    });
                    apply_events_without_runtime(state, view_data, tx, events);
                }
            }
            AppEvent::ReloadRequested => {
                emit_status(view_data, tx, "reloading");
                start_loads(runtime, view_data, tx);
            }
            other => apply_events_without_runtime(state, view_data, tx, vec![other]),
        }
    }
}

/// Handles the events that only touch the view. Request-issuing events never
/// come out of data arrivals, so the runtime is not needed here.
fn apply_events_without_runtime(
    state: &DashboardState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    events: Vec<AppEvent>,
) {
    for event in events {
        match event {
            AppEvent::RowsLoaded(count) => {
                clamp_cursor(state, view_data);
                sync_cursor_to_selection(state, view_data);
                let noun = if count == 1 { "property" } else { "properties" };
                emit_status(view_data, tx, format!("loaded {count} {noun}"));
            }
            AppEvent::SummaryLoaded { available: false } => {
                emit_status(view_data, tx, "summary unavailable");
            }
            AppEvent::SummaryLoaded { available: true } => {}
            AppEvent::SelectionChanged(_) => sync_cursor_to_selection(state, view_data),
            AppEvent::AdviceAbandoned => {
                emit_status(view_data, tx, "coach request dropped: selection changed");
            }
            AppEvent::AdviceShown => emit_status(view_data, tx, "coach replied"),
            AppEvent::AdviceDiscarded { token } => {
                debug!(token, "ignored stale coach response");
            }
            AppEvent::AdviceRequested { token, .. } => {
                warn!(token, "advice request raised outside a user action");
            }
            AppEvent::ReloadRequested => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    view_data.status = Some(message.into());
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut DashboardState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Char('j') | KeyCode::Down => move_cursor(state, view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(state, view_data, -1),
        KeyCode::PageDown => move_cursor(state, view_data, PAGE_ROWS as isize),
        KeyCode::PageUp => move_cursor(state, view_data, -(PAGE_ROWS as isize)),
        KeyCode::Char('g') | KeyCode::Home => view_data.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            view_data.cursor = state.rows().len().saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            select_row(state, runtime, view_data, internal_tx, view_data.cursor);
        }
        KeyCode::Char('a') => {
            if !state.coach.can_ask(state.has_selection()) {
                let reason = if state.coach.is_waiting() {
                    "coach is still thinking"
                } else {
                    "select a property first"
                };
                emit_status(view_data, internal_tx, reason);
                return false;
            }
            dispatch(state, runtime, view_data, internal_tx, AppCommand::AskCoach);
        }
        KeyCode::Char('r') => {
            dispatch(state, runtime, view_data, internal_tx, AppCommand::Reload);
        }
        _ => {}
    }
    false
}

fn handle_mouse_event<R: AppRuntime>(
    state: &mut DashboardState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    mouse: MouseEvent,
    area: Rect,
) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = dashboard_layout(area);
            let offset = scroll_offset(view_data.cursor, table_body_rows(layout.table));
            let Some(hit) = table_hit(
                layout.table,
                offset,
                state.rows().len(),
                mouse.column,
                mouse.row,
            ) else {
                return;
            };
            // One selection per click, whether it landed on the radio or the row.
            view_data.cursor = hit.row();
            select_row(state, runtime, view_data, internal_tx, hit.row());
        }
        MouseEventKind::ScrollDown => move_cursor(state, view_data, 1),
        MouseEventKind::ScrollUp => move_cursor(state, view_data, -1),
        _ => {}
    }
}

fn select_row<R: AppRuntime>(
    state: &mut DashboardState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    index: usize,
) {
    let Some(id) = state.rows().get(index).map(|record| record.id.clone()) else {
        return;
    };
    dispatch(state, runtime, view_data, internal_tx, AppCommand::Select(id));
}

fn move_cursor(state: &DashboardState, view_data: &mut ViewData, delta: isize) {
    let len = state.rows().len();
    if len == 0 {
        view_data.cursor = 0;
        return;
    }
    let next = view_data.cursor as isize + delta;
    view_data.cursor = next.clamp(0, len as isize - 1) as usize;
}

fn clamp_cursor(state: &DashboardState, view_data: &mut ViewData) {
    let len = state.rows().len();
    view_data.cursor = view_data.cursor.min(len.saturating_sub(1));
}

fn sync_cursor_to_selection(state: &DashboardState, view_data: &mut ViewData) {
    if let Some(index) = state.rows().iter().position(|record| state.is_active(record)) {
        view_data.cursor = index;
    }
}

fn dashboard_layout(area: Rect) -> DashboardLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(14),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(25),
            Constraint::Percentage(30),
        ])
        .split(rows[1]);

    DashboardLayout {
        header: rows[0],
        chart: panels[0],
        summary: panels[1],
        coach: panels[2],
        table: rows[2],
        status: rows[3],
    }
}

fn table_body_rows(table: Rect) -> usize {
    usize::from(table.height.saturating_sub(3))
}

fn scroll_offset(cursor: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 || cursor < visible_rows {
        0
    } else {
        cursor + 1 - visible_rows
    }
}

/// Maps a click inside the table's body to a row. Header, borders, and the
/// space below the last row are not hits.
fn table_hit(
    table: Rect,
    offset: usize,
    row_count: usize,
    column: u16,
    row: u16,
) -> Option<TableHit> {
    let inner_left = table.x.saturating_add(1);
    let inner_right = table.x.saturating_add(table.width).saturating_sub(1);
    let body_top = table.y.saturating_add(2);
    let body_bottom = table.y.saturating_add(table.height).saturating_sub(1);
    if column < inner_left || column >= inner_right || row < body_top || row >= body_bottom {
        return None;
    }

    let index = offset + usize::from(row - body_top);
    if index >= row_count {
        return None;
    }
    if column < inner_left + SELECT_COLUMN_WIDTH {
        Some(TableHit::SelectCell(index))
    } else {
        Some(TableHit::RowBody(index))
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &DashboardState, view_data: &ViewData) {
    let layout = dashboard_layout(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{SUBTITLE} Source: {}", view_data.source_label),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, layout.header);

    render_chart(frame, layout.chart, state);

    let summary = Paragraph::new(render_summary_text(&state.summary))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Summary").borders(Borders::ALL));
    frame.render_widget(summary, layout.summary);

    let coach = Paragraph::new(coach_lines(state))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("AI Property Coach")
                .borders(Borders::ALL),
        );
    frame.render_widget(coach, layout.coach);

    render_table(frame, layout.table, state, view_data);

    let status = Paragraph::new(status_text(view_data)).style(Style::default().fg(Color::Yellow));
    frame.render_widget(status, layout.status);

    if view_data.help_visible {
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_chart(frame: &mut ratatui::Frame<'_>, area: Rect, state: &DashboardState) {
    let entries = chart_entries(&state.histogram());
    let title = if state.rows.is_loading() {
        format!("Yield Distribution ({LOADING})")
    } else {
        "Yield Distribution".to_owned()
    };
    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width.saturating_sub(5) / 6).clamp(3, 9);

    let chart = BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .data(entries.as_slice())
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .label_style(Style::default().fg(Color::White));
    frame.render_widget(chart, area);
}

/// Bars in fixed bucket order; zero buckets stay in place.
fn chart_entries(histogram: &YieldHistogram) -> [(&'static str, u64); 6] {
    histogram.entries()
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &DashboardState,
    view_data: &ViewData,
) {
    let block = Block::default().title("Properties").borders(Borders::ALL);
    if state.rows.is_loading() {
        frame.render_widget(Paragraph::new(LOADING).block(block), area);
        return;
    }

    let visible = table_body_rows(area);
    let offset = scroll_offset(view_data.cursor, visible);
    let header = Row::new(COLUMNS.iter().map(|label| {
        Cell::from(*label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = state
        .rows()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(index, record)| {
            let active = state.is_active(record);
            let mut style = Style::default();
            if active {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            if index == view_data.cursor {
                style = style.bg(Color::DarkGray);
            }
            Row::new(table_cells(record, active).map(Cell::from)).style(style)
        })
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(SELECT_COLUMN_WIDTH),
        Constraint::Min(24),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(4),
        Constraint::Length(12),
        Constraint::Length(13),
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Length(9),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

fn table_cells(record: &PropertyRecord, active: bool) -> [String; 10] {
    [
        if active { RADIO_ON } else { RADIO_OFF }.to_owned(),
        record.address.clone(),
        optional_count(record.bedrooms),
        optional_count(record.bathrooms),
        optional_count(record.car_spaces),
        record
            .listed_price
            .map(format_amount)
            .unwrap_or_else(|| PLACEHOLDER.to_owned()),
        record
            .weekly_rent_estimate
            .map(format_amount)
            .unwrap_or_else(|| PLACEHOLDER.to_owned()),
        record
            .gross_yield_pct
            .map(format_number)
            .unwrap_or_else(|| PLACEHOLDER.to_owned()),
        optional_count(record.days_on_market),
        record
            .dom_risk_band
            .clone()
            .unwrap_or_else(|| PLACEHOLDER.to_owned()),
    ]
}

fn optional_count(value: Option<u32>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_owned(), |value| value.to_string())
}

fn render_summary_text(summary: &Loadable<Option<SummaryStats>>) -> String {
    let summary = match summary {
        Loadable::Loading => return LOADING.to_owned(),
        Loadable::Ready(None) => return SUMMARY_UNAVAILABLE.to_owned(),
        Loadable::Ready(Some(summary)) => summary,
    };
    [
        format!("Properties: {}", summary.count),
        format!("Avg Yield: {}%", optional_number(summary.yield_avg)),
        format!(
            "25th–75th pct: {}% – {}%",
            optional_number(summary.yield_p25),
            optional_number(summary.yield_p75)
        ),
        format!(
            "DOM mix: Fast {}, Avg {}, Slow {}",
            summary.dom_mix.fast, summary.dom_mix.average, summary.dom_mix.slow
        ),
    ]
    .join("\n")
}

fn optional_number(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_owned(), format_number)
}

fn selected_line(record: Option<&PropertyRecord>) -> String {
    let Some(record) = record else {
        return "No property selected".to_owned();
    };
    let count = |value: Option<u32>| value.map_or_else(|| "n/a".to_owned(), |v| v.to_string());
    format!(
        "{} • {}bd/{}ba • Yield {}% • DOM {}",
        record.address,
        count(record.bedrooms),
        count(record.bathrooms),
        optional_number(record.gross_yield_pct),
        count(record.days_on_market),
    )
}

fn coach_lines(state: &DashboardState) -> Vec<Line<'static>> {
    let has_selection = state.has_selection();
    let enabled = state.coach.can_ask(has_selection);
    let button_style = if enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let key_hint = if enabled { " (a)" } else { "" };

    let mut lines = vec![
        Line::from(Span::styled(
            COACH_BLURB,
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
        Line::from(format!(
            "Selected: {}",
            selected_line(state.selected.as_ref())
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(
                format!("[ {} ]", state.coach.action_label(has_selection)),
                button_style,
            ),
            Span::raw(key_hint),
        ]),
    ];
    if let Some(advice) = state.coach.advice() {
        lines.push(Line::default());
        lines.extend(advice.lines().map(|line| Line::from(line.to_owned())));
    }
    lines
}

fn status_text(view_data: &ViewData) -> String {
    let hints = "j/k move | space select | a ask coach | r reload | ? help | q quit";
    match &view_data.status {
        Some(status) => format!("{status} | {hints}"),
        None => hints.to_owned(),
    }
}

fn help_overlay_text() -> &'static str {
    "table: j/k or up/down move | g/G first/last | pgup/pgdn page\n\
table: space/enter select row | click a row or its radio to select\n\
coach: a ask about the selected property\n\
data: r reload listings and summary\n\
global: ? help | q/esc quit | ctrl+c quit"
}

/// Integer values print without a decimal point; other values use the
/// shortest representation that round-trips.
fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Thousands-separated amount with at most three decimals, e.g. `1,250,000`.
fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return format_number(value);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
