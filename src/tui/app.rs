//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which manages the TUI state,
//! handles user input, renders the four sections (home, tasks, focus,
//! dashboard) and coordinates store mutations with persistence.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};

use crate::fields::{FilterMode, Priority};
use crate::stats::Dashboard;
use crate::store::{format_deadline_relative, format_priority, truncate, TaskStore};
use crate::tui::colors::{HIGH_RED, LOW_GREEN, MEDIUM_AMBER, TIMER_TEAL};
use crate::tui::enums::{AppState, Section};
use crate::tui::quotes::quote_at;
use crate::tui::task_form::{
    TaskForm, DEADLINE_FIELD, DURATION_FIELD, PRIORITY_FIELD, SUBJECT_FIELD, TITLE_FIELD,
};
use crate::tui::timer::{format_clock, FocusTimer, TimerState, SESSION_SECS};
use crate::tui::utils::centered_rect;

/// How often the home-section quote rotates.
const QUOTE_ROTATE_SECS: u64 = 10;

/// Main application state for the terminal user interface.
///
/// Owns the task store for the session; every mutation is followed by a
/// save and the next draw re-reads the store, so the screen never goes
/// stale.
pub struct App {
    state: AppState,
    section: Section,
    store: TaskStore,
    store_path: PathBuf,
    task_list_state: TableState,
    filter: FilterMode,
    form: TaskForm,
    timer: FocusTimer,
    quote_idx: usize,
    quote_clock: Instant,
    status_message: String,
    should_exit: bool,
}

impl App {
    /// Create a new App instance, loading the store from the given path.
    pub fn new(store_path: &Path) -> io::Result<Self> {
        let store = TaskStore::load(store_path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        let mut task_list_state = TableState::default();
        if !store.tasks.is_empty() {
            task_list_state.select(Some(0));
        }
        Ok(App {
            state: AppState::Browsing,
            section: Section::Tasks,
            store,
            store_path: store_path.to_path_buf(),
            task_list_state,
            filter: FilterMode::All,
            form: TaskForm::new(),
            timer: FocusTimer::new(SESSION_SECS),
            quote_idx: 0,
            quote_clock: Instant::now(),
            status_message: String::new(),
            should_exit: false,
        })
    }

    /// Main event loop: tick the timer, draw, then poll for input.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_exit {
            if self.timer.tick() {
                self.status_message =
                    "Time is up! Take a short break or start a new session.".to_string();
            }
            if self.quote_clock.elapsed().as_secs() >= QUOTE_ROTATE_SECS {
                self.quote_idx = self.quote_idx.wrapping_add(1);
                self.quote_clock = Instant::now();
            }
            terminal.draw(|f| self.render(f))?;
            self.handle_input()?;
        }
        Ok(())
    }

    /// IDs of tasks visible under the current filter, in store order.
    fn visible_ids(&self) -> Vec<u64> {
        self.store
            .select(self.filter)
            .into_iter()
            .map(|t| t.id)
            .collect()
    }

    fn selected_task_id(&self) -> Option<u64> {
        let ids = self.visible_ids();
        self.task_list_state
            .selected()
            .and_then(|i| ids.get(i).copied())
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_ids().len();
        if len == 0 {
            self.task_list_state.select(None);
        } else {
            match self.task_list_state.selected() {
                Some(i) if i < len => {}
                _ => self.task_list_state.select(Some(len.saturating_sub(1))),
            }
        }
    }

    /// Write the store to disk after a mutation. Failures surface in the
    /// status bar; the in-memory state stays authoritative for the session.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.store_path) {
            self.status_message = format!("Failed to save tasks: {e}");
        }
    }

    // ---- input handling ----

    fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                match self.state {
                    AppState::Browsing => self.handle_browsing_input(key.code),
                    AppState::AddTask => self.handle_add_task_input(key.code),
                    AppState::ConfirmDelete => self.handle_confirm_delete_input(key.code),
                }
            }
        }
        Ok(())
    }

    fn handle_browsing_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_exit = true;
                return;
            }
            KeyCode::Tab => {
                self.section = self.section.next();
                self.status_message.clear();
                return;
            }
            KeyCode::BackTab => {
                self.section = self.section.prev();
                self.status_message.clear();
                return;
            }
            KeyCode::Char('1') => self.section = Section::Home,
            KeyCode::Char('2') => self.section = Section::Tasks,
            KeyCode::Char('3') => self.section = Section::Focus,
            KeyCode::Char('4') => self.section = Section::Dashboard,
            _ => {}
        }

        match self.section {
            Section::Tasks => self.handle_task_list_input(key),
            Section::Focus => self.handle_focus_input(key),
            _ => {}
        }
    }

    fn handle_task_list_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => {
                if let Some(i) = self.task_list_state.selected() {
                    if i > 0 {
                        self.task_list_state.select(Some(i - 1));
                    }
                }
            }
            KeyCode::Down => {
                let len = self.visible_ids().len();
                if let Some(i) = self.task_list_state.selected() {
                    if i + 1 < len {
                        self.task_list_state.select(Some(i + 1));
                    }
                } else if len > 0 {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Char('a') => {
                self.form.clear();
                self.state = AppState::AddTask;
                self.status_message.clear();
            }
            KeyCode::Char('f') => {
                self.filter = self.filter.next();
                self.clamp_selection();
                self.status_message.clear();
            }
            KeyCode::Char('c') => {
                if let Some(id) = self.selected_task_id() {
                    if self.store.complete(id) {
                        self.persist();
                        self.status_message = "Marked done.".to_string();
                        self.clamp_selection();
                    }
                }
            }
            KeyCode::Char('d') => {
                if self.selected_task_id().is_some() {
                    self.state = AppState::ConfirmDelete;
                }
            }
            _ => {}
        }
    }

    fn handle_focus_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('s') => {
                self.timer.start();
                self.status_message.clear();
            }
            KeyCode::Char('r') => {
                self.timer.reset();
                self.status_message.clear();
            }
            _ => {}
        }
    }

    fn handle_add_task_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.state = AppState::Browsing;
                self.status_message.clear();
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left if self.form.current_field == PRIORITY_FIELD => {
                self.form.cycle_priority(false);
            }
            KeyCode::Right if self.form.current_field == PRIORITY_FIELD => {
                self.form.cycle_priority(true);
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let Some(deadline) = self.form.parsed_deadline() else {
            self.status_message =
                "Deadline not understood. Try YYYY-MM-DD, today, tomorrow, or 'in 3d'.".to_string();
            return;
        };

        let result = self.store.create(
            self.form.title.value(),
            self.form.subject.value(),
            self.form.selected_priority(),
            deadline,
            self.form.duration.value(),
        );
        match result {
            Ok(task) => {
                self.status_message = format!("Added '{}'.", task.title);
                self.persist();
                self.state = AppState::Browsing;
                self.form.clear();
                self.clamp_selection();
            }
            Err(e) => {
                self.status_message = format!("Task not added: {e}");
            }
        }
    }

    fn handle_confirm_delete_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(id) = self.selected_task_id() {
                    if self.store.delete(id) {
                        self.persist();
                        self.status_message = "Deleted.".to_string();
                        self.clamp_selection();
                    }
                }
                self.state = AppState::Browsing;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.state = AppState::Browsing;
            }
            _ => {}
        }
    }

    // ---- rendering ----

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        match self.section {
            Section::Home => self.render_home(f, chunks[1]),
            Section::Tasks => self.render_tasks(f, chunks[1]),
            Section::Focus => self.render_focus(f, chunks[1]),
            Section::Dashboard => self.render_dashboard(f, chunks[1]),
        }

        self.render_status_bar(f, chunks[2]);

        match self.state {
            AppState::AddTask => self.render_add_task(f, chunks[1]),
            AppState::ConfirmDelete => self.render_confirm_delete(f, chunks[1]),
            AppState::Browsing => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("FOCUSFLOW", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
        ];
        for (i, section) in Section::ALL.iter().enumerate() {
            let label = format!(" {} {} ", i + 1, section.title());
            if *section == self.section {
                spans.push(Span::styled(
                    label,
                    Style::default()
                        .bg(Color::Gray)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::raw(label));
            }
            spans.push(Span::raw(" "));
        }

        let header = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_home(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Welcome to FocusFlow",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("\"{}\"", quote_at(self.quote_idx)),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from("Tab/1-4 switch sections | q quit"),
            Line::from("Tasks: a add, c complete, d delete, f filter"),
            Line::from("Focus: s start timer, r reset"),
        ];
        let home = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Home"))
            .alignment(Alignment::Center);
        f.render_widget(home, area);
    }

    fn render_tasks(&mut self, f: &mut Frame, area: Rect) {
        let filter_label = match self.filter {
            FilterMode::All => "all",
            FilterMode::Pending => "pending",
            FilterMode::Completed => "completed",
        };
        let title = format!("Tasks [{}]", filter_label);

        let visible = self.store.select(self.filter);
        if visible.is_empty() {
            let empty = Paragraph::new("No tasks to display.")
                .block(Block::default().borders(Borders::ALL).title(title))
                .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }

        let today = Local::now().date_naive();
        let rows: Vec<Row> = visible
            .iter()
            .map(|t| {
                let priority_cell = Cell::from(Span::styled(
                    format_priority(t.priority),
                    Style::default().fg(priority_color(t.priority)),
                ));
                let status = if t.completed { "done" } else { "pending" };
                let row = Row::new(vec![
                    Cell::from(truncate(&t.title, 28)),
                    Cell::from(truncate(&t.subject, 14)),
                    priority_cell,
                    Cell::from(format_deadline_relative(t.deadline, today)),
                    Cell::from(t.duration.clone()),
                    Cell::from(status),
                ]);
                if t.completed {
                    row.style(Style::default().fg(Color::DarkGray))
                } else {
                    row
                }
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(30),
                Constraint::Length(16),
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(9),
                Constraint::Min(8),
            ],
        )
        .header(
            Row::new(vec!["Title", "Subject", "Pri", "Deadline", "Est (min)", "Status"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
        .highlight_symbol("► ");

        f.render_stateful_widget(table, area, &mut self.task_list_state);
    }

    fn render_focus(&self, f: &mut Frame, area: Rect) {
        let state_line = match self.timer.state() {
            TimerState::Idle => "Ready for a 25 minute session.",
            TimerState::Running => "Session in progress. Stay with it.",
            TimerState::Finished => "Session complete!",
        };
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format_clock(self.timer.remaining_secs()),
                Style::default()
                    .fg(TIMER_TEAL)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(state_line),
            Line::from(""),
            Line::from("s start | r reset"),
        ];
        let focus = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Focus Timer"))
            .alignment(Alignment::Center);
        f.render_widget(focus, area);
    }

    fn render_dashboard(&self, f: &mut Frame, area: Rect) {
        let dash = Dashboard::compute(&self.store.tasks, Local::now().naive_local());

        let metric_rows: Vec<(String, String, Style)> = vec![
            ("Pending".into(), dash.pending.to_string(), Style::default()),
            (
                "Completed".into(),
                dash.completed.to_string(),
                Style::default(),
            ),
            (
                "High priority".into(),
                dash.high.to_string(),
                Style::default().fg(HIGH_RED),
            ),
            (
                "Medium priority".into(),
                dash.medium.to_string(),
                Style::default().fg(MEDIUM_AMBER),
            ),
            (
                "Low priority".into(),
                dash.low.to_string(),
                Style::default().fg(LOW_GREEN),
            ),
            (
                "Due within 3 days".into(),
                dash.due_soon.to_string(),
                Style::default(),
            ),
            (
                "Pending minutes".into(),
                dash.total_pending_minutes.to_string(),
                Style::default(),
            ),
        ];

        let mut rows: Vec<Row> = metric_rows
            .into_iter()
            .map(|(metric, value, style)| {
                Row::new(vec![Cell::from(metric), Cell::from(value)]).style(style)
            })
            .collect();
        if dash.malformed_durations > 0 {
            rows.push(
                Row::new(vec![
                    Cell::from("Unreadable durations"),
                    Cell::from(dash.malformed_durations.to_string()),
                ])
                .style(Style::default().fg(Color::Red)),
            );
        }

        let table = Table::new(rows, [Constraint::Length(24), Constraint::Min(6)])
            .header(Row::new(vec!["Metric", "Value"]).style(Style::default().add_modifier(Modifier::BOLD)))
            .block(Block::default().borders(Borders::ALL).title("Dashboard"));
        f.render_widget(table, area);
    }

    fn render_add_task(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 80, area);
        f.render_widget(Clear, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(popup);

        let fields = [
            (TITLE_FIELD, "Title", self.form.title.value().to_string()),
            (SUBJECT_FIELD, "Subject", self.form.subject.value().to_string()),
            (
                PRIORITY_FIELD,
                "Priority (Left/Right)",
                format!("< {} >", format_priority(self.form.selected_priority())),
            ),
            (
                DEADLINE_FIELD,
                "Deadline (YYYY-MM-DD, today, in 3d)",
                self.form.deadline.value().to_string(),
            ),
            (
                DURATION_FIELD,
                "Duration (minutes)",
                self.form.duration.value().to_string(),
            ),
        ];

        for (order, label, value) in fields {
            let border_style = if self.form.current_field == order {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let field = Paragraph::new(value).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(label)
                    .border_style(border_style),
            );
            f.render_widget(field, chunks[order]);
        }

        let hint = Paragraph::new("Enter save | Tab next field | Esc cancel")
            .alignment(Alignment::Center);
        f.render_widget(hint, chunks[5]);
    }

    fn render_confirm_delete(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(50, 20, area);
        f.render_widget(Clear, popup);

        let title = self
            .selected_task_id()
            .and_then(|id| self.store.get(id))
            .map(|t| t.title.clone())
            .unwrap_or_default();

        let confirm = Paragraph::new(vec![
            Line::from(format!("Delete '{}'?", truncate(&title, 36))),
            Line::from(""),
            Line::from("y confirm | n cancel"),
        ])
        .block(Block::default().borders(Borders::ALL).title("Confirm"))
        .alignment(Alignment::Center);
        f.render_widget(confirm, popup);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if self.status_message.is_empty() {
            match self.section {
                Section::Home => "Tab/1-4 sections | q quit".to_string(),
                Section::Tasks => {
                    "a add | c complete | d delete | f filter | Tab sections | q quit".to_string()
                }
                Section::Focus => "s start | r reset | Tab sections | q quit".to_string(),
                Section::Dashboard => "Tab sections | q quit".to_string(),
            }
        } else {
            self.status_message.clone()
        };
        let bar = Paragraph::new(text).style(Style::default().fg(Color::Gray));
        f.render_widget(bar, area);
    }
}

/// Accent color for a priority level.
fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => HIGH_RED,
        Priority::Medium => MEDIUM_AMBER,
        Priority::Low => LOW_GREEN,
    }
}
