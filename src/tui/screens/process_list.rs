//! Process list screen
//!
//! Processes grouped by importance tier in collapsible sections, a search
//! bar, and terminate on the selected row.

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::render_helpers::{DialogResult, DialogState, InputState};
use super::{Screen, ScreenAction};
use crate::core::classifier::classify_record;
use crate::monitor::{Grouping, ViewController};
use crate::platform::ProcessTable;
use crate::tui::components::StyleManager;
use crate::tui::view::{
    build_view, visible_lines, SectionKey, SectionView, ViewLine, SEARCH_RESULTS_TITLE,
};

const SEARCH_TITLE: &str = "Search [/] (Enter to apply, empty shows all)";
const KEY_HINTS: &str =
    "[↑/↓] Navigate  [Enter] Expand/Collapse  [K/Del] Kill  [/] Search  [R] Refresh  [Q] Quit";

pub struct ProcessScreen<T: ProcessTable> {
    controller: ViewController<T>,
    search: InputState,
    selected: usize,
    list_state: ListState,
    message: Option<String>,
}

impl<T: ProcessTable> ProcessScreen<T> {
    /// Build the screen and take the first snapshot.
    pub fn new(controller: ViewController<T>) -> Self {
        Self::with_search(controller, None)
    }

    /// Build the screen starting from a search; `None` or an empty term
    /// shows the full tier view.
    pub fn with_search(mut controller: ViewController<T>, term: Option<String>) -> Self {
        let term = term.unwrap_or_default();
        controller.search(&term);
        Self {
            controller,
            search: InputState::new().with_value(term),
            selected: 0,
            list_state: ListState::default(),
            message: None,
        }
    }

    pub fn controller(&self) -> &ViewController<T> {
        &self.controller
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn search_focused(&self) -> bool {
        self.search.is_focused()
    }

    pub fn sections(&self) -> Vec<SectionView> {
        build_view(self.controller.grouping(), self.controller.sections())
    }

    pub fn selected_line(&self) -> Option<ViewLine> {
        visible_lines(&self.sections()).get(self.selected).copied()
    }

    /// Pid of the row under the cursor, if the cursor is on a row.
    pub fn selected_pid(&self) -> Option<u32> {
        let sections = self.sections();
        match visible_lines(&sections).get(self.selected)? {
            ViewLine::Row { section, row } => sections.get(*section)?.rows.get(*row).map(|r| r.pid),
            ViewLine::Header { .. } => None,
        }
    }

    fn line_count(&self) -> usize {
        visible_lines(&self.sections()).len()
    }

    fn move_selection_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_selection_down(&mut self) {
        if self.selected + 1 < self.line_count() {
            self.selected += 1;
        }
    }

    fn refresh(&mut self) {
        self.controller.refresh();
        self.selected = 0;
        self.message = Some("Process list refreshed.".to_string());
    }

    fn submit_search(&mut self) {
        let term = self.search.value().to_string();
        self.controller.search(&term);
        self.selected = 0;
        self.message = Some(match self.controller.grouping() {
            Grouping::SearchResults { term, matches } => {
                format!("{} process(es) matching '{}'", matches.len(), term)
            }
            Grouping::Tiers(_) => "Process list refreshed.".to_string(),
        });
    }

    fn toggle_selected(&mut self) {
        let sections = self.sections();
        if let Some(ViewLine::Header { section }) = visible_lines(&sections).get(self.selected) {
            if let SectionKey::Tier(tier) = sections[*section].key {
                self.controller.toggle_section(tier);
            }
        }
    }

    fn terminate_selected(&mut self) {
        let Some(pid) = self.selected_pid() else {
            self.message = Some("Select a process row to terminate.".to_string());
            return;
        };
        match self.controller.terminate_process(pid) {
            Ok(()) => {
                self.selected = 0;
                self.message = Some(format!("Terminated PID {}", pid));
            }
            Err(err) => {
                self.message = Some(format!("Failed to terminate {}: {}", pid, err));
            }
        }
    }

    fn summary_line(&self) -> String {
        let refreshed = match self.controller.last_refreshed_at() {
            Some(ts) => {
                let local: DateTime<Local> = DateTime::from(ts);
                format!("Last refresh: {}", local.format("%Y-%m-%d %H:%M:%S"))
            }
            None => "Last refresh: pending".to_string(),
        };
        let counts = match self.controller.grouping() {
            Grouping::Tiers(groups) => format!(
                "Processes: {} (High: {}, Medium: {}, Low: {})",
                groups.len(),
                groups.high.len(),
                groups.medium.len(),
                groups.low.len()
            ),
            Grouping::SearchResults { term, matches } => {
                format!("Search '{}': {} match(es)", term, matches.len())
            }
        };
        format!("{}    {}", counts, refreshed)
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let sections = self.sections();
        let lines = visible_lines(&sections);
        let title = match self.controller.grouping() {
            Grouping::SearchResults { .. } => SEARCH_RESULTS_TITLE,
            Grouping::Tiers(_) => "Processes",
        };

        if lines.is_empty() {
            let empty = Paragraph::new("No processes to show.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(empty, area);
            return;
        }

        if self.selected >= lines.len() {
            self.selected = lines.len() - 1;
        }

        let items: Vec<ListItem> = lines
            .iter()
            .map(|line| match *line {
                ViewLine::Header { section } => {
                    let section = &sections[section];
                    let marker = if section.expanded { "▾" } else { "▸" };
                    ListItem::new(Line::from(Span::styled(
                        format!(
                            "{} {} ({})",
                            marker,
                            section.label.as_deref().unwrap_or_default(),
                            section.rows.len()
                        ),
                        StyleManager::section_header(section.color),
                    )))
                }
                ViewLine::Row { section, row } => {
                    let section = &sections[section];
                    ListItem::new(Line::from(vec![
                        Span::raw("   "),
                        Span::styled(
                            section.rows[row].text.clone(),
                            StyleManager::section_row(section.color),
                        ),
                        Span::styled("  [Kill]", StyleManager::muted()),
                    ]))
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(StyleManager::selected())
            .highlight_symbol("> ");
        self.list_state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_details(&self, frame: &mut Frame, area: Rect) {
        let sections = self.sections();
        let mut lines = Vec::new();

        match visible_lines(&sections).get(self.selected) {
            Some(ViewLine::Row { section, row }) => {
                let pid = sections[*section].rows[*row].pid;
                if let Some(record) = self.controller.grouping().find(pid) {
                    let tier = classify_record(record, self.controller.session());
                    lines.push(StyleManager::detail_line("PID", record.pid.to_string()));
                    lines.push(StyleManager::detail_line("Name", record.name.clone()));
                    lines.push(StyleManager::detail_line(
                        "Owner",
                        record.owner.clone().unwrap_or_else(|| "unknown".to_string()),
                    ));
                    lines.push(Line::from(vec![
                        StyleManager::span("Importance: ", StyleManager::title()),
                        StyleManager::span(tier.label(), StyleManager::section_row(StyleManager::tier_color(tier))),
                    ]));
                }
            }
            Some(ViewLine::Header { section }) => {
                let section = &sections[*section];
                lines.push(StyleManager::detail_line(
                    "Section",
                    section.label.clone().unwrap_or_default(),
                ));
                lines.push(StyleManager::detail_line("Processes", section.rows.len().to_string()));
                lines.push(StyleManager::detail_line(
                    "State",
                    if section.expanded { "expanded" } else { "collapsed" }.to_string(),
                ));
            }
            None => lines.push(Line::from("Nothing selected.")),
        }

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Details"));
        frame.render_widget(paragraph, area);
    }
}

impl<T: ProcessTable> Screen for ProcessScreen<T> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        self.search.render(frame, layout[0], SEARCH_TITLE);

        let summary = Paragraph::new(self.summary_line())
            .alignment(Alignment::Center)
            .style(StyleManager::title());
        frame.render_widget(summary, layout[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(layout[2]);
        self.render_list(frame, body[0]);
        self.render_details(frame, body[1]);

        let status_text = self.message.as_deref().unwrap_or("Ready");
        let status = Paragraph::new(status_text)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, layout[3]);

        if let Some(notification) = self.controller.notification() {
            DialogState::from_notification(notification).render(frame, area);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<ScreenAction> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(ScreenAction::Quit);
        }

        // A pending notification is modal.
        if let Some(notification) = self.controller.notification() {
            let mut dialog = DialogState::from_notification(notification);
            if dialog.handle_key(key) == DialogResult::Closed {
                self.controller.dismiss_notification();
            }
            return Ok(ScreenAction::None);
        }

        if self.search.is_focused() {
            match key.code {
                KeyCode::Enter => {
                    self.search.set_focused(false);
                    self.submit_search();
                }
                KeyCode::Esc => self.search.set_focused(false),
                _ => {
                    self.search.handle_key(key);
                }
            }
            return Ok(ScreenAction::None);
        }

        match key.code {
            KeyCode::Char('/') => self.search.set_focused(true),
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::F(5) => self.refresh(),
            KeyCode::Up => self.move_selection_up(),
            KeyCode::Down => self.move_selection_down(),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.line_count().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Delete => self.terminate_selected(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(ScreenAction::Quit)
            }
            _ => {}
        }
        Ok(ScreenAction::None)
    }

    fn key_hints(&self) -> &'static str {
        KEY_HINTS
    }
}
