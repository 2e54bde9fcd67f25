//! Screen-local rendering helpers
//!
//! Small state structs plus render functions composed only of ratatui's
//! standard widgets (Block, Paragraph, Clear).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::monitor::{Notification, NotificationKind};

/// Dialog interaction result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    None,
    Closed,
}

/// Modal message box with a single OK button
#[derive(Debug, Clone)]
pub struct DialogState {
    title: String,
    message: String,
    kind: NotificationKind,
}

impl DialogState {
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(70).max(30).min(area.width);
        let height = area.height.min(9).max(7).min(area.height);
        let dialog_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, dialog_area);

        let title_style = match self.kind {
            NotificationKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            NotificationKind::Success => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(self.title.as_str(), title_style));
        frame.render_widget(block, dialog_area);

        let inner = Rect {
            x: dialog_area.x + 1,
            y: dialog_area.y + 1,
            width: dialog_area.width.saturating_sub(2),
            height: dialog_area.height.saturating_sub(2),
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let paragraph = Paragraph::new(self.message.as_str())
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, chunks[0]);

        let button = Paragraph::new(Line::from(Span::styled(
            "[ OK ]",
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(button, chunks[1]);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => DialogResult::Closed,
            _ => DialogResult::None,
        }
    }
}

/// Single-line text input
#[derive(Debug, Clone, Default)]
pub struct InputState {
    value: String,
    cursor: usize,
    focused: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: String) -> Self {
        self.cursor = value.len();
        self.value = value;
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true when the key edited the input.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => {
                self.cursor = self.prev_boundary();
                true
            }
            KeyCode::Right => {
                self.cursor = self.next_boundary();
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.value.drain(prev..self.cursor);
                    self.cursor = prev;
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    let next = self.next_boundary();
                    self.value.drain(self.cursor..next);
                }
                true
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(title.to_string(), Style::default().fg(Color::Cyan)));
        let paragraph = Paragraph::new(self.value.as_str()).block(block);
        frame.render_widget(paragraph, area);

        if self.focused {
            let prefix_width = self.value[..self.cursor].chars().count() as u16;
            let max_x = area.x + area.width.saturating_sub(2);
            let cursor_x = (area.x + 1 + prefix_width).min(max_x);
            frame.set_cursor(cursor_x, area.y + 1);
        }
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.value.len())
    }
}
