//! TUI screens

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

// Screen-local rendering helpers using ONLY ratatui standard components
mod render_helpers;

pub mod process_list;

pub use process_list::ProcessScreen;
pub use render_helpers::{DialogResult, DialogState, InputState};

/// What the app should do after a key was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    Quit,
}

/// Trait for all TUI screens
pub trait Screen {
    fn render(&mut self, frame: &mut Frame, area: Rect);

    fn handle_key(&mut self, key: KeyEvent) -> Result<ScreenAction>;

    /// Hint line shown in the app's footer.
    fn key_hints(&self) -> &'static str;
}
