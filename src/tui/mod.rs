//! Terminal UI
//!
//! A single ratatui screen driven by a synchronous crossterm event loop.
//! Every operation (enumeration, terminate, render) runs on this thread in
//! response to a key press.

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

pub mod app;
pub mod components;
pub mod screens;
pub mod view;

use self::components::StyleManager;
pub use screens::{ProcessScreen, Screen, ScreenAction};

pub const WINDOW_TITLE: &str = "Process Monitor";

/// TUI application container
pub struct App {
    should_quit: bool,
    title: String,
    screen: Box<dyn Screen>,
}

impl App {
    pub fn new(screen: Box<dyn Screen>, current_user: &str) -> Self {
        Self {
            should_quit: false,
            title: format!("{} - {}", WINDOW_TITLE, current_user),
            screen,
        }
    }

    /// Take over the terminal until the user quits. The terminal is restored
    /// even when the loop fails.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut terminal = setup_or_undo(enter_terminal, || {
            let _ = execute!(stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;

        let result = self.event_loop(&mut terminal);

        restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            self.draw(terminal)?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    // Windows reports both press and release
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key)?,
                    Event::Resize(_, _) => {
                        // redrawn on the next iteration
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        Ok(())
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> Result<()> {
        if self.screen.handle_key(key)? == ScreenAction::Quit {
            self.should_quit = true;
        }
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // title bar
                Constraint::Min(0),    // screen
                Constraint::Length(3), // key hints
            ])
            .split(frame.size());

        self.render_title_bar(frame, chunks[0]);
        self.screen.render(frame, chunks[1]);
        self.render_key_hints(frame, chunks[2]);
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.title.as_str())
            .style(StyleManager::title())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn render_key_hints(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(Line::from(Span::raw(self.screen.key_hints())))
            .style(StyleManager::hint_bar())
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        crossterm::terminal::Clear(ClearType::All)
    )?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Run `setup`; when it fails, run `undo` before handing back the error.
fn setup_or_undo<T>(setup: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    setup().map_err(|err| {
        undo();
        err
    })
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        crossterm::terminal::Clear(ClearType::All)
    )?;
    disable_raw_mode()?;
    terminal.show_cursor()?;
    Ok(())
}
