//! TUI entry point

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::core::models::SessionContext;
use crate::monitor::ViewController;
use crate::platform::{self, SystemProcessTable};
use crate::tui::{App, ProcessScreen};

/// Resolve the session from the OS and config.
pub fn session_from_config(config: &Config) -> SessionContext {
    SessionContext::new(platform::current_user(), config.privileged_account.clone())
}

/// Run the process monitor TUI against the live process table.
pub fn run_tui_app(config: &Config, initial_search: Option<String>) -> Result<()> {
    let session = session_from_config(config);
    info!(
        user = session.current_user(),
        privileged = session.privileged_account(),
        "starting process monitor"
    );

    let current_user = session.current_user().to_string();
    let controller = ViewController::new(
        SystemProcessTable::new(),
        session,
        config.terminate_timeout(),
    );
    let screen = ProcessScreen::with_search(controller, initial_search);

    let mut app = App::new(Box::new(screen), &current_user);
    app.run()
}
