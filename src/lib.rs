//! Procwarden Library
//!
//! Lists running processes, ranks them by how important their owner is
//! (privileged account, current user, everyone else), and lets the operator
//! search and terminate them from a terminal UI.

pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod monitor;
pub mod platform;
pub mod tui;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::models::{ImportanceTier, ProcessRecord, SessionContext};
pub use core::{classify, classify_owner};
pub use error::{ConfigError, EnumerationError, TerminateError};
pub use monitor::{Grouping, Notification, NotificationKind, SectionState, TierGroups, ViewController};
pub use platform::{ProcessTable, SystemProcessTable};
