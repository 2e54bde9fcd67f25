//! Core data model
//!
//! Process records, importance tiers and the session context they are
//! classified against.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One process as seen by a single enumeration pass.
///
/// Records are never mutated; a refresh replaces the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    /// Owning account name, `None` when it could not be read.
    pub owner: Option<String>,
}

impl ProcessRecord {
    pub fn new(pid: u32, name: impl Into<String>, owner: Option<String>) -> Self {
        Self {
            pid,
            name: name.into(),
            owner,
        }
    }

    /// Row text shown in every list: `name (PID: pid)`.
    pub fn display_line(&self) -> String {
        format!("{} (PID: {})", self.name, self.pid)
    }

    /// Case-insensitive substring match on the process name.
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Importance tier derived from process ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImportanceTier {
    High,
    Medium,
    Low,
}

impl ImportanceTier {
    /// Render order, most important first.
    pub const ALL: [ImportanceTier; 3] = [
        ImportanceTier::High,
        ImportanceTier::Medium,
        ImportanceTier::Low,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ImportanceTier::High => "High Importance",
            ImportanceTier::Medium => "Medium Importance",
            ImportanceTier::Low => "Low Importance",
        }
    }
}

impl fmt::Display for ImportanceTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ImportanceTier::High => write!(f, "high"),
            ImportanceTier::Medium => write!(f, "medium"),
            ImportanceTier::Low => write!(f, "low"),
        }
    }
}

/// Identity of the session running procwarden, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    current_user: String,
    privileged_account: String,
}

impl SessionContext {
    pub fn new(current_user: impl Into<String>, privileged_account: impl Into<String>) -> Self {
        Self {
            current_user: current_user.into(),
            privileged_account: privileged_account.into(),
        }
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn privileged_account(&self) -> &str {
        &self.privileged_account
    }
}
