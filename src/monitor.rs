//! View controller
//!
//! Owns the current snapshot and its grouping, the per-section expansion
//! state and the pending notification. Every refresh or search throws the
//! previous snapshot away and enumerates again; nothing is filtered from an
//! older pass.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::core::classifier::classify_record;
use crate::core::models::{ImportanceTier, ProcessRecord, SessionContext};
use crate::error::TerminateError;
use crate::platform::{self, ProcessTable};

/// Records split by importance tier, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierGroups {
    pub high: Vec<ProcessRecord>,
    pub medium: Vec<ProcessRecord>,
    pub low: Vec<ProcessRecord>,
}

impl TierGroups {
    pub fn get(&self, tier: ImportanceTier) -> &[ProcessRecord] {
        match tier {
            ImportanceTier::High => &self.high,
            ImportanceTier::Medium => &self.medium,
            ImportanceTier::Low => &self.low,
        }
    }

    fn bucket_mut(&mut self, tier: ImportanceTier) -> &mut Vec<ProcessRecord> {
        match tier {
            ImportanceTier::High => &mut self.high,
            ImportanceTier::Medium => &mut self.medium,
            ImportanceTier::Low => &mut self.low,
        }
    }

    pub fn len(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tiers that have at least one member, most important first.
    pub fn non_empty_tiers(&self) -> impl Iterator<Item = ImportanceTier> + '_ {
        ImportanceTier::ALL
            .into_iter()
            .filter(move |tier| !self.get(*tier).is_empty())
    }
}

/// What the current render shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grouping {
    Tiers(TierGroups),
    SearchResults {
        term: String,
        matches: Vec<ProcessRecord>,
    },
}

impl Default for Grouping {
    fn default() -> Self {
        Grouping::Tiers(TierGroups::default())
    }
}

impl Grouping {
    pub fn find(&self, pid: u32) -> Option<&ProcessRecord> {
        match self {
            Grouping::Tiers(groups) => ImportanceTier::ALL
                .into_iter()
                .find_map(|tier| groups.get(tier).iter().find(|r| r.pid == pid)),
            Grouping::SearchResults { matches, .. } => matches.iter().find(|r| r.pid == pid),
        }
    }

    pub fn contains_pid(&self, pid: u32) -> bool {
        self.find(pid).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionState {
    #[default]
    Collapsed,
    Expanded,
}

impl SectionState {
    pub fn toggled(self) -> Self {
        match self {
            SectionState::Collapsed => SectionState::Expanded,
            SectionState::Expanded => SectionState::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == SectionState::Expanded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Modal message shown after a terminate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn terminated(pid: u32) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success".to_string(),
            message: format!("Process {} terminated successfully.", pid),
        }
    }

    pub fn terminate_failed(err: &TerminateError) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error".to_string(),
            message: format!("Failed to terminate process {}: {}", err.pid(), err),
        }
    }
}

/// Classify every record and split into tiers.
pub fn group_by_tier(records: Vec<ProcessRecord>, session: &SessionContext) -> TierGroups {
    let mut groups = TierGroups::default();
    for record in records {
        let tier = classify_record(&record, session);
        groups.bucket_mut(tier).push(record);
    }
    groups
}

/// Keep records whose name contains `term`, ignoring case.
pub fn filter_matches(records: Vec<ProcessRecord>, term: &str) -> Vec<ProcessRecord> {
    records
        .into_iter()
        .filter(|record| record.matches(term))
        .collect()
}

pub struct ViewController<T: ProcessTable> {
    table: T,
    session: SessionContext,
    terminate_timeout: Duration,
    grouping: Grouping,
    sections: BTreeMap<ImportanceTier, SectionState>,
    notification: Option<Notification>,
    last_refreshed_at: Option<DateTime<Utc>>,
}

impl<T: ProcessTable> ViewController<T> {
    /// Create a controller with an empty view. Call [`refresh`](Self::refresh)
    /// to take the first snapshot.
    pub fn new(table: T, session: SessionContext, terminate_timeout: Duration) -> Self {
        Self {
            table,
            session,
            terminate_timeout,
            grouping: Grouping::default(),
            sections: BTreeMap::new(),
            notification: None,
            last_refreshed_at: None,
        }
    }

    /// Fresh enumeration grouped by tier. All sections start collapsed.
    pub fn refresh(&mut self) {
        let records = platform::snapshot(&self.table);
        let groups = group_by_tier(records, &self.session);
        info!(
            high = groups.high.len(),
            medium = groups.medium.len(),
            low = groups.low.len(),
            "process list refreshed"
        );
        self.sections = groups
            .non_empty_tiers()
            .map(|tier| (tier, SectionState::Collapsed))
            .collect();
        self.grouping = Grouping::Tiers(groups);
        self.last_refreshed_at = Some(Utc::now());
    }

    /// Fresh enumeration filtered by name. An empty term is a plain refresh.
    pub fn search(&mut self, term: &str) {
        if term.is_empty() {
            self.refresh();
            return;
        }

        let records = platform::snapshot(&self.table);
        let matches = filter_matches(records, term);
        info!(term, matches = matches.len(), "process search");
        self.sections.clear();
        self.grouping = Grouping::SearchResults {
            term: term.to_string(),
            matches,
        };
        self.last_refreshed_at = Some(Utc::now());
    }

    /// Terminate `pid` and wait for it to exit. Success refreshes the list;
    /// failure leaves the current snapshot untouched.
    pub fn terminate_process(&mut self, pid: u32) -> Result<(), TerminateError> {
        match platform::terminate_and_wait(&self.table, pid, self.terminate_timeout) {
            Ok(()) => {
                info!(pid, "process terminated");
                self.notification = Some(Notification::terminated(pid));
                self.refresh();
                Ok(())
            }
            Err(err) => {
                warn!(pid, kind = err.kind(), "terminate failed: {}", err);
                self.notification = Some(Notification::terminate_failed(&err));
                Err(err)
            }
        }
    }

    /// Flip a tier section. Returns the new state, or `None` when the
    /// section is not currently shown.
    pub fn toggle_section(&mut self, tier: ImportanceTier) -> Option<SectionState> {
        let state = self.sections.get_mut(&tier)?;
        *state = state.toggled();
        Some(*state)
    }

    pub fn section_state(&self, tier: ImportanceTier) -> Option<SectionState> {
        self.sections.get(&tier).copied()
    }

    pub fn sections(&self) -> &BTreeMap<ImportanceTier, SectionState> {
        &self.sections
    }

    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed_at
    }

    pub fn terminate_timeout(&self) -> Duration {
        self.terminate_timeout
    }

    pub fn table(&self) -> &T {
        &self.table
    }
}
