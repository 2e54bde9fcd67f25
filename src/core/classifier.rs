//! Importance classification by process owner

use super::models::{ImportanceTier, ProcessRecord, SessionContext};

/// Classify an owner against the current user and the privileged account.
///
/// Unknown owners are always `Low`.
pub fn classify_owner(
    owner: Option<&str>,
    current_user: &str,
    privileged_account: &str,
) -> ImportanceTier {
    match owner {
        Some(owner) if owner == privileged_account => ImportanceTier::High,
        Some(owner) if owner == current_user => ImportanceTier::Medium,
        _ => ImportanceTier::Low,
    }
}

pub fn classify(owner: Option<&str>, session: &SessionContext) -> ImportanceTier {
    classify_owner(owner, session.current_user(), session.privileged_account())
}

pub fn classify_record(record: &ProcessRecord, session: &SessionContext) -> ImportanceTier {
    classify(record.owner.as_deref(), session)
}
