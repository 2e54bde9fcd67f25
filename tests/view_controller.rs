mod common;

use common::{controller, names, sample_table, Behavior, FakeProcessTable};
use pretty_assertions::assert_eq;
use procwarden::{
    EnumerationError, Grouping, ImportanceTier, NotificationKind, SectionState, TerminateError,
};

fn tiers(grouping: &Grouping) -> &procwarden::TierGroups {
    match grouping {
        Grouping::Tiers(groups) => groups,
        other => panic!("expected tier grouping, got {:?}", other),
    }
}

#[test]
fn refresh_groups_sample_table_by_owner() {
    let mut ctl = controller(sample_table());
    ctl.refresh();

    let groups = tiers(ctl.grouping());
    assert_eq!(names(&groups.high), vec!["sshd"]);
    assert_eq!(names(&groups.medium), vec!["bash"]);
    assert_eq!(names(&groups.low), vec!["nginx"]);
    assert!(ctl.last_refreshed_at().is_some());
}

#[test]
fn refresh_skips_unreadable_records_and_keeps_unknown_owners_low() {
    let table = sample_table()
        .with(4, "mystery", None)
        .with_unreadable(EnumerationError::AccessDenied(5))
        .with_unreadable(EnumerationError::ZombieProcess(6))
        .with_unreadable(EnumerationError::NoSuchProcess(7));
    let mut ctl = controller(table);
    ctl.refresh();

    let groups = tiers(ctl.grouping());
    assert_eq!(groups.len(), 4);
    assert_eq!(names(&groups.low), vec!["nginx", "mystery"]);
}

#[test]
fn refresh_is_idempotent_without_table_changes() {
    let mut ctl = controller(sample_table());
    ctl.refresh();
    let first = ctl.grouping().clone();
    ctl.refresh();
    assert_eq!(ctl.grouping(), &first);
}

#[test]
fn refresh_picks_up_new_processes() {
    let mut ctl = controller(sample_table());
    ctl.refresh();
    ctl.table().spawn(8, "top", Some("alice"));
    ctl.refresh();
    assert_eq!(names(&tiers(ctl.grouping()).medium), vec!["bash", "top"]);
}

#[test]
fn empty_search_matches_refresh() {
    let mut refreshed = controller(sample_table());
    refreshed.refresh();

    let mut searched = controller(sample_table());
    searched.search("");

    assert_eq!(searched.grouping(), refreshed.grouping());
    assert_eq!(searched.sections(), refreshed.sections());
}

#[test]
fn search_returns_case_insensitive_matches_in_one_section() {
    let mut ctl = controller(sample_table());
    ctl.search("SH");

    match ctl.grouping() {
        Grouping::SearchResults { term, matches } => {
            assert_eq!(term, "SH");
            assert_eq!(names(matches), vec!["sshd", "bash"]);
        }
        other => panic!("expected search results, got {:?}", other),
    }
    assert!(ctl.sections().is_empty());
}

#[test]
fn search_enumerates_afresh_instead_of_filtering_previous_results() {
    let mut ctl = controller(sample_table());
    ctl.search("nginx");
    ctl.table().spawn(9, "ssh-agent", Some("alice"));
    ctl.search("sh");

    match ctl.grouping() {
        Grouping::SearchResults { matches, .. } => {
            assert_eq!(names(matches), vec!["sshd", "bash", "ssh-agent"]);
        }
        other => panic!("expected search results, got {:?}", other),
    }
    assert_eq!(ctl.table().enumerations(), 2);
}

#[test]
fn sections_start_collapsed_and_reset_on_refresh() {
    let mut ctl = controller(sample_table());
    ctl.refresh();
    for tier in ImportanceTier::ALL {
        assert_eq!(ctl.section_state(tier), Some(SectionState::Collapsed));
    }

    assert_eq!(
        ctl.toggle_section(ImportanceTier::High),
        Some(SectionState::Expanded)
    );
    assert_eq!(
        ctl.toggle_section(ImportanceTier::Low),
        Some(SectionState::Expanded)
    );
    assert_eq!(
        ctl.toggle_section(ImportanceTier::Low),
        Some(SectionState::Collapsed)
    );

    ctl.refresh();
    assert_eq!(
        ctl.section_state(ImportanceTier::High),
        Some(SectionState::Collapsed)
    );
}

#[test]
fn empty_tiers_have_no_section() {
    let mut ctl = controller(FakeProcessTable::new().with(1, "sshd", Some("root")));
    ctl.refresh();
    assert_eq!(ctl.section_state(ImportanceTier::Medium), None);
    assert_eq!(ctl.toggle_section(ImportanceTier::Medium), None);
}

#[test]
fn terminate_success_notifies_and_refreshes() {
    let mut ctl = controller(sample_table());
    ctl.refresh();
    ctl.toggle_section(ImportanceTier::Medium);
    let passes_before = ctl.table().enumerations();

    assert_eq!(ctl.terminate_process(2), Ok(()));

    let notification = ctl.notification().expect("notification");
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(notification.message, "Process 2 terminated successfully.");
    assert_eq!(ctl.table().enumerations(), passes_before + 1);
    assert!(!ctl.grouping().contains_pid(2));
    assert_eq!(ctl.section_state(ImportanceTier::Medium), None);
}

#[test]
fn terminate_missing_process_reports_error_without_refresh() {
    let mut ctl = controller(sample_table());
    ctl.refresh();
    let before = ctl.grouping().clone();
    let passes_before = ctl.table().enumerations();

    assert_eq!(
        ctl.terminate_process(999),
        Err(TerminateError::NoSuchProcess(999))
    );

    let notification = ctl.notification().expect("notification");
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.title, "Error");
    assert!(notification.message.contains("999"));
    assert!(notification.message.contains("no longer exists"));
    assert_eq!(ctl.table().enumerations(), passes_before);
    assert_eq!(ctl.grouping(), &before);
}

#[test]
fn terminate_access_denied_reports_error() {
    let table = FakeProcessTable::new().with_behavior(1, "sshd", Some("root"), Behavior::Protected);
    let mut ctl = controller(table);
    ctl.refresh();

    assert_eq!(ctl.terminate_process(1), Err(TerminateError::AccessDenied(1)));
    assert!(ctl.grouping().contains_pid(1));
    assert!(ctl
        .notification()
        .map(|n| n.message.contains("access denied"))
        .unwrap_or(false));
}

#[test]
fn terminate_times_out_when_process_keeps_running() {
    let table =
        FakeProcessTable::new().with_behavior(5, "stubborn", Some("alice"), Behavior::IgnoresTerm);
    let mut ctl = controller(table);
    ctl.refresh();
    let passes_before = ctl.table().enumerations();

    let err = ctl.terminate_process(5).unwrap_err();
    assert!(matches!(err, TerminateError::Timeout { pid: 5, .. }));
    assert_eq!(ctl.table().enumerations(), passes_before);
    assert!(ctl.notification().unwrap().message.contains("timeout"));
}

#[test]
fn dismissing_notification_clears_it() {
    let mut ctl = controller(sample_table());
    let _ = ctl.terminate_process(999);
    assert!(ctl.dismiss_notification().is_some());
    assert!(ctl.notification().is_none());
}
