//! `list` command: grouped text output

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;

use crate::core::models::ImportanceTier;
use crate::monitor::{Grouping, SectionState, ViewController};
use crate::platform::ProcessTable;
use crate::tui::view::{build_view, SEARCH_RESULTS_TITLE};

/// Enumerate (optionally filtered) and write every section fully expanded.
pub fn run_list<T: ProcessTable, W: Write>(
    controller: &mut ViewController<T>,
    search: Option<&str>,
    out: &mut W,
) -> Result<()> {
    controller.search(search.unwrap_or_default());
    write_listing(controller.grouping(), out)
}

pub fn write_listing<W: Write>(grouping: &Grouping, out: &mut W) -> Result<()> {
    let expanded: BTreeMap<ImportanceTier, SectionState> = ImportanceTier::ALL
        .into_iter()
        .map(|tier| (tier, SectionState::Expanded))
        .collect();
    let sections = build_view(grouping, &expanded);

    if sections.is_empty() {
        writeln!(out, "No processes to show.")?;
        return Ok(());
    }

    for section in sections {
        let heading = section.label.as_deref().unwrap_or(SEARCH_RESULTS_TITLE);
        writeln!(out, "{} ({})", heading, section.rows.len())?;
        for row in &section.rows {
            writeln!(out, "  {}", row.text)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ProcessRecord;
    use crate::monitor::TierGroups;
    use pretty_assertions::assert_eq;

    #[test]
    fn listing_prints_sections_in_tier_order() {
        let grouping = Grouping::Tiers(TierGroups {
            high: vec![ProcessRecord::new(1, "sshd", Some("root".into()))],
            medium: vec![ProcessRecord::new(2, "bash", Some("alice".into()))],
            low: Vec::new(),
        });
        let mut out = Vec::new();
        write_listing(&grouping, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "High Importance (1)\n  sshd (PID: 1)\n\nMedium Importance (1)\n  bash (PID: 2)\n\n"
        );
    }

    #[test]
    fn empty_listing_says_so() {
        let grouping = Grouping::SearchResults {
            term: "nothing".into(),
            matches: Vec::new(),
        };
        let mut out = Vec::new();
        write_listing(&grouping, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No processes to show.\n");
    }
}
