//! Display tree
//!
//! Built from scratch out of the controller's grouping and expansion map on
//! every frame. No I/O happens here.

use std::collections::BTreeMap;

use ratatui::style::Color;

use crate::core::models::{ImportanceTier, ProcessRecord};
use crate::monitor::{Grouping, SectionState};
use crate::tui::components::StyleManager;

pub const SEARCH_RESULTS_TITLE: &str = "Search Results";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKey {
    Tier(ImportanceTier),
    SearchResults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub pid: u32,
    pub text: String,
}

impl From<&ProcessRecord> for RowView {
    fn from(record: &ProcessRecord) -> Self {
        Self {
            pid: record.pid,
            text: record.display_line(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub key: SectionKey,
    /// Header text; search results are unlabeled.
    pub label: Option<String>,
    pub color: Color,
    pub expanded: bool,
    pub collapsible: bool,
    pub rows: Vec<RowView>,
}

/// Build the sections to draw. Empty sections are omitted.
pub fn build_view(
    grouping: &Grouping,
    expansion: &BTreeMap<ImportanceTier, SectionState>,
) -> Vec<SectionView> {
    match grouping {
        Grouping::Tiers(groups) => groups
            .non_empty_tiers()
            .map(|tier| SectionView {
                key: SectionKey::Tier(tier),
                label: Some(tier.label().to_string()),
                color: StyleManager::tier_color(tier),
                expanded: expansion
                    .get(&tier)
                    .copied()
                    .unwrap_or_default()
                    .is_expanded(),
                collapsible: true,
                rows: groups.get(tier).iter().map(RowView::from).collect(),
            })
            .collect(),
        Grouping::SearchResults { matches, .. } if matches.is_empty() => Vec::new(),
        Grouping::SearchResults { matches, .. } => vec![SectionView {
            key: SectionKey::SearchResults,
            label: None,
            color: StyleManager::search_color(),
            expanded: true,
            collapsible: false,
            rows: matches.iter().map(RowView::from).collect(),
        }],
    }
}

/// One selectable line of the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewLine {
    Header { section: usize },
    Row { section: usize, row: usize },
}

/// Flatten sections into the lines the cursor can visit: a header per
/// labeled section, then its rows when expanded.
pub fn visible_lines(sections: &[SectionView]) -> Vec<ViewLine> {
    let mut lines = Vec::new();
    for (section_idx, section) in sections.iter().enumerate() {
        if section.label.is_some() {
            lines.push(ViewLine::Header {
                section: section_idx,
            });
        }
        if section.expanded {
            lines.extend((0..section.rows.len()).map(|row| ViewLine::Row {
                section: section_idx,
                row,
            }));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::TierGroups;
    use pretty_assertions::assert_eq;

    fn groups() -> TierGroups {
        TierGroups {
            high: vec![ProcessRecord::new(1, "sshd", Some("root".into()))],
            medium: Vec::new(),
            low: vec![
                ProcessRecord::new(3, "nginx", Some("www-data".into())),
                ProcessRecord::new(4, "cron", None),
            ],
        }
    }

    #[test]
    fn tier_sections_skip_empty_tiers_and_start_collapsed() {
        let sections = build_view(&Grouping::Tiers(groups()), &BTreeMap::new());
        let labels: Vec<_> = sections.iter().map(|s| s.label.clone().unwrap()).collect();
        assert_eq!(labels, vec!["High Importance", "Low Importance"]);
        assert!(sections.iter().all(|s| !s.expanded && s.collapsible));
        assert_eq!(sections[1].rows[0].text, "nginx (PID: 3)");
        assert_eq!(sections[0].color, Color::Red);
        assert_eq!(sections[1].color, Color::Green);
    }

    #[test]
    fn expanded_sections_expose_their_rows() {
        let mut expansion = BTreeMap::new();
        expansion.insert(ImportanceTier::Low, SectionState::Expanded);
        let sections = build_view(&Grouping::Tiers(groups()), &expansion);

        assert_eq!(
            visible_lines(&sections),
            vec![
                ViewLine::Header { section: 0 },
                ViewLine::Header { section: 1 },
                ViewLine::Row { section: 1, row: 0 },
                ViewLine::Row { section: 1, row: 1 },
            ]
        );
    }

    #[test]
    fn search_results_are_one_unlabeled_expanded_section() {
        let grouping = Grouping::SearchResults {
            term: "sh".into(),
            matches: vec![ProcessRecord::new(1, "sshd", None), ProcessRecord::new(2, "bash", None)],
        };
        let sections = build_view(&grouping, &BTreeMap::new());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].key, SectionKey::SearchResults);
        assert_eq!(sections[0].label, None);
        assert!(sections[0].expanded);
        assert_eq!(sections[0].color, Color::Blue);
        assert_eq!(
            visible_lines(&sections),
            vec![
                ViewLine::Row { section: 0, row: 0 },
                ViewLine::Row { section: 0, row: 1 },
            ]
        );
    }

    #[test]
    fn empty_search_renders_nothing() {
        let grouping = Grouping::SearchResults {
            term: "zzz".into(),
            matches: Vec::new(),
        };
        assert!(build_view(&grouping, &BTreeMap::new()).is_empty());
    }
}
