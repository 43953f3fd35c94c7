//! Grouping of line records into collapsible sections

use crate::line::{LineKind, LineRecord};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Hard cap on records per section
pub const MAX_SECTION_LEN: usize = 20;
/// Unchanged sections longer than this start collapsed
pub const COLLAPSE_AFTER: usize = 5;

/// Display classification of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Unchanged,
    Changed,
    Conflict,
}

impl SectionKind {
    pub fn of(record: &LineRecord) -> Self {
        if record.kind == LineKind::Unchanged {
            SectionKind::Unchanged
        } else if record.is_conflict {
            SectionKind::Conflict
        } else {
            SectionKind::Changed
        }
    }

    /// Upper-case label used in report headers
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Unchanged => "UNCHANGED",
            SectionKind::Changed => "CHANGED",
            SectionKind::Conflict => "CONFLICT",
        }
    }
}

/// A contiguous run of records sharing one classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Index of the first record
    pub start: usize,
    /// Index of the last record (inclusive)
    pub end: usize,
    pub kind: SectionKind,
    /// Display hint for long unchanged runs
    pub collapsed_by_default: bool,
}

impl Section {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    /// Sections always hold at least one record
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Half-open range into the record sequence
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len()
    }

    pub fn is_change(&self) -> bool {
        self.kind != SectionKind::Unchanged
    }
}

/// Size limits applied while grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLimits {
    /// Maximum records per section; 0 is treated as 1
    pub max_len: usize,
    pub collapse_after: usize,
}

impl Default for SectionLimits {
    fn default() -> Self {
        Self {
            max_len: MAX_SECTION_LEN,
            collapse_after: COLLAPSE_AFTER,
        }
    }
}

/// Group records with the default limits
pub fn group(records: &[LineRecord]) -> Vec<Section> {
    group_with(records, SectionLimits::default())
}

pub fn group_with(records: &[LineRecord], limits: SectionLimits) -> Vec<Section> {
    let max_len = limits.max_len.max(1);
    let close = |start: usize, end: usize, kind: SectionKind| Section {
        start,
        end,
        kind,
        collapsed_by_default: kind == SectionKind::Unchanged
            && end - start + 1 > limits.collapse_after,
    };

    let mut sections = Vec::new();
    let mut open: Option<(usize, SectionKind)> = None;

    for (idx, record) in records.iter().enumerate() {
        let kind = SectionKind::of(record);
        match open {
            Some((start, current)) if current == kind && idx - start < max_len => {}
            Some((start, current)) => {
                sections.push(close(start, idx - 1, current));
                open = Some((idx, kind));
            }
            None => open = Some((idx, kind)),
        }
    }

    if let Some((start, kind)) = open {
        sections.push(close(start, records.len() - 1, kind));
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;

    fn unchanged(n: usize) -> Vec<LineRecord> {
        (1..=n).map(|i| LineRecord::unchanged(i, i, "same")).collect()
    }

    fn assert_complete(records: &[LineRecord], sections: &[Section], max_len: usize) {
        let mut next = 0;
        for section in sections {
            assert_eq!(section.start, next, "gap or overlap at {next}");
            assert!(section.len() <= max_len);
            next = section.end + 1;
        }
        assert_eq!(next, records.len());
    }

    #[test]
    fn test_len_of_inverted_bounds_does_not_underflow() {
        // Sections can be built by hand or deserialized from JSON
        let section: Section = serde_json::from_str(
            r#"{"start":5,"end":2,"kind":"unchanged","collapsed_by_default":false}"#,
        )
        .expect("section json");
        assert_eq!(section.len(), 1);
        assert_eq!(section.range(), 5..6);
        assert!(!section.is_empty());
    }

    #[test]
    fn test_empty_input_has_no_sections() {
        assert!(group(&[]).is_empty());
    }

    #[test]
    fn test_single_record_never_collapsed() {
        let sections = group(&unchanged(1));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].len(), 1);
        assert!(!sections[0].collapsed_by_default);
    }

    #[test]
    fn test_identical_three_lines() {
        let records = align("a\nb\nc", "a\nb\nc");
        let sections = group(&records);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::Unchanged);
        assert_eq!((sections[0].start, sections[0].end), (0, 2));
        assert!(!sections[0].collapsed_by_default);
    }

    #[test]
    fn test_appended_line_splits_sections() {
        let records = align("a", "a\nb");
        let sections = group(&records);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].kind, SectionKind::Unchanged);
        assert_eq!(sections[0].len(), 1);
        assert_eq!(sections[1].kind, SectionKind::Changed);
        assert_eq!(sections[1].len(), 1);
    }

    #[test]
    fn test_collapse_hint_only_for_long_unchanged_runs() {
        assert!(!group(&unchanged(5))[0].collapsed_by_default);
        assert!(group(&unchanged(6))[0].collapsed_by_default);

        let changed: Vec<LineRecord> = (1..=8).map(|i| LineRecord::added(i, "new")).collect();
        let sections = group(&changed);
        assert_eq!(sections[0].kind, SectionKind::Changed);
        assert!(!sections[0].collapsed_by_default);
    }

    #[test]
    fn test_long_runs_are_capped() {
        let records = unchanged(45);
        let sections = group(&records);
        let lengths: Vec<usize> = sections.iter().map(Section::len).collect();
        assert_eq!(lengths, vec![20, 20, 5]);
        assert!(sections.iter().all(|s| s.kind == SectionKind::Unchanged));
        assert!(!sections[2].collapsed_by_default);
        assert_complete(&records, &sections, MAX_SECTION_LEN);
    }

    #[test]
    fn test_conflicts_break_changed_runs() {
        let records = vec![
            LineRecord::added(1, "x"),
            LineRecord::modified(1, 2, "abcdef", "abcxyz", 0.5, true),
            LineRecord::removed(2, "y"),
            LineRecord::unchanged(3, 3, "z"),
        ];
        let sections = group(&records);
        let kinds: Vec<SectionKind> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Changed,
                SectionKind::Conflict,
                SectionKind::Changed,
                SectionKind::Unchanged,
            ]
        );
        assert_complete(&records, &sections, MAX_SECTION_LEN);
    }

    #[test]
    fn test_sections_cover_every_record() {
        let old = (0..60).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let new = (0..60)
            .map(|i| match i % 7 {
                0 => format!("line {i} changed"),
                3 => format!("totally different {i}"),
                _ => format!("line {i}"),
            })
            .collect::<Vec<_>>()
            .join("\n");
        let records = align(&old, &new);
        let sections = group(&records);
        assert_complete(&records, &sections, MAX_SECTION_LEN);
    }

    #[test]
    fn test_zero_max_len_treated_as_one() {
        let records = unchanged(3);
        let sections = group_with(
            &records,
            SectionLimits {
                max_len: 0,
                collapse_after: 5,
            },
        );
        assert_eq!(sections.len(), 3);
        assert_complete(&records, &sections, 1);
    }
}
