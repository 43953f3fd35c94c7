//! Diff engine: alignment plus section grouping

use crate::align::{align_with, Thresholds};
use crate::line::{LineKind, LineRecord};
use crate::section::{group_with, Section, SectionLimits};
use serde::{Deserialize, Serialize};

/// Counts over a record sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    /// Modified records flagged as conflicts (a subset of `modified`)
    pub conflicts: usize,
    pub unchanged: usize,
    pub old_lines: usize,
    pub new_lines: usize,
}

impl DiffStats {
    pub fn from_records(records: &[LineRecord]) -> Self {
        let mut stats = Self::default();
        for record in records {
            match record.kind {
                LineKind::Added => stats.added += 1,
                LineKind::Removed => stats.removed += 1,
                LineKind::Modified => {
                    stats.modified += 1;
                    if record.is_conflict {
                        stats.conflicts += 1;
                    }
                }
                LineKind::Unchanged => stats.unchanged += 1,
            }
            if record.old_line.is_some() {
                stats.old_lines += 1;
            }
            if record.new_line.is_some() {
                stats.new_lines += 1;
            }
        }
        stats
    }

    /// Lines that exist only in (or changed into) the new text
    pub fn insertions(&self) -> usize {
        self.added + self.modified
    }

    /// Lines that exist only in (or changed out of) the old text
    pub fn deletions(&self) -> usize {
        self.removed + self.modified
    }
}

/// Full result of diffing two texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    pub records: Vec<LineRecord>,
    pub sections: Vec<Section>,
    pub stats: DiffStats,
}

impl DiffResult {
    pub fn is_identical(&self) -> bool {
        self.records.iter().all(|r| !r.is_change())
    }

    /// Records belonging to a section
    pub fn section_records(&self, section: &Section) -> &[LineRecord] {
        &self.records[section.range()]
    }

    /// Indexes of sections containing changes
    pub fn change_sections(&self) -> Vec<usize> {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_change())
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Configurable diff engine
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine {
    thresholds: Thresholds,
    limits: SectionLimits,
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = Thresholds {
            modify: clamp_unit(thresholds.modify),
            conflict: clamp_unit(thresholds.conflict),
        };
        self
    }

    pub fn with_modify_threshold(mut self, modify: f64) -> Self {
        self.thresholds.modify = clamp_unit(modify);
        self
    }

    pub fn with_conflict_threshold(mut self, conflict: f64) -> Self {
        self.thresholds.conflict = clamp_unit(conflict);
        self
    }

    pub fn with_section_limits(mut self, limits: SectionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn section_limits(&self) -> SectionLimits {
        self.limits
    }

    /// Align two texts and group the result into sections
    pub fn diff_strings(&self, old: &str, new: &str) -> DiffResult {
        let records = align_with(old, new, self.thresholds);
        let sections = group_with(&records, self.limits);
        let stats = DiffStats::from_records(&records);

        tracing::debug!(
            records = records.len(),
            sections = sections.len(),
            added = stats.added,
            removed = stats.removed,
            modified = stats.modified,
            conflicts = stats.conflicts,
            "diff computed"
        );

        DiffResult {
            records,
            sections,
            stats,
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionKind;

    #[test]
    fn test_identical_texts() {
        let result = DiffEngine::new().diff_strings("a\nb\nc", "a\nb\nc");
        assert!(result.is_identical());
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.sections.len(), 1);
        assert!(!result.sections[0].collapsed_by_default);
        assert_eq!(result.stats.unchanged, 3);
        assert!(result.change_sections().is_empty());
    }

    #[test]
    fn test_stats_and_change_sections() {
        let result = DiffEngine::new().diff_strings("a\ncat\nhello world", "a\ndog\nhello word\nz");
        let stats = result.stats;
        assert_eq!(stats.unchanged, 1);
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.added, 2);
        assert_eq!(stats.modified, 1);
        assert_eq!(stats.conflicts, 0);
        assert_eq!(stats.old_lines, 3);
        assert_eq!(stats.new_lines, 4);
        assert_eq!(stats.insertions(), 3);
        assert_eq!(stats.deletions(), 2);

        assert!(!result.is_identical());
        assert_eq!(result.change_sections(), vec![1]);
        let changed = &result.sections[1];
        assert_eq!(changed.kind, SectionKind::Changed);
        assert_eq!(result.section_records(changed).len(), 4);
    }

    #[test]
    fn test_builder_clamps_thresholds() {
        let engine = DiffEngine::new()
            .with_modify_threshold(-1.0)
            .with_conflict_threshold(4.0);
        assert_eq!(engine.thresholds().modify, 0.0);
        assert_eq!(engine.thresholds().conflict, 1.0);

        let engine = DiffEngine::new().with_thresholds(Thresholds {
            modify: f64::NAN,
            conflict: 0.5,
        });
        assert_eq!(engine.thresholds().modify, 0.0);
        assert_eq!(engine.thresholds().conflict, 0.5);
    }

    #[test]
    fn test_conflict_threshold_changes_section_kind() {
        let old = "hello world";
        let new = "hello word";
        let lenient = DiffEngine::new().diff_strings(old, new);
        assert_eq!(lenient.sections[0].kind, SectionKind::Changed);

        let strict = DiffEngine::new()
            .with_conflict_threshold(0.95)
            .diff_strings(old, new);
        assert_eq!(strict.sections[0].kind, SectionKind::Conflict);
        assert_eq!(strict.stats.conflicts, 1);
    }

    #[test]
    fn test_section_limits_are_applied() {
        let text = (0..10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let result = DiffEngine::new()
            .with_section_limits(SectionLimits {
                max_len: 4,
                collapse_after: 2,
            })
            .diff_strings(&text, &text);
        let lengths: Vec<usize> = result.sections.iter().map(Section::len).collect();
        assert_eq!(lengths, vec![4, 4, 2]);
        assert!(result.sections[0].collapsed_by_default);
        assert!(!result.sections[2].collapsed_by_default);
    }

    #[test]
    fn test_result_serializes_to_json() {
        let result = DiffEngine::new().diff_strings("a", "a\nb");
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["records"][1]["kind"], "added");
        assert_eq!(json["records"][1]["old_line"], serde_json::Value::Null);
        assert_eq!(json["sections"][1]["kind"], "changed");
        assert_eq!(json["stats"]["added"], 1);

        let back: DiffResult = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, result);
    }
}
