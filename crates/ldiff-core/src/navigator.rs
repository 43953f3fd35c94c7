//! Fold and change navigation over a computed diff

use crate::diff::DiffResult;
use crate::section::Section;
use serde::{Deserialize, Serialize};

/// One visible row of a folded view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Row {
    /// A record from an expanded section
    Line { section: usize, record: usize },
    /// Placeholder for a collapsed section
    Fold { section: usize, hidden: usize },
}

/// Current navigation position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavState {
    /// Section the cursor is on (0 when there are no sections)
    pub current_section: usize,
    pub total_sections: usize,
    /// 1-based index among change sections, if the cursor is on one
    pub current_change: Option<usize>,
    pub total_changes: usize,
}

/// Navigator for folding sections and jumping between changes
pub struct FoldNavigator {
    diff: DiffResult,
    /// Per-section expansion flag
    expanded: Vec<bool>,
    /// Indexes of change sections, ascending
    changes: Vec<usize>,
    current: usize,
}

impl FoldNavigator {
    pub fn new(diff: DiffResult) -> Self {
        let expanded = diff
            .sections
            .iter()
            .map(|s| !s.collapsed_by_default)
            .collect();
        let changes = diff.change_sections();
        Self {
            diff,
            expanded,
            changes,
            current: 0,
        }
    }

    pub fn diff(&self) -> &DiffResult {
        &self.diff
    }

    pub fn state(&self) -> NavState {
        NavState {
            current_section: self.current,
            total_sections: self.diff.sections.len(),
            current_change: self
                .changes
                .iter()
                .position(|&idx| idx == self.current)
                .map(|pos| pos + 1),
            total_changes: self.changes.len(),
        }
    }

    pub fn current_section(&self) -> Option<&Section> {
        self.diff.sections.get(self.current)
    }

    // ==================== Change Navigation ====================

    /// Move to the next change section
    /// Returns false if there is none after the cursor
    pub fn next_change(&mut self) -> bool {
        match self.changes.iter().find(|&&idx| idx > self.current) {
            Some(&idx) => {
                self.current = idx;
                true
            }
            None => false,
        }
    }

    /// Move to the previous change section
    pub fn prev_change(&mut self) -> bool {
        match self.changes.iter().rev().find(|&&idx| idx < self.current) {
            Some(&idx) => {
                self.current = idx;
                true
            }
            None => false,
        }
    }

    /// Jump to a section, clamped to the last one
    pub fn goto(&mut self, section: usize) {
        self.current = section.min(self.diff.sections.len().saturating_sub(1));
    }

    pub fn goto_start(&mut self) {
        self.goto(0);
    }

    pub fn goto_end(&mut self) {
        self.goto(usize::MAX);
    }

    // ==================== Folding ====================

    pub fn is_expanded(&self, section: usize) -> bool {
        self.expanded.get(section).copied().unwrap_or(false)
    }

    /// Only unchanged sections fold; changes always stay visible
    fn foldable(&self, section: usize) -> bool {
        self.diff
            .sections
            .get(section)
            .is_some_and(|s| !s.is_change())
    }

    pub fn expand(&mut self, section: usize) {
        if let Some(flag) = self.expanded.get_mut(section) {
            *flag = true;
        }
    }

    pub fn collapse(&mut self, section: usize) {
        if self.foldable(section) {
            self.expanded[section] = false;
        }
    }

    pub fn toggle(&mut self, section: usize) {
        if self.foldable(section) {
            self.expanded[section] = !self.expanded[section];
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded.iter_mut().for_each(|flag| *flag = true);
    }

    /// Restore each section's default fold state
    pub fn reset_folds(&mut self) {
        for (flag, section) in self.expanded.iter_mut().zip(&self.diff.sections) {
            *flag = !section.collapsed_by_default;
        }
    }

    /// Rows to display, with collapsed sections folded into one row each
    pub fn visible_rows(&self) -> Vec<Row> {
        let mut rows = Vec::with_capacity(self.diff.records.len());
        for (idx, section) in self.diff.sections.iter().enumerate() {
            if self.expanded[idx] {
                rows.extend(section.range().map(|record| Row::Line {
                    section: idx,
                    record,
                }));
            } else {
                rows.push(Row::Fold {
                    section: idx,
                    hidden: section.len(),
                });
            }
        }
        rows
    }
}
