//! Line records produced by the aligner

use serde::{Deserialize, Serialize};

/// Classification of one aligned row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl LineKind {
    /// Single-character marker used by reports and the CLI gutter
    pub fn prefix(self) -> char {
        match self {
            LineKind::Added => '+',
            LineKind::Removed => '-',
            LineKind::Modified => '~',
            LineKind::Unchanged => ' ',
        }
    }
}

/// One row of the aligned diff
///
/// `old_line` is only absent for [`LineKind::Added`] and `new_line` is only
/// absent for [`LineKind::Removed`]. Use the constructors to keep that true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// 1-based line number in the old text
    pub old_line: Option<usize>,
    /// 1-based line number in the new text
    pub new_line: Option<usize>,
    pub kind: LineKind,
    pub old_text: String,
    pub new_text: String,
    /// Modified pair whose similarity fell below the conflict threshold
    pub is_conflict: bool,
    /// Score that classified a modified pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl LineRecord {
    pub fn added(new_line: usize, text: &str) -> Self {
        Self {
            old_line: None,
            new_line: Some(new_line),
            kind: LineKind::Added,
            old_text: String::new(),
            new_text: text.to_string(),
            is_conflict: false,
            similarity: None,
        }
    }

    pub fn removed(old_line: usize, text: &str) -> Self {
        Self {
            old_line: Some(old_line),
            new_line: None,
            kind: LineKind::Removed,
            old_text: text.to_string(),
            new_text: String::new(),
            is_conflict: false,
            similarity: None,
        }
    }

    pub fn unchanged(old_line: usize, new_line: usize, text: &str) -> Self {
        Self {
            old_line: Some(old_line),
            new_line: Some(new_line),
            kind: LineKind::Unchanged,
            old_text: text.to_string(),
            new_text: text.to_string(),
            is_conflict: false,
            similarity: None,
        }
    }

    pub fn modified(
        old_line: usize,
        new_line: usize,
        old_text: &str,
        new_text: &str,
        similarity: f64,
        is_conflict: bool,
    ) -> Self {
        Self {
            old_line: Some(old_line),
            new_line: Some(new_line),
            kind: LineKind::Modified,
            old_text: old_text.to_string(),
            new_text: new_text.to_string(),
            is_conflict,
            similarity: Some(similarity),
        }
    }

    /// True for anything other than an unchanged row
    pub fn is_change(&self) -> bool {
        self.kind != LineKind::Unchanged
    }

    /// Text shown for a single-column rendering
    pub fn display_text(&self) -> &str {
        match self.kind {
            LineKind::Removed => &self.old_text,
            _ => &self.new_text,
        }
    }
}

/// Split text into lines on `\n` only
///
/// `\r\n` is left alone, a trailing newline yields a trailing empty line, and
/// the empty string is one empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}
