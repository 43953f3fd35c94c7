//! Greedy two-pointer line aligner
//!
//! Both cursors move together on every mismatch; there is no lookahead. An
//! inserted or deleted line therefore shifts every following pair out of
//! step, which is the expected output of this aligner.

use crate::line::{split_lines, LineRecord};
use crate::similarity::similarity;
use serde::{Deserialize, Serialize};

/// Pairs scoring above this are a modification rather than remove + add
pub const MODIFY_THRESHOLD: f64 = 0.3;
/// Modifications scoring below this are flagged as conflicts
pub const CONFLICT_THRESHOLD: f64 = 0.7;

/// Score cut-offs used when two lines differ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub modify: f64,
    pub conflict: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            modify: MODIFY_THRESHOLD,
            conflict: CONFLICT_THRESHOLD,
        }
    }
}

/// Align two texts with the default thresholds
pub fn align(old: &str, new: &str) -> Vec<LineRecord> {
    align_with(old, new, Thresholds::default())
}

/// Align two texts line by line
pub fn align_with(old: &str, new: &str, thresholds: Thresholds) -> Vec<LineRecord> {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);
    let mut records = Vec::with_capacity(old_lines.len().max(new_lines.len()));

    let (mut i, mut j) = (0, 0);
    while i < old_lines.len() || j < new_lines.len() {
        if i >= old_lines.len() {
            records.push(LineRecord::added(j + 1, new_lines[j]));
            j += 1;
            continue;
        }
        if j >= new_lines.len() {
            records.push(LineRecord::removed(i + 1, old_lines[i]));
            i += 1;
            continue;
        }

        let (old_line, new_line) = (old_lines[i], new_lines[j]);
        if old_line == new_line {
            records.push(LineRecord::unchanged(i + 1, j + 1, old_line));
        } else {
            let score = similarity(old_line, new_line);
            if score > thresholds.modify {
                records.push(LineRecord::modified(
                    i + 1,
                    j + 1,
                    old_line,
                    new_line,
                    score,
                    score < thresholds.conflict,
                ));
            } else {
                records.push(LineRecord::removed(i + 1, old_line));
                records.push(LineRecord::added(j + 1, new_line));
            }
        }
        i += 1;
        j += 1;
    }

    records
}
