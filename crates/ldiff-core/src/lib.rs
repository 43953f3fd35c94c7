//! Line-level diff engine
//!
//! [`DiffEngine::diff_strings`] aligns two texts with a greedy two-pointer
//! walk, classifies differing line pairs by edit-distance similarity, and
//! groups the result into collapsible [`Section`]s.
//!
//! ```
//! use ldiff_core::{DiffEngine, LineKind};
//!
//! let diff = DiffEngine::new().diff_strings("hello world", "hello word");
//! assert_eq!(diff.records[0].kind, LineKind::Modified);
//! assert!(!diff.records[0].is_conflict);
//! ```

pub mod align;
pub mod diff;
pub mod input;
pub mod line;
pub mod navigator;
pub mod report;
pub mod section;
pub mod similarity;

pub use align::{align, align_with, Thresholds};
pub use diff::{DiffEngine, DiffResult, DiffStats};
pub use input::InputError;
pub use line::{split_lines, LineKind, LineRecord};
pub use navigator::{FoldNavigator, NavState, Row};
pub use report::{export_report, export_report_with, ReportOptions};
pub use section::{group, group_with, Section, SectionKind, SectionLimits};
pub use similarity::{levenshtein, similarity};
