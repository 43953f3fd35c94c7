//! Terminal rendering of a folded diff

use crossterm::style::{Color, Stylize};
use ldiff_core::{FoldNavigator, LineKind, LineRecord, Row, Section};

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub color: bool,
    pub line_numbers: bool,
}

/// Visual role of a rendered row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Added,
    Removed,
    Conflict,
    Context,
    Muted,
    Header,
}

impl Tone {
    fn color(self) -> Option<Color> {
        match self {
            Tone::Added => Some(Color::Green),
            Tone::Removed => Some(Color::Red),
            Tone::Conflict => Some(Color::Yellow),
            Tone::Header => Some(Color::Cyan),
            Tone::Context | Tone::Muted => None,
        }
    }
}

struct Painter {
    options: RenderOptions,
    width: usize,
    out: String,
}

impl Painter {
    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.options.color {
            return text.to_string();
        }
        match (tone.color(), tone) {
            (Some(color), Tone::Header) => text.to_string().with(color).dim().to_string(),
            (Some(color), Tone::Conflict) => text.to_string().with(color).bold().to_string(),
            (Some(color), _) => text.to_string().with(color).to_string(),
            (None, Tone::Muted) => text.to_string().dim().to_string(),
            (None, _) => text.to_string(),
        }
    }

    fn gutter(&self, old: Option<usize>, new: Option<usize>) -> String {
        if !self.options.line_numbers {
            return String::new();
        }
        let cell = |n: Option<usize>| n.map(|n| n.to_string()).unwrap_or_default();
        let text = format!(
            "{:>w$} {:>w$} ",
            cell(old),
            cell(new),
            w = self.width
        );
        self.paint(&text, Tone::Muted)
    }

    fn line(&mut self, old: Option<usize>, new: Option<usize>, marker: char, text: &str, tone: Tone) {
        let gutter = self.gutter(old, new);
        let body = self.paint(&format!("{marker} {text}"), tone);
        self.out.push_str(&format!("{gutter}{body}\n"));
    }

    fn record(&mut self, record: &LineRecord) {
        match record.kind {
            LineKind::Unchanged => {
                self.line(record.old_line, record.new_line, ' ', &record.new_text, Tone::Context)
            }
            LineKind::Added => self.line(None, record.new_line, '+', &record.new_text, Tone::Added),
            LineKind::Removed => {
                self.line(record.old_line, None, '-', &record.old_text, Tone::Removed)
            }
            LineKind::Modified => {
                let (marker, old_tone, new_tone) = if record.is_conflict {
                    ('!', Tone::Conflict, Tone::Conflict)
                } else {
                    ('~', Tone::Removed, Tone::Added)
                };
                self.line(record.old_line, None, marker, &record.old_text, old_tone);
                self.line(None, record.new_line, marker, &record.new_text, new_tone);
            }
        }
    }

    fn header(&mut self, index: usize, section: &Section, change: Option<(usize, usize)>) {
        let position = change
            .map(|(n, total)| format!("change {n}/{total}, "))
            .unwrap_or_default();
        let text = format!(
            "@@ {}{} section {} (records {}-{}) @@",
            position,
            section.kind.label().to_lowercase(),
            index + 1,
            section.start + 1,
            section.end + 1
        );
        let text = self.paint(&text, Tone::Header);
        self.out.push_str(&text);
        self.out.push('\n');
    }

    fn fold(&mut self, hidden: usize) {
        let gutter = self.gutter(None, None);
        let noun = if hidden == 1 { "line" } else { "lines" };
        let text = self.paint(&format!("⋯ {hidden} unchanged {noun}"), Tone::Muted);
        self.out.push_str(&format!("{gutter}{text}\n"));
    }
}

/// Render the navigator's visible rows as terminal text
pub fn render_text(nav: &FoldNavigator, options: RenderOptions) -> String {
    let diff = nav.diff();
    let largest = diff
        .records
        .iter()
        .flat_map(|r| [r.old_line, r.new_line])
        .flatten()
        .max()
        .unwrap_or(0);
    let mut painter = Painter {
        options,
        width: largest.to_string().len().max(3),
        out: String::new(),
    };

    let changes = diff.change_sections();
    let mut last_section = None;
    for row in nav.visible_rows() {
        match row {
            Row::Fold { hidden, .. } => painter.fold(hidden),
            Row::Line { section, record } => {
                if last_section != Some(section) {
                    let meta = &diff.sections[section];
                    if meta.is_change() {
                        let change = changes
                            .iter()
                            .position(|&idx| idx == section)
                            .map(|pos| (pos + 1, changes.len()));
                        painter.header(section, meta, change);
                    }
                    last_section = Some(section);
                }
                painter.record(&diff.records[record]);
            }
        }
    }

    painter.out
}
