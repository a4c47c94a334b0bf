//! Column-aligned text tables for `--format table`.
//!
//! Cells are plain strings. Compliance and expiry states are colored when the
//! terminal supports it so RED subcontractors and lapsed documents stand out.

use steward_core::enums::{ComplianceStatus, ExpiryState};

const GAP: &str = "  ";
const MISSING_CELL: &str = "-";

const ANSI_GREEN: &str = "32";
const ANSI_YELLOW: &str = "33";
const ANSI_RED: &str = "31";

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    /// Terminal width to fit columns into. `None` leaves columns unbounded.
    pub max_width: Option<usize>,
    pub color: bool,
}

/// A header line, a divider, and one line per row.
///
/// Rows shorter than the header are filled with `-`; extra cells are ignored.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Vec<String>>) -> Self {
        self.rows.extend(rows);
        self
    }

    #[must_use]
    pub fn render(&self, options: TableOptions) -> String {
        let floors: Vec<usize> = self.headers.iter().map(|h| char_width(h)).collect();
        let mut widths = floors.clone();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(char_width(cell));
            }
        }
        if let Some(budget) = options.max_width {
            shrink_to_fit(&mut widths, &floors, budget);
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(render_line(
            self.headers.iter().map(String::as_str),
            &widths,
            false,
        ));
        lines.push("-".repeat(line_width(&widths)));
        for row in &self.rows {
            let cells = (0..widths.len()).map(|i| row.get(i).map_or(MISSING_CELL, String::as_str));
            lines.push(render_line(cells, &widths, options.color));
        }
        lines.join("\n")
    }
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize], color: bool) -> String {
    let mut line = String::new();
    for (index, (cell, &width)) in cells.zip(widths).enumerate() {
        if index > 0 {
            line.push_str(GAP);
        }
        let text = clip(cell, width);
        let pad = width.saturating_sub(char_width(&text));
        match status_color(&text).filter(|_| color) {
            Some(code) => line.push_str(&format!("\u{1b}[{code}m{text}\u{1b}[0m")),
            None => line.push_str(&text),
        }
        line.extend(std::iter::repeat_n(' ', pad));
    }
    line.truncate(line.trim_end().len());
    line
}

/// Lower one shared cap on column width until the table fits `budget`.
/// A column never narrows below its header.
fn shrink_to_fit(widths: &mut [usize], floors: &[usize], budget: usize) {
    let capped_width = |cap: usize| -> usize {
        let capped: Vec<usize> = widths
            .iter()
            .zip(floors)
            .map(|(&width, &floor)| width.min(cap.max(floor)))
            .collect();
        line_width(&capped)
    };

    let mut cap = widths.iter().copied().max().unwrap_or(0);
    while cap > 0 && capped_width(cap) > budget {
        cap -= 1;
    }
    for (width, &floor) in widths.iter_mut().zip(floors) {
        *width = (*width).min(cap.max(floor));
    }
}

fn line_width(widths: &[usize]) -> usize {
    widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1)
}

fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Cut `text` to `width` characters, marking the cut with `…`.
fn clip(text: &str, width: usize) -> String {
    if char_width(text) <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(1);
    let mut clipped: String = text.chars().take(keep).collect();
    clipped.push('…');
    clipped
}

fn status_color(cell: &str) -> Option<&'static str> {
    match cell {
        s if s == ComplianceStatus::Green.as_str() || s == ExpiryState::Valid.as_str() => {
            Some(ANSI_GREEN)
        }
        s if s == ExpiryState::ExpiringSoon.as_str() => Some(ANSI_YELLOW),
        s if s == ComplianceStatus::Red.as_str()
            || s == ExpiryState::Expired.as_str()
            || s == ExpiryState::Missing.as_str() =>
        {
            Some(ANSI_RED)
        }
        _ => None,
    }
}
