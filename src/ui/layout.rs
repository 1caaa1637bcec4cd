use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthChar;

use crate::shell::Shell;

pub const HORIZONTAL_MARGIN: u16 = 5;
pub const VERTICAL_MARGIN: u16 = 1;

const HEADER_LINES: u16 = 3;
const RESULTS_LINES: u16 = 5;

/// Splits `text` into rows no wider than `width` columns, breaking at any
/// character. Explicit newlines always start a new row. Always yields at least
/// one row.
pub fn hard_wrap(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut rows = Vec::new();

    for line in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        for c in line.chars() {
            let w = c.width().unwrap_or(0);
            if row_width + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(c);
            row_width += w;
        }
        rows.push(row);
    }

    rows
}

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub text: Rect,
    pub input: Rect,
    pub stats: Rect,
    pub results: Option<Rect>,
    pub button: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn compute(shell: &Shell, area: Rect) -> Self {
        let inner_width = area
            .width
            .saturating_sub(HORIZONTAL_MARGIN * 2)
            .saturating_sub(2);

        // one spare row because the reference text wraps on word boundaries
        let text_rows = hard_wrap(shell.engine.sample().as_str(), inner_width).len() as u16 + 1;
        let input_rows = hard_wrap(shell.engine.input(), inner_width).len() as u16;
        let finished = shell.engine.has_finished();

        let mut constraints = vec![
            Constraint::Length(HEADER_LINES),
            Constraint::Length(text_rows + 2),
            Constraint::Length(input_rows + 2),
            Constraint::Length(1),
        ];
        if finished {
            constraints.push(Constraint::Length(RESULTS_LINES));
        }
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(constraints)
            .split(area);

        let (results, rest) = if finished {
            (Some(chunks[4]), 5)
        } else {
            (None, 4)
        };

        Self {
            header: chunks[0],
            text: chunks[1],
            input: chunks[2],
            stats: chunks[3],
            results,
            button: chunks[rest],
            footer: chunks[rest + 2],
        }
    }
}
