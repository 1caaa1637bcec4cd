pub mod layout;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    matching::{highlight_runs, CharClass},
    shell::{Focus, Shell, SUBTITLE, TITLE},
};
use layout::{hard_wrap, ScreenLayout};

pub const PLACEHOLDER: &str = "Start typing the text above...";
pub const KEY_HINTS: &str = "tab focus / enter press / ctrl+s stop / ctrl+r reset / esc quit";

fn class_style(class: CharClass) -> Style {
    match class {
        CharClass::Correct => Style::default().fg(Color::Green),
        CharClass::Incorrect => Style::default().fg(Color::White).bg(Color::Red),
        CharClass::Untyped => Style::default().fg(Color::DarkGray),
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

/// Draws the whole page and places the terminal cursor in the input box when
/// it has focus.
pub fn draw(shell: &Shell, f: &mut Frame) {
    let area = f.area();
    f.render_widget(shell, area);

    if shell.focus == Focus::Input && shell.input_enabled() {
        let layout = ScreenLayout::compute(shell, area);
        if let Some(pos) = input_cursor(shell.engine.input(), layout.input) {
            f.set_cursor_position(pos);
        }
    }
}

/// Cursor position just after the last typed character inside a bordered
/// input box.
fn input_cursor(input: &str, area: Rect) -> Option<Position> {
    if area.width < 3 || area.height < 3 {
        return None;
    }
    let inner_width = area.width - 2;
    let rows = hard_wrap(input, inner_width);
    let last = rows.last().map(|r| r.width() as u16).unwrap_or(0);
    let row = rows.len() as u16 - 1;

    let (x, y) = if last >= inner_width {
        (0, row + 1)
    } else {
        (last, row)
    };
    if y >= area.height - 2 {
        return None;
    }
    Some(Position::new(area.x + 1 + x, area.y + 1 + y))
}

impl Widget for &Shell {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let engine = &self.engine;
        let state = engine.state();
        let layout = ScreenLayout::compute(self, area);

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(TITLE, bold_style.fg(Color::Cyan))),
            Line::from(Span::styled(SUBTITLE, italic_style)),
        ])
        .alignment(Alignment::Center);
        header.render(layout.header, buf);

        // reference text, one span per run of equally classified characters
        let spans = highlight_runs(&engine.highlights())
            .into_iter()
            .map(|(class, run)| Span::styled(run, class_style(class)))
            .collect::<Vec<Span>>();
        let started = !state.user_input.is_empty();
        let text = Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if started { bold_style } else { dim_style }),
            )
            .wrap(Wrap { trim: false });
        text.render(layout.text, buf);

        let inner_width = layout.input.width.saturating_sub(2);
        let input_focused = self.focus == Focus::Input;
        let input_text = if state.user_input.is_empty() {
            Text::from(Span::styled(PLACEHOLDER, dim_style.patch(italic_style)))
        } else {
            Text::from(
                hard_wrap(&state.user_input, inner_width)
                    .into_iter()
                    .map(Line::from)
                    .collect::<Vec<Line>>(),
            )
        };
        let input = Paragraph::new(input_text)
            .style(if self.input_enabled() {
                Style::default()
            } else {
                dim_style
            })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Your input")
                    .border_style(focus_style(input_focused)),
            );
        input.render(layout.input, buf);

        let metrics = state.metrics;
        let stats = Paragraph::new(Span::styled(
            format!(
                "Time: {}s   WPM: {}   Accuracy: {}%   Errors: {}",
                state.elapsed_seconds, metrics.wpm, metrics.accuracy, metrics.errors
            ),
            bold_style,
        ))
        .alignment(Alignment::Center);
        stats.render(layout.stats, buf);

        if let Some(results_area) = layout.results {
            let results = Paragraph::new(vec![
                Line::from(format!("Your WPM: {}", metrics.wpm)),
                Line::from(format!("Accuracy: {}%", metrics.accuracy)),
                Line::from(format!("Time Taken: {}s", state.elapsed_seconds)),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("Finished!", bold_style.fg(Color::Green))),
            );
            results.render(results_area, buf);
        }

        let button_focused = self.focus == Focus::Button;
        let button_style = if button_focused {
            bold_style.add_modifier(Modifier::REVERSED)
        } else {
            bold_style
        };
        let button = Paragraph::new(Span::styled(
            format!("[ {} ]", self.visible_button()),
            button_style,
        ))
        .alignment(Alignment::Center);
        button.render(layout.button, buf);

        if self.show_key_hints {
            let footer = Paragraph::new(Span::styled(KEY_HINTS, italic_style))
                .alignment(Alignment::Center);
            footer.render(layout.footer, buf);
        }
    }
}
