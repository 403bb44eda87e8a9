//! Source code pane rendering with syntax highlighting
//!
//! Displays the TINY program with line numbers and keyword, number and
//! comment highlighting. When scanning or parsing failed, the line holding
//! the fault is marked.
//!
//! Comments may span several lines, so the highlighter carries an
//! "inside comment" flag from one line to the next.

use crate::parser::lexer::TokenKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Highlight one line; `in_comment` is updated for the following line.
fn highlight_source_line(line: &str, in_comment: &mut bool) -> Line<'static> {
    let mut spans = Vec::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let start = i;

        if *in_comment || chars[i] == '{' {
            while i < chars.len() && chars[i] != '}' {
                i += 1;
            }
            *in_comment = i == chars.len();
            if !*in_comment {
                i += 1; // closing brace
            }
            let text: String = chars[start..i].iter().collect();
            spans.push(Span::styled(text, Style::default().fg(DEFAULT_THEME.comment)));
            continue;
        }

        let c = chars[i];
        if c.is_ascii_alphabetic() {
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let style = if TokenKind::keyword(&word).is_some() {
                Style::default()
                    .fg(DEFAULT_THEME.keyword)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.identifier)
            };
            spans.push(Span::styled(word, style));
        } else if c.is_ascii_digit() {
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let digits: String = chars[start..i].iter().collect();
            spans.push(Span::styled(digits, Style::default().fg(DEFAULT_THEME.number)));
        } else {
            let style = match c {
                '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
                ':' | '=' | '<' | '+' | '-' | '*' | '/' | ';' => {
                    Style::default().fg(DEFAULT_THEME.fg)
                }
                _ => Style::default(),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
        }
    }

    Line::from(spans)
}

/// Render the source code pane.
///
/// `error_line` is the 1-based line of a scan or parse error, if any. The
/// scroll offset is clamped to the text.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    error_line: Option<usize>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = (*scroll).min(lines.len().saturating_sub(visible_height));

    // Comment state has to be tracked from the top, not from the scroll offset
    let mut in_comment = false;
    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| (idx, highlight_source_line(line, &mut in_comment)))
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, mut content)| {
            let line_num = idx + 1;
            let is_error = error_line == Some(line_num);

            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            if is_error {
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut content.spans {
                    span.style = error_style;
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
