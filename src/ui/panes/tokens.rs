//! Token list pane

use crate::parser::lexer::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn token_line(token: &Token) -> Line<'static> {
    let kind_style = if token.kind.is_keyword() {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.secondary)
    };
    Line::from(vec![
        Span::styled(
            format!("{:>4}:{:<3} ", token.location.line, token.location.column),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(format!("{:<14}", token.kind.name()), kind_style),
        Span::styled(token.lexeme.clone(), Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

/// Render the tokens pane; `error` replaces the list when scanning failed.
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    error: Option<&str>,
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
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let lines: Vec<Line> = match error {
        Some(message) => {
            *scroll = 0;
            vec![Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(DEFAULT_THEME.error),
            ))]
        }
        None => {
            *scroll = (*scroll).min(tokens.len().saturating_sub(visible_height));
            tokens
                .iter()
                .skip(*scroll)
                .take(visible_height)
                .map(token_line)
                .collect()
        }
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
