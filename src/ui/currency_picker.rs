//! Currency picker overlay
//!
//! Modal list of currencies filtered by a search field, with the current
//! selection marked and the highlighted row shown in reverse colors.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::app::Selector;

/// Renders the picker for `selector`; `current` is the code already chosen
pub fn render(frame: &mut Frame, selector: &Selector, current: &str) {
    let area = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" Select {} currency ", selector.side.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Search
            Constraint::Min(3),    // List
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    let search = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::Gray)),
        Span::raw(selector.query.clone()),
        Span::styled("▏", Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Paragraph::new(search), chunks[0]);

    let matches = selector.matches();
    if matches.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No matching currencies",
                Style::default().fg(Color::DarkGray),
            )),
            chunks[1],
        );
    } else {
        let items: Vec<ListItem> = matches
            .iter()
            .map(|currency| {
                let mut spans = vec![
                    Span::styled(
                        format!("{:<5}", currency.code),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{:<5}", currency.symbol),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::raw(currency.name),
                ];
                if currency.code == current {
                    spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(selector.highlighted.min(matches.len() - 1)));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    frame.render_widget(
        Paragraph::new(Span::styled(
            "↑/↓ move  Enter select  Esc close",
            Style::default().fg(Color::DarkGray),
        )),
        chunks[2],
    );
}
