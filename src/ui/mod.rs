//! UI rendering module for the currency converter
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod converter;
pub mod currency_picker;
pub mod help_overlay;

use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::App;

pub use converter::render as render_converter;
pub use currency_picker::render as render_currency_picker;
pub use help_overlay::render as render_help_overlay;

/// Renders the converter with any open overlay on top
pub fn render(frame: &mut Frame, app: &App) {
    render_converter(frame, app);

    if let Some(ref selector) = app.selector {
        let current = match selector.side {
            crate::app::Side::From => &app.from,
            crate::app::Side::To => &app.to,
        };
        render_currency_picker(frame, selector, current);
    }

    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Local wall-clock time of a fetch, as "HH:MM"
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Side;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_centered_rect_is_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(40, 10, area);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 10);
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 7);
    }

    #[test]
    fn test_format_time_is_hours_and_minutes() {
        let formatted = format_time(Utc::now());
        assert_eq!(formatted.len(), 5);
        assert_eq!(&formatted[2..3], ":");
    }

    #[test]
    fn test_render_shows_picker_over_converter() {
        let mut app = App::default();
        app.open_selector(Side::To);

        let content = render_to_string(&app);

        assert!(content.contains("Select To currency"));
    }

    #[test]
    fn test_render_shows_help_overlay() {
        let mut app = App::default();
        app.show_help = true;

        let content = render_to_string(&app);

        assert!(content.contains("Keyboard Shortcuts"));
    }
}
