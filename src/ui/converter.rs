//! Converter screen rendering
//!
//! Renders the main view: connectivity status, the amount field, the currency
//! pair, and the conversion result with exchange rates.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::format_time;
use crate::app::{App, LoadState, OFFLINE_NOTICE};
use crate::convert::{format_amount, format_input, format_rate};
use crate::data::get_currency;

/// Placeholder shown instead of a result
pub const RESULT_PLACEHOLDER: &str = "Enter amount";

/// Disclaimer under the result
pub const DISCLAIMER: &str =
    "Rates are for informational purposes only and may not reflect real-time market rates.";

/// Renders the converter view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Notice
            Constraint::Length(3), // Amount
            Constraint::Length(4), // Currency pair
            Constraint::Min(9),    // Result
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
    render_notice(frame, app, chunks[2]);
    render_amount(frame, app, chunks[3]);
    render_currency_pair(frame, app, chunks[4]);
    render_result(frame, app, chunks[5]);
    render_footer(frame, chunks[6]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Currency converter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Get real-time exchange rates",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Text of the connectivity indicator
pub fn status_text(app: &App) -> String {
    if app.is_online {
        "● Online".to_string()
    } else {
        match app.last_updated {
            Some(timestamp) => format!("Using cached rates from {}", format_time(timestamp)),
            None => "Offline".to_string(),
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(16)])
        .split(area);

    let status_color = if app.is_online {
        Color::Green
    } else {
        Color::Yellow
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", status_text(app)),
            Style::default().fg(status_color),
        )),
        chunks[0],
    );

    let refresh = if app.load_state == LoadState::Loading {
        Span::styled("Loading... ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("[r] Refresh ", Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(
        Paragraph::new(refresh).alignment(Alignment::Right),
        chunks[1],
    );
}

fn render_notice(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();

    if let Some(ref message) = app.error {
        // The offline notice is informational, anything else is a failure
        let color = if message == OFFLINE_NOTICE {
            Color::Yellow
        } else {
            Color::Red
        };
        spans.push(Span::styled(format!(" {}", message), Style::default().fg(color)));
    }
    if let Some(ref message) = app.conversion_error {
        spans.push(Span::styled(format!(" {}", message), Style::default().fg(Color::Red)));
    }

    if !spans.is_empty() {
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn render_amount(frame: &mut Frame, app: &App, area: Rect) {
    let symbol = get_currency(&app.from)
        .map(|currency| currency.symbol)
        .unwrap_or("");

    let block = Block::default()
        .title(" Amount ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = Line::from(vec![
        Span::styled(format!("{} ", symbol), Style::default().fg(Color::Gray)),
        Span::styled(
            app.amount.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("▏", Style::default().fg(Color::Cyan)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn currency_lines(code: &str) -> Vec<Line<'static>> {
    let (symbol, name) = get_currency(code)
        .map(|currency| (currency.symbol, currency.name))
        .unwrap_or(("", "Unknown currency"));

    vec![
        Line::from(vec![
            Span::styled(
                code.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", symbol), Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(name, Style::default().fg(Color::Gray))),
    ]
}

fn render_currency_pair(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(44),
            Constraint::Percentage(12),
            Constraint::Percentage(44),
        ])
        .split(area);

    let from_block = Block::default()
        .title(" From [f] ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(currency_lines(&app.from)).block(from_block),
        chunks[0],
    );

    let swap = vec![
        Line::from(""),
        Line::from(Span::styled("⇄", Style::default().fg(Color::Cyan))),
        Line::from(Span::styled("[s]", Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(
        Paragraph::new(swap).alignment(Alignment::Center),
        chunks[1],
    );

    let to_block = Block::default()
        .title(" To [t] ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(currency_lines(&app.to)).block(to_block),
        chunks[2],
    );
}

/// "1 FROM = rate TO", or "N/A" in place of the rate
fn rate_line(label: &str, from: &str, to: &str, rate: Option<f64>) -> Line<'static> {
    let rate = rate.map(format_rate).unwrap_or_else(|| "N/A".to_string());
    Line::from(vec![
        Span::styled(format!("{:<16}", label), Style::default().fg(Color::Gray)),
        Span::raw(format!("1 {} = {} {}", from, rate, to)),
    ])
}

fn render_result(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Conversion result ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = Vec::new();
    match app.result {
        Some(value) => {
            lines.push(Line::from(Span::styled(
                format!(
                    "{} {} =",
                    format_input(&app.debounced_amount, &app.from),
                    app.from
                ),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", app.to), Style::default().fg(Color::Gray)),
                Span::styled(
                    format_amount(value, &app.to),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        None => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                RESULT_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(rate_line(
        "Exchange Rate",
        &app.from,
        &app.to,
        app.exchange_rate(),
    ));
    lines.push(rate_line("Inverse Rate", &app.to, &app.from, app.inverse_rate()));

    if let Some(ref snapshot) = app.snapshot {
        lines.push(Line::from(Span::styled(
            format!("Rates as of {} (base {})", snapshot.date, snapshot.base),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        DISCLAIMER,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Line::from(vec![
        Span::styled(" f", Style::default().fg(Color::Yellow)),
        Span::raw(" from  "),
        Span::styled("t", Style::default().fg(Color::Yellow)),
        Span::raw(" to  "),
        Span::styled("s", Style::default().fg(Color::Yellow)),
        Span::raw(" swap  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" refresh  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LOAD_FAILED;
    use crate::config::Preferences;
    use crate::data::{LoadedRates, RateSnapshot, RateSource, Rates};
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
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

    fn loaded_app(amount: &str, source: RateSource) -> App {
        let mut app = App::new(
            Preferences {
                amount: amount.to_string(),
                from: "USD".to_string(),
                to: "EUR".to_string(),
            },
            Duration::from_millis(250),
        );
        let mut rates = Rates::new();
        rates.insert("USD".to_string(), 1.0);
        rates.insert("EUR".to_string(), 0.9);
        app.apply_loaded(LoadedRates {
            snapshot: RateSnapshot {
                base: "USD".to_string(),
                rates,
                timestamp: Utc::now(),
                date: "2024-07-15".to_string(),
            },
            source,
        });
        app
    }

    #[test]
    fn test_renders_header_and_pair() {
        let app = loaded_app("100", RateSource::Live);
        let content = render_to_string(&app);

        assert!(content.contains("Currency converter"));
        assert!(content.contains("Get real-time exchange rates"));
        assert!(content.contains("US Dollar"));
        assert!(content.contains("Euro"));
    }

    #[test]
    fn test_renders_result_and_rates() {
        let app = loaded_app("100", RateSource::Live);
        let content = render_to_string(&app);

        assert!(content.contains("EUR 90.00"), "Should show converted amount");
        assert!(content.contains("1 USD = 0.900000 EUR"));
        assert!(content.contains("1 EUR = 1.111111 USD"));
        assert!(content.contains("Online"));
    }

    #[test]
    fn test_renders_placeholder_without_amount() {
        let app = loaded_app("", RateSource::Live);
        let content = render_to_string(&app);

        assert!(content.contains(RESULT_PLACEHOLDER));
    }

    #[test]
    fn test_renders_offline_status_and_notice() {
        let app = loaded_app("1", RateSource::Cached);
        let content = render_to_string(&app);

        assert!(content.contains("Using cached rates from"));
        assert!(content.contains(OFFLINE_NOTICE));
    }

    #[test]
    fn test_renders_failure_with_na_rates() {
        let mut app = App::default();
        app.apply_failure();
        let content = render_to_string(&app);

        assert!(content.contains(LOAD_FAILED));
        assert!(content.contains("1 USD = N/A EUR"));
        assert!(content.contains(RESULT_PLACEHOLDER));
    }

    #[test]
    fn test_renders_offline_notice_with_conversion_error() {
        let mut app = loaded_app("1", RateSource::Cached);
        app.select_currency(crate::app::Side::To, "AED");
        let content = render_to_string(&app);

        assert!(content.contains(OFFLINE_NOTICE));
        assert!(content.contains(crate::app::INVALID_CURRENCY));
    }

    #[test]
    fn test_status_text_when_online() {
        let app = App::default();
        assert_eq!(status_text(&app), "● Online");
    }
}
