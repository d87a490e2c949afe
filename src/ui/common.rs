//! Common UI components shared across the screen.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{MIN_HEIGHT, MIN_WIDTH};
use crate::app::App;
use crate::peek::duration::format_duration;
use crate::peek::styles::FLASH_COLOR;
use crate::peek::FLASH_DURATION;

/// Render the header bar with the parent state.
///
/// Displays: title, parent counter, render count, flashing children.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let flashing = app.flashing_count();

    let mut spans = vec![
        Span::styled(" RENDER PEEK ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ Parent Count: "),
        Span::styled(app.parent_count.to_string(), app.theme.header),
        Span::raw(format!(" │ {} renders │ ", app.parent_renders)),
        if flashing > 0 {
            Span::styled(
                format!("{} flashing", flashing),
                Style::default().fg(FLASH_COLOR).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0 flashing", Style::default().add_modifier(Modifier::DIM))
        },
    ];

    if app.paused {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            "PAUSED",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows a temporary status message if one is live, otherwise the tick
/// interval, flash window and controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = format!(
        " Tick {} | Flash {} | space:pause r:re-render ↑↓:select e:export ?:help q:quit",
        format_duration(app.tick_interval()),
        format_duration(FLASH_DURATION),
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Shown instead of the UI when the terminal is below the minimum size.
pub fn render_too_small(frame: &mut Frame, area: Rect) {
    let msg = format!(
        "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );
    let paragraph = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    let y = (area.height / 2).saturating_sub(2);
    let centered = Rect::new(area.x, area.y + y, area.width, 5.min(area.height));
    frame.render_widget(paragraph, centered);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the case panels.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Parent"),
        Line::from("  space       Pause/resume ticking"),
        Line::from("  r           Re-render without change"),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ↑/↓ j/k     Select case"),
        Line::from("  Home/End    First/last case"),
        Line::from(""),
        section(" General"),
        Line::from("  e           Export report to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "A panel flashes when its component re-rendered",
            Style::default().fg(FLASH_COLOR),
        )]),
        Line::from(vec![Span::styled(
            "with unchanged props (ignored keys excluded).",
            Style::default().fg(FLASH_COLOR),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 52u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
