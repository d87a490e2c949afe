//! Case panels.
//!
//! One bordered panel per monitored child. While a child's flash marker is
//! active its border plays the registered flash animation.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, CaseView};
use crate::peek::{styles, FLASH_CLASS};

/// Render all case panels stacked vertically.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.cases.is_empty() {
        return;
    }

    let count = app.cases.len() as u32;
    let constraints: Vec<Constraint> =
        app.cases.iter().map(|_| Constraint::Ratio(1, count)).collect();
    let rows = Layout::vertical(constraints).split(area);

    for (index, (view, row)) in app.cases.iter().zip(rows.iter()).enumerate() {
        render_case(frame, app, view, index == app.selected, *row);
    }
}

fn render_case(frame: &mut Frame, app: &App, view: &CaseView, selected: bool, area: Rect) {
    let border_style = border_style(app, view, selected);

    let block = Block::default()
        .title(format!(" {} ", view.case.title()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border_style);

    let mut lines: Vec<Line> = view
        .case
        .description()
        .iter()
        .map(|text| Line::from(*text))
        .collect();

    let options = view.case.options();
    let ignored: Vec<&str> = options.ignored().iter().collect();
    let stats = view.monitor.stats();
    let dim = Style::default().add_modifier(Modifier::DIM);

    // What the next render will be compared against.
    let compared = view.monitor.previous().map(|props| {
        props
            .filtered(options.ignored())
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join(", ")
    });
    lines.push(Line::from(vec![
        Span::styled("props: ", dim),
        Span::raw(compared.unwrap_or_else(|| "-".to_string())),
    ]));

    lines.push(Line::from(vec![
        Span::styled("ignore: ", dim),
        Span::raw(if ignored.is_empty() {
            "-".to_string()
        } else {
            ignored.join(", ")
        }),
        Span::styled("  renders: ", dim),
        Span::raw(stats.invocations.to_string()),
        Span::styled("  redundant: ", dim),
        Span::raw(stats.redundant.to_string()),
        Span::styled("  changed: ", dim),
        Span::raw(stats.changed.to_string()),
    ]));

    let detection = view.last_detection.map_or("-", |d| d.label());
    let verdict = match view.matches_expectation() {
        Some(true) => "as expected",
        Some(false) => "UNEXPECTED",
        None => "",
    };
    lines.push(Line::from(vec![
        Span::styled("last: ", dim),
        Span::raw(detection),
        Span::raw(" "),
        Span::styled(verdict, app.theme.expectation_style(view.matches_expectation())),
        Span::styled("  class: ", dim),
        Span::raw(format!("{:?}", view.monitor.peek().class_name())),
    ]));

    if let Some(ref err) = view.error {
        lines.push(Line::from(Span::styled(
            format!("error: {}", err),
            Style::default().fg(app.theme.mismatch),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Border style: the flash animation while active, otherwise idle or selected.
fn border_style(app: &App, view: &CaseView, selected: bool) -> Style {
    let flash = view.monitor.flash();
    if let (Some(elapsed), Some(animation)) = (flash.elapsed(), styles::lookup(FLASH_CLASS)) {
        return animation.border_style(elapsed, app.theme.border);
    }
    if selected {
        app.theme.selected
    } else {
        Style::default().fg(app.theme.border)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::{backend::TestBackend, Terminal};
    use tokio::runtime::Handle;

    use crate::app::App;
    use crate::demo::default_cases;
    use crate::ui::{self, Theme};

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| ui::draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test(start_paused = true)]
    async fn test_draws_every_case() {
        let mut app = App::new(
            Handle::current(),
            default_cases(),
            Duration::from_secs(1),
            Theme::dark(),
        );
        app.render_parent();
        app.commit();
        app.tick();
        app.commit();

        let text = screen(&app, 100, 48);
        assert!(text.contains("RENDER PEEK"));
        assert!(text.contains("Case 1: Flash Expected"));
        assert!(text.contains("Case 2: No Flash Expected"));
        assert!(text.contains("Child Component"));
        assert!(text.contains("3 flashing"));
        assert!(text.contains("render-peek-flash"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_panels_show_compared_props() {
        let mut app = App::new(
            Handle::current(),
            default_cases(),
            Duration::from_secs(1),
            Theme::dark(),
        );
        assert!(screen(&app, 100, 48).contains("props: -"));

        app.render_parent();
        app.commit();
        app.tick();
        app.commit();

        let text = screen(&app, 100, 48);
        assert!(text.contains(r#"props: stable_id: "static-id-123""#));
        assert!(text.contains(r#"props: label: "Static Label""#));
        assert!(text.contains("props: count: 1"));
        assert!(!text.contains("fn unstable_callback#"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_small_terminal_message() {
        let app = App::new(
            Handle::current(),
            default_cases(),
            Duration::from_secs(1),
            Theme::dark(),
        );
        let text = screen(&app, 40, 10);
        assert!(text.contains("Terminal too small"));
    }
}
