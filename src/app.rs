//! Demo application state.
//!
//! The app plays the role of a parent component: it owns a counter that
//! advances on every tick and re-renders each child [`Case`] with fresh
//! props. Every case has its own [`RenderMonitor`].

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use tokio::runtime::Handle;

use crate::demo::Case;
use crate::peek::{Detection, MonitorStats, Peek, RenderMonitor};
use crate::ui::Theme;

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// One child component together with its monitor.
#[derive(Debug)]
pub struct CaseView {
    pub case: Box<dyn Case>,
    pub monitor: RenderMonitor,
    /// What the last render pass returned.
    pub peek: Peek,
    pub last_detection: Option<Detection>,
    /// Set when the case failed to produce props for the last render.
    pub error: Option<String>,
}

impl CaseView {
    fn new(case: Box<dyn Case>, runtime: Handle) -> Self {
        let monitor = RenderMonitor::new(case.title(), runtime);
        let peek = monitor.peek();
        Self {
            case,
            monitor,
            peek,
            last_detection: None,
            error: None,
        }
    }

    /// Render pass for this child.
    fn render(&mut self, parent_count: u64) {
        match self.case.props(parent_count) {
            Ok(props) => {
                self.peek = self.monitor.observe(props, &self.case.options());
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(case = self.case.title(), error = %e, "failed to build props");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Whether the case currently behaves as it claims to.
    pub fn matches_expectation(&self) -> Option<bool> {
        let detection = self.last_detection?;
        match detection {
            Detection::First => None,
            Detection::Redundant => Some(self.case.expects_flash()),
            Detection::Changed => Some(!self.case.expects_flash()),
        }
    }
}

/// Snapshot of one case for export.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub title: String,
    pub expects_flash: bool,
    pub flashing: bool,
    pub last_detection: Option<Detection>,
    #[serde(flatten)]
    pub stats: MonitorStats,
}

/// Snapshot of the whole suite for export.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub parent_count: u64,
    pub parent_renders: u64,
    pub cases: Vec<CaseReport>,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub paused: bool,
    pub show_help: bool,

    /// Parent state passed down to the children.
    pub parent_count: u64,
    /// Parent render passes so far, including forced ones.
    pub parent_renders: u64,
    pub cases: Vec<CaseView>,
    pub selected: usize,

    tick_interval: Duration,
    last_tick: Instant,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create the app. Monitors schedule their flash resets on `runtime`.
    pub fn new(
        runtime: Handle,
        cases: Vec<Box<dyn Case>>,
        tick_interval: Duration,
        theme: Theme,
    ) -> Self {
        let cases = cases
            .into_iter()
            .map(|case| CaseView::new(case, runtime.clone()))
            .collect();
        Self {
            running: true,
            paused: false,
            show_help: false,
            parent_count: 0,
            parent_renders: 0,
            cases,
            selected: 0,
            tick_interval,
            last_tick: Instant::now(),
            theme,
            status_message: None,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Render pass: re-render every child with the current parent state.
    ///
    /// Call [`commit`](Self::commit) once the resulting frame is drawn.
    pub fn render_parent(&mut self) {
        self.parent_renders += 1;
        tracing::trace!(count = self.parent_count, "parent render");
        for view in &mut self.cases {
            view.render(self.parent_count);
        }
    }

    /// Effects phase: let every monitor compare the render that was just
    /// drawn. Returns how many children rendered redundantly.
    pub fn commit(&mut self) -> usize {
        let mut redundant = 0;
        for view in &mut self.cases {
            if let Some(detection) = view.monitor.commit() {
                if detection == Detection::Redundant {
                    redundant += 1;
                }
                view.last_detection = Some(detection);
            }
        }
        redundant
    }

    /// Whether the parent should advance its counter now.
    pub fn tick_due(&self) -> bool {
        !self.paused && self.last_tick.elapsed() >= self.tick_interval
    }

    /// Advance the parent counter and re-render.
    pub fn tick(&mut self) {
        self.parent_count += 1;
        self.last_tick = Instant::now();
        self.render_parent();
    }

    /// Re-render the parent without changing its state.
    pub fn force_render(&mut self) {
        self.render_parent();
        self.set_status_message("Forced parent re-render".to_string());
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if !self.paused {
            self.last_tick = Instant::now();
        }
    }

    /// Number of cases currently flashing.
    pub fn flashing_count(&self) -> usize {
        self.cases.iter().filter(|v| v.monitor.is_flashing()).count()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    pub fn select_next(&mut self) {
        let max = self.cases.len().saturating_sub(1);
        self.selected = (self.selected + 1).min(max);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.cases.len().saturating_sub(1);
    }

    pub fn selected_case(&self) -> Option<&CaseView> {
        self.cases.get(self.selected)
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn report(&self) -> Report {
        Report {
            parent_count: self.parent_count,
            parent_renders: self.parent_renders,
            cases: self
                .cases
                .iter()
                .map(|view| CaseReport {
                    title: view.case.title().to_string(),
                    expects_flash: view.case.expects_flash(),
                    flashing: view.monitor.is_flashing(),
                    last_detection: view.last_detection,
                    stats: view.monitor.stats(),
                })
                .collect(),
        }
    }

    /// Export the current report to a JSON file.
    pub fn export_report(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.report())?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "exported report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{default_cases, NoFlash};

    fn app() -> App {
        App::new(
            Handle::current(),
            default_cases(),
            Duration::from_secs(1),
            Theme::dark(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_is_never_redundant() {
        let mut app = app();
        app.render_parent();
        assert_eq!(app.commit(), 0);
        assert!(app.cases.iter().all(|v| v.last_detection == Some(Detection::First)));
        assert_eq!(app.flashing_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_flashes_expected_cases() {
        let mut app = app();
        app.render_parent();
        app.commit();

        app.tick();
        assert_eq!(app.parent_count, 1);
        // Render pass alone shows nothing.
        assert!(app.cases.iter().all(|v| !v.peek.is_active()));

        assert_eq!(app.commit(), 3);
        assert_eq!(app.flashing_count(), 3);
        for view in &app.cases {
            assert_eq!(view.matches_expectation(), Some(true), "{}", view.case.title());
        }

        tokio::time::sleep(Duration::from_millis(501)).await;
        tokio::task::yield_now().await;
        assert_eq!(app.flashing_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_forced_render_flashes_everything() {
        let mut app = app();
        app.render_parent();
        app.commit();

        app.force_render();
        assert_eq!(app.commit(), 4);
        assert!(app.get_status_message().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_without_render_is_noop() {
        let mut app = App::new(
            Handle::current(),
            vec![Box::new(NoFlash)],
            Duration::from_secs(1),
            Theme::dark(),
        );
        assert_eq!(app.commit(), 0);
        assert!(app.cases[0].last_detection.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_blocks_ticks() {
        let mut app = App::new(
            Handle::current(),
            default_cases(),
            Duration::ZERO,
            Theme::dark(),
        );
        assert!(app.tick_due());
        app.toggle_pause();
        assert!(!app.tick_due());
        app.toggle_pause();
        assert!(app.tick_due());
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_is_clamped() {
        let mut app = app();
        app.select_prev();
        assert_eq!(app.selected, 0);

        for _ in 0..10 {
            app.select_next();
        }
        assert_eq!(app.selected, 3);

        app.select_first();
        assert_eq!(app.selected, 0);
        app.select_last();
        assert_eq!(app.selected_case().unwrap().case.title(), "Child Component");
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_and_export() {
        let mut app = app();
        app.render_parent();
        app.commit();
        app.tick();
        app.commit();

        let report = app.report();
        assert_eq!(report.parent_count, 1);
        assert_eq!(report.parent_renders, 2);
        assert_eq!(report.cases.len(), 4);

        let no_flash = &report.cases[1];
        assert!(!no_flash.expects_flash);
        assert_eq!(no_flash.stats.changed, 1);
        assert_eq!(no_flash.stats.redundant, 0);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        app.export_report(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["parent_count"], 1);
        assert_eq!(json["cases"][0]["redundant"], 1);
        assert_eq!(json["cases"][0]["last_detection"], "redundant");
        assert_eq!(json["cases"][1]["flashing"], false);
    }
}
