use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Handle;

use render_peek::demo::default_cases;
use render_peek::logging::{self, LogTarget};
use render_peek::settings::{Overrides, Settings, ThemeChoice};
use render_peek::ui::{self, Theme};
use render_peek::{events, App};

#[derive(Parser, Debug)]
#[command(name = "render-peek")]
#[command(about = "Flash terminal UI components whose re-render did not change their props")]
struct Args {
    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interval between parent re-renders (e.g., "1s", "250ms")
    #[arg(short, long)]
    tick: Option<String>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Write logs to this file while the TUI is running
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run without a terminal UI and write a JSON report to this file
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Number of parent ticks to run before exporting (only used with --export)
    #[arg(long, default_value = "5")]
    ticks: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let overrides = Overrides {
        tick: args.tick,
        theme: args.theme,
        log_file: args.log_file,
    };
    let settings = Settings::load(args.config.as_deref(), overrides)?;
    let tick = settings.tick_interval()?;
    let poll = settings.poll_timeout()?;

    // Flash resets run as timers on this runtime while the UI loop stays on
    // the main thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        logging::init(&settings.log_filter, LogTarget::Stderr)?;
        return runtime.block_on(run_headless(args.ticks, tick, &export_path));
    }

    if let Some(ref path) = settings.log_file {
        logging::init(&settings.log_filter, LogTarget::File(path))?;
    }

    // Detect before raw mode: terminal-light queries the terminal itself.
    let theme = Theme::from_choice(settings.theme);
    run_tui(runtime.handle().clone(), theme, tick, poll)
}

/// Run the demo suite without a terminal and export the report.
async fn run_headless(ticks: u64, tick: Duration, export_path: &Path) -> Result<()> {
    let mut app = App::new(Handle::current(), default_cases(), tick, Theme::dark());
    tracing::info!(ticks, tick = ?tick, "running headless");

    app.render_parent();
    app.commit();

    let mut interval = tokio::time::interval(tick);
    interval.tick().await;
    for _ in 0..ticks {
        interval.tick().await;
        app.tick();
        let redundant = app.commit();
        tracing::info!(count = app.parent_count, redundant, "parent tick");
    }

    app.export_report(export_path)?;
    println!("Exported render report to: {}", export_path.display());

    for case in app.report().cases {
        println!(
            "  {:<36} redundant {:>3} / changed {:>3}{}",
            case.title,
            case.stats.redundant,
            case.stats.changed,
            if case.expects_flash == (case.stats.redundant > 0) {
                ""
            } else {
                "  (unexpected)"
            }
        );
    }
    Ok(())
}

/// Run the interactive TUI.
fn run_tui(runtime: Handle, theme: Theme, tick: Duration, poll: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Create app and mount the children
    let mut app = App::new(runtime, default_cases(), tick, theme);
    app.render_parent();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, poll);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    poll: Duration,
) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // The frame above is on screen: run the monitors' effects phase.
        // A flash raised here shows up on the next draw.
        app.commit();

        if let Some(event) = events::poll_event(poll)? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        if app.tick_due() {
            app.tick();
        }
    }

    Ok(())
}
