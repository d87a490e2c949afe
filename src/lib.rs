//! # render-peek
//!
//! Flash terminal UI components whose re-render did not change their props.
//!
//! A [`RenderMonitor`] is attached to one component instance. On every render
//! the component hands its props to [`RenderMonitor::observe`]; once the frame
//! is drawn, [`RenderMonitor::commit`] compares them with the previous
//! render's props. If the relevant props are deeply equal the render was
//! unnecessary, and the monitor raises a flash marker for
//! [`FLASH_DURATION`]. Each further redundant render restarts that window.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Binary                             │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   peek   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(monitors)│    │(panels) │    │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │  demo   │◀── FlashExpected | NoFlash | FlashNoOptions    │
//! │  │ (cases) │◀── ChildWithCallback                           │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`peek`]**: the library core: props filtering, deep equality, the
//!   per-instance monitor and the inject-once flash style
//! - **[`demo`]**: the demo components ([`Case`](demo::Case) trait)
//! - **[`app`]**: demo state: parent counter, one monitor per case
//! - **[`ui`]**: ratatui rendering of the case panels and their flash
//! - **[`settings`]** / **[`logging`]**: configuration and tracing setup
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Interactive demo suite, parent re-renders every second
//! render-peek
//!
//! # Headless: run ten parent renders and write a JSON report
//! render-peek --ticks 10 --tick 100ms --export report.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use render_peek::{PeekOptions, RenderMonitor};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct ButtonProps<'a> {
//!     label: &'a str,
//!     on_click: u64,
//! }
//!
//! # tokio_test::block_on(async {
//! let mut monitor = RenderMonitor::try_current("button").unwrap();
//! let options = PeekOptions::new().ignore("on_click");
//!
//! for handler in 0..2 {
//!     let peek = monitor
//!         .observe_value(&ButtonProps { label: "Save", on_click: handler }, &options)
//!         .unwrap();
//!     // draw the button, using `peek.class_name()` to pick the border style
//!     let _ = peek;
//!     monitor.commit();
//! }
//!
//! assert!(monitor.is_flashing());
//! # });
//! ```

pub mod app;
pub mod demo;
pub mod error;
pub mod events;
pub mod logging;
pub mod peek;
pub mod settings;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use error::PeekError;
pub use peek::{
    deep_equal, detect, Detection, FlashState, IgnoreKeys, MonitorStats, Peek, PeekOptions,
    Props, RenderMonitor, FLASH_CLASS, FLASH_DURATION,
};
pub use settings::Settings;
