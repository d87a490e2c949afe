//! Redundant-render detection.
//!
//! ## Submodules
//!
//! - [`props`]: Invocation records ([`Props`]), ignore sets and filtered views
//! - [`equal`]: Deep structural equality used to compare renders
//! - [`monitor`]: The per-instance [`RenderMonitor`] and its flash marker
//! - [`styles`]: Inject-once registration of the flash animation
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "1s", "500ms")
//!
//! ## Data Flow
//!
//! ```text
//! component render
//!        │
//!        ▼
//! RenderMonitor::observe(props, options)   ── returns Peek (current marker)
//!        │
//!        ▼  frame drawn
//! RenderMonitor::commit()
//!        │
//!        ├──▶ detect(previous, current, ignore_keys)
//!        │
//!        └──▶ Redundant: FlashState::Active, reset after FLASH_DURATION
//! ```

pub mod duration;
pub mod equal;
pub mod monitor;
pub mod props;
pub mod styles;

pub use equal::deep_equal;
pub use monitor::{
    detect, Detection, FlashState, MonitorStats, Peek, RenderMonitor, FLASH_CLASS,
    FLASH_DURATION,
};
pub use props::{FilteredView, IgnoreKeys, PeekOptions, Props};
