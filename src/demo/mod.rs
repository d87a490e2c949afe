//! Demo components exercised by the render-peek TUI.
//!
//! Each [`Case`] stands in for a child component of a parent that re-renders
//! on every tick. The case decides which props it receives for a given
//! parent render and which of them its monitor should ignore.

mod callback;
mod cases;

pub use callback::Callback;
pub use cases::{ChildWithCallback, FlashExpected, FlashNoOptions, NoFlash};

use std::fmt::Debug;

use crate::error::PeekError;
use crate::peek::{PeekOptions, Props};

/// A monitored child component in the demo suite.
///
/// # Example
///
/// ```
/// use render_peek::demo::{Case, NoFlash};
///
/// let case = NoFlash;
/// let props = case.props(3).unwrap();
/// assert_eq!(props.get("count"), Some(&serde_json::json!(3)));
/// assert!(!case.expects_flash());
/// ```
pub trait Case: Send + Debug {
    /// Heading shown on the case panel.
    fn title(&self) -> &str;

    /// Explanation lines shown inside the panel.
    fn description(&self) -> &[&'static str];

    /// Props the parent passes at render number `parent_count`.
    fn props(&self, parent_count: u64) -> Result<Props, PeekError>;

    /// Options this component hands to its monitor.
    fn options(&self) -> PeekOptions {
        PeekOptions::default()
    }

    /// Whether a re-render of the parent should make this case flash.
    fn expects_flash(&self) -> bool;
}

/// The full demo suite in display order.
pub fn default_cases() -> Vec<Box<dyn Case>> {
    vec![
        Box::new(FlashExpected::new("Static Label")),
        Box::new(NoFlash),
        Box::new(FlashNoOptions),
        Box::new(ChildWithCallback::new("static-id-123")),
    ]
}
