//! Per-instance render monitor.
//!
//! A [`RenderMonitor`] belongs to exactly one component instance and is
//! driven in two phases per render:
//!
//! ```text
//!   render pass                    after the frame is visible
//! ┌──────────────────────┐        ┌──────────────────────────────────┐
//! │ observe(props, opts) │──────▶ │ commit()                         │
//! │  - records props     │        │  - filter previous and current   │
//! │  - returns Peek      │        │  - deep compare                  │
//! └──────────────────────┘        │  - equal: flash on, restart 500ms│
//!                                 │  - store current as previous     │
//!                                 └──────────────────────────────────┘
//! ```
//!
//! A redundant render produces no visible change on its own, so the flash
//! is raised after commit and shows up on the next frame. The marker clears
//! itself [`FLASH_DURATION`] after the latest redundant render.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::props::{IgnoreKeys, PeekOptions, Props};
use super::styles;
use crate::error::PeekError;

/// How long the flash marker stays active after a redundant render.
pub const FLASH_DURATION: Duration = Duration::from_millis(500);

/// Class token returned by [`Peek::class_name`] while the flash is active.
pub const FLASH_CLASS: &str = "render-peek-flash";

/// Flash marker state of one component instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlashState {
    #[default]
    Idle,
    /// Raised at `since`; `epoch` identifies the activation so a stale reset
    /// cannot clear a newer flash.
    Active { since: Instant, epoch: u64 },
}

impl FlashState {
    pub fn is_active(&self) -> bool {
        matches!(self, FlashState::Active { .. })
    }

    /// Time since the flash was raised, if active.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            FlashState::Active { since, .. } => Some(since.elapsed()),
            FlashState::Idle => None,
        }
    }
}

/// What a render pass hands back to the component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Peek {
    active: bool,
}

impl Peek {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// [`FLASH_CLASS`] while flashing, empty otherwise.
    pub fn class_name(&self) -> &'static str {
        if self.active {
            FLASH_CLASS
        } else {
            ""
        }
    }
}

impl fmt::Display for Peek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Outcome of comparing one committed render with the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Detection {
    /// No previous render; never redundant.
    First,
    /// Relevant props deeply equal to the previous render's.
    Redundant,
    /// At least one relevant prop differs.
    Changed,
}

impl Detection {
    pub fn label(&self) -> &'static str {
        match self {
            Detection::First => "first",
            Detection::Redundant => "redundant",
            Detection::Changed => "changed",
        }
    }
}

/// Classify `current` against `previous` with `ignore` keys removed from both.
///
/// Pure: no state is read or written.
pub fn detect(previous: Option<&Props>, current: &Props, ignore: &IgnoreKeys) -> Detection {
    let Some(previous) = previous else {
        return Detection::First;
    };
    if previous.filtered(ignore).deep_eq(&current.filtered(ignore)) {
        Detection::Redundant
    } else {
        Detection::Changed
    }
}

/// Counters for one monitored instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonitorStats {
    /// Renders observed.
    pub invocations: u64,
    /// Committed renders whose relevant props had not changed.
    pub redundant: u64,
    /// Committed renders with at least one relevant change.
    pub changed: u64,
}

#[derive(Debug)]
struct PendingRender {
    props: Props,
    ignore: IgnoreKeys,
}

/// Persistent state for one monitored component instance.
///
/// Create one per instance and keep it for the instance's lifetime. Dropping
/// the monitor cancels any pending flash reset.
///
/// # Example
///
/// ```
/// use render_peek::{Detection, PeekOptions, Props, RenderMonitor};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let mut monitor = RenderMonitor::try_current("card").unwrap();
/// let options = PeekOptions::new().ignore("on_click");
///
/// monitor.observe(Props::try_from(json!({ "title": "a", "on_click": 1 })).unwrap(), &options);
/// assert_eq!(monitor.commit(), Some(Detection::First));
///
/// monitor.observe(Props::try_from(json!({ "title": "a", "on_click": 2 })).unwrap(), &options);
/// assert_eq!(monitor.commit(), Some(Detection::Redundant));
/// assert_eq!(monitor.peek().class_name(), "render-peek-flash");
/// # });
/// ```
#[derive(Debug)]
pub struct RenderMonitor {
    name: String,
    runtime: Handle,
    marker: Arc<watch::Sender<FlashState>>,
    previous: Option<Props>,
    pending: Option<PendingRender>,
    reset: Option<JoinHandle<()>>,
    epoch: u64,
    stats: MonitorStats,
}

impl RenderMonitor {
    /// Create a monitor that schedules its flash reset on `runtime`.
    pub fn new(name: impl Into<String>, runtime: Handle) -> Self {
        let (marker, _) = watch::channel(FlashState::Idle);
        Self {
            name: name.into(),
            runtime,
            marker: Arc::new(marker),
            previous: None,
            pending: None,
            reset: None,
            epoch: 0,
            stats: MonitorStats::default(),
        }
    }

    /// Create a monitor on the runtime of the calling thread.
    pub fn try_current(name: impl Into<String>) -> Result<Self, PeekError> {
        let runtime = Handle::try_current().map_err(|_| PeekError::NoRuntime)?;
        Ok(Self::new(name, runtime))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render phase: record this invocation's props.
    ///
    /// Nothing is compared here. The returned [`Peek`] reflects the marker as
    /// it stands while this render is produced. If `observe` is called again
    /// before [`commit`](Self::commit), the earlier invocation never became
    /// visible and is replaced.
    pub fn observe(&mut self, current: Props, options: &PeekOptions) -> Peek {
        styles::inject();
        self.stats.invocations += 1;
        tracing::trace!(monitor = %self.name, keys = current.len(), "observed render");
        self.pending = Some(PendingRender {
            props: current,
            ignore: options.ignored().clone(),
        });
        self.peek()
    }

    /// [`observe`](Self::observe) for any value that serializes to an object.
    pub fn observe_value<T: Serialize + ?Sized>(
        &mut self,
        current: &T,
        options: &PeekOptions,
    ) -> Result<Peek, PeekError> {
        let props = Props::from_serialize(current)?;
        Ok(self.observe(props, options))
    }

    /// Effects phase: run once the observed render is visible.
    ///
    /// Returns `None` if nothing was observed since the last commit.
    pub fn commit(&mut self) -> Option<Detection> {
        let PendingRender { props, ignore } = self.pending.take()?;

        let detection = detect(self.previous.as_ref(), &props, &ignore);
        match detection {
            Detection::Redundant => {
                self.stats.redundant += 1;
                tracing::debug!(monitor = %self.name, "redundant render, props unchanged");
                self.activate();
            }
            Detection::Changed => {
                self.stats.changed += 1;
                tracing::trace!(monitor = %self.name, "props changed");
            }
            Detection::First => {}
        }

        self.previous = Some(props);
        Some(detection)
    }

    /// Props of the last committed render, unfiltered.
    pub fn previous(&self) -> Option<&Props> {
        self.previous.as_ref()
    }

    /// Current marker as a [`Peek`].
    pub fn peek(&self) -> Peek {
        Peek {
            active: self.is_flashing(),
        }
    }

    pub fn flash(&self) -> FlashState {
        *self.marker.borrow()
    }

    pub fn is_flashing(&self) -> bool {
        self.marker.borrow().is_active()
    }

    /// Receiver notified whenever the marker changes, including when the
    /// reset timer clears it.
    pub fn subscribe(&self) -> watch::Receiver<FlashState> {
        self.marker.subscribe()
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    /// Tear down: cancel the pending reset and clear the marker.
    ///
    /// The monitor forgets its previous render, so the next observed render
    /// counts as a first render.
    pub fn dispose(&mut self) {
        self.cancel_reset();
        self.pending = None;
        self.previous = None;
        self.marker.send_if_modified(|state| {
            let was_active = state.is_active();
            *state = FlashState::Idle;
            was_active
        });
    }

    fn activate(&mut self) {
        self.cancel_reset();
        self.epoch += 1;
        let epoch = self.epoch;
        self.marker.send_replace(FlashState::Active {
            since: Instant::now(),
            epoch,
        });

        let marker = Arc::clone(&self.marker);
        self.reset = Some(self.runtime.spawn(async move {
            tokio::time::sleep(FLASH_DURATION).await;
            marker.send_if_modified(|state| match *state {
                FlashState::Active { epoch: current, .. } if current == epoch => {
                    *state = FlashState::Idle;
                    true
                }
                _ => false,
            });
        }));
    }

    fn cancel_reset(&mut self) {
        if let Some(reset) = self.reset.take() {
            reset.abort();
        }
    }
}

impl Drop for RenderMonitor {
    fn drop(&mut self) {
        self.cancel_reset();
    }
}
