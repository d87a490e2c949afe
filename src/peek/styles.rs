//! Process-wide registration of the flash style.
//!
//! The flash is a short animation: the component border starts orange-red
//! and fades out over [`FLASH_DURATION`](super::FLASH_DURATION) with an
//! ease-out curve. The style sheet holding it is registered lazily the first
//! time any monitor observes a render, and exactly once per process.

use std::sync::OnceLock;
use std::time::Duration;

use ratatui::style::{Color, Modifier, Style};

use super::monitor::{FLASH_CLASS, FLASH_DURATION};

/// Start colour of the flash (`#ff4500`).
pub const FLASH_COLOR: Color = Color::Rgb(0xff, 0x45, 0x00);

static STYLE_SHEET: OnceLock<StyleSheet> = OnceLock::new();

/// Registered presentational classes.
#[derive(Debug)]
pub struct StyleSheet {
    flash: FlashAnimation,
}

impl StyleSheet {
    fn new() -> Self {
        Self {
            flash: FlashAnimation {
                from: FLASH_COLOR,
                duration: FLASH_DURATION,
            },
        }
    }

    /// Look up the animation registered for a class name.
    pub fn get(&self, class: &str) -> Option<&FlashAnimation> {
        (class == FLASH_CLASS).then_some(&self.flash)
    }
}

/// Register the flash style if this process has not done so yet.
///
/// Returns `true` only for the call that performed the registration.
pub fn inject() -> bool {
    let mut registered = false;
    STYLE_SHEET.get_or_init(|| {
        registered = true;
        tracing::debug!(class = FLASH_CLASS, "registered flash style");
        StyleSheet::new()
    });
    registered
}

/// Whether the flash style has been registered in this process.
pub fn is_injected() -> bool {
    STYLE_SHEET.get().is_some()
}

/// The animation registered for `class`, if styles were injected.
pub fn lookup(class: &str) -> Option<&'static FlashAnimation> {
    STYLE_SHEET.get()?.get(class)
}

/// Keyframes of the flash: `from` at the start, fully faded at `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashAnimation {
    pub from: Color,
    pub duration: Duration,
}

impl FlashAnimation {
    /// Eased progress in `0.0..=1.0` after `elapsed`.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        // ease-out
        1.0 - (1.0 - t) * (1.0 - t)
    }

    /// Colour at `elapsed`, fading towards `fade_to`.
    ///
    /// Truecolor targets are interpolated; named colours switch over at the
    /// halfway point since they cannot be blended.
    pub fn color_at(&self, elapsed: Duration, fade_to: Color) -> Color {
        let p = self.progress(elapsed);
        match (self.from, fade_to) {
            (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => {
                Color::Rgb(lerp(r0, r1, p), lerp(g0, g1, p), lerp(b0, b1, p))
            }
            _ if p < 0.5 => self.from,
            _ => fade_to,
        }
    }

    /// Border style at `elapsed`; bold while the flash is still strong.
    pub fn border_style(&self, elapsed: Duration, fade_to: Color) -> Style {
        let style = Style::default().fg(self.color_at(elapsed, fade_to));
        if self.progress(elapsed) < 0.5 {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

fn lerp(from: u8, to: u8, p: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * p).round() as u8
}
