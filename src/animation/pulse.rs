//! Glow pulse: the whole ring fades up to full brightness and back down.
//!
//! Brightness is carried per frame, so the configured brightness is back in
//! effect as soon as the run ends.

use embassy_time::Duration;

use super::{Animation, FrameStep};
use crate::color::{BLUE, Rgb, fill};

const FRAME_HOLD: Duration = Duration::from_millis(20);
const BRIGHTNESS_STEP: usize = 5;

/// Frames per ramp: 0, 5, ..., 255
const RAMP_FRAMES: usize = 255 / BRIGHTNESS_STEP + 1;

#[derive(Debug, Clone, Copy, Default)]
pub struct GlowPulse;

impl GlowPulse {
    /// Brightness of frame `step`
    #[allow(clippy::cast_possible_truncation)]
    pub const fn level(step: usize) -> u8 {
        let level = if step < RAMP_FRAMES {
            step * BRIGHTNESS_STEP
        } else {
            255usize.saturating_sub((step - RAMP_FRAMES) * BRIGHTNESS_STEP)
        };
        level as u8
    }
}

impl Animation for GlowPulse {
    fn frame_count(&self, _led_count: usize) -> usize {
        RAMP_FRAMES * 2
    }

    fn render(&mut self, step: usize, leds: &mut [Rgb]) -> FrameStep {
        let step = step.min(RAMP_FRAMES * 2 - 1);
        fill(leds, BLUE);
        FrameStep {
            hold: FRAME_HOLD,
            brightness: Some(Self::level(step)),
        }
    }
}
