//! Status flash: three on/off cycles of a single color.

use embassy_time::Duration;

use super::{Animation, FrameStep};
use crate::color::{GREEN, RED, Rgb, clear, fill};

const FRAME_HOLD: Duration = Duration::from_millis(200);
const CYCLES: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct FlashIndicator {
    color: Rgb,
}

impl FlashIndicator {
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }

    /// Affirmative green flash
    pub const fn connected() -> Self {
        Self::new(GREEN)
    }

    /// Alert red flash
    pub const fn failed() -> Self {
        Self::new(RED)
    }
}

impl Animation for FlashIndicator {
    fn frame_count(&self, _led_count: usize) -> usize {
        CYCLES * 2
    }

    fn render(&mut self, step: usize, leds: &mut [Rgb]) -> FrameStep {
        if step % 2 == 0 {
            fill(leds, self.color);
        } else {
            clear(leds);
        }
        FrameStep::hold(FRAME_HOLD)
    }
}
