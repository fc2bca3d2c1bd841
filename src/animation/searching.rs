//! Searching indicator: one blue dot advancing a pixel per frame.

use embassy_time::Duration;

use super::{Animation, FrameStep};
use crate::color::{BLUE, Rgb, clear};

const FRAME_HOLD: Duration = Duration::from_millis(100);

/// Searching dot with a cursor that persists between calls
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchingDot {
    cursor: usize,
}

impl SearchingDot {
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Pixel lit by the next frame
    pub const fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Animation for SearchingDot {
    /// A full run is one revolution
    fn frame_count(&self, led_count: usize) -> usize {
        led_count
    }

    fn render(&mut self, _step: usize, leds: &mut [Rgb]) -> FrameStep {
        clear(leds);
        if !leds.is_empty() {
            let position = self.cursor % leds.len();
            leds[position] = BLUE;
            self.cursor = (position + 1) % leds.len();
        }
        FrameStep::hold(FRAME_HOLD)
    }
}
