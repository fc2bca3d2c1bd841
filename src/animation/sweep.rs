//! Startup sweep: a single blue pixel travels once around the ring.

use embassy_time::Duration;

use super::{Animation, FrameStep};
use crate::color::{BLUE, Rgb, clear};

const FRAME_HOLD: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, Default)]
pub struct RotatingSweep;

impl Animation for RotatingSweep {
    fn frame_count(&self, led_count: usize) -> usize {
        led_count
    }

    fn render(&mut self, step: usize, leds: &mut [Rgb]) -> FrameStep {
        clear(leds);
        if let Some(led) = leds.get_mut(step) {
            *led = BLUE;
        }
        FrameStep::hold(FRAME_HOLD)
    }
}
