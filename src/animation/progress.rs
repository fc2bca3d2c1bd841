//! Progress fill: the ring turns green one pixel at a time.

use embassy_time::Duration;

use super::{Animation, FrameStep};
use crate::color::{BLACK, GREEN, Rgb};

const FRAME_HOLD: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressFill;

impl Animation for ProgressFill {
    fn frame_count(&self, led_count: usize) -> usize {
        led_count
    }

    fn render(&mut self, step: usize, leds: &mut [Rgb]) -> FrameStep {
        for (i, led) in leds.iter_mut().enumerate() {
            *led = if i <= step { GREEN } else { BLACK };
        }
        FrameStep::hold(FRAME_HOLD)
    }
}
