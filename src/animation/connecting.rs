//! Connecting indicator: a cyan sine wave sweeping around the ring.

use embassy_time::Duration;

use super::{Animation, FrameStep};
use crate::color::Rgb;

const FRAME_HOLD: Duration = Duration::from_millis(100);

/// Frames in a full run
const RUN_FRAMES: usize = 20;

/// Phase advance per pixel and per frame, in radians
const WAVE_STEP: f32 = 0.2;

/// Number of phase steps before the wave repeats closely enough (~2π / 0.2)
const PHASE_PERIOD: u32 = 31;

/// Sine wave whose phase advances one step per rendered frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectingWave {
    phase: u32,
}

impl ConnectingWave {
    pub const fn new() -> Self {
        Self { phase: 0 }
    }

    /// Wave level (0-254) for pixel `index` at phase `phase`
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn level(index: usize, phase: u32) -> u8 {
        let angle = (index as f32 + phase as f32) * WAVE_STEP;
        ((libm::sinf(angle) + 1.0) * 127.0) as u8
    }
}

impl Animation for ConnectingWave {
    fn frame_count(&self, _led_count: usize) -> usize {
        RUN_FRAMES
    }

    fn render(&mut self, _step: usize, leds: &mut [Rgb]) -> FrameStep {
        for (i, led) in leds.iter_mut().enumerate() {
            let level = Self::level(i, self.phase);
            *led = Rgb {
                r: 0,
                g: level,
                b: level,
            };
        }
        self.phase = (self.phase + 1) % PHASE_PERIOD;
        FrameStep::hold(FRAME_HOLD)
    }
}
