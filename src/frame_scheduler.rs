//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! Every frame carries its own hold time; the caller sleeps until the returned
//! deadline before ticking again.

use embassy_time::{Duration, Instant};

use crate::ring_clock::RingClock;
use crate::{Connectivity, OutputDriver, SettingsStorage, TimeSource};

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Calls the ring clock and pushes its frame to the output driver
/// - Advances the deadline by the hold of each frame
/// - Skips the backlog after stalls longer than two holds
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(clock, driver);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, O, W, T, S, const LEDS: usize, const INTENT_CHANNEL_SIZE: usize>
where
    O: OutputDriver,
    W: Connectivity,
    T: TimeSource,
    S: SettingsStorage,
{
    output: O,
    clock: RingClock<'a, W, T, S, LEDS, INTENT_CHANNEL_SIZE>,
    next_frame: Instant,
    last_hold: Duration,
}

impl<'a, O, W, T, S, const LEDS: usize, const INTENT_CHANNEL_SIZE: usize>
    FrameScheduler<'a, O, W, T, S, LEDS, INTENT_CHANNEL_SIZE>
where
    O: OutputDriver,
    W: Connectivity,
    T: TimeSource,
    S: SettingsStorage,
{
    pub const fn new(clock: RingClock<'a, W, T, S, LEDS, INTENT_CHANNEL_SIZE>, driver: O) -> Self {
        Self {
            output: driver,
            clock,
            next_frame: Instant::from_ticks(0),
            last_hold: Duration::from_ticks(0),
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Resets the schedule if we've fallen too far behind
    /// 2. Renders the current frame
    /// 3. Writes to the output driver
    /// 4. Returns the deadline for the next frame
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.last_hold * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        let frame = self.clock.render(now);
        self.output.write(frame.colors);

        self.last_hold = frame.hold;
        self.next_frame += frame.hold;

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration: self.next_frame.saturating_duration_since(now),
        }
    }

    pub const fn clock(&self) -> &RingClock<'a, W, T, S, LEDS, INTENT_CHANNEL_SIZE> {
        &self.clock
    }

    pub const fn clock_mut(&mut self) -> &mut RingClock<'a, W, T, S, LEDS, INTENT_CHANNEL_SIZE> {
        &mut self.clock
    }

    pub const fn output(&self) -> &O {
        &self.output
    }
}
