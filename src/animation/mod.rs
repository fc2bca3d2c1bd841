//! Animation catalog and sequencer
//!
//! Every animation is a fixed, finite list of whole-ring frames. Frames are
//! rendered one per tick and each returns the hold time before the next one,
//! so a run never blocks the caller. Once started, a run always plays to its
//! last frame.

mod connecting;
mod flash;
mod progress;
mod pulse;
mod searching;
mod sweep;

use embassy_time::Duration;
use heapless::Deque;

pub use connecting::ConnectingWave;
pub use flash::FlashIndicator;
pub use progress::ProgressFill;
pub use pulse::GlowPulse;
pub use searching::SearchingDot;
pub use sweep::RotatingSweep;

use crate::color::Rgb;

const ANIMATION_NAME_ROTATING: &str = "rotating";
const ANIMATION_NAME_PULSATING: &str = "pulsating";
const ANIMATION_NAME_PROGRESS: &str = "progress";
const ANIMATION_NAME_SEARCHING: &str = "wifiSearching";
const ANIMATION_NAME_CONNECTING: &str = "wifiConnecting";
const ANIMATION_NAME_CONNECTED: &str = "wifiConnected";
const ANIMATION_NAME_FAILED: &str = "wifiFailed";

/// Animations played at power-up, in order
pub const BOOT_SEQUENCE: [AnimationId; 3] = [
    AnimationId::Rotating,
    AnimationId::Pulsating,
    AnimationId::Progress,
];

/// One rendered animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStep {
    /// How long the frame stays on the ring
    pub hold: Duration,
    /// Output brightness for this frame, `None` keeps the configured one
    pub brightness: Option<u8>,
}

impl FrameStep {
    pub const fn hold(hold: Duration) -> Self {
        Self {
            hold,
            brightness: None,
        }
    }
}

pub trait Animation {
    /// Number of frames in one complete run
    fn frame_count(&self, led_count: usize) -> usize;

    /// Render frame `step` of the run
    fn render(&mut self, step: usize, leds: &mut [Rgb]) -> FrameStep;
}

/// Known animations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationId {
    /// One lit pixel travelling once around the ring
    Rotating,
    /// Whole ring fading up and down
    Pulsating,
    /// Ring filling up pixel by pixel
    Progress,
    /// Wi-Fi search indicator
    Searching,
    /// Time sync in progress
    Connecting,
    /// Wi-Fi association confirmed
    Connected,
    /// Wi-Fi association failed
    Failed,
}

impl AnimationId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rotating => ANIMATION_NAME_ROTATING,
            Self::Pulsating => ANIMATION_NAME_PULSATING,
            Self::Progress => ANIMATION_NAME_PROGRESS,
            Self::Searching => ANIMATION_NAME_SEARCHING,
            Self::Connecting => ANIMATION_NAME_CONNECTING,
            Self::Connected => ANIMATION_NAME_CONNECTED,
            Self::Failed => ANIMATION_NAME_FAILED,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            ANIMATION_NAME_ROTATING => Some(Self::Rotating),
            ANIMATION_NAME_PULSATING => Some(Self::Pulsating),
            ANIMATION_NAME_PROGRESS => Some(Self::Progress),
            ANIMATION_NAME_SEARCHING => Some(Self::Searching),
            ANIMATION_NAME_CONNECTING => Some(Self::Connecting),
            ANIMATION_NAME_CONNECTED => Some(Self::Connected),
            ANIMATION_NAME_FAILED => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Single-step indicators owned by the connectivity state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
    /// Advance the searching dot by one pixel
    Searching,
    /// Advance the connecting wave by one phase step
    Connecting,
}

#[derive(Debug, Clone, Copy)]
struct ActiveRun {
    id: AnimationId,
    step: usize,
    frames: usize,
}

/// Plays queued animations frame by frame
///
/// The searching cursor and the connecting phase live here, so they carry
/// over between runs and indicator steps.
#[derive(Debug)]
pub struct Sequencer<const QUEUE: usize> {
    queue: Deque<AnimationId, QUEUE>,
    active: Option<ActiveRun>,
    searching: SearchingDot,
    connecting: ConnectingWave,
}

impl<const QUEUE: usize> Default for Sequencer<QUEUE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const QUEUE: usize> Sequencer<QUEUE> {
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            active: None,
            searching: SearchingDot::new(),
            connecting: ConnectingWave::new(),
        }
    }

    /// Queue an animation to run after the current one
    ///
    /// Returns the animation if the queue is full
    pub fn enqueue(&mut self, id: AnimationId) -> Result<(), AnimationId> {
        self.queue.push_back(id)
    }

    /// Check if a run is in progress
    pub const fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Check if nothing is running or queued
    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.queue.is_empty()
    }

    /// Animation currently playing
    pub fn current(&self) -> Option<AnimationId> {
        self.active.map(|run| run.id)
    }

    /// Render the next frame of the active run, starting the next queued run
    /// if none is active.
    ///
    /// Returns `None` when there is nothing to play.
    pub fn next_frame(&mut self, leds: &mut [Rgb]) -> Option<(AnimationId, FrameStep)> {
        loop {
            let mut run = match self.active {
                Some(run) => run,
                None => {
                    let id = self.queue.pop_front()?;
                    ActiveRun {
                        id,
                        step: 0,
                        frames: self.frame_count(id, leds.len()),
                    }
                }
            };

            if run.step >= run.frames {
                // Nothing to show, e.g. on an empty ring
                self.active = None;
                continue;
            }

            let frame = self.render(run.id, run.step, leds);
            run.step += 1;
            self.active = (run.step < run.frames).then_some(run);
            return Some((run.id, frame));
        }
    }

    /// Render one step of an indicator
    pub fn indicator(&mut self, indicator: Indicator, leds: &mut [Rgb]) -> FrameStep {
        match indicator {
            Indicator::Searching => self.searching.render(0, leds),
            Indicator::Connecting => self.connecting.render(0, leds),
        }
    }

    fn frame_count(&self, id: AnimationId, led_count: usize) -> usize {
        match id {
            AnimationId::Rotating => RotatingSweep.frame_count(led_count),
            AnimationId::Pulsating => GlowPulse.frame_count(led_count),
            AnimationId::Progress => ProgressFill.frame_count(led_count),
            AnimationId::Searching => self.searching.frame_count(led_count),
            AnimationId::Connecting => self.connecting.frame_count(led_count),
            AnimationId::Connected => FlashIndicator::connected().frame_count(led_count),
            AnimationId::Failed => FlashIndicator::failed().frame_count(led_count),
        }
    }

    fn render(&mut self, id: AnimationId, step: usize, leds: &mut [Rgb]) -> FrameStep {
        match id {
            AnimationId::Rotating => RotatingSweep.render(step, leds),
            AnimationId::Pulsating => GlowPulse.render(step, leds),
            AnimationId::Progress => ProgressFill.render(step, leds),
            AnimationId::Searching => self.searching.render(step, leds),
            AnimationId::Connecting => self.connecting.render(step, leds),
            AnimationId::Connected => FlashIndicator::connected().render(step, leds),
            AnimationId::Failed => FlashIndicator::failed().render(step, leds),
        }
    }
}
