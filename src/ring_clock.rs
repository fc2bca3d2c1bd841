use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::{AnimationId, BOOT_SEQUENCE, FrameStep, Indicator, Sequencer};
use crate::clock_face::ClockFace;
use crate::color::{Rgb, clear};
use crate::intent_processor::{IntentEffects, IntentProcessor, IntentReceiver};
use crate::link::{Link, LinkConfig, LinkState, Ownership};
use crate::math8::scale_frame;
use crate::settings::{DisplaySettings, LoadOutcome, SettingsStore};
use crate::tz::LocalTime;
use crate::{Connectivity, SettingsStorage, TimeSource, is_valid_epoch};

/// Animations that can wait behind the active run
pub const ANIMATION_QUEUE_SIZE: usize = 8;

/// Configuration for the ring clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingClockConfig {
    pub link: LinkConfig,
    /// Hold of every clock face frame
    pub clock_tick: Duration,
    /// Byte offset of the settings record in storage
    pub store_offset: usize,
    /// Queue the rotating, pulsating and progress animations at start-up
    pub boot_animations: bool,
}

impl Default for RingClockConfig {
    fn default() -> Self {
        Self {
            link: LinkConfig::default(),
            clock_tick: Duration::from_secs(1),
            store_offset: 0,
            boot_animations: true,
        }
    }
}

/// What painted the most recent frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOwner {
    Clock,
    Animation(AnimationId),
    Indicator(Indicator),
}

/// Snapshot for the configuration page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockStatus {
    pub state: LinkState,
    /// Result of the most recent sync attempt
    pub time_synced: bool,
    pub last_sync_attempt: Option<Instant>,
    /// The time source currently reports a plausible epoch
    pub epoch_valid: bool,
    pub local_time: Option<LocalTime>,
}

/// A frame ready to be pushed to the ring
#[derive(Debug, Clone, Copy)]
pub struct RenderedFrame<'a> {
    pub colors: &'a [Rgb],
    /// How long the frame must stay on the ring
    pub hold: Duration,
}

/// Ring clock - the main orchestrator
///
/// Each call to [`RingClock::render`] decides who owns the ring, paints one
/// frame and reports how long to hold it. Running animations always finish
/// before anything else is considered.
pub struct RingClock<'a, W, T, S, const LEDS: usize, const INTENT_CHANNEL_SIZE: usize>
where
    W: Connectivity,
    T: TimeSource,
    S: SettingsStorage,
{
    // External dependencies and configuration
    intent_processor: IntentProcessor<'a, INTENT_CHANNEL_SIZE>,
    wifi: W,
    time: T,
    store: SettingsStore<S>,
    config: RingClockConfig,

    // Internal state
    settings: DisplaySettings,
    load_outcome: LoadOutcome,
    face: ClockFace,
    link: Link,
    sequencer: Sequencer<ANIMATION_QUEUE_SIZE>,
    last_owner: Option<FrameOwner>,
    frame_buffer: [Rgb; LEDS],
    output_buffer: [Rgb; LEDS],
}

impl<'a, W, T, S, const LEDS: usize, const INTENT_CHANNEL_SIZE: usize>
    RingClock<'a, W, T, S, LEDS, INTENT_CHANNEL_SIZE>
where
    W: Connectivity,
    T: TimeSource,
    S: SettingsStorage,
{
    /// Create a ring clock, loading persisted settings from `storage`
    pub fn new(
        intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>,
        wifi: W,
        time: T,
        storage: S,
        config: RingClockConfig,
    ) -> Self {
        let mut settings = DisplaySettings::default();
        let mut store = SettingsStore::new(storage, config.store_offset);
        let load_outcome = store.load(&mut settings);

        let mut sequencer = Sequencer::new();
        if config.boot_animations {
            for id in BOOT_SEQUENCE {
                let _ = sequencer.enqueue(id);
            }
        }

        Self {
            intent_processor: IntentProcessor::new(intents),
            wifi,
            time,
            store,
            config,
            face: ClockFace::new(settings.tz()),
            settings,
            load_outcome,
            link: Link::new(config.link),
            sequencer,
            last_owner: None,
            frame_buffer: [Rgb::default(); LEDS],
            output_buffer: [Rgb::default(); LEDS],
        }
    }

    /// Process one frame
    ///
    /// This is the main loop step. Push the returned colors to the ring and
    /// call again once `hold` has elapsed.
    pub fn render(&mut self, now: Instant) -> RenderedFrame<'_> {
        let step = self.paint(now);

        let brightness = step.brightness.unwrap_or(self.settings.brightness);
        self.output_buffer = self.frame_buffer;
        scale_frame(&mut self.output_buffer, brightness);

        RenderedFrame {
            colors: &self.output_buffer,
            hold: step.hold,
        }
    }

    pub const fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Outcome of loading settings at construction
    pub const fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    pub const fn link(&self) -> &Link {
        &self.link
    }

    pub const fn store(&self) -> &SettingsStore<S> {
        &self.store
    }

    pub const fn wifi_mut(&mut self) -> &mut W {
        &mut self.wifi
    }

    pub const fn time_mut(&mut self) -> &mut T {
        &mut self.time
    }

    /// What painted the most recent frame
    pub const fn last_owner(&self) -> Option<FrameOwner> {
        self.last_owner
    }

    /// Frame as painted, before brightness scaling
    pub const fn frame(&self) -> &[Rgb; LEDS] {
        &self.frame_buffer
    }

    pub fn status(&mut self) -> ClockStatus {
        let epoch = self.time.current_epoch();
        ClockStatus {
            state: self.link.state(),
            time_synced: self.link.time_synced(),
            last_sync_attempt: self.link.last_sync_attempt(),
            epoch_valid: is_valid_epoch(epoch),
            local_time: self.face.local_time(epoch),
        }
    }

    /// Decide ownership and paint the frame buffer
    fn paint(&mut self, now: Instant) -> FrameStep {
        if !self.sequencer.is_running() {
            self.process_intents();
        }

        if let Some(step) = self.play_next() {
            return step;
        }

        match self
            .link
            .tick(now, &mut self.wifi, &mut self.time, &self.settings)
        {
            Ownership::Clock => self.paint_clock(),
            Ownership::Indicator(indicator, hold) => {
                let step = self.sequencer.indicator(indicator, &mut self.frame_buffer);
                self.last_owner = Some(FrameOwner::Indicator(indicator));
                FrameStep { hold, ..step }
            }
            Ownership::Play(id) => {
                let _ = self.sequencer.enqueue(id);
                self.play_next().unwrap_or_else(|| {
                    clear(&mut self.frame_buffer);
                    FrameStep::hold(self.config.clock_tick)
                })
            }
        }
    }

    fn play_next(&mut self) -> Option<FrameStep> {
        let (id, step) = self.sequencer.next_frame(&mut self.frame_buffer)?;
        self.last_owner = Some(FrameOwner::Animation(id));
        Some(step)
    }

    fn paint_clock(&mut self) -> FrameStep {
        let epoch = self.time.current_epoch();
        self.face.paint(epoch, &self.settings, &mut self.frame_buffer);
        self.last_owner = Some(FrameOwner::Clock);
        FrameStep::hold(self.config.clock_tick)
    }

    /// Process pending intents from the channel (non-blocking)
    fn process_intents(&mut self) {
        let effects = self
            .intent_processor
            .process_pending(&mut self.settings, &mut self.sequencer);

        if effects.has_effects() {
            self.apply_effects(effects);
        }
    }

    /// Apply side effects from intent processing
    fn apply_effects(&mut self, effects: IntentEffects) {
        if effects.timezone_changed {
            self.face.set_tz(self.settings.tz());
        }

        if effects.ntp_server_changed {
            self.link.request_sync();
        }

        if effects.settings_changed {
            // In-memory settings stay authoritative when persisting fails
            if let Err(_err) = self.store.save(&self.settings) {
                #[cfg(feature = "esp32-log")]
                println!("[RingClock.apply_effects] failed to save settings: {}", _err);
            }
        }
    }
}
