#![cfg_attr(not(test), no_std)]

pub mod animation;
pub mod channel;
pub mod clock_face;
pub mod color;
pub mod frame_scheduler;
pub mod gamma;
pub mod geometry;
pub mod intent_processor;
pub mod link;
pub mod math8;
pub mod ring_clock;
pub mod settings;
pub mod tz;

pub use animation::{AnimationId, FrameStep, Indicator, Sequencer};
pub use clock_face::ClockFace;
pub use frame_scheduler::FrameScheduler;
pub use gamma::{gamma_correct, ws2812_lut};
pub use geometry::{DialTime, HandPositions, HourHandMode, MarkerMode, hand_positions};
pub use intent_processor::{
    ClockIntent, IntentChannel, IntentEffects, IntentProcessor, IntentReceiver, IntentSender,
};
pub use link::{Link, LinkConfig, LinkState, Ownership};
pub use ring_clock::{ClockStatus, FrameOwner, RenderedFrame, RingClock, RingClockConfig};
pub use settings::{DisplaySettings, SettingsStore, SettingsUpdate, TimezonePreset};
pub use tz::{LocalTime, TzRule};

pub use color::Rgb;
pub use math8::scale8;
pub use embassy_time::{Duration, Instant};

/// Epochs at or below this value mean the time source has no valid time yet
pub const SENTINEL_EPOCH: i64 = 100_000;

/// NTP hosts handed to the time source after the configured one
pub const FALLBACK_NTP_SERVERS: [&str; 2] = ["time.google.com", "time.cloudflare.com"];

/// Latest epoch rendered as wall-clock time, 9999-12-31 23:59:59 UTC
pub const MAX_EPOCH: i64 = 253_402_300_799;

/// Check if a time source epoch holds a plausible wall-clock time
pub const fn is_valid_epoch(epoch: i64) -> bool {
    epoch > SENTINEL_EPOCH && epoch <= MAX_EPOCH
}

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// Each call pushes one complete frame to the ring.
pub trait OutputDriver {
    /// Write colors to the LED ring
    fn write(&mut self, colors: &[Rgb]);
}

/// Wall-clock source, usually an SNTP client
pub trait TimeSource {
    /// Start synchronizing against `ntp_server`, falling back to
    /// `fallback_servers`, with local time given by `timezone_rule`
    fn configure(&mut self, ntp_server: &str, fallback_servers: [&str; 2], timezone_rule: &str);

    /// Seconds since the Unix epoch, UTC
    ///
    /// Values at or below [`SENTINEL_EPOCH`] mean "not synchronized yet";
    /// values above [`MAX_EPOCH`] are treated the same way.
    fn current_epoch(&mut self) -> i64;
}

/// Wi-Fi station link
pub trait Connectivity {
    /// Check if the station is currently associated with an access point
    fn is_associated(&mut self) -> bool;
}

/// Byte-addressed persistent storage, e.g. an emulated EEPROM region
pub trait SettingsStorage {
    type Error: core::fmt::Debug;

    /// Fill `buf` with the bytes stored at `offset`
    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Stage `data` at `offset`
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), Self::Error>;

    /// Make staged writes durable
    fn commit(&mut self) -> Result<(), Self::Error>;
}
