//! Connectivity and time-sync state machine.
//!
//! The machine never blocks: every [`Link::tick`] observes the Wi-Fi link and
//! the time source once, moves at most one transition, and tells the caller
//! who owns the ring until the next tick.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::{AnimationId, Indicator};
use crate::settings::DisplaySettings;
use crate::{Connectivity, FALLBACK_NTP_SERVERS, TimeSource, is_valid_epoch};

/// Timing of the connectivity state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkConfig {
    /// How long to wait for association before flashing the failure
    pub association_timeout: Duration,
    /// Time source polls per sync attempt
    pub poll_limit: u16,
    /// Hold between two polls
    pub poll_interval: Duration,
    /// Wait before retrying a failed sync
    pub retry_cooldown: Duration,
    /// Hold between searching indicator steps
    pub searching_pace: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            association_timeout: Duration::from_secs(20),
            poll_limit: 60,
            poll_interval: Duration::from_millis(250),
            retry_cooldown: Duration::from_secs(30),
            searching_pace: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Booting,
    /// Waiting for the station to associate
    WifiPending,
    /// Association observed, sync starts on the next tick
    WifiConnected,
    /// Association timed out; still searching
    WifiFailed,
    /// Polling the time source
    TimeSyncing,
    TimeSynced,
    /// Last sync attempt ran out of polls
    TimeSyncRetry,
}

impl LinkState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Booting => "booting",
            Self::WifiPending => "wifiPending",
            Self::WifiConnected => "wifiConnected",
            Self::WifiFailed => "wifiFailed",
            Self::TimeSyncing => "timeSyncing",
            Self::TimeSynced => "timeSynced",
            Self::TimeSyncRetry => "timeSyncRetry",
        }
    }

    /// Check if the station is associated in this state
    pub const fn is_online(self) -> bool {
        matches!(
            self,
            Self::WifiConnected | Self::TimeSyncing | Self::TimeSynced | Self::TimeSyncRetry
        )
    }
}

/// Who paints the ring until the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The clock face
    Clock,
    /// One indicator step, held for the given duration
    Indicator(Indicator, Duration),
    /// A full animation run
    Play(AnimationId),
}

#[derive(Debug)]
pub struct Link {
    config: LinkConfig,
    state: LinkState,
    associated: bool,
    time_synced: bool,
    sync_requested: bool,
    polls: u16,
    pending_since: Instant,
    retry_since: Instant,
    last_sync_attempt: Option<Instant>,
}

impl Link {
    pub const fn new(config: LinkConfig) -> Self {
        Self {
            config,
            state: LinkState::Booting,
            associated: false,
            time_synced: false,
            sync_requested: false,
            polls: 0,
            pending_since: Instant::from_ticks(0),
            retry_since: Instant::from_ticks(0),
            last_sync_attempt: None,
        }
    }

    pub const fn state(&self) -> LinkState {
        self.state
    }

    pub const fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Result of the most recent sync attempt
    pub const fn time_synced(&self) -> bool {
        self.time_synced
    }

    pub const fn last_sync_attempt(&self) -> Option<Instant> {
        self.last_sync_attempt
    }

    /// Start a fresh sync on the next tick if the station is associated
    pub fn request_sync(&mut self) {
        self.sync_requested = true;
    }

    /// Advance the state machine by one tick
    pub fn tick<W, T>(
        &mut self,
        now: Instant,
        wifi: &mut W,
        time: &mut T,
        settings: &DisplaySettings,
    ) -> Ownership
    where
        W: Connectivity,
        T: TimeSource,
    {
        let associated = wifi.is_associated();
        let was_associated = core::mem::replace(&mut self.associated, associated);

        if associated && !was_associated {
            self.set_state(LinkState::WifiConnected);
            return Ownership::Play(AnimationId::Connected);
        }
        if self.state == LinkState::Booting || (was_associated && !associated) {
            self.pending_since = now;
            self.set_state(LinkState::WifiPending);
        }

        match self.state {
            LinkState::Booting | LinkState::WifiPending => {
                let waited = now.saturating_duration_since(self.pending_since);
                if waited >= self.config.association_timeout {
                    self.set_state(LinkState::WifiFailed);
                    return Ownership::Play(AnimationId::Failed);
                }
                self.searching()
            }
            LinkState::WifiFailed => self.searching(),
            LinkState::WifiConnected => self.start_sync(now, time, settings),
            LinkState::TimeSyncing => self.poll(now, time),
            LinkState::TimeSynced => {
                if self.sync_requested {
                    return self.start_sync(now, time, settings);
                }
                Ownership::Clock
            }
            LinkState::TimeSyncRetry => {
                if self.sync_requested
                    || now.saturating_duration_since(self.retry_since) >= self.config.retry_cooldown
                {
                    return self.start_sync(now, time, settings);
                }
                if is_valid_epoch(time.current_epoch()) {
                    self.finish_sync(true);
                }
                Ownership::Clock
            }
        }
    }

    const fn searching(&self) -> Ownership {
        Ownership::Indicator(Indicator::Searching, self.config.searching_pace)
    }

    fn start_sync<T: TimeSource>(
        &mut self,
        now: Instant,
        time: &mut T,
        settings: &DisplaySettings,
    ) -> Ownership {
        #[cfg(feature = "esp32-log")]
        println!("[Link.start_sync] ntp server: {}", settings.ntp_server());

        time.configure(settings.ntp_server(), FALLBACK_NTP_SERVERS, settings.timezone_rule());
        self.sync_requested = false;
        self.polls = 0;
        self.last_sync_attempt = Some(now);
        self.set_state(LinkState::TimeSyncing);
        self.poll(now, time)
    }

    fn poll<T: TimeSource>(&mut self, now: Instant, time: &mut T) -> Ownership {
        if is_valid_epoch(time.current_epoch()) {
            self.finish_sync(true);
            return Ownership::Clock;
        }

        self.polls = self.polls.saturating_add(1);
        if self.polls >= self.config.poll_limit {
            self.retry_since = now;
            self.finish_sync(false);
            return Ownership::Clock;
        }
        Ownership::Indicator(Indicator::Connecting, self.config.poll_interval)
    }

    fn finish_sync(&mut self, synced: bool) {
        self.time_synced = synced;
        if synced {
            self.set_state(LinkState::TimeSynced);
        } else {
            self.set_state(LinkState::TimeSyncRetry);
        }
    }

    fn set_state(&mut self, state: LinkState) {
        if self.state != state {
            #[cfg(feature = "esp32-log")]
            println!("[Link.set_state] {} -> {}", self.state.as_str(), state.as_str());
            self.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Wifi(bool);

    impl Connectivity for Wifi {
        fn is_associated(&mut self) -> bool {
            self.0
        }
    }

    struct Unsynced;

    impl TimeSource for Unsynced {
        fn configure(&mut self, _: &str, _: [&str; 2], _: &str) {}

        fn current_epoch(&mut self) -> i64 {
            0
        }
    }

    #[test]
    fn association_timeout_flashes_failure_then_keeps_searching() {
        let mut link = Link::new(LinkConfig::default());
        let settings = DisplaySettings::default();
        let mut wifi = Wifi(false);

        let start = Instant::from_secs(1);
        assert!(matches!(
            link.tick(start, &mut wifi, &mut Unsynced, &settings),
            Ownership::Indicator(Indicator::Searching, _)
        ));
        assert_eq!(link.state(), LinkState::WifiPending);

        let later = start + Duration::from_secs(20);
        assert_eq!(
            link.tick(later, &mut wifi, &mut Unsynced, &settings),
            Ownership::Play(AnimationId::Failed)
        );
        assert!(matches!(
            link.tick(later, &mut wifi, &mut Unsynced, &settings),
            Ownership::Indicator(Indicator::Searching, _)
        ));
        assert_eq!(link.state(), LinkState::WifiFailed);
    }

    #[test]
    fn association_edge_is_consumed_once() {
        let mut link = Link::new(LinkConfig::default());
        let settings = DisplaySettings::default();
        let mut wifi = Wifi(true);
        let now = Instant::from_secs(1);

        assert_eq!(
            link.tick(now, &mut wifi, &mut Unsynced, &settings),
            Ownership::Play(AnimationId::Connected)
        );
        assert!(matches!(
            link.tick(now, &mut wifi, &mut Unsynced, &settings),
            Ownership::Indicator(Indicator::Connecting, _)
        ));
        assert_eq!(link.state(), LinkState::TimeSyncing);
        assert_eq!(link.last_sync_attempt(), Some(now));
    }
}
