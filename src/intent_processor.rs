//! Intent processing module
//!
//! Drains requests from the configuration page between ticks and turns them
//! into settings mutations and queued animations.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::{AnimationId, Sequencer};
use crate::channel::{Channel, Receiver, Sender};
use crate::settings::{DisplaySettings, SettingsUpdate};

/// Request from the configuration collaborator
#[derive(Debug, Clone)]
pub enum ClockIntent {
    /// Apply, persist and re-apply display settings
    Update(SettingsUpdate),
    /// Play a catalog animation at the next ownership decision
    PlayAnimation(AnimationId),
}

/// Side effects the clock must carry out after processing intents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentEffects {
    /// Settings were updated and must be persisted
    pub settings_changed: bool,
    /// The timezone rule changed and must be re-parsed
    pub timezone_changed: bool,
    /// The NTP host changed; a fresh sync is due
    pub ntp_server_changed: bool,
}

impl IntentEffects {
    /// Check if any effects need to be applied
    pub const fn has_effects(&self) -> bool {
        self.settings_changed || self.timezone_changed || self.ntp_server_changed
    }
}

/// Type alias for intent sender
pub type IntentSender<'a, const SIZE: usize> = Sender<'a, ClockIntent, SIZE>;

/// Type alias for intent receiver
pub type IntentReceiver<'a, const SIZE: usize> = Receiver<'a, ClockIntent, SIZE>;

/// Type alias for the intent channel
pub type IntentChannel<const SIZE: usize> = Channel<ClockIntent, SIZE>;

pub struct IntentProcessor<'a, const SIZE: usize> {
    intents: IntentReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> IntentProcessor<'a, SIZE> {
    pub const fn new(intents: IntentReceiver<'a, SIZE>) -> Self {
        Self { intents }
    }

    /// Process all pending intents from the channel (non-blocking)
    ///
    /// Settings updates are applied to `settings` in arrival order and their
    /// effects merged. Animation requests are queued on `sequencer`; requests
    /// that do not fit in its queue are dropped.
    pub fn process_pending<const QUEUE: usize>(
        &mut self,
        settings: &mut DisplaySettings,
        sequencer: &mut Sequencer<QUEUE>,
    ) -> IntentEffects {
        let mut effects = IntentEffects::default();

        for intent in self.intents.drain() {
            match intent {
                ClockIntent::Update(update) => {
                    if update.is_empty() {
                        continue;
                    }
                    let applied = settings.apply(&update);
                    effects.settings_changed = true;
                    effects.timezone_changed |= applied.timezone_changed;
                    effects.ntp_server_changed |= applied.ntp_server_changed;
                }
                ClockIntent::PlayAnimation(id) => {
                    if sequencer.enqueue(id).is_err() {
                        #[cfg(feature = "esp32-log")]
                        println!(
                            "[IntentProcessor.process_pending] queue full, dropped {}",
                            id.as_str()
                        );
                    }
                }
            }
        }

        effects
    }
}
