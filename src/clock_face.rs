//! Clock face painter.
//!
//! Paint order decides collisions: markers first, then the second hand, the
//! minute hand, and the hour cluster last.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{Rgb, clear};
use crate::gamma::gamma_correct;
use crate::geometry::{hand_positions, marker_positions};
use crate::settings::DisplaySettings;
use crate::tz::{LocalTime, TzRule};
use crate::is_valid_epoch;

/// Renders wall-clock time onto the ring
#[derive(Debug, Clone, Copy)]
pub struct ClockFace {
    tz: TzRule,
}

impl Default for ClockFace {
    fn default() -> Self {
        Self::new(TzRule::UTC)
    }
}

impl ClockFace {
    pub const fn new(tz: TzRule) -> Self {
        Self { tz }
    }

    /// Rule used to turn epochs into local time
    pub const fn tz(&self) -> &TzRule {
        &self.tz
    }

    pub fn set_tz(&mut self, tz: TzRule) {
        #[cfg(feature = "esp32-log")]
        println!("[ClockFace.set_tz] utc offset {}s, dst {}", tz.standard_offset(), tz.has_dst());
        self.tz = tz;
    }

    /// Local time for `epoch`, if the epoch is valid
    pub fn local_time(&self, epoch: i64) -> Option<LocalTime> {
        is_valid_epoch(epoch).then(|| self.tz.local_time(epoch))
    }

    /// Paint the face for `epoch`
    ///
    /// An invalid epoch yields a blank ring and `None`.
    pub fn paint(
        &self,
        epoch: i64,
        settings: &DisplaySettings,
        leds: &mut [Rgb],
    ) -> Option<LocalTime> {
        clear(leds);
        let local = self.local_time(epoch)?;
        let led_count = leds.len();
        let hands = hand_positions(local.dial_time(), led_count, settings.hour_hand_mode)?;

        if settings.show_markers {
            let color = gamma_correct(settings.quadrant_color);
            for index in marker_positions(settings.marker_mode, led_count) {
                leds[index] = color;
            }
        }

        leds[hands.second] = gamma_correct(settings.second_color);
        leds[hands.minute] = gamma_correct(settings.minute_color);

        let hour_color = gamma_correct(settings.hour_color);
        for index in hands.hour_cluster(led_count) {
            leds[index] = hour_color;
        }

        Some(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BLACK;

    // 2024-07-01 12:15:30 UTC
    const NOON: i64 = 1_719_836_130;

    #[test]
    fn invalid_epoch_blanks_the_ring() {
        let face = ClockFace::default();
        let mut leds = [Rgb::new(9, 9, 9); 12];
        assert!(face.paint(0, &DisplaySettings::default(), &mut leds).is_none());
        assert!(leds.iter().all(|&led| led == BLACK));
    }

    #[test]
    fn out_of_range_epoch_blanks_the_ring() {
        let face = ClockFace::new(TzRule::parse("CET-1CEST,M3.5.0,M10.5.0/3").unwrap());
        let mut leds = [Rgb::new(9, 9, 9); 12];
        for epoch in [i64::MAX, crate::MAX_EPOCH + 1] {
            assert!(face.paint(epoch, &DisplaySettings::default(), &mut leds).is_none());
            assert!(leds.iter().all(|&led| led == BLACK));
        }
        assert!(face.local_time(crate::MAX_EPOCH).is_some());
    }

    #[test]
    fn hour_cluster_wins_collisions() {
        let face = ClockFace::default();
        let mut settings = DisplaySettings::default();
        settings.show_markers = false;
        settings.hour_color = Rgb::new(255, 0, 0);
        settings.minute_color = Rgb::new(0, 255, 0);
        settings.second_color = Rgb::new(0, 0, 255);

        let mut leds = [BLACK; 60];
        let local = face.paint(NOON, &settings, &mut leds);
        assert_eq!(local.map(|t| (t.hour, t.minute, t.second)), Some((12, 15, 30)));

        // Hour 12 sits on index 0 with neighbours 59 and 1
        for index in [59, 0, 1] {
            assert_eq!(leds[index], Rgb::new(255, 0, 0));
        }
        assert_eq!(leds[15], Rgb::new(0, 255, 0));
        assert_eq!(leds[30], Rgb::new(0, 0, 255));
        assert_eq!(leds.iter().filter(|&&led| led != BLACK).count(), 5);
    }

    #[test]
    fn empty_ring_is_a_no_op() {
        let face = ClockFace::default();
        let mut leds: [Rgb; 0] = [];
        assert!(face.paint(NOON, &DisplaySettings::default(), &mut leds).is_none());
    }
}
