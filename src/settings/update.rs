//! The single entry point for configuration changes.

use heapless::String;

use super::{DisplaySettings, TimezonePreset};
use crate::color::{Rgb, parse_hex_color};
use crate::geometry::{HourHandMode, MarkerMode};

/// Capacity for raw text input; longer input is dropped before validation
pub const UPDATE_TEXT_CAPACITY: usize = 128;

/// Raw text carried by an update
pub type UpdateText = String<UPDATE_TEXT_CAPACITY>;

/// A validated set of field changes from the configuration form.
///
/// Every field is optional; absent fields are left as they are. Numeric
/// fields carry unchecked values and are clamped or coerced when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub quadrant_color: Option<Rgb>,
    pub hour_color: Option<Rgb>,
    pub minute_color: Option<Rgb>,
    pub second_color: Option<Rgb>,
    pub brightness: Option<i32>,
    pub show_markers: Option<bool>,
    /// Marker count, anything but 4 means 12
    pub marker_mode: Option<u8>,
    /// 1 = continuous, anything else = step
    pub hour_hand_mode: Option<u8>,
    pub ntp_server: Option<UpdateText>,
    pub timezone: Option<TimezonePreset>,
}

/// What applying an update changed beyond the stored fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateEffects {
    /// Timezone rule changed and must be re-applied
    pub timezone_changed: bool,
    /// NTP host changed and a fresh sync is due
    pub ntp_server_changed: bool,
}

impl SettingsUpdate {
    /// Set colors from `#RRGGBB` text; malformed text leaves a field unset
    #[must_use]
    pub fn with_hex_colors(
        mut self,
        quadrants: Option<&str>,
        hour: Option<&str>,
        minute: Option<&str>,
        second: Option<&str>,
    ) -> Self {
        self.quadrant_color = quadrants.and_then(parse_hex_color).or(self.quadrant_color);
        self.hour_color = hour.and_then(parse_hex_color).or(self.hour_color);
        self.minute_color = minute.and_then(parse_hex_color).or(self.minute_color);
        self.second_color = second.and_then(parse_hex_color).or(self.second_color);
        self
    }

    /// Set the NTP host text; input longer than the carrier is dropped
    #[must_use]
    pub fn with_ntp_server(mut self, host: &str) -> Self {
        let mut text = UpdateText::new();
        if text.push_str(host).is_ok() {
            self.ntp_server = Some(text);
        }
        self
    }

    #[must_use]
    pub const fn with_brightness(mut self, brightness: i32) -> Self {
        self.brightness = Some(brightness);
        self
    }

    #[must_use]
    pub const fn with_timezone(mut self, preset: TimezonePreset) -> Self {
        self.timezone = Some(preset);
        self
    }

    /// Check if the update carries any change
    pub const fn is_empty(&self) -> bool {
        self.quadrant_color.is_none()
            && self.hour_color.is_none()
            && self.minute_color.is_none()
            && self.second_color.is_none()
            && self.brightness.is_none()
            && self.show_markers.is_none()
            && self.marker_mode.is_none()
            && self.hour_hand_mode.is_none()
            && self.ntp_server.is_none()
            && self.timezone.is_none()
    }
}

impl DisplaySettings {
    /// Apply an update, clamping and coercing every field.
    ///
    /// Invalid text fields are ignored individually; the rest of the update
    /// still applies.
    pub fn apply(&mut self, update: &SettingsUpdate) -> UpdateEffects {
        if let Some(color) = update.quadrant_color {
            self.quadrant_color = color;
        }
        if let Some(color) = update.hour_color {
            self.hour_color = color;
        }
        if let Some(color) = update.minute_color {
            self.minute_color = color;
        }
        if let Some(color) = update.second_color {
            self.second_color = color;
        }
        if let Some(brightness) = update.brightness {
            self.set_brightness(brightness);
        }
        if let Some(show) = update.show_markers {
            self.show_markers = show;
        }
        if let Some(mode) = update.marker_mode {
            self.marker_mode = MarkerMode::from_raw(mode);
        }
        if let Some(mode) = update.hour_hand_mode {
            self.hour_hand_mode = HourHandMode::from_raw(mode);
        }

        let mut effects = UpdateEffects::default();
        if let Some(host) = &update.ntp_server {
            effects.ntp_server_changed = self.set_ntp_server(host);
        }
        if let Some(preset) = update.timezone {
            effects.timezone_changed = self.set_timezone_rule(preset.rule());
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BLACK;

    #[test]
    fn out_of_range_fields_are_clamped_not_rejected() {
        let mut settings = DisplaySettings::default();
        let update = SettingsUpdate {
            brightness: Some(400),
            marker_mode: Some(5),
            hour_hand_mode: Some(1),
            second_color: Some(BLACK),
            ..Default::default()
        };
        let effects = settings.apply(&update);

        assert_eq!(settings.brightness, 255);
        assert_eq!(settings.marker_mode, MarkerMode::Hours);
        assert_eq!(settings.hour_hand_mode, HourHandMode::Continuous);
        assert_eq!(settings.second_color, BLACK);
        assert_eq!(effects, UpdateEffects::default());
    }

    #[test]
    fn invalid_host_does_not_block_other_fields() {
        let mut settings = DisplaySettings::default();
        let update = SettingsUpdate::default()
            .with_ntp_server("   ")
            .with_brightness(-3)
            .with_timezone(TimezonePreset::Tokyo);
        let effects = settings.apply(&update);

        assert_eq!(settings.ntp_server(), "pool.ntp.org");
        assert_eq!(settings.brightness, 0);
        assert_eq!(settings.timezone_rule(), "JST-9");
        assert!(effects.timezone_changed);
        assert!(!effects.ntp_server_changed);
    }

    #[test]
    fn unchanged_values_report_no_effects() {
        let mut settings = DisplaySettings::default();
        let update = SettingsUpdate::default()
            .with_ntp_server("pool.ntp.org")
            .with_timezone(TimezonePreset::Rome);
        assert_eq!(settings.apply(&update), UpdateEffects::default());
    }

    #[test]
    fn hex_colors_are_parsed() {
        let update =
            SettingsUpdate::default().with_hex_colors(Some("#102030"), Some("bogus"), None, None);
        assert_eq!(update.quadrant_color, Some(Rgb { r: 0x10, g: 0x20, b: 0x30 }));
        assert_eq!(update.hour_color, None);
    }
}
