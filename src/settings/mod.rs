//! Persisted display and network settings.
//!
//! [`DisplaySettings`] is the single live configuration. Every write path
//! (loading a stored record, applying a configuration update) goes through the
//! same setters, so clamping and coercion are identical on both.

mod preset;
mod store;
mod update;

use heapless::String;

use crate::color::{BLUE, RED, Rgb, WHITE};
use crate::geometry::{HourHandMode, MarkerMode};
use crate::tz::TzRule;

pub use preset::TimezonePreset;
pub use store::{
    LoadOutcome, RECORD_SIZE, SETTINGS_MAGIC, SettingsStore, StoreError, decode_record,
    encode_record,
};
pub use update::{SettingsUpdate, UPDATE_TEXT_CAPACITY, UpdateEffects, UpdateText};

/// Longest NTP host or timezone rule that fits a stored record
pub const MAX_TEXT_LEN: usize = 63;

/// Bounded text stored in the settings record
pub type SettingText = String<MAX_TEXT_LEN>;

pub const DEFAULT_NTP_SERVER: &str = "pool.ntp.org";
pub const DEFAULT_BRIGHTNESS: u8 = 255;

/// Live display and network settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Hour marker color
    pub quadrant_color: Rgb,
    pub hour_color: Rgb,
    pub minute_color: Rgb,
    pub second_color: Rgb,
    /// Output brightness (0-255)
    pub brightness: u8,
    pub show_markers: bool,
    pub marker_mode: MarkerMode,
    pub hour_hand_mode: HourHandMode,
    ntp_server: SettingText,
    timezone_rule: SettingText,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            quadrant_color: WHITE,
            hour_color: RED,
            minute_color: WHITE,
            second_color: BLUE,
            brightness: DEFAULT_BRIGHTNESS,
            show_markers: true,
            marker_mode: MarkerMode::Hours,
            hour_hand_mode: HourHandMode::Step,
            ntp_server: bounded_text(DEFAULT_NTP_SERVER),
            timezone_rule: bounded_text(TimezonePreset::DEFAULT.rule()),
        }
    }
}

impl DisplaySettings {
    /// Primary NTP host
    pub fn ntp_server(&self) -> &str {
        &self.ntp_server
    }

    /// POSIX timezone rule
    pub fn timezone_rule(&self) -> &str {
        &self.timezone_rule
    }

    /// Parsed timezone rule
    ///
    /// Stored rules are validated on write, so this only falls back to UTC if
    /// the rule grammar itself changes.
    pub fn tz(&self) -> TzRule {
        TzRule::parse(&self.timezone_rule).unwrap_or(TzRule::UTC)
    }

    /// Set brightness from unchecked input, clamping to 0-255
    pub fn set_brightness(&mut self, value: i32) {
        self.brightness = clamp_brightness(value);
    }

    /// Set the NTP host.
    ///
    /// Surrounding whitespace is trimmed. Empty or over-long hosts are
    /// rejected and leave the current value untouched. Returns `true` if the
    /// stored host changed.
    pub fn set_ntp_server(&mut self, host: &str) -> bool {
        let Some(host) = sanitize_ntp_server(host) else {
            return false;
        };
        if host == self.ntp_server {
            return false;
        }
        self.ntp_server = host;
        true
    }

    /// Set the timezone rule.
    ///
    /// Rules that do not parse or do not fit are rejected. Returns `true` if
    /// the stored rule changed.
    pub fn set_timezone_rule(&mut self, rule: &str) -> bool {
        let Some(rule) = sanitize_timezone_rule(rule) else {
            return false;
        };
        if rule == self.timezone_rule {
            return false;
        }
        self.timezone_rule = rule;
        true
    }

    /// Preset matching the current rule, if any
    pub fn timezone_preset(&self) -> Option<TimezonePreset> {
        TimezonePreset::from_rule(&self.timezone_rule)
    }
}

/// Clamp unchecked brightness input to the 0-255 range
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn clamp_brightness(value: i32) -> u8 {
    if value < 0 {
        0
    } else if value > 255 {
        255
    } else {
        value as u8
    }
}

/// Validate an NTP host: trimmed, non-empty, at most [`MAX_TEXT_LEN`] bytes,
/// no control characters or inner whitespace
pub fn sanitize_ntp_server(host: &str) -> Option<SettingText> {
    let host = host.trim();
    if host.is_empty() || host.len() > MAX_TEXT_LEN {
        return None;
    }
    if host.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return None;
    }
    Some(bounded_text(host))
}

/// Validate a timezone rule: trimmed, fits the record and parses
pub fn sanitize_timezone_rule(rule: &str) -> Option<SettingText> {
    let rule = rule.trim();
    if rule.len() > MAX_TEXT_LEN {
        return None;
    }
    TzRule::parse(rule).ok()?;
    Some(bounded_text(rule))
}

/// Copy text into a bounded string, truncating at a char boundary
fn bounded_text(text: &str) -> SettingText {
    let mut out = SettingText::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_is_clamped() {
        assert_eq!(clamp_brightness(-5), 0);
        assert_eq!(clamp_brightness(0), 0);
        assert_eq!(clamp_brightness(128), 128);
        assert_eq!(clamp_brightness(255), 255);
        assert_eq!(clamp_brightness(1000), 255);
    }

    #[test]
    fn ntp_server_validation() {
        assert_eq!(sanitize_ntp_server("  time.example.org ").as_deref(), Some("time.example.org"));
        assert!(sanitize_ntp_server("").is_none());
        assert!(sanitize_ntp_server("   ").is_none());
        assert!(sanitize_ntp_server("two words").is_none());

        let longest = "a".repeat(MAX_TEXT_LEN);
        assert!(sanitize_ntp_server(&longest).is_some());
        let too_long = "a".repeat(MAX_TEXT_LEN + 1);
        assert!(sanitize_ntp_server(&too_long).is_none());
    }

    #[test]
    fn rejected_ntp_server_keeps_previous_value() {
        let mut settings = DisplaySettings::default();
        assert!(!settings.set_ntp_server(""));
        assert_eq!(settings.ntp_server(), DEFAULT_NTP_SERVER);
        assert!(settings.set_ntp_server("time.google.com"));
        assert!(!settings.set_ntp_server("time.google.com"));
    }

    #[test]
    fn timezone_rule_must_parse() {
        let mut settings = DisplaySettings::default();
        assert!(!settings.set_timezone_rule("not a rule"));
        assert_eq!(settings.timezone_rule(), TimezonePreset::Rome.rule());
        assert!(settings.set_timezone_rule("UTC0"));
        assert_eq!(settings.timezone_preset(), Some(TimezonePreset::Utc));
    }
}
