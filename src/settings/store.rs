//! Fixed-size settings record and its byte-region persistence.
//!
//! Record layout (little-endian, [`RECORD_SIZE`] bytes):
//!
//! | offset | size | field                              |
//! |--------|------|------------------------------------|
//! | 0      | 4    | magic                              |
//! | 4      | 16   | marker, hour, minute, second color |
//! | 20     | 1    | brightness                         |
//! | 21     | 1    | show markers (0/1)                 |
//! | 22     | 1    | marker count (4/12)                |
//! | 23     | 1    | hour hand mode (0/1)               |
//! | 24     | 64   | NTP host, NUL terminated           |
//! | 88     | 64   | timezone rule, NUL terminated      |

use core::fmt;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{DisplaySettings, MAX_TEXT_LEN};
use crate::SettingsStorage;
use crate::color::{rgb_from_u32, rgb_to_u32};
use crate::geometry::{HourHandMode, MarkerMode};

/// Format-version tag of the current record layout
pub const SETTINGS_MAGIC: u32 = 0xC10C_2029;

const TEXT_FIELD_SIZE: usize = MAX_TEXT_LEN + 1;

const MAGIC_OFFSET: usize = 0;
const COLORS_OFFSET: usize = 4;
const BRIGHTNESS_OFFSET: usize = 20;
const SHOW_MARKERS_OFFSET: usize = 21;
const MARKER_MODE_OFFSET: usize = 22;
const HOUR_HAND_MODE_OFFSET: usize = 23;
const NTP_SERVER_OFFSET: usize = 24;
const TIMEZONE_OFFSET: usize = NTP_SERVER_OFFSET + TEXT_FIELD_SIZE;

/// Size of one encoded settings record
pub const RECORD_SIZE: usize = TIMEZONE_OFFSET + TEXT_FIELD_SIZE;

/// Result of loading settings at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A valid record replaced the live settings
    Loaded,
    /// No record with the current magic exists, defaults kept
    NoPriorSettings,
    /// The storage could not be read, defaults kept
    ReadFailed,
}

/// Error returned when persisting settings fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError<E> {
    /// Writing the record bytes failed, nothing was committed
    Write(E),
    /// The record was written but the commit failed
    Commit(E),
}

impl<E: fmt::Debug> fmt::Display for StoreError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write(e) => write!(f, "settings write failed: {e:?}"),
            Self::Commit(e) => write!(f, "settings commit failed: {e:?}"),
        }
    }
}

/// Settings persistence on top of a byte-region store
pub struct SettingsStore<S: SettingsStorage> {
    storage: S,
    offset: usize,
}

impl<S: SettingsStorage> SettingsStore<S> {
    /// Create a store keeping its record at `offset` in `storage`
    pub const fn new(storage: S, offset: usize) -> Self {
        Self { storage, offset }
    }

    /// Load the stored record into `settings`.
    ///
    /// `settings` is only touched when the record carries the current magic.
    /// Individual fields that fail validation keep their current value.
    pub fn load(&mut self, settings: &mut DisplaySettings) -> LoadOutcome {
        let mut record = [0u8; RECORD_SIZE];
        if self.storage.read(self.offset, &mut record).is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[SettingsStore.load] read failed, using defaults");
            return LoadOutcome::ReadFailed;
        }

        if !decode_record(&record, settings) {
            #[cfg(feature = "esp32-log")]
            println!("[SettingsStore.load] no saved settings found, using defaults");
            return LoadOutcome::NoPriorSettings;
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[SettingsStore.load] loaded NTP {} TZ {}",
            settings.ntp_server(),
            settings.timezone_rule()
        );
        LoadOutcome::Loaded
    }

    /// Write the full record and commit it.
    ///
    /// The record is encoded up front and written in one call, and nothing is
    /// committed if the write fails.
    pub fn save(&mut self, settings: &DisplaySettings) -> Result<(), StoreError<S::Error>> {
        let record = encode_record(settings);
        self.storage
            .write(self.offset, &record)
            .map_err(StoreError::Write)?;
        self.storage.commit().map_err(StoreError::Commit)?;

        #[cfg(feature = "esp32-log")]
        println!("[SettingsStore.save] settings saved");
        Ok(())
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

/// Encode settings into a record stamped with [`SETTINGS_MAGIC`]
pub fn encode_record(settings: &DisplaySettings) -> [u8; RECORD_SIZE] {
    let mut record = [0u8; RECORD_SIZE];
    put_u32(&mut record, MAGIC_OFFSET, SETTINGS_MAGIC);

    let colors = [
        settings.quadrant_color,
        settings.hour_color,
        settings.minute_color,
        settings.second_color,
    ];
    for (i, color) in colors.into_iter().enumerate() {
        put_u32(&mut record, COLORS_OFFSET + i * 4, rgb_to_u32(color));
    }

    record[BRIGHTNESS_OFFSET] = settings.brightness;
    record[SHOW_MARKERS_OFFSET] = u8::from(settings.show_markers);
    record[MARKER_MODE_OFFSET] = settings.marker_mode.count();
    record[HOUR_HAND_MODE_OFFSET] = settings.hour_hand_mode.as_raw();
    put_text(&mut record, NTP_SERVER_OFFSET, settings.ntp_server());
    put_text(&mut record, TIMEZONE_OFFSET, settings.timezone_rule());

    record
}

/// Decode a record into `settings`.
///
/// Returns `false` without touching `settings` if the magic does not match.
pub fn decode_record(record: &[u8; RECORD_SIZE], settings: &mut DisplaySettings) -> bool {
    if get_u32(record, MAGIC_OFFSET) != SETTINGS_MAGIC {
        return false;
    }

    let mut decoded = DisplaySettings::default();
    decoded.quadrant_color = rgb_from_u32(get_u32(record, COLORS_OFFSET));
    decoded.hour_color = rgb_from_u32(get_u32(record, COLORS_OFFSET + 4));
    decoded.minute_color = rgb_from_u32(get_u32(record, COLORS_OFFSET + 8));
    decoded.second_color = rgb_from_u32(get_u32(record, COLORS_OFFSET + 12));
    decoded.set_brightness(i32::from(record[BRIGHTNESS_OFFSET]));
    decoded.show_markers = record[SHOW_MARKERS_OFFSET] != 0;
    decoded.marker_mode = MarkerMode::from_raw(record[MARKER_MODE_OFFSET]);
    decoded.hour_hand_mode = HourHandMode::from_raw(record[HOUR_HAND_MODE_OFFSET]);
    if let Some(host) = get_text(record, NTP_SERVER_OFFSET) {
        decoded.set_ntp_server(host);
    }
    if let Some(rule) = get_text(record, TIMEZONE_OFFSET) {
        decoded.set_timezone_rule(rule);
    }

    *settings = decoded;
    true
}

fn put_u32(record: &mut [u8], offset: usize, value: u32) {
    record[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn get_u32(record: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&record[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

/// Write NUL-terminated text, the rest of the field stays zeroed
fn put_text(record: &mut [u8], offset: usize, text: &str) {
    let bytes = text.as_bytes();
    let len = bytes.len().min(MAX_TEXT_LEN);
    record[offset..offset + len].copy_from_slice(&bytes[..len]);
}

/// Read NUL-terminated text; `None` if unterminated or not UTF-8
fn get_text(record: &[u8], offset: usize) -> Option<&str> {
    let field = &record[offset..offset + TEXT_FIELD_SIZE];
    let len = field.iter().position(|&b| b == 0)?;
    core::str::from_utf8(&field[..len]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_layout_is_stable() {
        assert_eq!(RECORD_SIZE, 152);
        let record = encode_record(&DisplaySettings::default());
        assert_eq!(&record[0..4], &SETTINGS_MAGIC.to_le_bytes());
        assert_eq!(record[BRIGHTNESS_OFFSET], 255);
        assert_eq!(record[MARKER_MODE_OFFSET], 12);
        assert_eq!(&record[NTP_SERVER_OFFSET..NTP_SERVER_OFFSET + 13], b"pool.ntp.org\0");
    }

    #[test]
    fn unterminated_text_keeps_default() {
        let mut record = encode_record(&DisplaySettings::default());
        for byte in &mut record[NTP_SERVER_OFFSET..TIMEZONE_OFFSET] {
            *byte = b'x';
        }
        let mut settings = DisplaySettings::default();
        assert!(decode_record(&record, &mut settings));
        assert_eq!(settings.ntp_server(), super::super::DEFAULT_NTP_SERVER);
    }

    #[test]
    fn stored_enums_are_coerced() {
        let mut record = encode_record(&DisplaySettings::default());
        record[MARKER_MODE_OFFSET] = 7;
        record[HOUR_HAND_MODE_OFFSET] = 9;
        let mut settings = DisplaySettings::default();
        assert!(decode_record(&record, &mut settings));
        assert_eq!(settings.marker_mode, MarkerMode::Hours);
        assert_eq!(settings.hour_hand_mode, HourHandMode::Step);
    }
}
