//! Ring geometry: maps a time of day onto LED indices.
//!
//! Index 0 is the twelve o'clock pixel and indices grow clockwise. All
//! arithmetic wraps around the ring, and a ring with no LEDs maps to nothing.

use heapless::Vec;

/// Seconds or minutes in one revolution of the minute/second hands
const UNITS_PER_REVOLUTION: usize = 60;

/// Hours on the dial
const HOURS_PER_REVOLUTION: usize = 12;

/// Minute ticks of the hour hand in continuous mode (12 * 60)
const HOUR_TICKS_PER_REVOLUTION: usize = 720;

/// Upper bound on the number of hour markers
pub const MAX_MARKERS: usize = 12;

/// How the hour hand advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourHandMode {
    /// Jumps only on the hour
    #[default]
    Step,
    /// Interpolates between hours using the minutes
    Continuous,
}

/// Number of hour markers painted on the dial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerMode {
    /// Markers at 12, 3, 6 and 9
    Quadrants,
    /// A marker on every hour
    #[default]
    Hours,
}

impl HourHandMode {
    /// Decode a stored value, anything but 1 is `Step`
    pub const fn from_raw(value: u8) -> Self {
        if value == 1 { Self::Continuous } else { Self::Step }
    }

    pub const fn as_raw(self) -> u8 {
        match self {
            Self::Step => 0,
            Self::Continuous => 1,
        }
    }
}

impl MarkerMode {
    /// Decode a stored marker count, anything but 4 is `Hours`
    pub const fn from_raw(value: u8) -> Self {
        if value == 4 { Self::Quadrants } else { Self::Hours }
    }

    /// Number of markers on the dial (4 or 12)
    pub const fn count(self) -> u8 {
        match self {
            Self::Quadrants => 4,
            Self::Hours => 12,
        }
    }
}

/// Time of day reduced to what the dial needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DialTime {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Hour folded onto the 12-hour dial
    pub const fn hour12(self) -> u8 {
        self.hour % 12
    }
}

/// LED indices of the three hands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandPositions {
    pub second: usize,
    pub minute: usize,
    /// Center of the hour cluster
    pub hour: usize,
}

impl HandPositions {
    /// The three pixels of the hour hand, centered on `hour`
    pub fn hour_cluster(self, led_count: usize) -> [usize; 3] {
        // Ring indices always fit in i64
        #[allow(clippy::cast_possible_wrap)]
        let center = self.hour as i64;
        [
            wrap_index(center - 1, led_count),
            self.hour,
            wrap_index(center + 1, led_count),
        ]
    }
}

/// Wrap any index, including negative ones, onto the ring
///
/// Returns 0 for an empty ring.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub const fn wrap_index(index: i64, led_count: usize) -> usize {
    if led_count == 0 {
        return 0;
    }
    index.rem_euclid(led_count as i64) as usize
}

/// Scale `position` out of `range` onto the ring
const fn scale_to_ring(position: usize, range: usize, led_count: usize) -> usize {
    (position * led_count / range) % led_count
}

/// Map a time of day onto hand indices
///
/// Returns `None` when the ring has no LEDs.
pub fn hand_positions(
    time: DialTime,
    led_count: usize,
    mode: HourHandMode,
) -> Option<HandPositions> {
    if led_count == 0 {
        return None;
    }

    let second = usize::from(time.second) % UNITS_PER_REVOLUTION;
    let minute = usize::from(time.minute) % UNITS_PER_REVOLUTION;
    let hour12 = usize::from(time.hour12());

    let hour = match mode {
        HourHandMode::Step => scale_to_ring(hour12, HOURS_PER_REVOLUTION, led_count),
        HourHandMode::Continuous => scale_to_ring(
            hour12 * UNITS_PER_REVOLUTION + minute,
            HOUR_TICKS_PER_REVOLUTION,
            led_count,
        ),
    };

    Some(HandPositions {
        second: scale_to_ring(second, UNITS_PER_REVOLUTION, led_count),
        minute: scale_to_ring(minute, UNITS_PER_REVOLUTION, led_count),
        hour,
    })
}

/// Evenly spaced marker indices, starting at twelve o'clock
///
/// Empty when the ring has no LEDs.
pub fn marker_positions(mode: MarkerMode, led_count: usize) -> Vec<usize, MAX_MARKERS> {
    let mut markers = Vec::new();
    if led_count == 0 {
        return markers;
    }

    let count = usize::from(mode.count());
    for i in 0..count {
        let _ = markers.push(scale_to_ring(i, count, led_count));
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_handles_negative_and_overflowing_indices() {
        assert_eq!(wrap_index(-1, 60), 59);
        assert_eq!(wrap_index(-61, 60), 59);
        assert_eq!(wrap_index(60, 60), 0);
        assert_eq!(wrap_index(125, 60), 5);
        assert_eq!(wrap_index(7, 0), 0);
    }

    #[test]
    fn wrap_stays_in_range() {
        for led_count in 1..=64usize {
            for index in -200i64..200 {
                assert!(wrap_index(index, led_count) < led_count);
            }
        }
    }

    #[test]
    fn hour_cluster_wraps_at_twelve() {
        let hands = hand_positions(DialTime::new(0, 0, 0), 60, HourHandMode::Step);
        let cluster = hands.map(|h| h.hour_cluster(60));
        assert_eq!(cluster, Some([59, 0, 1]));
    }

    #[test]
    fn empty_ring_maps_to_nothing() {
        assert_eq!(hand_positions(DialTime::new(3, 30, 30), 0, HourHandMode::Step), None);
        assert!(marker_positions(MarkerMode::Hours, 0).is_empty());
    }

    #[test]
    fn small_ring_scales_down() {
        let hands = hand_positions(DialTime::new(6, 45, 59), 12, HourHandMode::Step).unwrap();
        assert_eq!(hands.second, 11);
        assert_eq!(hands.minute, 9);
        assert_eq!(hands.hour, 6);
    }
}
