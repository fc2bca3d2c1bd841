//! POSIX `TZ` rules and local time conversion.
//!
//! Understands the subset of the POSIX grammar used by the timezone presets
//! and by most firmware configurations:
//!
//! ```text
//! std offset [dst [offset] [,start[/time],end[/time]]]
//! ```
//!
//! Offsets follow the POSIX sign convention (positive means west of UTC).
//! Transition dates may be `Mm.w.d`, `Jn` or `n`.

use core::fmt;

use crate::geometry::DialTime;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i32 = 3_600;

/// Transition time when a rule omits `/time`
const DEFAULT_TRANSITION_TIME: i32 = 2 * SECONDS_PER_HOUR;

/// Largest accepted offset or transition time (POSIX allows up to 24h/167h)
const MAX_OFFSET_HOURS: i32 = 24;
const MAX_TRANSITION_HOURS: i32 = 167;

/// Errors returned while parsing a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TzError {
    /// The rule is empty
    Empty,
    /// A zone abbreviation is missing or malformed
    InvalidName,
    /// A UTC offset is missing or out of range
    InvalidOffset,
    /// A DST transition date or time is malformed
    InvalidTransition,
    /// Unexpected text after a complete rule
    TrailingInput,
}

impl fmt::Display for TzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::Empty => "empty timezone rule",
            Self::InvalidName => "invalid zone abbreviation",
            Self::InvalidOffset => "invalid UTC offset",
            Self::InvalidTransition => "invalid DST transition",
            Self::TrailingInput => "unexpected text after timezone rule",
        };
        f.write_str(message)
    }
}

/// Day on which a DST transition happens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionDate {
    /// `Mm.w.d`: weekday `d` (0 = Sunday) of week `w` (5 = last) of month `m`
    MonthWeekDay { month: u8, week: u8, weekday: u8 },
    /// `Jn`: day 1..=365, February 29 is never counted
    JulianNoLeap(u16),
    /// `n`: zero-based day 0..=365, February 29 counted in leap years
    ZeroBased(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Transition {
    date: TransitionDate,
    /// Seconds after local midnight
    time: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DaylightSaving {
    /// Seconds east of UTC while DST is active
    utc_offset: i32,
    start: Transition,
    end: Transition,
}

/// Parsed timezone rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TzRule {
    /// Seconds east of UTC for standard time
    utc_offset: i32,
    dst: Option<DaylightSaving>,
}

/// Broken-down local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub year: i32,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// 0 = Sunday
    pub weekday: u8,
    pub is_dst: bool,
}

impl LocalTime {
    /// Time of day as seen by the dial
    pub const fn dial_time(&self) -> DialTime {
        DialTime::new(self.hour, self.minute, self.second)
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl TzRule {
    /// Coordinated Universal Time, no DST
    pub const UTC: Self = Self {
        utc_offset: 0,
        dst: None,
    };

    /// Parse a POSIX `TZ` string
    pub fn parse(rule: &str) -> Result<Self, TzError> {
        let rule = rule.trim();
        if rule.is_empty() {
            return Err(TzError::Empty);
        }

        let mut cursor = Cursor::new(rule.as_bytes());
        cursor.name()?;
        let utc_offset = -cursor.offset(MAX_OFFSET_HOURS).ok_or(TzError::InvalidOffset)?;

        if cursor.is_done() {
            return Ok(Self {
                utc_offset,
                dst: None,
            });
        }

        cursor.name()?;
        let dst_offset = if cursor.peek_is_offset() {
            -cursor.offset(MAX_OFFSET_HOURS).ok_or(TzError::InvalidOffset)?
        } else {
            utc_offset + SECONDS_PER_HOUR
        };

        let (start, end) = if cursor.eat(b',') {
            let start = cursor.transition()?;
            if !cursor.eat(b',') {
                return Err(TzError::InvalidTransition);
            }
            (start, cursor.transition()?)
        } else {
            // US rules are the POSIX default
            (
                Transition {
                    date: TransitionDate::MonthWeekDay {
                        month: 3,
                        week: 2,
                        weekday: 0,
                    },
                    time: DEFAULT_TRANSITION_TIME,
                },
                Transition {
                    date: TransitionDate::MonthWeekDay {
                        month: 11,
                        week: 1,
                        weekday: 0,
                    },
                    time: DEFAULT_TRANSITION_TIME,
                },
            )
        };

        if !cursor.is_done() {
            return Err(TzError::TrailingInput);
        }

        Ok(Self {
            utc_offset,
            dst: Some(DaylightSaving {
                utc_offset: dst_offset,
                start,
                end,
            }),
        })
    }

    /// Seconds east of UTC for standard time
    pub const fn standard_offset(&self) -> i32 {
        self.utc_offset
    }

    /// Whether the rule observes daylight saving time at all
    pub const fn has_dst(&self) -> bool {
        self.dst.is_some()
    }

    /// Seconds east of UTC at the given instant, and whether DST applies
    pub fn utc_offset_at(&self, epoch: i64) -> (i32, bool) {
        let Some(dst) = self.dst else {
            return (self.utc_offset, false);
        };

        let local = epoch.saturating_add(i64::from(self.utc_offset));
        let (year, _, _) = civil_from_days(local.div_euclid(SECONDS_PER_DAY));
        // Start is expressed in standard time, end in daylight time
        let start = dst.start.utc_seconds(year, self.utc_offset);
        let end = dst.end.utc_seconds(year, dst.utc_offset);

        let in_dst = if start <= end {
            epoch >= start && epoch < end
        } else {
            // Southern hemisphere: DST spans the new year
            epoch >= start || epoch < end
        };

        if in_dst {
            (dst.utc_offset, true)
        } else {
            (self.utc_offset, false)
        }
    }

    /// Convert seconds since the Unix epoch into local time
    ///
    /// Never panics; years outside the `i32` range wrap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn local_time(&self, epoch: i64) -> LocalTime {
        let (offset, is_dst) = self.utc_offset_at(epoch);
        let local = epoch.saturating_add(i64::from(offset));
        let days = local.div_euclid(SECONDS_PER_DAY);
        let seconds_of_day = local.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(days);

        LocalTime {
            year,
            month,
            day,
            hour: (seconds_of_day / 3_600) as u8,
            minute: ((seconds_of_day / 60) % 60) as u8,
            second: (seconds_of_day % 60) as u8,
            weekday: weekday(days),
            is_dst,
        }
    }
}

impl Transition {
    /// UTC instant of this transition in `year`, given the offset in force
    /// just before it
    fn utc_seconds(self, year: i32, utc_offset_before: i32) -> i64 {
        let day = self.date.day_number(year);
        day * SECONDS_PER_DAY + i64::from(self.time) - i64::from(utc_offset_before)
    }
}

impl TransitionDate {
    /// Days since 1970-01-01 of the transition day in `year`
    fn day_number(self, year: i32) -> i64 {
        match self {
            Self::MonthWeekDay {
                month,
                week,
                weekday: target,
            } => {
                let first = days_from_civil(year, month, 1);
                let first_weekday = weekday(first);
                let mut day = 1 + (7 + target - first_weekday) % 7 + (week - 1) * 7;
                while day > days_in_month(year, month) {
                    day -= 7;
                }
                first + i64::from(day) - 1
            }
            Self::JulianNoLeap(n) => {
                let mut day = i64::from(n) - 1;
                if is_leap_year(year) && n >= 60 {
                    day += 1;
                }
                days_from_civil(year, 1, 1) + day
            }
            Self::ZeroBased(n) => days_from_civil(year, 1, 1) + i64::from(n),
        }
    }
}

/// Byte cursor over a rule string
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    const fn is_done(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn peek_is_offset(&self) -> bool {
        matches!(self.peek(), Some(b'+' | b'-' | b'0'..=b'9'))
    }

    /// Zone abbreviation: three or more letters, or any text in `<...>`
    fn name(&mut self) -> Result<(), TzError> {
        if self.eat(b'<') {
            let start = self.pos;
            while let Some(byte) = self.peek() {
                if byte == b'>' {
                    break;
                }
                self.pos += 1;
            }
            if self.pos == start || !self.eat(b'>') {
                return Err(TzError::InvalidName);
            }
            return Ok(());
        }

        let start = self.pos;
        while matches!(self.peek(), Some(byte) if byte.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        if self.pos - start < 3 {
            return Err(TzError::InvalidName);
        }
        Ok(())
    }

    /// Unsigned decimal number with at most `max_digits` digits
    fn number(&mut self, max_digits: usize) -> Option<i32> {
        let start = self.pos;
        let mut value: i32 = 0;
        while let Some(byte) = self.peek() {
            if !byte.is_ascii_digit() || self.pos - start == max_digits {
                break;
            }
            value = value * 10 + i32::from(byte - b'0');
            self.pos += 1;
        }
        (self.pos > start).then_some(value)
    }

    /// `[+-]hh[:mm[:ss]]` in seconds
    fn offset(&mut self, max_hours: i32) -> Option<i32> {
        let sign = if self.eat(b'-') {
            -1
        } else {
            self.eat(b'+');
            1
        };

        let hours = self.number(3)?;
        let mut seconds = hours * SECONDS_PER_HOUR;
        if self.eat(b':') {
            let minutes = self.number(2).filter(|m| *m < 60)?;
            seconds += minutes * 60;
            if self.eat(b':') {
                seconds += self.number(2).filter(|s| *s < 60)?;
            }
        }

        (hours <= max_hours).then_some(sign * seconds)
    }

    /// `date[/time]`
    fn transition(&mut self) -> Result<Transition, TzError> {
        let date = self.transition_date().ok_or(TzError::InvalidTransition)?;
        let time = if self.eat(b'/') {
            self.offset(MAX_TRANSITION_HOURS)
                .ok_or(TzError::InvalidTransition)?
        } else {
            DEFAULT_TRANSITION_TIME
        };
        Ok(Transition { date, time })
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn transition_date(&mut self) -> Option<TransitionDate> {
        if self.eat(b'M') {
            let month = self.number(2).filter(|m| (1..=12).contains(m))?;
            if !self.eat(b'.') {
                return None;
            }
            let week = self.number(1).filter(|w| (1..=5).contains(w))?;
            if !self.eat(b'.') {
                return None;
            }
            let weekday = self.number(1).filter(|d| (0..=6).contains(d))?;
            return Some(TransitionDate::MonthWeekDay {
                month: month as u8,
                week: week as u8,
                weekday: weekday as u8,
            });
        }

        if self.eat(b'J') {
            let day = self.number(3).filter(|n| (1..=365).contains(n))?;
            return Some(TransitionDate::JulianNoLeap(day as u16));
        }

        let day = self.number(3).filter(|n| (0..=365).contains(n))?;
        Some(TransitionDate::ZeroBased(day as u16))
    }
}

const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// 0 = Sunday; 1970-01-01 was a Thursday
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn weekday(days: i64) -> u8 {
    (days + 4).rem_euclid(7) as u8
}

/// Days since 1970-01-01 for a proleptic Gregorian date
fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let month = i64::from(month);
    let year = i64::from(year) - i64::from(month <= 2);
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Proleptic Gregorian date for days since 1970-01-01
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let shifted = days + 719_468;
    let era = shifted.div_euclid(146_097);
    let day_of_era = shifted - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year as i32, month as u8, day as u8)
}
