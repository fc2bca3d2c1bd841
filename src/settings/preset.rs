//! Named timezone presets offered by the configuration page.

const PRESET_NAME_ROME: &str = "rome";
const PRESET_NAME_LONDON: &str = "london";
const PRESET_NAME_UTC: &str = "utc";
const PRESET_NAME_NEW_YORK: &str = "newyork";
const PRESET_NAME_LOS_ANGELES: &str = "losangeles";
const PRESET_NAME_TOKYO: &str = "tokyo";
const PRESET_NAME_SYDNEY: &str = "sydney";
const PRESET_NAME_BERLIN: &str = "berlin";
const PRESET_NAME_DUBAI: &str = "dubai";
const PRESET_NAME_KOLKATA: &str = "kolkata";
const PRESET_NAME_SHANGHAI: &str = "shanghai";
const PRESET_NAME_MOSCOW: &str = "moscow";

const TZ_ROME: &str = "CET-1CEST,M3.5.0/2,M10.5.0/3";
const TZ_LONDON: &str = "GMT0BST,M3.5.0/1,M10.5.0/2";
const TZ_UTC: &str = "UTC0";
const TZ_NEW_YORK: &str = "EST5EDT,M3.2.0/2,M11.1.0/2";
const TZ_LOS_ANGELES: &str = "PST8PDT,M3.2.0/2,M11.1.0/2";
const TZ_TOKYO: &str = "JST-9";
const TZ_SYDNEY: &str = "AEST-10AEDT,M10.1.0/2,M4.1.0/3";
const TZ_BERLIN: &str = "CET-1CEST,M3.5.0,M10.5.0/3";
const TZ_DUBAI: &str = "GST-4";
const TZ_KOLKATA: &str = "IST-5:30";
const TZ_SHANGHAI: &str = "CST-8";
const TZ_MOSCOW: &str = "MSK-3";

/// Known timezone presets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimezonePreset {
    Rome,
    London,
    Utc,
    NewYork,
    LosAngeles,
    Tokyo,
    Sydney,
    Berlin,
    Dubai,
    Kolkata,
    Shanghai,
    Moscow,
}

impl TimezonePreset {
    /// Preset used when nothing else is configured
    pub const DEFAULT: Self = Self::Rome;

    /// Every preset, in the order the configuration page lists them
    pub const ALL: [Self; 12] = [
        Self::Rome,
        Self::London,
        Self::Utc,
        Self::NewYork,
        Self::LosAngeles,
        Self::Tokyo,
        Self::Sydney,
        Self::Berlin,
        Self::Dubai,
        Self::Kolkata,
        Self::Shanghai,
        Self::Moscow,
    ];

    /// POSIX rule for this preset
    pub const fn rule(self) -> &'static str {
        match self {
            Self::Rome => TZ_ROME,
            Self::London => TZ_LONDON,
            Self::Utc => TZ_UTC,
            Self::NewYork => TZ_NEW_YORK,
            Self::LosAngeles => TZ_LOS_ANGELES,
            Self::Tokyo => TZ_TOKYO,
            Self::Sydney => TZ_SYDNEY,
            Self::Berlin => TZ_BERLIN,
            Self::Dubai => TZ_DUBAI,
            Self::Kolkata => TZ_KOLKATA,
            Self::Shanghai => TZ_SHANGHAI,
            Self::Moscow => TZ_MOSCOW,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rome => PRESET_NAME_ROME,
            Self::London => PRESET_NAME_LONDON,
            Self::Utc => PRESET_NAME_UTC,
            Self::NewYork => PRESET_NAME_NEW_YORK,
            Self::LosAngeles => PRESET_NAME_LOS_ANGELES,
            Self::Tokyo => PRESET_NAME_TOKYO,
            Self::Sydney => PRESET_NAME_SYDNEY,
            Self::Berlin => PRESET_NAME_BERLIN,
            Self::Dubai => PRESET_NAME_DUBAI,
            Self::Kolkata => PRESET_NAME_KOLKATA,
            Self::Shanghai => PRESET_NAME_SHANGHAI,
            Self::Moscow => PRESET_NAME_MOSCOW,
        }
    }

    /// Human readable zone name for the form
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rome => "Europe/Rome",
            Self::London => "Europe/London",
            Self::Utc => "UTC",
            Self::NewYork => "America/New_York",
            Self::LosAngeles => "America/Los_Angeles",
            Self::Tokyo => "Asia/Tokyo",
            Self::Sydney => "Australia/Sydney",
            Self::Berlin => "Europe/Berlin",
            Self::Dubai => "Asia/Dubai",
            Self::Kolkata => "Asia/Kolkata",
            Self::Shanghai => "Asia/Shanghai",
            Self::Moscow => "Europe/Moscow",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.as_str() == s)
    }

    /// Parse a preset name, unknown names select [`Self::DEFAULT`]
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse_from_str(s).unwrap_or(Self::DEFAULT)
    }

    /// Preset whose rule matches exactly
    pub fn from_rule(rule: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.rule() == rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tz::TzRule;

    #[test]
    fn every_preset_rule_parses() {
        for preset in TimezonePreset::ALL {
            assert!(TzRule::parse(preset.rule()).is_ok(), "{}", preset.as_str());
        }
    }

    #[test]
    fn names_round_trip() {
        for preset in TimezonePreset::ALL {
            assert_eq!(TimezonePreset::parse_from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(TimezonePreset::parse_or_default("atlantis"), TimezonePreset::Rome);
    }
}
