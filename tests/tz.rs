mod tests {
    use ring_clock_composer::settings::TimezonePreset;
    use ring_clock_composer::tz::{TzError, TzRule};
    use ring_clock_composer::{MAX_EPOCH, is_valid_epoch};

    fn rule(preset: TimezonePreset) -> TzRule {
        TzRule::parse(preset.rule()).unwrap()
    }

    fn hms(rule: &TzRule, epoch: i64) -> (u8, u8, u8, bool) {
        let local = rule.local_time(epoch);
        (local.hour, local.minute, local.second, local.is_dst)
    }

    #[test]
    fn test_rome_summer_and_winter() {
        let rome = rule(TimezonePreset::Rome);
        // 2024-07-01 12:00 UTC, a Monday
        let summer = rome.local_time(1_719_835_200);
        assert_eq!((summer.hour, summer.is_dst, summer.weekday), (14, true, 1));
        // 2024-01-15 12:00 UTC
        assert_eq!(hms(&rome, 1_705_320_000), (13, 0, 0, false));
    }

    #[test]
    fn test_rome_transitions() {
        let rome = rule(TimezonePreset::Rome);
        assert_eq!(hms(&rome, 1_711_846_799), (1, 59, 59, false));
        assert_eq!(hms(&rome, 1_711_846_800), (3, 0, 0, true));
        assert_eq!(hms(&rome, 1_729_990_799), (2, 59, 59, true));
        assert_eq!(hms(&rome, 1_729_990_800), (2, 0, 0, false));
    }

    #[test]
    fn test_southern_hemisphere() {
        let sydney = rule(TimezonePreset::Sydney);
        // 2024-01-10 00:00 UTC
        assert_eq!(hms(&sydney, 1_704_844_800), (11, 0, 0, true));
    }

    #[test]
    fn test_new_york() {
        let new_york = rule(TimezonePreset::NewYork);
        // 2024-07-04 16:30 UTC
        assert_eq!(hms(&new_york, 1_720_110_600), (12, 30, 0, true));
    }

    #[test]
    fn test_half_hour_offset_crosses_leap_day() {
        let kolkata = rule(TimezonePreset::Kolkata);
        let local = kolkata.local_time(1_709_251_199);
        assert_eq!((local.year, local.month, local.day), (2024, 3, 1));
        assert_eq!((local.hour, local.minute, local.second), (5, 29, 59));
    }

    #[test]
    fn test_epoch_zero() {
        let local = TzRule::parse("UTC0").unwrap().local_time(0);
        assert_eq!((local.year, local.month, local.day, local.weekday), (1970, 1, 1, 4));
    }

    #[test]
    fn test_extreme_epochs_do_not_panic() {
        let rome = rule(TimezonePreset::Rome);
        rome.local_time(i64::MAX);
        rome.local_time(i64::MIN);
        rule(TimezonePreset::Sydney).utc_offset_at(i64::MAX);
    }

    #[test]
    fn test_last_supported_epoch() {
        let local = TzRule::UTC.local_time(MAX_EPOCH);
        assert_eq!((local.year, local.month, local.day), (9999, 12, 31));
        assert_eq!((local.hour, local.minute, local.second), (23, 59, 59));
        assert!(is_valid_epoch(MAX_EPOCH));
        assert!(!is_valid_epoch(MAX_EPOCH + 1));
        assert!(!is_valid_epoch(i64::MAX));
    }

    #[test]
    fn test_all_presets_parse() {
        for preset in TimezonePreset::ALL {
            assert!(TzRule::parse(preset.rule()).is_ok(), "{}", preset.as_str());
        }
    }

    #[test]
    fn test_malformed_rules() {
        assert_eq!(TzRule::parse(""), Err(TzError::Empty));
        assert!(TzRule::parse("CET").is_err());
        assert!(TzRule::parse("CET-1CEST,M3.5").is_err());
    }
}
