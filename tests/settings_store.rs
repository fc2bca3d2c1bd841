mod tests {
    use ring_clock_composer::SettingsStorage;
    use ring_clock_composer::color::Rgb;
    use ring_clock_composer::geometry::{HourHandMode, MarkerMode};
    use ring_clock_composer::settings::{
        DisplaySettings, LoadOutcome, RECORD_SIZE, SettingsStore, StoreError, TimezonePreset,
    };

    const OFFSET: usize = 16;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct StorageFault;

    #[derive(Clone)]
    struct MemoryStorage {
        bytes: Vec<u8>,
        committed: Vec<u8>,
        commits: usize,
        fail_read: bool,
        fail_write: bool,
    }

    impl MemoryStorage {
        fn new() -> Self {
            Self {
                bytes: vec![0xFF; 512],
                committed: vec![0xFF; 512],
                commits: 0,
                fail_read: false,
                fail_write: false,
            }
        }
    }

    impl SettingsStorage for MemoryStorage {
        type Error = StorageFault;

        fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageFault> {
            if self.fail_read {
                return Err(StorageFault);
            }
            buf.copy_from_slice(&self.committed[offset..offset + buf.len()]);
            Ok(())
        }

        fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageFault> {
            if self.fail_write {
                return Err(StorageFault);
            }
            self.bytes[offset..offset + data.len()].copy_from_slice(data);
            Ok(())
        }

        fn commit(&mut self) -> Result<(), StorageFault> {
            self.committed.clone_from(&self.bytes);
            self.commits += 1;
            Ok(())
        }
    }

    fn reload(store: &SettingsStore<MemoryStorage>) -> (LoadOutcome, DisplaySettings) {
        let mut reloaded = SettingsStore::new(store.storage().clone(), OFFSET);
        let mut settings = DisplaySettings::default();
        let outcome = reloaded.load(&mut settings);
        (outcome, settings)
    }

    #[test]
    fn test_round_trip_lower_bounds() {
        let host = "a".repeat(63);
        let mut settings = DisplaySettings::default();
        settings.quadrant_color = Rgb::new(1, 2, 3);
        settings.hour_color = Rgb::new(0, 0, 0);
        settings.minute_color = Rgb::new(255, 255, 255);
        settings.second_color = Rgb::new(0x12, 0xAB, 0xEF);
        settings.brightness = 0;
        settings.show_markers = false;
        settings.marker_mode = MarkerMode::Quadrants;
        settings.hour_hand_mode = HourHandMode::Continuous;
        assert!(settings.set_ntp_server(&host));
        assert!(settings.set_timezone_rule(TimezonePreset::Sydney.rule()));

        let mut store = SettingsStore::new(MemoryStorage::new(), OFFSET);
        assert_eq!(store.save(&settings), Ok(()));
        assert_eq!(store.storage().commits, 1);

        let (outcome, reloaded) = reload(&store);
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(reloaded, settings);
        assert_eq!(reloaded.ntp_server().len(), 63);
    }

    #[test]
    fn test_round_trip_upper_bounds() {
        let mut settings = DisplaySettings::default();
        settings.brightness = 255;
        settings.marker_mode = MarkerMode::Hours;

        let mut store = SettingsStore::new(MemoryStorage::new(), OFFSET);
        assert!(store.save(&settings).is_ok());

        let (outcome, reloaded) = reload(&store);
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_overlong_host_is_rejected() {
        let mut settings = DisplaySettings::default();
        assert!(!settings.set_ntp_server(&"b".repeat(64)));
        assert_eq!(settings.ntp_server(), "pool.ntp.org");
    }

    #[test]
    fn test_magic_mismatch_keeps_defaults() {
        let mut settings = DisplaySettings::default();
        settings.brightness = 10;
        settings.show_markers = false;

        let mut store = SettingsStore::new(MemoryStorage::new(), OFFSET);
        assert!(store.save(&settings).is_ok());
        store.storage_mut().committed[OFFSET] ^= 0xFF;

        let (outcome, reloaded) = reload(&store);
        assert_eq!(outcome, LoadOutcome::NoPriorSettings);
        assert_eq!(reloaded, DisplaySettings::default());
    }

    #[test]
    fn test_blank_storage_has_no_prior_settings() {
        let mut store = SettingsStore::new(MemoryStorage::new(), OFFSET);
        let mut settings = DisplaySettings::default();
        assert_eq!(store.load(&mut settings), LoadOutcome::NoPriorSettings);
        assert_eq!(settings, DisplaySettings::default());
    }

    #[test]
    fn test_read_failure_keeps_defaults() {
        let mut storage = MemoryStorage::new();
        storage.fail_read = true;
        let mut store = SettingsStore::new(storage, OFFSET);
        let mut settings = DisplaySettings::default();
        assert_eq!(store.load(&mut settings), LoadOutcome::ReadFailed);
        assert_eq!(settings, DisplaySettings::default());
    }

    #[test]
    fn test_failed_write_is_never_committed() {
        let mut storage = MemoryStorage::new();
        storage.fail_write = true;
        let mut store = SettingsStore::new(storage, OFFSET);

        let result = store.save(&DisplaySettings::default());
        assert_eq!(result, Err(StoreError::Write(StorageFault)));
        assert_eq!(store.storage().commits, 0);
        assert!(store.storage().committed[OFFSET..OFFSET + RECORD_SIZE]
            .iter()
            .all(|&byte| byte == 0xFF));
    }
}
