mod tests {
    use ring_clock_composer::geometry::{
        DialTime, HourHandMode, MarkerMode, hand_positions, marker_positions, wrap_index,
    };

    #[test]
    fn test_wrap_index_stays_on_ring() {
        for led_count in 1..=64usize {
            for index in -200i64..200 {
                assert!(wrap_index(index, led_count) < led_count);
            }
        }
        assert_eq!(wrap_index(-1, 60), 59);
        assert_eq!(wrap_index(60, 60), 0);
    }

    #[test]
    fn test_second_and_minute_share_scale() {
        let hands = hand_positions(DialTime::new(0, 30, 30), 60, HourHandMode::Step).unwrap();
        assert_eq!(hands.second, 30);
        assert_eq!(hands.minute, 30);
    }

    #[test]
    fn test_step_hour_ignores_minutes() {
        for minute in [0, 15, 59] {
            let hands =
                hand_positions(DialTime::new(3, minute, 0), 60, HourHandMode::Step).unwrap();
            assert_eq!(hands.hour, 15);
        }
        // Afternoon folds onto the same dial
        let hands = hand_positions(DialTime::new(15, 0, 0), 60, HourHandMode::Step).unwrap();
        assert_eq!(hands.hour, 15);
    }

    #[test]
    fn test_continuous_hour_advances_with_minutes() {
        let hands = hand_positions(DialTime::new(3, 30, 0), 60, HourHandMode::Continuous).unwrap();
        assert_eq!(hands.hour, 17);
    }

    #[test]
    fn test_hour_cluster_wraps() {
        let hands = hand_positions(DialTime::new(0, 0, 0), 24, HourHandMode::Step).unwrap();
        assert_eq!(hands.hour_cluster(24), [23, 0, 1]);
    }

    #[test]
    fn test_markers() {
        assert_eq!(marker_positions(MarkerMode::Quadrants, 60).as_slice(), &[0, 15, 30, 45]);
        assert_eq!(marker_positions(MarkerMode::Hours, 24).len(), 12);
        assert_eq!(marker_positions(MarkerMode::Hours, 24)[1], 2);
    }

    #[test]
    fn test_empty_ring() {
        assert!(hand_positions(DialTime::new(3, 30, 30), 0, HourHandMode::Continuous).is_none());
        assert!(marker_positions(MarkerMode::Hours, 0).is_empty());
        assert_eq!(wrap_index(-5, 0), 0);
    }
}
