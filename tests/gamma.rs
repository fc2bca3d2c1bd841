mod tests {
    use ring_clock_composer::color::Rgb;
    use ring_clock_composer::gamma::{gamma_correct, ws2812_lut};

    #[test]
    fn test_lut_is_monotonic() {
        for value in 0..255u8 {
            assert!(ws2812_lut(value) <= ws2812_lut(value + 1), "dip after {value}");
        }
    }

    #[test]
    fn test_gamma_correct_per_channel() {
        let corrected = gamma_correct(Rgb::new(255, 128, 0));
        assert_eq!(corrected, Rgb::new(255, ws2812_lut(128), 0));
    }
}
