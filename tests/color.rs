mod tests {
    use ring_clock_composer::color::{
        BLACK, Rgb, clear, fill, format_hex_color, parse_hex_color, rgb_from_u32, rgb_to_u32,
    };
    use ring_clock_composer::settings::{DisplaySettings, SettingsUpdate};

    const ORANGE: Rgb = Rgb { r: 255, g: 128, b: 0 };

    #[test]
    fn test_packed_colors() {
        assert_eq!(rgb_to_u32(ORANGE), 0x00FF_8000);
        assert_eq!(rgb_from_u32(0x00FF_8000), ORANGE);
        // The top byte is ignored
        assert_eq!(rgb_from_u32(0xAAFF_8000), ORANGE);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut leds = [BLACK; 5];
        fill(&mut leds, ORANGE);
        assert!(leds.iter().all(|&led| led == ORANGE));
        clear(&mut leds);
        assert!(leds.iter().all(|&led| led == BLACK));
    }

    #[test]
    fn test_form_colors_round_trip_through_hex() {
        let settings = DisplaySettings::default();
        let text = format_hex_color(settings.hour_color);
        assert_eq!(text.as_str(), "#FF0000");
        assert_eq!(parse_hex_color(&text), Some(settings.hour_color));
    }

    #[test]
    fn test_invalid_hex_leaves_field_unset() {
        let update = SettingsUpdate::default().with_hex_colors(
            Some("#12345"),
            Some("#00FF00"),
            None,
            Some("zz"),
        );
        assert_eq!(update.quadrant_color, None);
        assert_eq!(update.hour_color, Some(Rgb { r: 0, g: 255, b: 0 }));
        assert_eq!(update.second_color, None);

        let mut settings = DisplaySettings::default();
        settings.apply(&update);
        assert_eq!(settings.quadrant_color, DisplaySettings::default().quadrant_color);
        assert_eq!(settings.hour_color, Rgb { r: 0, g: 255, b: 0 });
    }
}
