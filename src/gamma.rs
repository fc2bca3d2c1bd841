//! Perceptual gamma correction for WS2812 output.
//!
//! LEDs respond linearly to PWM duty while the eye does not, so colors are
//! pushed through the `smart-leds` gamma 2.8 curve before they reach the strip.

use crate::color::Rgb;

/// Gamma-correct every channel of a color
#[inline]
pub fn gamma_correct(color: Rgb) -> Rgb {
    smart_leds::gamma(core::iter::once(color)).next().unwrap_or(color)
}

/// Gamma-correct one channel value
#[inline]
pub fn ws2812_lut(value: u8) -> u8 {
    gamma_correct(Rgb::new(value, value, value)).r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        assert_eq!(ws2812_lut(0), 0);
        assert_eq!(ws2812_lut(255), 255);
    }

    #[test]
    fn curve_darkens_midtones() {
        assert!(ws2812_lut(128) < 64);
    }

    #[test]
    fn matches_the_strip_adaptor() {
        let color = Rgb::new(200, 90, 7);
        let expected: Rgb = smart_leds::gamma([color].into_iter()).next().unwrap();
        assert_eq!(gamma_correct(color), expected);
    }
}
