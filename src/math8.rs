use crate::color::Rgb;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Same rounding as the NeoPixel brightness control, so `scale8(v, 255) == v`.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Scale every channel of a color
#[inline]
pub const fn scale_rgb(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Scale a whole frame in place
pub fn scale_frame(frame: &mut [Rgb], scale: u8) {
    if scale == 255 {
        return;
    }
    for pixel in frame {
        *pixel = scale_rgb(*pixel, scale);
    }
}
