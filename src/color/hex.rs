//! Hex text colors used by the configuration form (`#RRGGBB`).

use heapless::String;

use super::{Rgb, rgb_from_u32};

/// Formatted `#RRGGBB` color
pub type HexColor = String<7>;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Parse a `#RRGGBB` color.
///
/// The leading `#` is optional and digits are case-insensitive. Surrounding
/// whitespace is ignored. Returns `None` for anything that is not exactly six
/// hex digits.
pub fn parse_hex_color(text: &str) -> Option<Rgb> {
    let text = text.trim();
    let digits = text.strip_prefix('#').unwrap_or(text);
    if digits.len() != 6 {
        return None;
    }

    let mut packed: u32 = 0;
    for byte in digits.bytes() {
        let nibble = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'f' => byte - b'a' + 10,
            b'A'..=b'F' => byte - b'A' + 10,
            _ => return None,
        };
        packed = (packed << 4) | u32::from(nibble);
    }

    Some(rgb_from_u32(packed))
}

/// Format a color as `#RRGGBB` with uppercase digits
pub fn format_hex_color(color: Rgb) -> HexColor {
    let mut out = HexColor::new();
    let _ = out.push('#');
    for channel in [color.r, color.g, color.b] {
        let _ = out.push(HEX_DIGITS[usize::from(channel >> 4)] as char);
        let _ = out.push(HEX_DIGITS[usize::from(channel & 0x0F)] as char);
    }
    out
}
