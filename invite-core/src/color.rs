//! Color string conversion for the panel's color picker.

/// Fallback for anything that cannot be read as a color.
pub const BLACK: &str = "#000000";

/// Convert a reported CSS color to the `#RRGGBB` form the color picker accepts.
///
/// Hex input passes through unchanged. `rgb(r, g, b)` and `rgba(r, g, b, a)` become
/// uppercase hex with alpha discarded; channels above 255 saturate. Anything else,
/// including the empty string, yields [`BLACK`].
#[must_use]
pub fn rgb_to_hex(input: &str) -> String {
    if input.starts_with('#') {
        return input.to_string();
    }
    parse_rgb(input).map_or_else(
        || BLACK.to_string(),
        |(r, g, b)| format!("#{r:02X}{g:02X}{b:02X}"),
    )
}

/// Color shown in the picker for an overlay's stored color.
#[must_use]
pub fn picker_color(stored: &str) -> String {
    if stored.is_empty() {
        BLACK.to_string()
    } else if stored.starts_with("rgb") {
        rgb_to_hex(stored)
    } else {
        stored.to_string()
    }
}

fn parse_rgb(input: &str) -> Option<(u8, u8, u8)> {
    let body = input
        .strip_prefix("rgba(")
        .or_else(|| input.strip_prefix("rgb("))?
        .strip_suffix(')')?;

    let mut parts = body.split(',');
    // First channel sits directly after the parenthesis.
    let r = channel(parts.next()?)?;
    let g = channel(parts.next()?.trim_start())?;
    let b = channel(parts.next()?.trim_start())?;
    if let Some(alpha) = parts.next() {
        if !is_alpha(alpha.trim_start()) {
            return None;
        }
    }
    if parts.next().is_some() {
        return None;
    }
    Some((r, g, b))
}

fn channel(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.parse::<u8>().unwrap_or(u8::MAX))
}

/// `digits [ "." digits* ]`
fn is_alpha(s: &str) -> bool {
    let (int, frac) = s.split_once('.').unwrap_or((s, ""));
    !int.is_empty()
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_rgb_extremes() {
        assert_eq!(rgb_to_hex("rgb(0,0,0)"), "#000000");
        assert_eq!(rgb_to_hex("rgb(255,255,255)"), "#FFFFFF");
    }

    #[test]
    fn accepts_spaces_after_commas() {
        assert_eq!(rgb_to_hex("rgb(18, 52, 86)"), "#123456");
    }

    #[test]
    fn discards_alpha() {
        assert_eq!(rgb_to_hex("rgba(171, 205, 239, 0.5)"), "#ABCDEF");
        assert_eq!(rgb_to_hex("rgba(1, 2, 3, 1)"), "#010203");
    }

    #[test]
    fn hex_passes_through() {
        assert_eq!(rgb_to_hex("#ABCDEF"), "#ABCDEF");
        assert_eq!(rgb_to_hex("#abc"), "#abc");
    }

    #[test]
    fn malformed_defaults_to_black() {
        assert_eq!(rgb_to_hex("garbage"), BLACK);
        assert_eq!(rgb_to_hex(""), BLACK);
        assert_eq!(rgb_to_hex("rgb(1,2)"), BLACK);
        assert_eq!(rgb_to_hex("rgb( 1,2,3)"), BLACK);
        assert_eq!(rgb_to_hex("rgb(1,2,3,4,5)"), BLACK);
        assert_eq!(rgb_to_hex("rgb(1,2,x)"), BLACK);
        assert_eq!(rgb_to_hex("rgba(1,2,3,.5)"), BLACK);
    }

    #[test]
    fn oversized_channels_saturate() {
        assert_eq!(rgb_to_hex("rgb(300,0,0)"), "#FF0000");
    }

    #[test]
    fn picker_color_handles_stored_forms() {
        assert_eq!(picker_color("rgb(255,0,0)"), "#FF0000");
        assert_eq!(picker_color("#00ff00"), "#00ff00");
        assert_eq!(picker_color(""), BLACK);
    }
}
