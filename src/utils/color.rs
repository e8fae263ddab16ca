use image::Rgb;

/// Named colors accepted in addition to hex notation
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("lime", [0, 255, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("maroon", [128, 0, 0]),
    ("olive", [128, 128, 0]),
    ("purple", [128, 0, 128]),
    ("teal", [0, 128, 128]),
    ("navy", [0, 0, 128]),
    ("orange", [255, 165, 0]),
    ("brown", [165, 42, 42]),
    ("pink", [255, 192, 203]),
];

/// Parses `#rgb`, `#rrggbb` or a named color (case-insensitive).
pub fn parse_color(value: &str) -> Option<Rgb<u8>> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = value.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgb)| Rgb(*rgb))
}

fn parse_hex(hex: &str) -> Option<Rgb<u8>> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                // #abc expands to #aabbcc
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 17;
            }
            Some(Rgb(rgb))
        }
        6 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(Rgb(rgb))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(parse_color("#000000"), Some(Rgb([0, 0, 0])));
        assert_eq!(parse_color("#ffffff"), Some(Rgb([255, 255, 255])));
        assert_eq!(parse_color("#1A2b3C"), Some(Rgb([0x1a, 0x2b, 0x3c])));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_color("#fff"), Some(Rgb([255, 255, 255])));
        assert_eq!(parse_color("#f00"), Some(Rgb([255, 0, 0])));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_color("black"), Some(Rgb([0, 0, 0])));
        assert_eq!(parse_color("White"), Some(Rgb([255, 255, 255])));
        assert_eq!(parse_color(" navy "), Some(Rgb([0, 0, 128])));
    }

    #[test]
    fn test_rejects_invalid() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#gggggg"), None);
        assert_eq!(parse_color("notacolor"), None);
        assert_eq!(parse_color("#ééé"), None);
    }
}
