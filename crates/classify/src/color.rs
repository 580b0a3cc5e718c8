//! Hex color parsing and RGB interpolation for unclassed color ramps.

/// Parses `#rgb` or `#rrggbb` into channel values.
pub fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.trim().strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 16 + v;
            }
            Some(out)
        }
        6 => {
            let mut out = [0u8; 3];
            for i in 0..3 {
                // Indexing is by byte; a multibyte value must not panic here.
                let pair = hex.get(i * 2..i * 2 + 2)?;
                out[i] = u8::from_str_radix(pair, 16).ok()?;
            }
            Some(out)
        }
        _ => None,
    }
}

/// Channel-wise linear interpolation, `t` in [0, 1].
pub fn lerp(a: [u8; 3], b: [u8; 3], t: f64) -> [u8; 3] {
    let mut out = [0u8; 3];
    for i in 0..3 {
        let v = a[i] as f64 + t * (b[i] as f64 - a[i] as f64);
        out[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

pub fn format_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(parse_hex("#fee5d9"), Some([0xfe, 0xe5, 0xd9]));
        assert_eq!(parse_hex("#fff"), Some([255, 255, 255]));
        assert_eq!(parse_hex("red"), None);
        assert_eq!(parse_hex("#12345"), None);
    }

    #[test]
    fn rejects_multibyte_input_without_panicking() {
        assert_eq!(parse_hex("#aébcd"), None);
        assert_eq!(parse_hex("#ééé"), None);
    }

    #[test]
    fn midpoint_interpolation() {
        let mid = lerp([0, 0, 0], [255, 255, 255], 0.5);
        assert_eq!(format_hex(mid), "#808080");
    }

    #[test]
    fn endpoints_are_exact() {
        let a = [0xa5, 0x0f, 0x15];
        let b = [0xfe, 0xe5, 0xd9];
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
    }
}
