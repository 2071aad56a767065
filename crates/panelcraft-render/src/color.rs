use crate::error::{RenderError, Result};
use tiny_skia::Color;

/// Parses the CSS-ish color strings used in render styles: `#rgb`, `#rgba`, `#rrggbb`,
/// `#rrggbbaa`, `rgb(r,g,b)`, `rgba(r,g,b,a)` and a handful of names.
pub fn parse_color(text: &str) -> Option<Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(Color::from_rgba8(0, 0, 0, 255)),
        "red" => return Some(Color::from_rgba8(255, 0, 0, 255)),
        _ => {}
    }

    if let Some(args) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
        return parse_rgb_args(args, true);
    }
    if let Some(args) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        return parse_rgb_args(args, false);
    }

    let hex = s.strip_prefix('#')?;
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 | 4 => Some(Color::from_rgba8(
            hex1(bytes[0])?,
            hex1(bytes[1])?,
            hex1(bytes[2])?,
            match bytes.get(3) {
                Some(&a) => hex1(a)?,
                None => 255,
            },
        )),
        6 | 8 => Some(Color::from_rgba8(
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            match bytes.get(6..8) {
                Some(a) => hex2(a)?,
                None => 255,
            },
        )),
        _ => None,
    }
}

fn parse_rgb_args(args: &str, with_alpha: bool) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let v = s.parse::<f32>().ok()?;
        (v.is_finite() && (0.0..=255.0).contains(&v)).then(|| v.round() as u8)
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = if with_alpha {
        let a = parts[3].parse::<f32>().ok()?;
        if !(a.is_finite() && (0.0..=1.0).contains(&a)) {
            return None;
        }
        a
    } else {
        1.0
    };
    let mut color = Color::from_rgba8(r, g, b, 255);
    color.set_alpha(a);
    Some(color)
}

/// [`parse_color`] for a named style field, reporting the field on failure.
pub(crate) fn style_color(field: &'static str, value: &str) -> Result<Color> {
    parse_color(value).ok_or_else(|| RenderError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(parse_color("#fff"), Some(Color::WHITE));
        assert_eq!(parse_color("#F9FAFB"), Some(Color::from_rgba8(0xf9, 0xfa, 0xfb, 255)));
        assert_eq!(parse_color("#00000080"), Some(Color::from_rgba8(0, 0, 0, 0x80)));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#ggg"), None);
    }

    #[test]
    fn functional_forms() {
        let c = parse_color("rgba(200, 200, 200, 0.9)").unwrap();
        assert!((c.alpha() - 0.9).abs() < 1e-6);
        assert!((c.red() - 200.0 / 255.0).abs() < 1e-6);
        assert_eq!(parse_color("rgb(255,0,0)"), parse_color("red"));
        assert_eq!(parse_color("rgba(1,2,3)"), None);
        assert_eq!(parse_color("rgb(300,0,0)"), None);
    }

    #[test]
    fn style_color_names_the_field() {
        let err = style_color("background", "nope").unwrap_err();
        assert_eq!(err.to_string(), "invalid color for background: \"nope\"");
    }
}
