use common::error::{ReportError, ReportResult};
use plotters::style::RGBColor;

/// Parses matplotlib style single letters, a few named colors and `#rrggbb`.
pub fn parse_color(name: &str) -> ReportResult<RGBColor> {
    let color = match name.trim().to_lowercase().as_str() {
        "b" | "blue" => RGBColor(0, 0, 255),
        "g" | "green" => RGBColor(0, 128, 0),
        "r" | "red" => RGBColor(255, 0, 0),
        "c" | "cyan" => RGBColor(0, 191, 191),
        "m" | "magenta" => RGBColor(191, 0, 191),
        "y" | "yellow" => RGBColor(191, 191, 0),
        "k" | "black" => RGBColor(0, 0, 0),
        "w" | "white" => RGBColor(255, 255, 255),
        "gray" | "grey" => RGBColor(128, 128, 128),
        "lightblue" => RGBColor(173, 216, 230),
        "orange" => RGBColor(255, 165, 0),
        hex if hex.len() == 7 && hex.starts_with('#') => parse_hex(&hex[1..])
            .ok_or_else(|| ReportError::UnknownColor(name.to_owned()))?,
        _ => return Err(ReportError::UnknownColor(name.to_owned())),
    };
    Ok(color)
}

fn parse_hex(hex: &str) -> Option<RGBColor> {
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette() {
        assert_eq!(parse_color("g").unwrap(), RGBColor(0, 128, 0));
        assert_eq!(parse_color("lightblue").unwrap(), RGBColor(173, 216, 230));
        assert_eq!(parse_color("orange").unwrap(), RGBColor(255, 165, 0));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_color("#1f77b4").unwrap(), RGBColor(0x1f, 0x77, 0xb4));
        assert!(parse_color("#1f77bz").is_err());
        assert!(parse_color("#1f77").is_err());
    }

    #[test]
    fn unknown_color() {
        assert!(matches!(
            parse_color("chartreuse-ish"),
            Err(ReportError::UnknownColor(_))
        ));
    }
}
