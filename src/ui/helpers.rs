use ratatui::style::Color;

pub fn clamp_name(value: &str, width: usize) -> String {
    let value_len = value.chars().count();
    if value_len <= width {
        return format!("{value:<width$}", width = width);
    }
    let trimmed = value
        .chars()
        .take(width.saturating_sub(2))
        .collect::<String>();
    format!("{trimmed}..")
}

pub fn hex_to_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#').unwrap_or(value.trim());
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pads_short_and_trims_long_values() {
        assert_eq!(clamp_name("abc", 5), "abc  ");
        assert_eq!(clamp_name("abcdefgh", 5), "abc..");
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(hex_to_color("#FF0080"), Some(Color::Rgb(255, 0, 128)));
        assert_eq!(hex_to_color("nope"), None);
    }
}
