use ratatui::style::Color;

use crate::config::Config;
use crate::game::Background;

#[derive(Clone, Debug)]
pub struct Theme {
    pub palette: Vec<Color>,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug)]
pub struct ThemeColors {
    pub bg: Color,
    pub fg: Color,
    pub error_bg: Color,
    pub text_correct: Color,
    pub text_current_bg: Color,
    pub text_current_fg: Color,
    pub text_remaining: Color,
    pub accent: Color,
    pub border: Color,
    pub hint: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(0xff, 0xff, 0xff),
            fg: Color::Rgb(0x33, 0x33, 0x33),
            error_bg: Color::Rgb(0xff, 0xcd, 0xd2),
            text_correct: Color::Rgb(0x2e, 0x7d, 0x32),
            text_current_bg: Color::Rgb(0xff, 0xeb, 0x3b),
            text_current_fg: Color::Rgb(0x21, 0x21, 0x21),
            text_remaining: Color::Rgb(0x9e, 0x9e, 0x9e),
            accent: Color::Rgb(0x19, 0x76, 0xd2),
            border: Color::Rgb(0xbd, 0xbd, 0xbd),
            hint: Color::Rgb(0x75, 0x75, 0x75),
        }
    }
}

/// Parses `#rrggbb` (the leading `#` is optional).
pub fn parse_hex(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    pub fn from_config(config: &Config) -> Self {
        let mut colors = ThemeColors::default();
        if let Some(error_bg) = parse_hex(&config.error_color) {
            colors.error_bg = error_bg;
        }
        Self {
            palette: config.palette.iter().filter_map(|c| parse_hex(c)).collect(),
            colors,
        }
    }

    pub fn background(&self, background: Background) -> Color {
        match background {
            Background::Plain => self.colors.bg,
            Background::Palette(idx) => self.palette.get(idx).copied().unwrap_or(self.colors.bg),
            Background::Error => self.colors.error_bg,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex("#FF9AA2"), Some(Color::Rgb(0xff, 0x9a, 0xa2)));
        assert_eq!(parse_hex("b5ead7"), Some(Color::Rgb(0xb5, 0xea, 0xd7)));
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#gggggg"), None);
        assert_eq!(parse_hex("#ééé"), None);
    }

    #[test]
    fn background_lookup() {
        let theme = Theme::default();
        assert_eq!(theme.palette.len(), 8);
        assert_eq!(theme.background(Background::Plain), theme.colors.bg);
        assert_eq!(theme.background(Background::Error), Color::Rgb(0xff, 0xcd, 0xd2));
        assert_eq!(theme.background(Background::Palette(0)), Color::Rgb(0xff, 0x9a, 0xa2));
        assert_eq!(theme.background(Background::Palette(99)), theme.colors.bg);
    }
}
