//! Theme colors for the calculator screen
//! Defaults follow the green gratuity palette; the config may override any of them.

use ratatui::style::Color;

use crate::config::ThemeConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color, // Screen fill (dark end of the gradient)
    pub glow: Color,       // Slider fill (light end of the gradient)
    pub panel: Color,      // Header bar and result boxes
    pub field: Color,      // Text fields, labels, slider track
    pub highlight: Color,  // Focused control border
    pub text: Color,
    pub text_dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0x32, 0x94, 0x09),
            glow: Color::Rgb(0x92, 0xEB, 0x3F),
            panel: Color::Rgb(0x00, 0x8C, 0x10),
            field: Color::Rgb(0x2F, 0xB5, 0x22),
            highlight: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            text_dim: Color::Rgb(0xD9, 0xF5, 0xCC),
        }
    }
}

impl Theme {
    /// Defaults with any valid overrides from the config applied
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();

        let overrides = [
            ("background", &config.background, &mut theme.background),
            ("panel", &config.panel, &mut theme.panel),
            ("field", &config.field, &mut theme.field),
            ("highlight", &config.highlight, &mut theme.highlight),
            ("text", &config.text, &mut theme.text),
        ];

        for (name, value, slot) in overrides {
            let Some(value) = value else { continue };
            match Self::parse_hex_color(value) {
                Some(color) => *slot = color,
                None => tracing::warn!("Ignoring theme.{} = {:?}: not a hex color", name, value),
            }
        }

        theme
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}
