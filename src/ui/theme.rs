//! Color theme definitions

use ratatui::style::{Color, Modifier, Style};

use crate::models::ThemeSpec;
use crate::table::Tone;

/// Application color theme
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub fg_bright: Color,

    // Accent colors
    pub accent: Color,
    pub secondary: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub highlight: Color,

    // Tab colors
    pub tab_active: Color,
    pub tab_inactive: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            fg_dim: Color::DarkGray,
            fg_bright: Color::White,

            accent: Color::Cyan,
            secondary: Color::Magenta,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection: Color::Blue,
            highlight: Color::Yellow,

            tab_active: Color::Cyan,
            tab_inactive: Color::DarkGray,
        }
    }
}

/// Parse `#rrggbb` (or `#rgb`) into an RGB colour
pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.trim().strip_prefix('#')?;
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

impl Theme {
    /// Dark theme variant
    pub fn dark() -> Self {
        Self::default()
    }

    /// Light theme variant
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            fg_dim: Color::DarkGray,
            fg_bright: Color::Black,
            accent: Color::Blue,
            secondary: Color::Magenta,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            border: Color::Gray,
            border_focused: Color::Blue,
            selection: Color::LightBlue,
            highlight: Color::Yellow,
            tab_active: Color::Blue,
            tab_inactive: Color::Gray,
        }
    }

    /// Theme by settings name; unknown names get the default
    pub fn named(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Overlay the backend's colour scheme. Values that are not valid hex are ignored.
    pub fn from_spec(base: &Theme, spec: &ThemeSpec) -> Self {
        let mut theme = match spec.dark_mode {
            Some(false) => Self::light(),
            Some(true) => Self::dark(),
            None => base.clone(),
        };
        let apply = |slot: &mut Color, value: &Option<String>| {
            if let Some(color) = value.as_deref().and_then(parse_hex) {
                *slot = color;
            }
        };
        apply(&mut theme.accent, &spec.primary_color);
        apply(&mut theme.border_focused, &spec.primary_color);
        apply(&mut theme.tab_active, &spec.primary_color);
        apply(&mut theme.secondary, &spec.secondary_color);
        apply(&mut theme.highlight, &spec.accent_color);
        apply(&mut theme.bg, &spec.background_color);
        apply(&mut theme.fg, &spec.text_color);
        apply(&mut theme.error, &spec.error_color);
        apply(&mut theme.success, &spec.success_color);
        apply(&mut theme.warning, &spec.warning_color);
        theme
    }

    // Style helpers
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    pub fn bright(&self) -> Style {
        Style::default().fg(self.fg_bright)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn selected(&self) -> Style {
        Style::default().bg(self.selection).fg(self.fg_bright)
    }

    pub fn highlight(&self) -> Style {
        Style::default().fg(self.highlight).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn tab_active(&self) -> Style {
        Style::default().fg(self.tab_active).add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.tab_inactive)
    }

    pub fn tone(&self, tone: Tone) -> Style {
        match tone {
            Tone::Neutral => self.normal(),
            Tone::Accent => Style::default().fg(self.accent),
            Tone::Success => Style::default().fg(self.success),
            Tone::Warning => Style::default().fg(self.warning),
            Tone::Danger => Style::default().fg(self.error),
        }
    }
}
