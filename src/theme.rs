// Theme support for the TUI
//
// Color palettes selected by name from config. "mono" sticks to the
// terminal's ANSI palette; the other themes use true color (RGB).

use crate::format::Accent;
use crate::logging::LogLevel;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // UI element colors
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub selection: Color,
    pub selection_fg: Color,
    pub status_bar: Color,
    pub border_type: BorderType,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Category accents
    pub accent_blue: Color,
    pub accent_green: Color,
    pub accent_pink: Color,
    pub accent_violet: Color,
    pub accent_amber: Color,
    pub accent_orange: Color,
    pub accent_slate: Color,
    pub accent_festival: Color,
}

impl Theme {
    /// Load theme by name; unknown names get the festival theme
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "mono" | "auto" => Self::mono(),
            "festival" => Self::festival(),
            other => {
                tracing::warn!(
                    "Unknown theme '{}', using festival (available: {})",
                    other,
                    Self::list_available().join(", ")
                );
                Self::festival()
            }
        }
    }

    pub fn list_available() -> &'static [&'static str] {
        &["festival", "light", "mono"]
    }

    /// Dark purple night-festival palette
    pub fn festival() -> Self {
        Self {
            name: "festival".to_string(),
            background: Color::Rgb(0x0a, 0x05, 0x1a),
            foreground: Color::Rgb(0xe5, 0xe7, 0xeb),
            muted: Color::Rgb(0x9c, 0xa3, 0xaf),
            title: Color::Rgb(0xc0, 0x84, 0xfc),
            border: Color::Rgb(0x4c, 0x3a, 0x7a),
            highlight: Color::Rgb(0xf4, 0x72, 0xb6),
            selection: Color::Rgb(0x3b, 0x21, 0x6b),
            selection_fg: Color::Rgb(0xff, 0xff, 0xff),
            status_bar: Color::Rgb(0xa7, 0x8b, 0xfa),
            border_type: BorderType::Rounded,
            success: Color::Rgb(0x4a, 0xde, 0x80),
            warning: Color::Rgb(0xfa, 0xcc, 0x15),
            error: Color::Rgb(0xf8, 0x71, 0x71),
            accent_blue: Color::Rgb(0x60, 0xa5, 0xfa),
            accent_green: Color::Rgb(0x34, 0xd3, 0x99),
            accent_pink: Color::Rgb(0xf4, 0x72, 0xb6),
            accent_violet: Color::Rgb(0xa7, 0x8b, 0xfa),
            accent_amber: Color::Rgb(0xfb, 0xbf, 0x24),
            accent_orange: Color::Rgb(0xfb, 0x92, 0x3c),
            accent_slate: Color::Rgb(0x94, 0xa3, 0xb8),
            accent_festival: Color::Rgb(0x81, 0x8c, 0xf8),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color::Rgb(0xfa, 0xfa, 0xfa),
            foreground: Color::Rgb(0x1f, 0x29, 0x37),
            muted: Color::Rgb(0x6b, 0x72, 0x80),
            title: Color::Rgb(0x6d, 0x28, 0xd9),
            border: Color::Rgb(0xd1, 0xd5, 0xdb),
            highlight: Color::Rgb(0xdb, 0x27, 0x77),
            selection: Color::Rgb(0xed, 0xe9, 0xfe),
            selection_fg: Color::Rgb(0x1f, 0x29, 0x37),
            status_bar: Color::Rgb(0x6d, 0x28, 0xd9),
            border_type: BorderType::Rounded,
            success: Color::Rgb(0x16, 0xa3, 0x4a),
            warning: Color::Rgb(0xca, 0x8a, 0x04),
            error: Color::Rgb(0xdc, 0x26, 0x26),
            accent_blue: Color::Rgb(0x25, 0x63, 0xeb),
            accent_green: Color::Rgb(0x05, 0x96, 0x69),
            accent_pink: Color::Rgb(0xdb, 0x27, 0x77),
            accent_violet: Color::Rgb(0x7c, 0x3a, 0xed),
            accent_amber: Color::Rgb(0xd9, 0x77, 0x06),
            accent_orange: Color::Rgb(0xea, 0x58, 0x0c),
            accent_slate: Color::Rgb(0x47, 0x55, 0x69),
            accent_festival: Color::Rgb(0x4f, 0x46, 0xe5),
        }
    }

    /// Terminal ANSI palette
    pub fn mono() -> Self {
        Self {
            name: "mono".to_string(),
            background: Color::Reset,
            foreground: Color::Reset,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            highlight: Color::Yellow,
            selection: Color::DarkGray,
            selection_fg: Color::White,
            status_bar: Color::Green,
            border_type: BorderType::Plain,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            accent_blue: Color::Blue,
            accent_green: Color::Green,
            accent_pink: Color::Magenta,
            accent_violet: Color::LightMagenta,
            accent_amber: Color::Yellow,
            accent_orange: Color::LightRed,
            accent_slate: Color::Gray,
            accent_festival: Color::LightBlue,
        }
    }

    pub fn accent(&self, accent: Accent) -> Color {
        match accent {
            Accent::Blue => self.accent_blue,
            Accent::Green => self.accent_green,
            Accent::Pink => self.accent_pink,
            Accent::Violet => self.accent_violet,
            Accent::Amber => self.accent_amber,
            Accent::Orange => self.accent_orange,
            Accent::Slate => self.accent_slate,
            Accent::Festival => self.accent_festival,
        }
    }

    pub fn log_level(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Error => self.error,
            LogLevel::Warn => self.warning,
            LogLevel::Info => self.foreground,
            LogLevel::Debug | LogLevel::Trace => self.muted,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::festival()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        assert_eq!(Theme::by_name("LIGHT").name, "light");
        assert_eq!(Theme::by_name("auto").name, "mono");
        assert_eq!(Theme::by_name("no-such-theme").name, "festival");
        for name in Theme::list_available() {
            assert_eq!(Theme::by_name(name).name, *name);
        }
    }

    #[test]
    fn test_accents_are_distinct() {
        let theme = Theme::festival();
        assert_ne!(theme.accent(Accent::Blue), theme.accent(Accent::Pink));
        assert_eq!(theme.accent(Accent::default()), theme.accent_festival);
    }
}
