//! Terminal color theme
//!
//! Provides palettes for dark and light terminal backgrounds.
//! Auto-detects via the COLORFGBG env var, or manual override with
//! RW_LIGHT_BG=1.

use ratatui::style::Color;

/// Colors used to draw a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground text
    pub text: Color,
    /// Footer hints
    pub text_dim: Color,
    /// Map border
    pub border: Color,
    /// Room outlines
    pub room: Color,
    /// Connection lines
    pub corridor: Color,
    /// Anchor point markers
    pub anchor: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            room: Color::Green,
            corridor: Color::Blue,
            anchor: Color::Yellow,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            room: Color::Green,
            corridor: Color::Blue,
            anchor: Color::Red,
        }
    }

    /// Pick a theme for the current terminal background
    pub fn detect() -> Self {
        if is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

fn is_light_background() -> bool {
    if let Ok(val) = std::env::var("RW_LIGHT_BG") {
        return val == "1" || val.eq_ignore_ascii_case("true");
    }

    // COLORFGBG is "fg;bg" with 0-15 color indices; 7 and 9-15 are light.
    if let Ok(colorfgbg) = std::env::var("COLORFGBG")
        && let Some(bg_str) = colorfgbg.rsplit(';').next()
        && let Ok(bg_idx) = bg_str.parse::<u8>()
    {
        return matches!(bg_idx, 7 | 9..=15);
    }

    false
}
