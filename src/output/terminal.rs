//! ANSI color helpers
//!
//! 256-color codes, matching the palette used for the progress lines, the
//! retry notices and the report block. [`Palette`] applies them only when
//! colors are enabled.

pub mod colors {
    pub const GREY: u8 = 102;      // #7D7D7D - Secondary
    pub const AQUA: u8 = 109;      // #7A9EB5 - Numbers
    pub const ORANGE: u8 = 208;    // #F2913D - Warnings
    pub const RED: u8 = 167;       // #E34F45 - Errors
    pub const BLUE: u8 = 68;       // #426BD1 - Measured values
    pub const GREEN: u8 = 71;      // #63C27A - Progress messages
    pub const YELLOW: u8 = 185;    // #CCCC3D - Flavor text
}

/// ANSI escape code constants
pub const RESET: &str = "\x1b[0m";

/// Generate foreground color escape code
#[inline]
pub fn fg(color: u8) -> String {
    format!("\x1b[38;5;{}m", color)
}

/// Generate bold foreground color escape code
#[inline]
pub fn bold_fg(color: u8) -> String {
    format!("\x1b[1;38;5;{}m", color)
}

/// Colorize text with a foreground color
#[inline]
pub fn colorize(text: &str, color: u8) -> String {
    format!("{}{}{}", fg(color), text, RESET)
}

/// Colorize text with bold foreground color
#[inline]
pub fn bold(text: &str, color: u8) -> String {
    format!("{}{}{}", bold_fg(color), text, RESET)
}

/// Color choices for one output stream; a no-op when disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: &str, color: u8, strong: bool) -> String {
        match (self.enabled, strong) {
            (false, _) => text.to_string(),
            (true, false) => colorize(text, color),
            (true, true) => bold(text, color),
        }
    }

    /// Progress message (green)
    pub fn progress(&self, text: &str) -> String {
        self.paint(text, colors::GREEN, false)
    }

    /// Flavor text (yellow)
    pub fn flavor(&self, text: &str) -> String {
        self.paint(text, colors::YELLOW, false)
    }

    /// Measured value (blue)
    pub fn value(&self, text: &str) -> String {
        self.paint(text, colors::BLUE, false)
    }

    /// Number (aqua)
    pub fn number(&self, text: &str) -> String {
        self.paint(text, colors::AQUA, false)
    }

    /// Secondary/muted text (grey)
    pub fn muted(&self, text: &str) -> String {
        self.paint(text, colors::GREY, false)
    }

    /// Warning message (bold orange)
    pub fn warning(&self, text: &str) -> String {
        self.paint(text, colors::ORANGE, true)
    }

    /// Error message (bold red)
    pub fn error(&self, text: &str) -> String {
        self.paint(text, colors::RED, true)
    }

    /// HTTP status, colored by class
    pub fn http_status(&self, code: u16, text: &str) -> String {
        let color = match code / 100 {
            2 => colors::GREEN,
            3 => colors::YELLOW,
            4 => colors::ORANGE,
            5 => colors::RED,
            _ => colors::GREY,
        };
        self.paint(text, color, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fg_color() {
        assert_eq!(fg(71), "\x1b[38;5;71m");
    }

    #[test]
    fn test_bold_fg_color() {
        assert_eq!(bold_fg(71), "\x1b[1;38;5;71m");
    }

    #[test]
    fn test_palette_enabled() {
        let palette = Palette::new(true);
        let result = palette.progress("Sending");
        assert!(result.contains("38;5;71m"));
        assert!(result.ends_with(RESET));
        assert!(palette.error("FAIL").contains("1;38;5;167m"));
    }

    #[test]
    fn test_palette_plain() {
        let palette = Palette::plain();
        assert_eq!(palette.warning("Retry"), "Retry");
        assert_eq!(palette.http_status(200, "200 OK"), "200 OK");
    }
}
