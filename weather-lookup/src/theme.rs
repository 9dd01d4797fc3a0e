//! Colours used by the view
//!
//! Passed down through props so nothing reads ambient styling.

use ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Title, temperature and focused borders
    pub brand: Color,
    /// Notice box background
    pub surface: Color,
    /// Key hints and the spinner
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            brand: Color::Rgb(0xf7, 0xc0, 0x8f),
            surface: Color::Rgb(0x3e, 0x2c, 0x41),
            accent: Color::Cyan,
            text: Color::White,
            muted: Color::DarkGray,
            error: Color::Red,
        }
    }
}
