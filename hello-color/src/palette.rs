//! The fixed palette of color names the greeter accepts, and the terminal
//! color each one is rendered with.

use std::fmt;

use termcolor::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Red,
    Green,
    Blue,
    Magenta,
    Yellow,
}

/// Accepted colors, in the order they are listed to the user.
pub const PALETTE: [PaletteColor; 5] = [
    PaletteColor::Red,
    PaletteColor::Green,
    PaletteColor::Blue,
    PaletteColor::Magenta,
    PaletteColor::Yellow,
];

impl PaletteColor {
    /// Lowercase name as listed to the user.
    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Red => "red",
            PaletteColor::Green => "green",
            PaletteColor::Blue => "blue",
            PaletteColor::Magenta => "magenta",
            PaletteColor::Yellow => "yellow",
        }
    }

    /// Foreground color used when printing the greeting.
    pub fn terminal_color(self) -> Color {
        match self {
            PaletteColor::Red => Color::Red,
            PaletteColor::Green => Color::Green,
            PaletteColor::Blue => Color::Blue,
            PaletteColor::Magenta => Color::Magenta,
            PaletteColor::Yellow => Color::Yellow,
        }
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("color '{input}' is not in the palette")]
    Unavailable { input: String },
}

/// Looks up `input` in the palette after lowercasing it. Whitespace is
/// significant: `" red"` is not `"red"`.
pub fn select(input: &str) -> Result<PaletteColor, SelectionError> {
    let normalized = input.to_lowercase();
    PALETTE
        .iter()
        .copied()
        .find(|color| color.name() == normalized)
        .ok_or_else(|| SelectionError::Unavailable {
            input: input.to_string(),
        })
}

/// Palette names joined with `", "` in palette order.
pub fn listing() -> String {
    PALETTE
        .iter()
        .map(|color| color.name())
        .collect::<Vec<_>>()
        .join(", ")
}
