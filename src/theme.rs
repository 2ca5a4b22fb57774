use crossterm::style::Color;

// Panel colors for the settings overlay (dark-terminal leaning)
pub struct PanelTheme;

impl PanelTheme {
    pub fn bg_panel() -> Color { Color::Rgb { r: 24, g: 26, b: 32 } }
    pub fn bg_title() -> Color { Color::Rgb { r: 255, g: 193, b: 7 } }   // Amber
    pub fn text_title() -> Color { Color::Rgb { r: 0, g: 0, b: 0 } }

    // Field rows
    pub fn text_primary() -> Color { Color::Rgb { r: 197, g: 200, b: 198 } }
    pub fn text_dim() -> Color { Color::Rgb { r: 96, g: 99, b: 102 } }
    pub fn bg_selected() -> Color { Color::Rgb { r: 255, g: 193, b: 7 } }
    pub fn text_selected() -> Color { Color::Rgb { r: 0, g: 0, b: 0 } }

    // Numeric entry buffer
    pub fn accent_entry() -> Color { Color::Rgb { r: 143, g: 161, b: 179 } } // #8FA1B3 - Muted cyan

    // Status line
    pub fn success() -> Color { Color::Rgb { r: 181, g: 189, b: 104 } }      // #B5BD68 - Green
    pub fn warning() -> Color { Color::Rgb { r: 222, g: 147, b: 95 } }       // #DE935F - Orange
}
