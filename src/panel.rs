// Settings panel overlay: the keyboard-driven stand-in for form controls.
// Drawn on top of the surface after each frame; hidden with a toggle.
use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::app::App;
use crate::config::layout;
use crate::settings::Settings;
use crate::theme::PanelTheme;

/// Adjustable settings rows, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Mode,
    RedValue,
    RedMaxRandomness,
    GreenValue,
    GreenMaxRandomness,
    BlueValue,
    BlueMaxRandomness,
    AlphaValue,
    AlphaMaxRandomness,
    RotationMaxRandomness,
    SizeMaxRandomness,
    BlocksPerRow,
    RerenderInterval,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Mode,
        Field::RedValue,
        Field::RedMaxRandomness,
        Field::GreenValue,
        Field::GreenMaxRandomness,
        Field::BlueValue,
        Field::BlueMaxRandomness,
        Field::AlphaValue,
        Field::AlphaMaxRandomness,
        Field::RotationMaxRandomness,
        Field::SizeMaxRandomness,
        Field::BlocksPerRow,
        Field::RerenderInterval,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Mode => "mode",
            Field::RedValue => "red",
            Field::RedMaxRandomness => "red randomness",
            Field::GreenValue => "green",
            Field::GreenMaxRandomness => "green randomness",
            Field::BlueValue => "blue",
            Field::BlueMaxRandomness => "blue randomness",
            Field::AlphaValue => "alpha",
            Field::AlphaMaxRandomness => "alpha randomness",
            Field::RotationMaxRandomness => "rotation randomness",
            Field::SizeMaxRandomness => "size randomness",
            Field::BlocksPerRow => "blocks per row",
            Field::RerenderInterval => "interval",
        }
    }

    /// Whether digits typed on this row open the numeric entry buffer.
    pub fn accepts_entry(self) -> bool {
        !matches!(self, Field::Mode)
    }

    pub fn value_text(self, settings: &Settings) -> String {
        match self {
            Field::Mode => settings.mode.to_string(),
            Field::RedValue => settings.red_value.to_string(),
            Field::RedMaxRandomness => settings.red_max_randomness.to_string(),
            Field::GreenValue => settings.green_value.to_string(),
            Field::GreenMaxRandomness => settings.green_max_randomness.to_string(),
            Field::BlueValue => settings.blue_value.to_string(),
            Field::BlueMaxRandomness => settings.blue_max_randomness.to_string(),
            Field::AlphaValue => format!("{:.2}", settings.alpha_value),
            Field::AlphaMaxRandomness => format!("{:.2}", settings.alpha_max_randomness),
            Field::RotationMaxRandomness => {
                format!("{} deg", settings.rotation_max_randomness)
            }
            Field::SizeMaxRandomness => settings.size_max_randomness.to_string(),
            Field::BlocksPerRow => settings.blocks_per_row.to_string(),
            Field::RerenderInterval => format!("{} ms", settings.rerender_blocks_interval),
        }
    }
}

pub fn render(app: &App) -> io::Result<()> {
    let mut stdout = io::stdout();
    let width = layout::PANEL_WIDTH as usize;
    let mut row = layout::PANEL_Y;

    // Title bar
    queue!(
        stdout,
        MoveTo(layout::PANEL_X, row),
        SetBackgroundColor(PanelTheme::bg_title()),
        SetForegroundColor(PanelTheme::text_title()),
        Print(pad(" blockfield", width)),
        ResetColor
    )?;
    row += 1;

    for (idx, field) in Field::ALL.iter().enumerate() {
        let selected = idx == app.selected_field;
        let value = match (&app.entry, selected) {
            // Entry buffer replaces the value on the selected row.
            (Some(entry), true) => format!("{}|", entry),
            _ => field.value_text(&app.settings),
        };
        let line = format!(
            " {:<label$}{}",
            field.label(),
            value,
            label = layout::PANEL_LABEL_WIDTH
        );
        if selected {
            queue!(
                stdout,
                MoveTo(layout::PANEL_X, row),
                SetBackgroundColor(PanelTheme::bg_selected()),
                SetForegroundColor(if app.entry.is_some() {
                    PanelTheme::accent_entry()
                } else {
                    PanelTheme::text_selected()
                }),
                Print(pad(&line, width)),
                ResetColor
            )?;
        } else {
            queue!(
                stdout,
                MoveTo(layout::PANEL_X, row),
                SetBackgroundColor(PanelTheme::bg_panel()),
                SetForegroundColor(PanelTheme::text_primary()),
                Print(pad(&line, width)),
                ResetColor
            )?;
        }
        row += 1;
    }

    // Toggles reflect the live record, like the checkboxes they replace.
    let toggles = format!(
        " animate [{}]  auto-randomize [{}]",
        if app.settings.rerender_blocks { 'x' } else { ' ' },
        if app.settings.auto_randomize { 'x' } else { ' ' },
    );
    queue!(
        stdout,
        MoveTo(layout::PANEL_X, row),
        SetBackgroundColor(PanelTheme::bg_panel()),
        SetForegroundColor(PanelTheme::text_primary()),
        Print(pad(&toggles, width)),
        ResetColor
    )?;
    row += 1;

    queue!(
        stdout,
        MoveTo(layout::PANEL_X, row),
        SetBackgroundColor(PanelTheme::bg_panel()),
        SetForegroundColor(if app.status_is_error {
            PanelTheme::warning()
        } else {
            PanelTheme::success()
        }),
        Print(pad(&format!(" {}", app.status_message), width)),
        ResetColor
    )?;
    row += 1;

    queue!(
        stdout,
        MoveTo(layout::PANEL_X, row),
        SetBackgroundColor(PanelTheme::bg_panel()),
        SetForegroundColor(PanelTheme::text_dim()),
        Print(pad(" ↑↓ pick  ←→ adjust  G gen  R rand", width)),
        ResetColor
    )?;
    row += 1;
    queue!(
        stdout,
        MoveTo(layout::PANEL_X, row),
        SetBackgroundColor(PanelTheme::bg_panel()),
        SetForegroundColor(PanelTheme::text_dim()),
        Print(pad(" Space anim  A auto  T retime  H hide  Q quit", width)),
        ResetColor
    )?;

    stdout.flush()
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.chars().take(width).collect()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_values_reflect_settings() {
        let mut settings = Settings::default();
        settings.red_value = 42;
        settings.blocks_per_row = 7;
        assert_eq!(Field::RedValue.value_text(&settings), "42");
        assert_eq!(Field::BlocksPerRow.value_text(&settings), "7");
        assert_eq!(Field::AlphaValue.value_text(&settings), "1.00");
        assert_eq!(Field::RerenderInterval.value_text(&settings), "1000 ms");
        assert_eq!(Field::Mode.value_text(&settings), "FROM-UI");
    }

    #[test]
    fn test_only_mode_rejects_numeric_entry() {
        for field in Field::ALL {
            assert_eq!(field.accepts_entry(), field != Field::Mode);
        }
    }

    #[test]
    fn test_pad_truncates_and_fills() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcd");
    }
}
