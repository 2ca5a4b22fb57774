// Blits the raster surface into the terminal. Each cell row carries two
// pixel rows via the upper-half-block glyph: foreground colors the top
// pixel, background the bottom.
use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::surface::{Pixel, Surface};

pub struct TerminalPresenter {
    cols: u16,
    rows: u16,
}

impl TerminalPresenter {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Surface dimensions this presenter expects: one pixel column per cell
    /// column, two pixel rows per cell row.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.cols as u32, self.rows as u32 * 2)
    }

    /// Write the whole surface as one synchronized update so the frame
    /// appears at once instead of tearing row by row.
    pub fn present(&self, surface: &Surface) -> io::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "\x1b[?2026h")?;
        for row in 0..self.rows {
            queue!(stdout, MoveTo(0, row))?;
            let mut last: Option<(Pixel, Pixel)> = None;
            for col in 0..self.cols {
                let top = surface.pixel(col as u32, row as u32 * 2).unwrap_or(Pixel::BLACK);
                let bottom = surface
                    .pixel(col as u32, row as u32 * 2 + 1)
                    .unwrap_or(Pixel::BLACK);
                // Only re-emit color codes when the pair changes.
                if last != Some((top, bottom)) {
                    queue!(
                        stdout,
                        SetForegroundColor(to_color(top)),
                        SetBackgroundColor(to_color(bottom))
                    )?;
                    last = Some((top, bottom));
                }
                queue!(stdout, Print('▀'))?;
            }
            queue!(stdout, ResetColor)?;
        }
        write!(stdout, "\x1b[?2026l")?;
        stdout.flush()
    }
}

fn to_color(p: Pixel) -> Color {
    Color::Rgb { r: p.r, g: p.g, b: p.b }
}
