// Keyboard bindings: the input half of the UI binding. Every settings
// mutation goes through App::apply_patch, so validation happens at this
// boundary and malformed input never reaches the settings record.
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::config::steps;
use crate::panel::Field;
use crate::settings::{Mode, SettingsPatch};

/// Returns Ok(false) when the app should exit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Numeric entry is modal: the buffer swallows everything until it is
    // committed or cancelled.
    if app.entry.is_some() {
        handle_entry_key(app, key.code);
        return Ok(true);
    }

    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    match (code, key.modifiers) {
        (KeyCode::Char('c'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            return Ok(false);
        }
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => {
            return Ok(false);
        }

        // Generate now: the original's generate button.
        (KeyCode::Char('g'), _) => {
            app.regenerate()?;
            app.set_status("generated", false);
        }
        // Randomize base colors and jitter, then re-render.
        (KeyCode::Char('r'), _) => {
            app.randomize_and_regenerate()?;
            app.set_status("randomized", false);
        }
        (KeyCode::Char(' '), _) => {
            let patch = SettingsPatch {
                rerender_blocks: Some(!app.settings.rerender_blocks),
                ..SettingsPatch::default()
            };
            app.apply_patch(patch);
        }
        (KeyCode::Char('a'), _) => {
            let patch = SettingsPatch {
                auto_randomize: Some(!app.settings.auto_randomize),
                ..SettingsPatch::default()
            };
            app.apply_patch(patch);
        }
        (KeyCode::Char('h'), _) => {
            app.panel_visible = !app.panel_visible;
            app.needs_redraw = true;
        }
        // Restart the timer, re-reading the configured interval.
        (KeyCode::Char('t'), _) => {
            app.restart_timer();
        }

        (KeyCode::Up, _) => {
            app.selected_field =
                (app.selected_field + Field::ALL.len() - 1) % Field::ALL.len();
            app.needs_redraw = true;
        }
        (KeyCode::Down, _) => {
            app.selected_field = (app.selected_field + 1) % Field::ALL.len();
            app.needs_redraw = true;
        }
        (KeyCode::Left, _) => adjust(app, -1),
        (KeyCode::Right, _) => adjust(app, 1),

        (KeyCode::Char(c), _) if c.is_ascii_digit() || c == '-' || c == '.' => {
            if Field::ALL[app.selected_field].accepts_entry() {
                app.entry = Some(c.to_string());
                app.needs_redraw = true;
            }
        }

        _ => {}
    }

    Ok(true)
}

fn handle_entry_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' || c == '.' => {
            if let Some(entry) = app.entry.as_mut() {
                entry.push(c);
            }
            app.needs_redraw = true;
        }
        KeyCode::Backspace => {
            if let Some(entry) = app.entry.as_mut() {
                entry.pop();
            }
            app.needs_redraw = true;
        }
        KeyCode::Enter => commit_entry(app),
        KeyCode::Esc => {
            app.entry = None;
            app.set_status("entry cancelled", false);
        }
        _ => {}
    }
}

/// Step the selected field. Arrow adjustments clamp at the low end instead
/// of surfacing a validation error on every repeat.
fn adjust(app: &mut App, direction: i64) {
    let field = Field::ALL[app.selected_field];
    let s = &app.settings;
    let mut patch = SettingsPatch::default();
    match field {
        Field::Mode => {
            patch.mode = Some(match s.mode {
                Mode::FromUi => Mode::Default,
                _ => Mode::FromUi,
            });
        }
        Field::RedValue => {
            patch.red_value = Some(s.red_value + direction * steps::CHANNEL_STEP);
        }
        Field::RedMaxRandomness => {
            patch.red_max_randomness = Some((s.red_max_randomness + direction).max(0));
        }
        Field::GreenValue => {
            patch.green_value = Some(s.green_value + direction * steps::CHANNEL_STEP);
        }
        Field::GreenMaxRandomness => {
            patch.green_max_randomness = Some((s.green_max_randomness + direction).max(0));
        }
        Field::BlueValue => {
            patch.blue_value = Some(s.blue_value + direction * steps::CHANNEL_STEP);
        }
        Field::BlueMaxRandomness => {
            patch.blue_max_randomness = Some((s.blue_max_randomness + direction).max(0));
        }
        Field::AlphaValue => {
            patch.alpha_value = Some(s.alpha_value + direction as f64 * steps::ALPHA_STEP);
        }
        Field::AlphaMaxRandomness => {
            patch.alpha_max_randomness =
                Some((s.alpha_max_randomness + direction as f64 * steps::ALPHA_STEP).max(0.0));
        }
        Field::RotationMaxRandomness => {
            patch.rotation_max_randomness =
                Some((s.rotation_max_randomness + direction).max(0));
        }
        Field::SizeMaxRandomness => {
            patch.size_max_randomness = Some((s.size_max_randomness + direction).max(0));
        }
        Field::BlocksPerRow => {
            let next = s.blocks_per_row as i64 + direction;
            patch.blocks_per_row = Some(next.max(1) as u32);
        }
        Field::RerenderInterval => {
            let next = s.rerender_blocks_interval as i64
                + direction * steps::INTERVAL_STEP_MS as i64;
            patch.rerender_blocks_interval =
                Some(next.max(steps::INTERVAL_STEP_MS as i64) as u64);
        }
    }
    app.apply_patch(patch);
}

fn commit_entry(app: &mut App) {
    let Some(text) = app.entry.take() else {
        return;
    };
    let field = Field::ALL[app.selected_field];
    let mut patch = SettingsPatch::default();
    // Parse failures stop here; the previous value stays in force.
    match field {
        Field::Mode => return,
        Field::RedValue => match text.parse() {
            Ok(v) => patch.red_value = Some(v),
            Err(_) => return reject(app, field, &text),
        },
        Field::RedMaxRandomness => match text.parse() {
            Ok(v) => patch.red_max_randomness = Some(v),
            Err(_) => return reject(app, field, &text),
        },
        Field::GreenValue => match text.parse() {
            Ok(v) => patch.green_value = Some(v),
            Err(_) => return reject(app, field, &text),
        },
        Field::GreenMaxRandomness => match text.parse() {
            Ok(v) => patch.green_max_randomness = Some(v),
            Err(_) => return reject(app, field, &text),
        },
        Field::BlueValue => match text.parse() {
            Ok(v) => patch.blue_value = Some(v),
            Err(_) => return reject(app, field, &text),
        },
        Field::BlueMaxRandomness => match text.parse() {
            Ok(v) => patch.blue_max_randomness = Some(v),
            Err(_) => return reject(app, field, &text),
        },
        Field::AlphaValue => match text.parse() {
            Ok(v) => patch.alpha_value = Some(v),
            Err(_) => return reject(app, field, &text),
        },
        Field::AlphaMaxRandomness => match text.parse() {
            Ok(v) => patch.alpha_max_randomness = Some(v),
            Err(_) => return reject(app, field, &text),
        },
        Field::RotationMaxRandomness => match text.parse() {
            Ok(v) => patch.rotation_max_randomness = Some(v),
            Err(_) => return reject(app, field, &text),
        },
        Field::SizeMaxRandomness => match text.parse() {
            Ok(v) => patch.size_max_randomness = Some(v),
            Err(_) => return reject(app, field, &text),
        },
        Field::BlocksPerRow => match text.parse() {
            Ok(v) => patch.blocks_per_row = Some(v),
            Err(_) => return reject(app, field, &text),
        },
        Field::RerenderInterval => match text.parse() {
            Ok(v) => patch.rerender_blocks_interval = Some(v),
            Err(_) => return reject(app, field, &text),
        },
    }
    app.apply_patch(patch);
}

fn reject(app: &mut App, field: Field, text: &str) {
    let kept = field.value_text(&app.settings);
    app.set_status(format!("'{}' is not a number - kept {}", text, kept), true);
}
