// Shared settings record: the single source of truth for appearance and
// animation parameters. UI bindings and the animation tick only mutate it
// through `apply`, which validates at the boundary.
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::random_int;

/// Ceiling used when re-rolling channels. The closed-range sampler makes the
/// ceiling itself reachable; anything above 255 clamps at the surface.
pub const COLOR_MAX: i64 = 256;

/// How block fills are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    /// Completely random hex color per block.
    Default,
    /// Base channel values plus bounded jitter, both user-set.
    FromUi,
    /// Unrecognized mode string, kept verbatim. Blocks are skipped, not
    /// painted - an unknown mode is permissive, never fatal.
    Other(String),
}

impl From<String> for Mode {
    fn from(s: String) -> Self {
        match s.as_str() {
            "DEFAULT" => Mode::Default,
            "FROM-UI" => Mode::FromUi,
            _ => Mode::Other(s),
        }
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Default => write!(f, "DEFAULT"),
            Mode::FromUi => write!(f, "FROM-UI"),
            Mode::Other(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("blocks per row must be at least 1")]
    DegenerateGrid,
    #[error("re-render interval must be at least 1 ms")]
    ZeroInterval,
    #[error("{0} randomness cannot be negative")]
    NegativeJitter(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: Mode,

    // Block color: per-channel base intensity plus symmetric jitter
    // half-range. Bases are semantically 0-255 / 0.0-1.0 but deliberately
    // unclamped here; the surface truncates when painting.
    pub red_value: i64,
    pub green_value: i64,
    pub blue_value: i64,
    pub alpha_value: f64,
    pub red_max_randomness: i64,
    pub green_max_randomness: i64,
    pub blue_max_randomness: i64,
    pub alpha_max_randomness: f64,

    /// Per-block rotation jitter, in degrees.
    pub rotation_max_randomness: i64,
    /// Accepted and stored but not yet applied when painting.
    pub size_max_randomness: i64,

    pub blocks_per_row: u32,

    /// Animate the surface on the repeating timer.
    pub rerender_blocks: bool,
    /// Timer interval in milliseconds. Read when the timer starts; see
    /// `AnimationLoop` for when later changes take effect.
    pub rerender_blocks_interval: u64,
    /// Re-roll base colors and jitter on every animated frame.
    pub auto_randomize: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::FromUi,
            red_value: 126,
            green_value: 126,
            blue_value: 126,
            alpha_value: 1.0,
            red_max_randomness: 0,
            green_max_randomness: 0,
            blue_max_randomness: 0,
            alpha_max_randomness: 0.0,
            rotation_max_randomness: 0,
            size_max_randomness: 0,
            blocks_per_row: 50,
            rerender_blocks: true,
            rerender_blocks_interval: 1000,
            auto_randomize: false,
        }
    }
}

/// Partial update applied through `Settings::apply`. `None` fields are left
/// alone.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub mode: Option<Mode>,
    pub red_value: Option<i64>,
    pub green_value: Option<i64>,
    pub blue_value: Option<i64>,
    pub alpha_value: Option<f64>,
    pub red_max_randomness: Option<i64>,
    pub green_max_randomness: Option<i64>,
    pub blue_max_randomness: Option<i64>,
    pub alpha_max_randomness: Option<f64>,
    pub rotation_max_randomness: Option<i64>,
    pub size_max_randomness: Option<i64>,
    pub blocks_per_row: Option<u32>,
    pub rerender_blocks: Option<bool>,
    pub rerender_blocks_interval: Option<u64>,
    pub auto_randomize: Option<bool>,
}

impl Settings {
    /// Apply a patch, validating the result. A rejected patch leaves the
    /// record untouched.
    pub fn apply(&mut self, patch: SettingsPatch) -> Result<(), SettingsError> {
        let mut next = self.clone();
        if let Some(v) = patch.mode {
            next.mode = v;
        }
        if let Some(v) = patch.red_value {
            next.red_value = v;
        }
        if let Some(v) = patch.green_value {
            next.green_value = v;
        }
        if let Some(v) = patch.blue_value {
            next.blue_value = v;
        }
        if let Some(v) = patch.alpha_value {
            next.alpha_value = v;
        }
        if let Some(v) = patch.red_max_randomness {
            next.red_max_randomness = v;
        }
        if let Some(v) = patch.green_max_randomness {
            next.green_max_randomness = v;
        }
        if let Some(v) = patch.blue_max_randomness {
            next.blue_max_randomness = v;
        }
        if let Some(v) = patch.alpha_max_randomness {
            next.alpha_max_randomness = v;
        }
        if let Some(v) = patch.rotation_max_randomness {
            next.rotation_max_randomness = v;
        }
        if let Some(v) = patch.size_max_randomness {
            next.size_max_randomness = v;
        }
        if let Some(v) = patch.blocks_per_row {
            next.blocks_per_row = v;
        }
        if let Some(v) = patch.rerender_blocks {
            next.rerender_blocks = v;
        }
        if let Some(v) = patch.rerender_blocks_interval {
            next.rerender_blocks_interval = v;
        }
        if let Some(v) = patch.auto_randomize {
            next.auto_randomize = v;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.blocks_per_row == 0 {
            return Err(SettingsError::DegenerateGrid);
        }
        if self.rerender_blocks_interval == 0 {
            return Err(SettingsError::ZeroInterval);
        }
        if self.red_max_randomness < 0 {
            return Err(SettingsError::NegativeJitter("red"));
        }
        if self.green_max_randomness < 0 {
            return Err(SettingsError::NegativeJitter("green"));
        }
        if self.blue_max_randomness < 0 {
            return Err(SettingsError::NegativeJitter("blue"));
        }
        if self.alpha_max_randomness < 0.0 {
            return Err(SettingsError::NegativeJitter("alpha"));
        }
        if self.rotation_max_randomness < 0 {
            return Err(SettingsError::NegativeJitter("rotation"));
        }
        if self.size_max_randomness < 0 {
            return Err(SettingsError::NegativeJitter("size"));
        }
        Ok(())
    }

    /// Re-roll the six r/g/b base + jitter fields.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.red_value = random_int(rng, COLOR_MAX as f64);
        self.red_max_randomness = random_int(rng, COLOR_MAX as f64);
        self.green_value = random_int(rng, COLOR_MAX as f64);
        self.green_max_randomness = random_int(rng, COLOR_MAX as f64);
        self.blue_value = random_int(rng, COLOR_MAX as f64);
        self.blue_max_randomness = random_int(rng, COLOR_MAX as f64);
    }

    /// Default on-disk location for the settings file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("blockfield").join("settings.json"))
    }

    /// Load settings from disk, falling back to defaults when the file is
    /// missing or unreadable. A corrupt file is logged, never fatal.
    pub fn load_or_default(path: &Path) -> Settings {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<Settings>(&text) {
                Ok(settings) if settings.validate().is_ok() => settings,
                Ok(_) => {
                    crate::log_debug!("settings file {} failed validation, using defaults", path.display());
                    Settings::default()
                }
                Err(e) => {
                    crate::log_debug!("settings file {} unparseable ({}), using defaults", path.display(), e);
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mode_round_trip() {
        assert_eq!(Mode::from("DEFAULT".to_string()), Mode::Default);
        assert_eq!(Mode::from("FROM-UI".to_string()), Mode::FromUi);
        assert_eq!(
            Mode::from("BOGUS".to_string()),
            Mode::Other("BOGUS".to_string())
        );
        assert_eq!(Mode::Other("BOGUS".to_string()).to_string(), "BOGUS");
    }

    #[test]
    fn test_apply_rejects_degenerate_grid() {
        let mut settings = Settings::default();
        let before = settings.clone();
        let result = settings.apply(SettingsPatch {
            blocks_per_row: Some(0),
            red_value: Some(5),
            ..SettingsPatch::default()
        });
        assert_eq!(result, Err(SettingsError::DegenerateGrid));
        // Nothing from the rejected patch leaked in.
        assert_eq!(settings, before);
    }

    #[test]
    fn test_apply_rejects_negative_jitter() {
        let mut settings = Settings::default();
        let result = settings.apply(SettingsPatch {
            green_max_randomness: Some(-1),
            ..SettingsPatch::default()
        });
        assert_eq!(result, Err(SettingsError::NegativeJitter("green")));
    }

    #[test]
    fn test_apply_commits_valid_patch() {
        let mut settings = Settings::default();
        settings
            .apply(SettingsPatch {
                mode: Some(Mode::Default),
                blocks_per_row: Some(8),
                rerender_blocks_interval: Some(250),
                ..SettingsPatch::default()
            })
            .unwrap();
        assert_eq!(settings.mode, Mode::Default);
        assert_eq!(settings.blocks_per_row, 8);
        assert_eq!(settings.rerender_blocks_interval, 250);
    }

    #[test]
    fn test_randomize_stays_in_channel_range() {
        let mut settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            settings.randomize(&mut rng);
            for v in [
                settings.red_value,
                settings.red_max_randomness,
                settings.green_value,
                settings.green_max_randomness,
                settings.blue_value,
                settings.blue_max_randomness,
            ] {
                assert!((0..=COLOR_MAX).contains(&v));
            }
        }
        // Untouched by randomize.
        assert_eq!(settings.alpha_value, 1.0);
        assert_eq!(settings.blocks_per_row, 50);
    }

    #[test]
    fn test_settings_json_round_trip() {
        let mut settings = Settings::default();
        settings.mode = Mode::Other("BOGUS".to_string());
        settings.blocks_per_row = 12;
        let text = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
