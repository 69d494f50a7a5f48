use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All tunable controller parameters, loaded from tuning.ron.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Tuning {
    /// Fixed tick length in seconds.
    pub dt: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_power: f32,
    pub gravity: f32,
    /// Degrees of rotation per mouse-axis unit.
    pub look_speed: f32,
    /// Pitch limit in degrees (symmetric).
    pub look_x_limit: f32,
    pub default_height: f32,
    pub crouch_height: f32,
    pub crouch_speed: f32,
    /// Attack start → sword effect.
    pub vfx_delay: f32,
    /// Attack start → back to idle.
    pub attack_reset_delay: f32,
    /// Attack press → destruction of the captured target.
    pub destroy_delay: f32,
    /// Raw mouse pixels → axis units.
    pub mouse_axis_scale: f32,
    pub interaction_radius: f32,
    pub wreck_scale: f32,
    pub floor_height: f32,
    /// How long a played effect stays visible.
    pub vfx_flash_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            walk_speed: 30.0,
            run_speed: 50.0,
            jump_power: 40.0,
            gravity: 70.0,
            look_speed: 2.0,
            look_x_limit: 45.0,
            default_height: 2.0,
            crouch_height: 1.0,
            crouch_speed: 3.0,
            vfx_delay: 0.6,
            attack_reset_delay: 1.0,
            destroy_delay: 0.6,
            mouse_axis_scale: 0.1,
            interaction_radius: 3.0,
            wreck_scale: 13.0,
            floor_height: 0.0,
            vfx_flash_secs: 0.3,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning.ron: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize tuning: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

impl Tuning {
    /// Get the data directory for tuning files.
    pub fn data_dir() -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("blade_walker")
    }

    /// Path to the tuning file.
    pub fn file_path() -> PathBuf {
        Self::data_dir().join("tuning.ron")
    }

    /// Parse tuning from RON text. The tick length must be positive.
    pub fn from_ron(contents: &str) -> Result<Self, TuningError> {
        let tuning: Self = ron::from_str(contents)?;
        if !(tuning.dt.is_finite() && tuning.dt > 0.0) {
            return Err(TuningError::Invalid(format!("dt must be positive, got {}", tuning.dt)));
        }
        Ok(tuning)
    }

    /// Read and parse the tuning file at `path`.
    pub fn load(path: &PathBuf) -> Result<Self, TuningError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_ron(&contents)
    }

    /// Load from file, or create default if not found.
    pub fn load_or_default() -> Self {
        let path = Self::file_path();
        if path.exists() {
            match Self::load(&path) {
                Ok(tuning) => return tuning,
                Err(e) => warn!("{e}, using defaults"),
            }
            return Self::default();
        }
        let tuning = Self::default();
        if let Err(e) = tuning.save_to(&path) {
            warn!("{e}");
        }
        tuning
    }

    /// Write this tuning as pretty RON to `path`.
    pub fn save_to(&self, path: &PathBuf) -> Result<(), TuningError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| TuningError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let pretty = ron::ser::PrettyConfig::default();
        let s = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(path, s).map_err(|source| TuningError::Io {
            path: path.clone(),
            source,
        })
    }

    /// Reload from file (called by key press).
    pub fn reload(&mut self) {
        *self = Self::load_or_default();
        info!("Tuning reloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_timings() {
        let t = Tuning::default();
        assert_eq!(t.vfx_delay, 0.6);
        assert_eq!(t.attack_reset_delay, 1.0);
        assert_eq!(t.destroy_delay, 0.6);
        assert_eq!(t.look_x_limit, 45.0);
    }

    #[test]
    fn pretty_ron_parses_back() {
        let mut t = Tuning::default();
        t.walk_speed = 12.5;
        let text = ron::ser::to_string_pretty(&t, ron::ser::PrettyConfig::default()).unwrap();
        let parsed = Tuning::from_ron(&text).unwrap();
        assert_eq!(parsed.walk_speed, 12.5);
        assert_eq!(parsed.gravity, t.gravity);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = Tuning::from_ron("(walk_speed: oops").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn non_positive_tick_is_rejected() {
        for dt in [0.0, -0.5] {
            let t = Tuning { dt, ..Tuning::default() };
            let text = ron::ser::to_string_pretty(&t, ron::ser::PrettyConfig::default()).unwrap();
            let err = Tuning::from_ron(&text).unwrap_err();
            assert!(matches!(err, TuningError::Invalid(_)));
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("blade_walker_no_such_dir/none.ron");
        let err = Tuning::load(&path).unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }
}
