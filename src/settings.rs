//! Scene settings
//!
//! Loaded from a JSON file by the native runner. Any missing field falls
//! back to the default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Scene configuration supplied at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    /// Canvas width (wall span on x)
    pub canvas_width: f32,
    /// Canvas height (wall span on y)
    pub canvas_height: f32,
    /// Spatial grid cell edge length
    pub cell_size: f32,

    // === Moving point ===
    /// Rays emitted per frame
    pub ray_count: usize,
    /// Distance travelled per frame
    pub speed: f32,
    /// Restrict ray distance queries to the current grid cell
    pub rays_use_grid: bool,

    // === Run ===
    /// RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,
    /// Random obstacles placed before the first frame
    pub seed_obstacles: usize,
    /// Frames simulated by the headless runner
    pub frames: u64,
    /// Start with debug timing enabled
    pub debug_timing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            cell_size: GRID_CELL_SIZE,

            ray_count: RAY_COUNT,
            speed: BASE_SPEED,
            rays_use_grid: true,

            seed: None,
            seed_obstacles: 0,
            frames: 600,
            debug_timing: false,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("cell_size", self.cell_size)?;
        positive("speed", self.speed)?;
        let cols = (self.canvas_width / self.cell_size).ceil();
        let rows = (self.canvas_height / self.cell_size).ceil();
        let cells = (cols.is_finite() && rows.is_finite())
            .then(|| (cols as usize).checked_mul(rows as usize))
            .flatten()
            .filter(|&cells| cells <= MAX_GRID_CELLS);
        if cells.is_none() {
            return Err(SimError::InvalidSetting {
                field: "cell_size",
                reason: format!("{cols} x {rows} grid exceeds {MAX_GRID_CELLS} cells"),
            });
        }
        if self.ray_count == 0 {
            return Err(SimError::InvalidSetting {
                field: "ray_count",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidSetting {
            field,
            reason: format!("must be positive and finite, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.ray_count, 180);
        assert!(settings.rays_use_grid);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings = Settings {
            cell_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SimError::InvalidSetting { field: "cell_size", .. })
        ));

        let settings = Settings {
            ray_count: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            speed: f32::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        let settings = Settings {
            canvas_width: 1e9,
            canvas_height: 1e9,
            cell_size: 1e-3,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SimError::InvalidSetting { field: "cell_size", .. })
        ));

        // Largest square grid under the cap still passes
        let settings = Settings {
            canvas_width: 1024.0,
            canvas_height: 1024.0,
            cell_size: 1.0,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"ray_count": 12, "seed": 7}"#).unwrap();
        assert_eq!(settings.ray_count, 12);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.canvas_width, CANVAS_WIDTH);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("polymarch_settings_{}.json", std::process::id()));
        let written = Settings {
            seed: Some(42),
            seed_obstacles: 3,
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string(&written).unwrap()).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, written);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Settings::load("/nonexistent/polymarch.json");
        assert!(matches!(result, Err(SimError::Io(_))));
    }
}
