use std::{error::Error, fs, path::Path};

use serde::Deserialize;

use crate::player::MovementConfig;

/// World and tuning parameters, loadable from a JSON file. Defaults match the
/// stock 64x32x64 world.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world_width: i32,
    pub world_height: i32,
    pub world_depth: i32,
    pub seed: u32,
    /// Per-column probability of growing a tree.
    pub tree_frequency: f32,
    /// Horizontal render window radius, in cells.
    pub render_radius: i32,
    pub movement: MovementConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: 64,
            world_height: 32,
            world_depth: 64,
            seed: 99,
            tree_frequency: 0.02,
            render_radius: 18,
            movement: MovementConfig::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&text)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"seed": 7, "world_height": 48}"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.world_height, 48);
        assert_eq!(settings.world_width, 64);
        assert_eq!(settings.movement.walk_speed, 5.8);
    }
}
