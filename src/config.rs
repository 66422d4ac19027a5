use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Size;

pub const CONFIG_FILE: &str = "config.json";

/// Wall and note parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Wall dimensions in pixels, used by surfaces without a live layout.
    pub wall: Size,
    /// Note dimensions used for spawn bounds and by the text surface.
    pub note: Size,
    /// Storage key holding the serialized note list.
    pub storage_key: String,
    /// Title given to new notes and shown when a title is empty.
    pub placeholder_title: String,
    /// Pastel saturation, percent.
    pub saturation: u8,
    /// Pastel lightness, percent.
    pub lightness: u8,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            wall: Size::new(1000, 800),
            note: Size::new(200, 160),
            storage_key: "notes".to_string(),
            placeholder_title: "Title".to_string(),
            saturation: 80,
            lightness: 80,
        }
    }
}

impl WallConfig {
    /// Load `config.json` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(CONFIG_FILE), json)?;
        Ok(())
    }

    pub fn with_wall(mut self, wall: Size) -> Self {
        self.wall = wall;
        self
    }
}
