//! Runtime settings
//!
//! Read from a JSON file next to the binary; anything missing falls back to
//! defaults.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_MUZZLE_VELOCITY, MIN_MUZZLE_VELOCITY};
use crate::error::Result;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of level data, profiles and the hall of fame
    pub assets_dir: PathBuf,

    // === Window ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Render refresh rate; physics always runs at 60 Hz
    pub render_hz: u32,

    // === Gameplay ===
    /// Seed for level variant selection (random when unset)
    pub seed: Option<u64>,
    /// Muzzle velocity a new session starts with (1-5)
    pub initial_muzzle_velocity: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            viewport_width: 1280.0,
            viewport_height: 720.0,
            render_hz: 30,
            seed: None,
            initial_muzzle_velocity: MIN_MUZZLE_VELOCITY,
        }
    }
}

impl Settings {
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// Render frame interval in seconds
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.render_hz.max(1) as f32
    }

    pub fn level_dir(&self) -> PathBuf {
        self.assets_dir.join("level_data")
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.assets_dir.join("profiles.txt")
    }

    pub fn high_scores_path(&self) -> PathBuf {
        self.assets_dir.join("high_scores.txt")
    }

    /// Clamp values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        self.initial_muzzle_velocity = self
            .initial_muzzle_velocity
            .clamp(MIN_MUZZLE_VELOCITY, MAX_MUZZLE_VELOCITY);
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            let defaults = Self::default();
            log::warn!(
                "Invalid viewport {}x{}, using {}x{}",
                self.viewport_width,
                self.viewport_height,
                defaults.viewport_width,
                defaults.viewport_height
            );
            self.viewport_width = defaults.viewport_width;
            self.viewport_height = defaults.viewport_height;
        }
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring settings in {}: {}", path.display(), e),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Cannot read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
