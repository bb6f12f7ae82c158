//! Cannonade - a tile-based artillery game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projectiles, collisions, level grid, match state)
//! - `persistence`: Level layouts and player profiles on disk
//! - `highscores`: Top-3 hall of fame
//! - `settings`: Runtime configuration
//! - `game`: Session orchestration on top of the simulation

pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use error::{GameError, Result};
pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz physics)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Design resolution every layout is authored against
    pub const DESIGN_WIDTH: f32 = 1920.0;
    pub const DESIGN_HEIGHT: f32 = 1080.0;

    /// Level grid shape
    pub const GRID_COLUMNS: usize = 8;
    pub const GRID_CELLS: usize = 48;
    /// Index of the shot budget digit in a layout
    pub const SHOT_BUDGET_INDEX: usize = 48;
    /// Total codes in a layout (48 cells + shot budget)
    pub const LAYOUT_LEN: usize = 49;

    /// Tile edge and grid origin in design units
    pub const TILE_SIZE: f32 = 180.0;
    pub const GRID_ORIGIN_X: f32 = 480.0;
    pub const GRID_ORIGIN_Y: f32 = 0.0;

    /// Earth gravity, scaled by projectile mass per tick
    pub const GRAVITY: f32 = 9.81;

    /// Muzzle velocity bounds (player adjustable)
    pub const MIN_MUZZLE_VELOCITY: u8 = 1;
    pub const MAX_MUZZLE_VELOCITY: u8 = 5;

    /// Bullet: light, small, gravity-bound
    pub const BULLET_BASE_SPEED: f32 = 20.0;
    pub const BULLET_MASS: f32 = 0.1;
    pub const BULLET_HIT_BOX: (f32, f32) = (10.0, 10.0);
    pub const BULLET_VISUAL_SIZE: (f32, f32) = (10.0, 10.0);

    /// Bombshell: big, slow base speed with a launch multiplier
    pub const BOMBSHELL_BASE_SPEED: f32 = 10.0;
    pub const BOMBSHELL_SPEED_FACTOR: f32 = 2.1;
    pub const BOMBSHELL_MASS: f32 = 0.05;
    pub const BOMBSHELL_HIT_BOX: (f32, f32) = (90.0, 90.0);
    pub const BOMBSHELL_VISUAL_SIZE: (f32, f32) = (90.0, 90.0);
    /// Blast square offset so the blast centres on the shell sprite
    pub const BLAST_SPRITE_OFFSET: f32 = 90.0;

    /// Laser: fixed speed, no gravity
    pub const LASER_SPEED: f32 = 50.0;
    pub const LASER_HIT_BOX: (f32, f32) = (5.0, 5.0);
    pub const LASER_VISUAL_SIZE: (f32, f32) = (20.0, 5.0);

    /// Level index at which the campaign is complete
    pub const FINAL_LEVEL: u32 = 4;
}

/// Cannon pivot for a viewport: left edge, vertically centred
#[inline]
pub fn cannon_pivot(height: f32) -> Vec2 {
    Vec2::new(0.0, height / 2.0)
}

/// Convert a pointer position to a cannon angle in degrees
#[inline]
pub fn aim_angle(pointer: Vec2, height: f32) -> f32 {
    let pivot = cannon_pivot(height);
    (pointer.y - pivot.y).atan2(pointer.x - pivot.x).to_degrees()
}
