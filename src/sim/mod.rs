//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Stable iteration order (bullets, bombshells, lasers; oldest first)
//! - No rendering, audio or file access

pub mod collision;
pub mod level;
pub mod projectile;
pub mod reflection;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{
    Rect, blast_radius, blast_rect, blast_victims, first_collision, first_collision_except,
};
pub use level::{Collidable, CollidableKind, DrawMode, LevelGrid, Tile};
pub use projectile::{Projectile, ProjectileKind, Registry};
pub use reflection::{MirrorFace, classify_face, reflect_off_mirror};
pub use score::{MatchState, ShotOutcome, TargetOutcome, score_delta};
pub use state::{GameEvent, GamePhase, SimulationState};
pub use tick::{Fate, TickInput, step_projectiles, tick};

#[cfg(test)]
pub(crate) mod test_support {
    use glam::Vec2;

    use super::LevelGrid;
    use crate::consts::GRID_CELLS;

    pub const DESIGN_VIEWPORT: Vec2 = Vec2::new(1920.0, 1080.0);

    /// Layout line with the given cells set and everything else empty
    pub fn layout(cells: &[(usize, char)], budget: char) -> String {
        let mut codes = vec!['n'; GRID_CELLS];
        for &(i, c) in cells {
            codes[i] = c;
        }
        let mut s: String = codes.into_iter().collect();
        s.push(budget);
        s
    }

    pub fn grid(cells: &[(usize, char)], budget: char) -> LevelGrid {
        LevelGrid::parse(1, &layout(cells, budget)).unwrap()
    }
}
