//! Simulation state owned by the game loop
//!
//! Everything a tick reads or writes lives in `SimulationState`; the
//! integrator and resolver take it by mutable reference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision;
use super::level::{Collidable, DrawMode, LevelGrid, Tile};
use super::projectile::{Projectile, ProjectileKind, Registry};
use super::reflection::MirrorFace;
use super::score::{MatchState, ShotOutcome, TargetOutcome};
use crate::cannon_pivot;
use crate::consts::*;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level in progress
    Playing,
    /// Target hit; waiting for continue or save-and-quit
    LevelWon,
    /// Fired with no shots left
    Lost,
    /// Final level cleared
    Completed,
}

/// Signals for the UI layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired { id: u32, kind: ProjectileKind },
    ShotsChanged { remaining: u32, max: u32 },
    RockDestroyed { coord: usize },
    LaserReflected { id: u32, face: MirrorFace },
    /// Level geometry changed; redraw tiles
    RedrawRequested,
    LevelWon { level: u32, score: u64 },
    LevelLost { level: u32, score: u64 },
    GameCompleted { score: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Viewport size in pixels
    pub viewport: Vec2,
    pub grid: LevelGrid,
    /// Rebuilt on every grid change or resize
    #[serde(skip)]
    pub collidables: Vec<Collidable>,
    pub projectiles: Registry,
    pub match_state: MatchState,
    pub phase: GamePhase,
    /// Kind fired on the next shot
    pub selected: ProjectileKind,
    /// Player muzzle velocity (1-5)
    pub muzzle_velocity: u8,
    /// Cannon angle in degrees
    pub cannon_angle: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl SimulationState {
    /// Start a level from a freshly loaded grid
    pub fn new(grid: LevelGrid, viewport: Vec2, level: u32, score: u64) -> Self {
        let mut state = Self {
            viewport,
            grid,
            collidables: Vec::new(),
            projectiles: Registry::default(),
            match_state: MatchState::begin(level, score),
            phase: GamePhase::Playing,
            selected: ProjectileKind::default(),
            muzzle_velocity: MIN_MUZZLE_VELOCITY,
            cannon_angle: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.draw(DrawMode::Fresh);
        state
    }

    /// Replace the level in play, keeping the player's weapon settings
    pub fn start_level(&mut self, grid: LevelGrid, level: u32, score: u64) {
        self.grid = grid;
        self.projectiles.clear();
        self.match_state = MatchState::begin(level, score);
        self.phase = GamePhase::Playing;
        self.draw(DrawMode::Fresh);
    }

    /// Allocate a new projectile ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn draw(&mut self, mode: DrawMode) {
        let (collidables, max_shots) = self.grid.build_collidables(self.viewport, mode);
        self.collidables = collidables;
        if let Some(max) = max_shots {
            self.match_state.reset_shots(max);
            self.events.push(GameEvent::ShotsChanged {
                remaining: self.match_state.remaining_shots,
                max: self.match_state.max_shots,
            });
        }
        self.events.push(GameEvent::RedrawRequested);
    }

    /// Rebuild collidables after a grid change
    pub fn redraw(&mut self) {
        self.draw(DrawMode::Redraw);
    }

    /// Viewport changed; shot counters are untouched
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.redraw();
    }

    /// Turn a rock into empty space and rebuild collidables
    pub fn destroy_rock(&mut self, coord: usize) {
        self.destroy_rocks(&[coord]);
    }

    /// Destroy several rocks with a single rebuild
    pub fn destroy_rocks(&mut self, coords: &[usize]) {
        let mut destroyed = false;
        for &coord in coords {
            if self.grid.tile(coord) == Tile::Rock {
                self.grid.mutate(coord, Tile::Empty);
                self.events.push(GameEvent::RockDestroyed { coord });
                destroyed = true;
            }
        }
        if destroyed {
            self.redraw();
        }
    }

    /// Bombshell blast centred on the shell sprite
    pub fn detonate(&mut self, shell_pos: Vec2) {
        let victims = collision::blast_victims(shell_pos, self.viewport, &self.collidables);
        if !victims.is_empty() {
            log::debug!("Blast at {:?} destroyed rocks {:?}", shell_pos, victims);
            self.destroy_rocks(&victims);
        }
    }

    /// Process a target hit; only the first per level counts
    pub fn register_target_hit(&mut self) {
        match self.match_state.on_target_hit() {
            TargetOutcome::AlreadyProcessed => {}
            TargetOutcome::LevelWon { level, score, delta } => {
                log::info!("Level won: now at level {}, score {} (+{})", level, score, delta);
                self.phase = GamePhase::LevelWon;
                self.events.push(GameEvent::LevelWon { level, score });
            }
            TargetOutcome::GameCompleted { score } => {
                log::info!("Final level cleared, final score {}", score);
                self.phase = GamePhase::Completed;
                self.events.push(GameEvent::GameCompleted { score });
            }
        }
    }

    /// Fire the selected kind from the cannon. Returns the new projectile's ID.
    pub fn fire(&mut self) -> Option<u32> {
        if self.phase != GamePhase::Playing {
            return None;
        }

        match self.match_state.on_shot_fired() {
            ShotOutcome::OutOfShots => {
                log::info!("Out of shots on level {}", self.match_state.level);
                self.phase = GamePhase::Lost;
                self.events.push(GameEvent::LevelLost {
                    level: self.match_state.level,
                    score: self.match_state.score,
                });
                None
            }
            ShotOutcome::Fired { remaining } => {
                let id = self.next_entity_id();
                let kind = self.selected;
                let projectile = Projectile::launch(
                    id,
                    kind,
                    cannon_pivot(self.viewport.y),
                    self.cannon_angle,
                    self.muzzle_velocity,
                );
                self.projectiles.insert(projectile);
                self.events.push(GameEvent::ProjectileFired { id, kind });
                self.events.push(GameEvent::ShotsChanged {
                    remaining,
                    max: self.match_state.max_shots,
                });
                Some(id)
            }
        }
    }

    pub fn cycle_projectile(&mut self) -> ProjectileKind {
        self.selected = self.selected.next();
        self.selected
    }

    pub fn increase_velocity(&mut self) -> u8 {
        self.muzzle_velocity = (self.muzzle_velocity + 1).min(MAX_MUZZLE_VELOCITY);
        self.muzzle_velocity
    }

    pub fn decrease_velocity(&mut self) -> u8 {
        self.muzzle_velocity = self.muzzle_velocity.saturating_sub(1).max(MIN_MUZZLE_VELOCITY);
        self.muzzle_velocity
    }

    /// Aim the cannon at a pointer position
    pub fn aim_at(&mut self, pointer: Vec2) {
        self.cannon_angle = crate::aim_angle(pointer, self.viewport.y);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::test_support::{grid, DESIGN_VIEWPORT};

    #[test]
    fn test_new_state_reads_shot_budget() {
        let state = SimulationState::new(grid(&[(0, 'r')], '5'), DESIGN_VIEWPORT, 0, 0);
        assert_eq!(state.match_state.max_shots, 5);
        assert_eq!(state.match_state.remaining_shots, 5);
        assert_eq!(state.collidables.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_resize_keeps_shot_counters() {
        let mut state = SimulationState::new(grid(&[(0, 'r')], '5'), DESIGN_VIEWPORT, 0, 0);
        state.fire();
        state.fire();
        let before = state.collidables[0].rect;
        state.resize(960.0, 540.0);
        assert_eq!(state.match_state.remaining_shots, 3);
        assert_eq!(state.match_state.max_shots, 5);
        assert_ne!(state.collidables[0].rect, before);
        assert_eq!(state.collidables[0].rect.width, 90.0);
    }

    #[test]
    fn test_fire_until_lost() {
        let mut state = SimulationState::new(grid(&[], '2'), DESIGN_VIEWPORT, 1, 50);
        assert!(state.fire().is_some());
        assert!(state.fire().is_some());
        assert_eq!(state.projectiles.len(), 2);
        assert!(state.fire().is_none());
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(state.match_state.remaining_shots, 0);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::LevelLost { level: 1, score: 50 }));
        // Nothing fires once lost
        assert!(state.fire().is_none());
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_fire_uses_selection_and_pivot() {
        let mut state = SimulationState::new(grid(&[], '3'), DESIGN_VIEWPORT, 0, 0);
        state.cycle_projectile();
        state.increase_velocity();
        let id = state.fire().unwrap();
        let shell = state.projectiles.get(id).unwrap();
        assert_eq!(shell.kind, ProjectileKind::Bombshell);
        assert_eq!(shell.pos, Vec2::new(0.0, 540.0));
        assert!((shell.speed - 42.0).abs() < 1e-4);
    }

    #[test]
    fn test_velocity_bounds() {
        let mut state = SimulationState::new(grid(&[], '3'), DESIGN_VIEWPORT, 0, 0);
        assert_eq!(state.decrease_velocity(), 1);
        for _ in 0..10 {
            state.increase_velocity();
        }
        assert_eq!(state.muzzle_velocity, 5);
        assert_eq!(state.decrease_velocity(), 4);
    }

    #[test]
    fn test_destroy_rock_ignores_non_rocks() {
        let mut state = SimulationState::new(grid(&[(0, 'r'), (1, 'm')], '3'), DESIGN_VIEWPORT, 0, 0);
        state.drain_events();
        state.destroy_rock(1);
        assert_eq!(state.grid.tile(1), Tile::Mirror);
        assert!(state.drain_events().is_empty());
        state.destroy_rock(0);
        assert_eq!(state.grid.tile(0), Tile::Empty);
        assert_eq!(state.collidables.len(), 1);
    }

    #[test]
    fn test_start_level_clears_projectiles() {
        let mut state = SimulationState::new(grid(&[], '3'), DESIGN_VIEWPORT, 0, 0);
        state.fire();
        state.start_level(grid(&[(5, 't')], '4'), 1, 200);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.match_state.level, 1);
        assert_eq!(state.match_state.score, 200);
        assert_eq!(state.match_state.remaining_shots, 4);
        assert!(!state.match_state.win_processed);
    }
}
