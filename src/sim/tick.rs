//! Fixed timestep simulation tick
//!
//! Applies player input, then advances every live projectile one step and
//! resolves its collisions before the next projectile is considered.

use glam::Vec2;

use super::collision::first_collision_except;
use super::level::CollidableKind;
use super::projectile::{Projectile, ProjectileKind};
use super::reflection::reflect_off_mirror;
use super::state::{GameEvent, GamePhase, SimulationState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position to aim the cannon at
    pub aim: Option<Vec2>,
    /// Fire the selected projectile
    pub fire: bool,
    /// Switch to the next projectile kind
    pub cycle_projectile: bool,
    /// Muzzle velocity change: positive raises, negative lowers
    pub velocity_change: i8,
}

/// What happens to a projectile after its step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Alive,
    Removed,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut SimulationState, input: &TickInput, dt: f32) {
    if let Some(pointer) = input.aim {
        state.aim_at(pointer);
    }
    if input.cycle_projectile {
        state.cycle_projectile();
    }
    if input.velocity_change > 0 {
        state.increase_velocity();
    } else if input.velocity_change < 0 {
        state.decrease_velocity();
    }
    if input.fire {
        state.fire();
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    step_projectiles(state, dt);
}

/// Integrate and resolve every live projectile, bullets first, then
/// bombshells, then lasers.
///
/// Stops as soon as the level is decided; the rest stay where they are.
pub fn step_projectiles(state: &mut SimulationState, dt: f32) {
    for kind in ProjectileKind::ALL {
        if state.phase != GamePhase::Playing {
            break;
        }
        // Taken out so the resolver can mutate the rest of the state
        let mut live = std::mem::take(state.projectiles.of_kind_mut(kind));
        live.retain_mut(|p| {
            state.phase != GamePhase::Playing || step_projectile(state, p, dt) == Fate::Alive
        });
        state.projectiles.of_kind_mut(kind).append(&mut live);
    }
}

/// Advance one projectile and resolve it against the level
pub fn step_projectile(state: &mut SimulationState, projectile: &mut Projectile, dt: f32) -> Fate {
    projectile.advance(dt);
    if projectile.is_out_of_bounds(state.viewport) {
        return Fate::Removed;
    }
    resolve_collision(state, projectile)
}

/// Dispatch on the first collidable the projectile overlaps
///
/// A laser still overlapping the mirror it just bounced off ignores that
/// mirror until it is clear of it.
pub fn resolve_collision(state: &mut SimulationState, projectile: &mut Projectile) -> Fate {
    let hit_rect = projectile.hit_rect();
    if let Some(coord) = projectile.last_mirror {
        let inside = state
            .collidables
            .iter()
            .any(|c| c.coord == coord && c.rect.overlaps(&hit_rect));
        if !inside {
            projectile.last_mirror = None;
        }
    }

    let Some(hit) =
        first_collision_except(&hit_rect, &state.collidables, projectile.last_mirror).copied()
    else {
        return Fate::Alive;
    };

    log::debug!(
        "{} {} hit {:?} at coord {}",
        projectile.kind.as_str(),
        projectile.id,
        hit.kind,
        hit.coord
    );

    if hit.kind == CollidableKind::Target {
        state.register_target_hit();
        return Fate::Removed;
    }

    match projectile.kind {
        ProjectileKind::Bullet => {
            if hit.kind == CollidableKind::Rock {
                state.destroy_rock(hit.coord);
            }
            Fate::Removed
        }
        ProjectileKind::Bombshell => {
            if hit.kind == CollidableKind::Rock {
                state.destroy_rock(hit.coord);
            }
            state.detonate(projectile.pos);
            Fate::Removed
        }
        ProjectileKind::Laser => {
            if hit.kind == CollidableKind::Mirror {
                let face = reflect_off_mirror(projectile, &hit.rect);
                projectile.last_mirror = Some(hit.coord);
                state.events.push(GameEvent::LaserReflected {
                    id: projectile.id,
                    face,
                });
                Fate::Alive
            } else {
                Fate::Removed
            }
        }
    }
}
