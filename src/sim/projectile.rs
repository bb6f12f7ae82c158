//! Projectiles and their per-tick kinematics
//!
//! Speeds are pixels per tick. Gravity is mass * 9.81 subtracted from the
//! vertical velocity once per tick for any kind with non-zero mass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Projectile kinds, in the order the player cycles through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Bullet,
    Bombshell,
    Laser,
}

impl ProjectileKind {
    pub const ALL: [ProjectileKind; 3] = [
        ProjectileKind::Bullet,
        ProjectileKind::Bombshell,
        ProjectileKind::Laser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectileKind::Bullet => "bullet",
            ProjectileKind::Bombshell => "bomb",
            ProjectileKind::Laser => "laser",
        }
    }

    /// Next kind in the cycle
    pub fn next(self) -> Self {
        match self {
            ProjectileKind::Bullet => ProjectileKind::Bombshell,
            ProjectileKind::Bombshell => ProjectileKind::Laser,
            ProjectileKind::Laser => ProjectileKind::Bullet,
        }
    }

    pub fn mass(&self) -> f32 {
        match self {
            ProjectileKind::Bullet => BULLET_MASS,
            ProjectileKind::Bombshell => BOMBSHELL_MASS,
            ProjectileKind::Laser => 0.0,
        }
    }

    /// Collision box size, independent of how the projectile is drawn
    pub fn hit_box(&self) -> Vec2 {
        let (w, h) = match self {
            ProjectileKind::Bullet => BULLET_HIT_BOX,
            ProjectileKind::Bombshell => BOMBSHELL_HIT_BOX,
            ProjectileKind::Laser => LASER_HIT_BOX,
        };
        Vec2::new(w, h)
    }

    pub fn visual_size(&self) -> Vec2 {
        let (w, h) = match self {
            ProjectileKind::Bullet => BULLET_VISUAL_SIZE,
            ProjectileKind::Bombshell => BOMBSHELL_VISUAL_SIZE,
            ProjectileKind::Laser => LASER_VISUAL_SIZE,
        };
        Vec2::new(w, h)
    }

    /// Launch speed for a muzzle velocity setting (lasers ignore it)
    pub fn launch_speed(&self, muzzle_velocity: u8) -> f32 {
        let muzzle = muzzle_velocity as f32;
        match self {
            ProjectileKind::Bullet => BULLET_BASE_SPEED * muzzle,
            ProjectileKind::Bombshell => BOMBSHELL_BASE_SPEED * muzzle * BOMBSHELL_SPEED_FACTOR,
            ProjectileKind::Laser => LASER_SPEED,
        }
    }
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    /// Lower-left corner of the hit box
    pub pos: Vec2,
    /// Direction of travel (degrees)
    pub angle: f32,
    pub speed: f32,
    /// Seconds of flight
    pub time: f32,
    /// Per-tick displacement
    pub vel: Vec2,
    /// Per-tick vertical slowdown (zero for massless kinds)
    pub gravity: f32,
    pub hit_box: Vec2,
    pub visual_size: Vec2,
    /// Mirror cell a laser last bounced off, cleared once it is clear of it
    pub last_mirror: Option<usize>,
}

impl Projectile {
    pub fn new(id: u32, kind: ProjectileKind, pos: Vec2, angle: f32, speed: f32) -> Self {
        let rad = angle.to_radians();
        Self {
            id,
            kind,
            pos,
            angle,
            speed,
            time: 0.0,
            vel: Vec2::new(speed * rad.cos(), speed * rad.sin()),
            gravity: kind.mass() * GRAVITY,
            hit_box: kind.hit_box(),
            visual_size: kind.visual_size(),
            last_mirror: None,
        }
    }

    /// Launch from the cannon with the player's muzzle velocity setting
    pub fn launch(id: u32, kind: ProjectileKind, pos: Vec2, angle: f32, muzzle_velocity: u8) -> Self {
        Self::new(id, kind, pos, angle, kind.launch_speed(muzzle_velocity))
    }

    #[inline]
    pub fn affected_by_gravity(&self) -> bool {
        self.kind.mass() > 0.0
    }

    /// Advance one fixed tick
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
        if self.affected_by_gravity() {
            self.vel.y -= self.gravity;
        }
        self.pos += self.vel;
    }

    pub fn hit_rect(&self) -> Rect {
        Rect::at(self.pos, self.hit_box)
    }

    /// Centre of the hit box
    pub fn center(&self) -> Vec2 {
        self.pos + self.hit_box / 2.0
    }

    pub fn is_out_of_bounds(&self, viewport: Vec2) -> bool {
        self.pos.x < 0.0 || self.pos.x > viewport.x || self.pos.y < 0.0 || self.pos.y > viewport.y
    }
}

/// Live projectiles, one collection per kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    pub bullets: Vec<Projectile>,
    pub bombshells: Vec<Projectile>,
    pub lasers: Vec<Projectile>,
}

impl Registry {
    pub fn of_kind(&self, kind: ProjectileKind) -> &Vec<Projectile> {
        match kind {
            ProjectileKind::Bullet => &self.bullets,
            ProjectileKind::Bombshell => &self.bombshells,
            ProjectileKind::Laser => &self.lasers,
        }
    }

    pub fn of_kind_mut(&mut self, kind: ProjectileKind) -> &mut Vec<Projectile> {
        match kind {
            ProjectileKind::Bullet => &mut self.bullets,
            ProjectileKind::Bombshell => &mut self.bombshells,
            ProjectileKind::Laser => &mut self.lasers,
        }
    }

    pub fn insert(&mut self, projectile: Projectile) {
        self.of_kind_mut(projectile.kind).push(projectile);
    }

    /// All live projectiles, bullets first, then bombshells, then lasers
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.bullets.iter().chain(&self.bombshells).chain(&self.lasers)
    }

    pub fn get(&self, id: u32) -> Option<&Projectile> {
        self.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.bullets.len() + self.bombshells.len() + self.lasers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
        self.bombshells.clear();
        self.lasers.clear();
    }
}
