//! Laser reflection off mirror tiles
//!
//! The face that was hit is the mirror edge closest to the laser's hit-box
//! centre. Top or bottom closest means a horizontal face; otherwise vertical.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::projectile::Projectile;

/// Orientation of the mirror face a laser struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorFace {
    /// Top or bottom edge; flips vertical travel
    Horizontal,
    /// Left or right edge; flips horizontal travel
    Vertical,
}

/// Classify the mirror face hit by a point.
///
/// Ties between a horizontal and a vertical edge resolve to horizontal.
pub fn classify_face(point: Vec2, mirror: &Rect) -> MirrorFace {
    let top = mirror.y + mirror.height - point.y;
    let bottom = point.y - mirror.y;
    let left = point.x - mirror.x;
    let right = mirror.x + mirror.width - point.x;

    let min = top.min(bottom).min(left).min(right);
    if min == top || min == bottom {
        MirrorFace::Horizontal
    } else {
        MirrorFace::Vertical
    }
}

/// Flip a projectile's travel for the given face
pub fn reflect(projectile: &mut Projectile, face: MirrorFace) {
    match face {
        MirrorFace::Horizontal => {
            projectile.vel.y = -projectile.vel.y;
            projectile.angle = -projectile.angle;
        }
        MirrorFace::Vertical => {
            projectile.vel.x = -projectile.vel.x;
            projectile.angle = 180.0 - projectile.angle;
        }
    }
}

/// Reflect a laser off the mirror it overlaps, returning the face used
pub fn reflect_off_mirror(laser: &mut Projectile, mirror: &Rect) -> MirrorFace {
    let face = classify_face(laser.center(), mirror);
    reflect(laser, face);
    face
}
