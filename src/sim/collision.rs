//! Collision detection against level geometry
//!
//! Everything here is an axis-aligned rectangle test: projectile hit boxes
//! against tile rectangles, and the bombshell blast square against rocks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{Collidable, CollidableKind};
use crate::consts::*;

/// Axis-aligned rectangle in viewport pixels (origin at the lower-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle with its lower-left corner at `origin`
    pub fn at(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// First collidable (in list order) the hit box overlaps
pub fn first_collision<'a>(hit_box: &Rect, collidables: &'a [Collidable]) -> Option<&'a Collidable> {
    collidables.iter().find(|c| hit_box.overlaps(&c.rect))
}

/// Like [`first_collision`], ignoring the collidable at cell `skip`
pub fn first_collision_except<'a>(
    hit_box: &Rect,
    collidables: &'a [Collidable],
    skip: Option<usize>,
) -> Option<&'a Collidable> {
    collidables
        .iter()
        .find(|c| Some(c.coord) != skip && hit_box.overlaps(&c.rect))
}

/// Blast radius for the current viewport
pub fn blast_radius(viewport: Vec2) -> f32 {
    ((0.75 * viewport.x) / 8.0 + viewport.y / 6.0) / 2.0
}

/// Bounding square of a bombshell blast.
///
/// The shell position is its sprite's lower-left corner, so the square is
/// shifted by the sprite size to centre on what the player sees.
pub fn blast_rect(shell_pos: Vec2, viewport: Vec2) -> Rect {
    let radius = blast_radius(viewport);
    Rect::new(
        shell_pos.x - radius + BLAST_SPRITE_OFFSET,
        shell_pos.y - radius + BLAST_SPRITE_OFFSET,
        2.0 * radius,
        2.0 * radius,
    )
}

/// Grid coords of every rock caught in a blast. Other tiles are blast-proof.
pub fn blast_victims(shell_pos: Vec2, viewport: Vec2, collidables: &[Collidable]) -> Vec<usize> {
    let blast = blast_rect(shell_pos, viewport);
    collidables
        .iter()
        .filter(|c| c.kind == CollidableKind::Rock && blast.overlaps(&c.rect))
        .map(|c| c.coord)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rock(coord: usize, rect: Rect) -> Collidable {
        Collidable {
            kind: CollidableKind::Rock,
            rect,
            coord,
        }
    }

    #[test]
    fn test_overlap_strict_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Shared edge is not an overlap
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(50.0, 50.0, 1.0, 1.0)));
    }

    #[test]
    fn test_first_collision_uses_list_order() {
        let list = vec![
            rock(3, Rect::new(0.0, 0.0, 100.0, 100.0)),
            rock(4, Rect::new(50.0, 0.0, 100.0, 100.0)),
        ];
        let hit = Rect::new(60.0, 10.0, 10.0, 10.0);
        assert_eq!(first_collision(&hit, &list).map(|c| c.coord), Some(3));

        let miss = Rect::new(500.0, 500.0, 10.0, 10.0);
        assert!(first_collision(&miss, &list).is_none());
    }

    #[test]
    fn test_first_collision_except_skips_one_cell() {
        let list = vec![
            rock(3, Rect::new(0.0, 0.0, 100.0, 100.0)),
            rock(4, Rect::new(50.0, 0.0, 100.0, 100.0)),
        ];
        let hit = Rect::new(60.0, 10.0, 10.0, 10.0);
        assert_eq!(first_collision_except(&hit, &list, Some(3)).map(|c| c.coord), Some(4));
        assert_eq!(first_collision_except(&hit, &list, None).map(|c| c.coord), Some(3));

        let only_first = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(first_collision_except(&only_first, &list, Some(3)).is_none());
    }

    #[test]
    fn test_blast_radius_at_design_resolution() {
        // (0.75 * 1920 / 8 + 1080 / 6) / 2 = (180 + 180) / 2
        assert_eq!(blast_radius(Vec2::new(1920.0, 1080.0)), 180.0);
    }

    #[test]
    fn test_blast_rect_offset() {
        let rect = blast_rect(Vec2::new(1000.0, 500.0), Vec2::new(1920.0, 1080.0));
        assert_eq!(rect, Rect::new(910.0, 410.0, 360.0, 360.0));
    }

    #[test]
    fn test_blast_spares_non_rocks() {
        let viewport = Vec2::new(1920.0, 1080.0);
        let near = Rect::new(1000.0, 500.0, 180.0, 180.0);
        let list = vec![
            rock(1, near),
            Collidable {
                kind: CollidableKind::Mirror,
                rect: near,
                coord: 2,
            },
            Collidable {
                kind: CollidableKind::Target,
                rect: near,
                coord: 3,
            },
            Collidable {
                kind: CollidableKind::Perpetio,
                rect: near,
                coord: 4,
            },
            rock(5, Rect::new(1800.0, 1000.0, 10.0, 10.0)),
        ];
        assert_eq!(blast_victims(Vec2::new(1000.0, 500.0), viewport, &list), vec![1]);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, aw in 0.5f32..200.0, ah in 0.5f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bw in 0.5f32..200.0, bh in 0.5f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
