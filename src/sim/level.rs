//! Level grid and the collidable rectangles derived from it
//!
//! A layout is 48 tile codes on an 8-column grid plus a shot budget digit.
//! Collidables are rebuilt from the grid on every draw and must never be
//! kept across a rebuild.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::error::{GameError, Result};

/// One cell of the level grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Rock,
    Mirror,
    Target,
    /// Special tile; blocks projectiles but has no effect of its own
    Perpetio,
    /// Special tile; drawn only
    Gravitonio,
    /// Wormhole variant 1-8; drawn only
    Wormhole(u8),
}

impl Tile {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'n' => Some(Tile::Empty),
            'r' => Some(Tile::Rock),
            'm' => Some(Tile::Mirror),
            't' => Some(Tile::Target),
            'p' => Some(Tile::Perpetio),
            'g' => Some(Tile::Gravitonio),
            '1'..='8' => Some(Tile::Wormhole(code as u8 - b'0')),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            Tile::Empty => 'n',
            Tile::Rock => 'r',
            Tile::Mirror => 'm',
            Tile::Target => 't',
            Tile::Perpetio => 'p',
            Tile::Gravitonio => 'g',
            Tile::Wormhole(n) => (b'0' + n) as char,
        }
    }

    /// Collidable kind for this tile, if projectiles can hit it
    pub fn collidable_kind(&self) -> Option<CollidableKind> {
        match self {
            Tile::Rock => Some(CollidableKind::Rock),
            Tile::Mirror => Some(CollidableKind::Mirror),
            Tile::Target => Some(CollidableKind::Target),
            Tile::Perpetio => Some(CollidableKind::Perpetio),
            _ => None,
        }
    }
}

/// Gameplay role of a collidable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollidableKind {
    Rock,
    Mirror,
    Target,
    Perpetio,
}

/// A tile rectangle in current viewport pixels, valid until the next rebuild
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collidable {
    pub kind: CollidableKind,
    pub rect: Rect,
    /// Grid index the rectangle came from
    pub coord: usize,
}

/// Whether a draw starts a level or redraws one already in play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Fresh,
    Redraw,
}

/// Static tile data for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelGrid {
    tiles: Vec<Tile>,
    shot_budget: u32,
}

impl LevelGrid {
    /// Parse a 49-code layout line for the given level number
    pub fn parse(level: u32, line: &str) -> Result<Self> {
        let codes: Vec<char> = line.trim_end_matches(['\r', '\n']).chars().collect();
        if codes.len() < LAYOUT_LEN {
            return Err(GameError::MalformedLevel {
                level,
                reason: format!("expected {} codes, found {}", LAYOUT_LEN, codes.len()),
            });
        }

        let mut tiles = Vec::with_capacity(GRID_CELLS);
        for (i, &code) in codes[..GRID_CELLS].iter().enumerate() {
            let tile = Tile::from_code(code).ok_or_else(|| GameError::MalformedLevel {
                level,
                reason: format!("unknown tile code {:?} at index {}", code, i),
            })?;
            tiles.push(tile);
        }

        let budget = codes[SHOT_BUDGET_INDEX];
        let shot_budget = budget.to_digit(10).ok_or_else(|| GameError::MalformedLevel {
            level,
            reason: format!("shot budget {:?} is not a digit", budget),
        })?;

        Ok(Self { tiles, shot_budget })
    }

    pub fn tile(&self, coord: usize) -> Tile {
        self.tiles[coord]
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn shot_budget(&self) -> u32 {
        self.shot_budget
    }

    /// Overwrite a tile in place. `coord` must be a grid cell index.
    pub fn mutate(&mut self, coord: usize, tile: Tile) {
        debug_assert!(coord < GRID_CELLS, "grid coord {} out of range", coord);
        self.tiles[coord] = tile;
    }

    /// Layout string in the on-disk format
    pub fn to_layout(&self) -> String {
        let mut s: String = self.tiles.iter().map(Tile::code).collect();
        if let Some(d) = char::from_digit(self.shot_budget, 10) {
            s.push(d);
        }
        s
    }

    /// Pixel rectangle of a grid cell for the given viewport
    pub fn cell_rect(coord: usize, viewport: Vec2) -> Rect {
        let scale_x = viewport.x / DESIGN_WIDTH;
        let scale_y = viewport.y / DESIGN_HEIGHT;
        let w = TILE_SIZE * scale_x;
        let h = TILE_SIZE * scale_y;
        Rect::new(
            GRID_ORIGIN_X * scale_x + (coord % GRID_COLUMNS) as f32 * w,
            GRID_ORIGIN_Y * scale_y + (coord / GRID_COLUMNS) as f32 * h,
            w,
            h,
        )
    }

    /// Build the collidable list for the current viewport.
    ///
    /// Only the first target counts; later ones are treated as empty. The
    /// shot budget is returned only for a fresh draw so a redraw never resets
    /// the shot counters.
    pub fn build_collidables(&self, viewport: Vec2, mode: DrawMode) -> (Vec<Collidable>, Option<u32>) {
        let mut collidables = Vec::new();
        let mut target_found = false;

        for (coord, tile) in self.tiles.iter().enumerate() {
            let Some(kind) = tile.collidable_kind() else {
                continue;
            };
            if kind == CollidableKind::Target {
                if target_found {
                    continue;
                }
                target_found = true;
            }
            collidables.push(Collidable {
                kind,
                rect: Self::cell_rect(coord, viewport),
                coord,
            });
        }

        let max_shots = match mode {
            DrawMode::Fresh => Some(self.shot_budget),
            DrawMode::Redraw => None,
        };
        (collidables, max_shots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::test_support::layout;

    #[test]
    fn test_parse_layout() {
        let line = format!("{}\n", layout(&[(0, 'r'), (9, 'm'), (47, 't'), (3, '5')], '4'));
        let grid = LevelGrid::parse(1, &line).unwrap();
        assert_eq!(grid.tile(0), Tile::Rock);
        assert_eq!(grid.tile(9), Tile::Mirror);
        assert_eq!(grid.tile(47), Tile::Target);
        assert_eq!(grid.tile(3), Tile::Wormhole(5));
        assert_eq!(grid.shot_budget(), 4);
        assert_eq!(grid.to_layout(), line.trim_end());
    }

    #[test]
    fn test_parse_rejects_short_and_unknown() {
        assert!(matches!(
            LevelGrid::parse(2, "rrn"),
            Err(GameError::MalformedLevel { level: 2, .. })
        ));
        let bad = layout(&[(5, 'x')], '3');
        assert!(LevelGrid::parse(1, &bad).is_err());
        let bad_budget = layout(&[], 'z');
        assert!(LevelGrid::parse(1, &bad_budget).is_err());
    }

    #[test]
    fn test_cell_rect_scaling() {
        let rect = LevelGrid::cell_rect(9, Vec2::new(1920.0, 1080.0));
        assert_eq!(rect, Rect::new(660.0, 180.0, 180.0, 180.0));

        let half = LevelGrid::cell_rect(9, Vec2::new(960.0, 540.0));
        assert_eq!(half, Rect::new(330.0, 90.0, 90.0, 90.0));
    }

    #[test]
    fn test_collidables_only_for_solid_tiles() {
        let grid =
            LevelGrid::parse(1, &layout(&[(0, 'r'), (1, 'm'), (2, 't'), (3, 'p'), (4, 'g'), (5, '7')], '5'))
                .unwrap();
        let (collidables, max) = grid.build_collidables(Vec2::new(1920.0, 1080.0), DrawMode::Fresh);
        let coords: Vec<usize> = collidables.iter().map(|c| c.coord).collect();
        assert_eq!(coords, vec![0, 1, 2, 3]);
        assert_eq!(max, Some(5));
    }

    #[test]
    fn test_single_target_invariant() {
        let grid = LevelGrid::parse(1, &layout(&[(10, 't'), (20, 't'), (30, 't')], '3')).unwrap();
        let (collidables, _) = grid.build_collidables(Vec2::new(1280.0, 720.0), DrawMode::Fresh);
        let targets: Vec<usize> = collidables
            .iter()
            .filter(|c| c.kind == CollidableKind::Target)
            .map(|c| c.coord)
            .collect();
        assert_eq!(targets, vec![10]);
    }

    #[test]
    fn test_redraw_does_not_report_shots() {
        let grid = LevelGrid::parse(1, &layout(&[(0, 'r')], '6')).unwrap();
        let (_, max) = grid.build_collidables(Vec2::new(800.0, 600.0), DrawMode::Redraw);
        assert_eq!(max, None);
    }

    #[test]
    fn test_mutate_removes_collidable() {
        let mut grid = LevelGrid::parse(1, &layout(&[(12, 'r'), (13, 'r')], '2')).unwrap();
        grid.mutate(12, Tile::Empty);
        let (collidables, _) = grid.build_collidables(Vec2::new(1920.0, 1080.0), DrawMode::Redraw);
        assert_eq!(collidables.len(), 1);
        assert_eq!(collidables[0].coord, 13);
    }
}
