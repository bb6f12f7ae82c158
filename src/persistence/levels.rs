//! Level layout sources
//!
//! A level file holds one 49-code layout per line; loading a level picks one
//! line at random.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::{GameError, Result};
use crate::sim::LevelGrid;

/// Anything that can hand out a layout for a level number (1-based)
pub trait LevelSource {
    fn load_level(&mut self, level: u32) -> Result<LevelGrid>;
}

fn seeded_rng(seed: Option<u64>) -> Pcg32 {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    Pcg32::seed_from_u64(seed)
}

/// Pick one usable layout line at random and parse it
fn choose_layout(level: u32, lines: &[&str], rng: &mut Pcg32) -> Result<LevelGrid> {
    let line = lines.choose(rng).ok_or(GameError::EmptyLevel { level })?;
    LevelGrid::parse(level, line)
}

fn usable_lines(content: &str) -> Vec<&str> {
    content.lines().filter(|l| !l.trim().is_empty()).collect()
}

/// Layouts read from `<root>/<n>.txt`
#[derive(Debug)]
pub struct DirLevelSource {
    root: PathBuf,
    rng: Pcg32,
}

impl DirLevelSource {
    pub fn new(root: impl Into<PathBuf>, seed: Option<u64>) -> Self {
        Self {
            root: root.into(),
            rng: seeded_rng(seed),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn level_path(&self, level: u32) -> PathBuf {
        self.root.join(format!("{}.txt", level))
    }
}

impl LevelSource for DirLevelSource {
    fn load_level(&mut self, level: u32) -> Result<LevelGrid> {
        let path = self.level_path(level);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::error!("Level file {} does not exist", path.display());
                return Err(GameError::LevelNotFound { level, path });
            }
            Err(e) => return Err(e.into()),
        };

        let grid = choose_layout(level, &usable_lines(&content), &mut self.rng)?;
        log::info!("Loaded level {} from {}", level, path.display());
        Ok(grid)
    }
}

/// Layouts held in memory, keyed by level number
#[derive(Debug)]
pub struct MemoryLevelSource {
    layouts: HashMap<u32, Vec<String>>,
    rng: Pcg32,
}

impl MemoryLevelSource {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            layouts: HashMap::new(),
            rng: seeded_rng(seed),
        }
    }

    pub fn with_layout(mut self, level: u32, layout: impl Into<String>) -> Self {
        self.layouts.entry(level).or_default().push(layout.into());
        self
    }
}

impl LevelSource for MemoryLevelSource {
    fn load_level(&mut self, level: u32) -> Result<LevelGrid> {
        let layouts = self.layouts.get(&level).ok_or_else(|| GameError::LevelNotFound {
            level,
            path: PathBuf::from(format!("<memory>/{}", level)),
        })?;
        let lines: Vec<&str> = layouts.iter().map(String::as_str).collect();
        choose_layout(level, &lines, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::scratch_dir;
    use crate::sim::Tile;
    use crate::sim::test_support::layout;

    #[test]
    fn test_missing_level_file() {
        let dir = scratch_dir("levels-missing");
        let mut source = DirLevelSource::new(&dir, Some(1));
        match source.load_level(3) {
            Err(GameError::LevelNotFound { level, path }) => {
                assert_eq!(level, 3);
                assert_eq!(path, dir.join("3.txt"));
            }
            other => panic!("expected LevelNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_loads_one_of_the_variants() {
        let dir = scratch_dir("levels-variants");
        let a = layout(&[(0, 'r'), (47, 't')], '3');
        let b = layout(&[(1, 'm'), (46, 't')], '4');
        std::fs::write(dir.join("1.txt"), format!("{}\n{}\n\n", a, b)).unwrap();

        let mut source = DirLevelSource::new(&dir, Some(7));
        for _ in 0..20 {
            let grid = source.load_level(1).unwrap();
            let layout = grid.to_layout();
            assert!(layout == a || layout == b);
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let dir = scratch_dir("levels-seed");
        let lines: Vec<String> = (0..8).map(|i| layout(&[(i, 'r')], '3')).collect();
        std::fs::write(dir.join("2.txt"), lines.join("\n")).unwrap();

        let mut a = DirLevelSource::new(&dir, Some(42));
        let mut b = DirLevelSource::new(&dir, Some(42));
        for _ in 0..5 {
            assert_eq!(a.load_level(2).unwrap(), b.load_level(2).unwrap());
        }
    }

    #[test]
    fn test_empty_level_file() {
        let dir = scratch_dir("levels-empty");
        std::fs::write(dir.join("1.txt"), "\n\n").unwrap();
        let mut source = DirLevelSource::new(&dir, Some(1));
        assert!(matches!(source.load_level(1), Err(GameError::EmptyLevel { level: 1 })));
    }

    #[test]
    fn test_memory_source() {
        let mut source = MemoryLevelSource::new(Some(1)).with_layout(1, layout(&[(5, 'r')], '2'));
        assert_eq!(source.load_level(1).unwrap().tile(5), Tile::Rock);
        assert!(matches!(source.load_level(2), Err(GameError::LevelNotFound { level: 2, .. })));
    }
}
