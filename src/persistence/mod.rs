//! File-backed collaborators of the simulation
//!
//! - `levels`: pre-authored level layouts, one random variant per level
//! - `profiles`: saved player progress
//!
//! Missing files are treated as empty stores; malformed records are skipped.

pub mod levels;
pub mod profiles;

pub use levels::{DirLevelSource, LevelSource, MemoryLevelSource};
pub use profiles::{Profile, ProfileStore};

#[cfg(test)]
pub(crate) fn scratch_dir(name: &str) -> std::path::PathBuf {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "cannonade-{}-{}-{}",
        name,
        std::process::id(),
        n
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
