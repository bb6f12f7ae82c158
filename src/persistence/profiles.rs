//! Saved player profiles
//!
//! One `username%levels%score` record per line, most recently saved first.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A player's saved progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub levels_completed: u32,
    pub score: u64,
}

impl Profile {
    pub fn new(username: impl Into<String>, levels_completed: u32, score: u64) -> Self {
        Self {
            username: username.into(),
            levels_completed,
            score,
        }
    }

    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.trim().split('%');
        let username = parts.next()?;
        let levels_completed = parts.next()?.parse().ok()?;
        let score = parts.next()?.parse().ok()?;
        if parts.next().is_some() || username.is_empty() {
            return None;
        }
        Some(Self::new(username, levels_completed, score))
    }

    fn to_line(&self) -> String {
        format!("{}%{}%{}", self.username, self.levels_completed, self.score)
    }
}

/// Profile records stored in a text file
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All readable profiles; a missing file is an empty store
    pub fn load(&self) -> Result<Vec<Profile>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut profiles = Vec::new();
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            match Profile::parse(line) {
                Some(profile) => profiles.push(profile),
                None => log::warn!("Skipping malformed profile record {:?}", line),
            }
        }
        Ok(profiles)
    }

    pub fn find(&self, username: &str) -> Result<Option<Profile>> {
        Ok(self.load()?.into_iter().find(|p| p.username == username))
    }

    /// Save a profile at the top, replacing any earlier record for the same user
    pub fn save(&self, profile: &Profile) -> Result<()> {
        let mut profiles = self.load()?;
        profiles.retain(|p| p.username != profile.username);
        profiles.insert(0, profile.clone());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = String::new();
        for p in &profiles {
            out.push_str(&p.to_line());
            out.push('\n');
        }
        std::fs::write(&self.path, out)?;
        log::info!(
            "Profile saved: {} ({} levels, score {})",
            profile.username,
            profile.levels_completed,
            profile.score
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::scratch_dir;

    #[test]
    fn test_missing_file_is_empty() {
        let store = ProfileStore::new(scratch_dir("profiles-missing").join("profiles.txt"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_and_moves_to_top() {
        let store = ProfileStore::new(scratch_dir("profiles-save").join("profiles.txt"));
        store.save(&Profile::new("ada", 1, 100)).unwrap();
        store.save(&Profile::new("bob", 2, 700)).unwrap();
        store.save(&Profile::new("ada", 3, 2100)).unwrap();

        let profiles = store.load().unwrap();
        assert_eq!(
            profiles,
            vec![Profile::new("ada", 3, 2100), Profile::new("bob", 2, 700)]
        );
        assert_eq!(store.find("bob").unwrap(), Some(Profile::new("bob", 2, 700)));
        assert_eq!(store.find("eve").unwrap(), None);
    }

    #[test]
    fn test_malformed_records_skipped() {
        let dir = scratch_dir("profiles-malformed");
        let path = dir.join("profiles.txt");
        std::fs::write(&path, "ada%1%100\ngarbage\nbob%x%5\ncy%2%300%extra\n\ndee%0%0\n").unwrap();
        let profiles = ProfileStore::new(path).load().unwrap();
        assert_eq!(
            profiles,
            vec![Profile::new("ada", 1, 100), Profile::new("dee", 0, 0)]
        );
    }
}
