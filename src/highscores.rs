//! Hall of fame
//!
//! Persisted as `name: score` lines, tracks the top 3 finished games.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 3;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

impl HighScoreEntry {
    /// Parse `name: score`, splitting on the last separator so names may contain it
    fn parse(line: &str) -> Option<Self> {
        let (name, score) = line.trim().rsplit_once(": ")?;
        Some(Self {
            name: name.to_string(),
            score: score.trim().parse().ok()?,
        })
    }
}

/// High score leaderboard, highest first
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Get the rank a score would achieve (1-indexed, None if it would not be kept)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
            + 1;
        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    /// Add a finished game.
    ///
    /// Existing entries keep their place on ties. Returns the rank achieved
    /// (1-indexed) or None if the score fell off the table.
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Parse a table, skipping malformed lines
    pub fn parse(content: &str) -> Self {
        let mut entries = Vec::new();
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            match HighScoreEntry::parse(line) {
                Some(entry) => entries.push(entry),
                None => log::warn!("Skipping malformed high score line {:?}", line),
            }
        }
        // Stable, so earlier lines stay ahead on ties
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}\n", e.name, e.score))
            .collect()
    }

    /// Load high scores from disk; a missing file means no scores yet
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let scores = Self::parse(&content);
                log::info!("Loaded {} high scores", scores.entries.len());
                Ok(scores)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_text())?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Record a finished game in the table stored at `path`
    pub fn record(path: &Path, name: &str, score: u64) -> Result<Option<usize>> {
        let mut scores = Self::load(path)?;
        let rank = scores.add_score(name, score);
        scores.save(path)?;
        Ok(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::scratch_dir;

    #[test]
    fn test_keeps_top_three_descending() {
        let mut hof = HighScores::new();
        assert_eq!(hof.add_score("a", 100), Some(1));
        assert_eq!(hof.add_score("b", 300), Some(1));
        assert_eq!(hof.add_score("c", 200), Some(2));
        assert_eq!(hof.add_score("d", 50), None);
        assert_eq!(hof.add_score("e", 250), Some(2));

        let names: Vec<&str> = hof.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "e", "c"]);
        assert_eq!(hof.top_score(), Some(300));
    }

    #[test]
    fn test_ties_favour_existing_entries() {
        let mut hof = HighScores::new();
        hof.add_score("first", 500);
        hof.add_score("second", 500);
        hof.add_score("third", 500);
        assert_eq!(hof.potential_rank(500), None);
        assert_eq!(hof.add_score("late", 500), None);
        let names: Vec<&str> = hof.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_parse_skips_malformed() {
        let hof = HighScores::parse("ann: 10\nnot a score\nbo: b: 30\nzed: x\ncat: 20\n");
        assert_eq!(
            hof.entries,
            vec![
                HighScoreEntry {
                    name: "bo: b".into(),
                    score: 30
                },
                HighScoreEntry {
                    name: "cat".into(),
                    score: 20
                },
                HighScoreEntry {
                    name: "ann".into(),
                    score: 10
                },
            ]
        );
    }

    #[test]
    fn test_record_round_trip_on_disk() {
        let path = scratch_dir("hof").join("high_scores.txt");
        assert!(HighScores::load(&path).unwrap().is_empty());

        assert_eq!(HighScores::record(&path, "ada", 1200).unwrap(), Some(1));
        assert_eq!(HighScores::record(&path, "bob", 3400).unwrap(), Some(1));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "bob: 3400\nada: 1200\n");
    }
}
