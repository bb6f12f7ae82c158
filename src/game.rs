//! Game session
//!
//! Ties the simulation to its collaborators: level layouts, saved profiles
//! and the hall of fame. Screens and input devices sit on top of this.

use std::path::PathBuf;

use crate::consts::{MAX_MUZZLE_VELOCITY, MIN_MUZZLE_VELOCITY};
use crate::error::Result;
use crate::highscores::HighScores;
use crate::persistence::{DirLevelSource, LevelSource, Profile, ProfileStore};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, SimulationState, TickInput, tick};

pub struct Game {
    settings: Settings,
    levels: Box<dyn LevelSource>,
    profiles: ProfileStore,
    high_scores_path: PathBuf,
    username: Option<String>,
    state: Option<SimulationState>,
}

impl Game {
    /// Session backed by the asset directory in `settings`
    pub fn new(settings: Settings) -> Self {
        let levels = DirLevelSource::new(settings.level_dir(), settings.seed);
        let profiles = ProfileStore::new(settings.profiles_path());
        let high_scores_path = settings.high_scores_path();
        Self::with_collaborators(settings, Box::new(levels), profiles, high_scores_path)
    }

    pub fn with_collaborators(
        settings: Settings,
        levels: Box<dyn LevelSource>,
        profiles: ProfileStore,
        high_scores_path: PathBuf,
    ) -> Self {
        Self {
            settings,
            levels,
            profiles,
            high_scores_path,
            username: None,
            state: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut SimulationState> {
        self.state.as_mut()
    }

    /// Start from level 0. Returns false (and starts nothing) for a blank name.
    pub fn new_game(&mut self, username: &str) -> Result<bool> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(false);
        }
        self.init_game(username, 0, 0)?;
        Ok(true)
    }

    /// Enter the simulation at a level/score for a player
    pub fn init_game(&mut self, username: &str, level: u32, score: u64) -> Result<()> {
        let grid = self.levels.load_level(level + 1)?;
        match self.state.as_mut() {
            Some(state) => {
                state.viewport = self.settings.viewport();
                state.start_level(grid, level, score);
            }
            None => {
                let mut state = SimulationState::new(grid, self.settings.viewport(), level, score);
                state.muzzle_velocity = self
                    .settings
                    .initial_muzzle_velocity
                    .clamp(MIN_MUZZLE_VELOCITY, MAX_MUZZLE_VELOCITY);
                self.state = Some(state);
            }
        }
        self.username = Some(username.to_string());
        log::info!("{} playing level {} with score {}", username, level + 1, score);
        Ok(())
    }

    /// Move on to the next level after a win
    pub fn continue_playing(&mut self) -> Result<()> {
        let Some((username, level, score)) = self.progress() else {
            log::warn!("Continue requested with no game in progress");
            return Ok(());
        };
        self.init_game(&username, level, score)
    }

    /// Resume a saved profile
    pub fn load_profile(&mut self, profile: &Profile) -> Result<()> {
        self.init_game(&profile.username, profile.levels_completed, profile.score)
    }

    pub fn profiles(&self) -> Result<Vec<Profile>> {
        self.profiles.load()
    }

    pub fn find_profile(&self, username: &str) -> Result<Option<Profile>> {
        self.profiles.find(username)
    }

    /// Persist current progress and leave the level
    pub fn save_and_quit(&mut self) -> Result<()> {
        if let Some((username, level, score)) = self.progress() {
            self.profiles.save(&Profile::new(username, level, score))?;
        }
        self.state = None;
        Ok(())
    }

    pub fn hall_of_fame(&self) -> Result<HighScores> {
        HighScores::load(&self.high_scores_path)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.settings.viewport_width = width;
        self.settings.viewport_height = height;
        if let Some(state) = self.state.as_mut() {
            state.resize(width, height);
        }
    }

    /// Run one simulation tick and return the events it produced.
    ///
    /// A failure to write the hall of fame is logged; the events are still
    /// returned.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let Some(state) = self.state.as_mut() else {
            return Vec::new();
        };
        tick(state, input, dt);
        let events = state.drain_events();

        for event in &events {
            if let GameEvent::GameCompleted { score } = event {
                let name = self.username.as_deref().unwrap_or("anonymous");
                match HighScores::record(&self.high_scores_path, name, *score) {
                    Ok(Some(rank)) => log::info!("{} entered the hall of fame at #{}", name, rank),
                    Ok(None) => log::info!("{} finished with {}, not a high score", name, score),
                    Err(e) => log::error!("Failed to record high score for {}: {}", name, e),
                }
            }
        }
        events
    }

    pub fn phase(&self) -> Option<GamePhase> {
        self.state.as_ref().map(|s| s.phase)
    }

    fn progress(&self) -> Option<(String, u32, u64)> {
        let username = self.username.clone()?;
        let state = self.state.as_ref()?;
        Some((username, state.match_state.level, state.match_state.score))
    }
}
