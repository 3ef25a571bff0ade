//! Run settings
//!
//! Loaded from a JSON file on disk; every field has a default so partial
//! files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result, read_file};

/// Playfield bounds, used for boss patrol limits and off-screen culling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: DEFAULT_ARENA_WIDTH,
            height: DEFAULT_ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let arena = Self { width, height };
        arena.validate()?;
        Ok(arena)
    }

    /// Arena must be finite and at least as wide as the boss
    pub fn validate(&self) -> Result<()> {
        let ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width >= BOSS_SIZE
            && self.height >= PLAYER_SIZE;
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidArena {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Rightmost x a boss can occupy before reflecting
    #[inline]
    pub fn boss_max_x(&self) -> f32 {
        (self.width - BOSS_SIZE).max(0.0)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield bounds
    pub arena: Arena,
    /// Fixed RNG seed (None = fresh random seed per run)
    pub seed: Option<u64>,
    /// Maximum ticks run per host frame
    pub max_substeps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            seed: None,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.arena.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let settings = Self::from_json(&read_file(path)?)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings if a path is given, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// The configured seed, or a fresh one from the thread RNG
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Substep cap, never below one tick per frame
    pub fn effective_max_substeps(&self) -> u32 {
        self.max_substeps.max(1)
    }
}
