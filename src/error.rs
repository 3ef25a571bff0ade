//! Error types
//!
//! The simulation itself never fails; everything here is raised while
//! loading settings or a stage catalog, before the first tick runs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating game data
#[derive(Error, Debug)]
pub enum Error {
    /// An enemy spawn has a negative or non-finite coordinate
    #[error("stage {stage} wave {wave} spawn {index}: invalid position ({x}, {y})")]
    InvalidSpawn {
        stage: usize,
        wave: usize,
        index: usize,
        x: f32,
        y: f32,
    },

    /// A boss descriptor has bad geometry or non-positive health
    #[error("stage {stage} boss: {reason}")]
    InvalidBoss { stage: usize, reason: String },

    /// Catalog with no stages at all
    #[error("stage catalog is empty")]
    EmptyCatalog,

    /// Arena bounds that cannot hold the player or the boss
    #[error("invalid arena {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    /// Error reading a file from disk
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for game data loading
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
