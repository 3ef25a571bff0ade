//! Nyan Shooter - a wave-and-boss arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, progression)
//! - `platform`: Host-side input assembly and fixed-timestep driving
//! - `settings`: Arena bounds and run configuration
//! - `error`: Load-time validation and I/O errors

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::{Arena, Settings};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (16 ms, ~60 Hz)
    pub const SIM_DT: f32 = 0.016;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default arena dimensions
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 800.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(300.0, 500.0);
    pub const PLAYER_START_LIVES: i32 = 3;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    /// Per-axis movement per tick for each held direction
    pub const PLAYER_MOVE_DELTA: f32 = 10.0;
    pub const MAX_POWER_LEVEL: u8 = 2;
    /// Ticks between player shots
    pub const FIRE_RATE: u32 = 10;

    /// Special gauge
    pub const SPECIAL_GAUGE_MAX: f32 = 100.0;
    pub const SPECIAL_GAUGE_PER_KILL: f32 = 5.0;

    /// Player missile
    pub const MISSILE_SIZE: f32 = 15.0;
    pub const MISSILE_SPEED: f32 = 15.0;

    pub const ENEMY_SIZE: f32 = 50.0;
    /// Health lost when the player rams an enemy
    pub const ENEMY_CONTACT_DAMAGE: i32 = 25;

    /// Boss defaults
    pub const BOSS_SIZE: f32 = 150.0;
    pub const BOSS_MOVE_SPEED: f32 = 3.0;
    /// Cooldown of a freshly spawned boss before its first shot
    pub const BOSS_INITIAL_FIRE_COOLDOWN: u32 = 100;
    /// Ticks between boss shots (2 s at 60 Hz)
    pub const BOSS_FIRE_INTERVAL: u32 = 120;

    pub const BOSS_MISSILE_SIZE: f32 = 20.0;
    pub const BOSS_MISSILE_SPEED: f32 = 8.0;
    pub const BOSS_MISSILE_DAMAGE: i32 = 20;

    pub const ITEM_SIZE: f32 = 25.0;
    /// Item drop trial draws uniformly from `0..ITEM_DROP_ROLLS`
    pub const ITEM_DROP_ROLLS: u32 = 8;
}
