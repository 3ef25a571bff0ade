//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (collection order, removals batched per tick)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod catalog;
pub mod collision;
pub mod motion;
pub mod progression;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, Bounded};
pub use catalog::{BossSpawn, EnemySpawn, Stage, StageCatalog, Wave};
pub use collision::resolve_collisions;
pub use progression::{advance_stage, trigger_special};
pub use state::{
    Boss, BossMissile, Enemy, GameEvent, GamePhase, GameState, Hud, Item, ItemKind, Missile,
    Player, WorldSnapshot,
};
pub use tick::{HeldDirections, TickInput, step, tick};
