//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`. Renderers only
//! see it through the accessors and `WorldSnapshot`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::{Aabb, Bounded};
use super::catalog::{BossSpawn, EnemySpawn, Stage, StageCatalog};
use crate::consts::*;
use crate::settings::Arena;

/// Current phase of a stage run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Stage loaded, first wave not spawned yet
    #[default]
    NotStarted,
    /// Fighting regular waves
    WaveActive,
    /// All waves cleared, boss on the field
    BossActive,
    /// Stage won (terminal for this stage)
    StageClear,
    /// Out of lives (terminal)
    GameOver,
}

impl GamePhase {
    /// Terminal phases stop the tick loop
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::StageClear | GamePhase::GameOver)
    }
}

/// Item types dropped by destroyed enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Restores one life ("cheese")
    LifeRestore,
    /// Raises the missile fan-out by one tier
    PowerUp,
}

/// The player's craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub lives: i32,
    pub health: i32,
    /// Missile fan-out tier (0..=MAX_POWER_LEVEL)
    pub power_level: u8,
    /// Charges on kills; the special move needs a full gauge
    pub special_gauge: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: PLAYER_SPAWN,
            lives: PLAYER_START_LIVES,
            health: PLAYER_MAX_HEALTH,
            power_level: 0,
            special_gauge: 0.0,
        }
    }
}

impl Player {
    /// Back to the spawn point after losing a life. Power pickups are lost.
    pub fn respawn(&mut self) {
        self.health = PLAYER_MAX_HEALTH;
        self.pos = PLAYER_SPAWN;
        self.power_level = 0;
    }

    pub fn charge_special(&mut self, amount: f32) {
        self.special_gauge = (self.special_gauge + amount).min(SPECIAL_GAUGE_MAX);
    }

    pub fn special_ready(&self) -> bool {
        self.special_gauge >= SPECIAL_GAUGE_MAX
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, PLAYER_SIZE)
    }
}

/// A player missile (travels up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    pub pos: Vec2,
}

impl Bounded for Missile {
    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, MISSILE_SIZE)
    }
}

/// A regular enemy (stationary)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
}

impl From<&EnemySpawn> for Enemy {
    fn from(spawn: &EnemySpawn) -> Self {
        Self {
            pos: spawn.position,
        }
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, ENEMY_SIZE)
    }
}

/// The stage boss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub health: i32,
    /// Horizontal patrol direction (+1 right, -1 left)
    pub direction: f32,
    /// Ticks until the next shot
    pub fire_cooldown: u32,
}

impl Boss {
    pub fn new(pos: Vec2, health: i32) -> Self {
        Self {
            pos,
            health,
            direction: 1.0,
            fire_cooldown: BOSS_INITIAL_FIRE_COOLDOWN,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Where a new boss missile appears: centered under the boss
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + BOSS_SIZE / 2.0 - BOSS_MISSILE_SIZE / 2.0,
            self.pos.y + BOSS_SIZE,
        )
    }
}

impl From<&BossSpawn> for Boss {
    fn from(spawn: &BossSpawn) -> Self {
        Boss::new(spawn.position, spawn.health)
    }
}

impl Bounded for Boss {
    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, BOSS_SIZE)
    }
}

/// A boss projectile (travels down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossMissile {
    pub pos: Vec2,
}

impl Bounded for BossMissile {
    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, BOSS_MISSILE_SIZE)
    }
}

/// A pickup left behind by a destroyed enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub pos: Vec2,
}

impl Bounded for Item {
    fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, ITEM_SIZE)
    }
}

/// Things that happened during the last tick, for presentation layers
/// (sound effects, screen flashes, HUD animations)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveStarted { stage: usize, wave: usize },
    MissileFired { count: usize },
    EnemyDestroyed { pos: Vec2 },
    ItemDropped { kind: ItemKind, pos: Vec2 },
    ItemCollected { kind: ItemKind },
    BossSpawned { pos: Vec2, health: i32 },
    BossHit { health: i32 },
    BossFired { pos: Vec2 },
    PlayerHit { damage: i32 },
    LifeLost { lives: i32 },
    SpecialUsed { cleared: usize },
    StageCleared { stage: usize },
    GameOver,
}

/// HUD fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    /// 1-based stage number
    pub stage: usize,
    /// 1-based wave number (0 before the first wave)
    pub wave: usize,
    pub lives: i32,
    pub health: i32,
    pub special_gauge: f32,
    pub power_level: u8,
    pub boss_health: Option<i32>,
}

/// Read-only copy of everything a renderer draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub player: Player,
    pub missiles: Vec<Missile>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub boss: Option<Boss>,
    pub boss_missiles: Vec<BossMissile>,
    pub hud: Hud,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Item-drop RNG
    pub(crate) rng: Pcg32,
    /// Playfield bounds
    pub arena: Arena,
    /// Immutable stage data
    catalog: StageCatalog,
    /// Current stage (0-based)
    pub stage_index: usize,
    /// Current wave (None before the first wave spawns)
    pub wave_index: Option<usize>,
    /// Current phase
    pub phase: GamePhase,
    /// Set once the stage boss has been spawned
    pub boss_appeared: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks until the player's next shot
    pub fire_cooldown: u32,
    pub player: Player,
    pub missiles: Vec<Missile>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub boss: Option<Boss>,
    pub boss_missiles: Vec<BossMissile>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given seed, catalog and arena
    pub fn new(seed: u64, catalog: StageCatalog, arena: Arena) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            catalog,
            stage_index: 0,
            wave_index: None,
            phase: GamePhase::NotStarted,
            boss_appeared: false,
            time_ticks: 0,
            fire_cooldown: 0,
            player: Player::default(),
            missiles: Vec::new(),
            enemies: Vec::new(),
            items: Vec::new(),
            boss: None,
            boss_missiles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Built-in catalog on the default arena
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, StageCatalog::default(), Arena::default())
    }

    /// Back to the starting state of stage 1. The RNG is reseeded so that
    /// a reset run replays identically.
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.stage_index = 0;
        self.wave_index = None;
        self.phase = GamePhase::NotStarted;
        self.boss_appeared = false;
        self.time_ticks = 0;
        self.fire_cooldown = 0;
        self.player = Player::default();
        self.clear_field();
        self.events.clear();
    }

    /// Remove every entity except the player
    pub(crate) fn clear_field(&mut self) {
        self.missiles.clear();
        self.enemies.clear();
        self.items.clear();
        self.boss = None;
        self.boss_missiles.clear();
    }

    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    /// Current stage, or None when the index runs past the catalog
    pub fn current_stage(&self) -> Option<&Stage> {
        self.catalog.stage(self.stage_index)
    }

    /// Spawn every enemy of the current wave
    pub(crate) fn spawn_wave(&mut self) {
        let Some(wave_index) = self.wave_index else {
            return;
        };
        let Some(wave) = self
            .catalog
            .stage(self.stage_index)
            .and_then(|stage| stage.wave(wave_index))
        else {
            return;
        };
        self.enemies.extend(wave.enemies.iter().map(Enemy::from));
        log::info!(
            "Stage {} wave {}: {} enemies",
            self.stage_index + 1,
            wave_index + 1,
            wave.enemies.len()
        );
        self.events.push(GameEvent::WaveStarted {
            stage: self.stage_index,
            wave: wave_index,
        });
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_stage_clear(&self) -> bool {
        self.phase == GamePhase::StageClear
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn boss_missiles(&self) -> &[BossMissile] {
        &self.boss_missiles
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn hud(&self) -> Hud {
        Hud {
            stage: self.stage_index + 1,
            wave: self.wave_index.map_or(0, |w| w + 1),
            lives: self.player.lives,
            health: self.player.health,
            special_gauge: self.player.special_gauge,
            power_level: self.player.power_level,
            boss_health: self.boss.as_ref().map(|b| b.health),
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            phase: self.phase,
            time_ticks: self.time_ticks,
            player: self.player.clone(),
            missiles: self.missiles.clone(),
            enemies: self.enemies.clone(),
            items: self.items.clone(),
            boss: self.boss.clone(),
            boss_missiles: self.boss_missiles.clone(),
            hud: self.hud(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::with_seed(1);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.wave_index, None);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.pos, Vec2::new(300.0, 500.0));
        assert!(state.boss().is_none());
        assert!(!state.is_game_over() && !state.is_stage_clear());
    }

    #[test]
    fn test_hud_numbers_are_one_based() {
        let mut state = GameState::with_seed(1);
        assert_eq!(state.hud().stage, 1);
        assert_eq!(state.hud().wave, 0);
        state.wave_index = Some(2);
        state.boss = Some(Boss::new(Vec2::ZERO, 17));
        let hud = state.hud();
        assert_eq!(hud.wave, 3);
        assert_eq!(hud.boss_health, Some(17));
    }

    #[test]
    fn test_spawn_wave_uses_catalog_positions() {
        let mut state = GameState::with_seed(1);
        state.wave_index = Some(1);
        state.spawn_wave();
        let xs: Vec<f32> = state.enemies.iter().map(|e| e.pos.x).collect();
        assert_eq!(xs, vec![100.0, 300.0, 500.0]);
        assert_eq!(
            state.events,
            vec![GameEvent::WaveStarted { stage: 0, wave: 1 }]
        );
    }

    #[test]
    fn test_spawn_wave_past_catalog_is_noop() {
        let mut state = GameState::with_seed(1);
        state.stage_index = 5;
        state.wave_index = Some(0);
        state.spawn_wave();
        assert!(state.enemies.is_empty());
        assert!(state.current_stage().is_none());
    }

    #[test]
    fn test_boss_muzzle_is_centered_below() {
        let boss = Boss::new(Vec2::new(100.0, 40.0), 10);
        assert_eq!(boss.muzzle(), Vec2::new(165.0, 190.0));
        assert_eq!(boss.fire_cooldown, BOSS_INITIAL_FIRE_COOLDOWN);
    }

    #[test]
    fn test_special_gauge_caps() {
        let mut player = Player::default();
        player.special_gauge = 98.0;
        player.charge_special(SPECIAL_GAUGE_PER_KILL);
        assert_eq!(player.special_gauge, SPECIAL_GAUGE_MAX);
        assert!(player.special_ready());
    }

    #[test]
    fn test_respawn_keeps_lives_and_gauge() {
        let mut player = Player {
            pos: Vec2::new(10.0, 10.0),
            lives: 1,
            health: -5,
            power_level: 2,
            special_gauge: 40.0,
        };
        player.respawn();
        assert_eq!(player.pos, PLAYER_SPAWN);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
        assert_eq!(player.power_level, 0);
        assert_eq!(player.lives, 1);
        assert_eq!(player.special_gauge, 40.0);
    }
}
