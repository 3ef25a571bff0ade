//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::motion::{
    drag_player, move_player, update_boss_in_state, update_boss_missiles, update_missiles,
    update_player_fire,
};
use super::progression::{start_stage, trigger_special, update_progression};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Directional keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Currently held directions
    pub held: HeldDirections,
    /// Special-move key went down since the last tick
    pub special: bool,
    /// Accumulated drag since the last tick (direct positioning)
    pub drag: Option<Vec2>,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Returns the phase after the tick. Terminal phases are checked first, so
/// ticking a finished run is a no-op.
pub fn tick(state: &mut GameState, input: &TickInput) -> GamePhase {
    if state.phase.is_terminal() {
        return state.phase;
    }

    state.events.clear();
    state.time_ticks += 1;

    start_stage(state);

    let special = input.special || (input.idle_mode && state.player.special_ready());
    if special {
        trigger_special(state);
    }

    if let Some(delta) = input.drag {
        drag_player(&mut state.player, delta);
    }

    let held = if input.idle_mode {
        autopilot(state)
    } else {
        input.held
    };
    move_player(&mut state.player, &held);

    update_missiles(&mut state.missiles);
    update_boss_missiles(&mut state.boss_missiles, &state.arena);
    update_boss_in_state(state);

    update_player_fire(state);

    resolve_collisions(state);
    update_progression(state);

    state.phase
}

/// Run up to `ticks` ticks with the same input, stopping early on a
/// terminal phase. One-shot inputs (special edge, drag) only apply to the
/// first tick. Events from every tick run are kept.
pub fn step(state: &mut GameState, input: &TickInput, ticks: u32) -> GamePhase {
    let mut input = input.clone();
    let mut events = Vec::new();

    for _ in 0..ticks {
        if state.phase.is_terminal() {
            break;
        }
        tick(state, &input);
        events.append(&mut state.events);
        input.special = false;
        input.drag = None;
    }

    if !events.is_empty() {
        state.events = events;
    }
    state.phase
}

/// Steer toward the nearest target and sidestep falling boss missiles
fn autopilot(state: &GameState) -> HeldDirections {
    let player_center = state.player.pos + Vec2::splat(PLAYER_SIZE / 2.0);
    let mut held = HeldDirections::default();

    // Hold the spawn row
    if state.player.pos.y > PLAYER_SPAWN.y + PLAYER_MOVE_DELTA / 2.0 {
        held.up = true;
    } else if state.player.pos.y < PLAYER_SPAWN.y - PLAYER_MOVE_DELTA / 2.0 {
        held.down = true;
    }

    // Dodge takes priority over aiming
    let threat = state
        .boss_missiles
        .iter()
        .map(|m| m.pos + Vec2::splat(BOSS_MISSILE_SIZE / 2.0))
        .filter(|c| {
            (c.x - player_center.x).abs() < PLAYER_SIZE
                && c.y < player_center.y
                && player_center.y - c.y < 200.0
        })
        .min_by(|a, b| {
            (player_center.y - a.y)
                .partial_cmp(&(player_center.y - b.y))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    if let Some(threat) = threat {
        let dodge_right = if player_center.x + PLAYER_SIZE > state.arena.width {
            false
        } else if player_center.x - PLAYER_SIZE < 0.0 {
            true
        } else {
            threat.x <= player_center.x
        };
        held.right = dodge_right;
        held.left = !dodge_right;
        return held;
    }

    let target_x = state
        .enemies
        .iter()
        .map(|e| e.pos + Vec2::splat(ENEMY_SIZE / 2.0))
        .min_by(|a, b| {
            a.distance_squared(player_center)
                .partial_cmp(&b.distance_squared(player_center))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .or_else(|| {
            state
                .boss
                .as_ref()
                .map(|b| b.pos + Vec2::splat(BOSS_SIZE / 2.0))
        })
        .map(|c| c.x);

    if let Some(target_x) = target_x {
        if target_x < player_center.x - PLAYER_MOVE_DELTA / 2.0 {
            held.left = true;
        } else if target_x > player_center.x + PLAYER_MOVE_DELTA / 2.0 {
            held.right = true;
        }
    }
    held
}
