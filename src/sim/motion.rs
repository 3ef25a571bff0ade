//! Per-entity motion, cooldown timers and spawning
//!
//! Each updater touches one entity kind. Culling happens right after the
//! move so a missile never survives a tick outside the arena.

use glam::Vec2;
use rand::Rng;

use super::state::{Boss, BossMissile, GameEvent, GameState, ItemKind, Missile, Player};
use super::tick::HeldDirections;
use crate::consts::*;
use crate::settings::Arena;

/// Apply held directions. Diagonals add up; no clamping to the arena.
pub fn move_player(player: &mut Player, held: &HeldDirections) {
    let mut delta = Vec2::ZERO;
    if held.left {
        delta.x -= PLAYER_MOVE_DELTA;
    }
    if held.right {
        delta.x += PLAYER_MOVE_DELTA;
    }
    if held.up {
        delta.y -= PLAYER_MOVE_DELTA;
    }
    if held.down {
        delta.y += PLAYER_MOVE_DELTA;
    }
    player.pos += delta;
}

/// Direct positioning from a drag gesture
pub fn drag_player(player: &mut Player, delta: Vec2) {
    if delta.is_finite() {
        player.pos += delta;
    }
}

/// Move player missiles up and drop those past the top edge
pub fn update_missiles(missiles: &mut Vec<Missile>) {
    for missile in missiles.iter_mut() {
        missile.pos.y -= MISSILE_SPEED;
    }
    missiles.retain(|m| m.pos.y >= 0.0);
}

/// Move boss missiles down and drop those past the bottom edge
pub fn update_boss_missiles(missiles: &mut Vec<BossMissile>, arena: &Arena) {
    for missile in missiles.iter_mut() {
        missile.pos.y += BOSS_MISSILE_SPEED;
    }
    missiles.retain(|m| m.pos.y <= arena.height);
}

/// Patrol the boss horizontally and run its fire timer.
///
/// Returns the spawn position of a boss missile fired this tick.
pub fn update_boss(boss: &mut Boss, arena: &Arena) -> Option<Vec2> {
    boss.pos.x += BOSS_MOVE_SPEED * boss.direction;

    let max_x = arena.boss_max_x();
    if boss.pos.x <= 0.0 {
        boss.pos.x = 0.0;
        boss.direction = 1.0;
    } else if boss.pos.x >= max_x {
        boss.pos.x = max_x;
        boss.direction = -1.0;
    }

    boss.fire_cooldown = boss.fire_cooldown.saturating_sub(1);
    if boss.fire_cooldown == 0 {
        boss.fire_cooldown = BOSS_FIRE_INTERVAL;
        Some(boss.muzzle())
    } else {
        None
    }
}

/// Missile spawn positions for the player's current power level
pub fn fire_pattern(player: &Player) -> Vec<Vec2> {
    let Vec2 { x, y } = player.pos;
    let half_missile = MISSILE_SIZE / 2.0;
    match player.power_level {
        0 => vec![Vec2::new(x + PLAYER_SIZE / 2.0 - half_missile, y)],
        1 => vec![
            Vec2::new(x + PLAYER_SIZE / 4.0 - half_missile, y),
            Vec2::new(x + PLAYER_SIZE * 3.0 / 4.0 - half_missile, y),
        ],
        _ => vec![
            Vec2::new(x + PLAYER_SIZE / 2.0 - half_missile, y),
            Vec2::new(x, y),
            Vec2::new(x + PLAYER_SIZE - MISSILE_SIZE, y),
        ],
    }
}

/// Run the player's fire timer, spawning missiles when it elapses.
///
/// The timer starts at zero so the very first tick fires.
pub fn update_player_fire(state: &mut GameState) {
    state.fire_cooldown = state.fire_cooldown.saturating_sub(1);
    if state.fire_cooldown > 0 {
        return;
    }

    let shots = fire_pattern(&state.player);
    let count = shots.len();
    state
        .missiles
        .extend(shots.into_iter().map(|pos| Missile { pos }));
    state.fire_cooldown = FIRE_RATE;
    state.events.push(GameEvent::MissileFired { count });
}

/// Boss update plus missile spawn, if a boss is on the field
pub fn update_boss_in_state(state: &mut GameState) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    if let Some(pos) = update_boss(boss, &state.arena) {
        state.boss_missiles.push(BossMissile { pos });
        state.events.push(GameEvent::BossFired { pos });
    }
}

/// Independent per-kill drop trial: 1/8 life restore, 1/8 power-up
pub fn roll_item_drop(rng: &mut impl Rng) -> Option<ItemKind> {
    match rng.random_range(0..ITEM_DROP_ROLLS) {
        0 => Some(ItemKind::LifeRestore),
        1 => Some(ItemKind::PowerUp),
        _ => None,
    }
}
