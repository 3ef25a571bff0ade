//! Stage progression state machine
//!
//! NotStarted -> WaveActive -> BossActive -> StageClear, with GameOver
//! reachable from any active phase. Checked once per tick after collisions.

use super::state::{Boss, GameEvent, GamePhase, GameState};

/// Spawn the first wave of the current stage
pub fn start_stage(state: &mut GameState) {
    if state.phase != GamePhase::NotStarted {
        return;
    }
    state.wave_index = Some(0);
    state.phase = GamePhase::WaveActive;
    state.spawn_wave();
}

/// Evaluate phase transitions for this tick
pub fn update_progression(state: &mut GameState) {
    if state.phase.is_terminal() {
        return;
    }

    if state.player.lives < 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over on stage {} wave {}",
            state.stage_index + 1,
            state.wave_index.map_or(0, |w| w + 1)
        );
        state.events.push(GameEvent::GameOver);
        return;
    }

    match state.phase {
        GamePhase::WaveActive if state.enemies.is_empty() && !state.boss_appeared => {
            advance_wave(state);
        }
        GamePhase::BossActive => {
            if state.boss.as_ref().is_none_or(Boss::is_defeated) {
                state.boss = None;
                clear_stage(state);
            }
        }
        _ => {}
    }
}

/// Next wave if one remains, otherwise the boss, otherwise stage clear
fn advance_wave(state: &mut GameState) {
    let wave = state.wave_index.unwrap_or(0);
    let (has_next, boss_spawn) = match state.current_stage() {
        Some(stage) => (stage.has_wave_after(wave), stage.boss),
        None => (false, None),
    };

    if has_next {
        state.wave_index = Some(wave + 1);
        state.spawn_wave();
    } else if let Some(spawn) = boss_spawn {
        let boss = Boss::from(&spawn);
        log::info!(
            "Boss appears at ({}, {}) with {} health",
            boss.pos.x,
            boss.pos.y,
            boss.health
        );
        state.events.push(GameEvent::BossSpawned {
            pos: boss.pos,
            health: boss.health,
        });
        state.boss = Some(boss);
        state.boss_appeared = true;
        state.phase = GamePhase::BossActive;
    } else {
        clear_stage(state);
    }
}

fn clear_stage(state: &mut GameState) {
    state.phase = GamePhase::StageClear;
    log::info!("Stage {} clear", state.stage_index + 1);
    state.events.push(GameEvent::StageCleared {
        stage: state.stage_index,
    });
}

/// Clear all enemies when the special gauge is full.
///
/// Returns true if the special move fired.
pub fn trigger_special(state: &mut GameState) -> bool {
    if !state.player.special_ready() {
        return false;
    }
    let cleared = state.enemies.len();
    state.enemies.clear();
    state.player.special_gauge = 0.0;
    log::debug!("Special move cleared {} enemies", cleared);
    state.events.push(GameEvent::SpecialUsed { cleared });
    true
}

/// Move on to the next stage after a clear.
///
/// Keeps the player's lives, health and power; clears everything else and
/// re-enters NotStarted. Returns false, leaving the state untouched, when
/// the stage isn't cleared or the catalog has no further stage.
pub fn advance_stage(state: &mut GameState) -> bool {
    if state.phase != GamePhase::StageClear {
        return false;
    }
    let next = state.stage_index + 1;
    if state.catalog().stage(next).is_none() {
        return false;
    }
    state.stage_index = next;
    state.wave_index = None;
    state.boss_appeared = false;
    state.fire_cooldown = 0;
    state.clear_field();
    state.phase = GamePhase::NotStarted;
    log::info!("Advancing to stage {}", next + 1);
    true
}
