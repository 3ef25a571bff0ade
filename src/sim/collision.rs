//! Collision detection and response
//!
//! All pairwise checks in a tick run against the same positions. Hits only
//! mark entities in per-collection removal masks; the masks are applied in
//! one pass at the end, so an entity consumed by an earlier check is
//! skipped by later ones instead of being removed mid-iteration.

use super::aabb::Bounded;
use super::motion::roll_item_drop;
use super::state::{GameEvent, GameState, Item, ItemKind};
use crate::consts::*;

/// Pending removals for one tick
#[derive(Debug, Default)]
struct Removals {
    missiles: Vec<bool>,
    enemies: Vec<bool>,
    boss_missiles: Vec<bool>,
    items: Vec<bool>,
}

impl Removals {
    fn for_state(state: &GameState) -> Self {
        Self {
            missiles: vec![false; state.missiles.len()],
            enemies: vec![false; state.enemies.len()],
            boss_missiles: vec![false; state.boss_missiles.len()],
            items: vec![false; state.items.len()],
        }
    }

    fn apply(self, state: &mut GameState) {
        retain_unmarked(&mut state.missiles, &self.missiles);
        retain_unmarked(&mut state.enemies, &self.enemies);
        retain_unmarked(&mut state.boss_missiles, &self.boss_missiles);
        retain_unmarked(&mut state.items, &self.items);
    }
}

fn retain_unmarked<T>(items: &mut Vec<T>, marked: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !marked[idx];
        idx += 1;
        keep
    });
}

/// Resolve every collision pairing for this tick, in order:
/// missile/enemy, missile/boss, player/enemy, player/boss missile,
/// player/item, then the death check.
pub fn resolve_collisions(state: &mut GameState) {
    let mut removals = Removals::for_state(state);
    // Drops are appended after the item pass so a fresh drop can't be
    // picked up on the tick it appears.
    let mut dropped: Vec<Item> = Vec::new();

    // Missile x Enemy
    for (mi, missile) in state.missiles.iter().enumerate() {
        if removals.missiles[mi] {
            continue;
        }
        for (ei, enemy) in state.enemies.iter().enumerate() {
            if removals.enemies[ei] || !missile.hits(enemy) {
                continue;
            }
            removals.missiles[mi] = true;
            removals.enemies[ei] = true;
            state.player.charge_special(SPECIAL_GAUGE_PER_KILL);
            state
                .events
                .push(GameEvent::EnemyDestroyed { pos: enemy.pos });

            if let Some(kind) = roll_item_drop(&mut state.rng) {
                dropped.push(Item {
                    kind,
                    pos: enemy.pos,
                });
                state.events.push(GameEvent::ItemDropped {
                    kind,
                    pos: enemy.pos,
                });
            }
            break;
        }
    }

    // Missile x Boss
    if let Some(boss) = state.boss.as_mut() {
        for (mi, missile) in state.missiles.iter().enumerate() {
            if removals.missiles[mi] || !missile.hits(&*boss) {
                continue;
            }
            removals.missiles[mi] = true;
            boss.health -= 1;
            state.events.push(GameEvent::BossHit {
                health: boss.health,
            });
        }
    }

    // Player x Enemy
    for (ei, enemy) in state.enemies.iter().enumerate() {
        if removals.enemies[ei] || !state.player.hits(enemy) {
            continue;
        }
        removals.enemies[ei] = true;
        state.player.health -= ENEMY_CONTACT_DAMAGE;
        state.events.push(GameEvent::PlayerHit {
            damage: ENEMY_CONTACT_DAMAGE,
        });
    }

    // Player x BossMissile
    for (bi, missile) in state.boss_missiles.iter().enumerate() {
        if !state.player.hits(missile) {
            continue;
        }
        removals.boss_missiles[bi] = true;
        state.player.health -= BOSS_MISSILE_DAMAGE;
        state.events.push(GameEvent::PlayerHit {
            damage: BOSS_MISSILE_DAMAGE,
        });
    }

    // Player x Item
    for (ii, item) in state.items.iter().enumerate() {
        if !state.player.hits(item) {
            continue;
        }
        removals.items[ii] = true;
        match item.kind {
            ItemKind::LifeRestore => state.player.lives += 1,
            ItemKind::PowerUp => {
                state.player.power_level = (state.player.power_level + 1).min(MAX_POWER_LEVEL);
            }
        }
        log::debug!("Picked up {:?}", item.kind);
        state
            .events
            .push(GameEvent::ItemCollected { kind: item.kind });
    }

    // Death check
    if state.player.health <= 0 {
        state.player.lives -= 1;
        log::debug!("Life lost, {} remaining", state.player.lives);
        state.events.push(GameEvent::LifeLost {
            lives: state.player.lives,
        });
        if state.player.lives >= 0 {
            state.player.respawn();
        }
    }

    removals.apply(state);
    state.items.extend(dropped);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Boss, BossMissile, Enemy, Missile};
    use glam::Vec2;

    fn empty_state() -> GameState {
        let mut state = GameState::with_seed(42);
        state.player.pos = Vec2::new(300.0, 500.0);
        state
    }

    fn missile(x: f32, y: f32) -> Missile {
        Missile {
            pos: Vec2::new(x, y),
        }
    }

    fn enemy(x: f32, y: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_missile_kills_enemy_and_charges_gauge() {
        let mut state = empty_state();
        state.missiles.push(missile(210.0, 120.0));
        state.enemies.push(enemy(200.0, 100.0));
        state.enemies.push(enemy(600.0, 100.0));

        resolve_collisions(&mut state);

        assert!(state.missiles.is_empty());
        assert_eq!(state.enemies, vec![enemy(600.0, 100.0)]);
        assert_eq!(state.player.special_gauge, 5.0);
        assert!(state
            .events
            .contains(&GameEvent::EnemyDestroyed { pos: Vec2::new(200.0, 100.0) }));
        // Any drop lands where the enemy died
        assert!(state.items.iter().all(|i| i.pos == Vec2::new(200.0, 100.0)));
        assert!(state.items.len() <= 1);
    }

    #[test]
    fn test_one_missile_kills_one_enemy() {
        let mut state = empty_state();
        // Overlaps both stacked enemies
        state.missiles.push(missile(240.0, 140.0));
        state.enemies.push(enemy(200.0, 100.0));
        state.enemies.push(enemy(245.0, 100.0));

        resolve_collisions(&mut state);

        assert!(state.missiles.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.player.special_gauge, 5.0);
    }

    #[test]
    fn test_two_missiles_on_one_enemy() {
        let mut state = empty_state();
        state.missiles.push(missile(210.0, 120.0));
        state.missiles.push(missile(215.0, 125.0));
        state.enemies.push(enemy(200.0, 100.0));

        resolve_collisions(&mut state);

        // The second missile finds the enemy already consumed
        assert_eq!(state.missiles, vec![missile(215.0, 125.0)]);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.special_gauge, 5.0);
    }

    #[test]
    fn test_gauge_caps_at_max() {
        let mut state = empty_state();
        state.player.special_gauge = 97.0;
        state.missiles.push(missile(210.0, 120.0));
        state.enemies.push(enemy(200.0, 100.0));
        resolve_collisions(&mut state);
        assert_eq!(state.player.special_gauge, SPECIAL_GAUGE_MAX);
    }

    #[test]
    fn test_missile_hits_boss_once() {
        let mut state = empty_state();
        state.boss = Some(Boss::new(Vec2::new(100.0, 50.0), 10));
        state.missiles.push(missile(150.0, 150.0));
        state.missiles.push(missile(160.0, 160.0));
        state.missiles.push(missile(700.0, 150.0));

        resolve_collisions(&mut state);

        assert_eq!(state.boss.as_ref().unwrap().health, 8);
        assert_eq!(state.missiles, vec![missile(700.0, 150.0)]);
    }

    #[test]
    fn test_missile_spent_on_enemy_skips_boss() {
        let mut state = empty_state();
        state.boss = Some(Boss::new(Vec2::new(100.0, 50.0), 10));
        state.enemies.push(enemy(140.0, 140.0));
        state.missiles.push(missile(150.0, 150.0));

        resolve_collisions(&mut state);

        assert_eq!(state.boss.as_ref().unwrap().health, 10);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_player_rams_enemy() {
        let mut state = empty_state();
        state.enemies.push(enemy(320.0, 520.0));
        resolve_collisions(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.health, 75);
        assert_eq!(state.player.special_gauge, 0.0);
    }

    #[test]
    fn test_enemy_shot_this_tick_does_not_hurt_player() {
        let mut state = empty_state();
        state.enemies.push(enemy(320.0, 520.0));
        state.missiles.push(missile(330.0, 530.0));
        resolve_collisions(&mut state);
        assert_eq!(state.player.health, 100);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_boss_missile_damage() {
        let mut state = empty_state();
        state.boss_missiles.push(BossMissile {
            pos: Vec2::new(310.0, 490.0),
        });
        state.boss_missiles.push(BossMissile {
            pos: Vec2::new(10.0, 10.0),
        });
        resolve_collisions(&mut state);
        assert_eq!(state.player.health, 80);
        assert_eq!(state.boss_missiles.len(), 1);
    }

    #[test]
    fn test_item_pickups() {
        let mut state = empty_state();
        state.items.push(Item {
            kind: ItemKind::LifeRestore,
            pos: Vec2::new(310.0, 510.0),
        });
        state.items.push(Item {
            kind: ItemKind::PowerUp,
            pos: Vec2::new(320.0, 520.0),
        });
        state.items.push(Item {
            kind: ItemKind::PowerUp,
            pos: Vec2::new(330.0, 500.0),
        });
        state.items.push(Item {
            kind: ItemKind::PowerUp,
            pos: Vec2::new(330.0, 505.0),
        });
        resolve_collisions(&mut state);
        assert!(state.items.is_empty());
        assert_eq!(state.player.lives, 4);
        assert_eq!(state.player.power_level, MAX_POWER_LEVEL);
    }

    #[test]
    fn test_death_respawns_and_drops_power() {
        let mut state = empty_state();
        state.player.health = 20;
        state.player.power_level = 2;
        state.player.pos = Vec2::new(100.0, 100.0);
        state.enemies.push(enemy(110.0, 110.0));

        resolve_collisions(&mut state);

        assert_eq!(state.player.lives, 2);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(state.player.pos, PLAYER_SPAWN);
        assert_eq!(state.player.power_level, 0);
        assert!(state.events.contains(&GameEvent::LifeLost { lives: 2 }));
    }

    #[test]
    fn test_last_life_lost_does_not_respawn() {
        let mut state = empty_state();
        state.player.lives = 0;
        state.player.health = 10;
        state.enemies.push(enemy(310.0, 510.0));

        resolve_collisions(&mut state);

        assert_eq!(state.player.lives, -1);
        assert!(state.player.health <= 0);
    }

    #[test]
    fn test_damage_stacks_within_one_tick() {
        let mut state = empty_state();
        state.player.health = 50;
        state.enemies.push(enemy(310.0, 510.0));
        state.boss_missiles.push(BossMissile {
            pos: Vec2::new(300.0, 500.0),
        });
        // 50 - 25 - 20 = 5, still alive
        resolve_collisions(&mut state);
        assert_eq!(state.player.health, 5);
        assert_eq!(state.player.lives, 3);
    }

    #[test]
    fn test_kills_are_deterministic_per_seed() {
        let run = |seed| {
            let mut state = GameState::with_seed(seed);
            for i in 0..40 {
                let x = 10.0 + i as f32 * 15.0;
                state.enemies.push(enemy(x, 100.0));
                state.missiles.push(missile(x + 5.0, 110.0));
            }
            resolve_collisions(&mut state);
            state.items
        };
        assert_eq!(run(9), run(9));
    }
}
