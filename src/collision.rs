//! Per-frame collision resolution.
//!
//! Rules run in a fixed order and every overlap found in a frame is
//! resolved (no one-hit-per-frame cap).  Rectangle overlap is the only test.

use tracing::info;

use crate::config::GameConfig;
use crate::entities::{
    Beam, Bomb, EnemyKind, Enemy, Explosion, ExplosionKind, GameState, GameStatus, Item, ItemKind,
    PlayerState,
};
use crate::geometry::Rect;

pub const ELITE_POINTS: u32 = 20;
pub const ALIEN_POINTS: u32 = 10;
pub const BOSS_POINTS: u32 = 100;
pub const BOMB_POINTS: u32 = 1;
pub const BOSS_BOMB_POINTS: u32 = 3;

/// Anything with a collision box.
pub trait Hitbox {
    fn hitbox(&self) -> &Rect;
}

macro_rules! impl_hitbox {
    ($($ty:ty),*) => {
        $(impl Hitbox for $ty {
            fn hitbox(&self) -> &Rect {
                &self.rect
            }
        })*
    };
}

impl_hitbox!(Enemy, Bomb, Beam, Item);

/// Group-vs-group test.  For each selected member of `group`, in order,
/// every overlapping member of `other` is removed; the member itself is
/// removed and returned if it hit anything.  Members consumed by an earlier
/// hit cannot be hit again.
pub fn collide_groups<A, B>(
    group: &mut Vec<A>,
    other: &mut Vec<B>,
    select: impl Fn(&A) -> bool,
) -> Vec<A>
where
    A: Hitbox,
    B: Hitbox,
{
    let mut hit = Vec::new();
    let mut kept = Vec::with_capacity(group.len());
    for member in group.drain(..) {
        if !select(&member) {
            kept.push(member);
            continue;
        }
        let before = other.len();
        let rect = *member.hitbox();
        other.retain(|o| !rect.intersects(o.hitbox()));
        if other.len() < before {
            hit.push(member);
        } else {
            kept.push(member);
        }
    }
    *group = kept;
    hit
}

/// Remove and return every member of `group` overlapping `rect`.
pub fn collide_one<A: Hitbox>(rect: &Rect, group: &mut Vec<A>) -> Vec<A> {
    let (hit, kept): (Vec<A>, Vec<A>) = group
        .drain(..)
        .partition(|member| rect.intersects(member.hitbox()));
    *group = kept;
    hit
}

fn blast(at: &Rect, size: f32, life: i32) -> Explosion {
    Explosion {
        rect: Rect::centered(at.center(), size, size),
        kind: ExplosionKind::Blast,
        life,
    }
}

/// Apply every collision rule for this frame and set the run status.
pub fn resolve(state: &mut GameState, config: &GameConfig) {
    let boom = config.explosion_size;

    // ── 1–2. Enemies × beams (elites first) ──────────────────────────────────
    for (kind, points, kills) in [
        (EnemyKind::Elite, ELITE_POINTS, 2),
        (EnemyKind::Alien, ALIEN_POINTS, 1),
    ] {
        let downed = collide_groups(&mut state.enemies, &mut state.beams, |e| e.kind == kind);
        for enemy in downed {
            state
                .explosions
                .push(blast(&enemy.rect, boom, config.enemy_explosion_life));
            state.score.add(points);
            state.kills += kills;
        }
    }

    // ── 3. Boss × beams (the boss soaks hits until its HP is gone) ────────────
    if let Some(boss_rect) = state.boss.as_ref().map(|b| b.rect) {
        let mut hits = 0;
        let hp = state.boss_hp.value();
        state.beams.retain(|beam| {
            if hits < hp && boss_rect.intersects(&beam.rect) {
                hits += 1;
                false
            } else {
                true
            }
        });
        if hits > 0 && state.boss_hp.hit(hits) == 0 {
            info!(score = state.score.value(), "boss defeated");
            let size = boss_rect.w.max(boss_rect.h) * 1.5;
            state
                .explosions
                .push(blast(&boss_rect, size, config.boss_explosion_life));
            state.score.add(BOSS_POINTS);
            state.boss = None;
        }
    }

    // ── 4–5. Ordnance × beams ────────────────────────────────────────────────
    for bomb in collide_groups(&mut state.bombs, &mut state.beams, |_| true) {
        state
            .explosions
            .push(blast(&bomb.rect, boom, config.bomb_explosion_life));
        state.score.add(BOMB_POINTS);
    }
    for bomb in collide_groups(&mut state.boss_bombs, &mut state.beams, |_| true) {
        state
            .explosions
            .push(blast(&bomb.rect, boom, config.boss_bomb_explosion_life));
        state.score.add(BOSS_BOMB_POINTS);
    }

    // ── 6. Items × player ────────────────────────────────────────────────────
    let player_rect = state.player.rect;
    for item in collide_one(&player_rect, &mut state.items) {
        match item.kind {
            ItemKind::Benefit => state.lives.gain(),
            ItemKind::Harmful => state.lives.lose(),
        }
        info!(kind = ?item.kind, lives = state.lives.value(), "item collected");
        state.explosions.push(Explosion {
            rect: Rect::centered(item.rect.center(), boom, boom),
            kind: ExplosionKind::Effect,
            life: config.effect_life,
        });
    }
    if state.lives.is_exhausted() {
        info!(score = state.score.value(), "game over");
        state.status = GameStatus::GameOver;
        return;
    }

    // ── 7. Ordnance × player ─────────────────────────────────────────────────
    let mut incoming = collide_one(&player_rect, &mut state.bombs);
    incoming.extend(collide_one(&player_rect, &mut state.boss_bombs));
    for bomb in incoming {
        state
            .explosions
            .push(blast(&bomb.rect, boom, config.bomb_explosion_life));
        match state.player.state {
            PlayerState::Normal => {
                state.lives.lose();
                state.player.state = PlayerState::Hyper {
                    remaining: config.hyper_frames,
                };
                info!(lives = state.lives.value(), "player hit");
                if state.lives.is_exhausted() {
                    info!(score = state.score.value(), "game over");
                    state.status = GameStatus::GameOver;
                    return;
                }
            }
            // Invulnerable: the bomb only explodes.
            PlayerState::Hyper { .. } => {}
        }
    }

    // ── 8. Boss HP exhausted ends the run as a win ───────────────────────────
    if state.boss_hp.is_depleted() {
        info!(score = state.score.value(), "game clear");
        state.status = GameStatus::Cleared;
    }
}
