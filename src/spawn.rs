//! Spawning policy: enemies, elites, the boss, items, and the ordnance that
//! stopped enemies drop on their own intervals.

use rand::Rng;
use tracing::{debug, info};

use crate::compute::SimContext;
use crate::entities::{
    Bomb, Boss, Enemy, EnemyKind, GameState, Item, ItemKind, Motion,
};
use crate::geometry::{direction, Rect, Vec2};

/// Number of bomb colours in the palette.
pub const BOMB_HUES: usize = 6;

/// Number of distinct alien looks.
pub const ALIEN_LOOKS: usize = 3;

/// Fresh enemy at the top edge, random column, random stop line and bomb
/// interval.
pub fn new_enemy<R: Rng>(kind: EnemyKind, ctx: &mut SimContext<'_, R>) -> Enemy {
    let cfg = ctx.config;
    let (w, h) = cfg.enemy_size;
    let x = ctx.rng.gen_range(0.0..=(cfg.width - w));
    let stop_y = ctx.rng.gen_range(cfg.stop_min_y..=cfg.height / 2.0);
    let (speed, (lo, hi)) = match kind {
        EnemyKind::Alien => (cfg.enemy_speed, cfg.enemy_bomb_interval),
        EnemyKind::Elite => (cfg.variant_speed, cfg.variant_bomb_interval),
    };
    Enemy {
        rect: Rect::new(x, 0.0, w, h),
        kind,
        motion: Motion::Descending,
        speed,
        stop_y,
        bomb_interval: ctx.rng.gen_range(lo..=hi),
        look: ctx.rng.gen_range(0..ALIEN_LOOKS),
    }
}

/// The boss enters from the top, towards the right of the playfield.
pub fn new_boss<R: Rng>(ctx: &mut SimContext<'_, R>) -> Boss {
    let cfg = ctx.config;
    let (w, h) = cfg.boss_size;
    let max_x = cfg.width - w;
    let x = ctx.rng.gen_range(cfg.boss_min_x.min(max_x)..=max_x);
    Boss {
        rect: Rect::new(x, 0.0, w, h),
        motion: Motion::Descending,
        speed: cfg.boss_speed,
        stop_y: ctx.rng.gen_range(cfg.stop_min_y..=cfg.height / 2.0),
    }
}

/// Bomb released from the bottom-centre of `dropper`, aimed once at
/// `target`.  The heading never changes afterwards.
///
/// Coincident centres have no heading; such a bomb falls straight down.
pub fn aimed_bomb<R: Rng>(
    dropper: &Rect,
    target: &Rect,
    speed: f32,
    radius: (u32, u32),
    diameter_factor: f32,
    rng: &mut R,
) -> Bomb {
    let rad = rng.gen_range(radius.0..=radius.1) as f32;
    let size = rad * diameter_factor;
    let origin = dropper.center();
    let center = Vec2::new(origin.x, origin.y + dropper.h / 2.0);
    Bomb {
        rect: Rect::centered(center, size, size),
        velocity: direction(dropper, target).unwrap_or(Vec2::new(0.0, 1.0)),
        speed,
        hue: rng.gen_range(0..BOMB_HUES),
    }
}

pub fn new_item<R: Rng>(ctx: &mut SimContext<'_, R>) -> Item {
    let cfg = ctx.config;
    let size = cfg.item_size;
    let y = ctx.rng.gen_range(0.0..=(cfg.height - size));
    let kind = if ctx.rng.gen_bool(cfg.item_harmful_chance) {
        ItemKind::Harmful
    } else {
        ItemKind::Benefit
    };
    Item {
        rect: Rect::new(cfg.width - size, y, size, size),
        kind,
        speed: cfg.item_speed,
    }
}

/// Timer-driven spawns for this frame.
pub fn spawn_wave<R: Rng>(state: &mut GameState, ctx: &mut SimContext<'_, R>) {
    let cfg = ctx.config;
    let frame = ctx.frame;

    // Regular enemies hold off while the boss is on the field.
    if frame % cfg.enemy_spawn_interval == 0
        && state.boss.is_none()
        && state.enemies.len() < cfg.enemy_cap
    {
        let enemy = new_enemy(EnemyKind::Alien, ctx);
        debug!(frame, x = enemy.rect.x, stop_y = enemy.stop_y, "enemy spawned");
        state.enemies.push(enemy);
    }

    if state.kills >= cfg.variant_kill_threshold
        && frame % cfg.variant_spawn_interval == 0
        && state.enemies.len() < cfg.enemy_cap
    {
        let enemy = new_enemy(EnemyKind::Elite, ctx);
        debug!(frame, x = enemy.rect.x, "elite spawned");
        state.enemies.push(enemy);
    }

    if state.boss.is_none()
        && !state.boss_hp.is_depleted()
        && state.score.value() >= cfg.boss_score_threshold
    {
        let boss = new_boss(ctx);
        info!(frame, score = state.score.value(), "boss spawned");
        state.boss = Some(boss);
    }

    if frame % cfg.item_spawn_interval == 0 {
        let item = new_item(ctx);
        debug!(frame, kind = ?item.kind, "item spawned");
        state.items.push(item);
    }
}

/// Stopped enemies and a stopped boss release bombs aimed at the player.
pub fn drop_ordnance<R: Rng>(state: &mut GameState, ctx: &mut SimContext<'_, R>) {
    let cfg = ctx.config;
    let frame = ctx.frame;
    let target = state.player.rect;

    for enemy in &state.enemies {
        if enemy.motion == Motion::Stopped && frame % enemy.bomb_interval == 0 {
            state.bombs.push(aimed_bomb(
                &enemy.rect,
                &target,
                cfg.bomb_speed,
                cfg.bomb_radius,
                2.0,
                &mut *ctx.rng,
            ));
        }
    }

    if let Some(boss) = &state.boss {
        if boss.motion == Motion::Stopped && frame % cfg.boss_bomb_interval == 0 {
            state.boss_bombs.push(aimed_bomb(
                &boss.rect,
                &target,
                cfg.boss_bomb_speed,
                cfg.boss_bomb_radius,
                2.5,
                &mut *ctx.rng,
            ));
        }
    }
}
