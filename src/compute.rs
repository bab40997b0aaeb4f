//! Pure game-logic functions.
//!
//! Every public function takes an immutable view of the current state (and,
//! where needed, a [`SimContext`] carrying the frame counter and RNG) and
//! returns fresh values.  Side effects are limited to the injected RNG.

use rand::Rng;
use tracing::{debug, info};

use crate::collision;
use crate::config::GameConfig;
use crate::entities::{
    Beam, BeamKind, Boss, Bomb, Enemy, Explosion, Facing, GameState, GameStatus, Item, Motion,
    Player, PlayerState,
};
use crate::geometry::{fully_inside, Rect, Vec2};
use crate::hud::{BossHp, Lives, Score};
use crate::input::InputSnapshot;
use crate::spawn;

/// Background tiles are this many frames' worth of scroll apart before the
/// pattern repeats.
pub const BACKGROUND_PERIOD: u64 = 6400;

/// Explicit replacement for a global frame counter and RNG: threaded into
/// every spawn call.
pub struct SimContext<'a, R: Rng> {
    pub frame: u64,
    pub config: &'a GameConfig,
    pub rng: &'a mut R,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a run.
pub fn init_state(config: &GameConfig) -> GameState {
    let (sx, sy) = config.player_start;
    GameState {
        player: Player {
            rect: Rect::centered(Vec2::new(sx, sy), config.player_size, config.player_size),
            facing: Facing::Right,
            state: PlayerState::Normal,
        },
        enemies: Vec::new(),
        boss: None,
        bombs: Vec::new(),
        boss_bombs: Vec::new(),
        beams: Vec::new(),
        items: Vec::new(),
        explosions: Vec::new(),
        score: Score::default(),
        boss_hp: BossHp::new(config.boss_hp),
        lives: Lives::new(config.initial_lives),
        kills: 0,
        status: GameStatus::Playing,
        frame: 0,
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Apply held arrows.  A move that would leave the playfield on either axis
/// is dropped entirely; the facing still follows the keys.
pub fn move_player(player: &Player, input: &InputSnapshot, config: &GameConfig) -> Player {
    let (dx, dy) = input.movement();
    let moved = player.rect.translated(Vec2::new(
        dx as f32 * config.player_speed,
        dy as f32 * config.player_speed,
    ));
    let rect = if fully_inside(&moved, config.width, config.height) {
        moved
    } else {
        player.rect
    };
    Player {
        rect,
        facing: Facing::from_delta(dx, dy).unwrap_or(player.facing),
        ..player.clone()
    }
}

/// Count the hyper timer down one frame; back to normal once it goes negative.
pub fn update_hyper(state: &PlayerState) -> PlayerState {
    match state {
        PlayerState::Normal => PlayerState::Normal,
        PlayerState::Hyper { remaining } => {
            let remaining = remaining - 1;
            if remaining < 0 {
                debug!("hyper expired");
                PlayerState::Normal
            } else {
                PlayerState::Hyper { remaining }
            }
        }
    }
}

pub fn update_player(player: &Player, input: &InputSnapshot, config: &GameConfig) -> Player {
    let moved = move_player(player, input, config);
    Player {
        state: update_hyper(&moved.state),
        ..moved
    }
}

// ── Enemies & boss ───────────────────────────────────────────────────────────

/// One step of the descend/stop machine.  The stop test runs before the
/// move, so an enemy halts on the frame after its centre passes `stop_y`.
fn descend(rect: &Rect, motion: Motion, speed: f32, stop_y: f32) -> (Rect, Motion) {
    let motion = match motion {
        Motion::Descending if rect.center().y > stop_y => Motion::Stopped,
        other => other,
    };
    let vy = match motion {
        Motion::Descending => speed,
        Motion::Stopped => 0.0,
    };
    (rect.translated(Vec2::new(0.0, vy)), motion)
}

pub fn advance_enemy(enemy: &Enemy) -> Enemy {
    let (rect, motion) = descend(&enemy.rect, enemy.motion, enemy.speed, enemy.stop_y);
    Enemy {
        rect,
        motion,
        ..enemy.clone()
    }
}

pub fn advance_boss(boss: &Boss) -> Boss {
    let (rect, motion) = descend(&boss.rect, boss.motion, boss.speed, boss.stop_y);
    if motion != boss.motion {
        info!(y = rect.center().y, "boss took position");
    }
    Boss {
        rect,
        motion,
        ..boss.clone()
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

pub fn advance_bomb(bomb: &Bomb) -> Bomb {
    Bomb {
        rect: bomb.rect.translated(bomb.velocity.scale(bomb.speed)),
        ..bomb.clone()
    }
}

pub fn advance_beam(beam: &Beam) -> Beam {
    Beam {
        rect: beam.rect.translated(beam.velocity.scale(beam.speed)),
        ..beam.clone()
    }
}

/// Unit heading for a beam fired while facing `facing`, obtained via the
/// facing angle (`atan2(-dy, dx)`) so diagonals are normalised.
pub fn beam_heading(facing: Facing) -> Vec2 {
    let (dx, dy) = facing.delta();
    let angle = (-(dy as f32)).atan2(dx as f32);
    Vec2::new(angle.cos(), -angle.sin())
}

/// Beams produced by one press of fire.
///
/// Past `beam_power_score` the beam doubles in size and speed; past
/// `beam_fan_score` two more beams with a vertical bias are added.
pub fn fire_beams(player: &Player, score: u32, config: &GameConfig) -> Vec<Beam> {
    let heading = beam_heading(player.facing);
    let powered = score >= config.beam_power_score;
    let factor = if powered { 2.0 } else { 1.0 };
    let size = config.beam_size * factor;
    let center = player.rect.center().add(Vec2::new(
        player.rect.w * heading.x,
        player.rect.h * heading.y,
    ));

    let beam = |kind: BeamKind, velocity: Vec2| Beam {
        rect: Rect::centered(center, size, size),
        kind,
        velocity,
        speed: config.beam_speed * factor,
        powered,
    };

    let mut beams = vec![beam(BeamKind::Straight, heading)];
    if score >= config.beam_fan_score {
        let bias = config.beam_fan_bias;
        beams.push(beam(BeamKind::Up, Vec2::new(heading.x, heading.y - bias)));
        beams.push(beam(BeamKind::Down, Vec2::new(heading.x, heading.y + bias)));
    }
    beams
}

// ── Items & effects ──────────────────────────────────────────────────────────

pub fn advance_item(item: &Item) -> Item {
    Item {
        rect: item.rect.translated(Vec2::new(-item.speed, 0.0)),
        ..item.clone()
    }
}

/// `None` once the explosion has burnt out.
pub fn advance_explosion(explosion: &Explosion) -> Option<Explosion> {
    let life = explosion.life - 1;
    (life >= 0).then(|| Explosion {
        life,
        ..explosion.clone()
    })
}

/// Which of the two alternating explosion images to show.
pub fn explosion_frame(explosion: &Explosion) -> usize {
    (explosion.life.max(0) / 10 % 2) as usize
}

/// Horizontal background scroll for frame `frame` advancing `step` px a frame.
pub fn background_offset(frame: u64, step: u64) -> f32 {
    (frame.wrapping_mul(step) % BACKGROUND_PERIOD) as f32
}

/// Visible background tiles as `(left_x, mirrored)`.  Tiles are laid side by
/// side, every other one flipped, and scrolled left by `offset`.
pub fn background_tiles(offset: f32, tile_width: f32, view_width: f32) -> Vec<(f32, bool)> {
    let count = (BACKGROUND_PERIOD as f32 / tile_width).ceil() as usize + 1;
    (0..count)
        .map(|k| (k as f32 * tile_width - offset, k % 2 == 1))
        .filter(|&(left, _)| left < view_width && left + tile_width > 0.0)
        .collect()
}

// ── Per-frame tick (RNG is injected) ──────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Order: spawns, ordnance drops, fire input, collisions, terminal check,
/// then movement of every entity with off-screen removal.  A frame that ends
/// the run returns before anything moves.
pub fn tick(
    state: &GameState,
    input: &InputSnapshot,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    let mut ctx = SimContext {
        frame: state.frame,
        config,
        rng,
    };

    // ── 1. Spawns & ordnance ─────────────────────────────────────────────────
    spawn::spawn_wave(&mut next, &mut ctx);
    spawn::drop_ordnance(&mut next, &mut ctx);

    // ── 2. Fire ──────────────────────────────────────────────────────────────
    if input.fire_pressed {
        let beams = fire_beams(&next.player, next.score.value(), config);
        next.beams.extend(beams);
    }

    // ── 3. Collisions & terminal check ───────────────────────────────────────
    collision::resolve(&mut next, config);
    if next.status != GameStatus::Playing {
        return next;
    }

    // ── 4. Movement ──────────────────────────────────────────────────────────
    let (w, h) = (config.width, config.height);
    next.player = update_player(&next.player, input, config);
    next.beams = next
        .beams
        .iter()
        .map(advance_beam)
        .filter(|b| fully_inside(&b.rect, w, h))
        .collect();
    next.enemies = next
        .enemies
        .iter()
        .map(advance_enemy)
        .filter(|e| fully_inside(&e.rect, w, h))
        .collect();
    next.boss = next
        .boss
        .as_ref()
        .map(advance_boss)
        .filter(|b| fully_inside(&b.rect, w, h));
    next.bombs = next
        .bombs
        .iter()
        .map(advance_bomb)
        .filter(|b| fully_inside(&b.rect, w, h))
        .collect();
    next.boss_bombs = next
        .boss_bombs
        .iter()
        .map(advance_bomb)
        .filter(|b| fully_inside(&b.rect, w, h))
        .collect();
    next.items = next
        .items
        .iter()
        .map(advance_item)
        .filter(|i| fully_inside(&i.rect, w, h))
        .collect();
    next.explosions = next.explosions.iter().filter_map(advance_explosion).collect();

    next.frame = state.frame + 1;
    next
}
