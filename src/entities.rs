//! All game entity types: pure data, no logic.

use crate::geometry::{Rect, Vec2};
use crate::hud::{BossHp, Lives, Score};

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    /// Lives ran out.
    GameOver,
    /// Boss HP reached zero.
    Cleared,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// One of the eight directions the craft can face (screen coordinates, +y down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::Right,
        Facing::UpRight,
        Facing::Up,
        Facing::UpLeft,
        Facing::Left,
        Facing::DownLeft,
        Facing::Down,
        Facing::DownRight,
    ];

    /// `None` for the zero delta (no keys held, or opposing keys cancelling).
    pub fn from_delta(dx: i32, dy: i32) -> Option<Facing> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Facing::Right),
            (1, -1) => Some(Facing::UpRight),
            (0, -1) => Some(Facing::Up),
            (-1, -1) => Some(Facing::UpLeft),
            (-1, 0) => Some(Facing::Left),
            (-1, 1) => Some(Facing::DownLeft),
            (0, 1) => Some(Facing::Down),
            (1, 1) => Some(Facing::DownRight),
            _ => None,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::Right => (1, 0),
            Facing::UpRight => (1, -1),
            Facing::Up => (0, -1),
            Facing::UpLeft => (-1, -1),
            Facing::Left => (-1, 0),
            Facing::DownLeft => (-1, 1),
            Facing::Down => (0, 1),
            Facing::DownRight => (1, 1),
        }
    }

    /// Position in [`Facing::ALL`]; indexes the oriented sprite table.
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlayerState {
    Normal,
    /// Invulnerable; reverts to `Normal` once `remaining` goes negative.
    Hyper { remaining: i32 },
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub facing: Facing,
    pub state: PlayerState,
}

// ── Enemies & boss ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyKind {
    Alien,
    /// Tougher variant that appears once enough kills are banked.
    Elite,
}

/// Descent state machine; `Descending → Stopped` is one-way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Descending,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub kind: EnemyKind,
    pub motion: Motion,
    /// Downward speed while descending.
    pub speed: f32,
    /// Centre-y past which the enemy stops.
    pub stop_y: f32,
    /// Drops a bomb whenever `frame % bomb_interval == 0` while stopped.
    pub bomb_interval: u64,
    /// Which of the alien sprites to draw.
    pub look: usize,
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub rect: Rect,
    pub motion: Motion,
    pub speed: f32,
    pub stop_y: f32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Enemy or boss ordnance.  `velocity` is a unit vector fixed at spawn.
#[derive(Clone, Debug)]
pub struct Bomb {
    pub rect: Rect,
    pub velocity: Vec2,
    pub speed: f32,
    /// Palette index for the bomb colour.
    pub hue: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BeamKind {
    Straight,
    /// Fan member biased upward.
    Up,
    /// Fan member biased downward.
    Down,
}

#[derive(Clone, Debug)]
pub struct Beam {
    pub rect: Rect,
    pub kind: BeamKind,
    pub velocity: Vec2,
    pub speed: f32,
    /// Enlarged beam fired past the power score.
    pub powered: bool,
}

// ── Items & effects ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemKind {
    /// +1 life on pickup.
    Benefit,
    /// −1 life on pickup.
    Harmful,
}

#[derive(Clone, Debug)]
pub struct Item {
    pub rect: Rect,
    pub kind: ItemKind,
    /// Leftward drift per frame.
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExplosionKind {
    /// Destruction of an enemy, bomb or boss.
    Blast,
    /// Item pickup sparkle.
    Effect,
}

/// Stationary two-frame animation that expires when `life` goes negative.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    pub kind: ExplosionKind,
    pub life: i32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire shooter state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// At most one boss at a time.
    pub boss: Option<Boss>,
    pub bombs: Vec<Bomb>,
    pub boss_bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub items: Vec<Item>,
    pub explosions: Vec<Explosion>,
    pub score: Score,
    pub boss_hp: BossHp,
    pub lives: Lives,
    /// Enemies destroyed, weighted (elites count twice).
    pub kills: u32,
    pub status: GameStatus,
    pub frame: u64,
}
