//! Runtime game configuration.
//!
//! [`GameConfig::default()`] holds the built-in tuning.  A TOML file passed
//! with `--config` overrides any subset of the fields; missing keys keep
//! their defaults.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::geometry::{fully_inside, Rect, Vec2};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Playfield ────────────────────────────────────────────────────────────
    pub width: f32,
    pub height: f32,
    pub fps: u32,
    /// Wall-clock freeze on the game-over / game-clear banner.
    pub terminal_pause_ms: u64,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_speed: f32,
    pub player_start: (f32, f32),
    pub player_size: f32,
    pub hyper_frames: i32,
    pub initial_lives: u32,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_spawn_interval: u64,
    pub enemy_cap: usize,
    pub enemy_speed: f32,
    pub enemy_size: (f32, f32),
    pub enemy_bomb_interval: (u64, u64),
    pub variant_kill_threshold: u32,
    pub variant_spawn_interval: u64,
    pub variant_speed: f32,
    pub variant_bomb_interval: (u64, u64),

    // ── Boss ─────────────────────────────────────────────────────────────────
    pub boss_hp: u32,
    pub boss_score_threshold: u32,
    pub boss_speed: f32,
    pub boss_size: (f32, f32),
    pub boss_min_x: f32,
    pub boss_bomb_interval: u64,

    // ── Ordnance ─────────────────────────────────────────────────────────────
    pub bomb_speed: f32,
    pub bomb_radius: (u32, u32),
    pub boss_bomb_speed: f32,
    pub boss_bomb_radius: (u32, u32),
    /// Lowest stop threshold; the highest is half the playfield height.
    pub stop_min_y: f32,

    // ── Beams ────────────────────────────────────────────────────────────────
    pub beam_speed: f32,
    pub beam_size: f32,
    /// Score at which beams double in size and speed.
    pub beam_power_score: u32,
    /// Score at which every shot becomes a 3-way fan.
    pub beam_fan_score: u32,
    pub beam_fan_bias: f32,

    // ── Items ────────────────────────────────────────────────────────────────
    pub item_spawn_interval: u64,
    pub item_harmful_chance: f64,
    pub item_speed: f32,
    pub item_size: f32,

    // ── Explosions ───────────────────────────────────────────────────────────
    pub explosion_size: f32,
    pub enemy_explosion_life: i32,
    pub bomb_explosion_life: i32,
    pub boss_bomb_explosion_life: i32,
    pub boss_explosion_life: i32,
    pub effect_life: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 1600.0,
            height: 900.0,
            fps: 50,
            terminal_pause_ms: 2000,

            player_speed: 10.0,
            player_start: (900.0, 400.0),
            player_size: 60.0,
            hyper_frames: 100,
            initial_lives: 3,

            enemy_spawn_interval: 200,
            enemy_cap: 8,
            enemy_speed: 6.0,
            enemy_size: (70.0, 60.0),
            enemy_bomb_interval: (50, 300),
            variant_kill_threshold: 10,
            variant_spawn_interval: 300,
            variant_speed: 8.0,
            variant_bomb_interval: (30, 150),

            boss_hp: 10,
            boss_score_threshold: 100,
            boss_speed: 6.0,
            boss_size: (200.0, 200.0),
            boss_min_x: 1000.0,
            boss_bomb_interval: 5,

            bomb_speed: 6.0,
            bomb_radius: (10, 50),
            boss_bomb_speed: 9.0,
            boss_bomb_radius: (50, 80),
            stop_min_y: 50.0,

            beam_speed: 10.0,
            beam_size: 24.0,
            beam_power_score: 100,
            beam_fan_score: 200,
            beam_fan_bias: 0.5,

            item_spawn_interval: 250,
            item_harmful_chance: 0.1,
            item_speed: 4.0,
            item_size: 40.0,

            explosion_size: 80.0,
            enemy_explosion_life: 100,
            bomb_explosion_life: 50,
            boss_bomb_explosion_life: 400,
            boss_explosion_life: 400,
            effect_life: 30,
        }
    }
}

impl GameConfig {
    /// Read a TOML override file and validate the merged result.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: GameConfig = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            bail!("playfield must be positive, got {}x{}", self.width, self.height);
        }
        if self.fps == 0 {
            bail!("fps must be at least 1");
        }
        let intervals = [
            ("enemy_spawn_interval", self.enemy_spawn_interval),
            ("variant_spawn_interval", self.variant_spawn_interval),
            ("boss_bomb_interval", self.boss_bomb_interval),
            ("item_spawn_interval", self.item_spawn_interval),
            ("enemy_bomb_interval.0", self.enemy_bomb_interval.0),
            ("variant_bomb_interval.0", self.variant_bomb_interval.0),
        ];
        for (name, value) in intervals {
            if value == 0 {
                bail!("{name} must be at least 1");
            }
        }
        for (name, (lo, hi)) in [
            ("enemy_bomb_interval", self.enemy_bomb_interval),
            ("variant_bomb_interval", self.variant_bomb_interval),
        ] {
            if lo > hi {
                bail!("{name} range is empty: {lo}..={hi}");
            }
        }
        for (name, (lo, hi)) in [
            ("bomb_radius", self.bomb_radius),
            ("boss_bomb_radius", self.boss_bomb_radius),
        ] {
            if lo == 0 || lo > hi {
                bail!("{name} range is invalid: {lo}..={hi}");
            }
        }
        if self.stop_min_y >= self.height / 2.0 {
            bail!(
                "stop_min_y ({}) must be below half the playfield height ({})",
                self.stop_min_y,
                self.height / 2.0
            );
        }
        let sizes = [
            ("player_size", self.player_size),
            ("beam_size", self.beam_size),
            ("item_size", self.item_size),
            ("explosion_size", self.explosion_size),
            ("enemy_size.0", self.enemy_size.0),
            ("enemy_size.1", self.enemy_size.1),
            ("boss_size.0", self.boss_size.0),
            ("boss_size.1", self.boss_size.1),
        ];
        for (name, value) in sizes {
            if value <= 0.0 {
                bail!("{name} must be positive, got {value}");
            }
        }
        if self.enemy_size.0 >= self.width || self.boss_size.0 >= self.width {
            bail!("enemy and boss sprites must fit the playfield width");
        }
        if self.enemy_size.1 >= self.height
            || self.boss_size.1 >= self.height
            || self.item_size >= self.height
            || self.player_size >= self.height
        {
            bail!("sprites must fit the playfield height");
        }
        if self.boss_min_x < 0.0 {
            bail!("boss_min_x must not be negative, got {}", self.boss_min_x);
        }
        let (sx, sy) = self.player_start;
        let start = Rect::centered(Vec2::new(sx, sy), self.player_size, self.player_size);
        if !fully_inside(&start, self.width, self.height) {
            bail!("player_start ({sx}, {sy}) puts the player outside the playfield");
        }
        if !(0.0..=1.0).contains(&self.item_harmful_chance) {
            bail!("item_harmful_chance must lie in 0..=1");
        }
        Ok(())
    }

    pub fn frame_millis(&self) -> u64 {
        1000 / self.fps as u64
    }
}
