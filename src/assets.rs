//! Glyph sprite table.
//!
//! [`Assets`] is built once at startup and only ever borrowed by the
//! renderer.  The built-in glyphs can be overridden from a TOML file passed
//! with `--assets`; any missing key keeps its default.

use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::flap::BIRD_FRAMES;
use crate::spawn::ALIEN_LOOKS;

/// Seed for the background star pattern, so every run shows the same sky.
const STAR_SEED: u64 = 0x5EED_57A2;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Assets {
    /// One glyph per facing, in `Facing::ALL` order.
    pub player: Vec<String>,
    /// Drawn around the player while hyper.
    pub barrier: (String, String),
    pub aliens: Vec<String>,
    pub elite: String,
    /// Multi-row boss sprite, top row first.
    pub boss: Vec<String>,
    pub bomb: String,
    pub boss_bomb: String,
    /// Beam glyphs by heading: horizontal, vertical, rising, falling.
    pub beam: Vec<String>,
    pub beam_powered: Vec<String>,
    pub item_benefit: String,
    pub item_harmful: String,
    /// Two alternating explosion frames.
    pub explosion: Vec<String>,
    pub effect: Vec<String>,
    /// Wing-beat cycle for the flap demo.
    pub bird: Vec<String>,
    pub star: String,
    pub star_count: usize,
    /// Star positions as fractions of a background tile.
    #[serde(skip)]
    pub stars: Vec<(f32, f32)>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Assets {
    fn default() -> Self {
        let star_count = 90;
        Assets {
            player: strings(&["▶", "◥", "▲", "◤", "◀", "◣", "▼", "◢"]),
            barrier: ("(".to_string(), ")".to_string()),
            aliens: strings(&["«▼»", "(◎)", "<Ψ>"]),
            elite: "≪◆≫".to_string(),
            boss: strings(&["╔═☠═╗", "║▓▓▓║", "╚╦═╦╝"]),
            bomb: "●".to_string(),
            boss_bomb: "◉".to_string(),
            beam: strings(&["─", "│", "╱", "╲"]),
            beam_powered: strings(&["━", "┃", "╱", "╲"]),
            item_benefit: "♥".to_string(),
            item_harmful: "☣".to_string(),
            explosion: strings(&["✶", "✷"]),
            effect: strings(&["✧", "✦"]),
            bird: strings(&[">v<", ">-<", ">^<", ">^<", ">-<", ">v<"]),
            star: "·".to_string(),
            star_count,
            stars: star_field(star_count),
        }
    }
}

/// Deterministic star layout for one background tile.
pub fn star_field(count: usize) -> Vec<(f32, f32)> {
    let mut rng = StdRng::seed_from_u64(STAR_SEED);
    (0..count)
        .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect()
}

impl Assets {
    /// Read glyph overrides from a TOML file.  Fails fast on a missing or
    /// malformed file, or a table with the wrong number of frames.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading assets {}", path.display()))?;
        let mut assets: Assets = toml::from_str(&text)
            .with_context(|| format!("parsing assets {}", path.display()))?;
        assets.stars = star_field(assets.star_count);
        assets
            .validate()
            .with_context(|| format!("checking assets {}", path.display()))?;
        Ok(assets)
    }

    pub fn validate(&self) -> Result<()> {
        let tables: [(&str, usize, usize); 7] = [
            ("player", self.player.len(), 8),
            ("aliens", self.aliens.len(), ALIEN_LOOKS),
            ("beam", self.beam.len(), 4),
            ("beam_powered", self.beam_powered.len(), 4),
            ("explosion", self.explosion.len(), 2),
            ("effect", self.effect.len(), 2),
            ("bird", self.bird.len(), BIRD_FRAMES),
        ];
        for (name, got, want) in tables {
            if got != want {
                bail!("{name} needs {want} glyphs, found {got}");
            }
        }
        if self.boss.is_empty() {
            bail!("boss needs at least one row");
        }
        Ok(())
    }
}
