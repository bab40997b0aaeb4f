//! Rendering layer; all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands.  Playfield pixels are mapped onto the
//! area inside the border by a [`Viewport`].

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use kokaton::assets::Assets;
use kokaton::compute::{background_offset, background_tiles, explosion_frame};
use kokaton::config::GameConfig;
use kokaton::entities::{
    Beam, Bomb, Enemy, EnemyKind, Explosion, ExplosionKind, GameState, GameStatus, Item, ItemKind,
    PlayerState,
};
use kokaton::flap::{FlapState, BIRD_POSITION, FLAP_HEIGHT, FLAP_WIDTH, TILE_WIDTH};
use kokaton::geometry::{Rect, Vec2, Viewport};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_STAR: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::White;
const C_HUD_BOSS: Color = Color::Blue;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_BARRIER: Color = Color::Yellow;
const C_ALIEN: Color = Color::Green;
const C_ELITE: Color = Color::Magenta;
const C_BOSS: Color = Color::Red;
const C_BEAM: Color = Color::Cyan;
const C_ITEM_BENEFIT: Color = Color::Magenta;
const C_ITEM_HARMFUL: Color = Color::DarkGreen;
const C_EXPLOSION: Color = Color::Yellow;
const C_EFFECT: Color = Color::Cyan;
const C_BIRD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Bomb colours, indexed by `Bomb::hue`.
const BOMB_PALETTE: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
];

/// Playfield area inside the border, for a terminal of `term` size.
pub fn viewport(width: f32, height: f32, term: (u16, u16)) -> Viewport {
    let (cols, rows) = term;
    Viewport {
        width,
        height,
        origin_col: 1,
        origin_row: 2,
        cols: cols.saturating_sub(2),
        rows: rows.saturating_sub(4),
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete shooter frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    assets: &Assets,
    config: &GameConfig,
    term: (u16, u16),
) -> std::io::Result<()> {
    let vp = viewport(config.width, config.height, term);
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, term)?;
    draw_background(out, &vp, assets, background_offset(state.frame, 1), config.width)?;
    draw_hud(out, state, term)?;

    for enemy in &state.enemies {
        draw_enemy(out, &vp, assets, enemy)?;
    }
    if let Some(boss) = &state.boss {
        let rows: Vec<&str> = assets.boss.iter().map(String::as_str).collect();
        draw_sprite(out, &vp, &boss.rect, &rows, C_BOSS)?;
    }
    for item in &state.items {
        draw_item(out, &vp, assets, item)?;
    }
    for bomb in &state.bombs {
        draw_bomb(out, &vp, &assets.bomb, bomb)?;
    }
    for bomb in &state.boss_bombs {
        draw_bomb(out, &vp, &assets.boss_bomb, bomb)?;
    }
    for beam in &state.beams {
        draw_beam(out, &vp, assets, beam)?;
    }
    for explosion in &state.explosions {
        draw_explosion(out, &vp, assets, explosion)?;
    }

    draw_player(out, &vp, assets, state)?;
    draw_controls_hint(out, term, "←↑↓→ / WASD : Move   SPACE : Fire   Q : Quit")?;

    match state.status {
        GameStatus::GameOver => draw_banner(out, state, term, "GAME  OVER", Color::Red)?,
        GameStatus::Cleared => draw_banner(out, state, term, "GAME  CLEAR", Color::Yellow)?,
        GameStatus::Playing => {}
    }

    finish(out, term)
}

/// Render one frame of the flap demo.
pub fn render_flap<W: Write>(
    out: &mut W,
    flap: &FlapState,
    assets: &Assets,
    term: (u16, u16),
) -> std::io::Result<()> {
    let vp = viewport(FLAP_WIDTH, FLAP_HEIGHT, term);
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, term)?;
    draw_background(out, &vp, assets, flap.scroll_offset(), TILE_WIDTH)?;

    let bird = &assets.bird[flap.bird_frame() % assets.bird.len()];
    let rect = Rect::centered(BIRD_POSITION, 80.0, 60.0);
    draw_sprite(out, &vp, &rect, &[bird.as_str()], C_BIRD)?;

    draw_controls_hint(out, term, "Q : Quit")?;
    finish(out, term)
}

fn finish<W: Write>(out: &mut W, term: (u16, u16)) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term.1.saturating_sub(1)))?;
    out.flush()
}

// ── Border & background ───────────────────────────────────────────────────────

/// Frame around the playfield: rows 1 and `h - 2` are the bars, the rows in
/// between carry the side walls.  Row 0 is left to the HUD.
fn draw_border<W: Write>(out: &mut W, term: (u16, u16)) -> std::io::Result<()> {
    let (cols, rows) = term;
    let bottom = rows.saturating_sub(2);
    let rule = "─".repeat(usize::from(cols.saturating_sub(2)));

    out.queue(style::SetForegroundColor(C_BORDER))?;
    for (row, left, right) in [(1, '┌', '┐'), (bottom, '└', '┘')] {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(format!("{left}{rule}{right}")))?;
    }
    let right_wall = cols.saturating_sub(1);
    for row in 2..bottom {
        for col in [0, right_wall] {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print('│'))?;
        }
    }
    Ok(())
}

/// Star field scrolled left by `offset`, tiled every `tile_width` pixels
/// with every other tile mirrored.
fn draw_background<W: Write>(
    out: &mut W,
    vp: &Viewport,
    assets: &Assets,
    offset: f32,
    tile_width: f32,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_STAR))?;
    for (left, mirrored) in background_tiles(offset, tile_width, vp.width) {
        for &(fx, fy) in &assets.stars {
            let fx = if mirrored { 1.0 - fx } else { fx };
            let p = Vec2::new(left + fx * tile_width, fy * vp.height);
            if let Some((col, row)) = vp.to_cell(p) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print(&assets.star))?;
            }
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, term: (u16, u16)) -> std::io::Result<()> {
    let width = term.0;

    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(state.score.text()))?;

    // Boss HP, centre
    let boss_str = state.boss_hp.text();
    let bx = (width / 2).saturating_sub(boss_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(bx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_BOSS))?;
    out.queue(Print(&boss_str))?;

    // Lives, right
    let hearts: String = "♥".repeat(state.lives.value().min(10) as usize);
    let lives_str = format!("{} {}", state.lives.text(), hearts);
    let rx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Draw `rows` centred on `rect`, clipped to the viewport.
fn draw_sprite<W: Write>(
    out: &mut W,
    vp: &Viewport,
    rect: &Rect,
    rows: &[&str],
    color: Color,
) -> std::io::Result<()> {
    let Some((cx, cy)) = vp.to_cell(rect.center()) else {
        return Ok(());
    };
    let first_col = vp.origin_col;
    let last_col = vp.origin_col + vp.cols; // exclusive
    let last_row = vp.origin_row + vp.rows; // exclusive
    let top = cy.saturating_sub(rows.len() as u16 / 2).max(vp.origin_row);

    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in rows.iter().enumerate() {
        let row = top + i as u16;
        if row >= last_row {
            break;
        }
        let len = line.chars().count() as u16;
        let col = cx.saturating_sub(len / 2).max(first_col);
        let fit = last_col.saturating_sub(col) as usize;
        let visible: String = line.chars().take(fit).collect();
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(visible))?;
    }
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    vp: &Viewport,
    assets: &Assets,
    state: &GameState,
) -> std::io::Result<()> {
    let p = &state.player;
    let glyph = &assets.player[p.facing.index() % assets.player.len()];
    match p.state {
        PlayerState::Normal => draw_sprite(out, vp, &p.rect, &[glyph.as_str()], C_PLAYER),
        PlayerState::Hyper { .. } => {
            let (open, close) = &assets.barrier;
            let shielded = format!("{open}{glyph}{close}");
            draw_sprite(out, vp, &p.rect, &[shielded.as_str()], C_BARRIER)
        }
    }
}

fn draw_enemy<W: Write>(
    out: &mut W,
    vp: &Viewport,
    assets: &Assets,
    enemy: &Enemy,
) -> std::io::Result<()> {
    match enemy.kind {
        EnemyKind::Alien => {
            let glyph = &assets.aliens[enemy.look % assets.aliens.len()];
            draw_sprite(out, vp, &enemy.rect, &[glyph.as_str()], C_ALIEN)
        }
        EnemyKind::Elite => draw_sprite(out, vp, &enemy.rect, &[assets.elite.as_str()], C_ELITE),
    }
}

fn draw_bomb<W: Write>(
    out: &mut W,
    vp: &Viewport,
    glyph: &str,
    bomb: &Bomb,
) -> std::io::Result<()> {
    let color = BOMB_PALETTE[bomb.hue % BOMB_PALETTE.len()];
    draw_sprite(out, vp, &bomb.rect, &[glyph], color)
}

/// Beam glyph follows its heading: horizontal, vertical, rising or falling.
fn draw_beam<W: Write>(
    out: &mut W,
    vp: &Viewport,
    assets: &Assets,
    beam: &Beam,
) -> std::io::Result<()> {
    let (vx, vy) = (beam.velocity.x, beam.velocity.y);
    let slot = if vx.abs() > 2.0 * vy.abs() {
        0
    } else if vy.abs() > 2.0 * vx.abs() {
        1
    } else if vx * vy < 0.0 {
        2
    } else {
        3
    };
    let table = if beam.powered {
        &assets.beam_powered
    } else {
        &assets.beam
    };
    let glyph = &table[slot % table.len()];
    draw_sprite(out, vp, &beam.rect, &[glyph.as_str()], C_BEAM)
}

fn draw_item<W: Write>(
    out: &mut W,
    vp: &Viewport,
    assets: &Assets,
    item: &Item,
) -> std::io::Result<()> {
    match item.kind {
        ItemKind::Benefit => {
            draw_sprite(out, vp, &item.rect, &[assets.item_benefit.as_str()], C_ITEM_BENEFIT)
        }
        ItemKind::Harmful => {
            draw_sprite(out, vp, &item.rect, &[assets.item_harmful.as_str()], C_ITEM_HARMFUL)
        }
    }
}

fn draw_explosion<W: Write>(
    out: &mut W,
    vp: &Viewport,
    assets: &Assets,
    explosion: &Explosion,
) -> std::io::Result<()> {
    let frame = explosion_frame(explosion);
    let (frames, color) = match explosion.kind {
        ExplosionKind::Blast => (&assets.explosion, C_EXPLOSION),
        ExplosionKind::Effect => (&assets.effect, C_EFFECT),
    };
    let glyph = &frames[frame % frames.len()];
    draw_sprite(out, vp, &explosion.rect, &[glyph.as_str()], color)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, term: (u16, u16), hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, term.1.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── End-of-run overlay ────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    state: &GameState,
    term: (u16, u16),
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let title_line = format!("║{:^20}║", title);
    let score_line = format!("Final Score: {:>6}", state.score.value());
    let lines: [(&str, Color); 4] = [
        ("╔════════════════════╗", color),
        (title_line.as_str(), color),
        ("╚════════════════════╝", color),
        (score_line.as_str(), Color::Yellow),
    ];

    let (width, height) = term;
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
