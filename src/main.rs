mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kokaton::assets::Assets;
use kokaton::compute::{init_state, tick};
use kokaton::config::GameConfig;
use kokaton::entities::GameStatus;
use kokaton::flap::{FlapState, FLAP_FPS};
use kokaton::input::{Command, KeyTracker};

#[derive(Parser, Debug)]
#[command(name = "kokaton", about = "Top-down terminal shooter and flap demo")]
struct Cli {
    /// TOML file overriding the game tuning.
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML file overriding the glyph sprites.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Seed the RNG for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (the terminal itself is the playfield).
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq)]
enum Mode {
    /// Shoot down the invaders and their boss (default).
    Play,
    /// Watch the bird flap over the scrolling sky.
    Flap,
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loops ────────────────────────────────────────────────────────────────

/// Play one run of the shooter.  Ends on quit, game over or game clear; the
/// last two hold their banner for `terminal_pause_ms` first.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    assets: &Assets,
    rng: &mut StdRng,
) -> Result<()> {
    let frame_time = Duration::from_millis(config.frame_millis());
    let mut tracker = KeyTracker::new();
    let mut state = init_state(config);
    let mut frame: u64 = 0;

    info!(lives = state.lives.value(), boss_hp = state.boss_hp.value(), "run started");

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                if tracker.record(key, frame) == Some(Command::Quit) {
                    info!(score = state.score.value(), "quit");
                    return Ok(());
                }
            }
        }

        let input = tracker.snapshot(frame);
        state = tick(&state, &input, config, rng);
        display::render(out, &state, assets, config, terminal::size()?)?;

        if state.status != GameStatus::Playing {
            thread::sleep(Duration::from_millis(config.terminal_pause_ms));
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn flap_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, assets: &Assets) -> Result<()> {
    let frame_time = Duration::from_millis(1000 / FLAP_FPS as u64);
    let mut tracker = KeyTracker::new();
    let mut flap = FlapState::default();

    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                if tracker.record(key, flap.tick) == Some(Command::Quit) {
                    return Ok(());
                }
            }
        }

        display::render_flap(out, &flap, assets, terminal::size()?)?;
        flap = flap.advance();

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    // Fail fast on bad files before the terminal is taken over.
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let assets = match &cli.assets {
        Some(path) => Assets::load(path)?,
        None => Assets::default(),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mode = cli.mode.unwrap_or(Mode::Play);
    info!(?mode, seed = ?cli.seed, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events let KeyTracker drop keys immediately; unsupported
    // terminals fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; the loops poll the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = match mode {
        Mode::Play => game_loop(&mut out, &rx, &config, &assets, &mut rng),
        Mode::Flap => flap_loop(&mut out, &rx, &assets),
    };

    // Restore the terminal even when the loop failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
