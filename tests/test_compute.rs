use kokaton::compute::*;
use kokaton::config::GameConfig;
use kokaton::entities::*;
use kokaton::geometry::{fully_inside, Rect, Vec2};
use kokaton::input::InputSnapshot;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn config() -> GameConfig {
    GameConfig::default()
}

/// Fresh state on a frame where no spawn timer fires.
fn make_state() -> GameState {
    let mut s = init_state(&config());
    s.frame = 1;
    s
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn keys(up: bool, down: bool, left: bool, right: bool) -> InputSnapshot {
    InputSnapshot {
        up,
        down,
        left,
        right,
        ..InputSnapshot::default()
    }
}

fn enemy_at(x: f32, y: f32, stop_y: f32) -> Enemy {
    Enemy {
        rect: Rect::new(x, y, 70.0, 60.0),
        kind: EnemyKind::Alien,
        motion: Motion::Descending,
        speed: 6.0,
        stop_y,
        bomb_interval: 100,
        look: 0,
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = init_state(&config());
    assert_eq!(s.player.rect.center(), Vec2::new(900.0, 400.0));
    assert_eq!(s.player.facing, Facing::Right);
    assert_eq!(s.player.state, PlayerState::Normal);
    assert_eq!(s.lives.value(), 3);
    assert_eq!(s.boss_hp.value(), 10);
}

#[test]
fn init_state_empty_collections() {
    let s = init_state(&config());
    assert!(s.enemies.is_empty());
    assert!(s.boss.is_none());
    assert!(s.bombs.is_empty());
    assert!(s.beams.is_empty());
    assert!(s.items.is_empty());
    assert_eq!(s.score.value(), 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Playing);
}

// ── move_player ───────────────────────────────────────────────────────────────

#[test]
fn move_right_steps_by_speed() {
    let s = make_state();
    let p = move_player(&s.player, &keys(false, false, false, true), &config());
    assert_eq!(p.rect.x, s.player.rect.x + 10.0);
    assert_eq!(p.rect.y, s.player.rect.y);
    assert_eq!(p.facing, Facing::Right);
}

#[test]
fn diagonal_keys_sum_and_set_facing() {
    let s = make_state();
    let p = move_player(&s.player, &keys(true, false, true, false), &config());
    assert_eq!(p.rect.x, s.player.rect.x - 10.0);
    assert_eq!(p.rect.y, s.player.rect.y - 10.0);
    assert_eq!(p.facing, Facing::UpLeft);
}

#[test]
fn move_off_playfield_is_reverted_on_both_axes() {
    let mut s = make_state();
    s.player.rect.x = 0.0; // flush with the left wall
    let before = s.player.rect;
    let p = move_player(&s.player, &keys(true, false, true, false), &config());
    // Only x would leave the field, but the whole move is dropped.
    assert_eq!(p.rect, before);
    assert_eq!(p.facing, Facing::UpLeft);
}

#[test]
fn no_keys_keeps_previous_facing() {
    let mut s = make_state();
    s.player.facing = Facing::DownLeft;
    let p = move_player(&s.player, &InputSnapshot::default(), &config());
    assert_eq!(p.facing, Facing::DownLeft);
    assert_eq!(p.rect, s.player.rect);
}

#[test]
fn opposing_keys_cancel() {
    let mut s = make_state();
    s.player.facing = Facing::Up;
    let p = move_player(&s.player, &keys(false, false, true, true), &config());
    assert_eq!(p.rect, s.player.rect);
    assert_eq!(p.facing, Facing::Up);
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let before = s.player.rect;
    let _ = move_player(&s.player, &keys(false, true, false, false), &config());
    assert_eq!(s.player.rect, before);
}

// ── hyper state ───────────────────────────────────────────────────────────────

#[test]
fn hyper_counts_down_then_reverts_when_negative() {
    assert_eq!(
        update_hyper(&PlayerState::Hyper { remaining: 1 }),
        PlayerState::Hyper { remaining: 0 }
    );
    assert_eq!(update_hyper(&PlayerState::Hyper { remaining: 0 }), PlayerState::Normal);
    assert_eq!(update_hyper(&PlayerState::Normal), PlayerState::Normal);
}

#[test]
fn hyper_lasts_until_timer_goes_negative() {
    let mut state = PlayerState::Hyper { remaining: 100 };
    let mut last = 100;
    let mut frames = 0;
    while let PlayerState::Hyper { remaining } = state {
        assert!(remaining <= last);
        last = remaining;
        state = update_hyper(&state);
        frames += 1;
    }
    // 100, 99, …, 0 are all hyper; the step to −1 reverts.
    assert_eq!(frames, 101);
}

// ── enemy descent ─────────────────────────────────────────────────────────────

#[test]
fn enemy_stops_after_passing_threshold() {
    // Centre starts at 30, moves 6 a frame; the stop test precedes the move.
    let mut e = enemy_at(100.0, 0.0, 100.0);
    for _ in 0..12 {
        e = advance_enemy(&e);
    }
    assert_eq!(e.motion, Motion::Descending);
    assert!(close(e.rect.center().y, 102.0));

    e = advance_enemy(&e);
    assert_eq!(e.motion, Motion::Stopped);
    assert!(close(e.rect.center().y, 102.0));
}

#[test]
fn enemy_stop_is_permanent() {
    let mut e = enemy_at(100.0, 0.0, 60.0);
    let mut stopped_at = None;
    for _ in 0..200 {
        e = advance_enemy(&e);
        match (e.motion, stopped_at) {
            (Motion::Stopped, None) => stopped_at = Some(e.rect.y),
            (Motion::Stopped, Some(y)) => assert_eq!(e.rect.y, y),
            (Motion::Descending, Some(_)) => panic!("enemy resumed descending"),
            (Motion::Descending, None) => {}
        }
    }
    assert!(stopped_at.is_some());
}

#[test]
fn boss_descends_like_an_enemy() {
    let boss = Boss {
        rect: Rect::new(1200.0, 0.0, 200.0, 200.0),
        motion: Motion::Descending,
        speed: 6.0,
        stop_y: 150.0,
    };
    let b = advance_boss(&boss);
    assert_eq!(b.motion, Motion::Descending);
    assert_eq!(b.rect.y, 6.0);

    let mut b = b;
    for _ in 0..50 {
        b = advance_boss(&b);
    }
    assert_eq!(b.motion, Motion::Stopped);
}

// ── beams ─────────────────────────────────────────────────────────────────────

#[test]
fn beam_heading_is_unit_length() {
    for facing in Facing::ALL {
        let h = beam_heading(facing);
        assert!(close(h.length(), 1.0), "{facing:?}");
    }
    let h = beam_heading(Facing::UpRight);
    assert!(close(h.x, std::f32::consts::FRAC_1_SQRT_2));
    assert!(close(h.y, -std::f32::consts::FRAC_1_SQRT_2));
}

#[test]
fn beam_at_score_zero_moves_at_base_speed() {
    let s = make_state();
    let beams = fire_beams(&s.player, 0, &config());
    assert_eq!(beams.len(), 1);
    let beam = &beams[0];
    assert!(!beam.powered);
    assert_eq!(beam.rect.w, 24.0);
    // Spawned one player-width ahead of the player's centre.
    assert!(close(beam.rect.center().x, 960.0));
    assert!(close(beam.rect.center().y, 400.0));

    let moved = advance_beam(beam);
    assert!(close(moved.rect.x - beam.rect.x, 10.0));
    assert!(close(moved.rect.y, beam.rect.y));
    assert_eq!(moved.rect.w, beam.rect.w);
}

#[test]
fn beam_at_score_150_is_doubled() {
    let s = make_state();
    let beams = fire_beams(&s.player, 150, &config());
    assert_eq!(beams.len(), 1);
    let beam = &beams[0];
    assert!(beam.powered);
    assert_eq!(beam.rect.w, 48.0);
    let moved = advance_beam(beam);
    assert!(close(moved.rect.x - beam.rect.x, 20.0));
}

#[test]
fn beam_fan_past_second_threshold() {
    let s = make_state();
    let beams = fire_beams(&s.player, 200, &config());
    let kinds: Vec<BeamKind> = beams.iter().map(|b| b.kind).collect();
    assert_eq!(kinds, vec![BeamKind::Straight, BeamKind::Up, BeamKind::Down]);
    assert!(close(beams[1].velocity.y, -0.5));
    assert!(close(beams[2].velocity.y, 0.5));
    assert!(beams.iter().all(|b| b.powered));
}

// ── explosions ────────────────────────────────────────────────────────────────

#[test]
fn explosion_burns_out_when_life_goes_negative() {
    let e = Explosion {
        rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        kind: ExplosionKind::Blast,
        life: 1,
    };
    let e = advance_explosion(&e).expect("still burning at life 0");
    assert_eq!(e.life, 0);
    assert!(advance_explosion(&e).is_none());
}

#[test]
fn explosion_alternates_every_ten_frames() {
    let mut e = Explosion {
        rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        kind: ExplosionKind::Blast,
        life: 25,
    };
    assert_eq!(explosion_frame(&e), 0);
    e.life = 15;
    assert_eq!(explosion_frame(&e), 1);
    e.life = 5;
    assert_eq!(explosion_frame(&e), 0);
}

// ── background ────────────────────────────────────────────────────────────────

#[test]
fn background_offset_wraps() {
    assert_eq!(background_offset(10, 1), 10.0);
    assert_eq!(background_offset(6401, 1), 1.0);
    assert_eq!(background_offset(1280, 5), 0.0);
}

#[test]
fn background_tiles_alternate_mirroring() {
    assert_eq!(background_tiles(0.0, 1600.0, 1600.0), vec![(0.0, false)]);
    assert_eq!(
        background_tiles(800.0, 1600.0, 1600.0),
        vec![(-800.0, false), (800.0, true)]
    );
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_increments_frame() {
    let mut s = make_state();
    s.frame = 5;
    let s2 = tick(&s, &InputSnapshot::default(), &config(), &mut seeded_rng());
    assert_eq!(s2.frame, 6);
}

#[test]
fn tick_frame_zero_spawns_enemy_and_item() {
    let s = init_state(&config());
    let s2 = tick(&s, &InputSnapshot::default(), &config(), &mut seeded_rng());
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.items.len(), 1);
}

#[test]
fn tick_fire_press_spawns_and_moves_beam() {
    let s = make_state();
    let input = InputSnapshot {
        fire: true,
        fire_pressed: true,
        ..InputSnapshot::default()
    };
    let s2 = tick(&s, &input, &config(), &mut seeded_rng());
    assert_eq!(s2.beams.len(), 1);
    assert!(close(s2.beams[0].rect.center().x, 970.0));
}

#[test]
fn tick_held_fire_without_edge_does_not_shoot() {
    let s = make_state();
    let input = InputSnapshot {
        fire: true,
        ..InputSnapshot::default()
    };
    let s2 = tick(&s, &input, &config(), &mut seeded_rng());
    assert!(s2.beams.is_empty());
}

#[test]
fn tick_removes_beam_leaving_playfield() {
    let mut s = make_state();
    s.beams.push(Beam {
        rect: Rect::new(1570.0, 100.0, 24.0, 24.0),
        kind: BeamKind::Straight,
        velocity: Vec2::new(1.0, 0.0),
        speed: 10.0,
        powered: false,
    });
    let s2 = tick(&s, &InputSnapshot::default(), &config(), &mut seeded_rng());
    assert!(s2.beams.is_empty());
}

#[test]
fn tick_bomb_heading_never_changes() {
    let mut s = make_state();
    let heading = Vec2::new(0.6, 0.8);
    s.bombs.push(Bomb {
        rect: Rect::new(100.0, 100.0, 20.0, 20.0),
        velocity: heading,
        speed: 6.0,
        hue: 0,
    });
    let mut rng = seeded_rng();
    let mut state = s;
    for _ in 0..5 {
        // Player flees upward; the bomb keeps its original heading.
        state = tick(&state, &keys(true, false, false, false), &config(), &mut rng);
    }
    assert_eq!(state.bombs[0].velocity, heading);
    assert!(close(state.bombs[0].rect.x, 100.0 + 5.0 * 6.0 * 0.6));
}

#[test]
fn tick_removes_bomb_leaving_playfield() {
    let mut s = make_state();
    s.bombs.push(Bomb {
        rect: Rect::new(100.0, 880.0, 20.0, 20.0),
        velocity: Vec2::new(0.0, 1.0),
        speed: 6.0,
        hue: 0,
    });
    let s2 = tick(&s, &InputSnapshot::default(), &config(), &mut seeded_rng());
    assert!(s2.bombs.is_empty());
}

#[test]
fn tick_items_drift_left() {
    let mut s = make_state();
    s.items.push(Item {
        rect: Rect::new(500.0, 100.0, 40.0, 40.0),
        kind: ItemKind::Benefit,
        speed: 4.0,
    });
    let s2 = tick(&s, &InputSnapshot::default(), &config(), &mut seeded_rng());
    assert_eq!(s2.items[0].rect.x, 496.0);
}

#[test]
fn tick_after_run_end_is_a_no_op() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.frame = 77;
    let s2 = tick(&s, &keys(true, false, false, false), &config(), &mut seeded_rng());
    assert_eq!(s2.frame, 77);
    assert_eq!(s2.player.rect, s.player.rect);
}

#[test]
fn tick_normal_player_hit_with_last_life_ends_run() {
    let mut s = make_state();
    s.lives = kokaton::hud::Lives::new(1);
    s.bombs.push(Bomb {
        rect: s.player.rect,
        velocity: Vec2::new(0.0, 1.0),
        speed: 6.0,
        hue: 0,
    });
    let s2 = tick(&s, &InputSnapshot::default(), &config(), &mut seeded_rng());
    assert_eq!(s2.lives.value(), 0);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert!(s2.bombs.is_empty());
}

// ── long run invariants ──────────────────────────────────────────────────────

#[test]
fn simulation_keeps_invariants_over_many_frames() {
    let cfg = GameConfig {
        boss_score_threshold: 30,
        ..config()
    };
    let mut rng = StdRng::seed_from_u64(7);
    let mut state = init_state(&cfg);
    let mut last_score = 0;

    for frame in 0..4000u64 {
        let phase = (frame / 40) % 4;
        let input = InputSnapshot {
            up: phase == 0,
            right: phase == 1,
            down: phase == 2,
            left: phase == 3,
            fire: true,
            fire_pressed: frame % 6 == 0,
        };
        let prev_hyper = match state.player.state {
            PlayerState::Hyper { remaining } => Some(remaining),
            PlayerState::Normal => None,
        };
        state = tick(&state, &input, &cfg, &mut rng);

        assert!(state.score.value() >= last_score, "score went down");
        last_score = state.score.value();

        if state.status != GameStatus::Playing {
            break;
        }

        let (w, h) = (cfg.width, cfg.height);
        assert!(fully_inside(&state.player.rect, w, h));
        assert!(state.beams.iter().all(|b| fully_inside(&b.rect, w, h)));
        assert!(state.bombs.iter().all(|b| fully_inside(&b.rect, w, h)));
        assert!(state.boss_bombs.iter().all(|b| fully_inside(&b.rect, w, h)));
        assert!(state.items.iter().all(|i| fully_inside(&i.rect, w, h)));
        assert!(state.enemies.iter().all(|e| fully_inside(&e.rect, w, h)));
        assert!(state.explosions.iter().all(|e| e.life >= 0));

        if let (Some(before), PlayerState::Hyper { remaining }) = (prev_hyper, &state.player.state) {
            // Hyper players cannot be hit again, so the timer only counts down.
            assert_eq!(*remaining, before - 1);
        }
    }
}
