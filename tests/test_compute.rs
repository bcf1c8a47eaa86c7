use pigeons::collision::footprint;
use pigeons::compute::*;
use pigeons::config::{GameConfig, BIRD_MAX_Y, BIRD_MIN_Y, HIT_POINTS};
use pigeons::entities::*;
use pigeons::events::GameEvent;
use pigeons::powerup::activate;

use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f64 = 1.0 / 60.0;

fn make_state() -> GameSession {
    init_state(GameConfig::default(), 0)
}

/// Same as `make_state` but birds never spawn on their own.
fn quiet_state() -> GameSession {
    init_state(
        GameConfig {
            spawn_interval: u32::MAX,
            ..GameConfig::default()
        },
        0,
    )
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> Controls {
    Controls::default()
}

fn firing() -> Controls {
    Controls {
        fire: true,
        ..Controls::default()
    }
}

/// A stone freshly launched at the current aim.
fn stone(state: &GameSession) -> Projectile {
    Projectile::launch(
        state.config.launch_point(),
        state.angle,
        state.speed,
        state.config.gravity,
        1.0,
    )
}

/// A motionless bird whose footprint is centred where `stone` will be after
/// one tick.
fn bird_in_path(state: &GameSession, kind: BirdKind) -> Bird {
    let next = stone(state).advance();
    let probe = Bird::new(0.0, 0.0, 0.0, kind);
    let fp = footprint(&probe);
    Bird::new(next.x - fp.cx, next.y - fp.cy, 0.0, kind)
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_defaults() {
    let s = make_state();
    assert_eq!(s.angle, 45);
    assert_eq!(s.speed, 50);
    assert_eq!(s.ammo, 20);
    assert_eq!(s.score, 0);
    assert!(!s.high_score_announced);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn init_state_empty_collections() {
    let s = make_state();
    assert!(s.projectiles.is_empty());
    assert!(s.birds.is_empty());
    assert!(s.effects.is_empty());
    assert_eq!(s.spawn_timer, 0);
    assert_eq!(s.frame, 0);
}

#[test]
fn init_state_uses_configured_ammo_and_best() {
    let config = GameConfig {
        starting_ammo: 7,
        ..GameConfig::default()
    };
    let s = init_state(config, 900);
    assert_eq!(s.ammo, 7);
    assert_eq!(s.best_score, 900);
}

// ── aim ───────────────────────────────────────────────────────────────────────

#[test]
fn raise_angle_steps_by_one() {
    assert_eq!(raise_angle(&make_state()).angle, 46);
}

#[test]
fn angle_clamps_at_both_ends() {
    let mut s = make_state();
    s.angle = 90;
    assert_eq!(raise_angle(&s).angle, 90);
    s.angle = 1;
    assert_eq!(lower_angle(&s).angle, 1);
}

#[test]
fn speed_clamps_at_both_ends() {
    let mut s = make_state();
    s.speed = 150;
    assert_eq!(increase_speed(&s).speed, 150);
    s.speed = 10;
    assert_eq!(decrease_speed(&s).speed, 10);
}

#[test]
fn adjust_aim_applies_every_held_key() {
    let s = make_state();
    let controls = Controls {
        angle_up: true,
        speed_down: true,
        ..Controls::default()
    };
    let s2 = adjust_aim(&s, &controls);
    assert_eq!(s2.angle, 46);
    assert_eq!(s2.speed, 49);
}

#[test]
fn aim_does_not_mutate_original() {
    let s = make_state();
    let _ = raise_angle(&s);
    let _ = increase_speed(&s);
    assert_eq!(s.angle, 45);
    assert_eq!(s.speed, 50);
}

// ── fire ──────────────────────────────────────────────────────────────────────

#[test]
fn fire_adds_stone_at_launch_point() {
    let s = make_state();
    let s2 = fire(&s);
    assert_eq!(s2.projectiles.len(), 1);
    assert_eq!(s2.ammo, 19);
    let p = &s2.projectiles[0];
    let (x0, y0) = s.config.launch_point();
    assert_eq!((p.x, p.y), (x0, y0));
    assert_eq!(p.steps, 0);
}

#[test]
fn fire_is_noop_without_ammo() {
    let mut s = make_state();
    s.ammo = 0;
    let s2 = fire(&s);
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.ammo, 0);
}

#[test]
fn fire_throttled_until_last_stone_flew_half_a_unit() {
    let mut s = make_state();
    let mut p = stone(&s);
    p.steps = 5; // elapsed 0.5, not > 0.5
    s.projectiles.push(p.clone());
    assert!(!can_fire(&s));
    assert_eq!(fire(&s).projectiles.len(), 1);

    s.projectiles[0].steps = 6;
    assert!(can_fire(&s));
    assert_eq!(fire(&s).projectiles.len(), 2);
}

#[test]
fn fire_uses_big_stone_scale_when_active() {
    let mut s = make_state();
    s.effects.push(activate(PowerUpKind::BigProjectiles, 0.0));
    let s2 = fire(&s);
    assert_eq!(s2.projectiles[0].scale, 2.0);
}

// ── tick — throwing ───────────────────────────────────────────────────────────

#[test]
fn tick_fire_emits_throw_and_advances_stone() {
    let s = quiet_state();
    let out = tick(&s, &firing(), DT, &mut seeded_rng());
    assert_eq!(out.events, vec![GameEvent::Throw]);
    assert_eq!(out.state.projectiles.len(), 1);
    assert_eq!(out.state.projectiles[0].steps, 1);
    assert_eq!(out.state.ammo, 19);
}

#[test]
fn tick_holding_fire_throws_every_six_ticks() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let mut throws = 0;
    for _ in 0..12 {
        let out = tick(&s, &firing(), DT, &mut rng);
        throws += out.events.iter().filter(|e| **e == GameEvent::Throw).count();
        s = out.state;
    }
    assert_eq!(throws, 2);
}

#[test]
fn tick_increments_frame_and_clock() {
    let s = quiet_state();
    let out = tick(&s, &idle(), 0.5, &mut seeded_rng());
    assert_eq!(out.state.frame, 1);
    assert!((out.state.clock - 0.5).abs() < 1e-12);
}

// ── tick — birds ──────────────────────────────────────────────────────────────

#[test]
fn tick_spawns_bird_once_timer_exceeds_interval() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    for _ in 0..90 {
        s = tick(&s, &idle(), DT, &mut rng).state;
    }
    assert!(s.birds.is_empty());
    assert_eq!(s.spawn_timer, 90);

    s = tick(&s, &idle(), DT, &mut rng).state;
    assert_eq!(s.birds.len(), 1);
    assert_eq!(s.spawn_timer, 0);
    let bird = &s.birds[0];
    assert!(bird.x < s.config.width);
    assert!(bird.y >= BIRD_MIN_Y as f64 && bird.y <= BIRD_MAX_Y as f64);
}

#[test]
fn tick_bird_purged_past_left_edge() {
    let mut s = quiet_state();
    s.birds.push(Bird::new(-48.0, 200.0, 3.0, BirdKind::Regular));
    s.birds.push(Bird::new(-40.0, 200.0, 3.0, BirdKind::Regular));
    let out = tick(&s, &idle(), DT, &mut seeded_rng());
    assert_eq!(out.state.birds.len(), 1);
    assert_eq!(out.state.birds[0].x, -43.0);
}

#[test]
fn tick_slow_motion_halves_bird_speed() {
    let mut s = quiet_state();
    s.birds.push(Bird::new(600.0, 200.0, 4.0, BirdKind::Regular));
    s.effects.push(activate(PowerUpKind::SlowMotion, 0.0));
    let out = tick(&s, &idle(), DT, &mut seeded_rng());
    assert_eq!(out.state.birds[0].x, 598.0);
    // the stored base speed is untouched
    assert_eq!(out.state.birds[0].base_speed, 4.0);
}

#[test]
fn tick_bird_speed_recovers_after_slow_motion_expires() {
    let mut s = quiet_state();
    s.birds.push(Bird::new(600.0, 200.0, 4.0, BirdKind::Regular));
    s.effects.push(activate(PowerUpKind::SlowMotion, 0.0));
    s.clock = 5.5;
    let out = tick(&s, &idle(), DT, &mut seeded_rng());
    assert_eq!(out.state.birds[0].x, 596.0);
    assert!(out.state.effects.is_empty());
}

// ── tick — collisions ─────────────────────────────────────────────────────────

#[test]
fn tick_stone_hits_regular_bird() {
    let mut s = quiet_state();
    let bird = bird_in_path(&s, BirdKind::Regular);
    s.birds.push(bird);

    let out = tick(&s, &firing(), DT, &mut seeded_rng());
    assert!(out.state.birds.is_empty());
    assert!(out.state.projectiles.is_empty());
    assert_eq!(out.state.score, HIT_POINTS);
    // one stone spent, one refunded
    assert_eq!(out.state.ammo, 20);
    assert!(out.events.contains(&GameEvent::Throw));
    assert_eq!(
        out.events
            .iter()
            .filter(|e| matches!(e, GameEvent::Explosion { .. }))
            .count(),
        1
    );
}

#[test]
fn tick_explosion_is_at_bird_footprint() {
    let mut s = quiet_state();
    let bird = bird_in_path(&s, BirdKind::Regular);
    let fp = footprint(&bird);
    s.birds.push(bird);
    let out = tick(&s, &firing(), DT, &mut seeded_rng());
    assert!(out
        .events
        .contains(&GameEvent::Explosion { x: fp.cx, y: fp.cy }));
}

#[test]
fn tick_double_points_scores_200() {
    let mut s = quiet_state();
    s.effects.push(activate(PowerUpKind::DoublePoints, 0.0));
    let bird = bird_in_path(&s, BirdKind::Regular);
    s.birds.push(bird);
    let out = tick(&s, &firing(), DT, &mut seeded_rng());
    assert_eq!(out.state.score, 200);
}

#[test]
fn tick_power_up_bird_activates_exactly_one_effect() {
    let mut s = quiet_state();
    let bird = bird_in_path(&s, BirdKind::PowerUp(PowerUpKind::SlowMotion));
    s.birds.push(bird);
    s.birds.push(Bird::new(900.0, 150.0, 0.0, BirdKind::Regular));

    let out = tick(&s, &firing(), DT, &mut seeded_rng());
    assert_eq!(out.state.effects.len(), 1);
    assert_eq!(out.state.effects[0].kind, PowerUpKind::SlowMotion);
    assert_eq!(out.state.birds.len(), 1);
    assert!(out.state.projectiles.is_empty());
    assert!(out
        .events
        .contains(&GameEvent::PowerUpCollected(PowerUpKind::SlowMotion)));
}

#[test]
fn tick_double_points_boosts_the_hit_that_collects_it() {
    let mut s = quiet_state();
    let bird = bird_in_path(&s, BirdKind::PowerUp(PowerUpKind::DoublePoints));
    s.birds.push(bird);
    let out = tick(&s, &firing(), DT, &mut seeded_rng());
    assert_eq!(out.state.score, 200);
    assert_eq!(out.state.effects.len(), 1);
}

#[test]
fn tick_double_points_applies_to_later_hits_in_same_tick() {
    let mut s = quiet_state();
    s.projectiles.push(stone(&s));
    s.projectiles.push(stone(&s));
    s.birds
        .push(bird_in_path(&s, BirdKind::PowerUp(PowerUpKind::DoublePoints)));
    s.birds.push(bird_in_path(&s, BirdKind::Regular));

    let out = tick(&s, &idle(), DT, &mut seeded_rng());
    assert!(out.state.birds.is_empty());
    assert_eq!(out.state.score, 400);
}

#[test]
fn tick_refunds_saturate_at_ammo_limit() {
    let mut s = quiet_state();
    s.ammo = u32::MAX;
    s.projectiles.push(stone(&s));
    s.birds
        .push(bird_in_path(&s, BirdKind::PowerUp(PowerUpKind::ExtraAmmo)));

    let out = tick(&s, &idle(), DT, &mut seeded_rng());
    assert!(out.state.birds.is_empty());
    assert_eq!(out.state.ammo, u32::MAX);
}

#[test]
fn tick_extra_ammo_stacks_with_hit_refund() {
    let mut s = quiet_state();
    let bird = bird_in_path(&s, BirdKind::PowerUp(PowerUpKind::ExtraAmmo));
    s.birds.push(bird);
    let out = tick(&s, &firing(), DT, &mut seeded_rng());
    // 20 - 1 thrown + 1 refund + 1 extra
    assert_eq!(out.state.ammo, 21);
}

#[test]
fn tick_big_stones_resize_stones_in_flight() {
    let mut s = quiet_state();
    s.projectiles.push(stone(&s));
    s.effects.push(activate(PowerUpKind::BigProjectiles, 0.0));
    let out = tick(&s, &idle(), DT, &mut seeded_rng());
    assert_eq!(out.state.projectiles[0].scale, 2.0);
}

#[test]
fn tick_stone_downs_at_most_one_bird() {
    let mut s = quiet_state();
    let bird = bird_in_path(&s, BirdKind::Regular);
    s.birds.push(bird.clone());
    s.birds.push(bird);
    let out = tick(&s, &firing(), DT, &mut seeded_rng());
    assert_eq!(out.state.birds.len(), 1);
    assert_eq!(out.state.score, 100);
}

// ── tick — high score cue ─────────────────────────────────────────────────────

#[test]
fn tick_high_score_announced_once() {
    let mut s = init_state(
        GameConfig {
            spawn_interval: u32::MAX,
            ..GameConfig::default()
        },
        50,
    );
    let bird = bird_in_path(&s, BirdKind::Regular);
    s.birds.push(bird.clone());

    let out = tick(&s, &firing(), DT, &mut seeded_rng());
    assert!(out.events.contains(&GameEvent::HighScore));
    assert!(out.state.high_score_announced);

    // Second hit, still above the old best: no repeat.
    let mut s2 = out.state;
    s2.projectiles.push(stone(&s2));
    s2.birds.push(bird);
    let out2 = tick(&s2, &idle(), DT, &mut seeded_rng());
    assert_eq!(out2.state.score, 200);
    assert!(!out2.events.contains(&GameEvent::HighScore));
}

#[test]
fn tick_no_high_score_below_best() {
    let mut s = init_state(
        GameConfig {
            spawn_interval: u32::MAX,
            ..GameConfig::default()
        },
        1000,
    );
    let bird = bird_in_path(&s, BirdKind::Regular);
    s.birds.push(bird);
    let out = tick(&s, &firing(), DT, &mut seeded_rng());
    assert!(!out.events.contains(&GameEvent::HighScore));
}

// ── tick — power-up expiry ────────────────────────────────────────────────────

#[test]
fn tick_keeps_effect_until_exactly_five_units() {
    let mut s = quiet_state();
    s.effects.push(activate(PowerUpKind::DoublePoints, 0.0));
    s.clock = 4.5;
    let out = tick(&s, &idle(), 0.5, &mut seeded_rng());
    assert_eq!(out.state.effects.len(), 1);

    let out2 = tick(&out.state, &idle(), 0.01, &mut seeded_rng());
    assert!(out2.state.effects.is_empty());
}

// ── tick — round over ─────────────────────────────────────────────────────────

#[test]
fn tick_round_over_when_out_of_stones() {
    let mut s = quiet_state();
    s.ammo = 0;
    let out = tick(&s, &idle(), DT, &mut seeded_rng());
    assert_eq!(out.state.status, GameStatus::RoundOver);
    assert_eq!(out.events, vec![GameEvent::RoundOver { score: 0 }]);
}

#[test]
fn tick_not_over_while_last_stone_flies() {
    let mut s = quiet_state();
    s.ammo = 0;
    s.projectiles.push(stone(&s));
    let out = tick(&s, &idle(), DT, &mut seeded_rng());
    assert_eq!(out.state.status, GameStatus::Playing);
}

#[test]
fn tick_is_noop_after_round_over() {
    let mut s = quiet_state();
    s.status = GameStatus::RoundOver;
    s.ammo = 3;
    let out = tick(&s, &firing(), DT, &mut seeded_rng());
    assert!(out.events.is_empty());
    assert_eq!(out.state.ammo, 3);
    assert_eq!(out.state.frame, 0);
}

#[test]
fn twenty_misses_end_the_round_with_zero() {
    let mut s = quiet_state();
    // Flat and slow: every stone drops off the bottom.
    s.angle = 1;
    s.speed = 10;
    let mut rng = seeded_rng();
    let mut throws = 0;

    for _ in 0..10_000 {
        let out = tick(&s, &firing(), DT, &mut rng);
        throws += out.events.iter().filter(|e| **e == GameEvent::Throw).count();
        s = out.state;
        if s.status == GameStatus::RoundOver {
            break;
        }
        assert!(s.ammo > 0 || !s.projectiles.is_empty());
    }

    assert_eq!(s.status, GameStatus::RoundOver);
    assert_eq!(throws, 20);
    assert_eq!(s.score, 0);
    assert_eq!(s.ammo, 0);
    assert!(s.projectiles.is_empty());
}

// ── spawn_bird ────────────────────────────────────────────────────────────────

#[test]
fn spawn_bird_within_band() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    for _ in 0..500 {
        let bird = spawn_bird(&config, &mut rng);
        assert_eq!(bird.x, config.width);
        assert!(bird.y >= 100.0 && bird.y <= 300.0);
        assert!(bird.base_speed >= 2.0 && bird.base_speed < 5.0);
        assert_eq!(bird.frame, 0);
    }
}

#[test]
fn spawn_bird_power_up_share_is_about_a_fifth() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    let carriers = (0..2000)
        .filter(|_| spawn_bird(&config, &mut rng).power_up().is_some())
        .count();
    assert!((300..500).contains(&carriers), "got {}", carriers);
}

#[test]
fn spawn_bird_respects_power_up_chance_extremes() {
    let mut rng = seeded_rng();
    let never = GameConfig {
        powerup_chance: 0.0,
        ..GameConfig::default()
    };
    let always = GameConfig {
        powerup_chance: 1.0,
        ..GameConfig::default()
    };
    for _ in 0..100 {
        assert_eq!(spawn_bird(&never, &mut rng).kind, BirdKind::Regular);
        assert!(spawn_bird(&always, &mut rng).power_up().is_some());
    }
}
