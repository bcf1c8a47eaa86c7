//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameSession` (and, where needed, an RNG handle) and returns a brand-new
//! `GameSession`.  Side effects are limited to the injected RNG; anything the
//! front end should react to comes back as a list of `GameEvent`s.

use rand::Rng;

use crate::collision;
use crate::config::{
    GameConfig, BIRD_EXIT_X, BIRD_MAX_SPEED, BIRD_MAX_Y, BIRD_MIN_SPEED, BIRD_MIN_Y, FIRE_THROTTLE,
    HIT_POINTS, MAX_ANGLE, MAX_SPEED, MIN_ANGLE, MIN_SPEED,
};
use crate::entities::{
    Bird, BirdKind, GameSession, GameStatus, PowerUpKind, Projectile,
};
use crate::events::GameEvent;
use crate::powerup::{self, Modifiers};

/// Keys held during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Controls {
    pub angle_up: bool,
    pub angle_down: bool,
    pub speed_up: bool,
    pub speed_down: bool,
    pub fire: bool,
}

/// The state after a tick together with what happened during it.
#[derive(Clone, Debug)]
pub struct TickOutcome {
    pub state: GameSession,
    pub events: Vec<GameEvent>,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh round. `best_score` is the top persisted score, used for the
/// one-shot high-score cue.
pub fn init_state(config: GameConfig, best_score: u32) -> GameSession {
    log::debug!("new session, best score {}", best_score);
    GameSession::new(config, best_score)
}

/// Roll a new bird at the right edge.
pub fn spawn_bird(config: &GameConfig, rng: &mut impl Rng) -> Bird {
    let y = rng.gen_range(BIRD_MIN_Y..=BIRD_MAX_Y) as f64;
    let base_speed = rng.gen_range(BIRD_MIN_SPEED..BIRD_MAX_SPEED);
    let kind = if rng.gen::<f64>() < config.powerup_chance {
        let pick = rng.gen_range(0..PowerUpKind::ALL.len());
        BirdKind::PowerUp(PowerUpKind::ALL[pick])
    } else {
        BirdKind::Regular
    };
    Bird::new(config.width, y, base_speed, kind)
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn raise_angle(state: &GameSession) -> GameSession {
    GameSession {
        angle: (state.angle + 1).min(MAX_ANGLE),
        ..state.clone()
    }
}

pub fn lower_angle(state: &GameSession) -> GameSession {
    GameSession {
        angle: state.angle.saturating_sub(1).max(MIN_ANGLE),
        ..state.clone()
    }
}

pub fn increase_speed(state: &GameSession) -> GameSession {
    GameSession {
        speed: (state.speed + 1).min(MAX_SPEED),
        ..state.clone()
    }
}

pub fn decrease_speed(state: &GameSession) -> GameSession {
    GameSession {
        speed: state.speed.saturating_sub(1).max(MIN_SPEED),
        ..state.clone()
    }
}

/// Apply every held aim key once.
pub fn adjust_aim(state: &GameSession, controls: &Controls) -> GameSession {
    let mut next = state.clone();
    if controls.angle_up {
        next = raise_angle(&next);
    }
    if controls.angle_down {
        next = lower_angle(&next);
    }
    if controls.speed_up {
        next = increase_speed(&next);
    }
    if controls.speed_down {
        next = decrease_speed(&next);
    }
    next
}

/// A throw needs a stone in hand and the previous stone to have flown long
/// enough.
pub fn can_fire(state: &GameSession) -> bool {
    state.ammo > 0
        && state
            .projectiles
            .last()
            .map_or(true, |p| p.elapsed() > FIRE_THROTTLE)
}

/// Throw a stone at the current aim. Returns the state unchanged when
/// [`can_fire`] says no.
pub fn fire(state: &GameSession) -> GameSession {
    if !can_fire(state) {
        return state.clone();
    }
    let scale = Modifiers::from_effects(&state.effects, state.clock).projectile_scale;
    let stone = Projectile::launch(
        state.config.launch_point(),
        state.angle,
        state.speed,
        state.config.gravity,
        scale,
    );
    let mut projectiles = state.projectiles.clone();
    projectiles.push(stone);
    GameSession {
        projectiles,
        ammo: state.ammo - 1,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one tick.  `dt` is the wall-clock time since the
/// previous tick in seconds; it drives power-up lifetimes and wing animation
/// but not stone flight, which moves a fixed step per tick.  All randomness
/// comes through `rng` so callers control determinism.
pub fn tick(state: &GameSession, controls: &Controls, dt: f64, rng: &mut impl Rng) -> TickOutcome {
    if state.status == GameStatus::RoundOver {
        return TickOutcome {
            state: state.clone(),
            events: Vec::new(),
        };
    }

    let config = state.config;
    let mut events = Vec::new();

    // ── 1. Aim & throw ───────────────────────────────────────────────────────
    let aimed = adjust_aim(state, controls);
    let state = if controls.fire && can_fire(&aimed) {
        events.push(GameEvent::Throw);
        fire(&aimed)
    } else {
        aimed
    };

    let clock = state.clock + dt;
    let mods = Modifiers::from_effects(&state.effects, clock);

    // ── 2. Spawn a new bird ──────────────────────────────────────────────────
    let mut birds = state.birds.clone();
    let mut spawn_timer = state.spawn_timer + 1;
    if spawn_timer > config.spawn_interval {
        birds.push(spawn_bird(&config, rng));
        spawn_timer = 0;
    }

    // ── 3. Move everything, dropping what left the field ─────────────────────
    let birds: Vec<Bird> = birds
        .iter()
        .map(|b| b.advance(mods.speed_multiplier, dt))
        .filter(|b| b.x >= BIRD_EXIT_X)
        .collect();

    let projectiles: Vec<Projectile> = state
        .projectiles
        .iter()
        .map(Projectile::advance)
        .filter(|p| !p.is_off_screen(config.width, config.height))
        .collect();

    // ── 4. Collision: stones ↔ birds ─────────────────────────────────────────
    let hits = collision::resolve(&projectiles, &birds);

    let mut score = state.score;
    let mut ammo = state.ammo;
    let mut effects = state.effects.clone();
    let mut high_score_announced = state.high_score_announced;

    for hit in &hits {
        let bird = &birds[hit.bird];
        let fp = collision::footprint(bird);
        events.push(GameEvent::Explosion { x: fp.cx, y: fp.cy });

        // A collected power-up already counts for the hit that collects it.
        if let Some(kind) = bird.power_up() {
            effects.push(powerup::activate(kind, clock));
            events.push(GameEvent::PowerUpCollected(kind));
            if kind == PowerUpKind::ExtraAmmo {
                ammo = ammo.saturating_add(1);
            }
        }
        let multiplier = Modifiers::from_effects(&effects, clock).score_multiplier;
        score = score.saturating_add(HIT_POINTS * multiplier);

        // Every hit refunds the stone.
        ammo = ammo.saturating_add(1);

        if score > state.best_score && !high_score_announced {
            high_score_announced = true;
            events.push(GameEvent::HighScore);
        }
    }

    let spent: Vec<usize> = hits.iter().map(|h| h.projectile).collect();
    let downed: Vec<usize> = hits.iter().map(|h| h.bird).collect();
    let projectiles = without(&projectiles, &spent);
    let birds = without(&birds, &downed);

    // ── 5. Expire power-ups & refresh stone size ─────────────────────────────
    let effects = powerup::prune(&effects, clock);
    let scale = Modifiers::from_effects(&effects, clock).projectile_scale;
    let projectiles: Vec<Projectile> = projectiles
        .into_iter()
        .map(|p| Projectile { scale, ..p })
        .collect();

    // ── 6. Round over? ───────────────────────────────────────────────────────
    let mut next = GameSession {
        projectiles,
        birds,
        effects,
        score,
        ammo,
        high_score_announced,
        spawn_timer,
        clock,
        frame: state.frame + 1,
        ..state
    };

    if next.is_terminal() {
        log::info!("round over after {} ticks, score {}", next.frame, next.score);
        next.status = GameStatus::RoundOver;
        events.push(GameEvent::RoundOver { score: next.score });
    }

    TickOutcome {
        state: next,
        events,
    }
}

/// Copy `items` minus the given indices.
fn without<T: Clone>(items: &[T], removed: &[usize]) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| !removed.contains(i))
        .map(|(_, item)| item.clone())
        .collect()
}
