mod display;

use std::collections::HashMap;
use std::fs;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use pigeons::clock::{FrameClock, TICK_RATE_HZ};
use pigeons::compute::{init_state, tick, Controls};
use pigeons::config::{self, GameConfig};
use pigeons::entities::{GameSession, GameStatus};
use pigeons::events::GameEvent;
use pigeons::leaderboard::{self, Leaderboard};
use pigeons::menu::{
    MenuChoice, MenuInput, MenuState, NameEntry, NameInput, RoundOverChoice, Screen,
};

use crate::display::effects::Effects;

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at
/// 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// A throw consumes the Space press that caused it. Without release events a
/// single tap would otherwise stay "held" past the throw throttle and throw
/// twice; holding the key keeps throwing through OS key repeat.
fn consume_fire(key_frame: &mut HashMap<KeyCode, u64>, events: &[GameEvent]) {
    if events.contains(&GameEvent::Throw) {
        key_frame.remove(&KeyCode::Char(' '));
    }
}

fn is_ctrl_c(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    *code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL)
}

/// Block for the next key press. `None` once the input thread has gone.
fn next_press(rx: &mpsc::Receiver<Event>) -> Option<(KeyCode, KeyModifiers)> {
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            })) => return Some((code, modifiers)),
            Ok(_) => {}
            Err(_) => return None,
        }
    }
}

/// Throw away input queued while the previous screen was running, so a held
/// Space does not also confirm the next screen.
fn drain(rx: &mpsc::Receiver<Event>) {
    while rx.try_recv().is_ok() {}
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs go to ~/.pigeons/pigeons.log and
/// only when RUST_LOG is set.
fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let Ok(dir) = config::data_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("pigeons.log"))
    else {
        return;
    };
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

// ── Modal screens ─────────────────────────────────────────────────────────────

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    menu: &mut MenuState,
    best: u32,
) -> std::io::Result<MenuChoice> {
    drain(rx);
    loop {
        display::render_menu(out, menu, best)?;
        let Some((code, modifiers)) = next_press(rx) else {
            return Ok(MenuChoice::Quit);
        };
        let input = match code {
            KeyCode::Up | KeyCode::Char('w') => MenuInput::Up,
            KeyCode::Down | KeyCode::Char('s') => MenuInput::Down,
            KeyCode::Enter | KeyCode::Char(' ') => MenuInput::Select,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(MenuChoice::Quit);
            }
            _ if is_ctrl_c(&code, modifiers) => return Ok(MenuChoice::Quit),
            _ => continue,
        };
        if let Some(choice) = menu.handle(input) {
            return Ok(choice);
        }
    }
}

/// Returns `false` if the player quit instead of continuing.
fn show_leaderboard<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    board: &Leaderboard,
) -> std::io::Result<bool> {
    drain(rx);
    display::render_leaderboard(out, board)?;
    while let Some((code, modifiers)) = next_press(rx) {
        match code {
            KeyCode::Char(' ') | KeyCode::Enter => return Ok(true),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(false),
            _ if is_ctrl_c(&code, modifiers) => return Ok(false),
            _ => {}
        }
    }
    Ok(false)
}

/// Name prompt for a leaderboard place. `None` if the player quit.
fn ask_name<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    score: u32,
) -> std::io::Result<Option<String>> {
    drain(rx);
    let mut entry = NameEntry::default();
    loop {
        display::render_name_entry(out, &entry, score)?;
        let Some((code, modifiers)) = next_press(rx) else {
            return Ok(None);
        };
        let input = match code {
            KeyCode::Esc => return Ok(None),
            _ if is_ctrl_c(&code, modifiers) => return Ok(None),
            KeyCode::Enter => NameInput::Confirm,
            KeyCode::Backspace => NameInput::Backspace,
            KeyCode::Char(c) => NameInput::Char(c),
            _ => continue,
        };
        if let Some(name) = entry.handle(input) {
            return Ok(Some(name));
        }
    }
}

fn round_over<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    state: &GameSession,
) -> std::io::Result<RoundOverChoice> {
    drain(rx);
    display::draw_round_over(out, state)?;
    while let Some((code, modifiers)) = next_press(rx) {
        match code {
            KeyCode::Char(' ') | KeyCode::Enter => return Ok(RoundOverChoice::Continue),
            KeyCode::Char('r') | KeyCode::Char('R') => return Ok(RoundOverChoice::Replay),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(RoundOverChoice::Quit)
            }
            _ if is_ctrl_c(&code, modifiers) => return Ok(RoundOverChoice::Quit),
            _ => {}
        }
    }
    Ok(RoundOverChoice::Quit)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Plays one round.  Returns the finished session, or `None` if the player
/// quit mid-round.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and apply all their effects simultaneously,
/// so aiming and throwing can be held at the same time.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameSession,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<Option<GameSession>> {
    let mut rng = thread_rng();
    let mut clock = FrameClock::new(TICK_RATE_HZ);
    let mut effects = Effects::default();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    drain(rx);
    loop {
        let dt = clock.begin_frame();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    if matches!(
                        code,
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
                    ) || is_ctrl_c(&code, modifiers)
                    {
                        return Ok(None);
                    }
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let controls = Controls {
            angle_up: any_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w')], frame),
            angle_down: any_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s')], frame),
            speed_up: any_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d')], frame),
            speed_down: any_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a')], frame),
            fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
        };

        let outcome = tick(&state, &controls, dt, &mut rng);
        consume_fire(&mut key_frame, &outcome.events);
        state = outcome.state;
        effects.absorb(&outcome.events);

        if effects.take_bell() {
            out.queue(Print("\x07"))?;
        }
        display::render(out, &state, &effects)?;
        effects.step();

        if state.status == GameStatus::RoundOver {
            return Ok(Some(state));
        }

        clock.finish_frame();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let config = match config::config_path() {
        Ok(path) => GameConfig::load(&path),
        Err(e) => {
            log::warn!("using default config: {}", e);
            GameConfig::default()
        }
    };

    let board_path = match leaderboard::leaderboard_path() {
        Ok(path) => Some(path),
        Err(e) => {
            log::warn!("leaderboard disabled: {}", e);
            None
        }
    };
    let mut board = board_path
        .as_deref()
        .map(leaderboard::load)
        .unwrap_or_default();

    let mut menu = MenuState::default();
    let mut last_round: Option<GameSession> = None;
    let mut screen = Screen::Menu;

    loop {
        screen = match screen {
            Screen::Menu => match show_menu(out, rx, &mut menu, board.best_score())?.target() {
                Some(next) => next,
                None => break,
            },
            Screen::Leaderboard => {
                if !show_leaderboard(out, rx, &board)? {
                    break;
                }
                Screen::Menu
            }
            Screen::Playing => {
                log::info!("starting round");
                let state = init_state(config, board.best_score());
                match game_loop(out, state, rx)? {
                    Some(finished) => {
                        last_round = Some(finished);
                        Screen::NameEntry
                    }
                    None => break,
                }
            }
            Screen::NameEntry => {
                let score = last_round.as_ref().map_or(0, |s| s.score);
                if board.qualifies(score) {
                    let Some(name) = ask_name(out, rx, score)? else {
                        break;
                    };
                    let rank = board.record(&name, score);
                    log::info!("{} scored {} (rank {:?})", name, score, rank);
                    if let Some(path) = &board_path {
                        leaderboard::save_best_effort(path, &board);
                    }
                }
                Screen::RoundOver
            }
            Screen::RoundOver => match &last_round {
                None => Screen::Menu,
                Some(state) => {
                    let choice = round_over(out, rx, state)?;
                    if choice == RoundOverChoice::Continue {
                        menu = MenuState::default();
                    }
                    match choice.target() {
                        Some(next) => next,
                        None => break,
                    }
                }
            },
        };
    }
    Ok(())
}
