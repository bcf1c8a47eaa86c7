//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands, scaling the logical 1280×720 field onto
//! whatever grid the terminal offers.

pub mod effects;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use pigeons::collision::footprint;
use pigeons::entities::{Bird, BirdKind, GameSession, PowerUpKind, Projectile};
use pigeons::leaderboard::Leaderboard;
use pigeons::menu::{MenuChoice, MenuState, NameEntry};
use pigeons::powerup;
use pigeons::preview::{preview, PreviewPoint};

use self::effects::{power_up_color, Effects};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_HUD_SCORE: Color = Color::Green;
const C_HUD_BEST: Color = Color::Yellow;
const C_THROWER: Color = Color::White;
const C_BIRD: Color = Color::Grey;
const C_STONE: Color = Color::Cyan;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

/// Wing poses, cycled by the bird's animation frame.
const BIRD_FRAMES: [&str; 8] = ["\\v/", "\\v/", "-v-", "_v_", "_v_", "-v-", "/v\\", "-v-"];

/// The preview shows one dot in this many samples.
const PREVIEW_DOT_EVERY: usize = 7;

// ── Field → terminal mapping ──────────────────────────────────────────────────

/// Play area is rows 2 .. rows-2 and columns 1 .. cols-1.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    cols: u16,
    rows: u16,
    field_w: f64,
    field_h: f64,
}

impl Viewport {
    fn new(state: &GameSession) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Viewport {
            cols,
            rows,
            field_w: state.config.width,
            field_h: state.config.height,
        })
    }

    fn cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x > self.field_w || y > self.field_h {
            return None;
        }
        let inner_w = self.cols.saturating_sub(3) as f64;
        let inner_h = self.rows.saturating_sub(5) as f64;
        let col = 1 + ((x / self.field_w) * inner_w).round() as u16;
        let row = 2 + ((y / self.field_h) * inner_h).round() as u16;
        Some((col, row))
    }

    /// Print `text` centred on `col`, clipped to the play area.
    fn put<W: Write>(&self, out: &mut W, col: u16, row: u16, text: &str) -> std::io::Result<()> {
        let half = text.chars().count() as u16 / 2;
        let start = col.saturating_sub(half).max(1);
        let room = self.cols.saturating_sub(1).saturating_sub(start) as usize;
        if room == 0 || row < 2 || row >= self.rows.saturating_sub(2) {
            return Ok(());
        }
        let clipped: String = text.chars().take(room).collect();
        out.queue(cursor::MoveTo(start, row))?;
        out.queue(Print(clipped))?;
        Ok(())
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete gameplay frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameSession,
    effects: &Effects,
) -> std::io::Result<()> {
    let vp = Viewport::new(state)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &vp)?;
    draw_hud(out, state)?;
    draw_power_ups(out, state)?;
    draw_preview(out, &vp, &preview(&state.config, state.angle, state.speed))?;

    for bird in &state.birds {
        draw_bird(out, &vp, bird)?;
    }
    for stone in &state.projectiles {
        draw_stone(out, &vp, stone)?;
    }
    draw_explosions(out, &vp, effects)?;
    draw_thrower(out, &vp, state.config.thrower_pos(), effects.throw_frames > 0)?;
    draw_banner(out, &vp, effects)?;
    draw_controls_hint(out, vp.rows)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

pub fn render_menu<W: Write>(out: &mut W, menu: &MenuState, best: u32) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "Pigeons!  \\v/";
    out.queue(cursor::MoveTo(centre(cx, title), cy.saturating_sub(6)))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if best > 0 {
        let best_line = format!("Best Score: {}", best);
        out.queue(cursor::MoveTo(centre(cx, &best_line), cy.saturating_sub(4)))?;
        out.queue(style::SetForegroundColor(C_HUD_BEST))?;
        out.queue(Print(&best_line))?;
    }

    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        let label = if i == menu.selected {
            format!("> {} <", choice.label())
        } else {
            choice.label().to_string()
        };
        let color = if i == menu.selected {
            Color::Yellow
        } else {
            Color::White
        };
        let row = cy.saturating_sub(1) + 2 * i as u16;
        out.queue(cursor::MoveTo(centre(cx, &label), row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(&label))?;
    }

    let hint = "↑ ↓ : Choose   ENTER : Select   Q : Quit";
    out.queue(cursor::MoveTo(centre(cx, hint), cy + 6))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

pub fn render_leaderboard<W: Write>(out: &mut W, board: &Leaderboard) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let left = cx.saturating_sub(24);

    let title = "Leaderboard";
    out.queue(cursor::MoveTo(centre(cx, title), 2))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(left, 4))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(format!("{:<6}{:<12}{:>8}   {}", "Rank", "Name", "Score", "Date")))?;

    if board.is_empty() {
        out.queue(cursor::MoveTo(left, 6))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print("No scores yet"))?;
    }

    for (i, entry) in board.entries().iter().enumerate() {
        let row = 6 + 2 * i as u16;
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(format!("{:<6}", format!("{}.", i + 1))))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(format!("{:<12}{:>8}   ", entry.name, entry.score)))?;
        out.queue(style::SetForegroundColor(Color::Grey))?;
        out.queue(Print(&entry.date))?;
    }

    let hint = "Press SPACE to continue";
    out.queue(cursor::MoveTo(centre(cx, hint), height.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

pub fn render_name_entry<W: Write>(
    out: &mut W,
    entry: &NameEntry,
    score: u32,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let lines: &[(String, Color)] = &[
        (format!("Score: {}", score), C_HUD_SCORE),
        ("Enter your name:".to_string(), Color::White),
        (format!("{}|", entry.name), Color::White),
        ("Press ENTER to continue".to_string(), C_HINT),
    ];
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(3) + 2 * i as u16;
        out.queue(cursor::MoveTo(centre(cx, msg), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;
    let h = vp.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar (the ground)
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameSession) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Angle: {}°  Velocity: {}  Score: ",
        state.angle, state.speed
    )))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(state.score))?;
    out.queue(style::SetForegroundColor(C_HUD_BEST))?;
    out.queue(Print(format!(
        "  Stones: {}  High Score: {}",
        state.ammo,
        state.best_score.max(state.score)
    )))?;
    Ok(())
}

/// Active power-ups with their remaining time, top-left of the field.
fn draw_power_ups<W: Write>(out: &mut W, state: &GameSession) -> std::io::Result<()> {
    for (i, effect) in state.effects.iter().enumerate() {
        out.queue(cursor::MoveTo(2, 2 + i as u16))?;
        out.queue(style::SetForegroundColor(power_up_color(effect.kind)))?;
        out.queue(Print(format!(
            "{}: {:.1}s",
            effect.kind.label(),
            powerup::remaining(effect, state.clock)
        )))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_preview<W: Write>(
    out: &mut W,
    vp: &Viewport,
    points: &[PreviewPoint],
) -> std::io::Result<()> {
    for point in points.iter().step_by(PREVIEW_DOT_EVERY) {
        if let Some((col, row)) = vp.cell(point.x, point.y) {
            let color = match point.alpha {
                150..=255 => Color::White,
                90..=149 => Color::Grey,
                _ => Color::DarkGrey,
            };
            out.queue(style::SetForegroundColor(color))?;
            vp.put(out, col, row, "·")?;
        }
    }
    Ok(())
}

fn badge(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::DoublePoints => "[2x]",
        PowerUpKind::BigProjectiles => "[BIG]",
        PowerUpKind::ExtraAmmo => "[+1]",
        PowerUpKind::SlowMotion => "[SLO]",
    }
}

fn draw_bird<W: Write>(out: &mut W, vp: &Viewport, bird: &Bird) -> std::io::Result<()> {
    let fp = footprint(bird);
    let Some((col, row)) = vp.cell(fp.cx, fp.cy) else {
        return Ok(());
    };
    match bird.kind {
        BirdKind::Regular => {
            out.queue(style::SetForegroundColor(C_BIRD))?;
            vp.put(out, col, row, BIRD_FRAMES[bird.frame % BIRD_FRAMES.len()])?;
        }
        BirdKind::PowerUp(kind) => {
            out.queue(style::SetForegroundColor(power_up_color(kind)))?;
            vp.put(out, col, row, badge(kind))?;
        }
    }
    Ok(())
}

fn draw_stone<W: Write>(out: &mut W, vp: &Viewport, stone: &Projectile) -> std::io::Result<()> {
    if let Some((col, row)) = vp.cell(stone.x, stone.y) {
        out.queue(style::SetForegroundColor(C_STONE))?;
        let glyph = if stone.scale > 1.0 { "●" } else { "•" };
        vp.put(out, col, row, glyph)?;
    }
    Ok(())
}

fn draw_explosions<W: Write>(out: &mut W, vp: &Viewport, effects: &Effects) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_EXPLOSION))?;
    for blast in &effects.explosions {
        if let Some((col, row)) = vp.cell(blast.x, blast.y) {
            let glyph = if blast.frames > 6 { "\\*/" } else { "* *" };
            vp.put(out, col, row, glyph)?;
        }
    }
    Ok(())
}

fn draw_thrower<W: Write>(
    out: &mut W,
    vp: &Viewport,
    (x, y): (f64, f64),
    throwing: bool,
) -> std::io::Result<()> {
    // Sprite (3 rows):
    //    o        o/
    //   /|\  or  /|     ← arm up mid-throw
    //   / \      / \
    let Some((col, row)) = vp.cell(x + 50.0, y + 50.0) else {
        return Ok(());
    };
    let body: [&str; 3] = if throwing {
        [" o/", "/| ", "/ \\"]
    } else {
        [" o ", "/|\\", "/ \\"]
    };
    out.queue(style::SetForegroundColor(C_THROWER))?;
    for (i, line) in body.iter().enumerate() {
        vp.put(out, col, (row + i as u16).saturating_sub(1), line)?;
    }
    Ok(())
}

fn draw_banner<W: Write>(out: &mut W, vp: &Viewport, effects: &Effects) -> std::io::Result<()> {
    if let Some(banner) = &effects.banner {
        out.queue(style::SetForegroundColor(banner.color))?;
        vp.put(out, vp.cols / 2, 3, &banner.text)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ : Angle   ← → : Velocity   SPACE : Throw   Q : Quit"))?;
    Ok(())
}

// ── Round-over overlay ────────────────────────────────────────────────────────

pub fn draw_round_over<W: Write>(out: &mut W, state: &GameSession) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        ("SPACE - Continue   R - Play Again   Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        out.queue(cursor::MoveTo(centre(cx, msg), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

/// Left column that centres `text` on `cx`.
fn centre(cx: u16, text: &str) -> u16 {
    cx.saturating_sub(text.chars().count() as u16 / 2)
}
