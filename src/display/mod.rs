//! Rendering layer: all terminal output lives here.
//!
//! Each function receives a writer and an immutable snapshot of the game
//! state. No game logic is performed; this module only translates state into
//! terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::consts::{CEILING, HEIGHT, WIDTH};
use crate::entities::{Category, Creature, Player, Shot, Snapshot};
use crate::error::{GameError, Result};
use crate::highscores::ScoreEntry;
use crate::ports::OutputSink;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_SLOW_ENEMY: Color = Color::Green;
const C_FAST_ENEMY: Color = Color::Red;
const C_EXTRA_LIFE: Color = Color::Magenta;
const C_WEAPON_BOOST: Color = Color::Yellow;
const C_SHOT: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Layout ────────────────────────────────────────────────────────────────────

/// Columns the play field needs.
pub const REQUIRED_COLS: u16 = WIDTH as u16;
/// Header row, play rows 1..=HEIGHT, hint row.
pub const REQUIRED_ROWS: u16 = HEIGHT as u16 + 2;

const BORDER_ROW: u16 = CEILING as u16 - 1;
const HINT_ROW: u16 = HEIGHT as u16 + 1;
const CENTER_COL: u16 = REQUIRED_COLS / 2;
const CENTER_ROW: u16 = REQUIRED_ROWS / 2;

fn cell(x: f64, y: f64) -> (u16, u16) {
    let col = x.round().clamp(0.0, WIDTH - 1.0) as u16;
    let row = y.round().clamp(0.0, HEIGHT) as u16;
    (col, row)
}

fn centered_col(text: &str) -> u16 {
    CENTER_COL.saturating_sub(text.chars().count() as u16 / 2)
}

// ── Terminal lifecycle ────────────────────────────────────────────────────────

/// Fail fast when the terminal cannot hold the play field.
pub fn check_terminal_size() -> Result<()> {
    let (cols, rows) = terminal::size()?;
    if cols < REQUIRED_COLS || rows < REQUIRED_ROWS {
        return Err(GameError::TerminalTooSmall {
            cols,
            rows,
            need_cols: REQUIRED_COLS,
            need_rows: REQUIRED_ROWS,
        });
    }
    Ok(())
}

/// Raw mode, alternate screen, hidden cursor.
pub fn enter<W: Write>(out: &mut W) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    Ok(())
}

/// Undo `enter`. Best effort; every step is attempted.
pub fn leave<W: Write>(out: &mut W) {
    let _ = out.execute(style::ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

// ── Output sink ───────────────────────────────────────────────────────────────

/// crossterm-backed frame sink.
pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn finish(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, HINT_ROW))?;
        self.out.flush()
    }

    fn centered_lines(&mut self, start_row: u16, lines: &[(String, Color)]) -> std::io::Result<()> {
        for (i, (msg, color)) in lines.iter().enumerate() {
            self.out
                .queue(cursor::MoveTo(centered_col(msg), start_row + i as u16))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(msg))?;
        }
        Ok(())
    }
}

impl<W: Write> OutputSink for TerminalDisplay<W> {
    /// Render one complete frame.
    fn render(&mut self, snapshot: &Snapshot<'_>) -> std::io::Result<()> {
        let out = &mut self.out;
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        draw_hud(out, snapshot)?;
        draw_border(out)?;

        for creature in snapshot.creatures {
            draw_creature(out, creature)?;
        }
        for shot in snapshot.shots {
            draw_shot(out, shot)?;
        }
        draw_player(out, snapshot.player)?;
        draw_controls_hint(out)?;

        self.finish()
    }

    fn render_level_up_banner(&mut self, level: u32) -> std::io::Result<()> {
        let lines = [
            ("╔══════════════════╗".to_string(), Color::Green),
            (format!("║   LEVEL {:>3} UP   ║", level), Color::Green),
            ("╚══════════════════╝".to_string(), Color::Green),
        ];
        self.centered_lines(CENTER_ROW.saturating_sub(4), &lines)?;
        self.finish()
    }

    fn render_game_over(&mut self, snapshot: &Snapshot<'_>) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        let lines = [
            ("╔══════════════════╗".to_string(), Color::Red),
            ("║    GAME  OVER    ║".to_string(), Color::Red),
            ("╚══════════════════╝".to_string(), Color::Red),
            (format!("Final Score: {}", snapshot.score()), Color::Yellow),
            (format!("Level reached: {}", snapshot.level()), Color::Green),
        ];
        self.centered_lines(2, &lines)?;
        self.finish()
    }

    fn render_high_scores(&mut self, scores: &[ScoreEntry], latest: Option<usize>) -> std::io::Result<()> {
        let mut lines = vec![("── HIGH SCORES ──".to_string(), Color::Cyan)];
        if scores.is_empty() {
            lines.push(("no scores yet".to_string(), C_HINT));
        }
        for (i, entry) in scores.iter().enumerate() {
            let rank = i + 1;
            let color = if latest == Some(rank) {
                Color::Yellow
            } else {
                Color::White
            };
            lines.push((
                format!("{:>2}. {:<12} {:>8}  L{:<3}", rank, entry.name, entry.score, entry.level),
                color,
            ));
        }
        lines.push((String::new(), C_HINT));
        lines.push(("R - Play Again  any other key - Quit".to_string(), C_HINT));

        self.centered_lines(9, &lines)?;
        self.finish()
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snapshot: &Snapshot<'_>) -> std::io::Result<()> {
    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("SCORE: {:>8}", snapshot.score())))?;

    // Level and frame rate, centre
    let level_str = format!("[ LEVEL {} ]  FPS: {}", snapshot.level(), snapshot.fps);
    out.queue(cursor::MoveTo(centered_col(&level_str), 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Lives, right
    let life = snapshot.player.life.max(0) as usize;
    let lives_text = format!("LIFE: {}", "♥".repeat(life));
    let rx = REQUIRED_COLS.saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Border (row above the ceiling) ────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, BORDER_ROW))?;
    out.queue(Print("─".repeat(REQUIRED_COLS as usize)))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, player: &Player) -> std::io::Result<()> {
    // Three columns wide, matching the player hit-box:  /A\
    let (col, row) = cell(player.pos.x, player.pos.y);
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1), row))?;
    out.queue(Print("/A\\"))?;
    Ok(())
}

fn draw_creature<W: Write>(out: &mut W, creature: &Creature) -> std::io::Result<()> {
    let (glyph, color) = match creature.category() {
        Category::SlowEnemy => ("V", C_SLOW_ENEMY),
        Category::FastEnemy => ("W", C_FAST_ENEMY),
        Category::ExtraLife => ("♥", C_EXTRA_LIFE),
        _ => ("★", C_WEAPON_BOOST),
    };
    let (col, row) = cell(creature.pos.x, creature.pos.y);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_shot<W: Write>(out: &mut W, shot: &Shot) -> std::io::Result<()> {
    let (col, row) = cell(shot.pos.x, shot.pos.y);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_SHOT))?;
    out.queue(Print("|"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, HINT_ROW))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}
