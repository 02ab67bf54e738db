/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable snapshot of the
/// simulation.  No game logic is performed; this module only maps the
/// 800×600 play field onto the terminal cell grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_defense::compute::GameStatus;
use space_defense::entities::{FIELD_HEIGHT, FIELD_WIDTH};
use space_defense::snapshot::{EntityKind, Snapshot, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Glyph and colour for each entity kind.
fn style_for(kind: EntityKind) -> (&'static str, Color) {
    match kind {
        EntityKind::Player => ("█", Color::White),
        EntityKind::Alien => ("▓", Color::Green),
        EntityKind::PlayerBullet => ("║", Color::Cyan),
        EntityKind::AlienBullet => ("↓", Color::Magenta),
        EntityKind::Obstacle => ("▒", Color::Grey),
    }
}

// ── Field → cell mapping ──────────────────────────────────────────────────────

/// The play area: inside the border, below the HUD row, above the hint row.
#[derive(Clone, Copy)]
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn for_terminal(width: u16, height: u16) -> Self {
        Viewport {
            left: 1,
            top: 2,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
        }
    }

    fn col(&self, x: i32) -> Option<u16> {
        if !(0..FIELD_WIDTH).contains(&x) {
            return None;
        }
        Some(self.left + (x as i64 * self.cols as i64 / FIELD_WIDTH as i64) as u16)
    }

    fn row(&self, y: i32) -> Option<u16> {
        if !(0..FIELD_HEIGHT).contains(&y) {
            return None;
        }
        Some(self.top + (y as i64 * self.rows as i64 / FIELD_HEIGHT as i64) as u16)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snapshot: &Snapshot) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::for_terminal(width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, snapshot, width)?;

    for sprite in &snapshot.sprites {
        draw_sprite(out, sprite, &view)?;
    }

    draw_controls_hint(out, height)?;

    if snapshot.status == GameStatus::GameOver {
        draw_game_over(out, snapshot, width, height)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snapshot: &Snapshot, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", snapshot.score)))?;

    let lives_str = format!("Lives: {}", "♥ ".repeat(snapshot.lives as usize));
    let lx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Fill every cell the sprite covers.  Parts outside the field are clipped.
fn draw_sprite<W: Write>(out: &mut W, sprite: &Sprite, view: &Viewport) -> std::io::Result<()> {
    let (glyph, color) = style_for(sprite.kind);
    let left = sprite.x.max(0);
    let right = (sprite.x + sprite.width - 1).min(FIELD_WIDTH - 1);
    let top = sprite.y.max(0);
    let bottom = (sprite.y + sprite.height - 1).min(FIELD_HEIGHT - 1);

    let (Some(c0), Some(c1), Some(r0), Some(r1)) =
        (view.col(left), view.col(right), view.row(top), view.row(bottom))
    else {
        return Ok(());
    };

    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(glyph.repeat((c1 - c0 + 1) as usize)))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", snapshot.score);
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        ("Press any key to exit", Color::White),
    ];

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
