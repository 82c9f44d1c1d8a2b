//! Terminal presentation layer.
//!
//! `Scene` is rebuilt purely from model notifications; nothing here reads
//! the model directly. The `draw_*` functions translate a scene into
//! crossterm commands and perform no game logic.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use invaders_mvc::{Coord, GameView, ModelEvents};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_ROUND: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// Visible slice of world space. Slightly wider than the movement bounds so
// sprites at the walls stay on screen.
const WORLD_LEFT: f32 = -16.0;
const WORLD_RIGHT: f32 = 16.0;
const WORLD_BOTTOM: f32 = -15.0;
const WORLD_TOP: f32 = 19.0;

// ── Scene mirror ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Playing,
    GameOver,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub screen: Screen,
    pub player: Coord,
    pub bullets: Vec<Coord>,
    pub enemies: Vec<Coord>,
    pub enemy_bullet: Option<Coord>,
    pub score: u32,
    /// Best score this session.
    pub best: u32,
    pub round: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            screen: Screen::MainMenu,
            player: Coord::ZERO,
            bullets: Vec::new(),
            enemies: Vec::new(),
            enemy_bullet: None,
            score: 0,
            best: 0,
            round: 0,
        }
    }
}

/// Wire every model channel into `scene`.
pub fn attach(scene: &Rc<RefCell<Scene>>, events: &mut ModelEvents) {
    let s = Rc::clone(scene);
    events
        .position_changed
        .subscribe(move |p: &Coord| s.borrow_mut().player = *p);

    let s = Rc::clone(scene);
    events
        .bullet_fired
        .subscribe(move |p: &Coord| s.borrow_mut().bullets.push(*p));

    let s = Rc::clone(scene);
    events
        .bullet_moved
        .subscribe(move |all: &[Coord]| s.borrow_mut().bullets = all.to_vec());

    let s = Rc::clone(scene);
    events.bullet_destroyed.subscribe(move |i: &usize| {
        let mut scene = s.borrow_mut();
        if *i < scene.bullets.len() {
            scene.bullets.remove(*i);
        }
    });

    let s = Rc::clone(scene);
    events
        .enemy_spawned
        .subscribe(move |all: &[Coord]| s.borrow_mut().enemies = all.to_vec());

    let s = Rc::clone(scene);
    events
        .enemy_moved
        .subscribe(move |all: &[Coord]| s.borrow_mut().enemies = all.to_vec());

    let s = Rc::clone(scene);
    events.enemy_killed.subscribe(move |i: &usize| {
        let mut scene = s.borrow_mut();
        if *i < scene.enemies.len() {
            scene.enemies.remove(*i);
        }
    });

    let s = Rc::clone(scene);
    events.score_changed.subscribe(move |score: &u32| {
        let mut scene = s.borrow_mut();
        scene.score = *score;
        scene.best = scene.best.max(*score);
    });

    let s = Rc::clone(scene);
    events
        .game_over
        .subscribe(move |_: &()| s.borrow_mut().screen = Screen::GameOver);

    let s = Rc::clone(scene);
    events
        .enemy_bullet_fired
        .subscribe(move |p: &Coord| s.borrow_mut().enemy_bullet = Some(*p));

    let s = Rc::clone(scene);
    events
        .enemy_bullet_moved
        .subscribe(move |p: &Coord| s.borrow_mut().enemy_bullet = Some(*p));

    let s = Rc::clone(scene);
    events
        .enemy_bullet_destroyed
        .subscribe(move |_: &()| s.borrow_mut().enemy_bullet = None);

    let s = Rc::clone(scene);
    events.clear_player_bullets.subscribe(move |_: &()| {
        let mut scene = s.borrow_mut();
        scene.bullets.clear();
        scene.round += 1;
    });
}

/// The screen-switching half of the view; the rest arrives through `attach`.
pub struct TerminalView {
    scene: Rc<RefCell<Scene>>,
}

impl TerminalView {
    pub fn new(scene: Rc<RefCell<Scene>>) -> Self {
        Self { scene }
    }
}

impl GameView for TerminalView {
    fn show_main_menu(&mut self) {
        self.scene.borrow_mut().screen = Screen::MainMenu;
    }

    fn start_game(&mut self) {
        let mut scene = self.scene.borrow_mut();
        scene.screen = Screen::Playing;
        scene.round = 1;
    }
}

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Map a world position to a cell inside the border, or `None` if it lies
/// outside the visible slice or the terminal is too small to draw into.
fn to_cell(p: Coord, width: u16, height: u16) -> Option<(u16, u16)> {
    let cols = width.saturating_sub(2);
    let rows = height.saturating_sub(4);
    if cols == 0 || rows == 0 {
        return None;
    }
    let fx = (p.x - WORLD_LEFT) / (WORLD_RIGHT - WORLD_LEFT);
    let fy = (WORLD_TOP - p.y) / (WORLD_TOP - WORLD_BOTTOM);
    if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
        return None;
    }
    let col = 1 + (fx * (cols - 1) as f32).round() as u16;
    let row = 2 + (fy * (rows - 1) as f32).round() as u16;
    Some((col, row))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, scene: &Scene, width: u16, height: u16) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if scene.screen == Screen::MainMenu {
        draw_main_menu(out, scene, width, height)?;
    } else {
        draw_border(out, width, height)?;
        draw_hud(out, scene, width)?;

        for enemy in &scene.enemies {
            draw_enemy(out, *enemy, width, height)?;
        }
        for bullet in &scene.bullets {
            draw_sprite(out, *bullet, "║", C_BULLET_PLAYER, width, height)?;
        }
        if let Some(bullet) = scene.enemy_bullet {
            draw_sprite(out, bullet, "↓", C_BULLET_ENEMY, width, height)?;
        }
        if scene.screen == Screen::Playing {
            draw_sprite(out, scene.player, "▲", C_PLAYER, width, height)?;
        }
        draw_controls_hint(out, height)?;

        if scene.screen == Screen::GameOver {
            draw_game_over(out, scene, width, height)?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Main menu ─────────────────────────────────────────────────────────────────

fn draw_main_menu<W: Write>(
    out: &mut W,
    scene: &Scene,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let cx = width / 2;
    let cy = height / 2;

    let mut lines: Vec<(String, Color)> = vec![
        ("★  SPACE  INVADERS  ★".to_string(), Color::Cyan),
        (String::new(), Color::Reset),
        ("ENTER / SPACE : Start".to_string(), Color::White),
        ("Q : Quit".to_string(), Color::DarkGrey),
    ];
    if scene.best > 0 {
        lines.insert(1, (format!("Best Score: {}", scene.best), Color::Yellow));
    }

    let start_row = cy.saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }
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

fn draw_hud<W: Write>(out: &mut W, scene: &Scene, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if scene.best > 0 {
        out.queue(Print(format!("Score:{:>6}  Hi:{:>6}", scene.score, scene.best)))?;
    } else {
        out.queue(Print(format!("Score:{:>6}", scene.score)))?;
    }

    let round = format!("Round {}", scene.round);
    let rx = width.saturating_sub(round.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_ROUND))?;
    out.queue(Print(round))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    at: Coord,
    glyph: &str,
    color: Color,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    if let Some((col, row)) = to_cell(at, width, height) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: Coord, width: u16, height: u16) -> std::io::Result<()> {
    //   «▼»   centred on the enemy's cell
    if let Some((col, row)) = to_cell(enemy, width, height) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
        out.queue(style::SetForegroundColor(C_ENEMY))?;
        out.queue(Print("«▼»"))?;
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
    scene: &Scene,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let new_best = scene.score >= scene.best && scene.score > 0;
    let score_line = format!("Final Score: {:>6}", scene.score);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", scene.best)
    } else {
        format!("Best Score:  {:>6}", scene.best)
    };

    let lines: Vec<(String, Color)> = vec![
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (score_line, Color::Yellow),
        (best_line, if new_best { Color::Yellow } else { Color::DarkGrey }),
        ("R - Play Again  M - Menu  Q - Quit".to_string(), Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    Ok(())
}
