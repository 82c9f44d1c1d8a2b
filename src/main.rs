mod display;

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use invaders_mvc::{GameController, GameModel, Simulation};

use display::{Scene, Screen, TerminalView};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// A key counts as "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that never report key releases: OS
/// key-repeat runs at ≥ 15 Hz, so 4 frames (≈133 ms) is refreshed in time.
const HOLD_WINDOW: u64 = 4;

/// Longest step handed to the model. Keeps a stalled terminal from
/// teleporting the formation through a wall.
const MAX_DELTA: f32 = 0.1;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

enum Flow {
    Continue,
    Quit,
}

/// One-shot actions for a fresh key press on the current screen.
fn handle_press<M: Simulation>(
    controller: &mut GameController<M, TerminalView>,
    screen: Screen,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Flow {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
        _ => {}
    }
    match (screen, code) {
        (Screen::MainMenu, KeyCode::Enter | KeyCode::Char(' ')) => controller.start_game(),
        (Screen::GameOver, KeyCode::Char('r') | KeyCode::Char('R')) => controller.start_game(),
        (Screen::GameOver, KeyCode::Char('m') | KeyCode::Char('M')) => controller.show_menu(),
        _ => {}
    }
    Flow::Continue
}

// ── Main loop ─────────────────────────────────────────────────────────────────

/// Input model: rather than acting on each key event individually, the
/// loop records the frame of the last press/repeat for every key and each
/// frame applies all keys still inside `HOLD_WINDOW`. That lets Space and
/// A/D be held together.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<()> {
    let scene = Rc::new(RefCell::new(Scene::default()));
    let mut model = GameModel::new();
    display::attach(&scene, model.events_mut());
    let mut controller = GameController::new(model, TerminalView::new(Rc::clone(&scene)));

    let left_keys = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
    let right_keys = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
    let shoot_keys = [KeyCode::Char(' ')];

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        let delta_time = frame_start
            .duration_since(last_tick)
            .as_secs_f32()
            .min(MAX_DELTA);
        last_tick = frame_start;
        frame += 1;

        // ── Drain pending input (non-blocking) ───────────────────────────────
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
                    key_frame.insert(code, frame);
                    let screen = scene.borrow().screen;
                    if let Flow::Quit = handle_press(&mut controller, screen, code, modifiers) {
                        return Ok(());
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Held-key actions ─────────────────────────────────────────────────
        if scene.borrow().screen == Screen::Playing {
            let mut direction = 0.0;
            if any_held(&key_frame, &left_keys, frame) {
                direction -= 1.0;
            }
            if any_held(&key_frame, &right_keys, frame) {
                direction += 1.0;
            }
            if direction != 0.0 {
                controller.move_player(direction, delta_time);
            }
            // The model enforces the shot cooldown itself.
            if any_held(&key_frame, &shoot_keys, frame) {
                controller.shoot();
            }
        }

        controller.tick(delta_time);

        let (width, height) = terminal::size().context("reading terminal size")?;
        display::render(out, &scene.borrow(), width, height).context("drawing frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events. Kitty-protocol terminals honour this;
    // others fall back to press/repeat only.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the frame loop never stalls.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
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
