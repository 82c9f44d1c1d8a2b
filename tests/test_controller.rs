use std::cell::RefCell;
use std::rc::Rc;

use invaders_mvc::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

type Calls = Rc<RefCell<Vec<String>>>;

/// Records every call instead of simulating anything.
struct MockModel {
    calls: Calls,
    events: ModelEvents,
}

impl Simulation for MockModel {
    fn start_new_game(&mut self) {
        self.calls.borrow_mut().push("model.start_new_game".into());
    }

    fn move_player(&mut self, direction: f32, delta_time: f32) {
        self.calls
            .borrow_mut()
            .push(format!("model.move_player({direction}, {delta_time})"));
    }

    fn try_shot(&mut self) {
        self.calls.borrow_mut().push("model.try_shot".into());
    }

    fn on_update(&mut self, delta_time: f32) {
        self.calls
            .borrow_mut()
            .push(format!("model.on_update({delta_time})"));
    }

    fn events_mut(&mut self) -> &mut ModelEvents {
        &mut self.events
    }
}

struct MockView {
    calls: Calls,
}

impl GameView for MockView {
    fn show_main_menu(&mut self) {
        self.calls.borrow_mut().push("view.show_main_menu".into());
    }

    fn start_game(&mut self) {
        self.calls.borrow_mut().push("view.start_game".into());
    }
}

fn mocked() -> (GameController<MockModel, MockView>, Calls) {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let model = MockModel {
        calls: Rc::clone(&calls),
        events: ModelEvents::new(),
    };
    let view = MockView {
        calls: Rc::clone(&calls),
    };
    (GameController::new(model, view), calls)
}

#[test]
fn construction_shows_main_menu() {
    let (_controller, calls) = mocked();
    assert_eq!(*calls.borrow(), vec!["view.show_main_menu"]);
}

#[test]
fn start_game_starts_model_then_view() {
    let (mut controller, calls) = mocked();
    calls.borrow_mut().clear();
    controller.start_game();
    assert_eq!(*calls.borrow(), vec!["model.start_new_game", "view.start_game"]);
}

#[test]
fn move_forwards_direction_and_delta() {
    let (mut controller, calls) = mocked();
    calls.borrow_mut().clear();
    controller.move_player(1.0, 0.016);
    controller.move_player(-1.0, 0.5);
    assert_eq!(
        *calls.borrow(),
        vec!["model.move_player(1, 0.016)", "model.move_player(-1, 0.5)"]
    );
}

#[test]
fn shoot_forwards_to_try_shot() {
    let (mut controller, calls) = mocked();
    calls.borrow_mut().clear();
    controller.shoot();
    assert_eq!(*calls.borrow(), vec!["model.try_shot"]);
}

#[test]
fn show_menu_only_touches_view() {
    let (mut controller, calls) = mocked();
    calls.borrow_mut().clear();
    controller.show_menu();
    assert_eq!(*calls.borrow(), vec!["view.show_main_menu"]);
}

#[test]
fn tick_forwards_elapsed_time() {
    let (mut controller, calls) = mocked();
    calls.borrow_mut().clear();
    controller.tick(0.25);
    assert_eq!(*calls.borrow(), vec!["model.on_update(0.25)"]);
}

// ── with the real model ───────────────────────────────────────────────────────

#[test]
fn drives_real_model_through_a_session() {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let model = GameModel::with_rng(GameConfig::default(), StdRng::seed_from_u64(3)).unwrap();
    let mut controller = GameController::new(
        model,
        MockView {
            calls: Rc::clone(&calls),
        },
    );

    let game_overs = Rc::new(RefCell::new(0));
    {
        let game_overs = Rc::clone(&game_overs);
        controller
            .model_mut()
            .events_mut()
            .game_over
            .subscribe(move |_: &()| *game_overs.borrow_mut() += 1);
    }

    controller.start_game();
    assert_eq!(controller.model().state().status, GameStatus::Active);

    controller.move_player(1.0, 0.5);
    assert_eq!(controller.model().state().player.x, 4.0);

    controller.shoot();
    assert_eq!(controller.model().state().bullets.len(), 1);

    controller.tick(0.0625);
    assert_eq!(controller.model().state().bullets[0].y, -11.875);

    // Park the formation on the player: the game ends exactly once.
    {
        let state = controller.model_mut().state_mut();
        state.bullets.clear();
        state.enemies = vec![Coord::new(4.0, -12.0, 0.0)];
    }
    controller.tick(0.0);
    controller.tick(0.0);
    assert_eq!(*game_overs.borrow(), 1);
    assert_eq!(controller.model().state().status, GameStatus::Inactive);

    assert_eq!(
        *calls.borrow(),
        vec!["view.show_main_menu", "view.start_game"]
    );
}
