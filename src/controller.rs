//! Input glue between a frontend and the simulation.

use crate::model::Simulation;

/// Screen-level requests the controller makes of a frontend. Everything
/// else (positions, score, game over) reaches the view via model events.
pub trait GameView {
    fn show_main_menu(&mut self);
    fn start_game(&mut self);
}

/// Forwards input to the model. Holds no game state of its own.
pub struct GameController<M: Simulation, V: GameView> {
    model: M,
    view: V,
}

impl<M: Simulation, V: GameView> GameController<M, V> {
    /// Takes ownership of both sides and puts the view on the main menu.
    pub fn new(model: M, mut view: V) -> Self {
        view.show_main_menu();
        Self { model, view }
    }

    pub fn move_player(&mut self, direction: f32, delta_time: f32) {
        self.model.move_player(direction, delta_time);
    }

    pub fn shoot(&mut self) {
        self.model.try_shot();
    }

    pub fn start_game(&mut self) {
        self.model.start_new_game();
        self.view.start_game();
    }

    pub fn show_menu(&mut self) {
        self.view.show_main_menu();
    }

    pub fn tick(&mut self, delta_time: f32) {
        self.model.on_update(delta_time);
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
