//! The simulation rules.
//!
//! `GameModel` owns the only authoritative copy of the game state and
//! advances it one tick at a time. Every change is announced through
//! `ModelEvents` before the call that caused it returns.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::coord::Coord;
use crate::entities::{GameOverCause, GameState, GameStatus, MarchDirection};
use crate::events::ModelEvents;

/// What a driver (controller, test double, ...) can ask of a simulation.
pub trait Simulation {
    fn start_new_game(&mut self);
    /// `direction` is conventionally -1, 0 or +1 but any value scales the step.
    fn move_player(&mut self, direction: f32, delta_time: f32);
    fn try_shot(&mut self);
    fn on_update(&mut self, delta_time: f32);
    fn events_mut(&mut self) -> &mut ModelEvents;
}

/// Negative and NaN deltas advance nothing.
fn sanitize_delta(delta_time: f32) -> f32 {
    if delta_time.is_finite() {
        delta_time.max(0.0)
    } else {
        0.0
    }
}

pub struct GameModel<R: Rng = StdRng> {
    config: GameConfig,
    state: GameState,
    events: ModelEvents,
    rng: R,
}

impl GameModel<StdRng> {
    /// Default tuning with an entropy-seeded RNG.
    pub fn new() -> Self {
        let config = GameConfig::default();
        Self {
            state: GameState::new(&config),
            config,
            events: ModelEvents::new(),
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for GameModel<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameModel<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            state: GameState::new(&config),
            config,
            events: ModelEvents::new(),
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for harnesses that need to stage a position.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn events(&self) -> &ModelEvents {
        &self.events
    }

    // ── Operations ───────────────────────────────────────────────────────────

    pub fn start_new_game(&mut self) {
        self.state = GameState::new(&self.config);
        self.state.status = GameStatus::Active;
        info!("starting new game");

        self.events.score_changed.emit(&self.state.score);
        self.events.position_changed.emit(&self.state.player);
        self.spawn_formation();
    }

    pub fn move_player(&mut self, direction: f32, delta_time: f32) {
        let delta_x = direction * self.config.player_speed * sanitize_delta(delta_time);
        if delta_x.is_finite() {
            self.state.player.x = Coord::clamp(
                self.state.player.x + delta_x,
                self.config.max_left,
                self.config.max_right,
            );
        }
        self.events.position_changed.emit(&self.state.player);
    }

    pub fn try_shot(&mut self) {
        if !self.state.is_active() {
            return;
        }
        if self.state.shot_cooldown > 0.0 {
            trace!("shot rejected, {:.3}s cooldown left", self.state.shot_cooldown);
            return;
        }
        let bullet = self.state.player + Coord::up(1.0);
        self.state.bullets.push(bullet);
        self.state.shot_cooldown = self.config.bullet_cooldown;
        trace!("shot fired at ({:.2}, {:.2})", bullet.x, bullet.y);
        self.events.bullet_fired.emit(&bullet);
    }

    pub fn on_update(&mut self, delta_time: f32) {
        if !self.state.is_active() {
            return;
        }
        let dt = sanitize_delta(delta_time);
        self.state.shot_cooldown = (self.state.shot_cooldown - dt).max(0.0);

        self.advance_bullets(dt);
        self.advance_formation(dt);
        self.resolve_bullet_hit();
        self.advance_enemy_bullet(dt);
        self.enemy_fire();
        self.check_enemy_bullet_hit();
        self.check_enemy_contact();
        self.check_invasion();
    }

    // ── Tick stages ──────────────────────────────────────────────────────────

    fn advance_bullets(&mut self, dt: f32) {
        let step = Coord::up(self.config.bullet_speed * dt);
        for bullet in self.state.bullets.iter_mut() {
            *bullet += step;
        }

        // Back to front, so each reported index is still valid for the
        // listener's own list at the moment it is told.
        for i in (0..self.state.bullets.len()).rev() {
            if self.state.bullets[i].y > self.config.bullet_max_y {
                self.state.bullets.remove(i);
                self.events.bullet_destroyed.emit(&i);
            }
        }
        self.events.bullet_moved.emit(&self.state.bullets);
    }

    fn advance_formation(&mut self, dt: f32) {
        let step = self.state.enemy_speed * dt;
        let signed = match self.state.march {
            MarchDirection::Right => step,
            MarchDirection::Left => -step,
        };

        let at_wall = self.state.enemies.iter().any(|e| {
            let next_x = e.x + signed;
            next_x >= self.config.max_right || next_x <= self.config.max_left
        });

        if at_wall {
            let drop = Coord::down_by(self.config.formation_drop);
            for enemy in self.state.enemies.iter_mut() {
                *enemy += drop;
            }
            self.state.march = self.state.march.flipped();
            debug!("formation dropped, now marching {:?}", self.state.march);
        } else {
            let offset = self.state.march.unit() * step;
            for enemy in self.state.enemies.iter_mut() {
                *enemy += offset;
            }
        }
        self.events.enemy_moved.emit(&self.state.enemies);
    }

    /// At most one bullet/enemy pair is resolved per tick: the first bullet
    /// in fire order against the first enemy in formation order.
    fn resolve_bullet_hit(&mut self) {
        let hit_box = self.config.bullet_hit;
        let hit = self.state.bullets.iter().enumerate().find_map(|(bi, b)| {
            self.state
                .enemies
                .iter()
                .position(|e| hit_box.touches(*b, *e))
                .map(|ei| (bi, ei))
        });

        if let Some((bullet_index, enemy_index)) = hit {
            self.state.bullets.remove(bullet_index);
            self.events.bullet_destroyed.emit(&bullet_index);
            self.enemy_hit(enemy_index);
        }
    }

    fn enemy_hit(&mut self, index: usize) {
        self.state.score += self.config.score_per_kill;
        self.state.enemies.remove(index);
        debug!("enemy {} destroyed, score {}", index, self.state.score);
        self.events.score_changed.emit(&self.state.score);
        self.events.enemy_killed.emit(&index);

        if self.state.enemies.is_empty() {
            self.state.enemy_speed += self.config.enemy_speed_increment;
            self.state.bullets.clear();
            self.events.clear_player_bullets.emit(&());
            self.state.round += 1;
            info!(
                "round {} begins, formation speed {:.1}",
                self.state.round, self.state.enemy_speed
            );
            self.spawn_formation_positions();
        }
    }

    fn advance_enemy_bullet(&mut self, dt: f32) {
        let Some(mut bullet) = self.state.enemy_bullet else {
            return;
        };
        bullet += Coord::down_by(self.config.bullet_speed * dt);
        if bullet.y < self.config.enemy_bullet_min_y {
            self.state.enemy_bullet = None;
            self.events.enemy_bullet_destroyed.emit(&());
        } else {
            self.state.enemy_bullet = Some(bullet);
            self.events.enemy_bullet_moved.emit(&bullet);
        }
    }

    fn enemy_fire(&mut self) {
        if self.state.enemy_bullet.is_some() || self.state.enemies.is_empty() {
            return;
        }
        let shooter = self.rng.gen_range(0..self.state.enemies.len());
        let bullet = self.state.enemies[shooter] + Coord::down();
        self.state.enemy_bullet = Some(bullet);
        debug!("enemy {} fired", shooter);
        self.events.enemy_bullet_fired.emit(&bullet);
    }

    fn check_enemy_bullet_hit(&mut self) {
        let Some(bullet) = self.state.enemy_bullet else {
            return;
        };
        if !self.config.enemy_bullet_hit.touches(bullet, self.state.player) {
            return;
        }
        self.state.enemy_bullet = None;
        self.events.enemy_bullet_destroyed.emit(&());
        self.state.bullets.clear();
        self.state.enemies.clear();
        self.game_over(GameOverCause::EnemyBullet);
    }

    fn check_enemy_contact(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let contact = self.config.enemy_contact;
        let player = self.state.player;
        if self.state.enemies.iter().any(|e| contact.touches(*e, player)) {
            self.game_over(GameOverCause::EnemyContact);
        }
    }

    fn check_invasion(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let line = self.state.player.y;
        if self.state.enemies.iter().any(|e| e.y <= line) {
            self.game_over(GameOverCause::Invasion);
        }
    }

    /// Safe to call repeatedly; only the first call while Active notifies.
    fn game_over(&mut self, cause: GameOverCause) {
        if !self.state.is_active() {
            return;
        }
        self.state.status = GameStatus::Inactive;
        self.state.last_game_over = Some(cause);
        info!("game over ({:?}), final score {}", cause, self.state.score);
        self.events.game_over.emit(&());
    }

    // ── Formation ────────────────────────────────────────────────────────────

    fn spawn_formation(&mut self) {
        self.state.round = 1;
        self.spawn_formation_positions();
    }

    fn spawn_formation_positions(&mut self) {
        self.state.enemies = self.config.formation.positions();
        self.state.march = MarchDirection::Right;
        self.events.enemy_spawned.emit(&self.state.enemies);
    }
}

impl<R: Rng> Simulation for GameModel<R> {
    fn start_new_game(&mut self) {
        GameModel::start_new_game(self);
    }

    fn move_player(&mut self, direction: f32, delta_time: f32) {
        GameModel::move_player(self, direction, delta_time);
    }

    fn try_shot(&mut self) {
        GameModel::try_shot(self);
    }

    fn on_update(&mut self, delta_time: f32) {
        GameModel::on_update(self, delta_time);
    }

    fn events_mut(&mut self) -> &mut ModelEvents {
        &mut self.events
    }
}
