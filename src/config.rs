//! Tuning table for the simulation. Everything the rules need to know about
//! speeds, bounds and the starting formation lives here.

use anyhow::{ensure, Result};

use crate::coord::Coord;

/// Axis-aligned proximity test: two points "touch" when both the horizontal
/// and vertical distances are strictly below the half-extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitBox {
    pub half_width: f32,
    pub half_height: f32,
}

impl HitBox {
    pub const fn new(half_width: f32, half_height: f32) -> HitBox {
        HitBox {
            half_width,
            half_height,
        }
    }

    pub fn touches(&self, a: Coord, b: Coord) -> bool {
        (a.x - b.x).abs() < self.half_width && (a.y - b.y).abs() < self.half_height
    }
}

/// Grid the enemy formation is laid out on at the start of every round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormationLayout {
    pub rows: usize,
    pub columns: usize,
    /// Position of the top-left enemy.
    pub origin: Coord,
    pub spacing_x: f32,
    pub spacing_y: f32,
}

impl FormationLayout {
    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    /// Row-major positions, top row first, left to right.
    pub fn positions(&self) -> Vec<Coord> {
        let mut out = Vec::with_capacity(self.size());
        for row in 0..self.rows {
            for col in 0..self.columns {
                out.push(Coord::new(
                    self.origin.x + col as f32 * self.spacing_x,
                    self.origin.y - row as f32 * self.spacing_y,
                    0.0,
                ));
            }
        }
        out
    }
}

impl Default for FormationLayout {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 5,
            origin: Coord::new(-8.0, 14.0, 0.0),
            spacing_x: 4.0,
            spacing_y: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Horizontal player speed, units per second at full deflection.
    pub player_speed: f32,
    /// Shared by player bullets (upward) and the enemy bullet (downward).
    pub bullet_speed: f32,
    /// Formation speed at the start of a game.
    pub enemy_speed: f32,
    /// Added to the formation speed every time a round is cleared.
    pub enemy_speed_increment: f32,
    pub max_left: f32,
    pub max_right: f32,
    /// Player bullets above this are discarded.
    pub bullet_max_y: f32,
    /// The enemy bullet below this is discarded.
    pub enemy_bullet_min_y: f32,
    /// Minimum seconds between two player shots.
    pub bullet_cooldown: f32,
    pub player_start: Coord,
    pub formation: FormationLayout,
    /// How far the formation descends when it reaches a side wall.
    pub formation_drop: f32,
    pub score_per_kill: u32,
    pub bullet_hit: HitBox,
    pub enemy_bullet_hit: HitBox,
    pub enemy_contact: HitBox,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: 8.0,
            bullet_speed: 10.0,
            enemy_speed: 5.0,
            enemy_speed_increment: 2.0,
            max_left: -14.0,
            max_right: 14.0,
            bullet_max_y: 18.0,
            enemy_bullet_min_y: -14.0,
            bullet_cooldown: 0.5,
            player_start: Coord::new(0.0, -13.5, 0.0),
            formation: FormationLayout::default(),
            formation_drop: 1.0,
            score_per_kill: 10,
            bullet_hit: HitBox::new(1.0, 0.5),
            enemy_bullet_hit: HitBox::new(1.2, 0.5),
            enemy_contact: HitBox::new(1.0, 2.0),
        }
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    ensure!(
        value.is_finite() && value >= 0.0,
        "{name} must be a finite, non-negative number (got {value})"
    );
    Ok(())
}

fn positive_box(name: &str, hit: &HitBox) -> Result<()> {
    ensure!(
        hit.half_width > 0.0 && hit.half_height > 0.0,
        "{name} hit box must have positive extents (got {}x{})",
        hit.half_width,
        hit.half_height
    );
    Ok(())
}

impl GameConfig {
    /// Reject tables the rules cannot run on.
    pub fn validate(&self) -> Result<()> {
        non_negative("player_speed", self.player_speed)?;
        non_negative("bullet_speed", self.bullet_speed)?;
        non_negative("enemy_speed", self.enemy_speed)?;
        non_negative("enemy_speed_increment", self.enemy_speed_increment)?;
        non_negative("bullet_cooldown", self.bullet_cooldown)?;
        non_negative("formation_drop", self.formation_drop)?;

        ensure!(
            self.max_left < self.max_right,
            "max_left ({}) must be less than max_right ({})",
            self.max_left,
            self.max_right
        );
        ensure!(
            (self.max_left..=self.max_right).contains(&self.player_start.x),
            "player_start.x ({}) lies outside [{}, {}]",
            self.player_start.x,
            self.max_left,
            self.max_right
        );
        ensure!(
            self.enemy_bullet_min_y < self.bullet_max_y,
            "enemy_bullet_min_y ({}) must be below bullet_max_y ({})",
            self.enemy_bullet_min_y,
            self.bullet_max_y
        );
        ensure!(
            self.formation.size() > 0,
            "formation needs at least one row and one column"
        );

        positive_box("bullet", &self.bullet_hit)?;
        positive_box("enemy bullet", &self.enemy_bullet_hit)?;
        positive_box("enemy contact", &self.enemy_contact)?;
        Ok(())
    }
}
