//! Game state types. Pure data; the rules live in `model`.

use crate::config::GameConfig;
use crate::coord::Coord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Before the first game, and after game over. Ticks do nothing.
    Inactive,
    Active,
}

/// Horizontal heading shared by the whole formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarchDirection {
    Left,
    Right,
}

impl MarchDirection {
    pub fn flipped(self) -> MarchDirection {
        match self {
            MarchDirection::Left => MarchDirection::Right,
            MarchDirection::Right => MarchDirection::Left,
        }
    }

    pub fn unit(self) -> Coord {
        match self {
            MarchDirection::Left => Coord::left(),
            MarchDirection::Right => Coord::right(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    EnemyBullet,
    EnemyContact,
    /// The formation descended to the player's line.
    Invasion,
}

/// The authoritative game state.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Coord,
    /// Player bullets in fire order.
    pub bullets: Vec<Coord>,
    /// Live formation in spawn order.
    pub enemies: Vec<Coord>,
    pub enemy_bullet: Option<Coord>,
    pub score: u32,
    pub status: GameStatus,
    pub march: MarchDirection,
    /// Current formation speed; grows every cleared round.
    pub enemy_speed: f32,
    /// Seconds left before the player may fire again.
    pub shot_cooldown: f32,
    /// 1-based; 0 until the first game starts.
    pub round: u32,
    pub last_game_over: Option<GameOverCause>,
}

impl GameState {
    /// Pre-game state: player parked at the start position, nothing else alive.
    pub fn new(config: &GameConfig) -> GameState {
        GameState {
            player: config.player_start,
            bullets: Vec::new(),
            enemies: Vec::new(),
            enemy_bullet: None,
            score: 0,
            status: GameStatus::Inactive,
            march: MarchDirection::Right,
            enemy_speed: config.enemy_speed,
            shot_cooldown: 0.0,
            round: 0,
            last_game_over: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }
}
