pub mod components;
pub mod config;
pub mod game;
pub mod piece;
pub mod session;
pub mod systems;
pub mod timed_action;

#[cfg(test)]
mod tests;

pub use components::{
    Board, Cell, CollisionOracle, GameEvent, GameState, InputState, PieceKind, PieceMatrix,
    PieceRng, Position,
};
pub use config::{ConfigError, GameConfig};
pub use piece::{ActivePiece, FallingPiece};
pub use session::Game;
pub use timed_action::TimedAction;

use bevy_ecs::prelude::Resource;
use std::time::{Duration, Instant};

/// Frame-delta clock for hosts driving a session with [`Game::tick`].
#[derive(Resource, Debug, Clone)]
pub struct Time {
    delta: Duration,
    last_update: Instant,
}

impl Time {
    #[must_use]
    pub fn new() -> Self {
        Self {
            delta: Duration::default(),
            last_update: Instant::now(),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_update);
        self.last_update = now;
    }

    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
