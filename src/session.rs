#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::info;

use crate::Time;
use crate::components::{
    Board, GameEvent, GameEvents, GameState, InputState, PieceKind, PieceRng, Position,
};
use crate::config::{ConfigError, GameConfig};
use crate::piece::ActivePiece;
use crate::systems;

/// One game session: a board, its falling and staged pieces, score and
/// events, all owned by a private ECS world. Sessions share nothing, so
/// hosts may run several side by side.
pub struct Game {
    world: World,
}

impl Game {
    /// Validates the configuration and builds a fresh session. No piece is
    /// live until [`Game::spawn_next`] is called.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::build(config, PieceRng::new())
    }

    /// A session whose piece sequence is reproducible from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::build(config, PieceRng::with_seed(seed))
    }

    fn build(config: GameConfig, rng: PieceRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(InputState::default());
        world.insert_resource(GameState::default());
        world.insert_resource(GameEvents::default());
        world.insert_resource(ActivePiece::default());
        world.insert_resource(Board::new(config.board_width, config.board_height));
        world.insert_resource(rng);
        world.insert_resource(config);

        info!("created new game session");
        Ok(Self { world })
    }

    /// Promotes the staged piece (drawing one if the session is fresh) to
    /// the active falling piece. After the first call, landing chains
    /// spawns automatically.
    pub fn spawn_next(&mut self) {
        systems::spawn_piece(&mut self.world);
    }

    /// Advances the simulation by `elapsed_seconds`. A no-op once the
    /// session is lost.
    pub fn update(&mut self, elapsed_seconds: f32) {
        systems::update_board(&mut self.world, elapsed_seconds);
    }

    /// Self-clocked update for hosts without their own frame timer.
    pub fn tick(&mut self) {
        let delta = {
            let mut time = self.world.resource_mut::<Time>();
            time.update();
            time.delta_seconds()
        };
        self.update(delta);
    }

    /// Replaces the polled input snapshot for subsequent updates.
    pub fn set_input(&mut self, input: InputState) {
        *self.world.resource_mut::<InputState>() = input;
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.world.resource::<GameState>().score
    }

    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.world.resource::<GameState>().has_lost
    }

    /// The current score-derived fall speed in blocks per second.
    #[must_use]
    pub fn fall_speed(&self) -> f32 {
        let game_state = self.world.resource::<GameState>();
        game_state.fall_speed(self.world.resource::<GameConfig>())
    }

    #[must_use]
    pub fn next_kind(&self) -> Option<PieceKind> {
        self.world.resource::<GameState>().next_kind
    }

    #[must_use]
    pub fn board_dimensions(&self) -> (usize, usize) {
        let board = self.world.resource::<Board>();
        (board.width(), board.height())
    }

    /// Every grid cell as (position, occupancy, visual tag), for renderers.
    #[must_use]
    pub fn grid_cells(&self) -> Vec<(Position, bool, Option<PieceKind>)> {
        self.world
            .resource::<Board>()
            .cells()
            .map(|cell| (cell.position, cell.blocking, cell.tag))
            .collect()
    }

    /// The falling piece's occupied cells as (position, visual tag);
    /// empty when no piece is live.
    #[must_use]
    pub fn falling_cells(&self) -> Vec<(Position, PieceKind)> {
        match &self.world.resource::<ActivePiece>().0 {
            Some(piece) => piece
                .blocking_cells()
                .map(|cell| (cell.position, piece.kind()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Drains pending fire-and-forget notifications (row clears, locks,
    /// loss) for sound/animation layers.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.resource_mut::<GameEvents>().drain()
    }

    /// Starts the session over on an empty board, preserving the
    /// configuration and the piece randomness stream.
    pub fn reset(&mut self) {
        let config = self.world.resource::<GameConfig>().clone();

        self.world.insert_resource(GameState::default());
        self.world.insert_resource(GameEvents::default());
        self.world.insert_resource(ActivePiece::default());
        self.world.insert_resource(InputState::default());
        self.world
            .insert_resource(Board::new(config.board_width, config.board_height));

        info!("reset game session");
    }
}
