#![warn(clippy::all, clippy::pedantic)]

pub mod config_tests;
pub mod session_tests;

// Import test utilities
#[cfg(test)]
pub mod test_utils {
    use bevy_ecs::prelude::*;

    use crate::Time;
    use crate::components::{Board, GameEvents, GameState, InputState, PieceKind, PieceRng};
    use crate::config::GameConfig;
    use crate::piece::ActivePiece;

    // Helper function to create a test world mirroring a session's resources
    #[must_use]
    pub fn setup_test_world() -> World {
        let config = GameConfig::default();

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(InputState::default());
        world.insert_resource(GameState::default());
        world.insert_resource(GameEvents::default());
        world.insert_resource(ActivePiece::default());
        world.insert_resource(Board::new(config.board_width, config.board_height));
        world.insert_resource(PieceRng::with_seed(42));
        world.insert_resource(config);

        world
    }

    // Helper to fill an entire row with settled cells
    pub fn fill_row(board: &mut Board, y: usize) {
        for x in 0..board.width() {
            board.set_occupied(x, y, PieceKind::O);
        }
    }

    // Helper to count blocking cells on the board
    #[must_use]
    pub fn blocking_cell_count(board: &Board) -> usize {
        board.cells().filter(|cell| cell.blocking).count()
    }
}
