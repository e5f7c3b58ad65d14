#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info, trace};

use crate::components::{
    Board, GameEvent, GameEvents, GameState, InputState, PieceKind, PieceRng, Position,
};
use crate::config::GameConfig;
use crate::game::{SPAWN_COLUMN, SPAWN_ROW};
use crate::piece::{ActivePiece, FallingPiece};

fn draw_kind(world: &mut World) -> PieceKind {
    let mut rng = world.resource_mut::<PieceRng>();
    PieceKind::random(&mut rng.0)
}

/// Promotes the staged next kind to the active falling piece and stages a
/// freshly drawn kind behind it. The staged kind's timers never run; only
/// the promoted piece is started.
pub fn spawn_piece(world: &mut World) {
    if world.resource::<GameState>().has_lost {
        return;
    }

    // First spawn of a session stages before promoting.
    if world.resource::<GameState>().next_kind.is_none() {
        let staged = draw_kind(world);
        world.resource_mut::<GameState>().next_kind = Some(staged);
    }

    let staged = draw_kind(world);
    let kind = {
        let mut game_state = world.resource_mut::<GameState>();
        let kind = game_state.next_kind.take();
        game_state.next_kind = Some(staged);
        kind
    };

    let Some(kind) = kind else { return };

    let mut piece = FallingPiece::new(
        kind,
        Position {
            x: SPAWN_COLUMN,
            y: SPAWN_ROW,
        },
    );
    piece.start();

    debug!("spawned {kind:?} piece, staged {staged:?}");
    world.resource_mut::<ActivePiece>().0 = Some(piece);
}

/// One simulation tick: advance the falling piece against the board,
/// absorb it when it lands, detect loss, chain the next spawn, then clear
/// and score complete rows. A lost board ignores updates entirely.
pub fn update_board(world: &mut World, delta_seconds: f32) {
    trace!("board update with delta: {delta_seconds}");

    if world.resource::<GameState>().has_lost {
        return;
    }

    let config = world.resource::<GameConfig>().clone();
    let input = *world.resource::<InputState>();
    let fall_speed = world.resource::<GameState>().fall_speed(&config);

    // Advance the piece with the board acting as the collision oracle.
    world.resource_scope(|world, mut active: Mut<ActivePiece>| {
        if let Some(piece) = active.0.as_mut() {
            let board = world.resource::<Board>();
            piece.update(delta_seconds, input, board, fall_speed, &config);
        }
    });

    // A landed piece is absorbed into the grid on the same tick.
    let landed = world
        .resource::<ActivePiece>()
        .0
        .as_ref()
        .is_some_and(FallingPiece::has_landed);

    if landed {
        if let Some(piece) = world.resource_mut::<ActivePiece>().0.take() {
            world.resource_mut::<Board>().absorb(&piece);
            world.resource_mut::<GameEvents>().push(GameEvent::PieceLocked);
            info!("locked {:?} piece", piece.kind());
        }

        if world.resource::<Board>().top_row_blocked() {
            world.resource_mut::<GameState>().has_lost = true;
            world.resource_mut::<GameEvents>().push(GameEvent::GameLost);
            info!("game lost: settled material reached the top row");
            return;
        }

        spawn_piece(world);
    }

    // Row clearing runs every tick, after any absorption.
    let complete = world.resource::<Board>().complete_rows();
    if complete.is_empty() {
        return;
    }

    world.resource_mut::<Board>().compact(&complete);

    let delta = GameState::row_clear_score(complete.len(), &config);
    world.resource_mut::<GameState>().add_score(delta);
    world
        .resource_mut::<GameEvents>()
        .push(GameEvent::RowsCleared(complete.len()));

    info!("cleared {} rows for {} points", complete.len(), delta);
}
