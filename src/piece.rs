#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since piece matrices are always small enough to fit in i32
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::components::{Cell, CollisionOracle, InputState, PieceKind, PieceMatrix, Position};
use crate::config::GameConfig;
use crate::timed_action::TimedAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDir {
    Left,
    Right,
}

impl HorizontalDir {
    #[must_use]
    pub fn dx(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// The single live falling piece of a session, if any.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActivePiece(pub Option<FallingPiece>);

/// A piece kind materialized on the grid.
///
/// Lifecycle: staged (timers inactive) -> falling (fall timer armed) ->
/// landed (terminal; no further timer processing). A staged piece lets the
/// board queue a "next" whose clock does not run until promotion.
#[derive(Debug, Clone)]
pub struct FallingPiece {
    kind: PieceKind,
    cells: Vec<Vec<Cell>>,
    falling: bool,
    landed: bool,
    fall_timer: Option<TimedAction>,
    horizontal_timer: Option<(HorizontalDir, TimedAction)>,
    rotate_timer: Option<TimedAction>,
}

impl FallingPiece {
    #[must_use]
    pub fn new(kind: PieceKind, anchor: Position) -> Self {
        let template = kind.template();
        let cells = (0..template.height())
            .map(|row| {
                (0..template.width())
                    .map(|col| {
                        let position = Position {
                            x: anchor.x + col as i32,
                            y: anchor.y + row as i32,
                        };
                        if template.is_occupied(row, col) {
                            Cell::occupied(position, kind)
                        } else {
                            Cell::empty(position)
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            kind,
            cells,
            falling: false,
            landed: false,
            fall_timer: None,
            horizontal_timer: None,
            rotate_timer: None,
        }
    }

    /// Promotes a staged piece to falling; the fall timer arms on the next
    /// update and fires immediately.
    pub fn start(&mut self) {
        self.falling = true;
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn is_falling(&self) -> bool {
        self.falling
    }

    #[must_use]
    pub fn has_landed(&self) -> bool {
        self.landed
    }

    /// Top-left corner of the piece matrix on the grid.
    #[must_use]
    pub fn anchor(&self) -> Position {
        self.cells[0][0].position
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    pub fn blocking_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells().filter(|cell| cell.blocking)
    }

    /// Advances the piece by `elapsed` seconds against the board's
    /// collision oracle.
    ///
    /// Fixed order: horizontal handling, rotation handling, then the fall,
    /// horizontal and rotation timers. A timer created this update still
    /// fires this update when its first delay is zero.
    pub fn update(
        &mut self,
        elapsed: f32,
        input: InputState,
        oracle: &impl CollisionOracle,
        fall_speed: f32,
        config: &GameConfig,
    ) {
        if self.landed || !self.falling {
            return;
        }

        if self.fall_timer.is_none() {
            self.fall_timer = Some(TimedAction::repeating());
        }

        self.handle_horizontal(input);
        self.handle_rotation(input);

        let turbo_multiplier = config.turbo_multiplier;
        let max_fall_speed = config.max_fall_speed;
        let fall_fired = match self.fall_timer.as_mut() {
            Some(timer) => timer.update(elapsed, |executions| {
                if executions == 0 {
                    return 0.0;
                }
                let speed = if input.soft_drop {
                    (fall_speed * turbo_multiplier).min(max_fall_speed)
                } else {
                    fall_speed
                };
                1.0 / speed
            }),
            None => false,
        };
        if fall_fired {
            self.apply_fall(oracle);
        }
        if self.landed {
            return;
        }

        let horizontal_speed = config.horizontal_speed;
        let first_repeat = config.horizontal_first_repeat_factor;
        let horizontal_fired = match self.horizontal_timer.as_mut() {
            Some((dir, timer)) => {
                let dir = *dir;
                timer
                    .update(elapsed, |executions| match executions {
                        0 => 0.0,
                        1 => first_repeat / horizontal_speed,
                        _ => 1.0 / horizontal_speed,
                    })
                    .then_some(dir)
            }
            None => None,
        };
        if let Some(dir) = horizontal_fired {
            self.apply_horizontal(dir, oracle);
        }

        let rotate_first = config.rotate_first_repeat_delay;
        let rotate_repeat = config.rotate_repeat_delay;
        let rotate_fired = match self.rotate_timer.as_mut() {
            Some(timer) => timer.update(elapsed, |executions| match executions {
                0 => 0.0,
                1 => rotate_first,
                _ => rotate_repeat,
            }),
            None => false,
        };
        if rotate_fired {
            self.apply_rotation(oracle);
        }
    }

    /// Derives the horizontal intent from the input snapshot. Left is
    /// evaluated first and right overwrites, so holding both moves right.
    fn handle_horizontal(&mut self, input: InputState) {
        let mut intent = None;
        if input.left {
            intent = Some(HorizontalDir::Left);
        }
        if input.right {
            intent = Some(HorizontalDir::Right);
        }

        let Some(dir) = intent else {
            // Not moving at all: cancel any in-flight repeat.
            self.horizontal_timer = None;
            return;
        };

        // Already repeating in this direction: keep the cadence.
        if let Some((active, _)) = &self.horizontal_timer {
            if *active == dir {
                return;
            }
        }

        self.horizontal_timer = Some((dir, TimedAction::repeating()));
    }

    fn handle_rotation(&mut self, input: InputState) {
        if input.rotate {
            if self.rotate_timer.is_none() {
                self.rotate_timer = Some(TimedAction::repeating());
            }
        } else {
            self.rotate_timer = None;
        }
    }

    /// One gravity step: any collision below lands the piece, otherwise
    /// every cell moves down one row.
    fn apply_fall(&mut self, oracle: &impl CollisionOracle) {
        let blocked = self
            .cells()
            .any(|cell| oracle.would_collide(cell, (0, 1)));
        if blocked {
            debug!("{:?} piece landed at {:?}", self.kind, self.anchor());
            self.landed = true;
            return;
        }

        self.translate((0, 1));
    }

    /// One auto-repeat step. A blocked step is a no-op; the timer keeps
    /// running and retries on its next firing.
    fn apply_horizontal(&mut self, dir: HorizontalDir, oracle: &impl CollisionOracle) {
        let displacement = (dir.dx(), 0);
        let blocked = self
            .cells()
            .any(|cell| oracle.would_collide(cell, displacement));
        if blocked {
            trace!("horizontal step {dir:?} blocked");
            return;
        }

        self.translate(displacement);
    }

    /// Builds the clockwise-rotated candidate and commits it only if every
    /// candidate cell probes clear. A discarded candidate shares no state
    /// with the live matrix.
    fn apply_rotation(&mut self, oracle: &impl CollisionOracle) {
        let candidate = self.rotated_candidate();
        let blocked = candidate
            .iter()
            .flatten()
            .any(|cell| oracle.would_collide(cell, (0, 0)));
        if blocked {
            trace!("rotation blocked for {:?} piece", self.kind);
            return;
        }

        self.cells = candidate;
    }

    /// The rotated matrix placed so the old top-right corner stays fixed,
    /// shifted uniformly right if that would push any column negative.
    /// A single deterministic shift, not a kick search.
    fn rotated_candidate(&self) -> Vec<Vec<Cell>> {
        let rotated = self.occupancy().rotated_clockwise();
        let anchor = self.anchor();
        let old_width = self.cells[0].len() as i32;
        let new_width = rotated.width() as i32;

        let top_right_x = anchor.x + old_width - 1;
        let x_push = (new_width - 1 - top_right_x).max(0);

        (0..rotated.height())
            .map(|row| {
                (0..rotated.width())
                    .map(|col| {
                        let position = Position {
                            x: top_right_x - (new_width - 1 - col as i32) + x_push,
                            y: anchor.y + row as i32,
                        };
                        if rotated.is_occupied(row, col) {
                            Cell::occupied(position, self.kind)
                        } else {
                            Cell::empty(position)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn occupancy(&self) -> PieceMatrix {
        PieceMatrix::from_rows(
            self.cells
                .iter()
                .map(|row| row.iter().map(|cell| cell.blocking).collect())
                .collect(),
        )
    }

    fn translate(&mut self, displacement: (i32, i32)) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell = Cell {
                    position: cell.position.translated(displacement),
                    ..*cell
                };
            }
        }
    }
}
