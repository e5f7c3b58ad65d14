#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow precision loss when casting between numeric types since exact precision isn't critical in this game
    clippy::cast_precision_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use log::debug;

use crate::config::GameConfig;
use crate::piece::FallingPiece;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn translated(self, displacement: (i32, i32)) -> Self {
        Self {
            x: self.x + displacement.0,
            y: self.y + displacement.1,
        }
    }
}

/// One grid square. Cells are replaced, never mutated in place, whenever
/// their occupancy changes; the tag is an opaque visual marker the core
/// only compares for identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
    pub blocking: bool,
    pub tag: Option<PieceKind>,
}

impl Cell {
    #[must_use]
    pub fn empty(position: Position) -> Self {
        Self {
            position,
            blocking: false,
            tag: None,
        }
    }

    #[must_use]
    pub fn occupied(position: Position, kind: PieceKind) -> Self {
        Self {
            position,
            blocking: true,
            tag: Some(kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    T,
    L,
    J,
    I,
    O,
}

impl PieceKind {
    pub const ALL: [Self; 5] = [Self::T, Self::L, Self::J, Self::I, Self::O];

    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(0..Self::ALL.len())]
    }

    /// The occupancy template for this shape, anchored top-left.
    #[must_use]
    pub fn template(self) -> PieceMatrix {
        match self {
            Self::T => PieceMatrix::from_rows(vec![
                vec![false, true, false],
                vec![true, true, true],
            ]),
            Self::L => PieceMatrix::from_rows(vec![
                vec![true, false],
                vec![true, false],
                vec![true, true],
            ]),
            Self::J => PieceMatrix::from_rows(vec![
                vec![false, true],
                vec![false, true],
                vec![true, true],
            ]),
            Self::I => {
                PieceMatrix::from_rows(vec![vec![true], vec![true], vec![true], vec![true]])
            }
            Self::O => PieceMatrix::from_rows(vec![vec![true, true], vec![true, true]]),
        }
    }
}

/// A rectangular boolean occupancy matrix. Templates are immutable;
/// rotation builds a new matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceMatrix {
    rows: Vec<Vec<bool>>,
}

impl PieceMatrix {
    /// Panics if `rows` is empty or ragged; catalog templates are validated
    /// against the board at session construction.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Self {
        assert!(!rows.is_empty() && !rows[0].is_empty());
        assert!(rows.iter().all(|row| row.len() == rows[0].len()));
        Self { rows }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.rows[row][col]
    }

    /// 90 degrees clockwise: transpose, then reverse each resulting row.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let old_rows = self.height();
        let old_cols = self.width();

        let rows = (0..old_cols)
            .map(|r| {
                (0..old_rows)
                    .map(|c| self.rows[old_rows - 1 - c][r])
                    .collect()
            })
            .collect();

        Self { rows }
    }
}

/// Snapshot of the host's directional/action signals, polled each tick.
///
/// Tie policy: left is evaluated first and right overwrites, so holding
/// both moves the piece right.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub soft_drop: bool,
    pub rotate: bool,
}

/// Session-owned piece randomness; seedable for deterministic games.
#[derive(Resource, Debug, Clone)]
pub struct PieceRng(pub fastrand::Rng);

impl PieceRng {
    #[must_use]
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for PieceRng {
    fn default() -> Self {
        Self::new()
    }
}

/// Discrete notifications for sound/animation layers; fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RowsCleared(usize),
    PieceLocked,
    GameLost,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct GameEvents {
    queue: Vec<GameEvent>,
}

impl GameEvents {
    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.queue)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct GameState {
    pub score: u64,
    pub has_lost: bool,
    pub next_kind: Option<PieceKind>,
}

impl GameState {
    /// Current fall speed in blocks per second, derived from score.
    ///
    /// Flat base speed below the threshold, then stepped up by score; the
    /// curve never decreases.
    #[must_use]
    pub fn fall_speed(&self, config: &GameConfig) -> f32 {
        if self.score < config.speed_score_threshold {
            config.base_fall_speed
        } else {
            config.base_fall_speed + 2.0 + (self.score / config.speed_score_divisor) as f32
        }
    }

    /// Points awarded for clearing `rows` complete rows in one pass.
    #[must_use]
    pub fn row_clear_score(rows: usize, config: &GameConfig) -> u64 {
        let base = config.points_per_row * rows as u64;
        if rows > 1 {
            (base as f32 * (1.0 + config.multi_row_bonus * (rows - 1) as f32)).round() as u64
        } else {
            base
        }
    }

    pub fn add_score(&mut self, delta: u64) {
        self.score += delta;
    }
}

/// Collision capability the board hands to the falling piece.
pub trait CollisionOracle {
    /// Would `cell`, moved by `displacement`, collide with settled material
    /// or leave the grid? Non-blocking cells never collide.
    fn would_collide(&self, cell: &Cell, displacement: (i32, i32)) -> bool;
}

/// The playfield: a fixed grid of cells, row-major with row 0 at the top.
#[derive(Resource, Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let rows = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        Cell::empty(Position {
                            x: x as i32,
                            y: y as i32,
                        })
                    })
                    .collect()
            })
            .collect();

        Self {
            width,
            height,
            rows,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.rows[y][x]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    #[must_use]
    pub fn is_blocking(&self, x: usize, y: usize) -> bool {
        self.rows[y][x].blocking
    }

    /// Writes a settled cell; used by absorption and by tests staging grids.
    pub fn set_occupied(&mut self, x: usize, y: usize, kind: PieceKind) {
        let position = Position {
            x: x as i32,
            y: y as i32,
        };
        self.rows[y][x] = Cell::occupied(position, kind);
    }

    /// Copies a landed piece's blocking cells into the grid. Non-blocking
    /// cells of the piece matrix write nothing, so they cannot erase
    /// settled material.
    pub fn absorb(&mut self, piece: &FallingPiece) {
        for cell in piece.blocking_cells() {
            let x = cell.position.x as usize;
            let y = cell.position.y as usize;
            self.rows[y][x] = Cell::occupied(cell.position, piece.kind());
        }
        debug!("absorbed {:?} piece into the grid", piece.kind());
    }

    #[must_use]
    pub fn top_row_blocked(&self) -> bool {
        self.rows[0].iter().any(|cell| cell.blocking)
    }

    /// Indices of rows whose every cell is blocking, top to bottom.
    #[must_use]
    pub fn complete_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(|cell| cell.blocking))
            .map(|(y, _)| y)
            .collect()
    }

    /// Removes the given rows and compacts the grid: surviving rows are
    /// copied bottom-up into a fresh grid, so everything above a removed
    /// row shifts down and the vacated top rows come back non-blocking.
    /// Every surviving cell's position is corrected to its new spot.
    pub fn compact(&mut self, removed: &[usize]) {
        let mut fresh = Self::new(self.width, self.height);

        let mut dest = self.height;
        for y in (0..self.height).rev() {
            if removed.contains(&y) {
                continue;
            }
            dest -= 1;
            for x in 0..self.width {
                let old = &self.rows[y][x];
                let position = Position {
                    x: x as i32,
                    y: dest as i32,
                };
                fresh.rows[dest][x] = if old.blocking {
                    Cell {
                        position,
                        ..*old
                    }
                } else {
                    Cell::empty(position)
                };
            }
        }

        debug!("compacted grid, removed {} rows", removed.len());
        self.rows = fresh.rows;
    }
}

impl CollisionOracle for Board {
    fn would_collide(&self, cell: &Cell, displacement: (i32, i32)) -> bool {
        // Inert placeholder cells inside a piece matrix never collide.
        if !cell.blocking {
            return false;
        }

        let target = cell.position.translated(displacement);

        if target.x < 0
            || target.x >= self.width as i32
            || target.y < 0
            || target.y >= self.height as i32
        {
            return true;
        }

        self.rows[target.y as usize][target.x as usize].blocking
    }
}
