#![warn(clippy::all, clippy::pedantic)]

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Pieces spawn anchored at the top-left corner of the grid
pub const SPAWN_COLUMN: i32 = 0;
pub const SPAWN_ROW: i32 = 0;

// Vertical movement (blocks per second)
pub const BASE_FALL_SPEED: f32 = 1.0;
pub const TURBO_MULTIPLIER: f32 = 10.0; // soft-drop speed factor
pub const MAX_FALL_SPEED: f32 = 20.0; // cap on the boosted fall rate

// Horizontal auto-repeat (blocks per second)
pub const HORIZONTAL_SPEED: f32 = 10.0;
pub const HORIZONTAL_FIRST_REPEAT_FACTOR: f32 = 1.5; // extra delay before the second step

// Rotation auto-repeat (seconds)
pub const ROTATE_FIRST_REPEAT_DELAY: f32 = 0.5;
pub const ROTATE_REPEAT_DELAY: f32 = 0.1;

// Row-clear scoring
pub const POINTS_PER_ROW: u64 = 1000;
pub const MULTI_ROW_BONUS: f32 = 0.1; // bonus fraction per extra row in a multi-row clear

// Difficulty curve: flat base speed until the threshold, then stepped by score
pub const SPEED_SCORE_THRESHOLD: u64 = 5_000;
pub const SPEED_SCORE_DIVISOR: u64 = 10_000;
