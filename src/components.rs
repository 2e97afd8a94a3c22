#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use std::collections::VecDeque;
use std::time::Duration;

use crate::game::{
    LINE_POINTS, MAX_LEVEL, SCORE_PER_LEVEL, STARTING_LEVEL, drop_interval_for_level,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrominoType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TetrominoType {
    #[must_use]
    pub fn random() -> Self {
        match fastrand::u8(0..7) {
            0 => TetrominoType::I,
            1 => TetrominoType::J,
            2 => TetrominoType::L,
            3 => TetrominoType::O,
            4 => TetrominoType::S,
            5 => TetrominoType::T,
            _ => TetrominoType::Z,
        }
    }

    /// Canonical shape matrix for this piece type.
    ///
    /// Every matrix is stored in a square bounding box so that in-place
    /// rotation keeps its dimensions. Returns a fresh copy on every call;
    /// rotation mutates the copy and must never touch a shared template.
    #[must_use]
    pub fn shape(self) -> Shape {
        let rows: &[&[u8]] = match self {
            TetrominoType::I => &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
            TetrominoType::J => &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]],
            TetrominoType::L => &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]],
            TetrominoType::O => &[&[1, 1], &[1, 1]],
            TetrominoType::S => &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]],
            TetrominoType::T => &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
            TetrominoType::Z => &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]],
        };
        Shape {
            cells: rows
                .iter()
                .map(|row| row.iter().map(|&cell| cell != 0).collect())
                .collect(),
        }
    }

    #[must_use]
    pub fn get_color(self) -> ratatui::style::Color {
        match self {
            TetrominoType::I => ratatui::style::Color::Cyan,
            TetrominoType::J => ratatui::style::Color::Blue,
            TetrominoType::L => ratatui::style::Color::LightYellow,
            TetrominoType::O => ratatui::style::Color::Yellow,
            TetrominoType::S => ratatui::style::Color::Green,
            TetrominoType::T => ratatui::style::Color::Magenta,
            TetrominoType::Z => ratatui::style::Color::Red,
        }
    }
}

/// A piece's shape matrix: a small square grid of filled/empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    cells: Vec<Vec<bool>>,
}

impl Shape {
    /// Side length of the square bounding box.
    #[must_use]
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Local offsets of all filled cells, relative to the matrix top-left.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(x, _)| (x as i32, y as i32))
        })
    }

    /// Rotate the matrix 90 degrees in place: transpose the upper triangle,
    /// then reverse each row (clockwise, `direction > 0`) or the row order
    /// (counter-clockwise). Applying the same direction four times restores
    /// the original matrix.
    pub fn rotate(&mut self, direction: i32) {
        let n = self.cells.len();
        for y in 0..n {
            for x in 0..y {
                let tmp = self.cells[y][x];
                self.cells[y][x] = self.cells[x][y];
                self.cells[x][y] = tmp;
            }
        }
        if direction > 0 {
            for row in &mut self.cells {
                row.reverse();
            }
        } else {
            self.cells.reverse();
        }
    }
}

/// Grid coordinates of a piece's top-left matrix corner.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// The active falling piece: type tag plus its own shape matrix copy.
#[derive(Component, Debug, Clone)]
pub struct Tetromino {
    pub kind: TetrominoType,
    pub shape: Shape,
}

impl Tetromino {
    #[must_use]
    pub fn new(kind: TetrominoType) -> Self {
        Self {
            kind,
            shape: kind.shape(),
        }
    }
}

/// The settled-block matrix, row-major with `rows[y][x]`.
#[derive(Resource, Debug, Clone)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<Option<TetrominoType>>>,
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![None; width]; height],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(None);
        }
    }

    /// True if the cell is in bounds and holds a settled block.
    /// Out-of-bounds cells count as occupied; they act as the walls and floor.
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return true;
        }
        self.rows[y as usize][x as usize].is_some()
    }

    /// Assign a type tag to an in-bounds cell; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, kind: TetrominoType) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.rows[y as usize][x as usize] = Some(kind);
        }
    }

    /// Collision test for a shape at a position.
    ///
    /// A filled cell collides when it is outside the side walls, at or below
    /// the floor, or over a settled block. Cells above the top edge are open
    /// air: pieces may sit partially off-screen at spawn.
    #[must_use]
    pub fn collides(&self, position: Position, shape: &Shape) -> bool {
        for (dx, dy) in shape.filled_cells() {
            let x = position.x + dx;
            let y = position.y + dy;
            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return true;
            }
            if y < 0 {
                continue;
            }
            if self.rows[y as usize][x as usize].is_some() {
                return true;
            }
        }
        false
    }

    /// Write the piece's type tag into every cell its shape covers.
    /// The caller must have verified the position is collision-free.
    pub fn merge(&mut self, position: Position, tetromino: &Tetromino) {
        for (dx, dy) in tetromino.shape.filled_cells() {
            self.set(position.x + dx, position.y + dy, tetromino.kind);
        }
    }

    /// Clear all full rows and return how many were cleared.
    ///
    /// Scans bottom to top. A full row is removed and an empty row inserted
    /// at the top, then the same index is examined again since the rows above
    /// have shifted down into it. Handles multiple, even non-adjacent, full
    /// rows in a single pass.
    pub fn sweep_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height as i32 - 1;
        while y >= 0 {
            if self.rows[y as usize].iter().all(Option::is_some) {
                let mut row = self.rows.remove(y as usize);
                row.fill(None);
                self.rows.insert(0, row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }
}

/// Discrete input commands, queued by the input layer and drained by the
/// controller each tick. Decouples key capture from game-state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct CommandQueue {
    commands: VecDeque<Command>,
}

impl CommandQueue {
    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Score, level and speed progression, plus the transient game flags.
#[derive(Debug, Resource, Clone)]
pub struct GameState {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub game_over: bool,
    pub paused: bool,
    pub next_tetromino: Option<TetrominoType>,
    pub drop_interval: Duration,
    pub drop_timer: Duration,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            level: STARTING_LEVEL,
            lines_cleared: 0,
            game_over: false,
            paused: false,
            next_tetromino: None,
            drop_interval: drop_interval_for_level(STARTING_LEVEL),
            drop_timer: Duration::ZERO,
        }
    }
}

impl GameState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drop score, level and speed back to their starting values after a
    /// board-full reset. Flags and the next-piece slot are left alone.
    pub fn reset_progression(&mut self) {
        self.score = 0;
        self.level = STARTING_LEVEL;
        self.lines_cleared = 0;
        self.drop_interval = drop_interval_for_level(STARTING_LEVEL);
        self.drop_timer = Duration::ZERO;
    }

    /// Apply the scoring curve for a sweep result.
    ///
    /// Awards `LINE_POINTS[rows] * level`, recomputes the level from the
    /// score (one level per 500 points, capped at 20) and the drop interval
    /// from the level. A successful clear also lifts the game-over flag:
    /// clearing a line is proof the board is playable again.
    pub fn apply_row_clears(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        self.score += LINE_POINTS[rows.min(4)] * self.level;
        self.level = (STARTING_LEVEL + self.score / SCORE_PER_LEVEL).min(MAX_LEVEL);
        self.drop_interval = drop_interval_for_level(self.level);
        self.lines_cleared += u32::try_from(rows).unwrap_or(u32::MAX);
        self.game_over = false;
    }
}
