#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;

use crate::Time;
use crate::components::{
    Board, Command, CommandQueue, GameState, Position, Tetromino, TetrominoType,
};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::systems::spawn_tetromino;

pub type AppResult<T> = anyhow::Result<T>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(CommandQueue::default());
        world.insert_resource(GameState::default());
        world.insert_resource(Board::new(BOARD_WIDTH, BOARD_HEIGHT));

        let mut app = Self {
            world,
            should_quit: false,
            score: 0,
            level: crate::game::STARTING_LEVEL,
            lines_cleared: 0,
        };

        // Spawn the first falling piece
        spawn_tetromino(&mut app.world);

        app
    }

    /// Queue a discrete input command for the next command pass.
    pub fn queue_command(&mut self, command: Command) {
        self.world.resource_mut::<CommandQueue>().push(command);
    }

    /// All colored cells to draw this frame: settled board cells first,
    /// then the active piece's cells.
    pub fn get_render_blocks(&mut self) -> Vec<(Position, TetrominoType)> {
        let mut blocks = Vec::new();

        if let Some(board) = self.world.get_resource::<Board>() {
            for (y, row) in board.rows.iter().enumerate() {
                for (x, cell) in row.iter().enumerate() {
                    if let Some(kind) = cell {
                        blocks.push((
                            Position {
                                x: x as i32,
                                y: y as i32,
                            },
                            *kind,
                        ));
                    }
                }
            }
        }

        let piece_blocks: Vec<_> = self
            .world
            .query::<(&Tetromino, &Position)>()
            .iter(&self.world)
            .flat_map(|(tetromino, pos)| {
                let kind = tetromino.kind;
                tetromino
                    .shape
                    .filled_cells()
                    .map(|(dx, dy)| {
                        (
                            Position {
                                x: pos.x + dx,
                                y: pos.y + dy,
                            },
                            kind,
                        )
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        blocks.extend(piece_blocks);
        blocks
    }

    /// Mirror the HUD fields out of the game state after a tick.
    pub fn sync_game_state(&mut self) {
        let game_state = self.world.resource::<GameState>();
        self.score = game_state.score;
        self.level = game_state.level;
        self.lines_cleared = game_state.lines_cleared;
    }

    /// Reset the whole game: fresh board, fresh progression, fresh piece.
    pub fn reset(&mut self) {
        self.world.resource_mut::<GameState>().reset();
        self.world.resource_mut::<Board>().clear();
        self.world.resource_mut::<CommandQueue>().clear();

        // Remove any leftover active piece before spawning a new one
        let stale: Vec<Entity> = self
            .world
            .query::<(Entity, &Tetromino)>()
            .iter(&self.world)
            .map(|(entity, _)| entity)
            .collect();
        for entity in stale {
            self.world.despawn(entity);
        }

        self.score = 0;
        self.level = crate::game::STARTING_LEVEL;
        self.lines_cleared = 0;

        spawn_tetromino(&mut self.world);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
