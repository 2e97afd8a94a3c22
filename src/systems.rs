#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use log::{debug, info, trace};
use std::time::Duration;

use crate::components::{
    Board, Command, CommandQueue, GameState, Position, Shape, Tetromino, TetrominoType,
};
use crate::game::BOARD_WIDTH;

/// Spawn position for a shape: top row, horizontally centered.
fn spawn_position(shape: &Shape) -> Position {
    Position {
        x: (BOARD_WIDTH / 2) as i32 - shape.width().div_ceil(2) as i32,
        y: 0,
    }
}

/// Spawn the next falling piece at the top of the board.
///
/// The piece type comes from the one-piece lookahead slot, which is refilled
/// with a fresh uniform-random type for the preview. If the spawn position
/// already collides the board is full: the board and progression are reset
/// and the game-over flag raised, but play continues with the new piece on
/// the empty board.
pub fn spawn_tetromino(world: &mut World) {
    let kind = {
        let mut game_state = world.resource_mut::<GameState>();
        let kind = game_state
            .next_tetromino
            .take()
            .unwrap_or_else(TetrominoType::random);
        game_state.next_tetromino = Some(TetrominoType::random());
        kind
    };

    let tetromino = Tetromino::new(kind);
    let position = spawn_position(&tetromino.shape);

    let blocked = world.resource::<Board>().collides(position, &tetromino.shape);
    if blocked {
        info!("Spawn position blocked, resetting the board");
        world.resource_mut::<Board>().clear();
        let mut game_state = world.resource_mut::<GameState>();
        game_state.reset_progression();
        // Informational only; the loop keeps running and the flag is
        // cleared by the next successful line clear.
        game_state.game_over = true;
    }

    world.spawn((tetromino, position));
}

/// The single active piece, if one exists.
fn active_piece(world: &mut World) -> Option<(Entity, Tetromino, Position)> {
    let mut query = world.query::<(Entity, &Tetromino, &Position)>();
    query
        .iter(world)
        .next()
        .map(|(entity, tetromino, position)| (entity, tetromino.clone(), *position))
}

/// Drain the command queue and apply each command to the world.
///
/// While paused, every command except `TogglePause` is discarded; gravity is
/// handled separately by [`game_tick_system`].
pub fn command_system(world: &mut World) {
    loop {
        let command = world.resource_mut::<CommandQueue>().pop();
        let Some(command) = command else { break };

        let paused = world.resource::<GameState>().paused;
        if paused && command != Command::TogglePause {
            continue;
        }

        match command {
            Command::MoveLeft => move_piece(world, -1),
            Command::MoveRight => move_piece(world, 1),
            Command::SoftDrop => drop_piece(world),
            Command::Rotate => rotate_piece(world, 1),
            Command::HardDrop => hard_drop(world),
            Command::TogglePause => {
                let mut game_state = world.resource_mut::<GameState>();
                game_state.paused = !game_state.paused;
                info!(
                    "Game {}",
                    if game_state.paused { "paused" } else { "resumed" }
                );
            }
        }
    }
}

/// Move the piece one column; the move is committed only if collision-free.
fn move_piece(world: &mut World, dx: i32) {
    let Some((entity, tetromino, position)) = active_piece(world) else {
        return;
    };

    let new_position = Position {
        x: position.x + dx,
        y: position.y,
    };
    let blocked = world
        .resource::<Board>()
        .collides(new_position, &tetromino.shape);
    if !blocked {
        world.entity_mut(entity).insert(new_position);
    }
}

/// Rotate the active piece, kicking off the walls if needed.
///
/// After rotating a working copy, horizontal offsets +1, -2, +3, -4, ... are
/// tried until one is collision-free. Once the offset magnitude exceeds the
/// shape width no kick can help; the rotation is abandoned and the piece
/// keeps its original shape and column.
pub fn rotate_piece(world: &mut World, direction: i32) {
    let Some((entity, tetromino, position)) = active_piece(world) else {
        return;
    };

    let mut shape = tetromino.shape.clone();
    shape.rotate(direction);

    let mut x = position.x;
    let mut offset = 1i32;
    loop {
        let kicked = Position { x, y: position.y };
        if !world.resource::<Board>().collides(kicked, &shape) {
            break;
        }
        x += offset;
        offset = -(offset + offset.signum());
        if offset.unsigned_abs() as usize > shape.width() {
            debug!("Rotation aborted, no wall kick fits");
            return;
        }
    }

    world.entity_mut(entity).insert((
        Tetromino {
            kind: tetromino.kind,
            shape,
        },
        Position { x, y: position.y },
    ));
}

/// One gravity step: move the piece down a cell, or lock it where it rests.
/// Also restarts the gravity countdown, so a soft drop delays the next
/// automatic drop.
pub fn drop_piece(world: &mut World) {
    let Some((entity, tetromino, position)) = active_piece(world) else {
        debug!("No active piece, spawning a new one");
        spawn_tetromino(world);
        return;
    };

    let below = Position {
        x: position.x,
        y: position.y + 1,
    };
    let blocked = world.resource::<Board>().collides(below, &tetromino.shape);
    if blocked {
        lock_piece(world, entity, position, &tetromino);
    } else {
        world.entity_mut(entity).insert(below);
    }

    world.resource_mut::<GameState>().drop_timer = Duration::ZERO;
}

/// Drop the piece straight to the floor and lock it in one atomic step.
pub fn hard_drop(world: &mut World) {
    let Some((entity, tetromino, position)) = active_piece(world) else {
        return;
    };

    let mut final_y = position.y;
    {
        let board = world.resource::<Board>();
        loop {
            let below = Position {
                x: position.x,
                y: final_y + 1,
            };
            if board.collides(below, &tetromino.shape) {
                break;
            }
            final_y += 1;
        }
    }

    let final_position = Position {
        x: position.x,
        y: final_y,
    };
    lock_piece(world, entity, final_position, &tetromino);
    world.resource_mut::<GameState>().drop_timer = Duration::ZERO;
}

/// Merge the piece into the board, sweep full rows, score the result and
/// spawn the next piece.
fn lock_piece(world: &mut World, entity: Entity, position: Position, tetromino: &Tetromino) {
    let cleared = {
        let mut board = world.resource_mut::<Board>();
        board.merge(position, tetromino);
        board.sweep_full_rows()
    };

    if cleared > 0 {
        info!("Cleared {cleared} rows");
    }
    world.resource_mut::<GameState>().apply_row_clears(cleared);

    world.despawn(entity);
    spawn_tetromino(world);
}

/// Advance gravity by the elapsed frame time.
///
/// Accumulates the delta into the drop timer and performs one gravity drop
/// each time the timer crosses the level's drop interval. Pausing stops the
/// accumulation entirely; the game-over flag does not, it is informational.
pub fn game_tick_system(world: &mut World, delta: Duration) {
    let should_drop = {
        let mut game_state = world.resource_mut::<GameState>();
        if game_state.paused {
            return;
        }
        game_state.drop_timer += delta;
        trace!(
            "Drop timer: {:?}, drop interval: {:?}",
            game_state.drop_timer, game_state.drop_interval
        );
        let should_drop = game_state.drop_timer >= game_state.drop_interval;
        if should_drop {
            game_state.drop_timer = Duration::ZERO;
        }
        should_drop
    };

    if should_drop {
        drop_piece(world);
    }
}
