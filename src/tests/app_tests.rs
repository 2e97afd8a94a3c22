#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::components::{Board, Command, GameState, TetrominoType};
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
    use crate::systems::command_system;

    #[test]
    fn test_new_app_spawns_a_piece() {
        let mut app = App::new();

        let piece_count = app
            .world
            .query::<&crate::components::Tetromino>()
            .iter(&app.world)
            .count();
        assert_eq!(piece_count, 1);

        let game_state = app.world.resource::<GameState>();
        assert_eq!(game_state.score, 0);
        assert_eq!(game_state.level, 1);
        assert!(game_state.next_tetromino.is_some());
    }

    #[test]
    fn test_render_blocks_cover_board_and_piece() {
        let mut app = App::new();
        {
            let mut board = app.world.resource_mut::<Board>();
            board.set(0, 19, TetrominoType::I);
            board.set(1, 19, TetrominoType::J);
        }

        let blocks = app.get_render_blocks();

        // Two settled cells plus the four cells of the active piece
        assert_eq!(blocks.len(), 6);
    }

    #[test]
    fn test_queued_commands_reach_the_world() {
        let mut app = App::new();

        app.queue_command(Command::TogglePause);
        command_system(&mut app.world);

        assert!(app.world.resource::<GameState>().paused);
    }

    #[test]
    fn test_sync_game_state_mirrors_hud_fields() {
        let mut app = App::new();
        {
            let mut game_state = app.world.resource_mut::<GameState>();
            game_state.score = 700;
            game_state.level = 2;
            game_state.lines_cleared = 9;
        }

        app.sync_game_state();

        assert_eq!(app.score, 700);
        assert_eq!(app.level, 2);
        assert_eq!(app.lines_cleared, 9);
    }

    #[test]
    fn test_reset_restores_a_fresh_game() {
        let mut app = App::new();
        {
            let mut game_state = app.world.resource_mut::<GameState>();
            game_state.score = 9001;
            game_state.level = 12;
        }
        {
            let mut board = app.world.resource_mut::<Board>();
            board.set(5, 19, TetrominoType::T);
        }

        app.reset();

        let game_state = app.world.resource::<GameState>();
        assert_eq!(game_state.score, 0);
        assert_eq!(game_state.level, 1);
        assert!(!game_state.paused);

        let board = app.world.resource::<Board>();
        assert_eq!(board.width, BOARD_WIDTH);
        assert_eq!(board.height, BOARD_HEIGHT);
        assert!(board.rows.iter().flatten().all(Option::is_none));

        let piece_count = app
            .world
            .query::<&crate::components::Tetromino>()
            .iter(&app.world)
            .count();
        assert_eq!(piece_count, 1);
    }
}
