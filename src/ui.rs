#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::app::App;
use crate::components::GameState;
use crate::config;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(f: &mut Frame, app: &mut App) {
    let cell_width = 2; // Each cell is 2 characters wide
    let board_width = BOARD_WIDTH as u16 * cell_width + 2; // +2 for borders
    let board_height = BOARD_HEIGHT as u16 + 2; // +2 for borders
    let min_info_width = 20u16;
    let min_total_width = board_width + min_info_width;
    let min_total_height = board_height + 3; // Space for title and borders

    // Check if the terminal is too small to render the game properly
    if f.area().width < min_total_width || f.area().height < min_total_height {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Gridfall"));

        let warning_area = centered_rect(50, 30, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Min(min_info_width),
        ])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(board_height), // Game board (fixed height)
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(5), // Score / level / lines
            Constraint::Length(7), // Next piece preview
            Constraint::Length(3), // Current status
            Constraint::Min(5),    // Controls
        ])
        .split(main_layout[1]);

    let title = Paragraph::new("GRIDFALL")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, app, game_layout[1]);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let game_state = app.world.resource::<GameState>().clone();

    let stats = format!(
        "Score: {}\nLevel: {}\nLines: {}",
        game_state.score, game_state.level, game_state.lines_cleared,
    );
    let stats_info = Paragraph::new(stats)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(stats_info, info_layout[1]);

    if config::current().show_next_piece {
        render_next_piece(f, &game_state, info_layout[2]);
    }

    let status = if game_state.game_over {
        Paragraph::new("BOARD FULL!\nBoard was reset")
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
    } else if game_state.paused {
        Paragraph::new("PAUSED\nPress P to resume")
            .style(Style::default().fg(Color::Yellow))
            .wrap(Wrap { trim: true })
    } else {
        Paragraph::new("")
    };
    f.render_widget(status, info_layout[3]);

    if config::current().show_controls {
        let controls = Paragraph::new(
            "Controls:\n\
            ←/→: Move left/right\n\
            ↓: Soft drop\n\
            ↑/Space: Rotate\n\
            Enter: Hard drop\n\
            P: Pause\n\
            Q: Quit\n\
            ",
        )
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
        f.render_widget(controls, info_layout[4]);
    }
}

fn render_game_board(f: &mut Frame, app: &mut App, area: Rect) {
    let cell_width = 2; // Each cell is 2 characters wide

    let inner_area = Block::default().borders(Borders::ALL).inner(area);
    f.render_widget(Block::default().borders(Borders::ALL), area);

    let blocks = app.get_render_blocks();

    for (position, kind) in blocks {
        // Cells above the top edge are off-screen while a piece spawns
        if position.x < 0 || position.y < 0 {
            continue;
        }
        let x = position.x as u16;
        let y = position.y as u16;

        if x < BOARD_WIDTH as u16 && y < BOARD_HEIGHT as u16 {
            let block_x = inner_area.left() + x * cell_width;
            let block_y = inner_area.top() + y;

            if block_x < inner_area.right() && block_y < inner_area.bottom() {
                let color = kind.get_color();

                // Each cell is drawn 2 characters wide for square proportions
                if let Some(cell) = f.buffer_mut().cell_mut((block_x, block_y)) {
                    cell.set_symbol("█");
                    cell.set_fg(color);
                    cell.set_bg(Color::Black);
                }
                if let Some(cell) = f.buffer_mut().cell_mut((block_x + 1, block_y)) {
                    cell.set_symbol("█");
                    cell.set_fg(color);
                    cell.set_bg(Color::Black);
                }
            }
        }
    }

    let game_state = app.world.resource::<GameState>();
    if game_state.paused {
        let paused = Paragraph::new("PAUSED")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        let paused_area = Rect {
            x: inner_area.x + (inner_area.width / 2).saturating_sub(3),
            y: inner_area.y + inner_area.height / 2,
            width: 6,
            height: 1,
        };
        f.render_widget(paused, paused_area);
    }
}

/// Preview of the upcoming piece in its canonical orientation.
fn render_next_piece(f: &mut Frame, game_state: &GameState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("NEXT");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(kind) = game_state.next_tetromino else {
        return;
    };
    let shape = kind.shape();
    let color = kind.get_color();

    let shape_width = shape.width() as u16 * 2;
    let offset_x = inner.left() + (inner.width.saturating_sub(shape_width)) / 2;
    let offset_y = inner.top() + (inner.height.saturating_sub(shape.width() as u16)) / 2;

    for (dx, dy) in shape.filled_cells() {
        let cell_x = offset_x + dx as u16 * 2;
        let cell_y = offset_y + dy as u16;

        if cell_x + 1 < inner.right() && cell_y < inner.bottom() {
            for x in [cell_x, cell_x + 1] {
                if let Some(cell) = f.buffer_mut().cell_mut((x, cell_y)) {
                    cell.set_symbol("█");
                    cell.set_fg(color);
                }
            }
        }
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
