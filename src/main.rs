#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEventKind};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

use gridfall::Time;
use gridfall::app::{App, AppResult};
use gridfall::components::Command;
use gridfall::{config, systems, ui};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it, so panics and log output
    // don't tear up the alternate screen
    let log_path = "gridfall.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .expect("Failed to create log file");

    let stderr_handle = std::io::stderr();
    let stderr_fd = stderr_handle.as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Gridfall");

    if let Err(e) = config::load_config_from_file() {
        error!("Failed to load configuration: {e}");
        // Continue with default configuration
    } else {
        info!("Configuration loaded successfully");
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let cfg = config::current();
    let tick_rate = Duration::from_millis(cfg.render_tick_ms);
    let game_tick_rate = Duration::from_millis(cfg.game_tick_ms);

    let app = App::new();
    let res = run_app(&mut terminal, app, tick_rate, game_tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
    game_tick_rate: Duration,
) -> AppResult<()> {
    let mut last_render = Instant::now();
    let mut last_game_tick = Instant::now();

    // Flush any pending input events that might be in the buffer
    while crossterm::event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        if last_render.elapsed() >= tick_rate {
            terminal.draw(|f| ui::render(f, &mut app))?;
            last_render = Instant::now();
        }

        if last_game_tick.elapsed() >= game_tick_rate {
            last_game_tick = Instant::now();

            let delta = {
                let mut time = app.world.resource_mut::<Time>();
                time.update();
                time.delta()
            };

            if app.should_quit {
                return Ok(());
            }

            // Commands first so input lands before gravity for this tick
            systems::command_system(&mut app.world);
            systems::game_tick_system(&mut app.world, delta);
            app.sync_game_state();
        }

        // Translate key presses into game commands
        if crossterm::event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                debug!("Key event: {key:?}");

                match key.code {
                    KeyCode::Char('q') => app.should_quit = true,
                    KeyCode::Left | KeyCode::Char('a') => app.queue_command(Command::MoveLeft),
                    KeyCode::Right | KeyCode::Char('d') => app.queue_command(Command::MoveRight),
                    KeyCode::Down | KeyCode::Char('s') => app.queue_command(Command::SoftDrop),
                    KeyCode::Up | KeyCode::Char('w' | ' ') => app.queue_command(Command::Rotate),
                    KeyCode::Enter => app.queue_command(Command::HardDrop),
                    KeyCode::Char('p') => app.queue_command(Command::TogglePause),
                    KeyCode::Char('r') => app.reset(),
                    _ => {}
                }
            }
        }
    }
}
