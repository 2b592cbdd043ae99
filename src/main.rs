//! kleurplaat - Terminal Coloring Grid
//!
//! Paint a grid of cells with the mouse, then export the drawing as a
//! `{"row,col": color}` JSON document or import one back.

use std::io::{self, Stdout, Write};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use kleurplaat::application::{App, AppMode};
use kleurplaat::infrastructure::{init_logging, Config};
use kleurplaat::presentation::{render_ui, InputHandler};

/// Entry point for the kleurplaat terminal application.
///
/// Loads `kleurplaat.toml`, sets up logging and the terminal, sizes the grid
/// to the terminal and runs the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the configuration is malformed, the log file cannot
/// be opened or terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_logging(&config.log_file)?;
    info!("starting kleurplaat with {:?}", config);

    let (width, height) = terminal::size()?;

    enable_raw_mode()?;
    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(err) => {
            restore_terminal(&mut io::stdout())?;
            return Err(err.into());
        }
    };

    let mut app = App::new(&config);
    InputHandler::handle_resize(&mut app, width, height);

    let res = run_app(&mut terminal, &mut app);

    restore_terminal(terminal.backend_mut())?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("terminal error: {}", err);
        println!("{err:?}");
    }

    Ok(())
}

/// Switches to the alternate screen with mouse capture. Raw mode must
/// already be enabled.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Undoes raw mode, the alternate screen and mouse capture.
fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, DisableMouseCapture)
}

/// Main application event loop.
///
/// One terminal event is handled at a time: keys, mouse input for painting
/// and resizes. Continues until the user presses 'q' in normal mode.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
            },
            Event::Mouse(mouse) => InputHandler::handle_mouse_event(app, mouse),
            Event::Resize(width, height) => InputHandler::handle_resize(app, width, height),
            _ => {}
        }
    }
}
