use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use ratatui_image::picker::Picker;
use tracing::info;

use femview::input::load_scene;
use femview::logging::init_logging;
use femview::overlay::MeshOverlay;
use femview::persistence::config::load_config;
use femview::plot::contour::render_contour;
use femview::plot::Figure;
use femview::tui::app::App;
use femview::tui::event::{poll_event, AppEvent};

fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(anyhow::Error::msg)?;
    let log_path = init_logging(config.log_file.as_deref()).map_err(anyhow::Error::msg)?;
    info!(log = ?log_path, "femview starting");

    // Everything that can fail on bad input happens before the terminal
    // is taken over, so diagnostics print normally.
    let scene = load_scene(&config).context("loading solver output")?;
    let mut figure = Figure::new(config.plot_width, config.plot_height);
    render_contour(&scene, &mut figure).context("rendering field contour")?;

    // Query terminal for image protocol support BEFORE entering alternate screen
    let picker = Picker::from_query_stdio().ok();

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(MeshOverlay::new(&scene, figure), picker);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result?;
    if let Some(err) = app.failure.take() {
        return Err(anyhow::Error::new(err).context("mesh overlay"));
    }

    info!("window closed");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if let Some(event) = poll_event(Duration::from_millis(50)) {
            match event {
                AppEvent::Key(key) => {
                    app.handle_key(key);
                }
                AppEvent::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                AppEvent::Resize(_, _) => {
                    // Terminal will auto-redraw
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
