use std::io;
use std::io::Write;
use std::time::Instant;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use torus_life::camera::Camera;
use torus_life::clock::StepClock;
use torus_life::config::Config;
use torus_life::engine::Engine;
use torus_life::events;
use torus_life::events::Event;

const STATUS_KEYS: &str = "space: pause  r: reseed  q: quit";

/// Raw mode and the alternate screen, undone on drop however we leave `main`.
struct RawTerminal;

impl RawTerminal {
    fn enter(stdout: &mut io::Stdout) -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;

        // From here on, dropping the guard restores the terminal
        let guard = RawTerminal;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter the alternate screen")?;

        Ok(guard)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen) {
            warn!("Failed to leave the alternate screen: {e}");
        }

        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to disable raw mode: {e}");
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they can be redirected away from the view
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let (cols, rows) = terminal::size().context("Failed to read terminal size")?;

    let config = Config::for_terminal(cols, rows);
    config.validate().context("Terminal too small for the simulation")?;

    let mut engine = Engine::from_config(&config).context("Failed to create engine")?;
    info!(
        cols = engine.width(),
        rows = engine.height(),
        density = engine.density(),
        "starting"
    );

    let mut stdout = io::stdout();
    let _raw = RawTerminal::enter(&mut stdout)?;

    run(&mut stdout, &config, &mut engine, (cols, rows))
}

fn run(
    stdout: &mut io::Stdout,
    config: &Config,
    engine: &mut Engine,
    (cols, rows): (u16, u16),
) -> anyhow::Result<()> {
    let mut clock = StepClock::new(config.frame_time(), Instant::now());
    let mut cam = Camera::new(cols, rows.saturating_sub(1));

    // Nothing moves until the first unpause
    let mut paused = true;

    loop {
        // Input may cut the wait short, the clock decides when a step is due
        let event = if event::poll(clock.timeout(Instant::now()))? {
            events::handle_event(event::read()?)
        } else {
            None
        };

        match event {
            None => {}
            Some(Event::Exit) => break,
            Some(Event::TogglePause) => {
                paused = !paused;
                info!(paused, generation = engine.generation(), "toggled pause");
            }
            Some(Event::Reseed) => {
                engine.request_reseed();
                info!("reseed requested");
            }
            Some(Event::Resize { cols, rows }) => {
                cam.resize(cols, rows.saturating_sub(1));
            }
        }

        let due = clock.tick(Instant::now());
        if !due && event.is_none() {
            continue;
        }

        cam.reset();
        cam.draw_grid(engine.current_grid());
        let frame = cam.render();

        queue!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;

        for line in frame.lines() {
            queue!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        let state = if paused { "  [paused]" } else { "" };
        queue!(
            stdout,
            style::Print(format!(
                "gen {}  pop {}{state}  {STATUS_KEYS}",
                engine.generation(),
                engine.current_grid().population(),
            ))
        )?;
        stdout.flush()?;

        if due && !paused {
            engine.step();
        }
    }

    Ok(())
}
