use catdays::app::App;
use catdays::config::Settings;
use catdays::error::GameError;
use catdays::input::Input;
use catdays::render::{Frame, Renderer};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), GameError> {
    let settings = Settings::from_env();
    init_logging(&settings)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;
    stdout.execute(EnableMouseCapture)?;

    let result = run(&mut stdout, &settings);

    stdout.execute(DisableMouseCapture)?;
    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

/// Logs go to a file, never the screen; without `CATDAYS_LOG` nothing is recorded.
fn init_logging(settings: &Settings) -> Result<(), GameError> {
    let Some(path) = &settings.log_path else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| GameError::Log {
        path: path.display().to_string(),
        source,
    })?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(stdout: &mut Stdout, settings: &Settings) -> Result<(), GameError> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(?settings, "starting");

    let mut app = App::new(settings.goal_rule);
    let mut input = Input::new();
    let mut frame = Frame::new();
    let mut renderer = Renderer::new();
    let tick_every = Duration::from_millis(settings.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps.max(1));
    let dt = settings.dt();
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => input.key(key, Instant::now()),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        if let Some(pos) = renderer.to_world(mouse.column, mouse.row) {
                            input.point(pos);
                        }
                    }
                    MouseEventKind::Down(MouseButton::Left) => input.click(),
                    _ => {}
                },
                _ => {}
            }
        }
        if input.quit_requested() {
            info!("quit");
            return Ok(());
        }

        if last_tick.elapsed() >= tick_every {
            last_tick = Instant::now();
            app.tick(&mut input, last_tick, dt, &mut rng)?;
        }
        app.draw(&mut frame);
        renderer.render(stdout, &frame)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
