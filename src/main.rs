mod app;
mod event;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use event::{Event, EventHandler};
use quizguess::{Config, GameController, JsonFile, ScoreStore, WordBank};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("reading configuration")?;
    init_tracing(&config.log_path);

    // Load stores before touching the terminal so errors print normally
    let scores = ScoreStore::load(Box::new(JsonFile::new(&config.scores_path)))
        .context("loading score record")?;
    let words = WordBank::open(Box::new(JsonFile::new(&config.categories_path)))
        .context("loading category record")?;
    info!(
        scores = %config.scores_path.display(),
        categories = %config.categories_path.display(),
        players = scores.len(),
        "starting quiz guess"
    );
    let mut app = App::new(GameController::new(scores, words, &config));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("terminal loop failed")
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let events = EventHandler::new();
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            Event::Key(key) => app.on_key(key),
            Event::Resize => {}
        }

        if app.should_quit {
            info!("quitting");
            return Ok(());
        }
    }
}

/// Log to a file; the terminal belongs to the UI. Logging is skipped when
/// the file cannot be opened.
fn init_tracing(path: &Path) {
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
