mod app;
mod config;
mod domain;
mod engine;
mod error;
mod input;
mod logging;
mod notifications;
mod persistence;
mod resolver;
mod session;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand, ValueEnum};
use config::{Config, LOG_FILE};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{format_remaining, StartMode};
use persistence::{ensure_dir, format_timestamp, get_workday_dir, init_local_workday, save_settings, Settings};
use ratatui::{backend::CrosstermBackend, Terminal};
use session::Session;
use std::io;
use std::path::PathBuf;
use ticker::local_now;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "workday")]
#[command(about = "Counts down to the end of your workday from your first start of the day", long_about = None)]
struct Cli {
    /// Data directory. Defaults to a local .workday or ~/.workday
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the live countdown (default)
    Run,
    /// Print today's resolved start, deadlines and time remaining
    Status,
    /// Show or change how the day's start time is determined
    Mode {
        #[arg(value_enum)]
        action: Option<ModeAction>,
    },
    /// List recorded start times
    History {
        /// Only show the most recent N records
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Initialize a local .workday directory in the current directory
    Init,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeAction {
    /// Start counts from the first launch of the day
    Flexible,
    /// Start is pinned to the configured time (09:00 by default)
    Fixed,
    /// Switch to the other mode
    Toggle,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let workday_dir = init_local_workday()?;
        save_settings(workday_dir.join(config::SETTINGS_FILE), &Settings::default())?;
        println!("Initialized workday directory: {}", workday_dir.display());
        println!();
        println!("Workday will now use this local directory for its records.");
        println!("Edit settings.json there to tune offsets and the fixed start time.");
        return Ok(());
    }

    let dir = get_workday_dir(cli.dir.as_deref())?;
    ensure_dir(&dir)?;

    if let Err(e) = logging::init(&dir.join(LOG_FILE)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config = Config::load(&dir);
    info!(dir = %config.dir.display(), "workday starting");

    match cli.command {
        Some(Commands::Status) => print_status(&config),
        Some(Commands::Mode { action }) => change_mode(&config, action),
        Some(Commands::History { limit }) => print_history(&config, limit),
        Some(Commands::Run) | None => run_tui(&config),
        Some(Commands::Init) => Ok(()),
    }
}

fn print_status(config: &Config) -> Result<()> {
    let now = local_now();
    let session = Session::start(config, now);
    let resolution = session.resolution();
    let engine = session.engine();

    println!("Data directory:  {}", config.dir.display());
    println!("Mode:            {}", session.mode().name());
    println!("Recorded start:  {}", format_timestamp(resolution.raw_start));
    if resolution.is_first_start_today {
        println!("                 (first start today, just recorded)");
    }
    println!("Resolved start:  {}", resolution.resolved_start.format("%H:%M"));
    println!(
        "Work log:        {}  ({})",
        session.deadlines().interim.format("%H:%M"),
        format_remaining(engine.remaining_interim(now))
    );
    println!(
        "Clock out:       {}  ({})",
        session.deadlines().main.format("%H:%M"),
        format_remaining(engine.remaining_main(now))
    );
    Ok(())
}

fn change_mode(config: &Config, action: Option<ModeAction>) -> Result<()> {
    let store = config.mode_store();

    let mode = match action {
        None => {
            println!("Start mode: {}", store.load().name());
            return Ok(());
        }
        Some(ModeAction::Toggle) => store.toggle()?,
        Some(ModeAction::Flexible) => {
            store.set_flexible(true)?;
            StartMode::Flexible
        }
        Some(ModeAction::Fixed) => {
            store.set_flexible(false)?;
            StartMode::Fixed
        }
    };

    println!("Start mode set to {}.", mode.name());
    println!("Running sessions keep their current start until restarted.");
    Ok(())
}

fn print_history(config: &Config, limit: Option<usize>) -> Result<()> {
    let records = config.start_time_store().read_all();
    if records.is_empty() {
        println!("No start times recorded yet.");
        return Ok(());
    }

    let skip = limit.map_or(0, |n| records.len().saturating_sub(n));
    for record in records.iter().skip(skip) {
        println!("{}  {}", record.format("%a"), format_timestamp(*record));
    }
    Ok(())
}

fn run_tui(config: &Config) -> Result<()> {
    let now = local_now();
    let session = Session::start(config, now);
    let mut app = AppState::new(session, now);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, config.settings.tick());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = %err, "interactive view failed");
        eprintln!("Error: {}", err);
    }

    info!("workday exiting");
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick_rate: std::time::Duration,
) -> Result<()> {
    loop {
        let now = local_now();
        app.tick(now);

        terminal.draw(|f| ui::render(f, app, now))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key, local_now()) {
                    return Ok(());
                }
            }
        }
    }
}
