use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use tracing::info;

use fsnav::app::App;
use fsnav::config::Config;
use fsnav::filesystem::{self, DirNavigator, ListOptions, SortBy};
use fsnav::ui;
use fsnav::utils::formatter::listing_line;

#[derive(Parser, Debug)]
#[command(name = "fsnav")]
#[command(about = "Browse directories from the terminal")]
#[command(version)]
struct Cli {
    /// Directory to open (default: configured start path, then the current directory)
    path: Option<PathBuf>,

    /// Print the listing once instead of starting the browser
    #[arg(long)]
    list: bool,

    /// Include hidden entries
    #[arg(short, long)]
    all: bool,

    /// Sort order: name, type, size or modified
    #[arg(long)]
    sort: Option<SortBy>,

    /// Path to config file
    #[arg(long, env = "FSNAV_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "FSNAV_LOG_LEVEL")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path)?;

    let mut options = config.list_options();
    if cli.all {
        options.include_hidden = true;
    }
    if let Some(sort) = cli.sort {
        options.sort_by = sort;
    }

    let start = match cli.path.clone().or_else(|| config.start_path.clone()) {
        Some(path) => path,
        None => std::env::current_dir().context("failed to determine current directory")?,
    };
    info!("opening {} (hidden={}, sort={})", start.display(), options.include_hidden, options.sort_by.label());

    if cli.list {
        return print_listing(&start, &options);
    }

    let navigator = DirNavigator::new(&start, options)?;
    let final_options = run_browser(App::new(navigator))?;

    // Only preferences changed inside the browser are persisted, not one-off flags.
    let mut updated = config.clone();
    if final_options.include_hidden != options.include_hidden {
        updated.show_hidden = final_options.include_hidden;
    }
    if final_options.sort_by != options.sort_by {
        updated.sort_by = final_options.sort_by;
    }
    if updated != config {
        updated.save(&config_path)?;
        info!("saved preferences to {}", config_path.display());
    }
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.list {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
        return Ok(());
    }

    // The browser owns the terminal, so logs go to a file instead.
    let log_dir = dirs::cache_dir().unwrap_or_else(std::env::temp_dir).join("fsnav");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log dir {}", log_dir.display()))?;
    let log_path = log_dir.join("fsnav.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

fn print_listing(path: &Path, options: &ListOptions) -> Result<()> {
    let entries = filesystem::list(path, options)?;
    for entry in &entries {
        println!("{}", listing_line(entry));
    }
    Ok(())
}

fn run_browser(mut app: App) -> Result<ListOptions> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let result = event_loop(&mut app);
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    result?;
    Ok(app.navigator.options)
}

fn event_loop(app: &mut App) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }
    }
    Ok(())
}
