use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;

mod app;
mod handler;
mod tui;
mod ui;

use app::App;
use ayat_core::{Config, EditionClient, RandomSource, SeededRandom, SelectionWindow, ThreadRandom};
use tui::EventHandler;

const LOG_ENV: &str = "AYAT_LOG";

#[derive(Parser)]
#[command(name = "ayat")]
#[command(version, about = "Three consecutive Quran verses in Arabic and two translations")]
struct Cli {
    /// Config file (defaults to <config dir>/ayat/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible verse selection
    #[arg(short, long)]
    seed: Option<u64>,

    /// Always pick verses from this surah
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    chapter: Option<u32>,

    /// Print one window of verses and exit
    #[arg(long)]
    once: bool,

    /// Write the effective config to the config file and exit
    #[arg(long)]
    write_config: bool,

    /// Log file for the interactive view (defaults to <data dir>/ayat/ayat.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::get_config_path()?,
    };
    let config = Config::load_from(&config_path)?;

    if cli.write_config {
        config.save_to(&config_path)?;
        println!("Wrote config to {}", config_path.display());
        return Ok(());
    }

    let rng: Box<dyn RandomSource> = match cli.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };

    if cli.once {
        init_stderr_logging();
        return print_once(&config, rng, cli.chapter).await;
    }

    let log_path = match cli.log_file {
        Some(path) => Some(path),
        None => dirs::data_local_dir().map(|dir| dir.join("ayat").join("ayat.log")),
    };
    if let Some(path) = &log_path {
        init_file_logging(path)?;
    }
    info!("using config {}", config_path.display());

    run_tui(App::new(config, rng, cli.chapter)).await
}

fn logger_builder() -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, "info"))
}

fn init_stderr_logging() {
    logger_builder().init();
}

/// The terminal owns stderr while the TUI runs, so logs go to a file
fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Could not open log file {}", path.display()))?;

    logger_builder()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

async fn print_once(
    config: &Config,
    mut rng: Box<dyn RandomSource>,
    chapter: Option<u32>,
) -> Result<()> {
    let editions = EditionClient::new()
        .fetch_all(config)
        .await
        .context("Error fetching verses")?;

    let selector = config.selector();
    let window = match chapter {
        Some(chapter) => selector.select_window_in_chapter(&editions, chapter, rng.as_mut()),
        None => selector.select_window(&editions, rng.as_mut()),
    };

    print!("{}", format_window(config, &window));
    Ok(())
}

fn format_window(config: &Config, window: &SelectionWindow) -> String {
    if window.is_empty() {
        return format!("No verses found for surah {}\n", window.chapter);
    }

    let mut out = String::new();
    for triple in window.iter() {
        out.push_str(&format!("[{}]\n", triple.original.reference()));
        out.push_str(&format!("  {}\n", triple.original.text));
        for (label, record) in [
            (&config.translation_a.label, &triple.translation_a),
            (&config.translation_b.label, &triple.translation_b),
        ] {
            out.push_str(&format!("  {}: {}\n", label, record.text));
        }
        out.push('\n');
    }
    out
}

async fn run_tui(mut app: App) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    app.request_verses();

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;

            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event).await?,
                None => break,
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    result
}
