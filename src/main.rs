use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use moodsync::app::cli::Args;
use moodsync::app::config::{AppConfig, UserConfig};
use moodsync::app::detector::Detector;
use moodsync::app::events::AppEvent;
use moodsync::app::{input_handler, App};
use moodsync::catalog::{Catalog, Mood};
use moodsync::detect::{CommandEngine, ExpressionEngine, UnconfiguredEngine};
use moodsync::player::{AudioOutput, EventSink, RodioOutput, SilentOutput};
use moodsync::ui::{self, terminal::Tui};

/// The terminal belongs to the UI, so logs go to a file next to config.toml
fn init_logging(dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(dir, "moodsync.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .init();

    guard
}

fn load_catalog(args: &Args, config: &UserConfig) -> Result<Catalog> {
    let path = args
        .catalog
        .clone()
        .or_else(|| config.catalog_path.as_ref().map(PathBuf::from));

    match path {
        Some(path) => Catalog::load(&path).with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

fn print_listing(catalog: &Catalog) {
    for descriptor in Mood::descriptors() {
        println!("{} ({}): {}", descriptor.label, descriptor.mood, descriptor.description);
        let tracks = catalog.filter(Some(descriptor.mood));
        if tracks.is_empty() {
            println!("    (no tracks)");
        }
        for track in tracks {
            println!("    {}. {} · {}", track.id, track.title, track.artist);
        }
    }
}

fn build_engine(config: &UserConfig) -> Arc<dyn ExpressionEngine> {
    if config.engine_command.is_empty() {
        return Arc::new(UnconfiguredEngine);
    }
    match CommandEngine::new(&config.engine_command) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            warn!("Expression engine disabled: {:#}", e);
            Arc::new(UnconfiguredEngine)
        }
    }
}

fn build_output(mute: bool, tx: &mpsc::Sender<AppEvent>) -> Box<dyn AudioOutput> {
    if mute {
        return Box::new(SilentOutput);
    }
    let tx_audio = tx.clone();
    let sink: EventSink = Box::new(move |event| {
        // Audio thread is outside the runtime; a closed channel means we're shutting down
        let _ = tx_audio.blocking_send(AppEvent::Audio(event));
    });
    match RodioOutput::spawn(sink) {
        Ok(output) => Box::new(output),
        Err(e) => {
            warn!("No audio device, continuing muted: {:#}", e);
            Box::new(SilentOutput)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    if args.generate_config {
        println!("{}", AppConfig::generate_default());
        return Ok(());
    }

    let _log_guard = init_logging(&AppConfig::get_config_dir());
    let mut config = AppConfig::load();
    if let Some(image) = &args.image {
        config.image_path = Some(image.display().to_string());
    }

    let catalog = load_catalog(&args, &config)?;
    if args.list {
        print_listing(&catalog);
        return Ok(());
    }
    info!("Starting with {} tracks", catalog.len());

    let (tx, mut rx) = mpsc::channel(100);

    let output = build_output(args.mute, &tx);
    let detector = Detector::new(
        build_engine(&config),
        Duration::from_millis(config.detection_timeout_ms),
        tx.clone(),
    );
    detector.load_models();

    let mut app = App::new(catalog, output, &config);
    if let Some(mood) = args.mood {
        app.select_mood(mood);
    }

    // Setup terminal (the panic hook restores it too)
    let mut terminal = ui::terminal::init()?;

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Tick Task (toast expiry, spinners)
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });
    drop(tx);

    let result = run(&mut terminal, &mut app, &mut rx, &detector).await;

    // Restore terminal
    ui::terminal::restore()?;

    // Close the channel before the audio thread is joined so it can't block on a full queue
    drop(rx);
    drop(app);

    result
}

async fn run(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut mpsc::Receiver<AppEvent>,
    detector: &Detector,
) -> Result<()> {
    while app.is_running {
        terminal.draw(|f| ui::ui(f, app))?;

        let Some(event) = rx.recv().await else {
            break;
        };
        match event {
            AppEvent::Input(Event::Key(key)) => input_handler::handle_key(key, app, detector),
            AppEvent::Input(_) => {}
            AppEvent::EngineLoaded(result) => app.engine_loaded(result),
            AppEvent::DetectionFinished(ticket, outcome) => app.finish_detection(ticket, outcome),
            AppEvent::Audio(event) => app.handle_audio_event(event),
            AppEvent::Tick => app.on_tick(),
        }
    }
    info!("Shutting down");
    Ok(())
}
