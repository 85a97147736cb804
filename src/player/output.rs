//! rodio-backed [`AudioOutput`] running on its own thread.
//!
//! `OutputStream` is not `Send`, so the stream, the sink and all decoding
//! live on a dedicated worker. The controller talks to it through a command
//! channel and hears back through the `emit` callback.

use super::traits::{AudioEvent, AudioEventKind, AudioOutput};
use crate::catalog::Track;
use anyhow::{anyhow, Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const TICK_INTERVAL: Duration = Duration::from_millis(250);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub type EventSink = Box<dyn Fn(AudioEvent) + Send>;

#[derive(Debug)]
enum Command {
    Load { epoch: u64, locator: String },
    Play,
    Pause,
    Seek(f64),
    Stop,
    Shutdown,
}

pub struct RodioOutput {
    commands: Sender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl RodioOutput {
    pub fn spawn(emit: EventSink) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("moodsync-audio".to_string())
            .spawn(move || AudioWorker::new(emit).run(rx))
            .context("failed to spawn audio thread")?;
        Ok(Self {
            commands: tx,
            worker: Some(worker),
        })
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| anyhow!("audio thread has stopped"))
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, track: &Track, epoch: u64) {
        let locator = track.url.clone();
        if let Err(e) = self.send(Command::Load { epoch, locator }) {
            warn!("{}", e);
        }
    }

    fn play(&mut self) -> Result<()> {
        self.send(Command::Play)
    }

    fn pause(&mut self) {
        let _ = self.send(Command::Pause);
    }

    fn seek(&mut self, position_secs: f64) {
        let _ = self.send(Command::Seek(position_secs));
    }

    fn stop(&mut self) {
        let _ = self.send(Command::Stop);
    }
}

impl Drop for RodioOutput {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Take everything already queued behind `first`.
///
/// A `Load` resets the worker, so whatever precedes the last one is dropped
/// without fetching. `Shutdown` discards the rest.
fn coalesce(first: Command, commands: &Receiver<Command>) -> Vec<Command> {
    if let Command::Shutdown = first {
        return vec![first];
    }
    let mut batch = vec![first];
    while let Ok(next) = commands.try_recv() {
        match next {
            Command::Shutdown => return vec![next],
            Command::Load { .. } => {
                if batch.iter().any(|c| matches!(c, Command::Load { .. })) {
                    debug!("Skipping superseded load");
                }
                batch.clear();
                batch.push(next);
            }
            _ => batch.push(next),
        }
    }
    batch
}

struct AudioWorker {
    emit: EventSink,
    // Stream must outlive every sink created from its handle
    device: Option<(OutputStream, OutputStreamHandle)>,
    http: Option<reqwest::blocking::Client>,
    sink: Option<Sink>,
    load_error: Option<String>,
    epoch: u64,
    playing: bool,
    // Position = offset + time since last resume
    offset: Duration,
    resumed_at: Option<Instant>,
}

impl AudioWorker {
    fn new(emit: EventSink) -> Self {
        let device = match OutputStream::try_default() {
            Ok(pair) => Some(pair),
            Err(e) => {
                warn!("No audio output device: {}", e);
                None
            }
        };
        Self::with_device(emit, device)
    }

    fn with_device(emit: EventSink, device: Option<(OutputStream, OutputStreamHandle)>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("moodsync/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .ok();

        Self {
            emit,
            device,
            http,
            sink: None,
            load_error: None,
            epoch: 0,
            playing: false,
            offset: Duration::ZERO,
            resumed_at: None,
        }
    }

    fn run(mut self, commands: Receiver<Command>) {
        'outer: loop {
            match commands.recv_timeout(TICK_INTERVAL) {
                Ok(first) => {
                    for command in coalesce(first, &commands) {
                        if let Command::Shutdown = command {
                            break 'outer;
                        }
                        self.apply(command);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
            self.poll();
        }
        debug!("Audio thread exiting");
    }

    fn send(&self, kind: AudioEventKind) {
        (self.emit)(AudioEvent {
            epoch: self.epoch,
            kind,
        });
    }

    fn position(&self) -> Duration {
        self.offset + self.resumed_at.map(|t| t.elapsed()).unwrap_or_default()
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Load { epoch, locator } => {
                self.reset();
                self.epoch = epoch;
                match self.open(&locator) {
                    Ok((sink, duration)) => {
                        info!("Loaded {}", locator);
                        self.sink = Some(sink);
                        if let Some(duration) = duration {
                            self.send(AudioEventKind::DurationKnown(duration.as_secs_f64()));
                        }
                    }
                    Err(e) => {
                        warn!("Failed to load {}: {:#}", locator, e);
                        self.load_error = Some(format!("{:#}", e));
                    }
                }
            }
            Command::Play => {
                if self.playing {
                    return;
                }
                match (&self.sink, &self.load_error) {
                    (Some(sink), _) => {
                        sink.play();
                        self.playing = true;
                        self.resumed_at = Some(Instant::now());
                    }
                    (None, Some(err)) => self.send(AudioEventKind::StartFailed(err.clone())),
                    (None, None) => self.send(AudioEventKind::StartFailed("nothing loaded".to_string())),
                }
            }
            Command::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                }
                self.offset = self.position();
                self.resumed_at = None;
                self.playing = false;
            }
            Command::Seek(secs) => {
                let Some(sink) = &self.sink else { return };
                let target = Duration::from_secs_f64(secs.max(0.0));
                match sink.try_seek(target) {
                    Ok(()) => {
                        self.offset = target;
                        if self.playing {
                            self.resumed_at = Some(Instant::now());
                        }
                    }
                    Err(e) => warn!("Seek failed: {}", e),
                }
            }
            Command::Stop => self.reset(),
            Command::Shutdown => {}
        }
    }

    fn reset(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.load_error = None;
        self.playing = false;
        self.offset = Duration::ZERO;
        self.resumed_at = None;
    }

    fn poll(&mut self) {
        if !self.playing {
            return;
        }
        let ended = self.sink.as_ref().is_some_and(|s| s.empty());
        if ended {
            self.playing = false;
            self.resumed_at = None;
            self.send(AudioEventKind::TrackEnded);
        } else {
            self.send(AudioEventKind::TimeTick(self.position().as_secs_f64()));
        }
    }

    fn open(&self, locator: &str) -> Result<(Sink, Option<Duration>)> {
        let (_, handle) = self
            .device
            .as_ref()
            .ok_or_else(|| anyhow!("no audio output device"))?;
        let bytes = self.fetch(locator)?;
        let source = Decoder::new(Cursor::new(bytes)).context("unsupported audio format")?;
        let duration = source.total_duration();

        let sink = Sink::try_new(handle).context("failed to open audio sink")?;
        sink.pause();
        sink.append(source);
        Ok((sink, duration))
    }

    fn fetch(&self, locator: &str) -> Result<Vec<u8>> {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            let client = self
                .http
                .as_ref()
                .ok_or_else(|| anyhow!("HTTP client unavailable"))?;
            let bytes = client
                .get(locator)
                .send()
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.bytes())
                .with_context(|| format!("failed to download {}", locator))?;
            Ok(bytes.to_vec())
        } else {
            std::fs::read(locator).with_context(|| format!("failed to read {}", locator))
        }
    }
}
