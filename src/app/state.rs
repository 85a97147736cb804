use super::config::UserConfig;
use super::keys::KeyConfig;
use crate::catalog::{Catalog, Mood, Track};
use crate::detect::{DetectionOutcome, DetectionSession, Ticket};
use crate::error::{MoodError, MoodResult};
use crate::player::{AudioEvent, AudioOutput, PlaybackController};
use crate::ui::theme::Theme;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// How the mood gets picked 🎛️
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViewMode {
    #[default]
    Manual,
    Detect,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    pub start_time: Instant,
    pub deadline: Instant,
}

/// Everything the UI draws from.
///
/// `mood` and the player are the stable state; `toast` and the detection
/// session are transient and never overwrite them on failure.
pub struct App {
    pub is_running: bool,
    pub catalog: Catalog,
    pub mood: Option<Mood>,
    pub player: PlaybackController,
    pub detection: DetectionSession,
    pub view_mode: ViewMode,
    /// Cursor in the mood list
    pub mood_selected: usize,
    pub toast: Option<Toast>,
    pub keys: KeyConfig,
    pub seek_step: f64,
    pub toast_duration: Duration,
    pub image_path: Option<PathBuf>,
    pub theme: Theme,
    /// Drives spinners
    pub frame_count: u64,
}

impl App {
    pub fn new(catalog: Catalog, output: Box<dyn AudioOutput>, config: &UserConfig) -> Self {
        Self {
            is_running: true,
            catalog,
            mood: None,
            player: PlaybackController::new(output),
            detection: DetectionSession::new(),
            view_mode: ViewMode::default(),
            mood_selected: 0,
            toast: None,
            keys: config.keys.clone(),
            seek_step: config.seek_step_secs,
            toast_duration: Duration::from_millis(config.toast_ms),
            image_path: config.image_path.as_ref().map(PathBuf::from),
            theme: Theme::default(),
            frame_count: 0,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        self.player.tracks()
    }

    /// Resolve a mood and rebuild the playlist. Re-selecting the current
    /// mood keeps playback where it is.
    pub fn select_mood(&mut self, mood: Mood) {
        self.mood_selected = Mood::ALL.iter().position(|m| *m == mood).unwrap_or(0);
        if self.mood == Some(mood) {
            return;
        }
        self.mood = Some(mood);
        let tracks = self.catalog.filter(self.mood);
        info!("Mood -> {} ({} tracks)", mood, tracks.len());
        self.player.load(tracks);
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = Mood::ALL.len() as isize;
        self.mood_selected = (self.mood_selected as isize + delta).rem_euclid(len) as usize;
    }

    pub fn select_highlighted(&mut self) {
        if let Some(mood) = Mood::ALL.get(self.mood_selected).copied() {
            self.select_mood(mood);
        }
    }

    /// Leaving the detection view drops any outstanding request.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode == ViewMode::Detect && mode != ViewMode::Detect && self.detection.cancel() {
            self.show_toast("Detection cancelled");
        }
        self.view_mode = mode;
    }

    pub fn toggle_view(&mut self) {
        let next = match self.view_mode {
            ViewMode::Manual => ViewMode::Detect,
            ViewMode::Detect => ViewMode::Manual,
        };
        self.set_view_mode(next);
    }

    /// Ticket for a new detection, or `None` after surfacing why not.
    pub fn begin_detection(&mut self) -> Option<Ticket> {
        self.set_view_mode(ViewMode::Detect);
        if self.image_path.is_none() {
            self.show_error("No image selected. Start with --image <path>");
            return None;
        }
        match self.detection.begin() {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    pub fn finish_detection(&mut self, ticket: Ticket, outcome: DetectionOutcome) {
        let Some(result) = self.detection.complete(ticket, outcome) else {
            return;
        };
        match result {
            Ok(mood) => {
                let label = self.detection.last_expression().unwrap_or("expression").to_string();
                self.select_mood(mood);
                self.show_toast(&format!("Detected: {} → {}", label, mood.descriptor().label));
            }
            Err(e) => self.report(e),
        }
    }

    pub fn engine_loaded(&mut self, result: Result<(), String>) {
        if let Err(msg) = &result {
            self.show_error(msg);
        }
        self.detection.engine_loaded(result);
    }

    pub fn handle_audio_event(&mut self, event: AudioEvent) {
        let result = self.player.handle_audio_event(event);
        self.absorb(result);
    }

    pub fn toggle_play(&mut self) {
        let result = self.player.toggle();
        self.absorb(result);
    }

    pub fn next_track(&mut self) {
        let result = self.player.next();
        self.absorb(result);
    }

    pub fn prev_track(&mut self) {
        let result = self.player.previous();
        self.absorb(result);
    }

    pub fn seek_by(&mut self, delta_secs: f64) {
        if let Some(state) = self.player.state() {
            let target = state.elapsed + delta_secs;
            self.player.seek(target);
        }
    }

    fn absorb(&mut self, result: MoodResult<()>) {
        if let Err(e) = result {
            self.report(e);
        }
    }

    /// Recoverable conditions end up here as a transient notice
    pub fn report(&mut self, err: MoodError) {
        warn!("{}", err);
        self.show_error(&err.to_string());
    }

    pub fn show_error(&mut self, message: &str) {
        self.show_toast(message);
        if let Some(toast) = self.toast.as_mut() {
            toast.is_error = true;
        }
    }

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        let deadline = now + self.toast_duration;

        if let Some(ref mut current) = self.toast {
            // Keep start_time so a rapid update doesn't replay the entrance
            current.message = message.to_string();
            current.is_error = false;
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                is_error: false,
                start_time: now,
                deadline,
            });
        }
    }

    pub fn dismiss_toast(&mut self) -> bool {
        self.toast.take().is_some()
    }

    pub fn on_tick(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);
        if let Some(toast) = &self.toast {
            if Instant::now() >= toast.deadline {
                self.toast = None;
            }
        }
    }
}
