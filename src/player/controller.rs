use super::traits::{AudioEvent, AudioEventKind, AudioOutput};
use crate::catalog::Track;
use crate::error::{MoodError, MoodResult};
use tracing::{debug, warn};

/// Position within the active track list. Only exists while the list is
/// non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub index: usize,
    pub playing: bool,
    /// Seconds into the current track
    pub elapsed: f64,
    /// Seconds, unknown until the audio source reads the metadata
    pub duration: Option<f64>,
}

impl PlaybackState {
    fn start() -> Self {
        Self {
            index: 0,
            playing: false,
            elapsed: 0.0,
            duration: None,
        }
    }
}

/// Transport state machine over the mood's track list ⏯
pub struct PlaybackController {
    tracks: Vec<Track>,
    state: Option<PlaybackState>,
    output: Box<dyn AudioOutput>,
    epoch: u64,
}

impl PlaybackController {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            tracks: Vec::new(),
            state: None,
            output,
            epoch: 0,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn state(&self) -> Option<&PlaybackState> {
        self.state.as_ref()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.as_ref().and_then(|s| self.tracks.get(s.index))
    }

    pub fn is_playing(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.playing)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Replace the track list and rewind. An empty list leaves no state.
    pub fn load(&mut self, tracks: Vec<Track>) {
        self.output.stop();
        self.tracks = tracks;
        if self.tracks.is_empty() {
            self.state = None;
            return;
        }
        self.state = Some(PlaybackState::start());
        self.load_current();
    }

    pub fn play(&mut self) -> MoodResult<()> {
        if self.state.as_ref().is_some_and(|s| !s.playing) {
            self.start_output()
        } else {
            Ok(())
        }
    }

    pub fn pause(&mut self) {
        if let Some(state) = self.state.as_mut() {
            if state.playing {
                state.playing = false;
                self.output.pause();
            }
        }
    }

    pub fn toggle(&mut self) -> MoodResult<()> {
        if self.is_playing() {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    pub fn next(&mut self) -> MoodResult<()> {
        let len = self.tracks.len();
        self.step(|index| (index + 1) % len, None)
    }

    pub fn previous(&mut self) -> MoodResult<()> {
        let len = self.tracks.len();
        self.step(|index| (index + len - 1) % len, None)
    }

    /// Clamped to `[0, duration]`. Ignored while the duration is unknown.
    pub fn seek(&mut self, position_secs: f64) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let Some(duration) = state.duration else {
            debug!("Seek ignored: duration not known yet");
            return;
        };
        if !position_secs.is_finite() {
            return;
        }
        let clamped = position_secs.clamp(0.0, duration);
        state.elapsed = clamped;
        self.output.seek(clamped);
    }

    /// Auto-advance: always continues playing, whatever the flag was.
    pub fn on_track_end(&mut self) -> MoodResult<()> {
        let len = self.tracks.len();
        self.step(|index| (index + 1) % len, Some(true))
    }

    pub fn on_duration_known(&mut self, duration: f64) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if !duration.is_finite() || duration < 0.0 {
            warn!("Ignoring invalid duration {}", duration);
            return;
        }
        if state.duration == Some(duration) {
            return;
        }
        state.duration = Some(duration);
        state.elapsed = state.elapsed.min(duration);
    }

    pub fn on_time_tick(&mut self, elapsed: f64) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if !state.playing || !elapsed.is_finite() {
            return;
        }
        let upper = state.duration.unwrap_or(f64::INFINITY);
        state.elapsed = elapsed.clamp(0.0, upper);
    }

    /// The audio source could not begin playback after all.
    pub fn on_start_failed(&mut self, reason: &str) -> MoodError {
        if let Some(state) = self.state.as_mut() {
            state.playing = false;
        }
        warn!("Playback rejected: {}", reason);
        MoodError::PlaybackRejected(reason.to_string())
    }

    /// Route an audio source event, dropping events from an older load.
    pub fn handle_audio_event(&mut self, event: AudioEvent) -> MoodResult<()> {
        if event.epoch != self.epoch {
            debug!("Dropping stale audio event {:?}", event);
            return Ok(());
        }
        match event.kind {
            AudioEventKind::DurationKnown(secs) => self.on_duration_known(secs),
            AudioEventKind::TimeTick(secs) => self.on_time_tick(secs),
            AudioEventKind::TrackEnded => return self.on_track_end(),
            AudioEventKind::StartFailed(reason) => return Err(self.on_start_failed(&reason)),
        }
        Ok(())
    }

    fn step(&mut self, advance: impl Fn(usize) -> usize, force_playing: Option<bool>) -> MoodResult<()> {
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };
        let keep_playing = force_playing.unwrap_or(state.playing);
        state.index = advance(state.index);
        state.elapsed = 0.0;
        state.duration = None;
        state.playing = false;

        self.load_current();
        if keep_playing {
            self.start_output()
        } else {
            Ok(())
        }
    }

    fn load_current(&mut self) {
        if let Some(track) = self.current_track().cloned() {
            self.epoch += 1;
            debug!("Loading '{}' (epoch {})", track.title, self.epoch);
            self.output.load(&track, self.epoch);
        }
    }

    fn start_output(&mut self) -> MoodResult<()> {
        match self.output.play() {
            Ok(()) => {
                if let Some(state) = self.state.as_mut() {
                    state.playing = true;
                }
                Ok(())
            }
            Err(e) => Err(self.on_start_failed(&format!("{:#}", e))),
        }
    }
}
