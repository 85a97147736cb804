use crate::catalog::Track;
use anyhow::Result;

/// Progress reported by the audio source, tagged with the load epoch it
/// belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioEvent {
    pub epoch: u64,
    pub kind: AudioEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioEventKind {
    DurationKnown(f64),
    TimeTick(f64),
    TrackEnded,
    StartFailed(String),
}

/// The unified interface for whatever actually makes sound 🔊
///
/// `play` may fail synchronously; a source that only finds out later
/// reports [`AudioEventKind::StartFailed`] instead.
pub trait AudioOutput: Send {
    fn load(&mut self, track: &Track, epoch: u64);
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn seek(&mut self, position_secs: f64);
    fn stop(&mut self);
}

/// Accepts everything and plays nothing. Used for `--mute` and tests.
#[derive(Debug, Default)]
pub struct SilentOutput;

impl AudioOutput for SilentOutput {
    fn load(&mut self, _track: &Track, _epoch: u64) {}
    fn play(&mut self) -> Result<()> {
        Ok(())
    }
    fn pause(&mut self) {}
    fn seek(&mut self, _position_secs: f64) {}
    fn stop(&mut self) {}
}
