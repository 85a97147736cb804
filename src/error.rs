//! Recoverable conditions surfaced to the user as transient notices.
//!
//! None of these are fatal. A failed operation leaves the resolved mood and
//! the playback state exactly as they were (except that a rejected start
//! reverts the playing flag to false).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoodError {
    /// Expression models have not finished loading
    #[error("AI models are still initializing")]
    NotReady,

    /// The engine ran but found no face in the frame
    #[error("No face detected. Please try again.")]
    NoSubjectDetected,

    /// A detection is already outstanding
    #[error("Already analyzing an expression")]
    DetectionInFlight,

    /// Model load failure, inference error or timeout
    #[error("{0}")]
    EngineFailure(String),

    /// The audio source refused to start playback
    #[error("Playback blocked: {0}")]
    PlaybackRejected(String),
}

pub type MoodResult<T> = Result<T, MoodError>;
