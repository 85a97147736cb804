pub mod controller;
pub mod output;
pub mod traits;

pub use controller::{PlaybackController, PlaybackState};
pub use output::{EventSink, RodioOutput};
pub use traits::{AudioEvent, AudioEventKind, AudioOutput, SilentOutput};
