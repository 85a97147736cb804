pub mod capture;
pub mod command;
pub mod resolver;
pub mod session;
pub mod traits;

pub use capture::StillImage;
pub use command::{CommandEngine, UnconfiguredEngine};
pub use resolver::{dominant_expression, mood_for_expression, resolve, MoodInput, DEFAULT_MOOD};
pub use session::{load_models, run_detection, DetectionOutcome, DetectionSession, EngineStatus, Ticket};
pub use traits::{CaptureSource, DetectedExpression, ExpressionEngine, Frame};
