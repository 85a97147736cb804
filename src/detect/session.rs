use super::resolver::{dominant_expression, resolve, MoodInput};
use super::traits::{CaptureSource, DetectedExpression, ExpressionEngine};
use crate::catalog::Mood;
use crate::error::{MoodError, MoodResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What a finished detection task reports back to the event loop.
/// `Err` carries a human-readable engine failure.
pub type DetectionOutcome = Result<Option<DetectedExpression>, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Identifies one detection request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Readiness + single-flight bookkeeping for detection requests 🎯
///
/// Holds no expression data between calls. At most one ticket is
/// outstanding; a result is applied only if its ticket is still the
/// outstanding one.
#[derive(Debug)]
pub struct DetectionSession {
    status: EngineStatus,
    in_flight: Option<Ticket>,
    next_ticket: u64,
    last_expression: Option<String>,
}

impl Default for DetectionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectionSession {
    pub fn new() -> Self {
        Self {
            status: EngineStatus::Loading,
            in_flight: None,
            next_ticket: 1,
            last_expression: None,
        }
    }

    pub fn status(&self) -> &EngineStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The outstanding ticket, if any
    pub fn in_flight(&self) -> Option<Ticket> {
        self.in_flight
    }

    /// Label of the last applied dominant expression ("Detected: happy")
    pub fn last_expression(&self) -> Option<&str> {
        self.last_expression.as_deref()
    }

    pub fn engine_loaded(&mut self, result: Result<(), String>) {
        self.status = match result {
            Ok(()) => {
                info!("Expression engine ready");
                EngineStatus::Ready
            }
            Err(msg) => {
                warn!("Expression engine failed to load: {}", msg);
                EngineStatus::Failed(msg)
            }
        };
    }

    pub fn begin(&mut self) -> MoodResult<Ticket> {
        match &self.status {
            EngineStatus::Loading => return Err(MoodError::NotReady),
            EngineStatus::Failed(msg) => return Err(MoodError::EngineFailure(msg.clone())),
            EngineStatus::Ready => {}
        }
        if self.in_flight.is_some() {
            return Err(MoodError::DetectionInFlight);
        }

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.last_expression = None;
        debug!("Detection {:?} started", ticket);
        Ok(ticket)
    }

    /// Drop the outstanding request; its result will be discarded.
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(ticket) => {
                debug!("Detection {:?} cancelled", ticket);
                true
            }
            None => false,
        }
    }

    /// `None` when the ticket is stale (cancelled or never issued).
    pub fn complete(&mut self, ticket: Ticket, outcome: DetectionOutcome) -> Option<MoodResult<Mood>> {
        if self.in_flight != Some(ticket) {
            debug!("Discarding stale detection result {:?}", ticket);
            return None;
        }
        self.in_flight = None;

        let resolved = match outcome {
            Ok(expressions) => {
                if let Some(expr) = &expressions {
                    self.last_expression = dominant_expression(expr).map(str::to_string);
                }
                resolve(MoodInput::Detected(expressions))
            }
            Err(msg) => Err(MoodError::EngineFailure(msg)),
        };
        Some(resolved)
    }
}

pub async fn load_models(engine: Arc<dyn ExpressionEngine>) -> Result<(), String> {
    engine
        .load_models()
        .await
        .map_err(|e| format!("Failed to load AI models: {:#}", e))
}

/// Capture one frame and run the engine on it under `timeout`.
pub async fn run_detection(
    engine: Arc<dyn ExpressionEngine>,
    capture: Arc<dyn CaptureSource>,
    timeout: Duration,
) -> DetectionOutcome {
    let frame = tokio::task::spawn_blocking(move || capture.capture())
        .await
        .map_err(|e| format!("Capture task failed: {}", e))?
        .map_err(|e| format!("Could not capture image: {:#}", e))?;

    debug!("Running detection on {} ({}x{})", frame.path.display(), frame.width, frame.height);

    match tokio::time::timeout(timeout, engine.detect(&frame)).await {
        Ok(Ok(expressions)) => Ok(expressions),
        Ok(Err(e)) => Err(format!("An error occurred during detection: {:#}", e)),
        Err(_) => Err(format!(
            "Detection timed out after {:.1}s",
            timeout.as_secs_f64()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::traits::Frame;
    use anyhow::{anyhow, Result};
    use futures::future::BoxFuture;
    use std::path::PathBuf;

    struct FakeEngine {
        delay: Duration,
        result: fn() -> Result<Option<DetectedExpression>>,
    }

    impl ExpressionEngine for FakeEngine {
        fn load_models(&self) -> BoxFuture<'_, Result<()>> {
            Box::pin(async { Ok(()) })
        }

        fn detect<'a>(&'a self, _frame: &'a Frame) -> BoxFuture<'a, Result<Option<DetectedExpression>>> {
            Box::pin(async move {
                tokio::time::sleep(self.delay).await;
                (self.result)()
            })
        }
    }

    struct FakeCapture;

    impl CaptureSource for FakeCapture {
        fn capture(&self) -> Result<Frame> {
            Ok(Frame {
                path: PathBuf::from("face.jpg"),
                width: 640,
                height: 480,
            })
        }
    }

    fn happy() -> Result<Option<DetectedExpression>> {
        Ok(Some(DetectedExpression::new([("happy", 0.9), ("sad", 0.1)])))
    }

    fn ready_session() -> DetectionSession {
        let mut session = DetectionSession::new();
        session.engine_loaded(Ok(()));
        session
    }

    #[test]
    fn test_rejects_before_ready() {
        let mut session = DetectionSession::new();
        assert_eq!(session.begin(), Err(MoodError::NotReady));

        session.engine_loaded(Err("model missing".to_string()));
        assert_eq!(
            session.begin(),
            Err(MoodError::EngineFailure("model missing".to_string()))
        );
    }

    #[test]
    fn test_single_flight() {
        let mut session = ready_session();
        let first = session.begin().unwrap();
        assert_eq!(session.begin(), Err(MoodError::DetectionInFlight));

        let applied = session.complete(first, happy().map_err(|e| e.to_string()));
        assert_eq!(applied, Some(Ok(Mood::Joy)));
        assert_eq!(session.last_expression(), Some("happy"));
        assert!(!session.is_busy());
    }

    #[test]
    fn test_cancelled_result_is_dropped() {
        let mut session = ready_session();
        let ticket = session.begin().unwrap();
        assert!(session.cancel());
        assert!(session.complete(ticket, happy().map_err(|e| e.to_string())).is_none());

        // A fresh request after cancel gets a new ticket; the old one stays stale
        let fresh = session.begin().unwrap();
        assert_ne!(fresh, ticket);
        assert!(session.complete(ticket, Ok(None)).is_none());
        assert!(session.is_busy());
    }

    #[test]
    fn test_failure_outcomes() {
        let mut session = ready_session();
        let ticket = session.begin().unwrap();
        assert_eq!(
            session.complete(ticket, Ok(None)),
            Some(Err(MoodError::NoSubjectDetected))
        );

        let ticket = session.begin().unwrap();
        assert_eq!(
            session.complete(ticket, Err("boom".to_string())),
            Some(Err(MoodError::EngineFailure("boom".to_string())))
        );
    }

    #[tokio::test]
    async fn test_run_detection_success() {
        let engine = Arc::new(FakeEngine {
            delay: Duration::from_millis(5),
            result: happy,
        });
        let outcome = run_detection(engine, Arc::new(FakeCapture), Duration::from_secs(2)).await;
        let expressions = outcome.unwrap().unwrap();
        assert_eq!(dominant_expression(&expressions), Some("happy"));
    }

    #[tokio::test]
    async fn test_run_detection_times_out() {
        let engine = Arc::new(FakeEngine {
            delay: Duration::from_millis(500),
            result: happy,
        });
        let outcome = run_detection(engine, Arc::new(FakeCapture), Duration::from_millis(20)).await;
        assert!(outcome.unwrap_err().contains("timed out"));
    }

    #[tokio::test]
    async fn test_run_detection_engine_error() {
        let engine = Arc::new(FakeEngine {
            delay: Duration::ZERO,
            result: || Err(anyhow!("inference crashed")),
        });
        let outcome = run_detection(engine, Arc::new(FakeCapture), Duration::from_secs(1)).await;
        assert!(outcome.unwrap_err().contains("inference crashed"));
    }
}
