use crate::app::events::AppEvent;
use crate::detect::{self, CaptureSource, ExpressionEngine, Ticket};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::debug;

struct Running {
    ticket: Ticket,
    handle: AbortHandle,
}

/// Runs engine work off the event loop and posts results back as events
#[derive(Clone)]
pub struct Detector {
    engine: Arc<dyn ExpressionEngine>,
    timeout: Duration,
    tx: mpsc::Sender<AppEvent>,
    running: Arc<Mutex<Option<Running>>>,
}

impl Detector {
    pub fn new(engine: Arc<dyn ExpressionEngine>, timeout: Duration, tx: mpsc::Sender<AppEvent>) -> Self {
        Self {
            engine,
            timeout,
            tx,
            running: Arc::new(Mutex::new(None)),
        }
    }

    fn running(&self) -> MutexGuard<'_, Option<Running>> {
        self.running.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn load_models(&self) {
        let engine = self.engine.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = detect::load_models(engine).await;
            let _ = tx.send(AppEvent::EngineLoaded(result)).await;
        });
    }

    pub fn start(&self, ticket: Ticket, capture: Arc<dyn CaptureSource>) {
        let engine = self.engine.clone();
        let timeout = self.timeout;
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = detect::run_detection(engine, capture, timeout).await;
            let _ = tx.send(AppEvent::DetectionFinished(ticket, outcome)).await;
        })
        .abort_handle();

        if let Some(previous) = self.running().replace(Running { ticket, handle }) {
            previous.handle.abort();
        }
    }

    /// Abort the engine task unless it still belongs to `current`.
    ///
    /// Dropping the task drops the engine future with it, so a command
    /// engine's child process is killed. Returns true if a live task was
    /// aborted.
    pub fn sync(&self, current: Option<Ticket>) -> bool {
        let mut running = self.running();
        if running.as_ref().is_some_and(|r| Some(r.ticket) == current) {
            return false;
        }
        let Some(stale) = running.take() else {
            return false;
        };
        let live = !stale.handle.is_finished();
        stale.handle.abort();
        if live {
            debug!("Aborted detection task {:?}", stale.ticket);
        }
        live
    }
}
