use anyhow::Result;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One still image handed to the engine per detection request
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Expression label → confidence in [0, 1], as reported by the engine.
/// Lives only for the duration of one detection call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectedExpression {
    pub scores: BTreeMap<String, f32>,
}

impl DetectedExpression {
    pub fn new<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            scores: scores.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Any face/expression inference backend 🧠
///
/// `detect` resolves to `Ok(None)` when no face is found in the frame.
pub trait ExpressionEngine: Send + Sync {
    fn load_models(&self) -> BoxFuture<'_, Result<()>>;
    fn detect<'a>(&'a self, frame: &'a Frame) -> BoxFuture<'a, Result<Option<DetectedExpression>>>;
}

/// Where detection frames come from (still image, camera...)
pub trait CaptureSource: Send + Sync {
    fn capture(&self) -> Result<Frame>;
}
