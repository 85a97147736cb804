use super::traits::{CaptureSource, Frame};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// A user-selected still image, re-read on every capture
pub struct StillImage {
    path: PathBuf,
}

impl StillImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CaptureSource for StillImage {
    fn capture(&self) -> Result<Frame> {
        // Only the header is decoded; the engine reads the pixels itself
        let (width, height) = image::image_dimensions(&self.path)
            .with_context(|| format!("{} is not a readable image", self.path.display()))?;
        Ok(Frame {
            path: self.path.clone(),
            width,
            height,
        })
    }
}
