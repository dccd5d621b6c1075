//! The pre-rendered image sequence: file naming, decoding, and the
//! "all frames loaded" gate.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("failed to load {}: {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("frame {index} is outside a {total}-frame sequence")]
    OutOfRange { index: usize, total: usize },
}

/// File name for the zero-based frame `index` (`frame_001.png` is index 0).
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:03}.png", index + 1)
}

pub fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(frame_file_name(index))
}

/// Decode a single frame from disk into RGBA.
pub fn load_frame(path: &Path) -> Result<RgbaImage, SequenceError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| SequenceError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Milestones reached by a single successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadMilestones {
    /// The reference frame (index 0) just arrived; the canvas can be sized.
    pub reference_ready: bool,
    /// Every frame is now loaded; paint and start accepting input.
    pub all_loaded: bool,
}

/// Frames as they arrive from the preload workers.
pub struct FrameSequence {
    frames: Vec<Option<Arc<RgbaImage>>>,
    loaded: usize,
    failed: Vec<usize>,
}

impl FrameSequence {
    pub fn new(total: usize) -> Self {
        Self {
            frames: vec![None; total],
            loaded: 0,
            failed: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.frames.len()
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.loaded == self.frames.len()
    }

    /// Indices of frames that failed to load, in arrival order.
    pub fn failed(&self) -> &[usize] {
        &self.failed
    }

    pub fn frame(&self, index: usize) -> Option<&Arc<RgbaImage>> {
        self.frames.get(index).and_then(Option::as_ref)
    }

    /// Width / height of the first frame, the reference for canvas sizing.
    pub fn reference_aspect(&self) -> Option<f64> {
        let first = self.frame(0)?;
        if first.height() == 0 {
            return None;
        }
        Some(first.width() as f64 / first.height() as f64)
    }

    /// Store a decoded frame.  A frame delivered twice is counted once.
    pub fn mark_loaded(
        &mut self,
        index: usize,
        image: Arc<RgbaImage>,
    ) -> Result<LoadMilestones, SequenceError> {
        let total = self.frames.len();
        let slot = self
            .frames
            .get_mut(index)
            .ok_or(SequenceError::OutOfRange { index, total })?;
        if slot.is_some() {
            return Ok(LoadMilestones::default());
        }
        *slot = Some(image);
        self.loaded += 1;
        Ok(LoadMilestones {
            reference_ready: index == 0,
            all_loaded: self.loaded == total,
        })
    }

    /// Note a failed frame.  The slot stays empty, which keeps the load gate
    /// closed for good.
    pub fn mark_failed(&mut self, index: usize) {
        if !self.failed.contains(&index) {
            self.failed.push(index);
        }
    }
}
