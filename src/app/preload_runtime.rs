//! Background frame preloading.
//!
//! A small pool of worker threads pulls frame indices from a shared queue,
//! decodes each file, and reports back over a channel.  Frames load
//! independently; arrival order is whatever the disk and decoder give us.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use image::RgbaImage;
use tokio::sync::mpsc;

use crate::core::sequence::{self, SequenceError};

#[derive(Debug)]
pub enum PreloadUpdate {
    Loaded {
        index: usize,
        image: Arc<RgbaImage>,
    },
    Failed {
        index: usize,
        error: SequenceError,
    },
}

/// Handle to a running preload.  Dropping it does not stop the workers;
/// call [`PreloadHandle::request_cancel`] for that.
pub struct PreloadHandle {
    cancel: Arc<AtomicBool>,
}

impl PreloadHandle {
    pub fn request_cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

/// Start decoding `total` frames from `dir` on background threads.
pub fn spawn_preload(
    dir: PathBuf,
    total: usize,
    tx: mpsc::UnboundedSender<PreloadUpdate>,
) -> PreloadHandle {
    let cancel = Arc::new(AtomicBool::new(false));
    let queue = Arc::new(Mutex::new((0..total).collect::<VecDeque<usize>>()));
    let dir = Arc::new(dir);

    let max_threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .max(1);
    let worker_count = max_threads.min(total);
    tracing::debug!(total, worker_count, dir = %dir.display(), "starting frame preload");

    for _ in 0..worker_count {
        let queue = Arc::clone(&queue);
        let tx = tx.clone();
        let cancel = Arc::clone(&cancel);
        let dir = Arc::clone(&dir);
        std::thread::spawn(move || loop {
            if cancel.load(Ordering::Relaxed) {
                break;
            }
            let index = {
                let mut q = match queue.lock() {
                    Ok(guard) => guard,
                    Err(_) => break,
                };
                match q.pop_front() {
                    Some(i) => i,
                    None => break,
                }
            };

            let path = sequence::frame_path(&dir, index);
            let update = match sequence::load_frame(&path) {
                Ok(img) => PreloadUpdate::Loaded {
                    index,
                    image: Arc::new(img),
                },
                Err(error) => PreloadUpdate::Failed { index, error },
            };
            if tx.send(update).is_err() {
                break; // receiver dropped
            }
        });
    }

    PreloadHandle { cancel }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn write_frames(dir: &std::path::Path, indices: &[usize]) {
        for &i in indices {
            let img = RgbaImage::from_pixel(4, 2, Rgba([i as u8, 0, 0, 255]));
            img.save(sequence::frame_path(dir, i)).unwrap();
        }
    }

    fn collect(rx: &mut mpsc::UnboundedReceiver<PreloadUpdate>) -> Vec<PreloadUpdate> {
        let mut out = Vec::new();
        while let Some(u) = rx.blocking_recv() {
            out.push(u);
        }
        out
    }

    #[test]
    fn loads_every_frame() {
        let dir = tempfile::tempdir().unwrap();
        write_frames(dir.path(), &[0, 1, 2, 3]);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle = spawn_preload(dir.path().to_path_buf(), 4, tx);
        let updates = collect(&mut rx);

        let mut loaded: Vec<usize> = updates
            .iter()
            .filter_map(|u| match u {
                PreloadUpdate::Loaded { index, image } => {
                    assert_eq!(image.get_pixel(0, 0)[0], *index as u8);
                    Some(*index)
                }
                PreloadUpdate::Failed { .. } => None,
            })
            .collect();
        loaded.sort_unstable();
        assert_eq!(loaded, vec![0, 1, 2, 3]);
    }

    #[test]
    fn missing_frame_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        write_frames(dir.path(), &[0, 2]);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle = spawn_preload(dir.path().to_path_buf(), 3, tx);
        let updates = collect(&mut rx);

        assert_eq!(updates.len(), 3);
        let failed: Vec<usize> = updates
            .iter()
            .filter_map(|u| match u {
                PreloadUpdate::Failed { index, .. } => Some(*index),
                PreloadUpdate::Loaded { .. } => None,
            })
            .collect();
        assert_eq!(failed, vec![1]);
    }
}
