//! Off-screen canvas — sizing, letterbox geometry, and frame composition.
//!
//! The canvas is a plain `RgbaImage` in "pixels".  On the terminal one
//! column is one pixel and one row is two (see `ui::canvas`), so pixels are
//! roughly square and aspect ratios carry over unchanged.

use image::{imageops, Rgba, RgbaImage};

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn aspect(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Width is `min(container_width, max_width)`; height follows the reference
/// frame's aspect ratio (`width / aspect`, truncated, at least 1).
pub fn canvas_size(container_width: u32, max_width: u32, aspect: f64) -> CanvasSize {
    let width = container_width.min(max_width);
    if width == 0 || !aspect.is_finite() || aspect <= 0.0 {
        return CanvasSize { width, height: 0 };
    }
    let height = ((width as f64 / aspect).floor() as u32).max(1);
    CanvasSize { width, height }
}

/// Where a frame lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Fit an image into the canvas, preserving its aspect ratio.
///
/// Wider than the canvas: full width, top-aligned.  Otherwise: full height,
/// centred horizontally.  Both cases pin the image to the top edge.
pub fn letterbox(canvas: CanvasSize, image_width: u32, image_height: u32) -> Placement {
    if canvas.is_empty() || image_width == 0 || image_height == 0 {
        return Placement {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        };
    }
    let image_aspect = image_width as f64 / image_height as f64;
    if image_aspect > canvas.aspect() {
        let height = (canvas.width as f64 / image_aspect).round() as u32;
        Placement {
            x: 0,
            y: 0,
            width: canvas.width,
            height: height.clamp(1, canvas.height),
        }
    } else {
        let width = (canvas.height as f64 * image_aspect).round() as u32;
        let width = width.clamp(1, canvas.width);
        Placement {
            x: (canvas.width - width) / 2,
            y: 0,
            width,
            height: canvas.height,
        }
    }
}

/// A frame already scaled to its letterbox slot on a canvas of a given size.
pub struct ScaledFrame {
    placement: Placement,
    image: RgbaImage,
}

/// The drawing surface frames are blitted into.
pub struct Canvas {
    background: Rgba<u8>,
    pixels: RgbaImage,
}

impl Canvas {
    pub fn new(background: Rgba<u8>) -> Self {
        Self {
            background,
            pixels: RgbaImage::new(0, 0),
        }
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }

    /// Resize the backing store.  Like an HTML canvas, resizing clears it.
    pub fn resize(&mut self, size: CanvasSize) {
        self.pixels = RgbaImage::from_pixel(size.width, size.height, self.background);
    }

    /// Scale `frame` into its letterbox slot for the current size.  `None`
    /// when there is nothing to draw.
    pub fn scale(&self, frame: &RgbaImage) -> Option<ScaledFrame> {
        let placement = letterbox(self.size(), frame.width(), frame.height());
        if placement.width == 0 || placement.height == 0 {
            return None;
        }
        let image = imageops::resize(
            frame,
            placement.width,
            placement.height,
            imageops::FilterType::Triangle,
        );
        Some(ScaledFrame { placement, image })
    }

    pub fn clear(&mut self) {
        for px in self.pixels.pixels_mut() {
            *px = self.background;
        }
    }

    /// Copy a scaled frame onto the canvas.  Pixels outside its slot are
    /// left alone; call [`Canvas::clear`] first.
    pub fn blit(&mut self, frame: &ScaledFrame) {
        let ScaledFrame { placement, image } = frame;
        imageops::overlay(&mut self.pixels, image, placement.x as i64, placement.y as i64);
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Scaled copies of each frame for one canvas size.  A frame is resampled
/// the first time it is drawn at a size and reused after that; a new canvas
/// size throws every copy away.
pub struct ScaleCache {
    size: CanvasSize,
    slots: Vec<Option<ScaledFrame>>,
}

impl ScaleCache {
    pub fn new(total_frames: usize) -> Self {
        Self {
            size: CanvasSize { width: 0, height: 0 },
            slots: (0..total_frames).map(|_| None).collect(),
        }
    }

    /// The scaled copy of frame `index` for `canvas`, resampling on a miss.
    pub fn get_or_scale(
        &mut self,
        canvas: &Canvas,
        index: usize,
        frame: &RgbaImage,
    ) -> Option<&ScaledFrame> {
        if canvas.size() != self.size {
            self.invalidate(canvas.size());
        }
        let slot = self.slots.get_mut(index)?;
        if slot.is_none() {
            *slot = canvas.scale(frame);
        }
        slot.as_ref()
    }

    /// Drop every scaled copy and key the cache to `size`.
    pub fn invalidate(&mut self, size: CanvasSize) {
        self.size = size;
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    #[cfg(test)]
    pub fn cached(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
