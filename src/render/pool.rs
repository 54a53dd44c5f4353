//! Canvas pool
//!
//! Raster renders draw into pre-allocated canvases. A fixed number of them
//! live in a [`CanvasPool`]; a render checks one out, and the returned
//! [`CanvasLease`] hands it back when dropped, on every exit path.

use std::ops::{Deref, DerefMut};
use std::sync::{Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::frame::Frame;
use super::glyphs::GlyphCache;
use crate::error::FormatError;

/// Pixel buffer plus the glyphs rasterized into it so far
pub struct Canvas {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
    glyphs: GlyphCache,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
            glyphs: GlyphCache::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cached_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    /// Drawing surface and glyph cache, borrowed together
    pub fn parts(&mut self) -> (Frame<'_>, &mut GlyphCache) {
        (
            Frame::new(&mut self.pixels, self.width, self.height),
            &mut self.glyphs,
        )
    }
}

pub struct CanvasPool {
    idle: Mutex<Vec<Canvas>>,
    returned: Condvar,
    size: usize,
    wait: Duration,
}

impl CanvasPool {
    /// Allocate `size` canvases of `width × height` pixels up front
    pub fn new(size: usize, width: usize, height: usize, wait: Duration) -> Self {
        let idle = (0..size).map(|_| Canvas::new(width, height)).collect();
        tracing::debug!("Allocated {} canvases of {}x{}", size, width, height);
        Self {
            idle: Mutex::new(idle),
            returned: Condvar::new(),
            size,
            wait,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Canvases not currently leased
    pub fn available(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Take a canvas, blocking up to the pool's wait for one to come back
    pub fn checkout(&self) -> Result<CanvasLease<'_>, FormatError> {
        let deadline = Instant::now() + self.wait;
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);

        loop {
            if let Some(canvas) = idle.pop() {
                return Ok(CanvasLease { pool: self, canvas });
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::warn!("Canvas pool exhausted after {:?}", self.wait);
                return Err(FormatError::PoolExhausted { waited: self.wait });
            }

            let (guard, _) = self
                .returned
                .wait_timeout(idle, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            idle = guard;
        }
    }

    fn release(&self, canvas: Canvas) {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(canvas);
        self.returned.notify_one();
    }
}

/// Exclusive use of one pooled canvas
pub struct CanvasLease<'a> {
    pool: &'a CanvasPool,
    canvas: Canvas,
}

impl Deref for CanvasLease<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        &self.canvas
    }
}

impl DerefMut for CanvasLease<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }
}

impl Drop for CanvasLease<'_> {
    fn drop(&mut self) {
        // A zero-sized canvas does not allocate
        let canvas = std::mem::replace(&mut self.canvas, Canvas::new(0, 0));
        self.pool.release(canvas);
    }
}
