use std::collections::HashMap;

use crate::foundation::core::PixelBounds;
use crate::foundation::math::{Px, TRANSPARENT_PX};
use crate::render::surface::Surface;

/// Pool configuration for offscreen buffers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SurfacePoolOpts {
    /// Maximum bytes retained across all buckets.
    pub(crate) max_pool_bytes: usize,
    /// Maximum number of retained buffers per `(w, h)` bucket.
    pub(crate) max_surfaces_per_bucket: usize,
}

impl Default for SurfacePoolOpts {
    fn default() -> Self {
        Self {
            max_pool_bytes: 256 * 1024 * 1024,
            max_surfaces_per_bucket: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SurfaceKey {
    w: u32,
    h: u32,
}

impl SurfaceKey {
    fn from_bounds(bounds: PixelBounds) -> Self {
        Self {
            w: bounds.width(),
            h: bounds.height(),
        }
    }

    fn byte_len(self) -> usize {
        (self.w as usize)
            .saturating_mul(self.h as usize)
            .saturating_mul(std::mem::size_of::<Px>())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct SurfacePoolStats {
    pub(crate) retained_surfaces: usize,
    pub(crate) retained_bytes: usize,
    pub(crate) alloc_surfaces: u64,
    pub(crate) alloc_bytes: u64,
    pub(crate) reused_surfaces: u64,
    pub(crate) dropped_on_release: u64,
    pub(crate) live_surfaces: usize,
    pub(crate) peak_live_surfaces: usize,
}

/// Frame-scoped pool of offscreen layer buffers.
///
/// Keyed by `(width, height)`. Buffers handed out are cleared; the pool and everything it retains
/// is dropped together with the compositor at the end of the frame.
pub(crate) struct SurfacePool {
    opts: SurfacePoolOpts,
    stats: SurfacePoolStats,
    buckets: HashMap<SurfaceKey, Vec<Vec<Px>>>,
}

impl SurfacePool {
    pub(crate) fn new(opts: SurfacePoolOpts) -> Self {
        Self {
            opts,
            stats: SurfacePoolStats::default(),
            buckets: HashMap::new(),
        }
    }

    pub(crate) fn stats(&self) -> SurfacePoolStats {
        self.stats.clone()
    }

    /// Number of surfaces borrowed and not yet released.
    pub(crate) fn live(&self) -> usize {
        self.stats.live_surfaces
    }

    /// Transparent surface covering `bounds`.
    pub(crate) fn borrow(&mut self, bounds: PixelBounds) -> Surface {
        let key = SurfaceKey::from_bounds(bounds);
        self.stats.live_surfaces += 1;
        self.stats.peak_live_surfaces = self.stats.peak_live_surfaces.max(self.stats.live_surfaces);

        if let Some(mut data) = self.buckets.get_mut(&key).and_then(Vec::pop) {
            self.stats.retained_surfaces = self.stats.retained_surfaces.saturating_sub(1);
            self.stats.retained_bytes = self.stats.retained_bytes.saturating_sub(key.byte_len());
            self.stats.reused_surfaces = self.stats.reused_surfaces.saturating_add(1);
            data.fill(TRANSPARENT_PX);
            return Surface::from_data(bounds, data);
        }

        self.stats.alloc_surfaces = self.stats.alloc_surfaces.saturating_add(1);
        self.stats.alloc_bytes = self.stats.alloc_bytes.saturating_add(key.byte_len() as u64);
        Surface::new(bounds)
    }

    pub(crate) fn release(&mut self, surface: Surface) {
        self.stats.live_surfaces = self.stats.live_surfaces.saturating_sub(1);
        if self.opts.max_pool_bytes == 0 || self.opts.max_surfaces_per_bucket == 0 {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        let key = SurfaceKey::from_bounds(surface.bounds);
        let bytes = key.byte_len();
        if self.stats.retained_bytes.saturating_add(bytes) > self.opts.max_pool_bytes {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        let bucket = self.buckets.entry(key).or_default();
        if bucket.len() >= self.opts.max_surfaces_per_bucket {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        bucket.push(surface.into_data());
        self.stats.retained_surfaces = self.stats.retained_surfaces.saturating_add(1);
        self.stats.retained_bytes = self.stats.retained_bytes.saturating_add(bytes);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface_pool.rs"]
mod tests;
