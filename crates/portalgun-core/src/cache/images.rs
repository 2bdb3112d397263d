use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use image::{imageops::FilterType, DynamicImage, RgbaImage};
use parking_lot::RwLock;
use tracing::debug;

use crate::api::ApiError;

/// Edge length of a cached portrait, in pixels (portraits are square)
pub const PORTRAIT_SIZE: u32 = 80;

/// A decoded, display-ready portrait of exactly `PORTRAIT_SIZE` x `PORTRAIT_SIZE`
#[derive(Debug, Clone)]
pub struct Portrait {
    image: RgbaImage,
}

impl Portrait {
    /// Resize any decoded image to the fixed portrait footprint
    pub fn from_image(image: &DynamicImage) -> Self {
        let image = image
            .resize_exact(PORTRAIT_SIZE, PORTRAIT_SIZE, FilterType::Lanczos3)
            .to_rgba8();
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Mean RGB colour of the block starting at (x, y). The block is clipped
    /// to the portrait bounds; an empty block yields black.
    pub fn average_rgb(&self, x: u32, y: u32, block_w: u32, block_h: u32) -> [u8; 3] {
        let x_end = (x + block_w.max(1)).min(self.width());
        let y_end = (y + block_h.max(1)).min(self.height());

        let mut sum = [0u64; 3];
        let mut count = 0u64;
        for py in y..y_end {
            for px in x..x_end {
                let p = self.image.get_pixel(px, py).0;
                sum[0] += u64::from(p[0]);
                sum[1] += u64::from(p[1]);
                sum[2] += u64::from(p[2]);
                count += 1;
            }
        }

        if count == 0 {
            return [0, 0, 0];
        }
        // Each channel mean is at most 255
        [
            (sum[0] / count) as u8,
            (sum[1] / count) as u8,
            (sum[2] / count) as u8,
        ]
    }
}

/// Process-lifetime portrait cache keyed by character id.
/// Clone is cheap and every clone shares the same map.
///
/// The lock is only held for single map operations, never across a fetch, so
/// two concurrent misses for one id may both download; the later insert
/// replaces the earlier one with an equivalent portrait.
#[derive(Clone, Default)]
pub struct ImageCache {
    entries: Arc<RwLock<HashMap<i64, Arc<Portrait>>>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, character_id: i64) -> Option<Arc<Portrait>> {
        self.entries.read().get(&character_id).cloned()
    }

    /// Store a portrait, replacing any existing entry
    pub fn insert(&self, character_id: i64, portrait: Arc<Portrait>) {
        self.entries.write().insert(character_id, portrait);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Return the cached portrait for `character_id`, fetching it on a miss.
    ///
    /// A hit never calls `fetch`. A failed fetch returns `None` and leaves the
    /// cache untouched, so a later call will try again.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        character_id: i64,
        image_url: &str,
        fetch: F,
    ) -> Option<Arc<Portrait>>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<DynamicImage, ApiError>>,
    {
        if let Some(hit) = self.get(character_id) {
            return Some(hit);
        }

        match fetch(image_url.to_string()).await {
            Ok(image) => {
                let portrait = Arc::new(Portrait::from_image(&image));
                self.insert(character_id, Arc::clone(&portrait));
                debug!(character_id, cached = self.len(), "Portrait cached");
                Some(portrait)
            }
            Err(e) => {
                debug!(error = %e, character_id, url = image_url, "Portrait fetch failed");
                None
            }
        }
    }
}
