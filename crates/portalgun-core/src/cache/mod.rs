//! In-memory portrait cache.
//!
//! Portraits are decoded, resized to 80x80 and kept for the lifetime of the
//! process, keyed by character id. Nothing is written to disk and entries are
//! never evicted or refreshed.

pub mod images;

pub use images::{ImageCache, Portrait, PORTRAIT_SIZE};
