//! The POI normalization core.
//!
//! Pure and synchronous: raw provider coordinates in, hole-indexed feature
//! lists out. No I/O, no shared state — safe to call from any task. The
//! policy layer in [`crate::service`] decides what an empty result means.

pub mod classify;
pub mod normalize;

pub use classify::{classify, Feature};
pub use normalize::normalize;
