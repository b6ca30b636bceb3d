//! Day-over-day change calculation for the banner's headline numbers.

pub mod delta;
pub mod fields;

pub use delta::{compute_delta, Classification, DeltaResult};
pub use fields::{BannerDeltas, TrackedField};
