//! Uniform local binary patterns (LBP) for texture description.
//!
//! The pipeline has three stages:
//! - **Sampling**: [`RingSampler`] reads `points` bilinearly interpolated
//!   samples on a circle of `radius` around each center. The fixed 3x3 path
//!   reads the eight direct neighbors through a [`tx_core::BorderMode`]
//!   (zero fill by default).
//! - **Encoding**: [`UniformEncoder`] thresholds samples against the center
//!   and counts bit transitions. Signatures with at most two transitions are
//!   labelled with their popcount `0..=P`; all others share label `P + 1`.
//!   [`raw_code_3x3`] keeps the plain 8-bit 3x3 code instead.
//! - **Aggregation**: [`LabelHistogram`] counts labels into `P + 2` bins and
//!   normalizes them into a feature vector.
//!
//! ## Conventions
//! The ring path thresholds with `>=` and uses the truncated transition scan;
//! the 3x3 path thresholds with `>` and uses the open scan. Both are
//! configurable through [`LbpConfig`]; see [`TransitionScan`] for the exact
//! pair sets.
//!
//! ## Regions
//! Ring centers are restricted to [`RingSampler::safe_region`], which keeps
//! every bilinear neighborhood inside the image. Nothing is clamped or
//! extrapolated.
//!
//! ## Parallelism
//! With the `rayon` feature, `compute_label_raster_par` and
//! `LabelHistogram::from_raster_par` split work by output row.

pub mod config;
pub mod encode;
pub mod histogram;
#[cfg(feature = "rayon")]
pub mod parallel;
pub mod raster;
pub mod ring;
pub mod template;

pub use config::{FIXED_POINTS, LbpConfig, MAX_POINTS, RegionPolicy, SamplingMode};
pub use encode::{
    ThresholdRule, TransitionScan, UniformEncoder, count_transitions, raw_code_3x3, uniform_label,
};
pub use histogram::{LabelHistogram, compute_histogram};
#[cfg(feature = "rayon")]
pub use parallel::compute_label_raster_par;
pub use raster::{
    LabelRaster, compute_code_raster_3x3, compute_label_raster, compute_label_raster_fixed3x3,
    lbp_histogram,
};
pub use ring::{RingOffset, RingSampler};
pub use template::{NEIGHBOR_OFFSETS_3X3, neighbor_3x3, neighbors_3x3};
