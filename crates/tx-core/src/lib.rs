//! Foundational primitives for texture descriptors.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! This allows borrowed views over padded buffers and subviews.
//!
//! ## Coordinates
//! Pixels are addressed as `(x, y)` where `x` is the column and `y` the row.
//! Integer coordinates refer to pixel centers.
//!
//! ## Border Modes
//! Integer lookups outside the image resolve through [`BorderMode`]: constant
//! fill, clamp, or reflect-101 (mirror around edge pixels without repeating
//! them).
//!
//! ## Bilinear Sampling
//! [`sample_bilinear`] uses the floor/ceil 2x2 neighborhood, so integer
//! coordinates read exactly one pixel. It never extrapolates: a neighborhood
//! that leaves the image is reported as [`Error::OutOfBounds`].

mod border;
mod error;
mod image;
mod rect;
mod sample;

pub use border::{BorderMode, map_index};
pub use error::Error;
pub use image::{Image, ImageView, ImageViewMut};
pub use rect::Rect;
pub use sample::{sample_at, sample_bilinear};
