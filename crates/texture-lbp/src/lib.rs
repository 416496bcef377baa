//! Umbrella crate for the `texture-lbp` workspace.
//!
//! Re-exports the image primitives from `tx-core` and the uniform LBP
//! descriptor from `tx-lbp`.
//!
//! ```
//! use texture_lbp::{Image, LbpConfig, lbp_histogram};
//!
//! let img = Image::from_fn(16, 16, |x, y| ((x * 7) ^ (y * 11)) as u8);
//! let features = lbp_histogram(&img.as_view(), &LbpConfig::interpolated(8, 1.0)).unwrap();
//! assert_eq!(features.len(), 10);
//! let sum: f64 = features.iter().sum();
//! assert!((sum - 1.0).abs() < 1e-9);
//! ```

pub use tx_core::*;
pub use tx_lbp::*;
