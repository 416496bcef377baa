use std::f64::consts::PI;

use tx_core::{Error, ImageView, Rect, sample_bilinear};

use crate::config::validate_ring;

/// Offset of one ring sample relative to the center pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingOffset {
    pub dx: f64,
    pub dy: f64,
}

/// Circular neighbor sampler for a fixed `(points, radius)` pair.
///
/// Sample `i` sits at angle `2 * pi * i / points`, starting east and moving
/// through north (negative `y`) first:
///
/// ```text
/// dx =  radius * cos(2 * pi * i / points)
/// dy = -radius * sin(2 * pi * i / points)
/// ```
#[derive(Debug, Clone)]
pub struct RingSampler {
    radius: f64,
    margin: usize,
    offsets: Vec<RingOffset>,
}

impl RingSampler {
    pub fn new(points: usize, radius: f64) -> Result<Self, Error> {
        validate_ring(points, radius)?;

        let offsets = (0..points)
            .map(|i| {
                let theta = 2.0 * PI * i as f64 / points as f64;
                RingOffset {
                    dx: radius * theta.cos(),
                    dy: -radius * theta.sin(),
                }
            })
            .collect();

        Ok(Self {
            radius,
            margin: radius.ceil() as usize,
            offsets,
        })
    }

    pub fn points(&self) -> usize {
        self.offsets.len()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn offsets(&self) -> &[RingOffset] {
        &self.offsets
    }

    /// Border width, `ceil(radius)`, excluded on every side of the image.
    pub fn margin(&self) -> usize {
        self.margin
    }

    /// Centers whose full ring, including the bilinear neighborhood of every
    /// sample, lies inside a `width x height` image.
    pub fn safe_region(&self, width: usize, height: usize) -> Rect {
        Rect::inset(width, height, self.margin)
    }

    /// Interpolated intensities around `(x, y)`, rounded to the nearest
    /// integer (ties to even) and written to `out`.
    ///
    /// `out.len()` must equal [`RingSampler::points`]. Centers outside
    /// [`RingSampler::safe_region`] fail with [`Error::OutOfBounds`] as soon
    /// as a sample leaves the image.
    pub fn sample_into(
        &self,
        img: &ImageView<'_, u8>,
        x: usize,
        y: usize,
        out: &mut [u8],
    ) -> Result<(), Error> {
        debug_assert_eq!(out.len(), self.offsets.len());
        let (cx, cy) = (x as f64, y as f64);
        for (dst, off) in out.iter_mut().zip(&self.offsets) {
            let v = sample_bilinear(img, cx + off.dx, cy + off.dy)?;
            *dst = v.round_ties_even().clamp(0.0, 255.0) as u8;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tx_core::{Error, Image, Rect};

    use super::RingSampler;

    #[test]
    fn eight_point_ring_starts_east_and_turns_north() {
        let ring = RingSampler::new(8, 1.0).expect("valid ring");
        let o = ring.offsets();
        assert_eq!(o.len(), 8);
        assert!((o[0].dx - 1.0).abs() < 1e-12 && o[0].dy.abs() < 1e-12);
        assert!(o[2].dx.abs() < 1e-12 && (o[2].dy + 1.0).abs() < 1e-12);
        assert!((o[4].dx + 1.0).abs() < 1e-12 && o[4].dy.abs() < 1e-12);
        assert!(o[6].dx.abs() < 1e-12 && (o[6].dy - 1.0).abs() < 1e-12);
        let diag = std::f64::consts::FRAC_1_SQRT_2;
        assert!((o[1].dx - diag).abs() < 1e-12 && (o[1].dy + diag).abs() < 1e-12);
    }

    #[test]
    fn offsets_never_exceed_radius() {
        for points in [3usize, 8, 12, 16, 24] {
            for radius in [1.0, 1.5, 2.0, 3.0] {
                let ring = RingSampler::new(points, radius).expect("valid ring");
                for off in ring.offsets() {
                    assert!(off.dx.abs() <= radius && off.dy.abs() <= radius);
                }
            }
        }
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert_eq!(
            RingSampler::new(0, 1.0).unwrap_err(),
            Error::InvalidPoints { points: 0 }
        );
        assert_eq!(RingSampler::new(8, 0.0).unwrap_err(), Error::InvalidRadius);
    }

    #[test]
    fn safe_region_uses_ceiled_radius() {
        let ring = RingSampler::new(8, 1.5).expect("valid ring");
        assert_eq!(ring.margin(), 2);
        assert_eq!(ring.safe_region(10, 7), Rect::new(2, 2, 6, 3));
        assert!(ring.safe_region(4, 10).is_empty());
    }

    #[test]
    fn samples_on_grid_points_are_exact() {
        let img = Image::from_fn(5, 5, |x, y| (10 * y + x) as u8);
        let view = img.as_view();
        let ring = RingSampler::new(4, 1.0).expect("valid ring");
        let mut out = [0u8; 4];
        ring.sample_into(&view, 2, 2, &mut out).expect("in bounds");
        // east, north, west, south
        assert_eq!(out, [23, 12, 21, 32]);
    }

    #[test]
    fn diagonal_samples_are_interpolated() {
        let mut img = Image::new_fill(3, 3, 0u8);
        *img.as_view_mut().get_mut(2, 0).expect("in bounds") = 200;
        let ring = RingSampler::new(8, 1.0).expect("valid ring");
        let mut out = [0u8; 8];
        ring.sample_into(&img.as_view(), 1, 1, &mut out).expect("in bounds");
        // NE sample at (1.707, 0.293): weight of (2, 0) is 0.707 * 0.707 = 0.5
        assert_eq!(out[1], 100);
        assert_eq!(out[0], 0);
        assert_eq!(out[2], 0);
    }

    #[test]
    fn centers_outside_safe_region_fail_fast() {
        let img = Image::new_fill(5, 5, 9u8);
        let ring = RingSampler::new(8, 1.0).expect("valid ring");
        let mut out = [0u8; 8];
        assert_eq!(
            ring.sample_into(&img.as_view(), 0, 2, &mut out),
            Err(Error::OutOfBounds)
        );
        assert_eq!(
            ring.sample_into(&img.as_view(), 2, 4, &mut out),
            Err(Error::OutOfBounds)
        );
    }
}
