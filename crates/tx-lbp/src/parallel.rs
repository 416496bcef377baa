//! Row-parallel variants of the raster and histogram passes.
//!
//! Output rows are disjoint, so each task owns one row slice and its own
//! encoder scratch. Histograms are built per task and merged by summation.
//! Results are identical to the sequential functions.

use rayon::prelude::*;
use tx_core::{Error, Image, ImageView, Rect};

use crate::config::{FIXED_POINTS, LbpConfig, SamplingMode};
use crate::encode::UniformEncoder;
use crate::histogram::LabelHistogram;
use crate::raster::{
    LabelRaster, encode_fixed_row, encode_ring_row, log_raster_geometry, ring_layout,
};
use crate::ring::RingSampler;

pub fn compute_label_raster_par(
    img: &ImageView<'_, u8>,
    cfg: &LbpConfig,
) -> Result<LabelRaster, Error> {
    cfg.validate()?;
    match &cfg.mode {
        SamplingMode::Interpolated => {
            let ring = RingSampler::new(cfg.points, cfg.radius)?;
            let layout = ring_layout(img.width(), img.height(), &ring, cfg.region);
            log_raster_geometry(img, cfg, &layout);

            let mut labels = Image::<u8>::zeros(layout.width, layout.height);
            let (centers, processed) = (layout.centers, layout.processed);
            if !processed.is_empty() {
                let start = processed.y * layout.width;
                let end = processed.bottom() * layout.width;
                labels.data_mut()[start..end]
                    .par_chunks_mut(layout.width)
                    .enumerate()
                    .try_for_each_init(
                        || {
                            (
                                UniformEncoder::new(ring.points(), cfg.threshold, cfg.scan),
                                vec![0u8; ring.points()],
                            )
                        },
                        |(encoder, samples), (i, row)| {
                            encode_ring_row(
                                img,
                                &ring,
                                encoder,
                                samples,
                                centers.y + i,
                                centers.x..centers.right(),
                                &mut row[processed.x..processed.right()],
                            )
                        },
                    )?;
            }

            Ok(LabelRaster::from_parts(labels, processed, ring.points()))
        }
        SamplingMode::Fixed3x3 { border } => {
            let (w, h) = (img.width(), img.height());
            let mut labels = Image::<u8>::zeros(w, h);
            if w > 0 {
                labels.data_mut().par_chunks_mut(w).enumerate().for_each_init(
                    || UniformEncoder::new(FIXED_POINTS, cfg.threshold, cfg.scan),
                    |encoder, (y, row)| encode_fixed_row(img, border, encoder, y, row),
                );
            }
            Ok(LabelRaster::from_parts(
                labels,
                Rect::new(0, 0, w, h),
                FIXED_POINTS,
            ))
        }
    }
}

impl LabelHistogram {
    /// Parallel [`LabelRaster::histogram`].
    pub fn from_raster_par(raster: &LabelRaster) -> Self {
        let view = raster.processed_view();
        let points = raster.points();
        (0..view.height())
            .into_par_iter()
            .fold(
                || LabelHistogram::new(points),
                |mut hist, y| {
                    hist.accumulate(view.row(y));
                    hist
                },
            )
            .reduce(
                || LabelHistogram::new(points),
                |mut a, b| {
                    a.merge(&b).expect("partial histograms share one length");
                    a
                },
            )
    }
}

#[cfg(test)]
mod tests {
    use tx_core::Image;

    use super::compute_label_raster_par;
    use crate::config::{LbpConfig, RegionPolicy};
    use crate::encode::TransitionScan;
    use crate::histogram::LabelHistogram;
    use crate::raster::compute_label_raster;

    fn texture(w: usize, h: usize) -> Image<u8> {
        Image::from_fn(w, h, |x, y| ((x * 13) ^ (y * 29) ^ (x * y)) as u8)
    }

    #[test]
    fn parallel_matches_sequential() {
        let img = texture(61, 47);
        let configs = [
            LbpConfig::interpolated(8, 1.0),
            LbpConfig::interpolated(16, 2.5).with_scan(TransitionScan::Circular),
            LbpConfig::interpolated(8, 1.0).with_region(RegionPolicy::Legacy),
            LbpConfig::fixed3x3(),
        ];
        for cfg in &configs {
            let seq = compute_label_raster(&img.as_view(), cfg).expect("valid");
            let par = compute_label_raster_par(&img.as_view(), cfg).expect("valid");
            assert_eq!(seq, par);
            assert_eq!(seq.histogram(), LabelHistogram::from_raster_par(&par));
        }
    }

    #[test]
    fn parallel_handles_empty_images() {
        let img = texture(0, 0);
        let raster =
            compute_label_raster_par(&img.as_view(), &LbpConfig::default()).expect("valid");
        assert_eq!(LabelHistogram::from_raster_par(&raster).total(), 0);

        let raster =
            compute_label_raster_par(&img.as_view(), &LbpConfig::fixed3x3()).expect("valid");
        assert_eq!(raster.processed().area(), 0);
    }
}
