use std::ops::Range;

use log::{debug, warn};
use tx_core::{BorderMode, Error, Image, ImageView, Rect};

use crate::config::{FIXED_POINTS, LbpConfig, RegionPolicy, SamplingMode};
use crate::encode::{ThresholdRule, TransitionScan, UniformEncoder, raw_code_3x3};
use crate::histogram::LabelHistogram;
use crate::ring::RingSampler;
use crate::template::neighbors_3x3;

/// Per-pixel uniform LBP labels.
///
/// Only cells inside [`LabelRaster::processed`] hold computed labels; other
/// cells are 0 and never reach the histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRaster {
    labels: Image<u8>,
    processed: Rect,
    points: usize,
}

impl LabelRaster {
    pub fn labels(&self) -> &Image<u8> {
        &self.labels
    }

    pub fn into_labels(self) -> Image<u8> {
        self.labels
    }

    /// Raster cells that were computed, in raster coordinates.
    pub fn processed(&self) -> Rect {
        self.processed
    }

    pub fn processed_view(&self) -> ImageView<'_, u8> {
        self.labels
            .as_view()
            .subview(self.processed)
            .expect("processed region lies inside the raster")
    }

    pub fn points(&self) -> usize {
        self.points
    }

    /// `points + 2`: labels `0..=points` are uniform, `points + 1` is the
    /// non-uniform bin.
    pub fn num_bins(&self) -> usize {
        self.points + 2
    }

    /// Counts over [`LabelRaster::processed`] only. Under
    /// [`RegionPolicy::Legacy`] the zero cells around it are left out;
    /// `compute_histogram(&raster.labels().as_view(), raster.points())`
    /// counts them too and normalizes by the whole raster.
    pub fn histogram(&self) -> LabelHistogram {
        let mut hist = LabelHistogram::new(self.points);
        hist.accumulate_view(&self.processed_view());
        hist
    }

    pub fn normalized_histogram(&self) -> Vec<f64> {
        self.histogram().normalized()
    }
}

/// Computes the label raster for `cfg`.
///
/// Interpolated mode visits the safe region of the ring (see
/// [`RingSampler::safe_region`]) and returns a raster of
/// `(width - 2m) x (height - 2m)` with `m = ceil(radius)`. Images too small
/// for the ring give an empty raster. The fixed 3x3 mode returns a raster of
/// the image's size.
pub fn compute_label_raster(
    img: &ImageView<'_, u8>,
    cfg: &LbpConfig,
) -> Result<LabelRaster, Error> {
    cfg.validate()?;
    match &cfg.mode {
        SamplingMode::Interpolated => {
            let ring = RingSampler::new(cfg.points, cfg.radius)?;
            interpolated_raster(img, &ring, cfg)
        }
        SamplingMode::Fixed3x3 { border } => Ok(fixed_raster(img, border, cfg.threshold, cfg.scan)),
    }
}

/// 3x3 labels for every pixel, with zero-filled out-of-image neighbors, `>`
/// thresholding and the open transition scan.
pub fn compute_label_raster_fixed3x3(img: &ImageView<'_, u8>) -> LabelRaster {
    fixed_raster(
        img,
        &BorderMode::Constant(0),
        ThresholdRule::Greater,
        TransitionScan::Open,
    )
}

/// Raw 8-bit 3x3 codes (see [`raw_code_3x3`]) for every pixel whose eight
/// neighbors lie inside the image.
///
/// The result is `(width - 2) x (height - 2)` with `codes[0][0]` at image
/// `(1, 1)`. Codes span `0..=255` and are not collapsed to uniform labels.
pub fn compute_code_raster_3x3(img: &ImageView<'_, u8>, threshold: ThresholdRule) -> Image<u8> {
    let inner = Rect::inset(img.width(), img.height(), 1);
    let mut codes = Image::<u8>::zeros(inner.width, inner.height);
    let mut neighbors = [0u8; FIXED_POINTS];
    {
        let mut out = codes.as_view_mut();
        for (ry, y) in (inner.y..inner.bottom()).enumerate() {
            let src = img.row(y);
            for (dst, x) in out.row_mut(ry).iter_mut().zip(inner.x..inner.right()) {
                neighbors_3x3(img, x, y, &BorderMode::Constant(0), &mut neighbors);
                *dst = raw_code_3x3(src[x], &neighbors, threshold);
            }
        }
    }
    codes
}

/// Label raster followed by its normalized histogram.
pub fn lbp_histogram(img: &ImageView<'_, u8>, cfg: &LbpConfig) -> Result<Vec<f64>, Error> {
    Ok(compute_label_raster(img, cfg)?.normalized_histogram())
}

/// Where an interpolated raster reads centers from and writes labels to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RingLayout {
    pub width: usize,
    pub height: usize,
    /// Visited centers, image coordinates.
    pub centers: Rect,
    /// Written cells, raster coordinates. Same size as `centers`.
    pub processed: Rect,
}

pub(crate) fn ring_layout(
    width: usize,
    height: usize,
    ring: &RingSampler,
    region: RegionPolicy,
) -> RingLayout {
    let m = ring.margin();
    let out_w = width.saturating_sub(m.saturating_mul(2));
    let out_h = height.saturating_sub(m.saturating_mul(2));

    let centers = match region {
        RegionPolicy::Centered => ring.safe_region(width, height),
        RegionPolicy::Legacy => {
            Rect::new(m, m, out_w.saturating_sub(m), out_h.saturating_sub(m))
        }
    };

    let processed = if centers.is_empty() {
        Rect::default()
    } else {
        match region {
            RegionPolicy::Centered => Rect::new(0, 0, centers.width, centers.height),
            RegionPolicy::Legacy => centers,
        }
    };

    RingLayout {
        width: out_w,
        height: out_h,
        centers,
        processed,
    }
}

pub(crate) fn encode_ring_row(
    img: &ImageView<'_, u8>,
    ring: &RingSampler,
    encoder: &mut UniformEncoder,
    samples: &mut [u8],
    y: usize,
    xs: Range<usize>,
    out: &mut [u8],
) -> Result<(), Error> {
    let src = img.row(y);
    for (dst, x) in out.iter_mut().zip(xs) {
        ring.sample_into(img, x, y, samples)?;
        *dst = encoder.encode(src[x], samples);
    }
    Ok(())
}

pub(crate) fn encode_fixed_row(
    img: &ImageView<'_, u8>,
    border: &BorderMode<u8>,
    encoder: &mut UniformEncoder,
    y: usize,
    out: &mut [u8],
) {
    let src = img.row(y);
    let mut neighbors = [0u8; FIXED_POINTS];
    for (x, dst) in out.iter_mut().enumerate() {
        neighbors_3x3(img, x, y, border, &mut neighbors);
        *dst = encoder.encode(src[x], &neighbors);
    }
}

pub(crate) fn log_raster_geometry(
    img: &ImageView<'_, u8>,
    cfg: &LbpConfig,
    layout: &RingLayout,
) {
    debug!(
        "lbp raster: {}x{} image, P={} R={} -> {}x{} labels, {} processed",
        img.width(),
        img.height(),
        cfg.points,
        cfg.radius,
        layout.width,
        layout.height,
        layout.processed.area()
    );
    if layout.centers.is_empty() {
        warn!(
            "image {}x{} is too small for a ring of radius {}; raster has no labels",
            img.width(),
            img.height(),
            cfg.radius
        );
    }
}

fn interpolated_raster(
    img: &ImageView<'_, u8>,
    ring: &RingSampler,
    cfg: &LbpConfig,
) -> Result<LabelRaster, Error> {
    let layout = ring_layout(img.width(), img.height(), ring, cfg.region);
    log_raster_geometry(img, cfg, &layout);

    let mut labels = Image::<u8>::zeros(layout.width, layout.height);
    let mut encoder = UniformEncoder::new(ring.points(), cfg.threshold, cfg.scan);
    let mut samples = vec![0u8; ring.points()];
    let RingLayout {
        centers, processed, ..
    } = layout;

    {
        let mut out = labels.as_view_mut();
        for (ry, y) in (processed.y..processed.bottom()).zip(centers.y..centers.bottom()) {
            let row = &mut out.row_mut(ry)[processed.x..processed.right()];
            encode_ring_row(
                img,
                ring,
                &mut encoder,
                &mut samples,
                y,
                centers.x..centers.right(),
                row,
            )?;
        }
    }

    Ok(LabelRaster {
        labels,
        processed,
        points: ring.points(),
    })
}

fn fixed_raster(
    img: &ImageView<'_, u8>,
    border: &BorderMode<u8>,
    threshold: ThresholdRule,
    scan: TransitionScan,
) -> LabelRaster {
    debug!("lbp 3x3 raster: {}x{} image", img.width(), img.height());

    let mut labels = Image::<u8>::zeros(img.width(), img.height());
    let mut encoder = UniformEncoder::new(FIXED_POINTS, threshold, scan);
    {
        let mut out = labels.as_view_mut();
        for y in 0..img.height() {
            encode_fixed_row(img, border, &mut encoder, y, out.row_mut(y));
        }
    }

    LabelRaster {
        labels,
        processed: Rect::new(0, 0, img.width(), img.height()),
        points: FIXED_POINTS,
    }
}

impl LabelRaster {
    pub(crate) fn from_parts(labels: Image<u8>, processed: Rect, points: usize) -> Self {
        Self {
            labels,
            processed,
            points,
        }
    }
}
