use tx_core::{BorderMode, Error};

use crate::encode::{ThresholdRule, TransitionScan};

/// Largest supported point count. Labels run up to `points + 1` and are
/// stored as `u8`.
pub const MAX_POINTS: usize = 254;

/// Point count of the fixed 3x3 template.
pub const FIXED_POINTS: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum SamplingMode {
    /// `points` samples on a circle of `radius`, bilinearly interpolated.
    Interpolated,
    /// The eight 3x3 neighbors, read exactly. Out-of-image neighbors resolve
    /// through `border`.
    Fixed3x3 { border: BorderMode<u8> },
}

/// Which centers an interpolated raster visits and where labels land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionPolicy {
    /// Every center of the safe region; `labels[0][0]` is image pixel
    /// `(m, m)` with `m = ceil(radius)`.
    #[default]
    Centered,
    /// Centers in `[m, width - 2m) x [m, height - 2m)`, each label written at
    /// the center's own image coordinate in a `(width - 2m) x (height - 2m)`
    /// raster. Cells outside that range keep label 0 and are excluded from
    /// the processed rectangle. Histogramming the whole label image with
    /// [`crate::compute_histogram`] counts those cells as well, giving the
    /// legacy whole-raster normalization.
    Legacy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LbpConfig {
    pub points: usize,
    pub radius: f64,
    pub mode: SamplingMode,
    pub threshold: ThresholdRule,
    pub scan: TransitionScan,
    pub region: RegionPolicy,
}

impl Default for LbpConfig {
    fn default() -> Self {
        Self::interpolated(FIXED_POINTS, 1.0)
    }
}

impl LbpConfig {
    /// Circular sampling with `>=` thresholding and the truncated transition
    /// scan.
    pub fn interpolated(points: usize, radius: f64) -> Self {
        Self {
            points,
            radius,
            mode: SamplingMode::Interpolated,
            threshold: ThresholdRule::GreaterOrEqual,
            scan: TransitionScan::Truncated,
            region: RegionPolicy::Centered,
        }
    }

    /// 3x3 template with zero fill, `>` thresholding and the open transition
    /// scan.
    pub fn fixed3x3() -> Self {
        Self {
            points: FIXED_POINTS,
            radius: 1.0,
            mode: SamplingMode::Fixed3x3 {
                border: BorderMode::Constant(0),
            },
            threshold: ThresholdRule::Greater,
            scan: TransitionScan::Open,
            region: RegionPolicy::Centered,
        }
    }

    pub fn with_threshold(mut self, threshold: ThresholdRule) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_scan(mut self, scan: TransitionScan) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_region(mut self, region: RegionPolicy) -> Self {
        self.region = region;
        self
    }

    /// Number of ring samples actually taken; the template always has 8.
    pub fn effective_points(&self) -> usize {
        match self.mode {
            SamplingMode::Interpolated => self.points,
            SamplingMode::Fixed3x3 { .. } => FIXED_POINTS,
        }
    }

    /// Histogram length, `effective_points() + 2`.
    pub fn num_bins(&self) -> usize {
        self.effective_points() + 2
    }

    pub fn validate(&self) -> Result<(), Error> {
        if let SamplingMode::Fixed3x3 { .. } = self.mode {
            return Ok(());
        }
        validate_ring(self.points, self.radius)
    }
}

pub(crate) fn validate_ring(points: usize, radius: f64) -> Result<(), Error> {
    if points == 0 || points > MAX_POINTS {
        return Err(Error::InvalidPoints { points });
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(Error::InvalidRadius);
    }
    Ok(())
}
