use tx_core::{Error, ImageView};

use crate::config::MAX_POINTS;

/// Label counts, one bin per label `0..=points + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelHistogram {
    counts: Vec<u64>,
}

impl LabelHistogram {
    pub fn new(points: usize) -> Self {
        Self {
            counts: vec![0; points + 2],
        }
    }

    /// Counts every label of `labels`, rejecting values above `points + 1`.
    pub fn from_labels(labels: &ImageView<'_, u8>, points: usize) -> Result<Self, Error> {
        if points == 0 || points > MAX_POINTS {
            return Err(Error::InvalidPoints { points });
        }

        let mut hist = Self::new(points);
        match labels.as_contiguous_slice() {
            Some(all) => hist.add_all(all)?,
            None => {
                for row in labels.rows() {
                    hist.add_all(row)?;
                }
            }
        }
        Ok(hist)
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn add(&mut self, label: u8) -> Result<(), Error> {
        let max = self.counts.len() - 1;
        match self.counts.get_mut(label as usize) {
            Some(bin) => {
                *bin += 1;
                Ok(())
            }
            None => Err(Error::LabelOutOfRange { label, max }),
        }
    }

    fn add_all(&mut self, labels: &[u8]) -> Result<(), Error> {
        labels.iter().try_for_each(|&l| self.add(l))
    }

    /// Counts labels known to be in range.
    pub(crate) fn accumulate(&mut self, labels: &[u8]) {
        for &l in labels {
            self.counts[l as usize] += 1;
        }
    }

    pub(crate) fn accumulate_view(&mut self, labels: &ImageView<'_, u8>) {
        match labels.as_contiguous_slice() {
            Some(all) => self.accumulate(all),
            None => labels.rows().for_each(|row| self.accumulate(row)),
        }
    }

    /// Adds `other` bin by bin.
    pub fn merge(&mut self, other: &LabelHistogram) -> Result<(), Error> {
        if other.counts.len() != self.counts.len() {
            return Err(Error::HistogramLengthMismatch {
                expected: self.counts.len(),
                actual: other.counts.len(),
            });
        }
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
        Ok(())
    }

    /// Counts divided by their total. An empty histogram normalizes to zeros.
    pub fn normalized(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.counts.len()];
        }
        let total = total as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }
}

/// Normalized histogram of a label view with `points + 2` bins.
pub fn compute_histogram(labels: &ImageView<'_, u8>, points: usize) -> Result<Vec<f64>, Error> {
    Ok(LabelHistogram::from_labels(labels, points)?.normalized())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tx_core::{Error, Image, ImageView};

    use super::{LabelHistogram, compute_histogram};
    use crate::config::LbpConfig;
    use crate::raster::compute_label_raster;

    #[test]
    fn counts_and_normalizes() {
        let labels = Image::from_vec(3, 2, vec![0u8, 9, 9, 4, 4, 4]).expect("valid image");
        let hist = LabelHistogram::from_labels(&labels.as_view(), 8).expect("in range");
        assert_eq!(hist.counts(), &[1, 0, 0, 0, 3, 0, 0, 0, 0, 2]);
        assert_eq!(hist.total(), 6);

        let norm = compute_histogram(&labels.as_view(), 8).expect("in range");
        assert_eq!(norm[4], 0.5);
        assert!((norm[9] - 1.0 / 3.0).abs() < 1e-12);
        assert!((norm.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_area_normalizes_to_zeros() {
        let labels = Image::<u8>::from_vec(0, 3, Vec::new()).expect("empty image");
        let norm = compute_histogram(&labels.as_view(), 8).expect("valid");
        assert_eq!(norm, vec![0.0; 10]);
        assert!(norm.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn rejects_foreign_labels() {
        let labels = Image::from_vec(2, 1, vec![3u8, 10]).expect("valid image");
        assert_eq!(
            compute_histogram(&labels.as_view(), 8).unwrap_err(),
            Error::LabelOutOfRange { label: 10, max: 9 }
        );
        assert_eq!(
            compute_histogram(&labels.as_view(), 0).unwrap_err(),
            Error::InvalidPoints { points: 0 }
        );
    }

    #[test]
    fn padded_views_skip_row_padding() {
        // 200 sits in the padding column and is out of range for P = 8.
        let data = vec![1u8, 2, 200, 9, 9, 200];
        let view = ImageView::from_slice(2, 2, 3, &data).expect("valid view");
        let hist = LabelHistogram::from_labels(&view, 8).expect("padding ignored");
        assert_eq!(hist.counts(), &[0, 1, 1, 0, 0, 0, 0, 0, 0, 2]);

        let mut fast = LabelHistogram::new(8);
        fast.accumulate_view(&view);
        assert_eq!(fast, hist);
    }

    #[test]
    fn merge_sums_bins() {
        let mut a = LabelHistogram::new(2);
        a.add(0).expect("in range");
        a.add(3).expect("in range");
        let mut b = LabelHistogram::new(2);
        b.add(3).expect("in range");
        a.merge(&b).expect("same length");
        assert_eq!(a.counts(), &[1, 0, 0, 2]);

        assert_eq!(
            a.merge(&LabelHistogram::new(8)).unwrap_err(),
            Error::HistogramLengthMismatch {
                expected: 4,
                actual: 10
            }
        );
    }

    proptest! {
        #[test]
        fn proptest_counts_match_processed_pixels(
            w in 0usize..24,
            h in 0usize..24,
            seed in any::<u32>(),
            points in 1usize..20,
            radius in 0.5f64..3.0,
        ) {
            let img = Image::from_fn(w, h, |x, y| {
                (seed.wrapping_mul(2654435761).wrapping_add((x * 31 + y * 17) as u32) >> 11) as u8
            });
            let cfg = LbpConfig::interpolated(points, radius);
            let raster = compute_label_raster(&img.as_view(), &cfg).expect("valid");
            let hist = raster.histogram();

            prop_assert_eq!(hist.num_bins(), points + 2);
            prop_assert_eq!(hist.total(), raster.processed().area() as u64);

            let norm = hist.normalized();
            let sum: f64 = norm.iter().sum();
            if raster.processed().area() == 0 {
                prop_assert!(norm.iter().all(|&v| v == 0.0));
            } else {
                prop_assert!((sum - 1.0).abs() < 1e-9);
                prop_assert!(norm.iter().all(|&v| (0.0..=1.0).contains(&v)));
            }
        }

        #[test]
        fn proptest_fixed_raster_covers_every_pixel(
            data in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let w = 8usize;
            let h = data.len() / w;
            let img = Image::from_vec(w, h, data[..w * h].to_vec()).expect("valid image");
            let raster = compute_label_raster(&img.as_view(), &LbpConfig::fixed3x3())
                .expect("valid");
            let hist = raster.histogram();
            prop_assert_eq!(hist.total(), (w * h) as u64);
            prop_assert!(raster.labels().data().iter().all(|&l| l <= 9));
        }
    }
}
