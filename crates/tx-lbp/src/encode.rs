//! Thresholding and uniform-pattern labelling of ring signatures.

/// Comparison that turns a neighbor intensity into a signature bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdRule {
    /// Bit is set when `neighbor >= center`.
    GreaterOrEqual,
    /// Bit is set when `neighbor > center`.
    Greater,
}

impl ThresholdRule {
    #[inline]
    pub fn bit(self, neighbor: u8, center: u8) -> bool {
        match self {
            Self::GreaterOrEqual => neighbor >= center,
            Self::Greater => neighbor > center,
        }
    }
}

/// Which adjacent bit pairs count toward the transition total.
///
/// For a signature `b[0..P]`:
/// - `Truncated` compares `b[i]` with `b[i + 1]` for `i in 0..P-2`, leaving
///   out both the last pair and the wrap-around.
/// - `Open` compares every adjacent pair `i in 0..P-1`, without wrap-around.
/// - `Circular` also compares `b[P - 1]` with `b[0]`.
///
/// The ring path defaults to `Truncated` and the 3x3 path to `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionScan {
    Truncated,
    Open,
    Circular,
}

pub fn count_transitions(bits: &[bool], scan: TransitionScan) -> usize {
    let n = bits.len();
    let pairs = match scan {
        TransitionScan::Truncated => n.saturating_sub(2),
        TransitionScan::Open => n.saturating_sub(1),
        TransitionScan::Circular => n,
    };

    (0..pairs)
        .filter(|&i| bits[i] != bits[(i + 1) % n])
        .count()
}

/// Label of a signature: its popcount when it has at most two transitions,
/// `bits.len() + 1` otherwise.
pub fn uniform_label(bits: &[bool], scan: TransitionScan) -> u8 {
    if count_transitions(bits, scan) <= 2 {
        bits.iter().filter(|&&b| b).count() as u8
    } else {
        (bits.len() + 1) as u8
    }
}

/// Raw 8-bit code of a 3x3 neighborhood, without the uniform collapse.
///
/// Neighbor `i` in template order sets bit `7 - i`: the top-left neighbor is
/// the most significant bit and the left neighbor the least.
pub fn raw_code_3x3(center: u8, neighbors: &[u8; 8], threshold: ThresholdRule) -> u8 {
    neighbors
        .iter()
        .fold(0u8, |code, &n| (code << 1) | u8::from(threshold.bit(n, center)))
}

/// Reusable encoder holding the signature scratch buffer for one ring size.
#[derive(Debug, Clone)]
pub struct UniformEncoder {
    threshold: ThresholdRule,
    scan: TransitionScan,
    bits: Vec<bool>,
}

impl UniformEncoder {
    pub fn new(points: usize, threshold: ThresholdRule, scan: TransitionScan) -> Self {
        Self {
            threshold,
            scan,
            bits: vec![false; points],
        }
    }

    pub fn points(&self) -> usize {
        self.bits.len()
    }

    /// Signature bits of the most recent [`UniformEncoder::encode`] call.
    pub fn signature(&self) -> &[bool] {
        &self.bits
    }

    /// Thresholds `neighbors` against `center` and returns the label.
    ///
    /// `neighbors.len()` must equal [`UniformEncoder::points`].
    pub fn encode(&mut self, center: u8, neighbors: &[u8]) -> u8 {
        debug_assert_eq!(neighbors.len(), self.bits.len());
        for (bit, &n) in self.bits.iter_mut().zip(neighbors) {
            *bit = self.threshold.bit(n, center);
        }
        uniform_label(&self.bits, self.scan)
    }
}
