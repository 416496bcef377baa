use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    OutOfBounds,
    InvalidStride,
    InvalidPoints { points: usize },
    InvalidRadius,
    LabelOutOfRange { label: u8, max: usize },
    HistogramLengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::InvalidStride => write!(f, "invalid stride"),
            Self::InvalidPoints { points } => {
                write!(f, "invalid point count {points}: expected 1..=254")
            }
            Self::InvalidRadius => write!(f, "invalid radius: expected a finite value > 0"),
            Self::LabelOutOfRange { label, max } => {
                write!(f, "label {label} out of range: expected at most {max}")
            }
            Self::HistogramLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "histogram length mismatch: expected {expected} bins, got {actual}"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_names_offending_values() {
        assert_eq!(
            Error::InvalidPoints { points: 0 }.to_string(),
            "invalid point count 0: expected 1..=254"
        );
        assert_eq!(
            Error::LabelOutOfRange { label: 12, max: 9 }.to_string(),
            "label 12 out of range: expected at most 9"
        );
    }
}
