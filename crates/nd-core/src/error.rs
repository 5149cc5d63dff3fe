use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    /// Regions are carried in their printed form so the error stays
    /// independent of the dimension count.
    #[error("region ({region}) is not contained in buffered region ({buffered})")]
    RegionOutsideBuffer { region: String, buffered: String },
    #[error("invalid stride along dimension {dim}")]
    InvalidStride { dim: usize },
    #[error("direction {direction} out of range for a {dims}-dimensional image")]
    InvalidDirection { direction: usize, dims: usize },
    #[error("arithmetic overflow while computing buffer extent")]
    Overflow,
}

impl Error {
    pub fn region_outside<R: core::fmt::Display, B: core::fmt::Display>(
        region: &R,
        buffered: &B,
    ) -> Self {
        Self::RegionOutsideBuffer {
            region: region.to_string(),
            buffered: buffered.to_string(),
        }
    }
}
