//! Math error types.

/// Degenerate numeric input that would otherwise produce NaN or infinities.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MathError {
    /// A vector with zero (or non-finite) length was normalized.
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    /// `near` and `far` planes coincide.
    #[error("near and far planes coincide")]
    DegenerateDepthRange,

    /// Aspect ratio is zero, negative or not finite.
    #[error("aspect ratio must be positive, got {0}")]
    InvalidAspect(f32),
}
