//! Generation errors.

/// Errors raised while generating demo data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The requested event count exceeds the supported maximum.
    #[error("event count {requested} exceeds the maximum of {max}")]
    TooManyEvents {
        /// The caller's requested count.
        requested: usize,
        /// The supported maximum.
        max: usize,
    },
}
