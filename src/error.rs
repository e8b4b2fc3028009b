use thiserror::Error;

/// Errors raised while assembling a model instance.
///
/// All of these are construction-time failures. Once a [`crate::model::Model`]
/// exists, the only remaining failure modes are the terminal solver statuses
/// in [`crate::solve::SolveError`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// An accessor or variable lookup received an index outside its declared
    /// dimension. Indices are never clamped.
    #[error("{subject}: {axis} index {index} out of range (dimension is {bound})")]
    IndexOutOfRange {
        /// The table or variable family that was indexed.
        subject: &'static str,
        /// Which axis the offending index belongs to.
        axis: &'static str,
        index: usize,
        bound: usize,
    },

    /// Two components disagree on the size of the index sets.
    #[error("{subject}: expected dimensions {expected:?}, got {actual:?}")]
    InvalidDimension {
        subject: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// The cost/time trade-off weight lies outside `[0, 1]`.
    #[error("trade-off weight alpha must lie in [0, 1], got {0}")]
    InvalidAlpha(f64),
}
