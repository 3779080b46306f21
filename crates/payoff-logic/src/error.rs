//! Error taxonomy for payoff analysis

use thiserror::Error;

/// Errors raised while assembling or normalizing tournament statistics.
///
/// All variants are detected at the boundary of the stage that first needs
/// the data and propagate to the caller; a missing or malformed cell fails
/// the whole analysis rather than silently skipping it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PayoffError {
    /// An action token outside the recognized C/D alphabet.
    #[error("invalid action: {0:?}")]
    InvalidAction(String),
    /// A required player pairing is absent from the interaction set.
    #[error("missing interaction for pairing ({i}, {j})")]
    MissingInteraction { i: usize, j: usize },
    /// Tables disagree in dimensions or repetition count.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    /// A normalizer was handed a zero round or opponent count.
    #[error("division by zero: {0}")]
    DivideByZero(String),
}
