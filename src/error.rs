//! Error type shared by every layer of the scheme.

use std::collections::TryReserveError;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MorphError>;

/// Everything that can go wrong in the cipher layer.
///
/// None of these are transient: the algebra is deterministic, so retrying
/// the same call fails the same way.
#[derive(Error, Debug)]
pub enum MorphError {
    /// Decryption was asked to reduce a ciphertext with no elements.
    #[error("cannot decrypt an empty ciphertext")]
    EmptyCiphertext,

    /// A coefficient handed to the bit decoder was not reduced mod 2.
    #[error("coefficient {index} = {value} is not in {{-1, 0, 1}}; decode needs a mod-2 reduced element")]
    UnreducedCoefficient {
        /// Coefficient position.
        index: usize,
        /// Offending value.
        value: i64,
    },

    /// A slot below the logical size of a ciphertext holds no element.
    #[error("ciphertext slot {index} is not materialized")]
    MissingElement {
        /// Empty slot position.
        index: usize,
    },

    /// Operands were created under different ring contexts.
    #[error("operands belong to different ring contexts")]
    ContextMismatch,

    /// Rejected configuration.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Growing a ciphertext or creating a ring element failed to allocate.
    ///
    /// Covers container growth and fresh zero elements; arithmetic on
    /// existing elements still allocates infallibly.
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

impl MorphError {
    /// Misuse by the caller rather than a property of the data or environment.
    #[must_use]
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            Self::EmptyCiphertext | Self::UnreducedCoefficient { .. } | Self::MissingElement { .. }
        )
    }
}
