//! Error types for sealed-blob operations

use thiserror::Error;

/// Errors from constructing a [`crate::SealedCipher`] or sealing/opening a
/// blob.
///
/// Every ciphertext-level failure (bad nonce, bad payload, bad tag, wrong key)
/// collapses into [`CipherError::AuthenticationFailed`] so callers cannot
/// learn which part of the blob was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Key material was not exactly [`crate::KEY_SIZE`] bytes
    #[error("invalid key size: expected {expected}, got {actual}")]
    InvalidKeySize {
        /// Required key length
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// The entropy source failed while generating a nonce
    #[error("random source failure: {reason}")]
    RandomSource {
        /// Description reported by the entropy source
        reason: String,
    },

    /// Blob is too short to hold a nonce and a tag
    #[error("malformed input: {actual} bytes, need at least {minimum}")]
    MalformedInput {
        /// Length of the rejected blob
        actual: usize,
        /// Smallest acceptable blob length
        minimum: usize,
    },

    /// Tag did not verify under this key
    #[error("authentication failed")]
    AuthenticationFailed,
}

impl CipherError {
    /// Returns true if this error is fatal for the given input.
    ///
    /// Only an entropy failure is transient: the same call may succeed once
    /// the system entropy source recovers. Everything else is a property of
    /// the key or blob and will fail identically on retry.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::InvalidKeySize { .. } => true,
            Self::MalformedInput { .. } => true,
            Self::AuthenticationFailed => true,

            Self::RandomSource { .. } => false,
        }
    }
}

impl From<rand::Error> for CipherError {
    fn from(err: rand::Error) -> Self {
        Self::RandomSource { reason: err.to_string() }
    }
}
