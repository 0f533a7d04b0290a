//! The sealed-blob cipher: `XChaCha20` encryption with a keyed BLAKE2s tag
//!
//! Blob layout:
//!
//! ```text
//! [0 .. 24)          nonce              (random, public)
//! [24 .. 24+n)       encrypted payload  (n = plaintext length)
//! [24+n .. 24+n+32)  tag                (BLAKE2s-256 over nonce || payload)
//! ```

use rand::{CryptoRng, RngCore, rngs::OsRng};
use zeroize::Zeroize;

use super::{
    error::CipherError,
    keystream::{KEY_SIZE, NONCE_SIZE, PAYLOAD_BLOCK, apply_keystream, derive_mac_subkey},
    tag::{TAG_SIZE, compute_tag, tags_match},
};

/// Bytes a sealed blob adds on top of the plaintext (nonce + tag)
pub const OVERHEAD: usize = NONCE_SIZE + TAG_SIZE;

/// Smallest valid blob: the seal of an empty plaintext
pub const MIN_BLOB_SIZE: usize = OVERHEAD;

/// Length of the blob produced by sealing `plaintext_len` bytes.
pub fn sealed_len(plaintext_len: usize) -> usize {
    plaintext_len + OVERHEAD
}

/// Length of the plaintext inside a blob of `blob_len` bytes, or `None` if
/// the blob is too short to be well formed.
pub fn opened_len(blob_len: usize) -> Option<usize> {
    blob_len.checked_sub(OVERHEAD)
}

/// Symmetric cipher bound to one 32-byte key.
///
/// [`seal`](Self::seal) and [`open`](Self::open) are independent,
/// stateless calls: each builds its own nonce, MAC subkey and keystream
/// context, so a single instance can be shared across threads.
///
/// # Security
///
/// - A fresh random nonce is drawn for every seal. Callers must not seal
///   with a deterministic RNG in production: a repeated nonce under the same
///   key breaks both confidentiality and integrity.
/// - The MAC subkey is the first half of keystream block 0; payload
///   encryption starts at block 1, so the two never share keystream.
/// - No plaintext is released until the tag has been verified in constant
///   time.
/// - This mirrors the `ChaCha20-Poly1305` subkey pattern with a different
///   MAC. It has no published security proof of its own.
pub struct SealedCipher {
    key: [u8; KEY_SIZE],
}

impl SealedCipher {
    /// Create a cipher from untyped key material.
    ///
    /// # Errors
    ///
    /// - `InvalidKeySize`: If `key` is not exactly 32 bytes
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        let key: [u8; KEY_SIZE] = key
            .try_into()
            .map_err(|_| CipherError::InvalidKeySize { expected: KEY_SIZE, actual: key.len() })?;

        Ok(Self::from_key(key))
    }

    /// Create a cipher from a key that is already the right size.
    pub fn from_key(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Nonce length carried at the front of every blob.
    pub fn nonce_size(&self) -> usize {
        NONCE_SIZE
    }

    /// Bytes added to the plaintext by sealing.
    pub fn overhead(&self) -> usize {
        OVERHEAD
    }

    /// Encrypt and authenticate `plaintext` with a nonce from the operating
    /// system's CSPRNG.
    ///
    /// # Errors
    ///
    /// - `RandomSource`: If the OS entropy source fails. No blob is produced.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.seal_with_rng(&mut OsRng, plaintext)
    }

    /// Encrypt and authenticate `plaintext` with a nonce drawn from `rng`.
    ///
    /// Same as [`seal`](Self::seal) with a caller-provided entropy source.
    ///
    /// # Errors
    ///
    /// - `RandomSource`: If `rng` fails to produce the nonce
    pub fn seal_with_rng<R>(&self, rng: &mut R, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut nonce = [0u8; NONCE_SIZE];
        if let Err(err) = rng.try_fill_bytes(&mut nonce) {
            tracing::error!(error = %err, "entropy source failed while generating nonce");
            return Err(err.into());
        }

        let subkey = derive_mac_subkey(&self.key, &nonce);

        let mut blob = Vec::with_capacity(sealed_len(plaintext.len()));
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(plaintext);
        apply_keystream(&self.key, &nonce, PAYLOAD_BLOCK, &mut blob[NONCE_SIZE..]);

        let tag = compute_tag(&subkey, &nonce, &blob[NONCE_SIZE..]);
        blob.extend_from_slice(&tag);

        Ok(blob)
    }

    /// Verify and decrypt a blob produced by [`seal`](Self::seal) under the
    /// same key.
    ///
    /// # Errors
    ///
    /// - `MalformedInput`: If the blob is shorter than [`MIN_BLOB_SIZE`]
    /// - `AuthenticationFailed`: If the tag does not verify (wrong key or any
    ///   modification of nonce, payload or tag)
    pub fn open(&self, blob: &[u8]) -> Result<Vec<u8>, CipherError> {
        if blob.len() < MIN_BLOB_SIZE {
            tracing::debug!(
                len = blob.len(),
                minimum = MIN_BLOB_SIZE,
                "rejecting blob shorter than nonce and tag"
            );
            return Err(CipherError::MalformedInput { actual: blob.len(), minimum: MIN_BLOB_SIZE });
        }

        let Some((nonce, rest)) = blob.split_first_chunk::<NONCE_SIZE>() else {
            return Err(CipherError::MalformedInput { actual: blob.len(), minimum: MIN_BLOB_SIZE });
        };
        let Some((ciphertext, received_tag)) = rest.split_last_chunk::<TAG_SIZE>() else {
            return Err(CipherError::MalformedInput { actual: blob.len(), minimum: MIN_BLOB_SIZE });
        };

        let subkey = derive_mac_subkey(&self.key, nonce);
        let expected_tag = compute_tag(&subkey, nonce, ciphertext);

        if !tags_match(&expected_tag, received_tag) {
            tracing::debug!(len = blob.len(), "rejecting blob: authentication failed");
            return Err(CipherError::AuthenticationFailed);
        }

        let mut plaintext = ciphertext.to_vec();
        apply_keystream(&self.key, nonce, PAYLOAD_BLOCK, &mut plaintext);

        Ok(plaintext)
    }
}

impl std::fmt::Debug for SealedCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealedCipher").field("key", &"<redacted>").finish()
    }
}

impl Drop for SealedCipher {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}
