//! Sealed blobs: `XChaCha20` confidentiality with a keyed BLAKE2s tag.
//!
//! A blob is `nonce || ciphertext || tag`. For each message the cipher
//! derives a MAC subkey from keystream block 0, encrypts the payload with
//! the keystream from block 1 onward, and tags the nonce and ciphertext
//! with BLAKE2s-256 under that subkey.
//!
//! # Security
//!
//! Nonces are random and 24 bytes long, so collisions are negligible across
//! any realistic number of messages under one key. Opening verifies the tag
//! in constant time before any plaintext is produced, and every tampering
//! outcome is reported as the same error.

pub mod cipher;
pub mod error;
pub mod keystream;
pub mod tag;

pub use cipher::{MIN_BLOB_SIZE, OVERHEAD, SealedCipher, opened_len, sealed_len};
pub use error::CipherError;
pub use keystream::{
    BLOCK_SIZE, KEY_SIZE, MAC_KEY_BLOCK, MacSubkey, NONCE_SIZE, PAYLOAD_BLOCK, apply_keystream,
    derive_mac_subkey, keystream,
};
pub use tag::{TAG_SIZE, compute_tag, tags_match};
