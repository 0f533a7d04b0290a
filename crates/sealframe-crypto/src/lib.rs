//! Sealframe Cryptographic Primitives
//!
//! A self-contained sealed-blob cipher built from `XChaCha20` and keyed
//! BLAKE2s-256. One call seals a payload under a 32-byte key into a single
//! blob carrying its own nonce and tag. One call opens it again.
//!
//! ```text
//! Key + random Nonce
//!        │
//!        ▼
//! XChaCha20 block 0 → MAC Subkey
//!        │
//!        ▼
//! XChaCha20 block 1.. ⊕ Plaintext → Ciphertext
//!        │
//!        ▼
//! BLAKE2s(MAC Subkey, Nonce ∥ Ciphertext) → Tag
//!        │
//!        ▼
//! Nonce ∥ Ciphertext ∥ Tag
//! ```
//!
//! # Security
//!
//! Confidentiality:
//! - Fresh 24-byte random nonce per seal; a repeated nonce under the same
//!   key is a catastrophic misuse
//! - Payload keystream starts at block 1 and never overlaps the subkey block
//!
//! Integrity:
//! - Tag covers both nonce and ciphertext
//! - Tags are compared in constant time
//! - Any modification, truncation or wrong key -> `AuthenticationFailed`,
//!   with no plaintext released
//!
//! Key hygiene:
//! - The cipher key and per-message MAC subkeys are zeroized on drop
//! - Logging reports lengths only, never key material or contents
//!
//! The construction follows the `ChaCha20-Poly1305` one-time-key pattern but
//! with BLAKE2s as the MAC. It has not been formally analysed on its own.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod sealed;

pub use sealed::{
    CipherError, KEY_SIZE, MIN_BLOB_SIZE, NONCE_SIZE, OVERHEAD, SealedCipher, TAG_SIZE,
    keystream, opened_len, sealed_len,
};
