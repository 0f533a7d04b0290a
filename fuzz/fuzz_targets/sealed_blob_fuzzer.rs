//! Fuzz target for sealing and opening blobs
//!
//! Seals arbitrary payloads, then replays the blob through a sequence of
//! adversarial mutations.
//!
//! # Invariants
//!
//! - Sealing never fails with the OS entropy source
//! - Blob length is always plaintext length + 56
//! - An unmodified blob opens to the original plaintext
//! - Any modified blob is rejected, never opened to different plaintext
//! - Blobs shorter than 56 bytes are reported as malformed
//! - A blob never opens under a different key

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sealframe_crypto::{CipherError, MIN_BLOB_SIZE, SealedCipher, sealed_len};

#[derive(Debug, Clone, Arbitrary)]
struct SealScenario {
    key: [u8; 32],
    plaintext: Vec<u8>,
    mutations: Vec<Mutation>,
}

#[derive(Debug, Clone, Arbitrary)]
enum Mutation {
    /// Flip one bit (position wraps around the blob)
    FlipBit { position: u16, bit: u8 },
    /// Keep only a prefix
    Truncate { keep: u16 },
    /// Append trailing bytes
    Extend { bytes: Vec<u8> },
    /// Open under a different key
    OtherKey { key: [u8; 32] },
}

fuzz_target!(|scenario: SealScenario| {
    let cipher = SealedCipher::from_key(scenario.key);

    // INVARIANT 1: Sealing never fails with the OS entropy source
    let blob = cipher.seal(&scenario.plaintext).unwrap();

    // INVARIANT 2: Blob length is plaintext + nonce + tag
    assert_eq!(blob.len(), sealed_len(scenario.plaintext.len()));

    // INVARIANT 3: Unmodified blob round-trips
    assert_eq!(cipher.open(&blob).unwrap(), scenario.plaintext);

    for mutation in scenario.mutations {
        match mutation {
            Mutation::FlipBit { position, bit } => {
                let mut tampered = blob.clone();
                let index = usize::from(position) % tampered.len();
                tampered[index] ^= 1 << (bit % 8);

                // INVARIANT 4: Any bit flip fails authentication
                assert_eq!(cipher.open(&tampered), Err(CipherError::AuthenticationFailed));
            },

            Mutation::Truncate { keep } => {
                let keep = usize::from(keep) % blob.len();
                let result = cipher.open(&blob[..keep]);

                // INVARIANT 5: Short blobs are malformed, longer prefixes fail auth
                if keep < MIN_BLOB_SIZE {
                    assert!(matches!(result, Err(CipherError::MalformedInput { .. })));
                } else {
                    assert_eq!(result, Err(CipherError::AuthenticationFailed));
                }
            },

            Mutation::Extend { bytes } => {
                if bytes.is_empty() {
                    continue;
                }
                let mut extended = blob.clone();
                extended.extend_from_slice(&bytes);

                // INVARIANT 6: Trailing bytes shift the tag and fail auth
                assert_eq!(cipher.open(&extended), Err(CipherError::AuthenticationFailed));
            },

            Mutation::OtherKey { key } => {
                if key == scenario.key {
                    continue;
                }
                let other = SealedCipher::from_key(key);

                // INVARIANT 7: Wrong key never opens the blob
                assert_eq!(other.open(&blob), Err(CipherError::AuthenticationFailed));
            },
        }
    }
});
