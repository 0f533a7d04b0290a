//! Fuzz target for opening untrusted bytes
//!
//! Feeds raw fuzzer input straight into `open`.
//!
//! # Invariants
//!
//! - `open` never panics on any input
//! - Inputs shorter than 56 bytes are malformed
//! - Random inputs never authenticate

#![no_main]

use libfuzzer_sys::fuzz_target;
use sealframe_crypto::{CipherError, MIN_BLOB_SIZE, SealedCipher};

fuzz_target!(|data: &[u8]| {
    let cipher = SealedCipher::from_key([0x5A; 32]);

    match cipher.open(data) {
        Err(CipherError::MalformedInput { actual, minimum }) => {
            assert_eq!(actual, data.len());
            assert_eq!(minimum, MIN_BLOB_SIZE);
            assert!(data.len() < MIN_BLOB_SIZE);
        },
        Err(CipherError::AuthenticationFailed) => {
            assert!(data.len() >= MIN_BLOB_SIZE);
        },
        Err(other) => unreachable!("open cannot fail with {other:?}"),
        Ok(_) => unreachable!("random input must not authenticate"),
    }
});
