//! Keyed BLAKE2s-256 tag and its constant-time check

use blake2::{Blake2sMac256, digest::Mac};
use subtle::ConstantTimeEq;

use super::keystream::{MacSubkey, NONCE_SIZE};

/// Tag size in bytes
pub const TAG_SIZE: usize = 32;

/// Compute the tag over `nonce || ciphertext` keyed with the MAC subkey.
///
/// This is BLAKE2s in keyed mode (the key is folded into the first block),
/// not HMAC-BLAKE2s.
pub fn compute_tag(
    subkey: &MacSubkey,
    nonce: &[u8; NONCE_SIZE],
    ciphertext: &[u8],
) -> [u8; TAG_SIZE] {
    let Ok(mut mac) = Blake2sMac256::new_from_slice(subkey.as_bytes()) else {
        unreachable!("BLAKE2s accepts keys up to 32 bytes");
    };
    mac.update(nonce);
    mac.update(ciphertext);
    let result = mac.finalize().into_bytes();

    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&result);
    tag
}

/// Compare two tags in constant time.
///
/// Running time depends only on [`TAG_SIZE`], never on where the tags first
/// differ. This is the only equality check applied to tags.
pub fn tags_match(expected: &[u8; TAG_SIZE], received: &[u8; TAG_SIZE]) -> bool {
    expected.as_slice().ct_eq(received.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::{super::keystream::derive_mac_subkey, *};

    fn subkey() -> MacSubkey {
        derive_mac_subkey(&[0u8; 32], &[0u8; NONCE_SIZE])
    }

    #[test]
    fn tag_is_deterministic() {
        let key = subkey();
        let nonce = [0x01; NONCE_SIZE];

        let a = compute_tag(&key, &nonce, b"payload");
        let b = compute_tag(&key, &nonce, b"payload");

        assert_eq!(a, b);
    }

    #[test]
    fn tag_binds_nonce() {
        let key = subkey();
        let a = compute_tag(&key, &[0x01; NONCE_SIZE], b"payload");
        let b = compute_tag(&key, &[0x02; NONCE_SIZE], b"payload");
        assert_ne!(a, b);
    }

    #[test]
    fn tag_binds_ciphertext() {
        let key = subkey();
        let nonce = [0x01; NONCE_SIZE];
        let a = compute_tag(&key, &nonce, b"payload");
        let b = compute_tag(&key, &nonce, b"paylobd");
        assert_ne!(a, b);
    }

    #[test]
    fn tag_binds_subkey() {
        let nonce = [0x01; NONCE_SIZE];
        let other = derive_mac_subkey(&[0xFF; 32], &[0u8; NONCE_SIZE]);

        let a = compute_tag(&subkey(), &nonce, b"payload");
        let b = compute_tag(&other, &nonce, b"payload");

        assert_ne!(a, b);
    }

    #[test]
    fn tag_over_empty_ciphertext() {
        let tag = compute_tag(&subkey(), &[0u8; NONCE_SIZE], &[]);
        assert_eq!(tag.len(), TAG_SIZE);
    }

    #[test]
    fn equal_tags_match() {
        let tag = [0xA5; TAG_SIZE];
        let copy = tag;
        assert!(tags_match(&tag, &copy));
    }

    #[test]
    fn tags_differing_anywhere_do_not_match() {
        let tag = [0xA5; TAG_SIZE];
        for position in [0, TAG_SIZE / 2, TAG_SIZE - 1] {
            let mut other = tag;
            other[position] ^= 0x01;
            assert!(!tags_match(&tag, &other), "difference at byte {position} must be detected");
        }
    }
}
