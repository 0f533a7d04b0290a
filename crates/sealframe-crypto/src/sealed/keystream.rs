//! XChaCha20 keystream addressed by block index
//!
//! Every call builds a fresh cipher context from `(key, nonce)` and seeks to
//! the requested block, so no counter state is shared between the MAC subkey
//! derivation and payload encryption.

use chacha20::{
    XChaCha20,
    cipher::{KeyIvInit, StreamCipher, StreamCipherSeek},
};
use zeroize::Zeroize;

/// Key size in bytes
pub const KEY_SIZE: usize = 32;

/// Extended nonce size in bytes
pub const NONCE_SIZE: usize = 24;

/// `ChaCha20` block size in bytes
pub const BLOCK_SIZE: usize = 64;

/// Keystream block that yields the MAC subkey
pub const MAC_KEY_BLOCK: u32 = 0;

/// First keystream block used for the payload
pub const PAYLOAD_BLOCK: u32 = 1;

/// Size of the derived MAC subkey in bytes
const MAC_SUBKEY_SIZE: usize = 32;

/// Per-message key for the tag, taken from keystream block 0.
///
/// Lives only for the duration of one seal/open call and is wiped on drop.
pub struct MacSubkey {
    key: [u8; MAC_SUBKEY_SIZE],
}

impl MacSubkey {
    /// Raw subkey bytes.
    pub fn as_bytes(&self) -> &[u8; MAC_SUBKEY_SIZE] {
        &self.key
    }
}

impl Drop for MacSubkey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// XOR `buf` in place with the keystream for `(key, nonce)` starting at the
/// first byte of `block`.
///
/// # Panics
///
/// If the keystream would run past the 32-bit block counter (256 GiB from
/// block 0).
pub fn apply_keystream(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    block: u32,
    buf: &mut [u8],
) {
    let mut cipher = XChaCha20::new(key.into(), nonce.into());
    cipher.seek(u64::from(block) * BLOCK_SIZE as u64);
    cipher.apply_keystream(buf);
}

/// Raw keystream bytes for `(key, nonce)` starting at `block`.
pub fn keystream(
    key: &[u8; KEY_SIZE],
    nonce: &[u8; NONCE_SIZE],
    block: u32,
    length: usize,
) -> Vec<u8> {
    let mut out = vec![0u8; length];
    apply_keystream(key, nonce, block, &mut out);
    out
}

/// Derive the per-message MAC subkey: the first 32 bytes of block 0.
///
/// The remaining 32 bytes of block 0 are never used; payload encryption
/// starts at [`PAYLOAD_BLOCK`].
pub fn derive_mac_subkey(key: &[u8; KEY_SIZE], nonce: &[u8; NONCE_SIZE]) -> MacSubkey {
    let mut subkey = MacSubkey { key: [0u8; MAC_SUBKEY_SIZE] };
    apply_keystream(key, nonce, MAC_KEY_BLOCK, &mut subkey.key);
    subkey
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_key() -> [u8; KEY_SIZE] {
        let mut key = [0u8; KEY_SIZE];
        for (i, byte) in key.iter_mut().enumerate() {
            *byte = i as u8;
        }
        key
    }

    #[test]
    fn block_zero_matches_known_answer() {
        let stream = keystream(&counting_key(), &[0x42; NONCE_SIZE], 0, BLOCK_SIZE);
        assert_eq!(
            hex::encode(stream),
            "8fd330534094a837c081d32d301cff804b6de0f2fb7cb2cc74ef7df474a750f0\
             45f129c36dfce21f0c8541598f07b70eb404c47f177b416be38a9c399fbfdc63"
        );
    }

    #[test]
    fn block_one_matches_known_answer() {
        let stream = keystream(&counting_key(), &[0x42; NONCE_SIZE], 1, 16);
        assert_eq!(hex::encode(stream), "fe95e146bd2a767341f84fd88fec28cf");
    }

    #[test]
    fn block_index_is_a_byte_offset_of_64() {
        let key = counting_key();
        let nonce = [0x42; NONCE_SIZE];

        let long = keystream(&key, &nonce, 0, 3 * BLOCK_SIZE);
        let from_one = keystream(&key, &nonce, 1, 2 * BLOCK_SIZE);
        let from_two = keystream(&key, &nonce, 2, BLOCK_SIZE);

        assert_eq!(&long[BLOCK_SIZE..], from_one.as_slice());
        assert_eq!(&long[2 * BLOCK_SIZE..], from_two.as_slice());
    }

    #[test]
    fn mac_subkey_is_prefix_of_block_zero() {
        let key = counting_key();
        let nonce = [0x42; NONCE_SIZE];

        let subkey = derive_mac_subkey(&key, &nonce);
        let block = keystream(&key, &nonce, MAC_KEY_BLOCK, BLOCK_SIZE);

        assert_eq!(subkey.as_bytes().as_slice(), &block[..32]);
    }

    #[test]
    fn mac_subkey_matches_known_answer() {
        let nonce: [u8; NONCE_SIZE] = core::array::from_fn(|i| i as u8);
        let subkey = derive_mac_subkey(&[0u8; KEY_SIZE], &nonce);
        assert_eq!(
            hex::encode(subkey.as_bytes()),
            "2b536ed3957c7d70acdd60ecdb4270132563c0afaa662e76e2e322313189fa62"
        );
    }

    #[test]
    fn payload_keystream_never_overlaps_subkey_block() {
        let key = counting_key();
        let nonce = [0x07; NONCE_SIZE];

        let block_zero = keystream(&key, &nonce, MAC_KEY_BLOCK, BLOCK_SIZE);
        let payload = keystream(&key, &nonce, PAYLOAD_BLOCK, BLOCK_SIZE);

        assert_ne!(block_zero, payload);
        assert_ne!(&block_zero[32..], &payload[..32], "second half of block 0 is discarded");
    }

    #[test]
    fn apply_keystream_is_an_involution() {
        let key = counting_key();
        let nonce = [0x11; NONCE_SIZE];
        let original = b"attack at dawn, bring snacks".to_vec();

        let mut buf = original.clone();
        apply_keystream(&key, &nonce, PAYLOAD_BLOCK, &mut buf);
        assert_ne!(buf, original);

        apply_keystream(&key, &nonce, PAYLOAD_BLOCK, &mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    fn different_nonces_produce_different_keystreams() {
        let key = counting_key();
        let a = keystream(&key, &[0x00; NONCE_SIZE], 0, 32);
        let b = keystream(&key, &[0x01; NONCE_SIZE], 0, 32);
        assert_ne!(a, b);
    }

    #[test]
    fn empty_keystream_request() {
        let stream = keystream(&counting_key(), &[0u8; NONCE_SIZE], PAYLOAD_BLOCK, 0);
        assert!(stream.is_empty());
    }
}
