use aes::cipher::{KeyIvInit, StreamCipher};

use crate::srtp::constants::AES_BLOCK_LEN;
use crate::srtp::srtp_error::SrtpError;
use crate::srtp::utils::{Aes128Ctr, Aes256Ctr};

/// PRF-AES-CM session key derivation (RFC 3711 §4.3.1, §4.3.3).
///
/// `x = label ‖ r` with `r = index DIV kdr` is XORed into the zero-extended
/// master salt, and the output is the AES-CM keystream started at that IV.
/// Only `index_over_kdr == 0` (key derivation rate 0) is supported.
///
/// Block `i` of the keystream is `AES(master_key, iv ‖ i)` with `i` in the
/// last two IV bytes, so running a CTR cipher over zeros yields exactly the
/// concatenated blocks truncated to `out_len`.
pub fn aes_cm_key_derivation(
    label: u8,
    master_key: &[u8],
    master_salt: &[u8],
    index_over_kdr: u64,
    out_len: usize,
) -> Result<Vec<u8>, SrtpError> {
    if index_over_kdr != 0 {
        return Err(SrtpError::UnsupportedIndexOverKdr);
    }
    if master_salt.len() > AES_BLOCK_LEN - 2 {
        return Err(SrtpError::SrtpSaltLength(AES_BLOCK_LEN - 2, master_salt.len()));
    }

    let mut iv = [0u8; AES_BLOCK_LEN];
    iv[..master_salt.len()].copy_from_slice(master_salt);
    iv[7] ^= label;

    let mut out = vec![0u8; out_len];
    match master_key.len() {
        16 => Aes128Ctr::new_from_slices(master_key, &iv)
            .map_err(|_| SrtpError::InvalidKeyLength(master_key.len()))?
            .apply_keystream(&mut out),
        32 => Aes256Ctr::new_from_slices(master_key, &iv)
            .map_err(|_| SrtpError::InvalidKeyLength(master_key.len()))?
            .apply_keystream(&mut out),
        n => return Err(SrtpError::InvalidKeyLength(n)),
    }
    Ok(out)
}
