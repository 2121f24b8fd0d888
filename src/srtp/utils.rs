pub(super) type HmacSha1 = Hmac<Sha1>;
pub(super) type Aes128Ctr = Ctr128BE<Aes128>;
pub(super) type Aes256Ctr = Ctr128BE<Aes256>;

use aes::{Aes128, Aes256};
use ctr::Ctr128BE;
use hmac::Hmac;
use sha1::Sha1;

use crate::srtp::constants::AES_BLOCK_LEN;

/// AES-CM initial counter (RFC 3711 §4.1.1):
/// `salt XOR (00000000 ‖ SSRC ‖ ROC ‖ SEQ ‖ 0000)`.
///
/// The low 16 bits stay zero in the packet part and act as the block counter.
pub(super) fn generate_counter(
    sequence_number: u16,
    rollover_counter: u32,
    ssrc: u32,
    session_salt: &[u8],
) -> [u8; AES_BLOCK_LEN] {
    let mut counter = [0u8; AES_BLOCK_LEN];
    counter[4..8].copy_from_slice(&ssrc.to_be_bytes());
    counter[8..12].copy_from_slice(&rollover_counter.to_be_bytes());
    counter[12..16].copy_from_slice(&((sequence_number as u32) << 16).to_be_bytes());

    for (c, s) in counter.iter_mut().zip(session_salt.iter()) {
        *c ^= s;
    }
    counter
}
