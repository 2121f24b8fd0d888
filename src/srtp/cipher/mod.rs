//! The two SRTP cipher families behind one interface, chosen once per
//! context from the [`ProtectionProfile`](crate::srtp::ProtectionProfile).
pub(crate) mod cipher_aead_aes_gcm;
pub(crate) mod cipher_aes_cm_hmac_sha1;

use crate::rtp::RtpHeader;
use crate::srtp::protection_profile::ProtectionProfile;
use crate::srtp::srtp_error::SrtpError;

pub(crate) use cipher_aead_aes_gcm::CipherAeadAesGcm;
pub(crate) use cipher_aes_cm_hmac_sha1::CipherAesCmHmacSha1;

/// Per-packet transform over derived session keys.
///
/// Implementations hold no per-stream state; the caller supplies the
/// rollover counter or SRTCP index.
pub(crate) trait Cipher: Send {
    fn rtp_auth_tag_len(&self) -> usize;
    fn rtcp_auth_tag_len(&self) -> usize;
    fn aead_auth_tag_len(&self) -> usize;

    /// SRTCP index from the trailing index word, E flag masked off.
    fn get_rtcp_index(&self, input: &[u8]) -> Result<u32, SrtpError>;

    fn encrypt_rtp(&self, plaintext: &[u8], header: &RtpHeader, roc: u32)
    -> Result<Vec<u8>, SrtpError>;
    fn decrypt_rtp(&self, ciphertext: &[u8], header: &RtpHeader, roc: u32)
    -> Result<Vec<u8>, SrtpError>;

    fn encrypt_rtcp(&self, plaintext: &[u8], srtcp_index: u32, ssrc: u32)
    -> Result<Vec<u8>, SrtpError>;
    fn decrypt_rtcp(&self, ciphertext: &[u8], srtcp_index: u32, ssrc: u32)
    -> Result<Vec<u8>, SrtpError>;
}

/// Derives the session keys for `profile` and boxes the matching cipher.
pub(crate) fn new_cipher(
    profile: ProtectionProfile,
    master_key: &[u8],
    master_salt: &[u8],
) -> Result<Box<dyn Cipher>, SrtpError> {
    if master_key.len() != profile.key_len() {
        return Err(SrtpError::SrtpMasterKeyLength(
            profile.key_len(),
            master_key.len(),
        ));
    }
    if master_salt.len() != profile.salt_len() {
        return Err(SrtpError::SrtpSaltLength(
            profile.salt_len(),
            master_salt.len(),
        ));
    }

    Ok(match profile {
        ProtectionProfile::AeadAes128Gcm | ProtectionProfile::AeadAes256Gcm => {
            Box::new(CipherAeadAesGcm::new(profile, master_key, master_salt)?)
        }
        ProtectionProfile::Aes128CmHmacSha1_80 | ProtectionProfile::Aes128CmHmacSha1_32 => {
            Box::new(CipherAesCmHmacSha1::new(profile, master_key, master_salt)?)
        }
    })
}
