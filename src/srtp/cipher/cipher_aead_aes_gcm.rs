use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce};
use byteorder::{BigEndian, ByteOrder};

use super::Cipher;
use crate::rtp::RtpHeader;
use crate::srtp::constants::{
    AEAD_NONCE_LEN, LABEL_SRTCP_ENCRYPTION, LABEL_SRTCP_SALT, LABEL_SRTP_ENCRYPTION,
    LABEL_SRTP_SALT, SRTCP_CLEAR_PREFIX_LEN, SRTCP_ENCRYPTION_FLAG, SRTCP_INDEX_SIZE,
};
use crate::srtp::key_derivation::aes_cm_key_derivation;
use crate::srtp::protection_profile::ProtectionProfile;
use crate::srtp::srtp_error::SrtpError;

enum GcmKey {
    Aes128(Box<Aes128Gcm>),
    Aes256(Box<Aes256Gcm>),
}

impl GcmKey {
    fn new(key: &[u8]) -> Result<Self, SrtpError> {
        match key.len() {
            16 => Aes128Gcm::new_from_slice(key)
                .map(|c| GcmKey::Aes128(Box::new(c)))
                .map_err(|_| SrtpError::InvalidKeyLength(key.len())),
            32 => Aes256Gcm::new_from_slice(key)
                .map(|c| GcmKey::Aes256(Box::new(c)))
                .map_err(|_| SrtpError::InvalidKeyLength(key.len())),
            n => Err(SrtpError::InvalidKeyLength(n)),
        }
    }

    fn seal(&self, nonce: &[u8; AEAD_NONCE_LEN], msg: &[u8], aad: &[u8]) -> Option<Vec<u8>> {
        let nonce = Nonce::from_slice(nonce);
        let payload = Payload { msg, aad };
        match self {
            GcmKey::Aes128(c) => c.encrypt(nonce, payload).ok(),
            GcmKey::Aes256(c) => c.encrypt(nonce, payload).ok(),
        }
    }

    fn open(&self, nonce: &[u8; AEAD_NONCE_LEN], msg: &[u8], aad: &[u8]) -> Option<Vec<u8>> {
        let nonce = Nonce::from_slice(nonce);
        let payload = Payload { msg, aad };
        match self {
            GcmKey::Aes128(c) => c.decrypt(nonce, payload).ok(),
            GcmKey::Aes256(c) => c.decrypt(nonce, payload).ok(),
        }
    }
}

/// AEAD_AES_128_GCM / AEAD_AES_256_GCM (RFC 7714).
pub(crate) struct CipherAeadAesGcm {
    profile: ProtectionProfile,
    srtp_cipher: GcmKey,
    srtcp_cipher: GcmKey,
    srtp_session_salt: Vec<u8>,
    srtcp_session_salt: Vec<u8>,
}

impl CipherAeadAesGcm {
    pub(crate) fn new(
        profile: ProtectionProfile,
        master_key: &[u8],
        master_salt: &[u8],
    ) -> Result<Self, SrtpError> {
        let key_len = profile.key_len();
        let salt_len = profile.salt_len();

        let srtp_session_key =
            aes_cm_key_derivation(LABEL_SRTP_ENCRYPTION, master_key, master_salt, 0, key_len)?;
        let srtcp_session_key =
            aes_cm_key_derivation(LABEL_SRTCP_ENCRYPTION, master_key, master_salt, 0, key_len)?;
        let srtp_session_salt =
            aes_cm_key_derivation(LABEL_SRTP_SALT, master_key, master_salt, 0, salt_len)?;
        let srtcp_session_salt =
            aes_cm_key_derivation(LABEL_SRTCP_SALT, master_key, master_salt, 0, salt_len)?;

        Ok(Self {
            profile,
            srtp_cipher: GcmKey::new(&srtp_session_key)?,
            srtcp_cipher: GcmKey::new(&srtcp_session_key)?,
            srtp_session_salt,
            srtcp_session_salt,
        })
    }

    /// RFC 7714 §8.1: `salt XOR (00 00 ‖ SSRC ‖ ROC ‖ SEQ)`.
    fn rtp_initialization_vector(&self, header: &RtpHeader, roc: u32) -> [u8; AEAD_NONCE_LEN] {
        let mut iv = [0u8; AEAD_NONCE_LEN];
        BigEndian::write_u32(&mut iv[2..6], header.ssrc);
        BigEndian::write_u32(&mut iv[6..10], roc);
        BigEndian::write_u16(&mut iv[10..12], header.sequence_number);

        for (v, s) in iv.iter_mut().zip(self.srtp_session_salt.iter()) {
            *v ^= s;
        }
        iv
    }

    /// RFC 7714 §9.1: `salt XOR (00 00 ‖ SSRC ‖ 00 00 ‖ index)`.
    fn rtcp_initialization_vector(&self, srtcp_index: u32, ssrc: u32) -> [u8; AEAD_NONCE_LEN] {
        let mut iv = [0u8; AEAD_NONCE_LEN];
        BigEndian::write_u32(&mut iv[2..6], ssrc);
        BigEndian::write_u32(&mut iv[8..12], srtcp_index);

        for (v, s) in iv.iter_mut().zip(self.srtcp_session_salt.iter()) {
            *v ^= s;
        }
        iv
    }

    /// RFC 7714 §17: header and SSRC followed by the index word with the E
    /// bit set.
    fn rtcp_additional_authenticated_data(
        &self,
        rtcp_packet: &[u8],
        srtcp_index: u32,
    ) -> [u8; SRTCP_CLEAR_PREFIX_LEN + SRTCP_INDEX_SIZE] {
        let mut aad = [0u8; SRTCP_CLEAR_PREFIX_LEN + SRTCP_INDEX_SIZE];
        aad[..SRTCP_CLEAR_PREFIX_LEN].copy_from_slice(&rtcp_packet[..SRTCP_CLEAR_PREFIX_LEN]);
        BigEndian::write_u32(
            &mut aad[SRTCP_CLEAR_PREFIX_LEN..],
            srtcp_index | SRTCP_ENCRYPTION_FLAG,
        );
        aad
    }
}

impl Cipher for CipherAeadAesGcm {
    fn rtp_auth_tag_len(&self) -> usize {
        self.profile.rtp_auth_tag_len()
    }

    fn rtcp_auth_tag_len(&self) -> usize {
        self.profile.rtcp_auth_tag_len()
    }

    fn aead_auth_tag_len(&self) -> usize {
        self.profile.aead_auth_tag_len()
    }

    fn get_rtcp_index(&self, input: &[u8]) -> Result<u32, SrtpError> {
        let min = SRTCP_CLEAR_PREFIX_LEN + self.aead_auth_tag_len() + SRTCP_INDEX_SIZE;
        if input.len() < min {
            return Err(SrtpError::SrtcpTooSmall(input.len(), min));
        }
        let pos = input.len() - SRTCP_INDEX_SIZE;
        Ok(BigEndian::read_u32(&input[pos..]) & !SRTCP_ENCRYPTION_FLAG)
    }

    fn encrypt_rtp(
        &self,
        plaintext: &[u8],
        header: &RtpHeader,
        roc: u32,
    ) -> Result<Vec<u8>, SrtpError> {
        let header_len = header.marshal_size();
        if plaintext.len() < header_len {
            return Err(SrtpError::SrtpTooSmall(plaintext.len(), header_len));
        }

        let nonce = self.rtp_initialization_vector(header, roc);
        let sealed = self
            .srtp_cipher
            .seal(&nonce, &plaintext[header_len..], &plaintext[..header_len])
            .ok_or(SrtpError::AeadSealFailed)?;

        let mut out = Vec::with_capacity(header_len + sealed.len());
        out.extend_from_slice(&plaintext[..header_len]);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    fn decrypt_rtp(
        &self,
        ciphertext: &[u8],
        header: &RtpHeader,
        roc: u32,
    ) -> Result<Vec<u8>, SrtpError> {
        let header_len = header.marshal_size();
        let min = header_len + self.aead_auth_tag_len();
        if ciphertext.len() < min {
            return Err(SrtpError::SrtpTooSmall(ciphertext.len(), min));
        }

        let nonce = self.rtp_initialization_vector(header, roc);
        let opened = self
            .srtp_cipher
            .open(&nonce, &ciphertext[header_len..], &ciphertext[..header_len])
            .ok_or(SrtpError::RtpFailedToVerifyAuthTag)?;

        let mut out = Vec::with_capacity(header_len + opened.len());
        out.extend_from_slice(&ciphertext[..header_len]);
        out.extend_from_slice(&opened);
        Ok(out)
    }

    fn encrypt_rtcp(
        &self,
        plaintext: &[u8],
        srtcp_index: u32,
        ssrc: u32,
    ) -> Result<Vec<u8>, SrtpError> {
        if plaintext.len() < SRTCP_CLEAR_PREFIX_LEN {
            return Err(SrtpError::SrtcpTooSmall(plaintext.len(), SRTCP_CLEAR_PREFIX_LEN));
        }

        let nonce = self.rtcp_initialization_vector(srtcp_index, ssrc);
        let aad = self.rtcp_additional_authenticated_data(plaintext, srtcp_index);
        let sealed = self
            .srtcp_cipher
            .seal(&nonce, &plaintext[SRTCP_CLEAR_PREFIX_LEN..], &aad)
            .ok_or(SrtpError::AeadSealFailed)?;

        let mut out =
            Vec::with_capacity(SRTCP_CLEAR_PREFIX_LEN + sealed.len() + SRTCP_INDEX_SIZE);
        out.extend_from_slice(&plaintext[..SRTCP_CLEAR_PREFIX_LEN]);
        out.extend_from_slice(&sealed);
        out.extend_from_slice(&aad[SRTCP_CLEAR_PREFIX_LEN..]);
        Ok(out)
    }

    fn decrypt_rtcp(
        &self,
        ciphertext: &[u8],
        srtcp_index: u32,
        ssrc: u32,
    ) -> Result<Vec<u8>, SrtpError> {
        let min = SRTCP_CLEAR_PREFIX_LEN + self.aead_auth_tag_len() + SRTCP_INDEX_SIZE;
        if ciphertext.len() < min {
            return Err(SrtpError::SrtcpTooSmall(ciphertext.len(), min));
        }

        let body_end = ciphertext.len() - SRTCP_INDEX_SIZE;
        let nonce = self.rtcp_initialization_vector(srtcp_index, ssrc);
        let aad = self.rtcp_additional_authenticated_data(ciphertext, srtcp_index);
        let opened = self
            .srtcp_cipher
            .open(&nonce, &ciphertext[SRTCP_CLEAR_PREFIX_LEN..body_end], &aad)
            .ok_or(SrtpError::RtcpFailedToVerifyAuthTag)?;

        let mut out = Vec::with_capacity(SRTCP_CLEAR_PREFIX_LEN + opened.len());
        out.extend_from_slice(&ciphertext[..SRTCP_CLEAR_PREFIX_LEN]);
        out.extend_from_slice(&opened);
        Ok(out)
    }
}
