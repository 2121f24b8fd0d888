use aes::cipher::{KeyIvInit, StreamCipher};
use byteorder::{BigEndian, ByteOrder};
use hmac::Mac;

use super::Cipher;
use crate::rtp::RtpHeader;
use crate::srtp::constants::{
    LABEL_SRTCP_AUTHENTICATION_TAG, LABEL_SRTCP_ENCRYPTION, LABEL_SRTCP_SALT,
    LABEL_SRTP_AUTHENTICATION_TAG, LABEL_SRTP_ENCRYPTION, LABEL_SRTP_SALT, SRTCP_CLEAR_PREFIX_LEN,
    SRTCP_ENCRYPTION_FLAG, SRTCP_INDEX_SIZE,
};
use crate::srtp::key_derivation::aes_cm_key_derivation;
use crate::srtp::protection_profile::ProtectionProfile;
use crate::srtp::srtp_error::SrtpError;
use crate::srtp::utils::{Aes128Ctr, HmacSha1, generate_counter};

/// AES_CM_128_HMAC_SHA1_80 / _32 (RFC 3711 §4.1.1, §4.2.1).
pub(crate) struct CipherAesCmHmacSha1 {
    profile: ProtectionProfile,
    srtp_session_key: Vec<u8>,
    srtp_session_salt: Vec<u8>,
    srtp_session_auth: HmacSha1,
    srtcp_session_key: Vec<u8>,
    srtcp_session_salt: Vec<u8>,
    srtcp_session_auth: HmacSha1,
}

impl CipherAesCmHmacSha1 {
    pub(crate) fn new(
        profile: ProtectionProfile,
        master_key: &[u8],
        master_salt: &[u8],
    ) -> Result<Self, SrtpError> {
        let key_len = profile.key_len();
        let salt_len = profile.salt_len();
        let auth_len = profile.auth_key_len();

        let srtp_session_key =
            aes_cm_key_derivation(LABEL_SRTP_ENCRYPTION, master_key, master_salt, 0, key_len)?;
        let srtcp_session_key =
            aes_cm_key_derivation(LABEL_SRTCP_ENCRYPTION, master_key, master_salt, 0, key_len)?;
        let srtp_session_salt =
            aes_cm_key_derivation(LABEL_SRTP_SALT, master_key, master_salt, 0, salt_len)?;
        let srtcp_session_salt =
            aes_cm_key_derivation(LABEL_SRTCP_SALT, master_key, master_salt, 0, salt_len)?;
        let srtp_auth_key = aes_cm_key_derivation(
            LABEL_SRTP_AUTHENTICATION_TAG,
            master_key,
            master_salt,
            0,
            auth_len,
        )?;
        let srtcp_auth_key = aes_cm_key_derivation(
            LABEL_SRTCP_AUTHENTICATION_TAG,
            master_key,
            master_salt,
            0,
            auth_len,
        )?;

        let srtp_session_auth = HmacSha1::new_from_slice(&srtp_auth_key)
            .map_err(|_| SrtpError::InvalidKeyLength(srtp_auth_key.len()))?;
        let srtcp_session_auth = HmacSha1::new_from_slice(&srtcp_auth_key)
            .map_err(|_| SrtpError::InvalidKeyLength(srtcp_auth_key.len()))?;

        Ok(Self {
            profile,
            srtp_session_key,
            srtp_session_salt,
            srtp_session_auth,
            srtcp_session_key,
            srtcp_session_salt,
            srtcp_session_auth,
        })
    }

    /// HMAC-SHA1 state over `packet ‖ ROC`, ready to finalize or verify.
    fn srtp_mac(&self, packet: &[u8], roc: u32) -> HmacSha1 {
        let mut mac = self.srtp_session_auth.clone();
        mac.update(packet);
        mac.update(&roc.to_be_bytes());
        mac
    }

    /// HMAC-SHA1 state over the packet including its index word.
    fn srtcp_mac(&self, packet: &[u8]) -> HmacSha1 {
        let mut mac = self.srtcp_session_auth.clone();
        mac.update(packet);
        mac
    }

    fn apply_keystream(
        &self,
        key: &[u8],
        counter: &[u8; 16],
        buf: &mut [u8],
    ) -> Result<(), SrtpError> {
        let mut stream = Aes128Ctr::new_from_slices(key, counter)
            .map_err(|_| SrtpError::InvalidKeyLength(key.len()))?;
        stream.apply_keystream(buf);
        Ok(())
    }
}

impl Cipher for CipherAesCmHmacSha1 {
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
        let tag_len = self.rtcp_auth_tag_len();
        let min = SRTCP_CLEAR_PREFIX_LEN + SRTCP_INDEX_SIZE + tag_len;
        if input.len() < min {
            return Err(SrtpError::SrtcpTooSmall(input.len(), min));
        }
        let tail_offset = input.len() - (tag_len + SRTCP_INDEX_SIZE);
        Ok(BigEndian::read_u32(&input[tail_offset..tail_offset + SRTCP_INDEX_SIZE])
            & !SRTCP_ENCRYPTION_FLAG)
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
        let tag_len = self.rtp_auth_tag_len();

        let mut out = Vec::with_capacity(plaintext.len() + tag_len);
        out.extend_from_slice(plaintext);

        let counter = generate_counter(
            header.sequence_number,
            roc,
            header.ssrc,
            &self.srtp_session_salt,
        );
        self.apply_keystream(&self.srtp_session_key, &counter, &mut out[header_len..])?;

        let tag = self.srtp_mac(&out, roc).finalize().into_bytes();
        out.extend_from_slice(&tag[..tag_len]);
        Ok(out)
    }

    fn decrypt_rtp(
        &self,
        ciphertext: &[u8],
        header: &RtpHeader,
        roc: u32,
    ) -> Result<Vec<u8>, SrtpError> {
        let header_len = header.marshal_size();
        let tag_len = self.rtp_auth_tag_len();
        let min = header_len + tag_len;
        if ciphertext.len() < min {
            return Err(SrtpError::SrtpTooSmall(ciphertext.len(), min));
        }

        let (body, actual_tag) = ciphertext.split_at(ciphertext.len() - tag_len);
        // constant time, compares the leftmost tag_len bytes
        self.srtp_mac(body, roc)
            .verify_truncated_left(actual_tag)
            .map_err(|_| SrtpError::RtpFailedToVerifyAuthTag)?;

        let mut out = body.to_vec();
        let counter = generate_counter(
            header.sequence_number,
            roc,
            header.ssrc,
            &self.srtp_session_salt,
        );
        self.apply_keystream(&self.srtp_session_key, &counter, &mut out[header_len..])?;
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
        let tag_len = self.rtcp_auth_tag_len();

        let mut out = Vec::with_capacity(plaintext.len() + SRTCP_INDEX_SIZE + tag_len);
        out.extend_from_slice(plaintext);

        let counter = generate_counter(
            (srtcp_index & 0xFFFF) as u16,
            srtcp_index >> 16,
            ssrc,
            &self.srtcp_session_salt,
        );
        self.apply_keystream(
            &self.srtcp_session_key,
            &counter,
            &mut out[SRTCP_CLEAR_PREFIX_LEN..],
        )?;

        out.extend_from_slice(&(srtcp_index | SRTCP_ENCRYPTION_FLAG).to_be_bytes());

        let tag = self.srtcp_mac(&out).finalize().into_bytes();
        out.extend_from_slice(&tag[..tag_len]);
        Ok(out)
    }

    fn decrypt_rtcp(
        &self,
        ciphertext: &[u8],
        srtcp_index: u32,
        ssrc: u32,
    ) -> Result<Vec<u8>, SrtpError> {
        let tag_len = self.rtcp_auth_tag_len();
        let min = SRTCP_CLEAR_PREFIX_LEN + SRTCP_INDEX_SIZE + tag_len;
        if ciphertext.len() < min {
            return Err(SrtpError::SrtcpTooSmall(ciphertext.len(), min));
        }

        let tail_offset = ciphertext.len() - (tag_len + SRTCP_INDEX_SIZE);
        let is_encrypted = ciphertext[tail_offset] >> 7 != 0;

        let (authenticated, actual_tag) = ciphertext.split_at(ciphertext.len() - tag_len);
        self.srtcp_mac(authenticated)
            .verify_truncated_left(actual_tag)
            .map_err(|_| SrtpError::RtcpFailedToVerifyAuthTag)?;

        let mut out = ciphertext[..tail_offset].to_vec();
        if is_encrypted {
            let counter = generate_counter(
                (srtcp_index & 0xFFFF) as u16,
                srtcp_index >> 16,
                ssrc,
                &self.srtcp_session_salt,
            );
            self.apply_keystream(
                &self.srtcp_session_key,
                &counter,
                &mut out[SRTCP_CLEAR_PREFIX_LEN..],
            )?;
        }
        Ok(out)
    }
}
