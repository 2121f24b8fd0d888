use crate::log::log_sink::LogSink;
use crate::rtp::RtpHeader;
use crate::srtp::SrtpEndpointKeys;
use crate::srtp::cipher::{Cipher, new_cipher};
use crate::srtp::constants::{MAX_SEQUENCE_NUMBER, MAX_SRTCP_INDEX};
use crate::srtp::protection_profile::ProtectionProfile;
use crate::srtp::replay::ReplayProtection;
use crate::srtp::srtp_error::SrtpError;
use crate::srtp::srtp_options::ContextOptions;
use crate::srtp::ssrc_state::{SrtcpSsrcState, SrtpSsrcState};
use crate::{sink_debug, sink_error, sink_trace, sink_warn};
use std::collections::HashMap;
use std::sync::Arc;

/// One direction of an SRTP session.
///
/// Holds the cipher built from the master key and the per-SSRC rollover,
/// index and replay state. Use one context for sending and a separate one
/// for receiving. Every packet operation takes `&mut self`; wrap the context
/// in a `Mutex` to share it between threads.
pub struct SrtpContext {
    pub(crate) logger: Arc<dyn LogSink>,
    pub(crate) profile: ProtectionProfile,
    pub(crate) cipher: Box<dyn Cipher>,
    pub(crate) srtp_ssrc_states: HashMap<u32, SrtpSsrcState>,
    pub(crate) srtcp_ssrc_states: HashMap<u32, SrtcpSsrcState>,
    pub(crate) srtp_replay: ReplayProtection,
    pub(crate) srtcp_replay: ReplayProtection,
}

impl SrtpContext {
    /// Context with the default replay protection (wrapped, 64 packets).
    pub fn new(
        logger: Arc<dyn LogSink>,
        profile: ProtectionProfile,
        master_keys: SrtpEndpointKeys,
    ) -> Result<Self, SrtpError> {
        Self::with_options(logger, profile, master_keys, ContextOptions::default())
    }

    pub fn with_options(
        logger: Arc<dyn LogSink>,
        profile: ProtectionProfile,
        master_keys: SrtpEndpointKeys,
        options: ContextOptions,
    ) -> Result<Self, SrtpError> {
        let cipher = new_cipher(profile, &master_keys.master_key, &master_keys.master_salt)?;

        sink_debug!(
            logger,
            "[SRTP Context] Keys derived. profile={} rtp_replay={} rtcp_replay={}",
            profile,
            options.srtp_replay,
            options.srtcp_replay
        );

        Ok(Self {
            logger,
            profile,
            cipher,
            srtp_ssrc_states: HashMap::new(),
            srtcp_ssrc_states: HashMap::new(),
            srtp_replay: options.srtp_replay,
            srtcp_replay: options.srtcp_replay,
        })
    }

    pub fn profile(&self) -> ProtectionProfile {
        self.profile
    }

    /// Encrypts a marshaled RTP packet.
    pub fn encrypt_rtp(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, SrtpError> {
        let (header, _) = RtpHeader::decode(plaintext)?;
        self.encrypt_rtp_with_header(plaintext, &header)
    }

    /// Encrypts `plaintext`, whose first `header.marshal_size()` bytes are
    /// the already-parsed `header`.
    pub fn encrypt_rtp_with_header(
        &mut self,
        plaintext: &[u8],
        header: &RtpHeader,
    ) -> Result<Vec<u8>, SrtpError> {
        let ssrc = header.ssrc;
        let seq = header.sequence_number;

        let replay = self.srtp_replay;
        let state = self.srtp_ssrc_states.entry(ssrc).or_insert_with(|| {
            SrtpSsrcState::new(ssrc, replay.build(MAX_SEQUENCE_NUMBER as u64))
        });
        let roc = state.next_rollover_count(seq);

        let dst = self.cipher.encrypt_rtp(plaintext, header, roc)?;
        state.commit_rollover_count(seq, roc);

        sink_trace!(
            self.logger,
            "[SRTP] Protected Packet: SSRC={:#x} Seq={} ROC={} Len={}",
            state.ssrc,
            seq,
            roc,
            dst.len()
        );
        Ok(dst)
    }

    /// Authenticates and decrypts an SRTP packet.
    pub fn decrypt_rtp(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>, SrtpError> {
        let (header, _) = RtpHeader::decode(ciphertext)?;
        self.decrypt_rtp_with_header(ciphertext, &header)
    }

    pub fn decrypt_rtp_with_header(
        &mut self,
        ciphertext: &[u8],
        header: &RtpHeader,
    ) -> Result<Vec<u8>, SrtpError> {
        let ssrc = header.ssrc;
        let seq = header.sequence_number;

        let replay = self.srtp_replay;
        let state = self.srtp_ssrc_states.entry(ssrc).or_insert_with(|| {
            SrtpSsrcState::new(ssrc, replay.build(MAX_SEQUENCE_NUMBER as u64))
        });
        let roc = state.next_rollover_count(seq);

        if !state.replay_detector.check(seq as u64) {
            sink_warn!(
                self.logger,
                "[SRTP] Replay detected: SSRC={:#x} Seq={} ROC={}",
                state.ssrc,
                seq,
                roc
            );
            return Err(SrtpError::SrtpSsrcDuplicated(ssrc, seq));
        }

        let dst = match self.cipher.decrypt_rtp(ciphertext, header, roc) {
            Ok(dst) => dst,
            Err(e) => {
                if e.is_auth_failure() {
                    sink_error!(
                        self.logger,
                        "[SRTP] Auth Fail: SSRC={:#x} Seq={} ROC={} Len={}",
                        ssrc,
                        seq,
                        roc,
                        ciphertext.len()
                    );
                }
                return Err(e);
            }
        };

        state.replay_detector.accept();
        state.commit_rollover_count(seq, roc);

        sink_trace!(
            self.logger,
            "[SRTP] Unprotect Success: SSRC={:#x} Seq={} ROC={}",
            state.ssrc,
            seq,
            roc
        );
        Ok(dst)
    }

    /// Current rollover counter of an SSRC this context has seen.
    pub fn roc(&self, ssrc: u32) -> Result<u32, SrtpError> {
        self.srtp_ssrc_states
            .get(&ssrc)
            .map(|s| s.rollover_counter)
            .ok_or(SrtpError::SsrcMissingFromSrtp(ssrc))
    }

    /// Seeds the rollover counter, e.g. when joining a stream mid-way with
    /// a ROC signalled out of band. Creates the SSRC state if needed.
    pub fn set_roc(&mut self, ssrc: u32, roc: u32) {
        let replay = self.srtp_replay;
        self.srtp_ssrc_states
            .entry(ssrc)
            .or_insert_with(|| SrtpSsrcState::new(ssrc, replay.build(MAX_SEQUENCE_NUMBER as u64)))
            .set_rollover_count(roc);
    }

    /// Last SRTCP index used (sending) for an SSRC.
    pub fn index(&self, ssrc: u32) -> Result<u32, SrtpError> {
        self.srtcp_ssrc_states
            .get(&ssrc)
            .map(|s| s.srtcp_index)
            .ok_or(SrtpError::SsrcMissingFromSrtcp(ssrc))
    }

    /// Seeds the SRTCP index; the next packet sent uses `index + 1`.
    pub fn set_index(&mut self, ssrc: u32, index: u32) {
        self.srtcp_ssrc_state(ssrc).set_index(index);
    }

    pub(crate) fn srtcp_ssrc_state(&mut self, ssrc: u32) -> &mut SrtcpSsrcState {
        let replay = self.srtcp_replay;
        self.srtcp_ssrc_states
            .entry(ssrc)
            .or_insert_with(|| SrtcpSsrcState::new(ssrc, replay.build(MAX_SRTCP_INDEX as u64)))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::NoopLogSink;

    fn keys(profile: ProtectionProfile) -> SrtpEndpointKeys {
        SrtpEndpointKeys::new(vec![0x5Au8; profile.key_len()], vec![0xA5u8; profile.salt_len()])
    }

    fn pair(profile: ProtectionProfile) -> (SrtpContext, SrtpContext) {
        let log: Arc<dyn LogSink> = Arc::new(NoopLogSink);
        let tx = SrtpContext::with_options(
            log.clone(),
            profile,
            keys(profile),
            ContextOptions::outbound(),
        )
        .unwrap();
        let rx = SrtpContext::new(log, profile, keys(profile)).unwrap();
        (tx, rx)
    }

    fn rtp(seq: u16) -> Vec<u8> {
        let mut pkt = RtpHeader::new(111, seq, seq as u32 * 960, 0xDEAD_BEEF)
            .to_bytes()
            .unwrap();
        pkt.extend_from_slice(&seq.to_be_bytes());
        pkt.extend_from_slice(b"-payload");
        pkt
    }

    #[test]
    fn rejects_master_key_and_salt_of_wrong_length() {
        let log: Arc<dyn LogSink> = Arc::new(NoopLogSink);
        let profile = ProtectionProfile::AeadAes256Gcm;
        let err = SrtpContext::new(log.clone(), profile, SrtpEndpointKeys::new(vec![0; 16], vec![0; 12]))
            .err()
            .unwrap();
        assert_eq!(err, SrtpError::SrtpMasterKeyLength(32, 16));

        let err = SrtpContext::new(log, profile, SrtpEndpointKeys::new(vec![0; 32], vec![0; 14]))
            .err()
            .unwrap();
        assert_eq!(err, SrtpError::SrtpSaltLength(12, 14));
    }

    #[test]
    fn decrypt_twice_is_a_replay() {
        let (mut tx, mut rx) = pair(ProtectionProfile::Aes128CmHmacSha1_80);
        let enc = tx.encrypt_rtp(&rtp(10)).unwrap();
        assert_eq!(rx.decrypt_rtp(&enc).unwrap(), rtp(10));
        assert_eq!(
            rx.decrypt_rtp(&enc),
            Err(SrtpError::SrtpSsrcDuplicated(0xDEAD_BEEF, 10))
        );
    }

    #[test]
    fn failed_auth_does_not_consume_window_or_roc() {
        let (mut tx, mut rx) = pair(ProtectionProfile::Aes128CmHmacSha1_80);
        let enc = tx.encrypt_rtp(&rtp(65535)).unwrap();
        rx.decrypt_rtp(&enc).unwrap();

        let good = tx.encrypt_rtp(&rtp(0)).unwrap();
        let mut bad = good.clone();
        let last = bad.len() - 1;
        bad[last] ^= 1;

        assert_eq!(rx.decrypt_rtp(&bad), Err(SrtpError::RtpFailedToVerifyAuthTag));
        assert_eq!(rx.roc(0xDEAD_BEEF).unwrap(), 0);
        assert_eq!(rx.decrypt_rtp(&good).unwrap(), rtp(0));
        assert_eq!(rx.roc(0xDEAD_BEEF).unwrap(), 1);
    }

    #[test]
    fn inspection_api_reports_unknown_ssrcs() {
        let (mut tx, _) = pair(ProtectionProfile::AeadAes128Gcm);
        assert_eq!(tx.roc(5), Err(SrtpError::SsrcMissingFromSrtp(5)));
        assert_eq!(tx.index(5), Err(SrtpError::SsrcMissingFromSrtcp(5)));

        tx.set_roc(5, 9);
        tx.set_index(5, 41);
        assert_eq!(tx.roc(5).unwrap(), 9);
        assert_eq!(tx.index(5).unwrap(), 41);
        assert_eq!(tx.profile(), ProtectionProfile::AeadAes128Gcm);
    }

    #[test]
    fn set_roc_is_used_for_the_next_packet() {
        let (mut tx, mut rx) = pair(ProtectionProfile::AeadAes128Gcm);
        tx.set_roc(0xDEAD_BEEF, 3);
        let enc = tx.encrypt_rtp(&rtp(500)).unwrap();

        assert_eq!(rx.decrypt_rtp(&enc), Err(SrtpError::RtpFailedToVerifyAuthTag));
        rx.set_roc(0xDEAD_BEEF, 3);
        assert_eq!(rx.decrypt_rtp(&enc).unwrap(), rtp(500));
    }

    #[test]
    fn malformed_rtp_header_is_reported() {
        let (mut tx, _) = pair(ProtectionProfile::Aes128CmHmacSha1_80);
        assert!(matches!(
            tx.encrypt_rtp(&[0x80, 0x00, 0x00]),
            Err(SrtpError::Rtp(_))
        ));
    }
}
