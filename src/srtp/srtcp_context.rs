use crate::rtcp::CommonHeader;
use crate::srtp::srtp_context::SrtpContext;
use crate::srtp::srtp_error::SrtpError;
use crate::{sink_error, sink_trace, sink_warn};

impl SrtpContext {
    /// Authenticates and decrypts an SRTCP packet.
    pub fn decrypt_rtcp(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>, SrtpError> {
        let (_, ssrc) = CommonHeader::decode_sender_ssrc(ciphertext)?;
        let index = self.cipher.get_rtcp_index(ciphertext)?;

        let logger = self.logger.clone();
        let state = self.srtcp_ssrc_state(ssrc);
        if !state.replay_detector.check(index as u64) {
            sink_warn!(
                logger,
                "[SRTCP] Replay detected: SSRC={:#x} Index={}",
                state.ssrc,
                index
            );
            return Err(SrtpError::SrtcpSsrcDuplicated(ssrc, index));
        }

        let dst = match self.cipher.decrypt_rtcp(ciphertext, index, ssrc) {
            Ok(dst) => dst,
            Err(e) => {
                if e.is_auth_failure() {
                    sink_error!(
                        logger,
                        "[SRTCP] Auth Fail: SSRC={:#x} Index={} Len={}",
                        ssrc,
                        index,
                        ciphertext.len()
                    );
                }
                return Err(e);
            }
        };

        self.srtcp_ssrc_state(ssrc).replay_detector.accept();

        sink_trace!(
            logger,
            "[SRTCP] Unprotect Success: SSRC={:#x} Index={}",
            ssrc,
            index
        );
        Ok(dst)
    }

    /// Encrypts a marshaled RTCP packet (or compound packet) under the next
    /// SRTCP index of its sender SSRC.
    pub fn encrypt_rtcp(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, SrtpError> {
        let (_, ssrc) = CommonHeader::decode_sender_ssrc(plaintext)?;
        let index = self.srtcp_ssrc_state(ssrc).next_index();

        let dst = self.cipher.encrypt_rtcp(plaintext, index, ssrc)?;

        sink_trace!(
            self.logger,
            "[SRTCP] Protected Packet: SSRC={:#x} Index={} Len={}",
            ssrc,
            index,
            dst.len()
        );
        Ok(dst)
    }
}
