use std::fmt;

use crate::config::ConfigError;
use crate::rtcp::RtcpError;
use crate::rtp::RtpError;
use crate::srtp::protection_profile::ProtectionProfile;

/// Errors produced by the SRTP/SRTCP transform.
///
/// Every variant is scoped to the packet (or the construction call) that
/// produced it; none of them poisons the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SrtpError {
    /// Packet shorter than its claimed structure: `(len, min)`.
    SrtpTooSmall(usize, usize),
    SrtcpTooSmall(usize, usize),
    /// `(expected, actual)`
    SrtpMasterKeyLength(usize, usize),
    /// `(expected, actual)`
    SrtpSaltLength(usize, usize),
    UnsupportedIndexOverKdr,
    InvalidKeyLength(usize),
    RtpFailedToVerifyAuthTag,
    RtcpFailedToVerifyAuthTag,
    AeadSealFailed,
    /// Replayed or too old: `(ssrc, sequence number)`.
    SrtpSsrcDuplicated(u32, u16),
    /// Replayed or too old: `(ssrc, srtcp index)`.
    SrtcpSsrcDuplicated(u32, u32),
    SsrcMissingFromSrtp(u32),
    SsrcMissingFromSrtcp(u32),
    UnknownProfile(String),
    /// Session profile differs from the one required by config.
    ProfileMismatch {
        configured: ProtectionProfile,
        negotiated: ProtectionProfile,
    },
    KeyExport(String),
    Rtp(RtpError),
    Rtcp(RtcpError),
    Config(ConfigError),
}

impl SrtpError {
    /// True for the two outcomes that indicate tampering or a wrong key.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            SrtpError::RtpFailedToVerifyAuthTag | SrtpError::RtcpFailedToVerifyAuthTag
        )
    }

    /// True when the replay window rejected the packet.
    pub fn is_replay(&self) -> bool {
        matches!(
            self,
            SrtpError::SrtpSsrcDuplicated(..) | SrtpError::SrtcpSsrcDuplicated(..)
        )
    }
}

impl fmt::Display for SrtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SrtpError::*;
        match self {
            SrtpTooSmall(len, min) => write!(f, "SRTP packet too small: {len} < {min} bytes"),
            SrtcpTooSmall(len, min) => write!(f, "SRTCP packet too small: {len} < {min} bytes"),
            SrtpMasterKeyLength(expected, actual) => write!(
                f,
                "SRTP master key length mismatch: expected {expected}, got {actual}"
            ),
            SrtpSaltLength(expected, actual) => write!(
                f,
                "SRTP master salt length mismatch: expected {expected}, got {actual}"
            ),
            UnsupportedIndexOverKdr => write!(f, "index_over_kdr > 0 is not supported"),
            InvalidKeyLength(len) => write!(f, "invalid cipher key length: {len}"),
            RtpFailedToVerifyAuthTag => write!(f, "failed to verify RTP auth tag"),
            RtcpFailedToVerifyAuthTag => write!(f, "failed to verify RTCP auth tag"),
            AeadSealFailed => write!(f, "AEAD seal failed"),
            SrtpSsrcDuplicated(ssrc, seq) => {
                write!(f, "srtp ssrc={ssrc:#x} seq={seq}: duplicated or too old")
            }
            SrtcpSsrcDuplicated(ssrc, index) => {
                write!(f, "srtcp ssrc={ssrc:#x} index={index}: duplicated or too old")
            }
            SsrcMissingFromSrtp(ssrc) => write!(f, "ssrc {ssrc:#x} not exist in srtp state"),
            SsrcMissingFromSrtcp(ssrc) => write!(f, "ssrc {ssrc:#x} not exist in srtcp state"),
            UnknownProfile(name) => write!(f, "unknown SRTP protection profile: {name}"),
            ProfileMismatch {
                configured,
                negotiated,
            } => write!(
                f,
                "SRTP profile {negotiated} does not match configured profile {configured}"
            ),
            KeyExport(reason) => write!(f, "keying material export failed: {reason}"),
            Rtp(e) => write!(f, "RTP header: {e}"),
            Rtcp(e) => write!(f, "RTCP header: {e}"),
            Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for SrtpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SrtpError::Rtp(e) => Some(e),
            SrtpError::Rtcp(e) => Some(e),
            SrtpError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RtpError> for SrtpError {
    fn from(e: RtpError) -> Self {
        SrtpError::Rtp(e)
    }
}

impl From<RtcpError> for SrtpError {
    fn from(e: RtcpError) -> Self {
        SrtpError::Rtcp(e)
    }
}

impl From<ConfigError> for SrtpError {
    fn from(e: ConfigError) -> Self {
        SrtpError::Config(e)
    }
}
