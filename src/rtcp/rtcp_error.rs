use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtcpError {
    TooShort,
    BadVersion(u8),
    MissingSsrc,
}

impl fmt::Display for RtcpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RtcpError::*;
        match self {
            TooShort => write!(f, "buffer too short for RTCP header"),
            BadVersion(v) => write!(f, "bad RTCP version: {v}"),
            MissingSsrc => write!(f, "RTCP packet has no sender SSRC"),
        }
    }
}
impl std::error::Error for RtcpError {}
