use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtpError {
    TooShort,
    BadVersion(u8),
    CsrcCountMismatch { expected: usize, buf_left: usize },
    HeaderExtensionTooShort,
    ExtensionNotWordAligned(usize),
    TooManyCsrcs(usize),
}

impl fmt::Display for RtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RtpError::*;
        match self {
            TooShort => write!(f, "buffer too short for RTP header"),
            BadVersion(v) => write!(f, "bad RTP version: {v}"),
            CsrcCountMismatch { expected, buf_left } => write!(
                f,
                "CSRC count mismatch: expected {}×4 bytes, but only {} bytes remain",
                expected, buf_left
            ),
            HeaderExtensionTooShort => write!(f, "RTP header extension too short"),
            ExtensionNotWordAligned(len) => {
                write!(f, "RTP header extension of {len} bytes is not a multiple of 4")
            }
            TooManyCsrcs(n) => write!(f, "{n} CSRCs do not fit the 4-bit CC field (max 15)"),
        }
    }
}

impl std::error::Error for RtpError {}
