//! Minimal RTP header codec (RFC 3550 §5.1).
//!
//! SRTP only needs the header fields that feed the cipher (SSRC, sequence
//! number) and the header length that separates the authenticated-only
//! prefix from the encrypted payload, so there is no payload model here.
pub mod config;
pub mod rtp_error;
pub mod rtp_header;
pub mod rtp_header_extension;
pub use rtp_error::RtpError;
pub use rtp_header::RtpHeader;
pub use rtp_header_extension::RtpHeaderExtension;
