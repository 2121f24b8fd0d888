//! Minimal RTCP header codec (RFC 3550 §6.4).
//!
//! Only the common header and the sender SSRC that follows it are decoded;
//! SRTCP treats the rest of the packet as opaque payload.
pub mod common_header;
pub mod config;
pub mod rtcp_error;
pub use common_header::CommonHeader;
pub use rtcp_error::RtcpError;
