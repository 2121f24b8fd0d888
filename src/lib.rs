//! RustySRTP is the SRTP/SRTCP transform layer of a WebRTC media stack.
//!
//! It derives session keys from a DTLS-SRTP master secret, protects and
//! unprotects RTP/RTCP packets with AES-CM + HMAC-SHA1 or AES-GCM, tracks
//! rollover counters and rejects replayed packets.
//!
//! The crate is structured into several modules; `srtp` holds the
//! transform, the others are the pieces it leans on.

/// Handles configuration loading and management.
pub mod config;
/// Logging utilities for the crate.
pub mod log;
/// RTCP common header parsing and building.
pub mod rtcp;
/// RTP header parsing and building.
pub mod rtp;
/// SRTP (Secure Real-time Transport Protocol) implementation.
pub mod srtp;
