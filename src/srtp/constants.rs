// Key derivation labels (RFC 3711 §4.3.1, §4.3.2)
pub const LABEL_SRTP_ENCRYPTION: u8 = 0x00;
pub const LABEL_SRTP_AUTHENTICATION_TAG: u8 = 0x01;
pub const LABEL_SRTP_SALT: u8 = 0x02;
pub const LABEL_SRTCP_ENCRYPTION: u8 = 0x03;
pub const LABEL_SRTCP_AUTHENTICATION_TAG: u8 = 0x04;
pub const LABEL_SRTCP_SALT: u8 = 0x05;

/// RFC 5764 §4.2 exporter label.
pub const LABEL_EXTRACTOR_DTLS_SRTP: &str = "EXTRACTOR-dtls_srtp";

/// How far either side of the 16-bit wrap a packet may stray and still be
/// attributed to the neighbouring rollover.
pub const MAX_ROC_DISORDER: u16 = 100;
pub const MAX_SEQUENCE_NUMBER: u16 = u16::MAX;
pub const MAX_SRTCP_INDEX: u32 = 0x7FFF_FFFF;

pub const SRTCP_INDEX_SIZE: usize = 4;
/// E bit of the SRTCP index word.
pub const SRTCP_ENCRYPTION_FLAG: u32 = 0x8000_0000;
/// RTCP common header plus sender SSRC; sent in the clear.
pub const SRTCP_CLEAR_PREFIX_LEN: usize = 8;

pub const AES_BLOCK_LEN: usize = 16;
pub const AEAD_NONCE_LEN: usize = 12;

// Replay protection window size (64 packets)
pub const DEFAULT_REPLAY_WINDOW_SIZE: usize = 64;
