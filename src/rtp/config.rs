pub const RTP_VERSION: u8 = 2;
/// V/P/X/CC + M/PT + sequence number + timestamp + SSRC.
pub const RTP_FIXED_HEADER_LEN: usize = 12;
pub const RTP_CSRC_LEN: usize = 4;
/// The CC field is 4 bits wide.
pub const MAX_CSRC_COUNT: usize = 15;
pub const RTP_EXTENSION_HEADER_LEN: usize = 4;
