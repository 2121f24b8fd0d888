pub const RTCP_VERSION: u8 = 2;
/// V/P/RC + PT + length.
pub const RTCP_COMMON_HEADER_LEN: usize = 4;
pub const RTCP_SSRC_LEN: usize = 4;
