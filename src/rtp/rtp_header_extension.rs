/// RFC 3550 generic header extension (profile-specific).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpHeaderExtension {
    /// 16-bit profile-specific identifier.
    pub profile: u16,
    /// Raw extension payload (not including the 4-byte header), a multiple of 4 bytes.
    pub data: Vec<u8>,
}

impl RtpHeaderExtension {
    pub fn new(profile: u16, data: Vec<u8>) -> Self {
        Self { profile, data }
    }

    /// Length of the extension in 32-bit words, as carried on the wire.
    pub fn length_words(&self) -> u16 {
        (self.data.len() / 4) as u16
    }
}
