use byteorder::{BigEndian, ByteOrder};

use super::{
    config::{
        MAX_CSRC_COUNT, RTP_CSRC_LEN, RTP_EXTENSION_HEADER_LEN, RTP_FIXED_HEADER_LEN, RTP_VERSION,
    },
    rtp_error::RtpError,
    rtp_header_extension::RtpHeaderExtension,
};

/// RTP fixed header plus CSRC list and optional extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpHeader {
    pub version: u8,      // must be 2
    pub padding: bool,    // P bit
    pub extension: bool,  // X bit
    pub marker: bool,     // M bit
    pub payload_type: u8, // 7 bits
    pub sequence_number: u16,
    pub timestamp: u32,
    pub ssrc: u32,
    pub csrcs: Vec<u32>,
    pub header_extension: Option<RtpHeaderExtension>,
}

impl RtpHeader {
    pub fn new(payload_type: u8, sequence_number: u16, timestamp: u32, ssrc: u32) -> Self {
        Self {
            version: RTP_VERSION,
            padding: false,
            extension: false,
            marker: false,
            payload_type,
            sequence_number,
            timestamp,
            ssrc,
            csrcs: Vec::new(),
            header_extension: None,
        }
    }

    pub fn with_marker(mut self, marker: bool) -> Self {
        self.marker = marker;
        self
    }
    pub fn with_csrcs(mut self, csrcs: Vec<u32>) -> Self {
        self.csrcs = csrcs;
        self
    }
    pub fn with_extension(mut self, ext: Option<RtpHeaderExtension>) -> Self {
        self.extension = ext.is_some();
        self.header_extension = ext;
        self
    }

    /// Parses the header at the start of `buf`.
    ///
    /// Returns the header and its encoded length, i.e. the offset at which the
    /// payload starts. Padding is not interpreted: under SRTP it belongs to
    /// the encrypted payload.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize), RtpError> {
        if buf.len() < RTP_FIXED_HEADER_LEN {
            return Err(RtpError::TooShort);
        }
        let b0 = buf[0];
        let version = b0 >> 6;
        if version != RTP_VERSION {
            return Err(RtpError::BadVersion(version));
        }
        let padding = (b0 & 0x20) != 0;
        let extension = (b0 & 0x10) != 0;
        let csrc_count = (b0 & 0x0F) as usize;

        let b1 = buf[1];
        let marker = (b1 & 0x80) != 0;
        let payload_type = b1 & 0x7F;

        let sequence_number = BigEndian::read_u16(&buf[2..4]);
        let timestamp = BigEndian::read_u32(&buf[4..8]);
        let ssrc = BigEndian::read_u32(&buf[8..12]);

        let mut offset = RTP_FIXED_HEADER_LEN;
        let csrc_bytes = csrc_count * RTP_CSRC_LEN;
        if buf.len() < offset + csrc_bytes {
            return Err(RtpError::CsrcCountMismatch {
                expected: csrc_count,
                buf_left: buf.len() - offset,
            });
        }
        let csrcs = buf[offset..offset + csrc_bytes]
            .chunks_exact(RTP_CSRC_LEN)
            .map(BigEndian::read_u32)
            .collect();
        offset += csrc_bytes;

        let header_extension = if extension {
            if buf.len() < offset + RTP_EXTENSION_HEADER_LEN {
                return Err(RtpError::HeaderExtensionTooShort);
            }
            let profile = BigEndian::read_u16(&buf[offset..offset + 2]);
            let words = BigEndian::read_u16(&buf[offset + 2..offset + 4]) as usize;
            offset += RTP_EXTENSION_HEADER_LEN;
            let ext_len = words * 4;
            if buf.len() < offset + ext_len {
                return Err(RtpError::HeaderExtensionTooShort);
            }
            let data = buf[offset..offset + ext_len].to_vec();
            offset += ext_len;
            Some(RtpHeaderExtension::new(profile, data))
        } else {
            None
        };

        Ok((
            Self {
                version,
                padding,
                extension,
                marker,
                payload_type,
                sequence_number,
                timestamp,
                ssrc,
                csrcs,
                header_extension,
            },
            offset,
        ))
    }

    /// Encoded length of this header in bytes.
    pub fn marshal_size(&self) -> usize {
        let ext = self
            .header_extension
            .as_ref()
            .map_or(0, |e| RTP_EXTENSION_HEADER_LEN + e.data.len());
        RTP_FIXED_HEADER_LEN + self.csrcs.len() * RTP_CSRC_LEN + ext
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), RtpError> {
        if self.csrcs.len() > MAX_CSRC_COUNT {
            return Err(RtpError::TooManyCsrcs(self.csrcs.len()));
        }
        if let Some(ext) = &self.header_extension {
            if ext.data.len() % 4 != 0 {
                return Err(RtpError::ExtensionNotWordAligned(ext.data.len()));
            }
        }
        let b0 = (self.version & 0b11) << 6
            | (self.padding as u8) << 5
            | (self.header_extension.is_some() as u8) << 4
            | self.csrcs.len() as u8;
        out.push(b0);
        out.push((self.marker as u8) << 7 | (self.payload_type & 0x7F));
        out.extend_from_slice(&self.sequence_number.to_be_bytes());
        out.extend_from_slice(&self.timestamp.to_be_bytes());
        out.extend_from_slice(&self.ssrc.to_be_bytes());
        for csrc in &self.csrcs {
            out.extend_from_slice(&csrc.to_be_bytes());
        }
        if let Some(ext) = &self.header_extension {
            out.extend_from_slice(&ext.profile.to_be_bytes());
            out.extend_from_slice(&ext.length_words().to_be_bytes());
            out.extend_from_slice(&ext.data);
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, RtpError> {
        let mut out = Vec::with_capacity(self.marshal_size());
        self.encode_into(&mut out)?;
        Ok(out)
    }
}
