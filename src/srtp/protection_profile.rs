use std::fmt;
use std::str::FromStr;

use crate::srtp::srtp_error::SrtpError;

/// SRTP protection profile: the cipher family plus fixed key, salt and tag
/// lengths, similar to a TLS cipher suite (RFC 5764 §4.1.2, RFC 7714 §14.2).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ProtectionProfile {
    #[default]
    Aes128CmHmacSha1_80 = 0x0001,
    Aes128CmHmacSha1_32 = 0x0002,
    AeadAes128Gcm = 0x0007,
    AeadAes256Gcm = 0x0008,
}

impl ProtectionProfile {
    pub const ALL: [ProtectionProfile; 4] = [
        ProtectionProfile::Aes128CmHmacSha1_80,
        ProtectionProfile::Aes128CmHmacSha1_32,
        ProtectionProfile::AeadAes128Gcm,
        ProtectionProfile::AeadAes256Gcm,
    ];

    pub fn key_len(&self) -> usize {
        match *self {
            ProtectionProfile::Aes128CmHmacSha1_32
            | ProtectionProfile::Aes128CmHmacSha1_80
            | ProtectionProfile::AeadAes128Gcm => 16,
            ProtectionProfile::AeadAes256Gcm => 32,
        }
    }

    pub fn salt_len(&self) -> usize {
        match *self {
            ProtectionProfile::Aes128CmHmacSha1_32 | ProtectionProfile::Aes128CmHmacSha1_80 => 14,
            ProtectionProfile::AeadAes128Gcm | ProtectionProfile::AeadAes256Gcm => 12,
        }
    }

    /// Trailing tag appended to SRTP packets (zero for AEAD profiles).
    pub fn rtp_auth_tag_len(&self) -> usize {
        match *self {
            ProtectionProfile::Aes128CmHmacSha1_80 => 10,
            ProtectionProfile::Aes128CmHmacSha1_32 => 4,
            ProtectionProfile::AeadAes128Gcm | ProtectionProfile::AeadAes256Gcm => 0,
        }
    }

    /// Trailing tag appended to SRTCP packets; RFC 3711 keeps 80 bits for
    /// RTCP even under the `_32` profile.
    pub fn rtcp_auth_tag_len(&self) -> usize {
        match *self {
            ProtectionProfile::Aes128CmHmacSha1_80 | ProtectionProfile::Aes128CmHmacSha1_32 => 10,
            ProtectionProfile::AeadAes128Gcm | ProtectionProfile::AeadAes256Gcm => 0,
        }
    }

    /// Tag carried inside the AEAD ciphertext.
    pub fn aead_auth_tag_len(&self) -> usize {
        match *self {
            ProtectionProfile::Aes128CmHmacSha1_80 | ProtectionProfile::Aes128CmHmacSha1_32 => 0,
            ProtectionProfile::AeadAes128Gcm | ProtectionProfile::AeadAes256Gcm => 16,
        }
    }

    pub fn auth_key_len(&self) -> usize {
        match *self {
            ProtectionProfile::Aes128CmHmacSha1_80 | ProtectionProfile::Aes128CmHmacSha1_32 => 20,
            ProtectionProfile::AeadAes128Gcm | ProtectionProfile::AeadAes256Gcm => 0,
        }
    }

    pub fn is_aead(&self) -> bool {
        self.aead_auth_tag_len() > 0
    }

    /// Length of the DTLS exporter output needed for both directions.
    pub fn keying_material_len(&self) -> usize {
        2 * (self.key_len() + self.salt_len())
    }

    pub fn wire_code(&self) -> u16 {
        *self as u16
    }

    /// Name used by DTLS-SRTP (`use_srtp`) negotiation, e.g. in OpenSSL.
    pub fn dtls_name(&self) -> &'static str {
        match *self {
            ProtectionProfile::Aes128CmHmacSha1_80 => "SRTP_AES128_CM_SHA1_80",
            ProtectionProfile::Aes128CmHmacSha1_32 => "SRTP_AES128_CM_SHA1_32",
            ProtectionProfile::AeadAes128Gcm => "SRTP_AEAD_AES_128_GCM",
            ProtectionProfile::AeadAes256Gcm => "SRTP_AEAD_AES_256_GCM",
        }
    }
}

impl TryFrom<u16> for ProtectionProfile {
    type Error = SrtpError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        ProtectionProfile::ALL
            .into_iter()
            .find(|p| p.wire_code() == code)
            .ok_or_else(|| SrtpError::UnknownProfile(format!("{code:#06x}")))
    }
}

impl FromStr for ProtectionProfile {
    type Err = SrtpError;

    /// Accepts the DTLS-SRTP name, the SDES name (`AES_CM_128_HMAC_SHA1_80`,
    /// `AEAD_AES_128_GCM`) or the wire code (`0x0007` / `7`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let by_name = match s.to_ascii_uppercase().as_str() {
            "SRTP_AES128_CM_SHA1_80" | "AES_CM_128_HMAC_SHA1_80" | "AES128_CM_HMAC_SHA1_80" => {
                Some(ProtectionProfile::Aes128CmHmacSha1_80)
            }
            "SRTP_AES128_CM_SHA1_32" | "AES_CM_128_HMAC_SHA1_32" | "AES128_CM_HMAC_SHA1_32" => {
                Some(ProtectionProfile::Aes128CmHmacSha1_32)
            }
            "SRTP_AEAD_AES_128_GCM" | "AEAD_AES_128_GCM" => Some(ProtectionProfile::AeadAes128Gcm),
            "SRTP_AEAD_AES_256_GCM" | "AEAD_AES_256_GCM" => Some(ProtectionProfile::AeadAes256Gcm),
            _ => None,
        };
        if let Some(profile) = by_name {
            return Ok(profile);
        }

        let code = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u16::from_str_radix(hex, 16),
            None => s.parse::<u16>(),
        }
        .map_err(|_| SrtpError::UnknownProfile(s.to_string()))?;
        ProtectionProfile::try_from(code)
    }
}

impl fmt::Display for ProtectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dtls_name())
    }
}
