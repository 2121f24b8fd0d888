use openssl::ssl::SslRef;

use crate::srtp::protection_profile::ProtectionProfile;
use crate::srtp::srtp_error::SrtpError;

/// RFC 5705 keying material exporter of a completed handshake.
pub trait KeyingMaterialExporter {
    fn export_keying_material(
        &self,
        label: &str,
        context: &[u8],
        length: usize,
    ) -> Result<Vec<u8>, SrtpError>;
}

impl KeyingMaterialExporter for SslRef {
    fn export_keying_material(
        &self,
        label: &str,
        context: &[u8],
        length: usize,
    ) -> Result<Vec<u8>, SrtpError> {
        let mut out = vec![0u8; length];
        let context = (!context.is_empty()).then_some(context);
        SslRef::export_keying_material(self, &mut out, label, context)
            .map_err(|e| SrtpError::KeyExport(e.to_string()))?;
        Ok(out)
    }
}

/// Protection profile chosen by the `use_srtp` extension of an OpenSSL
/// DTLS session.
pub fn negotiated_profile(ssl: &SslRef) -> Result<ProtectionProfile, SrtpError> {
    let selected = ssl
        .selected_srtp_profile()
        .ok_or_else(|| SrtpError::UnknownProfile("no SRTP profile negotiated".to_string()))?;
    selected.name().parse()
}
