use crate::srtp::constants::LABEL_EXTRACTOR_DTLS_SRTP;
use crate::srtp::dtls_role::DtlsRole;
use crate::srtp::keying_material::KeyingMaterialExporter;
use crate::srtp::protection_profile::ProtectionProfile;
use crate::srtp::srtp_endpoint_keys::SrtpEndpointKeys;
use crate::srtp::srtp_error::SrtpError;

/// Master keys for both directions of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    pub local_master_key: Vec<u8>,
    pub local_master_salt: Vec<u8>,
    pub remote_master_key: Vec<u8>,
    pub remote_master_salt: Vec<u8>,
}

impl SessionKeys {
    /// RFC 5764 §4.2: exports `2 * (key + salt)` bytes laid out as
    /// `client_key ‖ server_key ‖ client_salt ‖ server_salt`, then keeps the
    /// half written by `role` as the local keys.
    pub fn extract_from_exporter<E>(
        exporter: &E,
        profile: ProtectionProfile,
        role: DtlsRole,
    ) -> Result<Self, SrtpError>
    where
        E: KeyingMaterialExporter + ?Sized,
    {
        let key_len = profile.key_len();
        let salt_len = profile.salt_len();
        let total_len = profile.keying_material_len();

        let key_mat =
            exporter.export_keying_material(LABEL_EXTRACTOR_DTLS_SRTP, &[], total_len)?;
        if key_mat.len() != total_len {
            return Err(SrtpError::KeyExport(format!(
                "exporter returned {} bytes, expected {total_len}",
                key_mat.len()
            )));
        }

        let (client_key, rest) = key_mat.split_at(key_len);
        let (server_key, rest) = rest.split_at(key_len);
        let (client_salt, server_salt) = rest.split_at(salt_len);

        let (local_key, local_salt, remote_key, remote_salt) = match role {
            DtlsRole::Client => (client_key, client_salt, server_key, server_salt),
            DtlsRole::Server => (server_key, server_salt, client_key, client_salt),
        };

        Ok(Self {
            local_master_key: local_key.to_vec(),
            local_master_salt: local_salt.to_vec(),
            remote_master_key: remote_key.to_vec(),
            remote_master_salt: remote_salt.to_vec(),
        })
    }

    /// Keys for the outbound (encrypting) context.
    pub fn local(&self) -> SrtpEndpointKeys {
        SrtpEndpointKeys::new(self.local_master_key.clone(), self.local_master_salt.clone())
    }

    /// Keys for the inbound (decrypting) context.
    pub fn remote(&self) -> SrtpEndpointKeys {
        SrtpEndpointKeys::new(self.remote_master_key.clone(), self.remote_master_salt.clone())
    }
}
