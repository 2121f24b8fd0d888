use std::sync::Arc;

use openssl::ssl::SslRef;

use crate::log::log_sink::LogSink;
use crate::srtp::dtls_role::DtlsRole;
use crate::srtp::keying_material::{KeyingMaterialExporter, negotiated_profile};
use crate::srtp::protection_profile::ProtectionProfile;
use crate::srtp::session_keys::SessionKeys;
use crate::srtp::srtp_context::SrtpContext;
use crate::srtp::srtp_endpoint_keys::SrtpEndpointKeys;
use crate::srtp::srtp_error::SrtpError;
use crate::srtp::srtp_options::{ContextOptions, SrtpOptions};
use crate::sink_info;

/// Everything needed to build the two contexts of an SRTP session.
#[derive(Debug, Clone)]
pub struct SrtpSessionConfig {
    pub profile: ProtectionProfile,
    pub outbound: SrtpEndpointKeys,
    pub inbound: SrtpEndpointKeys,
    pub inbound_options: ContextOptions,
}

impl SrtpSessionConfig {
    pub fn new(profile: ProtectionProfile, keys: &SessionKeys) -> Self {
        Self {
            profile,
            outbound: keys.local(),
            inbound: keys.remote(),
            inbound_options: ContextOptions::default(),
        }
    }

    pub fn from_exporter<E>(
        exporter: &E,
        profile: ProtectionProfile,
        role: DtlsRole,
    ) -> Result<Self, SrtpError>
    where
        E: KeyingMaterialExporter + ?Sized,
    {
        let keys = SessionKeys::extract_from_exporter(exporter, profile, role)?;
        Ok(Self::new(profile, &keys))
    }

    /// Keys and profile from a finished OpenSSL DTLS-SRTP handshake.
    pub fn from_dtls(ssl: &SslRef, role: DtlsRole) -> Result<Self, SrtpError> {
        let profile = negotiated_profile(ssl)?;
        Self::from_exporter(ssl, profile, role)
    }

    /// Applies config: inbound replay settings, and a check that the
    /// session runs the configured profile if one is set.
    pub fn with_options(mut self, options: &SrtpOptions) -> Result<Self, SrtpError> {
        if let Some(configured) = options.profile.filter(|p| *p != self.profile) {
            return Err(SrtpError::ProfileMismatch {
                configured,
                negotiated: self.profile,
            });
        }
        self.inbound_options = options.inbound;
        Ok(self)
    }

    /// Returns `(outbound, inbound)`. The outbound context never
    /// replay-checks; the inbound one uses `inbound_options`.
    pub fn build_contexts(
        &self,
        logger: Arc<dyn LogSink>,
    ) -> Result<(SrtpContext, SrtpContext), SrtpError> {
        let outbound = SrtpContext::with_options(
            logger.clone(),
            self.profile,
            self.outbound.clone(),
            ContextOptions::outbound(),
        )?;
        let inbound = SrtpContext::with_options(
            logger.clone(),
            self.profile,
            self.inbound.clone(),
            self.inbound_options,
        )?;

        sink_info!(
            logger,
            "[SRTP] Session contexts ready: profile={} inbound_rtp_replay={} inbound_rtcp_replay={}",
            self.profile,
            self.inbound_options.srtp_replay,
            self.inbound_options.srtcp_replay
        );
        Ok((outbound, inbound))
    }
}
