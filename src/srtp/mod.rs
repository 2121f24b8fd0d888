//! SRTP/SRTCP packet protection (RFC 3711, RFC 7714).
//!
//! An [`SrtpContext`] owns one cipher built from a master key and salt and
//! the per-SSRC rollover, index and replay state for one direction of a
//! session. [`SrtpSessionConfig`] builds the outbound/inbound pair from keys
//! exported out of a DTLS-SRTP handshake.
//!
//! ```ignore
//! let options = SrtpOptions::load("srtp.ini")?;
//! let (mut tx, mut rx) = SrtpSessionConfig::from_dtls(ssl, DtlsRole::Client)?
//!     .with_options(&options)?
//!     .build_contexts(logger)?;
//! let wire = tx.encrypt_rtp(&rtp_packet)?;
//! ```
mod cipher;
pub mod constants;
pub mod dtls_role;
pub mod key_derivation;
pub mod keying_material;
pub mod protection_profile;
pub mod replay;
pub mod session_keys;
mod srtcp_context;
pub mod srtp_context;
pub mod srtp_endpoint_keys;
pub mod srtp_error;
pub mod srtp_options;
pub mod srtp_session_config;
mod ssrc_state;
mod utils;

pub use dtls_role::DtlsRole;
pub use key_derivation::aes_cm_key_derivation;
pub use keying_material::{KeyingMaterialExporter, negotiated_profile};
pub use protection_profile::ProtectionProfile;
pub use replay::{ReplayDetector, ReplayProtection};
pub use session_keys::SessionKeys;
pub use srtp_context::SrtpContext;
pub use srtp_endpoint_keys::SrtpEndpointKeys;
pub use srtp_error::SrtpError;
pub use srtp_options::{ContextOptions, SrtpOptions};
pub use srtp_session_config::SrtpSessionConfig;
