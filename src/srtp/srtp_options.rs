use crate::config::{Config, ConfigError};
use crate::srtp::protection_profile::ProtectionProfile;
use crate::srtp::replay::ReplayProtection;
use crate::srtp::srtp_error::SrtpError;

const SECTION: &str = "srtp";

/// Replay protection used by a context for new RTP and RTCP streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextOptions {
    pub srtp_replay: ReplayProtection,
    pub srtcp_replay: ReplayProtection,
}

impl ContextOptions {
    /// Options for a sending context, which never replay-checks itself.
    pub fn outbound() -> Self {
        Self {
            srtp_replay: ReplayProtection::Disabled,
            srtcp_replay: ReplayProtection::Disabled,
        }
    }

    pub fn with_srtp_replay(mut self, replay: ReplayProtection) -> Self {
        self.srtp_replay = replay;
        self
    }

    pub fn with_srtcp_replay(mut self, replay: ReplayProtection) -> Self {
        self.srtcp_replay = replay;
        self
    }
}

/// Session-level settings read from the `[srtp]` config section.
///
/// ```ini
/// [srtp]
/// profile = SRTP_AEAD_AES_128_GCM
/// rtp_replay = wrapped
/// rtp_replay_window = 128
/// rtcp_replay = bounded
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SrtpOptions {
    /// Required profile; a session built from keys or a DTLS handshake
    /// under a different profile is rejected. `None` accepts any.
    pub profile: Option<ProtectionProfile>,
    /// Applied to the inbound (decrypting) context.
    pub inbound: ContextOptions,
}

impl SrtpOptions {
    /// Reads the `[srtp]` section of the INI file at `path`.
    pub fn load(path: &str) -> Result<Self, SrtpError> {
        let cfg = Config::load(path)?;
        Ok(Self::from_config(&cfg)?)
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let profile = cfg.get_parsed::<ProtectionProfile>(SECTION, "profile")?;
        let srtp_replay = read_replay(cfg, "rtp_replay", "rtp_replay_window")?;
        let srtcp_replay = read_replay(cfg, "rtcp_replay", "rtcp_replay_window")?;

        Ok(Self {
            profile,
            inbound: ContextOptions {
                srtp_replay,
                srtcp_replay,
            },
        })
    }
}

fn read_replay(cfg: &Config, kind_key: &str, window_key: &str) -> Result<ReplayProtection, ConfigError> {
    let kind = cfg
        .get_parsed::<ReplayProtection>(SECTION, kind_key)?
        .unwrap_or_default();
    Ok(match cfg.get_parsed::<usize>(SECTION, window_key)? {
        Some(window_size) => kind.with_window_size(window_size),
        None => kind,
    })
}
