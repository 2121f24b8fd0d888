use std::sync::Arc;

use byteorder::{BigEndian, WriteBytesExt};
use rand::{Rng, RngCore};
use rustysrtp::config::Config;
use rustysrtp::log::{ChannelLogSink, LogLevel, LogSink, NoopLogSink};
use rustysrtp::srtp::{
    ContextOptions, ProtectionProfile, SrtpContext, SrtpEndpointKeys, SrtpError, SrtpOptions,
};

const SSRC: u32 = 0x0BAD_CAFE;

fn random_keys(profile: ProtectionProfile) -> SrtpEndpointKeys {
    let mut rng = rand::thread_rng();
    let mut key = vec![0u8; profile.key_len()];
    let mut salt = vec![0u8; profile.salt_len()];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut salt);
    SrtpEndpointKeys::new(key, salt)
}

fn pair_with(
    profile: ProtectionProfile,
    logger: Arc<dyn LogSink>,
    inbound: ContextOptions,
) -> (SrtpContext, SrtpContext) {
    let keys = random_keys(profile);
    let tx = SrtpContext::with_options(logger.clone(), profile, keys.clone(), ContextOptions::outbound())
        .unwrap();
    let rx = SrtpContext::with_options(logger, profile, keys, inbound).unwrap();
    (tx, rx)
}

fn pair(profile: ProtectionProfile) -> (SrtpContext, SrtpContext) {
    pair_with(profile, Arc::new(NoopLogSink), ContextOptions::default())
}

/// RTP packet with one CSRC and a one-byte-header extension.
fn rtp_packet(seq: u16, payload: &[u8]) -> Vec<u8> {
    let mut pkt = Vec::new();
    pkt.write_u8(0x80 | 0x10 | 0x01).unwrap(); // V=2, X, CC=1
    pkt.write_u8(96).unwrap();
    pkt.write_u16::<BigEndian>(seq).unwrap();
    pkt.write_u32::<BigEndian>(seq as u32 * 3000).unwrap();
    pkt.write_u32::<BigEndian>(SSRC).unwrap();
    pkt.write_u32::<BigEndian>(0x0102_0304).unwrap(); // CSRC
    pkt.write_u16::<BigEndian>(0xBEDE).unwrap();
    pkt.write_u16::<BigEndian>(1).unwrap();
    pkt.write_u32::<BigEndian>(0x1000_0000).unwrap();
    pkt.extend_from_slice(payload);
    pkt
}

/// Empty receiver report followed by opaque trailing bytes.
fn rtcp_packet(payload: &[u8]) -> Vec<u8> {
    let mut pkt = Vec::new();
    pkt.write_u8(0x80).unwrap(); // RR, RC=0
    pkt.write_u8(201).unwrap();
    pkt.write_u16::<BigEndian>(1).unwrap();
    pkt.write_u32::<BigEndian>(SSRC).unwrap();
    pkt.extend_from_slice(payload);
    pkt
}

fn random_payload() -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(1..1200);
    let mut payload = vec![0u8; len];
    rng.fill_bytes(&mut payload);
    payload
}

#[test]
fn round_trip_every_profile() {
    for profile in ProtectionProfile::ALL {
        let (mut tx, mut rx) = pair(profile);
        for seq in 1000..1050u16 {
            let pkt = rtp_packet(seq, &random_payload());
            let enc = tx.encrypt_rtp(&pkt).unwrap();
            assert_eq!(
                enc.len(),
                pkt.len() + profile.rtp_auth_tag_len() + profile.aead_auth_tag_len()
            );
            assert_eq!(rx.decrypt_rtp(&enc).unwrap(), pkt, "{profile}");

            let ctl = rtcp_packet(&random_payload());
            let enc = tx.encrypt_rtcp(&ctl).unwrap();
            assert_eq!(rx.decrypt_rtcp(&enc).unwrap(), ctl, "{profile}");
        }
    }
}

#[test]
fn any_flipped_bit_fails_authentication() {
    for profile in ProtectionProfile::ALL {
        let (mut tx, mut rx) = pair(profile);
        let pkt = rtp_packet(1, b"sixteen byte pay");
        let enc = tx.encrypt_rtp(&pkt).unwrap();

        // skip the sequence number and SSRC, which select other state
        for i in (0..enc.len()).filter(|i| !(2..4).contains(i) && !(8..12).contains(i)) {
            let mut bad = enc.clone();
            bad[i] ^= 0x04;
            let err = rx.decrypt_rtp(&bad).unwrap_err();
            assert!(
                err.is_auth_failure() || matches!(err, SrtpError::Rtp(_) | SrtpError::SrtpTooSmall(..)),
                "{profile} byte {i}: {err}"
            );
        }
        // nothing consumed the window
        assert_eq!(rx.decrypt_rtp(&enc).unwrap(), pkt);
    }
}

#[test]
fn replayed_packets_are_rejected() {
    let (mut tx, mut rx) = pair(ProtectionProfile::AeadAes256Gcm);

    let enc = tx.encrypt_rtp(&rtp_packet(42, b"x")).unwrap();
    rx.decrypt_rtp(&enc).unwrap();
    let err = rx.decrypt_rtp(&enc).unwrap_err();
    assert!(err.is_replay());
    assert_eq!(err, SrtpError::SrtpSsrcDuplicated(SSRC, 42));

    let enc = tx.encrypt_rtcp(&rtcp_packet(b"sdes")).unwrap();
    rx.decrypt_rtcp(&enc).unwrap();
    assert_eq!(
        rx.decrypt_rtcp(&enc).unwrap_err(),
        SrtpError::SrtcpSsrcDuplicated(SSRC, 1)
    );
}

#[test]
fn rollover_and_late_pre_wrap_packet() {
    let (mut tx, mut rx) = pair(ProtectionProfile::Aes128CmHmacSha1_80);

    let sent: Vec<(u16, Vec<u8>)> = [65530u16, 65533, 0, 1]
        .into_iter()
        .map(|seq| (seq, tx.encrypt_rtp(&rtp_packet(seq, b"media")).unwrap()))
        .collect();
    assert_eq!(tx.roc(SSRC).unwrap(), 1);

    // receive 65530, 0, 1, then 65533 late
    for idx in [0usize, 2, 3, 1] {
        let (seq, enc) = &sent[idx];
        assert_eq!(rx.decrypt_rtp(enc).unwrap(), rtp_packet(*seq, b"media"));
        let expected_roc = if *seq >= 65530 { 0 } else { 1 };
        assert_eq!(rx.roc(SSRC).unwrap(), expected_roc, "after seq {seq}");
    }

    let enc = tx.encrypt_rtp(&rtp_packet(2, b"media")).unwrap();
    rx.decrypt_rtp(&enc).unwrap();
    assert_eq!(rx.roc(SSRC).unwrap(), 1);
}

#[test]
fn replay_protection_from_config() {
    let cfg = Config::parse(
        "# receiver tuning\n[srtp]\nprofile = 0x0007\nrtp_replay = bounded\nrtp_replay_window = 4\nrtcp_replay = disabled\n",
    );
    let opts = SrtpOptions::from_config(&cfg).unwrap();
    assert_eq!(opts.profile, Some(ProtectionProfile::AeadAes128Gcm));

    let (mut tx, mut rx) = pair_with(
        opts.profile.unwrap_or_default(),
        Arc::new(NoopLogSink),
        opts.inbound,
    );

    let old = tx.encrypt_rtp(&rtp_packet(10, b"a")).unwrap();
    for seq in 11..=14 {
        rx.decrypt_rtp(&tx.encrypt_rtp(&rtp_packet(seq, b"a")).unwrap()).unwrap();
    }
    // 4 behind the newest with a 4-packet window
    assert!(rx.decrypt_rtp(&old).unwrap_err().is_replay());

    // RTCP replay checks are off
    let ctl = tx.encrypt_rtcp(&rtcp_packet(b"bye!")).unwrap();
    rx.decrypt_rtcp(&ctl).unwrap();
    rx.decrypt_rtcp(&ctl).unwrap();
}

#[test]
fn auth_failures_and_replays_reach_the_log_sink() {
    let (sink, logs) = ChannelLogSink::bounded(16, LogLevel::Warn);
    let (mut tx, mut rx) = pair_with(
        ProtectionProfile::Aes128CmHmacSha1_80,
        Arc::new(sink),
        ContextOptions::default(),
    );

    let mut enc = tx.encrypt_rtp(&rtp_packet(5, b"hello")).unwrap();
    let last = enc.len() - 1;
    enc[last] ^= 0xFF;
    assert_eq!(rx.decrypt_rtp(&enc), Err(SrtpError::RtpFailedToVerifyAuthTag));

    let msg = logs.try_recv().unwrap();
    assert_eq!(msg.level, LogLevel::Error);
    assert!(msg.text.contains("Auth Fail"), "{}", msg.text);
    assert!(msg.target.ends_with("srtp_context"));

    enc[last] ^= 0xFF;
    rx.decrypt_rtp(&enc).unwrap();
    rx.decrypt_rtp(&enc).unwrap_err();
    let msg = logs.try_recv().unwrap();
    assert_eq!(msg.level, LogLevel::Warn);
    assert!(msg.text.contains("Replay"), "{}", msg.text);

    // debug/trace messages were filtered by the sink
    assert!(logs.try_recv().is_err());
}

#[test]
fn context_can_move_to_another_thread() {
    let (mut tx, mut rx) = pair(ProtectionProfile::Aes128CmHmacSha1_32);
    let enc = std::thread::spawn(move || tx.encrypt_rtp(&rtp_packet(7, b"threaded")).unwrap())
        .join()
        .unwrap();
    assert_eq!(rx.decrypt_rtp(&enc).unwrap(), rtp_packet(7, b"threaded"));
}
