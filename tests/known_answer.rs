use std::sync::Arc;

use rustysrtp::log::{LogSink, NoopLogSink};
use rustysrtp::srtp::{
    ContextOptions, ProtectionProfile, SrtpContext, SrtpEndpointKeys, constants::MAX_SRTCP_INDEX,
};

const SSRC: u32 = 0x66ef_91ff;

fn master_key() -> Vec<u8> {
    (0x10..0x20).collect()
}

fn master_salt(len: usize) -> Vec<u8> {
    (0xA0..0xAE).take(len).collect()
}

fn contexts(profile: ProtectionProfile) -> (SrtpContext, SrtpContext) {
    let log: Arc<dyn LogSink> = Arc::new(NoopLogSink);
    let keys = SrtpEndpointKeys::new(master_key(), master_salt(profile.salt_len()));
    let tx = SrtpContext::with_options(log.clone(), profile, keys.clone(), ContextOptions::outbound())
        .unwrap();
    let rx = SrtpContext::new(log, profile, keys).unwrap();
    (tx, rx)
}

const RTCP_PLAIN: [u8; 28] = [
    0x81, 0xc8, 0x00, 0x06, 0x66, 0xef, 0x91, 0xff, 0xdf, 0x48, 0x80, 0xdd, 0xdb, 0x0e, 0x3e, 0x44,
    0x00, 0x00, 0x03, 0xe8, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x2a,
];

const RTCP_CM_80: [u8; 42] = [
    0x81, 0xc8, 0x00, 0x06, 0x66, 0xef, 0x91, 0xff, 0xc5, 0xd2, 0x1c, 0x3a, 0xfd, 0x44, 0x17, 0x27,
    0x5b, 0xdc, 0x7d, 0xea, 0xc6, 0xd8, 0xb7, 0xc0, 0xd7, 0xa5, 0x67, 0xd6, 0x80, 0x00, 0x00, 0x00,
    0x08, 0xd8, 0xae, 0x39, 0xab, 0x91, 0x4e, 0x29, 0x9e, 0x0e,
];

const RTCP_GCM_128: [u8; 48] = [
    0x81, 0xc8, 0x00, 0x06, 0x66, 0xef, 0x91, 0xff, 0xd7, 0xb8, 0xbe, 0x13, 0x9f, 0x99, 0x5c, 0x88,
    0xd3, 0xfa, 0xa1, 0x3f, 0x79, 0x45, 0x49, 0x0a, 0x98, 0x3e, 0xc8, 0x0a, 0x8b, 0xe4, 0xdc, 0x46,
    0x0d, 0x6f, 0x09, 0x06, 0x03, 0x09, 0x28, 0x3f, 0x14, 0x15, 0xbd, 0x7c, 0x80, 0x00, 0x00, 0x00,
];

const RTP_PLAIN: [u8; 28] = [
    0x80, 0x0f, 0x12, 0x34, 0xde, 0xca, 0xfb, 0xad, 0xca, 0xfe, 0xba, 0xbe, 0xab, 0xab, 0xab, 0xab,
    0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab, 0xab,
];

const RTP_CM_80: [u8; 38] = [
    0x80, 0x0f, 0x12, 0x34, 0xde, 0xca, 0xfb, 0xad, 0xca, 0xfe, 0xba, 0xbe, 0x68, 0x65, 0xaa, 0x11,
    0x9c, 0x34, 0xfe, 0xe2, 0xf0, 0x62, 0x3e, 0x90, 0x2e, 0x78, 0x51, 0x51, 0x1e, 0x43, 0x9f, 0x99,
    0x9c, 0xc7, 0x5c, 0x69, 0x29, 0x23,
];

const RTP_GCM_128: [u8; 44] = [
    0x80, 0x0f, 0x12, 0x34, 0xde, 0xca, 0xfb, 0xad, 0xca, 0xfe, 0xba, 0xbe, 0x76, 0x20, 0xca, 0x09,
    0xb3, 0xce, 0x07, 0xd0, 0xa3, 0x74, 0x78, 0x8f, 0x0b, 0xaf, 0x8d, 0x63, 0x39, 0xec, 0x72, 0x69,
    0x26, 0x9d, 0x57, 0xb6, 0xfe, 0x4a, 0x12, 0x92, 0xcc, 0x2b, 0x2e, 0x37,
];

#[test]
fn srtcp_aes_cm_80_index_zero() {
    let (mut tx, mut rx) = contexts(ProtectionProfile::Aes128CmHmacSha1_80);

    assert_eq!(rx.decrypt_rtcp(&RTCP_CM_80).unwrap(), RTCP_PLAIN);

    // the index is pre-incremented, so seed it one below zero
    tx.set_index(SSRC, MAX_SRTCP_INDEX);
    assert_eq!(tx.encrypt_rtcp(&RTCP_PLAIN).unwrap(), RTCP_CM_80);
}

#[test]
fn srtcp_aead_aes_128_gcm_index_zero() {
    let (mut tx, mut rx) = contexts(ProtectionProfile::AeadAes128Gcm);

    assert_eq!(rx.decrypt_rtcp(&RTCP_GCM_128).unwrap(), RTCP_PLAIN);

    tx.set_index(SSRC, MAX_SRTCP_INDEX);
    assert_eq!(tx.encrypt_rtcp(&RTCP_PLAIN).unwrap(), RTCP_GCM_128);
}

#[test]
fn srtp_aes_cm_80() {
    let (mut tx, mut rx) = contexts(ProtectionProfile::Aes128CmHmacSha1_80);
    assert_eq!(tx.encrypt_rtp(&RTP_PLAIN).unwrap(), RTP_CM_80);
    assert_eq!(rx.decrypt_rtp(&RTP_CM_80).unwrap(), RTP_PLAIN);
}

#[test]
fn srtp_aes_cm_32_is_truncated_80() {
    let (mut tx, mut rx) = contexts(ProtectionProfile::Aes128CmHmacSha1_32);
    let enc = tx.encrypt_rtp(&RTP_PLAIN).unwrap();
    // same keystream and HMAC, shorter tag
    assert_eq!(enc[..], RTP_CM_80[..RTP_CM_80.len() - 6]);
    assert_eq!(rx.decrypt_rtp(&enc).unwrap(), RTP_PLAIN);
}

#[test]
fn srtp_aead_aes_128_gcm() {
    let (mut tx, mut rx) = contexts(ProtectionProfile::AeadAes128Gcm);
    assert_eq!(tx.encrypt_rtp(&RTP_PLAIN).unwrap(), RTP_GCM_128);
    assert_eq!(rx.decrypt_rtp(&RTP_GCM_128).unwrap(), RTP_PLAIN);
}
