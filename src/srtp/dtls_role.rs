/// Which side of the DTLS handshake we were. Decides which half of the
/// exported keying material is ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtlsRole {
    Client,
    Server,
}
