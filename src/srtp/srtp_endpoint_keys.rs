/// Master key and salt for one direction of a session.
#[derive(Clone, PartialEq, Eq)]
pub struct SrtpEndpointKeys {
    pub master_key: Vec<u8>,
    pub master_salt: Vec<u8>,
}

impl SrtpEndpointKeys {
    pub fn new(master_key: impl Into<Vec<u8>>, master_salt: impl Into<Vec<u8>>) -> Self {
        Self {
            master_key: master_key.into(),
            master_salt: master_salt.into(),
        }
    }
}

// Key material stays out of Debug output.
impl std::fmt::Debug for SrtpEndpointKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SrtpEndpointKeys")
            .field("master_key_len", &self.master_key.len())
            .field("master_salt_len", &self.master_salt.len())
            .finish()
    }
}
