use crate::crypto::kdf::{derive_key, DEFAULT_ITERATIONS};
use crate::error::{CodecError, CodecResult};
use crate::pipeline::core::TransformStage;

/// Default MAC length in bytes
const DEFAULT_HASH_LENGTH: usize = 32;

/// Keyed integrity stage
///
/// `encode` computes a PBKDF2-HMAC-SHA-256 MAC over the payload (the payload
/// is the PBKDF2 secret, the configured salt is the key material) and
/// prepends it; `decode` splits the claimed MAC off, recomputes it over the
/// remainder, and rejects any mismatch. With `readable`, the MAC is
/// hex-encoded, doubling its size on the wire.
#[derive(Debug)]
pub struct HashStage {
    salt: Vec<u8>,
    hash_length: usize,
    readable: bool,
    iterations: u32,
}

impl HashStage {
    /// Create an integrity stage with default MAC length and iterations
    pub fn new(salt: impl Into<Vec<u8>>) -> Self {
        Self {
            salt: salt.into(),
            hash_length: DEFAULT_HASH_LENGTH,
            readable: false,
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Create an integrity stage with explicit MAC length, encoding, and
    /// iteration count
    pub fn with_config(
        salt: impl Into<Vec<u8>>,
        hash_length: usize,
        readable: bool,
        iterations: u32,
    ) -> CodecResult<Self> {
        if iterations == 0 {
            return Err(CodecError::ZeroIterations);
        }
        if hash_length == 0 {
            return Err(CodecError::ZeroHashLength);
        }
        Ok(Self {
            salt: salt.into(),
            hash_length,
            readable,
            iterations,
        })
    }

    /// MAC bytes as they appear on the wire
    fn mac(&self, payload: &[u8]) -> CodecResult<Vec<u8>> {
        let mac = derive_key(payload, &self.salt, self.hash_length, self.iterations)?;
        Ok(if self.readable {
            hex::encode(mac).into_bytes()
        } else {
            mac
        })
    }

    fn mac_len(&self) -> usize {
        if self.readable {
            2 * self.hash_length
        } else {
            self.hash_length
        }
    }
}

impl TransformStage for HashStage {
    fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let mut out = self.mac(data)?;
        out.extend_from_slice(data);
        Ok(out)
    }

    fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let mac_len = self.mac_len();
        if data.len() < mac_len {
            return Err(CodecError::MissingIntegrityHash);
        }
        let (claimed, payload) = data.split_at(mac_len);

        let expected = self.mac(payload)?;
        if claimed != expected.as_slice() {
            return Err(CodecError::IntegrityMismatch);
        }
        Ok(payload.to_vec())
    }

    fn name(&self) -> &str {
        "hash"
    }
}
