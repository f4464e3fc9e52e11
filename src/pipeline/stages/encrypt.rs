use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::crypto::{CipherAlgorithm, CipherContext, CipherMode};
use crate::error::{CodecError, CodecResult};
use crate::pipeline::core::TransformStage;

/// Symmetric encryption stage
///
/// Every `encode` draws a fresh OS-random IV and returns `IV || ciphertext`;
/// `decode` splits the IV back off the front. The cipher and mode are picked
/// by configuration name at construction (`aes-256` in CTR mode by default).
/// Key material longer than the cipher's key size is truncated to fit;
/// shorter material is rejected.
///
/// The underlying cipher context is acquired per call, used for exactly one
/// operation, and released with its key wiped on every exit path.
#[derive(Debug)]
pub struct EncryptStage {
    key: Zeroizing<Vec<u8>>,
    algorithm: CipherAlgorithm,
    mode: CipherMode,
}

impl EncryptStage {
    /// Create an encryption stage with the default cipher (AES-256-CTR)
    pub fn new(key: impl AsRef<[u8]>) -> CodecResult<Self> {
        Self::build(
            key.as_ref(),
            CipherAlgorithm::default(),
            CipherMode::default(),
        )
    }

    /// Create an encryption stage with a named cipher and mode
    pub fn with_cipher(key: impl AsRef<[u8]>, cipher: &str, mode: &str) -> CodecResult<Self> {
        let algorithm = CipherAlgorithm::from_name(cipher)?;
        let mode = CipherMode::from_name(mode)?;
        Self::build(key.as_ref(), algorithm, mode)
    }

    pub(crate) fn build(
        key: &[u8],
        algorithm: CipherAlgorithm,
        mode: CipherMode,
    ) -> CodecResult<Self> {
        let required = algorithm.key_len();
        if key.len() < required {
            return Err(CodecError::KeyTooShort {
                required,
                provided: key.len(),
            });
        }
        Ok(Self {
            // Longer key material is truncated to the cipher's key size.
            key: Zeroizing::new(key[..required].to_vec()),
            algorithm,
            mode,
        })
    }
}

impl TransformStage for EncryptStage {
    fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let mut iv = vec![0u8; self.mode.iv_len()];
        OsRng.fill_bytes(&mut iv);

        let context = CipherContext::init(self.algorithm, self.mode, &self.key, &iv)?;
        let ciphertext = context.encrypt(data)?;

        let mut out = iv;
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let iv_len = self.mode.iv_len();
        // An IV-only payload is valid: it round-trips the empty plaintext.
        if data.len() < iv_len {
            return Err(CodecError::MissingIv);
        }
        let (iv, ciphertext) = data.split_at(iv_len);

        let context = CipherContext::init(self.algorithm, self.mode, &self.key, iv)?;
        context.decrypt(ciphertext)
    }

    fn name(&self) -> &str {
        "encrypt"
    }
}
