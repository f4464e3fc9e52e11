use aes::cipher::consts::U12;
use aes::{Aes128, Aes192, Aes256};
use aes_gcm::aead::Aead;
use aes_gcm::{AesGcm, KeyInit, Nonce};
use ctr::cipher::{KeyIvInit, StreamCipher};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{CodecError, CodecResult};

type Aes128Ctr = ctr::Ctr128BE<Aes128>;
type Aes192Ctr = ctr::Ctr128BE<Aes192>;
type Aes256Ctr = ctr::Ctr128BE<Aes256>;

type Aes128Gcm = AesGcm<Aes128, U12>;
type Aes192Gcm = AesGcm<Aes192, U12>;
type Aes256Gcm = AesGcm<Aes256, U12>;

/// Block cipher selected by configuration name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CipherAlgorithm {
    #[serde(rename = "aes-128")]
    Aes128,
    #[serde(rename = "aes-192")]
    Aes192,
    #[serde(rename = "aes-256")]
    Aes256,
}

impl CipherAlgorithm {
    /// Parse a configuration name such as `"aes-256"`
    pub fn from_name(name: &str) -> CodecResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "aes-128" | "aes128" => Ok(CipherAlgorithm::Aes128),
            "aes-192" | "aes192" => Ok(CipherAlgorithm::Aes192),
            "aes-256" | "aes256" => Ok(CipherAlgorithm::Aes256),
            other => Err(CodecError::UnsupportedCipher(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CipherAlgorithm::Aes128 => "aes-128",
            CipherAlgorithm::Aes192 => "aes-192",
            CipherAlgorithm::Aes256 => "aes-256",
        }
    }

    /// Required key size in bytes
    pub fn key_len(&self) -> usize {
        match self {
            CipherAlgorithm::Aes128 => 16,
            CipherAlgorithm::Aes192 => 24,
            CipherAlgorithm::Aes256 => 32,
        }
    }
}

impl Default for CipherAlgorithm {
    fn default() -> Self {
        CipherAlgorithm::Aes256
    }
}

/// Block cipher mode selected by configuration name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherMode {
    Ctr,
    Gcm,
}

impl CipherMode {
    /// Parse a configuration name such as `"ctr"`
    pub fn from_name(name: &str) -> CodecResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ctr" => Ok(CipherMode::Ctr),
            "gcm" => Ok(CipherMode::Gcm),
            other => Err(CodecError::UnsupportedCipherMode(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CipherMode::Ctr => "ctr",
            CipherMode::Gcm => "gcm",
        }
    }

    /// Required IV size in bytes (a 96-bit nonce for GCM, a full block for CTR)
    pub fn iv_len(&self) -> usize {
        match self {
            CipherMode::Ctr => 16,
            CipherMode::Gcm => 12,
        }
    }
}

impl Default for CipherMode {
    fn default() -> Self {
        CipherMode::Ctr
    }
}

/// One-shot cipher context
///
/// Initialized with key and IV, then consumed by exactly one [`encrypt`] or
/// [`decrypt`] call. Taking `self` by value means a context can never be
/// reused with the same IV, and the key buffer is wiped when the context is
/// dropped on any exit path.
///
/// [`encrypt`]: CipherContext::encrypt
/// [`decrypt`]: CipherContext::decrypt
#[derive(Debug)]
pub struct CipherContext {
    algorithm: CipherAlgorithm,
    mode: CipherMode,
    key: Zeroizing<Vec<u8>>,
    iv: Vec<u8>,
}

impl CipherContext {
    /// Initialize a context with an exact-length key and IV
    pub fn init(
        algorithm: CipherAlgorithm,
        mode: CipherMode,
        key: &[u8],
        iv: &[u8],
    ) -> CodecResult<Self> {
        if key.len() != algorithm.key_len() {
            return Err(CodecError::CipherInit(format!(
                "{} expects a {}-byte key, got {}",
                algorithm.as_str(),
                algorithm.key_len(),
                key.len()
            )));
        }
        if iv.len() != mode.iv_len() {
            return Err(CodecError::CipherInit(format!(
                "{} mode expects a {}-byte IV, got {}",
                mode.as_str(),
                mode.iv_len(),
                iv.len()
            )));
        }
        Ok(Self {
            algorithm,
            mode,
            key: Zeroizing::new(key.to_vec()),
            iv: iv.to_vec(),
        })
    }

    /// Encrypt `plaintext`, consuming the context
    pub fn encrypt(self, plaintext: &[u8]) -> CodecResult<Vec<u8>> {
        match self.mode {
            CipherMode::Ctr => self.apply_keystream(plaintext),
            CipherMode::Gcm => {
                let nonce = Nonce::from_slice(&self.iv);
                let result = match self.algorithm {
                    CipherAlgorithm::Aes128 => {
                        Self::gcm_cipher::<Aes128Gcm>(&self.key)?.encrypt(nonce, plaintext)
                    }
                    CipherAlgorithm::Aes192 => {
                        Self::gcm_cipher::<Aes192Gcm>(&self.key)?.encrypt(nonce, plaintext)
                    }
                    CipherAlgorithm::Aes256 => {
                        Self::gcm_cipher::<Aes256Gcm>(&self.key)?.encrypt(nonce, plaintext)
                    }
                };
                result.map_err(|e| CodecError::CipherInit(format!("encryption failed: {}", e)))
            }
        }
    }

    /// Decrypt `ciphertext`, consuming the context
    pub fn decrypt(self, ciphertext: &[u8]) -> CodecResult<Vec<u8>> {
        match self.mode {
            // CTR turns the block cipher into a stream cipher, so decryption
            // is the same keystream application as encryption.
            CipherMode::Ctr => self.apply_keystream(ciphertext),
            CipherMode::Gcm => {
                let nonce = Nonce::from_slice(&self.iv);
                let result = match self.algorithm {
                    CipherAlgorithm::Aes128 => {
                        Self::gcm_cipher::<Aes128Gcm>(&self.key)?.decrypt(nonce, ciphertext)
                    }
                    CipherAlgorithm::Aes192 => {
                        Self::gcm_cipher::<Aes192Gcm>(&self.key)?.decrypt(nonce, ciphertext)
                    }
                    CipherAlgorithm::Aes256 => {
                        Self::gcm_cipher::<Aes256Gcm>(&self.key)?.decrypt(nonce, ciphertext)
                    }
                };
                result.map_err(|_| {
                    CodecError::DecryptionFailed("authentication tag mismatch".to_string())
                })
            }
        }
    }

    fn gcm_cipher<C: KeyInit>(key: &[u8]) -> CodecResult<C> {
        C::new_from_slice(key).map_err(|e| CodecError::CipherInit(e.to_string()))
    }

    fn apply_keystream(self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let mut buf = data.to_vec();
        match self.algorithm {
            CipherAlgorithm::Aes128 => {
                let mut cipher = Aes128Ctr::new_from_slices(&self.key, &self.iv)
                    .map_err(|e| CodecError::CipherInit(e.to_string()))?;
                cipher.apply_keystream(&mut buf);
            }
            CipherAlgorithm::Aes192 => {
                let mut cipher = Aes192Ctr::new_from_slices(&self.key, &self.iv)
                    .map_err(|e| CodecError::CipherInit(e.to_string()))?;
                cipher.apply_keystream(&mut buf);
            }
            CipherAlgorithm::Aes256 => {
                let mut cipher = Aes256Ctr::new_from_slices(&self.key, &self.iv)
                    .map_err(|e| CodecError::CipherInit(e.to_string()))?;
                cipher.apply_keystream(&mut buf);
            }
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(mode: CipherMode, iv: &[u8]) -> CipherContext {
        CipherContext::init(CipherAlgorithm::Aes256, mode, &[7u8; 32], iv).unwrap()
    }

    #[test]
    fn test_ctr_round_trip() {
        let iv = [1u8; 16];
        let ciphertext = ctx(CipherMode::Ctr, &iv).encrypt(b"attack at dawn").unwrap();
        assert_ne!(ciphertext.as_slice(), b"attack at dawn");

        let plaintext = ctx(CipherMode::Ctr, &iv).decrypt(&ciphertext).unwrap();
        assert_eq!(plaintext, b"attack at dawn");
    }

    #[test]
    fn test_ctr_empty_plaintext() {
        let iv = [1u8; 16];
        let ciphertext = ctx(CipherMode::Ctr, &iv).encrypt(b"").unwrap();
        assert!(ciphertext.is_empty());
        assert_eq!(ctx(CipherMode::Ctr, &iv).decrypt(&ciphertext).unwrap(), b"");
    }

    #[test]
    fn test_gcm_round_trip() {
        let iv = [2u8; 12];
        let ciphertext = ctx(CipherMode::Gcm, &iv).encrypt(b"attack at dawn").unwrap();
        let plaintext = ctx(CipherMode::Gcm, &iv).decrypt(&ciphertext).unwrap();
        assert_eq!(plaintext, b"attack at dawn");
    }

    #[test]
    fn test_gcm_tamper_detected() {
        let iv = [2u8; 12];
        let mut ciphertext = ctx(CipherMode::Gcm, &iv).encrypt(b"attack at dawn").unwrap();
        ciphertext[0] ^= 0x01;

        let err = ctx(CipherMode::Gcm, &iv).decrypt(&ciphertext).unwrap_err();
        assert!(matches!(err, CodecError::DecryptionFailed(_)));
    }

    #[test]
    fn test_init_rejects_wrong_key_length() {
        let err = CipherContext::init(
            CipherAlgorithm::Aes256,
            CipherMode::Ctr,
            &[0u8; 16],
            &[0u8; 16],
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::CipherInit(_)));
    }

    #[test]
    fn test_init_rejects_wrong_iv_length() {
        let err = CipherContext::init(
            CipherAlgorithm::Aes256,
            CipherMode::Gcm,
            &[0u8; 32],
            &[0u8; 16],
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::CipherInit(_)));
    }

    #[test]
    fn test_names_parse() {
        assert_eq!(
            CipherAlgorithm::from_name("AES-192").unwrap(),
            CipherAlgorithm::Aes192
        );
        assert_eq!(CipherMode::from_name("gcm").unwrap(), CipherMode::Gcm);
        assert!(matches!(
            CipherAlgorithm::from_name("des").unwrap_err(),
            CodecError::UnsupportedCipher(_)
        ));
        assert!(matches!(
            CipherMode::from_name("ecb").unwrap_err(),
            CodecError::UnsupportedCipherMode(_)
        ));
    }
}
