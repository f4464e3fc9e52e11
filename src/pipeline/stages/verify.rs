use super::hash::HashStage;
use crate::error::CodecResult;
use crate::pipeline::core::TransformStage;

/// Integrity decorator around an arbitrary inner stage
///
/// `encode` runs the inner stage first, then wraps its output in the keyed
/// MAC envelope; `decode` verifies and strips the envelope before handing
/// the payload to the inner stage. The MAC derivation is the same PBKDF2
/// routine [`HashStage`] uses; this decorator simply owns one.
pub struct VerifyStage {
    inner: Box<dyn TransformStage>,
    integrity: HashStage,
}

impl VerifyStage {
    /// Wrap `inner` with default MAC parameters
    pub fn new(inner: Box<dyn TransformStage>, salt: impl Into<Vec<u8>>) -> Self {
        Self {
            inner,
            integrity: HashStage::new(salt),
        }
    }

    /// Wrap `inner` with explicit MAC parameters
    pub fn with_config(
        inner: Box<dyn TransformStage>,
        salt: impl Into<Vec<u8>>,
        hash_length: usize,
        readable: bool,
        iterations: u32,
    ) -> CodecResult<Self> {
        Ok(Self {
            inner,
            integrity: HashStage::with_config(salt, hash_length, readable, iterations)?,
        })
    }
}

impl TransformStage for VerifyStage {
    fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let transformed = self.inner.encode(data)?;
        self.integrity.encode(&transformed)
    }

    fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let verified = self.integrity.decode(data)?;
        self.inner.decode(&verified)
    }

    fn name(&self) -> &str {
        "verify"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use crate::pipeline::stages::{Base64Stage, NoneStage};
    use crate::pipeline::Chain;

    #[test]
    fn test_round_trip_around_base64() {
        let stage = VerifyStage::new(Box::new(Base64Stage::new(true)), b"pepper".to_vec());
        let encoded = stage.encode(b"payload").unwrap();
        assert_eq!(stage.decode(&encoded).unwrap(), b"payload");
    }

    #[test]
    fn test_round_trip_around_identity() {
        let stage = VerifyStage::new(Box::new(NoneStage::new()), b"pepper".to_vec());
        let encoded = stage.encode(b"payload").unwrap();
        // MAC prefix plus the untouched payload.
        assert_eq!(&encoded[32..], b"payload");
        assert_eq!(stage.decode(&encoded).unwrap(), b"payload");
    }

    #[test]
    fn test_tamper_detected_before_inner_decode() {
        let stage = VerifyStage::new(Box::new(Base64Stage::new(true)), b"pepper".to_vec());
        let mut encoded = stage.encode(b"payload").unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0x01;

        // The MAC check fires, not the inner base64 decoder.
        let err = stage.decode(&encoded).unwrap_err();
        assert!(matches!(err, CodecError::IntegrityMismatch));
    }

    #[test]
    fn test_wraps_a_whole_chain() {
        let chain = Chain::builder("inner")
            .add_stage(Base64Stage::new(false))
            .build();
        let stage =
            VerifyStage::with_config(Box::new(chain), b"pepper".to_vec(), 16, true, 100).unwrap();

        let encoded = stage.encode(b"payload").unwrap();
        assert_eq!(stage.decode(&encoded).unwrap(), b"payload");
    }
}
