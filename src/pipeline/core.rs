use crate::error::CodecResult;

/// A single invertible transform over a byte payload
///
/// Stages are constructed once with fixed configuration, hold no per-call
/// state, and are safe to share across threads. For well-formed input,
/// `decode` is the exact inverse of `encode`:
/// `stage.decode(&stage.encode(x)?)? == x` for any byte string `x`.
///
/// # Example
/// ```
/// use chaincodec::error::CodecResult;
/// use chaincodec::pipeline::TransformStage;
///
/// struct ReverseStage;
///
/// impl TransformStage for ReverseStage {
///     fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
///         Ok(data.iter().rev().copied().collect())
///     }
///
///     fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
///         Ok(data.iter().rev().copied().collect())
///     }
///
///     fn name(&self) -> &str {
///         "reverse"
///     }
/// }
/// ```
pub trait TransformStage: Send + Sync {
    /// Transform raw bytes into their encoded representation
    fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>>;

    /// Invert [`encode`](TransformStage::encode)
    ///
    /// Fails with a data error on malformed, tampered, or expired payloads.
    fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>>;

    /// Stage name for logging
    fn name(&self) -> &str;
}

impl std::fmt::Debug for dyn TransformStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformStage")
            .field("name", &self.name())
            .finish()
    }
}
