use crate::error::CodecResult;
use crate::pipeline::core::TransformStage;

/// Identity stage
///
/// Passes the payload through untouched in both directions. Useful as a
/// placeholder in configuration-driven pipelines where a stage slot may be
/// disabled.
#[derive(Default)]
pub struct NoneStage;

impl NoneStage {
    /// Create a new identity stage
    pub fn new() -> Self {
        Self
    }
}

impl TransformStage for NoneStage {
    fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn name(&self) -> &str {
        "none"
    }
}
