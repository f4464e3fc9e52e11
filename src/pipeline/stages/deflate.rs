use miniz_oxide::deflate::compress_to_vec;
use miniz_oxide::inflate::decompress_to_vec;

use crate::error::{CodecError, CodecResult};
use crate::pipeline::core::TransformStage;

/// Raw DEFLATE compression stage
///
/// Produces a raw DEFLATE stream (no zlib or gzip envelope). The
/// compression level is clamped to 0–9 at construction, with 0 meaning
/// stored-only blocks.
pub struct DeflateStage {
    level: u8,
}

impl DeflateStage {
    /// Create a new deflate stage with a compression level of 0–9
    ///
    /// Out-of-range levels are clamped rather than rejected.
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(9),
        }
    }

    /// The effective compression level
    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Default for DeflateStage {
    fn default() -> Self {
        Self::new(6)
    }
}

impl TransformStage for DeflateStage {
    fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(compress_to_vec(data, self.level))
    }

    fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        decompress_to_vec(data).map_err(|e| CodecError::CorruptDeflateStream(e.to_string()))
    }

    fn name(&self) -> &str {
        "deflate"
    }
}
