use tracing::{debug, warn};

use super::core::TransformStage;
use crate::error::CodecResult;

/// Ordered composition of transform stages
///
/// `encode` feeds the payload through each stage in list order; `decode`
/// walks the same list in reverse. Both traversal orders are derived from
/// the one stored `Vec`, so mismatched encode/decode orderings cannot be
/// configured.
///
/// A chain implements [`TransformStage`] itself, so chains nest inside
/// other chains or inside decorators.
///
/// # Example
/// ```
/// use chaincodec::pipeline::stages::{Base64Stage, DeflateStage};
/// use chaincodec::pipeline::Chain;
///
/// # fn main() -> chaincodec::error::CodecResult<()> {
/// let chain = Chain::builder("compress-then-armor")
///     .add_stage(DeflateStage::new(6))
///     .add_stage(Base64Stage::new(false))
///     .build();
///
/// let encoded = chain.encode(b"payload")?;
/// assert_eq!(chain.decode(&encoded)?, b"payload");
/// # Ok(())
/// # }
/// ```
pub struct Chain {
    name: String,
    stages: Vec<Box<dyn TransformStage>>,
}

impl Chain {
    /// Create a new chain builder
    pub fn builder(name: impl Into<String>) -> ChainBuilder {
        ChainBuilder::new(name)
    }

    /// Get the chain name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Apply every stage's `encode` in list order
    ///
    /// Stops at the first failing stage and surfaces its error untouched.
    pub fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        debug!(chain = %self.name, stages = self.stages.len(), "encoding");
        let mut payload = data.to_vec();
        for stage in &self.stages {
            payload = stage.encode(&payload).map_err(|e| {
                warn!(chain = %self.name, stage = stage.name(), error = %e, "encode failed");
                e
            })?;
            debug!(chain = %self.name, stage = stage.name(), bytes = payload.len(), "stage encoded");
        }
        Ok(payload)
    }

    /// Apply every stage's `decode` in reverse list order
    ///
    /// Stops at the first failing stage and surfaces its error untouched.
    pub fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        debug!(chain = %self.name, stages = self.stages.len(), "decoding");
        let mut payload = data.to_vec();
        for stage in self.stages.iter().rev() {
            payload = stage.decode(&payload).map_err(|e| {
                warn!(chain = %self.name, stage = stage.name(), error = %e, "decode failed");
                e
            })?;
            debug!(chain = %self.name, stage = stage.name(), bytes = payload.len(), "stage decoded");
        }
        Ok(payload)
    }
}

impl TransformStage for Chain {
    fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        Chain::encode(self, data)
    }

    fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        Chain::decode(self, data)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Builder for constructing chains
pub struct ChainBuilder {
    name: String,
    stages: Vec<Box<dyn TransformStage>>,
}

impl ChainBuilder {
    /// Create a new chain builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    /// Add a stage to the chain
    pub fn add_stage<S: TransformStage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Add a boxed stage to the chain
    pub fn add_boxed_stage(mut self, stage: Box<dyn TransformStage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Build the chain
    pub fn build(self) -> Chain {
        Chain {
            name: self.name,
            stages: self.stages,
        }
    }
}
