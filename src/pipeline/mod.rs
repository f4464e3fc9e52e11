//! Chain pattern for composable byte transformations
//!
//! This module provides the uniform stage contract and the ordered chain
//! that composes stages. A chain encodes by feeding the payload through
//! each stage in list order and decodes by walking the same list in
//! reverse, so `chain.decode(&chain.encode(x)?)? == x` holds whenever it
//! holds for every member stage.
//!
//! # Example
//! ```
//! use chaincodec::pipeline::stages::{Base64Stage, DeflateStage, HashStage};
//! use chaincodec::pipeline::Chain;
//!
//! # fn main() -> chaincodec::error::CodecResult<()> {
//! let chain = Chain::builder("armor")
//!     .add_stage(DeflateStage::new(6))
//!     .add_stage(HashStage::new(b"salt".to_vec()))
//!     .add_stage(Base64Stage::new(true))
//!     .build();
//!
//! let encoded = chain.encode(b"payload")?;
//! assert_eq!(chain.decode(&encoded)?, b"payload");
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod config;
pub mod core;
pub mod stages;

// Re-export main types
pub use self::chain::{Chain, ChainBuilder};
pub use self::config::StageConfig;
pub use self::core::TransformStage;
