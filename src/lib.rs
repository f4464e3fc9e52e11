//! chaincodec - composable invertible byte transforms
//!
//! A family of byte-string converters - binary-to-text encodings,
//! compression, symmetric encryption, keyed integrity verification, and
//! time-limited validity stamping - that share one contract
//! ([`TransformStage`]) and compose into ordered chains ([`Chain`]).
//!
//! Every stage is immutable after construction, holds only configuration,
//! and is safe to share across threads. For well-formed input, `decode` is
//! the exact inverse of `encode` on every stage and every chain.
//!
//! # Example
//! ```
//! use chaincodec::pipeline::stages::{Base64Stage, EncryptStage, HashStage};
//! use chaincodec::pipeline::Chain;
//!
//! # fn main() -> chaincodec::error::CodecResult<()> {
//! let chain = Chain::builder("seal")
//!     .add_stage(HashStage::new(b"integrity salt".to_vec()))
//!     .add_stage(EncryptStage::new([0x42u8; 32])?)
//!     .add_stage(Base64Stage::new(true))
//!     .build();
//!
//! let sealed = chain.encode(b"the payload")?;
//! assert_eq!(chain.decode(&sealed)?, b"the payload");
//! # Ok(())
//! # }
//! ```

pub mod crypto;
pub mod error;
pub mod pipeline;

// Re-export everything users need at the crate root
pub use crypto::{CipherAlgorithm, CipherMode};
pub use error::{CodecError, CodecResult, ErrorKind};
pub use pipeline::stages::{
    Ascii85Stage, Base64Stage, DeflateStage, EncryptStage, HashStage, LifetimeStage, MimeStage,
    NoneStage, TransferEncoding, VerifyStage,
};
pub use pipeline::{Chain, ChainBuilder, StageConfig, TransformStage};
