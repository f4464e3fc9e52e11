//! The individual transform stages
//!
//! Each stage is an invertible byte-string converter:
//! - `Base64Stage` / `Ascii85Stage` - binary-to-text encodings
//! - `DeflateStage` - raw DEFLATE compression
//! - `EncryptStage` - IV-prefixed symmetric encryption
//! - `HashStage` - keyed MAC prefix (integrity)
//! - `LifetimeStage` - timestamp prefix with expiry check
//! - `MimeStage` - MIME-style transfer-encoding header wrap
//! - `NoneStage` - identity pass-through
//! - `VerifyStage` - integrity envelope around an arbitrary inner stage

pub mod ascii85;
pub mod base64;
pub mod deflate;
pub mod encrypt;
pub mod hash;
pub mod lifetime;
pub mod mime;
pub mod none;
pub mod verify;

// Re-export stages
pub use self::ascii85::Ascii85Stage;
pub use self::base64::Base64Stage;
pub use self::deflate::DeflateStage;
pub use self::encrypt::EncryptStage;
pub use self::hash::HashStage;
pub use self::lifetime::LifetimeStage;
pub use self::mime::{MimeStage, TransferEncoding};
pub use self::none::NoneStage;
pub use self::verify::VerifyStage;
