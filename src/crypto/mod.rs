//! Cryptographic building blocks shared by the transform stages
//!
//! This module contains the single PBKDF2 routine used by both the integrity
//! stages and the one-shot cipher context used by the encryption stage.

pub mod cipher;
pub mod kdf;

pub use cipher::{CipherAlgorithm, CipherContext, CipherMode};
pub use kdf::{derive_key, DEFAULT_ITERATIONS};
