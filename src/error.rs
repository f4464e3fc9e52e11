use thiserror::Error;

/// Central error type for all stage and chain operations
#[derive(Error, Debug)]
pub enum CodecError {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("unsupported cipher: {0}")]
    UnsupportedCipher(String),

    #[error("unsupported cipher mode: {0}")]
    UnsupportedCipherMode(String),

    #[error("key material too short: cipher requires {required} bytes, got {provided}")]
    KeyTooShort { required: usize, provided: usize },

    #[error("iteration count must be greater than zero")]
    ZeroIterations,

    #[error("hash length must be greater than zero")]
    ZeroHashLength,

    #[error("lifetime must be a positive number of seconds")]
    InvalidLifetime,

    #[error("unknown transfer encoding: {0}")]
    UnknownTransferEncoding(String),

    #[error("key material is not valid hex: {0}")]
    InvalidKeyMaterial(#[from] hex::FromHexError),

    // ============================================================================
    // Payload Errors
    // ============================================================================
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("invalid ascii85 character {byte:#04x} at offset {offset}")]
    InvalidAscii85Char { byte: u8, offset: usize },

    #[error("truncated ascii85 group")]
    TruncatedAscii85Group,

    #[error("ascii85 group exceeds 32 bits")]
    Ascii85Overflow,

    #[error("missing ascii85 frame markers")]
    MissingAscii85Frame,

    #[error("corrupt deflate stream: {0}")]
    CorruptDeflateStream(String),

    #[error("unable to derive initialization vector")]
    MissingIv,

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("unable to extract integrity hash")]
    MissingIntegrityHash,

    #[error("integrity verification failed")]
    IntegrityMismatch,

    #[error("missing validity timestamp")]
    MissingTimestamp,

    #[error("invalid validity timestamp")]
    InvalidTimestamp,

    #[error("timestamp is in the future")]
    TimestampInFuture,

    #[error("data has expired")]
    Expired,

    #[error("malformed header block")]
    MalformedHeader,

    // ============================================================================
    // Backend Errors
    // ============================================================================
    #[error("cipher initialization failed: {0}")]
    CipherInit(String),
}

/// Coarse classification of a [`CodecError`]
///
/// `Argument` errors are configuration mistakes and are not retryable without
/// fixing the configuration. `Data` errors mean the payload is malformed,
/// tampered, truncated, or expired and must be surfaced to the caller.
/// `Resource` errors mean the cryptographic backend failed and are fatal for
/// the call without being a data-integrity problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Argument,
    Data,
    Resource,
}

impl CodecError {
    /// Classify this error into the Argument / Data / Resource taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::UnsupportedCipher(_)
            | CodecError::UnsupportedCipherMode(_)
            | CodecError::KeyTooShort { .. }
            | CodecError::ZeroIterations
            | CodecError::ZeroHashLength
            | CodecError::InvalidLifetime
            | CodecError::UnknownTransferEncoding(_)
            | CodecError::InvalidKeyMaterial(_) => ErrorKind::Argument,

            CodecError::InvalidBase64(_)
            | CodecError::InvalidAscii85Char { .. }
            | CodecError::TruncatedAscii85Group
            | CodecError::Ascii85Overflow
            | CodecError::MissingAscii85Frame
            | CodecError::CorruptDeflateStream(_)
            | CodecError::MissingIv
            | CodecError::DecryptionFailed(_)
            | CodecError::MissingIntegrityHash
            | CodecError::IntegrityMismatch
            | CodecError::MissingTimestamp
            | CodecError::InvalidTimestamp
            | CodecError::TimestampInFuture
            | CodecError::Expired
            | CodecError::MalformedHeader => ErrorKind::Data,

            CodecError::CipherInit(_) => ErrorKind::Resource,
        }
    }

    /// True if this is a payload problem rather than a configuration or
    /// backend one
    pub fn is_data(&self) -> bool {
        self.kind() == ErrorKind::Data
    }
}

/// Helper type alias for Results
pub type CodecResult<T> = Result<T, CodecError>;
