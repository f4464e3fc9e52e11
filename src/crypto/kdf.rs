use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::error::{CodecError, CodecResult};

/// Default PBKDF2 iteration count used by the integrity stages
pub const DEFAULT_ITERATIONS: u32 = 1000;

/// Derive `key_length` bytes from `secret` and `salt` with PBKDF2-HMAC-SHA-256
///
/// This is the one key-stretching routine in the crate. [`HashStage`] feeds
/// the payload in as the secret to produce a keyed MAC, and [`VerifyStage`]
/// reuses it through its inner `HashStage`.
///
/// [`HashStage`]: crate::pipeline::stages::HashStage
/// [`VerifyStage`]: crate::pipeline::stages::VerifyStage
pub fn derive_key(
    secret: &[u8],
    salt: &[u8],
    key_length: usize,
    iterations: u32,
) -> CodecResult<Vec<u8>> {
    if iterations == 0 {
        return Err(CodecError::ZeroIterations);
    }
    if key_length == 0 {
        return Err(CodecError::ZeroHashLength);
    }

    let mut derived = vec![0u8; key_length];
    pbkdf2_hmac::<Sha256>(secret, salt, iterations, &mut derived);
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_deterministic() {
        let a = derive_key(b"secret", b"salt", 32, 1000).unwrap();
        let b = derive_key(b"secret", b"salt", 32, 1000).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_derive_key_sensitive_to_inputs() {
        let base = derive_key(b"secret", b"salt", 32, 1000).unwrap();
        assert_ne!(base, derive_key(b"secres", b"salt", 32, 1000).unwrap());
        assert_ne!(base, derive_key(b"secret", b"pepper", 32, 1000).unwrap());
        assert_ne!(base, derive_key(b"secret", b"salt", 32, 999).unwrap());
    }

    // RFC 2898 test vectors for PBKDF2-HMAC-SHA-256 (from RFC 7914 appendix)
    #[test]
    fn test_rfc_vector_one_iteration() {
        let dk = derive_key(b"password", b"salt", 32, 1).unwrap();
        assert_eq!(
            hex::encode(dk),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn test_rfc_vector_two_iterations() {
        let dk = derive_key(b"password", b"salt", 32, 2).unwrap();
        assert_eq!(
            hex::encode(dk),
            "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
        );
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = derive_key(b"secret", b"salt", 32, 0).unwrap_err();
        assert!(matches!(err, CodecError::ZeroIterations));
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = derive_key(b"secret", b"salt", 0, 1000).unwrap_err();
        assert!(matches!(err, CodecError::ZeroHashLength));
    }

    #[test]
    fn test_truncation_is_a_prefix() {
        let long = derive_key(b"secret", b"salt", 32, 100).unwrap();
        let short = derive_key(b"secret", b"salt", 16, 100).unwrap();
        assert_eq!(&long[..16], short.as_slice());
    }
}
