use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;

use crate::error::CodecResult;
use crate::pipeline::core::TransformStage;

/// Base64 binary-to-text stage
///
/// With `url_safe` enabled, output uses the `-_` alphabet and drops the
/// trailing `=` padding, making the result safe for URLs and cookie values.
///
/// # Example
/// ```
/// use chaincodec::pipeline::stages::Base64Stage;
/// use chaincodec::pipeline::TransformStage;
///
/// let stage = Base64Stage::new(true);
/// assert_eq!(stage.encode(b"hi?").unwrap(), b"aGk_Pw");
/// ```
pub struct Base64Stage {
    url_safe: bool,
}

impl Base64Stage {
    /// Create a new base64 stage
    pub fn new(url_safe: bool) -> Self {
        Self { url_safe }
    }
}

impl Default for Base64Stage {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TransformStage for Base64Stage {
    fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let encoded = if self.url_safe {
            URL_SAFE_NO_PAD.encode(data)
        } else {
            STANDARD.encode(data)
        };
        Ok(encoded.into_bytes())
    }

    fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let decoded = if self.url_safe {
            URL_SAFE_NO_PAD.decode(data)?
        } else {
            STANDARD.decode(data)?
        };
        Ok(decoded)
    }

    fn name(&self) -> &str {
        "base64"
    }
}
