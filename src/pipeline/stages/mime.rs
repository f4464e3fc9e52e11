use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::pipeline::core::TransformStage;

const HEADER_NAME: &str = "content-transfer-encoding";
const HEADER_SEPARATOR: &[u8] = b"\r\n\r\n";

/// Body encoding declared by the MIME-style header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferEncoding {
    /// Body carried as-is
    Binary,
    /// Body carried as standard base64
    Base64,
}

impl TransferEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferEncoding::Binary => "binary",
            TransferEncoding::Base64 => "base64",
        }
    }

    /// Parse a configuration name such as `"base64"`
    pub fn from_name(name: &str) -> CodecResult<Self> {
        Self::from_token(name).ok_or_else(|| CodecError::UnknownTransferEncoding(name.to_string()))
    }

    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "binary" => Some(TransferEncoding::Binary),
            "base64" => Some(TransferEncoding::Base64),
            _ => None,
        }
    }
}

/// MIME-style header stage
///
/// `encode` wraps the payload in a `Content-Transfer-Encoding` header block
/// and encodes the body per the configured [`TransferEncoding`]. `decode`
/// strips the header block and decodes the body per the encoding the header
/// *declares*, so a payload is always read the way it says it was written.
pub struct MimeStage {
    encoding: TransferEncoding,
}

impl MimeStage {
    /// Create a header stage with the given body encoding
    pub fn new(encoding: TransferEncoding) -> Self {
        Self { encoding }
    }
}

impl Default for MimeStage {
    fn default() -> Self {
        Self::new(TransferEncoding::Base64)
    }
}

impl TransformStage for MimeStage {
    fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let mut out = format!(
            "Content-Transfer-Encoding: {}\r\n\r\n",
            self.encoding.as_str()
        )
        .into_bytes();
        match self.encoding {
            TransferEncoding::Binary => out.extend_from_slice(data),
            TransferEncoding::Base64 => out.extend_from_slice(STANDARD.encode(data).as_bytes()),
        }
        Ok(out)
    }

    fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let separator = data
            .windows(HEADER_SEPARATOR.len())
            .position(|window| window == HEADER_SEPARATOR)
            .ok_or(CodecError::MalformedHeader)?;
        let header_block = &data[..separator];
        let body = &data[separator + HEADER_SEPARATOR.len()..];

        let header_block =
            std::str::from_utf8(header_block).map_err(|_| CodecError::MalformedHeader)?;

        // Scan the header lines for the transfer-encoding declaration,
        // ignoring any other headers in the block.
        let mut declared = None;
        for line in header_block.split("\r\n") {
            if let Some((name, value)) = line.split_once(':') {
                if name.trim().eq_ignore_ascii_case(HEADER_NAME) {
                    declared = TransferEncoding::from_token(value.trim());
                    break;
                }
            }
        }
        let declared = declared.ok_or(CodecError::MalformedHeader)?;

        match declared {
            TransferEncoding::Binary => Ok(body.to_vec()),
            TransferEncoding::Base64 => Ok(STANDARD.decode(body)?),
        }
    }

    fn name(&self) -> &str {
        "mime"
    }
}
