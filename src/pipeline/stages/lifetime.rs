use chrono::Utc;

use crate::error::{CodecError, CodecResult};
use crate::pipeline::core::TransformStage;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Time-limited validity stage
///
/// `encode` prepends the current Unix time in base 36 followed by `:`;
/// `decode` strips the prefix and rejects payloads whose timestamp lies in
/// the future or further in the past than the configured lifetime.
#[derive(Debug)]
pub struct LifetimeStage {
    lifetime_secs: i64,
}

impl LifetimeStage {
    /// Create a validity stage with a positive lifetime in seconds
    pub fn new(lifetime_secs: i64) -> CodecResult<Self> {
        if lifetime_secs <= 0 {
            return Err(CodecError::InvalidLifetime);
        }
        Ok(Self { lifetime_secs })
    }

    fn encode_at(&self, data: &[u8], now: i64) -> Vec<u8> {
        let mut out = base36_encode(now.max(0) as u64).into_bytes();
        out.push(b':');
        out.extend_from_slice(data);
        out
    }

    fn decode_at(&self, data: &[u8], now: i64) -> CodecResult<Vec<u8>> {
        // The payload must start with `[0-9a-z]+:`. The first `:` is the
        // delimiter; a payload that itself contains `:` is unaffected
        // because encode always prepends a fresh stamp.
        let mut sep = None;
        for (i, &byte) in data.iter().enumerate() {
            match byte {
                b':' => {
                    sep = Some(i);
                    break;
                }
                b'0'..=b'9' | b'a'..=b'z' => {}
                _ => return Err(CodecError::MissingTimestamp),
            }
        }
        let sep = match sep {
            Some(i) if i > 0 => i,
            _ => return Err(CodecError::MissingTimestamp),
        };

        let stamp =
            std::str::from_utf8(&data[..sep]).map_err(|_| CodecError::InvalidTimestamp)?;
        let timestamp =
            i64::from_str_radix(stamp, 36).map_err(|_| CodecError::InvalidTimestamp)?;

        let delta = now - timestamp;
        if delta < 0 {
            return Err(CodecError::TimestampInFuture);
        }
        if delta > self.lifetime_secs {
            return Err(CodecError::Expired);
        }

        Ok(data[sep + 1..].to_vec())
    }
}

impl TransformStage for LifetimeStage {
    fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        Ok(self.encode_at(data, Utc::now().timestamp()))
    }

    fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        self.decode_at(data, Utc::now().timestamp())
    }

    fn name(&self) -> &str {
        "lifetime"
    }
}

fn base36_encode(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    // 13 digits cover u64::MAX in base 36.
    let mut buf = [0u8; 13];
    let mut i = buf.len();
    while value > 0 {
        i -= 1;
        buf[i] = BASE36_DIGITS[(value % 36) as usize];
        value /= 36;
    }
    String::from_utf8_lossy(&buf[i..]).into_owned()
}
