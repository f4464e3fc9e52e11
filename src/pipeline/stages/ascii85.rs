use crate::error::{CodecError, CodecResult};
use crate::pipeline::core::TransformStage;

/// First character of the base-85 alphabet (`!`)
const CHAR_OFFSET: u8 = b'!';
/// Last character of the base-85 alphabet (`u`)
const CHAR_MAX: u8 = b'u';

const ZERO_GROUP: [u8; 4] = [0x00; 4];
const SPACE_GROUP: [u8; 4] = [0x20; 4];

/// Ascii85 binary-to-text stage
///
/// Each 4-byte group becomes 5 characters from the `!`..`u` alphabet; a
/// short final group of `k` bytes is zero-padded and emits only its first
/// `k + 1` characters. With `compress`, a full group of zero bytes becomes
/// `z` and a full group of spaces becomes `y`; shortcuts never apply to a
/// padded final group, which would lose the original length. With `wrap`,
/// output is framed as `<~` .. `~>` and decode requires the frame.
///
/// # Example
/// ```
/// use chaincodec::pipeline::stages::Ascii85Stage;
/// use chaincodec::pipeline::TransformStage;
///
/// let stage = Ascii85Stage::new(true, false);
/// assert_eq!(stage.encode(&[0, 0, 0, 0]).unwrap(), b"z");
/// assert_eq!(stage.decode(b"z").unwrap(), [0, 0, 0, 0]);
/// ```
pub struct Ascii85Stage {
    compress: bool,
    wrap: bool,
}

impl Ascii85Stage {
    /// Create a new ascii85 stage
    pub fn new(compress: bool, wrap: bool) -> Self {
        Self { compress, wrap }
    }
}

impl Default for Ascii85Stage {
    fn default() -> Self {
        Self::new(false, false)
    }
}

/// Convert one 5-character run back into 4 bytes
fn decode_group(run: &[u8; 5]) -> CodecResult<[u8; 4]> {
    let mut value: u64 = 0;
    for &c in run {
        value = value * 85 + u64::from(c - CHAR_OFFSET);
    }
    if value > u64::from(u32::MAX) {
        return Err(CodecError::Ascii85Overflow);
    }
    Ok((value as u32).to_be_bytes())
}

impl TransformStage for Ascii85Stage {
    fn encode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let mut out = Vec::with_capacity(data.len() / 4 * 5 + 12);
        if self.wrap {
            out.extend_from_slice(b"<~");
        }

        for group in data.chunks(4) {
            if self.compress && group.len() == 4 {
                if group == ZERO_GROUP {
                    out.push(b'z');
                    continue;
                }
                if group == SPACE_GROUP {
                    out.push(b'y');
                    continue;
                }
            }

            let mut padded = [0u8; 4];
            padded[..group.len()].copy_from_slice(group);
            let mut value = u32::from_be_bytes(padded);

            let mut digits = [0u8; 5];
            for slot in digits.iter_mut().rev() {
                *slot = (value % 85) as u8 + CHAR_OFFSET;
                value /= 85;
            }
            out.extend_from_slice(&digits[..group.len() + 1]);
        }

        if self.wrap {
            out.extend_from_slice(b"~>");
        }
        Ok(out)
    }

    fn decode(&self, data: &[u8]) -> CodecResult<Vec<u8>> {
        let body = if self.wrap {
            data.strip_prefix(b"<~")
                .and_then(|rest| rest.strip_suffix(b"~>"))
                .ok_or(CodecError::MissingAscii85Frame)?
        } else {
            data
        };

        let mut out = Vec::with_capacity(body.len() / 5 * 4 + 4);
        let mut run = [0u8; 5];
        let mut run_len = 0usize;

        for (offset, &byte) in body.iter().enumerate() {
            match byte {
                // Shortcuts are only valid between runs; a `z` or `y` inside
                // a partially-accumulated group is malformed.
                b'z' if self.compress && run_len == 0 => out.extend_from_slice(&ZERO_GROUP),
                b'y' if self.compress && run_len == 0 => out.extend_from_slice(&SPACE_GROUP),
                CHAR_OFFSET..=CHAR_MAX => {
                    run[run_len] = byte;
                    run_len += 1;
                    if run_len == 5 {
                        out.extend_from_slice(&decode_group(&run)?);
                        run_len = 0;
                    }
                }
                _ => return Err(CodecError::InvalidAscii85Char { byte, offset }),
            }
        }

        match run_len {
            0 => {}
            // A final run of one character cannot carry even a single byte.
            1 => return Err(CodecError::TruncatedAscii85Group),
            n => {
                for slot in run[n..].iter_mut() {
                    *slot = CHAR_MAX;
                }
                let bytes = decode_group(&run)?;
                out.extend_from_slice(&bytes[..n - 1]);
            }
        }

        Ok(out)
    }

    fn name(&self) -> &str {
        "ascii85"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_group_vector() {
        let stage = Ascii85Stage::default();
        assert_eq!(stage.encode(b"sure").unwrap(), b"F*2M7");
        assert_eq!(stage.decode(b"F*2M7").unwrap(), b"sure");
    }

    #[test]
    fn test_short_final_group() {
        let stage = Ascii85Stage::default();
        let encoded = stage.encode(b"h").unwrap();
        assert_eq!(encoded, b"BE");
        assert_eq!(stage.decode(&encoded).unwrap(), b"h");
    }

    #[test]
    fn test_round_trip_all_short_lengths() {
        let stage = Ascii85Stage::default();
        let data = b"chaincodec!";
        for len in 0..data.len() {
            let encoded = stage.encode(&data[..len]).unwrap();
            assert_eq!(stage.decode(&encoded).unwrap(), &data[..len]);
        }
    }

    #[test]
    fn test_zero_group_shortcut() {
        let stage = Ascii85Stage::new(true, false);
        assert_eq!(stage.encode(&[0, 0, 0, 0]).unwrap(), b"z");
        assert_eq!(stage.decode(b"z").unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_space_group_shortcut() {
        let stage = Ascii85Stage::new(true, false);
        assert_eq!(stage.encode(&[0x20; 4]).unwrap(), b"y");
        assert_eq!(stage.decode(b"y").unwrap(), [0x20; 4]);
    }

    #[test]
    fn test_shortcuts_disabled_without_compress() {
        let stage = Ascii85Stage::default();
        assert_eq!(stage.encode(&[0, 0, 0, 0]).unwrap(), b"!!!!!");
        // 'z' is outside the alphabet when shortcuts are off.
        assert!(matches!(
            stage.decode(b"z").unwrap_err(),
            CodecError::InvalidAscii85Char { byte: b'z', .. }
        ));
    }

    #[test]
    fn test_shortcut_never_applies_to_padded_group() {
        // A single zero byte pads to a zero group; emitting `z` here would
        // decode back to four bytes instead of one.
        let stage = Ascii85Stage::new(true, false);
        let encoded = stage.encode(&[0]).unwrap();
        assert_ne!(encoded, b"z");
        assert_eq!(stage.decode(&encoded).unwrap(), [0]);
    }

    #[test]
    fn test_shortcut_inside_run_rejected() {
        let stage = Ascii85Stage::new(true, false);
        let err = stage.decode(b"Fz").unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidAscii85Char { byte: b'z', offset: 1 }
        ));
    }

    #[test]
    fn test_single_char_final_run_rejected() {
        let stage = Ascii85Stage::new(true, false);
        assert!(matches!(
            stage.decode(b"zF").unwrap_err(),
            CodecError::TruncatedAscii85Group
        ));
    }

    #[test]
    fn test_group_overflow_rejected() {
        let stage = Ascii85Stage::default();
        assert!(matches!(
            stage.decode(b"uuuuu").unwrap_err(),
            CodecError::Ascii85Overflow
        ));
    }

    #[test]
    fn test_wrap_frames_output() {
        let stage = Ascii85Stage::new(false, true);
        let encoded = stage.encode(b"sure").unwrap();
        assert_eq!(encoded, b"<~F*2M7~>");
        assert_eq!(stage.decode(&encoded).unwrap(), b"sure");
    }

    #[test]
    fn test_wrap_requires_frame() {
        let stage = Ascii85Stage::new(false, true);
        assert!(matches!(
            stage.decode(b"F*2M7").unwrap_err(),
            CodecError::MissingAscii85Frame
        ));
    }

    #[test]
    fn test_wrap_empty_payload() {
        let stage = Ascii85Stage::new(false, true);
        let encoded = stage.encode(b"").unwrap();
        assert_eq!(encoded, b"<~~>");
        assert_eq!(stage.decode(&encoded).unwrap(), b"");
    }

    #[test]
    fn test_whitespace_rejected() {
        let stage = Ascii85Stage::default();
        assert!(matches!(
            stage.decode(b"F*2 M7").unwrap_err(),
            CodecError::InvalidAscii85Char { byte: b' ', .. }
        ));
    }
}
