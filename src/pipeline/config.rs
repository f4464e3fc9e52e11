use serde::{Deserialize, Serialize};

use super::chain::Chain;
use super::core::TransformStage;
use super::stages::{
    Ascii85Stage, Base64Stage, DeflateStage, EncryptStage, HashStage, LifetimeStage, MimeStage,
    NoneStage, TransferEncoding,
};
use crate::crypto::kdf::DEFAULT_ITERATIONS;
use crate::crypto::{CipherAlgorithm, CipherMode};
use crate::error::CodecResult;

fn default_level() -> u8 {
    6
}

fn default_hash_length() -> usize {
    32
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

/// Declarative description of a single stage
///
/// Lets callers drive pipeline composition from configuration files. Key
/// and salt material is hex-encoded in configuration; a slot can be
/// disabled by declaring it `none`.
///
/// # Example
/// ```
/// use chaincodec::pipeline::{Chain, StageConfig};
///
/// # fn main() -> chaincodec::error::CodecResult<()> {
/// let configs = vec![
///     StageConfig::Deflate { level: 9 },
///     StageConfig::None,
///     StageConfig::Base64 { url_safe: true },
/// ];
/// let chain = Chain::from_configs("configured", &configs)?;
/// assert_eq!(chain.decode(&chain.encode(b"payload")?)?, b"payload");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "lowercase")]
pub enum StageConfig {
    None,
    Base64 {
        #[serde(default)]
        url_safe: bool,
    },
    Ascii85 {
        #[serde(default)]
        compress: bool,
        #[serde(default)]
        wrap: bool,
    },
    Deflate {
        #[serde(default = "default_level")]
        level: u8,
    },
    Encrypt {
        /// Hex-encoded key material
        key: String,
        #[serde(default)]
        cipher: Option<String>,
        #[serde(default)]
        mode: Option<String>,
    },
    Hash {
        /// Hex-encoded salt
        salt: String,
        #[serde(default = "default_hash_length")]
        hash_length: usize,
        #[serde(default)]
        readable: bool,
        #[serde(default = "default_iterations")]
        iterations: u32,
    },
    Lifetime {
        lifetime_secs: i64,
    },
    Mime {
        encoding: TransferEncoding,
    },
}

impl StageConfig {
    /// Construct the stage this configuration describes
    pub fn build(&self) -> CodecResult<Box<dyn TransformStage>> {
        Ok(match self {
            StageConfig::None => Box::new(NoneStage::new()),
            StageConfig::Base64 { url_safe } => Box::new(Base64Stage::new(*url_safe)),
            StageConfig::Ascii85 { compress, wrap } => {
                Box::new(Ascii85Stage::new(*compress, *wrap))
            }
            StageConfig::Deflate { level } => Box::new(DeflateStage::new(*level)),
            StageConfig::Encrypt { key, cipher, mode } => {
                let key = hex::decode(key)?;
                let cipher = cipher
                    .as_deref()
                    .unwrap_or(CipherAlgorithm::default().as_str());
                let mode = mode.as_deref().unwrap_or(CipherMode::default().as_str());
                Box::new(EncryptStage::with_cipher(key, cipher, mode)?)
            }
            StageConfig::Hash {
                salt,
                hash_length,
                readable,
                iterations,
            } => {
                let salt = hex::decode(salt)?;
                Box::new(HashStage::with_config(
                    salt,
                    *hash_length,
                    *readable,
                    *iterations,
                )?)
            }
            StageConfig::Lifetime { lifetime_secs } => Box::new(LifetimeStage::new(*lifetime_secs)?),
            StageConfig::Mime { encoding } => Box::new(MimeStage::new(*encoding)),
        })
    }
}

impl Chain {
    /// Build a chain from an ordered list of stage configurations
    pub fn from_configs(name: impl Into<String>, configs: &[StageConfig]) -> CodecResult<Chain> {
        let mut builder = Chain::builder(name);
        for config in configs {
            builder = builder.add_boxed_stage(config.build()?);
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_build_each_kind() {
        let configs = [
            StageConfig::None,
            StageConfig::Base64 { url_safe: true },
            StageConfig::Ascii85 {
                compress: true,
                wrap: false,
            },
            StageConfig::Deflate { level: 9 },
            StageConfig::Encrypt {
                key: hex::encode([0x42u8; 32]),
                cipher: None,
                mode: None,
            },
            StageConfig::Hash {
                salt: hex::encode(b"pepper"),
                hash_length: 16,
                readable: false,
                iterations: 100,
            },
            StageConfig::Lifetime { lifetime_secs: 60 },
            StageConfig::Mime {
                encoding: TransferEncoding::Base64,
            },
        ];
        for config in &configs {
            let stage = config.build().unwrap();
            let encoded = stage.encode(b"payload").unwrap();
            assert_eq!(stage.decode(&encoded).unwrap(), b"payload");
        }
    }

    #[test]
    fn test_chain_from_configs_round_trips() {
        let configs = vec![
            StageConfig::Deflate { level: 6 },
            StageConfig::Encrypt {
                key: hex::encode([0x42u8; 32]),
                cipher: Some("aes-256".into()),
                mode: Some("ctr".into()),
            },
            StageConfig::None,
            StageConfig::Base64 { url_safe: true },
        ];
        let chain = Chain::from_configs("configured", &configs).unwrap();
        assert_eq!(chain.stage_count(), 4);

        let encoded = chain.encode(b"configured payload").unwrap();
        assert_eq!(chain.decode(&encoded).unwrap(), b"configured payload");
    }

    #[test]
    fn test_config_deserializes_from_json() {
        let json = r#"[
            {"stage": "deflate", "level": 3},
            {"stage": "none"},
            {"stage": "base64", "url_safe": true}
        ]"#;
        let configs: Vec<StageConfig> = serde_json::from_str(json).unwrap();
        let chain = Chain::from_configs("from-json", &configs).unwrap();

        let encoded = chain.encode(b"json-driven").unwrap();
        assert_eq!(chain.decode(&encoded).unwrap(), b"json-driven");
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = StageConfig::Hash {
            salt: hex::encode(b"pepper"),
            hash_length: 16,
            readable: true,
            iterations: 100,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Vec<StageConfig> = serde_json::from_str(&format!("[{}]", json)).unwrap();
        assert_eq!(parsed.len(), 1);
        parsed[0].build().unwrap();
    }

    #[test]
    fn test_bad_hex_key_rejected() {
        let config = StageConfig::Encrypt {
            key: "not hex".into(),
            cipher: None,
            mode: None,
        };
        let err = config.build().unwrap_err();
        assert!(matches!(err, CodecError::InvalidKeyMaterial(_)));
        assert!(!err.is_data());
    }

    #[test]
    fn test_invalid_stage_config_surfaces_argument_error() {
        let config = StageConfig::Lifetime { lifetime_secs: 0 };
        assert!(matches!(
            config.build().unwrap_err(),
            CodecError::InvalidLifetime
        ));
    }
}
