// Engine Configuration
// Key size, block size and search limits shared by the library and the CLI

use serde::{Deserialize, Serialize};

use crate::error::{Result, RsaError};
use crate::rsa::keygen::MIN_KEY_BITS;
use crate::rsa::prime::DEFAULT_ROUNDS;

/// Configuration for key generation and block encryption
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Total modulus length in bits
    pub key_bits: u32,
    /// Plaintext bytes per encrypted block
    pub block_size: usize,
    /// Miller-Rabin rounds per candidate
    pub rounds: u32,
    /// Upper bound on p/q redraws during key generation
    pub max_key_attempts: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            key_bits: 2048,
            block_size: 16,
            rounds: DEFAULT_ROUNDS,
            max_key_attempts: 1000,
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_key_bits(mut self, bits: u32) -> Self {
        self.key_bits = bits;
        self
    }

    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_max_key_attempts(mut self, attempts: usize) -> Self {
        self.max_key_attempts = attempts;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_bits < MIN_KEY_BITS {
            return Err(RsaError::InvalidBitLength(self.key_bits));
        }
        if self.block_size == 0 {
            return Err(RsaError::ZeroBlockSize);
        }
        if self.rounds == 0 {
            return Err(RsaError::ZeroRounds);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.key_bits, 2048);
        assert_eq!(config.block_size, 16);
        assert_eq!(config.rounds, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = EngineConfig::from_json(r#"{ "key_bits": 512 }"#).unwrap();
        assert_eq!(config, EngineConfig::default().with_key_bits(512));
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "block_size": 0 }"#),
            Err(RsaError::ZeroBlockSize)
        ));
        assert!(matches!(
            EngineConfig::default().with_key_bits(8).validate(),
            Err(RsaError::InvalidBitLength(8))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "key_bits": 64, "rounds": 0 }"#),
            Err(RsaError::ZeroRounds)
        ));
        assert!(matches!(
            EngineConfig::from_json("{ key_bits"),
            Err(RsaError::Json(_))
        ));
    }
}
