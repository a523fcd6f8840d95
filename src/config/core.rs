use serde::{Deserialize, Serialize};

use crate::errors::{Result, SignatureError};

/// Root configuration structure for propsig
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureConfig {
    /// Reserve per-type slots so every signature has the same width
    #[serde(default = "default_fixed_length")]
    pub fixed_length: bool,

    /// Inputs kept per example in fixed-length mode; extra inputs are
    /// dropped and missing ones padded
    #[serde(default = "default_max_inputs")]
    pub max_inputs: usize,
}

pub fn default_fixed_length() -> bool {
    true
}

pub fn default_max_inputs() -> usize {
    3
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            fixed_length: default_fixed_length(),
            max_inputs: default_max_inputs(),
        }
    }
}

impl SignatureConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_inputs == 0 {
            return Err(SignatureError::Config(
                "max_inputs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
