//! Invite code configuration.

use serde::{Deserialize, Serialize};

/// Invite code generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteConfig {
    /// Length of generated invite codes.
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    /// How many times to retry generation on a code collision before
    /// giving up with an internal error.
    #[serde(default = "default_max_attempts")]
    pub max_generate_attempts: u32,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            max_generate_attempts: default_max_attempts(),
        }
    }
}

fn default_code_length() -> usize {
    8
}

fn default_max_attempts() -> u32 {
    5
}
