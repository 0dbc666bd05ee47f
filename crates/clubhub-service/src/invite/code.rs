//! Invite code generation.

use rand::RngExt;

/// Code alphabet; excludes visually confusable characters
/// (I, L, O, 0, 1).
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Default code length.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Generates short opaque invite codes.
#[derive(Debug, Clone)]
pub struct InviteCodeGenerator {
    /// Length of generated codes.
    length: usize,
}

impl InviteCodeGenerator {
    /// Creates a generator producing codes of the given length.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Generates a random code from the unambiguous alphabet.
    ///
    /// Uniqueness among live codes is enforced by the database index;
    /// callers retry on collision.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| {
                let idx = rng.random_range(0..CODE_ALPHABET.len());
                CODE_ALPHABET[idx] as char
            })
            .collect()
    }
}

impl Default for InviteCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length() {
        assert_eq!(InviteCodeGenerator::default().generate().len(), 8);
        assert_eq!(InviteCodeGenerator::new(12).generate().len(), 12);
    }

    #[test]
    fn test_alphabet_excludes_confusables() {
        for c in ['I', 'L', 'O', '0', '1'] {
            assert!(!CODE_ALPHABET.contains(&(c as u8)));
        }
        let code = InviteCodeGenerator::default().generate();
        assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_codes_vary() {
        let generator = InviteCodeGenerator::default();
        let a = generator.generate();
        let b = generator.generate();
        // Two 8-char draws colliding is astronomically unlikely.
        assert_ne!(a, b);
    }
}
