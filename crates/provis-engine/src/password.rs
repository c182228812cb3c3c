//! Secret generation for console passwords.
//!
//! Generated passwords may grant console access, so every character is
//! drawn from the thread-local random number generator, which is
//! cryptographically secure by default. Never a seeded or
//! non-cryptographic generator.

use rand::Rng;

use provis_model::SecretString;

/// Characters a generated password may contain: upper and lower ASCII
/// letters, digits, and a small fixed symbol set.
pub const PASSWORD_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%&*";

/// Default password length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// Generates a random password of the given length.
///
/// Each character is drawn uniformly and independently from
/// [`PASSWORD_ALPHABET`].
#[must_use]
pub fn generate_password(length: usize) -> SecretString {
    let mut rng = rand::rng();
    let password: String = (0..length)
        .map(|_| {
            let idx = rng.random_range(0..PASSWORD_ALPHABET.len());
            PASSWORD_ALPHABET[idx] as char
        })
        .collect();
    SecretString::new(password)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;

    #[test]
    fn produces_requested_length() {
        assert_eq!(generate_password(16).len(), 16);
        assert_eq!(generate_password(32).len(), 32);
        assert_eq!(generate_password(0).len(), 0);
    }

    #[test]
    fn default_length_is_sixteen() {
        assert_eq!(generate_password(DEFAULT_PASSWORD_LENGTH).len(), 16);
    }

    #[test]
    fn only_contains_alphabet_characters() {
        let password = generate_password(1000);
        assert!(password
            .expose()
            .bytes()
            .all(|b| PASSWORD_ALPHABET.contains(&b)));
    }

    #[test]
    fn passwords_are_unique() {
        let passwords: HashSet<String> = (0..1000)
            .map(|_| generate_password(16).expose().to_string())
            .collect();
        // All 1000 passwords should be unique
        assert_eq!(passwords.len(), 1000);
    }

    #[test]
    fn no_character_dominates() {
        // Rough uniformity check, not a randomness test: over 20_000
        // draws from a 69-character alphabet the expected share per
        // character is ~1.4%; nothing should come close to 10%.
        let mut counts: HashMap<u8, usize> = HashMap::new();
        for _ in 0..200 {
            for byte in generate_password(100).expose().bytes() {
                *counts.entry(byte).or_default() += 1;
            }
        }

        let total: usize = counts.values().sum();
        let max = counts.values().copied().max().unwrap_or(0);
        assert!(max < total / 10, "character appeared {max} of {total} times");
    }
}
