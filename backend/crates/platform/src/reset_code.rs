//! One-time Reset Codes
//!
//! Short numeric codes used to authorise a password reset. Delivery is
//! someone else's job; this module only generates and compares them.

use rand::Rng;
use rand::rngs::OsRng;
use thiserror::Error;

/// Smallest code ever issued
pub const MIN_CODE: u16 = 1000;

/// Largest code ever issued
pub const MAX_CODE: u16 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Reset code must be a 4-digit number")]
pub struct InvalidResetCode;

/// A four digit reset code
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ResetCode(u16);

impl ResetCode {
    /// Draw a fresh code from the OS random source
    pub fn generate() -> Self {
        Self(OsRng.gen_range(MIN_CODE..=MAX_CODE))
    }

    /// Accept a code supplied by a client or loaded from storage
    pub fn new(value: u16) -> Result<Self, InvalidResetCode> {
        if (MIN_CODE..=MAX_CODE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidResetCode)
        }
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Compare without short-circuiting on the first differing byte
    pub fn matches(&self, candidate: &ResetCode) -> bool {
        constant_time_eq(&self.0.to_be_bytes(), &candidate.0.to_be_bytes())
    }
}

impl std::fmt::Debug for ResetCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ResetCode").field(&"****").finish()
    }
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_in_range() {
        for _ in 0..200 {
            let code = ResetCode::generate();
            assert!((MIN_CODE..=MAX_CODE).contains(&code.value()));
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(ResetCode::new(999).is_err());
        assert!(ResetCode::new(10_000).is_err());
        assert_eq!(ResetCode::new(4321).unwrap().value(), 4321);
    }

    #[test]
    fn test_matches() {
        let code = ResetCode::new(1234).unwrap();
        assert!(code.matches(&ResetCode::new(1234).unwrap()));
        assert!(!code.matches(&ResetCode::new(1235).unwrap()));
    }

    #[test]
    fn test_debug_hides_value() {
        let code = ResetCode::new(8765).unwrap();
        assert!(!format!("{:?}", code).contains("8765"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(&[1, 2, 3], &[1, 2, 3]));
        assert!(!constant_time_eq(&[1, 2, 3], &[1, 2, 4]));
        assert!(!constant_time_eq(&[1, 2], &[1, 2, 3]));
    }

    #[test]
    fn test_invalid_code_message() {
        assert_eq!(
            InvalidResetCode.to_string(),
            "Reset code must be a 4-digit number"
        );
    }
}
