//! Marriage party kinds.
//!
//! Values must match the `ck_marriage_parties_party_type` check constraint.

use crate::error::CoreError;

pub const PARTY_GROOM: &str = "groom";
pub const PARTY_BRIDE: &str = "bride";
pub const PARTY_WITNESS: &str = "witness";

const VALID_PARTY_TYPES: &[&str] = &[PARTY_GROOM, PARTY_BRIDE, PARTY_WITNESS];

/// Validate that `party_type` is one of `groom`, `bride` or `witness`.
pub fn validate_party_type(party_type: &str) -> Result<(), CoreError> {
    if VALID_PARTY_TYPES.contains(&party_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid party_type '{party_type}'. Must be one of: {VALID_PARTY_TYPES:?}"
        )))
    }
}

/// Validate an optional party age. Ages are whole years and must be plausible.
pub fn validate_party_age(age: Option<i32>) -> Result<(), CoreError> {
    match age {
        Some(a) if !(0..=150).contains(&a) => Err(CoreError::Validation(format!(
            "Invalid age {a}. Must be between 0 and 150"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_party_types() {
        for party in ["groom", "bride", "witness"] {
            assert!(validate_party_type(party).is_ok());
        }
    }

    #[test]
    fn rejects_unknown_party_type() {
        assert!(validate_party_type("best_man").is_err());
        assert!(validate_party_type("").is_err());
        assert!(validate_party_type("Groom").is_err());
    }

    #[test]
    fn age_bounds() {
        assert!(validate_party_age(None).is_ok());
        assert!(validate_party_age(Some(0)).is_ok());
        assert!(validate_party_age(Some(34)).is_ok());
        assert!(validate_party_age(Some(-1)).is_err());
        assert!(validate_party_age(Some(151)).is_err());
    }
}
