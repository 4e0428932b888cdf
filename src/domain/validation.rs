use crate::error::{Result, UserError};

/// Longest accepted user name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Checks that a name is non-empty, at most [`MAX_NAME_LEN`] characters and
/// fits on a single line of the storage file.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(UserError::Validation("name can not be empty".to_string()));
    }

    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(UserError::Validation(format!(
            "name can not be more than {} characters, got {}",
            MAX_NAME_LEN, len
        )));
    }

    if name.contains(['\n', '\r']) {
        return Err(UserError::Validation("name can not contain line breaks".to_string()));
    }

    Ok(())
}

/// Checks that a balance is a finite number no less than zero.
pub fn validate_balance(balance: f64) -> Result<()> {
    if !balance.is_finite() {
        return Err(UserError::Validation(format!("balance must be a finite number, got {}", balance)));
    }
    if balance < 0.0 {
        return Err(UserError::Validation(format!("balance can not be less than 0, got {}", balance)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_bounds() {
        assert!(validate_name("A").is_ok());
        assert!(validate_name(&"x".repeat(100)).is_ok());
        assert!(matches!(validate_name(""), Err(UserError::Validation(_))));
        assert!(matches!(validate_name(&"x".repeat(101)), Err(UserError::Validation(_))));
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 100 two-byte characters is still within the limit.
        assert!(validate_name(&"é".repeat(100)).is_ok());
        assert!(validate_name(&"é".repeat(101)).is_err());
    }

    #[test]
    fn test_name_rejects_line_breaks() {
        assert!(validate_name("Alice\nSmith").is_err());
        assert!(validate_name("Alice\r").is_err());
    }

    #[test]
    fn test_balance_bounds() {
        assert!(validate_balance(0.0).is_ok());
        assert!(validate_balance(100.5).is_ok());
        assert!(matches!(validate_balance(-1.0), Err(UserError::Validation(_))));
        assert!(validate_balance(f64::NAN).is_err());
        assert!(validate_balance(f64::INFINITY).is_err());
    }
}
