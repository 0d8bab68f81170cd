use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationErrors;

use crate::core::error::{AppError, Result};

lazy_static! {
    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters and underscores
    /// - Valid: "john_doe", "user123", "_admin", "JohnDoe"
    /// - Invalid: "123user", "-user", "user-name", "user name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
}

/// Flatten derive-produced validation errors into one 400 response
pub fn into_validation_error(e: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = e
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |err| {
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{}'", field))
            })
        })
        .collect();
    messages.sort();
    AppError::Validation(messages.join("; "))
}

/// Parse a money field; must be a non-negative decimal.
pub fn parse_price(raw: &str) -> Result<Decimal> {
    let price = Decimal::from_str(raw)
        .map_err(|_| AppError::Validation(format!("'{}' is not a valid price", raw)))?;
    if price.is_sign_negative() {
        return Err(AppError::Validation(
            "Price must not be negative".to_string(),
        ));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_regex_valid() {
        assert!(USERNAME_REGEX.is_match("john_doe"));
        assert!(USERNAME_REGEX.is_match("user123"));
        assert!(USERNAME_REGEX.is_match("_admin"));
        assert!(USERNAME_REGEX.is_match("JohnDoe"));
    }

    #[test]
    fn test_username_regex_invalid() {
        assert!(!USERNAME_REGEX.is_match("123user")); // starts with digit
        assert!(!USERNAME_REGEX.is_match("-user")); // starts with hyphen
        assert!(!USERNAME_REGEX.is_match("user-name")); // hyphen
        assert!(!USERNAME_REGEX.is_match("user name")); // space
        assert!(!USERNAME_REGEX.is_match("")); // empty
    }

    #[test]
    fn parse_price_accepts_decimals() {
        assert_eq!(parse_price("149.90").unwrap(), Decimal::new(14990, 2));
        assert_eq!(parse_price("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_price_rejects_garbage_and_negatives() {
        assert!(parse_price("abc").is_err());
        assert!(parse_price("12,50").is_err());
        assert!(parse_price("-1").is_err());
    }
}
