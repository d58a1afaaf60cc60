//! Field checks applied before writes. Failures are 422.

use crate::error::AppError;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap_or_else(|e| panic!("email pattern: {}", e))
    })
}

pub struct RequestValidator;

impl RequestValidator {
    pub fn email(field: &str, value: &str) -> Result<(), AppError> {
        if !email_re().is_match(value) {
            return Err(AppError::Validation(format!("{} must be a valid email address", field)));
        }
        Ok(())
    }

    /// Ratings are whole stars from 1 to 5.
    pub fn rating(value: i32) -> Result<(), AppError> {
        if !(1..=5).contains(&value) {
            return Err(AppError::Validation("rating must be between 1 and 5".into()));
        }
        Ok(())
    }

    pub fn positive(field: &str, value: i32) -> Result<(), AppError> {
        if value <= 0 {
            return Err(AppError::Validation(format!("{} must be greater than zero", field)));
        }
        Ok(())
    }

    pub fn non_negative(field: &str, value: i32) -> Result<(), AppError> {
        if value < 0 {
            return Err(AppError::Validation(format!("{} must not be negative", field)));
        }
        Ok(())
    }

    pub fn non_negative_amount(field: &str, value: Decimal) -> Result<(), AppError> {
        if value < Decimal::ZERO {
            return Err(AppError::Validation(format!("{} must not be negative", field)));
        }
        Ok(())
    }

    /// Money columns hold two decimal places; anything finer would be rounded away on write.
    pub fn cents(field: &str, value: Decimal) -> Result<(), AppError> {
        if value.normalize().scale() > 2 {
            return Err(AppError::Validation(format!("{} must not have more than two decimal places", field)));
        }
        Ok(())
    }

    pub fn not_blank(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} is required", field)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format() {
        assert!(RequestValidator::email("email", "ann@example.com").is_ok());
        assert!(RequestValidator::email("email", "ann@localhost").is_err());
        assert!(RequestValidator::email("email", "not an email").is_err());
        assert!(RequestValidator::email("email", "").is_err());
    }

    #[test]
    fn rating_bounds() {
        assert!(RequestValidator::rating(1).is_ok());
        assert!(RequestValidator::rating(5).is_ok());
        assert!(RequestValidator::rating(0).is_err());
        assert!(RequestValidator::rating(6).is_err());
    }

    #[test]
    fn quantities() {
        assert!(RequestValidator::positive("quantity", 1).is_ok());
        assert!(RequestValidator::positive("quantity", 0).is_err());
        assert!(RequestValidator::non_negative("quantity", 0).is_ok());
        let err = RequestValidator::non_negative("quantity", -1).unwrap_err();
        assert_eq!(err.to_string(), "quantity must not be negative");
    }

    #[test]
    fn amounts_and_blanks() {
        assert!(RequestValidator::non_negative_amount("amount", Decimal::ZERO).is_ok());
        assert!(RequestValidator::non_negative_amount("amount", Decimal::NEGATIVE_ONE).is_err());
        assert!(RequestValidator::cents("amount_paid", Decimal::new(1999, 2)).is_ok());
        assert!(RequestValidator::cents("amount_paid", Decimal::new(15000, 3)).is_ok());
        assert!(RequestValidator::cents("amount_paid", Decimal::new(4, 3)).is_err());
        assert!(RequestValidator::not_blank("username", "  ").is_err());
        assert!(RequestValidator::not_blank("username", "ann").is_ok());
    }
}
