//! # Validation Module
//!
//! Input validation for create/update operations. Runs before any state
//! is touched, so a rejected form leaves every collection unchanged.

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field (non-empty after trimming).
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a product name: required, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required("name", name)?;

    if name.trim().len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a barcode: required, at most 50 characters, no spaces.
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: 50,
        });
    }

    if !barcode
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address. Same shape check the checkout form runs:
/// something, an @, something, a dot, something.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    validate_required("email", email)?;

    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.is_empty()
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && domain.contains('.')
            && !email.contains(char::is_whitespace)
    });

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

/// Validates a phone number: digits, spaces, hyphens, parentheses, and a
/// leading `+`, with at least 10 digits overall.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();
    validate_required("phone", phone)?;

    let allowed = phone.chars().enumerate().all(|(i, c)| {
        c.is_ascii_digit()
            || c == ' '
            || c == '-'
            || c == '('
            || c == ')'
            || (c == '+' && i == 0)
    });
    let digits = phone.chars().filter(char::is_ascii_digit).count();

    if !allowed || digits < 10 {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain at least 10 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price: zero allowed (free items), negative rejected.
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a stock or line quantity: negative rejected.
pub fn validate_quantity(field: &str, qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a discount percentage, range 0-100.
pub fn validate_discount_percent(pct: i64) -> ValidationResult<()> {
    if !(0..=100).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Fluffy").is_ok());
        assert!(validate_required("name", "").is_err());
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("PF001").is_ok());
        assert!(validate_barcode("DOG-FOOD_1").is_ok());
        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("has space").is_err());
        assert!(validate_barcode(&"A".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("jane@shop.co.uk").is_ok());
        assert!(validate_email("janeexample.com").is_err());
        assert!(validate_email("jane@example").is_err());
        assert!(validate_email("jane@.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+92-300-1234567").is_ok());
        assert!(validate_phone("(555) 123-4567").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("salePrice", Money::from_cents(0)).is_ok());
        assert!(validate_price("salePrice", Money::from_cents(4599)).is_ok());
        assert!(validate_price("salePrice", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_discount_percent() {
        assert!(validate_discount_percent(0).is_ok());
        assert!(validate_discount_percent(100).is_ok());
        assert!(validate_discount_percent(-1).is_err());
        assert!(validate_discount_percent(101).is_err());
    }
}
