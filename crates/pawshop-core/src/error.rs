//! # Error Types
//!
//! Domain-specific error types for pawshop-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (barcode, available stock, ...)
//! 3. Errors are enum variants, never String
//! 4. Every variant maps onto one of the dialogs the register shows;
//!    none of them is fatal

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations surfaced to the operator.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id not present in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Barcode scan with no matching product.
    #[error("No product found with barcode: {0}")]
    BarcodeNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Supplier not found: {0}")]
    SupplierNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Adding a product with zero units on hand.
    #[error("{name} is currently out of stock")]
    OutOfStock { name: String },

    /// Requested cart quantity exceeds what the catalog has.
    ///
    /// Raised both when the +1 merge on add would pass the shelf count
    /// ("Stock Limit Reached") and when an explicit quantity edit does
    /// ("Stock Limit Exceeded"). The register shows the available count.
    #[error("Cannot exceed available stock for {name}: {available} available, {requested} requested")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Completing a sale with no line items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cash tendered below the grand total. Nothing is recorded.
    #[error("Cash received ({received}) is less than total amount ({total})")]
    InsufficientPayment { received: Money, total: Money },

    /// Illegal order status jump (only Pending -> Shipped -> Delivered).
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidOrderTransition {
        order_id: String,
        from: String,
        to: String,
    },

    /// Line not present in the cart being edited.
    #[error("Product {0} is not in the cart")]
    NotInCart(i64),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation failures, raised before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must not be negative")]
    Negative { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Premium Dog Food".to_string(),
            available: 20,
            requested: 25,
        };
        assert_eq!(
            err.to_string(),
            "Cannot exceed available stock for Premium Dog Food: 20 available, 25 requested"
        );

        let err = CoreError::InsufficientPayment {
            received: Money::from_cents(5000),
            total: Money::from_cents(5220),
        };
        assert_eq!(
            err.to_string(),
            "Cash received ($50.00) is less than total amount ($52.20)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "barcode".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
