//! # Application Error Type
//!
//! Unified error for shop operations, with a machine-readable code and a
//! display message. Core and store errors convert into it, so every
//! operation surfaces one serializable shape.

use serde::Serialize;

use pawshop_core::CoreError;
use pawshop_store::StoreError;

/// Error returned from shop operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for shop responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Persistence failed
    StorageError,

    /// Business rule rejected the operation
    BusinessLogic,

    /// Cart operation failed
    CartError,

    /// Insufficient stock
    InsufficientStock,

    /// Payment rejected
    PaymentError,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::CartError, message)
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::ProductNotFound(id) => AppError::not_found("Product", id),
            CoreError::BarcodeNotFound(code) => AppError::not_found("Barcode", code),
            CoreError::CustomerNotFound(id) => AppError::not_found("Customer", id),
            CoreError::SupplierNotFound(id) => AppError::not_found("Supplier", id),
            CoreError::OrderNotFound(id) => AppError::not_found("Order", id),
            CoreError::OutOfStock { .. } => {
                AppError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::InsufficientStock { .. } => {
                AppError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::EmptyCart | CoreError::NotInCart(_) => AppError::cart(err.to_string()),
            CoreError::InsufficientPayment { .. } => {
                AppError::new(ErrorCode::PaymentError, err.to_string())
            }
            CoreError::InvalidOrderTransition { .. } => {
                AppError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<pawshop_core::ValidationError> for AppError {
    fn from(err: pawshop_core::ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!(%err, "store operation failed");
        AppError::new(ErrorCode::StorageError, "Data could not be saved")
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;
