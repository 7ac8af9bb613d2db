//! # pawshop-core: Pure Business Logic for Pawshop POS
//!
//! This crate is the **heart** of Pawshop POS. It contains all business
//! logic as pure functions and in-memory state machines with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Pawshop Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                pawshop-app (Application Layer)              │   │
//! │  │    Shop façade ──► catalog / ledger / sales / storefront    │   │
//! │  └───────────────┬─────────────────────────────┬───────────────┘   │
//! │                  │                             │                   │
//! │  ┌───────────────▼───────────────┐ ┌───────────▼───────────────┐   │
//! │  │   ★ pawshop-core (THIS) ★     │ │      pawshop-store        │   │
//! │  │                               │ │   JSON document slots     │   │
//! │  │  types  money  register       │ │   load / save per slot    │   │
//! │  │  storefront  reports  receipt │ └───────────────────────────┘   │
//! │  │                               │                                 │
//! │  │  NO I/O • NO FILES • PURE     │                                 │
//! │  └───────────────────────────────┘                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Supplier, Customer, Sale, Order)
//! - [`money`] - Money type with integer-cents arithmetic (no floats!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//! - [`register`] - Point-of-sale register session (cart + payment math)
//! - [`storefront`] - Online storefront cart (variant-keyed)
//! - [`reports`] - Daily/monthly sales aggregation and CSV export
//! - [`receipt`] - Plain-text receipt rendering
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **No I/O**: File system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are cents (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod receipt;
pub mod register;
pub mod reports;
pub mod storefront;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use register::{RegisterSession, RegisterTotals};
pub use storefront::StorefrontCart;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default register tax rate: 16.00% in basis points.
///
/// A register session applies its configured rate to the bill's
/// discounted subtotal; this is the rate sessions start with.
/// Purchasing invoices carry their own per-invoice rate instead.
pub const REGISTER_TAX_RATE_BPS: u32 = 1600;

/// Customer name recorded on a sale when no customer is attached.
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";
