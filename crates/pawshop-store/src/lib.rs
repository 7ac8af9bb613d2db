//! # pawshop-store: JSON Document Persistence
//!
//! Whole-document persistence for Pawshop POS. Each collection lives in
//! one named slot (a JSON file in the data directory); the application
//! layer loads every slot at startup and saves a slot after each
//! mutation.
//!
//! ## Guarantees
//!
//! - A missing or corrupt slot loads as its default value; other slots
//!   are unaffected.
//! - Saves are atomic at the file level: temp file then rename.
//!
//! ## Modules
//!
//! - [`document`] - The [`DocumentStore`] and slot names
//! - [`error`] - Store error types

pub mod document;
pub mod error;

pub use document::{slots, DocumentStore};
pub use error::{StoreError, StoreResult};
