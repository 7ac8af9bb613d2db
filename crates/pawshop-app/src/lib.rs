//! # pawshop-app: Application Layer for Pawshop POS
//!
//! Ties the pure core to the document store. The [`Shop`] facade owns
//! every collection in memory; each operation routes through the core's
//! rules and saves the slots it touched.
//!
//! ## Modules
//!
//! - [`shop`] - The [`Shop`] facade and dashboard totals
//! - [`catalog`] - Product CRUD, search, and the stock chokepoint
//! - [`suppliers`] - Supplier CRUD
//! - [`ledger`] - Customer CRUD and the purchase roll-up
//! - [`purchasing`] - Stock-in from supplier invoices
//! - [`sales`] - Register sale completion, receipts, and reports
//! - [`storefront`] - Online cart and the order fulfilment flow
//! - [`counters`] - Persisted `SUP/CUST/PUR/SALE` id sequences
//! - [`config`] - Runtime settings with `PAWSHOP_*` overrides
//! - [`error`] - Unified application error
//!
//! ## Example
//!
//! ```no_run
//! use pawshop_app::{AppConfig, Shop};
//! use pawshop_core::{Money, PaymentMethod};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut shop = Shop::open(AppConfig::from_env())?;
//!
//! let mut session = shop.new_register_session();
//! let product = shop.find_by_barcode("PF001")?.clone();
//! session.add_line(&product)?;
//! session.set_payment_method(PaymentMethod::Cash);
//! session.set_cash_received(Money::from_cents(10000));
//!
//! let sale = shop.complete_sale(&mut session)?;
//! println!("{}", shop.receipt(&sale));
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod counters;
pub mod error;
pub mod ledger;
pub mod purchasing;
pub mod sales;
pub mod shop;
pub mod storefront;
pub mod suppliers;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorCode};
pub use purchasing::{PurchaseDraft, PurchaseDraftItem};
pub use shop::{DashboardTotals, Shop};
