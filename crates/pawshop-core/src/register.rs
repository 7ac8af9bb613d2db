//! # Register Session
//!
//! Cart-building and payment math for one point-of-sale register session.
//!
//! ## Session Lifecycle
//! ```text
//! Building ──(checkout guards pass, sale recorded)──► Completed ──► reset
//!     │
//!     └─(clear, operator-confirmed)──► reset
//! ```
//! The session itself only builds and validates; applying the sale (stock
//! decrement, ledger roll-up, persistence) is the application layer's job.
//! That keeps every rejection here side-effect free: a failed add or an
//! insufficient cash tender leaves the cart exactly as it was.
//!
//! ## Stock checks
//! Stock is validated interactively against the catalog row the caller
//! passes in. Execution is single-threaded and synchronous, so the row
//! cannot change between the check and the sale being applied.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Customer, PaymentMethod, Product, SaleItem, TaxRate};
use crate::REGISTER_TAX_RATE_BPS;

// =============================================================================
// Register Line
// =============================================================================

/// One cart line. Freezes the product name, barcode, and price at the
/// moment it was added; later catalog edits don't reprice an open cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterLine {
    pub product_id: i64,
    pub name: String,
    pub barcode: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl RegisterLine {
    fn from_product(product: &Product) -> Self {
        RegisterLine {
            product_id: product.id,
            name: product.name.clone(),
            barcode: product.barcode.clone(),
            unit_price: product.sale_price,
            quantity: 1,
        }
    }

    /// Line total (unit price x quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Converts the line into a sale snapshot item.
    pub fn to_sale_item(&self) -> SaleItem {
        SaleItem {
            product_id: self.product_id,
            product_name: self.name.clone(),
            barcode: self.barcode.clone(),
            quantity: self.quantity,
            sale_price: self.unit_price,
            total: self.line_total(),
        }
    }
}

// =============================================================================
// Attached Customer
// =============================================================================

/// Customer reference attached to the session. Id plus denormalized name,
/// which is what the sale record keeps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachedCustomer {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Totals
// =============================================================================

/// Computed bill summary. Recomputed from the lines on demand; nothing
/// here is stored state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTotals {
    pub subtotal: Money,
    pub discount_amount: Money,
    pub tax_amount: Money,
    pub total: Money,
    pub change: Money,
}

// =============================================================================
// Register Session
// =============================================================================

fn default_tax_rate_bps() -> u32 {
    REGISTER_TAX_RATE_BPS
}

/// The register's in-progress sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSession {
    pub lines: Vec<RegisterLine>,
    /// Whole-percent discount, clamped to 0-100.
    discount_percent: u32,
    pub customer: Option<AttachedCustomer>,
    payment_method: Option<PaymentMethod>,
    cash_received: Option<Money>,
    /// Register tax rate in basis points, fixed for the session.
    #[serde(default = "default_tax_rate_bps")]
    tax_rate_bps: u32,
}

impl Default for RegisterSession {
    fn default() -> Self {
        RegisterSession {
            lines: Vec::new(),
            discount_percent: 0,
            customer: None,
            payment_method: None,
            cash_received: None,
            tax_rate_bps: REGISTER_TAX_RATE_BPS,
        }
    }
}

impl RegisterSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session taxing at a non-default rate (store configuration).
    pub fn with_tax_rate(tax_rate_bps: u32) -> Self {
        RegisterSession {
            tax_rate_bps,
            ..Self::default()
        }
    }

    pub fn tax_rate_bps(&self) -> u32 {
        self.tax_rate_bps
    }

    // -------------------------------------------------------------------------
    // Building
    // -------------------------------------------------------------------------

    /// Adds one unit of a product to the cart.
    ///
    /// ## Behavior
    /// - Quantity 0 on the shelf: rejected (Out of Stock)
    /// - Already in the cart: quantity +1, rejected if that would exceed
    ///   the shelf count (Stock Limit Reached)
    /// - Otherwise: new line with quantity 1
    pub fn add_line(&mut self, product: &Product) -> CoreResult<()> {
        if product.quantity <= 0 {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
        {
            if line.quantity >= product.quantity {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.quantity,
                    requested: line.quantity + 1,
                });
            }
            line.quantity += 1;
            return Ok(());
        }

        self.lines.push(RegisterLine::from_product(product));
        Ok(())
    }

    /// Sets the quantity of a cart line.
    ///
    /// ## Behavior
    /// - Above the shelf count: rejected, line unchanged (Stock Limit
    ///   Exceeded)
    /// - Zero or below: line removed
    pub fn set_line_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity > product.quantity {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.quantity,
                requested: quantity,
            });
        }

        if quantity <= 0 {
            return self.remove_line(product.id);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
            .ok_or(CoreError::NotInCart(product.id))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line by product id.
    pub fn remove_line(&mut self, product_id: i64) -> CoreResult<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);

        if self.lines.len() == before {
            Err(CoreError::NotInCart(product_id))
        } else {
            Ok(())
        }
    }

    /// Sets the whole-bill discount percentage, clamped to 0-100.
    pub fn set_discount_percent(&mut self, percent: i64) {
        self.discount_percent = percent.clamp(0, 100) as u32;
    }

    pub fn discount_percent(&self) -> u32 {
        self.discount_percent
    }

    /// Attaches (or detaches) a customer for the ledger roll-up.
    pub fn attach_customer(&mut self, customer: Option<&Customer>) {
        self.customer = customer.map(|c| AttachedCustomer {
            id: c.id.clone(),
            name: c.name.clone(),
        });
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method.unwrap_or(PaymentMethod::Cash)
    }

    pub fn set_cash_received(&mut self, amount: Money) {
        self.cash_received = Some(amount);
    }

    pub fn cash_received(&self) -> Money {
        self.cash_received.unwrap_or_default()
    }

    /// Discards the whole session: lines, discount, customer, tendered
    /// cash. The operator confirms before the application layer calls
    /// this. The configured tax rate survives the reset.
    pub fn clear(&mut self) {
        *self = RegisterSession::with_tax_rate(self.tax_rate_bps);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of cart lines (not unit quantities).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    // -------------------------------------------------------------------------
    // Bill math
    // -------------------------------------------------------------------------

    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    pub fn discount_amount(&self) -> Money {
        self.subtotal().percentage(self.discount_percent * 100)
    }

    /// Tax at the session's register rate on the discounted base.
    pub fn tax_amount(&self) -> Money {
        let taxable = self.subtotal() - self.discount_amount();
        taxable.calculate_tax(TaxRate::from_bps(self.tax_rate_bps))
    }

    pub fn total(&self) -> Money {
        self.subtotal() - self.discount_amount() + self.tax_amount()
    }

    /// Change due for cash payments: `max(0, cash - total)`. Zero for
    /// non-cash methods.
    pub fn change(&self) -> Money {
        match self.payment_method() {
            PaymentMethod::Cash => (self.cash_received() - self.total()).max(Money::zero()),
            _ => Money::zero(),
        }
    }

    pub fn totals(&self) -> RegisterTotals {
        RegisterTotals {
            subtotal: self.subtotal(),
            discount_amount: self.discount_amount(),
            tax_amount: self.tax_amount(),
            total: self.total(),
            change: self.change(),
        }
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Validates the session for completion and returns the final totals.
    ///
    /// ## Guards (in order)
    /// 1. Empty cart
    /// 2. Cash tendered below the grand total (cash payments only)
    ///
    /// Both fire before any state anywhere is touched: a rejection keeps
    /// every entered value for correction.
    pub fn checkout(&self) -> CoreResult<RegisterTotals> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let totals = self.totals();
        if self.payment_method() == PaymentMethod::Cash && self.cash_received() < totals.total {
            return Err(CoreError::InsufficientPayment {
                received: self.cash_received(),
                total: totals.total,
            });
        }

        Ok(totals)
    }

    /// Snapshots the cart lines as sale items.
    pub fn sale_items(&self) -> Vec<SaleItem> {
        self.lines.iter().map(RegisterLine::to_sale_item).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price_cents: i64, quantity: i64) -> Product {
        Product {
            id,
            barcode: format!("BC{id:03}"),
            sku: format!("SKU-{id}"),
            name: format!("Product {id}"),
            category: "food".into(),
            brand: "PawBrand".into(),
            supplier_id: None,
            supplier_name: String::new(),
            description: String::new(),
            image: String::new(),
            purchase_price: Money::from_cents(price_cents / 2),
            sale_price: Money::from_cents(price_cents),
            mrp: Money::from_cents(price_cents),
            quantity,
            min_stock: 5,
            reorder_level: 10,
            unit: "piece".into(),
            last_purchase_date: None,
            last_purchase_quantity: None,
            discount_percent: None,
        }
    }

    #[test]
    fn test_add_line_out_of_stock() {
        let mut session = RegisterSession::new();
        let empty_shelf = product(1, 1000, 0);

        let err = session.add_line(&empty_shelf).unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { .. }));
        assert!(session.is_empty());
    }

    #[test]
    fn test_add_line_merges_and_caps_at_stock() {
        let mut session = RegisterSession::new();
        let two_left = product(1, 1000, 2);

        session.add_line(&two_left).unwrap();
        session.add_line(&two_left).unwrap();
        assert_eq!(session.line_count(), 1);
        assert_eq!(session.total_quantity(), 2);

        let err = session.add_line(&two_left).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { available: 2, .. }));
        assert_eq!(session.total_quantity(), 2);
    }

    #[test]
    fn test_set_line_quantity_rejects_above_stock() {
        let mut session = RegisterSession::new();
        let p = product(1, 1500, 20);
        session.add_line(&p).unwrap();
        session.set_line_quantity(&p, 3).unwrap();

        let err = session.set_line_quantity(&p, 25).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 20,
                requested: 25,
                ..
            }
        ));
        // Rejection leaves the line untouched.
        assert_eq!(session.total_quantity(), 3);
    }

    #[test]
    fn test_set_line_quantity_zero_removes() {
        let mut session = RegisterSession::new();
        let p = product(1, 1000, 10);
        session.add_line(&p).unwrap();

        session.set_line_quantity(&p, 0).unwrap();
        assert!(session.is_empty());
    }

    #[test]
    fn test_remove_line_not_in_cart() {
        let mut session = RegisterSession::new();
        assert!(matches!(
            session.remove_line(42).unwrap_err(),
            CoreError::NotInCart(42)
        ));
    }

    #[test]
    fn test_discount_percent_clamped() {
        let mut session = RegisterSession::new();
        session.set_discount_percent(150);
        assert_eq!(session.discount_percent(), 100);
        session.set_discount_percent(-5);
        assert_eq!(session.discount_percent(), 0);
    }

    /// The literal bill from the ops runbook: prices [10.00, 25.00],
    /// quantities [3, 1], 10% discount, 16% tax.
    #[test]
    fn test_bill_math_literal_example() {
        let mut session = RegisterSession::new();
        let a = product(1, 1000, 50);
        let b = product(2, 2500, 50);

        session.add_line(&a).unwrap();
        session.set_line_quantity(&a, 3).unwrap();
        session.add_line(&b).unwrap();
        session.set_discount_percent(10);

        assert_eq!(session.subtotal().cents(), 5500); // $55.00
        assert_eq!(session.discount_amount().cents(), 550); // $5.50
        assert_eq!(session.tax_amount().cents(), 792); // 16% of $49.50
        assert_eq!(session.total().cents(), 5742); // $57.42
    }

    #[test]
    fn test_session_tax_rate_drives_the_bill() {
        let p = product(1, 1000, 50);

        let mut tax_free = RegisterSession::with_tax_rate(0);
        tax_free.add_line(&p).unwrap();
        assert_eq!(tax_free.tax_amount().cents(), 0);
        assert_eq!(tax_free.total().cents(), 1000);

        let mut reduced = RegisterSession::with_tax_rate(500); // 5%
        reduced.add_line(&p).unwrap();
        assert_eq!(reduced.tax_amount().cents(), 50);

        // The configured rate survives a session reset.
        reduced.clear();
        assert_eq!(reduced.tax_rate_bps(), 500);
    }

    #[test]
    fn test_checkout_empty_cart() {
        let session = RegisterSession::new();
        assert!(matches!(session.checkout().unwrap_err(), CoreError::EmptyCart));
    }

    #[test]
    fn test_checkout_insufficient_cash() {
        let mut session = RegisterSession::new();
        let p = product(1, 1500, 20);
        session.add_line(&p).unwrap();
        session.set_line_quantity(&p, 3).unwrap();
        // 3 x $15.00 x 1.16 = $52.20
        assert_eq!(session.total().cents(), 5220);

        session.set_payment_method(PaymentMethod::Cash);
        session.set_cash_received(Money::from_cents(5000));

        let err = session.checkout().unwrap_err();
        assert!(matches!(err, CoreError::InsufficientPayment { .. }));
        // Entered values are retained for correction.
        assert_eq!(session.cash_received().cents(), 5000);
        assert_eq!(session.total_quantity(), 3);
    }

    #[test]
    fn test_checkout_cash_change() {
        let mut session = RegisterSession::new();
        let p = product(1, 1500, 20);
        session.add_line(&p).unwrap();
        session.set_payment_method(PaymentMethod::Cash);
        session.set_cash_received(Money::from_cents(2000));

        let totals = session.checkout().unwrap();
        assert_eq!(totals.total.cents(), 1740); // $15.00 x 1.16
        assert_eq!(totals.change.cents(), 260);
    }

    #[test]
    fn test_card_payment_skips_cash_guard() {
        let mut session = RegisterSession::new();
        let p = product(1, 1500, 20);
        session.add_line(&p).unwrap();
        session.set_payment_method(PaymentMethod::Card);

        let totals = session.checkout().unwrap();
        assert_eq!(totals.change.cents(), 0);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = RegisterSession::new();
        let p = product(1, 1000, 10);
        session.add_line(&p).unwrap();
        session.set_discount_percent(20);
        session.set_cash_received(Money::from_cents(5000));

        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.discount_percent(), 0);
        assert_eq!(session.cash_received().cents(), 0);
        assert!(session.customer.is_none());
    }
}
