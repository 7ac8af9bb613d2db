//! # Domain Types
//!
//! Core domain types used throughout Pawshop POS.
//!
//! ## Identity Conventions
//! - `Product.id`: integer, assigned max-existing + 1 (1 on an empty catalog)
//! - `Supplier`/`Customer`/`PurchaseRecord`/`SaleTransaction`: prefixed
//!   zero-padded sequence ids (`SUP001`, `CUST001`, `PUR001`, `SALE001`)
//!   drawn from persisted counters, never from collection length
//! - `Order`: `ORD-<millis>` timestamp id (storefront channel)
//!
//! ## Snapshot Pattern
//! Sale and purchase line items freeze the product name/price at the time
//! of the transaction. Historical records stay displayable after the
//! product is edited or deleted; dangling product ids in history are
//! accepted (history is display-only).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points (1 bps = 0.01%). The register uses a fixed
/// 1600 bps (16%) rate; purchasing records carry the rate their invoice
/// was taxed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for config parsing).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as a percentage (display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Stock Status
// =============================================================================

/// Stock status derived from quantity and the reorder threshold.
///
/// This is a computed property, never a stored field: the original system
/// stored it alongside quantity and the two drifted apart after edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    /// Quantity is zero.
    OutOfStock,
    /// Quantity is at or below the reorder level.
    LowStock,
    /// Quantity is above the reorder level.
    InStock,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Payment Method / Payment Status
// =============================================================================

/// How a sale (or purchase invoice) was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    Other,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Settlement state of a purchase invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Partial,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product with stock and pricing information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Integer identifier (max existing + 1 at creation).
    pub id: i64,

    /// Barcode as printed on the package. Expected unique, not enforced.
    pub barcode: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown on the register and receipt.
    pub name: String,

    /// Category key ("food", "toys", ...). Used by search and filtering.
    pub category: String,

    pub brand: String,

    /// Supplier reference. Deleting a supplier leaves this dangling;
    /// the denormalized name keeps historical rows displayable.
    pub supplier_id: Option<String>,
    pub supplier_name: String,

    pub description: String,

    /// Image reference for the storefront/register tiles.
    pub image: String,

    /// Cost per unit from the supplier.
    pub purchase_price: Money,

    /// Selling price on the register and storefront.
    pub sale_price: Money,

    /// Maximum retail price (printed price ceiling).
    pub mrp: Money,

    /// Units on hand. Never negative (decrements clamp at zero).
    pub quantity: i64,

    /// Floor the owner wants to keep on the shelf.
    pub min_stock: i64,

    /// Threshold at or below which the product is flagged low-stock.
    pub reorder_level: i64,

    /// Selling unit ("piece", "kg", "pack").
    pub unit: String,

    pub last_purchase_date: Option<NaiveDate>,
    pub last_purchase_quantity: Option<i64>,

    /// Storefront percentage discount, if the product is on offer.
    #[serde(default)]
    pub discount_percent: Option<u32>,
}

impl Product {
    /// Stock status computed from quantity and the reorder level.
    pub fn stock_status(&self) -> StockStatus {
        if self.quantity == 0 {
            StockStatus::OutOfStock
        } else if self.quantity <= self.reorder_level {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Margin over purchase price, as a percentage. Zero cost yields zero
    /// rather than dividing by it.
    pub fn margin_percent(&self) -> f64 {
        let cost = self.purchase_price.cents();
        if cost <= 0 {
            return 0.0;
        }
        let gain = self.sale_price.cents() - cost;
        gain as f64 / cost as f64 * 100.0
    }

    /// Storefront unit price after the product's own discount, if any.
    pub fn discounted_unit_price(&self) -> Money {
        match self.discount_percent {
            Some(pct) if pct > 0 => self.sale_price.apply_percentage_discount(pct * 100),
            _ => self.sale_price,
        }
    }

    /// Whether the product is flagged for reordering.
    pub fn needs_reorder(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

/// Fields for creating a product. The catalog assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub barcode: String,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub supplier_id: Option<String>,
    pub supplier_name: String,
    pub description: String,
    pub image: String,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub mrp: Money,
    pub quantity: i64,
    pub min_stock: i64,
    pub reorder_level: i64,
    pub unit: String,
    #[serde(default)]
    pub discount_percent: Option<u32>,
}

impl NewProduct {
    /// Materializes the product under the given id.
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            barcode: self.barcode,
            sku: self.sku,
            name: self.name,
            category: self.category,
            brand: self.brand,
            supplier_id: self.supplier_id,
            supplier_name: self.supplier_name,
            description: self.description,
            image: self.image,
            purchase_price: self.purchase_price,
            sale_price: self.sale_price,
            mrp: self.mrp,
            quantity: self.quantity,
            min_stock: self.min_stock,
            reorder_level: self.reorder_level,
            unit: self.unit,
            last_purchase_date: None,
            last_purchase_quantity: None,
            discount_percent: self.discount_percent,
        }
    }
}

/// Typed partial update for a product. Every field is optional; `apply`
/// overwrites only the fields that are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub supplier_id: Option<Option<String>>,
    pub supplier_name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub purchase_price: Option<Money>,
    pub sale_price: Option<Money>,
    pub mrp: Option<Money>,
    pub quantity: Option<i64>,
    pub min_stock: Option<i64>,
    pub reorder_level: Option<i64>,
    pub unit: Option<String>,
    pub last_purchase_date: Option<NaiveDate>,
    pub last_purchase_quantity: Option<i64>,
    pub discount_percent: Option<Option<u32>>,
}

impl ProductPatch {
    pub fn apply(self, product: &mut Product) {
        if let Some(v) = self.barcode {
            product.barcode = v;
        }
        if let Some(v) = self.sku {
            product.sku = v;
        }
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.category {
            product.category = v;
        }
        if let Some(v) = self.brand {
            product.brand = v;
        }
        if let Some(v) = self.supplier_id {
            product.supplier_id = v;
        }
        if let Some(v) = self.supplier_name {
            product.supplier_name = v;
        }
        if let Some(v) = self.description {
            product.description = v;
        }
        if let Some(v) = self.image {
            product.image = v;
        }
        if let Some(v) = self.purchase_price {
            product.purchase_price = v;
        }
        if let Some(v) = self.sale_price {
            product.sale_price = v;
        }
        if let Some(v) = self.mrp {
            product.mrp = v;
        }
        if let Some(v) = self.quantity {
            product.quantity = v.max(0);
        }
        if let Some(v) = self.min_stock {
            product.min_stock = v;
        }
        if let Some(v) = self.reorder_level {
            product.reorder_level = v;
        }
        if let Some(v) = self.unit {
            product.unit = v;
        }
        if let Some(v) = self.last_purchase_date {
            product.last_purchase_date = Some(v);
        }
        if let Some(v) = self.last_purchase_quantity {
            product.last_purchase_quantity = Some(v);
        }
        if let Some(v) = self.discount_percent {
            product.discount_percent = v;
        }
    }
}

// =============================================================================
// Supplier
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplierStatus {
    Active,
    Inactive,
}

/// A supplier the shop buys stock from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// `SUPnnn` sequence id from the persisted counter.
    pub id: String,
    pub name: String,
    /// Contact person.
    pub contact: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub category: String,
    pub status: SupplierStatus,
    /// e.g. "Net 30", "Cash on Delivery".
    pub payment_terms: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    pub name: String,
    pub contact: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub category: String,
    pub status: SupplierStatus,
    pub payment_terms: String,
}

impl NewSupplier {
    pub fn into_supplier(self, id: String) -> Supplier {
        Supplier {
            id,
            name: self.name,
            contact: self.contact,
            phone: self.phone,
            email: self.email,
            address: self.address,
            category: self.category,
            status: self.status,
            payment_terms: self.payment_terms,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub category: Option<String>,
    pub status: Option<SupplierStatus>,
    pub payment_terms: Option<String>,
}

impl SupplierPatch {
    pub fn apply(self, supplier: &mut Supplier) {
        if let Some(v) = self.name {
            supplier.name = v;
        }
        if let Some(v) = self.contact {
            supplier.contact = v;
        }
        if let Some(v) = self.phone {
            supplier.phone = v;
        }
        if let Some(v) = self.email {
            supplier.email = v;
        }
        if let Some(v) = self.address {
            supplier.address = v;
        }
        if let Some(v) = self.category {
            supplier.category = v;
        }
        if let Some(v) = self.status {
            supplier.status = v;
        }
        if let Some(v) = self.payment_terms {
            supplier.payment_terms = v;
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer with their pet profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// `CUSTnnn` sequence id from the persisted counter.
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub pet_name: String,
    pub pet_type: String,
    pub pet_breed: String,
    pub registration_date: NaiveDate,
    pub last_visit: NaiveDate,
    /// Lifetime spend. Only ever increased by the ledger roll-up.
    pub total_purchases: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub pet_name: String,
    pub pet_type: String,
    pub pet_breed: String,
}

impl NewCustomer {
    /// Materializes the profile; registration and last-visit dates are
    /// stamped with the caller-supplied "today".
    pub fn into_customer(self, id: String, today: NaiveDate) -> Customer {
        Customer {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            pet_name: self.pet_name,
            pet_type: self.pet_type,
            pet_breed: self.pet_breed,
            registration_date: today,
            last_visit: today,
            total_purchases: Money::zero(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub pet_name: Option<String>,
    pub pet_type: Option<String>,
    pub pet_breed: Option<String>,
}

impl CustomerPatch {
    pub fn apply(self, customer: &mut Customer) {
        if let Some(v) = self.name {
            customer.name = v;
        }
        if let Some(v) = self.phone {
            customer.phone = v;
        }
        if let Some(v) = self.email {
            customer.email = v;
        }
        if let Some(v) = self.address {
            customer.address = v;
        }
        if let Some(v) = self.pet_name {
            customer.pet_name = v;
        }
        if let Some(v) = self.pet_type {
            customer.pet_type = v;
        }
        if let Some(v) = self.pet_breed {
            customer.pet_breed = v;
        }
    }
}

/// One entry in a customer's purchase history. Append-only; removed only
/// when the customer is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub sale_id: String,
    pub date: NaiveDate,
    pub amount: Money,
    /// Number of line items on the sale, not unit quantities.
    pub items: usize,
}

// =============================================================================
// Purchase Record (Stock-In)
// =============================================================================

/// One line of a supplier invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub product_id: i64,
    /// Name at time of purchase (frozen).
    pub product_name: String,
    pub quantity: i64,
    pub purchase_price: Money,
    pub total: Money,
}

/// A recorded supplier purchase. Immutable once created; applying it is
/// the sole trigger for positive stock adjustments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    /// `PURnnn` sequence id.
    pub id: String,
    pub supplier_id: String,
    /// Supplier name captured at creation (survives supplier deletion).
    pub supplier_name: String,
    pub date: NaiveDate,
    pub invoice_number: String,
    pub items: Vec<PurchaseItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Sale Transaction
// =============================================================================

/// One line of a completed sale. Snapshot of the product at sale time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: i64,
    pub product_name: String,
    pub barcode: String,
    pub quantity: i64,
    pub sale_price: Money,
    pub total: Money,
}

/// A completed register sale. Creating one is the sole trigger for
/// negative stock adjustment and the customer ledger roll-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTransaction {
    /// `SALEnnn` sequence id.
    pub id: String,
    pub customer_id: Option<String>,
    /// Denormalized; "Walk-in Customer" when no customer is attached.
    pub customer_name: String,
    pub date: NaiveDate,
    /// Register clock at completion, formatted `HH:MM AM/PM`.
    pub time: String,
    pub items: Vec<SaleItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    /// Cash tendered; present only for cash payments.
    pub cash_received: Option<Money>,
    pub change: Option<Money>,
    /// Always "Completed": the register only records finalized sales.
    pub status: String,
}

// =============================================================================
// Storefront Order
// =============================================================================

/// Fulfilment state of a storefront order.
///
/// Transitions are validated: Pending -> Shipped -> Delivered, nothing
/// else. The original accepted any jump, which let Delivered orders snap
/// back to Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        };
        f.write_str(label)
    }
}

/// Shipping and contact details captured at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// A snapshotted storefront cart line inside an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: i64,
    pub name: String,
    pub image: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub variant: Option<String>,
}

/// A storefront order. Not stock-aware: the storefront and register are
/// independent sales channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// `ORD-<unix millis>` id.
    pub id: String,
    pub items: Vec<OrderItem>,
    pub details: OrderDetails,
    pub total: Money,
    pub date: NaiveDate,
    pub status: OrderStatus,
}

// =============================================================================
// Unit Tests
// =============================================================================
