//! # Shop Facade
//!
//! Owns every collection in memory and the document store underneath.
//! Operations live in the sibling modules as `impl Shop` blocks:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shop                                                       │
//! │                                                             │
//! │  catalog.rs     products: add / patch / search / stock      │
//! │  suppliers.rs   suppliers: add / patch / delete             │
//! │  ledger.rs      customers: add / patch / history roll-up    │
//! │  purchasing.rs  receive_stock: invoice in, stock up         │
//! │  sales.rs       complete_sale: register out, stock down     │
//! │  storefront.rs  online cart and orders                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every slot loads once at open; each mutation saves the slots it
//! touched. A corrupt slot comes back as empty and the rest survive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use pawshop_core::{
    Customer, HistoryEntry, Money, Order, Product, PurchaseRecord, SaleTransaction, StockStatus,
    StorefrontCart, Supplier,
};
use pawshop_store::{slots, DocumentStore};

use crate::config::AppConfig;
use crate::counters::SequenceCounters;
use crate::error::AppResult;

/// Per-customer purchase history, keyed by customer id.
pub type CustomerHistory = BTreeMap<String, Vec<HistoryEntry>>;

/// The running shop: configuration, store handle, and every collection.
#[derive(Debug)]
pub struct Shop {
    pub(crate) config: AppConfig,
    pub(crate) store: DocumentStore,
    pub(crate) products: Vec<Product>,
    pub(crate) suppliers: Vec<Supplier>,
    pub(crate) customers: Vec<Customer>,
    pub(crate) purchases: Vec<PurchaseRecord>,
    pub(crate) sales: Vec<SaleTransaction>,
    pub(crate) customer_history: CustomerHistory,
    pub(crate) storefront_cart: StorefrontCart,
    pub(crate) orders: Vec<Order>,
    pub(crate) counters: SequenceCounters,
}

impl Shop {
    /// Opens the shop: creates the data directory if needed and loads
    /// every slot. Missing slots start empty.
    pub fn open(config: AppConfig) -> AppResult<Self> {
        let store = DocumentStore::open(&config.data_dir)?;

        let shop = Shop {
            products: store.load(slots::PRODUCTS),
            suppliers: store.load(slots::SUPPLIERS),
            customers: store.load(slots::CUSTOMERS),
            purchases: store.load(slots::PURCHASES),
            sales: store.load(slots::SALES),
            customer_history: store.load(slots::CUSTOMER_HISTORY),
            storefront_cart: store.load(slots::CART),
            orders: store.load(slots::ORDERS),
            counters: store.load(slots::COUNTERS),
            config,
            store,
        };

        info!(
            products = shop.products.len(),
            customers = shop.customers.len(),
            sales = shop.sales.len(),
            orders = shop.orders.len(),
            "shop opened"
        );
        Ok(shop)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn purchases(&self) -> &[PurchaseRecord] {
        &self.purchases
    }

    pub fn sales(&self) -> &[SaleTransaction] {
        &self.sales
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn storefront_cart(&self) -> &StorefrontCart {
        &self.storefront_cart
    }

    // -------------------------------------------------------------------------
    // Slot saves (one helper per slot, called after each mutation)
    // -------------------------------------------------------------------------

    pub(crate) fn save_products(&self) -> AppResult<()> {
        self.store.save(slots::PRODUCTS, &self.products)?;
        Ok(())
    }

    pub(crate) fn save_suppliers(&self) -> AppResult<()> {
        self.store.save(slots::SUPPLIERS, &self.suppliers)?;
        Ok(())
    }

    pub(crate) fn save_customers(&self) -> AppResult<()> {
        self.store.save(slots::CUSTOMERS, &self.customers)?;
        Ok(())
    }

    pub(crate) fn save_purchases(&self) -> AppResult<()> {
        self.store.save(slots::PURCHASES, &self.purchases)?;
        Ok(())
    }

    pub(crate) fn save_sales(&self) -> AppResult<()> {
        self.store.save(slots::SALES, &self.sales)?;
        Ok(())
    }

    pub(crate) fn save_customer_history(&self) -> AppResult<()> {
        self.store.save(slots::CUSTOMER_HISTORY, &self.customer_history)?;
        Ok(())
    }

    pub(crate) fn save_cart(&self) -> AppResult<()> {
        self.store.save(slots::CART, &self.storefront_cart)?;
        Ok(())
    }

    pub(crate) fn save_orders(&self) -> AppResult<()> {
        self.store.save(slots::ORDERS, &self.orders)?;
        Ok(())
    }

    pub(crate) fn save_counters(&self) -> AppResult<()> {
        self.store.save(slots::COUNTERS, &self.counters)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Dashboard
    // -------------------------------------------------------------------------

    /// Headline numbers for the dashboard screen.
    pub fn dashboard(&self) -> DashboardTotals {
        let inventory_value = self
            .products
            .iter()
            .map(|p| p.purchase_price.multiply_quantity(p.quantity))
            .sum();
        let low_stock_count = self
            .products
            .iter()
            .filter(|p| p.stock_status() != StockStatus::InStock)
            .count();
        let total_revenue = self.sales.iter().map(|s| s.total).sum();

        DashboardTotals {
            total_products: self.products.len(),
            inventory_value,
            low_stock_count,
            total_customers: self.customers.len(),
            total_sales: self.sales.len(),
            total_revenue,
            pending_orders: self
                .orders
                .iter()
                .filter(|o| o.status == pawshop_core::OrderStatus::Pending)
                .count(),
        }
    }
}

/// Headline dashboard numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    pub total_products: usize,
    /// Stock on hand at purchase cost.
    pub inventory_value: Money,
    /// Products out of stock or at/below their reorder level.
    pub low_stock_count: usize,
    pub total_customers: usize,
    pub total_sales: usize,
    pub total_revenue: Money,
    pub pending_orders: usize,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use pawshop_core::{Money, NewProduct};

    /// Opens a shop over a fresh temp directory. The guard must outlive
    /// the shop.
    pub fn temp_shop() -> (tempfile::TempDir, Shop) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let shop = Shop::open(config).unwrap();
        (dir, shop)
    }

    pub fn new_product(name: &str, barcode: &str, price_cents: i64, quantity: i64) -> NewProduct {
        NewProduct {
            barcode: barcode.to_string(),
            sku: format!("SKU-{barcode}"),
            name: name.to_string(),
            category: "food".to_string(),
            brand: "PawBrand".to_string(),
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
            unit: "piece".to_string(),
            discount_percent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_open_empty_directory_starts_clean() {
        let (_dir, shop) = temp_shop();
        assert!(shop.products().is_empty());
        assert!(shop.sales().is_empty());
        assert!(shop.storefront_cart().is_empty());
    }

    #[test]
    fn test_reopen_preserves_collections() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };

        {
            let mut shop = Shop::open(config.clone()).unwrap();
            shop.add_product(new_product("Dog Food", "BC001", 2000, 40))
                .unwrap();
        }

        let reopened = Shop::open(config).unwrap();
        assert_eq!(reopened.products().len(), 1);
        assert_eq!(reopened.products()[0].name, "Dog Food");
    }

    #[test]
    fn test_counters_survive_reopen_and_deletion() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };

        {
            let mut shop = Shop::open(config.clone()).unwrap();
            shop.add_customer(pawshop_core::NewCustomer {
                name: "Jane".to_string(),
                phone: "555 010 0100".to_string(),
                email: String::new(),
                address: String::new(),
                pet_name: String::new(),
                pet_type: String::new(),
                pet_breed: String::new(),
            })
            .unwrap();
            shop.delete_customer("CUST001").unwrap();
        }

        // The deleted customer's id is not reused after a restart.
        let mut reopened = Shop::open(config).unwrap();
        let id = reopened
            .add_customer(pawshop_core::NewCustomer {
                name: "Omar".to_string(),
                phone: "555 010 0101".to_string(),
                email: String::new(),
                address: String::new(),
                pet_name: String::new(),
                pet_type: String::new(),
                pet_breed: String::new(),
            })
            .unwrap()
            .id
            .clone();
        assert_eq!(id, "CUST002");
    }

    #[test]
    fn test_dashboard_totals() {
        let (_dir, mut shop) = temp_shop();
        shop.add_product(new_product("Dog Food", "BC001", 2000, 40))
            .unwrap();
        shop.add_product(new_product("Cat Litter", "BC002", 1000, 0))
            .unwrap();

        let dash = shop.dashboard();
        assert_eq!(dash.total_products, 2);
        assert_eq!(dash.low_stock_count, 1);
        // 40 x $10.00 purchase cost.
        assert_eq!(dash.inventory_value.cents(), 40000);
    }
}
