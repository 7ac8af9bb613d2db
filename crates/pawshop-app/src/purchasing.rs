//! # Purchasing (Stock-In)
//!
//! Receiving a supplier invoice is the only positive stock trigger.
//! Each received line bumps the product's quantity, cost, and
//! last-purchase fields in one pass; the invoice itself is recorded
//! immutably with totals computed at receipt time.

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use pawshop_core::{
    Money, PaymentMethod, PaymentStatus, PurchaseItem, PurchaseRecord, TaxRate,
};

use crate::error::AppResult;
use crate::shop::Shop;

/// One line of an incoming supplier invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDraftItem {
    pub product_id: i64,
    pub quantity: i64,
    /// Cost per unit on this invoice.
    pub unit_cost: Money,
}

/// An incoming supplier invoice, before it is applied and recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDraft {
    pub supplier_id: String,
    pub invoice_number: String,
    pub items: Vec<PurchaseDraftItem>,
    /// Tax rate on this invoice (varies by supplier).
    pub tax_rate: TaxRate,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}

impl Shop {
    /// Receives a supplier invoice: validates every reference, then
    /// applies stock and records the purchase. Validation happens
    /// up-front so a bad line leaves nothing half-applied.
    pub fn receive_stock(&mut self, draft: PurchaseDraft) -> AppResult<PurchaseRecord> {
        let supplier_name = self.supplier(&draft.supplier_id)?.name.clone();
        for item in &draft.items {
            self.product(item.product_id)?;
        }

        let today = Local::now().date_naive();
        let mut lines = Vec::with_capacity(draft.items.len());
        let mut subtotal = Money::zero();

        for item in &draft.items {
            let quantity = item.quantity.max(0);
            let line_total = item.unit_cost.multiply_quantity(quantity);
            subtotal += line_total;

            // Stock moves only through the adjust_stock chokepoint.
            self.adjust_stock(item.product_id, quantity)?;

            if let Some(product) = self.products.iter_mut().find(|p| p.id == item.product_id) {
                product.purchase_price = item.unit_cost;
                product.last_purchase_date = Some(today);
                product.last_purchase_quantity = Some(quantity);

                lines.push(PurchaseItem {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    quantity,
                    purchase_price: item.unit_cost,
                    total: line_total,
                });
            }
        }

        let tax = subtotal.calculate_tax(draft.tax_rate);
        let record = PurchaseRecord {
            id: self.counters.next_purchase(),
            supplier_id: draft.supplier_id,
            supplier_name,
            date: today,
            invoice_number: draft.invoice_number,
            items: lines,
            subtotal,
            tax,
            total: subtotal + tax,
            payment_status: draft.payment_status,
            payment_method: draft.payment_method,
        };

        info!(id = %record.id, supplier = %record.supplier_name, total = %record.total, "stock received");
        self.purchases.push(record.clone());
        self.save_products()?;
        self.save_purchases()?;
        self.save_counters()?;
        Ok(record)
    }

    pub fn purchase(&self, id: &str) -> AppResult<&PurchaseRecord> {
        self.purchases
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| crate::error::AppError::not_found("Purchase", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::test_support::*;
    use pawshop_core::{NewSupplier, SupplierStatus};

    fn supplier() -> NewSupplier {
        NewSupplier {
            name: "Pet Supplies Co".to_string(),
            contact: "Alex Doe".to_string(),
            phone: "555 010 0200".to_string(),
            email: String::new(),
            address: String::new(),
            category: "food".to_string(),
            status: SupplierStatus::Active,
            payment_terms: "Net 30".to_string(),
        }
    }

    fn draft(items: Vec<PurchaseDraftItem>) -> PurchaseDraft {
        PurchaseDraft {
            supplier_id: "SUP001".to_string(),
            invoice_number: "INV-7741".to_string(),
            items,
            tax_rate: TaxRate::from_bps(500), // 5% on this invoice
            payment_method: PaymentMethod::Card,
            payment_status: PaymentStatus::Paid,
        }
    }

    #[test]
    fn test_receive_stock_bumps_quantity_and_cost() {
        let (_dir, mut shop) = temp_shop();
        shop.add_supplier(supplier()).unwrap();
        shop.add_product(new_product("Dog Food", "BC001", 2000, 5)).unwrap();

        let record = shop
            .receive_stock(draft(vec![PurchaseDraftItem {
                product_id: 1,
                quantity: 30,
                unit_cost: Money::from_cents(900),
            }]))
            .unwrap();

        assert_eq!(record.id, "PUR001");
        assert_eq!(record.subtotal.cents(), 27000);
        assert_eq!(record.tax.cents(), 1350);
        assert_eq!(record.total.cents(), 28350);

        let product = shop.product(1).unwrap();
        assert_eq!(product.quantity, 35);
        assert_eq!(product.purchase_price.cents(), 900);
        assert_eq!(product.last_purchase_quantity, Some(30));
    }

    #[test]
    fn test_negative_line_quantity_adds_nothing() {
        let (_dir, mut shop) = temp_shop();
        shop.add_supplier(supplier()).unwrap();
        shop.add_product(new_product("Dog Food", "BC001", 2000, 5)).unwrap();

        let record = shop
            .receive_stock(draft(vec![PurchaseDraftItem {
                product_id: 1,
                quantity: -10,
                unit_cost: Money::from_cents(900),
            }]))
            .unwrap();

        // Treated as a zero line, and the shelf count never dips.
        assert_eq!(record.subtotal.cents(), 0);
        assert_eq!(shop.product(1).unwrap().quantity, 5);
        assert_eq!(shop.product(1).unwrap().last_purchase_quantity, Some(0));
    }

    #[test]
    fn test_unknown_product_rejects_whole_invoice() {
        let (_dir, mut shop) = temp_shop();
        shop.add_supplier(supplier()).unwrap();
        shop.add_product(new_product("Dog Food", "BC001", 2000, 5)).unwrap();

        let err = shop
            .receive_stock(draft(vec![
                PurchaseDraftItem {
                    product_id: 1,
                    quantity: 10,
                    unit_cost: Money::from_cents(900),
                },
                PurchaseDraftItem {
                    product_id: 99,
                    quantity: 10,
                    unit_cost: Money::from_cents(900),
                },
            ]))
            .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
        // Nothing was applied.
        assert_eq!(shop.product(1).unwrap().quantity, 5);
        assert!(shop.purchases().is_empty());
    }

    #[test]
    fn test_unknown_supplier_rejected() {
        let (_dir, mut shop) = temp_shop();
        shop.add_product(new_product("Dog Food", "BC001", 2000, 5)).unwrap();

        assert!(shop.receive_stock(draft(vec![])).is_err());
    }
}
