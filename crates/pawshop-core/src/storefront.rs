//! # Storefront Cart
//!
//! Cart math for the online storefront channel. Unlike the register
//! session, storefront lines are keyed by `(product_id, variant)` so the
//! same product in two sizes occupies two lines, and quantities are not
//! checked against the shelf (fulfilment reconciles stock later).
//!
//! Pricing honors per-product promotional discounts: a line is priced at
//! the product's discounted unit price as of the moment it was added.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{OrderItem, Product};

/// One storefront cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub image: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// Variant label ("Small", "Large", ...). Empty when the product has
    /// no variants.
    #[serde(default)]
    pub variant: String,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    pub fn to_order_item(&self) -> OrderItem {
        OrderItem {
            product_id: self.product_id,
            name: self.name.clone(),
            image: self.image.clone(),
            unit_price: self.unit_price,
            quantity: self.quantity,
            variant: (!self.variant.is_empty()).then(|| self.variant.clone()),
        }
    }
}

/// The storefront shopping cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontCart {
    pub lines: Vec<CartLine>,
}

impl StorefrontCart {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_mut(&mut self, product_id: i64, variant: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product_id == product_id && l.variant == variant)
    }

    /// Adds a quantity of a product variant, merging into an existing
    /// line when the `(product, variant)` pair is already in the cart.
    pub fn add(&mut self, product: &Product, variant: &str, quantity: i64) {
        if quantity <= 0 {
            return;
        }

        if let Some(line) = self.find_mut(product.id, variant) {
            line.quantity += quantity;
            return;
        }

        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.discounted_unit_price(),
            quantity,
            variant: variant.to_string(),
        });
    }

    /// Sets a line's quantity; zero or below removes the line.
    pub fn set_quantity(&mut self, product_id: i64, variant: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove(product_id, variant);
        }

        let line = self
            .find_mut(product_id, variant)
            .ok_or(CoreError::NotInCart(product_id))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, product_id: i64, variant: &str) -> CoreResult<()> {
        let before = self.lines.len();
        self.lines
            .retain(|l| !(l.product_id == product_id && l.variant == variant));

        if self.lines.len() == before {
            Err(CoreError::NotInCart(product_id))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total unit count across all lines (the cart badge number).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    pub fn order_items(&self) -> Vec<OrderItem> {
        self.lines.iter().map(CartLine::to_order_item).collect()
    }
}
