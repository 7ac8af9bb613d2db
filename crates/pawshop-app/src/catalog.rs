//! # Catalog Operations
//!
//! Product CRUD, lookup, and the single stock-adjustment chokepoint.
//! Stock never goes negative: every decrement routes through
//! [`Shop::adjust_stock`], which clamps at zero.

use tracing::info;

use pawshop_core::validation::{
    validate_barcode, validate_price, validate_product_name, validate_quantity,
};
use pawshop_core::{CoreError, NewProduct, Product, ProductPatch, StockStatus};

use crate::error::AppResult;
use crate::shop::Shop;

impl Shop {
    /// Adds a product. The id is `max(existing) + 1`, or 1 for an empty
    /// catalog; a gap left by a deletion can be refilled.
    pub fn add_product(&mut self, new: NewProduct) -> AppResult<&Product> {
        validate_product_name(&new.name)?;
        validate_barcode(&new.barcode)?;
        validate_price("purchasePrice", new.purchase_price)?;
        validate_price("salePrice", new.sale_price)?;
        validate_quantity("quantity", new.quantity)?;

        let id = self.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let mut product = new.into_product(id);

        // Resolve the denormalized supplier name from the reference.
        if let Some(supplier_id) = &product.supplier_id {
            if let Some(supplier) = self.suppliers.iter().find(|s| &s.id == supplier_id) {
                product.supplier_name = supplier.name.clone();
            }
        }

        info!(id, name = %product.name, "product added");
        self.products.push(product);
        self.save_products()?;

        let index = self.products.len() - 1;
        Ok(&self.products[index])
    }

    /// Applies a partial update. Absent patch fields leave the product
    /// untouched; a patched quantity clamps at zero.
    pub fn update_product(&mut self, id: i64, patch: ProductPatch) -> AppResult<&Product> {
        if let Some(name) = &patch.name {
            validate_product_name(name)?;
        }
        if let Some(barcode) = &patch.barcode {
            validate_barcode(barcode)?;
        }
        if let Some(price) = patch.sale_price {
            validate_price("salePrice", price)?;
        }
        if let Some(price) = patch.purchase_price {
            validate_price("purchasePrice", price)?;
        }

        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))?;
        patch.apply(&mut self.products[index]);
        self.save_products()?;

        Ok(&self.products[index])
    }

    /// Deletes a product and returns the removed row. Historical sales
    /// and purchases keep their own frozen copies.
    pub fn delete_product(&mut self, id: i64) -> AppResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))?;
        let removed = self.products.remove(index);
        self.save_products()?;
        info!(id, name = %removed.name, "product deleted");
        Ok(removed)
    }

    pub fn product(&self, id: i64) -> AppResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id).into())
    }

    /// Barcode lookup for the register scanner. The query is uppercased
    /// before comparison; stored barcodes are matched as-is.
    pub fn find_by_barcode(&self, barcode: &str) -> AppResult<&Product> {
        let needle = barcode.trim().to_uppercase();
        self.products
            .iter()
            .find(|p| p.barcode == needle)
            .ok_or_else(|| CoreError::BarcodeNotFound(barcode.to_string()).into())
    }

    /// Case-insensitive substring search over name, barcode, SKU, and
    /// category. An empty query matches everything.
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.barcode.to_lowercase().contains(&needle)
                    || p.sku.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Adjusts stock by a signed delta, clamping at zero, and returns
    /// the new quantity. This is the only place stock levels change.
    pub fn adjust_stock(&mut self, id: i64, delta: i64) -> AppResult<i64> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))?;

        product.quantity = (product.quantity + delta).max(0);
        let new_quantity = product.quantity;
        self.save_products()?;
        Ok(new_quantity)
    }

    /// Products that are out of stock or at/below their reorder level.
    pub fn low_stock_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.stock_status() != StockStatus::InStock)
            .collect()
    }
}
