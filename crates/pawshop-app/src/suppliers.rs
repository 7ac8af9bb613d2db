//! # Supplier Operations
//!
//! Supplier CRUD. Ids come from the persisted `SUPnnn` sequence, so a
//! deleted supplier's id is never reused. Products referencing a deleted
//! supplier keep their denormalized name; the dangling reference is
//! cleared.

use tracing::info;

use pawshop_core::validation::{validate_email, validate_phone, validate_required};
use pawshop_core::{CoreError, NewSupplier, Supplier, SupplierPatch};

use crate::error::AppResult;
use crate::shop::Shop;

impl Shop {
    pub fn add_supplier(&mut self, new: NewSupplier) -> AppResult<&Supplier> {
        validate_required("name", &new.name)?;
        if !new.email.is_empty() {
            validate_email(&new.email)?;
        }
        if !new.phone.is_empty() {
            validate_phone(&new.phone)?;
        }

        let id = self.counters.next_supplier();
        info!(%id, name = %new.name, "supplier added");
        self.suppliers.push(new.into_supplier(id));
        self.save_suppliers()?;
        self.save_counters()?;

        let index = self.suppliers.len() - 1;
        Ok(&self.suppliers[index])
    }

    pub fn update_supplier(&mut self, id: &str, patch: SupplierPatch) -> AppResult<&Supplier> {
        if let Some(email) = &patch.email {
            if !email.is_empty() {
                validate_email(email)?;
            }
        }
        if let Some(phone) = &patch.phone {
            if !phone.is_empty() {
                validate_phone(phone)?;
            }
        }

        let index = self
            .suppliers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::SupplierNotFound(id.to_string()))?;
        patch.apply(&mut self.suppliers[index]);

        // Keep the denormalized name on products in sync.
        let supplier = self.suppliers[index].clone();
        for product in self
            .products
            .iter_mut()
            .filter(|p| p.supplier_id.as_deref() == Some(id))
        {
            product.supplier_name = supplier.name.clone();
        }

        self.save_suppliers()?;
        self.save_products()?;
        Ok(&self.suppliers[index])
    }

    /// Deletes a supplier. Products that referenced it drop the id but
    /// keep the name for display.
    pub fn delete_supplier(&mut self, id: &str) -> AppResult<Supplier> {
        let index = self
            .suppliers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::SupplierNotFound(id.to_string()))?;
        let removed = self.suppliers.remove(index);

        for product in self
            .products
            .iter_mut()
            .filter(|p| p.supplier_id.as_deref() == Some(id))
        {
            product.supplier_id = None;
        }

        self.save_suppliers()?;
        self.save_products()?;
        info!(%id, name = %removed.name, "supplier deleted");
        Ok(removed)
    }

    pub fn supplier(&self, id: &str) -> AppResult<&Supplier> {
        self.suppliers
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::SupplierNotFound(id.to_string()).into())
    }

    /// Case-insensitive substring search over name, contact, and
    /// category.
    pub fn search_suppliers(&self, query: &str) -> Vec<&Supplier> {
        let needle = query.trim().to_lowercase();
        self.suppliers
            .iter()
            .filter(|s| {
                needle.is_empty()
                    || s.name.to_lowercase().contains(&needle)
                    || s.contact.to_lowercase().contains(&needle)
                    || s.category.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::shop::test_support::*;
    use pawshop_core::{NewSupplier, SupplierPatch, SupplierStatus};

    fn new_supplier(name: &str) -> NewSupplier {
        NewSupplier {
            name: name.to_string(),
            contact: "Alex Doe".to_string(),
            phone: "+1 555 010 0200".to_string(),
            email: "orders@example.com".to_string(),
            address: "12 Harbor Rd".to_string(),
            category: "food".to_string(),
            status: SupplierStatus::Active,
            payment_terms: "Net 30".to_string(),
        }
    }

    #[test]
    fn test_ids_survive_deletion() {
        let (_dir, mut shop) = temp_shop();
        shop.add_supplier(new_supplier("Pet Supplies Co")).unwrap();
        shop.add_supplier(new_supplier("Aqua World")).unwrap();
        shop.delete_supplier("SUP002").unwrap();

        let id = shop.add_supplier(new_supplier("Feather Farm")).unwrap().id.clone();
        assert_eq!(id, "SUP003");
    }

    #[test]
    fn test_rename_propagates_to_products() {
        let (_dir, mut shop) = temp_shop();
        shop.add_supplier(new_supplier("Pet Supplies Co")).unwrap();
        let mut p = new_product("Dog Food", "BC001", 2000, 40);
        p.supplier_id = Some("SUP001".to_string());
        shop.add_product(p).unwrap();

        let patch = SupplierPatch {
            name: Some("Pet Supplies Intl".to_string()),
            ..SupplierPatch::default()
        };
        shop.update_supplier("SUP001", patch).unwrap();
        assert_eq!(shop.products()[0].supplier_name, "Pet Supplies Intl");
    }

    #[test]
    fn test_delete_clears_reference_keeps_name() {
        let (_dir, mut shop) = temp_shop();
        shop.add_supplier(new_supplier("Pet Supplies Co")).unwrap();
        let mut p = new_product("Dog Food", "BC001", 2000, 40);
        p.supplier_id = Some("SUP001".to_string());
        shop.add_product(p).unwrap();

        shop.delete_supplier("SUP001").unwrap();
        assert!(shop.products()[0].supplier_id.is_none());
        assert_eq!(shop.products()[0].supplier_name, "Pet Supplies Co");
    }

    #[test]
    fn test_invalid_email_rejected() {
        let (_dir, mut shop) = temp_shop();
        let mut bad = new_supplier("Bad Mail");
        bad.email = "not-an-email".to_string();
        assert!(shop.add_supplier(bad).is_err());
    }
}
