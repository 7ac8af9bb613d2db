//! # Customer Ledger
//!
//! Customer CRUD plus the purchase roll-up: when a sale completes with a
//! customer attached, their lifetime spend, last-visit date, and history
//! all move together. The roll-up is idempotent per sale id, so a sale
//! can never be counted twice against the same customer.

use chrono::Local;
use tracing::info;

use pawshop_core::validation::{validate_email, validate_phone, validate_required};
use pawshop_core::{CoreError, Customer, CustomerPatch, HistoryEntry, NewCustomer, SaleTransaction};

use crate::error::AppResult;
use crate::shop::Shop;

impl Shop {
    pub fn add_customer(&mut self, new: NewCustomer) -> AppResult<&Customer> {
        validate_required("name", &new.name)?;
        if !new.email.is_empty() {
            validate_email(&new.email)?;
        }
        if !new.phone.is_empty() {
            validate_phone(&new.phone)?;
        }

        let id = self.counters.next_customer();
        let today = Local::now().date_naive();
        info!(%id, name = %new.name, "customer added");
        self.customers.push(new.into_customer(id, today));
        self.save_customers()?;
        self.save_counters()?;

        let index = self.customers.len() - 1;
        Ok(&self.customers[index])
    }

    pub fn update_customer(&mut self, id: &str, patch: CustomerPatch) -> AppResult<&Customer> {
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
            .customers
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))?;
        patch.apply(&mut self.customers[index]);
        self.save_customers()?;
        Ok(&self.customers[index])
    }

    /// Deletes a customer and their history. Past sales keep the
    /// denormalized customer name.
    pub fn delete_customer(&mut self, id: &str) -> AppResult<Customer> {
        let index = self
            .customers
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))?;
        let removed = self.customers.remove(index);
        self.customer_history.remove(id);

        self.save_customers()?;
        self.save_customer_history()?;
        info!(%id, name = %removed.name, "customer deleted");
        Ok(removed)
    }

    pub fn customer(&self, id: &str) -> AppResult<&Customer> {
        self.customers
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()).into())
    }

    /// Case-insensitive substring search over name and id; phone numbers
    /// match as a literal substring (no digit normalization).
    pub fn search_customers(&self, query: &str) -> Vec<&Customer> {
        let needle = query.trim().to_lowercase();
        let literal = query.trim();
        self.customers
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.id.to_lowercase().contains(&needle)
                    || c.phone.contains(literal)
            })
            .collect()
    }

    /// Purchase history for a customer, oldest first. Empty for unknown
    /// ids.
    pub fn customer_purchase_history(&self, id: &str) -> &[HistoryEntry] {
        self.customer_history
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Rolls a completed sale into the customer's ledger. A sale id
    /// already present in the history is skipped, keeping the roll-up
    /// idempotent.
    ///
    /// Sales for deleted or walk-in customers are quietly ignored.
    pub(crate) fn roll_up_sale(&mut self, sale: &SaleTransaction) -> AppResult<()> {
        let Some(customer_id) = &sale.customer_id else {
            return Ok(());
        };
        let Some(customer) = self.customers.iter_mut().find(|c| &c.id == customer_id) else {
            return Ok(());
        };

        let history = self.customer_history.entry(customer_id.clone()).or_default();
        if history.iter().any(|entry| entry.sale_id == sale.id) {
            return Ok(());
        }

        history.push(HistoryEntry {
            sale_id: sale.id.clone(),
            date: sale.date,
            amount: sale.total,
            items: sale.items.len(),
        });
        customer.total_purchases += sale.total;
        customer.last_visit = sale.date;

        self.save_customers()?;
        self.save_customer_history()?;
        Ok(())
    }
}
