//! # Sequence Counters
//!
//! Persisted id sequences for suppliers, customers, purchases, and
//! sales. Ids are never derived from collection length: deleting a row
//! must not let a later insert reuse its id.

use serde::{Deserialize, Serialize};

/// Monotonic counters, one per prefixed id family. Stored in the
/// `counters` slot; each holds the last value handed out.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceCounters {
    #[serde(default)]
    supplier: u64,
    #[serde(default)]
    customer: u64,
    #[serde(default)]
    purchase: u64,
    #[serde(default)]
    sale: u64,
}

impl SequenceCounters {
    /// Next supplier id, `SUP001` style.
    pub fn next_supplier(&mut self) -> String {
        self.supplier += 1;
        format!("SUP{:03}", self.supplier)
    }

    /// Next customer id, `CUST001` style.
    pub fn next_customer(&mut self) -> String {
        self.customer += 1;
        format!("CUST{:03}", self.customer)
    }

    /// Next purchase id, `PUR001` style.
    pub fn next_purchase(&mut self) -> String {
        self.purchase += 1;
        format!("PUR{:03}", self.purchase)
    }

    /// Next sale id, `SALE001` style.
    pub fn next_sale(&mut self) -> String {
        self.sale += 1;
        format!("SALE{:03}", self.sale)
    }
}
