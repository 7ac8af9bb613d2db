//! # Sales Operations
//!
//! Completing a register sale is the single moment state changes:
//! stock decrements, the sale is recorded, and the customer ledger rolls
//! up, all in one pass. Every guard fires before the first mutation, so
//! a rejected checkout leaves the shop untouched.

use chrono::{Datelike, Local, NaiveDate};
use tracing::info;

use pawshop_core::reports::{self, SalesReport};
use pawshop_core::{
    CoreError, PaymentMethod, RegisterSession, SaleTransaction, WALK_IN_CUSTOMER,
};

use crate::error::AppResult;
use crate::shop::Shop;

impl Shop {
    /// A fresh register session taxing at the store's configured rate.
    pub fn new_register_session(&self) -> RegisterSession {
        RegisterSession::with_tax_rate(self.config.tax_rate_bps)
    }

    /// Completes the register session as a sale.
    ///
    /// ## Order of operations
    /// 1. Session guards (empty cart, insufficient cash)
    /// 2. Stock re-check of every line against the current catalog
    /// 3. Stock decrement, sale record, ledger roll-up, persistence
    /// 4. Session reset
    pub fn complete_sale(&mut self, session: &mut RegisterSession) -> AppResult<SaleTransaction> {
        let totals = session.checkout()?;

        for line in &session.lines {
            let product = self.product(line.product_id)?;
            if line.quantity > product.quantity {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.quantity,
                    requested: line.quantity,
                }
                .into());
            }
        }

        let now = Local::now();
        let is_cash = session.payment_method() == PaymentMethod::Cash;
        let sale = SaleTransaction {
            id: self.counters.next_sale(),
            customer_id: session.customer.as_ref().map(|c| c.id.clone()),
            customer_name: session
                .customer
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| WALK_IN_CUSTOMER.to_string()),
            date: now.date_naive(),
            time: now.format("%I:%M %p").to_string(),
            items: session.sale_items(),
            subtotal: totals.subtotal,
            discount: totals.discount_amount,
            tax: totals.tax_amount,
            total: totals.total,
            payment_method: session.payment_method(),
            cash_received: is_cash.then(|| session.cash_received()),
            change: is_cash.then_some(totals.change),
            status: "Completed".to_string(),
        };

        for line in &session.lines {
            self.adjust_stock(line.product_id, -line.quantity)?;
        }
        self.roll_up_sale(&sale)?;

        info!(id = %sale.id, total = %sale.total, method = %sale.payment_method, "sale completed");
        self.sales.push(sale.clone());
        self.save_sales()?;
        self.save_counters()?;
        session.clear();
        Ok(sale)
    }

    /// Printable receipt for a recorded sale.
    pub fn receipt(&self, sale: &SaleTransaction) -> String {
        pawshop_core::receipt::render_receipt(sale, &self.config.receipt_options())
    }

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    pub fn daily_report(&self, date: NaiveDate) -> SalesReport {
        reports::daily_report(&self.sales, date)
    }

    pub fn monthly_report(&self, year: i32, month: u32) -> SalesReport {
        reports::monthly_report(&self.sales, year, month)
    }

    pub fn today_report(&self) -> SalesReport {
        self.daily_report(Local::now().date_naive())
    }

    pub fn this_month_report(&self) -> SalesReport {
        let now = Local::now().date_naive();
        self.monthly_report(now.year(), now.month())
    }
}
