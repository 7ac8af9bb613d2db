//! # Sales Reports
//!
//! Pure aggregation over recorded sale transactions: daily and monthly
//! summaries, product and payment-method breakdowns, and CSV export.
//!
//! Conventions carried over from the floor reports:
//! - "Items" counts distinct sale lines, not unit quantities.
//! - Average order value is integer-cents division (`revenue / orders`),
//!   so $400.00 over 3 orders reads $133.33.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{PaymentMethod, SaleTransaction};

// =============================================================================
// Report Types
// =============================================================================

/// Summary over a set of sale transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub transactions: Vec<SaleTransaction>,
    pub total_sales: Money,
    pub total_orders: usize,
    /// Distinct sale lines across the period, not unit quantities.
    pub total_items: usize,
    pub avg_order_value: Money,
}

impl SalesReport {
    fn from_transactions(transactions: Vec<SaleTransaction>) -> Self {
        let total_sales: Money = transactions.iter().map(|s| s.total).sum();
        let total_orders = transactions.len();
        let total_items = transactions.iter().map(|s| s.items.len()).sum();
        let avg_order_value = if total_orders == 0 {
            Money::zero()
        } else {
            Money::from_cents(total_sales.cents() / total_orders as i64)
        };

        SalesReport {
            transactions,
            total_sales,
            total_orders,
            total_items,
            avg_order_value,
        }
    }
}

/// Revenue and unit totals for one product across a report period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    pub revenue: Money,
}

/// Orders and takings for one payment method.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBucket {
    pub orders: usize,
    pub amount: Money,
}

/// One row of a monthly report's per-day breakdown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotals {
    pub orders: usize,
    pub revenue: Money,
}

// =============================================================================
// Report Builders
// =============================================================================

/// All sales completed on the given calendar date (exact match).
pub fn daily_report(sales: &[SaleTransaction], date: NaiveDate) -> SalesReport {
    let matched = sales.iter().filter(|s| s.date == date).cloned().collect();
    SalesReport::from_transactions(matched)
}

/// All sales completed in the given calendar month.
pub fn monthly_report(sales: &[SaleTransaction], year: i32, month: u32) -> SalesReport {
    let matched = sales
        .iter()
        .filter(|s| s.date.year() == year && s.date.month() == month)
        .cloned()
        .collect();
    SalesReport::from_transactions(matched)
}

/// Per-day order counts and revenue for a monthly report, keyed by date
/// so iteration is chronological.
pub fn daily_breakdown(report: &SalesReport) -> BTreeMap<NaiveDate, DayTotals> {
    let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    for sale in &report.transactions {
        let day = days.entry(sale.date).or_insert(DayTotals {
            orders: 0,
            revenue: Money::zero(),
        });
        day.orders += 1;
        day.revenue += sale.total;
    }
    days
}

/// Top products by revenue across a report period, best seller first.
pub fn top_products(report: &SalesReport, limit: usize) -> Vec<ProductSales> {
    let mut by_product: BTreeMap<i64, ProductSales> = BTreeMap::new();
    for sale in &report.transactions {
        for item in &sale.items {
            let entry = by_product.entry(item.product_id).or_insert(ProductSales {
                product_id: item.product_id,
                name: item.product_name.clone(),
                quantity: 0,
                revenue: Money::zero(),
            });
            entry.quantity += item.quantity;
            entry.revenue += item.total;
        }
    }

    let mut ranked: Vec<ProductSales> = by_product.into_values().collect();
    ranked.sort_by(|a, b| b.revenue.cents().cmp(&a.revenue.cents()));
    ranked.truncate(limit);
    ranked
}

/// Orders and takings grouped by payment method.
pub fn payment_breakdown(report: &SalesReport) -> BTreeMap<PaymentMethod, PaymentBucket> {
    let mut buckets: BTreeMap<PaymentMethod, PaymentBucket> = BTreeMap::new();
    for sale in &report.transactions {
        let bucket = buckets.entry(sale.payment_method).or_default();
        bucket.orders += 1;
        bucket.amount += sale.total;
    }
    buckets
}

// =============================================================================
// CSV Export
// =============================================================================

/// Plain decimal for spreadsheets, no currency symbol.
fn csv_amount(amount: Money) -> String {
    format!("{}.{:02}", amount.dollars(), amount.cents_part())
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders a daily report as CSV, one row per transaction.
pub fn daily_report_csv(report: &SalesReport) -> String {
    let mut out = String::from(
        "Sale ID,Time,Customer,Items,Subtotal,Discount,Tax,Total,Payment Method\n",
    );
    for sale in &report.transactions {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            csv_field(&sale.id),
            csv_field(&sale.time),
            csv_field(&sale.customer_name),
            sale.items.len(),
            csv_amount(sale.subtotal),
            csv_amount(sale.discount),
            csv_amount(sale.tax),
            csv_amount(sale.total),
            sale.payment_method,
        );
    }
    out
}

/// Renders a monthly report as CSV, one row per day with sales.
pub fn monthly_report_csv(report: &SalesReport) -> String {
    let mut out = String::from("Date,Orders,Revenue\n");
    for (date, totals) in daily_breakdown(report) {
        let _ = writeln!(
            out,
            "{},{},{}",
            date,
            totals.orders,
            csv_amount(totals.revenue)
        );
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
