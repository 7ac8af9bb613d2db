//! # Receipt Rendering
//!
//! Plain-text receipt layout for thermal printers. Fixed character
//! width, centered header, right-aligned amounts.

use std::fmt::Write as _;

use crate::types::SaleTransaction;

/// Receipt layout settings.
#[derive(Debug, Clone)]
pub struct ReceiptOptions {
    pub store_name: String,
    /// Extra header lines under the store name (address, phone).
    pub header_lines: Vec<String>,
    /// Footer message above the cut line.
    pub footer: String,
    /// Paper width in characters. 32 suits 58mm thermal paper.
    pub width: usize,
}

impl Default for ReceiptOptions {
    fn default() -> Self {
        ReceiptOptions {
            store_name: "Pawshop".to_string(),
            header_lines: Vec::new(),
            footer: "Thank you for shopping with us!".to_string(),
            width: 32,
        }
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = (width - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn two_column(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = width.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

/// Renders a completed sale as a printable receipt.
pub fn render_receipt(sale: &SaleTransaction, options: &ReceiptOptions) -> String {
    let w = options.width;
    let rule = "-".repeat(w);
    let mut out = String::new();

    let _ = writeln!(out, "{}", center(&options.store_name, w));
    for line in &options.header_lines {
        let _ = writeln!(out, "{}", center(line, w));
    }
    let _ = writeln!(out, "{rule}");

    let _ = writeln!(out, "Receipt: {}", sale.id);
    let _ = writeln!(out, "Date: {}  {}", sale.date.format("%d/%m/%Y"), sale.time);
    let _ = writeln!(out, "Customer: {}", sale.customer_name);
    let _ = writeln!(out, "{rule}");

    for item in &sale.items {
        let _ = writeln!(out, "{}", item.product_name);
        let qty_price = format!("  {} x {}", item.quantity, item.sale_price);
        let _ = writeln!(out, "{}", two_column(&qty_price, &item.total.to_string(), w));
    }
    let _ = writeln!(out, "{rule}");

    let _ = writeln!(out, "{}", two_column("Subtotal", &sale.subtotal.to_string(), w));
    if !sale.discount.is_zero() {
        let discount = format!("-{}", sale.discount);
        let _ = writeln!(out, "{}", two_column("Discount", &discount, w));
    }
    let _ = writeln!(out, "{}", two_column("Tax", &sale.tax.to_string(), w));
    let _ = writeln!(out, "{}", two_column("TOTAL", &sale.total.to_string(), w));
    let _ = writeln!(out, "{rule}");

    let _ = writeln!(
        out,
        "{}",
        two_column("Paid", &sale.payment_method.to_string(), w)
    );
    if let Some(cash) = sale.cash_received {
        let _ = writeln!(out, "{}", two_column("Cash", &cash.to_string(), w));
    }
    if let Some(change) = sale.change {
        if !change.is_zero() {
            let _ = writeln!(out, "{}", two_column("Change", &change.to_string(), w));
        }
    }
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{}", center(&options.footer, w));

    out
}
