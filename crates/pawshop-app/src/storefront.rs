//! # Storefront Operations
//!
//! The online channel: persistent cart, checkout into an order, and the
//! validated fulfilment flow. Storefront orders never touch stock; the
//! register and storefront are independent sales channels.

use chrono::{Local, Utc};
use tracing::info;

use pawshop_core::validation::{validate_email, validate_phone, validate_required};
use pawshop_core::{CoreError, Order, OrderDetails, OrderStatus};

use crate::error::AppResult;
use crate::shop::Shop;

impl Shop {
    /// Adds a product variant to the storefront cart. The line is priced
    /// at the product's current promotional price.
    pub fn add_to_storefront_cart(
        &mut self,
        product_id: i64,
        variant: &str,
        quantity: i64,
    ) -> AppResult<()> {
        let product = self.product(product_id)?.clone();
        self.storefront_cart.add(&product, variant, quantity);
        self.save_cart()
    }

    pub fn set_storefront_quantity(
        &mut self,
        product_id: i64,
        variant: &str,
        quantity: i64,
    ) -> AppResult<()> {
        self.storefront_cart.set_quantity(product_id, variant, quantity)?;
        self.save_cart()
    }

    pub fn remove_from_storefront_cart(&mut self, product_id: i64, variant: &str) -> AppResult<()> {
        self.storefront_cart.remove(product_id, variant)?;
        self.save_cart()
    }

    pub fn clear_storefront_cart(&mut self) -> AppResult<()> {
        self.storefront_cart.clear();
        self.save_cart()
    }

    /// Places an order from the storefront cart.
    ///
    /// The id is `ORD-<unix millis>`; orders start Pending and the cart
    /// empties on success.
    pub fn place_order(&mut self, details: OrderDetails) -> AppResult<Order> {
        if self.storefront_cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }
        validate_required("fullName", &details.full_name)?;
        validate_required("address", &details.address)?;
        validate_email(&details.email)?;
        validate_phone(&details.phone)?;

        let order = Order {
            id: format!("ORD-{}", Utc::now().timestamp_millis()),
            items: self.storefront_cart.order_items(),
            details,
            total: self.storefront_cart.total(),
            date: Local::now().date_naive(),
            status: OrderStatus::Pending,
        };

        info!(id = %order.id, total = %order.total, "order placed");
        // Newest first, matching how the fulfilment screen lists them.
        self.orders.insert(0, order.clone());
        self.storefront_cart.clear();
        self.save_orders()?;
        self.save_cart()?;
        Ok(order)
    }

    /// Moves an order along the fulfilment flow. Only
    /// Pending -> Shipped -> Delivered is legal; anything else is
    /// rejected with the offending pair named.
    pub fn update_order_status(&mut self, order_id: &str, next: OrderStatus) -> AppResult<&Order> {
        let index = self
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

        let current = self.orders[index].status;
        if !current.can_transition_to(next) {
            return Err(CoreError::InvalidOrderTransition {
                order_id: order_id.to_string(),
                from: current.to_string(),
                to: next.to_string(),
            }
            .into());
        }

        self.orders[index].status = next;
        self.save_orders()?;
        info!(id = %order_id, status = %next, "order status updated");
        Ok(&self.orders[index])
    }

    pub fn order(&self, id: &str) -> AppResult<&Order> {
        self.orders
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use crate::shop::test_support::*;
    use pawshop_core::{OrderDetails, OrderStatus};

    fn details() -> OrderDetails {
        OrderDetails {
            full_name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555 010 0100 11".to_string(),
            address: "4 Pine St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62704".to_string(),
        }
    }

    #[test]
    fn test_place_order_empties_cart() {
        let (_dir, mut shop) = temp_shop();
        shop.add_product(new_product("Dog Bed", "BC001", 4000, 10)).unwrap();
        shop.add_to_storefront_cart(1, "Large", 2).unwrap();

        let order = shop.place_order(details()).unwrap();
        assert!(order.id.starts_with("ORD-"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total.cents(), 8000);
        assert!(shop.storefront_cart().is_empty());
        assert_eq!(shop.orders().len(), 1);
    }

    #[test]
    fn test_place_order_empty_cart_rejected() {
        let (_dir, mut shop) = temp_shop();
        assert!(shop.place_order(details()).is_err());
    }

    #[test]
    fn test_order_does_not_touch_stock() {
        let (_dir, mut shop) = temp_shop();
        shop.add_product(new_product("Dog Bed", "BC001", 4000, 10)).unwrap();
        shop.add_to_storefront_cart(1, "", 8).unwrap();
        shop.place_order(details()).unwrap();

        assert_eq!(shop.product(1).unwrap().quantity, 10);
    }

    #[test]
    fn test_fulfilment_flow_is_strict() {
        let (_dir, mut shop) = temp_shop();
        shop.add_product(new_product("Dog Bed", "BC001", 4000, 10)).unwrap();
        shop.add_to_storefront_cart(1, "", 1).unwrap();
        let id = shop.place_order(details()).unwrap().id;

        // Pending cannot jump straight to Delivered.
        assert!(shop.update_order_status(&id, OrderStatus::Delivered).is_err());

        shop.update_order_status(&id, OrderStatus::Shipped).unwrap();
        shop.update_order_status(&id, OrderStatus::Delivered).unwrap();

        // Delivered is terminal.
        assert!(shop.update_order_status(&id, OrderStatus::Pending).is_err());
        assert_eq!(shop.order(&id).unwrap().status, OrderStatus::Delivered);
    }

    #[test]
    fn test_invalid_checkout_details_rejected() {
        let (_dir, mut shop) = temp_shop();
        shop.add_product(new_product("Dog Bed", "BC001", 4000, 10)).unwrap();
        shop.add_to_storefront_cart(1, "", 1).unwrap();

        let mut bad = details();
        bad.email = "nope".to_string();
        assert!(shop.place_order(bad).is_err());
        // Cart survives the rejection.
        assert!(!shop.storefront_cart().is_empty());
    }
}
