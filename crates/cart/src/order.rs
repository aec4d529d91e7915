//! Checkout: customer form + cart snapshot → order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use jewelstore_catalog::Catalog;
use jewelstore_core::OrderId;

use crate::cart::{CartLine, CartSnapshot, CartView};

/// Form fields that must be present to place an order.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "phone", "address"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("missing required fields: {}", .0.join(", "))]
    RequiredFieldMissing(Vec<&'static str>),
}

/// Raw checkout form as submitted. Any field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CheckoutForm {
    /// Presence check only: absent or blank fields are missing, formats are
    /// not inspected.
    pub fn validate(self) -> Result<CustomerDetails, CheckoutError> {
        let fields = [self.name, self.email, self.phone, self.address]
            .map(|v| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()));

        let missing = REQUIRED_FIELDS
            .iter()
            .zip(&fields)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect::<Vec<_>>();

        match fields {
            [Some(name), Some(email), Some(phone), Some(address)] => Ok(CustomerDetails {
                name,
                email,
                phone,
                address,
            }),
            _ => Err(CheckoutError::RequiredFieldMissing(missing)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// A submitted order. Not persisted: it is handed back to the caller as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerDetails,
    pub placed_at: DateTime<Utc>,
    /// Cart contents exactly as they were at checkout.
    pub items: CartSnapshot,
    /// Lines priced at current catalog prices; unknown ids are omitted.
    pub lines: Vec<CartLine>,
    pub total: f64,
}

/// Build the order record. No stock or price re-verification happens here.
pub fn submit(
    customer: CustomerDetails,
    cart: CartSnapshot,
    catalog: &Catalog,
    placed_at: DateTime<Utc>,
) -> Order {
    let CartView { lines, total } = CartView::price(cart.items(), catalog);

    Order {
        id: OrderId::new(),
        customer,
        placed_at,
        items: cart,
        lines,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use jewelstore_catalog::demo::demo_catalog;
    use jewelstore_core::ProductId;

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: Some("Anna".into()),
            email: Some("anna@example.com".into()),
            phone: Some("+7 900 000-00-00".into()),
            address: Some("Moscow".into()),
        }
    }

    fn pid(raw: u64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    #[test]
    fn complete_form_validates() {
        let customer = form().validate().unwrap();
        assert_eq!(customer.name, "Anna");
        assert_eq!(customer.address, "Moscow");
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let err = CheckoutForm {
            email: None,
            address: Some("   ".into()),
            ..form()
        }
        .validate()
        .unwrap_err();

        assert_eq!(err, CheckoutError::RequiredFieldMissing(vec!["email", "address"]));
        assert_eq!(err.to_string(), "missing required fields: email, address");
    }

    #[test]
    fn format_is_not_checked() {
        let customer = CheckoutForm {
            email: Some("not-an-email".into()),
            ..form()
        }
        .validate()
        .unwrap();
        assert_eq!(customer.email, "not-an-email");
    }

    #[test]
    fn empty_form_reports_every_field_in_order() {
        let err = CheckoutForm::default().validate().unwrap_err();
        assert_eq!(err, CheckoutError::RequiredFieldMissing(REQUIRED_FIELDS.to_vec()));
    }

    #[test]
    fn submit_prices_lines_and_keeps_snapshot() {
        let catalog = demo_catalog();
        let mut cart = Cart::new();
        cart.add(pid(2));
        cart.add(pid(2));
        cart.add(pid(4));
        cart.add(pid(77));

        let snapshot = cart.checkout();
        let placed_at = Utc::now();
        let order = submit(form().validate().unwrap(), snapshot.clone(), &catalog, placed_at);

        assert_eq!(order.items, snapshot);
        assert_eq!(order.placed_at, placed_at);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.total, 2.0 * 8_500.0 + 12_000.0);
        assert!(cart.is_empty());
    }

    #[test]
    fn empty_cart_still_produces_an_order() {
        let order = submit(
            form().validate().unwrap(),
            CartSnapshot::default(),
            &demo_catalog(),
            Utc::now(),
        );
        assert!(order.lines.is_empty());
        assert_eq!(order.total, 0.0);
    }
}
