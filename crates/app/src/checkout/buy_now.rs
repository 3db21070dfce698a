//! Single-product checkout.

use tracing::info;

use storefront::{
    addresses::latest,
    prelude::{Amount, CartLine, CartLineId, Checkout, OrderDraft},
};

use crate::{checkout::BuyNowError, domain::{addresses::AddressesService, products::models::Product}};

/// Start a checkout for `quantity` units of `product`, bypassing the cart.
///
/// The most recently saved address is pre-selected.
///
/// # Errors
///
/// - [`BuyNowError::NoAddress`]: the user has no saved address.
/// - [`BuyNowError::Cart`]: zero quantity or a negative price.
/// - [`BuyNowError::Api`]: the address lookup failed.
pub async fn buy_now(
    addresses: &dyn AddressesService,
    product: &Product,
    quantity: u32,
    delivery_fee: Amount,
) -> Result<Checkout, BuyNowError> {
    let saved = addresses.list_addresses().await?;
    let address = latest(&saved).ok_or(BuyNowError::NoAddress)?;

    let line = CartLine::new(
        CartLineId::new(format!("buy-now-{}", product.id)),
        product.to_ref(),
        product.price,
        quantity,
    )?;

    let mut checkout = Checkout::new(OrderDraft::new(vec![line], delivery_fee)?);

    checkout.select_address(address.id.clone())?;

    info!(product = %product.id, quantity, address = %address.id, "buy-now checkout started");

    Ok(checkout)
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use storefront::prelude::{Address, AddressId, CartError, ProductId};
    use testresult::TestResult;

    use crate::domain::addresses::MockAddressesService;

    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Kettle".to_string(),
            images: vec!["kettle.png".to_string()],
            price: Money::from_major(1000, iso::INR),
        }
    }

    fn address(id: &str) -> Address {
        Address {
            id: AddressId::new(id),
            name: None,
            mobile: "9800000000".to_string(),
            address_line: "1 Main St".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            pincode: "411001".to_string(),
            country: "India".to_string(),
        }
    }

    #[tokio::test]
    async fn uses_most_recent_address() -> TestResult {
        let mut addresses = MockAddressesService::new();

        addresses
            .expect_list_addresses()
            .once()
            .returning(|| Ok(vec![address("a1"), address("a2")]));

        let checkout = buy_now(&addresses, &product(), 2, Money::from_major(280, iso::INR)).await?;

        assert_eq!(checkout.draft().address(), Some(&AddressId::new("a2")));
        assert_eq!(checkout.draft().lines().len(), 1);
        assert_eq!(
            checkout.draft().totals()?.grand_total(),
            Money::from_major(2280, iso::INR)
        );

        Ok(())
    }

    #[tokio::test]
    async fn no_saved_address_is_reported() {
        let mut addresses = MockAddressesService::new();

        addresses.expect_list_addresses().once().returning(|| Ok(vec![]));

        let result = buy_now(&addresses, &product(), 1, Money::from_major(280, iso::INR)).await;

        let message = result.map(|_| ()).map_err(|error| error.to_string());

        assert_eq!(message, Err("Please add delivery address".to_string()));
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let mut addresses = MockAddressesService::new();

        addresses
            .expect_list_addresses()
            .once()
            .returning(|| Ok(vec![address("a1")]));

        let result = buy_now(&addresses, &product(), 0, Money::from_major(280, iso::INR)).await;

        assert!(matches!(result, Err(BuyNowError::Cart(CartError::ZeroQuantity))));
    }
}
