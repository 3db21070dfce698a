//! Table output.

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use storefront::prelude::{Address, Cart, CartLineId, OrderTotals, display_amount};
use storefront_app::domain::{
    notifications::models::Notification,
    orders::models::OrderSummary,
    payments::models::PaymentRecord,
    products::models::{Category, Product},
    reviews::models::{ProductReviews, Rating, Review},
};

fn table(builder: Builder, amount_columns: std::ops::Range<usize>) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(amount_columns), Alignment::right());

    table.to_string()
}

pub(crate) fn cart(cart: &Cart, unavailable: &[CartLineId]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Line", "Product", "Qty", "Unit price", "Total"]);

    for line in cart.lines() {
        builder.push_record([
            line.id().to_string(),
            line.product().name.clone(),
            line.quantity().to_string(),
            display_amount(line.unit_price()),
            line.line_total()
                .map_or_else(|_| "-".to_string(), |total| display_amount(&total)),
        ]);
    }

    for line in unavailable {
        builder.push_record([
            line.to_string(),
            "(product no longer available)".to_string(),
            String::new(),
            String::new(),
            String::new(),
        ]);
    }

    table(builder, 2..5)
}

pub(crate) fn totals(totals: &OrderTotals) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Items total".to_string(), display_amount(&totals.items_total())]);
    builder.push_record(["Discount".to_string(), display_amount(&totals.discount())]);
    builder.push_record(["Delivery fee".to_string(), display_amount(&totals.delivery_fee())]);
    builder.push_record(["Total".to_string(), display_amount(&totals.grand_total())]);

    table(builder, 1..2)
}

pub(crate) fn addresses(addresses: &[Address]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Mobile", "Address"]);

    for address in addresses {
        builder.push_record([
            address.id.to_string(),
            address.name.clone().unwrap_or_default(),
            address.mobile.clone(),
            address.to_string(),
        ]);
    }

    table(builder, 0..0)
}

pub(crate) fn orders(orders: &[OrderSummary]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Reference", "Placed", "Payment", "Delivery", "Total"]);

    for order in orders {
        builder.push_record([
            order.id.to_string(),
            order.order_ref.clone().unwrap_or_default(),
            order
                .created_at
                .map(|at| at.strftime("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            order.payment_status.to_string(),
            order.delivery_status.clone().unwrap_or_default(),
            display_amount(&order.total_amount),
        ]);
    }

    table(builder, 5..6)
}

pub(crate) fn order_items(order: &OrderSummary) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Product", "Qty"]);

    for item in &order.items {
        builder.push_record([item.name.clone(), item.quantity.to_string()]);
    }

    table(builder, 1..2)
}

pub(crate) fn payments(payments: &[PaymentRecord]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Order", "Status", "Receipt", "Amount"]);

    for payment in payments {
        builder.push_record([
            payment.order_ref.clone(),
            payment.status.to_string(),
            payment.receipt_url.clone().unwrap_or_else(|| "-".to_string()),
            display_amount(&payment.amount),
        ]);
    }

    table(builder, 3..4)
}

pub(crate) fn products(products: &[Product]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Price"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            display_amount(&product.price),
        ]);
    }

    table(builder, 2..3)
}

pub(crate) fn categories(categories: &[Category]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Name"]);

    for category in categories {
        builder.push_record([category.id.to_string(), category.name.clone()]);
    }

    table(builder, 0..0)
}

pub(crate) fn rating_breakdown(reviews: &ProductReviews) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Stars", "Share", "Count"]);

    for stars in (1..=5).rev().filter_map(|stars| Rating::new(stars).ok()) {
        builder.push_record([
            format!("{} ★", stars.stars()),
            format!("{}%", reviews.percent(stars)),
            reviews.count(stars).to_string(),
        ]);
    }

    table(builder, 1..3)
}

pub(crate) fn reviews(reviews: &[Review]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["By", "Stars", "Date", "Comment"]);

    for review in reviews {
        builder.push_record([
            review.author.clone().unwrap_or_else(|| "Anonymous".to_string()),
            review.rating.to_string(),
            review
                .created_at
                .map(|at| at.strftime("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            review.comment.clone(),
        ]);
    }

    table(builder, 1..2)
}

pub(crate) fn notifications(notifications: &[Notification]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Id", "", "Received", "Message"]);

    for notification in notifications {
        builder.push_record([
            notification.id.to_string(),
            if notification.read { String::new() } else { "new".to_string() },
            notification
                .created_at
                .map(|at| at.strftime("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            notification.message.clone(),
        ]);
    }

    table(builder, 0..0)
}
