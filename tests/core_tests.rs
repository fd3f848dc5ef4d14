use std::collections::HashSet;

use chrono::NaiveDate;
use gst_invoice::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn shop() -> ShopDetails {
    ShopDetails {
        name: "Your Shop Name".into(),
        address: "Your Shop Address".into(),
        gstin: "Your GSTIN".into(),
        pan: "Your PAN".into(),
        email: "your@email.com".into(),
    }
}

fn customer() -> CustomerDetails {
    CustomerDetails {
        name: "Customer Name".into(),
        address: "Customer Address".into(),
    }
}

// --- Invoice creation ---

#[test]
fn new_invoice_is_empty() {
    let inv = Invoice::new(shop(), customer());
    assert!(inv.items().is_empty());
    assert_eq!(inv.tax_rate(), dec!(0.1));
    assert_eq!(inv.subtotal(), dec!(0));
    assert_eq!(inv.tax(), dec!(0));
    assert_eq!(inv.total(), dec!(0));
    assert_eq!(inv.shop().gstin, "Your GSTIN");
    assert_eq!(inv.customer().name, "Customer Name");
}

#[test]
fn number_has_fixed_prefix_and_uuid_suffix() {
    let inv = Invoice::new(shop(), customer());
    let suffix = inv
        .number()
        .strip_prefix("YOUR/INV/24-25/001-")
        .expect("default prefix");
    assert_eq!(suffix.len(), 36);
    assert_eq!(suffix.matches('-').count(), 4);
}

#[test]
fn due_date_equals_invoice_date() {
    let inv = Invoice::new(shop(), customer());
    assert_eq!(inv.due_date(), inv.invoice_date());
    assert_eq!(inv.issued_at(), inv.due_at());
}

#[test]
fn display_date_format() {
    let at = NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    let inv = InvoiceBuilder::new(shop(), customer()).issued_at(at).build();
    assert_eq!(inv.invoice_date(), "05/03/2024 02:30 PM");
    assert_eq!(inv.due_date(), "05/03/2024 02:30 PM");
}

#[test]
fn identical_input_gives_distinct_numbers() {
    let numbers: HashSet<String> = (0..200)
        .map(|_| Invoice::new(shop(), customer()).number().to_string())
        .collect();
    assert_eq!(numbers.len(), 200);
}

// --- Adding items ---

#[test]
fn two_items_default_tax() {
    let mut inv = Invoice::new(shop(), customer());
    inv.add_item("Item 1", "HSN1", 2, dec!(100));
    inv.add_item("Item 2", "HSN2", 1, dec!(200));

    assert_eq!(inv.items().len(), 2);
    assert_eq!(inv.items()[0].amount(), dec!(200.00));
    assert_eq!(inv.items()[1].amount(), dec!(200.00));
    assert_eq!(inv.subtotal(), dec!(400.00));
    assert_eq!(inv.tax(), dec!(40.00));
    assert_eq!(inv.total(), dec!(440.00));
}

#[test]
fn zero_quantity_becomes_one() {
    let mut inv = Invoice::new(shop(), customer());
    let item = inv.add_item("Item", "HSN", 0, dec!(50));
    assert_eq!(item.quantity(), 1);
    assert_eq!(item.amount(), dec!(50.00));
}

#[test]
fn negative_quantity_becomes_one() {
    let mut inv = Invoice::new(shop(), customer());
    inv.add_item("Item", "HSN", -7, dec!(12.5));
    assert_eq!(inv.items()[0].quantity(), 1);
    assert_eq!(inv.subtotal(), dec!(12.5));
}

#[test]
fn negative_rate_becomes_zero() {
    let mut inv = Invoice::new(shop(), customer());
    let item = inv.add_item("Item", "HSN", 3, dec!(-10));
    assert_eq!(item.rate(), dec!(0));
    assert_eq!(item.amount(), dec!(0.00));
    assert_eq!(inv.total(), dec!(0));
}

#[test]
fn totals_follow_every_addition() {
    let mut inv = Invoice::new(shop(), customer());
    inv.add_item("A", "1", 1, dec!(10));
    assert_eq!(inv.subtotal(), dec!(10));
    assert_eq!(inv.total(), dec!(11.0));
    inv.add_item("B", "2", 4, dec!(2.5));
    assert_eq!(inv.subtotal(), dec!(20));
    assert_eq!(inv.tax(), dec!(2.0));
    assert_eq!(inv.total(), dec!(22.0));
}

#[test]
fn items_keep_insertion_order() {
    let mut inv = Invoice::new(shop(), customer());
    for name in ["first", "second", "third"] {
        inv.add_item(name, "HSN", 1, dec!(1));
    }
    let names: Vec<&str> = inv.items().iter().map(|i| i.particulars()).collect();
    assert_eq!(names, ["first", "second", "third"]);
}

#[test]
fn huge_quantity_and_rate_saturate() {
    let mut inv = Invoice::new(shop(), customer());
    let item = inv.add_item("Bulk", "H", i64::MAX, dec!(100000000000));
    assert_eq!(item.amount(), Decimal::MAX);
    inv.add_item("Bulk", "H", 1, dec!(1));
    assert_eq!(inv.subtotal(), Decimal::MAX);
    assert_eq!(inv.total(), Decimal::MAX);
}

// --- Custom tax rate ---

#[test]
fn gst_eighteen_percent() {
    let mut inv = Invoice::with_tax_rate(shop(), customer(), dec!(0.18));
    inv.add_item("LED panel", "9405", 12, dec!(450));
    assert_eq!(inv.subtotal(), dec!(5400));
    assert_eq!(inv.tax(), dec!(972.00));
    assert_eq!(inv.total(), dec!(6372.00));
}

#[test]
fn tax_is_not_rounded() {
    let mut inv = Invoice::new(shop(), customer());
    inv.add_item("Sweet", "1704", 1, dec!(0.05));
    assert_eq!(inv.tax(), dec!(0.005));
    assert_eq!(format_total(DEFAULT_CURRENCY_SYMBOL, inv.tax()), "₹ 0.01");
}

// --- Requests ---

#[test]
fn request_json_builds_invoice() {
    let json = r#"{
        "shop": {
            "name": "Sharma Electricals",
            "address": "12 MG Road",
            "gstin": "29ABCDE1234F1Z5",
            "pan": "ABCDE1234F",
            "email": "accounts@example.in"
        },
        "customer": { "name": "Rao Constructions", "address": "44 Residency Road" },
        "items": [
            { "particulars": "Wire", "hsn": "8544", "quantity": 3, "rate": "1725.50" },
            { "particulars": "Visit", "hsn": "9987" }
        ],
        "taxRate": "0.18",
        "numberPrefix": "SE/24-25/"
    }"#;
    let inv = InvoiceRequest::from_json(json).unwrap().into_invoice();
    assert!(inv.number().starts_with("SE/24-25/"));
    assert_eq!(inv.items().len(), 2);
    assert_eq!(inv.items()[1].quantity(), 1);
    assert_eq!(inv.items()[1].amount(), dec!(0));
    assert_eq!(inv.subtotal(), dec!(5176.50));
    assert_eq!(inv.tax(), dec!(931.77));
    assert_eq!(inv.total(), dec!(6108.27));
}

#[test]
fn request_with_overflowing_totals_is_config_error() {
    let json = r#"{
        "shop": { "name": "S", "address": "A", "gstin": "G", "pan": "P", "email": "e" },
        "customer": { "name": "C", "address": "A" },
        "items": [
            { "particulars": "Bulk", "hsn": "H", "quantity": 9223372036854775807,
              "rate": "79228162514264337593543950335" }
        ]
    }"#;
    let err = InvoiceRequest::from_json(json).unwrap_err();
    assert!(matches!(err, InvoiceError::Config(_)), "{err}");
}

#[test]
fn request_missing_shop_is_config_error() {
    let err = InvoiceRequest::from_json(r#"{ "customer": { "name": "x", "address": "y" } }"#)
        .unwrap_err();
    assert!(matches!(err, InvoiceError::Config(_)));
    assert!(err.to_string().contains("shop"));
}

// --- Formatting ---

#[test]
fn formatted_totals_block() {
    let inv = InvoiceRequest::sample().into_invoice();
    let block = format!(
        "Subtotal: {}\nTax: {}\nTotal: {}",
        format_total(DEFAULT_CURRENCY_SYMBOL, inv.subtotal()),
        format_total(DEFAULT_CURRENCY_SYMBOL, inv.tax()),
        format_total(DEFAULT_CURRENCY_SYMBOL, inv.total()),
    );
    insta::assert_snapshot!(block, @r"
    Subtotal: ₹ 400.00
    Tax: ₹ 40.00
    Total: ₹ 440.00
    ");
}

#[test]
fn formatted_item_amounts() {
    let inv = InvoiceRequest::sample().into_invoice();
    let rows: Vec<String> = inv
        .items()
        .iter()
        .map(|item| {
            format!(
                "{} {} {}",
                item.quantity(),
                format_amount(DEFAULT_CURRENCY_SYMBOL, item.rate()),
                format_amount(DEFAULT_CURRENCY_SYMBOL, item.amount())
            )
        })
        .collect();
    insta::assert_snapshot!(rows.join("\n"), @r"
    2 ₹100.00 ₹200.00
    1 ₹200.00 ₹200.00
    ");
}
