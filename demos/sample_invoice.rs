use gst_invoice::core::*;
use rust_decimal_macros::dec;

fn main() {
    let shop = ShopDetails {
        name: "Sharma Electricals".into(),
        address: "12 MG Road, Bengaluru 560001".into(),
        gstin: "29ABCDE1234F1Z5".into(),
        pan: "ABCDE1234F".into(),
        email: "accounts@sharma-electricals.in".into(),
    };
    let customer = CustomerDetails {
        name: "Rao Constructions".into(),
        address: "44 Residency Road, Bengaluru 560025".into(),
    };

    let mut invoice = Invoice::with_tax_rate(shop, customer, dec!(0.18));
    invoice.add_item("LED panel 18W", "9405", 12, dec!(450));
    invoice.add_item("Copper wire 1.5mm (90m)", "8544", 3, dec!(1725.50));
    // Clamped to quantity 1 and rate 0.
    invoice.add_item("Site visit", "9987", 0, dec!(-100));

    println!("Invoice: {}", invoice.number());
    println!("Date:    {}", invoice.invoice_date());
    println!("Shop:    {}", invoice.shop().name);
    println!("Ship to: {}", invoice.customer().name);
    println!("---");
    for (index, item) in invoice.items().iter().enumerate() {
        println!(
            "  {:>2}. {} [{}] {} x {} = {}",
            index + 1,
            item.particulars(),
            item.hsn(),
            item.quantity(),
            format_amount(DEFAULT_CURRENCY_SYMBOL, item.rate()),
            format_amount(DEFAULT_CURRENCY_SYMBOL, item.amount())
        );
    }
    println!("---");
    println!("Subtotal: {}", format_total(DEFAULT_CURRENCY_SYMBOL, invoice.subtotal()));
    println!("Tax:      {}", format_total(DEFAULT_CURRENCY_SYMBOL, invoice.tax()));
    println!("Total:    {}", format_total(DEFAULT_CURRENCY_SYMBOL, invoice.total()));
}
