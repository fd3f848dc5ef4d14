#![no_main]

use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // Must not panic; errors are fine.
    let Ok(request) = gst_invoice::core::InvoiceRequest::from_json(s) else {
        return;
    };

    let invoice = request.into_invoice();
    for item in invoice.items() {
        assert!(item.quantity() >= 1);
        assert!(item.rate() >= Decimal::ZERO);
    }
    let sum: Decimal = invoice.items().iter().map(|i| i.amount()).sum();
    assert_eq!(invoice.subtotal(), sum);
    assert_eq!(invoice.total(), invoice.subtotal() + invoice.tax());
});
