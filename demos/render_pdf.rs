use std::path::PathBuf;

use gst_invoice::core::InvoiceRequest;
use gst_invoice::render::{RenderConfig, save_invoice};

/// Usage: render_pdf <font.ttf> <logo.png> [output_dir]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(font), Some(logo)) = (args.next(), args.next()) else {
        eprintln!("usage: render_pdf <font.ttf> <logo.png> [output_dir]");
        std::process::exit(2);
    };
    let config = RenderConfig {
        font_path: PathBuf::from(font),
        logo_path: PathBuf::from(logo),
        output_dir: args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
        ..RenderConfig::default()
    };

    let invoice = InvoiceRequest::sample().into_invoice();
    match save_invoice(&invoice, &config) {
        Ok(path) => println!("Invoice generated as '{}'!", path.display()),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
