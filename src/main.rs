use std::path::PathBuf;

use clap::Parser;
use gst_invoice::core::{InvoiceError, InvoiceRequest};
use gst_invoice::render::{RenderConfig, save_invoice};

/// Generate a tax invoice PDF.
///
/// With no options the built-in sample invoice is rendered using `fonts.ttf`
/// and `logo.png` from the working directory.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct CliArguments {
    #[arg(
        short = 'd',
        long = "data",
        value_name = "json_file",
        help = "Invoice request (shop, customer, items) in the JSON format"
    )]
    data_path: Option<PathBuf>,
    #[arg(
        short = 'c',
        long = "config",
        value_name = "json_file",
        help = "Render configuration (asset paths, output directory, colors) in the JSON format"
    )]
    config_path: Option<PathBuf>,
}

fn main() {
    if let Err(error) = fallible_main() {
        log::error!("{}", error);
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn fallible_main() -> Result<(), InvoiceError> {
    env_logger::init();
    let arguments = CliArguments::parse();
    log::debug!("{:?}", arguments);

    let request = match &arguments.data_path {
        Some(path) => InvoiceRequest::from_path(path)?,
        None => InvoiceRequest::sample(),
    };
    let config = match &arguments.config_path {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };

    let invoice = request.into_invoice();
    log::debug!(
        "invoice {} with {} item(s), total {}",
        invoice.number(),
        invoice.items().len(),
        invoice.total()
    );

    let path = save_invoice(&invoice, &config)?;
    println!("Invoice generated as '{}'!", path.display());
    Ok(())
}
