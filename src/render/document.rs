//! The invoice document: the story of flowables, PDF assembly and file output.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use super::config::{Color, RenderConfig};
use super::font::{Typeface, TtfFont};
use super::layout::{
    CellRange, Flowable, Frame, HAlign, ParagraphStyle, Table, TableCommand, TableStyle, layout,
};
use super::logo::Logo;
use crate::core::{Invoice, InvoiceError, format_amount, format_total};

/// Page resource name of the embedded font.
pub const FONT_RESOURCE: &str = "F1";
/// Page resource name of the logo image.
pub const LOGO_RESOURCE: &str = "Im1";

pub const ITEM_HEADERS: [&str; 6] = ["SL No", "Particulars", "HSN", "Quantity", "Rate", "Amount"];
const ITEM_COLUMN_WIDTHS: [f32; 6] = [50.0, 150.0, 80.0, 50.0, 50.0, 60.0];
const DETAILS_COLUMN_WIDTHS: [f32; 2] = [100.0, 200.0];
const TOTALS_COLUMN_WIDTHS: [f32; 2] = [100.0, 100.0];

const LOGO_WIDTH_FRACTION: f32 = 0.25;
const LOGO_HEIGHT_FRACTION: f32 = 0.15;
const SECTION_GAP: f32 = 12.0;

/// `invoice_<YYYYMMDD_HHMMSS>.pdf`
pub fn output_file_name(at: NaiveDateTime) -> String {
    at.format("invoice_%Y%m%d_%H%M%S.pdf").to_string()
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

/// The flowables making up an invoice, top to bottom.
///
/// The logo slot is sized from the page (a quarter of its width, 15% of its
/// height) and only present when `with_logo` is set.
pub fn invoice_story(invoice: &Invoice, config: &RenderConfig, with_logo: bool) -> Vec<Flowable> {
    let shop = invoice.shop();
    let customer = invoice.customer();
    let symbol = config.currency_symbol.as_str();
    let normal = ParagraphStyle::normal();

    let mut story = Vec::new();
    if with_logo {
        story.push(Flowable::Image {
            name: LOGO_RESOURCE.to_string(),
            width: config.page_size.width * LOGO_WIDTH_FRACTION,
            height: config.page_size.height * LOGO_HEIGHT_FRACTION,
            align: HAlign::Right,
        });
    }

    story.extend([
        Flowable::paragraph("TAX INVOICE", ParagraphStyle::heading2()),
        Flowable::paragraph("ORIGINAL FOR RECIPIENT", normal),
        Flowable::paragraph(shop.name.as_str(), ParagraphStyle::heading1()),
        Flowable::paragraph(shop.address.as_str(), normal),
        Flowable::paragraph(format!("GSTIN: {}", shop.gstin), normal),
        Flowable::paragraph(format!("PAN Number: {}", shop.pan), normal),
        Flowable::paragraph(format!("Email: {}", shop.email), normal),
        Flowable::Spacer(SECTION_GAP),
    ]);

    let details = Table::new(
        vec![
            row(&["Invoice Number:", invoice.number()]),
            row(&["Invoice Date:", &invoice.invoice_date()]),
            row(&["Due Date:", &invoice.due_date()]),
        ],
        DETAILS_COLUMN_WIDTHS.to_vec(),
    )
    .with_style(TableStyle::new().with(TableCommand::Align(CellRange::ALL, HAlign::Left)));

    story.extend([
        Flowable::Table(details),
        Flowable::Spacer(SECTION_GAP),
        Flowable::paragraph("SHIP TO", ParagraphStyle::heading2()),
        Flowable::paragraph(customer.name.as_str(), normal),
        Flowable::paragraph(customer.address.as_str(), normal),
        Flowable::Spacer(SECTION_GAP),
        Flowable::Table(item_table(invoice, symbol)),
        Flowable::Spacer(SECTION_GAP),
        Flowable::Table(totals_table(invoice, symbol, config.totals_background)),
    ]);
    story
}

fn item_table(invoice: &Invoice, symbol: &str) -> Table {
    let mut rows = vec![row(&ITEM_HEADERS)];
    rows.extend(invoice.items().iter().enumerate().map(|(index, item)| {
        vec![
            (index + 1).to_string(),
            item.particulars().to_string(),
            item.hsn().to_string(),
            item.quantity().to_string(),
            format_amount(symbol, item.rate()),
            format_amount(symbol, item.amount()),
        ]
    }));

    let header = CellRange::row(0);
    let body = CellRange::rows_from(1);
    Table::new(rows, ITEM_COLUMN_WIDTHS.to_vec())
        .with_style(
            TableStyle::new()
                .with(TableCommand::Background(header, Color::GREY))
                .with(TableCommand::TextColor(header, Color::WHITESMOKE))
                .with(TableCommand::Align(CellRange::ALL, HAlign::Center))
                .with(TableCommand::Bold(header, true))
                .with(TableCommand::BottomPadding(header, 12.0))
                .with(TableCommand::Background(body, Color::BEIGE))
                .with(TableCommand::Grid(CellRange::ALL, 1.0, Color::BLACK)),
        )
        .repeat_header(true)
}

fn totals_table(invoice: &Invoice, symbol: &str, background: Option<Color>) -> Table {
    let mut style = TableStyle::new()
        .with(TableCommand::Align(CellRange::ALL, HAlign::Right))
        .with(TableCommand::FontSize(CellRange::ALL, 12.0));
    if let Some(color) = background {
        style = style.with(TableCommand::Background(CellRange::ALL, color));
    }

    Table::new(
        vec![
            row(&["Subtotal:", &format_total(symbol, invoice.subtotal())]),
            row(&["Tax:", &format_total(symbol, invoice.tax())]),
            row(&["Total:", &format_total(symbol, invoice.total())]),
        ],
        TOTALS_COLUMN_WIDTHS.to_vec(),
    )
    .with_style(style)
}

/// A PDF text string: literal for ASCII, UTF-16BE with a byte order mark
/// otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Render with the font and logo named in `config`.
pub fn render_invoice(invoice: &Invoice, config: &RenderConfig) -> Result<Vec<u8>, InvoiceError> {
    let font = TtfFont::from_path(&config.font_path)?;
    let logo = Logo::open(&config.logo_path)?;
    render_invoice_with(invoice, config, &font, Some(&logo))
}

/// Render with explicitly supplied assets. Touches no files.
pub fn render_invoice_with(
    invoice: &Invoice,
    config: &RenderConfig,
    typeface: &dyn Typeface,
    logo: Option<&Logo>,
) -> Result<Vec<u8>, InvoiceError> {
    config.check()?;
    let story = invoice_story(invoice, config, logo.is_some());
    let frame = Frame::for_page(config.page_size, config.margin);
    let pages = layout(&story, frame, typeface, FONT_RESOURCE);
    log::debug!(
        "invoice {} laid out on {} page(s)",
        invoice.number(),
        pages.len()
    );

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = {
        let font = typeface.embed(&mut doc)?;
        doc.add_object(font)
    };
    let mut resources = dictionary! {
        "Font" => dictionary! { FONT_RESOURCE => font_id },
    };
    if let Some(logo) = logo {
        let image_id = logo.embed(&mut doc);
        resources.set("XObject", dictionary! { LOGO_RESOURCE => image_id });
    }
    let resources_id = doc.add_object(resources);

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for canvas in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, canvas.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(config.page_size.width),
                Object::Real(config.page_size.height),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(&format!("Tax Invoice {}", invoice.number())),
        "Author" => text_string(&invoice.shop().name),
        "Producer" => Object::string_literal(concat!("gst-invoice ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(
            invoice.issued_at().format("D:%Y%m%d%H%M%S").to_string(),
        ),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| InvoiceError::Pdf(format!("failed to serialize PDF: {e}")))?;
    Ok(bytes)
}

/// Render and write the PDF to `sink`. Nothing is written if rendering fails.
pub fn write_invoice<W: Write>(
    invoice: &Invoice,
    config: &RenderConfig,
    sink: &mut W,
) -> Result<(), InvoiceError> {
    let bytes = render_invoice(invoice, config)?;
    sink.write_all(&bytes)?;
    Ok(())
}

/// Render and save as `invoice_<now>.pdf` in `config.output_dir`.
pub fn save_invoice(invoice: &Invoice, config: &RenderConfig) -> Result<PathBuf, InvoiceError> {
    save_invoice_at(invoice, config, Local::now().naive_local())
}

/// Like [`save_invoice`], with the file name taken from `at`.
///
/// The file is created only after the PDF has been fully rendered.
pub fn save_invoice_at(
    invoice: &Invoice,
    config: &RenderConfig,
    at: NaiveDateTime,
) -> Result<PathBuf, InvoiceError> {
    let bytes = render_invoice(invoice, config)?;
    let path = output_path(&config.output_dir, &output_file_name(at));
    std::fs::write(&path, &bytes)?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

fn output_path(dir: &Path, file_name: &str) -> PathBuf {
    if dir.as_os_str().is_empty() || dir == Path::new(".") {
        PathBuf::from(file_name)
    } else {
        dir.join(file_name)
    }
}
