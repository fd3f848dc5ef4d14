//! Vertical flow layout.
//!
//! A story is a list of [`Flowable`]s stacked top to bottom inside a [`Frame`].
//! When the next line, image or table row does not fit, a new page is started.
//! Paragraphs break between lines and tables break between rows; nothing is
//! split inside a line or a row.

use super::canvas::{Canvas, TextPaint};
use super::config::{Color, PageSize};
use super::font::Typeface;

/// Inset between the page margin and the area flowables are placed in.
pub const FRAME_PADDING: f32 = 6.0;

const CELL_PADDING_X: f32 = 6.0;
const CELL_PADDING_TOP: f32 = 3.0;
const CELL_PADDING_BOTTOM: f32 = 3.0;
const CELL_FONT_SIZE: f32 = 10.0;

/// Horizontal alignment of text within a cell, or of a block within the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HAlign {
    /// X coordinate of a box `width` wide placed in `available` starting at `x`.
    pub fn place(self, x: f32, available: f32, width: f32) -> f32 {
        match self {
            HAlign::Left => x,
            HAlign::Center => x + (available - width) / 2.0,
            HAlign::Right => x + available - width,
        }
    }
}

/// The rectangle flowables are placed in, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn for_page(page: PageSize, margin: f32) -> Self {
        let inset = margin + FRAME_PADDING;
        Self {
            x: inset,
            y: inset,
            width: (page.width - 2.0 * inset).max(0.0),
            height: (page.height - 2.0 * inset).max(0.0),
        }
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub font_size: f32,
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub bold: bool,
    pub color: Color,
    pub align: HAlign,
}

impl ParagraphStyle {
    pub const fn normal() -> Self {
        Self {
            font_size: 10.0,
            leading: 12.0,
            space_before: 0.0,
            space_after: 0.0,
            bold: false,
            color: Color::BLACK,
            align: HAlign::Left,
        }
    }

    pub const fn heading1() -> Self {
        Self {
            font_size: 18.0,
            leading: 22.0,
            space_after: 6.0,
            bold: true,
            ..Self::normal()
        }
    }

    pub const fn heading2() -> Self {
        Self {
            font_size: 14.0,
            leading: 18.0,
            space_before: 12.0,
            space_after: 6.0,
            bold: true,
            ..Self::normal()
        }
    }
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self::normal()
    }
}

/// One vertically stacked element of a story.
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph { text: String, style: ParagraphStyle },
    /// Fixed vertical gap; dropped at the top of a page.
    Spacer(f32),
    /// A named image XObject drawn at the given size.
    Image {
        name: String,
        width: f32,
        height: f32,
        align: HAlign,
    },
    Table(Table),
}

impl Flowable {
    pub fn paragraph(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Flowable::Paragraph {
            text: text.into(),
            style,
        }
    }

    fn space_before(&self) -> f32 {
        match self {
            Flowable::Paragraph { style, .. } => style.space_before,
            _ => 0.0,
        }
    }
}

/// A rectangular range of cells as `(column, row)` pairs, inclusive.
///
/// Negative indices count from the end: `-1` is the last column or row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    start: (i32, i32),
    end: (i32, i32),
}

impl CellRange {
    pub const ALL: CellRange = CellRange::new((0, 0), (-1, -1));

    pub const fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        Self { start, end }
    }

    /// Every cell of one row.
    pub const fn row(row: i32) -> Self {
        Self::new((0, row), (-1, row))
    }

    /// Every cell from `row` to the last row.
    pub const fn rows_from(row: i32) -> Self {
        Self::new((0, row), (-1, -1))
    }

    pub fn contains(&self, col: usize, row: usize, cols: usize, rows: usize) -> bool {
        fn resolve(index: i32, len: usize) -> i64 {
            if index < 0 {
                len as i64 + i64::from(index)
            } else {
                i64::from(index)
            }
        }
        let (col, row) = (col as i64, row as i64);
        (resolve(self.start.0, cols)..=resolve(self.end.0, cols)).contains(&col)
            && (resolve(self.start.1, rows)..=resolve(self.end.1, rows)).contains(&row)
    }
}

/// A styling instruction applied to a range of cells. Later commands win.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableCommand {
    Background(CellRange, Color),
    TextColor(CellRange, Color),
    Align(CellRange, HAlign),
    FontSize(CellRange, f32),
    Bold(CellRange, bool),
    BottomPadding(CellRange, f32),
    /// Outline every cell in the range with the given line width.
    Grid(CellRange, f32, Color),
}

impl TableCommand {
    fn range(&self) -> &CellRange {
        match self {
            TableCommand::Background(range, _)
            | TableCommand::TextColor(range, _)
            | TableCommand::Align(range, _)
            | TableCommand::FontSize(range, _)
            | TableCommand::Bold(range, _)
            | TableCommand::BottomPadding(range, _)
            | TableCommand::Grid(range, _, _) => range,
        }
    }

    fn apply(&self, cell: &mut CellStyle) {
        match *self {
            TableCommand::Background(_, color) => cell.background = Some(color),
            TableCommand::TextColor(_, color) => cell.text_color = color,
            TableCommand::Align(_, align) => cell.align = align,
            TableCommand::FontSize(_, size) => cell.font_size = size,
            TableCommand::Bold(_, bold) => cell.bold = bold,
            TableCommand::BottomPadding(_, padding) => cell.bottom_padding = padding,
            TableCommand::Grid(_, width, color) => cell.grid = Some((width, color)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStyle {
    commands: Vec<TableCommand>,
}

impl TableStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, command: TableCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn commands(&self) -> &[TableCommand] {
        &self.commands
    }
}

/// Resolved presentation of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CellStyle {
    background: Option<Color>,
    text_color: Color,
    align: HAlign,
    font_size: f32,
    bold: bool,
    bottom_padding: f32,
    grid: Option<(f32, Color)>,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            background: None,
            text_color: Color::BLACK,
            align: HAlign::Left,
            font_size: CELL_FONT_SIZE,
            bold: false,
            bottom_padding: CELL_PADDING_BOTTOM,
            grid: None,
        }
    }
}

impl CellStyle {
    fn leading(&self) -> f32 {
        self.font_size * 1.2
    }
}

/// A grid of text cells with fixed column widths.
///
/// Cell text may contain `\n` for multiple lines; it is never wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    rows: Vec<Vec<String>>,
    col_widths: Vec<f32>,
    style: TableStyle,
    align: HAlign,
    repeat_header: bool,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>, col_widths: Vec<f32>) -> Self {
        Self {
            rows,
            col_widths,
            style: TableStyle::default(),
            align: HAlign::Center,
            repeat_header: false,
        }
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Placement of the whole table within the frame (centered by default).
    pub fn align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    /// Draw the first row again at the top of every continuation page.
    pub fn repeat_header(mut self, repeat: bool) -> Self {
        self.repeat_header = repeat;
        self
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn col_widths(&self) -> &[f32] {
        &self.col_widths
    }

    pub fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }

    fn cell(&self, row: usize, col: usize) -> &str {
        self.rows[row].get(col).map(String::as_str).unwrap_or("")
    }

    fn cell_styles(&self) -> Vec<Vec<CellStyle>> {
        let (cols, rows) = (self.col_widths.len(), self.rows.len());
        (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| {
                        let mut cell = CellStyle::default();
                        for command in &self.style.commands {
                            if command.range().contains(col, row, cols, rows) {
                                command.apply(&mut cell);
                            }
                        }
                        cell
                    })
                    .collect()
            })
            .collect()
    }

    fn row_height(&self, row: usize, styles: &[CellStyle]) -> f32 {
        styles
            .iter()
            .enumerate()
            .map(|(col, style)| {
                let lines = self.cell(row, col).split('\n').count().max(1);
                CELL_PADDING_TOP + lines as f32 * style.leading() + style.bottom_padding
            })
            .fold(0.0, f32::max)
    }
}

/// Greedy word wrap. A single word wider than `width` gets a line to itself.
pub fn wrap_words(text: &str, width: f32, size: f32, typeface: &dyn Typeface) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if typeface.text_width(&candidate, size) <= width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Lay out `story` into pages. `font` is the resource name text is shown with.
///
/// Always returns at least one page.
pub fn layout(story: &[Flowable], frame: Frame, typeface: &dyn Typeface, font: &str) -> Vec<Canvas> {
    let mut cursor = Cursor::new(frame, typeface, font);
    for flowable in story {
        cursor.gap(flowable.space_before());
        match flowable {
            Flowable::Paragraph { text, style } => cursor.paragraph(text, style),
            Flowable::Spacer(height) => cursor.spacer(*height),
            Flowable::Image {
                name,
                width,
                height,
                align,
            } => cursor.image(name, *width, *height, *align),
            Flowable::Table(table) => cursor.table(table),
        }
    }
    cursor.finish()
}

struct Cursor<'a> {
    frame: Frame,
    typeface: &'a dyn Typeface,
    font: &'a str,
    pages: Vec<Canvas>,
    canvas: Canvas,
    y: f32,
    at_top: bool,
    space_after: f32,
}

impl<'a> Cursor<'a> {
    fn new(frame: Frame, typeface: &'a dyn Typeface, font: &'a str) -> Self {
        Self {
            frame,
            typeface,
            font,
            pages: Vec::new(),
            canvas: Canvas::new(),
            y: frame.top(),
            at_top: true,
            space_after: 0.0,
        }
    }

    fn finish(mut self) -> Vec<Canvas> {
        self.pages.push(self.canvas);
        self.pages
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.canvas);
        self.pages.push(page);
        self.y = self.frame.top();
        self.at_top = true;
        self.space_after = 0.0;
        log::debug!("starting page {}", self.pages.len() + 1);
    }

    fn remaining(&self) -> f32 {
        self.y - self.frame.y
    }

    /// Collapse the previous element's space after with this one's space before.
    fn gap(&mut self, space_before: f32) {
        if !self.at_top {
            self.y -= space_before.max(self.space_after);
        }
        self.space_after = 0.0;
    }

    /// Break the page unless `height` fits in what is left of it.
    fn reserve(&mut self, height: f32) {
        if height > self.remaining() && !self.at_top {
            self.new_page();
        }
        if height > self.remaining() {
            log::warn!(
                "block of {height:.1}pt exceeds the {:.1}pt frame; it will overflow",
                self.frame.height
            );
        }
    }

    fn advance(&mut self, height: f32) {
        self.y -= height;
        self.at_top = false;
    }

    fn spacer(&mut self, height: f32) {
        if self.at_top {
            return;
        }
        if height > self.remaining() {
            self.new_page();
        } else {
            self.y -= height;
        }
    }

    fn paragraph(&mut self, text: &str, style: &ParagraphStyle) {
        let size = style.font_size;
        let paint = TextPaint {
            font: self.font,
            size,
            color: style.color,
            bold: style.bold,
        };
        for line in wrap_words(text, self.frame.width, size, self.typeface) {
            self.reserve(style.leading);
            let width = self.typeface.text_width(&line, size);
            let x = style.align.place(self.frame.x, self.frame.width, width);
            let baseline = self.y - self.typeface.ascent(size);
            self.canvas
                .text(x, baseline, self.typeface.encode(&line), paint);
            self.advance(style.leading);
        }
        self.space_after = style.space_after;
    }

    fn image(&mut self, name: &str, width: f32, height: f32, align: HAlign) {
        self.reserve(height);
        let x = align.place(self.frame.x, self.frame.width, width);
        self.canvas.image(name, x, self.y - height, width, height);
        self.advance(height);
    }

    fn table(&mut self, table: &Table) {
        let styles = table.cell_styles();
        let heights: Vec<f32> = styles
            .iter()
            .enumerate()
            .map(|(row, cells)| table.row_height(row, cells))
            .collect();
        let x = table.align.place(self.frame.x, self.frame.width, table.width());

        for (row, height) in heights.iter().enumerate() {
            if *height > self.remaining() && !self.at_top {
                self.new_page();
                if table.repeat_header && row > 0 {
                    self.table_row(table, 0, x, heights[0], &styles[0]);
                }
            }
            if *height > self.remaining() {
                log::warn!("table row {row} does not fit on the page; it will overflow");
            }
            self.table_row(table, row, x, *height, &styles[row]);
        }
    }

    fn table_row(&mut self, table: &Table, row: usize, x: f32, height: f32, styles: &[CellStyle]) {
        let bottom = self.y - height;

        let mut cell_x = x;
        for (width, style) in table.col_widths.iter().zip(styles) {
            if let Some(background) = style.background {
                self.canvas
                    .fill_rect(cell_x, bottom, *width, height, background);
            }
            cell_x += width;
        }

        let mut cell_x = x;
        for (col, (width, style)) in table.col_widths.iter().zip(styles).enumerate() {
            self.cell_text(table.cell(row, col), cell_x, bottom, *width, style);
            cell_x += width;
        }

        let mut cell_x = x;
        for (width, style) in table.col_widths.iter().zip(styles) {
            if let Some((line_width, color)) = style.grid {
                self.canvas
                    .stroke_rect(cell_x, bottom, *width, height, line_width, color);
            }
            cell_x += width;
        }

        self.advance(height);
    }

    fn cell_text(&mut self, text: &str, x: f32, bottom: f32, width: f32, style: &CellStyle) {
        let size = style.font_size;
        let paint = TextPaint {
            font: self.font,
            size,
            color: style.text_color,
            bold: style.bold,
        };
        let lines: Vec<&str> = text.split('\n').collect();
        let last_baseline = bottom + style.bottom_padding - self.typeface.descent(size);
        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = last_baseline + (lines.len() - 1 - index) as f32 * style.leading();
            let text_width = self.typeface.text_width(line, size);
            let text_x = match style.align {
                HAlign::Left => x + CELL_PADDING_X,
                HAlign::Center => x + (width - text_width) / 2.0,
                HAlign::Right => x + width - CELL_PADDING_X - text_width,
            };
            self.canvas
                .text(text_x, baseline, self.typeface.encode(line), paint);
        }
    }
}
