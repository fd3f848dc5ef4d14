use lopdf::Object;
use lopdf::content::{Content, Operation};

use super::config::Color;
use crate::core::InvoiceError;

/// Content-stream operations for one page.
///
/// Coordinates are PDF user space: points, origin at the bottom left.
#[derive(Debug, Default, Clone)]
pub struct Canvas {
    operations: Vec<Operation>,
}

/// Font and color for one run of text.
#[derive(Debug, Clone, Copy)]
pub struct TextPaint<'a> {
    pub font: &'a str,
    pub size: f32,
    pub color: Color,
    /// Simulated bold: glyph outlines are stroked as well as filled.
    pub bold: bool,
}

fn reals(values: &[f32]) -> Vec<Object> {
    values.iter().copied().map(Object::Real).collect()
}

fn rgb(color: Color) -> Vec<Object> {
    reals(&[color.r, color.g, color.b])
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.push("q", vec![]);
        self.push("rg", rgb(color));
        self.push("re", reals(&[x, y, width, height]));
        self.push("f", vec![]);
        self.push("Q", vec![]);
    }

    pub fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
        color: Color,
    ) {
        self.push("q", vec![]);
        self.push("w", vec![Object::Real(line_width)]);
        self.push("RG", rgb(color));
        self.push("re", reals(&[x, y, width, height]));
        self.push("S", vec![]);
        self.push("Q", vec![]);
    }

    /// Show pre-encoded text with its baseline starting at `(x, y)`.
    pub fn text(&mut self, x: f32, y: f32, encoded: Object, paint: TextPaint<'_>) {
        self.push("q", vec![]);
        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![Object::Name(paint.font.as_bytes().to_vec()), Object::Real(paint.size)],
        );
        self.push("rg", rgb(paint.color));
        if paint.bold {
            self.push("RG", rgb(paint.color));
            self.push("w", vec![Object::Real(paint.size * 0.04)]);
            self.push("Tr", vec![Object::Integer(2)]);
        }
        self.push("Td", reals(&[x, y]));
        self.push("Tj", vec![encoded]);
        self.push("ET", vec![]);
        self.push("Q", vec![]);
    }

    /// Paint the named image XObject into the given rectangle.
    pub fn image(&mut self, name: &str, x: f32, y: f32, width: f32, height: f32) {
        self.push("q", vec![]);
        self.push("cm", reals(&[width, 0.0, 0.0, height, x, y]));
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }

    /// Encode the operations as a content stream body.
    pub fn encode(self) -> Result<Vec<u8>, InvoiceError> {
        Content {
            operations: self.operations,
        }
        .encode()
        .map_err(|e| InvoiceError::Pdf(format!("failed to encode page content: {e}")))
    }
}
