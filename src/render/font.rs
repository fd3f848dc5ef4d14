//! Fonts: the measuring/encoding interface used by layout, and TrueType
//! embedding.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use lopdf::{Dictionary, Object, Stream, StringFormat, dictionary};
use owned_ttf_parser::{AsFaceRef as _, Face, GlyphId, OwnedFace};

use crate::core::InvoiceError;

/// A font as seen by layout and PDF assembly.
pub trait Typeface {
    /// Advance width of `text` set at `size` points.
    fn text_width(&self, text: &str, size: f32) -> f32;

    /// Distance from the baseline to the top of the tallest glyphs, in points.
    fn ascent(&self, size: f32) -> f32;

    /// Distance from the baseline to the bottom of descenders, in points
    /// (negative).
    fn descent(&self, size: f32) -> f32;

    /// Encode `text` as the string operand of a `Tj` operator.
    fn encode(&self, text: &str) -> Object;

    /// Add the font program and its descriptors to `document`, returning the
    /// font dictionary to reference from page resources.
    fn embed(&self, document: &mut lopdf::Document) -> Result<Dictionary, InvoiceError>;
}

/// A TrueType font embedded as a Type0 font with `Identity-H` encoding, so any
/// glyph in the font (including `₹`) can be shown.
#[derive(Clone, Debug)]
pub struct TtfFont {
    bytes: Arc<Vec<u8>>,
    face: Arc<OwnedFace>,
    units_per_em: u16,
    base_font: String,
}

impl TtfFont {
    /// Load a font file.
    pub fn from_path(path: &Path) -> Result<Self, InvoiceError> {
        let bytes = std::fs::read(path).map_err(|e| {
            InvoiceError::Asset(format!("failed to read font {}: {e}", path.display()))
        })?;
        let base_font = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(sanitize_font_name)
            .unwrap_or_else(|| "CustomFont".to_string());
        Self::from_bytes(bytes, base_font)
    }

    /// Parse font data. `base_font` becomes the PDF `BaseFont` name.
    pub fn from_bytes(bytes: Vec<u8>, base_font: impl Into<String>) -> Result<Self, InvoiceError> {
        let face = OwnedFace::from_vec(bytes.clone(), 0)
            .map_err(|e| InvoiceError::Font(format!("failed to parse font: {e}")))?;
        let units_per_em = face.as_face_ref().units_per_em();
        Ok(Self {
            bytes: Arc::new(bytes),
            face: Arc::new(face),
            units_per_em,
            base_font: base_font.into(),
        })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    /// Glyph for `character`, or `.notdef` when the font lacks it.
    fn glyph_id(&self, character: char) -> u16 {
        self.face()
            .glyph_index(character)
            .map(|id| id.0)
            .unwrap_or(0)
    }

    fn advance(&self, glyph_id: u16) -> Option<u16> {
        self.face().glyph_hor_advance(GlyphId(glyph_id))
    }

    fn scale(&self, units: f32, size: f32) -> f32 {
        units * size / f32::from(self.units_per_em)
    }

    /// Glyph id → first Unicode character mapped to it, from the font's
    /// Unicode cmap subtables.
    fn glyph_to_char(&self) -> BTreeMap<u16, char> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|s| s.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Some(character) = char::from_u32(codepoint) else {
                    return;
                };
                if let Some(glyph) = subtable.glyph_index(codepoint).filter(|g| g.0 > 0) {
                    map.entry(glyph.0).or_insert(character);
                }
            });
        }
        map
    }

    /// The `W` array: runs of consecutive glyph ids with their widths in
    /// 1/1000 em.
    fn width_array(&self) -> Vec<Object> {
        let per_mille = 1000.0 / f32::from(self.units_per_em);
        let mut widths = Vec::new();
        let mut run_start = 0u16;
        let mut run: Vec<Object> = Vec::new();

        for glyph_id in 0..self.face().number_of_glyphs() {
            match self.advance(glyph_id) {
                Some(advance) => {
                    if run.is_empty() {
                        run_start = glyph_id;
                    }
                    run.push(Object::Integer((f32::from(advance) * per_mille) as i64));
                }
                None => {
                    log::warn!(
                        "glyph {glyph_id} of {} has no advance width",
                        self.base_font
                    );
                    if !run.is_empty() {
                        widths.push(Object::Integer(i64::from(run_start)));
                        widths.push(Object::Array(std::mem::take(&mut run)));
                    }
                }
            }
        }
        if !run.is_empty() {
            widths.push(Object::Integer(i64::from(run_start)));
            widths.push(Object::Array(run));
        }
        widths
    }

    fn bounding_box(&self) -> Vec<Object> {
        let bbox = self.face().global_bounding_box();
        [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max]
            .into_iter()
            .map(|v| Object::Integer(i64::from(v)))
            .collect()
    }
}

impl Typeface for TtfFont {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(self.advance(self.glyph_id(c)).unwrap_or(0)))
            .sum();
        self.scale(units as f32, size)
    }

    fn ascent(&self, size: f32) -> f32 {
        self.scale(f32::from(self.face().ascender()), size)
    }

    fn descent(&self, size: f32) -> f32 {
        self.scale(f32::from(self.face().descender()), size)
    }

    fn encode(&self, text: &str) -> Object {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for character in text.chars() {
            let glyph_id = self.glyph_id(character);
            if glyph_id == 0 && !character.is_whitespace() {
                log::warn!("{} has no glyph for {character:?}", self.base_font);
            }
            bytes.extend_from_slice(&glyph_id.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }

    fn embed(&self, document: &mut lopdf::Document) -> Result<Dictionary, InvoiceError> {
        let font_file_id = document.add_object(Stream::new(
            dictionary! {
                "Length1" => Object::Integer(self.bytes.len() as i64),
            },
            self.bytes.as_ref().clone(),
        ));

        let ascent = i64::from(self.face().ascender());
        let descent = i64::from(self.face().descender());
        let cap_height = self
            .face()
            .capital_height()
            .map(i64::from)
            .unwrap_or(ascent);
        let descriptor_id = document.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => Object::Name(self.base_font.clone().into_bytes()),
            "Flags" => Object::Integer(32),
            "FontBBox" => Object::Array(self.bounding_box()),
            "ItalicAngle" => Object::Integer(0),
            "Ascent" => Object::Integer(ascent),
            "Descent" => Object::Integer(descent),
            "CapHeight" => Object::Integer(cap_height),
            "StemV" => Object::Integer(80),
            "FontFile2" => Object::Reference(font_file_id),
        });

        let descendant = dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => Object::Name(self.base_font.clone().into_bytes()),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => Object::Integer(0),
            },
            "FontDescriptor" => Object::Reference(descriptor_id),
            "W" => Object::Array(self.width_array()),
            "DW" => Object::Integer(1000),
            "CIDToGIDMap" => "Identity",
        };

        let to_unicode = to_unicode_cmap(&self.base_font, &self.glyph_to_char());
        let to_unicode_id = document.add_object(Stream::new(Dictionary::new(), to_unicode.into_bytes()));

        Ok(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => Object::Name(self.base_font.clone().into_bytes()),
            "Encoding" => "Identity-H",
            "DescendantFonts" => Object::Array(vec![Object::Dictionary(descendant)]),
            "ToUnicode" => Object::Reference(to_unicode_id),
        })
    }
}

/// PDF names may not contain whitespace or delimiters.
fn sanitize_font_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
        .collect();
    if cleaned.is_empty() {
        "CustomFont".to_string()
    } else {
        cleaned
    }
}

/// Build a ToUnicode CMap so viewers can extract and search the text.
///
/// `bfchar` sections hold at most 100 entries each.
fn to_unicode_cmap(name: &str, glyphs: &BTreeMap<u16, char>) -> String {
    let mut cmap = format!(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /{name}-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n"
    );

    let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
    for block in entries.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", block.len()));
        for (glyph_id, character) in block {
            let mut utf16 = [0u16; 2];
            let hex: String = character
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04X}"))
                .collect();
            cmap.push_str(&format!("<{glyph_id:04X}> <{hex}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );
    cmap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_names_are_sanitized() {
        assert_eq!(sanitize_font_name("Noto Sans (Regular)"), "NotoSansRegular");
        assert_eq!(sanitize_font_name("DejaVuSans-Bold"), "DejaVuSans-Bold");
        assert_eq!(sanitize_font_name("   "), "CustomFont");
    }

    #[test]
    fn cmap_maps_rupee_sign() {
        let glyphs = BTreeMap::from([(3u16, 'A'), (250u16, '₹')]);
        let cmap = to_unicode_cmap("Test", &glyphs);
        assert!(cmap.contains("2 beginbfchar"));
        assert!(cmap.contains("<0003> <0041>"));
        assert!(cmap.contains("<00FA> <20B9>"));
        assert!(cmap.trim_end().ends_with("end"));
    }

    #[test]
    fn cmap_uses_surrogate_pairs_outside_bmp() {
        let glyphs = BTreeMap::from([(7u16, '𝄞')]);
        let cmap = to_unicode_cmap("Test", &glyphs);
        assert!(cmap.contains("<0007> <D834DD1E>"));
    }

    #[test]
    fn cmap_splits_blocks_at_one_hundred() {
        let glyphs: BTreeMap<u16, char> = (1..=150u16)
            .map(|id| (id, char::from_u32(0x40 + u32::from(id)).unwrap()))
            .collect();
        let cmap = to_unicode_cmap("Test", &glyphs);
        assert!(cmap.contains("100 beginbfchar"));
        assert!(cmap.contains("50 beginbfchar"));
    }

    #[test]
    fn missing_font_file_is_an_asset_error() {
        let err = TtfFont::from_path(Path::new("/no/such/fonts.ttf")).unwrap_err();
        assert!(matches!(err, InvoiceError::Asset(_)));
    }

    fn dejavu() -> TtfFont {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf");
        TtfFont::from_path(&path).unwrap()
    }

    #[test]
    fn base_font_comes_from_file_stem() {
        assert_eq!(dejavu().base_font, "DejaVuSans");
    }

    #[test]
    fn rupee_sign_has_a_glyph() {
        let font = dejavu();
        let glyph = font.glyph_id('₹');
        assert_ne!(glyph, 0);
        assert_eq!(font.glyph_to_char().get(&glyph), Some(&'₹'));

        match font.encode("₹1") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(bytes.len(), 4);
                assert_eq!(&bytes[..2], &glyph.to_be_bytes());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn measures_proportionally() {
        let font = dejavu();
        assert!(font.text_width("W", 10.0) > font.text_width("i", 10.0));
        assert_eq!(font.text_width("", 10.0), 0.0);
        assert!((font.text_width("ab", 20.0) - 2.0 * font.text_width("ab", 10.0)).abs() < 1e-3);
        assert!(font.ascent(10.0) > 0.0);
        assert!(font.descent(10.0) < 0.0);
    }

    #[test]
    fn width_array_alternates_start_and_run() {
        let widths = dejavu().width_array();
        assert!(!widths.is_empty());
        assert_eq!(widths.len() % 2, 0);
        for pair in widths.chunks(2) {
            assert!(matches!(pair[0], Object::Integer(_)));
            assert!(matches!(&pair[1], Object::Array(run) if !run.is_empty()));
        }
    }

    #[test]
    fn embeds_type0_with_cid_descendant() {
        let font = dejavu();
        let mut document = lopdf::Document::with_version("1.5");
        let dict = font.embed(&mut document).unwrap();

        assert_eq!(dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Type0");
        assert_eq!(dict.get(b"Encoding").unwrap().as_name().unwrap(), b"Identity-H");
        assert!(dict.get(b"ToUnicode").unwrap().as_reference().is_ok());

        let descendants = dict.get(b"DescendantFonts").unwrap().as_array().unwrap();
        let Object::Dictionary(cid) = &descendants[0] else {
            panic!("descendant font is not inline");
        };
        assert_eq!(cid.get(b"Subtype").unwrap().as_name().unwrap(), b"CIDFontType2");

        let descriptor_id = cid.get(b"FontDescriptor").unwrap().as_reference().unwrap();
        let descriptor = document.get_dictionary(descriptor_id).unwrap();
        let file_id = descriptor.get(b"FontFile2").unwrap().as_reference().unwrap();
        let file = document.get_object(file_id).unwrap().as_stream().unwrap();
        assert_eq!(file.content.len(), font.bytes.len());
    }

    #[test]
    fn garbage_bytes_are_a_font_error() {
        let err = TtfFont::from_bytes(b"definitely not a font".to_vec(), "Bad").unwrap_err();
        assert!(matches!(err, InvoiceError::Font(_)));
    }
}
