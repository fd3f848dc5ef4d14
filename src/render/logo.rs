use std::path::Path;

use image::{DynamicImage, GenericImageView as _};
use lopdf::{Object, ObjectId, Stream, dictionary};

use crate::core::InvoiceError;

/// A decoded raster logo, ready to be placed as an image XObject.
#[derive(Debug, Clone)]
pub struct Logo {
    width: u32,
    height: u32,
    /// 8-bit RGB samples, row-major.
    rgb: Vec<u8>,
    /// 8-bit alpha samples, present only when some pixel is not opaque.
    alpha: Option<Vec<u8>>,
}

impl Logo {
    /// Read and decode a PNG or JPEG file.
    pub fn open(path: &Path) -> Result<Self, InvoiceError> {
        let bytes = std::fs::read(path).map_err(|e| {
            InvoiceError::Asset(format!("failed to read logo {}: {e}", path.display()))
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InvoiceError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| InvoiceError::Image(format!("failed to decode logo: {e}")))?;
        Ok(Self::from_image(&image))
    }

    pub fn from_image(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let rgba = image.to_rgba8();

        let mut rgb = Vec::with_capacity(sample_count(width, height, 3));
        let mut alpha = Vec::with_capacity(sample_count(width, height, 1));
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }
        let alpha = alpha.iter().any(|a| *a < u8::MAX).then_some(alpha);

        Self {
            width,
            height,
            rgb,
            alpha,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn has_transparency(&self) -> bool {
        self.alpha.is_some()
    }

    /// Add the image (and its soft mask, if any) to `document`.
    pub fn embed(&self, document: &mut lopdf::Document) -> ObjectId {
        let mut image_dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(i64::from(self.width)),
            "Height" => Object::Integer(i64::from(self.height)),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => Object::Integer(8),
        };

        if let Some(alpha) = &self.alpha {
            let mask_id = document.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => Object::Integer(i64::from(self.width)),
                    "Height" => Object::Integer(i64::from(self.height)),
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => Object::Integer(8),
                },
                alpha.clone(),
            ));
            image_dict.set("SMask", Object::Reference(mask_id));
        }

        document.add_object(Stream::new(image_dict, self.rgb.clone()))
    }
}

/// Bytes needed for `channels` 8-bit samples per pixel.
fn sample_count(width: u32, height: u32, channels: usize) -> usize {
    width as usize * height as usize * channels
}
