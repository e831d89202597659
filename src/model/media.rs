//! Image payload model structures.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::io::Cursor;

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// Resolution assumed for images that do not carry their own.
pub const DEFAULT_DPI: u32 = 72;

/// Convert a pixel length at `dpi` to EMUs.
pub fn px_to_emu(px: u32, dpi: u32) -> i64 {
    let dpi = if dpi == 0 { DEFAULT_DPI } else { dpi };
    i64::from(px) * EMU_PER_INCH / i64::from(dpi)
}

/// Lowercase hex SHA-1 of a byte slice.
pub fn sha1_hex(data: &[u8]) -> String {
    format!("{:x}", Sha1::digest(data))
}

/// A raster image supplied for insertion into a document.
#[derive(Debug, Clone)]
pub struct Image {
    data: Vec<u8>,
    extension: &'static str,
    content_type: &'static str,
    width_px: u32,
    height_px: u32,
}

impl Image {
    /// Sniff the format and pixel size of `data`.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&data)?;
        let extension = format
            .extensions_str()
            .first()
            .copied()
            .ok_or_else(|| Error::UnrecognizedImage(format!("{:?} has no extension", format)))?;
        let (width_px, height_px) = image::ImageReader::with_format(Cursor::new(&data), format)
            .into_dimensions()?;

        Ok(Self {
            content_type: format.to_mime_type(),
            data,
            extension,
            width_px,
            height_px,
        })
    }

    /// Raw image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Preferred file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        self.extension
    }

    /// MIME content type.
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Pixel dimensions as `(width, height)`.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    /// Size at `dpi` in EMUs as `(cx, cy)`.
    pub fn native_size_emu(&self, dpi: u32) -> (i64, i64) {
        (px_to_emu(self.width_px, dpi), px_to_emu(self.height_px, dpi))
    }

    /// Hex SHA-1 of the image bytes.
    pub fn sha1(&self) -> String {
        sha1_hex(&self.data)
    }
}

/// A binary part stored in the package and reached through a relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePart {
    /// Package path of the part (e.g. `word/media/image1.png`)
    pub partname: String,

    /// MIME type guessed from the part name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Binary data
    #[serde(skip)]
    pub data: Vec<u8>,

    /// Size in bytes
    pub size: usize,
}

impl ImagePart {
    /// Wrap the bytes of a package part.
    pub fn new(partname: impl Into<String>, data: Vec<u8>) -> Self {
        let partname = partname.into();
        Self {
            content_type: Self::mime_from_filename(&partname),
            size: data.len(),
            partname,
            data,
        }
    }

    /// File name portion of the part name.
    pub fn filename(&self) -> &str {
        self.partname.rsplit('/').next().unwrap_or(&self.partname)
    }

    /// Get the file extension for this part.
    pub fn extension(&self) -> Option<&str> {
        self.filename()
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| ext.len() <= 5 && ext.chars().all(|c| c.is_alphanumeric()))
    }

    /// Hex SHA-1 of the part bytes.
    pub fn sha1(&self) -> String {
        sha1_hex(&self.data)
    }

    /// Decode the pixel dimensions of the payload.
    pub fn pixel_size(&self) -> Result<(u32, u32)> {
        let dims = image::ImageReader::new(Cursor::new(&self.data))
            .with_guessed_format()?
            .into_dimensions()?;
        Ok(dims)
    }

    /// Determine MIME type from filename.
    pub fn mime_from_filename(filename: &str) -> Option<String> {
        let ext = filename.rsplit_once('.')?.1.to_lowercase();
        let mime = match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "bmp" => "image/bmp",
            "tiff" | "tif" => "image/tiff",
            "svg" => "image/svg+xml",
            "wmf" => "image/x-wmf",
            "emf" => "image/x-emf",
            "webp" => "image/webp",
            _ => return None,
        };
        Some(mime.to_string())
    }

    /// Save the part to a file.
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        std::fs::write(path, &self.data)
    }
}
