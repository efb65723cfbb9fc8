use std::path::Path;

use anyhow::Context;
use bytes::Bytes;
use image::ImageFormat;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
const DEFAULT_EXTENSION: &str = "jpg";

/// Image types the `image` crate does not decode but the service accepts.
const EXTRA_IMAGE_TYPES: &[(&str, &str)] = &[
    ("svg", "image/svg+xml"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("jxl", "image/jxl"),
    ("jp2", "image/jp2"),
];

/// ISO-BMFF `ftyp` major brands of HEIF/HEIC stills.
const HEIF_BRANDS: &[(&[u8], &str)] = &[
    (b"heic", "image/heic"),
    (b"heix", "image/heic"),
    (b"mif1", "image/heif"),
    (b"msf1", "image/heif"),
];

/// A file chosen by the user for upload.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Build a selection, deriving the MIME type from the name or the content.
    pub fn from_parts(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let bytes = bytes.into();
        let content_type = detect_content_type(&name, &bytes);
        Self { name, content_type, bytes }
    }

    pub async fn read(path: &Path) -> anyhow::Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("Not a file path: {}", path.display()))?;

        Ok(Self::from_parts(name, bytes))
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Text after the last `.` of the name, `jpg` when there is none.
    pub fn extension(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext,
            _ => DEFAULT_EXTENSION,
        }
    }
}

fn detect_content_type(name: &str, bytes: &[u8]) -> String {
    let extension = Path::new(name).extension().and_then(|ext| ext.to_str());

    if let Some(mime) = extension.and_then(extra_type_for_extension) {
        return mime.to_string();
    }

    extension
        .and_then(ImageFormat::from_extension)
        .or_else(|| image::guess_format(bytes).ok())
        .map(|format| format.to_mime_type())
        .or_else(|| sniff_heif(bytes))
        .or_else(|| sniff_svg(bytes))
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string()
}

fn extra_type_for_extension(ext: &str) -> Option<&'static str> {
    EXTRA_IMAGE_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
}

fn sniff_heif(bytes: &[u8]) -> Option<&'static str> {
    if bytes.get(4..8)? != b"ftyp" {
        return None;
    }
    let brand = bytes.get(8..12)?;
    HEIF_BRANDS
        .iter()
        .find(|(known, _)| *known == brand)
        .map(|(_, mime)| *mime)
}

fn sniff_svg(bytes: &[u8]) -> Option<&'static str> {
    let head = &bytes[..bytes.len().min(512)];
    let head = std::str::from_utf8(head).ok()?;
    head.contains("<svg").then_some("image/svg+xml")
}
