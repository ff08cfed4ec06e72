//! Сохранение страницы в файл
//!
//! PDF: одностраничный документ, страница целиком занята JPEG-картинкой
//! (DCTDecode, DeviceGray), размер страницы вычисляется из DPI.
//! PNG: изображение как есть.

use crate::GeneratorError;
use image::codecs::jpeg::JpegEncoder;
use image::{GrayImage, ImageFormat};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

/// Формат выходного файла
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Pdf,
    Png,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Png => "png",
        }
    }
}

/// Параметры PDF
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfOptions {
    /// Разрешение, с которым пиксели переводятся в пункты
    pub dpi: f32,
    /// Качество JPEG (1-100)
    pub jpeg_quality: u8,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            dpi: 150.0,
            jpeg_quality: 95,
        }
    }
}

impl PdfOptions {
    /// Размер страницы в пунктах для изображения `width x height`
    pub fn page_size(&self, width: u32, height: u32) -> (f32, f32) {
        let dpi = if self.dpi > 0.0 { self.dpi } else { 72.0 };
        (width as f32 * 72.0 / dpi, height as f32 * 72.0 / dpi)
    }
}

/// Кодирование страницы в PDF
pub fn encode_pdf(img: &GrayImage, options: &PdfOptions) -> Result<Vec<u8>, GeneratorError> {
    let (width, height) = img.dimensions();
    let (page_w, page_h) = options.page_size(width, height);

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, options.jpeg_quality.clamp(1, 100)).encode_image(img)?;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    ));

    // Картинка растягивается на всю страницу
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    page_w.into(),
                    0.into(),
                    0.into(),
                    page_h.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), page_w.into(), page_h.into()],
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Кодирование страницы в PNG
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>, GeneratorError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Запись страницы в файл выбранного формата
pub fn write_document(
    img: &GrayImage,
    path: &Path,
    format: DocumentFormat,
    options: &PdfOptions,
) -> Result<(), GeneratorError> {
    let bytes = match format {
        DocumentFormat::Pdf => encode_pdf(img, options)?,
        DocumentFormat::Png => encode_png(img)?,
    };

    std::fs::write(path, bytes).map_err(|source| GeneratorError::Write {
        path: path.to_path_buf(),
        source,
    })
}
