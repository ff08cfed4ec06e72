//! Resume Core - генератор тестового датасета для OCR
//!
//! Синтетические страницы резюме (履歴書) с контролируемыми дефектами:
//! - Случайные персональные данные из фиксированных списков
//! - Отрисовка шаблона разными шрифтами и размерами
//! - Деградация (выцветание, пятна, размытие, наклон)
//! - Сохранение в PDF/PNG и манифест JSONL с эталонным текстом

pub mod config;
pub mod degrade;
pub mod document;
pub mod generator;
pub mod manifest;
pub mod person;
pub mod render;
pub mod variation;

pub use config::{default_plan, parse_plan, FontConfig, GeneratorConfig, PlanEntry};
pub use degrade::{apply_filters, Filter, NoiseParams};
pub use document::{DocumentFormat, PdfOptions};
pub use generator::{plan_jobs, BatchSummary, DatasetGenerator, GeneratedPage, Job};
pub use manifest::{read_manifest, ManifestRecord, ManifestWriter};
pub use person::Person;
pub use render::{PageLayout, RenderedPage, TemplateRenderer, Typefaces};
pub use variation::{Difficulty, RenderStyle, TypefaceChoice, Variation, VariationProfile};

use std::path::PathBuf;
use thiserror::Error;

/// Основные ошибки генератора
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Font file not found: {}", .path.display())]
    FontNotFound { path: PathBuf },

    #[error("Failed to read font file {}: {source}", .path.display())]
    FontRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid font file: {}", .path.display())]
    InvalidFont { path: PathBuf },

    #[error("Output directory is not writable: {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported variation: {0}")]
    UnknownVariation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
