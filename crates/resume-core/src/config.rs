//! Конфигурация генератора
//!
//! Все параметры запуска передаются в генератор явно. Значения по
//! умолчанию дают 20 PDF (по 2 на каждую вариацию) в `outputs/`.

use crate::document::{DocumentFormat, PdfOptions};
use crate::render::PageLayout;
use crate::variation::Variation;
use crate::GeneratorError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Пути к файлам шрифтов
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Минтё (IPAex Mincho)
    pub serif: PathBuf,
    /// Готика (IPAex Gothic)
    pub sans: PathBuf,
    /// Рукописный шрифт; без него используется минтё
    pub handwriting: Option<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            serif: PathBuf::from("/usr/share/fonts/opentype/ipaexfont-mincho/ipaexm.ttf"),
            sans: PathBuf::from("/usr/share/fonts/opentype/ipaexfont-gothic/ipaexg.ttf"),
            handwriting: None,
        }
    }
}

/// Элемент плана: вариация и количество файлов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub variation: Variation,
    pub count: u32,
}

impl PlanEntry {
    pub fn new(variation: Variation, count: u32) -> Self {
        Self { variation, count }
    }
}

/// План по умолчанию: каждая вариация по 2 раза
pub fn default_plan() -> Vec<PlanEntry> {
    Variation::ALL
        .into_iter()
        .map(|variation| PlanEntry::new(variation, 2))
        .collect()
}

/// Разбор плана вида `standard=2,noisy=3`; без `=count` количество равно 1
pub fn parse_plan(input: &str) -> Result<Vec<PlanEntry>, GeneratorError> {
    let mut plan = Vec::new();

    for item in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (id, count) = match item.split_once('=') {
            Some((id, count)) => {
                let count = count.trim().parse::<u32>().map_err(|_| {
                    GeneratorError::Config(format!("invalid count in plan entry '{}'", item))
                })?;
                (id, count)
            }
            None => (item, 1),
        };
        plan.push(PlanEntry::new(id.parse()?, count));
    }

    if plan.is_empty() {
        return Err(GeneratorError::Config("plan is empty".to_string()));
    }

    Ok(plan)
}

/// Полная конфигурация запуска
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub fonts: FontConfig,
    /// Каталог для документов
    pub output_dir: PathBuf,
    /// Файл манифеста
    pub manifest_path: PathBuf,
    /// Префикс пути в хранилище для поля `input_pdf`
    pub storage_prefix: String,
    pub plan: Vec<PlanEntry>,
    /// Фиксированный seed; без него выбирается случайный и пишется в лог
    pub seed: Option<u64>,
    pub format: DocumentFormat,
    pub pdf: PdfOptions,
    pub layout: PageLayout,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            fonts: FontConfig::default(),
            output_dir: PathBuf::from("outputs/pdfs"),
            manifest_path: PathBuf::from("outputs/dataset.jsonl"),
            storage_prefix: "gs://your-bucket/resumes".to_string(),
            plan: default_plan(),
            seed: None,
            format: DocumentFormat::Pdf,
            pdf: PdfOptions::default(),
            layout: PageLayout::default(),
        }
    }
}

impl GeneratorConfig {
    /// Загрузка из JSON; отсутствующие поля берутся по умолчанию
    pub fn from_json_file(path: &Path) -> Result<Self, GeneratorError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GeneratorError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, GeneratorError> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config)
    }

    /// Общее число файлов по плану
    pub fn total_count(&self) -> usize {
        self.plan.iter().map(|entry| entry.count as usize).sum()
    }
}
