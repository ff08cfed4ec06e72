//! Пакетная генерация датасета
//!
//! Для каждого элемента плана: случайная запись → отрисовка → фильтры →
//! файл документа → строка манифеста. Любая ошибка ввода-вывода
//! прерывает запуск.

use crate::config::{GeneratorConfig, PlanEntry};
use crate::degrade::apply_filters;
use crate::document::{write_document, DocumentFormat};
use crate::manifest::{storage_uri, ManifestRecord, ManifestWriter};
use crate::person::Person;
use crate::render::{TemplateRenderer, Typefaces};
use crate::variation::{TypefaceChoice, Variation};
use crate::GeneratorError;
use image::GrayImage;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::path::PathBuf;

/// Один файл в очереди генерации
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Порядковый номер с 1, сквозной по всем вариациям
    pub index: usize,
    pub variation: Variation,
    pub file_name: String,
}

/// Раскладка плана в упорядоченный список файлов
pub fn plan_jobs(plan: &[PlanEntry], format: DocumentFormat) -> Vec<Job> {
    plan.iter()
        .flat_map(|entry| std::iter::repeat(entry.variation).take(entry.count as usize))
        .enumerate()
        .map(|(i, variation)| Job {
            index: i + 1,
            variation,
            file_name: format!("resume_{:03}_{}.{}", i + 1, variation, format.extension()),
        })
        .collect()
}

/// Сгенерированная страница
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub person: Person,
    pub image: GrayImage,
    pub truncated: bool,
}

/// Итог запуска
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Seed, с которым можно повторить запуск
    pub seed: u64,
    pub records: Vec<ManifestRecord>,
    pub files: Vec<PathBuf>,
    pub manifest_path: PathBuf,
}

impl BatchSummary {
    /// Количество файлов по вариациям в порядке первого появления
    pub fn per_variation(&self) -> Vec<(Variation, usize)> {
        let mut counts: Vec<(Variation, usize)> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|(v, _)| *v == record.variation) {
                Some((_, n)) => *n += 1,
                None => counts.push((record.variation, 1)),
            }
        }
        counts
    }
}

/// Генератор датасета
pub struct DatasetGenerator {
    config: GeneratorConfig,
    renderer: TemplateRenderer,
}

impl DatasetGenerator {
    /// Создание генератора; шрифты загружаются сразу
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        let typefaces = Typefaces::load(&config.fonts)?;

        let wants_handwriting = config.plan.iter().any(|e| {
            e.count > 0 && e.variation.profile().style.typeface == TypefaceChoice::Handwriting
        });
        if wants_handwriting && !typefaces.has_handwriting() {
            log::warn!(
                "No handwriting font configured, handwritten pages fall back to the serif font"
            );
        }

        let renderer = TemplateRenderer::new(config.layout.clone(), typefaces);
        Ok(Self { config, renderer })
    }

    /// Отрисовка и деградация одной страницы
    pub fn generate_page<R: Rng + ?Sized>(
        &self,
        variation: Variation,
        rng: &mut R,
    ) -> GeneratedPage {
        let profile = variation.profile();
        let person = Person::random(rng);

        let rendered = self.renderer.render(&person, &profile.style);
        let image = apply_filters(&rendered.image, profile.filters, rng);

        GeneratedPage {
            person,
            image,
            truncated: rendered.truncated,
        }
    }

    /// Запуск с seed из конфигурации (или случайным)
    pub fn run(&self) -> Result<BatchSummary, GeneratorError> {
        let seed = self.config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        self.run_with_seed(seed)
    }

    /// Запуск с заданным seed
    pub fn run_with_seed(&self, seed: u64) -> Result<BatchSummary, GeneratorError> {
        let config = &self.config;
        let jobs = plan_jobs(&config.plan, config.format);
        log::info!(
            "Generating {} documents into {} (seed {})",
            jobs.len(),
            config.output_dir.display(),
            seed
        );

        std::fs::create_dir_all(&config.output_dir).map_err(|source| GeneratorError::OutputDir {
            path: config.output_dir.clone(),
            source,
        })?;
        let mut manifest = ManifestWriter::create(&config.manifest_path)?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut records = Vec::with_capacity(jobs.len());
        let mut files = Vec::with_capacity(jobs.len());

        for job in &jobs {
            let page = self.generate_page(job.variation, &mut rng);
            if page.truncated {
                log::warn!("{}: value text truncated on the page", job.file_name);
            }

            let path = config.output_dir.join(&job.file_name);
            write_document(&page.image, &path, config.format, &config.pdf)?;

            let record = ManifestRecord {
                input_pdf: storage_uri(&config.storage_prefix, &job.file_name),
                target: page.person.ground_truth(),
                variation: job.variation,
                difficulty: job.variation.difficulty(),
            };
            manifest.append(&record)?;

            log::info!("Generated: {}", job.file_name);
            records.push(record);
            files.push(path);
        }

        let written = manifest.finish()?;
        log::info!("Saved manifest: {} ({} records)", config.manifest_path.display(), written);

        Ok(BatchSummary {
            seed,
            records,
            files,
            manifest_path: config.manifest_path.clone(),
        })
    }
}
