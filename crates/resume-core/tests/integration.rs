//! Integration tests for dataset generation
//!
//! Rendering needs a real TrueType font. The tests look for the IPAex fonts
//! first, then for any .ttf/.otf under the usual system font directories, and
//! skip themselves when none is installed.

use resume_core::{
    read_manifest, DatasetGenerator, Difficulty, DocumentFormat, FontConfig, GeneratorConfig,
    GeneratorError, PlanEntry, Variation,
};
use std::path::{Path, PathBuf};

const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
];

fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .is_test(true)
        .try_init();
}

fn find_font_in(dir: &Path, depth: u32) -> Option<PathBuf> {
    if depth == 0 {
        return None;
    }
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    for path in &entries {
        let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        if path.is_file() && matches!(ext.as_deref(), Some("ttf") | Some("otf")) {
            if let Ok(bytes) = std::fs::read(path) {
                if ab_glyph::FontVec::try_from_vec(bytes).is_ok() {
                    return Some(path.clone());
                }
            }
        }
    }
    entries
        .iter()
        .filter(|p| p.is_dir())
        .find_map(|p| find_font_in(p, depth - 1))
}

/// Fonts for tests: IPAex if installed, otherwise any system font for both faces
fn test_fonts() -> Option<FontConfig> {
    let defaults = FontConfig::default();
    if defaults.serif.is_file() && defaults.sans.is_file() {
        return Some(defaults);
    }

    let font = FONT_DIRS
        .iter()
        .find_map(|dir| find_font_in(Path::new(dir), 6))?;
    Some(FontConfig {
        serif: font.clone(),
        sans: font,
        handwriting: None,
    })
}

fn test_config(root: &Path, plan: Vec<PlanEntry>) -> Option<GeneratorConfig> {
    let fonts = match test_fonts() {
        Some(fonts) => fonts,
        None => {
            eprintln!("No TrueType font found, skipping");
            return None;
        }
    };

    Some(GeneratorConfig {
        fonts,
        output_dir: root.join("pdfs"),
        manifest_path: root.join("dataset.jsonl"),
        storage_prefix: "gs://test-bucket/resumes".to_string(),
        plan,
        seed: Some(2024),
        ..Default::default()
    })
}

#[test]
fn test_two_standard_two_noisy() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let plan = vec![
        PlanEntry::new(Variation::Standard, 2),
        PlanEntry::new(Variation::Noisy, 2),
    ];
    let Some(config) = test_config(dir.path(), plan) else {
        return;
    };
    let output_dir = config.output_dir.clone();

    let generator = DatasetGenerator::new(config).unwrap();
    let summary = generator.run().unwrap();
    assert_eq!(summary.seed, 2024);

    let records = read_manifest(&summary.manifest_path).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records, summary.records);

    let variations: Vec<Variation> = records.iter().map(|r| r.variation).collect();
    assert_eq!(
        variations,
        vec![Variation::Standard, Variation::Standard, Variation::Noisy, Variation::Noisy]
    );

    let files: Vec<_> = std::fs::read_dir(&output_dir).unwrap().collect();
    assert_eq!(files.len(), 4);

    for (record, path) in records.iter().zip(&summary.files) {
        let file_name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(record.input_pdf, format!("gs://test-bucket/resumes/{}", file_name));
        assert!(output_dir.join(file_name).is_file());

        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        assert!(record.target.starts_with("氏名: "));
        assert_eq!(record.target.lines().count(), 3);
    }
}

#[test]
fn test_fixed_seed_reproduces_ground_truth() {
    init_logger();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let plan = vec![
        PlanEntry::new(Variation::Tilted, 2),
        PlanEntry::new(Variation::Complex, 3),
    ];

    let Some(config_a) = test_config(first.path(), plan.clone()) else {
        return;
    };
    let Some(config_b) = test_config(second.path(), plan) else {
        return;
    };

    let a = DatasetGenerator::new(config_a).unwrap().run().unwrap();
    let b = DatasetGenerator::new(config_b).unwrap().run().unwrap();

    let targets_a: Vec<&str> = a.records.iter().map(|r| r.target.as_str()).collect();
    let targets_b: Vec<&str> = b.records.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets_a, targets_b);

    let manifest_a = std::fs::read(&a.manifest_path).unwrap();
    let manifest_b = std::fs::read(&b.manifest_path).unwrap();
    assert_eq!(manifest_a, manifest_b);
}

#[test]
fn test_default_plan_difficulties_and_png_output() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let Some(mut config) = test_config(dir.path(), resume_core::default_plan()) else {
        return;
    };
    config.format = DocumentFormat::Png;
    let (width, height) = (config.layout.width, config.layout.height);

    let summary = DatasetGenerator::new(config).unwrap().run().unwrap();
    assert_eq!(summary.records.len(), 20);
    assert_eq!(summary.per_variation().len(), 10);

    for record in &summary.records {
        assert_eq!(record.difficulty, record.variation.profile().difficulty);
    }
    assert_eq!(summary.records[0].difficulty, Difficulty::Easy);
    assert_eq!(summary.records[19].difficulty, Difficulty::Hard);

    for path in &summary.files {
        assert_eq!(path.extension().unwrap(), "png");
        let img = image::open(path).unwrap();
        assert_eq!((img.width(), img.height()), (width, height));
    }
}

#[test]
fn test_every_variation_keeps_page_size() {
    let dir = tempfile::tempdir().unwrap();
    let Some(config) = test_config(dir.path(), Vec::new()) else {
        return;
    };
    let (width, height) = (config.layout.width, config.layout.height);
    let generator = DatasetGenerator::new(config).unwrap();

    use rand::SeedableRng;
    let mut rng = rand_pcg::Pcg32::seed_from_u64(5);
    for variation in Variation::ALL {
        let page = generator.generate_page(variation, &mut rng);
        assert_eq!(page.image.dimensions(), (width, height), "{}", variation);
        assert!(!page.truncated, "{}", variation);
        // something was drawn
        assert!(page.image.pixels().any(|p| p.0[0] < 230), "{}", variation);
    }
}

#[test]
fn test_missing_font_is_fatal() {
    let config = GeneratorConfig {
        fonts: FontConfig {
            serif: PathBuf::from("/definitely/missing/mincho.ttf"),
            sans: PathBuf::from("/definitely/missing/gothic.ttf"),
            handwriting: None,
        },
        ..Default::default()
    };

    let err = DatasetGenerator::new(config).err().unwrap();
    assert!(matches!(err, GeneratorError::FontNotFound { .. }));
    assert!(err.to_string().contains("/definitely/missing/mincho.ttf"));
}

#[test]
fn test_missing_handwriting_font_is_fatal() {
    let Some(mut fonts) = test_fonts() else {
        return;
    };
    fonts.handwriting = Some(PathBuf::from("/definitely/missing/hand.ttf"));

    let config = GeneratorConfig {
        fonts,
        ..Default::default()
    };
    let err = DatasetGenerator::new(config).err().unwrap();
    assert!(err.to_string().contains("hand.ttf"));
}

#[test]
fn test_unwritable_output_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let plan = vec![PlanEntry::new(Variation::Standard, 1)];
    let Some(mut config) = test_config(dir.path(), plan) else {
        return;
    };
    // a regular file where the output directory should be
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"x").unwrap();
    config.output_dir = blocker.join("pdfs");

    let err = DatasetGenerator::new(config).unwrap().run().unwrap_err();
    match err {
        GeneratorError::OutputDir { path, .. } => assert!(path.ends_with("blocker/pdfs")),
        other => panic!("unexpected error: {}", other),
    }
}
