//! Renders one PNG page per variation for eyeballing the degradations
//!
//! Usage: cargo run -p resume-core --example render_variations [serif.ttf] [sans.ttf]

use rand::SeedableRng;
use rand_pcg::Pcg32;
use resume_core::{document, DatasetGenerator, FontConfig, GeneratorConfig, Variation};
use std::path::{Path, PathBuf};

fn main() -> Result<(), resume_core::GeneratorError> {
    let mut args = std::env::args().skip(1);
    let mut fonts = FontConfig::default();
    if let Some(serif) = args.next() {
        fonts.sans = PathBuf::from(&serif);
        fonts.serif = PathBuf::from(serif);
    }
    if let Some(sans) = args.next() {
        fonts.sans = PathBuf::from(sans);
    }

    let output_dir = Path::new("generated_pages");
    std::fs::create_dir_all(output_dir)?;
    println!("Rendering variations into {:?}", output_dir);

    let generator = DatasetGenerator::new(GeneratorConfig {
        fonts,
        ..Default::default()
    })?;
    let mut rng = Pcg32::seed_from_u64(1);

    for variation in Variation::ALL {
        let page = generator.generate_page(variation, &mut rng);
        let path = output_dir.join(format!("{}.png", variation));
        std::fs::write(&path, document::encode_png(&page.image)?)?;
        println!("  {} ({}): {}", variation, variation.difficulty(), page.person.full_name());
    }

    println!("Rendered {} pages.", Variation::ALL.len());
    Ok(())
}
