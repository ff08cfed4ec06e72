//! Модуль деградации изображений
//!
//! Имитация дефектов сканирования поверх отрисованной страницы:
//! - Выцветание чернил (fade)
//! - Пятна и пыль (noise)
//! - Размытие по Гауссу (blur)
//! - Наклон страницы (rotate)
//!
//! Порядок применения фиксирован: fade → noise → blur → rotate,
//! независимо от порядка объявления фильтров. Размеры изображения
//! не меняются ни одним фильтром.

use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_ellipse_mut};
use imageproc::filter::gaussian_blur_f32;
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Параметры пятен и пыли
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Количество мелких точек (min, max)
    pub specks: (u32, u32),
    /// Размер точки в пикселях
    pub speck_size: (u32, u32),
    /// Яркость точки
    pub speck_gray: (u8, u8),
    /// Количество крупных пятен
    pub blots: (u32, u32),
    pub blot_width: (u32, u32),
    pub blot_height: (u32, u32),
    pub blot_gray: (u8, u8),
}

impl NoiseParams {
    /// Пыль и бледные пятна старой бумаги
    pub const PAPER_STAINS: NoiseParams = NoiseParams {
        specks: (50, 150),
        speck_size: (1, 3),
        speck_gray: (180, 220),
        blots: (3, 8),
        blot_width: (20, 60),
        blot_height: (10, 30),
        blot_gray: (230, 245),
    };
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self::PAPER_STAINS
    }
}

/// Фильтр деградации
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    /// Осветление: чёрный становится `255 * alpha`
    Fade { alpha: f32 },
    /// Пятна и пыль
    Noise(NoiseParams),
    /// Размытие по Гауссу
    Blur { sigma: f32 },
    /// Поворот на случайный угол из диапазона (градусы, против часовой)
    Rotate { min_degrees: f32, max_degrees: f32 },
}

impl Filter {
    /// Позиция фильтра в конвейере
    pub fn stage(&self) -> u8 {
        match self {
            Filter::Fade { .. } => 0,
            Filter::Noise(_) => 1,
            Filter::Blur { .. } => 2,
            Filter::Rotate { .. } => 3,
        }
    }

    /// Применение одного фильтра
    pub fn apply<R: Rng + ?Sized>(&self, img: &GrayImage, rng: &mut R) -> GrayImage {
        match *self {
            Filter::Fade { alpha } => fade(img, alpha),
            Filter::Noise(params) => add_noise(img, &params, rng),
            Filter::Blur { sigma } => blur(img, sigma),
            Filter::Rotate { min_degrees, max_degrees } => {
                let degrees = if min_degrees < max_degrees {
                    rng.gen_range(min_degrees..=max_degrees)
                } else {
                    min_degrees
                };
                log::debug!("Rotating page by {:.2} degrees", degrees);
                rotate(img, degrees)
            }
        }
    }
}

/// Применение набора фильтров в фиксированном порядке
pub fn apply_filters<R: Rng + ?Sized>(
    img: &GrayImage,
    filters: &[Filter],
    rng: &mut R,
) -> GrayImage {
    let mut ordered: Vec<&Filter> = filters.iter().collect();
    ordered.sort_by_key(|f| f.stage());

    let mut result = img.clone();
    for filter in ordered {
        log::debug!("Applying filter {:?}", filter);
        result = filter.apply(&result, rng);
    }
    result
}

/// Осветление всей страницы к белому
pub fn fade(img: &GrayImage, alpha: f32) -> GrayImage {
    let alpha = alpha.clamp(0.0, 1.0);
    let mut result = img.clone();

    for p in result.pixels_mut() {
        let value = p.0[0] as f32;
        p.0[0] = (value + (255.0 - value) * alpha).round() as u8;
    }

    result
}

/// Размытие; sigma <= 0 оставляет изображение как есть
pub fn blur(img: &GrayImage, sigma: f32) -> GrayImage {
    if sigma <= 0.0 || img.width() == 0 || img.height() == 0 {
        return img.clone();
    }
    gaussian_blur_f32(img, sigma)
}

/// Поворот вокруг центра без расширения холста, углы заполняются белым
pub fn rotate(img: &GrayImage, degrees: f32) -> GrayImage {
    if degrees == 0.0 {
        return img.clone();
    }
    // imageproc rotates clockwise for positive theta
    rotate_about_center(
        img,
        -degrees.to_radians(),
        Interpolation::Bicubic,
        Luma([255]),
    )
}

/// Пятна поверх страницы: сначала мелкие точки, затем крупные пятна
pub fn add_noise<R: Rng + ?Sized>(
    img: &GrayImage,
    params: &NoiseParams,
    rng: &mut R,
) -> GrayImage {
    let mut result = img.clone();
    let (width, height) = result.dimensions();
    if width == 0 || height == 0 {
        return result;
    }

    let specks = sample(rng, params.specks);
    for _ in 0..specks {
        let x = rng.gen_range(0..width) as i32;
        let y = rng.gen_range(0..height) as i32;
        let gray = sample(rng, params.speck_gray);
        let size = sample(rng, params.speck_size) as i32;

        let radius = ((size + 1) / 2).max(1);
        draw_filled_circle_mut(&mut result, (x + size / 2, y + size / 2), radius, Luma([gray]));
    }

    let blots = sample(rng, params.blots);
    for _ in 0..blots {
        let x = inset_coordinate(rng, width, 50, 100);
        let y = inset_coordinate(rng, height, 50, 100);
        let w = sample(rng, params.blot_width) as i32;
        let h = sample(rng, params.blot_height) as i32;
        let gray = sample(rng, params.blot_gray);

        draw_filled_ellipse_mut(
            &mut result,
            (x + w / 2, y + h / 2),
            (w / 2).max(1),
            (h / 2).max(1),
            Luma([gray]),
        );
    }

    log::debug!("Added {} specks and {} blots", specks, blots);
    result
}

fn sample<T, R>(rng: &mut R, (lo, hi): (T, T)) -> T
where
    T: rand::distributions::uniform::SampleUniform + PartialOrd + Copy,
    R: Rng + ?Sized,
{
    if lo < hi {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

/// Координата с отступами от краёв; на маленьких страницах отступы игнорируются
fn inset_coordinate<R: Rng + ?Sized>(rng: &mut R, extent: u32, lead: u32, trail: u32) -> i32 {
    if extent > lead + trail {
        rng.gen_range(lead..=extent - trail) as i32
    } else {
        rng.gen_range(0..extent) as i32
    }
}
