//! Таблица вариаций
//!
//! Каждая вариация имитирует отдельный дефект скана и описывается
//! одной неизменяемой записью: стиль отрисовки, фильтры и уровень сложности.

use crate::degrade::{Filter, NoiseParams};
use crate::GeneratorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ожидаемая сложность распознавания
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Вариация страницы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variation {
    Standard,
    Handwritten,
    Faded,
    Tilted,
    Noisy,
    Blurred,
    HeavyLines,
    SmallFont,
    MixedFont,
    Complex,
}

/// Выбор шрифта для страницы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypefaceChoice {
    /// Минтё (с засечками)
    Serif,
    /// Рукописный шрифт, при отсутствии - минтё
    Handwriting,
    /// Готика, значения в чётных строках - минтё
    Mixed,
}

/// Параметры отрисовки шаблона
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub typeface: TypefaceChoice,
    /// Размер подписей в пикселях; значения на 2 больше
    pub font_size: u32,
    /// Толщина рамок и разделителей
    pub line_thickness: u32,
}

impl RenderStyle {
    const fn serif(font_size: u32) -> Self {
        Self {
            typeface: TypefaceChoice::Serif,
            font_size,
            line_thickness: 1,
        }
    }
}

/// Запись таблицы вариаций
#[derive(Debug, Clone, Serialize)]
pub struct VariationProfile {
    pub variation: Variation,
    pub difficulty: Difficulty,
    pub style: RenderStyle,
    pub filters: &'static [Filter],
}

static VARIATIONS: [VariationProfile; 10] = [
    VariationProfile {
        variation: Variation::Standard,
        difficulty: Difficulty::Easy,
        style: RenderStyle::serif(14),
        filters: &[],
    },
    VariationProfile {
        variation: Variation::Handwritten,
        difficulty: Difficulty::Medium,
        style: RenderStyle {
            typeface: TypefaceChoice::Handwriting,
            font_size: 14,
            line_thickness: 1,
        },
        filters: &[],
    },
    VariationProfile {
        variation: Variation::Faded,
        difficulty: Difficulty::Medium,
        style: RenderStyle::serif(14),
        // black ink ends up at gray 150
        filters: &[Filter::Fade { alpha: 150.0 / 255.0 }],
    },
    VariationProfile {
        variation: Variation::Tilted,
        difficulty: Difficulty::Medium,
        style: RenderStyle::serif(14),
        filters: &[Filter::Rotate { min_degrees: 1.5, max_degrees: 3.0 }],
    },
    VariationProfile {
        variation: Variation::Noisy,
        difficulty: Difficulty::Hard,
        style: RenderStyle::serif(14),
        filters: &[Filter::Noise(NoiseParams::PAPER_STAINS)],
    },
    VariationProfile {
        variation: Variation::Blurred,
        difficulty: Difficulty::Hard,
        style: RenderStyle::serif(14),
        filters: &[Filter::Blur { sigma: 1.2 }],
    },
    VariationProfile {
        variation: Variation::HeavyLines,
        difficulty: Difficulty::Medium,
        style: RenderStyle {
            typeface: TypefaceChoice::Serif,
            font_size: 14,
            line_thickness: 3,
        },
        filters: &[],
    },
    VariationProfile {
        variation: Variation::SmallFont,
        difficulty: Difficulty::Medium,
        style: RenderStyle::serif(9),
        filters: &[],
    },
    VariationProfile {
        variation: Variation::MixedFont,
        difficulty: Difficulty::Medium,
        style: RenderStyle {
            typeface: TypefaceChoice::Mixed,
            font_size: 14,
            line_thickness: 1,
        },
        filters: &[],
    },
    VariationProfile {
        variation: Variation::Complex,
        difficulty: Difficulty::Hard,
        style: RenderStyle::serif(12),
        filters: &[
            Filter::Fade { alpha: 120.0 / 255.0 },
            Filter::Noise(NoiseParams::PAPER_STAINS),
            Filter::Blur { sigma: 0.5 },
            Filter::Rotate { min_degrees: 1.0, max_degrees: 2.0 },
        ],
    },
];

impl Variation {
    /// Все вариации в порядке таблицы
    pub const ALL: [Variation; 10] = [
        Variation::Standard,
        Variation::Handwritten,
        Variation::Faded,
        Variation::Tilted,
        Variation::Noisy,
        Variation::Blurred,
        Variation::HeavyLines,
        Variation::SmallFont,
        Variation::MixedFont,
        Variation::Complex,
    ];

    /// Полная таблица вариаций
    pub fn table() -> &'static [VariationProfile] {
        &VARIATIONS
    }

    /// Запись таблицы для вариации
    pub fn profile(self) -> &'static VariationProfile {
        &VARIATIONS[self as usize]
    }

    pub fn difficulty(self) -> Difficulty {
        self.profile().difficulty
    }

    /// Идентификатор для имён файлов и манифеста
    pub fn id(self) -> &'static str {
        match self {
            Variation::Standard => "standard",
            Variation::Handwritten => "handwritten",
            Variation::Faded => "faded",
            Variation::Tilted => "tilted",
            Variation::Noisy => "noisy",
            Variation::Blurred => "blurred",
            Variation::HeavyLines => "heavy_lines",
            Variation::SmallFont => "small_font",
            Variation::MixedFont => "mixed_font",
            Variation::Complex => "complex",
        }
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Variation {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Variation::ALL
            .into_iter()
            .find(|v| v.id() == id)
            .ok_or_else(|| GeneratorError::UnknownVariation(id.to_string()))
    }
}
