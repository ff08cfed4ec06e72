//! Модуль отрисовки шаблона резюме
//!
//! Страница в оттенках серого: заголовок в рамке и три строки
//! «подпись | значение» с фиксированными координатами.

use crate::config::FontConfig;
use crate::person::Person;
use crate::variation::{RenderStyle, TypefaceChoice};
use crate::GeneratorError;
use ab_glyph::{FontVec, PxScale};
use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;

const INK: Luma<u8> = Luma([0]);
const PAPER: Luma<u8> = Luma([255]);

const TITLE: &str = "履 歴 書";
const FIELD_LABELS: [&str; 3] = ["氏　　名", "生年月日", "住　　所"];

/// Геометрия страницы в пикселях
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub width: u32,
    pub height: u32,
    /// Отступ рамок от левого и правого края
    pub margin: u32,
    pub title_top: u32,
    pub title_bottom: u32,
    pub title_font_size: u32,
    pub rows_top: u32,
    pub row_height: u32,
    /// X-координата разделителя подписи и значения
    pub divider_x: u32,
    pub label_offset: (u32, u32),
    pub value_offset: (u32, u32),
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            width: 595,
            height: 842,
            margin: 40,
            title_top: 40,
            title_bottom: 120,
            title_font_size: 24,
            rows_top: 150,
            row_height: 60,
            divider_x: 150,
            label_offset: (55, 18),
            value_offset: (165, 15),
        }
    }
}

impl PageLayout {
    /// Максимальная ширина текста в ячейке значения
    fn value_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margin)
            .saturating_sub(self.value_offset.0)
            .saturating_sub(10)
    }
}

/// Загруженные шрифты
pub struct Typefaces {
    serif: FontVec,
    sans: FontVec,
    handwriting: Option<FontVec>,
}

impl Typefaces {
    /// Загрузка шрифтов; отсутствие файла - фатальная ошибка
    pub fn load(config: &FontConfig) -> Result<Self, GeneratorError> {
        let serif = load_font(&config.serif)?;
        let sans = load_font(&config.sans)?;
        let handwriting = match &config.handwriting {
            Some(path) => Some(load_font(path)?),
            None => None,
        };

        Ok(Self { serif, sans, handwriting })
    }

    pub fn has_handwriting(&self) -> bool {
        self.handwriting.is_some()
    }

    /// Основной шрифт страницы
    fn base(&self, choice: TypefaceChoice) -> &FontVec {
        match choice {
            TypefaceChoice::Serif => &self.serif,
            TypefaceChoice::Mixed => &self.sans,
            TypefaceChoice::Handwriting => self.handwriting.as_ref().unwrap_or(&self.serif),
        }
    }

    /// Шрифт значения в строке `row`
    fn value(&self, choice: TypefaceChoice, row: usize) -> &FontVec {
        match choice {
            TypefaceChoice::Mixed if row % 2 == 0 => &self.serif,
            _ => self.base(choice),
        }
    }
}

fn load_font(path: &Path) -> Result<FontVec, GeneratorError> {
    if !path.is_file() {
        return Err(GeneratorError::FontNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| GeneratorError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Loaded font {} ({} bytes)", path.display(), bytes.len());

    FontVec::try_from_vec(bytes).map_err(|_| GeneratorError::InvalidFont {
        path: path.to_path_buf(),
    })
}

/// Результат отрисовки
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub image: GrayImage,
    /// Часть значения не поместилась в строку
    pub truncated: bool,
}

/// Отрисовщик шаблона
pub struct TemplateRenderer {
    layout: PageLayout,
    typefaces: Typefaces,
}

impl TemplateRenderer {
    pub fn new(layout: PageLayout, typefaces: Typefaces) -> Self {
        Self { layout, typefaces }
    }

    /// Отрисовка страницы для одной записи
    pub fn render(&self, person: &Person, style: &RenderStyle) -> RenderedPage {
        let layout = &self.layout;
        let mut img = GrayImage::from_pixel(layout.width, layout.height, PAPER);
        let thickness = style.line_thickness.max(1);
        let right = layout.width.saturating_sub(layout.margin);
        let base_font = self.typefaces.base(style.typeface);

        // Заголовок
        draw_frame(
            &mut img,
            (layout.margin, layout.title_top),
            (right, layout.title_bottom),
            thickness,
        );
        draw_text_mut(
            &mut img,
            INK,
            layout.width as i32 / 2 - 50,
            (layout.title_top + 25) as i32,
            PxScale::from(layout.title_font_size as f32),
            base_font,
            TITLE,
        );

        let values = [
            person.full_name(),
            person.birth_date.to_string(),
            person.address(),
        ];
        let label_scale = PxScale::from(style.font_size as f32);
        let value_size = style.font_size + 2;
        let value_scale = PxScale::from(value_size as f32);
        let line_height = (value_size * 6).div_ceil(5).max(1);
        let value_room = layout.row_height.saturating_sub(layout.value_offset.1);
        let max_lines = (value_room / line_height).max(1);
        let mut truncated = false;

        for (row, (label, value)) in FIELD_LABELS.iter().zip(values.iter()).enumerate() {
            let y = layout.rows_top + row as u32 * layout.row_height;

            draw_frame(
                &mut img,
                (layout.margin, y),
                (right, y + layout.row_height),
                thickness,
            );
            draw_divider(&mut img, layout.divider_x, y, layout.row_height, thickness);

            draw_text_mut(
                &mut img,
                INK,
                layout.label_offset.0 as i32,
                (y + layout.label_offset.1) as i32,
                label_scale,
                base_font,
                label,
            );

            let font = self.typefaces.value(style.typeface, row);
            let lines = wrap_text(value, layout.value_width(), value_scale, font);
            if lines.len() > max_lines as usize {
                log::warn!(
                    "Value {:?} needs {} lines, only {} fit; truncating",
                    value,
                    lines.len(),
                    max_lines
                );
                truncated = true;
            }

            for (i, line) in lines.iter().take(max_lines as usize).enumerate() {
                draw_text_mut(
                    &mut img,
                    INK,
                    layout.value_offset.0 as i32,
                    (y + layout.value_offset.1 + i as u32 * line_height) as i32,
                    value_scale,
                    font,
                    line,
                );
            }
        }

        RenderedPage { image: img, truncated }
    }
}

/// Рамка толщиной `thickness`, растущая внутрь; углы включительно
fn draw_frame(img: &mut GrayImage, (x0, y0): (u32, u32), (x1, y1): (u32, u32), thickness: u32) {
    for t in 0..thickness {
        let left = x0 + t;
        let top = y0 + t;
        let (right, bottom) = match (x1.checked_sub(t), y1.checked_sub(t)) {
            (Some(r), Some(b)) if r >= left && b >= top => (r, b),
            _ => break,
        };
        draw_hollow_rect_mut(
            img,
            Rect::at(left as i32, top as i32).of_size(right - left + 1, bottom - top + 1),
            INK,
        );
    }
}

/// Вертикальный разделитель, центрированный по `x`
fn draw_divider(img: &mut GrayImage, x: u32, y: u32, height: u32, thickness: u32) {
    let left = x as i32 - (thickness as i32 - 1) / 2;
    draw_filled_rect_mut(
        img,
        Rect::at(left, y as i32).of_size(thickness, height + 1),
        INK,
    );
}

/// Перенос по символам: строка не шире `max_width`, кроме строк из одного символа
pub fn wrap_text(text: &str, max_width: u32, scale: PxScale, font: &FontVec) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);

        if !current.is_empty() && text_size(scale, font, &candidate).0 > max_width {
            lines.push(std::mem::take(&mut current));
            current.push(ch);
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
