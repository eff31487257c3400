//! The 1024x500 store banner: diagonal gradient, the icon on the left and
//! the app name with a tagline beside it.

use crate::font::{resolve_typeface, system_font_paths, Typeface};
use crate::png::{load_source, save_png};
use anyhow::Result;
use image::{imageops::FilterType, DynamicImage, Rgba, RgbImage, RgbaImage};
use std::path::{Path, PathBuf};

pub const WIDTH: u32 = 1024;
pub const HEIGHT: u32 = 500;
pub const ICON_SIZE: u32 = 280;
pub const ICON_X: u32 = 120;

pub const TITLE_SIZE: f32 = 72.0;
pub const SUBTITLE_SIZE: f32 = 32.0;

pub const GRADIENT_START: Rgba<u8> = Rgba([138, 82, 176, 255]);
pub const GRADIENT_END: Rgba<u8> = Rgba([26, 188, 156, 255]);

const TITLE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const SUBTITLE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 200]);

pub const FEATURE_GRAPHIC_FILE: &str = "feature-graphic.png";

/// Text, colors and font candidates of the banner.
#[derive(Debug, Clone)]
pub struct FeatureGraphic {
    pub title: String,
    pub subtitle: String,
    pub gradient_start: Rgba<u8>,
    pub gradient_end: Rgba<u8>,
    /// Font files tried in order before falling back to the built-in font.
    pub font_paths: Vec<PathBuf>,
}

impl Default for FeatureGraphic {
    fn default() -> Self {
        Self {
            title: "NameDrill".to_string(),
            subtitle: "Remember every name & face".to_string(),
            gradient_start: GRADIENT_START,
            gradient_end: GRADIENT_END,
            font_paths: system_font_paths(),
        }
    }
}

/// Blend from `start` to `end` along a diagonal weighted 0.6 horizontally and 0.4 vertically.
pub fn create_gradient(width: u32, height: u32, start: Rgba<u8>, end: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let ratio = x as f32 / width as f32 * 0.6 + y as f32 / height as f32 * 0.4;
        let channel = |i: usize| {
            let from = start[i] as f32;
            let to = end[i] as f32;
            (from + (to - from) * ratio) as u8
        };
        Rgba([channel(0), channel(1), channel(2), 255])
    })
}

/// Where the title and subtitle start, to the right of the icon.
pub fn text_origins() -> ((i32, i32), (i32, i32)) {
    let text_x = (ICON_X + ICON_SIZE + 80) as i32;
    let title_y = (HEIGHT / 2) as i32 - 50;
    ((text_x, title_y), (text_x, title_y + 80))
}

impl FeatureGraphic {
    /// Compose the banner around `icon` using an already resolved typeface.
    pub fn compose_with(&self, icon: &DynamicImage, typeface: &Typeface) -> RgbImage {
        let mut banner = create_gradient(WIDTH, HEIGHT, self.gradient_start, self.gradient_end);

        let icon = icon
            .resize_exact(ICON_SIZE, ICON_SIZE, FilterType::Lanczos3)
            .to_rgba8();
        let icon_y = (HEIGHT - ICON_SIZE) / 2;
        image::imageops::overlay(&mut banner, &icon, ICON_X.into(), icon_y.into());

        let (title_at, subtitle_at) = text_origins();
        typeface.draw_text(&mut banner, title_at, TITLE_SIZE, &self.title, TITLE_COLOR);
        typeface.draw_text(&mut banner, subtitle_at, SUBTITLE_SIZE, &self.subtitle, SUBTITLE_COLOR);

        DynamicImage::ImageRgba8(banner).to_rgb8()
    }

    pub fn compose(&self, icon: &DynamicImage) -> RgbImage {
        let typeface = resolve_typeface(&self.font_paths);
        println!("  {}", typeface.describe());
        self.compose_with(icon, &typeface)
    }

    /// Load the icon at `source_path` and write the banner to `output`.
    pub fn generate(&self, source_path: &Path, output: &Path) -> Result<()> {
        println!("Creating feature graphic...");
        let icon = load_source(source_path)?;

        let banner = self.compose(&icon);
        save_png(&DynamicImage::ImageRgb8(banner), output)?;

        println!("  ✓ Saved {} ({WIDTH}x{HEIGHT})", output.display());
        Ok(())
    }
}
