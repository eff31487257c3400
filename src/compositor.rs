//! Procedural drawing of the NameDrill icon: a flashcard with a person
//! silhouette, name placeholder lines and a "learned" checkmark badge.

use crate::canvas::{BBox, Canvas, Shape};
use crate::png::save_png;
use anyhow::Result;
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

pub const SIZE: u32 = 1024;
const CENTER: i32 = SIZE as i32 / 2;

pub const PRIMARY: Rgba<u8> = Rgba([99, 102, 241, 255]);
pub const PRIMARY_LIGHT: Rgba<u8> = Rgba([165, 167, 255, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const LIGHT_GRAY: Rgba<u8> = Rgba([240, 240, 250, 255]);

/// Inset and corner radius of the rounded-square background panel.
pub const PANEL_PADDING: i32 = 50;
pub const PANEL_RADIUS: u32 = 220;

/// Fraction of the canvas the adaptive foreground content is scaled into.
pub const ADAPTIVE_SCALE: f32 = 0.72;

pub const ICON_FILE: &str = "app_icon.png";
pub const FOREGROUND_FILE: &str = "app_icon_foreground.png";
pub const BACKGROUND_FILE: &str = "app_icon_background.png";

/// The three layers produced by one composition run.
#[derive(Debug, Clone)]
pub struct IconSet {
    pub icon: RgbaImage,
    pub foreground: RgbaImage,
    pub background: RgbaImage,
}

/// Placement of every card element for one variant of the artwork.
#[derive(Debug, Clone, PartialEq)]
struct Layout {
    card: BBox,
    card_radius: u32,
    shadow_offset: i32,
    shadow_color: Rgba<u8>,
    head_center: (i32, i32),
    head_radius: i32,
    shoulders: BBox,
    // Paints over the lower half of the shoulders ellipse
    shoulders_mask: BBox,
    name_line: BBox,
    detail_line: BBox,
    line_radius: u32,
    badge_center: (i32, i32),
    badge_radius: i32,
    check: [(i32, i32); 3],
    check_width: u32,
}

impl Layout {
    fn full_icon() -> Self {
        let size = SIZE as i32;
        let (margin_x, margin_top, margin_bottom) = (140, 160, 180);
        let card = BBox::new(margin_x, margin_top, size - margin_x, size - margin_bottom);

        let head_center = (CENTER, 340);
        let head_radius = 95;
        let shoulders_top = head_center.1 + head_radius - 20;
        let (shoulders_width, shoulders_height) = (180, 200);

        let line_y = 680;
        let line_height = 22;
        let detail_y = line_y + 40;

        let badge_center = (card.x1 - 85, card.y0 + 85);
        let (bx, by) = badge_center;

        Self {
            card,
            card_radius: 50,
            shadow_offset: 12,
            shadow_color: Rgba([40, 40, 80, 100]),
            head_center,
            head_radius,
            shoulders: BBox::new(
                CENTER - shoulders_width,
                shoulders_top,
                CENTER + shoulders_width,
                shoulders_top + shoulders_height * 2,
            ),
            shoulders_mask: BBox::new(
                card.x0 + 5,
                shoulders_top + shoulders_height + 20,
                card.x1 - 5,
                card.y1 - 5,
            ),
            name_line: BBox::new(CENTER - 130, line_y, CENTER + 130, line_y + line_height),
            detail_line: BBox::new(CENTER - 80, detail_y, CENTER + 80, detail_y + line_height),
            line_radius: (line_height / 2) as u32,
            badge_center,
            badge_radius: 48,
            check: [(bx - 22, by), (bx - 5, by + 18), (bx + 25, by - 15)],
            check_width: 10,
        }
    }

    /// Same composition without the panel, shrunk into the adaptive safe zone.
    fn adaptive_foreground() -> Self {
        let size = SIZE as i32;
        let scaled = |value: f32| (value * ADAPTIVE_SCALE) as i32;
        let offset = (SIZE as f32 * (1.0 - ADAPTIVE_SCALE) / 2.0) as i32;

        let card = BBox::new(offset + 50, offset + 60, size - offset - 50, size - offset - 80);

        let head_center = (CENTER, scaled(320.0) + offset + 40);
        let head_radius = scaled(80.0);
        let shoulders_top = head_center.1 + head_radius - 15;
        let (shoulders_width, shoulders_height) = (scaled(150.0), scaled(170.0));

        let line_y = (SIZE as f32 * 0.66) as i32;
        let line_height = 18;

        let badge_center = (card.x1 - 65, card.y0 + 65);
        let (bx, by) = badge_center;

        Self {
            card,
            card_radius: 40,
            shadow_offset: 10,
            shadow_color: Rgba([40, 40, 80, 80]),
            head_center,
            head_radius,
            shoulders: BBox::new(
                CENTER - shoulders_width,
                shoulders_top,
                CENTER + shoulders_width,
                shoulders_top + shoulders_height * 2,
            ),
            shoulders_mask: BBox::new(
                card.x0 + 5,
                shoulders_top + shoulders_height + 15,
                card.x1 - 5,
                card.y1 - 5,
            ),
            name_line: BBox::new(CENTER - 100, line_y, CENTER + 100, line_y + line_height),
            detail_line: BBox::new(
                CENTER - 60,
                line_y + 32,
                CENTER + 60,
                line_y + 32 + line_height,
            ),
            line_radius: 9,
            badge_center,
            badge_radius: 38,
            check: [(bx - 17, by), (bx - 4, by + 14), (bx + 20, by - 12)],
            check_width: 8,
        }
    }
}

/// The rounded-square panel behind the full icon.
pub fn background_panel() -> Shape {
    let far = SIZE as i32 - PANEL_PADDING;
    Shape::RoundedRect {
        bbox: BBox::new(PANEL_PADDING, PANEL_PADDING, far, far),
        radius: PANEL_RADIUS,
    }
}

fn draw_card(canvas: &mut Canvas, layout: &Layout) {
    let shadow = layout.card.offset(layout.shadow_offset, layout.shadow_offset);
    canvas.fill(
        &Shape::RoundedRect {
            bbox: shadow,
            radius: layout.card_radius,
        },
        layout.shadow_color,
    );
    canvas.fill(
        &Shape::RoundedRect {
            bbox: layout.card,
            radius: layout.card_radius,
        },
        WHITE,
    );

    // Silhouette
    canvas.fill(
        &Shape::Ellipse(BBox::around(layout.head_center, layout.head_radius)),
        PRIMARY,
    );
    canvas.fill(&Shape::Ellipse(layout.shoulders), PRIMARY);
    canvas.fill(&Shape::Rect(layout.shoulders_mask), WHITE);

    // Name placeholders
    canvas.fill(
        &Shape::RoundedRect {
            bbox: layout.name_line,
            radius: layout.line_radius,
        },
        PRIMARY_LIGHT,
    );
    canvas.fill(
        &Shape::RoundedRect {
            bbox: layout.detail_line,
            radius: layout.line_radius,
        },
        LIGHT_GRAY,
    );

    // Badge with checkmark
    canvas.fill(
        &Shape::Ellipse(BBox::around(layout.badge_center, layout.badge_radius)),
        PRIMARY,
    );
    let [start, corner, end] = layout.check;
    for (from, to) in [(start, corner), (corner, end)] {
        canvas.fill(
            &Shape::Line {
                from,
                to,
                width: layout.check_width,
            },
            WHITE,
        );
    }
}

/// Full icon with the rounded-square background panel.
pub fn create_icon() -> RgbaImage {
    let mut canvas = Canvas::new(SIZE, SIZE);
    canvas.fill(&background_panel(), PRIMARY);
    draw_card(&mut canvas, &Layout::full_icon());
    canvas.into_image()
}

/// Adaptive-icon foreground: card content only, kept inside the safe zone.
pub fn create_foreground_adaptive() -> RgbaImage {
    let mut canvas = Canvas::new(SIZE, SIZE);
    draw_card(&mut canvas, &Layout::adaptive_foreground());
    canvas.into_image()
}

/// Adaptive-icon background: flat primary color.
pub fn create_background_adaptive() -> RgbaImage {
    Canvas::filled(SIZE, SIZE, PRIMARY).into_image()
}

pub fn compose() -> IconSet {
    IconSet {
        icon: create_icon(),
        foreground: create_foreground_adaptive(),
        background: create_background_adaptive(),
    }
}

/// Draw all three layers and write them into `out_dir`.
pub fn write_icon_set(out_dir: &Path) -> Result<Vec<PathBuf>> {
    let set = compose();
    let layers = [
        (ICON_FILE, set.icon),
        (FOREGROUND_FILE, set.foreground),
        (BACKGROUND_FILE, set.background),
    ];

    let mut written = Vec::with_capacity(layers.len());
    for (filename, layer) in layers {
        let path = out_dir.join(filename);
        save_png(&DynamicImage::ImageRgba8(layer), &path)?;
        println!("  ✓ Created {filename} ({SIZE}x{SIZE})");
        written.push(path);
    }

    Ok(written)
}
