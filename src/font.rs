//! Typeface lookup and text drawing for the feature graphic.
//!
//! System TrueType fonts are tried in order; when none can be loaded the
//! text is drawn with a small built-in bitmap font instead.

use crate::canvas::blend_pixel;
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::path::{Path, PathBuf};

/// Bold sans fonts commonly present on Linux desktops, in order of preference.
pub const SYSTEM_FONT_PATHS: [&str; 3] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
];

pub fn system_font_paths() -> Vec<PathBuf> {
    SYSTEM_FONT_PATHS.iter().map(PathBuf::from).collect()
}

/// The face text gets rendered with.
pub enum Typeface {
    TrueType { font: Font<'static>, path: PathBuf },
    Builtin,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Typeface::TrueType { path, .. } => f.debug_tuple("TrueType").field(path).finish(),
            Typeface::Builtin => f.write_str("Builtin"),
        }
    }
}

/// First candidate that exists and parses, otherwise the built-in font.
pub fn resolve_typeface(candidates: &[PathBuf]) -> Typeface {
    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_font(path) {
            Some(font) => {
                return Typeface::TrueType {
                    font,
                    path: path.clone(),
                }
            }
            None => eprintln!("⚠ Skipping unreadable font {}", path.display()),
        }
    }
    Typeface::Builtin
}

fn load_font(path: &Path) -> Option<Font<'static>> {
    let bytes = std::fs::read(path).ok()?;
    Font::try_from_vec(bytes)
}

impl Typeface {
    #[cfg(test)]
    fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Builtin)
    }

    pub fn describe(&self) -> String {
        match self {
            Typeface::TrueType { path, .. } => format!("Using font: {}", path.display()),
            Typeface::Builtin => "Using built-in font".to_string(),
        }
    }

    /// Draw `text` with its top-left corner at (x, y), `size` pixels tall.
    pub fn draw_text(
        &self,
        image: &mut RgbaImage,
        (x, y): (i32, i32),
        size: f32,
        text: &str,
        color: Rgba<u8>,
    ) {
        match self {
            Typeface::TrueType { font, .. } => {
                draw_truetype(image, font, (x, y), size, text, color)
            }
            Typeface::Builtin => draw_builtin(image, (x, y), builtin_cell(size), text, color),
        }
    }
}

fn draw_truetype(
    image: &mut RgbaImage,
    font: &Font<'static>,
    (x, y): (i32, i32),
    size: f32,
    text: &str,
    color: Rgba<u8>,
) {
    let scale = Scale::uniform(size);
    let ascent = font.v_metrics(scale).ascent;

    for glyph in font.layout(text, scale, point(x as f32, y as f32 + ascent)) {
        let Some(bounds) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let alpha = (color[3] as f32 * coverage).round() as u8;
            if alpha > 0 {
                let ink = Rgba([color[0], color[1], color[2], alpha]);
                blend_pixel(image, bounds.min.x + gx as i32, bounds.min.y + gy as i32, ink);
            }
        });
    }
}

const GLYPH_WIDTH: i32 = 5;
const GLYPH_HEIGHT: i32 = 7;
const GLYPH_ADVANCE: i32 = GLYPH_WIDTH + 1;

/// Integer pixel size of one font cell for a requested text size.
fn builtin_cell(size: f32) -> i32 {
    ((size / 10.0).round() as i32).max(1)
}

/// Width in pixels of `text` drawn with the built-in font at `size`.
#[cfg(test)]
fn builtin_text_width(text: &str, size: f32) -> i32 {
    let chars = text.chars().count() as i32;
    if chars == 0 {
        return 0;
    }
    (chars * GLYPH_ADVANCE - 1) * builtin_cell(size)
}

fn draw_builtin(image: &mut RgbaImage, (x, y): (i32, i32), cell: i32, text: &str, color: Rgba<u8>) {
    for (index, ch) in text.chars().enumerate() {
        let origin_x = x + index as i32 * GLYPH_ADVANCE * cell;
        for (col, bits) in glyph(ch).iter().enumerate() {
            for row in 0..GLYPH_HEIGHT {
                if bits & (1 << row) == 0 {
                    continue;
                }
                let px = origin_x + col as i32 * cell;
                let py = y + row * cell;
                for dy in 0..cell {
                    for dx in 0..cell {
                        blend_pixel(image, px + dx, py + dy, color);
                    }
                }
            }
        }
    }
}

/// Column bitmaps for a character, least significant bit on top.
/// Characters outside printable ASCII render as `?`.
fn glyph(ch: char) -> &'static [u8; 5] {
    let code = ch as u32;
    if (0x20..=0x7e).contains(&code) {
        &GLYPHS[(code - 0x20) as usize]
    } else {
        &GLYPHS[('?' as u32 - 0x20) as usize]
    }
}

// 5x7 font covering 0x20..=0x7E
const GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5f, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7f, 0x14, 0x7f, 0x14], // #
    [0x24, 0x2a, 0x7f, 0x2a, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1c, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1c, 0x00], // )
    [0x08, 0x2a, 0x1c, 0x2a, 0x08], // *
    [0x08, 0x08, 0x3e, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3e, 0x51, 0x49, 0x45, 0x3e], // 0
    [0x00, 0x42, 0x7f, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4b, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7f, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3c, 0x4a, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1e], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3e], // @
    [0x7e, 0x11, 0x11, 0x11, 0x7e], // A
    [0x7f, 0x49, 0x49, 0x49, 0x36], // B
    [0x3e, 0x41, 0x41, 0x41, 0x22], // C
    [0x7f, 0x41, 0x41, 0x22, 0x1c], // D
    [0x7f, 0x49, 0x49, 0x49, 0x41], // E
    [0x7f, 0x09, 0x09, 0x09, 0x01], // F
    [0x3e, 0x41, 0x49, 0x49, 0x7a], // G
    [0x7f, 0x08, 0x08, 0x08, 0x7f], // H
    [0x00, 0x41, 0x7f, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3f, 0x01], // J
    [0x7f, 0x08, 0x14, 0x22, 0x41], // K
    [0x7f, 0x40, 0x40, 0x40, 0x40], // L
    [0x7f, 0x02, 0x0c, 0x02, 0x7f], // M
    [0x7f, 0x04, 0x08, 0x10, 0x7f], // N
    [0x3e, 0x41, 0x41, 0x41, 0x3e], // O
    [0x7f, 0x09, 0x09, 0x09, 0x06], // P
    [0x3e, 0x41, 0x51, 0x21, 0x5e], // Q
    [0x7f, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7f, 0x01, 0x01], // T
    [0x3f, 0x40, 0x40, 0x40, 0x3f], // U
    [0x1f, 0x20, 0x40, 0x20, 0x1f], // V
    [0x3f, 0x40, 0x38, 0x40, 0x3f], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7f, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // \
    [0x00, 0x41, 0x41, 0x7f, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7f, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7f], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7e, 0x09, 0x01, 0x02], // f
    [0x0c, 0x52, 0x52, 0x52, 0x3e], // g
    [0x7f, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7d, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3d, 0x00], // j
    [0x7f, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7f, 0x40, 0x00], // l
    [0x7c, 0x04, 0x18, 0x04, 0x78], // m
    [0x7c, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7c, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7c], // q
    [0x7c, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3f, 0x44, 0x40, 0x20], // t
    [0x3c, 0x40, 0x40, 0x20, 0x7c], // u
    [0x1c, 0x20, 0x40, 0x20, 0x1c], // v
    [0x3c, 0x40, 0x30, 0x40, 0x3c], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0c, 0x50, 0x50, 0x50, 0x3c], // y
    [0x44, 0x64, 0x54, 0x4c, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7f, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_missing_fonts_fall_back_to_builtin() {
        let candidates = vec![PathBuf::from("/nonexistent/fonts/Missing-Bold.ttf")];
        assert!(resolve_typeface(&candidates).is_builtin());
        assert!(resolve_typeface(&[]).is_builtin());
    }

    #[test]
    fn test_unparseable_font_is_skipped() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let bogus = temp_dir.path().join("Bogus.ttf");
        std::fs::write(&bogus, b"not a font").unwrap();

        let typeface = resolve_typeface(&[bogus]);
        assert!(typeface.is_builtin());
        assert_eq!(typeface.describe(), "Using built-in font");
    }

    #[test]
    fn test_first_loadable_system_font_is_used() {
        let Some(installed) = system_font_paths().into_iter().find(|path| path.is_file()) else {
            eprintln!("no system font installed; skipping");
            return;
        };
        let temp_dir = tempfile::TempDir::new().unwrap();
        let bogus = temp_dir.path().join("Bogus.ttf");
        std::fs::write(&bogus, b"not a font").unwrap();
        let candidates = vec![
            PathBuf::from("/nonexistent/fonts/Missing-Bold.ttf"),
            bogus,
            installed.clone(),
        ];

        let typeface = resolve_typeface(&candidates);
        match &typeface {
            Typeface::TrueType { path, .. } => assert_eq!(path, &installed),
            Typeface::Builtin => panic!("expected {} to load", installed.display()),
        }
        assert_eq!(typeface.describe(), format!("Using font: {}", installed.display()));

        let mut image = RgbaImage::new(200, 60);
        typeface.draw_text(&mut image, (4, 4), 32.0, "NameDrill", WHITE);
        assert!(image.pixels().any(|p| p[3] > 0));
        // Ink stays below the requested origin
        assert!((0..image.width()).all(|x| image.get_pixel(x, 0)[3] == 0));
    }

    #[test]
    fn test_builtin_glyph_pixels() {
        let mut image = RgbaImage::new(20, 20);
        Typeface::Builtin.draw_text(&mut image, (2, 3), 10.0, "I", WHITE);

        // 'I' is a vertical bar in the middle column with serifs on top and bottom
        assert_eq!(*image.get_pixel(4, 3), WHITE);
        assert_eq!(*image.get_pixel(4, 6), WHITE);
        assert_eq!(*image.get_pixel(4, 9), WHITE);
        assert_eq!(*image.get_pixel(3, 3), WHITE);
        assert_eq!(image.get_pixel(3, 6)[3], 0);
        assert_eq!(image.get_pixel(2, 6)[3], 0);
    }

    #[test]
    fn test_builtin_text_scales_with_size() {
        assert_eq!(builtin_cell(72.0), 7);
        assert_eq!(builtin_cell(32.0), 3);
        assert_eq!(builtin_cell(4.0), 1);
        assert_eq!(builtin_text_width("NameDrill", 72.0), (9 * 6 - 1) * 7);
        assert_eq!(builtin_text_width("", 72.0), 0);
    }

    #[test]
    fn test_non_ascii_renders_placeholder() {
        let mut a = RgbaImage::new(10, 10);
        let mut b = RgbaImage::new(10, 10);
        Typeface::Builtin.draw_text(&mut a, (0, 0), 10.0, "é", WHITE);
        Typeface::Builtin.draw_text(&mut b, (0, 0), 10.0, "?", WHITE);
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_clipped_at_edges() {
        let mut image = RgbaImage::new(8, 8);
        Typeface::Builtin.draw_text(&mut image, (-3, -3), 30.0, "W", WHITE);
        assert!(image.pixels().any(|p| p[3] > 0));
    }
}
