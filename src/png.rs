use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    io::Reader,
    ColorType, DynamicImage, ImageEncoder, ImageError,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::Path,
};

/// Load the source bitmap and normalize it to RGBA.
///
/// The format is detected from the file contents, so a PNG without an
/// extension (or with the wrong one) still loads.
pub fn load_source(path: &Path) -> Result<DynamicImage> {
    let source = Reader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(ImageError::IoError)
        .and_then(|reader| reader.decode())
        .with_context(|| format!("Failed to load source image {}", path.display()))?;

    if source.width() != source.height() {
        eprintln!(
            "⚠ Source image {} is not square ({}x{}); it will be stretched",
            path.display(),
            source.width(),
            source.height()
        );
    }

    Ok(DynamicImage::ImageRgba8(source.to_rgba8()))
}

/// Write `image` as a PNG, creating missing parent directories first.
pub fn save_png(image: &DynamicImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Can't create directory {}", parent.display()))?;
    }

    let converted;
    let image = match image.color() {
        ColorType::Rgb8 | ColorType::Rgba8 => image,
        _ => {
            converted = DynamicImage::ImageRgba8(image.to_rgba8());
            &converted
        }
    };

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_png(image.as_bytes(), &mut out, image.width(), image.height(), image.color())
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out.flush()?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(
    image_data: &[u8],
    w: W,
    width: u32,
    height: u32,
    color: ColorType,
) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, width, height, color)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn test_save_png_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("icon.png");
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 4])));

        save_png(&image, &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (8, 8));
        assert_eq!(*reloaded.get_pixel(3, 3), Rgba([1, 2, 3, 4]));
    }

    #[test]
    fn test_load_source_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_source(&temp_dir.path().join("missing.png")).unwrap_err();
        assert!(err.to_string().contains("Failed to load source image"));
    }

    #[test]
    fn test_load_source_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(load_source(&path).is_err());
    }

    #[test]
    fn test_load_source_without_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("icon");
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(6, 6, Rgba([9, 8, 7, 255])));
        save_png(&image, &path).unwrap();

        let loaded = load_source(&path).unwrap();
        assert_eq!(loaded.width(), 6);
        assert_eq!(*loaded.to_rgba8().get_pixel(0, 0), Rgba([9, 8, 7, 255]));
    }

    #[test]
    fn test_load_source_ignores_misleading_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("icon.jpg");
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 128])));
        save_png(&image, &path).unwrap();

        let loaded = load_source(&path).unwrap().to_rgba8();
        assert_eq!(*loaded.get_pixel(2, 2), Rgba([1, 2, 3, 128]));
    }
}
