use image::{Rgba, RgbaImage};
use namedrill_icons::compositor::PRIMARY;
use namedrill_icons::exporter::{self, ADAPTIVE_SAFE_ZONE};
use std::path::Path;
use tempfile::TempDir;

/// Creates an opaque gradient source image and saves it as PNG
fn create_opaque_source(path: &Path, size: u32) {
    let mut image = RgbaImage::new(size, size);

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let red = (255.0 * x as f32 / size as f32) as u8;
        let green = (255.0 * y as f32 / size as f32) as u8;
        *pixel = Rgba([red, green, 128, 255]);
    }

    image.save(path).expect("Failed to save source image");
}

/// Opaque square in the middle, fully transparent border of `border` pixels
fn create_bordered_source(path: &Path, size: u32, border: u32) {
    let image = RgbaImage::from_fn(size, size, |x, y| {
        let inside = x >= border && y >= border && x < size - border && y < size - border;
        if inside {
            Rgba([20, 120, 220, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    image.save(path).expect("Failed to save source image");
}

#[test]
fn test_every_catalog_entry_has_requested_size() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source.png");
    create_opaque_source(&source, 2000);
    let app_dir = temp_dir.path().join("app");

    let written = exporter::export_all(&source, &app_dir, PRIMARY).unwrap();

    let sections = exporter::catalog(&app_dir).unwrap();
    let targets: Vec<_> = sections.iter().flat_map(|s| s.targets.iter()).collect();
    assert_eq!(written.len(), targets.len());

    for target in targets {
        let img = image::open(&target.path).expect("catalog entry should be written");
        assert_eq!((img.width(), img.height()), (target.size, target.size));
    }

    let store_icon = image::open(app_dir.join("store-assets/icon-1024.png")).unwrap();
    assert_eq!((store_icon.width(), store_icon.height()), (1024, 1024));

    let mdpi = image::open(app_dir.join("android/app/src/main/res/mipmap-mdpi/ic_launcher.png"))
        .unwrap();
    assert_eq!((mdpi.width(), mdpi.height()), (48, 48));
}

#[test]
fn test_export_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source.png");
    create_opaque_source(&source, 256);

    let first = temp_dir.path().join("first");
    let second = temp_dir.path().join("second");
    let first_files = exporter::export_all(&source, &first, PRIMARY).unwrap();
    let second_files = exporter::export_all(&source, &second, PRIMARY).unwrap();

    for (a, b) in first_files.iter().zip(&second_files) {
        assert_eq!(
            std::fs::read(a).unwrap(),
            std::fs::read(b).unwrap(),
            "{} differs between runs",
            a.display()
        );
    }

    // Exporting over an existing tree overwrites in place
    let again = exporter::export_all(&source, &first, PRIMARY).unwrap();
    assert_eq!(again, first_files);
}

#[test]
fn test_adaptive_foreground_is_centered_in_safe_zone() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source.png");
    create_opaque_source(&source, 512);
    let app_dir = temp_dir.path().join("app");

    exporter::export_all(&source, &app_dir, PRIMARY).unwrap();

    for (bucket, size) in exporter::ANDROID_ADAPTIVE {
        let path = app_dir
            .join(exporter::ANDROID_RES)
            .join(bucket)
            .join("ic_launcher_foreground.png");
        let foreground = image::open(&path).unwrap().to_rgba8();
        assert_eq!(foreground.dimensions(), (size, size));

        // Opaque source: the painted area is exactly the pasted icon
        let painted: Vec<(u32, u32)> = foreground
            .enumerate_pixels()
            .filter(|(_, _, p)| p[3] > 0)
            .map(|(x, y, _)| (x, y))
            .collect();
        let min_x = painted.iter().map(|p| p.0).min().unwrap();
        let max_x = painted.iter().map(|p| p.0).max().unwrap();
        let min_y = painted.iter().map(|p| p.1).min().unwrap();
        let max_y = painted.iter().map(|p| p.1).max().unwrap();

        let inner = (size as f32 * 72.0 / 108.0).round() as u32;
        assert_eq!(max_x - min_x + 1, inner, "width for {bucket}");
        assert_eq!(max_y - min_y + 1, inner, "height for {bucket}");

        let right_margin = size - 1 - max_x;
        let bottom_margin = size - 1 - max_y;
        assert!(min_x.abs_diff(right_margin) <= 1);
        assert!(min_y.abs_diff(bottom_margin) <= 1);
    }
}

#[test]
fn test_transparent_border_source_at_432() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = temp_dir.path().join("bordered.png");
    create_bordered_source(&source_path, 600, 60);

    let source = namedrill_icons::png::load_source(&source_path).unwrap();
    let foreground =
        exporter::create_adaptive_foreground(&source, 432, ADAPTIVE_SAFE_ZONE).to_rgba8();

    assert_eq!(foreground.dimensions(), (432, 432));
    assert_eq!(ADAPTIVE_SAFE_ZONE.inner_size(432), 288);
    assert_eq!(ADAPTIVE_SAFE_ZONE.offset(432), 72);

    // Outside the 288x288 paste area nothing is drawn
    for (x, y, pixel) in foreground.enumerate_pixels() {
        let in_paste = (72..360).contains(&x) && (72..360).contains(&y);
        if !in_paste {
            assert_eq!(pixel[3], 0, "({x}, {y}) outside the pasted icon");
        }
    }

    // The source's own transparent border scales to 288 * 60 / 600 = 28.8px
    assert_eq!(foreground.get_pixel(72 + 10, 216)[3], 0);
    assert_eq!(foreground.get_pixel(216, 216)[3], 255);
}

#[test]
fn test_undecodable_source_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source.png");
    std::fs::write(&source, b"\x89PNG broken").unwrap();
    let app_dir = temp_dir.path().join("app");

    let err = exporter::export_all(&source, &app_dir, PRIMARY).unwrap_err();

    assert!(format!("{err:#}").contains("Failed to load source image"));
    assert!(!app_dir.exists());
}
