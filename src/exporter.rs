//! Fan-out of one source bitmap into every launcher, adaptive-icon and
//! store-listing size the app ships with.

use crate::contents_json::{write_contents_json, ImageEntry};
use crate::png::{load_source, save_png};
use anyhow::{Context, Result};
use image::{imageops::FilterType, DynamicImage, Rgba, RgbaImage};
use serde::Deserialize;
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

pub const ANDROID_RES: &str = "android/app/src/main/res";
pub const IOS_ICON_SET: &str = "ios/Runner/Assets.xcassets/AppIcon.appiconset";
pub const STORE_ASSETS: &str = "store-assets";

/// Launcher icon sizes per density bucket.
pub const ANDROID_MIPMAP: [(&str, u32); 5] = [
    ("mipmap-mdpi", 48),
    ("mipmap-hdpi", 72),
    ("mipmap-xhdpi", 96),
    ("mipmap-xxhdpi", 144),
    ("mipmap-xxxhdpi", 192),
];

/// Adaptive foreground canvas sizes (108dp) per density bucket.
pub const ANDROID_ADAPTIVE: [(&str, u32); 5] = [
    ("drawable-mdpi", 108),
    ("drawable-hdpi", 162),
    ("drawable-xhdpi", 216),
    ("drawable-xxhdpi", 324),
    ("drawable-xxxhdpi", 432),
];

pub const STORE_ICONS: [(&str, u32); 2] = [("icon-512.png", 512), ("icon-1024.png", 1024)];

// Every file of the iOS icon set and the idioms it serves in Contents.json
const IOS_ICONS_JSON: &str = r#"
[
  { "filename": "Icon-App-20x20@1x.png", "size": 20, "point": "20x20", "scale": "1x", "idioms": ["ipad"] },
  { "filename": "Icon-App-20x20@2x.png", "size": 40, "point": "20x20", "scale": "2x", "idioms": ["iphone", "ipad"] },
  { "filename": "Icon-App-20x20@3x.png", "size": 60, "point": "20x20", "scale": "3x", "idioms": ["iphone"] },
  { "filename": "Icon-App-29x29@1x.png", "size": 29, "point": "29x29", "scale": "1x", "idioms": ["iphone", "ipad"] },
  { "filename": "Icon-App-29x29@2x.png", "size": 58, "point": "29x29", "scale": "2x", "idioms": ["iphone", "ipad"] },
  { "filename": "Icon-App-29x29@3x.png", "size": 87, "point": "29x29", "scale": "3x", "idioms": ["iphone"] },
  { "filename": "Icon-App-40x40@1x.png", "size": 40, "point": "40x40", "scale": "1x", "idioms": ["ipad"] },
  { "filename": "Icon-App-40x40@2x.png", "size": 80, "point": "40x40", "scale": "2x", "idioms": ["iphone", "ipad"] },
  { "filename": "Icon-App-40x40@3x.png", "size": 120, "point": "40x40", "scale": "3x", "idioms": ["iphone"] },
  { "filename": "Icon-App-50x50@1x.png", "size": 50, "point": "50x50", "scale": "1x", "idioms": ["ipad"] },
  { "filename": "Icon-App-50x50@2x.png", "size": 100, "point": "50x50", "scale": "2x", "idioms": ["ipad"] },
  { "filename": "Icon-App-57x57@1x.png", "size": 57, "point": "57x57", "scale": "1x", "idioms": ["iphone"] },
  { "filename": "Icon-App-57x57@2x.png", "size": 114, "point": "57x57", "scale": "2x", "idioms": ["iphone"] },
  { "filename": "Icon-App-60x60@2x.png", "size": 120, "point": "60x60", "scale": "2x", "idioms": ["iphone"] },
  { "filename": "Icon-App-60x60@3x.png", "size": 180, "point": "60x60", "scale": "3x", "idioms": ["iphone"] },
  { "filename": "Icon-App-72x72@1x.png", "size": 72, "point": "72x72", "scale": "1x", "idioms": ["ipad"] },
  { "filename": "Icon-App-72x72@2x.png", "size": 144, "point": "72x72", "scale": "2x", "idioms": ["ipad"] },
  { "filename": "Icon-App-76x76@1x.png", "size": 76, "point": "76x76", "scale": "1x", "idioms": ["ipad"] },
  { "filename": "Icon-App-76x76@2x.png", "size": 152, "point": "76x76", "scale": "2x", "idioms": ["ipad"] },
  { "filename": "Icon-App-83.5x83.5@2x.png", "size": 167, "point": "83.5x83.5", "scale": "2x", "idioms": ["ipad"] },
  { "filename": "Icon-App-1024x1024@1x.png", "size": 1024, "point": "1024x1024", "scale": "1x", "idioms": ["ios-marketing"] }
]
"#;

#[derive(Debug, Clone, Deserialize)]
pub struct IosIcon {
    pub filename: String,
    pub size: u32,
    pub point: String,
    pub scale: String,
    pub idioms: Vec<String>,
}

/// The named iOS icon files, in catalog order.
pub fn ios_icons() -> Result<Vec<IosIcon>> {
    serde_json::from_str(IOS_ICONS_JSON).context("Invalid iOS icon table")
}

/// Fraction of an adaptive foreground canvas that is guaranteed visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeZone {
    pub visible: u32,
    pub canvas: u32,
}

/// 72dp visible out of a 108dp adaptive-icon layer.
pub const ADAPTIVE_SAFE_ZONE: SafeZone = SafeZone {
    visible: 72,
    canvas: 108,
};

impl SafeZone {
    /// Side of the icon pasted into a canvas of `size`, rounded to the nearest pixel.
    pub fn inner_size(&self, size: u32) -> u32 {
        (size * self.visible + self.canvas / 2) / self.canvas
    }

    /// Margin left on the top/left side when the icon is centered.
    pub fn offset(&self, size: u32) -> u32 {
        (size - self.inner_size(size)) / 2
    }
}

/// One resize-and-write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub path: PathBuf,
    pub size: u32,
    pub safe_zone: Option<SafeZone>,
}

impl ExportTarget {
    fn plain(path: PathBuf, size: u32) -> Self {
        Self {
            path,
            size,
            safe_zone: None,
        }
    }
}

/// A titled group of targets, reported together on the console.
#[derive(Debug, Clone)]
pub struct CatalogSection {
    pub title: &'static str,
    pub targets: Vec<ExportTarget>,
}

/// Every export target rooted at `app_dir`.
pub fn catalog(app_dir: &Path) -> Result<Vec<CatalogSection>> {
    let res_dir = app_dir.join(ANDROID_RES);
    let ios_dir = app_dir.join(IOS_ICON_SET);
    let store_dir = app_dir.join(STORE_ASSETS);

    let mipmaps = ANDROID_MIPMAP
        .iter()
        .map(|(bucket, size)| {
            ExportTarget::plain(res_dir.join(bucket).join("ic_launcher.png"), *size)
        })
        .collect();

    let foregrounds = ANDROID_ADAPTIVE
        .iter()
        .map(|(bucket, size)| ExportTarget {
            path: res_dir.join(bucket).join("ic_launcher_foreground.png"),
            size: *size,
            safe_zone: Some(ADAPTIVE_SAFE_ZONE),
        })
        .collect();

    let ios = ios_icons()?
        .into_iter()
        .map(|icon| ExportTarget::plain(ios_dir.join(&icon.filename), icon.size))
        .collect();

    let store = STORE_ICONS
        .iter()
        .map(|(filename, size)| ExportTarget::plain(store_dir.join(filename), *size))
        .collect();

    Ok(vec![
        CatalogSection {
            title: "Android launcher icons",
            targets: mipmaps,
        },
        CatalogSection {
            title: "Android adaptive icon foregrounds",
            targets: foregrounds,
        },
        CatalogSection {
            title: "iOS icons",
            targets: ios,
        },
        CatalogSection {
            title: "store assets",
            targets: store,
        },
    ])
}

/// Square resize with a Lanczos filter.
pub fn resize_icon(source: &DynamicImage, size: u32) -> DynamicImage {
    source.resize_exact(size, size, FilterType::Lanczos3)
}

/// Shrink the source into the safe zone and center it on a transparent canvas.
pub fn create_adaptive_foreground(
    source: &DynamicImage,
    size: u32,
    zone: SafeZone,
) -> DynamicImage {
    let icon_size = zone.inner_size(size);
    let offset = zone.offset(size);

    let icon = source.resize_exact(icon_size, icon_size, FilterType::Lanczos3);
    let mut canvas = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    image::imageops::overlay(&mut canvas, &icon.to_rgba8(), offset.into(), offset.into());

    DynamicImage::ImageRgba8(canvas)
}

fn display_path<'a>(path: &'a Path, app_dir: &Path) -> std::path::Display<'a> {
    path.strip_prefix(app_dir).unwrap_or(path).display()
}

/// Produce and write the image for one target.
pub fn export_target(source: &DynamicImage, target: &ExportTarget, app_dir: &Path) -> Result<()> {
    let size = target.size;
    match target.safe_zone {
        Some(zone) => {
            let foreground = create_adaptive_foreground(source, size, zone);
            save_png(&foreground, &target.path)?;
            println!(
                "  ✓ Generated {} ({size}x{size}, icon={})",
                display_path(&target.path, app_dir),
                zone.inner_size(size)
            );
        }
        None => {
            save_png(&resize_icon(source, size), &target.path)?;
            println!(
                "  ✓ Generated {} ({size}x{size})",
                display_path(&target.path, app_dir)
            );
        }
    }
    Ok(())
}

/// Load `source_path` and write the whole catalog under `app_dir`.
///
/// The source is decoded before anything is written, so an unreadable
/// source leaves the output tree untouched. Returns the written images.
pub fn export_all(
    source_path: &Path,
    app_dir: &Path,
    background: Rgba<u8>,
) -> Result<Vec<PathBuf>> {
    println!("Loading source image...");
    let source = load_source(source_path)?;
    println!("  Source: {}x{}", source.width(), source.height());

    let sections = catalog(app_dir)?;
    let mut written = Vec::new();

    for section in &sections {
        println!("Generating {}...", section.title);
        for target in &section.targets {
            export_target(&source, target, app_dir)?;
            written.push(target.path.clone());
        }
    }

    let res_dir = app_dir.join(ANDROID_RES);
    generate_adaptive_icon_xml(&res_dir, background)?;
    println!("  ✓ Generated {ANDROID_RES}/mipmap-anydpi-v26/ic_launcher.xml");

    let ios_dir = app_dir.join(IOS_ICON_SET);
    write_contents_json(&ios_dir, ios_contents_entries()?)?;
    println!("  ✓ Generated {IOS_ICON_SET}/Contents.json");

    Ok(written)
}

/// Contents.json entries: one per (file, idiom) pair.
pub fn ios_contents_entries() -> Result<Vec<ImageEntry>> {
    let entries = ios_icons()?
        .iter()
        .flat_map(|icon| {
            icon.idioms
                .iter()
                .map(move |idiom| ImageEntry::new(&icon.filename, idiom, &icon.point, &icon.scale))
        })
        .collect();
    Ok(entries)
}

fn hex_color(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!("#{r:02X}{g:02X}{b:02X}")
    } else {
        format!("#{a:02X}{r:02X}{g:02X}{b:02X}")
    }
}

/// Adaptive-icon descriptors pairing the foreground drawables with a color background
fn generate_adaptive_icon_xml(res_dir: &Path, background: Rgba<u8>) -> Result<()> {
    let anydpi_dir = res_dir.join("mipmap-anydpi-v26");
    create_dir_all(&anydpi_dir)
        .with_context(|| format!("Can't create directory {}", anydpi_dir.display()))?;

    let adaptive_xml = r#"<?xml version="1.0" encoding="utf-8"?>
<adaptive-icon xmlns:android="http://schemas.android.com/apk/res/android">
    <background android:drawable="@color/ic_launcher_background" />
    <foreground android:drawable="@drawable/ic_launcher_foreground" />
</adaptive-icon>
"#;

    for filename in ["ic_launcher.xml", "ic_launcher_round.xml"] {
        std::fs::write(anydpi_dir.join(filename), adaptive_xml)
            .with_context(|| format!("Failed to write {filename}"))?;
    }

    let values_dir = res_dir.join("values");
    create_dir_all(&values_dir)
        .with_context(|| format!("Can't create directory {}", values_dir.display()))?;
    let color_xml = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <color name="ic_launcher_background">{}</color>
</resources>
"#,
        hex_color(background)
    );
    std::fs::write(values_dir.join("ic_launcher_background.xml"), color_xml)
        .context("Failed to write ic_launcher_background.xml")?;

    Ok(())
}
