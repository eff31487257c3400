//! Contents.json data model for the iOS app icon set
//!
//! Mirrors the subset of Apple's asset catalog schema that an
//! `AppIcon.appiconset` needs: one image entry per file and idiom, plus
//! the versioning block Xcode expects.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Author recorded in generated catalogs, matching what Xcode writes itself
pub const CATALOG_AUTHOR: &str = "xcode";

/// Root structure of a Contents.json file
#[derive(Serialize, Debug, Clone)]
pub struct ContentsFile {
    /// Image entries for every size, scale and device idiom
    pub images: Vec<ImageEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Individual image entry within an asset catalog
///
/// The same file may appear in several entries when it serves more than
/// one idiom (e.g. a 40px file used by both iPhone and iPad).
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// The size of the image in points (e.g., "29x29", "83.5x83.5")
    pub size: String,

    /// The device type for the image (e.g., "iphone", "ipad", "ios-marketing")
    pub idiom: String,

    /// The filename inside the icon set
    pub filename: String,

    /// The scale factor for the image (e.g., "1x", "2x", "3x")
    pub scale: String,
}

/// Versioning and authorship information for the asset catalog
#[derive(Serialize, Debug, Clone)]
pub struct Info {
    /// The format version of the asset catalog (always 1)
    pub version: u8,

    /// The tool that authored the asset catalog
    pub author: String,
}

impl ContentsFile {
    /// Creates a new Contents.json structure with the specified author
    pub fn new(author: &str) -> Self {
        Self {
            images: Vec::new(),
            info: Info {
                version: 1,
                author: author.to_string(),
            },
        }
    }

    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }
}

impl ImageEntry {
    /// Creates an app icon entry
    ///
    /// # Arguments
    /// * `filename` - The filename for the icon
    /// * `idiom` - The device idiom
    /// * `size` - The size in points (e.g., "60x60")
    /// * `scale` - The scale factor (e.g., "2x")
    pub fn new(filename: &str, idiom: &str, size: &str, scale: &str) -> Self {
        Self {
            size: size.to_string(),
            idiom: idiom.to_string(),
            filename: filename.to_string(),
            scale: scale.to_string(),
        }
    }
}

/// Writes a Contents.json file to the specified directory
///
/// # Errors
/// Returns an error if serialization or the file write fails.
pub fn write_contents_json(dir: &Path, images: Vec<ImageEntry>) -> Result<()> {
    let mut contents = ContentsFile::new(CATALOG_AUTHOR);
    for image in images {
        contents.add_image(image);
    }

    let json =
        serde_json::to_string_pretty(&contents).context("Failed to serialize Contents.json")?;
    let path = dir.join("Contents.json");
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_file_creation() {
        let contents = ContentsFile::new("com.example.app");
        assert_eq!(contents.info.author, "com.example.app");
        assert_eq!(contents.info.version, 1);
        assert!(contents.images.is_empty());
    }

    #[test]
    fn test_single_entry_json_serialization() {
        let mut contents = ContentsFile::new(CATALOG_AUTHOR);
        contents.add_image(ImageEntry::new(
            "Icon-App-83.5x83.5@2x.png",
            "ipad",
            "83.5x83.5",
            "2x",
        ));

        let json = serde_json::to_string_pretty(&contents).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&json).expect("Generated JSON should be valid");

        assert_eq!(parsed["images"].as_array().unwrap().len(), 1);
        let image = &parsed["images"][0];
        assert_eq!(image["filename"], "Icon-App-83.5x83.5@2x.png");
        assert_eq!(image["idiom"], "ipad");
        assert_eq!(image["size"], "83.5x83.5");
        assert_eq!(image["scale"], "2x");
        assert_eq!(parsed["info"]["version"], 1);
        assert_eq!(parsed["info"]["author"], "xcode");
    }

    #[test]
    fn test_write_contents_json() {
        let temp_dir = tempfile::TempDir::new().unwrap();

        let images = vec![
            ImageEntry::new("Icon-App-29x29@1x.png", "iphone", "29x29", "1x"),
            ImageEntry::new("Icon-App-29x29@1x.png", "ipad", "29x29", "1x"),
        ];
        write_contents_json(temp_dir.path(), images).unwrap();

        let file_content =
            std::fs::read_to_string(temp_dir.path().join("Contents.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&file_content).unwrap();
        assert_eq!(parsed["images"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["images"][1]["idiom"], "ipad");
    }

    #[test]
    fn test_write_contents_json_missing_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        assert!(write_contents_json(&missing, Vec::new()).is_err());
    }
}
