//! Asset pipeline for the NameDrill app icon.
//!
//! The [`compositor`] draws the icon artwork from fixed geometry, the
//! [`exporter`] fans a source bitmap out into every launcher, adaptive and
//! store size, and [`feature_graphic`] builds the 1024x500 store banner.

pub mod canvas;
pub mod compositor;
pub mod contents_json;
pub mod exporter;
pub mod feature_graphic;
pub mod font;
pub mod png;

use anyhow::{anyhow, Result};
use image::Rgba;
use std::str::FromStr;

/// Parse a CSS color string (e.g. `#6366f1`, `teal`) into an RGBA pixel.
pub fn parse_color(value: &str) -> Result<Rgba<u8>> {
    let color =
        css_color::Srgb::from_str(value).map_err(|_| anyhow!("Invalid color: {}", value))?;

    Ok(Rgba([
        (color.red * 255.).round() as u8,
        (color.green * 255.).round() as u8,
        (color.blue * 255.).round() as u8,
        (color.alpha * 255.).round() as u8,
    ]))
}
