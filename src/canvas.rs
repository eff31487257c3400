//! Raster canvas and the shape primitives the icon artwork is built from.
//!
//! Boxes use inclusive pixel corners: `BBox::new(0, 0, 9, 9)` spans ten pixels
//! in each direction. A pixel is painted when its center falls inside the
//! shape, so fills carry no anti-aliasing and are reproducible bit for bit.

use image::{Rgba, RgbaImage};

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Axis-aligned bounding box with inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BBox {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box of a circle with the given center and radius.
    pub fn around(center: (i32, i32), radius: i32) -> Self {
        Self::new(
            center.0 - radius,
            center.1 - radius,
            center.0 + radius,
            center.1 + radius,
        )
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }

    pub fn width(&self) -> f32 {
        (self.x1 - self.x0 + 1).max(0) as f32
    }

    pub fn height(&self) -> f32 {
        (self.y1 - self.y0 + 1).max(0) as f32
    }

    // Continuous extent: left, top, right, bottom
    fn edges(&self) -> (f32, f32, f32, f32) {
        (
            self.x0 as f32,
            self.y0 as f32,
            (self.x1 + 1) as f32,
            (self.y1 + 1) as f32,
        )
    }
}

/// A geometric primitive placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect(BBox),
    /// Radius is clamped to half the shorter side.
    RoundedRect { bbox: BBox, radius: u32 },
    Ellipse(BBox),
    /// Straight segment between two pixel positions with round caps.
    Line {
        from: (i32, i32),
        to: (i32, i32),
        width: u32,
    },
}

impl Shape {
    /// Whether the point (in continuous pixel coordinates) lies inside the shape.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match *self {
            Shape::Rect(bbox) => {
                let (left, top, right, bottom) = bbox.edges();
                x >= left && x <= right && y >= top && y <= bottom
            }
            Shape::RoundedRect { bbox, radius } => {
                let (left, top, right, bottom) = bbox.edges();
                if x < left || x > right || y < top || y > bottom {
                    return false;
                }
                let r = (radius as f32).min(bbox.width() / 2.0).min(bbox.height() / 2.0);
                if r <= 0.0 {
                    return true;
                }
                // Distance to the inner rectangle the corners are centered on
                let dx = x - x.clamp(left + r, right - r);
                let dy = y - y.clamp(top + r, bottom - r);
                dx * dx + dy * dy <= r * r
            }
            Shape::Ellipse(bbox) => {
                let (left, top, right, bottom) = bbox.edges();
                let rx = (right - left) / 2.0;
                let ry = (bottom - top) / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let nx = (x - (left + rx)) / rx;
                let ny = (y - (top + ry)) / ry;
                nx * nx + ny * ny <= 1.0
            }
            Shape::Line { from, to, width } => {
                let (ax, ay) = (from.0 as f32 + 0.5, from.1 as f32 + 0.5);
                let (bx, by) = (to.0 as f32 + 0.5, to.1 as f32 + 0.5);
                let (vx, vy) = (bx - ax, by - ay);
                let len_sq = vx * vx + vy * vy;
                let t = if len_sq == 0.0 {
                    0.0
                } else {
                    (((x - ax) * vx + (y - ay) * vy) / len_sq).clamp(0.0, 1.0)
                };
                let dx = x - (ax + t * vx);
                let dy = y - (ay + t * vy);
                let half = width as f32 / 2.0;
                dx * dx + dy * dy <= half * half
            }
        }
    }

    /// Pixel box guaranteed to enclose every covered pixel.
    fn extent(&self) -> BBox {
        match *self {
            Shape::Rect(bbox) | Shape::RoundedRect { bbox, .. } | Shape::Ellipse(bbox) => bbox,
            Shape::Line { from, to, width } => {
                let pad = (width as i32 + 1) / 2 + 1;
                BBox::new(
                    from.0.min(to.0) - pad,
                    from.1.min(to.1) - pad,
                    from.0.max(to.0) + pad,
                    from.1.max(to.1) + pad,
                )
            }
        }
    }
}

/// Blend `color` over the pixel at (x, y); positions outside the image are ignored.
pub fn blend_pixel(image: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= image.width() as i32 || y >= image.height() as i32 {
        return;
    }
    let pixel = image.get_pixel_mut(x as u32, y as u32);
    *pixel = source_over(*pixel, color);
}

/// Integer source-over compositing. An opaque destination stays opaque.
pub fn source_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as u32;
    let da = dst[3] as u32;
    match sa {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    // Output alpha scaled by 255: sa*255 + da*(255 - sa)
    let coverage = sa * 255 + da * (255 - sa);
    if coverage == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let premultiplied = src[i] as u32 * sa * 255 + dst[i] as u32 * da * (255 - sa);
        ((premultiplied + coverage / 2) / coverage) as u8
    };
    let alpha = if da == 255 {
        255
    } else {
        ((coverage + 127) / 255) as u8
    };

    Rgba([channel(0), channel(1), channel(2), alpha])
}

/// An RGBA raster buffer that shapes are filled onto.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// A fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, color),
        }
    }

    /// Fill a shape, compositing `color` over what is already drawn.
    pub fn fill(&mut self, shape: &Shape, color: Rgba<u8>) {
        let extent = shape.extent();
        let x_start = extent.x0.max(0);
        let y_start = extent.y0.max(0);
        let x_end = extent.x1.min(self.image.width() as i32 - 1);
        let y_end = extent.y1.min(self.image.height() as i32 - 1);

        for y in y_start..=y_end {
            for x in x_start..=x_end {
                if shape.contains(x as f32 + 0.5, y as f32 + 0.5) {
                    blend_pixel(&mut self.image, x, y, color);
                }
            }
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
