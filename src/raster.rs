// Software rasterizer for the handful of primitives the tools need.
// Each shape is described by a signed distance (negative inside); the distance
// at a pixel centre turns into a coverage in [0,1], which scales the ink alpha.
// Visual: strokes get a one-pixel soft edge instead of jaggies.

use image::Rgba;

use crate::style::Color;
use crate::types::Point;

/// Something that can be stroked or filled onto a layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Thick segment with round caps.
    Capsule { a: Point, b: Point, radius: f32 },
    /// Circle outline: everything within `half_width` of the circle.
    Ring { center: Point, radius: f32, half_width: f32 },
    /// Rectangle outline with square corners, centred on the edges of `min..max`.
    Frame { min: Point, max: Point, half_width: f32 },
    /// Every pixel, full coverage.
    Everything,
}

impl Shape {
    /// Signed distance from `p` to the shape's edge.
    pub fn distance(&self, p: Point) -> f32 {
        match *self {
            Shape::Capsule { a, b, radius } => distance_to_segment(p, a, b) - radius,
            Shape::Ring { center, radius, half_width } => {
                (p.distance(center) - radius).abs() - half_width
            }
            Shape::Frame { min, max, half_width } => {
                let outer = box_distance(p, min.x - half_width, min.y - half_width, max.x + half_width, max.y + half_width);
                let (ix0, iy0) = (min.x + half_width, min.y + half_width);
                let (ix1, iy1) = (max.x - half_width, max.y - half_width);
                // Thick enough to close the hole: solid box.
                if ix0 >= ix1 || iy0 >= iy1 {
                    return outer;
                }
                outer.max(-box_distance(p, ix0, iy0, ix1, iy1))
            }
            Shape::Everything => f32::NEG_INFINITY,
        }
    }

    /// Pixel box (x0, y0, x1, y1), half-open, that can receive any coverage.
    /// Not clipped to the layer yet.
    pub fn pixel_bounds(&self) -> Option<(i64, i64, i64, i64)> {
        let (x0, y0, x1, y1) = match *self {
            Shape::Capsule { a, b, radius } => (
                a.x.min(b.x) - radius,
                a.y.min(b.y) - radius,
                a.x.max(b.x) + radius,
                a.y.max(b.y) + radius,
            ),
            Shape::Ring { center, radius, half_width } => {
                let r = radius + half_width;
                (center.x - r, center.y - r, center.x + r, center.y + r)
            }
            Shape::Frame { min, max, half_width } => (
                min.x - half_width,
                min.y - half_width,
                max.x + half_width,
                max.y + half_width,
            ),
            Shape::Everything => return None,
        };
        // One extra pixel for the soft edge.
        Some((
            (x0 - 1.0).floor() as i64,
            (y0 - 1.0).floor() as i64,
            (x1 + 1.0).ceil() as i64 + 1,
            (y1 + 1.0).ceil() as i64 + 1,
        ))
    }

    /// Coverage of the pixel whose top-left corner is (x,y).
    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        let centre = Point::new(x as f32 + 0.5, y as f32 + 0.5);
        (0.5 - self.distance(centre)).clamp(0.0, 1.0)
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len2 = abx * abx + aby * aby;
    // Zero-length segment: distance to the point (round dot).
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * abx, a.y + t * aby))
}

/// Signed distance to the axis-aligned box (x0,y0)-(x1,y1).
fn box_distance(p: Point, x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
    let (cx, cy) = ((x0 + x1) * 0.5, (y0 + y1) * 0.5);
    let (hx, hy) = ((x1 - x0) * 0.5, (y1 - y0) * 0.5);
    let qx = (p.x - cx).abs() - hx;
    let qy = (p.y - cy).abs() - hy;
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let inside = qx.max(qy).min(0.0);
    outside + inside
}

/* ---------------------------- Blending ---------------------------- */

/// Straight-alpha source-over of `src` with coverage `alpha` onto `dst`,
/// on encoded sRGB values like a browser canvas.
/// Visual: alpha 1 replaces the pixel, alpha 0 leaves it untouched.
pub fn over(dst: Rgba<u8>, src: Color, alpha: f32) -> Rgba<u8> {
    let sa = alpha.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    // Weight of the destination color in the result.
    let dw = da * (1.0 - sa);

    let mix = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * dw) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        mix(src.r, dst[0]),
        mix(src.g, dst[1]),
        mix(src.b, dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
