// One layer's pixels and the drawing primitives that write to them.
// Visual: a fresh surface is fully transparent, so layers below show through.

use image::{Rgba, RgbaImage};

use crate::raster::{self, Shape};
use crate::style::{Color, Ink};
use crate::types::{FrameBuffer, Point};

pub const DEFAULT_WIDTH: u32 = 900;
pub const DEFAULT_HEIGHT: u32 = 600;

/// One committed drawing primitive, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mark {
    /// Straight stroke with round caps (free-hand pieces and the line tool).
    Segment { from: Point, to: Point },
    /// Outline through (x,y) and (x+width, y+height); extents may be negative.
    Rect { x: f32, y: f32, width: f32, height: f32 },
    /// Outline of the circle around `center`.
    Circle { center: Point, radius: f32 },
    /// The whole surface.
    Fill,
}

impl Mark {
    /// Geometry to rasterize for this mark with a stroke `width` wide.
    pub fn shape(&self, width: f32) -> Shape {
        let half = width * 0.5;
        match *self {
            Mark::Segment { from, to } => Shape::Capsule { a: from, b: to, radius: half },
            Mark::Rect { x, y, width: w, height: h } => Shape::Frame {
                // normalize whichever way the drag went
                min: Point::new(x.min(x + w), y.min(y + h)),
                max: Point::new(x.max(x + w), y.max(y + h)),
                half_width: half,
            },
            Mark::Circle { center, radius } => Shape::Ring { center, radius, half_width: half },
            Mark::Fill => Shape::Everything,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// A transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height) }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at (x,y). Panics outside the surface, like `ImageBuffer`.
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    #[cfg(test)]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Rasterize `mark` with `ink`, blending every touched pixel exactly once.
    pub fn apply(&mut self, mark: &Mark, ink: &Ink) {
        let shape = mark.shape(ink.width);
        let (w, h) = (self.width() as i64, self.height() as i64);
        let (x0, y0, x1, y1) = match shape.pixel_bounds() {
            Some((x0, y0, x1, y1)) => (x0.max(0), y0.max(0), x1.min(w), y1.min(h)),
            None => (0, 0, w, h),
        };
        if x0 >= x1 || y0 >= y1 {
            return; // entirely off the surface
        }

        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                let cov = shape.coverage(x, y);
                if cov <= 0.0 {
                    continue;
                }
                let px = self.image.get_pixel_mut(x, y);
                *px = raster::over(*px, ink.color, ink.opacity * cov);
            }
        }
    }

    /// Draw this surface over `screen` with its top-left at (ox,oy).
    /// Visual: transparent pixels let whatever is already on screen show through.
    pub fn composite_onto(&self, screen: &mut FrameBuffer, ox: usize, oy: usize) {
        for (x, y, px) in self.image.enumerate_pixels() {
            if px[3] == 0 {
                continue;
            }
            let (sx, sy) = (ox + x as usize, oy + y as usize);
            if sx >= screen.width || sy >= screen.height {
                continue;
            }
            let idx = sy * screen.width + sx;
            let old = screen.pixels[idx];
            let below = Rgba([(old >> 16) as u8, (old >> 8) as u8, old as u8, 255]);
            let src = Color::rgb(px[0], px[1], px[2]);
            let out = raster::over(below, src, px[3] as f32 / 255.0);
            screen.pixels[idx] = ((out[0] as u32) << 16) | ((out[1] as u32) << 8) | out[2] as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn new_surface_is_transparent() {
        let s = Surface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert_eq!((s.width(), s.height()), (900, 600));
        assert!(s.image().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn rect_outline_is_unfilled() {
        let mut s = Surface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let ink = Ink { color: RED, width: 4.0, opacity: 1.0 };
        s.apply(&Mark::Rect { x: 10.0, y: 10.0, width: 100.0, height: 50.0 }, &ink);

        let red = Rgba([255, 0, 0, 255]);
        // all four edges
        assert_eq!(s.pixel(10, 30), red);
        assert_eq!(s.pixel(109, 30), red);
        assert_eq!(s.pixel(60, 10), red);
        assert_eq!(s.pixel(60, 59), red);
        // interior and exterior untouched
        assert_eq!(s.pixel(60, 35)[3], 0);
        assert_eq!(s.pixel(3, 3)[3], 0);
        assert_eq!(s.pixel(200, 200)[3], 0);
    }

    #[test]
    fn negative_extents_draw_the_same_rect() {
        let ink = Ink { color: RED, width: 4.0, opacity: 1.0 };
        let mut forward = Surface::new(200, 100);
        let mut backward = Surface::new(200, 100);
        forward.apply(&Mark::Rect { x: 10.0, y: 10.0, width: 100.0, height: 50.0 }, &ink);
        backward.apply(&Mark::Rect { x: 110.0, y: 60.0, width: -100.0, height: -50.0 }, &ink);
        assert_eq!(forward.image(), backward.image());
    }

    #[test]
    fn fill_covers_everything_at_opacity() {
        let mut s = Surface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let ink = Ink { color: BLUE, width: 1.0, opacity: 0.5 };
        s.apply(&Mark::Fill, &ink);
        assert!(s.image().pixels().all(|p| *p == Rgba([0, 0, 255, 128])));
    }

    #[test]
    fn circle_outline_passes_through_release_point() {
        let mut s = Surface::new(200, 200);
        let ink = Ink { color: RED, width: 3.0, opacity: 1.0 };
        s.apply(&Mark::Circle { center: Point::new(100.0, 100.0), radius: 50.0 }, &ink);
        assert_eq!(s.pixel(149, 99)[3], 255);
        assert_eq!(s.pixel(99, 49)[3], 255);
        assert_eq!(s.pixel(100, 100)[3], 0);
        assert_eq!(s.pixel(170, 100)[3], 0);
    }

    #[test]
    fn marks_off_the_surface_are_clipped() {
        let mut s = Surface::new(50, 50);
        let ink = Ink { color: RED, width: 4.0, opacity: 1.0 };
        s.apply(&Mark::Segment { from: Point::new(-100.0, -100.0), to: Point::new(-50.0, -50.0) }, &ink);
        assert!(s.image().pixels().all(|p| p[3] == 0));
        s.apply(&Mark::Segment { from: Point::new(-10.0, 25.0), to: Point::new(60.0, 25.0) }, &ink);
        assert_eq!(s.pixel(0, 24)[3], 255);
        assert_eq!(s.pixel(49, 24)[3], 255);
    }

    #[test]
    fn composite_shows_layer_over_white() {
        let mut s = Surface::new(4, 4);
        s.apply(&Mark::Fill, &Ink { color: BLUE, width: 1.0, opacity: 0.5 });
        let mut screen = FrameBuffer::filled(6, 6, 0x00FF_FFFF);
        s.composite_onto(&mut screen, 1, 1);
        assert_eq!(screen.get(0, 0), Some(0x00FF_FFFF));
        // 50% blue over white (alpha 128/255)
        assert_eq!(screen.get(1, 1), Some(0x007F_7FFF));
    }
}
