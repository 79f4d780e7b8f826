use common::{Point, StrokeStyle};
use image::{Rgba, RgbaImage};

// Distance between pen stamps along a segment, in pixels
const STAMP_SPACING: f64 = 0.25;

/// Persistent pixel buffer of a drawing surface.
///
/// Starts as a solid background fill so exported images never contain
/// transparent regions. Only ever painted on, never erased.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: RgbaImage,
    pen: Rgba<u8>,
    pen_radius: f64,
}

impl Raster {
    pub fn new(width: u32, height: u32, style: &StrokeStyle) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(style.background)),
            pen: Rgba(style.color),
            pen_radius: style.width / 2.0,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Row-major RGBA bytes, ready for `ImageData`
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Draw a straight line with the fixed pen
    pub fn draw_segment(&mut self, from: Point, to: Point) {
        let steps = (from.distance(&to) / STAMP_SPACING).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.stamp(Point::new(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            ));
        }
    }

    /// Paint every pixel whose center lies under a round pen at `center`
    fn stamp(&mut self, center: Point) {
        let reach = self.pen_radius.ceil() as i64 + 1;
        let cx = center.x.floor() as i64;
        let cy = center.y.floor() as i64;

        for py in (cy - reach)..=(cy + reach) {
            for px in (cx - reach)..=(cx + reach) {
                if px < 0 || py < 0 || px >= self.width() as i64 || py >= self.height() as i64 {
                    continue;
                }
                let pixel_center = Point::new(px as f64 + 0.5, py as f64 + 0.5);
                // The pixel under the pointer is always inked, even for hairline pens
                let covered = (px == cx && py == cy)
                    || pixel_center.distance(&center) <= self.pen_radius;
                if covered {
                    self.pixels.put_pixel(px as u32, py as u32, self.pen);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn raster() -> Raster {
        Raster::new(28, 28, &StrokeStyle::default())
    }

    fn inked(raster: &Raster) -> usize {
        raster.pixels().pixels().filter(|p| **p == BLACK).count()
    }

    #[test]
    fn test_new_raster_is_opaque_background() {
        let raster = raster();
        assert_eq!(raster.as_raw().len(), 28 * 28 * 4);
        assert!(raster.pixels().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_horizontal_segment_inks_its_row() {
        let mut raster = raster();
        raster.draw_segment(Point::new(4.5, 10.5), Point::new(20.5, 10.5));

        for x in 4..=20 {
            assert_eq!(*raster.pixels().get_pixel(x, 10), BLACK, "x = {}", x);
        }
        // Pen is 3 wide, so rows 2 away stay clean
        assert_eq!(*raster.pixels().get_pixel(12, 13), WHITE);
        assert_eq!(*raster.pixels().get_pixel(12, 7), WHITE);
    }

    #[test]
    fn test_zero_length_segment_leaves_a_dot() {
        let mut raster = raster();
        raster.draw_segment(Point::new(14.2, 14.7), Point::new(14.2, 14.7));
        assert_eq!(*raster.pixels().get_pixel(14, 14), BLACK);
        assert!(inked(&raster) > 0);
    }

    #[test]
    fn test_segment_outside_surface_is_clipped() {
        let mut raster = raster();
        raster.draw_segment(Point::new(-10.0, -10.0), Point::new(100.0, -10.0));
        assert_eq!(inked(&raster), 0);

        raster.draw_segment(Point::new(20.0, 20.0), Point::new(60.0, 60.0));
        assert!(inked(&raster) > 0);
    }

    #[test]
    fn test_drawing_is_deterministic() {
        let mut a = raster();
        let mut b = raster();
        a.draw_segment(Point::new(1.3, 2.9), Point::new(25.1, 17.4));
        b.draw_segment(Point::new(1.3, 2.9), Point::new(25.1, 17.4));
        assert_eq!(a, b);
    }
}
