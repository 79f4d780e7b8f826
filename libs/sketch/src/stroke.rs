use crate::{encoder, Raster};
use common::{AppError, CanvasImage, Point};

/// Bit of `MouseEvent.buttons` set while the primary button is held
pub const PRIMARY_BUTTON: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenState {
    Idle,
    Drawing,
}

/// Turns pointer-drag gestures into ink on a [`Raster`].
///
/// Only the anchor (the last reported point) is remembered, not the stroke
/// history. Each move with the primary button held draws one straight
/// segment from the anchor and then advances it.
#[derive(Debug, Clone)]
pub struct StrokeCapture {
    raster: Raster,
    anchor: Point,
    state: PenState,
}

impl StrokeCapture {
    pub fn new(raster: Raster) -> Self {
        Self {
            raster,
            anchor: Point::default(),
            state: PenState::Idle,
        }
    }

    /// Pointer went down: start a stroke at `at`
    pub fn press(&mut self, at: Point) {
        self.anchor = at;
        self.state = PenState::Drawing;
    }

    /// Pointer moved. Returns true if the raster changed.
    pub fn move_to(&mut self, at: Point, buttons: u16) -> bool {
        // A buttonless move means the release happened off the surface
        if buttons & PRIMARY_BUTTON == 0 {
            self.state = PenState::Idle;
            return false;
        }

        match self.state {
            PenState::Drawing => {
                self.raster.draw_segment(self.anchor, at);
                self.anchor = at;
                true
            }
            // Button went down outside the surface; the stroke starts here
            PenState::Idle => {
                self.press(at);
                false
            }
        }
    }

    pub fn release(&mut self) {
        self.state = PenState::Idle;
    }

    pub fn state(&self) -> PenState {
        self.state
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Encode the current buffer. Never cached; every call reflects the latest ink.
    pub fn snapshot(&self) -> Result<CanvasImage, AppError> {
        encoder::encode(&self.raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::StrokeStyle;

    fn capture() -> StrokeCapture {
        StrokeCapture::new(Raster::new(64, 64, &StrokeStyle::default()))
    }

    fn blank() -> Raster {
        Raster::new(64, 64, &StrokeStyle::default())
    }

    #[test]
    fn test_drag_matches_segments_through_every_point() {
        let points = [
            Point::new(5.0, 5.0),
            Point::new(12.5, 9.0),
            Point::new(30.0, 31.2),
            Point::new(31.0, 50.0),
            Point::new(8.0, 58.0),
        ];

        let mut capture = capture();
        capture.press(points[0]);
        for p in &points[1..] {
            assert!(capture.move_to(*p, PRIMARY_BUTTON));
        }

        let mut expected = blank();
        for pair in points.windows(2) {
            expected.draw_segment(pair[0], pair[1]);
        }

        assert_eq!(capture.raster(), &expected);
        assert_eq!(capture.anchor(), points[4]);
    }

    #[test]
    fn test_move_without_primary_button_is_ignored() {
        let mut capture = capture();
        capture.press(Point::new(10.0, 10.0));

        assert!(!capture.move_to(Point::new(40.0, 40.0), 0));
        // Secondary button alone does not draw either
        assert!(!capture.move_to(Point::new(40.0, 40.0), 2));

        assert_eq!(capture.raster(), &blank());
        assert_eq!(capture.state(), PenState::Idle);
    }

    #[test]
    fn test_move_after_buttonless_move_starts_new_stroke() {
        let mut capture = capture();
        capture.press(Point::new(10.0, 10.0));
        // Button released outside the surface, so no release event arrived
        assert!(!capture.move_to(Point::new(30.0, 30.0), 0));

        assert!(!capture.move_to(Point::new(50.0, 50.0), PRIMARY_BUTTON));
        assert_eq!(capture.raster(), &blank());
        assert_eq!(capture.anchor(), Point::new(50.0, 50.0));

        assert!(capture.move_to(Point::new(55.0, 50.0), PRIMARY_BUTTON));
        let mut expected = blank();
        expected.draw_segment(Point::new(50.0, 50.0), Point::new(55.0, 50.0));
        assert_eq!(capture.raster(), &expected);
    }

    #[test]
    fn test_primary_with_other_buttons_still_draws() {
        let mut capture = capture();
        capture.press(Point::new(10.0, 10.0));
        assert!(capture.move_to(Point::new(20.0, 10.0), PRIMARY_BUTTON | 4));
    }

    #[test]
    fn test_drag_entering_surface_starts_new_stroke() {
        let mut capture = capture();
        assert!(!capture.move_to(Point::new(3.0, 3.0), PRIMARY_BUTTON));
        assert_eq!(capture.state(), PenState::Drawing);
        assert_eq!(capture.raster(), &blank());

        assert!(capture.move_to(Point::new(9.0, 3.0), PRIMARY_BUTTON));
        let mut expected = blank();
        expected.draw_segment(Point::new(3.0, 3.0), Point::new(9.0, 3.0));
        assert_eq!(capture.raster(), &expected);
    }

    #[test]
    fn test_release_stops_stroke() {
        let mut capture = capture();
        capture.press(Point::new(1.0, 1.0));
        capture.release();
        assert_eq!(capture.state(), PenState::Idle);
    }

    #[test]
    fn test_snapshot_tracks_new_ink() {
        let mut capture = capture();
        let before = capture.snapshot().unwrap();

        capture.press(Point::new(10.0, 10.0));
        capture.move_to(Point::new(50.0, 50.0), PRIMARY_BUTTON);

        assert_ne!(capture.snapshot().unwrap(), before);
    }
}
