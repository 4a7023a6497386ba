// Turns the window's polled mouse state into discrete events.
// minifb only tells us "where is the mouse" and "is the button down" once per
// frame, so presses, releases, moves and leaving the canvas are edges we detect here.

use crate::gesture::PointerEvent;
use crate::types::{Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer activity over the canvas, in canvas coordinates.
    Pointer(PointerEvent),
    /// Press outside the canvas, in window coordinates (control column).
    Click { x: f32, y: f32 },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    last_pos: Option<Point>, // last canvas-local position, None when outside
    was_down: bool,
}

impl PointerTracker {
    /// Feed one frame of mouse state. `mouse` is in window pixels, None when
    /// the cursor is outside the window; `canvas` is where the canvas sits.
    pub fn update(&mut self, mouse: Option<(f32, f32)>, down: bool, canvas: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let pressed = down && !self.was_down;
        let released = !down && self.was_down;
        self.was_down = down;

        let local = mouse
            .filter(|&(x, y)| canvas.contains(x, y))
            .map(|(x, y)| Point::new(x - canvas.x as f32, y - canvas.y as f32));

        match local {
            None => {
                if self.last_pos.take().is_some() {
                    events.push(InputEvent::Pointer(PointerEvent::Leave));
                }
                if let (true, Some((x, y))) = (pressed, mouse) {
                    events.push(InputEvent::Click { x, y });
                }
            }
            Some(p) => {
                // move first, then the button edge at the new spot
                if self.last_pos != Some(p) {
                    events.push(InputEvent::Pointer(PointerEvent::Move(p)));
                }
                self.last_pos = Some(p);
                if pressed {
                    events.push(InputEvent::Pointer(PointerEvent::Down(p)));
                }
                if released {
                    events.push(InputEvent::Pointer(PointerEvent::Up(p)));
                }
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Rect = Rect::new(0, 0, 100, 100);

    fn pointer(e: PointerEvent) -> InputEvent {
        InputEvent::Pointer(e)
    }

    #[test]
    fn press_drag_release() {
        let mut t = PointerTracker::default();
        assert_eq!(t.update(Some((10.0, 10.0)), false, CANVAS), vec![pointer(PointerEvent::Move(Point::new(10.0, 10.0)))]);
        assert_eq!(t.update(Some((10.0, 10.0)), true, CANVAS), vec![pointer(PointerEvent::Down(Point::new(10.0, 10.0)))]);
        assert_eq!(t.update(Some((20.0, 15.0)), true, CANVAS), vec![pointer(PointerEvent::Move(Point::new(20.0, 15.0)))]);
        assert_eq!(
            t.update(Some((30.0, 15.0)), false, CANVAS),
            vec![pointer(PointerEvent::Move(Point::new(30.0, 15.0))), pointer(PointerEvent::Up(Point::new(30.0, 15.0)))]
        );
        assert!(t.update(Some((30.0, 15.0)), false, CANVAS).is_empty());
    }

    #[test]
    fn leaving_the_canvas_emits_leave_once() {
        let mut t = PointerTracker::default();
        t.update(Some((50.0, 50.0)), true, CANVAS);
        assert_eq!(t.update(Some((150.0, 50.0)), true, CANVAS), vec![pointer(PointerEvent::Leave)]);
        assert!(t.update(None, true, CANVAS).is_empty());
        // releasing outside is not an Up
        assert!(t.update(None, false, CANVAS).is_empty());
    }

    #[test]
    fn press_outside_canvas_is_a_click() {
        let mut t = PointerTracker::default();
        assert!(t.update(Some((150.0, 20.0)), false, CANVAS).is_empty());
        assert_eq!(t.update(Some((150.0, 20.0)), true, CANVAS), vec![InputEvent::Click { x: 150.0, y: 20.0 }]);
        // holding is not another click
        assert!(t.update(Some((150.0, 20.0)), true, CANVAS).is_empty());
    }

    #[test]
    fn canvas_offset_is_subtracted() {
        let mut t = PointerTracker::default();
        let canvas = Rect::new(10, 20, 100, 100);
        assert_eq!(t.update(Some((15.0, 25.0)), false, canvas), vec![pointer(PointerEvent::Move(Point::new(5.0, 5.0)))]);
    }

    #[test]
    fn entering_with_button_held_does_not_press() {
        let mut t = PointerTracker::default();
        t.update(Some((150.0, 20.0)), true, CANVAS);
        let events = t.update(Some((50.0, 20.0)), true, CANVAS);
        assert_eq!(events, vec![pointer(PointerEvent::Move(Point::new(50.0, 20.0)))]);
    }
}
