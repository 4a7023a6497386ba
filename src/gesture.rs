// Per-layer pointer gesture state machine: Idle -> Drawing -> Idle.
// Visual: brush and eraser paint a segment on every move while the button is
// held; shapes appear once, on release. Leaving the canvas drops the gesture.

use crate::surface::Mark;
use crate::tool::Tool;
use crate::types::Point;

/// Low-level pointer input over the canvas, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    Leave,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing {
        /// Where the pointer went down.
        start: Point,
        /// End of the free-hand path so far.
        last: Point,
    },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GestureHandler {
    state: GestureState,
}

impl GestureHandler {
    #[cfg(test)]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[cfg(test)]
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, GestureState::Drawing { .. })
    }

    /// Feed one event; returns the mark to commit, if any.
    /// `tool` is read per event, so switching tools mid-gesture takes effect.
    pub fn handle(&mut self, event: PointerEvent, tool: Tool) -> Option<Mark> {
        match event {
            PointerEvent::Down(at) => {
                self.pointer_down(at);
                None
            }
            PointerEvent::Move(at) => self.pointer_move(at, tool),
            PointerEvent::Up(at) => self.pointer_up(at, tool),
            PointerEvent::Leave => {
                self.pointer_leave();
                None
            }
        }
    }

    /// Start a gesture at `at`. A press while already drawing restarts it.
    pub fn pointer_down(&mut self, at: Point) {
        self.state = GestureState::Drawing { start: at, last: at };
    }

    pub fn pointer_move(&mut self, at: Point, tool: Tool) -> Option<Mark> {
        let GestureState::Drawing { start, last } = self.state else {
            return None;
        };
        if !tool.is_freehand() {
            // no live preview for shapes
            return None;
        }
        self.state = GestureState::Drawing { start, last: at };
        Some(Mark::Segment { from: last, to: at })
    }

    pub fn pointer_up(&mut self, at: Point, tool: Tool) -> Option<Mark> {
        let GestureState::Drawing { start, .. } = self.state else {
            return None;
        };
        self.state = GestureState::Idle;

        match tool {
            // already painted while moving
            Tool::Brush | Tool::Eraser => None,
            Tool::Rectangle => {
                let (width, height) = (at.x - start.x, at.y - start.y);
                if width == 0.0 && height == 0.0 {
                    return None;
                }
                Some(Mark::Rect { x: start.x, y: start.y, width, height })
            }
            Tool::Circle => {
                let radius = start.distance(at);
                (radius > 0.0).then_some(Mark::Circle { center: start, radius })
            }
            Tool::Line => (start != at).then_some(Mark::Segment { from: start, to: at }),
            Tool::Fill => Some(Mark::Fill),
        }
    }

    /// Abandon whatever was in progress.
    pub fn pointer_leave(&mut self) {
        self.state = GestureState::Idle;
    }
}
