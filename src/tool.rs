// The fixed set of drawing tools and the single-selection state over it.
// Visual: one highlighted button in the TOOLS group at all times.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// What a pointer gesture on the canvas does.
///
/// Declaration order is the order of the tool buttons; the first one is the
/// startup default.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Free-hand stroke in the current color.
    #[default]
    Brush,
    /// Free-hand stroke in white.
    Eraser,
    /// Outline from press corner to release corner.
    Rectangle,
    /// Outline centered on the press point, through the release point.
    Circle,
    /// Straight segment from press to release.
    Line,
    /// Covers the whole active layer, wherever the gesture happened.
    Fill,
}

impl Tool {
    /// Tools that paint while the pointer moves instead of on release.
    pub fn is_freehand(self) -> bool {
        matches!(self, Tool::Brush | Tool::Eraser)
    }

    /// Upper-case label for the tool button.
    pub fn label(self) -> &'static str {
        match self {
            Tool::Brush => "BRUSH",
            Tool::Eraser => "ERASER",
            Tool::Rectangle => "RECTANGLE",
            Tool::Circle => "CIRCLE",
            Tool::Line => "LINE",
            Tool::Fill => "FILL",
        }
    }

    pub fn all() -> impl Iterator<Item = Tool> {
        Tool::iter()
    }
}

/// Exactly one tool is active at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToolSelector {
    active: Tool,
}

impl ToolSelector {
    pub fn new(initial: Tool) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> Tool {
        self.active
    }

    /// Make `tool` the active one. Returns false if it already was.
    pub fn select(&mut self, tool: Tool) -> bool {
        let changed = self.active != tool;
        self.active = tool;
        changed
    }

    /// Whether the button for `tool` is highlighted.
    pub fn is_selected(&self, tool: Tool) -> bool {
        self.active == tool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn first_tool_is_default() {
        assert_eq!(Tool::all().next(), Some(Tool::Brush));
        assert_eq!(ToolSelector::default().active(), Tool::Brush);
        assert_eq!(Tool::all().count(), 6);
    }

    #[test]
    fn selecting_twice_is_idempotent() {
        let mut sel = ToolSelector::default();
        assert!(sel.select(Tool::Circle));
        let after_first = sel;
        assert!(!sel.select(Tool::Circle));
        assert_eq!(sel, after_first);
        let highlighted: Vec<Tool> = Tool::all().filter(|t| sel.is_selected(*t)).collect();
        assert_eq!(highlighted, vec![Tool::Circle]);
    }

    #[test]
    fn names_round_trip_through_strum() {
        assert_eq!(Tool::Rectangle.to_string(), "rectangle");
        assert_eq!(Tool::from_str("fill").ok(), Some(Tool::Fill));
        let name: &'static str = Tool::Eraser.into();
        assert_eq!(name, "eraser");
    }

    #[test]
    fn only_brush_and_eraser_are_freehand() {
        let freehand: Vec<Tool> = Tool::all().filter(|t| t.is_freehand()).collect();
        assert_eq!(freehand, vec![Tool::Brush, Tool::Eraser]);
    }
}
