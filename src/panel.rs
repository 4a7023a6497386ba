// Layer list shown in the control column.
// Visual: one row per layer, "LAYER 1" at the top, the active row highlighted.
// When there are more layers than fit, a window of rows is shown and scrolls.

use crate::stack::SurfaceStack;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerRow {
    pub index: usize,
    pub label: String,
    pub active: bool,
}

/// Rows are rebuilt from scratch after every stack mutation. The only state
/// kept across rebuilds is which row is at the top of the visible window.
#[derive(Clone, Debug)]
pub struct LayerPanel {
    rows: Vec<LayerRow>,
    first: usize,
    capacity: usize,
}

impl LayerPanel {
    /// `capacity` is how many rows the column has room for (at least one).
    pub fn new(stack: &SurfaceStack, capacity: usize) -> Self {
        let mut panel = Self { rows: Vec::new(), first: 0, capacity: capacity.max(1) };
        panel.rebuild(stack);
        panel
    }

    /// Recompute the rows and scroll just enough to show the active one.
    pub fn rebuild(&mut self, stack: &SurfaceStack) {
        self.rows = (0..stack.len())
            .map(|index| LayerRow {
                index,
                label: format!("LAYER {}", index + 1),
                active: index == stack.active_index(),
            })
            .collect();

        let active = stack.active_index();
        if active < self.first {
            self.first = active;
        } else if active >= self.first + self.capacity {
            self.first = active + 1 - self.capacity;
        }
        self.first = self.first.min(self.max_first());
    }

    /// Every row, one per layer.
    pub fn rows(&self) -> &[LayerRow] {
        &self.rows
    }

    /// The rows currently on screen, top first.
    pub fn visible(&self) -> &[LayerRow] {
        let end = (self.first + self.capacity).min(self.rows.len());
        &self.rows[self.first..end]
    }

    pub fn first(&self) -> usize {
        self.first
    }

    /// Move the window by `delta` rows. Returns false if it was already at the end.
    pub fn scroll(&mut self, delta: isize) -> bool {
        let target = self.first.saturating_add_signed(delta).min(self.max_first());
        let changed = target != self.first;
        self.first = target;
        changed
    }

    fn max_first(&self) -> usize {
        self.rows.len().saturating_sub(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_the_stack() {
        let mut stack = SurfaceStack::new(4, 4);
        let mut panel = LayerPanel::new(&stack, 10);
        assert_eq!(panel.rows().len(), 1);
        assert!(panel.rows()[0].active);

        stack.add_layer();
        stack.add_layer();
        stack.set_active_layer(1).unwrap();
        panel.rebuild(&stack);

        let labels: Vec<&str> = panel.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["LAYER 1", "LAYER 2", "LAYER 3"]);
        let active: Vec<usize> = panel.rows().iter().filter(|r| r.active).map(|r| r.index).collect();
        assert_eq!(active, [1]);
        assert_eq!(panel.visible().len(), 3);
    }

    #[test]
    fn window_follows_the_active_layer() {
        let mut stack = SurfaceStack::new(4, 4);
        let mut panel = LayerPanel::new(&stack, 3);
        for _ in 0..5 {
            stack.add_layer();
        }
        panel.rebuild(&stack);
        // six layers, the newest active and shown last
        assert_eq!(panel.first(), 3);
        let shown: Vec<usize> = panel.visible().iter().map(|r| r.index).collect();
        assert_eq!(shown, [3, 4, 5]);
        assert!(panel.visible()[2].active);

        stack.set_active_layer(0).unwrap();
        panel.rebuild(&stack);
        assert_eq!(panel.first(), 0);
        assert!(panel.visible()[0].active);
    }

    #[test]
    fn scrolling_stops_at_both_ends() {
        let mut stack = SurfaceStack::new(4, 4);
        for _ in 0..4 {
            stack.add_layer();
        }
        let mut panel = LayerPanel::new(&stack, 2);
        assert_eq!(panel.first(), 3);
        assert!(!panel.scroll(1));
        assert!(panel.scroll(-2));
        assert_eq!(panel.first(), 1);
        assert!(panel.scroll(-5));
        assert_eq!(panel.first(), 0);
        assert!(!panel.scroll(-1));
    }

    #[test]
    fn removing_layers_pulls_the_window_back() {
        let mut stack = SurfaceStack::new(4, 4);
        for _ in 0..5 {
            stack.add_layer();
        }
        let mut panel = LayerPanel::new(&stack, 4);
        assert_eq!(panel.first(), 2);
        for _ in 0..4 {
            stack.remove_layer();
        }
        panel.rebuild(&stack);
        assert_eq!(panel.first(), 0);
        assert_eq!(panel.visible().len(), 2);
    }
}
