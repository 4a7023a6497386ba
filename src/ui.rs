// Window layout, control hit-testing and the control column renderer.
// The canvas sits at the window origin; everything else lives in a fixed-width
// column to its right.
// Visual:
//   TOOLS        six tool buttons
//   COLOR        palette swatches, four per row
//   R n / G n / B n   [-] [+]
//   SIZE n       [-] [+]
//   OPACITY n    [-] [+]
//   LAYERS       [ADD] [REMOVE]
//   1-6 OF 9     [UP] [DN]
//                as many layer rows as fit, scrolled to the active one

use crate::draw::{draw_text_5x7, fill_rect, outline_rect, text_width, GLYPH_HEIGHT};
use crate::panel::LayerPanel;
use crate::style::{Channel, Color, Style};
use crate::tool::{Tool, ToolSelector};
use crate::types::{FrameBuffer, Rect};

pub const PANEL_WIDTH: i32 = 170;

const PAD: i32 = 10;
const BUTTON_H: i32 = 18;
const GAP: i32 = 4;
const SWATCH: i32 = 30;
const SWATCHES_PER_ROW: usize = 4;
const STEP_W: i32 = 18;
const HEADER_H: i32 = 14;

const BG: u32 = 0x0030_3236;
const BUTTON: u32 = 0x0048_4B52;
const HIGHLIGHT: u32 = 0x0033_7AB7;
const TEXT: u32 = 0x00EE_EEEE;
const DIM_TEXT: u32 = 0x00A0_A4AA;
/// The container behind the bottom layer.
pub const CANVAS_BACKGROUND: u32 = 0x00FF_FFFF;

/// Something clickable in the control column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Tool(Tool),
    Swatch(usize),
    ChannelDown(Channel),
    ChannelUp(Channel),
    ThicknessDown,
    ThicknessUp,
    OpacityDown,
    OpacityUp,
    AddLayer,
    RemoveLayer,
    ScrollLayersUp,
    ScrollLayersDown,
    LayerRow(usize),
}

/// Where everything is, computed once from the canvas size and palette length.
#[derive(Clone, Debug)]
pub struct Layout {
    canvas: Rect,
    column_x: i32,
    tools_y: i32,
    swatches_y: i32,
    palette_len: usize,
    channels_y: i32,
    thickness_y: i32,
    opacity_y: i32,
    layer_buttons_y: i32,
    scroll_y: i32,
    rows_y: i32,
    height: i32,
}

impl Layout {
    pub fn new(canvas_width: u32, canvas_height: u32, palette_len: usize) -> Self {
        let canvas = Rect::new(0, 0, canvas_width as i32, canvas_height as i32);
        let column_x = canvas.w + PAD;

        let tools_y = PAD + HEADER_H;
        let tool_count = Tool::all().count() as i32;
        let tools_end = tools_y + tool_count * (BUTTON_H + GAP);

        let swatches_y = tools_end + PAD + HEADER_H;
        let swatch_rows = palette_len.div_ceil(SWATCHES_PER_ROW) as i32;
        let swatches_end = swatches_y + swatch_rows * (SWATCH + GAP);

        let channels_y = swatches_end + PAD;
        let thickness_y = channels_y + Channel::all().count() as i32 * (BUTTON_H + GAP);
        let opacity_y = thickness_y + BUTTON_H + GAP;
        let layer_buttons_y = opacity_y + BUTTON_H + PAD + HEADER_H;
        let scroll_y = layer_buttons_y + BUTTON_H + GAP;
        let rows_y = scroll_y + BUTTON_H + PAD;

        // Tall enough for the controls and a few layer rows, never shorter than the canvas.
        let height = canvas.h.max(rows_y + 4 * (BUTTON_H + GAP));

        Self {
            canvas,
            column_x,
            tools_y,
            swatches_y,
            palette_len,
            channels_y,
            thickness_y,
            opacity_y,
            layer_buttons_y,
            scroll_y,
            rows_y,
            height,
        }
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn window_size(&self) -> (usize, usize) {
        ((self.canvas.w + PANEL_WIDTH) as usize, self.height as usize)
    }

    /// How many layer rows fit below the layer controls; at least four.
    pub fn visible_rows(&self) -> usize {
        ((self.height - self.rows_y - BUTTON_H) / (BUTTON_H + GAP) + 1) as usize
    }

    fn column_width(&self) -> i32 {
        PANEL_WIDTH - 2 * PAD
    }

    fn tool_button(&self, i: usize) -> Rect {
        Rect::new(self.column_x, self.tools_y + i as i32 * (BUTTON_H + GAP), self.column_width(), BUTTON_H)
    }

    fn swatch(&self, i: usize) -> Rect {
        let (col, row) = ((i % SWATCHES_PER_ROW) as i32, (i / SWATCHES_PER_ROW) as i32);
        Rect::new(self.column_x + col * (SWATCH + GAP), self.swatches_y + row * (SWATCH + GAP), SWATCH, SWATCH)
    }

    fn channel_y(&self, i: usize) -> i32 {
        self.channels_y + i as i32 * (BUTTON_H + GAP)
    }

    /// (minus, plus) buttons at the right end of a stepper line.
    fn steppers(&self, y: i32) -> (Rect, Rect) {
        let right = self.column_x + self.column_width();
        (
            Rect::new(right - 2 * STEP_W - GAP, y, STEP_W, BUTTON_H),
            Rect::new(right - STEP_W, y, STEP_W, BUTTON_H),
        )
    }

    fn add_button(&self) -> Rect {
        let w = (self.column_width() - GAP) / 2;
        Rect::new(self.column_x, self.layer_buttons_y, w, BUTTON_H)
    }

    fn remove_button(&self) -> Rect {
        let add = self.add_button();
        Rect::new(add.x + add.w + GAP, self.layer_buttons_y, add.w, BUTTON_H)
    }

    /// The `slot`-th visible row, counted from the top of the list.
    fn layer_row(&self, slot: usize) -> Rect {
        Rect::new(self.column_x, self.rows_y + slot as i32 * (BUTTON_H + GAP), self.column_width(), BUTTON_H)
    }

    /// Which control, if any, is under window position (x,y).
    /// Layer rows are the ones `layers` currently shows.
    pub fn hit_test(&self, x: f32, y: f32, layers: &LayerPanel) -> Option<Control> {
        if let Some(tool) = Tool::all().enumerate().find(|(i, _)| self.tool_button(*i).contains(x, y)).map(|(_, t)| t) {
            return Some(Control::Tool(tool));
        }
        if let Some(i) = (0..self.palette_len).find(|&i| self.swatch(i).contains(x, y)) {
            return Some(Control::Swatch(i));
        }
        for (i, channel) in Channel::all().enumerate() {
            let (minus, plus) = self.steppers(self.channel_y(i));
            if minus.contains(x, y) {
                return Some(Control::ChannelDown(channel));
            }
            if plus.contains(x, y) {
                return Some(Control::ChannelUp(channel));
            }
        }
        let (minus, plus) = self.steppers(self.thickness_y);
        if minus.contains(x, y) {
            return Some(Control::ThicknessDown);
        }
        if plus.contains(x, y) {
            return Some(Control::ThicknessUp);
        }
        let (minus, plus) = self.steppers(self.opacity_y);
        if minus.contains(x, y) {
            return Some(Control::OpacityDown);
        }
        if plus.contains(x, y) {
            return Some(Control::OpacityUp);
        }
        if self.add_button().contains(x, y) {
            return Some(Control::AddLayer);
        }
        if self.remove_button().contains(x, y) {
            return Some(Control::RemoveLayer);
        }
        let (up, down) = self.steppers(self.scroll_y);
        if up.contains(x, y) {
            return Some(Control::ScrollLayersUp);
        }
        if down.contains(x, y) {
            return Some(Control::ScrollLayersDown);
        }
        layers
            .visible()
            .iter()
            .enumerate()
            .find(|(slot, _)| self.layer_row(*slot).contains(x, y))
            .map(|(_, row)| Control::LayerRow(row.index))
    }
}

/// Everything the column shows.
pub struct PanelView<'a> {
    pub tools: &'a ToolSelector,
    pub style: &'a Style,
    pub palette: &'a [Color],
    pub layers: &'a LayerPanel,
}

fn button(fb: &mut FrameBuffer, r: Rect, label: &str, active: bool) {
    fill_rect(fb, r, if active { HIGHLIGHT } else { BUTTON });
    let tx = r.x + (r.w - text_width(label)) / 2;
    let ty = r.y + (r.h - GLYPH_HEIGHT) / 2;
    draw_text_5x7(fb, tx, ty, label, TEXT);
}

/// Paint the control column (everything right of the canvas).
pub fn render_panel(fb: &mut FrameBuffer, layout: &Layout, view: &PanelView<'_>) {
    let column = Rect::new(layout.canvas.w, 0, PANEL_WIDTH, layout.height);
    fill_rect(fb, column, BG);
    // Below a short canvas the window is empty.
    fill_rect(fb, Rect::new(0, layout.canvas.h, layout.canvas.w, layout.height - layout.canvas.h), BG);

    let x = layout.column_x;
    draw_text_5x7(fb, x, layout.tools_y - HEADER_H + 2, "TOOLS", DIM_TEXT);
    for (i, tool) in Tool::all().enumerate() {
        button(fb, layout.tool_button(i), tool.label(), view.tools.is_selected(tool));
    }

    draw_text_5x7(fb, x, layout.swatches_y - HEADER_H + 2, &format!("COLOR {}", view.style.color()), DIM_TEXT);
    for (i, color) in view.palette.iter().enumerate() {
        let r = layout.swatch(i);
        fill_rect(fb, r, color.to_u32());
        if *color == view.style.color() {
            outline_rect(fb, r, HIGHLIGHT);
            outline_rect(fb, Rect::new(r.x + 1, r.y + 1, r.w - 2, r.h - 2), TEXT);
        }
    }

    let channels = Channel::all().enumerate().map(|(i, channel)| {
        (layout.channel_y(i), format!("{} {}", channel.label(), view.style.color().channel(channel)))
    });
    let steppers = channels.chain([
        (layout.thickness_y, format!("SIZE {:.0}", view.style.thickness())),
        (layout.opacity_y, format!("OPACITY {:.1}", view.style.opacity())),
    ]);
    for (y, label) in steppers {
        draw_text_5x7(fb, x, y + (BUTTON_H - GLYPH_HEIGHT) / 2, &label, TEXT);
        let (minus, plus) = layout.steppers(y);
        button(fb, minus, "-", false);
        button(fb, plus, "+", false);
    }

    draw_text_5x7(fb, x, layout.layer_buttons_y - HEADER_H + 2, "LAYERS", DIM_TEXT);
    button(fb, layout.add_button(), "ADD", false);
    button(fb, layout.remove_button(), "REMOVE", false);

    let shown = view.layers.visible();
    let first = view.layers.first();
    let range = format!("{}-{} OF {}", first + 1, first + shown.len(), view.layers.rows().len());
    draw_text_5x7(fb, x, layout.scroll_y + (BUTTON_H - GLYPH_HEIGHT) / 2, &range, TEXT);
    let (up, down) = layout.steppers(layout.scroll_y);
    button(fb, up, "UP", false);
    button(fb, down, "DN", false);
    for (slot, row) in shown.iter().enumerate() {
        button(fb, layout.layer_row(slot), &row.label, row.active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::SurfaceStack;

    fn centre(r: Rect) -> (f32, f32) {
        ((r.x + r.w / 2) as f32, (r.y + r.h / 2) as f32)
    }

    fn layout() -> Layout {
        Layout::new(900, 600, 8)
    }

    /// A panel over `n` layers with the last one active.
    fn panel(n: usize, capacity: usize) -> LayerPanel {
        let mut stack = SurfaceStack::new(4, 4);
        for _ in 1..n {
            stack.add_layer();
        }
        LayerPanel::new(&stack, capacity)
    }

    #[test]
    fn window_is_canvas_plus_column() {
        assert_eq!(layout().window_size(), (900 + PANEL_WIDTH as usize, 600));
        assert_eq!(layout().canvas(), Rect::new(0, 0, 900, 600));
    }

    #[test]
    fn every_control_is_reachable() {
        let l = layout();
        let layers = panel(1, l.visible_rows());
        let hit = |r: Rect| {
            let (x, y) = centre(r);
            l.hit_test(x, y, &layers)
        };
        for (i, tool) in Tool::all().enumerate() {
            assert_eq!(hit(l.tool_button(i)), Some(Control::Tool(tool)));
        }
        for i in 0..8 {
            assert_eq!(hit(l.swatch(i)), Some(Control::Swatch(i)));
        }
        for (i, channel) in Channel::all().enumerate() {
            let (minus, plus) = l.steppers(l.channel_y(i));
            assert_eq!(hit(minus), Some(Control::ChannelDown(channel)));
            assert_eq!(hit(plus), Some(Control::ChannelUp(channel)));
        }
        let (minus, plus) = l.steppers(l.thickness_y);
        assert_eq!(hit(minus), Some(Control::ThicknessDown));
        assert_eq!(hit(plus), Some(Control::ThicknessUp));
        let (minus, plus) = l.steppers(l.opacity_y);
        assert_eq!(hit(minus), Some(Control::OpacityDown));
        assert_eq!(hit(plus), Some(Control::OpacityUp));
        assert_eq!(hit(l.add_button()), Some(Control::AddLayer));
        assert_eq!(hit(l.remove_button()), Some(Control::RemoveLayer));
        let (up, down) = l.steppers(l.scroll_y);
        assert_eq!(hit(up), Some(Control::ScrollLayersUp));
        assert_eq!(hit(down), Some(Control::ScrollLayersDown));
    }

    #[test]
    fn layer_rows_only_hit_existing_layers() {
        let l = layout();
        let (x, y) = centre(l.layer_row(2));
        assert_eq!(l.hit_test(x, y, &panel(3, l.visible_rows())), Some(Control::LayerRow(2)));
        assert_eq!(l.hit_test(x, y, &panel(2, l.visible_rows())), None);
    }

    #[test]
    fn rows_fit_inside_the_window() {
        let l = layout();
        assert!(l.visible_rows() >= 4);
        let last = l.layer_row(l.visible_rows() - 1);
        assert!(last.bottom() <= l.window_size().1 as i32);
    }

    #[test]
    fn scrolled_rows_map_to_their_layers() {
        let l = layout();
        let layers = panel(20, l.visible_rows());
        // the newest layer is active, so the window ends on it
        let top = layers.first();
        assert_eq!(top + l.visible_rows(), 20);
        let (x, y) = centre(l.layer_row(0));
        assert_eq!(l.hit_test(x, y, &layers), Some(Control::LayerRow(top)));
        let (x, y) = centre(l.layer_row(l.visible_rows() - 1));
        assert_eq!(l.hit_test(x, y, &layers), Some(Control::LayerRow(19)));
    }

    #[test]
    fn empty_space_hits_nothing() {
        let l = layout();
        assert_eq!(l.hit_test(905.0, 3.0, &panel(1, 4)), None);
    }

    #[test]
    fn render_highlights_active_tool_and_layer() {
        let l = layout();
        let (w, h) = l.window_size();
        let mut fb = FrameBuffer::filled(w, h, 0);
        let mut tools = ToolSelector::default();
        tools.select(Tool::Line);
        let style = Style::default();
        let palette = [Color::BLACK, Color::WHITE];
        let layers = panel(2, l.visible_rows());
        render_panel(&mut fb, &l, &PanelView { tools: &tools, style: &style, palette: &palette, layers: &layers });

        let corner = |r: Rect| fb.get(r.x as usize, r.y as usize);
        assert_eq!(corner(l.tool_button(4)), Some(HIGHLIGHT));
        assert_eq!(corner(l.tool_button(0)), Some(BUTTON));
        assert_eq!(corner(l.layer_row(1)), Some(HIGHLIGHT));
        assert_eq!(corner(l.layer_row(0)), Some(BUTTON));
        // no third row to draw
        assert_eq!(corner(l.layer_row(2)), Some(BG));
        // canvas area is not touched
        assert_eq!(fb.get(10, 10), Some(0));
    }
}
