// The whole drawing widget as one state object.
// Everything the window can do is a method here, so tests drive it directly
// without opening a window.

use crate::config::Config;
use crate::error::Error;
use crate::gesture::PointerEvent;
use crate::input::{InputEvent, PointerTracker};
use crate::panel::LayerPanel;
use crate::stack::SurfaceStack;
use crate::style::{Channel, Color, Style};
use crate::tool::{Tool, ToolSelector};
use crate::types::{FrameBuffer, Rect};
use crate::ui::{self, Control, Layout, PanelView, CANVAS_BACKGROUND};

#[derive(Debug)]
pub struct App {
    stack: SurfaceStack,
    panel: LayerPanel,
    tools: ToolSelector,
    style: Style,
    palette: Vec<Color>,
    thickness_step: f32,
    opacity_step: f32,
    color_step: u8,
    layout: Layout,
    pointer: PointerTracker,
    /// Composed layers over the canvas background; rebuilt when dirty.
    canvas: FrameBuffer,
    canvas_dirty: bool,
}

impl App {
    /// One blank layer, active, and the configured tool and style.
    pub fn new(config: &Config) -> Self {
        let stack = SurfaceStack::new(config.canvas.width, config.canvas.height);
        let layout = Layout::new(config.canvas.width, config.canvas.height, config.palette.len());
        let panel = LayerPanel::new(&stack, layout.visible_rows());
        let style = Style::new(config.style.color, config.style.thickness, config.style.opacity);
        let canvas = FrameBuffer::filled(
            config.canvas.width as usize,
            config.canvas.height as usize,
            CANVAS_BACKGROUND,
        );
        Self {
            stack,
            panel,
            tools: ToolSelector::new(config.tool),
            style,
            palette: config.palette.clone(),
            thickness_step: config.style.thickness_step,
            opacity_step: config.style.opacity_step,
            color_step: config.style.color_step,
            layout,
            pointer: PointerTracker::default(),
            canvas,
            canvas_dirty: true,
        }
    }

    pub fn stack(&self) -> &SurfaceStack {
        &self.stack
    }

    #[cfg(test)]
    pub fn panel(&self) -> &LayerPanel {
        &self.panel
    }

    pub fn tools(&self) -> &ToolSelector {
        &self.tools
    }

    #[cfg(test)]
    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /* ---------- Layers ---------- */

    pub fn add_layer(&mut self) {
        let index = self.stack.add_layer();
        log::debug!("Added layer {} ({} total)", index + 1, self.stack.len());
        self.layers_changed();
    }

    /// Silently refused when only one layer is left.
    pub fn remove_layer(&mut self) {
        if self.stack.remove_layer() {
            log::debug!("Removed layer, {} left, layer {} active", self.stack.len(), self.stack.active_index() + 1);
            self.layers_changed();
        } else {
            log::debug!("Refusing to remove the last layer");
        }
    }

    pub fn set_active_layer(&mut self, index: usize) -> Result<(), Error> {
        self.stack.set_active_layer(index)?;
        log::debug!("Layer {} active", index + 1);
        self.panel.rebuild(&self.stack);
        Ok(())
    }

    fn layers_changed(&mut self) {
        self.panel.rebuild(&self.stack);
        self.canvas_dirty = true;
    }

    /* ---------- Tool and style ---------- */

    pub fn select_tool(&mut self, tool: Tool) {
        if self.tools.select(tool) {
            log::debug!("Tool: {tool}");
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.set_color(color);
    }

    /// Nudge one channel of the current color by `delta`.
    pub fn step_channel(&mut self, channel: Channel, delta: i16) {
        self.set_color(self.style.color().step_channel(channel, delta));
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.style.set_thickness(thickness);
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.style.set_opacity(opacity);
    }

    /* ---------- Input ---------- */

    /// Route one pointer event to the active layer's gesture handler and
    /// commit whatever mark it produces, with the style as it is right now.
    pub fn pointer(&mut self, event: PointerEvent) {
        let tool = self.tools.active();
        let layer = self.stack.active_layer_mut();
        let Some(mark) = layer.gesture.handle(event, tool) else {
            return;
        };
        let ink = self.style.ink(tool);
        log::trace!("{tool} {mark:?} with {ink:?}");
        layer.surface.apply(&mark, &ink);
        self.canvas_dirty = true;
    }

    /// Act on a click in the control column.
    pub fn activate(&mut self, control: Control) {
        match control {
            Control::Tool(tool) => self.select_tool(tool),
            Control::Swatch(i) => {
                if let Some(&color) = self.palette.get(i) {
                    self.set_color(color);
                }
            }
            Control::ChannelDown(channel) => self.step_channel(channel, -i16::from(self.color_step)),
            Control::ChannelUp(channel) => self.step_channel(channel, i16::from(self.color_step)),
            Control::ThicknessDown => self.set_thickness(self.style.thickness() - self.thickness_step),
            Control::ThicknessUp => self.set_thickness(self.style.thickness() + self.thickness_step),
            Control::OpacityDown => self.set_opacity(step_opacity(self.style.opacity(), -self.opacity_step)),
            Control::OpacityUp => self.set_opacity(step_opacity(self.style.opacity(), self.opacity_step)),
            Control::AddLayer => self.add_layer(),
            Control::RemoveLayer => self.remove_layer(),
            Control::ScrollLayersUp => {
                self.panel.scroll(-1);
            }
            Control::ScrollLayersDown => {
                self.panel.scroll(1);
            }
            Control::LayerRow(i) => {
                // rows only exist for real layers
                if let Err(e) = self.set_active_layer(i) {
                    log::warn!("{e}");
                }
            }
        }
    }

    /// Feed one frame of polled mouse state (window coordinates).
    pub fn handle_mouse(&mut self, mouse: Option<(f32, f32)>, down: bool) {
        let canvas: Rect = self.layout.canvas();
        for event in self.pointer.update(mouse, down, canvas) {
            match event {
                InputEvent::Pointer(e) => self.pointer(e),
                InputEvent::Click { x, y } => {
                    if let Some(control) = self.layout.hit_test(x, y, &self.panel) {
                        self.activate(control);
                    }
                }
            }
        }
    }

    /* ---------- Output ---------- */

    /// Draw the layers (bottom first) and the control column into `screen`,
    /// which must be `layout().window_size()`.
    pub fn render(&mut self, screen: &mut FrameBuffer) {
        if self.canvas_dirty {
            self.canvas.pixels.fill(CANVAS_BACKGROUND);
            for layer in self.stack.layers() {
                layer.surface.composite_onto(&mut self.canvas, 0, 0);
            }
            self.canvas_dirty = false;
        }

        let w = self.canvas.width.min(screen.width);
        for (y, row) in self.canvas.pixels.chunks_exact(self.canvas.width).take(screen.height).enumerate() {
            let start = y * screen.width;
            screen.pixels[start..start + w].copy_from_slice(&row[..w]);
        }

        let view = PanelView {
            tools: &self.tools,
            style: &self.style,
            palette: &self.palette,
            layers: &self.panel,
        };
        ui::render_panel(screen, &self.layout, &view);
    }
}

/// Step opacity, snapped to 1/1000 so repeated 0.1 steps land on 0.7 and not 0.70000005.
fn step_opacity(current: f32, delta: f32) -> f32 {
    ((current + delta) * 1000.0).round() / 1000.0
}
