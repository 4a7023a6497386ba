// The ordered layer list and which layer is active.
// Visual: later layers sit on top; the active one receives the pointer's marks.

use crate::error::Error;
use crate::gesture::GestureHandler;
use crate::surface::Surface;

/// A surface plus the gesture handler attached to it.
#[derive(Clone, Debug)]
pub struct Layer {
    pub surface: Surface,
    pub gesture: GestureHandler,
}

impl Layer {
    fn new(width: u32, height: u32) -> Self {
        Self { surface: Surface::new(width, height), gesture: GestureHandler::default() }
    }
}

/// Never empty; `active` always indexes a layer.
#[derive(Clone, Debug)]
pub struct SurfaceStack {
    layers: Vec<Layer>,
    active: usize,
    width: u32,
    height: u32,
}

impl SurfaceStack {
    /// One blank layer, active.
    pub fn new(width: u32, height: u32) -> Self {
        Self { layers: vec![Layer::new(width, height)], active: 0, width, height }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Bottom to top.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    #[cfg(test)]
    pub fn active_layer(&self) -> &Layer {
        &self.layers[self.active]
    }

    pub fn active_layer_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.active]
    }

    /// Push a blank layer on top and make it active. Returns its index.
    pub fn add_layer(&mut self) -> usize {
        self.layers.push(Layer::new(self.width, self.height));
        self.active = self.layers.len() - 1;
        self.active
    }

    /// Remove the active layer unless it is the only one.
    /// The layer below (or the bottom one) becomes active.
    pub fn remove_layer(&mut self) -> bool {
        if self.layers.len() <= 1 {
            return false;
        }
        self.layers.remove(self.active);
        self.active = self.active.saturating_sub(1);
        true
    }

    /// Out-of-range indices are rejected and leave the stack as it was.
    pub fn set_active_layer(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.layers.len() {
            return Err(Error::LayerOutOfRange { index, len: self.layers.len() });
        }
        self.active = index;
        Ok(())
    }
}
