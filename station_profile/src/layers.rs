use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::styles::LayerStyle;

/// Representation of a drawing layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(default)]
    pub style: LayerStyle,
}

impl Layer {
    /// Creates a layer with the given AutoCAD colour index.
    pub fn with_color(name: &str, color: u8) -> Self {
        Self {
            name: name.to_string(),
            style: LayerStyle::new(color),
        }
    }
}

/// Manager for an arbitrary number of layers, remembering creation order.
#[derive(Debug, Default, Clone)]
pub struct LayerManager {
    layers: HashMap<String, Layer>,
    order: Vec<String>,
}

impl LayerManager {
    /// Creates an empty layer manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the layer unless one with the same name exists.
    ///
    /// Returns `true` when the layer was added.
    pub fn ensure_layer(&mut self, layer: Layer) -> bool {
        if self.layers.contains_key(&layer.name) {
            return false;
        }
        self.order.push(layer.name.clone());
        self.layers.insert(layer.name.clone(), layer);
        true
    }

    /// Retrieves a layer by name.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// Iterator over all layer names in creation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|k| k.as_str())
    }

    /// Iterator over all layers in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.order.iter().filter_map(|k| self.layers.get(k))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
