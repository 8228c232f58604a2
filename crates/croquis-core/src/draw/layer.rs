//! Layer-based rendering for SVG output.
//!
//! Drawables choose the [`RenderLayer`] each of their nodes belongs to and
//! collect them in a [`LayeredOutput`]. Rendering sorts nodes by layer while
//! keeping insertion order within a layer, so element glyphs stay stacked in
//! the order the scene lists them.
//!
//! # Example
//!
//! ```
//! # use croquis_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Rectangle, Text};
//! let mut output = LayeredOutput::new();
//!
//! output.add_to_layer(RenderLayer::Label, Box::new(Text::new("NA")));
//! output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));
//!
//! // Background renders first even though it was added last.
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! assert!(groups[0].to_string().contains("data-layer=\"background\""));
//! ```

use log::trace;
use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers of a sketch, bottom to top.
///
/// The `Ord` derive follows declaration order, so the first variant renders
/// first (bottom) and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas background fill
    Background,
    /// Road surface polygons and the roundabout island
    Road,
    /// Dashed lane centerlines
    Marking,
    /// Vehicle and pedestrian glyphs
    Element,
    /// Editing chrome: selection rings, ownership tags, rotate and delete controls
    Chrome,
    /// Text labels above elements
    Label,
}

impl RenderLayer {
    /// Returns the name written to the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Road => "road",
            Self::Marking => "marking",
            Self::Element => "element",
            Self::Chrome => "chrome",
            Self::Label => "label",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    ///
    /// Nodes are kept in the order they are added.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends every node of `other`, after the nodes already present.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Wraps the nodes of each layer in a group carrying `transform`.
    ///
    /// One group is produced per layer that has nodes, so a rotated glyph
    /// keeps its layer assignment while every part of it shares the same
    /// transform.
    ///
    /// ```
    /// # use croquis_core::draw::{RenderLayer, LayeredOutput};
    /// # use svg::node::element::Rectangle;
    /// let mut glyph = LayeredOutput::new();
    /// glyph.add_to_layer(RenderLayer::Element, Box::new(Rectangle::new()));
    /// glyph.add_to_layer(RenderLayer::Element, Box::new(Rectangle::new()));
    ///
    /// let placed = glyph.with_transform("translate(10, 20) rotate(90)");
    /// let groups = placed.render();
    /// let svg = groups[0].to_string();
    /// assert_eq!(svg.matches("transform=").count(), 1);
    /// ```
    pub fn with_transform(self, transform: &str) -> Self {
        let mut grouped: Vec<(RenderLayer, svg_element::Group)> = Vec::new();

        for (layer, node) in self.items {
            match grouped.iter_mut().find(|(existing, _)| *existing == layer) {
                Some((_, group)) => {
                    let taken = std::mem::replace(group, svg_element::Group::new());
                    *group = taken.add(node);
                }
                None => {
                    let group = svg_element::Group::new()
                        .set("transform", transform)
                        .add(node);
                    grouped.push((layer, group));
                }
            }
        }

        Self {
            items: grouped
                .into_iter()
                .map(|(layer, group)| (layer, Box::new(group) as SvgNode))
                .collect(),
        }
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer. Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order inside a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());
        let mut current_count = 0usize;

        for (layer, node) in self.items {
            if layer != current_layer {
                trace!(layer = current_layer.name(), nodes = current_count; "Layer rendered");
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
                current_count = 0;
            }

            current_group = current_group.add(node);
            current_count += 1;
        }

        trace!(layer = current_layer.name(), nodes = current_count; "Layer rendered");
        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
