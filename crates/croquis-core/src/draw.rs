//! Drawing primitives shared by the live preview and the exported document.
//!
//! All drawable components implement the [`Drawable`] trait, which renders
//! into a [`LayeredOutput`] so that road geometry, element glyphs, editing
//! chrome and labels end up stacked in a fixed order regardless of the order
//! in which they were produced.

mod layer;
mod positioned;
mod stroke;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use positioned::PositionedDrawable;
pub use stroke::StrokeDefinition;

use crate::geometry::{Point, Size};

/// Trait for sketch components that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// `position` is the point the drawable's local origin is placed at.
    /// Drawables defined around their own center treat it as the center.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the unrotated footprint of this drawable.
    fn size(&self) -> Size;
}
