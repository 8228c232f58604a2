//! Provides `PositionedDrawable`, a drawable placed at a point with a rotation.

use crate::{
    draw::{Drawable, LayeredOutput},
    geometry::{Bounds, Point, Size, normalize_degrees},
};

/// A drawable object together with an absolute position and a rotation.
///
/// The wrapped drawable is rendered around its local origin and then placed
/// with a single `translate(x, y) rotate(r)` transform, so the rotation pivots
/// on the drawable's origin.
#[derive(Debug, Clone)]
pub struct PositionedDrawable<D: Drawable> {
    drawable: D,
    position: Point,
    rotation: f32,
}

impl<D: Drawable> PositionedDrawable<D> {
    /// Construct a new `PositionedDrawable` at the origin with no rotation.
    pub fn new(drawable: D) -> Self {
        Self {
            drawable,
            position: Point::default(),
            rotation: 0.0,
        }
    }

    /// Set the position for this drawable (builder style).
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Set the rotation in degrees (builder style). The value is normalized into `[0, 360)`.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = normalize_degrees(degrees);
        self
    }

    /// Returns the SVG transform that places the drawable.
    ///
    /// ```
    /// # use croquis_core::draw::{Drawable, LayeredOutput, PositionedDrawable};
    /// # use croquis_core::geometry::{Point, Size};
    /// # #[derive(Debug)]
    /// # struct Dot;
    /// # impl Drawable for Dot {
    /// #     fn render_to_layers(&self, _: Point) -> LayeredOutput { LayeredOutput::new() }
    /// #     fn size(&self) -> Size { Size::new(4.0, 4.0) }
    /// # }
    /// let placed = PositionedDrawable::new(Dot)
    ///     .with_position(Point::new(120.5, 200.0))
    ///     .with_rotation(-90.0);
    /// assert_eq!(placed.transform(), "translate(120.5, 200) rotate(270)");
    /// ```
    pub fn transform(&self) -> String {
        format!(
            "translate({}, {}) rotate({})",
            self.position.x(),
            self.position.y(),
            self.rotation
        )
    }

    /// Render this positioned drawable to layers, using the inner drawable's implementation.
    pub fn render_to_layers(&self) -> LayeredOutput {
        self.drawable
            .render_to_layers(Point::default())
            .with_transform(&self.transform())
    }

    /// Axis-aligned bounds of the rotated footprint.
    pub fn bounds(&self) -> Bounds {
        let size = self.drawable.size();
        let half = size.center();
        let corners = [
            Point::new(-half.x(), -half.y()),
            Point::new(half.x(), -half.y()),
            Point::new(half.x(), half.y()),
            Point::new(-half.x(), half.y()),
        ];

        corners
            .iter()
            .map(|corner| {
                let rotated = corner.rotate(self.rotation).add_point(self.position);
                Bounds::new_from_center(rotated, Size::default())
            })
            .reduce(|acc, corner| acc.merge(&corner))
            .unwrap_or_default()
    }

    /// Get a reference to the inner drawable
    pub fn inner(&self) -> &D {
        &self.drawable
    }

    /// Get the position of this drawable
    pub fn position(&self) -> Point {
        self.position
    }

    /// Get the rotation of this drawable in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

impl<D: Drawable> Drawable for PositionedDrawable<D> {
    fn render_to_layers(&self, _position: Point) -> LayeredOutput {
        // Ignore the passed position and use our stored position
        self.render_to_layers()
    }

    fn size(&self) -> Size {
        self.drawable.size()
    }
}
