//! Stroke definitions for road outlines and lane markings.
//!
//! A [`StrokeDefinition`] is either solid or carries an SVG dash pattern.
//! [`apply_stroke!`](crate::apply_stroke!) writes it onto any SVG element.
//!
//! # Example
//!
//! ```
//! use croquis_core::color::Color;
//! use croquis_core::draw::StrokeDefinition;
//! use svg::node::element as svg_element;
//!
//! let centerline = StrokeDefinition::dashed(Color::new("#004EC9").unwrap(), 3.0, "20,20");
//! let line = svg_element::Line::new()
//!     .set("x1", 200)
//!     .set("y1", 0)
//!     .set("x2", 200)
//!     .set("y2", 500);
//! let line = croquis_core::apply_stroke!(line, &centerline);
//! assert!(line.to_string().contains("stroke-dasharray=\"20,20\""));
//! ```

use crate::color::Color;

/// Color, width and optional dash pattern of a stroked outline.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    dashes: Option<String>,
}

impl StrokeDefinition {
    /// Solid stroke.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dashes: None,
        }
    }

    /// Dashed stroke. `pattern` is an SVG dasharray such as `"20,20"`;
    /// a blank pattern yields a solid stroke.
    ///
    /// ```
    /// use croquis_core::color::Color;
    /// use croquis_core::draw::StrokeDefinition;
    ///
    /// let lane = StrokeDefinition::dashed(Color::new("blue").unwrap(), 3.0, "20,20");
    /// assert_eq!(lane.dashes(), Some("20,20"));
    ///
    /// let curb = StrokeDefinition::dashed(Color::new("blue").unwrap(), 3.0, "  ");
    /// assert_eq!(curb.dashes(), None);
    /// ```
    pub fn dashed(color: Color, width: f32, pattern: &str) -> Self {
        let pattern = pattern.trim();
        Self {
            color,
            width,
            dashes: (!pattern.is_empty()).then(|| pattern.to_string()),
        }
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// The dasharray, or `None` for a solid line.
    pub fn dashes(&self) -> Option<&str> {
        self.dashes.as_deref()
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Writes a [`StrokeDefinition`](crate::draw::StrokeDefinition) onto an SVG element.
///
/// `stroke-opacity` appears only for translucent colors and
/// `stroke-dasharray` only for dashed strokes.
///
/// ```
/// use croquis_core::color::Color;
/// use croquis_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("#004EC9").unwrap(), 2.0);
/// let rect = svg_element::Rectangle::new().set("width", 110);
/// let svg = croquis_core::apply_stroke!(rect, &stroke).to_string();
///
/// assert!(svg.contains("stroke=\"#004EC9\""));
/// assert!(svg.contains("stroke-width=\"2\""));
/// assert!(!svg.contains("stroke-dasharray"));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke: &$crate::draw::StrokeDefinition = $stroke;
        let mut elem = $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-width", stroke.width());

        if stroke.color().alpha() < 1.0 {
            elem = elem.set("stroke-opacity", stroke.color().alpha());
        }
        if let Some(dashes) = stroke.dashes() {
            elem = elem.set("stroke-dasharray", dashes);
        }

        elem
    }};
}
