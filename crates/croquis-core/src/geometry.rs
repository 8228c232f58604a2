//! Geometric primitives for sketch layout and interaction.
//!
//! This module provides the geometric types used throughout Croquis for
//! positioning elements, clamping them to the canvas and computing rotation
//! angles from pointer positions.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`normalize_degrees`] - Folds any angle into `[0, 360)`
//!
//! # Coordinate System
//!
//! Croquis uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Angles are measured in degrees. Because Y grows downward, a positive angle
//! turns clockwise on screen, which matches SVG's `rotate()` transform.

/// A position on the canvas, or an offset between two positions.
///
/// # Examples
///
/// ```
/// # use croquis_core::geometry::Point;
/// let pointer = Point::new(130.0, 220.0);
/// let element = Point::new(120.0, 200.0);
///
/// let offset = pointer.sub_point(element);
/// assert_eq!(offset.x(), 10.0);
/// assert_eq!(offset.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// True for the canvas origin.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn add_point(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub_point(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Length of the vector from the origin to this point.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Bearing of this point seen from the origin, in degrees within
    /// `(-180, 180]`.
    ///
    /// ```
    /// # use croquis_core::geometry::Point;
    /// assert_eq!(Point::new(1.0, 0.0).angle_degrees(), 0.0);
    /// assert_eq!(Point::new(0.0, 1.0).angle_degrees(), 90.0);
    /// assert_eq!(Point::new(-1.0, 0.0).angle_degrees(), 180.0);
    /// ```
    pub fn angle_degrees(self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }

    /// Bearing from `center` to this point in degrees.
    pub fn angle_from(self, center: Point) -> f32 {
        self.sub_point(center).angle_degrees()
    }

    /// Turns this point about the origin by `degrees`, clockwise on screen.
    pub fn rotate(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

/// Width and height of a glyph, a canvas or a road strip.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Half extents, i.e. the center of a box of this size whose top-left
    /// corner is the origin.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned rectangle stored as its minimum and maximum corners.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half = size.center();
        Self {
            min_x: center.x - half.x,
            min_y: center.y - half.y,
            max_x: center.x + half.x,
            max_y: center.y + half.y,
        }
    }

    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Top-left corner.
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// True if `point` lies inside or on the edge.
    pub fn contains(self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }

    /// Shrinks the bounds by `margin` on every side.
    ///
    /// A margin larger than half of a dimension collapses that dimension onto
    /// its center line instead of inverting the bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use croquis_core::geometry::{Bounds, Point, Size};
    /// let canvas = Bounds::new_from_top_left(Point::default(), Size::new(400.0, 500.0));
    /// let inner = canvas.inset(20.0);
    /// assert_eq!(inner.min_x(), 20.0);
    /// assert_eq!(inner.max_x(), 380.0);
    /// assert_eq!(inner.max_y(), 480.0);
    /// ```
    pub fn inset(self, margin: f32) -> Self {
        let center = self.center();
        let half_width = (self.width() / 2.0 - margin).max(0.0);
        let half_height = (self.height() / 2.0 - margin).max(0.0);
        Self::new_from_center(center, Size::new(half_width * 2.0, half_height * 2.0))
    }

    /// Returns the point inside the bounds closest to `point`.
    ///
    /// NaN coordinates land on the minimum edge.
    ///
    /// # Examples
    ///
    /// ```
    /// # use croquis_core::geometry::{Bounds, Point, Size};
    /// let area = Bounds::new_from_top_left(Point::new(20.0, 20.0), Size::new(360.0, 460.0));
    /// let clamped = area.clamp(Point::new(1000.0, -5.0));
    /// assert_eq!(clamped, Point::new(380.0, 20.0));
    /// ```
    pub fn clamp(self, point: Point) -> Point {
        Point::new(
            point.x.max(self.min_x).min(self.max_x),
            point.y.max(self.min_y).min(self.max_y),
        )
    }

    /// Smallest bounds covering both `self` and `other`.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Folds an angle in degrees into the half-open range `[0, 360)`.
///
/// # Examples
///
/// ```
/// # use croquis_core::geometry::normalize_degrees;
/// assert_eq!(normalize_degrees(380.0), 20.0);
/// assert_eq!(normalize_degrees(-90.0), 270.0);
/// assert_eq!(normalize_degrees(360.0), 0.0);
/// ```
pub fn normalize_degrees(degrees: f32) -> f32 {
    // Adding zero turns -0.0 into 0.0
    let folded = degrees.rem_euclid(360.0) + 0.0;
    // rem_euclid can round a tiny negative input up to exactly 360.0
    if folded >= 360.0 { 0.0 } else { folded }
}
