//! Parametric road geometry for the six street layouts.
//!
//! [`RoadGeometry::for_layout`] is a pure function of the layout and the
//! canvas configuration. It yields the road surfaces (drawn filled and
//! outlined) and the dashed lane centerlines. [`Road`] turns that geometry
//! into SVG nodes on the road and marking layers.

use svg::node::element as svg_element;

use croquis_core::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Bounds, Point, Size},
};

use crate::{config::CanvasConfig, scene::StreetLayout, theme::Theme};

/// One command of a road outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc to `to`; `sweep` selects the clockwise direction.
    ArcTo {
        radius: f32,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// A filled road area.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    /// Closed outline made of segments
    Outline(Vec<Segment>),
    /// Axis-aligned road strip
    Strip(Bounds),
    /// Roundabout center island
    Island { center: Point, radius: f32 },
}

/// A dashed lane centerline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centerline {
    pub from: Point,
    pub to: Point,
}

impl Centerline {
    fn new(from: (f32, f32), to: (f32, f32)) -> Self {
        Self {
            from: Point::new(from.0, from.1),
            to: Point::new(to.0, to.1),
        }
    }
}

/// Surfaces and centerlines of one street layout.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadGeometry {
    surfaces: Vec<Surface>,
    centerlines: Vec<Centerline>,
}

/// Shorthand for building outlines from coordinate pairs.
struct OutlineBuilder {
    segments: Vec<Segment>,
}

impl OutlineBuilder {
    fn start(x: f32, y: f32) -> Self {
        Self {
            segments: vec![Segment::MoveTo(Point::new(x, y))],
        }
    }

    fn line(mut self, x: f32, y: f32) -> Self {
        self.segments.push(Segment::LineTo(Point::new(x, y)));
        self
    }

    fn arc(mut self, radius: f32, sweep: bool, x: f32, y: f32) -> Self {
        self.segments.push(Segment::ArcTo {
            radius,
            sweep,
            to: Point::new(x, y),
        });
        self
    }

    fn close(mut self) -> Surface {
        self.segments.push(Segment::Close);
        Surface::Outline(self.segments)
    }
}

impl RoadGeometry {
    /// Computes the road geometry of `layout` on the configured canvas.
    pub fn for_layout(layout: StreetLayout, canvas: &CanvasConfig) -> Self {
        match layout {
            StreetLayout::Cross => Self::cross(canvas),
            StreetLayout::Straight => Self::straight(canvas),
            StreetLayout::TJunction => Self::t_junction(canvas),
            StreetLayout::YJunction => Self::y_junction(canvas),
            StreetLayout::Roundabout => Self::roundabout(canvas),
            StreetLayout::Curve => Self::curve(canvas),
        }
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn centerlines(&self) -> &[Centerline] {
        &self.centerlines
    }

    fn cross(canvas: &CanvasConfig) -> Self {
        let f = Frame::new(canvas);
        let outline = OutlineBuilder::start(0.0, f.top)
            .line(f.left, f.top)
            .line(f.left, 0.0)
            .line(f.right, 0.0)
            .line(f.right, f.top)
            .line(f.width, f.top)
            .line(f.width, f.bottom)
            .line(f.right, f.bottom)
            .line(f.right, f.height)
            .line(f.left, f.height)
            .line(f.left, f.bottom)
            .line(0.0, f.bottom)
            .close();

        Self {
            surfaces: vec![outline],
            centerlines: vec![
                Centerline::new((0.0, f.cy), (f.left, f.cy)),
                Centerline::new((f.right, f.cy), (f.width, f.cy)),
                Centerline::new((f.cx, 0.0), (f.cx, f.top)),
                Centerline::new((f.cx, f.bottom), (f.cx, f.height)),
            ],
        }
    }

    fn straight(canvas: &CanvasConfig) -> Self {
        let f = Frame::new(canvas);
        let strip = Bounds::new_from_top_left(
            Point::new(f.left, 0.0),
            Size::new(canvas.road_width(), f.height),
        );

        Self {
            surfaces: vec![Surface::Strip(strip)],
            centerlines: vec![Centerline::new((f.cx, 0.0), (f.cx, f.height))],
        }
    }

    fn t_junction(canvas: &CanvasConfig) -> Self {
        let f = Frame::new(canvas);
        let outline = OutlineBuilder::start(0.0, f.top)
            .line(f.width, f.top)
            .line(f.width, f.bottom)
            .line(f.right, f.bottom)
            .line(f.right, f.height)
            .line(f.left, f.height)
            .line(f.left, f.bottom)
            .line(0.0, f.bottom)
            .close();

        Self {
            surfaces: vec![outline],
            centerlines: vec![
                Centerline::new((0.0, f.cy), (f.left, f.cy)),
                Centerline::new((f.right, f.cy), (f.width, f.cy)),
                Centerline::new((f.cx, f.bottom), (f.cx, f.height)),
            ],
        }
    }

    fn y_junction(canvas: &CanvasConfig) -> Self {
        let f = Frame::new(canvas);
        let (sin, cos) = canvas.y_arm_angle().to_radians().sin_cos();
        let reach = canvas.y_arm_length() * sin;
        let arm_end_y = f.cy + canvas.y_arm_length() * cos;
        let crotch_y = f.cy + f.half * 1.5;

        let outline = OutlineBuilder::start(f.left, 0.0)
            .line(f.right, 0.0)
            .line(f.right, f.cy)
            .line(f.right + reach, arm_end_y)
            .line(f.left + reach, arm_end_y)
            .line(f.cx, crotch_y)
            .line(f.right - reach, arm_end_y)
            .line(f.left - reach, arm_end_y)
            .line(f.left, f.cy)
            .close();

        Self {
            surfaces: vec![outline],
            centerlines: vec![Centerline::new(
                (f.cx, 0.0),
                (f.cx, f.cy - canvas.centerline_gap()),
            )],
        }
    }

    fn roundabout(canvas: &CanvasConfig) -> Self {
        let f = Frame::new(canvas);
        let r = canvas.roundabout_outer_radius();

        let outline = OutlineBuilder::start(0.0, f.top)
            .line(f.cx - r, f.top)
            .arc(r, true, f.left, f.cy - r)
            .line(f.left, 0.0)
            .line(f.right, 0.0)
            .line(f.right, f.cy - r)
            .arc(r, true, f.cx + r, f.top)
            .line(f.width, f.top)
            .line(f.width, f.bottom)
            .line(f.cx + r, f.bottom)
            .arc(r, true, f.right, f.cy + r)
            .line(f.right, f.height)
            .line(f.left, f.height)
            .line(f.left, f.cy + r)
            .arc(r, true, f.cx - r, f.bottom)
            .line(0.0, f.bottom)
            .close();

        let island = Surface::Island {
            center: Point::new(f.cx, f.cy),
            radius: canvas.roundabout_island_radius(),
        };

        let stop = r + canvas.centerline_gap();
        Self {
            surfaces: vec![outline, island],
            centerlines: vec![
                Centerline::new((0.0, f.cy), (f.cx - stop, f.cy)),
                Centerline::new((f.cx + stop, f.cy), (f.width, f.cy)),
                Centerline::new((f.cx, 0.0), (f.cx, f.cy - stop)),
                Centerline::new((f.cx, f.cy + stop), (f.cx, f.height)),
            ],
        }
    }

    fn curve(canvas: &CanvasConfig) -> Self {
        let f = Frame::new(canvas);
        let radius = canvas.curve_radius();
        let road_width = canvas.road_width();

        let outline = OutlineBuilder::start(f.left, 0.0)
            .line(f.right, 0.0)
            .line(f.right, f.cy - radius)
            .arc(radius - f.half, false, f.cx + radius, f.bottom)
            .line(f.width, f.bottom)
            .line(f.width, f.top)
            .line(f.cx + radius + road_width, f.top)
            .arc(radius + f.half, true, f.left, f.cy - radius - road_width)
            .close();

        Self {
            surfaces: vec![outline],
            centerlines: Vec::new(),
        }
    }
}

/// Canvas reference lines shared by every layout.
struct Frame {
    width: f32,
    height: f32,
    cx: f32,
    cy: f32,
    half: f32,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

impl Frame {
    fn new(canvas: &CanvasConfig) -> Self {
        let center = canvas.center();
        let half = canvas.road_width() / 2.0;
        Self {
            width: canvas.width(),
            height: canvas.height(),
            cx: center.x(),
            cy: center.y(),
            half,
            left: center.x() - half,
            right: center.x() + half,
            top: center.y() - half,
            bottom: center.y() + half,
        }
    }
}

/// Formats outline segments as SVG path data.
///
/// ```
/// # use croquis::road::{Segment, path_data};
/// # use croquis::geometry::Point;
/// let d = path_data(&[
///     Segment::MoveTo(Point::new(0.0, 195.0)),
///     Segment::ArcTo { radius: 85.0, sweep: true, to: Point::new(145.0, 165.0) },
///     Segment::Close,
/// ]);
/// assert_eq!(d, "M 0 195 A 85 85 0 0 1 145 165 Z");
/// ```
pub fn path_data(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::MoveTo(p) => format!("M {} {}", p.x(), p.y()),
            Segment::LineTo(p) => format!("L {} {}", p.x(), p.y()),
            Segment::ArcTo { radius, sweep, to } => format!(
                "A {radius} {radius} 0 0 {} {} {}",
                u8::from(*sweep),
                to.x(),
                to.y()
            ),
            Segment::Close => "Z".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drawable road for one layout, with its colors and stroke widths resolved.
#[derive(Debug, Clone)]
pub(crate) struct Road {
    geometry: RoadGeometry,
    size: Size,
    fill: Color,
    island_fill: Color,
    outline: StrokeDefinition,
    centerline: StrokeDefinition,
}

impl Road {
    pub(crate) fn new(layout: StreetLayout, canvas: &CanvasConfig, theme: &Theme) -> Self {
        Self {
            geometry: RoadGeometry::for_layout(layout, canvas),
            size: canvas.bounds().to_size(),
            fill: theme.road_fill().clone(),
            island_fill: theme.island_fill().clone(),
            outline: StrokeDefinition::new(theme.road_stroke().clone(), canvas.road_stroke_width()),
            centerline: StrokeDefinition::dashed(
                theme.road_stroke().clone(),
                canvas.centerline_width(),
                canvas.centerline_dash(),
            ),
        }
    }
}

impl Drawable for Road {
    /// Renders the road with its top-left corner at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        for surface in self.geometry.surfaces() {
            let node: Box<dyn svg::Node> = match surface {
                Surface::Outline(segments) => {
                    let path = svg_element::Path::new()
                        .set("d", path_data(segments))
                        .set("fill", &self.fill);
                    Box::new(apply_stroke!(path, &self.outline))
                }
                Surface::Strip(bounds) => {
                    let rect = svg_element::Rectangle::new()
                        .set("x", bounds.min_x())
                        .set("y", bounds.min_y())
                        .set("width", bounds.width())
                        .set("height", bounds.height())
                        .set("fill", &self.fill);
                    Box::new(apply_stroke!(rect, &self.outline))
                }
                Surface::Island { center, radius } => {
                    let circle = svg_element::Circle::new()
                        .set("cx", center.x())
                        .set("cy", center.y())
                        .set("r", *radius)
                        .set("fill", &self.island_fill);
                    Box::new(apply_stroke!(circle, &self.outline))
                }
            };
            output.add_to_layer(RenderLayer::Road, node);
        }

        for line in self.geometry.centerlines() {
            let node = svg_element::Line::new()
                .set("x1", line.from.x())
                .set("y1", line.from.y())
                .set("x2", line.to.x())
                .set("y2", line.to.y());
            output.add_to_layer(
                RenderLayer::Marking,
                Box::new(apply_stroke!(node, &self.centerline)),
            );
        }

        if position.is_zero() {
            output
        } else {
            output.with_transform(&format!("translate({}, {})", position.x(), position.y()))
        }
    }

    fn size(&self) -> Size {
        self.size
    }
}
