//! Top-view glyphs for placed elements.
//!
//! Each [`ElementKind`] has one fixed glyph, drawn front-up in a local frame
//! whose origin is the glyph's center. The live preview and the exported
//! document both draw elements through [`Glyph`], so they cannot disagree on
//! shape or color.
//!
//! Colors come from a [`Swatch`]: the owner's swatch when the element has an
//! owner, otherwise the swatch of its kind. Detail shading uses the swatch's
//! darker shade.

use svg::node::element as svg_element;

use croquis_core::{
    draw::{Drawable, LayeredOutput, PositionedDrawable, RenderLayer, SvgNode},
    geometry::{Point, Size},
};

use crate::scene::{ElementKind, Owner, PlacedElement};

/// The fixed set of element colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swatch {
    /// `#004EC9`: cars and first-party vehicles
    Blue,
    /// `#E67E22`: trucks
    Orange,
    /// `#9B59B6`: motorcycles
    Purple,
    /// `#9CA3AF`: third-party vehicles
    Gray,
    /// `#27AE60`: pedestrians
    Green,
}

impl Swatch {
    /// Returns the swatch an element is drawn with.
    pub fn for_element(kind: ElementKind, owner: Option<Owner>) -> Self {
        match owner {
            Some(owner) => Self::for_owner(owner),
            None => Self::for_kind(kind),
        }
    }

    /// Returns the palette swatch of a kind.
    pub fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Car => Self::Blue,
            ElementKind::Truck => Self::Orange,
            ElementKind::Motorcycle => Self::Purple,
            ElementKind::Pedestrian => Self::Green,
        }
    }

    /// Returns the swatch of an ownership tag.
    pub fn for_owner(owner: Owner) -> Self {
        match owner {
            Owner::FirstParty => Self::Blue,
            Owner::ThirdParty => Self::Gray,
        }
    }

    /// Returns the main color as `#RRGGBB`.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Blue => "#004EC9",
            Self::Orange => "#E67E22",
            Self::Purple => "#9B59B6",
            Self::Gray => "#9CA3AF",
            Self::Green => "#27AE60",
        }
    }

    /// Returns the shade used for glyph details as `#RRGGBB`.
    pub fn darker(self) -> &'static str {
        match self {
            Self::Blue => "#003A96",
            Self::Orange => "#C56A1A",
            Self::Purple => "#7D4892",
            Self::Gray => "#6B7280",
            Self::Green => "#1E8449",
        }
    }
}

/// Returns the unrotated footprint of a kind's glyph.
pub fn footprint(kind: ElementKind) -> Size {
    match kind {
        ElementKind::Car => Size::new(40.0, 72.0),
        ElementKind::Truck => Size::new(44.0, 88.0),
        ElementKind::Motorcycle => Size::new(24.0, 60.0),
        ElementKind::Pedestrian => Size::new(32.0, 40.0),
    }
}

const HEADLIGHT: &str = "#FFEB3B";
const GLASS: &str = "#87CEEB";
const TAILLIGHT: &str = "#EF4444";
const WHITE: &str = "#FFF";
const TIRE: &str = "#333";
const HUB: &str = "#555";
const SEAT: &str = "#444";

#[derive(Debug, Clone, Copy)]
enum Paint {
    Body,
    Detail,
    Fixed(&'static str),
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rx: f32,
    },
    Ellipse {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
    },
    Path(&'static str),
}

/// One shape of a glyph, in the glyph's top-left-anchored frame.
#[derive(Debug, Clone, Copy)]
struct Part {
    shape: Shape,
    paint: Paint,
    opacity: f32,
}

impl Part {
    const fn faded(self, opacity: f32) -> Self {
        Self {
            shape: self.shape,
            paint: self.paint,
            opacity,
        }
    }

    fn to_node(self, swatch: Swatch) -> SvgNode {
        let color = match self.paint {
            Paint::Body => swatch.hex(),
            Paint::Detail => swatch.darker(),
            Paint::Fixed(color) => color,
        };

        match self.shape {
            Shape::Rect {
                x,
                y,
                width,
                height,
                rx,
            } => {
                let mut rect = svg_element::Rectangle::new()
                    .set("x", x)
                    .set("y", y)
                    .set("width", width)
                    .set("height", height);
                if rx > 0.0 {
                    rect = rect.set("rx", rx);
                }
                finish(rect.set("fill", color), self.opacity)
            }
            Shape::Ellipse { cx, cy, rx, ry } => finish(
                svg_element::Ellipse::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("rx", rx)
                    .set("ry", ry)
                    .set("fill", color),
                self.opacity,
            ),
            Shape::Circle { cx, cy, r } => finish(
                svg_element::Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", r)
                    .set("fill", color),
                self.opacity,
            ),
            Shape::Line {
                x1,
                y1,
                x2,
                y2,
                width,
            } => finish(
                svg_element::Line::new()
                    .set("x1", x1)
                    .set("y1", y1)
                    .set("x2", x2)
                    .set("y2", y2)
                    .set("stroke", color)
                    .set("stroke-width", width),
                self.opacity,
            ),
            Shape::Path(d) => finish(
                svg_element::Path::new().set("d", d).set("fill", color),
                self.opacity,
            ),
        }
    }
}

/// Boxes a glyph node, writing its opacity when it is not fully opaque.
fn finish<N: svg::Node>(mut node: N, opacity: f32) -> SvgNode {
    if opacity < 1.0 {
        node.assign("opacity", opacity);
    }
    Box::new(node)
}

const fn rect(x: f32, y: f32, width: f32, height: f32, rx: f32, paint: Paint) -> Part {
    Part {
        shape: Shape::Rect {
            x,
            y,
            width,
            height,
            rx,
        },
        paint,
        opacity: 1.0,
    }
}

const fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32, paint: Paint) -> Part {
    Part {
        shape: Shape::Ellipse { cx, cy, rx, ry },
        paint,
        opacity: 1.0,
    }
}

const fn circle(cx: f32, cy: f32, r: f32, paint: Paint) -> Part {
    Part {
        shape: Shape::Circle { cx, cy, r },
        paint,
        opacity: 1.0,
    }
}

const fn line(from: (f32, f32), to: (f32, f32), width: f32, paint: Paint) -> Part {
    Part {
        shape: Shape::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            width,
        },
        paint,
        opacity: 1.0,
    }
}

const fn path(d: &'static str, paint: Paint) -> Part {
    Part {
        shape: Shape::Path(d),
        paint,
        opacity: 1.0,
    }
}

use Paint::{Body, Detail, Fixed};

/// Sedan seen from above.
const CAR: &[Part] = &[
    // body
    rect(4.0, 10.0, 32.0, 52.0, 6.0, Body),
    // hood
    rect(6.0, 4.0, 28.0, 14.0, 4.0, Body),
    rect(6.0, 4.0, 28.0, 6.0, 3.0, Detail).faded(0.3),
    // headlights
    rect(6.0, 2.0, 8.0, 4.0, 1.5, Fixed(HEADLIGHT)),
    rect(26.0, 2.0, 8.0, 4.0, 1.5, Fixed(HEADLIGHT)),
    // windshield
    rect(8.0, 18.0, 24.0, 14.0, 2.0, Fixed(GLASS)).faded(0.7),
    line((20.0, 18.0), (20.0, 32.0), 0.5, Fixed(WHITE)).faded(0.5),
    // roof
    rect(10.0, 32.0, 20.0, 12.0, 1.0, Detail).faded(0.2),
    // rear window
    rect(8.0, 44.0, 24.0, 10.0, 2.0, Fixed(GLASS)).faded(0.6),
    // trunk
    rect(6.0, 54.0, 28.0, 12.0, 4.0, Body),
    // taillights
    rect(6.0, 64.0, 6.0, 3.0, 1.0, Fixed(TAILLIGHT)),
    rect(28.0, 64.0, 6.0, 3.0, 1.0, Fixed(TAILLIGHT)),
    // mirrors
    rect(0.0, 22.0, 4.0, 6.0, 1.0, Body),
    rect(36.0, 22.0, 4.0, 6.0, 1.0, Body),
];

/// Box truck seen from above.
const TRUCK: &[Part] = &[
    // cab
    rect(6.0, 4.0, 32.0, 26.0, 4.0, Body),
    rect(6.0, 2.0, 8.0, 4.0, 1.5, Fixed(HEADLIGHT)),
    rect(30.0, 2.0, 8.0, 4.0, 1.5, Fixed(HEADLIGHT)),
    rect(10.0, 8.0, 24.0, 12.0, 2.0, Fixed(GLASS)).faded(0.7),
    rect(0.0, 12.0, 6.0, 8.0, 1.0, Body),
    rect(38.0, 12.0, 6.0, 8.0, 1.0, Body),
    // cab to cargo gap
    rect(4.0, 30.0, 36.0, 4.0, 0.0, Detail).faded(0.4),
    // cargo box
    rect(2.0, 34.0, 40.0, 50.0, 2.0, Body).faded(0.9),
    rect(4.0, 36.0, 36.0, 46.0, 1.0, Detail).faded(0.15),
    line((4.0, 52.0), (40.0, 52.0), 1.0, Fixed(WHITE)).faded(0.3),
    line((4.0, 68.0), (40.0, 68.0), 1.0, Fixed(WHITE)).faded(0.3),
    // taillights
    rect(4.0, 82.0, 8.0, 4.0, 1.0, Fixed(TAILLIGHT)),
    rect(32.0, 82.0, 8.0, 4.0, 1.0, Fixed(TAILLIGHT)),
];

/// Motorcycle seen from above.
const MOTORCYCLE: &[Part] = &[
    // front wheel
    ellipse(12.0, 6.0, 5.0, 6.0, Fixed(TIRE)),
    ellipse(12.0, 6.0, 3.0, 4.0, Fixed(HUB)),
    circle(12.0, 2.0, 2.0, Fixed(HEADLIGHT)),
    // fork
    rect(10.0, 10.0, 4.0, 8.0, 0.0, Body),
    // handlebar
    rect(2.0, 12.0, 20.0, 3.0, 1.5, Detail),
    circle(3.0, 13.5, 2.0, Fixed(TIRE)),
    circle(21.0, 13.5, 2.0, Fixed(TIRE)),
    // tank
    ellipse(12.0, 22.0, 6.0, 5.0, Body),
    ellipse(12.0, 21.0, 4.0, 3.0, Detail).faded(0.3),
    // seat
    ellipse(12.0, 34.0, 5.0, 8.0, Fixed(TIRE)),
    ellipse(12.0, 33.0, 3.0, 5.0, Fixed(SEAT)),
    // rear wheel
    ellipse(12.0, 52.0, 5.0, 6.0, Fixed(TIRE)),
    ellipse(12.0, 52.0, 3.0, 4.0, Fixed(HUB)),
    rect(9.0, 56.0, 6.0, 2.0, 1.0, Fixed(TAILLIGHT)),
];

/// Pedestrian seen from above, walking up.
const PEDESTRIAN: &[Part] = &[
    ellipse(16.0, 26.0, 8.0, 10.0, Body).faded(0.3),
    // torso and shoulders
    ellipse(16.0, 24.0, 7.0, 9.0, Body),
    ellipse(16.0, 18.0, 9.0, 4.0, Body),
    // head
    circle(16.0, 10.0, 7.0, Body),
    circle(16.0, 9.0, 5.0, Detail).faded(0.2),
    // heading arrow
    path(
        "M16 0 L12 5 L14.5 5 L14.5 8 L17.5 8 L17.5 5 L20 5 Z",
        Fixed(WHITE),
    )
    .faded(0.8),
    // feet
    ellipse(12.0, 34.0, 3.0, 4.0, Detail),
    ellipse(20.0, 36.0, 3.0, 4.0, Detail),
];

fn parts(kind: ElementKind) -> &'static [Part] {
    match kind {
        ElementKind::Car => CAR,
        ElementKind::Truck => TRUCK,
        ElementKind::Motorcycle => MOTORCYCLE,
        ElementKind::Pedestrian => PEDESTRIAN,
    }
}

/// The drawable glyph of one element kind in one swatch.
///
/// The position passed to [`Drawable::render_to_layers`] is the glyph center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    kind: ElementKind,
    swatch: Swatch,
}

impl Glyph {
    pub fn new(kind: ElementKind, swatch: Swatch) -> Self {
        Self { kind, swatch }
    }

    /// Returns the glyph an element is drawn with.
    pub fn for_element(element: &PlacedElement) -> Self {
        Self::new(
            element.kind(),
            Swatch::for_element(element.kind(), element.owner()),
        )
    }
}

impl Drawable for Glyph {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let origin = position.sub_point(self.size().center());
        let mut group = svg_element::Group::new().set(
            "transform",
            format!("translate({}, {})", origin.x(), origin.y()),
        );
        for part in parts(self.kind) {
            group = group.add(part.to_node(self.swatch));
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Element, Box::new(group));
        output
    }

    fn size(&self) -> Size {
        footprint(self.kind)
    }
}

/// Places an element's glyph at its position and rotation.
pub fn place(element: &PlacedElement) -> PositionedDrawable<Glyph> {
    PositionedDrawable::new(Glyph::for_element(element))
        .with_position(element.position())
        .with_rotation(element.rotation())
}
