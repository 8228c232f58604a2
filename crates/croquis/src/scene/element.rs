//! Value types of a sketch: element kinds, ownership tags, ids and layouts.
//!
//! Every name-bearing enum here parses from the lowercase names used in
//! scene files and configuration, and fails with a dedicated error type on
//! unknown names instead of falling back to a default.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use croquis_core::geometry::Point;

/// Kinds of element that can be placed on a sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Car,
    Truck,
    Motorcycle,
    Pedestrian,
}

impl ElementKind {
    /// Palette order.
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Car,
        ElementKind::Truck,
        ElementKind::Motorcycle,
        ElementKind::Pedestrian,
    ];

    /// Returns the name used in scene files and configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Truck => "truck",
            Self::Motorcycle => "motorcycle",
            Self::Pedestrian => "pedestrian",
        }
    }

    /// Returns the label shown on the palette button.
    pub fn label(self) -> &'static str {
        match self {
            Self::Car => "Vehículo",
            Self::Truck => "Camión",
            Self::Motorcycle => "Moto",
            Self::Pedestrian => "Peatón",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an element kind name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown element kind `{name}`, expected one of: car, truck, motorcycle, pedestrian")]
pub struct ParseKindError {
    name: String,
}

impl FromStr for ElementKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "car" => Ok(Self::Car),
            "truck" => Ok(Self::Truck),
            "motorcycle" => Ok(Self::Motorcycle),
            "pedestrian" => Ok(Self::Pedestrian),
            other => Err(ParseKindError {
                name: other.to_string(),
            }),
        }
    }
}

/// Ownership tag of a vehicle.
///
/// The first party is the insured vehicle ("NA"), the third party is any
/// other vehicle involved ("3ero").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    FirstParty,
    ThirdParty,
}

impl Owner {
    /// Returns the name used in scene files.
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstParty => "first-party",
            Self::ThirdParty => "third-party",
        }
    }

    /// Returns the short tag shown on the canvas and in exported labels.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstParty => "NA",
            Self::ThirdParty => "3ero",
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an owner name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown owner `{name}`, expected one of: first-party (na), third-party (tercero)")]
pub struct ParseOwnerError {
    name: String,
}

impl FromStr for Owner {
    type Err = ParseOwnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first-party" | "na" => Ok(Self::FirstParty),
            "third-party" | "tercero" => Ok(Self::ThirdParty),
            other => Err(ParseOwnerError {
                name: other.to_string(),
            }),
        }
    }
}

/// How an element kind acquires its ownership tag on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OwnershipRule {
    /// The kind never carries an owner.
    None,
    /// The user picks the owner through the palette sub-choice.
    Prompt,
    /// The kind is always tagged first-party without asking.
    AutoFirstParty,
    /// The kind is always tagged third-party without asking.
    AutoThirdParty,
}

/// Identifier of a placed element, unique within its scene.
///
/// Ids are handed out in increasing order and never reused, even after the
/// element they named is deleted or the scene is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// One vehicle or pedestrian on the sketch.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedElement {
    id: ElementId,
    kind: ElementKind,
    owner: Option<Owner>,
    position: Point,
    rotation: f32,
}

impl PlacedElement {
    pub(crate) fn new(id: ElementId, kind: ElementKind, owner: Option<Owner>, position: Point) -> Self {
        Self {
            id,
            kind,
            owner,
            position,
            rotation: 0.0,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn owner(&self) -> Option<Owner> {
        self.owner
    }

    /// Center of the element in canvas coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Rotation in degrees, always within `[0, 360)`.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Text label written above the element on export.
    ///
    /// Owned vehicles use their ownership tag, pedestrians are labelled as
    /// such, and any other unowned element falls back to its kind label.
    pub fn label(&self) -> &'static str {
        match (self.kind, self.owner) {
            (ElementKind::Pedestrian, _) => ElementKind::Pedestrian.label(),
            (_, Some(owner)) => owner.label(),
            (kind, None) => kind.label(),
        }
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }
}

/// Street layout templates drawn under the elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StreetLayout {
    /// Four-way intersection
    #[default]
    Cross,
    /// Single vertical road
    Straight,
    /// Horizontal road with a stub leaving downward
    TJunction,
    /// Vertical stem splitting into two diverging arms
    YJunction,
    /// Four-way intersection around a central island
    Roundabout,
    /// Quarter turn from the top edge to the right edge
    Curve,
}

impl StreetLayout {
    /// Layout selector order.
    pub const ALL: [StreetLayout; 6] = [
        StreetLayout::Cross,
        StreetLayout::TJunction,
        StreetLayout::YJunction,
        StreetLayout::Roundabout,
        StreetLayout::Straight,
        StreetLayout::Curve,
    ];

    /// Returns the name used in scene files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cross => "cross",
            Self::Straight => "straight",
            Self::TJunction => "t-junction",
            Self::YJunction => "y-junction",
            Self::Roundabout => "roundabout",
            Self::Curve => "curve",
        }
    }

    /// Returns the label shown in the layout selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cross => "Cruz (+)",
            Self::Straight => "Recta",
            Self::TJunction => "T",
            Self::YJunction => "Y",
            Self::Roundabout => "Glorieta",
            Self::Curve => "Curva",
        }
    }
}

impl fmt::Display for StreetLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a street layout name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown street layout `{name}`, expected one of: cross, t-junction, y-junction, roundabout, straight, curve"
)]
pub struct ParseLayoutError {
    name: String,
}

impl ParseLayoutError {
    /// Returns the name that failed to parse.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for StreetLayout {
    type Err = ParseLayoutError;

    /// Parses a layout name. The Spanish selector names are accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cross" | "cruz" => Ok(Self::Cross),
            "straight" | "recta" => Ok(Self::Straight),
            "t-junction" | "t" => Ok(Self::TJunction),
            "y-junction" | "y" => Ok(Self::YJunction),
            "roundabout" | "glorieta" => Ok(Self::Roundabout),
            "curve" | "curva" => Ok(Self::Curve),
            other => Err(ParseLayoutError {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_names_round_trip() {
        for layout in StreetLayout::ALL {
            assert_eq!(layout.name().parse::<StreetLayout>().unwrap(), layout);
        }
    }

    #[test]
    fn test_layout_aliases() {
        assert_eq!("glorieta".parse::<StreetLayout>().unwrap(), StreetLayout::Roundabout);
        assert_eq!("cruz".parse::<StreetLayout>().unwrap(), StreetLayout::Cross);
        assert_eq!("curva".parse::<StreetLayout>().unwrap(), StreetLayout::Curve);
    }

    #[test]
    fn test_unknown_layout_is_an_error() {
        let err = "diamond".parse::<StreetLayout>().unwrap_err();
        assert_eq!(err.name(), "diamond");
        assert!(err.to_string().contains("unknown street layout `diamond`"));
    }

    #[test]
    fn test_layout_selector_order_and_labels() {
        let labels: Vec<_> = StreetLayout::ALL.iter().map(|l| l.label()).collect();
        assert_eq!(labels, ["Cruz (+)", "T", "Y", "Glorieta", "Recta", "Curva"]);
        assert_eq!(StreetLayout::default(), StreetLayout::Cross);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("truck".parse::<ElementKind>().unwrap(), ElementKind::Truck);
        assert!("bicycle".parse::<ElementKind>().is_err());
    }

    #[test]
    fn test_owner_parse_accepts_short_names() {
        assert_eq!("na".parse::<Owner>().unwrap(), Owner::FirstParty);
        assert_eq!("third-party".parse::<Owner>().unwrap(), Owner::ThirdParty);
        assert!("fourth-party".parse::<Owner>().is_err());
    }

    #[test]
    fn test_element_labels() {
        let at = Point::new(200.0, 250.0);
        let car = PlacedElement::new(ElementId::new(1), ElementKind::Car, Some(Owner::FirstParty), at);
        let truck = PlacedElement::new(ElementId::new(2), ElementKind::Truck, Some(Owner::ThirdParty), at);
        let walker = PlacedElement::new(ElementId::new(3), ElementKind::Pedestrian, None, at);
        let moto = PlacedElement::new(ElementId::new(4), ElementKind::Motorcycle, None, at);

        assert_eq!(car.label(), "NA");
        assert_eq!(truck.label(), "3ero");
        assert_eq!(walker.label(), "Peatón");
        assert_eq!(moto.label(), "Moto");
    }

    #[test]
    fn test_element_id_display() {
        assert_eq!(ElementId::new(7).to_string(), "e7");
        assert_eq!(ElementId::new(7).get(), 7);
    }
}
