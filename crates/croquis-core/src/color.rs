//! Color handling for Croquis sketches
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors keep the exact CSS text they were created
//! from, so exported documents carry the same `#RRGGBB` strings that the
//! palettes declare.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Debug)]
pub struct Color {
    color: DynamicColor,
    source: Box<str>,
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.source.eq_ignore_ascii_case(&other.source) || self.color == other.color
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use croquis_core::color::Color;
    ///
    /// let blue = Color::new("#004EC9").unwrap();
    /// assert_eq!(blue.to_string(), "#004EC9");
    ///
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self {
                color,
                source: color_str.trim().into(),
            }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    ///
    /// The value lies between 0.0 (fully transparent) and 1.0 (fully opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the CSS text this color was created from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
