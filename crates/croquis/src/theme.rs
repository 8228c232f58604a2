//! Resolved canvas and road colors.

use log::warn;

use croquis_core::color::Color;

use crate::config::StyleConfig;

const BACKGROUND: &str = "#F0F7FF";
const ROAD_FILL: &str = "#FFFFFF";
const ROAD_STROKE: &str = "#004EC9";
const ISLAND_FILL: &str = "#E8F4FD";

/// Colors used for everything that is not an element glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    background: Color,
    road_fill: Color,
    road_stroke: Color,
    island_fill: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: builtin(BACKGROUND),
            road_fill: builtin(ROAD_FILL),
            road_stroke: builtin(ROAD_STROKE),
            island_fill: builtin(ISLAND_FILL),
        }
    }
}

impl Theme {
    /// Resolves the configured colors.
    ///
    /// Unset colors use the built-in palette. A color that does not parse is
    /// logged and replaced by its built-in value, so rendering never fails;
    /// [`crate::config::AppConfig::validate`] reports such colors up front.
    pub fn from_style(style: &StyleConfig) -> Self {
        let defaults = Self::default();
        Self {
            background: pick(style.background_color(), defaults.background),
            road_fill: pick(style.road_fill(), defaults.road_fill),
            road_stroke: pick(style.road_stroke(), defaults.road_stroke),
            island_fill: pick(style.island_fill(), defaults.island_fill),
        }
    }

    pub fn background(&self) -> &Color {
        &self.background
    }

    pub fn road_fill(&self) -> &Color {
        &self.road_fill
    }

    /// Color of road outlines and lane centerlines.
    pub fn road_stroke(&self) -> &Color {
        &self.road_stroke
    }

    pub fn island_fill(&self) -> &Color {
        &self.island_fill
    }
}

fn builtin(hex: &str) -> Color {
    Color::new(hex).unwrap_or_default()
}

fn pick(configured: Result<Option<Color>, String>, fallback: Color) -> Color {
    match configured {
        Ok(Some(color)) => color,
        Ok(None) => fallback,
        Err(err) => {
            warn!(err:%, fallback:% = fallback; "Ignoring invalid style color");
            fallback
        }
    }
}
