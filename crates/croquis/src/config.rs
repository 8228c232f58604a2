//! Configuration types for Croquis sketches.
//!
//! This module provides the configuration structures that control canvas
//! dimensions, road geometry, ownership rules, export behavior and colors.
//! All types implement [`serde::Deserialize`] with per-field defaults, so a
//! configuration file only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`CanvasConfig`] - Canvas size, movement margin, spawn region and road geometry.
//! - [`OwnershipConfig`] - Per-kind [`OwnershipRule`].
//! - [`ExportConfig`] - Labels, download filename and [`RetentionPolicy`].
//! - [`StyleConfig`] - Background and road colors.
//!
//! # Example
//!
//! ```
//! # use croquis::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [canvas]
//!     seed = 7
//!
//!     [ownership]
//!     motorcycle = "auto-third-party"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.canvas().width(), 400.0);
//! assert_eq!(config.canvas().seed(), Some(7));
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use croquis_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
};

use crate::scene::{ElementKind, OwnershipRule};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas and road geometry section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Ownership rules section.
    #[serde(default)]
    ownership: OwnershipConfig,

    /// Export behavior section.
    #[serde(default)]
    export: ExportConfig,

    /// Color section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        canvas: CanvasConfig,
        ownership: OwnershipConfig,
        export: ExportConfig,
        style: StyleConfig,
    ) -> Self {
        Self {
            canvas,
            ownership,
            export,
            style,
        }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the ownership configuration.
    pub fn ownership(&self) -> &OwnershipConfig {
        &self.ownership
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks the configuration for values no sketch can be built from.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found: a non-positive
    /// dimension, a margin that leaves no movable area, a spawn region
    /// outside the movable area, an ownership rule that contradicts the kind,
    /// or a color that does not parse.
    pub fn validate(&self) -> Result<(), String> {
        self.canvas.validate()?;
        self.ownership.validate()?;
        self.style.validate()?;
        if self.export.filename.trim().is_empty() {
            return Err("export filename must not be empty".to_string());
        }
        Ok(())
    }
}

/// Canvas dimensions, movement limits, spawn region and road geometry.
///
/// Defaults describe the 400×500 sketch canvas with a 110 px road.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    width: f32,
    height: f32,
    margin: f32,
    spawn_min_x: f32,
    spawn_min_y: f32,
    spawn_width: f32,
    spawn_height: f32,
    seed: Option<u64>,
    road_width: f32,
    road_stroke_width: f32,
    centerline_width: f32,
    centerline_dash: String,
    centerline_gap: f32,
    roundabout_outer_radius: f32,
    roundabout_island_radius: f32,
    y_arm_angle: f32,
    y_arm_length: f32,
    curve_radius: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 500.0,
            margin: 20.0,
            spawn_min_x: 150.0,
            spawn_min_y: 180.0,
            spawn_width: 100.0,
            spawn_height: 100.0,
            seed: None,
            road_width: 110.0,
            road_stroke_width: 2.0,
            centerline_width: 3.0,
            centerline_dash: "20,20".to_string(),
            centerline_gap: 10.0,
            roundabout_outer_radius: 85.0,
            roundabout_island_radius: 34.0,
            y_arm_angle: 35.0,
            y_arm_length: 280.0,
            curve_radius: 120.0,
        }
    }
}

impl CanvasConfig {
    /// Sets the seed of the spawn position generator (builder style).
    ///
    /// With a seed, spawn positions repeat from run to run.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the canvas dimensions (builder style).
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Distance elements are kept from every canvas edge.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the canvas rectangle, anchored at the origin.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::default(), Size::new(self.width, self.height))
    }

    /// Returns the canvas center.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Returns the area element positions are clamped to.
    pub fn movable_area(&self) -> Bounds {
        self.bounds().inset(self.margin)
    }

    /// Returns the region new elements are spawned in.
    ///
    /// Positions are drawn from the half-open ranges `[min, min + extent)`.
    pub fn spawn_area(&self) -> Bounds {
        Bounds::new_from_top_left(
            Point::new(self.spawn_min_x, self.spawn_min_y),
            Size::new(self.spawn_width, self.spawn_height),
        )
    }

    pub fn road_width(&self) -> f32 {
        self.road_width
    }

    pub fn road_stroke_width(&self) -> f32 {
        self.road_stroke_width
    }

    pub fn centerline_width(&self) -> f32 {
        self.centerline_width
    }

    /// Dash pattern of lane centerlines, as an SVG dasharray.
    pub fn centerline_dash(&self) -> &str {
        &self.centerline_dash
    }

    /// Distance centerlines stop short of an intersection feature.
    pub fn centerline_gap(&self) -> f32 {
        self.centerline_gap
    }

    pub fn roundabout_outer_radius(&self) -> f32 {
        self.roundabout_outer_radius
    }

    pub fn roundabout_island_radius(&self) -> f32 {
        self.roundabout_island_radius
    }

    /// Angle between each Y-junction arm and the vertical, in degrees.
    pub fn y_arm_angle(&self) -> f32 {
        self.y_arm_angle
    }

    pub fn y_arm_length(&self) -> f32 {
        self.y_arm_length
    }

    /// Radius of the curve layout's road axis.
    pub fn curve_radius(&self) -> f32 {
        self.curve_radius
    }

    fn validate(&self) -> Result<(), String> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("road_width", self.road_width),
            ("roundabout_outer_radius", self.roundabout_outer_radius),
            ("roundabout_island_radius", self.roundabout_island_radius),
            ("y_arm_length", self.y_arm_length),
            ("curve_radius", self.curve_radius),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, value)| value.is_nan() || *value <= 0.0) {
            return Err(format!("canvas.{name} must be positive, got {value}"));
        }

        if self.margin < 0.0 || self.margin * 2.0 >= self.width.min(self.height) {
            return Err(format!(
                "canvas.margin {} leaves no movable area on a {}x{} canvas",
                self.margin, self.width, self.height
            ));
        }

        let spawn_extent_ok = |extent: f32| extent.is_finite() && extent >= 0.0;
        if !spawn_extent_ok(self.spawn_width) || !spawn_extent_ok(self.spawn_height) {
            return Err("canvas spawn extent must be finite and not negative".to_string());
        }

        let area = self.movable_area();
        let spawn = self.spawn_area();
        let spawn_max = Point::new(spawn.max_x(), spawn.max_y());
        if !area.contains(spawn.min_point()) || !area.contains(spawn_max) {
            return Err("canvas spawn region must lie inside the movable area".to_string());
        }

        if self.roundabout_island_radius >= self.roundabout_outer_radius {
            return Err(
                "canvas.roundabout_island_radius must be smaller than the outer radius".to_string(),
            );
        }

        if self.curve_radius <= self.road_width / 2.0 {
            return Err("canvas.curve_radius must exceed half the road width".to_string());
        }

        Ok(())
    }
}

/// Ownership rule for each element kind.
///
/// Cars and trucks always carry an owner and pedestrians never do; the
/// motorcycle rule is the free choice. Defaults prompt for every vehicle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OwnershipConfig {
    car: OwnershipRule,
    truck: OwnershipRule,
    motorcycle: OwnershipRule,
    pedestrian: OwnershipRule,
}

impl Default for OwnershipConfig {
    fn default() -> Self {
        Self {
            car: OwnershipRule::Prompt,
            truck: OwnershipRule::Prompt,
            motorcycle: OwnershipRule::Prompt,
            pedestrian: OwnershipRule::None,
        }
    }
}

impl OwnershipConfig {
    /// Sets the rule for `kind` (builder style).
    pub fn with_rule(mut self, kind: ElementKind, rule: OwnershipRule) -> Self {
        match kind {
            ElementKind::Car => self.car = rule,
            ElementKind::Truck => self.truck = rule,
            ElementKind::Motorcycle => self.motorcycle = rule,
            ElementKind::Pedestrian => self.pedestrian = rule,
        }
        self
    }

    /// Returns the effective rule for `kind`.
    ///
    /// A configured rule that contradicts the kind is overridden: cars and
    /// trucks fall back to [`OwnershipRule::Prompt`] instead of `none`, and
    /// pedestrians always use [`OwnershipRule::None`].
    pub fn rule(&self, kind: ElementKind) -> OwnershipRule {
        match kind {
            ElementKind::Car => Self::owned(self.car),
            ElementKind::Truck => Self::owned(self.truck),
            ElementKind::Motorcycle => self.motorcycle,
            ElementKind::Pedestrian => OwnershipRule::None,
        }
    }

    fn owned(rule: OwnershipRule) -> OwnershipRule {
        match rule {
            OwnershipRule::None => OwnershipRule::Prompt,
            other => other,
        }
    }

    fn validate(&self) -> Result<(), String> {
        for (name, rule) in [("car", self.car), ("truck", self.truck)] {
            if rule == OwnershipRule::None {
                return Err(format!("ownership.{name} must carry an owner, `none` is not allowed"));
            }
        }
        if self.pedestrian != OwnershipRule::None {
            return Err("ownership.pedestrian must be `none`".to_string());
        }
        Ok(())
    }
}

/// What happens to the scene after a document is generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionPolicy {
    /// Keep the scene and the last document for further editing.
    #[default]
    Retain,
    /// Start over with an empty scene.
    Reset,
}

/// Export behavior.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    labels: bool,
    filename: String,
    retention: RetentionPolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            labels: true,
            filename: "croquis.svg".to_string(),
            retention: RetentionPolicy::Retain,
        }
    }
}

impl ExportConfig {
    /// Enables or disables text labels above elements (builder style).
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the retention policy (builder style).
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Returns true if exported documents label each element.
    pub fn labels(&self) -> bool {
        self.labels
    }

    /// File name used when a document is downloaded.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }
}

/// Color overrides for the canvas and roads.
///
/// Fields that are not set fall back to the built-in palette.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    road_fill: Option<String>,
    #[serde(default)]
    road_stroke: Option<String>,
    #[serde(default)]
    island_fill: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        Self::parse("background_color", self.background_color.as_deref())
    }

    /// Returns the parsed road surface [`Color`], if configured.
    pub fn road_fill(&self) -> Result<Option<Color>, String> {
        Self::parse("road_fill", self.road_fill.as_deref())
    }

    /// Returns the parsed road outline and centerline [`Color`], if configured.
    pub fn road_stroke(&self) -> Result<Option<Color>, String> {
        Self::parse("road_stroke", self.road_stroke.as_deref())
    }

    /// Returns the parsed roundabout island [`Color`], if configured.
    pub fn island_fill(&self) -> Result<Option<Color>, String> {
        Self::parse("island_fill", self.island_fill.as_deref())
    }

    fn parse(field: &str, value: Option<&str>) -> Result<Option<Color>, String> {
        value
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid {field} in config: {err}"))
    }

    fn validate(&self) -> Result<(), String> {
        self.background_color()?;
        self.road_fill()?;
        self.road_stroke()?;
        self.island_fill()?;
        Ok(())
    }
}
