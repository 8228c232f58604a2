//! Croquis - an accident-scene sketch builder.
//!
//! A sketch is a street layout (cross, T-junction, Y-junction, roundabout,
//! straight road or curve) with vehicles and pedestrians placed on it. Users
//! drag elements around, rotate them with a handle and finally export the
//! whole scene as one self-contained SVG document.
//!
//! The crate is organized around a few pieces:
//!
//! - [`scene`] - the editable sketch and its invariants
//! - [`interaction`] - pointer gestures, hit testing and selection
//! - [`road`] - parametric road geometry per layout
//! - [`export`] - SVG export and the live preview
//! - [`builder`] - builder sessions, the element palette and hosts
//! - [`config`] - configuration loaded from TOML

pub mod builder;
pub mod config;
pub mod export;
pub mod interaction;
pub mod road;
pub mod scene;

mod error;
mod glyph;
mod theme;

pub use croquis_core::{color, draw, geometry};

pub use error::CroquisError;

use log::{debug, info};

use config::AppConfig;
use export::ExportDocument;
use interaction::Controller;
use scene::Scene;

/// Entry point for building and exporting sketches.
///
/// # Examples
///
/// ```
/// use croquis::{SketchBuilder, config::AppConfig};
/// use croquis::scene::{ElementKind, Owner, StreetLayout};
///
/// let builder = SketchBuilder::new(AppConfig::default());
///
/// let mut scene = builder.scene();
/// scene.set_layout(StreetLayout::TJunction);
/// scene.add_element(ElementKind::Car, Some(Owner::FirstParty));
///
/// let document = builder.generate(&scene);
/// assert_eq!(document.filename(), "croquis.svg");
/// assert!(document.svg().starts_with("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct SketchBuilder {
    config: AppConfig,
}

impl SketchBuilder {
    /// Create a new sketch builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Creates an empty scene with the cross layout.
    pub fn scene(&self) -> Scene {
        Scene::new(&self.config)
    }

    /// Creates a builder session in the placeholder phase.
    pub fn session(&self) -> builder::Session {
        debug!("Creating builder session");
        builder::Session::new(self.config.clone())
    }

    /// Exports a scene to an SVG document.
    pub fn generate(&self, scene: &Scene) -> ExportDocument {
        export::generate(scene, &self.config)
    }

    /// Renders the live editing view of a scene.
    pub fn render_preview(&self, scene: &Scene, controller: &Controller) -> String {
        export::render_preview(scene, controller, &self.config)
    }

    /// Loads a scene from the text of a scene file.
    ///
    /// # Errors
    ///
    /// Returns [`CroquisError::SceneFile`] if the file is malformed or names
    /// an unknown layout, kind or owner.
    pub fn load_scene(&self, source: &str) -> Result<Scene, CroquisError> {
        info!("Loading scene file");
        scene::file::load(source, &self.config)
    }
}
