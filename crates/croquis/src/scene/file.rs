//! Scene description files.
//!
//! A scene file is a TOML document naming the street layout and listing the
//! elements in z-order:
//!
//! ```toml
//! layout = "roundabout"
//!
//! [[elements]]
//! kind = "car"
//! owner = "first-party"
//! x = 180
//! y = 300
//! rotation = 90
//!
//! [[elements]]
//! kind = "pedestrian"
//! ```
//!
//! Elements are replayed through the [`Scene`] API (add, then move, then
//! rotate), so positions are clamped and rotations normalized exactly as if
//! the user had placed them. A missing coordinate keeps the spawn value for
//! that axis.

use std::ops::Range;

use log::{debug, info};
use serde::Deserialize;
use toml::Spanned;

use crate::{
    config::AppConfig,
    error::CroquisError,
    scene::{ElementKind, Owner, Scene, StreetLayout},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    #[serde(default)]
    layout: Option<Spanned<String>>,
    #[serde(default)]
    elements: Vec<ElementEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementEntry {
    kind: Spanned<String>,
    #[serde(default)]
    owner: Option<Spanned<String>>,
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y: Option<f32>,
    #[serde(default)]
    rotation: Option<f32>,
}

/// Builds a scene from the text of a scene file.
///
/// # Errors
///
/// Returns [`CroquisError::SceneFile`] carrying the source text and the span
/// of the offending value when the TOML is malformed, contains unknown keys,
/// or names an unknown layout, kind or owner.
///
/// # Examples
///
/// ```
/// # use croquis::config::AppConfig;
/// # use croquis::scene::{StreetLayout, file};
/// let scene = file::load(
///     r#"
///     layout = "curve"
///
///     [[elements]]
///     kind = "truck"
///     owner = "third-party"
///     x = 500
///     y = 100
///     "#,
///     &AppConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(scene.layout(), StreetLayout::Curve);
/// let truck = scene.elements().next().unwrap();
/// assert_eq!(truck.position().x(), 380.0);
/// ```
pub fn load(source: &str, config: &AppConfig) -> Result<Scene, CroquisError> {
    let file: SceneFile = toml::from_str(source).map_err(|err| {
        CroquisError::new_scene_file_error(err.message(), err.span(), source)
    })?;

    let mut scene = Scene::new(config);

    if let Some(layout) = &file.layout {
        let parsed = layout
            .get_ref()
            .parse::<StreetLayout>()
            .map_err(|err| spanned_error(err, layout.span(), source))?;
        scene.set_layout(parsed);
    }

    for entry in &file.elements {
        let kind = entry
            .kind
            .get_ref()
            .parse::<ElementKind>()
            .map_err(|err| spanned_error(err, entry.kind.span(), source))?;

        let owner = entry
            .owner
            .as_ref()
            .map(|owner| {
                owner
                    .get_ref()
                    .parse::<Owner>()
                    .map_err(|err| spanned_error(err, owner.span(), source))
            })
            .transpose()?;

        let id = scene.add_element(kind, owner);

        if entry.x.is_some() || entry.y.is_some() {
            let spawned = scene
                .element(id)
                .map(|element| element.position())
                .unwrap_or_default();
            scene.move_element(
                id,
                entry.x.unwrap_or(spawned.x()),
                entry.y.unwrap_or(spawned.y()),
            );
        }

        if let Some(rotation) = entry.rotation {
            scene.rotate_element(id, rotation);
        }

        debug!(id:% = id, kind = kind.name(); "Scene file element loaded");
    }

    info!(
        layout = scene.layout().name(),
        elements = scene.len();
        "Scene file loaded"
    );

    Ok(scene)
}

fn spanned_error(err: impl ToString, span: Range<usize>, source: &str) -> CroquisError {
    CroquisError::new_scene_file_error(err.to_string(), Some(span), source)
}
