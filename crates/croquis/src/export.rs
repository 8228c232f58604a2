//! Export of scenes to SVG documents.
//!
//! [`generate`] produces the final document handed to a host; [`render_preview`]
//! produces the live editing view. Both draw the background, the road and the
//! element glyphs through the same code path, so what the user sees while
//! editing is what ends up in the export. The preview adds interaction chrome
//! on top: ownership tags, the selection ring, gesture state classes and the
//! rotate and delete controls.
//!
//! Export is total: every scene, including an empty one, yields a document.

mod svg;

use log::{debug, info};

use crate::{config::AppConfig, interaction::Controller, scene::Scene};

/// Media type of every exported document.
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// A self-contained SVG document ready to be saved or handed to a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    svg: String,
    filename: String,
}

impl ExportDocument {
    pub fn new(svg: String, filename: impl Into<String>) -> Self {
        Self {
            svg,
            filename: filename.into(),
        }
    }

    /// Returns the UTF-8 SVG text.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Returns the file name the document should be saved under.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn media_type(&self) -> &'static str {
        SVG_MEDIA_TYPE
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.svg.as_bytes()
    }

    pub fn into_svg(self) -> String {
        self.svg
    }
}

/// Exports a scene.
///
/// The document contains, in order: the background, the road of the active
/// layout, every element glyph in z-order and, when labels are enabled, one
/// text label above each element. The output is byte-identical for an
/// unchanged scene and configuration.
pub fn generate(scene: &Scene, config: &AppConfig) -> ExportDocument {
    let document = svg::Svg::new(config).render_export(scene);
    info!(
        layout = scene.layout().name(),
        elements = scene.len(),
        filename = config.export().filename();
        "Scene exported"
    );
    ExportDocument::new(document.to_string(), config.export().filename())
}

/// Renders the live editing view of a scene.
pub fn render_preview(scene: &Scene, controller: &Controller, config: &AppConfig) -> String {
    let document = svg::Svg::new(config).render_preview(scene, controller);
    debug!(
        elements = scene.len(),
        state:? = controller.state();
        "Preview rendered"
    );
    document.to_string()
}
