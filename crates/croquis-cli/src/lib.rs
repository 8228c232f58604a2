//! CLI logic for the Croquis sketch tool.
//!
//! Loads a scene file, exports it (or renders its editing preview) and
//! writes the SVG to disk.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use croquis::{CroquisError, SketchBuilder, interaction::Controller};

/// Run the Croquis CLI application
///
/// # Errors
///
/// Returns `CroquisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene file errors
pub fn run(args: &Args) -> Result<(), CroquisError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        preview = args.preview;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = SketchBuilder::new(app_config);
    let scene = builder.load_scene(&source)?;

    let svg = if args.preview {
        builder.render_preview(&scene, &Controller::new())
    } else {
        builder.generate(&scene).into_svg()
    };

    fs::write(&args.output, svg)?;

    info!(output_file = args.output, elements = scene.len(); "SVG exported successfully");

    Ok(())
}
