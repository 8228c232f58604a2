//! Command-line argument definitions for the Croquis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the scene and output paths, the
//! configuration file, preview rendering and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Croquis sketch tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the scene file (TOML)
    #[arg(help = "Path to the scene file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "croquis.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write the editing preview, with ownership tags and controls, instead of the export
    #[arg(long)]
    pub preview: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
