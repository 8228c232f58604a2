//! Error adapter for converting CroquisError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. Scene file errors
//! carry their source text and the span of the offending value, which is
//! rendered as a labeled snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use croquis::CroquisError;

/// Adapter that renders a [`CroquisError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a CroquisError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CroquisError::Io(_) => "croquis::io",
            CroquisError::Config(_) => "croquis::config",
            CroquisError::SceneFile { .. } => "croquis::scene_file",
            CroquisError::UnknownLayout(_) => "croquis::unknown_layout",
            CroquisError::Export(_) => "croquis::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            CroquisError::SceneFile { .. } | CroquisError::UnknownLayout(_) => Some(Box::new(
                "layouts: cross, t-junction, y-junction, roundabout, straight, curve; \
                 kinds: car, truck, motorcycle, pedestrian; owners: first-party, third-party",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.0 {
            CroquisError::SceneFile { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let CroquisError::SceneFile {
            span: Some(span), ..
        } = &self.0
        else {
            return None;
        };

        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Wrap a [`CroquisError`] for rendering by miette.
pub fn to_reportable(err: &CroquisError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
