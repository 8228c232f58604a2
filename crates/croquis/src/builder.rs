//! Builder sessions and the hosts they report to.
//!
//! A [`Session`] is one run of the sketch builder. It starts as a
//! placeholder, becomes active when opened, and ends either by cancelling
//! (the scene is discarded) or by generating a document, which is handed to
//! a [`Host`]. After a successful generate the scene is kept or reset
//! according to the configured [`RetentionPolicy`].
//!
//! Edits made while the session is a placeholder are ignored.
//!
//! The session also carries the two selectors of the builder UI: the element
//! palette, with its ownership sub-choice for kinds that prompt for an owner,
//! and the street layout selector.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use croquis_core::geometry::Point;

use crate::{
    config::{AppConfig, RetentionPolicy},
    error::CroquisError,
    export::{self, ExportDocument},
    interaction::Controller,
    scene::{ElementId, ElementKind, Owner, OwnershipRule, Scene, StreetLayout},
};

/// Receives the outcome of a builder session.
pub trait Host {
    /// Called when the user abandons the session.
    fn on_cancel(&mut self) {}

    /// Called with every generated document.
    ///
    /// # Errors
    ///
    /// An error is returned to the caller of [`Session::generate`]; the
    /// scene is left untouched in that case.
    fn on_generated(&mut self, document: &ExportDocument) -> Result<(), CroquisError>;
}

/// Host that saves each generated document into a directory under the
/// document's file name.
#[derive(Debug, Clone)]
pub struct DownloadHost {
    directory: PathBuf,
}

impl DownloadHost {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path the given document is written to.
    pub fn target(&self, document: &ExportDocument) -> PathBuf {
        self.directory.join(document.filename())
    }
}

impl Host for DownloadHost {
    fn on_cancel(&mut self) {
        debug!(directory:? = self.directory; "Download cancelled");
    }

    fn on_generated(&mut self, document: &ExportDocument) -> Result<(), CroquisError> {
        if !self.directory.is_dir() {
            return Err(CroquisError::Export(format!(
                "download directory {} does not exist or is not a directory",
                self.directory.display()
            )));
        }

        let path = self.target(document);
        fs::write(&path, document.as_bytes())?;
        info!(path:? = path, bytes = document.svg().len(); "Document saved");
        Ok(())
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// The builder has not been opened yet, or was cancelled.
    #[default]
    Placeholder,
    /// The builder is open for editing.
    Active,
}

/// The element palette and its ownership sub-choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    pending: Option<ElementKind>,
}

impl Palette {
    /// Returns the kind whose ownership sub-choice is open, if any.
    pub fn pending(&self) -> Option<ElementKind> {
        self.pending
    }

    fn toggle(&mut self, kind: ElementKind) {
        self.pending = if self.pending == Some(kind) {
            None
        } else {
            Some(kind)
        };
    }

    fn close(&mut self) {
        self.pending = None;
    }
}

/// One run of the sketch builder.
#[derive(Debug, Clone)]
pub struct Session {
    config: AppConfig,
    phase: SessionPhase,
    scene: Scene,
    controller: Controller,
    palette: Palette,
    last_document: Option<ExportDocument>,
}

impl Session {
    /// Creates a session in the placeholder phase with an empty cross scene.
    pub fn new(config: AppConfig) -> Self {
        let scene = Scene::new(&config);
        Self {
            config,
            phase: SessionPhase::Placeholder,
            scene,
            controller: Controller::new(),
            palette: Palette::default(),
            last_document: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// Opens the builder. Opening an active session does nothing.
    pub fn open(&mut self) {
        if !self.is_active() {
            info!("Builder opened");
            self.phase = SessionPhase::Active;
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Returns the most recently generated document.
    pub fn last_document(&self) -> Option<&ExportDocument> {
        self.last_document.as_ref()
    }

    /// Selects a palette kind.
    ///
    /// Kinds that prompt for an owner open the ownership sub-choice instead
    /// of creating an element; selecting the same kind again closes it. Any
    /// other kind is created right away and its id returned.
    pub fn select_kind(&mut self, kind: ElementKind) -> Option<ElementId> {
        if !self.editable("select kind") {
            return None;
        }
        match self.scene.ownership_rule(kind) {
            OwnershipRule::Prompt => {
                self.palette.toggle(kind);
                debug!(kind = kind.name(), open = self.palette.pending().is_some(); "Owner choice toggled");
                None
            }
            _ => {
                self.palette.close();
                Some(self.scene.add_element(kind, None))
            }
        }
    }

    /// Completes the open ownership sub-choice.
    ///
    /// Creates the pending kind with `owner` and closes the sub-choice.
    /// Returns `None` when no sub-choice is open.
    pub fn choose_owner(&mut self, owner: Owner) -> Option<ElementId> {
        if !self.editable("choose owner") {
            return None;
        }
        let kind = self.palette.pending.take()?;
        Some(self.scene.add_element(kind, Some(owner)))
    }

    /// Replaces the street layout. Elements are kept.
    pub fn select_layout(&mut self, layout: StreetLayout) {
        if self.editable("select layout") {
            self.scene.set_layout(layout);
        }
    }

    /// Replaces the street layout by name.
    ///
    /// # Errors
    ///
    /// Returns [`CroquisError::UnknownLayout`] if the name is not a known
    /// layout; the current layout is kept.
    pub fn select_layout_named(&mut self, name: &str) -> Result<(), CroquisError> {
        let layout = name.parse::<StreetLayout>()?;
        self.select_layout(layout);
        Ok(())
    }

    pub fn pointer_down(&mut self, pointer: Point) {
        if self.editable("pointer down") {
            self.controller.pointer_down_at(&self.scene, pointer);
        }
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        if self.editable("pointer move") {
            self.controller.pointer_move(&mut self.scene, pointer);
        }
    }

    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.controller.pointer_leave();
    }

    pub fn click(&mut self, pointer: Point) {
        if self.editable("click") {
            self.controller.click_at(&mut self.scene, pointer);
        }
    }

    /// Removes every element; the layout is kept.
    pub fn clear(&mut self) {
        if self.editable("clear") {
            self.scene.clear();
            self.controller.reset();
        }
    }

    /// Renders the live editing view.
    pub fn preview(&self) -> String {
        export::render_preview(&self.scene, &self.controller, &self.config)
    }

    /// Discards the scene, returns to the placeholder and notifies `host`.
    pub fn cancel(&mut self, host: &mut dyn Host) {
        self.discard();
        self.last_document = None;
        self.phase = SessionPhase::Placeholder;
        info!("Builder cancelled");
        host.on_cancel();
    }

    /// Exports the scene and hands the document to `host`.
    ///
    /// On success the scene is kept or reset according to the retention
    /// policy, and the document stays available through
    /// [`Session::last_document`].
    ///
    /// # Errors
    ///
    /// Returns [`CroquisError::Export`] if the session is not active, or the
    /// host's error if it rejects the document.
    pub fn generate(&mut self, host: &mut dyn Host) -> Result<&ExportDocument, CroquisError> {
        if !self.is_active() {
            return Err(CroquisError::Export(
                "the builder must be opened before generating".to_string(),
            ));
        }

        let document = export::generate(&self.scene, &self.config);
        host.on_generated(&document)?;

        let retention = self.config.export().retention();
        if retention == RetentionPolicy::Reset {
            self.discard();
        }
        info!(retention:? = retention; "Document generated");

        Ok(&*self.last_document.insert(document))
    }

    /// Edits are only accepted while the builder is open.
    fn editable(&self, action: &str) -> bool {
        if !self.is_active() {
            debug!(action; "Edit ignored, builder not opened");
        }
        self.is_active()
    }

    fn discard(&mut self) {
        self.scene.reset();
        self.controller.reset();
        self.palette.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CanvasConfig, ExportConfig, OwnershipConfig, StyleConfig};

    #[derive(Default)]
    struct RecordingHost {
        cancelled: usize,
        documents: Vec<ExportDocument>,
        reject: bool,
    }

    impl Host for RecordingHost {
        fn on_cancel(&mut self) {
            self.cancelled += 1;
        }

        fn on_generated(&mut self, document: &ExportDocument) -> Result<(), CroquisError> {
            if self.reject {
                return Err(CroquisError::Export("rejected".to_string()));
            }
            self.documents.push(document.clone());
            Ok(())
        }
    }

    fn config(retention: RetentionPolicy, ownership: OwnershipConfig) -> AppConfig {
        AppConfig::new(
            CanvasConfig::default().with_seed(Some(3)),
            ownership,
            ExportConfig::default().with_retention(retention),
            StyleConfig::default(),
        )
    }

    fn active_session(retention: RetentionPolicy) -> Session {
        let mut session = Session::new(config(retention, OwnershipConfig::default()));
        session.open();
        session
    }

    #[test]
    fn test_session_starts_as_placeholder() {
        let mut session = Session::new(AppConfig::default());
        assert_eq!(session.phase(), SessionPhase::Placeholder);
        assert!(session.scene().is_empty());

        let mut host = RecordingHost::default();
        assert!(matches!(
            session.generate(&mut host),
            Err(CroquisError::Export(_))
        ));
        assert!(host.documents.is_empty());

        session.open();
        session.open();
        assert!(session.is_active());
    }

    #[test]
    fn test_placeholder_ignores_edits() {
        let mut session = Session::new(config(RetentionPolicy::Retain, OwnershipConfig::default()));

        assert_eq!(session.select_kind(ElementKind::Pedestrian), None);
        assert_eq!(session.select_kind(ElementKind::Car), None);
        assert_eq!(session.palette().pending(), None);
        assert_eq!(session.choose_owner(Owner::FirstParty), None);
        session.select_layout(StreetLayout::Curve);
        session.select_layout_named("y").unwrap();
        session.pointer_down(Point::new(200.0, 250.0));
        session.click(Point::new(200.0, 250.0));

        assert!(session.scene().is_empty());
        assert_eq!(session.scene().layout(), StreetLayout::Cross);
        assert!(session.controller().state().is_idle());
        assert_eq!(session.controller().selected(), None);

        session.open();
        assert!(session.select_kind(ElementKind::Pedestrian).is_some());
    }

    #[test]
    fn test_cancelled_session_ignores_edits() {
        let mut session = active_session(RetentionPolicy::Retain);
        session.cancel(&mut RecordingHost::default());

        assert_eq!(session.select_kind(ElementKind::Pedestrian), None);
        assert!(session.scene().is_empty());
    }

    #[test]
    fn test_prompting_kind_opens_owner_choice() {
        let mut session = active_session(RetentionPolicy::Retain);

        assert_eq!(session.select_kind(ElementKind::Car), None);
        assert_eq!(session.palette().pending(), Some(ElementKind::Car));
        assert!(session.scene().is_empty());

        // Same kind again closes the choice.
        assert_eq!(session.select_kind(ElementKind::Car), None);
        assert_eq!(session.palette().pending(), None);
        assert_eq!(session.choose_owner(Owner::FirstParty), None);

        session.select_kind(ElementKind::Truck);
        session.select_kind(ElementKind::Car);
        assert_eq!(session.palette().pending(), Some(ElementKind::Car));

        let id = session.choose_owner(Owner::ThirdParty).unwrap();
        let element = session.scene().element(id).unwrap();
        assert_eq!(element.kind(), ElementKind::Car);
        assert_eq!(element.owner(), Some(Owner::ThirdParty));
        assert_eq!(session.palette().pending(), None);
    }

    #[test]
    fn test_pedestrian_is_created_immediately() {
        let mut session = active_session(RetentionPolicy::Retain);
        session.select_kind(ElementKind::Truck);

        let id = session.select_kind(ElementKind::Pedestrian).unwrap();
        assert_eq!(session.scene().element(id).unwrap().owner(), None);
        assert_eq!(session.palette().pending(), None);
    }

    #[test]
    fn test_auto_rule_assigns_owner_without_prompt() {
        let ownership =
            OwnershipConfig::default().with_rule(ElementKind::Motorcycle, OwnershipRule::AutoThirdParty);
        let mut session = Session::new(config(RetentionPolicy::Retain, ownership));
        session.open();

        let id = session.select_kind(ElementKind::Motorcycle).unwrap();
        assert_eq!(
            session.scene().element(id).unwrap().owner(),
            Some(Owner::ThirdParty)
        );
    }

    #[test]
    fn test_layout_selection_keeps_elements() {
        let mut session = active_session(RetentionPolicy::Retain);
        session.select_kind(ElementKind::Pedestrian);

        session.select_layout(StreetLayout::YJunction);
        assert_eq!(session.scene().layout(), StreetLayout::YJunction);
        assert_eq!(session.scene().len(), 1);

        session.select_layout_named("glorieta").unwrap();
        assert_eq!(session.scene().layout(), StreetLayout::Roundabout);

        let err = session.select_layout_named("diamond").unwrap_err();
        assert!(matches!(err, CroquisError::UnknownLayout(ref e) if e.name() == "diamond"));
        assert_eq!(session.scene().layout(), StreetLayout::Roundabout);
    }

    #[test]
    fn test_cancel_discards_scene_and_notifies_host() {
        let mut session = active_session(RetentionPolicy::Retain);
        session.select_layout(StreetLayout::Curve);
        session.select_kind(ElementKind::Pedestrian);
        session.select_kind(ElementKind::Car);

        let mut host = RecordingHost::default();
        session.cancel(&mut host);

        assert_eq!(host.cancelled, 1);
        assert_eq!(session.phase(), SessionPhase::Placeholder);
        assert!(session.scene().is_empty());
        assert_eq!(session.scene().layout(), StreetLayout::Cross);
        assert_eq!(session.palette().pending(), None);
    }

    #[test]
    fn test_generate_retains_scene() {
        let mut session = active_session(RetentionPolicy::Retain);
        session.select_layout(StreetLayout::TJunction);
        session.select_kind(ElementKind::Pedestrian);

        let mut host = RecordingHost::default();
        let svg = session.generate(&mut host).unwrap().svg().to_string();

        assert_eq!(host.documents.len(), 1);
        assert_eq!(host.documents[0].svg(), svg);
        assert_eq!(session.scene().len(), 1);
        assert_eq!(session.scene().layout(), StreetLayout::TJunction);
        assert!(session.is_active());
        assert_eq!(session.last_document().map(ExportDocument::svg), Some(svg.as_str()));
    }

    #[test]
    fn test_generate_resets_scene() {
        let mut session = active_session(RetentionPolicy::Reset);
        session.select_layout(StreetLayout::Straight);
        session.select_kind(ElementKind::Pedestrian);

        let mut host = RecordingHost::default();
        session.generate(&mut host).unwrap();

        assert!(session.scene().is_empty());
        assert_eq!(session.scene().layout(), StreetLayout::Cross);
        assert!(session.last_document().is_some());
        assert_eq!(host.documents.len(), 1);
    }

    #[test]
    fn test_rejected_document_keeps_scene() {
        let mut session = active_session(RetentionPolicy::Reset);
        session.select_kind(ElementKind::Pedestrian);

        let mut host = RecordingHost {
            reject: true,
            ..RecordingHost::default()
        };
        assert!(session.generate(&mut host).is_err());
        assert_eq!(session.scene().len(), 1);
        assert!(session.last_document().is_none());
    }

    #[test]
    fn test_pointer_gestures_reach_scene() {
        let mut session = active_session(RetentionPolicy::Retain);
        let id = session.select_kind(ElementKind::Pedestrian).unwrap();
        let start = session.scene().element(id).unwrap().position();

        session.pointer_down(start);
        session.pointer_move(Point::new(60.0, 70.0));
        session.pointer_leave();
        session.pointer_move(Point::new(300.0, 300.0));
        assert_eq!(
            session.scene().element(id).unwrap().position(),
            Point::new(60.0, 70.0)
        );

        session.click(Point::new(60.0, 70.0));
        assert_eq!(session.controller().selected(), Some(id));
        assert!(session.preview().contains("selected"));

        session.clear();
        assert!(session.scene().is_empty());
        assert_eq!(session.controller().selected(), None);
    }
}
