//! Integration tests for the SketchBuilder API
//!
//! These tests drive whole builder sessions the way an embedding host would.

use std::fs;

use croquis::{
    CroquisError, SketchBuilder,
    builder::{DownloadHost, Host, SessionPhase},
    config::AppConfig,
    export::ExportDocument,
    geometry::Point,
    scene::{ElementKind, Owner, StreetLayout},
};

#[derive(Default)]
struct CallbackHost {
    cancelled: bool,
    generated: Vec<ExportDocument>,
}

impl Host for CallbackHost {
    fn on_cancel(&mut self) {
        self.cancelled = true;
    }

    fn on_generated(&mut self, document: &ExportDocument) -> Result<(), CroquisError> {
        self.generated.push(document.clone());
        Ok(())
    }
}

fn config(source: &str) -> AppConfig {
    toml::from_str(source).expect("Failed to parse config")
}

#[test]
fn test_builder_api_exists() {
    let builder = SketchBuilder::default();
    assert!(builder.scene().is_empty());
    assert_eq!(builder.session().phase(), SessionPhase::Placeholder);
}

#[test]
fn test_unopened_session_rejects_edits() {
    let builder = SketchBuilder::default();
    let mut session = builder.session();

    assert_eq!(session.select_kind(ElementKind::Pedestrian), None);
    session.select_layout(StreetLayout::Roundabout);
    assert!(session.scene().is_empty());
    assert_eq!(session.scene().layout(), StreetLayout::Cross);

    let mut host = CallbackHost::default();
    assert!(session.generate(&mut host).is_err());
    assert!(host.generated.is_empty());
}

#[test]
fn test_unvalidated_spawn_region_does_not_panic() {
    let config = config("[canvas]\nspawn_width = inf\nspawn_height = nan\n");
    assert!(config.validate().is_err());

    let builder = SketchBuilder::new(config);
    let mut scene = builder.scene();
    let id = scene.add_element(ElementKind::Pedestrian, None);
    let position = scene.element(id).unwrap().position();
    assert!(position.x().is_finite() && position.y().is_finite());

    let document = builder.generate(&scene);
    assert!(document.svg().contains("data-layer=\"element\""));
}

#[test]
fn test_full_session_to_callback_host() {
    let builder = SketchBuilder::new(config("[canvas]\nseed = 11"));
    let mut session = builder.session();
    session.open();

    session.select_layout(StreetLayout::Roundabout);
    assert_eq!(session.select_kind(ElementKind::Car), None);
    let car = session.choose_owner(Owner::FirstParty).unwrap();
    session.select_kind(ElementKind::Truck);
    let truck = session.choose_owner(Owner::ThirdParty).unwrap();
    let walker = session.select_kind(ElementKind::Pedestrian).unwrap();

    let order: Vec<_> = session.scene().elements().map(|e| e.id()).collect();
    assert_eq!(order, vec![car, truck, walker]);

    let mut host = CallbackHost::default();
    let document = session.generate(&mut host).expect("Failed to generate");
    assert_eq!(document.media_type(), "image/svg+xml");
    assert!(document.svg().contains("<circle"), "Roundabout island");
    assert!(document.svg().contains("</svg>"));

    assert_eq!(host.generated.len(), 1);
    assert_eq!(session.scene().len(), 3);
}

#[test]
fn test_generate_twice_is_byte_identical() {
    let builder = SketchBuilder::new(config("[canvas]\nseed = 5"));
    let mut session = builder.session();
    session.open();
    session.select_kind(ElementKind::Motorcycle);
    session.choose_owner(Owner::ThirdParty);

    let mut host = CallbackHost::default();
    session.generate(&mut host).unwrap();
    session.generate(&mut host).unwrap();
    assert_eq!(host.generated[0], host.generated[1]);
}

#[test]
fn test_reset_retention_starts_over() {
    let builder = SketchBuilder::new(config("[export]\nretention = \"reset\""));
    let mut session = builder.session();
    session.open();
    session.select_layout(StreetLayout::Curve);
    session.select_kind(ElementKind::Pedestrian);

    let mut host = CallbackHost::default();
    session.generate(&mut host).unwrap();

    assert!(session.scene().is_empty());
    assert_eq!(session.scene().layout(), StreetLayout::Cross);
    assert!(host.generated[0].svg().contains("data-layer=\"element\""));
}

#[test]
fn test_cancel_notifies_host() {
    let builder = SketchBuilder::default();
    let mut session = builder.session();
    session.open();
    session.select_kind(ElementKind::Pedestrian);

    let mut host = CallbackHost::default();
    session.cancel(&mut host);
    assert!(host.cancelled);
    assert!(host.generated.is_empty());
    assert_eq!(session.phase(), SessionPhase::Placeholder);
    assert!(session.scene().is_empty());
}

#[test]
fn test_download_host_writes_fixed_filename() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let builder = SketchBuilder::default();
    let mut session = builder.session();
    session.open();
    session.select_kind(ElementKind::Pedestrian);

    let mut host = DownloadHost::new(dir.path());
    let svg = session.generate(&mut host).unwrap().svg().to_string();

    let written = fs::read_to_string(dir.path().join("croquis.svg")).unwrap();
    assert_eq!(written, svg);
}

#[test]
fn test_download_host_custom_filename() {
    let dir = tempfile::tempdir().unwrap();
    let builder = SketchBuilder::new(config("[export]\nfilename = \"scene-42.svg\""));
    let mut session = builder.session();
    session.open();

    session.generate(&mut DownloadHost::new(dir.path())).unwrap();
    assert!(dir.path().join("scene-42.svg").is_file());
}

#[test]
fn test_download_host_rejects_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let builder = SketchBuilder::default();
    let mut session = builder.session();
    session.open();
    session.select_kind(ElementKind::Pedestrian);

    let result = session.generate(&mut DownloadHost::new(&missing));
    assert!(matches!(result, Err(CroquisError::Export(_))));
    assert_eq!(session.scene().len(), 1);
    assert!(session.last_document().is_none());
}

#[test]
fn test_load_scene_file() {
    let builder = SketchBuilder::default();
    let scene = builder
        .load_scene(
            r#"
            layout = "t"

            [[elements]]
            kind = "car"
            owner = "na"
            x = 120
            y = 140
            rotation = -90

            [[elements]]
            kind = "pedestrian"
            x = 0
            y = 0
            "#,
        )
        .expect("Failed to load scene");

    assert_eq!(scene.layout(), StreetLayout::TJunction);
    let elements: Vec<_> = scene.elements().collect();
    assert_eq!(elements[0].position(), Point::new(120.0, 140.0));
    assert_eq!(elements[0].rotation(), 270.0);
    assert_eq!(elements[0].owner(), Some(Owner::FirstParty));
    assert_eq!(elements[1].position(), Point::new(20.0, 20.0));
}

#[test]
fn test_load_scene_reports_span() {
    let builder = SketchBuilder::default();
    let source = "layout = \"hexagon\"\n";
    match builder.load_scene(source) {
        Err(CroquisError::SceneFile { span, src, .. }) => {
            let span = span.expect("span should be known");
            assert!(src[span].contains("hexagon"));
        }
        other => panic!("Expected scene file error, got {other:?}"),
    }
}

#[test]
fn test_preview_via_session() {
    let builder = SketchBuilder::default();
    let mut session = builder.session();
    session.open();
    let id = session.select_kind(ElementKind::Pedestrian).unwrap();
    let at = session.scene().element(id).unwrap().position();

    session.pointer_down(at);
    let preview = session.preview();
    assert!(preview.contains("dragging"));
    assert!(preview.contains("data-layer=\"chrome\""));
    session.pointer_up();
    assert!(!session.preview().contains("dragging"));
}
