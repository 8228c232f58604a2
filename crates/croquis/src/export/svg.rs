//! SVG rendering of scenes.

use svg::{self, node::element as svg_element};

use croquis_core::{
    draw::{Drawable, LayeredOutput, RenderLayer, SvgNode},
    geometry::{Point, Size},
};

use crate::{
    config::AppConfig,
    glyph::{self, Swatch},
    interaction::{CONTROL_RADIUS, Controller, HitPart, InteractionState, control_anchor},
    road::Road,
    scene::{PlacedElement, Scene},
    theme::Theme,
};

const FONT_FAMILY: &str = "Arial, sans-serif";
const LABEL_FONT_SIZE: f32 = 11.0;
/// Vertical distance between a label baseline and the element it names.
const LABEL_GAP: f32 = 6.0;
const SELECTION_PADDING: f32 = 4.0;
const TAG_HEIGHT: f32 = 14.0;
const TAG_GAP: f32 = 4.0;
const DELETE_FILL: &str = "#EF4444";
const ROTATE_INK: &str = "#004EC9";

/// Renders scenes with one resolved configuration.
#[derive(Debug)]
pub(super) struct Svg {
    theme: Theme,
    labels: bool,
}

impl Svg {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            theme: Theme::from_style(config.style()),
            labels: config.export().labels(),
        }
    }

    /// Renders the exported document.
    pub fn render_export(&self, scene: &Scene) -> svg::Document {
        let mut output = self.render_scene(scene);
        if self.labels {
            for element in scene.elements() {
                output.add_to_layer(RenderLayer::Label, self.render_label(element));
            }
        }
        self.document(scene.canvas().bounds().to_size(), output)
    }

    /// Renders the live preview with interaction chrome.
    pub fn render_preview(&self, scene: &Scene, controller: &Controller) -> svg::Document {
        let mut output = self.render_scene(scene);
        for element in scene.elements() {
            output.add_to_layer(RenderLayer::Chrome, self.render_chrome(element, controller));
        }
        self.document(scene.canvas().bounds().to_size(), output)
            .set("class", "croquis-preview")
    }

    fn document(&self, size: Size, output: LayeredOutput) -> svg::Document {
        let mut doc = svg::Document::new()
            .set("width", size.width())
            .set("height", size.height())
            .set(
                "viewBox",
                format!("0 0 {} {}", size.width(), size.height()),
            );
        for node in output.render() {
            doc = doc.add(node);
        }
        doc
    }

    /// Background, road and element glyphs: everything preview and export share.
    fn render_scene(&self, scene: &Scene) -> LayeredOutput {
        let size = scene.canvas().bounds().to_size();
        let mut output = LayeredOutput::new();

        let background = svg_element::Rectangle::new()
            .set("width", size.width())
            .set("height", size.height())
            .set("fill", self.theme.background());
        output.add_to_layer(RenderLayer::Background, Box::new(background));

        let road = Road::new(scene.layout(), scene.canvas(), &self.theme);
        output.merge(road.render_to_layers(Point::default()));

        for element in scene.elements() {
            output.merge(glyph::place(element).render_to_layers());
        }

        output
    }

    /// Text label centered above the element's rotated bounds.
    fn render_label(&self, element: &PlacedElement) -> SvgNode {
        let bounds = glyph::place(element).bounds();
        let swatch = Swatch::for_element(element.kind(), element.owner());
        let y = (bounds.min_y() - LABEL_GAP).max(LABEL_FONT_SIZE);

        Box::new(
            svg_element::Text::new(element.label())
                .set("x", bounds.center().x())
                .set("y", y)
                .set("text-anchor", "middle")
                .set("font-family", FONT_FAMILY)
                .set("font-size", LABEL_FONT_SIZE)
                .set("font-weight", "bold")
                .set("fill", swatch.darker()),
        )
    }

    /// Ownership tag, selection ring and controls, in the element's frame.
    fn render_chrome(&self, element: &PlacedElement, controller: &Controller) -> SvgNode {
        let size = glyph::footprint(element.kind());
        let placed = glyph::place(element);

        let mut classes = vec!["croquis-element"];
        if controller.selected() == Some(element.id()) {
            classes.push("selected");
        }
        match controller.state() {
            InteractionState::Dragging { id, .. } if id == element.id() => classes.push("dragging"),
            InteractionState::Rotating { id, .. } if id == element.id() => classes.push("rotating"),
            _ => {}
        }

        let mut group = svg_element::Group::new()
            .set("class", classes.join(" "))
            .set("data-id", element.id().to_string())
            .set("transform", placed.transform());

        if classes.contains(&"selected") {
            group = group.add(self.selection_ring(size));
        }
        if let Some(owner) = element.owner() {
            group = group.add(self.owner_tag(size, owner.label(), Swatch::for_owner(owner)));
        }
        for part in [HitPart::RotateHandle, HitPart::DeleteHandle] {
            if let Some(anchor) = control_anchor(element, part) {
                group = group.add(self.control(part, anchor));
            }
        }

        Box::new(group)
    }

    fn selection_ring(&self, size: Size) -> svg_element::Rectangle {
        let width = size.width() + SELECTION_PADDING * 2.0;
        let height = size.height() + SELECTION_PADDING * 2.0;
        svg_element::Rectangle::new()
            .set("x", -width / 2.0)
            .set("y", -height / 2.0)
            .set("width", width)
            .set("height", height)
            .set("rx", SELECTION_PADDING)
            .set("fill", "none")
            .set("stroke", self.theme.road_stroke())
            .set("stroke-width", 2)
            .set("stroke-dasharray", "4,3")
    }

    fn owner_tag(&self, size: Size, text: &str, swatch: Swatch) -> svg_element::Group {
        let width = TAG_HEIGHT * 2.0;
        let top = size.height() / 2.0 + TAG_GAP;
        let background = svg_element::Rectangle::new()
            .set("x", -width / 2.0)
            .set("y", top)
            .set("width", width)
            .set("height", TAG_HEIGHT)
            .set("rx", TAG_HEIGHT / 2.0)
            .set("fill", swatch.hex());
        let label = svg_element::Text::new(text)
            .set("x", 0)
            .set("y", top + TAG_HEIGHT / 2.0)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", FONT_FAMILY)
            .set("font-size", 9)
            .set("font-weight", "bold")
            .set("fill", "#FFFFFF");

        svg_element::Group::new()
            .set("class", "owner-tag")
            .add(background)
            .add(label)
    }

    fn control(&self, part: HitPart, anchor: Point) -> svg_element::Group {
        let (class, symbol, fill, ink) = match part {
            HitPart::DeleteHandle => ("delete-control", "×", DELETE_FILL, "#FFFFFF"),
            _ => ("rotate-control", "↻", "#FFFFFF", ROTATE_INK),
        };
        let button = svg_element::Circle::new()
            .set("cx", anchor.x())
            .set("cy", anchor.y())
            .set("r", CONTROL_RADIUS)
            .set("fill", fill)
            .set("stroke", self.theme.road_stroke())
            .set("stroke-width", 1);
        let symbol = svg_element::Text::new(symbol)
            .set("x", anchor.x())
            .set("y", anchor.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", FONT_FAMILY)
            .set("font-size", 12)
            .set("fill", ink);

        svg_element::Group::new()
            .set("class", class)
            .add(button)
            .add(symbol)
    }
}
