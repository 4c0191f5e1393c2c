//! Typed page elements.
//!
//! Every element shares an [`ElementBase`] (id, box, opacity, z-order, lock) and
//! carries one kind-specific payload in [`ElementKind`]. Renderers and hit-testers
//! dispatch on the kind with exhaustive matches.
//!
//! Coordinates are page-local units with the origin at the page's top-left corner,
//! x increasing right and y increasing down.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an element.
///
/// Stable across the document lifetime; generated as a UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(uuid::Uuid);

impl ElementId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a color from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Convert to normalized RGBA values (0.0 to 1.0).
    pub fn to_normalized(&self) -> (f32, f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }

    /// Format as a `#rrggbbaa` hex string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// The five element layers, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Text,
    Image,
    Drawing,
    Annotation,
    Form,
}

impl Layer {
    /// All layers, bottom to top.
    pub const ALL: [Layer; 5] = [
        Layer::Text,
        Layer::Image,
        Layer::Drawing,
        Layer::Annotation,
        Layer::Form,
    ];
}

/// Fields shared by every element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementBase {
    pub id: ElementId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default)]
    pub locked: bool,
}

fn default_opacity() -> f32 {
    1.0
}

impl ElementBase {
    /// Create an unlocked, fully opaque base with a fresh id.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: ElementId::new(),
            x,
            y,
            width,
            height,
            opacity: 1.0,
            z_index: 0,
            locked: false,
        }
    }

    /// Bounding box in page units.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A run of text with its font metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub content: String,
    pub font_family: String,
    pub font_size: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    /// Clockwise rotation in degrees.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub color: Color,
}

fn default_line_height() -> f32 {
    1.2
}

impl TextRun {
    /// Create a 12pt Helvetica run in black.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_family: "Helvetica".to_string(),
            font_size: 12.0,
            line_height: default_line_height(),
            rotation: 0.0,
            color: Color::BLACK,
        }
    }
}

/// Image adjustment values, each on a bounded scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageFilters {
    /// 0..=2, 1 = unchanged.
    pub brightness: f32,
    /// 0..=2, 1 = unchanged.
    pub contrast: f32,
    /// 0..=2, 1 = unchanged.
    pub saturation: f32,
    /// Degrees, -180..=180.
    pub hue: f32,
    /// Pixels, 0..=20.
    pub blur: f32,
    /// 0..=1.
    pub grayscale: f32,
    /// 0..=1.
    pub sepia: f32,
    /// 0..=1.
    pub invert: f32,
}

impl Default for ImageFilters {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            hue: 0.0,
            blur: 0.0,
            grayscale: 0.0,
            sepia: 0.0,
            invert: 0.0,
        }
    }
}

impl ImageFilters {
    /// Copy with every value clamped to its scale; NaN falls back to the neutral value.
    pub fn clamped(&self) -> Self {
        let neutral = Self::default();
        let clamp = |value: f32, min: f32, max: f32, fallback: f32| {
            if value.is_nan() {
                fallback
            } else {
                value.clamp(min, max)
            }
        };

        Self {
            brightness: clamp(self.brightness, 0.0, 2.0, neutral.brightness),
            contrast: clamp(self.contrast, 0.0, 2.0, neutral.contrast),
            saturation: clamp(self.saturation, 0.0, 2.0, neutral.saturation),
            hue: clamp(self.hue, -180.0, 180.0, neutral.hue),
            blur: clamp(self.blur, 0.0, 20.0, neutral.blur),
            grayscale: clamp(self.grayscale, 0.0, 1.0, neutral.grayscale),
            sepia: clamp(self.sepia, 0.0, 1.0, neutral.sepia),
            invert: clamp(self.invert, 0.0, 1.0, neutral.invert),
        }
    }

    /// Whether every value leaves the image unchanged.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

/// Raster image placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    /// Opaque reference resolved by the host (URL, blob key, ...).
    pub source: String,
    #[serde(default)]
    pub flip_horizontal: bool,
    #[serde(default)]
    pub flip_vertical: bool,
    /// Clockwise rotation in degrees.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub filters: ImageFilters,
}

impl ImageElement {
    /// Create an unflipped, unfiltered image.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flip_horizontal: false,
            flip_vertical: false,
            rotation: 0.0,
            filters: ImageFilters::default(),
        }
    }
}

/// Shape tag for vector drawings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Freehand pen stroke.
    Pen,
    /// Freehand translucent marker stroke.
    Marker,
    Line,
    Arrow,
    Rectangle,
    Circle,
}

impl ShapeKind {
    /// Pen and marker strokes follow their points as a polyline.
    pub fn is_freehand(&self) -> bool {
        matches!(self, ShapeKind::Pen | ShapeKind::Marker)
    }

    /// Points needed before the shape can be drawn.
    pub fn min_points(&self) -> usize {
        2
    }
}

/// Dash pattern for strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDash {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Outline style for drawings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    #[serde(default)]
    pub dash: LineDash,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 2.0,
            dash: LineDash::Solid,
        }
    }
}

/// Vector drawing; points are page-local absolute coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub shape: ShapeKind,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub stroke: StrokeStyle,
    #[serde(default)]
    pub fill: Option<Color>,
}

impl Drawing {
    /// Create an unfilled drawing with the default stroke.
    pub fn new(shape: ShapeKind, points: Vec<Point>) -> Self {
        Self {
            shape,
            points,
            stroke: StrokeStyle::default(),
            fill: None,
        }
    }
}

/// Markup style of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationType {
    Highlight,
    Underline,
    Strikeout,
    Note,
}

/// Markup placed over page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationElement {
    pub annotation_type: AnnotationType,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default = "default_annotation_color")]
    pub color: Color,
}

fn default_annotation_color() -> Color {
    Color::YELLOW
}

impl AnnotationElement {
    /// Create an annotation without a note, in the default color.
    pub fn new(annotation_type: AnnotationType) -> Self {
        Self {
            annotation_type,
            content: None,
            color: default_annotation_color(),
        }
    }
}

/// Input control type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFieldType {
    Text,
    Checkbox,
    Radio,
    Dropdown,
}

impl FormFieldType {
    /// Radio and dropdown fields pick from an option list.
    pub fn is_choice(&self) -> bool {
        matches!(self, FormFieldType::Radio | FormFieldType::Dropdown)
    }
}

/// Interactive form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFieldElement {
    pub field_type: FormFieldType,
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl FormFieldElement {
    /// Create an empty field with no options.
    pub fn new(field_type: FormFieldType, name: impl Into<String>) -> Self {
        Self {
            field_type,
            name: name.into(),
            value: String::new(),
            default_value: String::new(),
            options: Vec::new(),
        }
    }

    /// Checkbox and radio fields read "true"/"on"/"yes" as checked.
    pub fn is_checked(&self) -> bool {
        matches!(
            self.value.to_ascii_lowercase().as_str(),
            "true" | "on" | "yes" | "1"
        )
    }
}

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKind {
    Text(TextRun),
    Image(ImageElement),
    Drawing(Drawing),
    Annotation(AnnotationElement),
    FormField(FormFieldElement),
}

/// A page element: shared base plus kind payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(flatten)]
    pub base: ElementBase,
    pub kind: ElementKind,
}

impl Element {
    /// Combine a base with a kind payload.
    pub fn new(base: ElementBase, kind: ElementKind) -> Self {
        Self { base, kind }
    }

    /// Create a text element.
    pub fn text(base: ElementBase, run: TextRun) -> Self {
        Self::new(base, ElementKind::Text(run))
    }

    /// Create an image element.
    pub fn image(base: ElementBase, image: ImageElement) -> Self {
        Self::new(base, ElementKind::Image(image))
    }

    /// Create a drawing whose base box is derived from its points.
    pub fn drawing(drawing: Drawing) -> Self {
        let bounds = Rect::bounding(&drawing.points).unwrap_or_default();
        let base = ElementBase::new(bounds.x, bounds.y, bounds.width, bounds.height);
        Self::new(base, ElementKind::Drawing(drawing))
    }

    /// Create an annotation element.
    pub fn annotation(base: ElementBase, annotation: AnnotationElement) -> Self {
        Self::new(base, ElementKind::Annotation(annotation))
    }

    /// Create a form field element.
    pub fn form_field(base: ElementBase, field: FormFieldElement) -> Self {
        Self::new(base, ElementKind::FormField(field))
    }

    /// The element's identifier.
    pub fn id(&self) -> ElementId {
        self.base.id
    }

    /// The layer this element renders in.
    pub fn layer(&self) -> Layer {
        match self.kind {
            ElementKind::Text(_) => Layer::Text,
            ElementKind::Image(_) => Layer::Image,
            ElementKind::Drawing(_) => Layer::Drawing,
            ElementKind::Annotation(_) => Layer::Annotation,
            ElementKind::FormField(_) => Layer::Form,
        }
    }

    /// Builder-style z-order override.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.base.z_index = z_index;
        self
    }

    /// Builder-style lock.
    pub fn locked(mut self) -> Self {
        self.base.locked = true;
        self
    }

    /// Shift the element by a page-unit delta, points included for drawings.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.base.x += dx;
        self.base.y += dy;
        if let ElementKind::Drawing(drawing) = &mut self.kind {
            for point in &mut drawing.points {
                *point = point.offset(dx, dy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_normalization() {
        let color = Color::rgb(255, 128, 0);
        let (r, g, b, a) = color.to_normalized();
        assert!((r - 1.0).abs() < 0.001);
        assert!((g - 0.502).abs() < 0.01);
        assert!((b - 0.0).abs() < 0.001);
        assert!((a - 1.0).abs() < 0.001);
        assert_eq!(color.to_hex(), "#ff8000ff");
    }

    #[test]
    fn test_filters_are_clamped_to_scale() {
        let wild = ImageFilters {
            brightness: 5.0,
            contrast: -1.0,
            saturation: f32::NAN,
            hue: 720.0,
            blur: 99.0,
            grayscale: 2.0,
            sepia: -3.0,
            invert: 0.5,
        };
        let clamped = wild.clamped();
        assert_eq!(clamped.brightness, 2.0);
        assert_eq!(clamped.contrast, 0.0);
        assert_eq!(clamped.saturation, 1.0);
        assert_eq!(clamped.hue, 180.0);
        assert_eq!(clamped.blur, 20.0);
        assert_eq!(clamped.grayscale, 1.0);
        assert_eq!(clamped.sepia, 0.0);
        assert_eq!(clamped.invert, 0.5);
        assert!(ImageFilters::default().is_neutral());
    }

    #[test]
    fn test_element_layer_mapping() {
        let base = ElementBase::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            Element::text(base.clone(), TextRun::new("a")).layer(),
            Layer::Text
        );
        assert_eq!(
            Element::image(base.clone(), ImageElement::new("img")).layer(),
            Layer::Image
        );
        let stroke = Drawing::new(ShapeKind::Pen, Vec::new());
        assert_eq!(Element::drawing(stroke).layer(), Layer::Drawing);
        let note = AnnotationElement::new(AnnotationType::Note);
        assert_eq!(
            Element::annotation(base.clone(), note).layer(),
            Layer::Annotation
        );
        let field = FormFieldElement::new(FormFieldType::Checkbox, "agree");
        assert_eq!(Element::form_field(base, field).layer(), Layer::Form);
    }

    #[test]
    fn test_translate_moves_drawing_points() {
        let mut element = Element::drawing(Drawing::new(
            ShapeKind::Line,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)],
        ));
        element.translate(3.0, 4.0);

        assert_eq!(element.base.x, 3.0);
        let ElementKind::Drawing(drawing) = &element.kind else {
            panic!("expected drawing");
        };
        assert_eq!(
            drawing.points,
            vec![Point::new(3.0, 4.0), Point::new(13.0, 9.0)]
        );
    }

    #[test]
    fn test_form_field_checked_values() {
        let mut field = FormFieldElement::new(FormFieldType::Checkbox, "agree");
        assert!(!field.is_checked());
        field.value = "On".to_string();
        assert!(field.is_checked());
        assert!(FormFieldType::Dropdown.is_choice());
        assert!(!FormFieldType::Text.is_choice());
    }

    #[test]
    fn test_element_json_shape() {
        let element = Element::text(
            ElementBase::new(1.0, 2.0, 3.0, 4.0),
            TextRun::new("hello"),
        );
        let json = serde_json::to_value(&element).expect("serialize element");
        assert_eq!(json["kind"]["kind"], "text");
        assert_eq!(json["x"], 1.0);

        let back: Element = serde_json::from_value(json).expect("deserialize element");
        assert_eq!(back, element);
    }
}
