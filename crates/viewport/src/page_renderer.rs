//! Page content renderer.
//!
//! Turns one page into a [`PageNode`]: the page frame plus the five element
//! layers in fixed order (text, image, drawing, annotation, form). Elements are
//! placed at their page-local box times the slot scale; rotation, flips,
//! filters and strokes are copied over as static style.
//!
//! Selection and hover rings are decoration only. Hit-testing works on the
//! document model and never looks at a rendered node.
//!
//! Rendering is total: malformed elements (a drawing without enough points)
//! produce an empty primitive list instead of failing the page.

use crate::layout::PlacedPage;
use crate::scene::{Primitive, Stroke};
use crate::theme::Theme;
use pdf_editor_core::{
    element_bounds, AnnotationElement, AnnotationType, Color, Drawing, Element, ElementId,
    ElementKind, FormFieldElement, FormFieldType, ImageFilters, Layer, LayerVisibility, Page,
    PageId, Point, Rect, Rotation, SelectionSet, ShapeKind, TextRun,
};
use std::fmt;

/// Elements under an in-progress drag and their live offset in page units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPreview<'a> {
    pub ids: &'a [ElementId],
    pub dx: f32,
    pub dy: f32,
}

impl DragPreview<'_> {
    /// Whether `id` moves with the drag.
    pub fn includes(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }
}

/// Per-pass inputs shared by every page.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub selection: &'a SelectionSet,
    pub hovered: Option<ElementId>,
    pub layers: LayerVisibility,
    /// Text run being edited inline and its current draft.
    pub editing: Option<(ElementId, &'a str)>,
    /// Dragged elements are drawn at their previewed position.
    pub drag: Option<DragPreview<'a>>,
    pub theme: &'a Theme,
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageNode {
    pub page_id: PageId,
    pub page_index: usize,
    /// Top-left corner in content pixels.
    pub origin: Point,
    /// Rendered (post-rotation) size.
    pub width: f32,
    pub height: f32,
    /// Unrotated content size; the host rotates this box by `rotation`.
    pub content_width: f32,
    pub content_height: f32,
    pub rotation: Rotation,
    pub scale: f32,
    pub thumbnail: bool,
    pub label: Option<String>,
    /// Paper and border, plus the label for thumbnails.
    pub frame: Vec<Primitive>,
    pub layers: Vec<LayerNode>,
}

impl PageNode {
    /// Rendered layer, if it was visible for this pass.
    pub fn layer(&self, layer: Layer) -> Option<&LayerNode> {
        self.layers.iter().find(|node| node.layer == layer)
    }

    /// Rendered element in any layer.
    pub fn element(&self, id: ElementId) -> Option<&ElementNode> {
        self.layers
            .iter()
            .flat_map(|layer| layer.elements.iter())
            .find(|node| node.id == id)
    }
}

/// Elements of one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerNode {
    pub layer: Layer,
    /// z-order ascending.
    pub elements: Vec<ElementNode>,
}

/// Why an element carries a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    Selected,
    Hovered,
}

/// Decorative outline around a selected or hovered element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub kind: RingKind,
    pub rect: Rect,
    pub stroke: Stroke,
}

/// CSS-style image filter, emitted in composition order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    Brightness(f32),
    Contrast(f32),
    Saturate(f32),
    /// Degrees.
    HueRotate(f32),
    /// Pixels.
    Blur(f32),
    Grayscale(f32),
    Sepia(f32),
    Invert(f32),
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Brightness(v) => write!(f, "brightness({v})"),
            FilterOp::Contrast(v) => write!(f, "contrast({v})"),
            FilterOp::Saturate(v) => write!(f, "saturate({v})"),
            FilterOp::HueRotate(v) => write!(f, "hue-rotate({v}deg)"),
            FilterOp::Blur(v) => write!(f, "blur({v}px)"),
            FilterOp::Grayscale(v) => write!(f, "grayscale({v})"),
            FilterOp::Sepia(v) => write!(f, "sepia({v})"),
            FilterOp::Invert(v) => write!(f, "invert({v})"),
        }
    }
}

/// Filter chain for an image: brightness, contrast, saturation, hue, blur,
/// grayscale, sepia, invert, always in that order.
pub fn image_filter_ops(filters: &ImageFilters) -> Vec<FilterOp> {
    let filters = filters.clamped();
    vec![
        FilterOp::Brightness(filters.brightness),
        FilterOp::Contrast(filters.contrast),
        FilterOp::Saturate(filters.saturation),
        FilterOp::HueRotate(filters.hue),
        FilterOp::Blur(filters.blur),
        FilterOp::Grayscale(filters.grayscale),
        FilterOp::Sepia(filters.sepia),
        FilterOp::Invert(filters.invert),
    ]
}

/// Space-separated CSS `filter` value.
pub fn filter_css(ops: &[FilterOp]) -> String {
    ops.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Static style copied from the element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub opacity: f32,
    /// Clockwise degrees around the element centre.
    pub rotation: f32,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub filters: Vec<FilterOp>,
    pub locked: bool,
}

impl ElementStyle {
    fn from_element(element: &Element) -> Self {
        let mut style = Self {
            opacity: element.base.opacity.clamp(0.0, 1.0),
            rotation: 0.0,
            flip_horizontal: false,
            flip_vertical: false,
            filters: Vec::new(),
            locked: element.base.locked,
        };

        match &element.kind {
            ElementKind::Text(run) => style.rotation = run.rotation,
            ElementKind::Image(image) => {
                style.rotation = image.rotation;
                style.flip_horizontal = image.flip_horizontal;
                style.flip_vertical = image.flip_vertical;
                style.filters = image_filter_ops(&image.filters);
            }
            ElementKind::Drawing(_) | ElementKind::Annotation(_) | ElementKind::FormField(_) => {}
        }
        style
    }
}

/// One rendered element, positioned relative to its page's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub id: ElementId,
    pub layer: Layer,
    pub rect: Rect,
    pub z_index: i32,
    pub style: ElementStyle,
    pub ring: Option<Ring>,
    pub primitives: Vec<Primitive>,
}

/// Render one mounted page.
pub fn render_page(page: &Page, placed: &PlacedPage, context: &RenderContext<'_>) -> PageNode {
    let scale = placed.scale();
    let theme = context.theme;
    let (width, height) = (placed.viewport.width, placed.viewport.height);
    let thumbnail = placed.label.is_some();

    let mut frame = vec![Primitive::Rectangle {
        rect: Rect::new(0.0, 0.0, width, height),
        fill: Some(theme.colors.page_background),
        stroke: Some(Stroke::solid(
            theme.colors.page_border,
            theme.sizes.page_border_width,
        )),
    }];
    if let Some(label) = &placed.label {
        frame.push(Primitive::Text {
            origin: Point::new(0.0, height + 2.0),
            content: label.clone(),
            font_family: "sans-serif".to_string(),
            font_size: theme.sizes.page_label_font_size,
            color: theme.colors.page_label,
        });
    }

    // Thumbnails show the page frame and number only
    let layers = if thumbnail {
        Vec::new()
    } else {
        Layer::ALL
            .iter()
            .filter(|layer| context.layers.is_visible(**layer))
            .map(|layer| render_layer(page, *layer, scale, context))
            .collect()
    };

    PageNode {
        page_id: page.id,
        page_index: placed.page_index,
        origin: placed.origin,
        width,
        height,
        content_width: page.width * scale,
        content_height: page.height * scale,
        rotation: page.rotation,
        scale,
        thumbnail,
        label: placed.label.clone(),
        frame,
        layers,
    }
}

fn render_layer(page: &Page, layer: Layer, scale: f32, context: &RenderContext<'_>) -> LayerNode {
    let mut elements: Vec<&Element> = page.elements_in_layer(layer).collect();
    elements.sort_by_key(|element| element.base.z_index);

    LayerNode {
        layer,
        elements: elements
            .into_iter()
            .map(|element| render_element(element, scale, context))
            .collect(),
    }
}

/// Render one element at `scale`.
///
/// Elements under a drag preview are shifted, ring included; the document
/// still holds their committed position.
pub fn render_element(element: &Element, scale: f32, context: &RenderContext<'_>) -> ElementNode {
    let theme = context.theme;
    let rect = element_bounds(element).scaled(scale);

    let primitives = match &element.kind {
        ElementKind::Text(run) => {
            let draft = context
                .editing
                .filter(|(id, _)| *id == element.id())
                .map(|(_, draft)| draft);
            text_primitives(run, draft, rect, scale, theme)
        }
        ElementKind::Image(image) => vec![Primitive::Image {
            rect,
            source: image.source.clone(),
        }],
        ElementKind::Drawing(drawing) => drawing_primitives(drawing, scale),
        ElementKind::Annotation(annotation) => {
            annotation_primitives(annotation, rect, scale, theme)
        }
        ElementKind::FormField(field) => form_field_primitives(field, rect, theme),
    };

    let shift = context
        .drag
        .filter(|drag| drag.includes(element.id()))
        .map(|drag| (drag.dx * scale, drag.dy * scale));
    let (rect, primitives) = match shift {
        Some((dx, dy)) => (
            rect.translated(dx, dy),
            primitives
                .iter()
                .map(|primitive| primitive.translated(dx, dy))
                .collect(),
        ),
        None => (rect, primitives),
    };

    ElementNode {
        id: element.id(),
        layer: element.layer(),
        rect,
        z_index: element.base.z_index,
        style: ElementStyle::from_element(element),
        ring: ring_for(element.id(), rect, context),
        primitives,
    }
}

fn ring_for(id: ElementId, rect: Rect, context: &RenderContext<'_>) -> Option<Ring> {
    let colors = &context.theme.colors;
    let sizes = &context.theme.sizes;

    let (kind, color) = if context.selection.contains(&id) {
        (RingKind::Selected, colors.selection_ring)
    } else if context.hovered == Some(id) {
        (RingKind::Hovered, colors.hover_ring)
    } else {
        return None;
    };

    let offset = sizes.ring_offset;
    Some(Ring {
        kind,
        rect: Rect::new(
            rect.x - offset,
            rect.y - offset,
            rect.width + 2.0 * offset,
            rect.height + 2.0 * offset,
        ),
        stroke: Stroke::solid(color, sizes.ring_width),
    })
}

fn text_primitives(
    run: &TextRun,
    draft: Option<&str>,
    rect: Rect,
    scale: f32,
    theme: &Theme,
) -> Vec<Primitive> {
    let mut primitives = vec![Primitive::Text {
        origin: rect.origin(),
        content: draft.unwrap_or(run.content.as_str()).to_string(),
        font_family: run.font_family.clone(),
        font_size: run.font_size * scale,
        color: run.color,
    }];

    if draft.is_some() {
        primitives.push(Primitive::Rectangle {
            rect,
            fill: None,
            stroke: Some(Stroke::solid(theme.colors.editing_outline, 1.0)),
        });
    }
    primitives
}

/// Primitives for a drawing in page pixels.
///
/// Freehand shapes join every point; line and arrow use the first two points;
/// rectangle spans the first two points; circle treats them as a diameter.
/// A drawing with fewer points than its shape needs renders nothing.
pub fn drawing_primitives(drawing: &Drawing, scale: f32) -> Vec<Primitive> {
    let shape = drawing.shape;
    if drawing.points.len() < shape.min_points() {
        return Vec::new();
    }

    // Shaped drawings only read their first two points
    let used = if shape.is_freehand() {
        drawing.points.len()
    } else {
        2
    };
    let points: Vec<Point> = drawing
        .points
        .iter()
        .take(used)
        .map(|point| point.scaled(scale))
        .collect();
    let (first, second) = (points[0], points[1]);

    let mut stroke = Stroke {
        color: drawing.stroke.color,
        width: drawing.stroke.width * scale,
        dash: drawing.stroke.dash,
    };

    match shape {
        ShapeKind::Pen => vec![Primitive::Polyline {
            points,
            stroke,
            closed: false,
        }],
        ShapeKind::Marker => {
            stroke.color = stroke.color.with_alpha(stroke.color.a.min(128));
            vec![Primitive::Polyline {
                points,
                stroke,
                closed: false,
            }]
        }
        ShapeKind::Line => vec![Primitive::Line {
            start: first,
            end: second,
            stroke,
        }],
        ShapeKind::Arrow => vec![Primitive::Arrow {
            start: first,
            end: second,
            stroke,
            head_size: (stroke.width * 4.0).max(6.0 * scale),
        }],
        ShapeKind::Rectangle => vec![Primitive::Rectangle {
            rect: Rect::from_corners(first, second),
            fill: drawing.fill,
            stroke: Some(stroke),
        }],
        ShapeKind::Circle => vec![Primitive::Circle {
            center: first.midpoint(&second),
            radius: first.distance_to(&second) / 2.0,
            fill: drawing.fill,
            stroke: Some(stroke),
        }],
    }
}

fn annotation_primitives(
    annotation: &AnnotationElement,
    rect: Rect,
    scale: f32,
    theme: &Theme,
) -> Vec<Primitive> {
    let color = annotation.color;
    let line_width = (1.5 * scale).max(1.0);

    match annotation.annotation_type {
        AnnotationType::Highlight => vec![Primitive::Rectangle {
            rect,
            fill: Some(color.with_alpha(90)),
            stroke: None,
        }],
        AnnotationType::Underline => vec![Primitive::Line {
            start: Point::new(rect.x, rect.max_y()),
            end: Point::new(rect.max_x(), rect.max_y()),
            stroke: Stroke::solid(color, line_width),
        }],
        AnnotationType::Strikeout => {
            let middle = rect.center().y;
            vec![Primitive::Line {
                start: Point::new(rect.x, middle),
                end: Point::new(rect.max_x(), middle),
                stroke: Stroke::solid(color, line_width),
            }]
        }
        AnnotationType::Note => {
            let icon = theme.sizes.note_icon_size * scale;
            let mut primitives = vec![Primitive::Rectangle {
                rect: Rect::new(rect.x, rect.y, icon, icon),
                fill: Some(color),
                stroke: Some(Stroke::solid(Color::rgb(120, 100, 40), 1.0)),
            }];
            let note = annotation
                .content
                .as_deref()
                .filter(|content| !content.is_empty());
            if let Some(content) = note {
                primitives.push(Primitive::Text {
                    origin: Point::new(rect.x + icon + 4.0 * scale, rect.y),
                    content: content.to_string(),
                    font_family: "sans-serif".to_string(),
                    font_size: 10.0 * scale,
                    color: Color::BLACK,
                });
            }
            primitives
        }
    }
}

fn form_field_primitives(field: &FormFieldElement, rect: Rect, theme: &Theme) -> Vec<Primitive> {
    let colors = &theme.colors;
    let border = Stroke::solid(colors.field_border, 1.0);
    let font_size = rect.height * 0.6;
    let shown: &str = if field.value.is_empty() {
        &field.default_value
    } else {
        &field.value
    };

    let text = |origin: Point, content: &str| Primitive::Text {
        origin,
        content: content.to_string(),
        font_family: "sans-serif".to_string(),
        font_size,
        color: colors.field_text,
    };
    let boxed = |rect: Rect| Primitive::Rectangle {
        rect,
        fill: Some(colors.field_background),
        stroke: Some(border),
    };
    let text_origin = Point::new(rect.x + 2.0, rect.y + rect.height * 0.2);

    match field.field_type {
        FormFieldType::Text => vec![boxed(rect), text(text_origin, shown)],
        FormFieldType::Checkbox => {
            let side = rect.width.min(rect.height);
            let square = Rect::new(rect.x, rect.y, side, side);
            let mut primitives = vec![boxed(square)];
            if field.is_checked() {
                let tick = Stroke::solid(colors.field_text, (side * 0.12).max(1.0));
                let knee = Point::new(square.x + side * 0.4, square.y + side * 0.75);
                primitives.push(Primitive::Polyline {
                    points: vec![
                        Point::new(square.x + side * 0.2, square.y + side * 0.5),
                        knee,
                        Point::new(square.x + side * 0.8, square.y + side * 0.25),
                    ],
                    stroke: tick,
                    closed: false,
                });
            }
            primitives
        }
        FormFieldType::Radio => {
            let radius = rect.width.min(rect.height) / 2.0;
            let center = rect.center();
            let mut primitives = vec![Primitive::Circle {
                center,
                radius,
                fill: Some(colors.field_background),
                stroke: Some(border),
            }];
            if field.is_checked() {
                primitives.push(Primitive::Circle {
                    center,
                    radius: radius * 0.5,
                    fill: Some(colors.field_text),
                    stroke: None,
                });
            }
            primitives
        }
        FormFieldType::Dropdown => {
            let arrow_size = rect.height * 0.3;
            let arrow_x = rect.max_x() - rect.height * 0.5;
            let arrow_y = rect.center().y - arrow_size / 2.0;
            vec![
                boxed(rect),
                text(text_origin, shown),
                Primitive::Polyline {
                    points: vec![
                        Point::new(arrow_x - arrow_size / 2.0, arrow_y),
                        Point::new(arrow_x, arrow_y + arrow_size),
                        Point::new(arrow_x + arrow_size / 2.0, arrow_y),
                    ],
                    stroke: border,
                    closed: false,
                },
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_editor_core::{compute_viewport, ElementBase, ImageElement, LineDash, StrokeStyle};

    fn placed(page: &Page, zoom: f32) -> PlacedPage {
        PlacedPage {
            page_id: page.id,
            page_index: 0,
            origin: Point::ZERO,
            viewport: compute_viewport(page, zoom),
            scale_multiplier: 1.0,
            label: None,
        }
    }

    fn context<'a>(selection: &'a SelectionSet, theme: &'a Theme) -> RenderContext<'a> {
        RenderContext {
            selection,
            hovered: None,
            layers: LayerVisibility::default(),
            editing: None,
            drag: None,
            theme,
        }
    }

    fn render(
        page: &Page,
        zoom: f32,
        selection: &SelectionSet,
        hovered: Option<ElementId>,
        layers: LayerVisibility,
    ) -> PageNode {
        let theme = Theme::default();
        let context = RenderContext {
            hovered,
            layers,
            ..context(selection, &theme)
        };
        render_page(page, &placed(page, zoom), &context)
    }

    fn texts(primitives: &[Primitive]) -> Vec<&str> {
        primitives
            .iter()
            .filter_map(|primitive| match primitive {
                Primitive::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    fn circle(points: Vec<Point>) -> Drawing {
        Drawing::new(ShapeKind::Circle, points)
    }

    #[test]
    fn test_circle_from_diameter_points() {
        let diameter = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let primitives = drawing_primitives(&circle(diameter), 1.0);
        let [Primitive::Circle { center, radius, .. }] = primitives.as_slice() else {
            panic!("expected one circle, got {primitives:?}");
        };
        assert_eq!(*center, Point::new(5.0, 0.0));
        assert_eq!(*radius, 5.0);
    }

    #[test]
    fn test_shapes_with_too_few_points_render_nothing() {
        for shape in [
            ShapeKind::Pen,
            ShapeKind::Marker,
            ShapeKind::Line,
            ShapeKind::Arrow,
            ShapeKind::Rectangle,
            ShapeKind::Circle,
        ] {
            let single = vec![Point::new(1.0, 1.0)];
            assert!(single.len() < shape.min_points());
            let empty = Drawing::new(shape, Vec::new());
            assert!(drawing_primitives(&empty, 1.0).is_empty());
            let dot = Drawing::new(shape, single);
            assert!(drawing_primitives(&dot, 1.0).is_empty());
        }
    }

    #[test]
    fn test_line_uses_first_two_points_only() {
        let drawing = Drawing::new(
            ShapeKind::Line,
            vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 4.0),
                Point::new(100.0, 100.0),
            ],
        );
        assert_eq!(
            drawing_primitives(&drawing, 2.0),
            vec![Primitive::Line {
                start: Point::new(0.0, 0.0),
                end: Point::new(8.0, 8.0),
                stroke: Stroke {
                    color: Color::BLACK,
                    width: 4.0,
                    dash: LineDash::Solid,
                },
            }]
        );
    }

    #[test]
    fn test_rectangle_spans_first_two_points() {
        let corners = vec![Point::new(30.0, 40.0), Point::new(10.0, 5.0)];
        let mut drawing = Drawing::new(ShapeKind::Rectangle, corners);
        drawing.stroke = StrokeStyle {
            color: Color::BLUE,
            width: 1.0,
            dash: LineDash::Dashed,
        };
        let primitives = drawing_primitives(&drawing, 1.0);
        let [Primitive::Rectangle { rect, stroke, .. }] = primitives.as_slice() else {
            panic!("expected one rectangle");
        };
        assert_eq!(*rect, Rect::new(10.0, 5.0, 20.0, 35.0));
        assert_eq!(stroke.map(|s| s.dash), Some(LineDash::Dashed));
    }

    #[test]
    fn test_freehand_joins_all_points() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(3.0, 1.0),
            Point::new(5.0, 5.0),
        ];
        assert!(ShapeKind::Marker.is_freehand());
        let marker = Drawing::new(ShapeKind::Marker, points.clone());
        let primitives = drawing_primitives(&marker, 1.0);
        let [Primitive::Polyline {
            points: rendered,
            stroke,
            closed,
        }] = primitives.as_slice()
        else {
            panic!("expected polyline");
        };
        assert_eq!(rendered, &points);
        assert!(!closed);
        assert!(stroke.color.a <= 128);
    }

    #[test]
    fn test_elements_positioned_at_zoom() {
        let run = Element::text(
            ElementBase::new(10.0, 20.0, 50.0, 12.0),
            TextRun::new("Total"),
        );
        let id = run.id();
        let page = Page::new(PageId(1), 595.0, 842.0).with_element(run);
        let visible = LayerVisibility::default();
        let node = render(&page, 2.0, &SelectionSet::new(), None, visible);

        let element = node.element(id).expect("text rendered");
        assert_eq!(element.rect, Rect::new(20.0, 40.0, 100.0, 24.0));
        assert_eq!(node.width, 1190.0);
        assert!(element.ring.is_none());
    }

    #[test]
    fn test_layers_render_in_fixed_order_and_respect_flags() {
        let page = Page::new(PageId(1), 100.0, 100.0);
        let visible = LayerVisibility::default();
        let all = render(&page, 1.0, &SelectionSet::new(), None, visible);
        let order: Vec<Layer> = all.layers.iter().map(|layer| layer.layer).collect();
        assert_eq!(order, Layer::ALL.to_vec());

        let without_forms = render(
            &page,
            1.0,
            &SelectionSet::new(),
            None,
            LayerVisibility::default().with_layer(Layer::Form, false),
        );
        assert!(without_forms.layer(Layer::Form).is_none());
        assert_eq!(without_forms.layers.len(), 4);
    }

    #[test]
    fn test_selection_wins_over_hover() {
        let a = Element::text(ElementBase::new(0.0, 0.0, 10.0, 10.0), TextRun::new("a"));
        let b = Element::text(ElementBase::new(20.0, 0.0, 10.0, 10.0), TextRun::new("b"));
        let (a_id, b_id) = (a.id(), b.id());
        let page = Page::new(PageId(1), 100.0, 100.0)
            .with_element(a)
            .with_element(b);
        let visible = LayerVisibility::default();

        let node = render(&page, 1.0, &SelectionSet::single(a_id), Some(a_id), visible);
        assert_eq!(
            node.element(a_id).and_then(|e| e.ring).map(|r| r.kind),
            Some(RingKind::Selected)
        );
        assert!(node.element(b_id).and_then(|e| e.ring).is_none());

        let node = render(&page, 1.0, &SelectionSet::new(), Some(b_id), visible);
        let ring = node.element(b_id).and_then(|e| e.ring).expect("hover ring");
        assert_eq!(ring.kind, RingKind::Hovered);
        assert_eq!(ring.rect, Rect::new(18.0, -2.0, 14.0, 14.0));
    }

    #[test]
    fn test_drag_preview_shifts_only_dragged_elements() {
        let dragged = Element::drawing(Drawing::new(
            ShapeKind::Line,
            vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0)],
        ));
        let still = Element::text(ElementBase::new(50.0, 50.0, 10.0, 10.0), TextRun::new("s"));
        let ids = [dragged.id()];
        let theme = Theme::default();
        let selection = SelectionSet::single(ids[0]);
        let context = RenderContext {
            drag: Some(DragPreview {
                ids: &ids,
                dx: 5.0,
                dy: -2.0,
            }),
            ..context(&selection, &theme)
        };

        let node = render_element(&dragged, 2.0, &context);
        assert_eq!(node.rect, Rect::new(30.0, 16.0, 20.0, 0.0));
        assert!(matches!(
            node.primitives.as_slice(),
            [Primitive::Line { start, end, .. }]
                if *start == Point::new(30.0, 16.0) && *end == Point::new(50.0, 16.0)
        ));
        assert_eq!(node.ring.map(|ring| ring.rect.x), Some(28.0));

        let node = render_element(&still, 2.0, &context);
        assert_eq!(node.rect, Rect::new(100.0, 100.0, 20.0, 20.0));
    }

    #[test]
    fn test_image_filters_in_composition_order() {
        let mut image = ImageElement::new("blob:1");
        image.filters.brightness = 1.2;
        image.filters.blur = 40.0;
        image.flip_horizontal = true;
        let element = Element::image(ElementBase::new(0.0, 0.0, 10.0, 10.0), image);
        let theme = Theme::default();
        let selection = SelectionSet::new();

        let node = render_element(&element, 1.0, &context(&selection, &theme));
        assert!(node.style.flip_horizontal);
        assert_eq!(
            filter_css(&node.style.filters),
            "brightness(1.2) contrast(1) saturate(1) hue-rotate(0deg) blur(20px) grayscale(0) \
             sepia(0) invert(0)"
        );
    }

    #[test]
    fn test_editing_shows_draft_text() {
        let run = Element::text(ElementBase::new(0.0, 0.0, 40.0, 12.0), TextRun::new("bar"));
        let id = run.id();
        let theme = Theme::default();
        let selection = SelectionSet::new();
        let context = RenderContext {
            editing: Some((id, "foo")),
            ..context(&selection, &theme)
        };

        let node = render_element(&run, 1.0, &context);
        assert!(matches!(
            &node.primitives[0],
            Primitive::Text { content, .. } if content == "foo"
        ));
        assert_eq!(node.primitives.len(), 2);
    }

    #[test]
    fn test_form_fields_reflect_values() {
        let mut checkbox = FormFieldElement::new(FormFieldType::Checkbox, "agree");
        checkbox.value = "true".to_string();
        let element = Element::form_field(ElementBase::new(0.0, 0.0, 12.0, 12.0), checkbox);
        let theme = Theme::default();
        let selection = SelectionSet::new();
        let context = context(&selection, &theme);
        assert_eq!(render_element(&element, 1.0, &context).primitives.len(), 2);

        let mut dropdown = FormFieldElement::new(FormFieldType::Dropdown, "country");
        dropdown.default_value = "NZ".to_string();
        dropdown.options = vec!["NZ".to_string(), "AU".to_string()];
        let element = Element::form_field(ElementBase::new(0.0, 0.0, 80.0, 20.0), dropdown);
        let node = render_element(&element, 1.0, &context);
        assert!(texts(&node.primitives).contains(&"NZ"));
    }

    #[test]
    fn test_thumbnail_renders_frame_and_label_only() {
        let run = Element::text(ElementBase::new(0.0, 0.0, 10.0, 10.0), TextRun::new("a"));
        let page = Page::new(PageId(3), 595.0, 842.0).with_element(run);
        let mut slot = placed(&page, 0.2);
        slot.label = Some("3".to_string());

        let theme = Theme::default();
        let selection = SelectionSet::new();
        let node = render_page(&page, &slot, &context(&selection, &theme));

        assert!(node.thumbnail);
        assert!(node.layers.is_empty());
        assert_eq!(texts(&node.frame), vec!["3"]);
    }

    #[test]
    fn test_annotation_styles() {
        let mut note = AnnotationElement::new(AnnotationType::Note);
        note.content = Some("check totals".to_string());
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        let theme = Theme::default();

        assert_eq!(annotation_primitives(&note, rect, 1.0, &theme).len(), 2);

        let underline = AnnotationElement::new(AnnotationType::Underline);
        let primitives = annotation_primitives(&underline, rect, 1.0, &theme);
        assert!(matches!(
            primitives.as_slice(),
            [Primitive::Line { start, .. }] if start.y == 20.0
        ));
    }
}
