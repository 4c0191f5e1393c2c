//! Hit-testing and rubber-band selection.
//!
//! Two containment rules are used on purpose:
//! - region selection requires the element's bounds to be fully enclosed
//! - point targeting only needs the point inside the element's bounds.

use crate::document::Page;
use crate::element::{Element, ElementId, ElementKind, Layer};
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Per-layer flags gating rendering and hit-testing for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerVisibility {
    pub text: bool,
    pub image: bool,
    pub drawing: bool,
    pub annotation: bool,
    pub form: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            text: true,
            image: true,
            drawing: true,
            annotation: true,
            form: true,
        }
    }
}

impl LayerVisibility {
    /// Whether a layer takes part in this pass.
    pub fn is_visible(&self, layer: Layer) -> bool {
        match layer {
            Layer::Text => self.text,
            Layer::Image => self.image,
            Layer::Drawing => self.drawing,
            Layer::Annotation => self.annotation,
            Layer::Form => self.form,
        }
    }

    /// Copy with one layer's flag replaced.
    pub fn with_layer(mut self, layer: Layer, visible: bool) -> Self {
        match layer {
            Layer::Text => self.text = visible,
            Layer::Image => self.image = visible,
            Layer::Drawing => self.drawing = visible,
            Layer::Annotation => self.annotation = visible,
            Layer::Form => self.form = visible,
        }
        self
    }
}

/// Bounding box of an element in page-local units.
///
/// Drawings use the min/max of their points; a drawing without points is a
/// zero-size box at its base position.
pub fn element_bounds(element: &Element) -> Rect {
    match &element.kind {
        ElementKind::Drawing(drawing) => Rect::bounding(&drawing.points)
            .unwrap_or_else(|| Rect::new(element.base.x, element.base.y, 0.0, 0.0)),
        ElementKind::Text(_)
        | ElementKind::Image(_)
        | ElementKind::Annotation(_)
        | ElementKind::FormField(_) => element.base.rect(),
    }
}

/// Visible elements sorted by z-index ascending, document order breaking ties.
fn visible_elements_by_z<'a>(page: &'a Page, visibility: &LayerVisibility) -> Vec<&'a Element> {
    let mut elements: Vec<&Element> = page
        .elements
        .iter()
        .filter(|element| visibility.is_visible(element.layer()))
        .collect();
    elements.sort_by_key(|element| element.base.z_index);
    elements
}

/// Ids of every visible element fully enclosed by `region`
///
/// `region` is page-local and already normalized. The result is ordered by
/// z-index ascending.
pub fn elements_in_region(
    page: &Page,
    region: &Rect,
    visibility: &LayerVisibility,
) -> Vec<ElementId> {
    visible_elements_by_z(page, visibility)
        .into_iter()
        .filter(|element| region.contains_rect(&element_bounds(element)))
        .map(Element::id)
        .collect()
}

/// Topmost visible element whose bounds contain `point`
pub fn element_at_point(
    page: &Page,
    point: &Point,
    visibility: &LayerVisibility,
) -> Option<ElementId> {
    visible_elements_by_z(page, visibility)
        .into_iter()
        .rev()
        .find(|element| element_bounds(element).contains_point(point))
        .map(Element::id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageId;
    use crate::element::{
        AnnotationElement, AnnotationType, Drawing, ElementBase, FormFieldElement, FormFieldType,
        ShapeKind, TextRun,
    };
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn text_at(x: f32, y: f32, width: f32, height: f32) -> Element {
        Element::text(ElementBase::new(x, y, width, height), TextRun::new("run"))
    }

    fn a4() -> Page {
        Page::new(PageId(1), 595.0, 842.0)
    }

    #[test]
    fn test_region_requires_full_enclosure() {
        let inside = text_at(10.0, 10.0, 50.0, 20.0);
        let overhanging = text_at(590.0, 10.0, 50.0, 20.0);
        let (inside_id, overhanging_id) = (inside.id(), overhanging.id());
        let page = a4().with_element(inside).with_element(overhanging);

        let region = Rect::from_corners(Point::new(0.0, 0.0), Point::new(600.0, 850.0));
        let hits = elements_in_region(&page, &region, &LayerVisibility::default());

        assert_eq!(hits, vec![inside_id]);
        assert!(!hits.contains(&overhanging_id));
    }

    #[test]
    fn test_region_orders_by_z_index() {
        let top = text_at(0.0, 0.0, 5.0, 5.0).with_z_index(3);
        let bottom = text_at(10.0, 0.0, 5.0, 5.0).with_z_index(1);
        let middle = Element::drawing(Drawing::new(
            ShapeKind::Line,
            vec![Point::new(20.0, 0.0), Point::new(25.0, 5.0)],
        ))
        .with_z_index(2);
        let ids = [bottom.id(), middle.id(), top.id()];
        let page = a4()
            .with_element(top)
            .with_element(bottom)
            .with_element(middle);

        let region = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            elements_in_region(&page, &region, &LayerVisibility::default()),
            ids.to_vec()
        );
    }

    #[test]
    fn test_region_respects_layer_visibility() {
        let note = Element::annotation(
            ElementBase::new(10.0, 10.0, 20.0, 20.0),
            AnnotationElement::new(AnnotationType::Note),
        );
        let field = Element::form_field(
            ElementBase::new(40.0, 10.0, 20.0, 20.0),
            FormFieldElement::new(FormFieldType::Text, "name"),
        );
        let run = text_at(70.0, 10.0, 20.0, 20.0);
        let (note_id, field_id, run_id) = (note.id(), field.id(), run.id());
        let page = a4()
            .with_element(note)
            .with_element(field)
            .with_element(run);
        let region = Rect::new(0.0, 0.0, 200.0, 200.0);

        let no_annotations = LayerVisibility::default()
            .with_layer(Layer::Annotation, false);
        let hits = elements_in_region(&page, &region, &no_annotations);
        assert!(!hits.contains(&note_id));
        assert!(hits.contains(&field_id));
        assert!(hits.contains(&run_id));

        let no_forms = LayerVisibility::default().with_layer(Layer::Form, false);
        let hits = elements_in_region(&page, &region, &no_forms);
        assert!(hits.contains(&note_id));
        assert!(!hits.contains(&field_id));
    }

    #[test]
    fn test_drawing_bounds_from_points() {
        let drawing = Element::drawing(Drawing::new(
            ShapeKind::Pen,
            vec![
                Point::new(30.0, 40.0),
                Point::new(10.0, 90.0),
                Point::new(50.0, 60.0),
            ],
        ));
        assert_eq!(element_bounds(&drawing), Rect::new(10.0, 40.0, 40.0, 50.0));

        let mut empty = Element::drawing(Drawing::new(ShapeKind::Pen, Vec::new()));
        empty.base.x = 12.0;
        empty.base.y = 8.0;
        assert_eq!(element_bounds(&empty), Rect::new(12.0, 8.0, 0.0, 0.0));
    }

    #[test]
    fn test_region_selection_is_monotonic() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut page = a4();
        for _ in 0..60 {
            let x = rng.gen_range(0.0..500.0);
            let y = rng.gen_range(0.0..800.0);
            let (width, height) = (rng.gen_range(1.0..80.0), rng.gen_range(1.0..40.0));
            page.elements.push(text_at(x, y, width, height));
        }
        let visibility = LayerVisibility::default();

        for _ in 0..100 {
            let a = Point::new(rng.gen_range(0.0..595.0), rng.gen_range(0.0..842.0));
            let b = Point::new(rng.gen_range(0.0..595.0), rng.gen_range(0.0..842.0));
            let small = Rect::from_corners(a, b);
            let grow = rng.gen_range(0.0..100.0);
            let large = Rect::new(
                small.x - grow,
                small.y - grow,
                small.width + 2.0 * grow,
                small.height + 2.0 * grow,
            );

            let before = elements_in_region(&page, &small, &visibility);
            let after = elements_in_region(&page, &large, &visibility);
            assert!(before.iter().all(|id| after.contains(id)));
        }
    }

    #[test]
    fn test_point_picks_topmost_visible_element() {
        let under = text_at(0.0, 0.0, 100.0, 100.0).with_z_index(0);
        let over = Element::annotation(
            ElementBase::new(20.0, 20.0, 30.0, 30.0),
            AnnotationElement::new(AnnotationType::Highlight),
        )
        .with_z_index(5);
        let (under_id, over_id) = (under.id(), over.id());
        let page = a4().with_element(under).with_element(over);
        let point = Point::new(25.0, 25.0);

        assert_eq!(
            element_at_point(&page, &point, &LayerVisibility::default()),
            Some(over_id)
        );

        let hidden = LayerVisibility::default()
            .with_layer(Layer::Annotation, false);
        assert_eq!(element_at_point(&page, &point, &hidden), Some(under_id));

        let blank = Point::new(400.0, 400.0);
        assert_eq!(element_at_point(&page, &blank, &hidden), None);
    }

    #[test]
    fn test_point_uses_containment_not_enclosure() {
        let wide = text_at(590.0, 10.0, 50.0, 20.0);
        let wide_id = wide.id();
        let page = a4().with_element(wide);
        // Touching the element is enough for click targeting
        let edge = Point::new(592.0, 15.0);
        assert_eq!(
            element_at_point(&page, &edge, &LayerVisibility::default()),
            Some(wide_id)
        );
    }
}
