use pdf_editor_core::{
    apply_command, elements_in_region, page_to_screen, screen_to_page, Document, DocumentError,
    EditorCommand, EditorView, LayerVisibility, PageId, PageLayout, Point, Rect, Rotation,
    ViewportCache, ViewportConfig,
};
use std::sync::Arc;

const SNAPSHOT: &str = r#"{
    "pages": [
        {
            "id": 10, "width": 595, "height": 842,
            "elements": [
                {
                    "id": "0b7d1f40-8c53-4d8e-a2c1-5f4e7c9b2a11",
                    "x": 20, "y": 20, "width": 100, "height": 30,
                    "kind": {
                        "kind": "text", "content": "Total",
                        "font_family": "Inter", "font_size": 14
                    }
                },
                {
                    "id": "0b7d1f40-8c53-4d8e-a2c1-5f4e7c9b2a12",
                    "x": 20, "y": 60, "width": 200, "height": 12,
                    "kind": { "kind": "annotation", "annotation_type": "highlight" }
                }
            ]
        },
        { "id": 11, "width": 842, "height": 595, "rotation": 270 }
    ]
}"#;

#[test]
fn snapshot_round_trips_through_geometry() {
    let document = Document::from_json_str(SNAPSHOT).expect("snapshot parses");
    assert_eq!(document.page_count(), 2);
    assert_eq!(document.pages[1].rotation, Rotation::Deg270);

    let layout = PageLayout::stacked(&document, 1.5, 16.0);
    let scroll = Point::new(0.0, 300.0);
    let page_point = Point::new(400.0, 100.0);

    let screen = page_to_screen(PageId(11), page_point, scroll, &layout, 1.5)
        .expect("page is laid out");
    let hit = screen_to_page(screen, scroll, &layout, 1.5)
        .expect("point lands on the page");
    assert_eq!(hit.page_id, PageId(11));
    assert!((hit.page_x - page_point.x).abs() < 1e-3);
    assert!((hit.page_y - page_point.y).abs() < 1e-3);
}

#[test]
fn annotation_flag_gates_region_selection() {
    let document = Document::from_json_str(SNAPSHOT).expect("snapshot parses");
    let page = &document.pages[0];
    let region = Rect::new(0.0, 0.0, 300.0, 100.0);

    let all = elements_in_region(page, &region, &LayerVisibility::default());
    assert_eq!(all.len(), 2);

    let hidden = LayerVisibility {
        annotation: false,
        ..LayerVisibility::default()
    };
    let ids = elements_in_region(page, &region, &hidden);
    assert_eq!(ids, vec![page.elements[0].id()]);
}

#[test]
fn duplicate_page_ids_are_rejected() {
    let json = r#"{ "pages": [
        { "id": 1, "width": 10, "height": 10 },
        { "id": 1, "width": 10, "height": 10 }
    ] }"#;
    assert!(matches!(
        Document::from_json_str(json),
        Err(DocumentError::DuplicatePageId(PageId(1)))
    ));
}

#[test]
fn reducer_edits_invalidate_viewport_cache() {
    let document = Document::from_json_str(SNAPSHOT).expect("snapshot parses");
    let mut view = EditorView::new(Arc::new(document));
    let config = ViewportConfig::default();
    let mut cache = ViewportCache::new();

    assert!(cache.ensure(&view.document, view.zoom));
    assert!(!cache.ensure(&view.document, view.zoom));

    let id = view.document.pages[0].elements[0].id();
    let nudge = EditorCommand::MoveElements {
        ids: vec![id],
        dx: 5.0,
        dy: -5.0,
    };
    apply_command(&mut view, nudge, &config);
    assert!(
        cache.ensure(&view.document, view.zoom),
        "edited document is a new reference"
    );

    let moved = &view.document.pages[0].elements[0].base;
    assert_eq!((moved.x, moved.y), (25.0, 15.0));

    apply_command(&mut view, EditorCommand::SetZoom(10.0), &config);
    assert_eq!(view.zoom, config.max_zoom);
    assert!(cache.ensure(&view.document, view.zoom));
    assert_eq!(
        cache.get(PageId(11)).map(|t| (t.width, t.height)),
        Some((595.0 * 4.0, 842.0 * 4.0))
    );
}
