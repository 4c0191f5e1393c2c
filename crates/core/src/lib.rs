//! PDF Editor Core Library.
//!
//! Document model, geometry engine, hit-testing and the editor-state boundary
//! used by the viewport.

pub mod config;
pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod geometry;
pub mod hit_test;
pub mod selection;

pub use config::ViewportConfig;
pub use document::{Document, DocumentMetadata, DocumentSource, Page, PageId, Rotation};
pub use editor::{
    apply_command, CommandSink, EditorCommand, EditorView, Guide, GuideOrientation, LayoutMode,
    OverlayFlags, ToolCategory, ToolDescriptor,
};
pub use element::{
    AnnotationElement, AnnotationType, Color, Drawing, Element, ElementBase, ElementId,
    ElementKind, FormFieldElement, FormFieldType, ImageElement, ImageFilters, Layer, LineDash,
    ShapeKind, StrokeStyle, TextRun,
};
pub use error::{ConfigError, DocumentError, DocumentResult};
pub use geometry::{
    compute_viewport, page_to_screen, screen_to_page, PageHit, PageLayout, PageSlot, Point, Rect,
    ViewportCache, ViewportTransform,
};
pub use hit_test::{element_at_point, element_bounds, elements_in_region, LayerVisibility};
pub use selection::SelectionSet;
