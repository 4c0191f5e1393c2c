//! Geometry engine.
//!
//! Pure conversions between page-intrinsic size, rotation and zoom and the
//! rectangles the viewport places on screen. Three coordinate spaces are in play:
//!
//! - screen: pixels relative to the top-left of the visible viewport
//! - content: screen plus the current scroll offset (the full scrollable column)
//! - page-local: a page's own intrinsic units, independent of zoom and scroll.

use crate::document::{Document, Page, PageId, Rotation};
use std::collections::HashMap;
use std::sync::Arc;

/// A point in any of the viewport's coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Point shifted by a delta.
    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Point with both coordinates multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

/// Axis-aligned rectangle stored as origin + size.
///
/// Width and height are never negative; use [`Rect::from_corners`] to build one
/// from a drag in any direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle; negative sizes collapse to zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Normalized rectangle spanned by two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self {
            x: min_x,
            y: min_y,
            width: a.x.max(b.x) - min_x,
            height: a.y.max(b.y) - min_y,
        }
    }

    /// Bounding rectangle of a point set; `None` when empty.
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for point in points.iter().skip(1) {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        Some(Self::from_corners(
            Point::new(min_x, min_y),
            Point::new(max_x, max_y),
        ))
    }

    /// Right edge.
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.max_x()
            && point.y >= self.y
            && point.y <= self.max_y()
    }

    /// Full enclosure: `other` lies entirely inside `self` (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_corners(
            Point::new(self.x.min(other.x), self.y.min(other.y)),
            Point::new(
                self.max_x().max(other.max_x()),
                self.max_y().max(other.max_y()),
            ),
        )
    }

    /// Rectangle with origin and size multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    /// Rectangle moved by a delta.
    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Derived on-screen placement of one page at the current zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    /// Rendered width in pixels (post-rotation).
    pub width: f32,
    /// Rendered height in pixels (post-rotation).
    pub height: f32,
    /// Page units to pixels.
    pub scale: f32,
    /// Page rotation the size was derived from.
    pub rotation: Rotation,
}

/// Compute the viewport transform for a page.
///
/// Quarter-turn rotations swap the intrinsic width and height before scaling.
pub fn compute_viewport(page: &Page, zoom: f32) -> ViewportTransform {
    let (width, height) = if page.rotation.swaps_axes() {
        (page.height, page.width)
    } else {
        (page.width, page.height)
    };

    ViewportTransform {
        width: width * zoom,
        height: height * zoom,
        scale: zoom,
        rotation: page.rotation,
    }
}

/// One page's rendered box within the scrollable content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSlot {
    pub page_id: PageId,
    pub page_index: usize,
    /// Top-left corner in content pixels.
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl PageSlot {
    /// Box in content pixels.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.width, self.height)
    }
}

/// Ordered page boxes shared by the renderer and hit-testing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    slots: Vec<PageSlot>,
}

impl PageLayout {
    /// Wrap precomputed slots.
    pub fn new(slots: Vec<PageSlot>) -> Self {
        Self { slots }
    }

    /// Vertically stacked column.
    ///
    /// Each page's top is the previous page's bottom plus `gap`.
    pub fn stacked(document: &Document, zoom: f32, gap: f32) -> Self {
        let mut slots = Vec::with_capacity(document.pages.len());
        let mut y_offset = 0.0;

        for (page_index, page) in document.pages.iter().enumerate() {
            let viewport = compute_viewport(page, zoom);
            slots.push(PageSlot {
                page_id: page.id,
                page_index,
                origin: Point::new(0.0, y_offset),
                width: viewport.width,
                height: viewport.height,
            });
            y_offset += viewport.height + gap;
        }

        Self { slots }
    }

    /// Slots in document order.
    pub fn slots(&self) -> &[PageSlot] {
        &self.slots
    }

    /// Slot for a page, if laid out.
    pub fn slot(&self, page_id: PageId) -> Option<&PageSlot> {
        self.slots.iter().find(|slot| slot.page_id == page_id)
    }

    /// Whether no page is laid out.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total content extent (width, height) in pixels.
    pub fn extent(&self) -> (f32, f32) {
        let covered = self.slots
            .iter()
            .fold(Rect::default(), |acc, slot| acc.union(&slot.bounds()));
        (covered.max_x(), covered.max_y())
    }
}

/// A screen point resolved to page-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageHit {
    pub page_id: PageId,
    pub page_x: f32,
    pub page_y: f32,
}

impl PageHit {
    /// Page-local coordinates as a point.
    pub fn point(&self) -> Point {
        Point::new(self.page_x, self.page_y)
    }
}

/// Resolve a screen point to the page under it.
///
/// Returns `None` for inter-page gaps, points outside every page, empty layouts
/// and non-positive zoom.
pub fn screen_to_page(
    screen: Point,
    scroll: Point,
    layout: &PageLayout,
    zoom: f32,
) -> Option<PageHit> {
    if zoom <= 0.0 {
        return None;
    }

    let content = Point::new(screen.x + scroll.x, screen.y + scroll.y);

    layout
        .slots()
        .iter()
        .find(|slot| slot.bounds().contains_point(&content))
        .map(|slot| PageHit {
            page_id: slot.page_id,
            page_x: (content.x - slot.origin.x) / zoom,
            page_y: (content.y - slot.origin.y) / zoom,
        })
}

/// Inverse of [`screen_to_page`] for a known page.
pub fn page_to_screen(
    page_id: PageId,
    page_point: Point,
    scroll: Point,
    layout: &PageLayout,
    zoom: f32,
) -> Option<Point> {
    let slot = layout.slot(page_id)?;
    Some(Point::new(
        slot.origin.x + page_point.x * zoom - scroll.x,
        slot.origin.y + page_point.y * zoom - scroll.y,
    ))
}

/// Per-page viewport transforms for one (document, zoom) pair.
///
/// Rebuilt wholesale when either the document reference or the zoom changes;
/// never patched incrementally.
#[derive(Debug, Default)]
pub struct ViewportCache {
    document: Option<Arc<Document>>,
    zoom: f32,
    transforms: HashMap<PageId, ViewportTransform>,
}

impl ViewportCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the cache current for `document` at `zoom`.
    ///
    /// Returns true if the cache was rebuilt.
    pub fn ensure(&mut self, document: &Arc<Document>, zoom: f32) -> bool {
        let same_document = self.document
            .as_ref()
            .is_some_and(|cached| Arc::ptr_eq(cached, document));
        if same_document && self.zoom == zoom {
            return false;
        }

        self.transforms = document
            .pages
            .iter()
            .map(|page| (page.id, compute_viewport(page, zoom)))
            .collect();
        self.document = Some(Arc::clone(document));
        self.zoom = zoom;

        log::debug!(
            "viewport cache rebuilt: {} pages at zoom {:.3}",
            self.transforms.len(),
            zoom
        );
        true
    }

    /// Cached transform for a page.
    pub fn get(&self, page_id: PageId) -> Option<&ViewportTransform> {
        self.transforms.get(&page_id)
    }

    /// Number of cached transforms.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Zoom the cache was built for.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Drop all cached transforms.
    pub fn invalidate(&mut self) {
        self.document = None;
        self.transforms.clear();
    }
}
