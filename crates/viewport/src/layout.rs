//! Layout strategy.
//!
//! Decides which pages are mounted for the active [`LayoutMode`] and where they
//! sit in content space. Every mode is a pure function of the document, the
//! current page and the zoom; none of them touch element data.
//!
//! The same [`Arrangement`] feeds the page renderer and, through
//! [`Arrangement::page_layout`], hit-testing, so the two always agree on where
//! a page is.

use pdf_editor_core::{
    compute_viewport, Document, LayoutMode, Page, PageId, PageLayout, PageSlot, Point, Rect,
    ViewportCache, ViewportConfig, ViewportTransform,
};

/// A page mounted at a position in content space.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPage {
    pub page_id: PageId,
    pub page_index: usize,
    /// Top-left corner in content pixels.
    pub origin: Point,
    /// Transform at the effective scale for this slot.
    pub viewport: ViewportTransform,
    /// Multiplier relative to the live zoom (thumbnails ignore zoom entirely).
    pub scale_multiplier: f32,
    /// 1-based page number label (thumbnail mode).
    pub label: Option<String>,
}

impl PlacedPage {
    /// Box in content pixels.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.viewport.width,
            self.viewport.height,
        )
    }

    /// Page units to pixels for this slot.
    pub fn scale(&self) -> f32 {
        self.viewport.scale
    }
}

/// One position in the arrangement; `Empty` renders nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Page(PlacedPage),
    Empty,
}

impl Slot {
    pub fn page(&self) -> Option<&PlacedPage> {
        match self {
            Slot::Page(placed) => Some(placed),
            Slot::Empty => None,
        }
    }
}

/// Render tree skeleton for one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    pub mode: LayoutMode,
    pub slots: Vec<Slot>,
}

impl Arrangement {
    fn empty(mode: LayoutMode) -> Self {
        Self {
            mode,
            slots: Vec::new(),
        }
    }

    /// Mounted pages in slot order.
    pub fn placed_pages(&self) -> impl Iterator<Item = &PlacedPage> {
        self.slots.iter().filter_map(Slot::page)
    }

    /// Slot of a mounted page.
    pub fn placed(&self, page_id: PageId) -> Option<&PlacedPage> {
        self.placed_pages().find(|placed| placed.page_id == page_id)
    }

    /// Page boxes for hit-testing, in the same content space the renderer uses.
    pub fn page_layout(&self) -> PageLayout {
        PageLayout::new(
            self.placed_pages()
                .map(|placed| PageSlot {
                    page_id: placed.page_id,
                    page_index: placed.page_index,
                    origin: placed.origin,
                    width: placed.viewport.width,
                    height: placed.viewport.height,
                })
                .collect(),
        )
    }

    /// Thumbnail under a content-space point.
    pub fn thumbnail_at(&self, content: Point) -> Option<PageId> {
        if self.mode != LayoutMode::Thumbnail {
            return None;
        }
        self.placed_pages()
            .find(|placed| placed.bounds().contains_point(&content))
            .map(|placed| placed.page_id)
    }

    /// Scrollable content size in pixels.
    pub fn extent(&self) -> (f32, f32) {
        self.placed_pages().fold((0.0_f32, 0.0_f32), |(w, h), placed| {
            let bounds = placed.bounds();
            (w.max(bounds.max_x()), h.max(bounds.max_y()))
        })
    }
}

/// Inputs for one arrangement pass.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub document: &'a Document,
    pub current_page_id: Option<PageId>,
    pub current_page_index: usize,
    pub zoom: f32,
    /// Cached transforms for `zoom`; computed on the fly when absent or stale.
    pub cache: Option<&'a ViewportCache>,
}

impl<'a> LayoutInput<'a> {
    /// Inputs without a transform cache.
    pub fn new(
        document: &'a Document,
        current_page_id: Option<PageId>,
        current_page_index: usize,
        zoom: f32,
    ) -> Self {
        Self {
            document,
            current_page_id,
            current_page_index,
            zoom,
            cache: None,
        }
    }

    /// Builder-style transform cache.
    pub fn with_cache(mut self, cache: &'a ViewportCache) -> Self {
        self.cache = Some(cache);
        self
    }

    fn transform(&self, page: &Page) -> ViewportTransform {
        self.cache
            .filter(|cache| cache.zoom() == self.zoom)
            .and_then(|cache| cache.get(page.id).copied())
            .unwrap_or_else(|| compute_viewport(page, self.zoom))
    }

    fn placed(&self, page_index: usize, page: &Page, origin: Point) -> PlacedPage {
        PlacedPage {
            page_id: page.id,
            page_index,
            origin,
            viewport: self.transform(page),
            scale_multiplier: 1.0,
            label: None,
        }
    }
}

/// Arrange pages for `mode`.
pub fn arrange(mode: LayoutMode, input: &LayoutInput<'_>, config: &ViewportConfig) -> Arrangement {
    match mode {
        LayoutMode::Single => single(input),
        LayoutMode::Continuous => continuous(input, config.page_gap_px),
        LayoutMode::TwoPage => two_page(input, config.page_gap_px),
        LayoutMode::Thumbnail => thumbnails(input, config),
    }
}

fn single(input: &LayoutInput<'_>) -> Arrangement {
    let Some(page_id) = input.current_page_id else {
        return Arrangement::empty(LayoutMode::Single);
    };

    let slots = input
        .document
        .pages
        .iter()
        .enumerate()
        .find(|(_, page)| page.id == page_id)
        .map(|(index, page)| input.placed(index, page, Point::ZERO))
        .map(Slot::Page)
        .into_iter()
        .collect();

    Arrangement {
        mode: LayoutMode::Single,
        slots,
    }
}

fn continuous(input: &LayoutInput<'_>, gap: f32) -> Arrangement {
    let mut slots = Vec::with_capacity(input.document.pages.len());
    let mut y_offset = 0.0;

    for (index, page) in input.document.pages.iter().enumerate() {
        let placed = input.placed(index, page, Point::new(0.0, y_offset));
        y_offset += placed.viewport.height + gap;
        slots.push(Slot::Page(placed));
    }

    Arrangement {
        mode: LayoutMode::Continuous,
        slots,
    }
}

fn two_page(input: &LayoutInput<'_>, gap: f32) -> Arrangement {
    let index = input.current_page_index;

    let Some(leading) = input.document.page_at(index) else {
        return Arrangement {
            mode: LayoutMode::TwoPage,
            slots: vec![Slot::Empty, Slot::Empty],
        };
    };
    let left = input.placed(index, leading, Point::ZERO);

    let right = match input.document.page_at(index + 1) {
        Some(trailing) => {
            let origin = Point::new(left.viewport.width + gap, 0.0);
            Slot::Page(input.placed(index + 1, trailing, origin))
        }
        None => Slot::Empty,
    };

    Arrangement {
        mode: LayoutMode::TwoPage,
        slots: vec![Slot::Page(left), right],
    }
}

/// Fixed-column grid at a zoom-independent scale.
///
/// Every cell is as large as the largest thumbnail plus room for its label.
fn thumbnails(input: &LayoutInput<'_>, config: &ViewportConfig) -> Arrangement {
    let pages = &input.document.pages;
    if pages.is_empty() {
        return Arrangement::empty(LayoutMode::Thumbnail);
    }

    let scale = config.thumbnail_scale;
    let columns = config.thumbnail_columns.max(1);
    let gap = config.page_gap_px;
    let transforms: Vec<ViewportTransform> = pages
        .iter()
        .map(|page| compute_viewport(page, scale))
        .collect();
    let scale_multiplier = if input.zoom > 0.0 {
        scale / input.zoom
    } else {
        scale
    };

    let cell_width = transforms
        .iter()
        .map(|t| t.width)
        .fold(0.0_f32, f32::max);
    let tallest = transforms
        .iter()
        .map(|t| t.height)
        .fold(0.0_f32, f32::max);
    let cell_height = tallest + THUMBNAIL_LABEL_HEIGHT;

    let slots = pages
        .iter()
        .zip(transforms)
        .enumerate()
        .map(|(index, (page, viewport))| {
            let column = index % columns;
            let row = index / columns;
            // Centre narrower pages horizontally in their cell
            let inset = (cell_width - viewport.width) / 2.0;
            let origin = Point::new(
                column as f32 * (cell_width + gap) + inset,
                row as f32 * (cell_height + gap),
            );

            Slot::Page(PlacedPage {
                page_id: page.id,
                page_index: index,
                origin,
                viewport,
                scale_multiplier,
                label: Some((index + 1).to_string()),
            })
        })
        .collect();

    Arrangement {
        mode: LayoutMode::Thumbnail,
        slots,
    }
}

/// Height kept free below each thumbnail for its page-number label.
pub const THUMBNAIL_LABEL_HEIGHT: f32 = 18.0;
