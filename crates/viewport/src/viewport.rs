//! Editor viewport.
//!
//! Owns everything the viewport keeps between frames: the transform cache, the
//! interaction controller, and the overlay surfaces. The editor state itself
//! lives with the host and is passed in as an [`EditorView`] on every call.

use crate::controller::{EventContext, EventOutcome, InteractionController};
use crate::input::InputEvent;
use crate::layout::{arrange, Arrangement, LayoutInput, Slot};
use crate::overlay::{GuideLine, OverlayRenderer, OverlaySurfaces, RecordingSurface, Surface};
use crate::page_renderer::{render_page, PageNode, RenderContext};
use crate::theme::Theme;
use pdf_editor_core::{
    Color, CommandSink, Document, DocumentResult, DocumentSource, EditorView, LayoutMode, Point,
    Rect, ViewportCache, ViewportConfig,
};

/// Whether the last document load succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DocumentStatus {
    #[default]
    Ready,
    Failed(String),
}

/// One entry of the rendered page list.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameSlot {
    Page(PageNode),
    /// Reserved position with nothing mounted (two-page spread past the end).
    Empty,
}

impl FrameSlot {
    pub fn page(&self) -> Option<&PageNode> {
        match self {
            FrameSlot::Page(node) => Some(node),
            FrameSlot::Empty => None,
        }
    }
}

/// Content of a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameBody {
    Pages(Vec<FrameSlot>),
    /// The document failed to load; nothing else is drawn.
    Error(String),
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub mode: LayoutMode,
    pub body: FrameBody,
    /// Fill behind the pages.
    pub background: Color,
    /// Scrollable content size in pixels.
    pub extent: (f32, f32),
    pub scroll: Point,
    pub guides: Vec<GuideLine>,
    /// Live rubber-band rectangle in screen pixels.
    pub selection_rect: Option<Rect>,
}

impl Frame {
    fn error(mode: LayoutMode, message: &str, theme: &Theme) -> Self {
        Self {
            mode,
            body: FrameBody::Error(message.to_string()),
            background: theme.colors.canvas_background,
            extent: (0.0, 0.0),
            scroll: Point::ZERO,
            guides: Vec::new(),
            selection_rect: None,
        }
    }

    /// Mounted pages, skipping empty slots.
    pub fn pages(&self) -> impl Iterator<Item = &PageNode> {
        let slots: &[FrameSlot] = match &self.body {
            FrameBody::Pages(slots) => slots,
            FrameBody::Error(_) => &[],
        };
        slots.iter().filter_map(FrameSlot::page)
    }

    /// Load failure shown instead of pages.
    pub fn error_message(&self) -> Option<&str> {
        match &self.body {
            FrameBody::Error(message) => Some(message.as_str()),
            FrameBody::Pages(_) => None,
        }
    }
}

fn dimension(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Viewport state kept between frames, generic over the overlay surface type.
pub struct EditorViewport<S: Surface = RecordingSurface> {
    config: ViewportConfig,
    theme: Theme,
    cache: ViewportCache,
    controller: InteractionController,
    overlays: OverlayRenderer<S>,
    status: DocumentStatus,
    /// Visible viewport size in pixels.
    size: (f32, f32),
    last_mode: Option<LayoutMode>,
    /// (visible, zoom) the rulers were last drawn for.
    rulers_drawn: Option<(bool, f32)>,
}

impl EditorViewport<RecordingSurface> {
    /// Viewport drawing its overlays into recording surfaces.
    pub fn new(config: ViewportConfig, theme: Theme) -> Self {
        Self::with_surfaces(config, theme, OverlaySurfaces::default())
    }
}

impl<S: Surface> EditorViewport<S> {
    /// Viewport drawing its overlays into host-provided surfaces.
    pub fn with_surfaces(
        config: ViewportConfig,
        theme: Theme,
        surfaces: OverlaySurfaces<S>,
    ) -> Self {
        let overlays = OverlayRenderer::new(surfaces, &config);
        let controller = InteractionController::new(&config);
        Self {
            config,
            theme,
            cache: ViewportCache::new(),
            controller,
            overlays,
            status: DocumentStatus::Ready,
            size: (0.0, 0.0),
            last_mode: None,
            rulers_drawn: None,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Swap the theme; overlays pick it up on their next redraw.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.rulers_drawn = None;
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn overlays(&self) -> &OverlayRenderer<S> {
        &self.overlays
    }

    pub fn cache(&self) -> &ViewportCache {
        &self.cache
    }

    pub fn status(&self) -> &DocumentStatus {
        &self.status
    }

    pub fn size(&self) -> (f32, f32) {
        self.size
    }

    /// Resize the visible area.
    ///
    /// Negative, infinite and NaN dimensions collapse to zero.
    pub fn set_size(&mut self, width: f32, height: f32) {
        let size = (dimension(width), dimension(height));
        if size != self.size {
            log::debug!("viewport resized to {}x{}", size.0, size.1);
            self.size = size;
            self.rulers_drawn = None;
        }
    }

    /// Record the outcome of a document load.
    ///
    /// A failure switches every later frame to the error body until a load
    /// succeeds. Any success drops transient interaction state.
    pub fn set_document_result<T>(&mut self, result: DocumentResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                if self.status != DocumentStatus::Ready {
                    log::debug!("document loaded, leaving error state");
                }
                self.status = DocumentStatus::Ready;
                self.cache.invalidate();
                self.controller.reset();
                Some(value)
            }
            Err(err) => {
                log::warn!("document failed to load: {err}");
                self.status = DocumentStatus::Failed(err.to_string());
                self.cache.invalidate();
                self.controller.reset();
                None
            }
        }
    }

    /// Load and validate a document from `source`.
    pub fn load_from(&mut self, source: &dyn DocumentSource) -> Option<Document> {
        let result = source.load().and_then(|document| {
            document.validate()?;
            Ok(document)
        });
        self.set_document_result(result)
    }

    fn arrangement(&mut self, view: &EditorView) -> Arrangement {
        self.cache.ensure(&view.document, view.zoom);
        let input = LayoutInput::new(
            &view.document,
            view.current_page_id,
            view.current_page_index,
            view.zoom,
        )
        .with_cache(&self.cache);
        arrange(view.layout_mode, &input, &self.config)
    }

    /// Route one input event through the controller.
    ///
    /// Commands go to `sink`; overlays that depend on pointer state are redrawn
    /// here. Events are ignored while the document is in the error state.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        view: &EditorView,
        sink: &mut dyn CommandSink,
    ) -> EventOutcome {
        if self.status != DocumentStatus::Ready {
            return EventOutcome::default();
        }

        let arrangement = self.arrangement(view);
        let context = EventContext {
            view,
            arrangement: &arrangement,
            config: &self.config,
        };
        let outcome = self.controller.handle_event(event, &context, sink);

        if outcome.rulers_dirty {
            self.redraw_rulers(view);
        }
        if outcome.selection_rect_dirty {
            let rect = self.controller.selection_rect();
            self.overlays.redraw_selection(rect, self.size, &self.theme);
        }
        outcome
    }

    fn redraw_rulers(&mut self, view: &EditorView) {
        let visible = view.flags.rulers;
        let pointer = self.controller.ruler_pointer();
        self.overlays
            .redraw_rulers(visible, view.zoom, pointer, self.size, &self.theme);
        self.rulers_drawn = Some((visible, view.zoom));
    }

    /// Produce the page tree for the current view and bring overlays up to date.
    pub fn render(&mut self, view: &EditorView) -> Frame {
        if let DocumentStatus::Failed(message) = &self.status {
            return Frame::error(view.layout_mode, message, &self.theme);
        }

        if self.last_mode != Some(view.layout_mode) {
            log::debug!("layout mode {:?} -> {:?}", self.last_mode, view.layout_mode);
            self.last_mode = Some(view.layout_mode);
        }

        let arrangement = self.arrangement(view);
        let snap = view.flags.snap.then_some(self.config.base_grid_size);
        let context = RenderContext {
            selection: &view.selection,
            hovered: self.controller.hovered(),
            layers: view.layers,
            editing: self.controller.editing(),
            drag: self.controller.drag_preview(snap),
            theme: &self.theme,
        };

        let slots = arrangement
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Page(placed) => match view.document.page(placed.page_id) {
                    Some(page) => FrameSlot::Page(render_page(page, placed, &context)),
                    None => FrameSlot::Empty,
                },
                Slot::Empty => FrameSlot::Empty,
            })
            .collect();

        let size = self.size;
        if self.rulers_drawn != Some((view.flags.rulers, view.zoom)) {
            self.redraw_rulers(view);
        }
        let flags = view.flags;
        self.overlays
            .sync_grid(flags.grid, view.zoom, size, &self.theme);
        self.overlays
            .sync_guides(&view.guides, flags.guides, size, &self.theme);

        Frame {
            mode: view.layout_mode,
            body: FrameBody::Pages(slots),
            background: self.theme.colors.canvas_background,
            extent: arrangement.extent(),
            scroll: self.controller.scroll(),
            guides: self.overlays.guide_lines().to_vec(),
            selection_rect: self.controller.selection_rect(),
        }
    }
}
