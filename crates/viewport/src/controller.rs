//! Interaction controller.
//!
//! Pointer and keyboard state machine. Exactly one [`InteractionState`] is
//! active at a time and each state carries only the data it needs to resume or
//! finish. Committed results leave the controller as [`EditorCommand`]s; the
//! controller never writes editor state itself.
//!
//! ```text
//!  idle ──middle / shift+left──▶ panning ──up──▶ idle
//!  idle ──left on page──────────▶ rubber-band ──up──▶ idle (selection replaced)
//!  idle ──left on element───────▶ dragging ──up──▶ idle (move requested)
//!  idle ──double-click text─────▶ text-editing ──enter/blur/escape──▶ idle
//!  idle ──right-click───────────▶ context-menu ──any click──▶ idle
//! ```

use crate::input::{InputEvent, Key, KeyEvent, PointerButton, PointerEvent, WheelEvent};
use crate::layout::Arrangement;
use crate::overlay::snap_to_grid;
use crate::page_renderer::DragPreview;
use crate::throttle::PointerThrottle;
use pdf_editor_core::{
    element_at_point, elements_in_region, screen_to_page, CommandSink, EditorCommand, EditorView,
    ElementId, ElementKind, LayoutMode, PageHit, PageId, Point, Rect, ViewportConfig,
};

/// Viewport pan driven by the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PanSession {
    /// Screen position where the pan started.
    pub origin: Point,
    pub scroll_at_entry: Point,
}

/// Live selection rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RubberBandSession {
    /// Page the rectangle started on; only this page is hit-tested.
    pub page_id: PageId,
    /// Content-space corners (screen + scroll).
    pub start: Point,
    pub end: Point,
}

impl RubberBandSession {
    /// Normalized rectangle in content pixels.
    pub fn content_rect(&self) -> Rect {
        Rect::from_corners(self.start, self.end)
    }
}

/// Elements being moved with the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub page_id: PageId,
    pub ids: Vec<ElementId>,
    /// Page-local pointer position at press.
    pub origin: Point,
    /// Latest page-local pointer position.
    pub current: Point,
}

/// Inline edit of one text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditSession {
    pub element_id: ElementId,
    pub original: String,
    pub draft: String,
}

/// Open context menu.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenuSession {
    /// Screen position of the menu.
    pub position: Point,
    /// Element under the pointer when the menu opened.
    pub target: Option<ElementId>,
}

/// The single active interaction mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Panning(PanSession),
    RubberBand(RubberBandSession),
    Dragging(DragSession),
    TextEditing(TextEditSession),
    ContextMenu(ContextMenuSession),
}

impl InteractionState {
    /// Short name used in transition logs.
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Panning(_) => "panning",
            InteractionState::RubberBand(_) => "rubber-band",
            InteractionState::Dragging(_) => "dragging",
            InteractionState::TextEditing(_) => "text-editing",
            InteractionState::ContextMenu(_) => "context-menu",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

/// What changed while handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// The event was consumed.
    pub handled: bool,
    /// Scroll offset moved.
    pub scrolled: bool,
    /// Rulers should be redrawn for the latest pointer position.
    pub rulers_dirty: bool,
    /// The live selection rectangle changed.
    pub selection_rect_dirty: bool,
    /// Hovered element changed.
    pub hover_changed: bool,
}

impl EventOutcome {
    fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }
}

/// Everything the controller reads for one event.
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    pub view: &'a EditorView,
    pub arrangement: &'a Arrangement,
    pub config: &'a ViewportConfig,
}

impl EventContext<'_> {
    fn page_hit(&self, screen: Point, scroll: Point) -> Option<PageHit> {
        let layout = self.arrangement.page_layout();
        screen_to_page(screen, scroll, &layout, self.view.zoom)
    }

    fn element_at(&self, hit: &PageHit) -> Option<ElementId> {
        let page = self.view.document.page(hit.page_id)?;
        element_at_point(page, &hit.point(), &self.view.layers)
    }

    fn element_under(&self, screen: Point, scroll: Point) -> Option<ElementId> {
        self.page_hit(screen, scroll)
            .and_then(|hit| self.element_at(&hit))
    }
}

/// Pointer/keyboard state machine plus the transient state it owns.
#[derive(Debug)]
pub struct InteractionController {
    state: InteractionState,
    throttle: PointerThrottle,
    scroll: Point,
    /// Latest pointer position, every event.
    pointer: Option<Point>,
    /// Pointer position the overlays last caught up with.
    ruler_pointer: Option<Point>,
    hovered: Option<ElementId>,
}

impl InteractionController {
    /// Idle controller rate-limited by `config`.
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            throttle: PointerThrottle::new(config.pointer_throttle()),
            scroll: Point::ZERO,
            pointer: None,
            ruler_pointer: None,
            hovered: None,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn scroll(&self) -> Point {
        self.scroll
    }

    /// Move the scroll offset; offsets never go negative.
    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = Point::new(scroll.x.max(0.0), scroll.y.max(0.0));
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Pointer position as of the last processed (non-coalesced) move.
    pub fn ruler_pointer(&self) -> Option<Point> {
        self.ruler_pointer
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    /// Live rubber-band rectangle in screen pixels.
    pub fn selection_rect(&self) -> Option<Rect> {
        match &self.state {
            InteractionState::RubberBand(session) => Some(
                session
                    .content_rect()
                    .translated(-self.scroll.x, -self.scroll.y),
            ),
            _ => None,
        }
    }

    /// Element being edited and its draft.
    pub fn editing(&self) -> Option<(ElementId, &str)> {
        match &self.state {
            InteractionState::TextEditing(session) => {
                Some((session.element_id, session.draft.as_str()))
            }
            _ => None,
        }
    }

    /// Text to display for a run: the draft while it is being edited.
    pub fn displayed_text<'a>(&'a self, id: ElementId, view: &'a EditorView) -> Option<&'a str> {
        if let Some((editing_id, draft)) = self.editing() {
            if editing_id == id {
                return Some(draft);
            }
        }
        let element = view.document.page_of_element(id)?.element(id)?;
        match &element.kind {
            ElementKind::Text(run) => Some(run.content.as_str()),
            _ => None,
        }
    }

    /// Page-unit offset of an in-progress drag.
    pub fn drag_offset(&self, snap: Option<f32>) -> Option<(f32, f32)> {
        match &self.state {
            InteractionState::Dragging(session) => Some(drag_delta(session, snap)),
            _ => None,
        }
    }

    /// Dragged ids and their offset, for drawing elements where they will land.
    pub fn drag_preview(&self, snap: Option<f32>) -> Option<DragPreview<'_>> {
        match &self.state {
            InteractionState::Dragging(session) => {
                let (dx, dy) = drag_delta(session, snap);
                Some(DragPreview {
                    ids: &session.ids,
                    dx,
                    dy,
                })
            }
            _ => None,
        }
    }

    /// Drop every transient session, e.g. when the document is replaced.
    pub fn reset(&mut self) {
        self.transition(InteractionState::Idle);
        self.hovered = None;
        self.throttle.reset();
    }

    /// Feed one event through the state machine.
    ///
    /// Pointer moves pass the rate limiter first; the rest are always due.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        context: &EventContext<'_>,
        sink: &mut dyn CommandSink,
    ) -> EventOutcome {
        let due = match event.timestamp() {
            Some(timestamp) if event.is_throttleable() => self.throttle.should_process(timestamp),
            _ => true,
        };

        match event {
            InputEvent::PointerDown(pointer) => self.on_pointer_down(pointer, context, sink),
            InputEvent::PointerMove(pointer) => self.on_pointer_move(pointer, due, context),
            InputEvent::PointerUp(pointer) => self.on_pointer_up(pointer, context, sink),
            InputEvent::DoubleClick(pointer) => self.on_double_click(pointer, context),
            InputEvent::Wheel(wheel) => self.on_wheel(wheel, context, sink),
            InputEvent::Key(key) => self.on_key(key, context, sink),
            InputEvent::Blur => self.on_blur(sink),
        }
    }

    fn transition(&mut self, next: InteractionState) {
        if std::mem::discriminant(&self.state) != std::mem::discriminant(&next) {
            log::debug!("interaction: {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
    }

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        context: &EventContext<'_>,
        sink: &mut dyn CommandSink,
    ) -> EventOutcome {
        self.pointer = Some(event.position);

        match &self.state {
            InteractionState::ContextMenu(_) => {
                // Menu items are host chrome; any click reaching the viewport is outside
                self.transition(InteractionState::Idle);
                return EventOutcome::handled();
            }
            InteractionState::TextEditing(_) => {
                self.commit_text(sink);
                return EventOutcome::handled();
            }
            InteractionState::Idle => {}
            // A press while another gesture is live (lost pointer-up) restarts from idle
            _ => self.transition(InteractionState::Idle),
        }

        if context.view.layout_mode == LayoutMode::Thumbnail {
            if event.button == PointerButton::Primary {
                let content = event.position.offset(self.scroll.x, self.scroll.y);
                if let Some(page_id) = context.arrangement.thumbnail_at(content) {
                    sink.dispatch(EditorCommand::NavigateToPage(page_id));
                    return EventOutcome::handled();
                }
            }
            return EventOutcome::default();
        }

        match event.button {
            PointerButton::Middle => self.start_pan(event.position),
            PointerButton::Primary if event.modifiers.shift => self.start_pan(event.position),
            PointerButton::Secondary => {
                let target = context.element_under(event.position, self.scroll);
                self.transition(InteractionState::ContextMenu(ContextMenuSession {
                    position: event.position,
                    target,
                }));
                EventOutcome::handled()
            }
            PointerButton::Primary => self.on_primary_press(event, context, sink),
        }
    }

    fn start_pan(&mut self, origin: Point) -> EventOutcome {
        self.transition(InteractionState::Panning(PanSession {
            origin,
            scroll_at_entry: self.scroll,
        }));
        EventOutcome::handled()
    }

    fn on_primary_press(
        &mut self,
        event: &PointerEvent,
        context: &EventContext<'_>,
        sink: &mut dyn CommandSink,
    ) -> EventOutcome {
        if !context.view.tool.is_select() {
            return EventOutcome::default();
        }
        let Some(hit) = context.page_hit(event.position, self.scroll) else {
            return EventOutcome::default();
        };

        let target = context
            .element_at(&hit)
            .and_then(|id| context.view.document.page(hit.page_id)?.element(id))
            .map(|element| (element.id(), element.base.locked));

        match target {
            Some((id, locked)) => {
                let already_selected = context.view.selection.contains(&id);
                if !already_selected {
                    sink.dispatch(EditorCommand::SelectSingle(id));
                }
                if !locked {
                    let ids = if already_selected {
                        context.view.selection.to_vec()
                    } else {
                        vec![id]
                    };
                    self.transition(InteractionState::Dragging(DragSession {
                        page_id: hit.page_id,
                        ids,
                        origin: hit.point(),
                        current: hit.point(),
                    }));
                }
            }
            None => {
                let start = event.position.offset(self.scroll.x, self.scroll.y);
                self.transition(InteractionState::RubberBand(RubberBandSession {
                    page_id: hit.page_id,
                    start,
                    end: start,
                }));
                self.throttle.reset();
            }
        }

        EventOutcome {
            handled: true,
            selection_rect_dirty: true,
            ..EventOutcome::default()
        }
    }

    fn on_pointer_move(
        &mut self,
        event: &PointerEvent,
        due: bool,
        context: &EventContext<'_>,
    ) -> EventOutcome {
        self.pointer = Some(event.position);
        let mut outcome = EventOutcome::default();

        // Panning and hover use every event
        if let InteractionState::Panning(session) = &self.state {
            let delta_x = event.position.x - session.origin.x;
            let delta_y = event.position.y - session.origin.y;
            let target = Point::new(
                session.scroll_at_entry.x - delta_x,
                session.scroll_at_entry.y - delta_y,
            );
            let before = self.scroll;
            self.set_scroll(target);
            outcome.handled = true;
            outcome.scrolled = self.scroll != before;
        }

        if context.view.layout_mode != LayoutMode::Thumbnail {
            let hovered = context.element_under(event.position, self.scroll);
            if hovered != self.hovered {
                self.hovered = hovered;
                outcome.hover_changed = true;
            }
        }

        // Derived work only at the limiter's cadence
        if !due {
            return outcome;
        }

        self.ruler_pointer = Some(event.position);
        outcome.rulers_dirty = true;

        let scroll = self.scroll;
        match &mut self.state {
            InteractionState::RubberBand(session) => {
                session.end = event.position.offset(scroll.x, scroll.y);
                outcome.handled = true;
                outcome.selection_rect_dirty = true;
            }
            InteractionState::Dragging(session) => {
                session.current = drag_point(session, event.position, scroll, context);
                outcome.handled = true;
            }
            _ => {}
        }

        outcome
    }

    fn on_pointer_up(
        &mut self,
        event: &PointerEvent,
        context: &EventContext<'_>,
        sink: &mut dyn CommandSink,
    ) -> EventOutcome {
        self.pointer = Some(event.position);
        let scroll = self.scroll;

        match std::mem::take(&mut self.state) {
            InteractionState::Panning(_) => {
                log::debug!("interaction: panning -> idle");
                EventOutcome::handled()
            }
            InteractionState::RubberBand(mut session) => {
                log::debug!("interaction: rubber-band -> idle");
                // Always finish on the release position, even if the last move was coalesced
                session.end = event.position.offset(scroll.x, scroll.y);
                self.finish_rubber_band(&session, context, sink);
                EventOutcome {
                    handled: true,
                    selection_rect_dirty: true,
                    ..EventOutcome::default()
                }
            }
            InteractionState::Dragging(mut session) => {
                log::debug!("interaction: dragging -> idle");
                session.current = drag_point(&session, event.position, scroll, context);
                let snap = context
                    .view
                    .flags
                    .snap
                    .then_some(context.config.base_grid_size);
                let (dx, dy) = drag_delta(&session, snap);
                if dx != 0.0 || dy != 0.0 {
                    sink.dispatch(EditorCommand::MoveElements {
                        ids: session.ids,
                        dx,
                        dy,
                    });
                }
                EventOutcome::handled()
            }
            other => {
                self.state = other;
                EventOutcome::default()
            }
        }
    }

    fn finish_rubber_band(
        &self,
        session: &RubberBandSession,
        context: &EventContext<'_>,
        sink: &mut dyn CommandSink,
    ) {
        let zoom = context.view.zoom;
        let layout = context.arrangement.page_layout();
        let page = context.view.document.page(session.page_id);
        let (Some(slot), Some(page)) = (layout.slot(session.page_id), page) else {
            return;
        };
        if zoom <= 0.0 {
            return;
        }

        let to_page = |content: Point| {
            Point::new(
                (content.x - slot.origin.x) / zoom,
                (content.y - slot.origin.y) / zoom,
            )
        };
        let region = Rect::from_corners(to_page(session.start), to_page(session.end));
        let ids = elements_in_region(page, &region, &context.view.layers);

        log::debug!(
            "rubber-band selected {} elements on {}",
            ids.len(),
            session.page_id
        );
        if ids.is_empty() {
            sink.dispatch(EditorCommand::ClearSelection);
        } else {
            sink.dispatch(EditorCommand::ReplaceSelection(ids));
        }
    }

    fn on_double_click(
        &mut self,
        event: &PointerEvent,
        context: &EventContext<'_>,
    ) -> EventOutcome {
        self.pointer = Some(event.position);
        let view = context.view;
        if !view.interaction_enabled || view.layout_mode == LayoutMode::Thumbnail {
            return EventOutcome::default();
        }

        let Some(hit) = context.page_hit(event.position, self.scroll) else {
            return EventOutcome::default();
        };
        let Some(element) = context
            .element_at(&hit)
            .and_then(|id| view.document.page(hit.page_id)?.element(id))
        else {
            return EventOutcome::default();
        };

        match &element.kind {
            ElementKind::Text(run) if !element.base.locked => {
                self.transition(InteractionState::TextEditing(TextEditSession {
                    element_id: element.id(),
                    original: run.content.clone(),
                    draft: run.content.clone(),
                }));
                EventOutcome::handled()
            }
            _ => EventOutcome::default(),
        }
    }

    fn on_wheel(
        &mut self,
        event: &WheelEvent,
        context: &EventContext<'_>,
        sink: &mut dyn CommandSink,
    ) -> EventOutcome {
        self.pointer = Some(event.position);

        if event.modifiers.command() {
            let config = context.config;
            let zoom = context.view.zoom;
            let next = if event.delta_y < 0.0 {
                config.clamp_zoom(zoom * config.zoom_step)
            } else if event.delta_y > 0.0 {
                config.clamp_zoom(zoom / config.zoom_step)
            } else {
                return EventOutcome::default();
            };
            if next != zoom {
                sink.dispatch(EditorCommand::SetZoom(next));
            }
            return EventOutcome::handled();
        }

        let before = self.scroll;
        self.set_scroll(Point::new(
            before.x + event.delta_x,
            before.y + event.delta_y,
        ));
        let scroll = self.scroll;
        let mut outcome = EventOutcome {
            handled: true,
            scrolled: scroll != before,
            ..EventOutcome::default()
        };

        // Live gestures keep tracking the pointer over the scrolled content
        match &mut self.state {
            InteractionState::RubberBand(session) => {
                session.end = event.position.offset(scroll.x, scroll.y);
                outcome.selection_rect_dirty = true;
            }
            InteractionState::Dragging(session) => {
                session.current = drag_point(session, event.position, scroll, context);
            }
            _ => {}
        }
        outcome
    }

    fn on_key(
        &mut self,
        event: &KeyEvent,
        context: &EventContext<'_>,
        sink: &mut dyn CommandSink,
    ) -> EventOutcome {
        if let InteractionState::TextEditing(session) = &mut self.state {
            match event.key {
                Key::Enter => self.commit_text(sink),
                Key::Escape => {
                    log::debug!("inline edit of {} discarded", session.element_id);
                    self.transition(InteractionState::Idle);
                    sink.dispatch(EditorCommand::ClearSelection);
                }
                Key::Backspace => {
                    session.draft.pop();
                }
                Key::Char(ch) if !event.is_chord() => session.draft.push(ch),
                _ => {}
            }
            // Typing never triggers shortcuts
            return EventOutcome::handled();
        }

        let view = context.view;
        let config = context.config;
        let zoom = view.zoom;

        match event.key {
            Key::Escape => {
                self.transition(InteractionState::Idle);
                sink.dispatch(EditorCommand::ClearSelection);
                EventOutcome {
                    handled: true,
                    selection_rect_dirty: true,
                    ..EventOutcome::default()
                }
            }
            Key::Delete | Key::Backspace => {
                if view.selection.is_empty() {
                    return EventOutcome::default();
                }
                sink.dispatch(EditorCommand::DeleteRequested(view.selection.to_vec()));
                EventOutcome::handled()
            }
            Key::Char('+') | Key::Char('=') => {
                self.request_zoom(config.clamp_zoom(zoom * config.zoom_step), zoom, sink)
            }
            Key::Char('-') => {
                self.request_zoom(config.clamp_zoom(zoom / config.zoom_step), zoom, sink)
            }
            Key::Char('0') => {
                self.request_zoom(config.clamp_zoom(config.default_zoom), zoom, sink)
            }
            Key::PageUp | Key::ArrowLeft => self.navigate_by(view, -1, sink),
            Key::PageDown | Key::ArrowRight => self.navigate_by(view, 1, sink),
            Key::Home => self.navigate_to_index(view, 0, sink),
            Key::End => {
                let last = view.document.page_count().saturating_sub(1);
                self.navigate_to_index(view, last, sink)
            }
            _ => EventOutcome::default(),
        }
    }

    fn on_blur(&mut self, sink: &mut dyn CommandSink) -> EventOutcome {
        if matches!(self.state, InteractionState::TextEditing(_)) {
            self.commit_text(sink);
            return EventOutcome::handled();
        }
        EventOutcome::default()
    }

    fn commit_text(&mut self, sink: &mut dyn CommandSink) {
        if let InteractionState::TextEditing(session) = std::mem::take(&mut self.state) {
            log::debug!(
                "interaction: text-editing -> idle (commit {})",
                session.element_id
            );
            if session.draft != session.original {
                sink.dispatch(EditorCommand::CommitText {
                    id: session.element_id,
                    content: session.draft,
                });
            }
        }
    }

    fn request_zoom(&self, next: f32, current: f32, sink: &mut dyn CommandSink) -> EventOutcome {
        if next != current {
            sink.dispatch(EditorCommand::SetZoom(next));
        }
        EventOutcome::handled()
    }

    /// Previous/next page; stepping past either end does nothing.
    fn navigate_by(
        &self,
        view: &EditorView,
        step: isize,
        sink: &mut dyn CommandSink,
    ) -> EventOutcome {
        let Some(target) = view.current_page_index.checked_add_signed(step) else {
            return EventOutcome::default();
        };
        self.navigate_to_index(view, target, sink)
    }

    fn navigate_to_index(
        &self,
        view: &EditorView,
        index: usize,
        sink: &mut dyn CommandSink,
    ) -> EventOutcome {
        match view.document.page_at(index) {
            Some(page) if index != view.current_page_index => {
                sink.dispatch(EditorCommand::NavigateToPage(page.id));
                EventOutcome::handled()
            }
            _ => EventOutcome::default(),
        }
    }
}

/// Pointer position in the drag's own page space, even outside the page.
fn drag_point(
    session: &DragSession,
    screen: Point,
    scroll: Point,
    context: &EventContext<'_>,
) -> Point {
    let zoom = context.view.zoom;
    let layout = context.arrangement.page_layout();
    match layout.slot(session.page_id) {
        Some(slot) if zoom > 0.0 => Point::new(
            (screen.x + scroll.x - slot.origin.x) / zoom,
            (screen.y + scroll.y - slot.origin.y) / zoom,
        ),
        _ => session.current,
    }
}

fn drag_delta(session: &DragSession, snap: Option<f32>) -> (f32, f32) {
    let delta = Point::new(
        session.current.x - session.origin.x,
        session.current.y - session.origin.y,
    );
    let delta = match snap {
        Some(grid) => snap_to_grid(delta, grid),
        None => delta,
    };
    (delta.x, delta.y)
}
