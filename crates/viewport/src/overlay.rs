//! Overlay renderer.
//!
//! Non-content visual aids drawn on dedicated surfaces above the pages:
//! rulers, the snap grid, manual guides and the live rubber-band rectangle.
//! None of these take part in hit-testing.
//!
//! Surfaces are abstract ([`Surface`]); [`RecordingSurface`] keeps the issued
//! instructions so redraws can be compared and replayed by a host.

use crate::scene::Stroke;
use crate::theme::Theme;
use pdf_editor_core::{Color, Guide, GuideOrientation, Point, Rect, ViewportConfig};

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear {
        width: f32,
        height: f32,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
    },
    StrokeLine {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    FillText {
        position: Point,
        text: String,
        color: Color,
        font_size: f32,
    },
}

/// 2D drawing target (a canvas element, a texture, ...).
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);
    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke);
    fn fill_text(&mut self, position: Point, text: &str, color: Color, font_size: f32);
}

/// Surface that records every instruction it receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instructions since the last clear.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded instructions.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Whether nothing but clears has been issued.
    pub fn is_blank(&self) -> bool {
        self.ops
            .iter()
            .all(|op| matches!(op, DrawOp::Clear { .. }))
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        // Anything before a clear is no longer visible
        self.ops.clear();
        self.ops.push(DrawOp::Clear { width, height });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.ops.push(DrawOp::StrokeRect { rect, stroke });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.ops.push(DrawOp::StrokeLine { from, to, stroke });
    }

    fn fill_text(&mut self, position: Point, text: &str, color: Color, font_size: f32) {
        self.ops.push(DrawOp::FillText {
            position,
            text: text.to_string(),
            color,
            font_size,
        });
    }
}

/// Edge a ruler runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulerAxis {
    Horizontal,
    Vertical,
}

/// Drawable length along one axis; unbounded or NaN lengths draw nothing.
fn drawable(length: f32) -> f32 {
    if length.is_finite() {
        length.max(0.0)
    } else {
        0.0
    }
}

/// Ruler strip along one edge of the viewport.
///
/// A tick every `tick_px` screen pixels, a labelled tick every `label_px`, the
/// label showing the offset in page units (`offset / zoom`).
#[derive(Debug, Clone, PartialEq)]
pub struct RulerOverlay {
    pub tick_px: f32,
    pub label_px: f32,
    pub thickness: f32,
}

impl RulerOverlay {
    pub fn new(tick_px: f32, label_px: f32, thickness: f32) -> Self {
        Self {
            tick_px,
            label_px,
            thickness,
        }
    }

    /// Redraw one ruler; a pure function of its inputs.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        axis: RulerAxis,
        extent: f32,
        zoom: f32,
        pointer_offset: Option<f32>,
        theme: &Theme,
    ) {
        let colors = &theme.colors;
        let sizes = &theme.sizes;
        let extent = drawable(extent);
        let (width, height) = match axis {
            RulerAxis::Horizontal => (extent, self.thickness),
            RulerAxis::Vertical => (self.thickness, extent),
        };

        surface.clear(width, height);
        let strip = Rect::new(0.0, 0.0, width, height);
        surface.fill_rect(strip, colors.ruler_background);

        if self.tick_px > 0.0 {
            let tick_stroke = Stroke::solid(colors.ruler_tick, 1.0);
            let tick_count = (extent / self.tick_px).floor() as usize;

            for index in 0..=tick_count {
                let offset = index as f32 * self.tick_px;
                let labelled = self.is_label_offset(offset);
                let length = if labelled {
                    sizes.ruler_label_tick_length
                } else {
                    sizes.ruler_tick_length
                };

                let (from, to) = self.tick_segment(axis, offset, length);
                surface.stroke_line(from, to, tick_stroke);

                if labelled && zoom > 0.0 {
                    let label = format!("{}", (offset / zoom).round() as i64);
                    let position = match axis {
                        RulerAxis::Horizontal => Point::new(offset + 2.0, 1.0),
                        RulerAxis::Vertical => Point::new(1.0, offset + 2.0),
                    };
                    surface.fill_text(position, &label, colors.ruler_text, sizes.ruler_font_size);
                }
            }
        }

        let on_strip = |offset: &f32| (0.0..=extent).contains(offset);
        if let Some(offset) = pointer_offset.filter(on_strip) {
            let bar = sizes.ruler_indicator_width;
            let rect = match axis {
                RulerAxis::Horizontal => Rect::new(offset - bar / 2.0, 0.0, bar, self.thickness),
                RulerAxis::Vertical => Rect::new(0.0, offset - bar / 2.0, self.thickness, bar),
            };
            surface.fill_rect(rect, colors.ruler_indicator);
        }
    }

    fn is_label_offset(&self, offset: f32) -> bool {
        if self.label_px <= 0.0 {
            return false;
        }
        let ratio = offset / self.label_px;
        (ratio - ratio.round()).abs() < 1e-3
    }

    /// Ticks grow inward from the ruler's outer edge.
    fn tick_segment(&self, axis: RulerAxis, offset: f32, length: f32) -> (Point, Point) {
        let inner = self.thickness - length;
        match axis {
            RulerAxis::Horizontal => (
                Point::new(offset, self.thickness),
                Point::new(offset, inner),
            ),
            RulerAxis::Vertical => (
                Point::new(self.thickness, offset),
                Point::new(inner, offset),
            ),
        }
    }
}

/// Square lattice at `base_size * zoom` pixel spacing.
#[derive(Debug, Clone)]
pub struct GridOverlay {
    base_size: f32,
    /// Inputs of the last redraw; `None` when nothing is on the surface.
    drawn: Option<(f32, f32, f32)>,
}

impl GridOverlay {
    pub fn new(base_size: f32) -> Self {
        Self {
            base_size,
            drawn: None,
        }
    }

    /// Screen-pixel distance between lattice lines at `zoom`.
    pub fn spacing(&self, zoom: f32) -> f32 {
        self.base_size * zoom
    }

    /// Redraw if zoom, size or visibility changed; returns true if anything was drawn.
    ///
    /// While the grid is off no instructions are issued, apart from the one
    /// clear that removes a previously drawn lattice.
    pub fn sync<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        visible: bool,
        zoom: f32,
        width: f32,
        height: f32,
        theme: &Theme,
    ) -> bool {
        if !visible {
            if self.drawn.take().is_some() {
                surface.clear(width, height);
            }
            return false;
        }

        let key = (zoom, width, height);
        if self.drawn == Some(key) {
            return false;
        }

        self.draw(surface, zoom, drawable(width), drawable(height), theme);
        self.drawn = Some(key);
        true
    }

    fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        zoom: f32,
        width: f32,
        height: f32,
        theme: &Theme,
    ) {
        surface.clear(width, height);

        let spacing = self.spacing(zoom);
        if spacing <= 0.0 || !spacing.is_finite() {
            return;
        }

        let stroke = Stroke::solid(theme.colors.grid_line, 1.0);
        let columns = (width / spacing).floor() as usize;
        for index in 0..=columns {
            let x = index as f32 * spacing;
            surface.stroke_line(Point::new(x, 0.0), Point::new(x, height), stroke);
        }

        let rows = (height / spacing).floor() as usize;
        for index in 0..=rows {
            let y = index as f32 * spacing;
            surface.stroke_line(Point::new(0.0, y), Point::new(width, y), stroke);
        }
    }
}

/// Absolutely positioned line element for one guide.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideLine {
    pub orientation: GuideOrientation,
    /// Box in screen pixels.
    pub rect: Rect,
    pub color: Color,
    pub locked: bool,
}

/// Guide line elements, regenerated wholesale when the guide list changes.
#[derive(Debug, Clone, Default)]
pub struct GuideLayer {
    lines: Vec<GuideLine>,
    synced: Option<(Vec<Guide>, bool, f32, f32)>,
}

impl GuideLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[GuideLine] {
        &self.lines
    }

    /// Rebuild the line elements if guides, visibility or viewport size changed.
    ///
    /// Returns true when the elements were regenerated.
    pub fn sync(
        &mut self,
        guides: &[Guide],
        visible: bool,
        width: f32,
        height: f32,
        theme: &Theme,
    ) -> bool {
        let unchanged = self
            .synced
            .as_ref()
            .is_some_and(|(last, last_visible, last_w, last_h)| {
                last.as_slice() == guides
                    && *last_visible == visible
                    && *last_w == width
                    && *last_h == height
            });
        if unchanged {
            return false;
        }

        self.lines.clear();
        if visible {
            let thickness = theme.sizes.guide_width;
            self.lines.extend(guides.iter().map(|guide| {
                let offset = guide.offset_px;
                let rect = match guide.orientation {
                    GuideOrientation::Horizontal => Rect::new(0.0, offset, width, thickness),
                    GuideOrientation::Vertical => Rect::new(offset, 0.0, thickness, height),
                };
                GuideLine {
                    orientation: guide.orientation,
                    rect,
                    color: guide.color,
                    locked: guide.locked,
                }
            }));
        }

        log::debug!("guide layer regenerated: {} lines", self.lines.len());
        self.synced = Some((guides.to_vec(), visible, width, height));
        true
    }
}

/// Paint the live rubber-band rectangle, or leave the surface empty.
pub fn draw_selection_rect<S: Surface + ?Sized>(
    surface: &mut S,
    rect: Option<Rect>,
    width: f32,
    height: f32,
    theme: &Theme,
) {
    surface.clear(width, height);
    if let Some(rect) = rect {
        surface.fill_rect(rect, theme.colors.selection_fill);
        surface.stroke_rect(rect, Stroke::dashed(theme.colors.selection_stroke, 1.0));
    }
}

/// Nearest lattice point for a grid of `grid_size` units.
pub fn snap_to_grid(point: Point, grid_size: f32) -> Point {
    if grid_size <= 0.0 {
        return point;
    }
    let snap = |value: f32| (value / grid_size).round() * grid_size;
    Point::new(snap(point.x), snap(point.y))
}

/// The four overlay surfaces.
#[derive(Debug, Clone, Default)]
pub struct OverlaySurfaces<S> {
    pub horizontal_ruler: S,
    pub vertical_ruler: S,
    pub grid: S,
    pub selection: S,
}

/// Owns the overlay surfaces and decides when each one is redrawn.
#[derive(Debug)]
pub struct OverlayRenderer<S: Surface = RecordingSurface> {
    rulers: RulerOverlay,
    grid: GridOverlay,
    guides: GuideLayer,
    surfaces: OverlaySurfaces<S>,
    rulers_visible: bool,
}

impl<S: Surface> OverlayRenderer<S> {
    /// Renderer with ruler and grid metrics from `config`.
    pub fn new(surfaces: OverlaySurfaces<S>, config: &ViewportConfig) -> Self {
        let rulers = RulerOverlay::new(
            config.ruler_tick_px,
            config.ruler_label_px,
            config.ruler_thickness_px,
        );
        Self {
            rulers,
            grid: GridOverlay::new(config.base_grid_size),
            guides: GuideLayer::new(),
            surfaces,
            rulers_visible: false,
        }
    }

    pub fn surfaces(&self) -> &OverlaySurfaces<S> {
        &self.surfaces
    }

    pub fn guide_lines(&self) -> &[GuideLine] {
        self.guides.lines()
    }

    /// Redraw both rulers for the current zoom and pointer position.
    pub fn redraw_rulers(
        &mut self,
        visible: bool,
        zoom: f32,
        pointer: Option<Point>,
        size: (f32, f32),
        theme: &Theme,
    ) {
        let (width, height) = size;
        let thickness = self.rulers.thickness;
        if !visible {
            if self.rulers_visible {
                self.surfaces.horizontal_ruler.clear(width, thickness);
                self.surfaces.vertical_ruler.clear(thickness, height);
            }
            self.rulers_visible = false;
            return;
        }

        self.rulers.draw(
            &mut self.surfaces.horizontal_ruler,
            RulerAxis::Horizontal,
            width,
            zoom,
            pointer.map(|p| p.x),
            theme,
        );
        self.rulers.draw(
            &mut self.surfaces.vertical_ruler,
            RulerAxis::Vertical,
            height,
            zoom,
            pointer.map(|p| p.y),
            theme,
        );
        self.rulers_visible = true;
    }

    /// Bring the grid surface in line with the current flags; true if redrawn.
    pub fn sync_grid(&mut self, visible: bool, zoom: f32, size: (f32, f32), theme: &Theme) -> bool {
        let (width, height) = size;
        self.grid
            .sync(&mut self.surfaces.grid, visible, zoom, width, height, theme)
    }

    /// Bring the guide lines in line with the current list; true if regenerated.
    pub fn sync_guides(
        &mut self,
        guides: &[Guide],
        visible: bool,
        size: (f32, f32),
        theme: &Theme,
    ) -> bool {
        self.guides.sync(guides, visible, size.0, size.1, theme)
    }

    /// Repaint the selection surface with the live rectangle, if any.
    pub fn redraw_selection(&mut self, rect: Option<Rect>, size: (f32, f32), theme: &Theme) {
        let (width, height) = size;
        draw_selection_rect(&mut self.surfaces.selection, rect, width, height, theme);
    }
}
