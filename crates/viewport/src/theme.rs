//! Viewport theme.
//!
//! Colour and size tokens for page chrome, interaction rings and overlays. The
//! renderer and the overlay surfaces read these instead of hard-coding colours.

use pdf_editor_core::Color;

/// Semantic colour tokens used while painting the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    // ═══════════════════════════════════════════════════════════════════════════
    // PAGE COLORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Area behind the pages.
    pub canvas_background: Color,

    /// Paper colour.
    pub page_background: Color,

    /// Page outline.
    pub page_border: Color,

    /// Thumbnail page-number label.
    pub page_label: Color,

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERACTION COLORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Ring drawn around selected elements.
    pub selection_ring: Color,

    /// Ring drawn around the hovered element.
    pub hover_ring: Color,

    /// Rubber-band rectangle fill (translucent).
    pub selection_fill: Color,

    /// Rubber-band rectangle outline.
    pub selection_stroke: Color,

    /// Outline around a text run being edited inline.
    pub editing_outline: Color,

    // ═══════════════════════════════════════════════════════════════════════════
    // OVERLAY COLORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Ruler strip fill.
    pub ruler_background: Color,

    /// Ruler tick marks.
    pub ruler_tick: Color,

    /// Ruler labels.
    pub ruler_text: Color,

    /// Current pointer position bar on each ruler.
    pub ruler_indicator: Color,

    /// Snap grid lattice lines.
    pub grid_line: Color,

    // ═══════════════════════════════════════════════════════════════════════════
    // FORM FIELD COLORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Form widget fill.
    pub field_background: Color,

    /// Form widget outline.
    pub field_border: Color,

    /// Form values, check marks and selected radio dots.
    pub field_text: Color,
}

/// Size tokens in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSizes {
    /// Width of selection and hover rings.
    pub ring_width: f32,

    /// Gap between an element's box and its ring.
    pub ring_offset: f32,

    /// Width of the page outline.
    pub page_border_width: f32,

    /// Length of a plain ruler tick.
    pub ruler_tick_length: f32,

    /// Length of a labelled ruler tick.
    pub ruler_label_tick_length: f32,

    /// Width of the ruler pointer indicator.
    pub ruler_indicator_width: f32,

    /// Font size of ruler labels.
    pub ruler_font_size: f32,

    /// Thickness of a guide line.
    pub guide_width: f32,

    /// Side of the icon square for note annotations, at zoom 1.
    pub note_icon_size: f32,

    /// Font size of thumbnail page numbers.
    pub page_label_font_size: f32,
}

/// Complete viewport theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Colour tokens.
    pub colors: ThemeColors,
    /// Size tokens.
    pub sizes: ThemeSizes,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::light()
    }
}

impl ThemeColors {
    /// Light canvas palette.
    pub fn light() -> Self {
        Self {
            canvas_background: Color::rgb(232, 232, 232),
            page_background: Color::WHITE,
            page_border: Color::rgb(200, 200, 200),
            page_label: Color::rgb(60, 60, 60),

            selection_ring: Color::rgb(38, 128, 235),
            hover_ring: Color::new(38, 128, 235, 110),
            selection_fill: Color::new(38, 128, 235, 40),
            selection_stroke: Color::rgb(38, 128, 235),
            editing_outline: Color::rgb(255, 149, 0),

            ruler_background: Color::rgb(245, 245, 245),
            ruler_tick: Color::rgb(120, 120, 120),
            ruler_text: Color::rgb(80, 80, 80),
            ruler_indicator: Color::rgb(230, 60, 60),
            grid_line: Color::new(0, 0, 0, 28),

            field_background: Color::new(220, 232, 255, 160),
            field_border: Color::rgb(110, 140, 200),
            field_text: Color::rgb(20, 20, 20),
        }
    }

    /// Dark canvas palette; pages stay white.
    pub fn dark() -> Self {
        Self {
            canvas_background: Color::rgb(31, 31, 31),
            page_border: Color::rgb(90, 90, 90),
            page_label: Color::rgb(220, 220, 220),
            ruler_background: Color::rgb(38, 38, 38),
            ruler_tick: Color::rgb(150, 150, 150),
            ruler_text: Color::rgb(200, 200, 200),
            grid_line: Color::new(255, 255, 255, 24),
            ..Self::light()
        }
    }
}

impl Default for ThemeSizes {
    fn default() -> Self {
        Self {
            ring_width: 2.0,
            ring_offset: 2.0,
            page_border_width: 1.0,
            ruler_tick_length: 5.0,
            ruler_label_tick_length: 12.0,
            ruler_indicator_width: 2.0,
            ruler_font_size: 9.0,
            guide_width: 1.0,
            note_icon_size: 18.0,
            page_label_font_size: 12.0,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Light palette with default sizes.
    pub fn light() -> Self {
        Self {
            colors: ThemeColors::light(),
            sizes: ThemeSizes::default(),
        }
    }

    /// Dark palette with default sizes.
    pub fn dark() -> Self {
        Self {
            colors: ThemeColors::dark(),
            sizes: ThemeSizes::default(),
        }
    }
}
