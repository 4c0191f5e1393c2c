//! Drawing primitives for page content.
//!
//! The page renderer emits these in page-pixel space (page top-left at the
//! origin, current zoom already applied). Hosts translate by the page origin and
//! paint them with whatever backend they use.

use pdf_editor_core::{Color, LineDash, Point, Rect};

/// Stroke attributes for outlined primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub dash: LineDash,
}

impl Stroke {
    /// Continuous stroke.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: LineDash::Solid,
        }
    }

    /// Dashed stroke.
    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: LineDash::Dashed,
        }
    }
}

/// Visual primitive types that can be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Axis-aligned rectangle, filled and/or outlined.
    Rectangle {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// Line segment.
    Line {
        start: Point,
        end: Point,
        stroke: Stroke,
    },
    /// Line with an arrowhead at `end`.
    Arrow {
        start: Point,
        end: Point,
        stroke: Stroke,
        head_size: f32,
    },
    /// Circle defined by centre and radius.
    Circle {
        center: Point,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// Connected line segments.
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
        closed: bool,
    },
    /// Single line of text anchored at its top-left.
    Text {
        origin: Point,
        content: String,
        font_family: String,
        font_size: f32,
        color: Color,
    },
    /// Raster image resolved by the host from `source`.
    Image {
        rect: Rect,
        source: String,
    },
}

impl Primitive {
    /// Same primitive shifted by a pixel offset.
    pub fn translated(&self, dx: f32, dy: f32) -> Primitive {
        let shift = |point: &Point| point.offset(dx, dy);
        match self {
            Primitive::Rectangle { rect, fill, stroke } => Primitive::Rectangle {
                rect: rect.translated(dx, dy),
                fill: *fill,
                stroke: *stroke,
            },
            Primitive::Line { start, end, stroke } => Primitive::Line {
                start: shift(start),
                end: shift(end),
                stroke: *stroke,
            },
            Primitive::Arrow {
                start,
                end,
                stroke,
                head_size,
            } => Primitive::Arrow {
                start: shift(start),
                end: shift(end),
                stroke: *stroke,
                head_size: *head_size,
            },
            Primitive::Circle {
                center,
                radius,
                fill,
                stroke,
            } => Primitive::Circle {
                center: shift(center),
                radius: *radius,
                fill: *fill,
                stroke: *stroke,
            },
            Primitive::Polyline {
                points,
                stroke,
                closed,
            } => Primitive::Polyline {
                points: points.iter().map(shift).collect(),
                stroke: *stroke,
                closed: *closed,
            },
            Primitive::Text {
                origin,
                content,
                font_family,
                font_size,
                color,
            } => Primitive::Text {
                origin: shift(origin),
                content: content.clone(),
                font_family: font_family.clone(),
                font_size: *font_size,
                color: *color,
            },
            Primitive::Image { rect, source } => Primitive::Image {
                rect: rect.translated(dx, dy),
                source: source.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_moves_every_point() {
        let polyline = Primitive::Polyline {
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)],
            stroke: Stroke::solid(Color::BLACK, 1.0),
            closed: false,
        };

        let Primitive::Polyline { points, .. } = polyline.translated(3.0, 4.0) else {
            panic!("expected polyline");
        };
        assert_eq!(points, vec![Point::new(3.0, 4.0), Point::new(13.0, 9.0)]);
    }

    #[test]
    fn test_translate_keeps_circle_radius() {
        let circle = Primitive::Circle {
            center: Point::new(5.0, 0.0),
            radius: 5.0,
            fill: None,
            stroke: Some(Stroke::dashed(Color::RED, 2.0)),
        };

        assert_eq!(
            circle.translated(1.0, 1.0),
            Primitive::Circle {
                center: Point::new(6.0, 1.0),
                radius: 5.0,
                fill: None,
                stroke: Some(Stroke::dashed(Color::RED, 2.0)),
            }
        );
    }
}
