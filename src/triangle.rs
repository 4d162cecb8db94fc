use crate::point2d::Point2D;

/// Flat RGB colour, components in the 0-255 range.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }

    /// Components as bytes. The cast truncates and saturates, NaN becomes 0.
    #[inline(always)]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r as u8, self.g as u8, self.b as u8]
    }
}

/// A screen-space triangle with a single fill colour.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub a: Point2D,
    pub b: Point2D,
    pub c: Point2D,
    pub color: Color,
}

impl Triangle {
    pub const fn new(a: Point2D, b: Point2D, c: Point2D, color: Color) -> Self {
        Triangle { a, b, c, color }
    }

    /// Edges in traversal order: a->b, b->c, c->a.
    #[inline(always)]
    pub fn edges(&self) -> [(Point2D, Point2D); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }
}
