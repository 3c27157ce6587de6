//! Glyph layout for the overlay renderer
//!
//! Pure geometry: where the four directional glyphs sit inside the widget
//! bounds. The renderer owns everything else about drawing.

use crate::region::Rect;

/// Screen rectangles of the four directional glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRects {
    pub up: Rect,
    pub down: Rect,
    pub left: Rect,
    pub right: Rect,
}

/// Compute glyph rectangles for the given widget bounds
///
/// The left/right glyphs are the up/down artwork rotated a quarter turn,
/// so their on-screen extents swap `button_width` and `button_height`.
pub fn glyph_rects(bounds: Rect, button_width: i32, button_height: i32) -> GlyphRects {
    let cx = bounds.center_x();
    let cy = bounds.center_y();

    GlyphRects {
        up: Rect::new(
            cx - button_width / 2,
            bounds.top,
            cx + button_width / 2,
            bounds.top + button_height,
        ),
        down: Rect::new(
            cx - button_width / 2,
            bounds.bottom - button_height,
            cx + button_width / 2,
            bounds.bottom,
        ),
        left: Rect::new(
            bounds.left,
            cy - button_width / 2,
            bounds.left + button_height,
            cy + button_width / 2,
        ),
        right: Rect::new(
            bounds.right - button_height,
            cy - button_width / 2,
            bounds.right,
            cy + button_width / 2,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_hug_their_edges() {
        let bounds = Rect::new(100, 100, 250, 250);
        let rects = glyph_rects(bounds, 64, 32);

        assert_eq!(rects.up.top, bounds.top);
        assert_eq!(rects.down.bottom, bounds.bottom);
        assert_eq!(rects.left.left, bounds.left);
        assert_eq!(rects.right.right, bounds.right);
    }

    #[test]
    fn test_up_down_centered_horizontally() {
        let bounds = Rect::new(0, 0, 200, 200);
        let rects = glyph_rects(bounds, 64, 32);

        assert_eq!(rects.up, Rect::new(68, 0, 132, 32));
        assert_eq!(rects.down, Rect::new(68, 168, 132, 200));
    }

    #[test]
    fn test_left_right_swap_extents() {
        let bounds = Rect::new(0, 0, 200, 200);
        let rects = glyph_rects(bounds, 64, 32);

        assert_eq!(rects.left.width(), 32);
        assert_eq!(rects.left.height(), 64);
        assert_eq!(rects.right, Rect::new(168, 68, 200, 132));
    }
}
