//! Overlay widget geometry
//!
//! Position, size, and opacity of one on-screen widget, independent of any
//! touch logic. Mutations persist through the [`OverlayStore`] port;
//! failures there are logged and dropped so the in-memory state stays
//! authoritative for the session.

use crate::store::{OverlayLayout, OverlayStore};
use std::sync::Arc;
use tracing::warn;

/// Side of the unscaled widget square
pub const BASE_SIDE: i32 = 1024;

/// Default widget rectangle before any persisted state is applied
pub const DEFAULT_BOUNDS: Rect = Rect {
    left: 100,
    top: 100,
    right: 250,
    bottom: 250,
};

/// Default scale and opacity, in percent
pub const DEFAULT_SCALE_PERCENT: u8 = 50;
pub const DEFAULT_OPACITY_PERCENT: u8 = 50;

/// Axis-aligned integer rectangle in overlay coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> i32 {
        (self.left + self.right) / 2
    }

    pub fn center_y(&self) -> i32 {
        (self.top + self.bottom) / 2
    }

    /// True iff the point lies within the rectangle (right/bottom exclusive)
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Geometric and visual state of one overlay widget
///
/// `button_width`/`button_height` size the directional glyphs for the
/// renderer; hit-testing works purely on `bounds`.
pub struct OverlayRegion {
    id: String,
    bounds: Rect,
    button_width: i32,
    button_height: i32,
    scale_percent: u8,
    opacity_percent: u8,
    idle_alpha: u8,
    dragging: bool,
    offset_x: i32,
    offset_y: i32,
    store: Arc<dyn OverlayStore>,
}

impl OverlayRegion {
    /// Create a region, restoring any persisted layout for `id`
    ///
    /// Restore order matches the mutation operations: forced position
    /// update, then scale, then opacity.
    pub fn new(
        id: impl Into<String>,
        button_width: i32,
        button_height: i32,
        store: Arc<dyn OverlayStore>,
    ) -> Self {
        let mut region = Self {
            id: id.into(),
            bounds: DEFAULT_BOUNDS,
            button_width,
            button_height,
            scale_percent: DEFAULT_SCALE_PERCENT,
            opacity_percent: DEFAULT_OPACITY_PERCENT,
            idle_alpha: alpha_from_percent(DEFAULT_OPACITY_PERCENT),
            dragging: false,
            offset_x: 0,
            offset_y: 0,
            store,
        };

        match region.store.load(&region.id) {
            Ok(Some(layout)) => {
                region.update_position(layout.x, layout.y, true);
                region.set_scale(layout.scale_percent);
                region.set_opacity(layout.opacity_percent);
            }
            Ok(None) => {}
            Err(err) => warn!(id = %region.id, "failed to load overlay layout: {err}"),
        }

        region
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn button_width(&self) -> i32 {
        self.button_width
    }

    pub fn button_height(&self) -> i32 {
        self.button_height
    }

    pub fn scale_percent(&self) -> u8 {
        self.scale_percent
    }

    pub fn opacity_percent(&self) -> u8 {
        self.opacity_percent
    }

    /// Alpha applied to glyphs whose direction is not pressed
    pub fn idle_alpha(&self) -> u8 {
        self.idle_alpha
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// True iff the point lies within the widget bounds
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(x, y)
    }

    /// Begin a drag, anchoring the touch point to the current top-left
    pub fn start_drag(&mut self, x: i32, y: i32) {
        self.dragging = true;
        self.offset_x = x - self.bounds.left;
        self.offset_y = y - self.bounds.top;
    }

    pub fn stop_drag(&mut self) {
        self.dragging = false;
    }

    /// Move the widget so the drag anchor follows (x, y)
    ///
    /// No-op unless a drag is active or `force` is set. Width and height
    /// are preserved.
    pub fn update_position(&mut self, x: i32, y: i32, force: bool) {
        if !self.dragging && !force {
            return;
        }

        let left = x - self.offset_x;
        let top = y - self.offset_y;
        self.bounds = Rect::new(
            left,
            top,
            left + self.bounds.width(),
            top + self.bounds.height(),
        );
        self.persist();
    }

    /// Resize to a square of side `BASE_SIDE * percent / 100`, keeping the
    /// current center
    pub fn set_scale(&mut self, percent: u8) {
        self.scale_percent = percent.min(100);
        let side = (BASE_SIDE as f32 * self.scale_percent as f32 / 100.0).round() as i32;
        // floor of 1 keeps the bounds non-degenerate at 0%
        let half = (side / 2).max(1);
        let cx = self.bounds.center_x();
        let cy = self.bounds.center_y();

        self.bounds = Rect::new(cx - half, cy - half, cx + half, cy + half);
        self.persist();
    }

    /// Set idle transparency as a percentage of full opacity
    pub fn set_opacity(&mut self, percent: u8) {
        self.opacity_percent = percent.min(100);
        self.idle_alpha = alpha_from_percent(self.opacity_percent);
        self.persist();
    }

    /// Drop persisted state and restore the built-in layout
    pub fn reset_to_defaults(&mut self) {
        if let Err(err) = self.store.clear(&self.id) {
            warn!(id = %self.id, "failed to clear overlay layout: {err}");
        }
        self.dragging = false;
        self.bounds = DEFAULT_BOUNDS;
        self.scale_percent = DEFAULT_SCALE_PERCENT;
        self.set_opacity(DEFAULT_OPACITY_PERCENT);
    }

    fn persist(&self) {
        let layout = OverlayLayout {
            x: self.bounds.left,
            y: self.bounds.top,
            scale_percent: self.scale_percent,
            opacity_percent: self.opacity_percent,
        };
        if let Err(err) = self.store.save(&self.id, &layout) {
            warn!(id = %self.id, "failed to save overlay layout: {err}");
        }
    }
}

fn alpha_from_percent(percent: u8) -> u8 {
    (255 * percent as u32 / 100).min(255) as u8
}
