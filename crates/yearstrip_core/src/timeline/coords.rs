//! Day, pixel and row coordinate conversion.
//!
//! # Responsibility
//! - Map resolution-independent day positions to strip pixels and back.
//! - Snap vertical positions to fixed row slots.
//! - Keep pixel positions inside the two-copy wrap window.
//!
//! # Invariants
//! - `pixel_to_day` always returns a value in `[0, DAYS_PER_YEAR)`.
//! - Out-of-range inputs are clamped, never rejected.

/// Number of day slots in one calendar strip.
pub const DAYS_PER_YEAR: i64 = 365;
/// Vertical distance between two placement rows.
pub const ROW_SPACING_PX: i64 = 40;
/// Smallest visible width of a duration bar or textbox.
pub const MIN_BAR_WIDTH_PX: i64 = 4;

/// Visible drawing area the strip is laid out against.
///
/// `doc_width` is the pixel modulus of the strip: one full year spans
/// exactly one viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    doc_width: i64,
    scene_height: i64,
}

impl Viewport {
    /// Creates a viewport, clamping degenerate sizes.
    ///
    /// A width below one pixel becomes `1`; a height below one row becomes
    /// one row.
    pub fn new(doc_width: i64, scene_height: i64) -> Self {
        Self {
            doc_width: doc_width.max(1),
            scene_height: scene_height.max(ROW_SPACING_PX),
        }
    }

    pub fn doc_width(&self) -> i64 {
        self.doc_width
    }

    pub fn scene_height(&self) -> i64 {
        self.scene_height
    }
}

/// Converts a day position to a strip pixel offset.
pub fn day_to_pixel(day: f64, doc_width: i64) -> i64 {
    (day / DAYS_PER_YEAR as f64 * doc_width as f64).round() as i64
}

/// Converts a strip pixel offset back to a day slot.
///
/// `scroll_offset` is the accumulated scroll of the session; subtracting it
/// makes the result independent of how far the strip has been scrolled.
/// Negative pixel positions are valid input.
pub fn pixel_to_day(px: i64, scroll_offset: i64, doc_width: i64) -> i64 {
    let doc_width = doc_width.max(1);
    let normalized = (px - scroll_offset).rem_euclid(doc_width);
    let day = (normalized as f64 / doc_width as f64 * DAYS_PER_YEAR as f64).floor() as i64;
    day.clamp(0, DAYS_PER_YEAR - 1)
}

/// Converts a pixel width to a whole number of days.
pub fn days_for_width(width_px: i64, doc_width: i64) -> i64 {
    let doc_width = doc_width.max(1);
    (width_px as f64 / doc_width as f64 * DAYS_PER_YEAR as f64).round() as i64
}

/// Snaps a vertical position to the nearest row slot inside the scene.
///
/// `y` is clamped to the last fully visible row before snapping.
pub fn snap_row(y: i64, scene_height: i64) -> i64 {
    let max_y = (scene_height - ROW_SPACING_PX).max(0);
    let clamped = y.clamp(0, max_y);
    (clamped as f64 / ROW_SPACING_PX as f64).round() as i64 * ROW_SPACING_PX
}

/// Row index of a snapped vertical position.
pub fn row_index(y: i64) -> i64 {
    y.max(0) / ROW_SPACING_PX
}

/// Folds a pixel position back into `[-doc_width, doc_width]`.
///
/// Values already inside the window are returned unchanged. Values past the
/// right edge land in `(-w, w]` and values past the left edge in `[-w, w)`.
/// A width below one pixel is treated as `1`.
pub fn wrap_x(x: i64, doc_width: i64) -> i64 {
    let w = doc_width.max(1);
    let span = w.saturating_mul(2);
    if x > w {
        w - (w - x).rem_euclid(span)
    } else if x < -w {
        (x + w).rem_euclid(span) - w
    } else {
        x
    }
}

/// Clamps a requested bar width to one visible sliver up to one full year.
pub fn clamp_bar_width(requested: i64, doc_width: i64) -> i64 {
    requested.clamp(MIN_BAR_WIDTH_PX, doc_width.max(MIN_BAR_WIDTH_PX))
}
