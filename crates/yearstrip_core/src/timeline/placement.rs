//! Season bar, textbox and background-mark placement on a scene.
//!
//! # Responsibility
//! - Build the related pairs that make up one season bar.
//! - Apply clamped resizes and mirror them to the twin copy.
//! - Lay out the fixed month and solstice markings.
//!
//! # Invariants
//! - A season is exactly three pairs: title, duration and resizer, with the
//!   resizer related to its duration bar and the duration bar to its title.
//! - Duration widths stay within `[MIN_BAR_WIDTH_PX, doc_width]`.
//! - Resizer offsets always equal their bar width.

use super::coords::{clamp_bar_width, day_to_pixel, Viewport, ROW_SPACING_PX};
use super::scene::{Scene, SceneError, SceneResult};
use crate::model::entity::{EntityKind, EntityRef, PairId, Position, TwinnedAttribute, Visual};

/// Height of a season title label.
pub const TITLE_HEIGHT_PX: i64 = 18;
/// Height of a season duration bar.
pub const BAR_HEIGHT_PX: i64 = 16;
/// Width of the drag handle at the end of a bar.
pub const RESIZER_WIDTH_PX: i64 = 6;

/// Month starts, solstices and equinoxes as `(day, label)`.
pub const BACKGROUND_MARKS: &[(i64, &str)] = &[
    (0, "Jan"),
    (31, "Feb"),
    (59, "Mar"),
    (78, "March equinox"),
    (90, "Apr"),
    (120, "May"),
    (151, "Jun"),
    (171, "June solstice"),
    (181, "Jul"),
    (212, "Aug"),
    (243, "Sep"),
    (264, "September equinox"),
    (273, "Oct"),
    (304, "Nov"),
    (334, "Dec"),
    (354, "December solstice"),
];

/// Pixel layout of a season bar about to be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonLayout {
    pub title: String,
    pub color: String,
    pub x: i64,
    /// Snapped row position of the title.
    pub y: i64,
    pub width_px: i64,
}

/// Pairs created for one season bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonPlacement {
    pub title: PairId,
    pub duration: PairId,
    pub resizer: PairId,
}

/// Pixel layout of a textbox about to be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextboxLayout {
    pub text: String,
    pub color: String,
    pub x: i64,
    pub y: i64,
    pub width_px: i64,
    pub height_px: i64,
}

/// Places a season title, its duration bar and the bar's resizer.
pub fn place_season(
    scene: &mut Scene,
    layout: &SeasonLayout,
    doc_width: i64,
) -> SceneResult<SeasonPlacement> {
    let width = clamp_bar_width(layout.width_px, doc_width);
    let title = scene.create_pair(doc_width, || {
        Visual::new(EntityKind::SeasonTitle, Position::new(layout.x, layout.y))
            .with_text(layout.title.clone())
            .with_color(layout.color.clone())
            .with_size(width, TITLE_HEIGHT_PX)
    });
    let duration = scene.create_pair(doc_width, || {
        Visual::new(
            EntityKind::SeasonDuration,
            Position::new(layout.x, layout.y + TITLE_HEIGHT_PX),
        )
        .with_color(layout.color.clone())
        .with_size(width, BAR_HEIGHT_PX)
    });
    let resizer = scene.create_pair(doc_width, || {
        Visual::new(
            EntityKind::Resizer,
            Position::new(width, layout.y + TITLE_HEIGHT_PX),
        )
        .with_size(RESIZER_WIDTH_PX, BAR_HEIGHT_PX)
    });

    scene.relate(title, duration)?;
    scene.relate(duration, resizer)?;

    Ok(SeasonPlacement {
        title,
        duration,
        resizer,
    })
}

/// Places one editable textbox.
pub fn place_textbox(scene: &mut Scene, layout: &TextboxLayout, viewport: Viewport) -> PairId {
    let width = clamp_bar_width(layout.width_px, viewport.doc_width());
    let height = clamp_text_height(layout.height_px, viewport);
    scene.create_pair(viewport.doc_width(), || {
        Visual::new(EntityKind::Textbox, Position::new(layout.x, layout.y))
            .with_text(layout.text.clone())
            .with_color(layout.color.clone())
            .with_size(width, height)
    })
}

/// Resolves any member of a season to its duration bar.
pub fn duration_of(scene: &Scene, pair: PairId) -> SceneResult<PairId> {
    match scene.kind_of(pair) {
        Some(EntityKind::SeasonDuration) => Ok(pair),
        Some(EntityKind::SeasonTitle) | Some(EntityKind::Resizer) => scene
            .related_of_kind(pair, EntityKind::SeasonDuration)
            .ok_or(SceneError::UnknownPair(pair)),
        Some(found) => Err(SceneError::WrongKind {
            pair,
            expected: EntityKind::SeasonDuration,
            found,
        }),
        None => Err(SceneError::UnknownPair(pair)),
    }
}

/// Sets a duration bar's width, clamped to one sliver up to one year.
///
/// The title width and the resizer offset follow on both copies.
pub fn resize_duration(
    scene: &mut Scene,
    duration: PairId,
    requested_width: i64,
    doc_width: i64,
) -> SceneResult<i64> {
    scene.require_kind(duration, EntityKind::SeasonDuration)?;
    let width = clamp_bar_width(requested_width, doc_width);

    scene.apply_twinned_attribute(EntityRef::primal(duration), &TwinnedAttribute::Width(width))?;
    if let Some(title) = scene.related_of_kind(duration, EntityKind::SeasonTitle) {
        scene.apply_twinned_attribute(EntityRef::primal(title), &TwinnedAttribute::Width(width))?;
    }
    if let Some(resizer) = scene.related_of_kind(duration, EntityKind::Resizer) {
        scene
            .pair_mut(resizer)?
            .update(|handle| handle.position.x = width);
    }
    Ok(width)
}

/// Adds `delta` to a duration bar's current width, then clamps.
pub fn resize_duration_by(
    scene: &mut Scene,
    duration: PairId,
    delta: i64,
    doc_width: i64,
) -> SceneResult<i64> {
    scene.require_kind(duration, EntityKind::SeasonDuration)?;
    let current = scene
        .pair(duration)
        .map(|pair| pair.primal().width_px)
        .ok_or(SceneError::UnknownPair(duration))?;
    resize_duration(scene, duration, current + delta, doc_width)
}

/// Resizes so the bar ends under `pointer_x`.
///
/// The start is taken from the copy the pointer grabbed. A pointer left of
/// that start collapses the bar to the minimum width.
pub fn resize_duration_to_pointer(
    scene: &mut Scene,
    grabbed: EntityRef,
    pointer_x: i64,
    doc_width: i64,
) -> SceneResult<i64> {
    let duration = duration_of(scene, grabbed.pair)?;
    let start = scene
        .get(EntityRef::new(duration, grabbed.side))
        .map(|bar| bar.position.x)
        .ok_or(SceneError::UnknownPair(duration))?;
    let requested = pointer_x - start;
    let requested = if requested < 0 { 0 } else { requested };
    resize_duration(scene, duration, requested, doc_width)
}

/// Mirrors a native textbox resize to both copies.
pub fn resize_textbox(
    scene: &mut Scene,
    textbox: PairId,
    width_px: i64,
    height_px: i64,
    viewport: Viewport,
) -> SceneResult<(i64, i64)> {
    scene.require_kind(textbox, EntityKind::Textbox)?;
    let width = clamp_bar_width(width_px, viewport.doc_width());
    let height = clamp_text_height(height_px, viewport);
    scene.pair_mut(textbox)?.update(|visual| {
        visual.width_px = width;
        visual.height_px = height;
    });
    Ok((width, height))
}

/// Adds the month and solstice markings at the current scroll position.
pub fn populate_background(scene: &mut Scene, scroll_offset: i64, viewport: Viewport) -> usize {
    let doc_width = viewport.doc_width();
    for (day, label) in BACKGROUND_MARKS {
        let x = (day_to_pixel(*day as f64, doc_width) + scroll_offset).rem_euclid(doc_width);
        scene.create_pair(doc_width, || {
            Visual::new(EntityKind::BackgroundMark, Position::new(x, 0))
                .with_text(*label)
                .with_size(1, viewport.scene_height())
        });
    }
    BACKGROUND_MARKS.len()
}

fn clamp_text_height(height_px: i64, viewport: Viewport) -> i64 {
    height_px.clamp(ROW_SPACING_PX, viewport.scene_height())
}

#[cfg(test)]
mod tests {
    use super::{
        duration_of, place_season, populate_background, resize_duration_to_pointer,
        SeasonLayout, BACKGROUND_MARKS,
    };
    use crate::model::entity::{EntityKind, EntityRef, Side};
    use crate::timeline::coords::Viewport;
    use crate::timeline::scene::Scene;

    fn layout() -> SeasonLayout {
        SeasonLayout {
            title: "Monsoon".to_string(),
            color: "#3a7bd5".to_string(),
            x: 274,
            y: 80,
            width_px: 82,
        }
    }

    #[test]
    fn season_places_three_related_pairs() {
        let mut scene = Scene::new();
        let placed = place_season(&mut scene, &layout(), 1000).unwrap();

        assert_eq!(scene.entity_count(), 6);
        assert_eq!(scene.relation_count(), 2);
        assert_eq!(duration_of(&scene, placed.title).unwrap(), placed.duration);
        assert_eq!(duration_of(&scene, placed.resizer).unwrap(), placed.duration);
        let handle = scene.get(EntityRef::primal(placed.resizer)).unwrap();
        assert_eq!(handle.position.x, 82);
    }

    #[test]
    fn pointer_resize_uses_grabbed_copy_start() {
        let mut scene = Scene::new();
        let placed = place_season(&mut scene, &layout(), 1000).unwrap();
        let twin_handle = EntityRef::new(placed.resizer, Side::Twin);

        // Twin bar starts at -726.
        let width = resize_duration_to_pointer(&mut scene, twin_handle, -626, 1000).unwrap();
        assert_eq!(width, 100);
        let width = resize_duration_to_pointer(&mut scene, twin_handle, -900, 1000).unwrap();
        assert_eq!(width, 4);
    }

    #[test]
    fn background_marks_follow_scroll_offset() {
        let mut scene = Scene::new();
        let count = populate_background(&mut scene, 250, Viewport::new(1000, 400));

        assert_eq!(count, BACKGROUND_MARKS.len());
        let (_, january) = scene.pairs().next().unwrap();
        assert_eq!(january.primal().kind, EntityKind::BackgroundMark);
        assert_eq!(january.primal().position.x, 250);
    }
}
