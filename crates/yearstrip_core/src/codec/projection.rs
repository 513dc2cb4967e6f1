//! Scene to document projection and its inverse.

use crate::model::document::{CalendarDocument, SeasonEntry, TextEntry};
use crate::model::entity::{EntityKind, PairId, Visual};
use crate::timeline::coords::{
    day_to_pixel, days_for_width, pixel_to_day, row_index, snap_row, Viewport, DAYS_PER_YEAR,
    MIN_BAR_WIDTH_PX, ROW_SPACING_PX,
};
use crate::timeline::placement::{
    place_season, place_textbox, SeasonLayout, SeasonPlacement, TextboxLayout,
};
use crate::timeline::scene::{Scene, SceneResult};

/// Pairs created by one import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub seasons: Vec<SeasonPlacement>,
    pub textboxes: Vec<PairId>,
}

/// Projects the scene's primal copies into a document.
///
/// Twins and background marks are skipped. Entries keep scene creation
/// order.
pub fn export_scene(
    scene: &Scene,
    scroll_offset: i64,
    doc_width: i64,
    name: &str,
    id: &str,
) -> CalendarDocument {
    let mut document = CalendarDocument::new(name, id);

    for (pair_id, pair) in scene.pairs() {
        let visual = pair.primal();
        match visual.kind {
            EntityKind::SeasonTitle => {
                let bar_width = scene
                    .related_of_kind(pair_id, EntityKind::SeasonDuration)
                    .and_then(|bar| scene.pair(bar))
                    .map_or(visual.width_px, |bar| bar.primal().width_px);
                document.season_entries.push(SeasonEntry {
                    title: visual.text.clone(),
                    start_day: pixel_to_day(visual.position.x, scroll_offset, doc_width),
                    duration_days: exported_days(bar_width, doc_width),
                    row_index: row_index(visual.position.y),
                    color: visual.color.clone(),
                });
            }
            EntityKind::Textbox => document.text_entries.push(text_entry(
                visual,
                scroll_offset,
                doc_width,
            )),
            EntityKind::SeasonDuration | EntityKind::Resizer | EntityKind::BackgroundMark => {}
        }
    }

    document
}

/// Places every document entry into `scene` at the current scroll offset.
///
/// Day values are folded into the year and durations clamped; rows beyond
/// the visible scene land on the last row.
pub fn import_document(
    scene: &mut Scene,
    document: &CalendarDocument,
    scroll_offset: i64,
    viewport: Viewport,
) -> SceneResult<ImportSummary> {
    let mut summary = ImportSummary::default();

    for entry in &document.season_entries {
        summary
            .seasons
            .push(place_season_entry(scene, entry, scroll_offset, viewport)?);
    }
    for entry in &document.text_entries {
        summary
            .textboxes
            .push(place_text_entry(scene, entry, scroll_offset, viewport));
    }

    Ok(summary)
}

/// Places one season entry given in day space.
pub fn place_season_entry(
    scene: &mut Scene,
    entry: &SeasonEntry,
    scroll_offset: i64,
    viewport: Viewport,
) -> SceneResult<SeasonPlacement> {
    let doc_width = viewport.doc_width();
    let layout = SeasonLayout {
        title: entry.title.clone(),
        color: entry.color.clone(),
        x: strip_x(entry.start_day, scroll_offset, doc_width),
        y: row_y(entry.row_index, viewport),
        width_px: day_to_pixel(entry.duration_days.clamp(0, DAYS_PER_YEAR) as f64, doc_width),
    };
    place_season(scene, &layout, doc_width)
}

/// Places one text entry given in day and row space.
pub fn place_text_entry(
    scene: &mut Scene,
    entry: &TextEntry,
    scroll_offset: i64,
    viewport: Viewport,
) -> PairId {
    let doc_width = viewport.doc_width();
    let layout = TextboxLayout {
        text: entry.text.clone(),
        color: entry.color.clone(),
        x: strip_x(entry.start_day, scroll_offset, doc_width),
        y: row_y(entry.row_index, viewport),
        width_px: day_to_pixel(entry.width_days.clamp(0, DAYS_PER_YEAR) as f64, doc_width),
        height_px: entry.height_rows.max(1) * ROW_SPACING_PX,
    };
    place_textbox(scene, &layout, viewport)
}

fn text_entry(visual: &Visual, scroll_offset: i64, doc_width: i64) -> TextEntry {
    TextEntry {
        text: visual.text.clone(),
        start_day: pixel_to_day(visual.position.x, scroll_offset, doc_width),
        width_days: exported_days(visual.width_px, doc_width),
        height_rows: (visual.height_px as f64 / ROW_SPACING_PX as f64).round() as i64,
        row_index: row_index(visual.position.y),
        color: visual.color.clone(),
    }
}

/// Day count for an exported width. A minimum-width sliver stands for at
/// most one day, since zero-length entries are widened to it on import.
fn exported_days(width_px: i64, doc_width: i64) -> i64 {
    let days = days_for_width(width_px, doc_width);
    if width_px <= MIN_BAR_WIDTH_PX {
        days.min(1)
    } else {
        days
    }
}

fn strip_x(start_day: i64, scroll_offset: i64, doc_width: i64) -> i64 {
    let day = start_day.rem_euclid(DAYS_PER_YEAR);
    (day_to_pixel(day as f64, doc_width) + scroll_offset).rem_euclid(doc_width)
}

fn row_y(row_index: i64, viewport: Viewport) -> i64 {
    snap_row(row_index.max(0) * ROW_SPACING_PX, viewport.scene_height())
}

#[cfg(test)]
mod tests {
    use super::{export_scene, import_document};
    use crate::model::document::{CalendarDocument, SeasonEntry, TextEntry};
    use crate::timeline::coords::Viewport;
    use crate::timeline::scene::Scene;

    #[test]
    fn textbox_survives_projection_round_trip() {
        let mut document = CalendarDocument::new("Notes", "cal-7");
        document.text_entries.push(TextEntry {
            text: "Frost risk".to_string(),
            start_day: 300,
            width_days: 45,
            height_rows: 2,
            row_index: 3,
            color: "#aaaaaa".to_string(),
        });

        let mut scene = Scene::new();
        import_document(&mut scene, &document, 120, Viewport::new(1920, 400)).unwrap();
        let exported = export_scene(&scene, 120, 1920, "Notes", "cal-7");

        let text = &exported.text_entries[0];
        assert_eq!(text.text, "Frost risk");
        assert_eq!(text.height_rows, 2);
        assert_eq!(text.row_index, 3);
        assert!((text.start_day - 300).abs() <= 1);
        assert!((text.width_days - 45).abs() <= 1);
    }

    #[test]
    fn out_of_range_days_are_folded_not_rejected() {
        let mut document = CalendarDocument::new("", "");
        document.season_entries.push(SeasonEntry {
            title: "Wrapped".to_string(),
            start_day: 365 + 10,
            duration_days: 900,
            row_index: -2,
            color: "red".to_string(),
        });

        let mut scene = Scene::new();
        import_document(&mut scene, &document, 0, Viewport::new(1000, 400)).unwrap();
        let exported = export_scene(&scene, 0, 1000, "", "");

        let season = &exported.season_entries[0];
        assert!((season.start_day - 10).abs() <= 1);
        assert_eq!(season.duration_days, 365);
        assert_eq!(season.row_index, 0);
    }

    #[test]
    fn short_durations_survive_minimum_width() {
        let mut document = CalendarDocument::new("", "");
        for duration_days in [0, 1, 2, 3] {
            document.season_entries.push(SeasonEntry {
                title: format!("d{duration_days}"),
                start_day: 40,
                duration_days,
                row_index: 0,
                color: "red".to_string(),
            });
        }
        document.text_entries.push(TextEntry {
            text: "dot".to_string(),
            start_day: 40,
            width_days: 0,
            height_rows: 1,
            row_index: 1,
            color: "red".to_string(),
        });

        let mut scene = Scene::new();
        import_document(&mut scene, &document, 0, Viewport::new(800, 400)).unwrap();
        let exported = export_scene(&scene, 0, 800, "", "");

        for (source, season) in document.season_entries.iter().zip(&exported.season_entries) {
            assert!(
                (season.duration_days - source.duration_days).abs() <= 1,
                "{} exported as {}",
                source.title,
                season.duration_days
            );
        }
        assert_eq!(exported.text_entries[0].width_days, 1);
    }
}
