use serde_json::json;
use yearstrip_core::codec::V1_SEASON_DAYS;
use yearstrip_core::{
    decode_document, encode_document, CalendarEditor, CodecError, EditorConfig, EditorError,
    EntityKind, EntityRef, SeasonEntry, Side, TextEntry,
};

fn editor(doc_width: i64) -> CalendarEditor {
    CalendarEditor::new(EditorConfig::default(), doc_width, Some("cal-rt".to_string()))
}

fn season(start_day: i64, duration_days: i64) -> SeasonEntry {
    SeasonEntry {
        title: "Growing".to_string(),
        start_day,
        duration_days,
        row_index: 2,
        color: "#228b22".to_string(),
    }
}

fn within_one(actual: i64, expected: i64) -> bool {
    (actual - expected).abs() <= 1
}

#[test]
fn round_trip_holds_across_widths_and_start_days() {
    for doc_width in [800, 1920, 3440] {
        for start_day in [0, 171, 364] {
            let mut source = editor(doc_width);
            source.scroll_by(137);
            source.create_season_entry(&season(start_day, 45)).unwrap();
            source
                .create_text_entry(&TextEntry {
                    text: "Note".to_string(),
                    start_day,
                    width_days: 20,
                    height_rows: 2,
                    row_index: 4,
                    color: "navy".to_string(),
                })
                .unwrap();
            let exported = source.export();
            let first = &exported.season_entries[0];
            assert!(
                within_one(first.start_day, start_day),
                "w={doc_width} start={start_day} got={}",
                first.start_day
            );
            assert!(within_one(first.duration_days, 45));

            let mut target = editor(doc_width);
            target.scroll_by(-901);
            target.import(&exported).unwrap();
            let again = target.export();

            let entry = &again.season_entries[0];
            assert_eq!(entry.title, "Growing");
            assert_eq!(entry.color, "#228b22");
            assert_eq!(entry.row_index, 2);
            assert!(within_one(entry.start_day, first.start_day));
            assert!(within_one(entry.duration_days, first.duration_days));

            let text = &again.text_entries[0];
            assert_eq!(text.text, "Note");
            assert_eq!(text.row_index, 4);
            assert_eq!(text.height_rows, 2);
            assert!(within_one(text.width_days, exported.text_entries[0].width_days));
        }
    }
}

#[test]
fn end_to_end_placement_at_one_thousand_pixels() {
    let mut editor = editor(1000);
    let placed = editor.create_season_entry(&season(100, 30)).unwrap();

    let scene = editor.scene();
    let title = scene.get(EntityRef::primal(placed.title)).unwrap();
    let twin = scene.get(EntityRef::new(placed.title, Side::Twin)).unwrap();
    let bar = scene.get(EntityRef::primal(placed.duration)).unwrap();
    assert_eq!(title.position.x, 274);
    assert_eq!(twin.position.x, -726);
    assert_eq!(bar.width_px, 82);

    let json = editor.export_json().unwrap();
    let mut reopened = CalendarEditor::new(EditorConfig::default(), 1000, None);
    reopened.import_json(&json).unwrap();
    let entry = &reopened.export().season_entries[0];
    assert!((99..=101).contains(&entry.start_day));
    assert!((29..=31).contains(&entry.duration_days));
    assert_eq!(reopened.id(), "cal-rt");
}

#[test]
fn export_is_independent_of_scroll_offset() {
    let mut editor = editor(1000);
    editor.create_season_entry(&season(200, 10)).unwrap();
    let before = editor.export();

    editor.scroll_by(333);
    editor.wheel(-1.0);
    editor.scroll_by(-4_000);
    let after = editor.export();

    assert_eq!(before.season_entries.len(), 1);
    assert!(within_one(after.season_entries[0].start_day, 200));
    assert_eq!(
        after.season_entries[0].duration_days,
        before.season_entries[0].duration_days
    );
}

#[test]
fn version_one_bars_get_fixed_length() {
    let raw = json!({
        "version": 1,
        "name": "Old",
        "id": "legacy-1",
        "elements": [
            {"type": "seasonbar", "text": "Wet", "start": 10, "row": 1, "color": "blue"},
            {"type": "textbox", "text": "hi", "start": 40, "row": 3, "color": "red",
             "width": 12, "height": 2}
        ]
    });
    let document = decode_document(&raw.to_string()).unwrap();

    assert_eq!(document.version, 3);
    assert_eq!(document.season_entries[0].duration_days, V1_SEASON_DAYS);
    assert_eq!(document.season_entries[0].title, "Wet");
    assert_eq!(document.text_entries[0].width_days, 12);
    assert_eq!(document.text_entries[0].height_rows, 2);
}

#[test]
fn version_two_requires_duration() {
    let with_duration = json!({
        "version": 2,
        "elements": [
            {"type": "seasonbar", "text": "Dry", "start": 200, "row": 0, "color": "#ccc",
             "duration": 90}
        ]
    });
    let document = decode_document(&with_duration.to_string()).unwrap();
    assert_eq!(document.season_entries[0].duration_days, 90);
    assert_eq!(document.name, "");

    let without = json!({
        "version": 2,
        "elements": [
            {"type": "seasonbar", "text": "Dry", "start": 200, "row": 0, "color": "#ccc"}
        ]
    });
    let err = decode_document(&without.to_string()).unwrap_err();
    assert!(matches!(
        err,
        CodecError::MissingField {
            version: 2,
            field: "duration"
        }
    ));
}

#[test]
fn version_three_round_trips_through_encoder() {
    let mut editor = editor(1920);
    editor.rename("Orchard");
    editor.create_season_entry(&season(50, 60)).unwrap();
    let encoded = encode_document(&editor.export()).unwrap();

    let decoded = decode_document(&encoded).unwrap();
    assert_eq!(decoded.name, "Orchard");
    assert_eq!(decoded.id, "cal-rt");
    assert_eq!(decoded.season_entries.len(), 1);
    assert!(decoded.text_entries.is_empty());
}

#[test]
fn bad_input_is_rejected_without_touching_scene() {
    let mut editor = editor(1000);
    editor.create_season_entry(&season(10, 10)).unwrap();
    let entities_before = editor.scene().entity_count();

    let cases = [
        ("{not json", "json"),
        (r#"{"name":"x","id":"y"}"#, "missing"),
        (r#"{"version":9,"name":"x","id":"y"}"#, "unsupported"),
        (
            r#"{"version":3,"name":"x","id":"y","seasonbars":[{"title":"t","startDay":1,
               "durationDays":2,"rowIndex":0,"color":"url(evil)"}],"textboxes":[]}"#,
            "invalid",
        ),
    ];
    for (raw, label) in cases {
        let err = editor.import_json(raw).unwrap_err();
        let matched = match (&err, label) {
            (EditorError::Codec(CodecError::Json(_)), "json") => true,
            (EditorError::Codec(CodecError::MissingVersion), "missing") => true,
            (EditorError::Codec(CodecError::UnsupportedVersion(9)), "unsupported") => true,
            (EditorError::Codec(CodecError::Invalid(_)), "invalid") => true,
            _ => false,
        };
        assert!(matched, "{label}: unexpected error {err}");
        assert_eq!(editor.scene().entity_count(), entities_before);
    }
}

#[test]
fn export_skips_twins_and_background() {
    let mut editor = editor(1000);
    editor.create_season_entry(&season(10, 10)).unwrap();
    let marks = editor
        .scene()
        .entities()
        .filter(|(_, visual)| visual.kind == EntityKind::BackgroundMark)
        .count();
    assert!(marks > 0);

    let document = editor.export();
    assert_eq!(document.season_entries.len(), 1);
    assert!(document.text_entries.is_empty());
}
