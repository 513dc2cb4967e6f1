use std::collections::BTreeSet;
use yearstrip_core::timeline::placement::{
    place_season, place_textbox, SeasonLayout, TextboxLayout,
};
use yearstrip_core::{
    CalendarEditor, EditorConfig, EditorError, EntityKind, EntityRef, Scene, Side, Viewport,
};

fn layout(x: i64, y: i64) -> SeasonLayout {
    SeasonLayout {
        title: "Frost".to_string(),
        color: "#aabbcc".to_string(),
        x,
        y,
        width_px: 120,
    }
}

#[test]
fn deleting_title_removes_whole_season_exactly_once() {
    let mut scene = Scene::new();
    let placed = place_season(&mut scene, &layout(100, 40), 1000).unwrap();
    let removed = scene.remove_entity(EntityRef::primal(placed.title)).unwrap();

    assert_eq!(removed.len(), 6);
    let unique: BTreeSet<_> = removed.iter().copied().collect();
    assert_eq!(unique.len(), 6);
    assert_eq!(scene.relation_count(), 0);
    assert!(scene.is_empty());
}

#[test]
fn any_member_or_copy_removes_the_same_set() {
    for pick in 0..6 {
        let mut scene = Scene::new();
        let placed = place_season(&mut scene, &layout(500, 0), 1000).unwrap();
        let pair = [placed.title, placed.duration, placed.resizer][pick % 3];
        let side = if pick < 3 { Side::Primal } else { Side::Twin };

        let removed = scene.remove_entity(EntityRef::new(pair, side)).unwrap();
        let pairs: BTreeSet<_> = removed.iter().map(|entity| entity.pair).collect();
        assert_eq!(
            pairs,
            BTreeSet::from([placed.title, placed.duration, placed.resizer])
        );
    }
}

#[test]
fn cyclic_relations_terminate() {
    let mut scene = Scene::new();
    let placed = place_season(&mut scene, &layout(0, 0), 1000).unwrap();
    scene.relate(placed.resizer, placed.title).unwrap();

    let removed = scene.remove_entity(EntityRef::primal(placed.duration)).unwrap();
    assert_eq!(removed.len(), 6);
    assert_eq!(scene.relation_count(), 0);
}

#[test]
fn unrelated_entities_survive() {
    let mut scene = Scene::new();
    let doomed = place_season(&mut scene, &layout(0, 0), 1000).unwrap();
    let kept = place_season(&mut scene, &layout(300, 80), 1000).unwrap();
    let note = place_textbox(
        &mut scene,
        &TextboxLayout {
            text: "keep me".to_string(),
            color: "black".to_string(),
            x: 50,
            y: 200,
            width_px: 100,
            height_px: 40,
        },
        Viewport::new(1000, 400),
    );

    scene.remove_entity(EntityRef::primal(doomed.title)).unwrap();

    assert_eq!(scene.entity_count(), 8);
    assert_eq!(scene.relation_count(), 2);
    assert!(scene.contains(kept.title));
    assert!(scene.contains(note));
    assert!(scene
        .relation_edges()
        .all(|(a, b)| scene.contains(a) && scene.contains(b)));
}

#[test]
fn removing_twice_reports_unknown_pair() {
    let mut scene = Scene::new();
    let placed = place_season(&mut scene, &layout(0, 0), 1000).unwrap();
    scene.remove_entity(EntityRef::primal(placed.title)).unwrap();

    assert!(scene.remove_entity(EntityRef::primal(placed.title)).is_err());
}

#[test]
fn editor_refuses_to_delete_background_marks() {
    let mut editor = CalendarEditor::new(EditorConfig::default(), 1000, None);
    let (mark, _) = editor
        .scene()
        .entities()
        .find(|(_, visual)| visual.kind == EntityKind::BackgroundMark)
        .unwrap();

    let err = editor.remove_entity(mark).unwrap_err();
    assert!(matches!(err, EditorError::NotEditable(entity) if entity == mark));
}
