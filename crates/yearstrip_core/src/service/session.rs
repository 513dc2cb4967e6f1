//! Input-facing editor session state.
//!
//! Holds the tool mode, the current color, the selection and the pointer
//! gesture in progress, and turns raw pointer, wheel and scrollbar input into
//! `CalendarEditor` calls. Gestures end on pointer-up; there is no cancel.

use super::editor_service::{CalendarEditor, EditorResult};
use crate::model::document::validate_color;
use crate::model::entity::{EntityKind, EntityRef, PairId};
use crate::timeline::scroll::{thumb_delta, DragTracker};

/// Active toolbar tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Select, pan and resize.
    #[default]
    Point,
    /// Click to place a season bar.
    Bar,
    /// Click to place a textbox.
    Text,
    /// Click to delete.
    Erase,
}

/// Gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    /// Dragging empty strip to scroll.
    Panning(DragTracker),
    /// Dragging a duration bar's resizer.
    Resizing(EntityRef),
    /// Dragging the scrollbar thumb.
    Thumb {
        tracker: DragTracker,
        track_width: i64,
    },
}

/// What one input event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Nothing,
    Scrolled(i64),
    Selected(EntityRef),
    PlacedSeason(PairId),
    PlacedTextbox(PairId),
    Removed(Vec<EntityRef>),
    Resized(i64),
}

/// Session context for one editor view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    mode: EditorMode,
    color: String,
    selected: Option<EntityRef>,
    pointer: PointerState,
}

impl EditorSession {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            mode: EditorMode::default(),
            color: color.into(),
            selected: None,
            pointer: PointerState::Idle,
        }
    }

    /// Starts a session with the editor's configured default color.
    pub fn for_editor(editor: &CalendarEditor) -> Self {
        Self::new(editor.config().default_color.clone())
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switches tool. Any gesture in progress ends.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        self.pointer = PointerState::Idle;
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Sets the color used for new placements.
    pub fn set_color(&mut self, color: impl Into<String>) -> EditorResult<()> {
        let color = color.into();
        validate_color(&color)?;
        self.color = color;
        Ok(())
    }

    pub fn selected(&self) -> Option<EntityRef> {
        self.selected
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn pointer_down(
        &mut self,
        editor: &mut CalendarEditor,
        x: i64,
        y: i64,
    ) -> EditorResult<InputOutcome> {
        match self.mode {
            EditorMode::Point => {
                let hit = editor
                    .scene()
                    .hit_test(x, y)
                    .map(|entity| (entity, editor.scene().kind_of(entity.pair)));
                match hit {
                    Some((entity, Some(EntityKind::Resizer))) => {
                        self.pointer = PointerState::Resizing(entity);
                        Ok(InputOutcome::Nothing)
                    }
                    Some((entity, _)) => {
                        self.selected = Some(entity);
                        Ok(InputOutcome::Selected(entity))
                    }
                    None => {
                        self.selected = None;
                        self.pointer = PointerState::Panning(DragTracker::begin(x));
                        Ok(InputOutcome::Nothing)
                    }
                }
            }
            EditorMode::Bar => {
                let placed = editor.place_season_at(x, y, &self.color)?;
                self.selected = Some(EntityRef::primal(placed.title));
                Ok(InputOutcome::PlacedSeason(placed.title))
            }
            EditorMode::Text => {
                let textbox = editor.place_textbox_at(x, y, &self.color)?;
                self.selected = Some(EntityRef::primal(textbox));
                Ok(InputOutcome::PlacedTextbox(textbox))
            }
            EditorMode::Erase => {
                let Some(entity) = editor.scene().hit_test(x, y) else {
                    return Ok(InputOutcome::Nothing);
                };
                let removed = editor.remove_entity(entity)?;
                if self
                    .selected
                    .is_some_and(|selected| removed.contains(&selected))
                {
                    self.selected = None;
                }
                Ok(InputOutcome::Removed(removed))
            }
        }
    }

    pub fn pointer_move(
        &mut self,
        editor: &mut CalendarEditor,
        x: i64,
        _y: i64,
    ) -> EditorResult<InputOutcome> {
        match &mut self.pointer {
            PointerState::Idle => Ok(InputOutcome::Nothing),
            PointerState::Panning(tracker) => {
                let delta = tracker.sample(x);
                editor.scroll_by(delta);
                Ok(InputOutcome::Scrolled(delta))
            }
            PointerState::Resizing(handle) => {
                let width = editor.resize_duration_to_pointer(*handle, x)?;
                Ok(InputOutcome::Resized(width))
            }
            PointerState::Thumb {
                tracker,
                track_width,
            } => Ok(drag_thumb(editor, tracker, *track_width, x)),
        }
    }

    /// Ends whatever gesture is in progress.
    pub fn pointer_up(&mut self) {
        self.pointer = PointerState::Idle;
    }

    pub fn wheel(&mut self, editor: &mut CalendarEditor, wheel_dy: f64) -> InputOutcome {
        InputOutcome::Scrolled(editor.wheel(wheel_dy))
    }

    /// Grabs the scrollbar thumb at `x` on a track `track_width` wide.
    pub fn thumb_down(&mut self, x: i64, track_width: i64) {
        self.pointer = PointerState::Thumb {
            tracker: DragTracker::begin(x),
            track_width,
        };
    }

    /// Moves a grabbed scrollbar thumb to `x`.
    ///
    /// Does nothing unless a thumb drag is in progress.
    pub fn thumb_move(&mut self, editor: &mut CalendarEditor, x: i64) -> InputOutcome {
        match &mut self.pointer {
            PointerState::Thumb {
                tracker,
                track_width,
            } => drag_thumb(editor, tracker, *track_width, x),
            _ => InputOutcome::Nothing,
        }
    }

    /// Deletes the selected entity, if any.
    pub fn remove_selected(&mut self, editor: &mut CalendarEditor) -> EditorResult<InputOutcome> {
        match self.selected.take() {
            Some(entity) => Ok(InputOutcome::Removed(editor.remove_entity(entity)?)),
            None => Ok(InputOutcome::Nothing),
        }
    }

    /// Forgets selection and gesture, e.g. after a scene reset.
    pub fn clear(&mut self) {
        self.selected = None;
        self.pointer = PointerState::Idle;
    }
}

fn drag_thumb(
    editor: &mut CalendarEditor,
    tracker: &mut DragTracker,
    track_width: i64,
    x: i64,
) -> InputOutcome {
    let delta = thumb_delta(tracker.sample(x), track_width, editor.doc_width());
    editor.scroll_by(delta);
    InputOutcome::Scrolled(delta)
}
