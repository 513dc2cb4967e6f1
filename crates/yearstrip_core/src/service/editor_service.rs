//! Calendar editor use-case service.
//!
//! # Responsibility
//! - Own one scene together with its scroll state and viewport.
//! - Expose the operations UI glue calls: scroll, place, resize, edit,
//!   delete, export, import, save.
//!
//! # Invariants
//! - Imports either fully replace the scene or leave it untouched.
//! - A viewport change rebuilds the scene from a fresh export.
//! - A failed save is returned to the caller, never reported as success.

use crate::codec::{
    decode_document, encode_document, export_scene, import_document, place_season_entry,
    place_text_entry, CodecError, ImportSummary,
};
use crate::config::EditorConfig;
use crate::model::document::{
    calendar_id_from_query, fresh_calendar_id, validate_color, CalendarDocument,
    DocumentValidationError, SeasonEntry, TextEntry,
};
use crate::model::entity::{EntityKind, EntityRef, PairId, TwinnedAttribute};
use crate::repo::document_repo::{DocumentSink, StoreError};
use crate::timeline::coords::{day_to_pixel, snap_row, wrap_x, Viewport, ROW_SPACING_PX};
use crate::timeline::placement::{
    self, populate_background, SeasonLayout, SeasonPlacement, TextboxLayout,
};
use crate::timeline::scene::{Scene, SceneError};
use crate::timeline::scroll::{thumb_delta, wheel_delta, ScrollEngine};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EditorResult<T> = Result<T, EditorError>;

/// Errors from editor operations.
#[derive(Debug)]
pub enum EditorError {
    Scene(SceneError),
    Codec(CodecError),
    Store(StoreError),
    /// Operation does not apply to this kind of entity.
    NotEditable(EntityRef),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scene(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "save failed: {err}"),
            Self::NotEditable(entity) => write!(f, "{entity} cannot be edited this way"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Scene(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotEditable(_) => None,
        }
    }
}

impl From<SceneError> for EditorError {
    fn from(value: SceneError) -> Self {
        Self::Scene(value)
    }
}

impl From<CodecError> for EditorError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

impl From<DocumentValidationError> for EditorError {
    fn from(value: DocumentValidationError) -> Self {
        Self::Codec(CodecError::Invalid(value))
    }
}

impl From<StoreError> for EditorError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// One open calendar: scene, scroll state, viewport and document identity.
#[derive(Debug)]
pub struct CalendarEditor {
    scene: Scene,
    scroll: ScrollEngine,
    viewport: Viewport,
    config: EditorConfig,
    name: String,
    id: String,
}

impl CalendarEditor {
    /// Opens an empty calendar `doc_width` pixels wide.
    ///
    /// A missing id is replaced with a fresh UUID.
    pub fn new(config: EditorConfig, doc_width: i64, id: Option<String>) -> Self {
        let viewport = Viewport::new(doc_width, config.scene_height);
        let mut editor = Self {
            scene: Scene::new(),
            scroll: ScrollEngine::new(),
            viewport,
            config,
            name: String::new(),
            id: id.unwrap_or_else(fresh_calendar_id),
        };
        editor.lay_background();
        editor
    }

    /// Opens an empty calendar using the `id` of a page query string.
    pub fn from_query(config: EditorConfig, doc_width: i64, query: &str) -> Self {
        Self::new(config, doc_width, calendar_id_from_query(query))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn doc_width(&self) -> i64 {
        self.viewport.doc_width()
    }

    pub fn scroll_offset(&self) -> i64 {
        self.scroll.offset()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn scroll_by(&mut self, delta: i64) {
        self.scroll
            .scroll_by(&mut self.scene, delta, self.viewport.doc_width());
    }

    /// Scrolls one fixed wheel step in the wheel's direction.
    pub fn wheel(&mut self, wheel_dy: f64) -> i64 {
        let delta = wheel_delta(wheel_dy, self.config.wheel_step_px);
        self.scroll_by(delta);
        delta
    }

    /// Scrolls for a scrollbar thumb movement over a track `track_width` wide.
    pub fn thumb_scroll(&mut self, thumb_dx: i64, track_width: i64) -> i64 {
        let delta = thumb_delta(thumb_dx, track_width, self.viewport.doc_width());
        self.scroll_by(delta);
        delta
    }

    /// Places a season given in day space.
    pub fn create_season_entry(&mut self, entry: &SeasonEntry) -> EditorResult<SeasonPlacement> {
        validate_color(&entry.color)?;
        let placed =
            place_season_entry(&mut self.scene, entry, self.scroll.offset(), self.viewport)?;
        debug!(
            "event=season_create module=editor status=ok title_pair={} start_day={} duration_days={}",
            placed.title, entry.start_day, entry.duration_days
        );
        Ok(placed)
    }

    /// Places a textbox given in day and row space.
    pub fn create_text_entry(&mut self, entry: &TextEntry) -> EditorResult<PairId> {
        validate_color(&entry.color)?;
        Ok(place_text_entry(
            &mut self.scene,
            entry,
            self.scroll.offset(),
            self.viewport,
        ))
    }

    /// Places a default-length season bar under a pointer.
    pub fn place_season_at(&mut self, x: i64, y: i64, color: &str) -> EditorResult<SeasonPlacement> {
        validate_color(color)?;
        let doc_width = self.viewport.doc_width();
        let layout = SeasonLayout {
            title: self.config.default_season_title.clone(),
            color: color.to_string(),
            x: wrap_x(x, doc_width),
            y: snap_row(y, self.viewport.scene_height()),
            width_px: day_to_pixel(self.config.default_season_days as f64, doc_width),
        };
        Ok(placement::place_season(&mut self.scene, &layout, doc_width)?)
    }

    /// Places an empty default-size textbox under a pointer.
    pub fn place_textbox_at(&mut self, x: i64, y: i64, color: &str) -> EditorResult<PairId> {
        validate_color(color)?;
        let doc_width = self.viewport.doc_width();
        let layout = TextboxLayout {
            text: String::new(),
            color: color.to_string(),
            x: wrap_x(x, doc_width),
            y: snap_row(y, self.viewport.scene_height()),
            width_px: day_to_pixel(self.config.default_text_days as f64, doc_width),
            height_px: self.config.default_text_rows.max(1) * ROW_SPACING_PX,
        };
        Ok(placement::place_textbox(&mut self.scene, &layout, self.viewport))
    }

    /// Sets the width of the duration bar belonging to any season member.
    pub fn resize_duration(&mut self, member: PairId, requested_width: i64) -> EditorResult<i64> {
        let duration = placement::duration_of(&self.scene, member)?;
        Ok(placement::resize_duration(
            &mut self.scene,
            duration,
            requested_width,
            self.viewport.doc_width(),
        )?)
    }

    /// Adds `delta` pixels to a season's current bar width.
    pub fn resize_duration_by(&mut self, member: PairId, delta: i64) -> EditorResult<i64> {
        let duration = placement::duration_of(&self.scene, member)?;
        Ok(placement::resize_duration_by(
            &mut self.scene,
            duration,
            delta,
            self.viewport.doc_width(),
        )?)
    }

    /// Drags the grabbed copy's bar end to `pointer_x`.
    pub fn resize_duration_to_pointer(
        &mut self,
        grabbed: EntityRef,
        pointer_x: i64,
    ) -> EditorResult<i64> {
        Ok(placement::resize_duration_to_pointer(
            &mut self.scene,
            grabbed,
            pointer_x,
            self.viewport.doc_width(),
        )?)
    }

    /// Mirrors a native textbox resize to its twin.
    pub fn resize_textbox(
        &mut self,
        textbox: PairId,
        width_px: i64,
        height_px: i64,
    ) -> EditorResult<(i64, i64)> {
        Ok(placement::resize_textbox(
            &mut self.scene,
            textbox,
            width_px,
            height_px,
            self.viewport,
        )?)
    }

    /// Replaces the text of a textbox or season title on both copies.
    pub fn edit_text(&mut self, entity: EntityRef, text: impl Into<String>) -> EditorResult<()> {
        match self.scene.kind_of(entity.pair) {
            Some(EntityKind::Textbox) | Some(EntityKind::SeasonTitle) => {}
            Some(_) => return Err(EditorError::NotEditable(entity)),
            None => return Err(SceneError::UnknownPair(entity.pair).into()),
        }
        self.scene
            .apply_twinned_attribute(entity, &TwinnedAttribute::Text(text.into()))?;
        Ok(())
    }

    /// Recolors an entity; a season member recolors its whole bar.
    pub fn set_color(&mut self, entity: EntityRef, color: &str) -> EditorResult<()> {
        validate_color(color)?;
        let kind = self
            .scene
            .kind_of(entity.pair)
            .ok_or(SceneError::UnknownPair(entity.pair))?;

        let targets = match kind {
            EntityKind::Textbox => vec![entity.pair],
            EntityKind::SeasonTitle | EntityKind::SeasonDuration | EntityKind::Resizer => {
                let duration = placement::duration_of(&self.scene, entity.pair)?;
                let mut targets = vec![duration];
                targets.extend(
                    self.scene
                        .related_of_kind(duration, EntityKind::SeasonTitle),
                );
                targets
            }
            EntityKind::BackgroundMark => return Err(EditorError::NotEditable(entity)),
        };

        let attribute = TwinnedAttribute::Color(color.to_string());
        for pair in targets {
            self.scene
                .apply_twinned_attribute(EntityRef::primal(pair), &attribute)?;
        }
        Ok(())
    }

    /// Deletes an entity, its twin and every related entity.
    pub fn remove_entity(&mut self, entity: EntityRef) -> EditorResult<Vec<EntityRef>> {
        if self.scene.kind_of(entity.pair) == Some(EntityKind::BackgroundMark) {
            return Err(EditorError::NotEditable(entity));
        }
        Ok(self.scene.remove_entity(entity)?)
    }

    /// Projects the scene into a resolution-independent document.
    pub fn export(&self) -> CalendarDocument {
        export_scene(
            &self.scene,
            self.scroll.offset(),
            self.viewport.doc_width(),
            &self.name,
            &self.id,
        )
    }

    pub fn export_json(&self) -> EditorResult<String> {
        Ok(encode_document(&self.export())?)
    }

    /// Replaces the scene with the document's entries.
    ///
    /// The document's name and non-empty id become the editor's. Validation runs
    /// before the scene is cleared.
    pub fn import(&mut self, document: &CalendarDocument) -> EditorResult<ImportSummary> {
        document.validate()?;
        self.rebuild(document)
    }

    /// Decodes any known schema version, then imports it.
    pub fn import_json(&mut self, json: &str) -> EditorResult<ImportSummary> {
        let document = decode_document(json)?;
        self.import(&document)
    }

    /// Empties the scene, keeping name, id and scroll offset.
    pub fn reset(&mut self) {
        self.scene.clear();
        self.lay_background();
        info!("event=scene_reset module=editor status=ok");
    }

    /// Re-lays the scene for a new viewport size.
    pub fn resize_viewport(&mut self, doc_width: i64, scene_height: i64) -> EditorResult<()> {
        let snapshot = self.export();
        let previous = self.viewport.doc_width();
        self.viewport = Viewport::new(doc_width, scene_height);
        self.rebuild(&snapshot)?;
        info!(
            "event=viewport_resize module=editor status=ok from_width={} to_width={}",
            previous,
            self.viewport.doc_width()
        );
        Ok(())
    }

    /// Writes the current export to `sink` once.
    pub fn save(&self, sink: &dyn DocumentSink) -> EditorResult<CalendarDocument> {
        let document = self.export();
        match sink.save_document(&document) {
            Ok(()) => {
                info!(
                    "event=document_save module=editor status=ok seasons={} texts={}",
                    document.season_entries.len(),
                    document.text_entries.len()
                );
                Ok(document)
            }
            Err(err) => {
                error!(
                    "event=document_save module=editor status=error error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    fn rebuild(&mut self, document: &CalendarDocument) -> EditorResult<ImportSummary> {
        self.scene.clear();
        self.lay_background();
        let summary = import_document(
            &mut self.scene,
            document,
            self.scroll.offset(),
            self.viewport,
        )?;
        self.name = document.name.clone();
        if !document.id.is_empty() {
            self.id = document.id.clone();
        }
        info!(
            "event=scene_import module=editor status=ok seasons={} texts={} doc_width={}",
            summary.seasons.len(),
            summary.textboxes.len(),
            self.viewport.doc_width()
        );
        Ok(summary)
    }

    fn lay_background(&mut self) {
        if self.config.background_marks {
            populate_background(&mut self.scene, self.scroll.offset(), self.viewport);
        }
    }
}
