//! Editor: toolbar actions wired to the document surface and the history.
//!
//! The editor owns the surface and registers itself as the surface's only
//! mutation listener. The listener just raises a pending flag; each action
//! drains it once, so one user action becomes one undo step no matter how
//! the surface reports it. Hosts that mutate the surface directly (drags,
//! text edits) call [`Editor::sync`] afterwards.

use crate::history::HistoryManager;
use crate::import::{ImportError, decode_image};
use crate::shortcuts::ShortcutAction;
use ds_core::{
    Canvas, CanvasObject, Color, Document, DocumentSurface, EditorConfig, ObjectId, ObjectKind,
    ShapeKind, Snapshot, SurfaceError,
};
use std::cell::Cell;
use std::rc::Rc;

pub struct Editor<S: DocumentSurface = Canvas> {
    surface: S,
    history: HistoryManager,
    config: EditorConfig,
    /// Palette color applied to new objects and shown in the picker.
    selected_color: Color,
    /// Raised by the mutation listener, drained by `commit`.
    pending: Rc<Cell<bool>>,
}

impl Editor<Canvas> {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self::with_surface(Canvas::from_config(&config), config)
    }

    /// Move an object by `(dx, dy)` as one undo step.
    pub fn move_object(&mut self, id: ObjectId, dx: f32, dy: f32) -> bool {
        let moved = self.surface.modify_object(id, |object| {
            object.left += dx;
            object.top += dy;
        });
        self.commit();
        moved
    }

    /// SVG of the current document for the download action.
    pub fn export_svg(&self) -> String {
        self.surface.export_svg()
    }
}

impl Default for Editor<Canvas> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DocumentSurface> Editor<S> {
    /// Take ownership of `surface`; its current state is the history baseline.
    pub fn with_surface(mut surface: S, config: EditorConfig) -> Self {
        let pending = Rc::new(Cell::new(false));
        let flag = Rc::clone(&pending);
        surface.set_mutation_listener(Box::new(move |kind| {
            log::trace!("mutation notified: {kind:?}");
            flag.set(true);
        }));
        let history = HistoryManager::with_capacity(surface.serialize(), config.history_depth);

        Self {
            surface,
            history,
            selected_color: config.object_color,
            config,
            pending,
        }
    }

    // ─── Insert ──────────────────────────────────────────────────────────

    /// Add an editable text block in the palette color and select it.
    pub fn add_text(&mut self) -> ObjectId {
        let origin = self.config.text_origin;
        let object =
            CanvasObject::new(ObjectKind::text(), origin.x, origin.y).with_fill(self.selected_color);
        self.insert_selected(object)
    }

    /// Add a palette shape in the palette color and select it.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ObjectId {
        let origin = self.config.shape_origin;
        let object = CanvasObject::new(ObjectKind::shape(kind), origin.x, origin.y);
        let object = if kind == ShapeKind::Line {
            object.with_stroke(self.selected_color, self.config.line_width)
        } else {
            object.with_fill(self.selected_color)
        };
        self.insert_selected(object)
    }

    /// Decode an uploaded image and add it scaled to the configured width.
    ///
    /// The history step is taken only after the image is on the surface; a
    /// rejected upload changes nothing and records nothing.
    pub fn import_image(&mut self, bytes: &[u8]) -> Result<ObjectId, ImportError> {
        let image = decode_image(bytes, self.config.image_width)
            .inspect_err(|err| log::warn!("image upload rejected: {err}"))?;
        let id = self
            .surface
            .add_object(CanvasObject::new(image.into_kind(), 0.0, 0.0));
        self.commit();
        Ok(id)
    }

    // ─── Edit ────────────────────────────────────────────────────────────

    /// Delete the selected object. No selection: no-op, no history entry.
    pub fn delete_selected(&mut self) -> bool {
        let removed = self.surface.remove_active_object();
        self.commit();
        removed
    }

    /// Set the palette color and recolor the selected object, if any.
    /// Returns `true` if an object was recolored.
    pub fn change_object_color(&mut self, color: Color) -> bool {
        self.selected_color = color;
        let changed = self.surface.set_active_object_fill(color);
        self.commit();
        changed
    }

    /// Change the background. The surface does not notify for background
    /// changes, so this records its own undo step.
    pub fn change_background(&mut self, color: Color) {
        self.commit();
        self.surface.set_background(color);
        self.history.record_mutation(&self.surface);
    }

    /// Select an object and pick up its color in the palette.
    pub fn select(&mut self, id: ObjectId) -> bool {
        if !self.surface.set_active_object(Some(id)) {
            return false;
        }
        if let Some(color) = self.surface.active_object().and_then(CanvasObject::display_color) {
            self.selected_color = color;
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.surface.set_active_object(None);
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Explicit "Save" checkpoint.
    pub fn save_checkpoint(&mut self) {
        self.pending.set(false);
        self.history.record_mutation(&self.surface);
    }

    pub fn undo(&mut self) -> Result<bool, SurfaceError> {
        self.commit();
        self.history.undo(&mut self.surface)
    }

    pub fn redo(&mut self) -> Result<bool, SurfaceError> {
        self.commit();
        self.history.redo(&mut self.surface)
    }

    /// Start a gesture whose mutations collapse into one undo step.
    pub fn begin_gesture(&mut self) {
        self.commit();
        self.history.begin_batch();
    }

    pub fn end_gesture(&mut self) {
        self.commit();
        self.history.end_batch(&self.surface);
    }

    /// Record any mutation the host applied directly to the surface.
    /// Returns `true` if a step was recorded.
    pub fn sync(&mut self) -> bool {
        self.commit()
    }

    /// Replace the document with `snapshot` and start a fresh history.
    pub fn load_document(&mut self, snapshot: Snapshot) -> Result<(), SurfaceError> {
        self.pending.set(false);
        self.history.reset(&mut self.surface, snapshot)
    }

    /// Start an empty document sized and colored per the config.
    pub fn new_document(&mut self) -> Result<(), SurfaceError> {
        let blank = Document::new(
            self.config.canvas_width,
            self.config.canvas_height,
            self.config.background,
        );
        self.load_document(Snapshot::capture(&blank))?;
        self.selected_color = self.config.object_color;
        Ok(())
    }

    /// Run a shortcut action. Returns `true` if the document changed.
    pub fn dispatch(&mut self, action: ShortcutAction) -> Result<bool, SurfaceError> {
        match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::SaveCheckpoint => {
                self.save_checkpoint();
                Ok(false)
            }
            ShortcutAction::Delete => Ok(self.delete_selected()),
            ShortcutAction::Deselect => {
                self.clear_selection();
                Ok(false)
            }
            ShortcutAction::AddText => {
                self.add_text();
                Ok(true)
            }
            ShortcutAction::AddShape(kind) => {
                self.add_shape(kind);
                Ok(true)
            }
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct access for host-driven edits; follow up with [`sync`](Self::sync).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selected_color(&self) -> Color {
        self.selected_color
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn insert_selected(&mut self, object: CanvasObject) -> ObjectId {
        let id = self.surface.add_object(object);
        self.surface.set_active_object(Some(id));
        self.commit();
        id
    }

    /// Record one step if the surface notified since the last commit.
    fn commit(&mut self) -> bool {
        if !self.pending.replace(false) {
            return false;
        }
        self.history.record_mutation(&self.surface);
        true
    }
}
