//! The document surface: the live, mutable object model behind the canvas.
//!
//! [`DocumentSurface`] is the contract the history and editor layers talk
//! to. It produces and consumes [`Snapshot`]s and exposes a handful of
//! mutation primitives. After every add/modify/remove it fires its single
//! mutation listener; restores and background changes do not fire it.
//!
//! [`Canvas`] is the in-memory implementation.

use crate::color::Color;
use crate::config::EditorConfig;
use crate::error::SurfaceError;
use crate::id::ObjectId;
use crate::model::{CanvasObject, Document};
use crate::snapshot::Snapshot;
use crate::svg::render_svg;
use std::fmt;

/// What changed in the object graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Added(ObjectId),
    Modified(ObjectId),
    Removed(ObjectId),
}

/// The one callback a surface notifies after a mutation completes.
pub type MutationListener = Box<dyn FnMut(MutationKind)>;

pub trait DocumentSurface {
    /// Complete, order-preserving encoding of the current state.
    fn serialize(&self) -> Snapshot;

    /// Replace all objects and the background with those in `snapshot`.
    /// On error the surface is left untouched.
    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SurfaceError>;

    /// Add an object on top. Returns the ID it is stored under, which is
    /// a fresh one if the object's own ID is already on the surface.
    fn add_object(&mut self, object: CanvasObject) -> ObjectId;

    /// Remove the selected object. Returns `false` if nothing is selected.
    fn remove_active_object(&mut self) -> bool;

    /// Recolor the selected object. Returns `false` if nothing is selected.
    fn set_active_object_fill(&mut self, color: Color) -> bool;

    fn set_background(&mut self, color: Color);

    fn active_object(&self) -> Option<&CanvasObject>;

    /// Select an object (`None` clears the selection). Returns `false` if
    /// `id` names no object on the surface.
    fn set_active_object(&mut self, id: Option<ObjectId>) -> bool;

    /// Register the mutation listener, replacing any previous one.
    fn set_mutation_listener(&mut self, listener: MutationListener);
}

// ─── Canvas ──────────────────────────────────────────────────────────────

pub struct Canvas {
    document: Document,
    active: Option<ObjectId>,
    listener: Option<MutationListener>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self::from_document(Document::new(width, height, background))
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.canvas_width, config.canvas_height, config.background)
    }

    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            active: None,
            listener: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn objects(&self) -> &[CanvasObject] {
        &self.document.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.document.get(id)
    }

    pub fn len(&self) -> usize {
        self.document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    pub fn background(&self) -> Color {
        self.document.background
    }

    /// Edit an object in place (move, resize, retext) and notify.
    /// Returns `false` if `id` is unknown.
    pub fn modify_object(&mut self, id: ObjectId, edit: impl FnOnce(&mut CanvasObject)) -> bool {
        let Some(object) = self.document.get_mut(id) else {
            return false;
        };
        edit(object);
        self.notify(MutationKind::Modified(id));
        true
    }

    /// SVG rendering of the current document, for the download action.
    pub fn export_svg(&self) -> String {
        render_svg(&self.document)
    }

    fn notify(&mut self, kind: MutationKind) {
        log::trace!("surface mutation: {kind:?}");
        if let Some(listener) = self.listener.as_mut() {
            listener(kind);
        }
    }
}

impl DocumentSurface for Canvas {
    fn serialize(&self) -> Snapshot {
        Snapshot::capture(&self.document)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SurfaceError> {
        let document = snapshot.decode()?;
        self.document = document;
        if let Some(id) = self.active
            && !self.document.contains(id)
        {
            self.active = None;
        }
        Ok(())
    }

    fn add_object(&mut self, object: CanvasObject) -> ObjectId {
        let id = self.document.insert(object);
        self.notify(MutationKind::Added(id));
        id
    }

    fn remove_active_object(&mut self) -> bool {
        let Some(id) = self.active.take() else {
            return false;
        };
        if self.document.remove(id).is_none() {
            return false;
        }
        self.notify(MutationKind::Removed(id));
        true
    }

    fn set_active_object_fill(&mut self, color: Color) -> bool {
        let Some(id) = self.active else {
            return false;
        };
        self.modify_object(id, |object| object.paint(color))
    }

    fn set_background(&mut self, color: Color) {
        self.document.background = color;
    }

    fn active_object(&self) -> Option<&CanvasObject> {
        self.active.and_then(|id| self.document.get(id))
    }

    fn set_active_object(&mut self, id: Option<ObjectId>) -> bool {
        match id {
            Some(id) if !self.document.contains(id) => false,
            _ => {
                self.active = id;
                true
            }
        }
    }

    fn set_mutation_listener(&mut self, listener: MutationListener) {
        self.listener = Some(listener);
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("document", &self.document)
            .field("active", &self.active)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}
