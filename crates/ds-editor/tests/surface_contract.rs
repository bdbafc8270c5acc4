//! Integration tests: the history against a surface other than `Canvas`.
//!
//! `FlakySurface` wraps a canvas and can be told to reject restores, which
//! exercises the history's failure path.

use ds_core::*;
use ds_editor::{Editor, HistoryManager};
use pretty_assertions::assert_eq;

struct FlakySurface {
    inner: Canvas,
    reject_restores: bool,
    restores: usize,
}

impl FlakySurface {
    fn new() -> Self {
        Self {
            inner: Canvas::new(300, 200, Color::WHITE),
            reject_restores: false,
            restores: 0,
        }
    }
}

impl DocumentSurface for FlakySurface {
    fn serialize(&self) -> Snapshot {
        self.inner.serialize()
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SurfaceError> {
        if self.reject_restores {
            return Err(Snapshot::from_json("").decode().unwrap_err());
        }
        self.restores += 1;
        self.inner.restore(snapshot)
    }

    fn add_object(&mut self, object: CanvasObject) -> ObjectId {
        self.inner.add_object(object)
    }

    fn remove_active_object(&mut self) -> bool {
        self.inner.remove_active_object()
    }

    fn set_active_object_fill(&mut self, color: Color) -> bool {
        self.inner.set_active_object_fill(color)
    }

    fn set_background(&mut self, color: Color) {
        self.inner.set_background(color);
    }

    fn active_object(&self) -> Option<&CanvasObject> {
        self.inner.active_object()
    }

    fn set_active_object(&mut self, id: Option<ObjectId>) -> bool {
        self.inner.set_active_object(id)
    }

    fn set_mutation_listener(&mut self, listener: MutationListener) {
        self.inner.set_mutation_listener(listener);
    }
}

#[test]
fn editor_works_over_any_surface() {
    let mut editor = Editor::with_surface(FlakySurface::new(), EditorConfig::default());
    editor.add_shape(ShapeKind::Polygon);
    editor.add_text();
    assert_eq!(editor.surface().inner.len(), 2);

    editor.undo().unwrap();
    assert_eq!(editor.surface().inner.len(), 1);
    assert_eq!(editor.surface().restores, 1);
}

#[test]
fn rejected_undo_leaves_stacks_unchanged() {
    let mut surface = FlakySurface::new();
    let mut history = HistoryManager::new(surface.serialize());
    surface.add_object(CanvasObject::new(ObjectKind::text(), 0.0, 0.0));
    history.record_mutation(&surface);
    let live = surface.serialize();

    surface.reject_restores = true;
    assert!(history.undo(&mut surface).is_err());
    assert_eq!(history.undo_depth(), 1);
    assert_eq!(history.redo_depth(), 0);
    assert_eq!(surface.serialize(), live);

    surface.reject_restores = false;
    assert!(history.undo(&mut surface).unwrap());
    assert!(surface.inner.is_empty());
}

#[test]
fn rejected_redo_leaves_stacks_unchanged() {
    let mut surface = FlakySurface::new();
    let mut history = HistoryManager::new(surface.serialize());
    surface.add_object(CanvasObject::new(ObjectKind::text(), 0.0, 0.0));
    history.record_mutation(&surface);
    history.undo(&mut surface).unwrap();

    surface.reject_restores = true;
    assert!(history.redo(&mut surface).is_err());
    assert_eq!(history.undo_depth(), 0);
    assert_eq!(history.redo_depth(), 1);

    surface.reject_restores = false;
    assert!(history.redo(&mut surface).unwrap());
    assert_eq!(surface.inner.len(), 1);
}

#[test]
fn undo_captures_live_state_before_restoring() {
    // A change the history never heard about must still be reachable by redo.
    let mut surface = FlakySurface::new();
    let mut history = HistoryManager::new(surface.serialize());
    surface.add_object(CanvasObject::new(ObjectKind::text(), 0.0, 0.0));
    history.record_mutation(&surface);

    surface.set_background(Color::BLACK);
    let unrecorded = surface.serialize();

    history.undo(&mut surface).unwrap();
    assert_eq!(surface.inner.background(), Color::WHITE);
    history.redo(&mut surface).unwrap();
    assert_eq!(surface.serialize(), unrecorded);
}
