//! WASM bridge — exposes the editor to the browser toolbar.
//!
//! Compiled via `wasm-pack build --target web`. The page owns layout and
//! drawing; it forwards button clicks, color-picker values, uploaded file
//! bytes and key events here, and re-reads the document JSON afterwards.

use ds_core::{Color, DocumentSurface, EditorConfig, ObjectId, ShapeKind, Snapshot};
use ds_editor::{Editor, ShortcutMap};
use wasm_bindgen::prelude::*;

/// The JS-facing editor handle.
#[wasm_bindgen]
pub struct StudioCanvas {
    editor: Editor,
}

#[wasm_bindgen]
impl StudioCanvas {
    /// Create an editor with a blank canvas of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        console_error_panic_hook_setup();
        let config = EditorConfig {
            canvas_width: width,
            canvas_height: height,
            ..EditorConfig::default()
        };
        Self {
            editor: Editor::with_config(config),
        }
    }

    /// Create an editor from a JSON `EditorConfig` (missing fields default).
    pub fn with_config(config_json: &str) -> Result<StudioCanvas, JsValue> {
        console_error_panic_hook_setup();
        let config: EditorConfig = serde_json::from_str(config_json).map_err(to_js_error)?;
        Ok(Self {
            editor: Editor::with_config(config),
        })
    }

    /// Add a text block; returns its ID.
    pub fn add_text(&mut self) -> String {
        self.editor.add_text().as_str().to_string()
    }

    /// Add a shape by palette name ("Rectangle", "Circle", …).
    /// Returns the new ID, or `undefined` for an unknown shape.
    pub fn add_shape(&mut self, name: &str) -> Option<String> {
        let kind = name.parse::<ShapeKind>().ok()?;
        Some(self.editor.add_shape(kind).as_str().to_string())
    }

    /// Add an uploaded image (raw file bytes). Throws on undecodable data.
    pub fn upload_image(&mut self, bytes: &[u8]) -> Result<String, JsValue> {
        let id = self.editor.import_image(bytes).map_err(to_js_error)?;
        Ok(id.as_str().to_string())
    }

    pub fn delete_selected(&mut self) -> bool {
        self.editor.delete_selected()
    }

    /// Apply a picker color to the palette and the selected object.
    pub fn set_object_color(&mut self, color: &str) -> Result<bool, JsValue> {
        let color = Color::parse(color).map_err(to_js_error)?;
        Ok(self.editor.change_object_color(color))
    }

    pub fn set_background(&mut self, color: &str) -> Result<(), JsValue> {
        let color = Color::parse(color).map_err(to_js_error)?;
        self.editor.change_background(color);
        Ok(())
    }

    /// Current palette color as `#rrggbb`.
    pub fn selected_color(&self) -> String {
        self.editor.selected_color().to_hex()
    }

    pub fn select(&mut self, id: &str) -> bool {
        self.editor.select(ObjectId::intern(id))
    }

    pub fn clear_selection(&mut self) {
        self.editor.clear_selection();
    }

    /// ID of the selected object, if any.
    pub fn selected_id(&self) -> Option<String> {
        self.editor
            .surface()
            .active_object()
            .map(|o| o.id.as_str().to_string())
    }

    /// Move an object (e.g. at the end of a drag). One undo step.
    pub fn move_object(&mut self, id: &str, dx: f32, dy: f32) -> bool {
        self.editor.move_object(ObjectId::intern(id), dx, dy)
    }

    pub fn begin_gesture(&mut self) {
        self.editor.begin_gesture();
    }

    pub fn end_gesture(&mut self) {
        self.editor.end_gesture();
    }

    pub fn save(&mut self) {
        self.editor.save_checkpoint();
    }

    pub fn undo(&mut self) -> Result<bool, JsValue> {
        self.editor.undo().map_err(to_js_error)
    }

    pub fn redo(&mut self) -> Result<bool, JsValue> {
        self.editor.redo().map_err(to_js_error)
    }

    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    /// Start a blank document and drop all history.
    pub fn new_document(&mut self) -> Result<(), JsValue> {
        self.editor.new_document().map_err(to_js_error)
    }

    /// Load a document from its JSON snapshot and drop all history.
    pub fn load_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.editor
            .load_document(Snapshot::from_json(json))
            .map_err(to_js_error)
    }

    /// The document as JSON (the same encoding history snapshots use).
    pub fn to_json(&self) -> String {
        self.editor.surface().serialize().as_str().to_string()
    }

    pub fn export_svg(&self) -> String {
        self.editor.export_svg()
    }

    /// Handle a key event. Returns the triggered action's name, or
    /// `undefined` if the combo is unbound.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> Result<Option<String>, JsValue> {
        let Some(action) = ShortcutMap::resolve(key, ctrl, shift, alt, meta) else {
            return Ok(None);
        };
        log::debug!("shortcut {key} -> {action:?}");
        self.editor.dispatch(action).map_err(to_js_error)?;
        Ok(Some(action.name().to_string()))
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Design Studio WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone helpers (no canvas needed) ───────────────────────────────

/// Normalize a color string to `#rrggbb`. Returns `undefined` if invalid.
#[wasm_bindgen]
pub fn normalize_color(input: &str) -> Option<String> {
    Color::parse(input).ok().map(|c| c.to_hex())
}

/// The shape palette names, in toolbar order, as a JSON array.
#[wasm_bindgen]
pub fn shape_names() -> String {
    let names: Vec<&str> = ShapeKind::ALL.iter().map(|k| k.name()).collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}
