//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s, so the browser
//! shell only forwards `KeyboardEvent`s and never hard-codes bindings.

use ds_core::ShapeKind;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── History ──
    Undo,
    Redo,
    SaveCheckpoint,

    // ── Edit ──
    Delete,
    Deselect,

    // ── Insert ──
    AddText,
    AddShape(ShapeKind),
}

impl ShortcutAction {
    /// Stable camelCase name for the JS side.
    pub fn name(self) -> &'static str {
        match self {
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::SaveCheckpoint => "save",
            ShortcutAction::Delete => "delete",
            ShortcutAction::Deselect => "deselect",
            ShortcutAction::AddText => "addText",
            ShortcutAction::AddShape(ShapeKind::Rectangle) => "addRectangle",
            ShortcutAction::AddShape(ShapeKind::Circle) => "addCircle",
            ShortcutAction::AddShape(ShapeKind::Triangle) => "addTriangle",
            ShortcutAction::AddShape(ShapeKind::Line) => "addLine",
            ShortcutAction::AddShape(ShapeKind::Polygon) => "addPolygon",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘; elsewhere `ctrl` plays the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the combo has no binding.
    pub fn resolve(key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "s" | "S" => Some(ShortcutAction::SaveCheckpoint),
                _ => None,
            };
        }

        if shift || alt {
            return None;
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            "t" | "T" => Some(ShortcutAction::AddText),
            "r" | "R" => Some(ShortcutAction::AddShape(ShapeKind::Rectangle)),
            "o" | "O" => Some(ShortcutAction::AddShape(ShapeKind::Circle)),
            "l" | "L" => Some(ShortcutAction::AddShape(ShapeKind::Line)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_redo_bindings() {
        assert_eq!(ShortcutMap::resolve("z", true, false, false, false), Some(ShortcutAction::Undo));
        assert_eq!(ShortcutMap::resolve("z", false, false, false, true), Some(ShortcutAction::Undo));
        assert_eq!(ShortcutMap::resolve("Z", true, true, false, false), Some(ShortcutAction::Redo));
        assert_eq!(ShortcutMap::resolve("y", true, false, false, false), Some(ShortcutAction::Redo));
        assert_eq!(
            ShortcutMap::resolve("s", false, false, false, true),
            Some(ShortcutAction::SaveCheckpoint)
        );
    }

    #[test]
    fn plain_keys() {
        assert_eq!(ShortcutMap::resolve("Delete", false, false, false, false), Some(ShortcutAction::Delete));
        assert_eq!(
            ShortcutMap::resolve("Backspace", false, false, false, false),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("r", false, false, false, false),
            Some(ShortcutAction::AddShape(ShapeKind::Rectangle))
        );
        assert_eq!(ShortcutMap::resolve("Escape", false, false, false, false), Some(ShortcutAction::Deselect));
    }

    #[test]
    fn unbound_combos() {
        assert_eq!(ShortcutMap::resolve("q", false, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("r", false, true, false, false), None);
        assert_eq!(ShortcutMap::resolve("x", true, false, false, false), None);
    }

    #[test]
    fn names_are_camel_case() {
        assert_eq!(ShortcutAction::AddShape(ShapeKind::Circle).name(), "addCircle");
        assert_eq!(ShortcutAction::SaveCheckpoint.name(), "save");
    }
}
