pub mod editor;
pub mod history;
pub mod import;
pub mod shortcuts;

pub use editor::Editor;
pub use history::{HistoryManager, SnapshotStack};
pub use import::{ImportError, ImportedImage, decode_image};
pub use shortcuts::{ShortcutAction, ShortcutMap};
