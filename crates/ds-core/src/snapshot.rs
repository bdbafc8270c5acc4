//! Immutable, text-encoded document snapshots.
//!
//! A snapshot is the full JSON encoding of a [`Document`]: objects in
//! z-order with geometry and styling, plus the background. Snapshots are
//! shared `Arc<str>`s, so moving one between the undo and redo stacks never
//! copies the text.

use crate::error::SurfaceError;
use crate::model::Document;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Snapshot(Arc<str>);

impl Snapshot {
    /// Encode a document.
    pub fn capture(document: &Document) -> Self {
        // Document holds only string-keyed, finite data, so encoding cannot
        // fail. An empty snapshot would surface later as a decode error.
        let json = serde_json::to_string(document).unwrap_or_else(|err| {
            log::error!("snapshot encode failed: {err}");
            String::new()
        });
        Snapshot(json.into())
    }

    /// Decode back into a document.
    pub fn decode(&self) -> Result<Document, SurfaceError> {
        Ok(serde_json::from_str(&self.0)?)
    }

    /// Wrap externally produced JSON (e.g. a document loaded by the host).
    pub fn from_json(json: impl Into<Arc<str>>) -> Self {
        Snapshot(json.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 48;
        match self.0.char_indices().nth(PREVIEW) {
            Some((cut, _)) => write!(f, "Snapshot({}…, {} bytes)", &self.0[..cut], self.0.len()),
            None => write!(f, "Snapshot({})", &self.0),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
