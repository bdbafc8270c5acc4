//! Object identifiers.
//!
//! IDs are interned names. Fresh ones look like `<kind>_<serial>` and draw
//! the serial from one session-wide sequence. Names that arrive from
//! outside (a loaded document, a restored snapshot) are *adopted*: the
//! sequence moves past their serial, so a fresh ID never repeats one that
//! is already in a document.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Next serial handed out by [`ObjectId::allocate`]. Only moves forward.
static NEXT_SERIAL: AtomicU64 = AtomicU64::new(0);

/// Identifier of a canvas object. `Copy`, compares by interned key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(Spur);

impl ObjectId {
    /// Look up (or intern) a name without touching the serial sequence.
    /// Use this for lookups coming from the host, e.g. a clicked object.
    pub fn intern(name: &str) -> Self {
        ObjectId(NAMES.get_or_intern(name))
    }

    /// A fresh `<kind>_<serial>` ID that no allocated or adopted ID shares.
    pub fn allocate(kind: &str) -> Self {
        let serial = NEXT_SERIAL.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{kind}_{serial}"))
    }

    /// Accept a name from a document and reserve its serial, if it has one.
    pub fn adopt(name: &str) -> Self {
        if let Some(serial) = serial_of(name) {
            NEXT_SERIAL.fetch_max(serial.saturating_add(1), Ordering::Relaxed);
        }
        Self::intern(name)
    }

    pub fn as_str(&self) -> &str {
        NAMES.resolve(&self.0)
    }

    /// Numeric suffix of a `<kind>_<serial>` name.
    pub fn serial(&self) -> Option<u64> {
        serial_of(self.as_str())
    }
}

fn serial_of(name: &str) -> Option<u64> {
    let (kind, digits) = name.rsplit_once('_')?;
    if kind.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectId").field(&self.as_str()).finish()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Every decoded ID is adopted, so documents and snapshots reserve theirs.
impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ObjectId::adopt(&name))
    }
}
