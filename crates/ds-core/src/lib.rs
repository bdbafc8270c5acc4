pub mod color;
pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod snapshot;
pub mod surface;
pub mod svg;

pub use color::{Color, ColorParseError};
pub use config::EditorConfig;
pub use error::SurfaceError;
pub use id::ObjectId;
pub use model::*;
pub use snapshot::Snapshot;
pub use surface::{Canvas, DocumentSurface, MutationKind, MutationListener};
pub use svg::render_svg;
