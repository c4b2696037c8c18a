//! clipmirror-core: Domain types for the arrangement-clip mirror

mod clip;
mod error;
mod event;
mod note;
mod value;

pub use clip::{ClipId, ClipProjection, ClipTiming, ProjectedNote};
pub use error::{MirrorError, Result};
pub use event::{HostSignal, ProjectionEvent};
pub use note::{parse_extended_notes, parse_legacy_notes, NoteRecord, MIN_DURATION};
pub use value::HostValue;
