//! Inbound and outbound event types

use serde::{Deserialize, Serialize};

use crate::clip::ClipProjection;

/// Signals flowing from the host into the bridge loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostSignal {
    /// The bound track's arrangement-clip collection changed membership.
    /// Carries no data; the bridge re-queries the child list itself.
    ArrangementChanged,
    /// The hosting device moved to a different track
    Rebind { track_path: String },
    Shutdown,
}

/// One rebuild publishes `Clear` followed by one `AddClip` per clip,
/// in track order. Consumers never observe a partial list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectionEvent {
    Clear,
    AddClip(ClipProjection),
}
