//! Load-time parameters supplied by the hosting environment

use serde::{Deserialize, Serialize};

/// The two construction-time parameters: where the hosting device lives
/// in the graph, and the name of the transient note store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Structural path of the track containing the hosting device
    pub device_context: String,
    /// Storage handle name for the transient note cache
    pub store_name: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            device_context: "this_device canonical_parent".to_string(),
            store_name: "clip_notes".to_string(),
        }
    }
}
