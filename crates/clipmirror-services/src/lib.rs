//! clipmirror-services: Host boundary, arrangement cache, and change bridge

mod bridge;
mod cache;
mod config;
mod error;
mod handle;
mod host;
mod projection;
mod store;

#[cfg(test)]
mod testing;

pub use bridge::ChangeBridge;
pub use cache::ArrangementCache;
pub use config::MirrorConfig;
pub use error::{Result, ServiceError};
pub use handle::EntityHandle;
pub use host::{HostApi, NodeId, SubscriptionId};
pub use projection::{build_projection, replace_all_notes};
pub use store::NoteStore;
