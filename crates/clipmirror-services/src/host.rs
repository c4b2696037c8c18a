//! Capability boundary to the host's live object graph
//!
//! Everything the mirror knows about the host goes through [`HostApi`]:
//! get/set by node, counted child enumeration, method calls, and
//! notification registrations. The host's own semantics leak through on
//! purpose: a missing target is an empty result or a silent no-op, never
//! an error.

use clipmirror_core::HostValue;

/// Identity of one node in the host graph, stable within a session.
/// `NONE` is the host's null-target sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

impl NodeId {
    pub const NONE: NodeId = NodeId(0);

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Handle to one notification registration on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

pub trait HostApi: Send + Sync {
    /// Resolves a structural path; `None` if no such node exists.
    fn resolve_path(&self, path: &str) -> Option<NodeId>;

    /// Resolves a raw numeric identity; `None` if stale or unknown.
    fn resolve_id(&self, id: u64) -> Option<NodeId>;

    /// Current structural path of a node; empty for a missing node.
    fn path_of(&self, node: NodeId) -> String;

    /// Property read; empty on an absent property or missing node.
    fn get(&self, node: NodeId, property: &str) -> Vec<HostValue>;

    /// Property write; silent no-op on a missing node.
    fn set(&self, node: NodeId, property: &str, values: &[HostValue]);

    fn child_count(&self, node: NodeId, collection: &str) -> usize;

    /// Flat child list; may interleave marker tokens with numeric ids.
    fn children(&self, node: NodeId, collection: &str) -> Vec<HostValue>;

    /// Invokes a host method and returns its flat result list.
    fn call(&self, node: NodeId, method: &str, args: &[HostValue]) -> Vec<HostValue>;

    /// Registers a notification on (node, property). `None` on a missing
    /// node, mirroring the silent-miss convention.
    fn observe(&self, node: NodeId, property: &str) -> Option<SubscriptionId>;

    /// Retargets a registration to the null identity, detaching it.
    fn unobserve(&self, sub: SubscriptionId);
}
