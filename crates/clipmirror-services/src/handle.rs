//! Entity handles: local proxies for one host graph node

use std::sync::Arc;

use clipmirror_core::HostValue;
use tracing::debug;

use crate::host::{HostApi, NodeId, SubscriptionId};

/// Proxy for one host node: identity, structural path, uniform property
/// access, and at most one notification registration per property.
///
/// Binding follows the host's no-op-on-missing-target convention: a bind
/// against a node that does not exist leaves the handle at the `NONE`
/// sentinel instead of failing.
pub struct EntityHandle {
    host: Arc<dyn HostApi>,
    id: NodeId,
    path: String,
    subscriptions: Vec<(String, SubscriptionId)>,
}

impl EntityHandle {
    /// Binds to a structural path.
    pub fn bind_path(host: Arc<dyn HostApi>, path: &str) -> Self {
        let mut handle = Self::unbound(host);
        handle.set_path(path);
        handle
    }

    /// Binds to a raw numeric identity.
    pub fn bind_id(host: Arc<dyn HostApi>, id: u64) -> Self {
        let mut handle = Self::unbound(host);
        handle.set_id(id);
        handle
    }

    fn unbound(host: Arc<dyn HostApi>) -> Self {
        Self {
            host,
            id: NodeId::NONE,
            path: String::new(),
            subscriptions: Vec::new(),
        }
    }

    /// Retargets the handle; identity and path are refreshed together.
    pub fn set_path(&mut self, path: &str) {
        match self.host.resolve_path(path) {
            Some(node) => self.refresh(node),
            None => self.refresh(NodeId::NONE),
        }
    }

    pub fn set_id(&mut self, id: u64) {
        match self.host.resolve_id(id) {
            Some(node) => self.refresh(node),
            None => self.refresh(NodeId::NONE),
        }
    }

    fn refresh(&mut self, node: NodeId) {
        self.id = node;
        self.path = if node.is_none() {
            String::new()
        } else {
            self.host.path_of(node)
        };
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_bound(&self) -> bool {
        !self.id.is_none()
    }

    /// Property read; empty when the handle is unbound or the property
    /// is absent. Callers must tolerate the empty case.
    pub fn get(&self, property: &str) -> Vec<HostValue> {
        if self.id.is_none() {
            return Vec::new();
        }
        self.host.get(self.id, property)
    }

    pub fn set(&self, property: &str, values: &[HostValue]) {
        if self.id.is_none() {
            return;
        }
        self.host.set(self.id, property, values);
    }

    pub fn name(&self) -> String {
        self.get("name")
            .first()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    pub fn call(&self, method: &str, args: &[HostValue]) -> Vec<HostValue> {
        if self.id.is_none() {
            return Vec::new();
        }
        self.host.call(self.id, method, args)
    }

    /// Ordered integer identities of a named child collection. The host
    /// interleaves marker tokens with the ids; non-numeric entries are
    /// skipped.
    pub fn child_ids(&self, collection: &str) -> Vec<u64> {
        if self.id.is_none() {
            return Vec::new();
        }
        if self.host.child_count(self.id, collection) == 0 {
            return Vec::new();
        }
        self.host
            .children(self.id, collection)
            .iter()
            .filter_map(HostValue::as_i64)
            .filter(|id| *id >= 0)
            .map(|id| id as u64)
            .collect()
    }

    /// Toggles the notification registration for one property. Enabling
    /// an already-enabled subscription, or disabling an absent one, is a
    /// no-op; at most one live registration per property.
    pub fn subscribe(&mut self, property: &str, active: bool) {
        let existing = self
            .subscriptions
            .iter()
            .position(|(prop, _)| prop == property);

        match (active, existing) {
            (true, None) => {
                if let Some(sub) = self.host.observe(self.id, property) {
                    self.subscriptions.push((property.to_string(), sub));
                    debug!(path = %self.path, property, "subscription created");
                }
            }
            (false, Some(idx)) => {
                let (_, sub) = self.subscriptions.remove(idx);
                self.host.unobserve(sub);
                debug!(path = %self.path, property, "subscription removed");
            }
            _ => {}
        }
    }

    pub fn is_subscribed(&self, property: &str) -> bool {
        self.subscriptions.iter().any(|(prop, _)| prop == property)
    }

    /// Detaches every registration, then invalidates identity. Safe to
    /// call more than once.
    pub fn release(&mut self) {
        while let Some((property, sub)) = self.subscriptions.pop() {
            self.host.unobserve(sub);
            debug!(path = %self.path, property, "subscription released");
        }
        self.id = NodeId::NONE;
        self.path.clear();
    }
}

impl Drop for EntityHandle {
    fn drop(&mut self) {
        self.release();
    }
}
