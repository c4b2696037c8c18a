//! In-memory host graph used by the service tests

use std::collections::HashMap;
use std::sync::Mutex;

use clipmirror_core::{ClipTiming, HostValue};

use crate::host::{HostApi, NodeId, SubscriptionId};

#[derive(Default)]
struct MockNode {
    path: String,
    props: HashMap<String, Vec<HostValue>>,
    children: HashMap<String, Vec<HostValue>>,
    call_results: HashMap<String, Vec<HostValue>>,
    calls: Vec<(String, Vec<HostValue>)>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    next_sub: u64,
    nodes: HashMap<u64, MockNode>,
    subscriptions: HashMap<u64, (NodeId, String)>,
    unobserve_count: usize,
}

/// Fake host graph: nodes with properties, flat child lists in the
/// host's `id <n>` pair encoding, canned call results, and a call log.
pub struct MockHost {
    inner: Mutex<Inner>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                next_sub: 1,
                ..Inner::default()
            }),
        }
    }

    pub fn add_node(&self, path: &str, props: &[(&str, &[HostValue])]) -> NodeId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        let node = MockNode {
            path: path.to_string(),
            props: props
                .iter()
                .map(|(name, values)| (name.to_string(), values.to_vec()))
                .collect(),
            ..MockNode::default()
        };
        inner.nodes.insert(id, node);
        NodeId(id)
    }

    /// Adds a clip node with the full property snapshot, an extended
    /// note payload, and an `id <n>` entry in the track's child list.
    pub fn add_clip(
        &self,
        track: NodeId,
        name: &str,
        timing: ClipTiming,
        notes_json: &str,
    ) -> NodeId {
        let clip = self.add_node(
            &format!("live_set tracks 0 arrangement_clips {name}"),
            &[
                ("name", &[name.into()]),
                ("muted", &[HostValue::Int(0)]),
                ("start_time", &[HostValue::Float(timing.start_time)]),
                ("end_time", &[HostValue::Float(timing.end_time)]),
                ("start_marker", &[HostValue::Float(timing.start_marker)]),
                ("end_marker", &[HostValue::Float(timing.end_marker)]),
                ("looping", &[HostValue::Int(timing.looping as i64)]),
                ("loop_start", &[HostValue::Float(timing.loop_start)]),
                ("loop_end", &[HostValue::Float(timing.loop_end)]),
                (
                    "length",
                    &[HostValue::Float(timing.end_marker - timing.start_marker)],
                ),
            ],
        );
        self.set_call_result(clip, "get_notes_extended", vec![notes_json.into()]);

        let mut inner = self.inner.lock().unwrap();
        if let Some(node) = inner.nodes.get_mut(&track.0) {
            let list = node.children.entry("arrangement_clips".to_string()).or_default();
            list.push("id".into());
            list.push(HostValue::Int(clip.0 as i64));
        }
        clip
    }

    pub fn remove_clip(&self, track: NodeId, clip: NodeId) {
        let mut inner = self.inner.lock().unwrap();
        inner.nodes.remove(&clip.0);
        if let Some(node) = inner.nodes.get_mut(&track.0) {
            if let Some(list) = node.children.get_mut("arrangement_clips") {
                let kept: Vec<HostValue> = list
                    .chunks(2)
                    .filter(|pair| pair.get(1).and_then(HostValue::as_i64) != Some(clip.0 as i64))
                    .flatten()
                    .cloned()
                    .collect();
                *list = kept;
            }
        }
    }

    pub fn set_children(&self, node: NodeId, collection: &str, values: Vec<HostValue>) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(node) = inner.nodes.get_mut(&node.0) {
            node.children.insert(collection.to_string(), values);
        }
    }

    pub fn set_call_result(&self, node: NodeId, method: &str, result: Vec<HostValue>) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(node) = inner.nodes.get_mut(&node.0) {
            node.call_results.insert(method.to_string(), result);
        }
    }

    pub fn calls(&self, node: NodeId) -> Vec<(String, Vec<HostValue>)> {
        let inner = self.inner.lock().unwrap();
        inner
            .nodes
            .get(&node.0)
            .map(|n| n.calls.clone())
            .unwrap_or_default()
    }

    pub fn active_subscriptions(&self) -> usize {
        self.inner.lock().unwrap().subscriptions.len()
    }

    pub fn unobserve_count(&self) -> usize {
        self.inner.lock().unwrap().unobserve_count
    }

    pub fn is_observed(&self, node: NodeId, property: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .subscriptions
            .values()
            .any(|(n, p)| *n == node && p == property)
    }
}

impl HostApi for MockHost {
    fn resolve_path(&self, path: &str) -> Option<NodeId> {
        let inner = self.inner.lock().unwrap();
        inner
            .nodes
            .iter()
            .find(|(_, node)| node.path == path)
            .map(|(id, _)| NodeId(*id))
    }

    fn resolve_id(&self, id: u64) -> Option<NodeId> {
        let inner = self.inner.lock().unwrap();
        inner.nodes.contains_key(&id).then_some(NodeId(id))
    }

    fn path_of(&self, node: NodeId) -> String {
        let inner = self.inner.lock().unwrap();
        inner
            .nodes
            .get(&node.0)
            .map(|n| n.path.clone())
            .unwrap_or_default()
    }

    fn get(&self, node: NodeId, property: &str) -> Vec<HostValue> {
        let inner = self.inner.lock().unwrap();
        inner
            .nodes
            .get(&node.0)
            .and_then(|n| n.props.get(property).cloned())
            .unwrap_or_default()
    }

    fn set(&self, node: NodeId, property: &str, values: &[HostValue]) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(n) = inner.nodes.get_mut(&node.0) {
            n.props.insert(property.to_string(), values.to_vec());
        }
    }

    fn child_count(&self, node: NodeId, collection: &str) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .nodes
            .get(&node.0)
            .and_then(|n| n.children.get(collection))
            .map(|list| list.iter().filter(|v| v.as_i64().is_some()).count())
            .unwrap_or(0)
    }

    fn children(&self, node: NodeId, collection: &str) -> Vec<HostValue> {
        let inner = self.inner.lock().unwrap();
        inner
            .nodes
            .get(&node.0)
            .and_then(|n| n.children.get(collection).cloned())
            .unwrap_or_default()
    }

    fn call(&self, node: NodeId, method: &str, args: &[HostValue]) -> Vec<HostValue> {
        let mut inner = self.inner.lock().unwrap();
        match inner.nodes.get_mut(&node.0) {
            Some(n) => {
                n.calls.push((method.to_string(), args.to_vec()));
                n.call_results.get(method).cloned().unwrap_or_default()
            }
            None => Vec::new(),
        }
    }

    fn observe(&self, node: NodeId, property: &str) -> Option<SubscriptionId> {
        if node.is_none() {
            return None;
        }
        let mut inner = self.inner.lock().unwrap();
        if !inner.nodes.contains_key(&node.0) {
            return None;
        }
        let sub = inner.next_sub;
        inner.next_sub += 1;
        inner
            .subscriptions
            .insert(sub, (node, property.to_string()));
        Some(SubscriptionId(sub))
    }

    fn unobserve(&self, sub: SubscriptionId) {
        let mut inner = self.inner.lock().unwrap();
        if inner.subscriptions.remove(&sub.0).is_some() {
            inner.unobserve_count += 1;
        }
    }
}
