//! Arrangement cache: the ordered clip projections of the bound track

use std::sync::Arc;

use clipmirror_core::{ClipId, ClipProjection, ProjectionEvent};
use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use crate::error::{Result, ServiceError};
use crate::handle::EntityHandle;
use crate::host::HostApi;
use crate::projection::build_projection;
use crate::store::NoteStore;

/// Owns the clip projections for the currently bound track. Every change
/// notification triggers a full rebuild: no diffing, the whole list is
/// replaced and re-published as `Clear` followed by one `AddClip` per
/// clip. A failed rebuild leaves the previous list in place.
pub struct ArrangementCache {
    host: Arc<dyn HostApi>,
    track: Option<EntityHandle>,
    clip_ids: Vec<ClipId>,
    projections: Vec<ClipProjection>,
    events: Sender<ProjectionEvent>,
    store: NoteStore,
}

impl ArrangementCache {
    pub fn new(
        host: Arc<dyn HostApi>,
        events: Sender<ProjectionEvent>,
        store_name: impl Into<String>,
    ) -> Self {
        Self {
            host,
            track: None,
            clip_ids: Vec::new(),
            projections: Vec::new(),
            events,
            store: NoteStore::new(store_name),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.track.is_some()
    }

    pub fn track(&self) -> Option<&EntityHandle> {
        self.track.as_ref()
    }

    pub fn clip_ids(&self) -> &[ClipId] {
        &self.clip_ids
    }

    pub fn projections(&self) -> &[ClipProjection] {
        &self.projections
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Rebinds to a new track and rebuilds immediately.
    pub fn bind(&mut self, track: EntityHandle) -> Result<()> {
        info!(path = track.path(), "track bound");
        self.track = Some(track);
        self.rebuild()
    }

    /// Drops the binding and all cached state. The released handle tears
    /// down its registrations on drop.
    pub fn release(&mut self) {
        if let Some(mut track) = self.track.take() {
            track.release();
        }
        self.clip_ids.clear();
        self.projections.clear();
        self.store.clear();
    }

    /// Full-replace rebuild: re-reads the clip identity list, rebuilds
    /// every projection, then publishes the new list. One bad clip is
    /// skipped; it never aborts the refresh.
    pub fn rebuild(&mut self) -> Result<()> {
        let track = self.track.as_ref().ok_or(ServiceError::NotBound)?;
        let ids: Vec<ClipId> = track
            .child_ids("arrangement_clips")
            .into_iter()
            .map(ClipId)
            .collect();

        self.store.clear();
        let mut projections = Vec::with_capacity(ids.len());
        for clip_id in &ids {
            match build_projection(&self.host, *clip_id) {
                Ok((projection, raw)) => {
                    self.store.insert(*clip_id, raw);
                    projections.push(projection);
                }
                Err(err) => {
                    warn!(clip = clip_id.0, %err, "skipping clip");
                }
            }
        }

        self.clip_ids = ids;
        self.projections = projections;
        self.publish();

        info!(clips = self.projections.len(), "arrangement rebuilt");
        Ok(())
    }

    fn publish(&self) {
        if self.events.send(ProjectionEvent::Clear).is_err() {
            debug!("projection consumer gone, publish dropped");
            return;
        }
        for projection in &self.projections {
            let _ = self.events.send(ProjectionEvent::AddClip(projection.clone()));
        }
    }
}
