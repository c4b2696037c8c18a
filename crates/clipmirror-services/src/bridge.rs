//! Change notification bridge and its consumer loop

use std::sync::Arc;

use clipmirror_core::{HostSignal, ProjectionEvent};
use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info, warn};

use crate::cache::ArrangementCache;
use crate::config::MirrorConfig;
use crate::error::{Result, ServiceError};
use crate::handle::EntityHandle;
use crate::host::HostApi;

/// Owns exactly one live subscription on the bound track's
/// arrangement-clip collection and feeds the arrangement cache.
///
/// Signals arriving before `init()` completes are dropped. Rebinding
/// tears down the old subscription before creating the new one, so at
/// most one registration is live at any time. Signals queued while a
/// rebuild runs collapse into one follow-up rebuild; rebuilds never
/// interleave.
pub struct ChangeBridge {
    host: Arc<dyn HostApi>,
    config: MirrorConfig,
    cache: ArrangementCache,
    signals: Receiver<HostSignal>,
    initialised: bool,
}

impl ChangeBridge {
    pub fn new(
        host: Arc<dyn HostApi>,
        config: MirrorConfig,
        signals: Receiver<HostSignal>,
        events: Sender<ProjectionEvent>,
    ) -> Self {
        let cache = ArrangementCache::new(host.clone(), events, config.store_name.clone());
        Self {
            host,
            config,
            cache,
            signals,
            initialised: false,
        }
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    pub fn cache(&self) -> &ArrangementCache {
        &self.cache
    }

    /// Binds the device-context track, subscribes, and runs the first
    /// rebuild. Only after this returns are change signals honored.
    pub fn init(&mut self) -> Result<()> {
        let path = self.config.device_context.clone();
        self.bind_track(&path)?;
        self.initialised = true;
        info!(track = %path, "bridge initialised");
        Ok(())
    }

    /// Rebinds to a different track: old subscription torn down first,
    /// then a fresh handle, subscription, and immediate rebuild.
    fn bind_track(&mut self, path: &str) -> Result<()> {
        self.cache.release();

        let mut track = EntityHandle::bind_path(self.host.clone(), path);
        if !track.is_bound() {
            return Err(ServiceError::TargetNotFound(path.to_string()));
        }
        track.subscribe("arrangement_clips", true);
        self.cache.bind(track)
    }

    /// Consumes signals until `Shutdown`.
    pub fn run(&mut self) {
        while let Ok(signal) = self.signals.recv() {
            if !self.dispatch(signal) {
                break;
            }
        }
    }

    /// Drains whatever is queued right now, without blocking. Returns
    /// false once `Shutdown` was seen.
    pub fn pump(&mut self) -> bool {
        while let Ok(signal) = self.signals.try_recv() {
            if !self.dispatch(signal) {
                return false;
            }
        }
        true
    }

    fn dispatch(&mut self, signal: HostSignal) -> bool {
        match signal {
            HostSignal::ArrangementChanged => {
                if !self.initialised {
                    debug!("change signal before initialisation, dropped");
                    return true;
                }

                // Collapse a queued burst into a single rebuild; a signal
                // of another kind ends the burst and is handled after.
                let mut deferred = None;
                while let Ok(next) = self.signals.try_recv() {
                    match next {
                        HostSignal::ArrangementChanged => {}
                        other => {
                            deferred = Some(other);
                            break;
                        }
                    }
                }

                if let Err(err) = self.cache.rebuild() {
                    warn!(%err, "rebuild failed, previous projections retained");
                }

                match deferred {
                    Some(signal) => self.dispatch(signal),
                    None => true,
                }
            }
            HostSignal::Rebind { track_path } => {
                if !self.initialised {
                    debug!("rebind signal before initialisation, dropped");
                    return true;
                }
                if let Err(err) = self.bind_track(&track_path) {
                    warn!(%err, track = %track_path, "rebind failed");
                }
                true
            }
            HostSignal::Shutdown => {
                self.release();
                false
            }
        }
    }

    /// Unsubscribes and discards all cached state. Later signals are
    /// treated as stale and dropped.
    pub fn release(&mut self) {
        self.cache.release();
        self.initialised = false;
        info!("bridge released");
    }
}
