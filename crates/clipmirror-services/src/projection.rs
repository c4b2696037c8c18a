//! Building clip projections from the host, and writing notes back

use std::sync::Arc;

use clipmirror_core::{
    parse_extended_notes, parse_legacy_notes, ClipId, ClipProjection, ClipTiming, HostValue,
    MirrorError, NoteRecord,
};

use crate::error::{Result, ServiceError};
use crate::handle::EntityHandle;
use crate::host::HostApi;

fn prop_f64(handle: &EntityHandle, property: &'static str) -> Result<f64> {
    handle
        .get(property)
        .first()
        .and_then(HostValue::as_f64)
        .ok_or(ServiceError::Core(MirrorError::MissingProperty(property)))
}

/// Reads one clip's snapshot (identity, timing, notes) and builds its
/// projection. Also returns the raw extracted notes for the transient
/// store. Fails on a stale clip id, a missing timing property, or a
/// malformed note payload; the caller skips the clip and moves on.
pub fn build_projection(
    host: &Arc<dyn HostApi>,
    clip_id: ClipId,
) -> Result<(ClipProjection, Vec<NoteRecord>)> {
    let handle = EntityHandle::bind_id(host.clone(), clip_id.0);
    if !handle.is_bound() {
        return Err(ServiceError::TargetNotFound(format!("id {}", clip_id.0)));
    }

    let name = handle.name();
    let muted = prop_f64(&handle, "muted")? != 0.0;
    let timing = ClipTiming {
        start_time: prop_f64(&handle, "start_time")?,
        end_time: prop_f64(&handle, "end_time")?,
        start_marker: prop_f64(&handle, "start_marker")?,
        end_marker: prop_f64(&handle, "end_marker")?,
        looping: prop_f64(&handle, "looping")? != 0.0,
        loop_start: prop_f64(&handle, "loop_start")?,
        loop_end: prop_f64(&handle, "loop_end")?,
    };
    let length = prop_f64(&handle, "length")?;

    // Extraction over the full pitch range and the clip's full local span
    let args = [
        HostValue::from("from_pitch"),
        HostValue::Int(0),
        HostValue::from("pitch_span"),
        HostValue::Int(128),
        HostValue::from("from_time"),
        HostValue::Float(0.0),
        HostValue::from("time_span"),
        HostValue::Float(length),
    ];
    let result = handle.call("get_notes_extended", &args);

    let raw = match result.first() {
        // Extended payload: a single JSON document
        Some(HostValue::Str(s)) if s.trim_start().starts_with('{') => parse_extended_notes(s)?,
        // Anything else must be the legacy count/terminator framing
        _ => parse_legacy_notes(&result)?,
    };

    let projection = ClipProjection::build(clip_id, name, muted, timing, raw.clone());
    Ok((projection, raw))
}

/// Replaces a clip's entire note content, framing the transfer the way
/// the host expects: select all, then `notes <count>`, one `note` call
/// per record, `done`. Field values are clamped here, at the point of
/// transmission.
pub fn replace_all_notes(
    host: &Arc<dyn HostApi>,
    clip_id: ClipId,
    notes: &[NoteRecord],
) -> Result<()> {
    let handle = EntityHandle::bind_id(host.clone(), clip_id.0);
    if !handle.is_bound() {
        return Err(ServiceError::TargetNotFound(format!("id {}", clip_id.0)));
    }

    handle.call("select_all_notes", &[]);
    handle.call("replace_selected_notes", &[]);
    handle.call("notes", &[HostValue::Int(notes.len() as i64)]);
    for note in notes {
        handle.call("note", &note.to_host_values());
    }
    handle.call("done", &[]);
    Ok(())
}
