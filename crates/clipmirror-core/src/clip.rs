//! Clip projections: normalized snapshots of one arrangement clip

use serde::{Deserialize, Serialize};

use crate::note::NoteRecord;

/// Unique identifier for clips (stable within a host session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub u64);

/// Timing fields of one clip, read from the host in a single snapshot pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipTiming {
    /// Absolute timeline position where the clip begins
    pub start_time: f64,
    /// Absolute timeline position where the clip ends
    pub end_time: f64,
    /// Clip-local offset where playback starts
    pub start_marker: f64,
    /// Clip-local offset where playback stops
    pub end_marker: f64,
    pub looping: bool,
    pub loop_start: f64,
    pub loop_end: f64,
}

impl ClipTiming {
    /// Absolute timeline position of a note at `local_start`, composing
    /// clip start, start marker, and (when looping) the loop window. A
    /// local offset at or past `loop_end` wraps back into the window; a
    /// degenerate window disables wrapping. Notes before the start marker
    /// or past the end marker are not filtered here, their position is
    /// still reported.
    pub fn note_start_abs(&self, local_start: f64) -> f64 {
        let mut local = local_start;
        if self.looping {
            let span = self.loop_end - self.loop_start;
            if span > 0.0 && local >= self.loop_end {
                local = self.loop_start + (local - self.loop_start) % span;
            }
        }
        self.start_time - self.start_marker + local
    }
}

/// One note surviving projection: the raw record plus its absolute
/// timeline position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedNote {
    pub note: NoteRecord,
    pub start_abs: f64,
}

/// Normalized, locally owned snapshot of one arrangement clip and its
/// filtered, sorted note content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipProjection {
    pub id: ClipId,
    pub name: String,
    pub muted: bool,
    pub timing: ClipTiming,
    /// Unmuted notes, ascending by clip-local start (stable for ties)
    pub notes: Vec<ProjectedNote>,
}

impl ClipProjection {
    /// Builds the projection from raw extraction output: drops muted
    /// notes, stable-sorts by local start, computes absolute positions.
    pub fn build(
        id: ClipId,
        name: String,
        muted: bool,
        timing: ClipTiming,
        raw: Vec<NoteRecord>,
    ) -> Self {
        let mut kept: Vec<NoteRecord> = raw.into_iter().filter(|n| !n.mute).collect();
        kept.sort_by(|a, b| a.start.total_cmp(&b.start));

        let notes = kept
            .into_iter()
            .map(|note| ProjectedNote {
                note,
                start_abs: timing.note_start_abs(note.start),
            })
            .collect();

        Self {
            id,
            name,
            muted,
            timing,
            notes,
        }
    }
}
