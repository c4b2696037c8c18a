//! Note values and the two host note-payload framings

use serde::{Deserialize, Serialize};

use crate::error::{MirrorError, Result};
use crate::value::HostValue;

/// Shortest note the host accepts; anything below is floored on write-back.
pub const MIN_DURATION: f64 = 1.0 / 128.0;

/// A single note as delivered by the host. Raw fields keep whatever the
/// host sent; the `*_clamped` accessors produce host-safe encodings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// MIDI note number (0-127 once clamped)
    pub pitch: i32,
    /// Start offset in beats, clip-local
    #[serde(rename = "start_time")]
    pub start: f64,
    /// Duration in beats
    pub duration: f64,
    /// Velocity (0-127 once clamped)
    pub velocity: f64,
    /// Mute flag; the host encodes it as 0/1
    #[serde(with = "int_bool")]
    pub mute: bool,
}

impl NoteRecord {
    pub fn new(pitch: i32, start: f64, duration: f64, velocity: f64, mute: bool) -> Self {
        Self {
            pitch,
            start,
            duration,
            velocity,
            mute,
        }
    }

    pub fn pitch_clamped(&self) -> u8 {
        self.pitch.clamp(0, 127) as u8
    }

    pub fn velocity_clamped(&self) -> u8 {
        self.velocity.clamp(0.0, 127.0).round() as u8
    }

    pub fn start_clamped(&self) -> f64 {
        if self.start <= 0.0 {
            return 0.0;
        }
        self.start
    }

    pub fn duration_floored(&self) -> f64 {
        if self.duration <= MIN_DURATION {
            return MIN_DURATION;
        }
        self.duration
    }

    /// Host-safe field tuple for the write-back framing, clamped at the
    /// point of transmission.
    pub fn to_host_values(&self) -> [HostValue; 5] {
        [
            HostValue::Int(self.pitch_clamped() as i64),
            HostValue::Float(self.start_clamped()),
            HostValue::Float(self.duration_floored()),
            HostValue::Int(self.velocity_clamped() as i64),
            HostValue::Int(self.mute as i64),
        ]
    }
}

/// The extended payload is a JSON document `{"notes":[...]}`; unknown
/// per-note fields (probability, deviation, ...) are ignored.
#[derive(Debug, Deserialize)]
struct ExtendedPayload {
    notes: Vec<NoteRecord>,
}

pub fn parse_extended_notes(json: &str) -> Result<Vec<NoteRecord>> {
    let payload: ExtendedPayload = serde_json::from_str(json)?;
    Ok(payload.notes)
}

/// Parses the legacy flat framing:
/// `notes <count> [note <pitch> <start> <dur> <vel> <mute>]... done`.
pub fn parse_legacy_notes(values: &[HostValue]) -> Result<Vec<NoteRecord>> {
    let mut iter = values.iter();

    match iter.next().and_then(HostValue::as_str) {
        Some("notes") => {}
        _ => {
            return Err(MirrorError::MalformedNotes(
                "missing 'notes' header".to_string(),
            ))
        }
    }
    let count = iter
        .next()
        .and_then(HostValue::as_i64)
        .ok_or_else(|| MirrorError::MalformedNotes("missing note count".to_string()))?;
    if count < 0 {
        return Err(MirrorError::MalformedNotes(format!(
            "negative note count: {count}"
        )));
    }

    // The declared count is untrusted host input; never preallocate from it
    let mut notes = Vec::new();
    loop {
        match iter.next() {
            Some(v) if v.as_str() == Some("note") => {}
            Some(v) if v.as_str() == Some("done") => break,
            Some(v) => {
                return Err(MirrorError::MalformedNotes(format!(
                    "unexpected frame marker: {v:?}"
                )))
            }
            None => {
                return Err(MirrorError::MalformedNotes(
                    "missing 'done' terminator".to_string(),
                ))
            }
        }

        let mut field = |name: &'static str| -> Result<f64> {
            iter.next()
                .and_then(HostValue::as_f64)
                .ok_or_else(|| MirrorError::MalformedNotes(format!("bad {name} field")))
        };
        let pitch = field("pitch")?;
        let start = field("start")?;
        let duration = field("duration")?;
        let velocity = field("velocity")?;
        let mute = field("mute")?;

        notes.push(NoteRecord::new(
            pitch as i32,
            start,
            duration,
            velocity,
            mute != 0.0,
        ));
    }

    if notes.len() as i64 != count {
        return Err(MirrorError::MalformedNotes(format!(
            "declared {count} notes, framed {}",
            notes.len()
        )));
    }
    Ok(notes)
}

/// 0/1 integers (the host's boolean encoding) <-> bool. Accepts a plain
/// JSON bool too, since some host versions emit one.
mod int_bool {
    use serde::de::{self, Deserializer, Unexpected};
    use serde::{Deserialize, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*value as i64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Num(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => Ok(b),
            Raw::Num(n) if n == 0.0 => Ok(false),
            Raw::Num(n) if n == 1.0 => Ok(true),
            Raw::Num(n) => Err(de::Error::invalid_value(
                Unexpected::Float(n),
                &"0 or 1",
            )),
        }
    }
}
