//! Timeline serialization with versioning and migration.
//!
//! Uses JSON with a schema version field for forward-compatible persistence.

use framestudio_core::{FrameStudioError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::layout;
use crate::segment::SegmentList;

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Versioned timeline file wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFile {
    /// Schema version for migration.
    pub version: u32,
    /// Document this timeline belongs to.
    pub document_id: Uuid,
    /// Segments in timeline order.
    pub segments: SegmentList,
    /// Application version that wrote this file.
    pub app_version: String,
}

impl TimelineFile {
    /// Wrap a committed segment list.
    pub fn new(document_id: Uuid, segments: SegmentList) -> Self {
        Self {
            version: CURRENT_VERSION,
            document_id,
            segments,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| {
            FrameStudioError::Serialization(format!("Failed to serialize timeline: {}", e))
        })
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| {
            FrameStudioError::Serialization(format!("Failed to serialize timeline: {}", e))
        })
    }

    /// Deserialize from JSON bytes, applying migrations if needed.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_slice(data)
            .map_err(|e| FrameStudioError::Serialization(format!("Invalid JSON: {}", e)))?;
        Self::from_value(raw)
    }

    /// Deserialize from a JSON value, applying migrations if needed.
    ///
    /// Positions are recomputed when the stored layout is inconsistent, since
    /// files may have been written by hand.
    pub fn from_value(raw: serde_json::Value) -> Result<Self> {
        let version = raw.get("version").and_then(|v| v.as_u64()).unwrap_or(0) as u32;

        if version > CURRENT_VERSION {
            return Err(FrameStudioError::Serialization(format!(
                "Timeline file version {} is newer than supported version {}",
                version, CURRENT_VERSION
            )));
        }

        let migrated = migrate(raw, version)?;

        let mut file: Self = serde_json::from_value(migrated).map_err(|e| {
            FrameStudioError::Serialization(format!("Failed to parse timeline: {}", e))
        })?;

        if let Err(violation) = layout::check_invariants(&file.segments) {
            warn!(%violation, "Stored timeline layout inconsistent, recomputing");
            file.segments = layout::recompute_positions(&file.segments);
        }
        Ok(file)
    }

    /// Save the timeline to a file path.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load a timeline from a file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Apply sequential migrations from `from_version` to CURRENT_VERSION.
fn migrate(mut data: serde_json::Value, from_version: u32) -> Result<serde_json::Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 → v1: a bare segment array with no document id
                if data.is_array() {
                    data = serde_json::json!({
                        "version": 1,
                        "document_id": Uuid::nil(),
                        "segments": data,
                        "app_version": "0.1.0",
                    });
                }
                version = 1;
            }
            _ => {
                return Err(FrameStudioError::Serialization(format!(
                    "No migration path from version {}",
                    version
                )));
            }
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use framestudio_core::{FrameId, SegmentId};

    fn sample() -> TimelineFile {
        let segments = SegmentList::new()
            .append(FrameId(1))
            .append(FrameId(2))
            .retime(SegmentId(1), 50.0);
        TimelineFile::new(Uuid::new_v4(), segments)
    }

    #[test]
    fn json_roundtrip() {
        let file = sample();
        let bytes = file.to_json().unwrap();
        assert_eq!(TimelineFile::from_json(&bytes).unwrap(), file);
    }

    #[test]
    fn migrates_bare_array() {
        let data = br#"[
            {"id": 1, "time": 100.0, "position": 0.0, "gap": 10.0, "frame": 1},
            {"id": 2, "time": 100.0, "position": 210.0, "gap": 10.0, "frame": 2}
        ]"#;
        let file = TimelineFile::from_json(data).unwrap();
        assert_eq!(file.version, CURRENT_VERSION);
        assert_eq!(file.document_id, Uuid::nil());
        assert_eq!(file.segments.len(), 2);
    }

    #[test]
    fn inconsistent_positions_are_recomputed() {
        let data = br#"[
            {"id": 1, "time": 25.0, "position": 0.0, "gap": 10.0, "frame": 1},
            {"id": 2, "time": 100.0, "position": 210.0, "gap": 10.0, "frame": 2}
        ]"#;
        let file = TimelineFile::from_json(data).unwrap();
        assert_eq!(file.segments.as_slice()[1].position, 60.0);
    }

    #[test]
    fn rejects_future_version() {
        let data = br#"{"version": 99, "document_id": "00000000-0000-0000-0000-000000000000", "segments": [], "app_version": "9"}"#;
        assert!(matches!(
            TimelineFile::from_json(data),
            Err(FrameStudioError::Serialization(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(TimelineFile::from_json(b"not json").is_err());
    }
}
