//! Debounced autosave.
//!
//! Content changes schedule a save; the save only reaches the sink once no
//! further change arrived for a full settling period. Each new change restarts
//! the period and replaces the pending request.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use framestudio_canvas::ContainerId;
use framestudio_core::{FrameId, FrameStudioError, Result};
use framestudio_timeline::TimelineFile;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Payload handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Serialized [`EditorDocument`].
    pub serialized_state: String,
    pub width: u32,
    pub height: u32,
}

/// Surface contents of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameState {
    pub frame: FrameId,
    pub container: ContainerId,
    pub state: serde_json::Value,
}

/// Everything needed to restore an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorDocument {
    pub timeline: TimelineFile,
    pub frames: Vec<FrameState>,
    pub active_frame: Option<FrameId>,
}

impl EditorDocument {
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            FrameStudioError::Serialization(format!("Failed to serialize document: {}", e))
        })
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(data)
            .map_err(|e| FrameStudioError::Serialization(format!("Invalid JSON: {}", e)))?;
        let timeline = raw
            .get("timeline")
            .cloned()
            .ok_or_else(|| FrameStudioError::Serialization("missing timeline".into()))?;
        let timeline = TimelineFile::from_value(timeline)?;
        let frames = raw
            .get("frames")
            .cloned()
            .map(serde_json::from_value::<Vec<FrameState>>)
            .transpose()
            .map_err(|e| FrameStudioError::Serialization(format!("Invalid frames: {}", e)))?
            .unwrap_or_default();
        let active_frame = raw
            .get("active_frame")
            .cloned()
            .map(serde_json::from_value::<Option<FrameId>>)
            .transpose()
            .map_err(|e| FrameStudioError::Serialization(format!("Invalid active frame: {}", e)))?
            .flatten();
        Ok(Self {
            timeline,
            frames,
            active_frame,
        })
    }
}

/// Destination of autosaves.
pub trait SaveSink {
    fn save(&mut self, request: SaveRequest) -> Result<()>;
}

impl<T> SaveSink for T
where
    T: FnMut(SaveRequest) -> Result<()>,
{
    fn save(&mut self, request: SaveRequest) -> Result<()> {
        self(request)
    }
}

/// Writes the serialized state to a file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SaveSink for FileSink {
    fn save(&mut self, request: SaveRequest) -> Result<()> {
        std::fs::write(&self.path, request.serialized_state.as_bytes())?;
        info!(path = %self.path.display(), "Autosaved document");
        Ok(())
    }
}

/// Trailing-edge debouncer in front of a [`SaveSink`].
pub struct Autosave<S> {
    sink: S,
    debounce: Duration,
    pending: Option<(SaveRequest, Instant)>,
    saved: usize,
}

impl<S: SaveSink> Autosave<S> {
    pub fn new(sink: S, debounce: Duration) -> Self {
        Self {
            sink,
            debounce,
            pending: None,
            saved: 0,
        }
    }

    /// Queue `request`, replacing any pending one and restarting the timer.
    pub fn schedule(&mut self, request: SaveRequest, now: Instant) {
        debug!(bytes = request.serialized_state.len(), "Scheduled autosave");
        self.pending = Some((request, now));
    }

    /// Deliver the pending request if it has settled. Returns whether a save
    /// was delivered.
    pub fn poll(&mut self, now: Instant) -> Result<bool> {
        let settled = match &self.pending {
            Some((_, at)) => now.saturating_duration_since(*at) >= self.debounce,
            None => false,
        };
        if settled {
            self.flush()
        } else {
            Ok(false)
        }
    }

    /// Deliver the pending request immediately.
    ///
    /// On failure the request stays pending and is retried on the next poll.
    pub fn flush(&mut self) -> Result<bool> {
        let Some((request, at)) = self.pending.take() else {
            return Ok(false);
        };
        if let Err(e) = self.sink.save(request.clone()) {
            self.pending = Some((request, at));
            return Err(e);
        }
        self.saved += 1;
        Ok(true)
    }

    /// Time left before the pending request settles.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, at)| self.debounce.saturating_sub(now.saturating_duration_since(*at)))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of requests delivered so far.
    pub fn saved(&self) -> usize {
        self.saved
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
