use serde::{Deserialize, Serialize};

use crate::rect::OrientedRect;

/// Recording format version - increment when making breaking changes.
pub const RECORDING_VERSION: u32 = 1;

// === Vision pipeline -> core ===

/// One tick's worth of geometry extracted from a thresholded camera frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Source frame width in pixels.
    pub width: u32,
    /// Source frame height in pixels.
    pub height: u32,
    #[serde(default)]
    pub rects: Vec<OrientedRect>,
}

impl Frame {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rects: Vec::new(),
        }
    }
}

// === On-disk replay ===

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub version: u32,
    pub frames: Vec<Frame>,
}

impl Recording {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            version: RECORDING_VERSION,
            frames,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.version != RECORDING_VERSION {
            return Err(format!(
                "unsupported recording version {} (expected {})",
                self.version, RECORDING_VERSION
            ));
        }
        let Some(first) = self.frames.first() else {
            return Err("recording has no frames".to_string());
        };
        if first.width == 0 || first.height == 0 {
            return Err("frame dimensions must be > 0".to_string());
        }
        if self
            .frames
            .iter()
            .any(|f| f.width != first.width || f.height != first.height)
        {
            return Err("all frames must share the same dimensions".to_string());
        }
        Ok(())
    }
}
