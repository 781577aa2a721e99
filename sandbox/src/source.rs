//! Producers of per-tick geometry. Real capture and thresholding live outside
//! this crate; these sources replay recorded frames or synthesize a board.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use whiteboard_shared::{vec2, Frame, OrientedRect, Recording};

use crate::error::SandboxError;

pub trait FrameSource {
    /// Pixel dimensions of every frame this source produces.
    fn frame_size(&self) -> (u32, u32);

    /// Next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Option<Frame>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn frame_size(&self) -> (u32, u32) {
        (**self).frame_size()
    }

    fn next_frame(&mut self) -> Option<Frame> {
        (**self).next_frame()
    }
}

/// Plays back a recorded session.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    recording: Recording,
    looping: bool,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(recording: Recording, looping: bool) -> Result<Self, SandboxError> {
        if recording.frames.is_empty() {
            return Err(SandboxError::EmptySource);
        }
        recording.validate().map_err(SandboxError::InvalidRecording)?;
        Ok(Self {
            recording,
            looping,
            cursor: 0,
        })
    }

    pub fn from_path(path: &Path, looping: bool) -> Result<Self, SandboxError> {
        let text = std::fs::read_to_string(path).map_err(|source| SandboxError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let recording: Recording =
            serde_json::from_str(&text).map_err(|source| SandboxError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(
            path = %path.display(),
            frames = recording.frames.len(),
            looping,
            "loaded recording"
        );
        Self::new(recording, looping)
    }

    pub fn len(&self) -> usize {
        self.recording.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recording.frames.is_empty()
    }
}

impl FrameSource for ReplaySource {
    fn frame_size(&self) -> (u32, u32) {
        // Non-empty and uniform after validation.
        let first = &self.recording.frames[0];
        (first.width, first.height)
    }

    fn next_frame(&mut self) -> Option<Frame> {
        if self.cursor >= self.recording.frames.len() {
            if !self.looping {
                return None;
            }
            self.cursor = 0;
        }
        let frame = self.recording.frames[self.cursor].clone();
        self.cursor += 1;
        Some(frame)
    }
}

/// A stroke on the synthetic board, in fractions of the frame size.
#[derive(Debug, Clone, Copy)]
struct Stroke {
    cx: f32,
    cy: f32,
    length: f32,
    thickness: f32,
    angle: f32,
}

const STROKES: [Stroke; 4] = [
    Stroke { cx: 0.45, cy: 0.30, length: 0.40, thickness: 10.0, angle: 18.0 },
    Stroke { cx: 0.30, cy: 0.55, length: 0.35, thickness: 8.0, angle: -14.0 },
    Stroke { cx: 0.70, cy: 0.70, length: 0.30, thickness: 12.0, angle: 9.0 },
    Stroke { cx: 0.20, cy: 0.85, length: 0.15, thickness: 6.0, angle: 60.0 },
];

/// Camera-shake jitter applied to every stroke each frame (pixels / degrees).
const JITTER_PX: f32 = 0.5;
const JITTER_DEG: f32 = 0.3;
/// Noise specks per frame; all below the default area threshold.
const MAX_SPECKS: usize = 4;
const MAX_SPECK_SIDE: f32 = 8.0;

/// Deterministic synthetic whiteboard: a few fixed strokes with sensor jitter
/// plus small specks of noise.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    width: u32,
    height: u32,
    rng: ChaCha8Rng,
}

impl ScriptedSource {
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Number of real strokes in every frame.
    pub fn stroke_count() -> usize {
        STROKES.len()
    }

    fn stroke_rect(&mut self, stroke: &Stroke) -> OrientedRect {
        let w = self.width as f32;
        let h = self.height as f32;
        let center = vec2(
            stroke.cx * w + self.rng.gen_range(-JITTER_PX..=JITTER_PX),
            stroke.cy * h + self.rng.gen_range(-JITTER_PX..=JITTER_PX),
        );
        let angle = stroke.angle + self.rng.gen_range(-JITTER_DEG..=JITTER_DEG);
        OrientedRect::new(center, stroke.length * w, stroke.thickness, angle)
    }

    fn speck(&mut self) -> OrientedRect {
        let center = vec2(
            self.rng.gen_range(0.0..self.width as f32),
            self.rng.gen_range(0.0..self.height as f32),
        );
        let side_a = self.rng.gen_range(0.5..MAX_SPECK_SIDE);
        let side_b = self.rng.gen_range(0.5..MAX_SPECK_SIDE);
        let angle = self.rng.gen_range(-90.0..0.0);
        OrientedRect::new(center, side_a, side_b, angle)
    }
}

impl FrameSource for ScriptedSource {
    fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn next_frame(&mut self) -> Option<Frame> {
        let mut rects = Vec::with_capacity(STROKES.len() + MAX_SPECKS);
        let specks = self.rng.gen_range(0..=MAX_SPECKS);
        // Interleave noise with strokes the way contour order would.
        for (i, stroke) in STROKES.iter().enumerate() {
            if i < specks {
                let speck = self.speck();
                rects.push(speck);
            }
            let rect = self.stroke_rect(stroke);
            rects.push(rect);
        }
        Some(Frame {
            width: self.width,
            height: self.height,
            rects,
        })
    }
}
