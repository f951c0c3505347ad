//! Gesture recording and looped playback of the pointer signal.

use std::collections::VecDeque;

use crate::signal::PointerSample;

/// A release with fewer samples than this never closes into a loop.
pub const MIN_RECORDED_SAMPLES: usize = 2;
/// A closed path shorter than this is not played back.
pub const MIN_PLAYBACK_SAMPLES: usize = 5;
/// Spacing of the samples that walk the path back to its start.
pub const PIXELS_PER_SEGMENT: f64 = 3.0;

/// Ordered pointer samples. Treated as a ring once playback starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedPath {
    samples: VecDeque<PointerSample>,
}

impl RecordedPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: PointerSample) {
        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<PointerSample> {
        self.samples.front().copied()
    }

    pub fn last(&self) -> Option<PointerSample> {
        self.samples.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointerSample> {
        self.samples.iter()
    }

    /// Appends straight-line samples from the last point back towards the
    /// first one, so an open gesture replays as a loop. Returns how many
    /// samples were appended.
    pub fn close_loop(&mut self) -> usize {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return 0;
        };
        if self.samples.len() < MIN_RECORDED_SAMPLES {
            return 0;
        }

        let dx = last.x - first.x;
        let dy = last.y - first.y;
        let segments = (first.distance(last) / PIXELS_PER_SEGMENT).floor() as usize;
        for i in 0..segments {
            let f = i as f64 / segments as f64;
            self.samples
                .push_back(PointerSample::new(last.x - dx * f, last.y - dy * f));
        }
        segments
    }

    /// Rotates the ring by one: the head becomes the tail and is returned.
    pub fn advance(&mut self) -> Option<PointerSample> {
        let head = self.samples.pop_front()?;
        self.samples.push_back(head);
        Some(head)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Looping,
}

/// Result of releasing a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Release without a preceding press.
    Ignored,
    /// Too few samples; back to idle.
    Rejected { samples: usize },
    /// Playback started over a ring of `samples` points.
    Looping { samples: usize },
}

/// `Idle -> Recording -> Looping`, with a new press or [`PathRecorder::reset`]
/// as the way out of `Looping`.
#[derive(Debug, Clone)]
pub struct PathRecorder {
    state: RecorderState,
    path: RecordedPath,
}

impl Default for PathRecorder {
    fn default() -> Self {
        Self {
            state: RecorderState::Idle,
            path: RecordedPath::new(),
        }
    }
}

impl PathRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    pub fn is_playing(&self) -> bool {
        self.state == RecorderState::Looping
    }

    pub fn path(&self) -> &RecordedPath {
        &self.path
    }

    /// Starts a fresh recording, dropping any previous path or loop.
    pub fn press(&mut self) {
        self.path.clear();
        self.state = RecorderState::Recording;
        log::debug!("path recording started");
    }

    /// Appends a sample while recording. Returns whether it was kept.
    pub fn record(&mut self, sample: PointerSample) -> bool {
        if self.state != RecorderState::Recording {
            return false;
        }
        self.path.push(sample);
        true
    }

    pub fn release(&mut self) -> ReleaseOutcome {
        if self.state != RecorderState::Recording {
            return ReleaseOutcome::Ignored;
        }

        let recorded = self.path.len();
        if recorded < MIN_RECORDED_SAMPLES {
            self.state = RecorderState::Idle;
            log::debug!("path rejected: {recorded} recorded samples");
            return ReleaseOutcome::Rejected { samples: recorded };
        }

        let appended = self.path.close_loop();
        let total = self.path.len();
        if total < MIN_PLAYBACK_SAMPLES {
            self.state = RecorderState::Idle;
            log::debug!("path rejected: {total} samples after closing");
            return ReleaseOutcome::Rejected { samples: total };
        }

        self.state = RecorderState::Looping;
        log::debug!("path closed with {appended} extra samples, looping over {total}");
        ReleaseOutcome::Looping { samples: total }
    }

    /// Next playback position, one per display frame.
    pub fn advance(&mut self) -> Option<PointerSample> {
        if self.state != RecorderState::Looping {
            return None;
        }
        self.path.advance()
    }

    pub fn reset(&mut self) {
        self.path.clear();
        self.state = RecorderState::Idle;
    }
}
