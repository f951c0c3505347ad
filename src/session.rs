//! The single mutable render state shared by input handlers and the frame loop.

use crate::color::{Channel, ColorParameters, CYCLE_STEP};
use crate::config::{PaletteKind, SceneConfig};
use crate::frame::{FrameUniforms, Renderer};
use crate::path::{PathRecorder, ReleaseOutcome};
use crate::presets::{KeyValueStore, Preset, PresetError, PresetLibrary};
use crate::signal::{drift, CanvasSize, PointerSample, SignalMode};

/// What happened to a pointer-move event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Became the live position.
    Applied,
    /// Became the live position and was appended to the recording.
    Recorded,
    /// Ignored because a recorded path is playing; the host should prevent
    /// the event's default action.
    Suppressed,
}

#[derive(Debug, Clone)]
pub struct Session {
    palette: PaletteKind,
    drifting: bool,
    pointer: PointerSample,
    recorder: PathRecorder,
    colors: ColorParameters,
}

impl Session {
    pub fn new(config: &SceneConfig, size: CanvasSize) -> Self {
        Self {
            palette: config.palette,
            drifting: true,
            pointer: size.center(),
            recorder: PathRecorder::new(),
            colors: config.initial_colors,
        }
    }

    /// Where the pointer position currently comes from. Playback wins over
    /// live input, live input wins over drift.
    pub fn mode(&self) -> SignalMode {
        if self.recorder.is_playing() {
            SignalMode::Playback
        } else if self.drifting {
            SignalMode::Drift
        } else {
            SignalMode::Live
        }
    }

    pub fn is_animating(&self) -> bool {
        self.mode() == SignalMode::Drift
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn is_playing(&self) -> bool {
        self.recorder.is_playing()
    }

    pub fn pointer(&self) -> PointerSample {
        self.pointer
    }

    pub fn colors(&self) -> ColorParameters {
        self.colors
    }

    pub fn set_channel(&mut self, channel: Channel, value: f64) {
        self.colors.set(channel, value);
    }

    pub fn set_colors(&mut self, colors: ColorParameters) {
        self.colors = colors;
    }

    pub fn pointer_moved(&mut self, sample: PointerSample) -> MoveOutcome {
        if self.recorder.is_playing() {
            return MoveOutcome::Suppressed;
        }
        if self.drifting {
            log::debug!("pointer input took over from drift");
            self.drifting = false;
        }
        self.pointer = sample;
        if self.recorder.record(sample) {
            MoveOutcome::Recorded
        } else {
            MoveOutcome::Applied
        }
    }

    /// Press gesture: starts a new recording, superseding any playback.
    pub fn press(&mut self) {
        self.recorder.press();
    }

    pub fn release(&mut self) -> ReleaseOutcome {
        self.recorder.release()
    }

    /// Moves playback one sample forward. `None` when nothing is playing.
    pub fn advance_playback(&mut self) -> Option<PointerSample> {
        let sample = self.recorder.advance()?;
        self.pointer = sample;
        Some(sample)
    }

    /// Drops any recording or playback and hands the pointer back to drift.
    pub fn reset(&mut self) {
        self.recorder.reset();
        self.drifting = true;
        log::debug!("session reset to drift");
    }

    /// Resolves this frame's uniforms. Drift and color cycling advance here.
    pub fn frame(&mut self, now_ms: f64, size: CanvasSize) -> FrameUniforms {
        if self.mode() == SignalMode::Drift {
            self.pointer = drift(now_ms, size);
        }
        if self.palette == PaletteKind::Cycling {
            self.colors.cycle(CYCLE_STEP);
        }
        FrameUniforms {
            canvas_size: [size.width as f32, size.height as f32],
            time: (now_ms / 1000.0) as f32,
            mouse: [self.pointer.x as f32, self.pointer.y as f32],
            coefficients: self.colors.coefficients(),
        }
    }

    /// One render-loop tick: resolve, push, draw.
    pub fn tick<R: Renderer + ?Sized>(&mut self, now_ms: f64, size: CanvasSize, renderer: &mut R) {
        self.frame(now_ms, size).submit(renderer);
    }

    pub fn save_preset<S: KeyValueStore>(
        &self,
        library: &mut PresetLibrary<S>,
        name: &str,
    ) -> Result<(), PresetError> {
        library.save(name, self.colors)
    }

    /// Replaces all three channels from a stored preset. On failure the
    /// channels are left as they were.
    pub fn load_preset<S: KeyValueStore>(
        &mut self,
        library: &PresetLibrary<S>,
        name: &str,
    ) -> Result<Preset, PresetError> {
        let preset = library.load(name)?;
        self.colors = preset.colors;
        log::info!("loaded preset '{}'", preset.name);
        Ok(preset)
    }
}
