//! Tunable color channels and their mapping to shader coefficients.

use serde::{Deserialize, Serialize};

/// Lower bound of a channel as exposed by the sliders.
pub const CHANNEL_MIN: f64 = 0.0;
/// Upper bound of a channel as exposed by the sliders.
pub const CHANNEL_MAX: f64 = 100.0;
/// Slider resolution.
pub const CHANNEL_STEP: f64 = 0.001;

/// Per-frame increments used by the cycling palette.
pub const CYCLE_STEP: ColorParameters = ColorParameters {
    r: 0.01,
    g: 0.013,
    b: 0.017,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Short name, shared by the slider ids and the shader uniforms.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "r",
            Channel::Green => "g",
            Channel::Blue => "b",
        }
    }
}

/// The three user-facing channel values, nominally in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorParameters {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Default for ColorParameters {
    fn default() -> Self {
        Self {
            r: 30.0,
            g: 50.0,
            b: 70.0,
        }
    }
}

impl ColorParameters {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    pub fn set(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::Red => self.r = value,
            Channel::Green => self.g = value,
            Channel::Blue => self.b = value,
        }
    }

    pub fn is_in_range(&self) -> bool {
        Channel::ALL.iter().all(|&c| {
            let v = self.get(c);
            v.is_finite() && (CHANNEL_MIN..=CHANNEL_MAX).contains(&v)
        })
    }

    /// Shader coefficients for all three channels.
    pub fn coefficients(&self) -> [f32; 3] {
        [
            coefficient(self.r) as f32,
            coefficient(self.g) as f32,
            coefficient(self.b) as f32,
        ]
    }

    /// Advances every channel by `step`, wrapping back into `[0, 100)`.
    pub fn cycle(&mut self, step: ColorParameters) {
        for channel in Channel::ALL {
            let next = (self.get(channel) + step.get(channel)).rem_euclid(CHANNEL_MAX);
            self.set(channel, next);
        }
    }
}

/// Quadratic remap giving finer control near zero: `(channel / 10)^2`.
pub fn coefficient(channel: f64) -> f64 {
    let scaled = channel / 10.0;
    scaled * scaled
}
